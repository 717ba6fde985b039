/// Measures horizontal advance of a single unbroken line of text.
pub trait TextMeasure {
    fn advance(&mut self, text: &str, font_size: f64) -> f64;
}

/// Font-free measure using per-character em widths.
///
/// Used for previews and tests where no font bytes are loaded. Wide scripts (Hangul, CJK)
/// count as a full em.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmMeasure;

impl EmMeasure {
    fn em_width(c: char) -> f64 {
        match c {
            ' ' => 0.28,
            '\u{1100}'..='\u{11FF}'
            | '\u{3000}'..='\u{9FFF}'
            | '\u{AC00}'..='\u{D7AF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF00}'..='\u{FFEF}' => 1.0,
            'm' | 'w' | 'M' | 'W' => 0.85,
            'A'..='Z' | '0'..='9' | '%' | '#' => 0.65,
            'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.28,
            _ => 0.55,
        }
    }
}

impl TextMeasure for EmMeasure {
    fn advance(&mut self, text: &str, font_size: f64) -> f64 {
        text.chars().map(Self::em_width).sum::<f64>() * font_size
    }
}

/// Greedy word wrap on whitespace.
///
/// Words are never split unless a single word is wider than `max_width`, in which case it is
/// broken between characters. Runs of whitespace collapse to one space.
pub fn wrap_words(
    text: &str,
    max_width: f64,
    font_size: f64,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };
        if measure.advance(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if measure.advance(word, font_size) <= max_width {
            current = word.to_owned();
            continue;
        }

        for c in word.chars() {
            let mut next = current.clone();
            next.push(c);
            if !current.is_empty() && measure.advance(&next, font_size) > max_width {
                lines.push(std::mem::take(&mut current));
                current.push(c);
            } else {
                current = next;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
