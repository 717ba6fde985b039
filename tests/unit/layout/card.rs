use super::*;
use crate::card::composition::DisplayConfig;
use crate::fixtures::{blend_bean, composition, single_origin_bean};
use crate::layout::wrap::EmMeasure;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn background_only_suppresses_every_overlay() {
    let comp = composition(blend_bean(), DisplayConfig::background_only());
    let l = layout(&comp, 1.0, &mut EmMeasure).unwrap();
    assert!(!l.has_overlays());
    assert!(l.text_blocks().is_empty());
    assert_eq!(l.size, Size::new(1200.0, 1200.0));
}

#[test]
fn flavor_notes_cap_at_five_in_original_order() {
    let mut bean = single_origin_bean();
    bean.flavor_notes = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
    let comp = composition(bean, DisplayConfig::default());
    let l = layout(&comp, 1.0, &mut EmMeasure).unwrap();
    let flavor = l.flavor.unwrap();
    assert_eq!(flavor.texts(), ["# A", "# B", "# C", "# D", "# E"]);
    assert!(approx(flavor.bounds.y1, 1200.0 - CARD_INSET));
}

#[test]
fn empty_flavor_notes_render_nothing() {
    let mut bean = single_origin_bean();
    bean.flavor_notes.clear();
    let comp = composition(bean, DisplayConfig::default());
    let l = layout(&comp, 1.0, &mut EmMeasure).unwrap();
    assert!(l.flavor.is_none());
}

#[test]
fn intensity_fill_matches_value_for_every_step() {
    for v in 1..=10u8 {
        let mut bean = single_origin_bean();
        bean.intensity = crate::bean::model::IntensityProfile::new(v, v, v).unwrap();
        let comp = composition(bean, DisplayConfig::default());
        let l = layout(&comp, 1.0, &mut EmMeasure).unwrap();
        let rows = &l.intensity.unwrap().rows;
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert!(approx(row.fill_percent, f64::from(v) * 10.0));
            assert!(approx(row.fill.width(), TRACK_WIDTH * f64::from(v) / 10.0));
            assert!(approx(row.track.width(), TRACK_WIDTH));
            assert!(approx(row.fill.x0, row.track.x0));
        }
    }
}

#[test]
fn intensity_rows_are_ordered_and_anchored_bottom_right() {
    let comp = composition(single_origin_bean(), DisplayConfig::default());
    let block = layout(&comp, 1.0, &mut EmMeasure).unwrap().intensity.unwrap();
    let labels: Vec<&str> = block.rows.iter().map(|r| r.label.lines[0].text.as_str()).collect();
    assert_eq!(labels, ["Acidity", "Sweetness", "Body"]);
    assert_eq!(
        block.rows.iter().map(|r| r.value).collect::<Vec<_>>(),
        [8, 6, 3]
    );
    assert!(approx(block.bounds.x1, 1200.0 - CARD_INSET));
    assert!(approx(block.bounds.y1, 1200.0 - CARD_INSET));
    assert!(block.rows[0].track.y1 < block.rows[1].label.bounds.y0);
}

#[test]
fn blend_ratios_follow_name_and_hide_with_it() {
    let comp = composition(blend_bean(), DisplayConfig::default());
    let l = layout(&comp, 1.0, &mut EmMeasure).unwrap();
    let name = l.name.as_ref().unwrap();
    let blend = l.blend.as_ref().unwrap();
    assert_eq!(blend.texts(), ["Brazil: 60%", "Colombia: 40%"]);
    assert!(approx(blend.bounds.y0, name.bounds.y1 + BLEND_GAP));

    let display = DisplayConfig {
        show_name: false,
        ..DisplayConfig::default()
    };
    let comp = composition(blend_bean(), display);
    let l = layout(&comp, 1.0, &mut EmMeasure).unwrap();
    assert!(l.name.is_none());
    assert!(l.blend.is_none());
}

#[test]
fn single_origin_never_shows_blend_block() {
    let comp = composition(single_origin_bean(), DisplayConfig::default());
    let l = layout(&comp, 1.0, &mut EmMeasure).unwrap();
    assert!(l.blend.is_none());
}

#[test]
fn long_name_wraps_within_eighty_percent_of_width() {
    let mut comp = composition(single_origin_bean(), DisplayConfig::default());
    comp.display_name = "Finca El Paraiso Double Anaerobic Lychee Geisha".to_owned();
    let mut m = EmMeasure;
    let l = layout(&comp, 1.0, &mut m).unwrap();
    let name = l.name.unwrap();
    assert!(name.lines.len() > 1);
    for line in &name.lines {
        assert!(line.bounds.width() <= 1200.0 * NAME_MAX_WIDTH_FRACTION + 1e-9);
        assert!(approx(line.bounds.height(), NAME_FONT_SIZE * NAME_LINE_HEIGHT));
    }
}

#[test]
fn geometry_scales_linearly() {
    let comp = composition(blend_bean(), DisplayConfig::default());
    let full = layout(&comp, 1.0, &mut EmMeasure).unwrap();
    let half = layout(&comp, 0.5, &mut EmMeasure).unwrap();

    assert!(approx(half.corner_radius, full.corner_radius * 0.5));
    let (fb, hb) = (full.blend.unwrap(), half.blend.unwrap());
    assert!(approx(hb.font_size, fb.font_size * 0.5));
    assert!(approx(hb.bounds.y0, fb.bounds.y0 * 0.5));

    let (fi, hi) = (full.intensity.unwrap(), half.intensity.unwrap());
    for (f, h) in fi.rows.iter().zip(&hi.rows) {
        assert!(approx(h.track.x0, f.track.x0 * 0.5));
        assert!(approx(h.track.y0, f.track.y0 * 0.5));
        assert!(approx(h.fill.width(), f.fill.width() * 0.5));
    }
}

#[test]
fn invalid_scale_is_rejected() {
    let comp = composition(single_origin_bean(), DisplayConfig::default());
    assert!(layout(&comp, f64::NAN, &mut EmMeasure).is_err());
    assert!(layout(&comp, -1.0, &mut EmMeasure).is_err());
}
