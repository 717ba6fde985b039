use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::card::composition::CardComposition;
use crate::foundation::core::CANONICAL_SIZE;
use crate::foundation::error::{CardError, CardResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CardRasterizer;
use crate::render::fonts::FontBook;

const EXPORT_SUFFIX: &str = "_mesh_gradient.png";
const FALLBACK_STEM: &str = "coffee";

/// The canonical 1200x1200 render target.
///
/// Export is only possible once the target is mounted with its fonts; an unmounted target
/// refuses to produce any bytes.
#[derive(Debug, Default)]
pub struct ExportTarget {
    rasterizer: Option<CardRasterizer>,
}

impl ExportTarget {
    pub fn unmounted() -> Self {
        Self::default()
    }

    pub fn mount(fonts: FontBook) -> Self {
        Self {
            rasterizer: Some(CardRasterizer::new(fonts)),
        }
    }

    pub fn unmount(&mut self) {
        self.rasterizer = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.rasterizer.is_some()
    }

    fn rasterizer(&mut self) -> CardResult<&mut CardRasterizer> {
        self.rasterizer
            .as_mut()
            .ok_or_else(|| CardError::target_unavailable("export target is not mounted"))
    }

    /// Canonical frame, always rendered at scale factor 1.
    #[tracing::instrument(level = "debug", skip(self, comp))]
    pub fn export(&mut self, comp: &CardComposition) -> CardResult<FrameRGBA> {
        let frame = self.rasterizer()?.render(comp, 1.0)?;
        if frame.width != CANONICAL_SIZE || frame.height != CANONICAL_SIZE {
            return Err(CardError::render(format!(
                "export produced {}x{}, expected {CANONICAL_SIZE}x{CANONICAL_SIZE}",
                frame.width, frame.height
            )));
        }
        Ok(frame)
    }

    /// Scaled preview through the same rasterizer as [`ExportTarget::export`].
    pub fn preview(&mut self, comp: &CardComposition, width: u32) -> CardResult<FrameRGBA> {
        self.rasterizer()?.render_preview(comp, width)
    }

    pub fn export_png(&mut self, comp: &CardComposition) -> CardResult<Vec<u8>> {
        encode_png(self.export(comp)?)
    }

    /// Write `<bean name>_mesh_gradient.png` into `dir` and return its path.
    pub fn export_to_dir(
        &mut self,
        comp: &CardComposition,
        dir: impl AsRef<Path>,
    ) -> CardResult<PathBuf> {
        let dir = dir.as_ref();
        let png = self.export_png(comp)?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(export_file_name(&comp.bean.bean_name));
        std::fs::write(&path, &png).with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = png.len(), "exported card");
        Ok(path)
    }
}

/// PNG bytes with straight alpha.
pub fn encode_png(frame: FrameRGBA) -> CardResult<Vec<u8>> {
    let frame = frame.into_straight();
    let (width, height) = (frame.width, frame.height);
    let img = image::RgbaImage::from_raw(width, height, frame.data)
        .ok_or_else(|| CardError::render("frame byte length does not match its size"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| CardError::render(format!("encode png: {e}")))?;
    Ok(buf)
}

/// `<sanitized bean name>_mesh_gradient.png`.
pub fn export_file_name(bean_name: &str) -> String {
    let replaced: String = bean_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    format!("{stem}{EXPORT_SUFFIX}")
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
