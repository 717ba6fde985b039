//! Responsive preview scaling.
//!
//! The scaler maps an observed container width onto `scale = width / target_width`. It only
//! feeds the presentation transform and the overlay layout scale; the canonical composition is
//! never touched.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::foundation::core::{Affine, CANONICAL_SIZE, Size, Vec2};
use crate::foundation::error::{CardError, CardResult};

/// Receives every observed container size.
pub type SizeCallback = Box<dyn Fn(Size) + Send + Sync>;

/// Source of container size changes (a resize observer, a window event loop, a test feed).
pub trait ContainerSizeObserver: Send {
    /// Start delivering sizes to `callback`. Replaces any previous callback.
    fn observe(&mut self, callback: SizeCallback);
    /// Stop delivering sizes. Further changes are dropped.
    fn disconnect(&mut self);
}

/// In-process observer; sizes are pushed by any clone of the feed.
#[derive(Clone, Default)]
pub struct ResizeFeed {
    callback: Arc<Mutex<Option<SizeCallback>>>,
}

impl ResizeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one size. Returns `false` when nothing is subscribed.
    pub fn push(&self, size: Size) -> bool {
        let Ok(guard) = self.callback.lock() else {
            return false;
        };
        match guard.as_ref() {
            Some(cb) => {
                cb(size);
                true
            }
            None => false,
        }
    }

    pub fn push_width(&self, width: f64) -> bool {
        self.push(Size::new(width, width))
    }

    pub fn is_observed(&self) -> bool {
        self.callback.lock().map(|g| g.is_some()).unwrap_or(false)
    }
}

impl std::fmt::Debug for ResizeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeFeed")
            .field("observed", &self.is_observed())
            .finish()
    }
}

impl ContainerSizeObserver for ResizeFeed {
    fn observe(&mut self, callback: SizeCallback) {
        if let Ok(mut guard) = self.callback.lock() {
            *guard = Some(callback);
        }
    }

    fn disconnect(&mut self) {
        if let Ok(mut guard) = self.callback.lock() {
            *guard = None;
        }
    }
}

/// Reactive `width / target_width` scale, starting at 1.
pub struct ResponsiveScaler<O: ContainerSizeObserver> {
    observer: O,
    target_width: f64,
    rx: watch::Receiver<f64>,
}

impl<O: ContainerSizeObserver> ResponsiveScaler<O> {
    /// Subscribe to `observer`. `target_width` is the canonical width, normally 1200.
    pub fn attach(mut observer: O, target_width: f64) -> CardResult<Self> {
        if !target_width.is_finite() || target_width <= 0.0 {
            return Err(CardError::validation(format!(
                "target width must be finite and > 0, got {target_width}"
            )));
        }

        let (tx, rx) = watch::channel(1.0f64);
        observer.observe(Box::new(move |size: Size| {
            let width = size.width;
            if !width.is_finite() || width < 0.0 {
                tracing::warn!(width, "ignoring invalid container width");
                return;
            }
            let scale = width / target_width;
            tx.send_if_modified(|current| {
                if *current == scale {
                    false
                } else {
                    *current = scale;
                    true
                }
            });
        }));

        Ok(Self {
            observer,
            target_width,
            rx,
        })
    }

    /// Attach against the canonical 1200 unit width.
    pub fn attach_canonical(observer: O) -> CardResult<Self> {
        Self::attach(observer, f64::from(CANONICAL_SIZE))
    }

    pub fn scale(&self) -> f64 {
        *self.rx.borrow()
    }

    pub fn target_width(&self) -> f64 {
        self.target_width
    }

    /// Independent receiver for consumers that await scale changes elsewhere.
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.rx.clone()
    }

    /// Wait for the next scale change and return it.
    pub async fn changed(&mut self) -> CardResult<f64> {
        self.rx
            .changed()
            .await
            .map_err(|_| CardError::render("container size observer was dropped"))?;
        Ok(*self.rx.borrow_and_update())
    }

    pub fn transform(&self) -> PreviewTransform {
        PreviewTransform::centered(self.scale(), Size::new(self.target_width, self.target_width))
    }

    pub fn detach(mut self) -> O {
        self.observer.disconnect();
        self.observer
    }
}

/// Presentation transform wrapped around the canonical composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewTransform {
    pub scale: f64,
    pub affine: Affine,
}

impl PreviewTransform {
    /// Scale `canonical` around its center; the result keeps the same center.
    pub fn centered(scale: f64, canonical: Size) -> Self {
        let center = Vec2::new(canonical.width / 2.0, canonical.height / 2.0);
        let affine = Affine::translate(center) * Affine::scale(scale) * Affine::translate(-center);
        Self { scale, affine }
    }

    /// Pixel size of the scaled card.
    pub fn presented_size(&self, canonical: Size) -> Size {
        Size::new(canonical.width * self.scale, canonical.height * self.scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/scaler.rs"]
mod tests;
