use super::*;
use crate::foundation::core::Point;

#[test]
fn scale_starts_at_one_and_tracks_width() {
    let feed = ResizeFeed::new();
    let scaler = ResponsiveScaler::attach_canonical(feed.clone()).unwrap();
    assert_eq!(scaler.scale(), 1.0);

    assert!(feed.push_width(600.0));
    assert_eq!(scaler.scale(), 0.5);
    assert!(feed.push(Size::new(300.0, 900.0)));
    assert_eq!(scaler.scale(), 0.25);
}

#[test]
fn repeated_widths_are_idempotent() {
    let feed = ResizeFeed::new();
    let scaler = ResponsiveScaler::attach(feed.clone(), 1200.0).unwrap();
    for _ in 0..5 {
        feed.push_width(900.0);
    }
    assert_eq!(scaler.scale(), 0.75);
}

#[test]
fn invalid_widths_are_ignored() {
    let feed = ResizeFeed::new();
    let scaler = ResponsiveScaler::attach_canonical(feed.clone()).unwrap();
    feed.push_width(480.0);
    feed.push_width(f64::NAN);
    feed.push_width(-10.0);
    feed.push_width(f64::INFINITY);
    assert_eq!(scaler.scale(), 0.4);
}

#[test]
fn invalid_target_width_is_rejected() {
    assert!(ResponsiveScaler::attach(ResizeFeed::new(), 0.0).is_err());
    assert!(ResponsiveScaler::attach(ResizeFeed::new(), f64::NAN).is_err());
}

#[test]
fn detach_disconnects_the_observer() {
    let feed = ResizeFeed::new();
    let scaler = ResponsiveScaler::attach_canonical(feed.clone()).unwrap();
    assert!(feed.is_observed());
    let _feed = scaler.detach();
    assert!(!feed.is_observed());
    assert!(!feed.push_width(100.0));
}

#[tokio::test]
async fn changed_resolves_with_latest_scale() {
    let feed = ResizeFeed::new();
    let mut scaler = ResponsiveScaler::attach_canonical(feed.clone()).unwrap();
    let pusher = feed.clone();
    let handle = tokio::spawn(async move {
        pusher.push_width(1800.0);
    });
    let scale = scaler.changed().await.unwrap();
    handle.await.unwrap();
    assert_eq!(scale, 1.5);
}

#[tokio::test]
async fn subscribers_see_scale_changes_independently() {
    let feed = ResizeFeed::new();
    let scaler = ResponsiveScaler::attach_canonical(feed.clone()).unwrap();
    let mut rx = scaler.subscribe();
    assert_eq!(*rx.borrow(), 1.0);

    feed.push_width(600.0);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 0.5);

    feed.push_width(600.0);
    assert!(!rx.has_changed().unwrap());
    assert_eq!(scaler.scale(), 0.5);
}

#[test]
fn centered_transform_keeps_center_fixed() {
    let canonical = Size::new(1200.0, 1200.0);
    let t = PreviewTransform::centered(0.5, canonical);
    assert_eq!(t.affine * Point::new(600.0, 600.0), Point::new(600.0, 600.0));
    assert_eq!(t.affine * Point::new(0.0, 0.0), Point::new(300.0, 300.0));
    assert_eq!(t.presented_size(canonical), Size::new(600.0, 600.0));
}
