use super::*;

#[test]
fn up_to_four_colors_get_only_corners_in_order() {
    for n in 0..=4 {
        let pool = anchors_for(n);
        assert_eq!(pool.len(), 4);
        assert_eq!(
            pool,
            vec![
                AnchorPoint::new(0.0, 0.0),
                AnchorPoint::new(1.0, 0.0),
                AnchorPoint::new(0.0, 1.0),
                AnchorPoint::new(1.0, 1.0),
            ]
        );
    }
}

#[test]
fn more_than_four_colors_append_nine_interior_points() {
    for n in [5, 9, 13, 14, 40] {
        let pool = anchors_for(n);
        assert_eq!(pool.len(), 13);
        assert_eq!(&pool[..4], &CORNER_ANCHORS);
        assert_eq!(&pool[4..], &INTERIOR_ANCHORS);
    }
    let pool = anchors_for(5);
    assert_eq!(pool[4], AnchorPoint::new(0.5, 0.0));
    assert_eq!(pool[8], AnchorPoint::new(0.5, 0.5));
    assert_eq!(pool[12], AnchorPoint::new(0.75, 0.75));
}

#[test]
fn anchor_assignment_wraps_around_pool() {
    let pool = anchors_for(20);
    for i in 0..20 {
        assert_eq!(anchor_at(&pool, i), Some(pool[i % 13]));
    }
    assert_eq!(anchor_at(&pool, 13), Some(AnchorPoint::new(0.0, 0.0)));
    assert_eq!(anchor_at(&[], 0), None);
}

#[test]
fn percent_scales_to_css_units() {
    assert_eq!(AnchorPoint::new(0.25, 0.75).percent(), (25.0, 75.0));
}
