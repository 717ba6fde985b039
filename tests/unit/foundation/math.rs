use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn over_with_opaque_source_replaces_destination() {
    let dst = [10, 20, 30, 255];
    let src = [200, 100, 50, 255];
    assert_eq!(premul_over_px(dst, src), src);
}

#[test]
fn over_with_transparent_source_keeps_destination() {
    let dst = [10, 20, 30, 255];
    assert_eq!(premul_over_px(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn scale_px_zero_coverage_clears() {
    assert_eq!(scale_px([255, 128, 0, 255], 0), [0, 0, 0, 0]);
    assert_eq!(scale_px([255, 128, 0, 255], 255), [255, 128, 0, 255]);
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![128u8, 64, 0, 128, 9, 9, 9, 0];
    unpremultiply_in_place(&mut px);
    assert_eq!(&px[0..4], &[255, 128, 0, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
}

#[test]
fn fingerprint_is_stable_and_order_sensitive() {
    let mut a = Fingerprint::new();
    a.write_str("ab");
    a.write_f64(1.5);
    let mut b = Fingerprint::new();
    b.write_str("ab");
    b.write_f64(1.5);
    assert_eq!(a.finish(), b.finish());

    let mut c = Fingerprint::new();
    c.write_f64(1.5);
    c.write_str("ab");
    assert_ne!(a.finish(), c.finish());
}
