use super::*;
use crate::card::composition::DisplayConfig;
use crate::fixtures::{composition, single_origin_bean};
use crate::gradient::anchors::AnchorPoint;
use crate::gradient::compose::GradientLayer;

fn layer(x: f64, y: f64, hex: &str, opacity: f64, falloff: f64) -> GradientLayer {
    GradientLayer {
        anchor: AnchorPoint::new(x, y),
        color_hex: hex.to_owned(),
        opacity,
        falloff_radius: falloff,
    }
}

fn px(data: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

#[test]
fn empty_background_is_opaque_base() {
    let bg = MeshBackground {
        base_hex: "#000000".to_owned(),
        layers: Vec::new(),
    };
    let data = render_background(&bg, 8, 8);
    assert!(data.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn layer_fades_from_anchor_to_transparent() {
    let bg = MeshBackground {
        base_hex: "#000000".to_owned(),
        layers: vec![layer(0.0, 0.0, "#FF0000", 0.8, 50.0)],
    };
    let data = render_background(&bg, 100, 100);
    let near = px(&data, 100, 0, 0);
    assert!((195..=204).contains(&near[0]), "{near:?}");
    assert_eq!(&near[1..], &[0, 0, 255]);
    assert_eq!(px(&data, 100, 99, 99), [0, 0, 0, 255]);
}

#[test]
fn first_layer_paints_on_top() {
    let bg = MeshBackground {
        base_hex: "#000000".to_owned(),
        layers: vec![
            layer(0.0, 0.0, "#FF0000", 1.0, 100.0),
            layer(0.0, 0.0, "#0000FF", 1.0, 100.0),
        ],
    };
    let data = render_background(&bg, 100, 100);
    let p = px(&data, 100, 0, 0);
    assert!(p[0] > 240, "{p:?}");
    assert!(p[2] < 10, "{p:?}");
}

#[test]
fn corner_mask_clears_outer_corner_only() {
    let mut data = vec![255u8; 40 * 40 * 4];
    apply_corner_mask(&mut data, 40, 40, 10.0);
    assert_eq!(px(&data, 40, 0, 0)[3], 0);
    assert_eq!(px(&data, 40, 39, 39)[3], 0);
    assert_eq!(px(&data, 40, 20, 0), [255; 4]);
    assert_eq!(px(&data, 40, 20, 20), [255; 4]);
    assert_eq!(px(&data, 40, 10, 10), [255; 4]);
}

#[test]
fn background_only_card_renders_without_fonts() {
    let comp = composition(single_origin_bean(), DisplayConfig::background_only());
    let mut r = CardRasterizer::new(FontBook::new());
    let frame = r.render_preview(&comp, 300).unwrap();
    assert_eq!((frame.width, frame.height), (300, 300));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(frame.pixel(150, 150).unwrap()[3], 255);
}

#[test]
fn repeated_renders_hit_the_background_cache() {
    let comp = composition(single_origin_bean(), DisplayConfig::background_only());
    let mut r = CardRasterizer::new(FontBook::new());
    let a = r.render_preview(&comp, 120).unwrap();
    let b = r.render_preview(&comp, 120).unwrap();
    assert_eq!(a, b);
    assert_eq!(r.background_cache.len(), 1);
}

#[test]
fn text_overlay_without_font_is_a_render_error() {
    let comp = composition(single_origin_bean(), DisplayConfig::default());
    let mut r = CardRasterizer::new(FontBook::new());
    let err = r.render_preview(&comp, 120).unwrap_err();
    assert!(matches!(err, CardError::Render(_)));
    assert!(err.to_string().contains("Ranade"));
}

#[test]
fn zero_width_preview_is_rejected() {
    let comp = composition(single_origin_bean(), DisplayConfig::background_only());
    let mut r = CardRasterizer::new(FontBook::new());
    assert!(r.render_preview(&comp, 0).is_err());
}
