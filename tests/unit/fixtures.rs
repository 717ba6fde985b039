//! Shared builders for unit tests.

use crate::bean::model::{
    Bean, BeanDescriptor, Blend, BlendComponent, IntensityProfile, RoastLevel, SingleOrigin,
};
use crate::card::composition::{CardComposition, DisplayConfig};
use crate::palette::swatch::fallback_palette;

pub(crate) fn single_origin_bean() -> Bean {
    Bean {
        display_name: "에티오피아 예가체프".to_owned(),
        bean_name: "Ethiopia Yirgacheffe".to_owned(),
        roast_level: Some(RoastLevel::Light),
        flavor_notes: vec![
            "Jasmine".to_owned(),
            "Bergamot".to_owned(),
            "Lemon".to_owned(),
        ],
        intensity: IntensityProfile {
            acidity: 8,
            sweetness: 6,
            body: 3,
        },
        origin: BeanDescriptor::SingleOrigin(SingleOrigin {
            country: "Ethiopia".to_owned(),
            region: Some("Yirgacheffe".to_owned()),
            processing: Some("Washed".to_owned()),
            ..SingleOrigin::default()
        }),
    }
}

pub(crate) fn blend_bean() -> Bean {
    Bean {
        display_name: "하우스 블렌드".to_owned(),
        bean_name: "House Blend".to_owned(),
        roast_level: Some(RoastLevel::Dark),
        flavor_notes: vec!["Cocoa".to_owned(), "Molasses".to_owned()],
        intensity: IntensityProfile {
            acidity: 1,
            sweetness: 7,
            body: 10,
        },
        origin: BeanDescriptor::Blend(Blend {
            components: vec![
                BlendComponent {
                    country: "Brazil".to_owned(),
                    ratio: 60.0,
                },
                BlendComponent {
                    country: "Colombia".to_owned(),
                    ratio: 40.0,
                },
            ],
        }),
    }
}

pub(crate) fn composition(bean: Bean, display: DisplayConfig) -> CardComposition {
    let name = bean.display_name.clone();
    CardComposition::new(bean, &fallback_palette(), 50.0, display, name)
}
