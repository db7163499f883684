use super::{Angle, Shadow, format_number};

/// Graphical effects of the `filter` and `backdrop-filter` properties.
///
/// Amounts are percentages; `blur` is a radius in pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewFilter {
    pub blur: Option<f64>,
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub saturate: Option<f64>,
    pub grayscale: Option<f64>,
    pub invert: Option<f64>,
    pub opacity: Option<f64>,
    pub sepia: Option<f64>,
    pub hue_rotate: Option<Angle>,
    pub drop_shadow: Vec<Shadow>,
}

/// Filter tags with their accepted range.
pub const FILTER_AMOUNTS: [(&str, f64, f64); 8] = [
    ("blur", 0.0, 10_000.0),
    ("brightness", 0.0, 10_000.0),
    ("contrast", 0.0, 10_000.0),
    ("saturate", 0.0, 10_000.0),
    ("grayscale", 0.0, 100.0),
    ("invert", 0.0, 100.0),
    ("opacity", 0.0, 100.0),
    ("sepia", 0.0, 100.0),
];

impl ViewFilter {
    /// The amount slot of a filter tag.
    pub fn amount_mut(&mut self, tag: &str) -> Option<&mut Option<f64>> {
        Some(match tag {
            "blur" => &mut self.blur,
            "brightness" => &mut self.brightness,
            "contrast" => &mut self.contrast,
            "saturate" => &mut self.saturate,
            "grayscale" => &mut self.grayscale,
            "invert" => &mut self.invert,
            "opacity" => &mut self.opacity,
            "sepia" => &mut self.sepia,
            _ => return None,
        })
    }

    /// Returns `true` when no effect is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The CSS filter function list; blur first, drop shadows last.
    #[must_use]
    pub fn css(&self) -> String {
        let mut functions = Vec::new();
        if let Some(blur) = self.blur {
            functions.push(format!("blur({}px)", format_number(blur)));
        }
        let percentages = [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturate", self.saturate),
            ("grayscale", self.grayscale),
            ("invert", self.invert),
            ("opacity", self.opacity),
            ("sepia", self.sepia),
        ];
        for (name, amount) in percentages {
            if let Some(amount) = amount {
                functions.push(format!("{name}({}%)", format_number(amount)));
            }
        }
        if let Some(angle) = self.hue_rotate {
            functions.push(format!("hue-rotate({})", angle.css()));
        }
        for shadow in self.drop_shadow.iter().filter(|shadow| shadow.color.alpha() != 0) {
            functions.push(format!("drop-shadow({})", shadow.text_css()));
        }
        functions.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use rui_color::Color;

    use super::*;

    #[test]
    fn function_order() {
        let filter = ViewFilter {
            sepia: Some(40.0),
            blur: Some(2.5),
            hue_rotate: Some(Angle::deg(90.0)),
            drop_shadow: vec![Shadow::text(1, 2, 3, Color::BLACK), Shadow::text(1, 1, 1, Color::TRANSPARENT)],
            ..ViewFilter::default()
        };
        assert_eq!(
            filter.css(),
            "blur(2.5px) sepia(40%) hue-rotate(90deg) drop-shadow(1px 2px 3px rgb(0,0,0))"
        );
        assert!(ViewFilter::default().is_empty());
        assert_eq!(ViewFilter::default().css(), "");
    }
}
