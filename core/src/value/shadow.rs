use rui_color::Color;

use super::Size;

/// A box or text shadow.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shadow {
    /// Horizontal offset.
    pub x_offset: Size,
    /// Vertical offset.
    pub y_offset: Size,
    /// Blur radius.
    pub blur: Size,
    /// Spread radius, ignored for text shadows.
    pub spread: Size,
    /// Shadow color.
    pub color: Color,
    /// Draw inside the box, ignored for text shadows.
    pub inset: bool,
}

fn is_zero(size: &Size) -> bool {
    size.is_auto() || (size.value == 0.0 && size.function.is_none())
}

impl Shadow {
    /// An outer box shadow.
    pub fn new(
        x_offset: impl Into<Size>,
        y_offset: impl Into<Size>,
        blur: impl Into<Size>,
        spread: impl Into<Size>,
        color: Color,
    ) -> Self {
        Self {
            x_offset: x_offset.into(),
            y_offset: y_offset.into(),
            blur: blur.into(),
            spread: spread.into(),
            color,
            inset: false,
        }
    }

    /// An inner box shadow.
    pub fn inset(
        x_offset: impl Into<Size>,
        y_offset: impl Into<Size>,
        blur: impl Into<Size>,
        spread: impl Into<Size>,
        color: Color,
    ) -> Self {
        Self {
            inset: true,
            ..Self::new(x_offset, y_offset, blur, spread, color)
        }
    }

    /// A text shadow.
    pub fn text(
        x_offset: impl Into<Size>,
        y_offset: impl Into<Size>,
        blur: impl Into<Size>,
        color: Color,
    ) -> Self {
        Self::new(x_offset, y_offset, blur, Size::auto(), color)
    }

    /// A shadow is drawn only with a visible color and some non-zero geometry.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.color.alpha() != 0
            && !(is_zero(&self.x_offset)
                && is_zero(&self.y_offset)
                && is_zero(&self.blur)
                && is_zero(&self.spread))
    }

    /// One `box-shadow` entry.
    #[must_use]
    pub fn box_css(&self) -> String {
        format!(
            "{}{} {} {} {} {}",
            if self.inset { "inset " } else { "" },
            self.x_offset.css("0"),
            self.y_offset.css("0"),
            self.blur.css("0"),
            self.spread.css("0"),
            self.color.css()
        )
    }

    /// One `text-shadow` entry.
    #[must_use]
    pub fn text_css(&self) -> String {
        format!(
            "{} {} {} {}",
            self.x_offset.css("0"),
            self.y_offset.css("0"),
            self.blur.css("0"),
            self.color.css()
        )
    }
}

/// `box-shadow` value of several shadows, skipping the invisible ones.
#[must_use]
pub fn box_shadow_css(shadows: &[Shadow]) -> String {
    shadows
        .iter()
        .filter(|shadow| shadow.visible())
        .map(Shadow::box_css)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `text-shadow` value of several shadows, skipping the invisible ones.
#[must_use]
pub fn text_shadow_css(shadows: &[Shadow]) -> String {
    shadows
        .iter()
        .filter(|shadow| {
            shadow.color.alpha() != 0
                && !(is_zero(&shadow.x_offset) && is_zero(&shadow.y_offset) && is_zero(&shadow.blur))
        })
        .map(Shadow::text_css)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invisible_shadows_are_skipped() {
        let shadows = [
            Shadow::new(1, 2, 3, 0, Color::BLACK),
            Shadow::new(0, 0, 0, 0, Color::BLACK),
            Shadow::new(1, 1, 1, 1, Color::TRANSPARENT),
            Shadow::inset(0, 0, 4, 0, Color::RED),
        ];
        assert_eq!(
            box_shadow_css(&shadows),
            "1px 2px 3px 0 rgb(0,0,0), inset 0 0 4px 0 rgb(255,0,0)"
        );
    }

    #[test]
    fn text_shadow_omits_spread() {
        let shadow = Shadow::text(1, 1, 2, Color::GRAY);
        assert_eq!(text_shadow_css(&[shadow]), "1px 1px 2px rgb(128,128,128)");
    }
}
