use core::fmt::{self, Display};

use super::Size;

/// Elliptic radius of one corner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Corner {
    /// Horizontal radius.
    pub x: Size,
    /// Vertical radius.
    pub y: Size,
}

impl Corner {
    /// A circular corner.
    #[must_use]
    pub fn circular(size: Size) -> Self {
        Self {
            x: size.clone(),
            y: size,
        }
    }

    fn is_zero(&self) -> bool {
        let zero = |size: &Size| size.is_auto() || (size.value == 0.0 && size.function.is_none());
        zero(&self.x) && zero(&self.y)
    }
}

/// Corner radii of a box, in `top-left, top-right, bottom-right, bottom-left` order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Radius {
    /// Top-left corner.
    pub top_left: Corner,
    /// Top-right corner.
    pub top_right: Corner,
    /// Bottom-right corner.
    pub bottom_right: Corner,
    /// Bottom-left corner.
    pub bottom_left: Corner,
}

impl Radius {
    /// Every corner circular with `size`.
    #[must_use]
    pub fn all(size: Size) -> Self {
        let corner = Corner::circular(size);
        Self {
            top_left: corner.clone(),
            top_right: corner.clone(),
            bottom_right: corner.clone(),
            bottom_left: corner,
        }
    }

    /// Corners in CSS order.
    #[must_use]
    pub fn corners(&self) -> [&Corner; 4] {
        [
            &self.top_left,
            &self.top_right,
            &self.bottom_right,
            &self.bottom_left,
        ]
    }

    fn all_corners_equal(&self) -> bool {
        let corners = self.corners();
        corners.iter().all(|corner| corner.x == corners[0].x)
            && corners.iter().all(|corner| corner.y == corners[0].y)
    }

    /// The `border-radius` value, or an empty string when every corner is zero.
    pub fn css_with(&self, resolve: &dyn Fn(&str) -> Option<String>) -> String {
        let corners = self.corners();
        if corners.iter().all(|corner| corner.is_zero()) {
            return String::new();
        }
        let css = |size: &Size| size.css_with("0", resolve);
        if self.all_corners_equal() {
            let first = corners[0];
            if first.x == first.y {
                return css(&first.x);
            }
            return format!("{} / {}", css(&first.x), css(&first.y));
        }
        let xs = corners.map(|corner| css(&corner.x)).join(" ");
        if corners.iter().all(|corner| corner.x == corner.y) {
            return xs;
        }
        let ys = corners.map(|corner| css(&corner.y)).join(" ");
        format!("{xs} / {ys}")
    }

    /// CSS text without constant resolution.
    #[must_use]
    pub fn css(&self) -> String {
        self.css_with(&|_| None)
    }
}

impl Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corners = self.corners();
        if self.all_corners_equal() && corners[0].x == corners[0].y {
            return Display::fmt(&corners[0].x, f);
        }
        let names = ["top-left", "top-right", "bottom-right", "bottom-left"];
        let mut first = true;
        f.write_str("_{")?;
        for (name, corner) in names.iter().zip(corners) {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{name}-x = {}, {name}-y = {}", corner.x, corner.y)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_forms() {
        assert_eq!(Radius::all(Size::px(4.0)).css(), "4px");
        assert_eq!(Radius::default().css(), "");

        let mut elliptic = Radius::all(Size::px(4.0));
        for corner in [
            &mut elliptic.top_left,
            &mut elliptic.top_right,
            &mut elliptic.bottom_right,
            &mut elliptic.bottom_left,
        ] {
            corner.y = Size::px(2.0);
        }
        assert_eq!(elliptic.css(), "4px / 2px");

        elliptic.bottom_left = Corner::circular(Size::px(1.0));
        assert_eq!(elliptic.css(), "4px 4px 4px 1px / 2px 2px 2px 1px");
    }
}
