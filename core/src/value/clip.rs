use super::Size;

/// A basic shape of the `clip` and `shape-outside` properties.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipShape {
    /// Rectangle inset from the box edges, with optional rounded corners.
    Inset {
        top: Size,
        right: Size,
        bottom: Size,
        left: Size,
        radius: Size,
    },
    /// Circle of `radius` centred at (`x`, `y`).
    Circle { x: Size, y: Size, radius: Size },
    /// Ellipse with two radii centred at (`x`, `y`).
    Ellipse {
        x: Size,
        y: Size,
        radius_x: Size,
        radius_y: Size,
    },
    /// Polygon through its points.
    Polygon(Vec<(Size, Size)>),
}

impl ClipShape {
    /// An inset rectangle with square corners.
    #[must_use]
    pub const fn inset(top: Size, right: Size, bottom: Size, left: Size) -> Self {
        Self::Inset {
            top,
            right,
            bottom,
            left,
            radius: Size::auto(),
        }
    }

    /// A circle.
    #[must_use]
    pub const fn circle(x: Size, y: Size, radius: Size) -> Self {
        Self::Circle { x, y, radius }
    }

    /// An ellipse.
    #[must_use]
    pub const fn ellipse(x: Size, y: Size, radius_x: Size, radius_y: Size) -> Self {
        Self::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
        }
    }

    /// CSS basic-shape text. Unset offsets of an inset are `0px`; unset centres
    /// and radii of circles and ellipses are `50%`.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::Inset {
                top,
                right,
                bottom,
                left,
                radius,
            } => {
                let mut css = format!(
                    "inset({} {} {} {}",
                    top.css("0px"),
                    right.css("0px"),
                    bottom.css("0px"),
                    left.css("0px")
                );
                if !radius.is_auto() {
                    css.push_str(" round ");
                    css.push_str(&radius.css("0"));
                }
                css.push(')');
                css
            }
            Self::Circle { x, y, radius } => {
                format!("circle({} at {} {})", radius.css("50%"), x.css("50%"), y.css("50%"))
            }
            Self::Ellipse {
                x,
                y,
                radius_x,
                radius_y,
            } => format!(
                "ellipse({} {} at {} {})",
                radius_x.css("50%"),
                radius_y.css("50%"),
                x.css("50%"),
                y.css("50%")
            ),
            Self::Polygon(points) => {
                let points = points
                    .iter()
                    .map(|(x, y)| format!("{} {}", x.css("0px"), y.css("0px")))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("polygon({points})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_shape_css() {
        let inset = ClipShape::inset(Size::px(4.0), Size::auto(), Size::percent(10.0), Size::px(0.0));
        assert_eq!(inset.css(), "inset(4px 0px 10% 0)");
        let rounded = ClipShape::Inset {
            top: Size::auto(),
            right: Size::auto(),
            bottom: Size::auto(),
            left: Size::auto(),
            radius: Size::px(8.0),
        };
        assert_eq!(rounded.css(), "inset(0px 0px 0px 0px round 8px)");

        assert_eq!(
            ClipShape::circle(Size::auto(), Size::px(20.0), Size::auto()).css(),
            "circle(50% at 50% 20px)"
        );
        assert_eq!(
            ClipShape::ellipse(Size::px(1.0), Size::px(2.0), Size::px(30.0), Size::px(40.0)).css(),
            "ellipse(30px 40px at 1px 2px)"
        );
        let triangle = ClipShape::Polygon(vec![
            (Size::percent(50.0), Size::px(0.0)),
            (Size::percent(100.0), Size::percent(100.0)),
            (Size::px(0.0), Size::percent(100.0)),
        ]);
        assert_eq!(triangle.css(), "polygon(50% 0, 100% 100%, 0 100%)");
    }
}
