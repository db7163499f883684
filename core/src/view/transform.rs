//! The 2D/3D transform group.
//!
//! Transform tags do not map to CSS one by one: together they produce the
//! `transform` function list and its companion properties. Any change in the
//! group rewrites all of them, an empty value removing a declaration.

use crate::value::{Angle, Size, Value, format_number};

/// Tags of the transform group.
pub const TRANSFORM_TAGS: &[&str] = &[
    "perspective",
    "perspective-origin-x",
    "perspective-origin-y",
    "backface-visibility",
    "origin-x",
    "origin-y",
    "origin-z",
    "translate-x",
    "translate-y",
    "translate-z",
    "scale-x",
    "scale-y",
    "scale-z",
    "rotate",
    "rotate-x",
    "rotate-y",
    "rotate-z",
    "skew-x",
    "skew-y",
];

/// Returns `true` for tags of the transform group.
#[must_use]
pub fn is_transform_tag(tag: &str) -> bool {
    TRANSFORM_TAGS.contains(&tag)
}

struct Group<'a> {
    lookup: &'a dyn Fn(&str) -> Option<Value>,
}

impl Group<'_> {
    fn size(&self, tag: &str) -> Size {
        match (self.lookup)(tag) {
            Some(Value::Size(size)) => size,
            _ => Size::auto(),
        }
    }

    fn angle(&self, tag: &str) -> Option<Angle> {
        (self.lookup)(tag).as_ref().and_then(Value::as_angle)
    }

    fn factor(&self, tag: &str) -> Option<String> {
        (self.lookup)(tag).as_ref().and_then(Value::as_float).map(format_number)
    }

    fn is_3d(&self) -> bool {
        let perspective = self.size("perspective");
        !perspective.is_auto() && perspective.value != 0.0
    }

    fn transform(&self, three_d: bool) -> String {
        let mut functions = Vec::new();
        let (skew_x, skew_y) = (self.angle("skew-x"), self.angle("skew-y"));
        if skew_x.is_some() || skew_y.is_some() {
            let zero = Angle::deg(0.0);
            functions.push(format!(
                "skew({},{})",
                skew_x.unwrap_or(zero).css(),
                skew_y.unwrap_or(zero).css()
            ));
        }

        let translate = [self.size("translate-x"), self.size("translate-y"), self.size("translate-z")];
        let scale = [self.factor("scale-x"), self.factor("scale-y"), self.factor("scale-z")];
        let axes = if three_d { 3 } else { 2 };
        let suffix = if three_d { "3d" } else { "" };

        if translate[..axes].iter().any(|size| !size.is_auto()) {
            let args = translate[..axes]
                .iter()
                .map(|size| size.css("0"))
                .collect::<Vec<_>>()
                .join(",");
            functions.push(format!("translate{suffix}({args})"));
        }
        if scale[..axes].iter().any(Option::is_some) {
            let args = scale[..axes]
                .iter()
                .map(|factor| factor.as_deref().unwrap_or("1"))
                .collect::<Vec<_>>()
                .join(",");
            functions.push(format!("scale{suffix}({args})"));
        }
        if let Some(angle) = self.angle("rotate") {
            if three_d {
                let axis = ["rotate-x", "rotate-y", "rotate-z"]
                    .map(|tag| self.factor(tag).unwrap_or_else(|| "1".to_string()));
                functions.push(format!("rotate3d({},{})", axis.join(","), angle.css()));
            } else {
                functions.push(format!("rotate({})", angle.css()));
            }
        }
        functions.join(" ")
    }
}

/// The declarations of the whole transform group.
///
/// `lookup` returns the resolved value of a group tag. 3D functions and the
/// perspective companions are written only with a non-zero `perspective`.
#[must_use]
pub fn declarations(lookup: &dyn Fn(&str) -> Option<Value>) -> Vec<(&'static str, String)> {
    let group = Group { lookup };
    let three_d = group.is_3d();
    let mut perspective = String::new();
    let mut perspective_origin = String::new();
    let mut backface = String::new();
    if three_d {
        perspective = group.size("perspective").css("0");
        let (x, y) = (group.size("perspective-origin-x"), group.size("perspective-origin-y"));
        if !x.is_auto() || !y.is_auto() {
            perspective_origin = format!("{} {}", x.css("50%"), y.css("50%"));
        }
        backface = match lookup("backface-visibility").as_ref().and_then(Value::as_bool) {
            Some(true) => "visible".to_string(),
            Some(false) => "hidden".to_string(),
            None => String::new(),
        };
    }

    let (x, y, z) = (group.size("origin-x"), group.size("origin-y"), group.size("origin-z"));
    let origin = if three_d && (!x.is_auto() || !y.is_auto() || !z.is_auto()) {
        format!("{} {} {}", x.css("50%"), y.css("50%"), z.css("0"))
    } else if !three_d && (!x.is_auto() || !y.is_auto()) {
        format!("{} {}", x.css("50%"), y.css("50%"))
    } else {
        String::new()
    };

    vec![
        ("perspective", perspective),
        ("perspective-origin", perspective_origin),
        ("backface-visibility", backface),
        ("transform-origin", origin),
        ("transform", group.transform(three_d)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_css(values: &[(&str, Value)]) -> Vec<(&'static str, String)> {
        declarations(&|tag| {
            values
                .iter()
                .find(|(name, _)| *name == tag)
                .map(|(_, value)| value.clone())
        })
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
        .collect()
    }

    #[test]
    fn flat_transform() {
        let css = group_css(&[
            ("translate-x", Value::Size(Size::px(10.0))),
            ("scale-y", Value::Float(2.0)),
            ("rotate", Value::Angle(Angle::deg(45.0))),
            ("skew-x", Value::Angle(Angle::deg(10.0))),
            ("origin-x", Value::Size(Size::px(0.0))),
            ("backface-visibility", Value::Bool(false)),
        ]);
        assert_eq!(
            css,
            vec![
                ("transform-origin", "0 50%".to_string()),
                (
                    "transform",
                    "skew(10deg,0deg) translate(10px,0) scale(1,2) rotate(45deg)".to_string()
                ),
            ]
        );
    }

    #[test]
    fn perspective_switches_to_3d() {
        let css = group_css(&[
            ("perspective", Value::Size(Size::px(300.0))),
            ("translate-z", Value::Size(Size::px(5.0))),
            ("rotate", Value::Angle(Angle::deg(90.0))),
            ("rotate-y", Value::Float(0.0)),
            ("origin-z", Value::Size(Size::px(2.0))),
            ("backface-visibility", Value::Bool(true)),
        ]);
        assert_eq!(
            css,
            vec![
                ("perspective", "300px".to_string()),
                ("backface-visibility", "visible".to_string()),
                ("transform-origin", "50% 50% 2px".to_string()),
                ("transform", "translate3d(0,0,5px) rotate3d(1,0,1,90deg)".to_string()),
            ]
        );
    }

    #[test]
    fn empty_group_clears_everything() {
        let css = declarations(&|_| None);
        assert_eq!(css.len(), 5);
        assert!(css.iter().all(|(_, text)| text.is_empty()));
    }
}
