//! CSS counterparts of view properties.
//!
//! [`declarations`] maps one canonical tag and its resolved value to the CSS
//! declarations it stands for. Both the initial render and the per-tag update
//! path use it, so the two can never disagree.

use super::transform;
use crate::animation::{animations_css, transitions_css};
use crate::properties::{self, tables};
use crate::value::{Value, box_shadow_css, gradient, text_shadow_css};

/// Collects the declarations of an inline `style` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssBuilder {
    entries: Vec<(String, String)>,
}

impl CssBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration; an empty value is skipped and a repeated name replaces the earlier one.
    pub fn add(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| key == name) {
            entry.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    /// Adds every declaration of a list.
    pub fn extend(&mut self, declarations: impl IntoIterator<Item = (&'static str, String)>) {
        for (name, value) in declarations {
            self.add(name, value);
        }
    }

    /// Returns `true` when nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value given to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The attribute text: `name: value;` entries separated by a space.
    #[must_use]
    pub fn finish(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn flag(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

fn text_decoration(tag: &str, value: Option<&Value>) -> Vec<(&'static str, String)> {
    let name = match tag {
        "strikethrough" => "line-through",
        "overline" => "overline",
        _ => "underline",
    };
    vec![(
        "text-decoration-line",
        if flag(value) { name.to_string() } else { String::new() },
    )]
}

/// CSS declarations of a non-family view tag, given its resolved value.
///
/// `None` means the tag has no direct CSS counterpart. An empty declaration
/// value means the CSS property is to be removed.
#[must_use]
pub fn declarations(tag: &str, value: Option<&Value>) -> Option<Vec<(&'static str, String)>> {
    // tags with their own CSS mapping win over the generic tables
    if let Some(declarations) = dedicated_declarations(tag, value) {
        return Some(declarations);
    }
    if let Some((_, css)) = tables::SIZES.iter().find(|(name, _)| *name == tag) {
        if css.is_empty() {
            return None;
        }
        let text = match value {
            Some(Value::Size(size)) => size.css(""),
            _ => String::new(),
        };
        return Some(vec![(*css, text)]);
    }
    if let Some((_, css)) = tables::COLORS.iter().find(|(name, _)| *name == tag) {
        if css.is_empty() {
            return None;
        }
        let text = value.and_then(Value::as_color).map(|color| color.css()).unwrap_or_default();
        return Some(vec![(*css, text)]);
    }
    if let Some(spec) = tables::enum_spec(tag) {
        if spec.css.is_empty() {
            return None;
        }
        let text = value
            .and_then(Value::as_int)
            .and_then(|index| spec.css_value(index))
            .unwrap_or_default()
            .to_string();
        return Some(vec![(spec.css, text)]);
    }
    if let Some((_, css)) = tables::INTS.iter().find(|(name, _)| *name == tag) {
        if css.is_empty() {
            return None;
        }
        let text = value.and_then(Value::as_int).map(|value| value.to_string()).unwrap_or_default();
        return Some(vec![(*css, text)]);
    }

    None
}

fn dedicated_declarations(tag: &str, value: Option<&Value>) -> Option<Vec<(&'static str, String)>> {
    let text = |value: Option<&Value>| value.and_then(Value::as_text).unwrap_or_default().to_string();
    let declarations = match tag {
        "opacity" => vec![(
            "opacity",
            value.and_then(Value::as_float).map(crate::value::format_number).unwrap_or_default(),
        )],
        "visibility" => match value.and_then(Value::as_int) {
            Some(1) => vec![("visibility", "hidden".to_string()), ("display", String::new())],
            Some(2) => vec![("visibility", "hidden".to_string()), ("display", "none".to_string())],
            _ => vec![("visibility", "visible".to_string()), ("display", String::new())],
        },
        "shadow" => vec![(
            "box-shadow",
            match value {
                Some(Value::Shadows(shadows)) => box_shadow_css(shadows),
                _ => String::new(),
            },
        )],
        "text-shadow" => vec![(
            "text-shadow",
            match value {
                Some(Value::Shadows(shadows)) => text_shadow_css(shadows),
                _ => String::new(),
            },
        )],
        "background" => vec![(
            "background-image",
            match value {
                Some(Value::Background(elements)) => gradient::background_css(elements),
                _ => String::new(),
            },
        )],
        "cell-width" | "cell-height" => {
            let css = if tag == "cell-width" { "grid-template-columns" } else { "grid-template-rows" };
            let text = match value {
                Some(Value::Sizes(sizes)) => sizes
                    .iter()
                    .map(|size| size.css("auto"))
                    .collect::<Vec<_>>()
                    .join(" "),
                Some(Value::Size(size)) => size.css("auto"),
                _ => String::new(),
            };
            vec![(css, text)]
        }
        "row" | "column" => {
            let css = if tag == "row" { "grid-row" } else { "grid-column" };
            let text = match value {
                Some(Value::Range(range)) => range.grid_css(),
                _ => String::new(),
            };
            vec![(css, text)]
        }
        "column-separator" => vec![(
            "column-rule",
            match value {
                Some(Value::BorderSide(side)) => side.css(),
                _ => String::new(),
            },
        )],
        "clip" | "shape-outside" => {
            let css = if tag == "clip" { "clip-path" } else { "shape-outside" };
            let text = match value {
                Some(Value::ClipShape(shape)) => shape.css(),
                other => text(other),
            };
            vec![(css, text)]
        }
        "filter" | "backdrop-filter" => vec![(
            if tag == "filter" { "filter" } else { "backdrop-filter" },
            match value {
                Some(Value::Filter(filter)) => filter.css(),
                _ => String::new(),
            },
        )],
        "font-name" => vec![("font-family", text(value))],
        "italic" => vec![(
            "font-style",
            if flag(value) { "italic".to_string() } else { String::new() },
        )],
        "small-caps" => vec![(
            "font-variant",
            if flag(value) { "small-caps".to_string() } else { String::new() },
        )],
        "strikethrough" | "overline" | "underline" => text_decoration(tag, value),
        "user-select" => vec![(
            "user-select",
            match value.and_then(Value::as_bool) {
                Some(true) => "auto".to_string(),
                Some(false) => "none".to_string(),
                None => String::new(),
            },
        )],
        "animation" => vec![(
            "animation",
            match value {
                Some(Value::Animations(animations)) => animations_css(animations),
                _ => String::new(),
            },
        )],
        "animation-paused" => vec![(
            "animation-play-state",
            if flag(value) { "paused".to_string() } else { String::new() },
        )],
        "transition" => vec![(
            "transition",
            match value {
                Some(Value::Transitions(transitions)) => transitions_css(transitions),
                _ => String::new(),
            },
        )],
        _ => return None,
    };
    Some(declarations)
}

/// CSS declarations of `tag` for an animation keyframe, given a coerced value.
///
/// Shorthand family tags are written whole, a transform tag as the group it
/// alone would give, other tags through [`declarations`].
#[must_use]
pub fn keyframe_declarations(tag: &str, value: &Value) -> Vec<(&'static str, String)> {
    if properties::is_family_tag(tag) {
        return properties::family_declarations(tag, Some(value))
            .into_iter()
            .filter(|(_, text)| !text.is_empty())
            .collect();
    }
    if transform::is_transform_tag(tag) {
        return transform::declarations(&|name| (name == tag).then(|| value.clone()))
            .into_iter()
            .filter(|(_, text)| !text.is_empty())
            .collect();
    }
    declarations(tag, Some(value))
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
        .collect()
}
