//! Fixed tables mapping property tags to their value kind and CSS counterpart.

use super::PropertyKind;

/// Values of an enumerated property.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumSpec {
    /// Accepted names, in index order.
    pub values: &'static [&'static str],
    /// CSS property written for the tag, empty when the tag has no direct CSS.
    pub css: &'static str,
    /// CSS keyword per index.
    pub css_values: &'static [&'static str],
    /// Extra accepted names and the index they stand for.
    pub aliases: &'static [(&'static str, usize)],
}

impl EnumSpec {
    const fn new(
        values: &'static [&'static str],
        css: &'static str,
        css_values: &'static [&'static str],
    ) -> Self {
        Self {
            values,
            css,
            css_values,
            aliases: &[],
        }
    }

    /// Same names in CSS.
    const fn plain(values: &'static [&'static str], css: &'static str) -> Self {
        Self::new(values, css, values)
    }

    /// Resolves a name: exact match, then an integer index, then a lowercase match.
    #[must_use]
    pub fn index_of(&self, text: &str) -> Option<usize> {
        let text = text.trim();
        let find = |text: &str| {
            self.values
                .iter()
                .position(|value| *value == text)
                .or_else(|| {
                    self.aliases
                        .iter()
                        .find(|(alias, _)| *alias == text)
                        .map(|(_, index)| *index)
                })
        };
        if let Some(index) = find(text) {
            return Some(index);
        }
        if let Ok(index) = text.parse::<usize>() {
            return (index < self.values.len()).then_some(index);
        }
        find(&text.to_lowercase())
    }

    /// CSS keyword of an index.
    #[must_use]
    pub fn css_value(&self, index: i64) -> Option<&'static str> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.css_values.get(index).copied())
    }
}

const ALIGN: &[&str] = &["top", "bottom", "center", "stretch"];
const H_ALIGN: &[&str] = &["left", "right", "center", "stretch"];
const GRID_ALIGN: &[&str] = &["start", "end", "center", "stretch"];
const LINE_STYLES: &[&str] = &["none", "solid", "dashed", "dotted", "double"];

/// Enumerated properties.
pub static ENUMS: &[(&str, EnumSpec)] = &[
    (
        "semantics",
        EnumSpec::new(
            &[
                "default", "article", "section", "aside", "header", "main", "footer",
                "navigation", "figure", "figure-caption", "button", "p", "h1", "h2", "h3",
                "h4", "h5", "h6", "blockquote", "code",
            ],
            "",
            &[
                "div", "article", "section", "aside", "header", "main", "footer", "nav",
                "figure", "figcaption", "button", "p", "h1", "h2", "h3", "h4", "h5", "h6",
                "blockquote", "code",
            ],
        ),
    ),
    ("visibility", EnumSpec::plain(&["visible", "invisible", "gone"], "")),
    (
        "overflow",
        EnumSpec::plain(&["hidden", "visible", "scroll", "auto"], "overflow"),
    ),
    (
        "text-align",
        EnumSpec::plain(&["left", "right", "center", "justify"], "text-align"),
    ),
    (
        "text-transform",
        EnumSpec::plain(
            &["none", "capitalize", "lowercase", "uppercase"],
            "text-transform",
        ),
    ),
    (
        "text-weight",
        EnumSpec::new(
            &[
                "inherit", "thin", "extra-light", "light", "normal", "medium", "semi-bold",
                "bold", "extra-bold", "black",
            ],
            "font-weight",
            &[
                "inherit", "100", "200", "300", "normal", "500", "600", "bold", "800", "900",
            ],
        ),
    ),
    (
        "white-space",
        EnumSpec::plain(
            &["normal", "nowrap", "pre", "pre-wrap", "pre-line", "break-spaces"],
            "white-space",
        ),
    ),
    (
        "word-break",
        EnumSpec::plain(
            &["normal", "break-all", "keep-all", "break-word"],
            "word-break",
        ),
    ),
    (
        "text-overflow",
        EnumSpec::plain(&["clip", "ellipsis"], "text-overflow"),
    ),
    (
        "text-wrap",
        EnumSpec::plain(&["wrap", "nowrap", "balance"], "text-wrap"),
    ),
    (
        "writing-mode",
        EnumSpec::new(
            &[
                "horizontal-top-to-bottom",
                "horizontal-bottom-to-top",
                "vertical-right-to-left",
                "vertical-left-to-right",
            ],
            "writing-mode",
            &["horizontal-tb", "horizontal-bt", "vertical-rl", "vertical-lr"],
        ),
    ),
    (
        "text-direction",
        EnumSpec::new(
            &["system", "left-to-right", "right-to-left"],
            "direction",
            &["", "ltr", "rtl"],
        ),
    ),
    (
        "vertical-text-orientation",
        EnumSpec::plain(&["mixed", "upright"], "text-orientation"),
    ),
    (
        "text-line-style",
        EnumSpec::plain(
            &["inherit", "solid", "dashed", "dotted", "double", "wavy"],
            "text-decoration-style",
        ),
    ),
    ("border-style", EnumSpec::plain(LINE_STYLES, "")),
    ("border-top-style", EnumSpec::plain(LINE_STYLES, "")),
    ("border-right-style", EnumSpec::plain(LINE_STYLES, "")),
    ("border-bottom-style", EnumSpec::plain(LINE_STYLES, "")),
    ("border-left-style", EnumSpec::plain(LINE_STYLES, "")),
    ("outline-style", EnumSpec::plain(LINE_STYLES, "")),
    (
        "number-picker-type",
        EnumSpec::plain(&["editor", "slider"], ""),
    ),
    (
        "edit-view-type",
        EnumSpec::plain(
            &["text", "password", "email", "emails", "url", "phone", "multiline"],
            "",
        ),
    ),
    (
        "orientation",
        EnumSpec {
            values: &["up-down", "start-to-end", "bottom-up", "end-to-start"],
            css: "",
            css_values: &["column", "row", "column-reverse", "row-reverse"],
            aliases: &[("vertical", 0), ("horizontal", 1)],
        },
    ),
    (
        "list-wrap",
        EnumSpec::new(&["off", "on", "reverse"], "", &["nowrap", "wrap", "wrap-reverse"]),
    ),
    ("vertical-align", EnumSpec::plain(ALIGN, "")),
    ("horizontal-align", EnumSpec::plain(H_ALIGN, "")),
    (
        "cell-vertical-align",
        EnumSpec::new(ALIGN, "align-items", GRID_ALIGN),
    ),
    (
        "cell-horizontal-align",
        EnumSpec::new(H_ALIGN, "justify-items", GRID_ALIGN),
    ),
    (
        "cell-vertical-self-align",
        EnumSpec::new(ALIGN, "align-self", GRID_ALIGN),
    ),
    (
        "cell-horizontal-self-align",
        EnumSpec::new(H_ALIGN, "justify-self", GRID_ALIGN),
    ),
    (
        "grid-auto-flow",
        EnumSpec::new(
            &["row", "column", "row-dense", "column-dense"],
            "grid-auto-flow",
            &["row", "column", "row dense", "column dense"],
        ),
    ),
    (
        "table-vertical-align",
        EnumSpec::new(
            &["top", "bottom", "center", "stretch", "baseline"],
            "vertical-align",
            &["top", "bottom", "middle", "baseline", "baseline"],
        ),
    ),
    (
        "cursor",
        EnumSpec::plain(
            &[
                "auto", "default", "none", "context-menu", "help", "pointer", "progress",
                "wait", "cell", "crosshair", "text", "vertical-text", "alias", "copy", "move",
                "no-drop", "not-allowed", "e-resize", "n-resize", "ne-resize", "nw-resize",
                "s-resize", "se-resize", "sw-resize", "w-resize", "ew-resize", "ns-resize",
                "nesw-resize", "nwse-resize", "col-resize", "row-resize", "all-scroll",
                "zoom-in", "zoom-out", "grab", "grabbing",
            ],
            "cursor",
        ),
    ),
    (
        "fit",
        EnumSpec::plain(
            &["none", "contain", "cover", "fill", "scale-down"],
            "object-fit",
        ),
    ),
    (
        "direction",
        EnumSpec::new(
            &[
                "to-top", "to-right-top", "to-right", "to-right-bottom", "to-bottom",
                "to-left-bottom", "to-left", "to-left-top",
            ],
            "",
            &[
                "to top", "to right top", "to right", "to right bottom", "to bottom",
                "to left bottom", "to left", "to left top",
            ],
        ),
    ),
    (
        "animation-direction",
        EnumSpec::plain(&["normal", "reverse", "alternate", "alternate-reverse"], ""),
    ),
    (
        "radial-gradient-shape",
        EnumSpec::plain(&["ellipse", "circle"], ""),
    ),
    (
        "radial-gradient-radius",
        EnumSpec::plain(
            &["closest-side", "closest-corner", "farthest-side", "farthest-corner"],
            "",
        ),
    ),
    ("float", EnumSpec::plain(&["none", "left", "right"], "float")),
    ("selection-mode", EnumSpec::plain(&["none", "cell", "row"], "")),
    (
        "resize",
        EnumSpec::plain(&["none", "both", "horizontal", "vertical"], "resize"),
    ),
];

/// Size properties and their CSS names; an empty name means no direct CSS.
pub static SIZES: &[(&str, &str)] = &[
    ("width", "width"),
    ("height", "height"),
    ("min-width", "min-width"),
    ("min-height", "min-height"),
    ("max-width", "max-width"),
    ("max-height", "max-height"),
    ("left", "left"),
    ("right", "right"),
    ("top", "top"),
    ("bottom", "bottom"),
    ("text-size", "font-size"),
    ("text-indent", "text-indent"),
    ("letter-spacing", "letter-spacing"),
    ("word-spacing", "word-spacing"),
    ("line-height", "line-height"),
    ("text-line-thickness", "text-decoration-thickness"),
    ("list-row-gap", "row-gap"),
    ("list-column-gap", "column-gap"),
    ("grid-row-gap", "row-gap"),
    ("grid-column-gap", "column-gap"),
    ("column-width", "column-width"),
    ("column-gap", "column-gap"),
    ("outline-offset", "outline-offset"),
    ("item-width", ""),
    ("item-height", ""),
    ("center-x", ""),
    ("center-y", ""),
    ("perspective", ""),
    ("perspective-origin-x", ""),
    ("perspective-origin-y", ""),
    ("origin-x", ""),
    ("origin-y", ""),
    ("origin-z", ""),
    ("translate-x", ""),
    ("translate-y", ""),
    ("translate-z", ""),
];

/// Color properties and their CSS names.
pub static COLORS: &[(&str, &str)] = &[
    ("background-color", "background-color"),
    ("text-color", "color"),
    ("caret-color", "caret-color"),
    ("accent-color", "accent-color"),
    ("text-line-color", "text-decoration-color"),
    ("color-picker-value", ""),
];

/// Flag properties.
pub static BOOLS: &[&str] = &[
    "disabled",
    "focusable",
    "inset",
    "read-only",
    "edit-wrap",
    "spellcheck",
    "italic",
    "small-caps",
    "strikethrough",
    "overline",
    "underline",
    "expanded",
    "not-translate",
    "animation-paused",
    "multiple",
    "repeating",
    "user-select",
    "hide-summary-marker",
    "backface-visibility",
];

/// Integer properties and their CSS names.
pub static INTS: &[(&str, &str)] = &[
    ("z-index", "z-index"),
    ("tab-size", "tab-size"),
    ("head-height", ""),
    ("foot-height", ""),
    ("column-count", "column-count"),
    ("order", "order"),
    ("tab-index", ""),
    ("max-length", ""),
    ("number-picker-precision", ""),
];

/// Float properties with their accepted range.
pub static FLOATS: &[(&str, f64, f64)] = &[
    ("opacity", 0.0, 1.0),
    ("number-picker-max", f64::MIN, f64::MAX),
    ("number-picker-min", f64::MIN, f64::MAX),
    ("number-picker-step", f64::MIN, f64::MAX),
    ("number-picker-value", f64::MIN, f64::MAX),
    ("scale-x", f64::MIN, f64::MAX),
    ("scale-y", f64::MIN, f64::MAX),
    ("scale-z", f64::MIN, f64::MAX),
    ("rotate-x", f64::MIN, f64::MAX),
    ("rotate-y", f64::MIN, f64::MAX),
    ("rotate-z", f64::MIN, f64::MAX),
];

/// Angle properties.
pub static ANGLES: &[&str] = &["from", "rotate", "skew-x", "skew-y"];

/// Free text properties.
pub static TEXTS: &[&str] = &[
    "id",
    "style",
    "style-disabled",
    "font-name",
    "text",
    "hint",
    "tooltip",
    "edit-view-pattern",
    "accept",
    "src",
    "alt-text",
];

/// Tags whose value is inherited from the parent chain when unset.
pub static INHERITED: &[&str] = &[
    "text-color",
    "text-size",
    "text-weight",
    "text-align",
    "text-indent",
    "letter-spacing",
    "word-spacing",
    "line-height",
    "text-transform",
    "text-direction",
    "writing-mode",
    "vertical-text-orientation",
    "font-name",
    "not-translate",
    "user-select",
];

/// Looks up an enum table.
#[must_use]
pub fn enum_spec(tag: &str) -> Option<&'static EnumSpec> {
    ENUMS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, spec)| spec)
}

/// Value kind of a general view property, `None` for tags outside the tables.
#[must_use]
pub fn kind(tag: &str) -> Option<PropertyKind> {
    if SIZES.iter().any(|(name, _)| *name == tag) {
        return Some(PropertyKind::Size);
    }
    if let Some(spec) = enum_spec(tag) {
        return Some(PropertyKind::Enum(spec));
    }
    if let Some((_, min, max)) = FLOATS.iter().find(|(name, _, _)| *name == tag) {
        return Some(PropertyKind::Float {
            min: *min,
            max: *max,
        });
    }
    if COLORS.iter().any(|(name, _)| *name == tag) {
        return Some(PropertyKind::Color);
    }
    if ANGLES.contains(&tag) {
        return Some(PropertyKind::Angle);
    }
    if BOOLS.contains(&tag) {
        return Some(PropertyKind::Bool);
    }
    if INTS.iter().any(|(name, _)| *name == tag) {
        return Some(PropertyKind::Int);
    }
    if TEXTS.contains(&tag) {
        return Some(PropertyKind::Text);
    }
    match tag {
        "row" | "column" => Some(PropertyKind::Range),
        "cell-width" | "cell-height" => Some(PropertyKind::Sizes),
        "shadow" | "text-shadow" => Some(PropertyKind::Shadows),
        "background" => Some(PropertyKind::Background),
        "filter" | "backdrop-filter" => Some(PropertyKind::Filter),
        "clip" | "shape-outside" => Some(PropertyKind::ClipShape),
        "column-separator" => Some(PropertyKind::BorderSide),
        _ => None,
    }
}

/// Returns `true` for tags inherited from the parent chain.
#[must_use]
pub fn is_inherited(tag: &str) -> bool {
    INHERITED.contains(&tag)
}

/// Hard default of a tag when no map, style or ancestor provides a value.
#[must_use]
pub fn default_value(tag: &str) -> Option<super::Value> {
    use super::Value;
    match tag {
        "opacity" => Some(Value::Float(1.0)),
        "visibility" | "semantics" | "orientation" | "text-direction" | "overflow" => {
            Some(Value::Int(0))
        }
        "disabled" | "expanded" | "multiple" | "read-only" => Some(Value::Bool(false)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_matching_order() {
        let spec = enum_spec("animation-direction").unwrap();
        assert_eq!(spec.index_of("alternate"), Some(2));
        assert_eq!(spec.index_of("3"), Some(3));
        assert_eq!(spec.index_of("REVERSE"), Some(1));
        assert_eq!(spec.index_of("4"), None);
        assert_eq!(spec.index_of("nonsense"), None);

        let orientation = enum_spec("orientation").unwrap();
        assert_eq!(orientation.index_of("horizontal"), Some(1));
        assert_eq!(orientation.css_value(1), Some("row"));
    }

    #[test]
    fn kinds() {
        assert_eq!(kind("text-size"), Some(PropertyKind::Size));
        assert_eq!(kind("opacity"), Some(PropertyKind::Float { min: 0.0, max: 1.0 }));
        assert_eq!(kind("row"), Some(PropertyKind::Range));
        assert_eq!(kind("rotate"), Some(PropertyKind::Angle));
        assert_eq!(kind("shape-outside"), Some(PropertyKind::ClipShape));
        assert_eq!(kind("backdrop-filter"), Some(PropertyKind::Filter));
        assert_eq!(kind("no-such-tag"), None);
    }
}
