//! Themes: constants, colors, images and named styles of a session.
//!
//! A theme is read from the data-text format:
//!
//! ```text
//! theme {
//!     name = default,
//!     constants = _{ gap = 8px },
//!     "constants:touch" = _{ gap = 16px },
//!     colors = _{ textColor = #FF202020 },
//!     "colors:dark" = _{ textColor = #FFE0E0E0 },
//!     images = _{ logo = logo.png },
//!     "images:dark" = _{ logo = logo-dark.png },
//!     styles = [
//!         header { text-size = 24pt, text-color = @textColor },
//!     ],
//! }
//! ```

use alloc::collections::BTreeMap;
use alloc::rc::Rc;

use crate::data::{DataObject, DataValue};
use crate::error::DataError;
use crate::properties::{Properties, coerce};

/// Constants, colors, images and styles looked up by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    name: String,
    constants: BTreeMap<String, String>,
    touch_constants: BTreeMap<String, String>,
    colors: BTreeMap<String, String>,
    dark_colors: BTreeMap<String, String>,
    images: BTreeMap<String, String>,
    dark_images: BTreeMap<String, String>,
    styles: BTreeMap<String, Rc<Properties>>,
}

fn text_table(object: Option<&DataObject>) -> BTreeMap<String, String> {
    object
        .map(|object| {
            object
                .nodes()
                .iter()
                .filter_map(|node| Some((node.tag.clone(), node.value.as_text()?.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn style_properties(object: &DataObject) -> Properties {
    let mut properties = Properties::new();
    for node in object.nodes() {
        if let Err(error) = properties.set(&node.tag, coerce::from_data(&node.value)) {
            tracing::warn!(style = object.tag(), %error, "style property skipped");
        }
    }
    properties
}

impl Theme {
    /// An empty theme.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a theme description.
    ///
    /// # Errors
    ///
    /// Fails on syntax errors. Ill-typed style properties are logged and skipped.
    pub fn parse(text: &str) -> Result<Self, DataError> {
        let object = DataObject::parse(text)?;
        let mut theme = Self::new(object.text("name").unwrap_or_default());
        theme.constants = text_table(object.object("constants"));
        theme.touch_constants = text_table(object.object("constants:touch"));
        theme.colors = text_table(object.object("colors"));
        theme.dark_colors = text_table(object.object("colors:dark"));
        theme.images = text_table(object.object("images"));
        theme.dark_images = text_table(object.object("images:dark"));
        for item in object.array("styles").unwrap_or_default() {
            match item {
                DataValue::Object(style) => {
                    theme
                        .styles
                        .insert(style.tag().to_string(), Rc::new(style_properties(style)));
                }
                other => tracing::warn!(value = %other, "theme style is not an object"),
            }
        }
        Ok(theme)
    }

    /// The theme name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets a constant; `touch` selects the table used on touch screens.
    pub fn set_constant(&mut self, name: &str, value: impl Into<String>, touch: bool) {
        let table = if touch { &mut self.touch_constants } else { &mut self.constants };
        table.insert(name.to_string(), value.into());
    }

    /// Sets a color constant; `dark` selects the dark mode table.
    pub fn set_color(&mut self, name: &str, value: impl Into<String>, dark: bool) {
        let table = if dark { &mut self.dark_colors } else { &mut self.colors };
        table.insert(name.to_string(), value.into());
    }

    /// Sets an image constant; `dark` selects the dark mode table.
    pub fn set_image(&mut self, name: &str, url: impl Into<String>, dark: bool) {
        let table = if dark { &mut self.dark_images } else { &mut self.images };
        table.insert(name.to_string(), url.into());
    }

    /// Sets a named style.
    pub fn set_style(&mut self, name: &str, properties: Properties) {
        self.styles.insert(name.to_string(), Rc::new(properties));
    }

    /// Text of a constant; the touch table wins on touch screens.
    #[must_use]
    pub fn constant(&self, name: &str, touch: bool) -> Option<&str> {
        touch
            .then(|| self.touch_constants.get(name))
            .flatten()
            .or_else(|| self.constants.get(name))
            .map(String::as_str)
    }

    /// Text of a color constant; the dark table wins in dark mode.
    #[must_use]
    pub fn color(&self, name: &str, dark: bool) -> Option<&str> {
        dark.then(|| self.dark_colors.get(name))
            .flatten()
            .or_else(|| self.colors.get(name))
            .map(String::as_str)
    }

    /// Url of an image constant; the dark table wins in dark mode.
    #[must_use]
    pub fn image(&self, name: &str, dark: bool) -> Option<&str> {
        dark.then(|| self.dark_images.get(name))
            .flatten()
            .or_else(|| self.images.get(name))
            .map(String::as_str)
    }

    /// A named style.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<Rc<Properties>> {
        self.styles.get(name).cloned()
    }

    /// Adds the tables of `other`; its entries win.
    pub fn merge(&mut self, other: &Self) {
        self.constants.extend(other.constants.clone());
        self.touch_constants.extend(other.touch_constants.clone());
        self.colors.extend(other.colors.clone());
        self.dark_colors.extend(other.dark_colors.clone());
        self.images.extend(other.images.clone());
        self.dark_images.extend(other.dark_images.clone());
        self.styles.extend(other.styles.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Size, Value};

    const THEME: &str = r#"
        theme {
            name = test,
            constants = _{ gap = 8px },
            "constants:touch" = _{ gap = 16px },
            colors = _{ textColor = #FF202020 },
            "colors:dark" = _{ textColor = #FFE0E0E0 },
            images = _{ logo = logo.png },
            styles = [
                header { text-size = 24pt, padding = 4px },
                broken { width = nonsense },
            ],
        }
    "#;

    #[test]
    fn parse_tables() {
        let theme = Theme::parse(THEME).unwrap();
        assert_eq!(theme.name(), "test");
        assert_eq!(theme.constant("gap", false), Some("8px"));
        assert_eq!(theme.constant("gap", true), Some("16px"));
        assert_eq!(theme.color("textColor", false), Some("#FF202020"));
        assert_eq!(theme.color("textColor", true), Some("#FFE0E0E0"));
        assert_eq!(theme.image("logo", true), Some("logo.png"));

        let header = theme.style("header").unwrap();
        assert_eq!(header.get("text-size"), Some(&Value::Size(Size::pt(24.0))));
        assert!(theme.style("broken").unwrap().is_empty());
    }

    #[test]
    fn merge_overrides() {
        let mut theme = Theme::parse(THEME).unwrap();
        let mut other = Theme::new("other");
        other.set_constant("gap", "2px", false);
        theme.merge(&other);
        assert_eq!(theme.constant("gap", false), Some("2px"));
        assert_eq!(theme.name(), "test");
    }
}
