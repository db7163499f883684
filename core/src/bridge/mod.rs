//! The remote bridge.
//!
//! A [`Bridge`] turns view mutations into commands for the browser runtime.
//! [`ScriptBridge`] implements it by writing JavaScript source and handing the
//! text to a [`ScriptSink`]; the transports in `rui-web` and the headless
//! [`RecordingSink`] are sinks.

mod answer;
mod recording;
mod script;

use core::fmt::{self, Display};

pub use answer::{AnswerSlots, PendingAnswer};
pub use recording::RecordingSink;
pub use script::{ScriptBridge, ScriptSink, escape_text};

use crate::data::DataObject;
use crate::error::BridgeError;
use crate::value::format_number;

/// A variable created inside the current canvas script, written as `v<n>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasVar(String);

impl CanvasVar {
    pub(crate) fn numbered(number: u64) -> Self {
        Self(format!("v{number}"))
    }

    /// The script identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// An argument of a runtime function call.
#[derive(Debug, Clone, PartialEq)]
pub enum JsArg {
    /// Written as a quoted, escaped string.
    Text(String),
    /// Written as a quoted character.
    Rune(char),
    /// Written in decimal.
    Int(i64),
    /// Written in `%g` form.
    Float(f64),
    /// `true` or `false`.
    Bool(bool),
    /// A bracketed list of numbers.
    Floats(Vec<f64>),
    /// A canvas variable identifier.
    Var(CanvasVar),
}

fn rune_literal(ch: char) -> String {
    match ch {
        '\t' => "'\\t'".to_string(),
        '\r' => "'\\r'".to_string(),
        '\n' => "'\\n'".to_string(),
        '\u{8}' => "'\\b'".to_string(),
        '\u{c}' => "'\\f'".to_string(),
        '\u{b}' => "'\\v'".to_string(),
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        ch if ch < ' ' => format!("'\\x{:02x}'", u32::from(ch)),
        ch => format!("'{ch}'"),
    }
}

impl Display for JsArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "'{}'", escape_text(text)),
            Self::Rune(ch) => f.write_str(&rune_literal(*ch)),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_number(*value)),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Floats(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(&format_number(*value))?;
                }
                f.write_str("]")
            }
            Self::Var(var) => f.write_str(var.name()),
        }
    }
}

impl From<&str> for JsArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for JsArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for JsArg {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<char> for JsArg {
    fn from(value: char) -> Self {
        Self::Rune(value)
    }
}

impl From<i64> for JsArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for JsArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for JsArg {
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for JsArg {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for JsArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for JsArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<f64>> for JsArg {
    fn from(value: Vec<f64>) -> Self {
        Self::Floats(value)
    }
}

impl From<&[f64]> for JsArg {
    fn from(value: &[f64]) -> Self {
        Self::Floats(value.to_vec())
    }
}

impl From<CanvasVar> for JsArg {
    fn from(value: CanvasVar) -> Self {
        Self::Var(value)
    }
}

impl From<&CanvasVar> for JsArg {
    fn from(value: &CanvasVar) -> Self {
        Self::Var(value.clone())
    }
}

/// Builds a `Vec<JsArg>` from heterogeneous arguments.
#[macro_export]
macro_rules! js_args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::bridge::JsArg::from($arg)),*]
    };
}

/// Measured size of a text run on a canvas, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f64,
    /// Distance from the baseline to the top of the bounding box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the bounding box.
    pub descent: f64,
    /// Distance from the alignment point to the left side of the bounding box.
    pub left: f64,
    /// Distance from the alignment point to the right side of the bounding box.
    pub right: f64,
}

impl TextMetrics {
    /// Decodes an answer of the runtime `canvasTextMetrics` helper.
    ///
    /// # Errors
    ///
    /// Fails when the answer has no `width`.
    pub fn from_answer(answer: &DataObject) -> Result<Self, BridgeError> {
        let width = answer
            .float("width")
            .ok_or(BridgeError::MissingAnswerField("width"))?;
        Ok(Self {
            width,
            ascent: answer.float("ascent").unwrap_or_default(),
            descent: answer.float("descent").unwrap_or_default(),
            left: answer.float("left").unwrap_or_default(),
            right: answer.float("right").unwrap_or_default(),
        })
    }
}

/// Commands understood by the browser runtime.
///
/// Mutation commands never fail from the caller's view: a transport failure is
/// logged, closes the bridge and releases every pending answer.
pub trait Bridge {
    /// Calls a runtime helper.
    fn call_func(&self, name: &str, args: &[JsArg]);

    /// Replaces the content of an element.
    fn update_inner_html(&self, id: &str, html: &str);

    /// Appends to the content of an element.
    fn append_to_inner_html(&self, id: &str, html: &str);

    /// Sets one CSS property of an element; an empty value removes it.
    fn update_css_property(&self, id: &str, name: &str, value: &str);

    /// Sets one attribute of an element.
    fn update_property(&self, id: &str, name: &str, value: &JsArg);

    /// Removes one attribute of an element.
    fn remove_property(&self, id: &str, name: &str);

    /// Opens a batch for `id`; returns `false` when one is already open.
    fn start_update_script(&self, id: &str) -> bool;

    /// Sends the batch of `id` as one script.
    fn finish_update_script(&self, id: &str);

    /// Appends a block to the session animation style sheet.
    fn add_animation_css(&self, css: &str);

    /// Replaces the session animation style sheet.
    fn set_animation_css(&self, css: &str);

    /// Empties the session animation style sheet.
    fn clear_animation(&self) {
        self.set_animation_css("");
    }

    /// Starts a canvas drawing script for the canvas element `id`.
    fn canvas_start(&self, id: &str);

    /// `ctx.name(args...)`.
    fn call_canvas_func(&self, name: &str, args: &[JsArg]);

    /// `ctx.name = value`.
    fn update_canvas_property(&self, name: &str, value: &JsArg);

    /// `let v<n> = ctx.name(args...)`.
    fn create_canvas_var(&self, name: &str, args: &[JsArg]) -> CanvasVar;

    /// `let v<n> = new Path2D(data)`.
    fn create_path2d(&self, data: Option<&str>) -> CanvasVar;

    /// `var.name(args...)`.
    fn call_canvas_var_func(&self, var: &CanvasVar, name: &str, args: &[JsArg]);

    /// Calls `ctx.name(image, args...)` when the runtime has the image `url`,
    /// optionally assigning the result to `ctx.property`.
    fn call_canvas_image_func(&self, url: &str, property: Option<&str>, name: &str, args: &[JsArg]);

    /// Sends the canvas script.
    fn canvas_finish(&self);

    /// Measures text in the canvas `id` with the CSS `font`; blocks for the answer.
    ///
    /// # Errors
    ///
    /// Fails when the bridge closes, the deadline passes or the answer is malformed.
    fn canvas_text_metrics(&self, id: &str, font: &str, text: &str) -> Result<TextMetrics, BridgeError>;

    /// Reads an element property; blocks for the answer.
    ///
    /// # Errors
    ///
    /// Fails when the bridge closes, the deadline passes or the answer is malformed.
    fn html_property_value(&self, id: &str, name: &str) -> Result<String, BridgeError>;

    /// Delivers an answer message to its waiting request.
    fn answer_received(&self, answer: &DataObject);

    /// Returns `true` after [`Bridge::close`] or a transport failure.
    fn is_closed(&self) -> bool;

    /// Closes the bridge and releases every pending request.
    fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_literals() {
        assert_eq!(JsArg::from("it's\n").to_string(), "'it\\'s\\n'");
        assert_eq!(JsArg::from('\t').to_string(), "'\\t'");
        assert_eq!(JsArg::from('\u{1}').to_string(), "'\\x01'");
        assert_eq!(JsArg::from('a').to_string(), "'a'");
        assert_eq!(JsArg::from(0.5).to_string(), "0.5");
        assert_eq!(JsArg::from(7).to_string(), "7");
        assert_eq!(JsArg::from(false).to_string(), "false");
        assert_eq!(JsArg::from(vec![1.0, 2.5]).to_string(), "[1,2.5]");
        assert_eq!(JsArg::from(CanvasVar::numbered(3)).to_string(), "v3");
    }

    #[test]
    fn answer_metrics() {
        let answer = DataObject::parse("answer{answerID=1, width=12.5, ascent=9}").unwrap();
        let metrics = TextMetrics::from_answer(&answer).unwrap();
        assert_eq!(metrics.width, 12.5);
        assert_eq!(metrics.ascent, 9.0);
        let answer = DataObject::parse("answer{answerID=1}").unwrap();
        assert_eq!(
            TextMetrics::from_answer(&answer),
            Err(BridgeError::MissingAnswerField("width"))
        );
    }
}
