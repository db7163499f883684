//! A [`Bridge`] that writes JavaScript for the browser runtime.

use core::cell::{Cell, RefCell};
use core::fmt::{self, Debug, Write as _};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::{AnswerSlots, Bridge, CanvasVar, JsArg, TextMetrics};
use crate::data::DataObject;
use crate::error::BridgeError;

/// Escapes text for a single-quoted JavaScript string.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            '\u{b}' => escaped.push_str("\\v"),
            ch => escaped.push(ch),
        }
    }
    escaped
}

fn write_args(buffer: &mut String, args: &[JsArg]) {
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            buffer.push_str(", ");
        }
        let _ = write!(buffer, "{arg}");
    }
}

/// Where finished scripts go.
pub trait ScriptSink {
    /// Delivers one script to the runtime.
    ///
    /// # Errors
    ///
    /// Returns the transport failure; the bridge closes then.
    fn send(&self, script: &str) -> Result<(), BridgeError>;

    /// Hands the sink the slots its reader fulfills with runtime answers.
    fn attach_answers(&self, answers: Arc<AnswerSlots>) {
        let _ = answers;
    }

    /// Closes the transport.
    fn close(&self) {}
}

/// The script-writing bridge.
///
/// Updates of an element with an open batch are buffered into one script that
/// selects the element once; everything else is sent as it is issued.
pub struct ScriptBridge<S> {
    sink: S,
    answers: Arc<AnswerSlots>,
    batches: RefCell<HashMap<String, String>>,
    canvas: RefCell<String>,
    canvas_vars: Cell<u64>,
    closed: Cell<bool>,
}

impl<S> Debug for ScriptBridge<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptBridge")
            .field("batches", &self.batches.borrow().len())
            .field("closed", &self.closed.get())
            .finish_non_exhaustive()
    }
}

impl<S: ScriptSink> ScriptBridge<S> {
    /// Creates a bridge whose synchronous calls wait at most `answer_timeout`.
    pub fn new(sink: S, answer_timeout: Duration) -> Self {
        let answers = Arc::new(AnswerSlots::new(answer_timeout));
        sink.attach_answers(Arc::clone(&answers));
        Self {
            sink,
            answers,
            batches: RefCell::new(HashMap::new()),
            canvas: RefCell::new(String::new()),
            canvas_vars: Cell::new(0),
            closed: Cell::new(false),
        }
    }

    /// The sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The answer slots shared with the transport reader.
    #[must_use]
    pub fn answers(&self) -> Arc<AnswerSlots> {
        Arc::clone(&self.answers)
    }

    fn write(&self, script: &str) -> bool {
        if self.closed.get() {
            tracing::debug!("script dropped, bridge is closed");
            return false;
        }
        tracing::trace!(script, "run script");
        match self.sink.send(script) {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(%error, "transport failed, closing the bridge");
                self.close();
                false
            }
        }
    }

    fn call_script(name: &str, args: &[JsArg]) -> String {
        let mut script = String::with_capacity(name.len() + 16);
        script.push_str(name);
        script.push('(');
        write_args(&mut script, args);
        script.push_str(");");
        script
    }

    /// Appends to the open batch of `id`; returns `false` when there is none.
    fn batched(&self, id: &str, line: impl FnOnce(&mut String)) -> bool {
        let mut batches = self.batches.borrow_mut();
        match batches.get_mut(id) {
            Some(buffer) => {
                line(buffer);
                true
            }
            None => false,
        }
    }

    fn remote_value(&self, name: &str, args: &[JsArg]) -> Result<DataObject, BridgeError> {
        if self.closed.get() {
            return Err(BridgeError::Closed);
        }
        let pending = self.answers.allocate()?;
        let mut call_args = Vec::with_capacity(args.len() + 1);
        call_args.push(JsArg::from(pending.id()));
        call_args.extend_from_slice(args);
        if !self.write(&Self::call_script(name, &call_args)) {
            self.answers.release(pending.id());
            return Err(BridgeError::Closed);
        }
        self.answers.wait(pending)
    }

    fn canvas_call(buffer: &mut String, target: &str, name: &str, args: &[JsArg]) {
        buffer.push('\n');
        buffer.push_str(target);
        buffer.push('.');
        buffer.push_str(name);
        buffer.push('(');
        write_args(buffer, args);
        buffer.push_str(");");
    }

    fn next_var(&self) -> CanvasVar {
        let number = self.canvas_vars.get() + 1;
        self.canvas_vars.set(number);
        CanvasVar::numbered(number)
    }
}

impl<S: ScriptSink> Bridge for ScriptBridge<S> {
    fn call_func(&self, name: &str, args: &[JsArg]) {
        self.write(&Self::call_script(name, args));
    }

    fn update_inner_html(&self, id: &str, html: &str) {
        let buffered = self.batched(id, |buffer| {
            let _ = writeln!(buffer, "element.innerHTML = '{}';", escape_text(html));
        });
        if !buffered {
            self.call_func("updateInnerHTML", &[id.into(), html.into()]);
        }
    }

    fn append_to_inner_html(&self, id: &str, html: &str) {
        let buffered = self.batched(id, |buffer| {
            let _ = writeln!(buffer, "element.innerHTML += '{}';", escape_text(html));
        });
        if !buffered {
            self.call_func("appendToInnerHTML", &[id.into(), html.into()]);
        }
    }

    fn update_css_property(&self, id: &str, name: &str, value: &str) {
        let buffered = self.batched(id, |buffer| {
            let _ = writeln!(buffer, "element.style['{name}'] = '{}';", escape_text(value));
        });
        if !buffered {
            self.call_func("updateCSSProperty", &[id.into(), name.into(), value.into()]);
        }
    }

    fn update_property(&self, id: &str, name: &str, value: &JsArg) {
        let buffered = self.batched(id, |buffer| {
            let _ = writeln!(buffer, "element.setAttribute('{name}', {value});");
        });
        if !buffered {
            self.call_func("updateProperty", &[id.into(), name.into(), value.clone()]);
        }
    }

    fn remove_property(&self, id: &str, name: &str) {
        let buffered = self.batched(id, |buffer| {
            let _ = writeln!(
                buffer,
                "if (element.hasAttribute('{name}')) {{ element.removeAttribute('{name}');}}"
            );
        });
        if !buffered {
            self.call_func("removeProperty", &[id.into(), name.into()]);
        }
    }

    fn start_update_script(&self, id: &str) -> bool {
        let mut batches = self.batches.borrow_mut();
        if batches.contains_key(id) {
            tracing::debug!(id, "update script is already open");
            return false;
        }
        batches.insert(
            id.to_string(),
            format!("{{\nlet element = document.getElementById('{id}');\nif (element) {{\n"),
        );
        true
    }

    fn finish_update_script(&self, id: &str) {
        let batch = self.batches.borrow_mut().remove(id);
        if let Some(mut script) = batch {
            script.push_str("scanElementsSize();\n}\n}\n");
            self.write(&script);
        }
    }

    fn add_animation_css(&self, css: &str) {
        self.write(&format!(
            "{{\nlet styles = document.getElementById('ruiAnimations');\nif (styles) {{\nstyles.textContent += '{}';\n}}\n}}",
            escape_text(css)
        ));
    }

    fn set_animation_css(&self, css: &str) {
        self.write(&format!(
            "{{\nlet styles = document.getElementById('ruiAnimations');\nif (styles) {{\nstyles.textContent = '{}';\n}}\n}}",
            escape_text(css)
        ));
    }

    fn canvas_start(&self, id: &str) {
        let mut canvas = self.canvas.borrow_mut();
        canvas.clear();
        let _ = write!(canvas, "{{\nconst ctx = getCanvasContext('{id}');");
    }

    fn call_canvas_func(&self, name: &str, args: &[JsArg]) {
        Self::canvas_call(&mut self.canvas.borrow_mut(), "ctx", name, args);
    }

    fn update_canvas_property(&self, name: &str, value: &JsArg) {
        let _ = write!(self.canvas.borrow_mut(), "\nctx.{name} = {value};");
    }

    fn create_canvas_var(&self, name: &str, args: &[JsArg]) -> CanvasVar {
        let var = self.next_var();
        let mut canvas = self.canvas.borrow_mut();
        let _ = write!(canvas, "\nlet {} = ctx.{name}(", var.name());
        write_args(&mut canvas, args);
        canvas.push_str(");");
        var
    }

    fn create_path2d(&self, data: Option<&str>) -> CanvasVar {
        let var = self.next_var();
        let mut canvas = self.canvas.borrow_mut();
        let _ = write!(canvas, "\nlet {} = new Path2D(", var.name());
        if let Some(data) = data.filter(|data| !data.is_empty()) {
            let _ = write!(canvas, "{}", JsArg::from(data));
        }
        canvas.push_str(");");
        var
    }

    fn call_canvas_var_func(&self, var: &CanvasVar, name: &str, args: &[JsArg]) {
        Self::canvas_call(&mut self.canvas.borrow_mut(), var.name(), name, args);
    }

    fn call_canvas_image_func(&self, url: &str, property: Option<&str>, name: &str, args: &[JsArg]) {
        let mut canvas = self.canvas.borrow_mut();
        let _ = write!(canvas, "\nimg = images.get('{}');\nif (img) {{\n", escape_text(url));
        if let Some(property) = property.filter(|property| !property.is_empty()) {
            let _ = write!(canvas, "ctx.{property} = ");
        }
        let _ = write!(canvas, "ctx.{name}(img");
        for arg in args {
            let _ = write!(canvas, ", {arg}");
        }
        canvas.push_str(");\n}");
    }

    fn canvas_finish(&self) {
        let script = {
            let mut canvas = self.canvas.borrow_mut();
            canvas.push_str("\n}\n");
            core::mem::take(&mut *canvas)
        };
        self.canvas_vars.set(0);
        self.write(&script);
    }

    fn canvas_text_metrics(&self, id: &str, font: &str, text: &str) -> Result<TextMetrics, BridgeError> {
        let answer = self.remote_value("canvasTextMetrics", &[id.into(), font.into(), text.into()])?;
        TextMetrics::from_answer(&answer)
    }

    fn html_property_value(&self, id: &str, name: &str) -> Result<String, BridgeError> {
        let answer = self.remote_value("getPropertyValue", &[id.into(), name.into()])?;
        answer
            .text("value")
            .map(ToString::to_string)
            .ok_or(BridgeError::MissingAnswerField("value"))
    }

    fn answer_received(&self, answer: &DataObject) {
        self.answers.fulfill(answer);
    }

    fn is_closed(&self) -> bool {
        self.closed.get()
    }

    fn close(&self) {
        if !self.closed.replace(true) {
            self.answers.close();
            self.batches.borrow_mut().clear();
            self.sink.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::RecordingSink;

    fn bridge() -> ScriptBridge<RecordingSink> {
        ScriptBridge::new(RecordingSink::new(), Duration::from_millis(50))
    }

    #[test]
    fn single_commands() {
        let bridge = bridge();
        bridge.update_css_property("id000001", "width", "10px");
        bridge.update_property("id000001", "data-disabled", &"1".into());
        bridge.remove_property("id000001", "tabindex");
        bridge.update_inner_html("id000002", "<div>it's</div>");
        assert_eq!(
            bridge.sink().scripts(),
            vec![
                "updateCSSProperty('id000001', 'width', '10px');".to_string(),
                "updateProperty('id000001', 'data-disabled', '1');".to_string(),
                "removeProperty('id000001', 'tabindex');".to_string(),
                "updateInnerHTML('id000002', '<div>it\\'s</div>');".to_string(),
            ]
        );
    }

    #[test]
    fn batch_coalesces_into_one_script() {
        let bridge = bridge();
        assert!(bridge.start_update_script("id000001"));
        bridge.update_css_property("id000001", "border-style", "solid");
        bridge.update_css_property("id000002", "width", "1px");
        assert!(!bridge.start_update_script("id000001"));
        bridge.remove_property("id000001", "title");
        assert_eq!(bridge.sink().len(), 1);
        bridge.finish_update_script("id000001");
        let scripts = bridge.sink().scripts();
        assert_eq!(scripts.len(), 2);
        assert_eq!(
            scripts[1],
            "{\nlet element = document.getElementById('id000001');\nif (element) {\n\
             element.style['border-style'] = 'solid';\n\
             if (element.hasAttribute('title')) { element.removeAttribute('title');}\n\
             scanElementsSize();\n}\n}\n"
        );
        bridge.finish_update_script("id000001");
        assert_eq!(bridge.sink().len(), 2);
    }

    #[test]
    fn canvas_script() {
        let bridge = bridge();
        bridge.canvas_start("id000003");
        bridge.update_canvas_property("fillStyle", &"red".into());
        let gradient = bridge.create_canvas_var("createLinearGradient", &crate::js_args![0, 0, 10.5, 0]);
        bridge.call_canvas_var_func(&gradient, "addColorStop", &crate::js_args![0, "blue"]);
        bridge.call_canvas_func("fillRect", &crate::js_args![0, 0, 5, 5]);
        bridge.call_canvas_image_func("a.png", None, "drawImage", &crate::js_args![1, 2]);
        assert!(bridge.sink().is_empty());
        bridge.canvas_finish();
        assert_eq!(
            bridge.sink().scripts()[0],
            "{\nconst ctx = getCanvasContext('id000003');\n\
             ctx.fillStyle = 'red';\n\
             let v1 = ctx.createLinearGradient(0, 0, 10.5, 0);\n\
             v1.addColorStop(0, 'blue');\n\
             ctx.fillRect(0, 0, 5, 5);\n\
             img = images.get('a.png');\nif (img) {\nctx.drawImage(img, 1, 2);\n}\n}\n"
        );
    }

    #[test]
    fn synchronous_calls_get_their_answer() {
        let sink = RecordingSink::with_responder(|script| {
            let args = script.strip_prefix("getPropertyValue(")?;
            let (id, _) = args.split_once(',')?;
            Some(DataObject::new("answer").with("answerID", id).with("value", "hello"))
        });
        let bridge = ScriptBridge::new(sink, Duration::from_millis(50));
        bridge.update_css_property("id000001", "width", "1px");
        assert_eq!(bridge.html_property_value("id000001", "value").unwrap(), "hello");
        assert_eq!(bridge.sink().scripts()[1], "getPropertyValue(1, 'id000001', 'value');");
        assert_eq!(
            bridge.canvas_text_metrics("id000001", "12px serif", "x"),
            Err(BridgeError::Timeout { answer_id: 2 })
        );
        bridge.close();
        assert_eq!(
            bridge.html_property_value("id000001", "value"),
            Err(BridgeError::Closed)
        );
        assert_eq!(bridge.answers().pending(), 0);
    }
}
