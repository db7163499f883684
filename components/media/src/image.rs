use core::cell::RefCell;

use rui_core::bridge::Bridge;
use rui_core::properties::PropertyKind;
use rui_core::view::escape_html;
use rui_core::{CssBuilder, DataObject, JsArg, Params, PropertyError, Session, Value, View, Widget};

const SRC: &str = "src";
const SRC_SET: &str = "src-set";
const ALT_TEXT: &str = "alt-text";
const LOADED_EVENT: &str = "loaded-event";
const ERROR_EVENT: &str = "error-event";

const FIT_CSS: [&str; 5] = ["none", "contain", "cover", "fill", "scale-down"];

#[derive(Debug, Default)]
struct Loaded {
    natural_width: f64,
    natural_height: f64,
    current_src: String,
}

/// An `<img>` element.
///
/// `src` is a url or `@name` of an image in the session image table.
/// `src-set` lists alternative files, where a `@2x` style suffix before the
/// extension gives the pixel density. `fit` maps to `object-fit` and the
/// `vertical-align`/`horizontal-align` pair to `object-position`.
#[derive(Debug, Default)]
pub struct ImageView {
    loaded: RefCell<Loaded>,
}

impl ImageView {
    /// Creates an image view.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self::default(), params)
    }

    /// The `src` url after the image table lookup; empty for an unknown name.
    #[must_use]
    pub fn source_url(view: &View) -> String {
        view.get_text(SRC)
            .map(|src| view.session().image_url(&src))
            .unwrap_or_default()
    }

    /// The intrinsic size reported by the last `imageViewLoaded` message.
    #[must_use]
    pub fn natural_size(view: &View) -> (f64, f64) {
        view.widget::<Self>().map_or((0.0, 0.0), |image| {
            let loaded = image.loaded.borrow();
            (loaded.natural_width, loaded.natural_height)
        })
    }

    /// The file the browser picked from `src` and `src-set`.
    #[must_use]
    pub fn current_source(view: &View) -> String {
        view.widget::<Self>()
            .map(|image| image.loaded.borrow().current_src.clone())
            .unwrap_or_default()
    }
}

/// Creates an image view showing `src`.
pub fn image(session: &Session, src: impl Into<String>) -> View {
    ImageView::create(session, Params::new().with(SRC, src.into()))
}

fn src_set(view: &View) -> String {
    let Some(text) = view.get_text(SRC_SET) else {
        return String::new();
    };
    text.split(',')
        .map(|entry| entry.trim_matches([' ', '\t', '\n']))
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let density = entry
                .rfind('@')
                .filter(|&at| at > 0)
                .and_then(|at| entry.rfind('.').filter(|&dot| dot > at).map(|dot| &entry[at + 1..dot]));
            match density {
                Some(density) => format!("{entry} {density}"),
                None => format!("{entry} 1x"),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn object_position(view: &View) -> Option<String> {
    let vertical = view.get_int("vertical-align").unwrap_or(2);
    let horizontal = view.get_int("horizontal-align").unwrap_or(2);
    if vertical == 2 && horizontal == 2 {
        return None;
    }
    let x = match horizontal {
        0 => "left",
        1 => "right",
        _ => "center",
    };
    let y = match vertical {
        0 => "top",
        1 => "bottom",
        _ => "center",
    };
    Some(format!("{x} {y}"))
}

fn update_source(view: &View) {
    let bridge: &dyn Bridge = view.session().bridge();
    let id = view.html_id();
    let batch = bridge.start_update_script(id);
    let src = ImageView::source_url(view);
    if src.is_empty() {
        bridge.remove_property(id, SRC);
    } else {
        bridge.update_property(id, SRC, &JsArg::from(src));
    }
    match src_set(view) {
        srcset if srcset.is_empty() => bridge.remove_property(id, "srcset"),
        srcset => bridge.update_property(id, "srcset", &JsArg::from(srcset)),
    }
    if batch {
        bridge.finish_update_script(id);
    }
}

impl Widget for ImageView {
    fn type_name(&self) -> &'static str {
        "ImageView"
    }

    fn normalize(&self, tag: &str) -> String {
        match rui_core::properties::normalize(tag).as_str() {
            "source" => SRC.to_string(),
            "source-set" | "srcset" => SRC_SET.to_string(),
            "alt" => ALT_TEXT.to_string(),
            "image-vertical-align" => "vertical-align".to_string(),
            "image-horizontal-align" => "horizontal-align".to_string(),
            other => other.to_string(),
        }
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        matches!(tag, SRC_SET | ALT_TEXT).then_some(PropertyKind::Text)
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        matches!(tag, LOADED_EVENT | ERROR_EVENT).then_some(0)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag != SRC {
            return view.base_set(tag, value);
        }
        // `@name` is kept literal and looked up on render.
        match value {
            Value::Text(text) if text.trim().is_empty() => Ok(view.store_raw(tag, None)),
            Value::Text(text) => Ok(view.store_raw(tag, Some(Value::Text(text)))),
            other => Err(PropertyError::incompatible(tag, other.kind())),
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        if !view.updates_enabled() {
            return;
        }
        match tag {
            SRC | SRC_SET => update_source(view),
            ALT_TEXT => match view.get_text(ALT_TEXT) {
                Some(alt) => view.session().bridge().update_property(
                    view.html_id(),
                    "alt",
                    &JsArg::from(view.session().translate(&alt)),
                ),
                None => view.session().bridge().remove_property(view.html_id(), "alt"),
            },
            "fit" | "vertical-align" | "horizontal-align" => {
                view.session()
                    .bridge()
                    .update_property(view.html_id(), "style", &JsArg::from(view.inline_style()));
            }
            _ => view.base_changed(tag),
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "img".to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        let src = Self::source_url(view);
        if !src.is_empty() {
            buffer.push_str(" src=\"");
            buffer.push_str(&escape_html(&src));
            buffer.push('"');
            let srcset = src_set(view);
            if !srcset.is_empty() {
                buffer.push_str(" srcset=\"");
                buffer.push_str(&escape_html(&srcset));
                buffer.push('"');
            }
        }
        if let Some(alt) = view.get_text(ALT_TEXT) {
            buffer.push_str(" alt=\"");
            buffer.push_str(&escape_html(&view.session().translate(&alt)));
            buffer.push('"');
        }
        buffer.push_str(" onload=\"imageLoaded(this, event)\"");
        if view.get_raw(ERROR_EVENT).is_some() {
            buffer.push_str(" onerror=\"imageError(this, event)\"");
        }
    }

    fn css_style(&self, view: &View, builder: &mut CssBuilder) {
        view.base_css_style(builder);
        if builder.get("object-fit").is_none() {
            let fit = view.get_int("fit").and_then(|fit| usize::try_from(fit).ok());
            builder.add("object-fit", fit.and_then(|fit| FIT_CSS.get(fit)).copied().unwrap_or("none"));
        }
        if let Some(position) = object_position(view) {
            builder.add("object-position", position);
        }
    }

    fn handle_command(&self, view: &View, command: &str, data: &DataObject) -> bool {
        match command {
            "imageViewLoaded" => {
                {
                    let mut loaded = self.loaded.borrow_mut();
                    loaded.natural_width = data.float("natural-width").unwrap_or_default();
                    loaded.natural_height = data.float("natural-height").unwrap_or_default();
                    loaded.current_src = data.text("current-src").unwrap_or_default().to_string();
                }
                view.fire(LOADED_EVENT, &[]);
                true
            }
            "imageViewError" => {
                tracing::debug!(view = view.html_id(), src = %Self::source_url(view), "image failed to load");
                view.fire(ERROR_EVENT, &[]);
                true
            }
            _ => view.base_handle_command(command, data),
        }
    }
}
