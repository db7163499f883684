use rui_core::properties::PropertyKind;
use rui_core::view::escape_html;
use rui_core::{Params, Session, View, Widget};

/// A block of text.
///
/// The `text` tag (alias `content`) holds the displayed string. Unless
/// `not-translate` is set, the text is looked up in the session strings
/// before it is written.
#[derive(Debug, Default)]
pub struct TextView;

impl TextView {
    /// Creates a text view.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// The text as written to the element, after translation.
    #[must_use]
    pub fn display_text(view: &View) -> String {
        let text = view.get_text("text").unwrap_or_default();
        if view.get_bool("not-translate").unwrap_or(false) {
            text
        } else {
            view.session().translate(&text)
        }
    }
}

/// Creates a text view showing `text`.
pub fn text(session: &Session, text: impl Into<String>) -> View {
    TextView::create(session, Params::new().with("text", text.into()))
}

impl Widget for TextView {
    fn type_name(&self) -> &'static str {
        "TextView"
    }

    fn normalize(&self, tag: &str) -> String {
        match rui_core::properties::normalize(tag).as_str() {
            "content" => "text".to_string(),
            other => other.to_string(),
        }
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        (tag == "text").then_some(PropertyKind::Text)
    }

    fn changed(&self, view: &View, tag: &str) {
        match tag {
            "text" | "not-translate" => view.update_inner_html(),
            _ => view.base_changed(tag),
        }
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        buffer.push_str(&escape_html(&Self::display_text(view)));
    }
}

#[cfg(test)]
mod tests {
    use rui_core::Session;

    use super::*;

    #[test]
    fn text_content_and_translation() {
        let (session, sink) = Session::headless();
        session.set_string("greeting", "Hallo");
        let view = text(&session, "greeting");
        assert!(view.html().contains(">Hallo</div>"));

        view.set("not-translate", true);
        assert_eq!(TextView::display_text(&view), "greeting");
        assert_eq!(view.get_text("content").as_deref(), Some("greeting"));

        session.set_root(&view);
        sink.take();
        view.set("text", "a < b");
        assert_eq!(
            sink.take(),
            vec![format!("updateInnerHTML('{}', 'a &lt; b');", view.html_id())]
        );
    }

    #[test]
    fn typography_is_inherited_css() {
        let (session, _) = Session::headless();
        let view = TextView::create(
            &session,
            Params::new()
                .with("text", "x")
                .with("text-size", "18px")
                .with("italic", true),
        );
        let style = view.inline_style();
        assert!(style.contains("font-size: 18px;"));
        assert!(style.contains("font-style: italic;"));
    }
}
