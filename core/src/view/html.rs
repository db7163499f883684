//! Recursive composition of the HTML of a view tree.

use alloc::collections::BTreeSet;
use core::fmt::Write;

use super::{CssBuilder, View};
use crate::event::kinds::{DOM_EVENTS, EventFamily};
use crate::properties;
use crate::value::format_number;

/// Escapes text for an attribute value or element content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\n' => escaped.push_str("<br>"),
            ch => escaped.push(ch),
        }
    }
    escaped
}

impl View {
    /// The `class` attribute: `[system class ]ruiView [style]`.
    ///
    /// A disabled view uses its `style-disabled` when it has one.
    #[must_use]
    pub fn html_class(&self, disabled: bool) -> String {
        let style = |tag: &str| {
            self.styled_value(tag)
                .and_then(|value| value.as_text().map(str::to_string))
                .filter(|name| !name.is_empty())
        };
        let mut class = String::from("ruiView");
        let chosen = if disabled {
            style("style-disabled").or_else(|| style("style"))
        } else {
            style("style")
        };
        if let Some(style) = chosen {
            class.push(' ');
            class.push_str(&style);
        }
        let system = self.widget_hooks().system_class();
        if system.is_empty() {
            class
        } else {
            format!("{system} {class}")
        }
    }

    /// Base [`super::Widget::css_style`]: the CSS of every tag stored on the
    /// view or given by its style sheets.
    pub fn base_css_style(&self, builder: &mut CssBuilder) {
        let mut tags: BTreeSet<String> = self.tags().into_iter().collect();
        for style in self.style_names_for_css() {
            tags.extend(self.session().style_tags(&style));
        }
        let mut families = BTreeSet::new();
        let mut transform_written = false;
        for tag in tags {
            if let Some(root) = properties::family_root(&tag) {
                if !families.insert(root) {
                    continue;
                }
            }
            if super::transform::is_transform_tag(&tag) {
                if transform_written {
                    continue;
                }
                transform_written = true;
            }
            if let Some(declarations) = self.tag_declarations(&tag) {
                builder.extend(declarations);
            }
        }
    }

    fn style_names_for_css(&self) -> Vec<String> {
        ["style", "style-disabled"]
            .into_iter()
            .filter_map(|tag| self.styled_value(tag))
            .filter_map(|value| value.as_text().map(str::to_string))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// The inline `style` attribute text.
    #[must_use]
    pub fn inline_style(&self) -> String {
        let mut builder = CssBuilder::new();
        self.widget_hooks().css_style(self, &mut builder);
        builder.finish()
    }

    fn write_event_attributes(&self, buffer: &mut String) {
        let focusable = self.is_focusable();
        let transitions = self.get_raw("transition").is_some();
        for kind in DOM_EVENTS {
            let implicit = match kind.family {
                EventFamily::Focus | EventFamily::Key => focusable,
                EventFamily::Transition => {
                    transitions
                        && matches!(kind.tag, "transition-end-event" | "transition-cancel-event")
                }
                _ => false,
            };
            if implicit || !self.listeners(kind.tag).is_empty() {
                let _ = write!(buffer, " {}=\"{}\"", kind.js_event, kind.handler());
            }
        }
    }

    /// Writes the element of the view and of its subtree, marking them created.
    pub fn write_html(&self, buffer: &mut String) {
        let widget = self.widget_hooks();
        let tag = widget.html_tag(self);
        let disabled = self.is_disabled();
        self.data_mut().created = true;

        let _ = write!(buffer, "<{tag} id=\"{}\"", self.html_id());
        let _ = write!(buffer, " class=\"{}\"", escape_html(&self.html_class(disabled)));
        let style = self.inline_style();
        if !style.is_empty() {
            let _ = write!(buffer, " style=\"{}\"", escape_html(&style));
        }

        buffer.push_str(if disabled { " data-disabled=\"1\"" } else { " data-disabled=\"0\"" });
        if disabled && widget.html_disabled() {
            buffer.push_str(" disabled");
        }
        let frame = self.frame();
        if frame.left != 0.0 || frame.top != 0.0 || frame.width != 0.0 || frame.height != 0.0 {
            let _ = write!(
                buffer,
                " data-left=\"{}\" data-top=\"{}\" data-width=\"{}\" data-height=\"{}\"",
                format_number(frame.left),
                format_number(frame.top),
                format_number(frame.width),
                format_number(frame.height)
            );
        }
        widget.html_properties(self, buffer);

        if !disabled {
            if let Some(index) = self.tab_index() {
                let _ = write!(buffer, " tabindex=\"{index}\"");
            }
        }
        if let Some(tooltip) = self.get_text("tooltip").filter(|text| !text.is_empty()) {
            let _ = write!(
                buffer,
                " data-tooltip=\"{}\" onmouseenter=\"mouseEnterEvent(this, event)\" onmouseleave=\"mouseLeaveEvent(this, event)\"",
                escape_html(&tooltip)
            );
        }
        buffer.push_str(" onscroll=\"scrollEvent(this, event)\"");
        self.write_event_attributes(buffer);
        buffer.push('>');

        widget.html_subviews(self, buffer);
        let _ = write!(buffer, "</{tag}>");
    }

    /// The HTML of the view and its subtree.
    #[must_use]
    pub fn html(&self) -> String {
        let mut buffer = String::new();
        self.write_html(&mut buffer);
        buffer
    }

    /// Re-renders the content of a created view.
    pub fn update_inner_html(&self) {
        if !self.updates_enabled() {
            return;
        }
        let mut buffer = String::new();
        self.widget_hooks().html_subviews(self, &mut buffer);
        self.session()
            .bridge()
            .update_inner_html(self.html_id(), &buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escaping() {
        assert_eq!(escape_html("a<b> & \"c\""), "a&lt;b&gt; &amp; &quot;c&quot;");
        assert_eq!(escape_html("x\ny"), "x<br>y");
    }
}
