//! The child list shared by every container view.
//!
//! Container widgets store their children as [`Value::Views`] under
//! [`CONTENT`] and route the tag to [`set_content`]. Children are linked to
//! their container when stored and unlinked when dropped from the list.

use rui_core::{Params, PropertyError, PropertyKind, Session, Value, View, Widget};

/// Tag of the child list.
pub const CONTENT: &str = "content";

/// Converts a `content` value into child views.
///
/// Accepts a view, a list of views, or text, which is shown by a text view.
///
/// # Errors
///
/// Fails for any other value kind.
pub fn content_views(view: &View, value: Value) -> Result<Vec<View>, PropertyError> {
    let session = view.session();
    match value {
        Value::Text(text) if text.trim().is_empty() => Ok(Vec::new()),
        Value::Text(text) => Ok(vec![rui_text::text(session, text)]),
        Value::Texts(texts) => Ok(texts
            .into_iter()
            .map(|text| rui_text::text(session, text))
            .collect()),
        Value::View(child) => Ok(vec![child]),
        Value::Views(children) => Ok(children),
        Value::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::View(child) => Ok(child),
                Value::Text(text) => Ok(rui_text::text(session, text)),
                other => Err(PropertyError::incompatible(CONTENT, other.kind())),
            })
            .collect(),
        other => Err(PropertyError::incompatible(CONTENT, other.kind())),
    }
}

/// The children of a container, in order.
#[must_use]
pub fn children(view: &View) -> Vec<View> {
    match view.get_raw(CONTENT) {
        Some(Value::Views(children)) => children,
        _ => Vec::new(),
    }
}

/// Replaces the children of a container.
///
/// Children missing from the new list are unlinked, the new ones linked.
///
/// # Errors
///
/// Fails when the value does not convert to views; the list is unchanged then.
pub fn set_content(view: &View, value: Value) -> Result<Vec<String>, PropertyError> {
    let views = content_views(view, value)?;
    for old in children(view) {
        if !views.contains(&old) {
            old.set_parent(None);
        }
    }
    for child in &views {
        child.set_parent(Some(view));
    }
    Ok(view.store_raw(CONTENT, (!views.is_empty()).then_some(Value::Views(views))))
}

/// Writes the HTML of every child.
pub fn write_children(view: &View, buffer: &mut String) {
    for child in children(view) {
        child.write_html(buffer);
    }
}

/// [`Widget::set`] of a container: `content` or the base tags.
///
/// # Errors
///
/// Rejects what [`set_content`] or [`View::base_set`] rejects.
pub fn container_set(view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
    if tag == CONTENT {
        set_content(view, value)
    } else {
        view.base_set(tag, value)
    }
}

/// [`Widget::remove`] of a container.
pub fn container_remove(view: &View, tag: &str) -> Vec<String> {
    if tag == CONTENT {
        set_content(view, Value::Views(Vec::new())).unwrap_or_default()
    } else {
        view.base_remove(tag)
    }
}

fn store_children(view: &View, views: Vec<View>) {
    view.store_raw(CONTENT, (!views.is_empty()).then_some(Value::Views(views)));
}

/// Editing of the child list of a container view.
pub trait ContainerExt {
    /// The children, in order.
    fn views(&self) -> Vec<View>;

    /// Number of children.
    fn views_count(&self) -> usize {
        self.views().len()
    }

    /// Position of a child.
    fn index_of(&self, child: &View) -> Option<usize> {
        self.views().iter().position(|view| view == child)
    }

    /// Appends a child; a child already in the list moves to the end.
    fn append(&self, child: View);

    /// Inserts a child at `index`, clamped to the end of the list.
    fn insert(&self, child: View, index: usize);

    /// Removes the child at `index` and unlinks it.
    fn remove_view(&self, index: usize) -> Option<View>;

    /// Removes the child with a user id.
    fn remove_view_by_id(&self, id: &str) -> Option<View> {
        let index = self.views().iter().position(|view| view.id() == id)?;
        self.remove_view(index)
    }

    /// Removes every child.
    fn remove_all_views(&self);
}

fn is_container(view: &View) -> bool {
    let container = view.kind_of(CONTENT) == Some(PropertyKind::Views);
    if !container {
        tracing::warn!(view = view.html_id(), widget = view.type_name(), "view has no child list");
    }
    container
}

impl ContainerExt for View {
    fn views(&self) -> Vec<View> {
        children(self)
    }

    fn append(&self, child: View) {
        if !is_container(self) {
            return;
        }
        let mut views = children(self);
        let moved = views.iter().position(|view| *view == child);
        if let Some(index) = moved {
            views.remove(index);
        }
        child.set_parent(Some(self));
        views.push(child.clone());
        store_children(self, views);
        if self.updates_enabled() {
            if moved.is_some() {
                self.update_inner_html();
            } else {
                self.session()
                    .bridge()
                    .append_to_inner_html(self.html_id(), &child.html());
            }
        }
        self.fire_change_listeners(CONTENT);
    }

    fn insert(&self, child: View, index: usize) {
        if !is_container(self) {
            return;
        }
        let mut views = children(self);
        views.retain(|view| *view != child);
        if index >= views.len() {
            self.append(child);
            return;
        }
        child.set_parent(Some(self));
        views.insert(index, child);
        store_children(self, views);
        self.update_inner_html();
        self.fire_change_listeners(CONTENT);
    }

    fn remove_view(&self, index: usize) -> Option<View> {
        let mut views = children(self);
        if index >= views.len() {
            return None;
        }
        let removed = views.remove(index);
        removed.set_parent(None);
        store_children(self, views);
        self.update_inner_html();
        self.fire_change_listeners(CONTENT);
        Some(removed)
    }

    fn remove_all_views(&self) {
        let views = children(self);
        if views.is_empty() {
            return;
        }
        for view in &views {
            view.set_parent(None);
        }
        store_children(self, Vec::new());
        self.update_inner_html();
        self.fire_change_listeners(CONTENT);
    }
}

/// A block holding its children in document order.
#[derive(Debug, Default)]
pub struct ViewsContainer;

impl ViewsContainer {
    /// Creates a container.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }
}

impl Widget for ViewsContainer {
    fn type_name(&self) -> &'static str {
        "ViewsContainer"
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        (tag == CONTENT).then_some(PropertyKind::Views)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        container_set(view, tag, value)
    }

    fn remove(&self, view: &View, tag: &str) -> Vec<String> {
        container_remove(view, tag)
    }

    fn changed(&self, view: &View, tag: &str) {
        if tag == CONTENT {
            view.update_inner_html();
        } else {
            view.base_changed(tag);
        }
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        write_children(view, buffer);
    }

    fn subviews(&self, view: &View) -> Vec<View> {
        children(view)
    }
}
