use core::cell::RefCell;

use rui_core::{Session, View};

/// Supplies the items of a list view.
pub trait ListAdapter {
    /// Number of items.
    fn count(&self) -> usize;

    /// The view of the item at `index`, created in `session` on demand.
    fn item(&self, index: usize, session: &Session) -> Option<View>;

    /// Whether the item can be selected and clicked.
    fn is_enabled(&self, _index: usize) -> bool {
        true
    }
}

/// Items shown as text; the text views are created on first use.
#[derive(Default)]
pub struct TextListAdapter {
    items: Vec<String>,
    views: RefCell<Vec<Option<View>>>,
}

impl TextListAdapter {
    /// An adapter over `items`.
    #[must_use]
    pub fn new(items: Vec<String>) -> Self {
        let views = RefCell::new(vec![None; items.len()]);
        Self { items, views }
    }

    /// The text of every item.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl ListAdapter for TextListAdapter {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize, session: &Session) -> Option<View> {
        let text = self.items.get(index)?;
        let mut views = self.views.borrow_mut();
        let slot = views.get_mut(index)?;
        Some(
            slot.get_or_insert_with(|| rui_text::text(session, text.clone()))
                .clone(),
        )
    }
}

/// Items given as views; a disabled view is a disabled item.
#[derive(Default)]
pub struct ViewListAdapter {
    views: Vec<View>,
}

impl ViewListAdapter {
    /// An adapter over `views`.
    #[must_use]
    pub fn new(views: Vec<View>) -> Self {
        Self { views }
    }
}

impl ListAdapter for ViewListAdapter {
    fn count(&self) -> usize {
        self.views.len()
    }

    fn item(&self, index: usize, _session: &Session) -> Option<View> {
        self.views.get(index).cloned()
    }

    fn is_enabled(&self, index: usize) -> bool {
        self.views.get(index).is_some_and(|view| !view.is_disabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rui_core::Params;
    use rui_text::TextView;

    #[test]
    fn text_items_are_created_once() {
        let (session, _) = Session::headless();
        let adapter = TextListAdapter::new(vec!["one".into(), "two".into()]);
        let first = adapter.item(1, &session).unwrap();
        assert_eq!(first.get_text("text").as_deref(), Some("two"));
        assert_eq!(adapter.item(1, &session), Some(first));
        assert!(adapter.item(2, &session).is_none());
    }

    #[test]
    fn disabled_views_are_disabled_items() {
        let (session, _) = Session::headless();
        let on = TextView::create(&session, Params::new());
        let off = TextView::create(&session, Params::new().with("disabled", true));
        let adapter = ViewListAdapter::new(vec![on, off]);
        assert!(adapter.is_enabled(0));
        assert!(!adapter.is_enabled(1));
        assert!(!adapter.is_enabled(2));
    }
}
