//! Session-scoped `@keyframes` blocks shared through use counts.

use alloc::collections::BTreeSet;

use super::AnimatedProperty;
use crate::error::PropertyError;
use crate::properties;
use crate::value::Value;
use crate::view::View;
use crate::view::css::{CssBuilder, keyframe_declarations};

#[derive(Debug)]
struct Entry {
    name: String,
    body: String,
    uses: usize,
}

impl Entry {
    fn css(&self) -> String {
        format!("@keyframes {} {{\n{}}}\n", self.name, self.body)
    }
}

/// Registered keyframe sets of one session.
///
/// Equal keyframe sets share one generated `kfNNNNNN` name. The counter never
/// goes back, so a name is never reused within a session.
#[derive(Debug, Default)]
pub struct KeyframeRegistry {
    counter: u64,
    entries: Vec<Entry>,
}

impl KeyframeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes one use of the block with `body`.
    ///
    /// Returns the name and, when the block is new, its CSS to append.
    pub fn acquire(&mut self, body: &str) -> (String, Option<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.body == body) {
            entry.uses += 1;
            return (entry.name.clone(), None);
        }
        self.counter += 1;
        let entry = Entry {
            name: format!("kf{:06}", self.counter),
            body: body.to_string(),
            uses: 1,
        };
        let css = entry.css();
        let name = entry.name.clone();
        self.entries.push(entry);
        (name, Some(css))
    }

    /// Gives back one use of `name`.
    ///
    /// Returns the CSS of the remaining blocks when the last use went away.
    pub fn release(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|entry| entry.name == name)?;
        let entry = &mut self.entries[index];
        entry.uses = entry.uses.saturating_sub(1);
        if entry.uses > 0 {
            return None;
        }
        self.entries.remove(index);
        Some(self.css())
    }

    /// Number of live uses of `name`.
    #[must_use]
    pub fn uses(&self, name: &str) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map_or(0, |entry| entry.uses)
    }

    /// Number of live blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` without live blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The style sheet of every live block.
    #[must_use]
    pub fn css(&self) -> String {
        self.entries.iter().map(Entry::css).collect()
    }

    /// Forgets every block; the counter keeps going.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn frame_value(view: &View, tag: &str, value: &Value) -> Result<Vec<(&'static str, String)>, PropertyError> {
    let Some(value) = properties::coerce_tag(tag, value.clone(), view.kind_of(tag))? else {
        return Ok(Vec::new());
    };
    let value = match value {
        Value::Constant(name) => match view.session().resolve_constant(tag, &name, view.kind_of(tag)) {
            Some(value) => value,
            None => return Ok(Vec::new()),
        },
        value => value,
    };
    Ok(keyframe_declarations(tag, &value))
}

fn write_frame(body: &mut String, selector: &str, declarations: Vec<(&'static str, String)>) {
    let mut css = CssBuilder::new();
    css.extend(declarations);
    if !css.is_empty() {
        body.push_str(&format!("  {selector} {{ {} }}\n", css.finish()));
    }
}

/// The frames of a keyframe set, as the content of a `@keyframes` rule.
///
/// Values are coerced by the kinds of `view` and constants resolved in its session.
///
/// # Errors
///
/// Fails when a script is incomplete or a value cannot be coerced for its tag.
pub fn keyframes_body(view: &View, properties: &[AnimatedProperty]) -> Result<String, PropertyError> {
    let mut from = Vec::new();
    let mut to = Vec::new();
    let mut positions = BTreeSet::new();
    for property in properties {
        property.validate()?;
        if let Some(value) = property.from() {
            from.extend(frame_value(view, property.tag(), value)?);
        }
        if let Some(value) = property.to() {
            to.extend(frame_value(view, property.tag(), value)?);
        }
        positions.extend(property.key_frames().keys().copied());
    }

    let mut body = String::new();
    write_frame(&mut body, "from", from);
    for position in positions {
        let mut declarations = Vec::new();
        for property in properties {
            if let Some(value) = property.key_frames().get(&position) {
                declarations.extend(frame_value(view, property.tag(), value)?);
            }
        }
        write_frame(&mut body, &format!("{position}%"), declarations);
    }
    write_frame(&mut body, "to", to);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::KeyframeRegistry;

    #[test]
    fn shared_blocks_count_uses() {
        let mut registry = KeyframeRegistry::new();
        let (first, css) = registry.acquire("  from { width: 1px; }\n");
        assert_eq!(first, "kf000001");
        assert_eq!(css.as_deref(), Some("@keyframes kf000001 {\n  from { width: 1px; }\n}\n"));

        let (again, css) = registry.acquire("  from { width: 1px; }\n");
        assert_eq!(again, first);
        assert!(css.is_none());
        assert_eq!(registry.uses(&first), 2);

        let (second, _) = registry.acquire("  to { width: 2px; }\n");
        assert_eq!(second, "kf000002");

        assert_eq!(registry.release(&first), None);
        let remaining = registry.release(&first).unwrap();
        assert!(!remaining.contains("kf000001"));
        assert!(remaining.contains("kf000002"));

        registry.release(&second);
        let (third, _) = registry.acquire("  from { width: 1px; }\n");
        assert_eq!(third, "kf000003");
    }
}
