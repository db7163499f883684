//! The property engine.
//!
//! A [`Properties`] map stores coerced values by canonical tag. Shorthand
//! families (`margin`, `padding`, `cell-padding`, `border`, `outline`,
//! `radius`) share leaves between their tags, so reading `padding-top` after
//! writing `padding` yields the shorthand's top side.
//!
//! ```
//! use rui_core::{Properties, Value, value::Size};
//!
//! let mut props = Properties::new();
//! props.set("padding", "4px,8px,12px,16px").unwrap();
//! let top = props.lookup("padding-top", &|_, _| None);
//! assert_eq!(top, Some(Value::Size(Size::px(4.0))));
//! ```

pub mod coerce;
pub(crate) mod family;
pub mod tables;

use alloc::collections::BTreeMap;

pub use coerce::{PropertyKind, coerce, constant_name};

use crate::error::PropertyError;
use crate::value::Value;

/// Resolves a constant name for a tag: `(tag, name) -> value`.
pub type Resolver<'a> = &'a dyn Fn(&str, &str) -> Option<Value>;

/// Lowercases a tag and maps alternative spellings to the canonical tag.
#[must_use]
pub fn normalize(tag: &str) -> String {
    let tag = tag.trim().to_lowercase();
    family::alias(&tag).unwrap_or(tag)
}

/// Returns `true` when the tag belongs to a shorthand family.
#[must_use]
pub fn is_family_tag(tag: &str) -> bool {
    family::lookup(tag).is_some()
}

/// The whole-family tag of a family tag: `padding` for `padding-left`.
#[must_use]
pub fn family_root(tag: &str) -> Option<&'static str> {
    family::lookup(tag).map(|target| match target.family {
        family::Family::Margin => "margin",
        family::Family::Padding => "padding",
        family::Family::CellPadding => "cell-padding",
        family::Family::Border => "border",
        family::Family::Outline => "outline",
        family::Family::Radius => "radius",
    })
}

/// CSS declarations of the family of `tag`, given the whole-family value.
///
/// An empty declaration value means the CSS property is to be removed.
#[must_use]
pub fn family_declarations(tag: &str, value: Option<&Value>) -> Vec<(&'static str, String)> {
    let Some(target) = family::lookup(tag) else {
        return Vec::new();
    };
    // a uniform value (one side, one size) is spread over the leaves it covers
    let mask = target.leaves();
    let leaves: Vec<Option<Value>> = (0..12)
        .map(|bit| {
            let value = value.filter(|_| mask & (1 << bit) != 0)?;
            family::leaf_value(target, value, bit)
        })
        .collect();
    let whole = family::FamilyTag {
        family: target.family,
        shape: family::Shape::All,
    };
    family::css(target.family, family::compose(whole, &leaves).as_ref())
}

/// Coerces a value for a canonical tag.
///
/// Family tags use their own rules; other tags use `kind` when given, or the
/// general tables.
///
/// # Errors
///
/// Fails for unknown tags and values that cannot be coerced.
pub fn coerce_tag(
    tag: &str,
    value: Value,
    kind: Option<PropertyKind>,
) -> Result<Option<Value>, PropertyError> {
    if let Some(target) = family::lookup(tag) {
        if let Value::Text(text) = &value {
            if text.trim().is_empty() {
                return Ok(None);
            }
            if let Some(name) = constant_name(text) {
                return Ok(Some(Value::Constant(name.to_string())));
            }
        }
        if matches!(value, Value::Constant(_)) {
            return Ok(Some(value));
        }
        return family::coerce_value(target, tag, value);
    }
    let kind = kind
        .or_else(|| tables::kind(tag))
        .ok_or_else(|| PropertyError::UnknownTag(tag.to_string()))?;
    coerce(tag, kind, value)
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    seq: u64,
}

/// A tag-keyed property map.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: BTreeMap<String, Entry>,
    /// Family tags removed while a wider entry still covers them, by write sequence.
    cleared: BTreeMap<String, u64>,
    seq: u64,
}

impl PartialEq for Properties {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((tag, entry), (other_tag, other_entry))| {
                    tag == other_tag && entry.value == other_entry.value
                })
            && self.cleared.keys().eq(other.cleared.keys())
    }
}

impl Properties {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Properties::set`]; a rejected value is logged and skipped.
    #[must_use]
    pub fn with(mut self, tag: &str, value: impl Into<Value>) -> Self {
        if let Err(error) = self.set(tag, value) {
            tracing::warn!(%error, "rejected property value");
        }
        self
    }

    /// Normalizes the tag, coerces the value by the general tables and stores it.
    ///
    /// Returns the canonical tags whose stored entries changed.
    ///
    /// # Errors
    ///
    /// Fails for unknown tags and incompatible values; the map is unchanged then.
    pub fn set(&mut self, tag: &str, value: impl Into<Value>) -> Result<Vec<String>, PropertyError> {
        let tag = normalize(tag);
        let value = coerce_tag(&tag, value.into(), None)?;
        Ok(self.store(&tag, value))
    }

    /// Removes a tag; removing a shorthand clears every tag of its family it covers.
    pub fn remove(&mut self, tag: &str) -> Vec<String> {
        self.store(&normalize(tag), None)
    }

    /// Stores an already coerced value under a canonical tag, `None` removing it.
    ///
    /// Entries of the same family covering a subset of the tag's leaves are dropped.
    /// Removing a family tag without an entry of its own that a wider entry still
    /// covers clears just those leaves.
    /// Returns the tags whose entries changed; an equal value changes nothing.
    pub fn store(&mut self, tag: &str, value: Option<Value>) -> Vec<String> {
        let mut changed = Vec::new();
        let target = family::lookup(tag);
        if let Some(target) = target {
            let mask = target.leaves();
            let subset = |key: &str| {
                family::lookup(key).is_some_and(|other| {
                    other.family == target.family && other.leaves() & !mask == 0
                })
            };
            self.cleared.retain(|key, _| !subset(key));
            let covered: Vec<String> = self
                .entries
                .keys()
                .filter(|key| key.as_str() != tag && subset(key))
                .cloned()
                .collect();
            for key in covered {
                self.entries.remove(&key);
                changed.push(key);
            }
        }

        match value {
            Some(value) => {
                let unchanged = changed.is_empty()
                    && self.entries.get(tag).is_some_and(|entry| {
                        entry.value == value && self.is_latest(tag, entry.seq)
                    });
                if !unchanged {
                    self.seq += 1;
                    self.entries.insert(
                        tag.to_string(),
                        Entry {
                            value,
                            seq: self.seq,
                        },
                    );
                    changed.insert(0, tag.to_string());
                }
            }
            None => {
                if self.entries.remove(tag).is_some() {
                    changed.insert(0, tag.to_string());
                } else if let Some(target) = target.filter(|target| self.is_covered(*target)) {
                    self.seq += 1;
                    self.cleared.insert(tag.to_string(), self.seq);
                    tracing::trace!(tag, family = ?target.family, "family leaves cleared");
                    changed.insert(0, tag.to_string());
                }
            }
        }
        changed
    }

    // some entry of the family still supplies a leaf of `target`
    fn is_covered(&self, target: family::FamilyTag) -> bool {
        let mask = target.leaves();
        self.entries.keys().any(|key| {
            family::lookup(key)
                .is_some_and(|other| other.family == target.family && other.leaves() & mask != 0)
        })
    }

    fn is_latest(&self, tag: &str, seq: u64) -> bool {
        let Some(target) = family::lookup(tag) else {
            return true;
        };
        let mask = target.leaves();
        let entries = self.entries.iter().map(|(key, entry)| (key, entry.seq));
        let cleared = self.cleared.iter().map(|(key, seq)| (key, *seq));
        entries.chain(cleared).all(|(key, other_seq)| {
            other_seq <= seq
                || family::lookup(key)
                    .is_none_or(|other| other.family != target.family || other.leaves() & mask == 0)
        })
    }

    /// The stored entry of a canonical tag, constants unresolved.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.entries.get(tag).map(|entry| &entry.value)
    }

    /// Returns `true` when the canonical tag has a stored entry.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    fn resolved(tag: &str, value: &Value, resolve: Resolver<'_>) -> Option<Value> {
        match value {
            Value::Constant(name) => {
                let resolved = resolve(tag, name);
                if resolved.is_none() {
                    tracing::debug!(tag, constant = %name, "unresolved constant");
                }
                resolved
            }
            other => Some(other.clone()),
        }
    }

    fn family_leaves(&self, family_of: family::Family, resolve: Resolver<'_>) -> Vec<Option<Value>> {
        let mut best: Vec<Option<(u64, family::FamilyTag, &str, Option<&Value>)>> = vec![None; 12];
        let entries = self
            .entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry.seq, Some(&entry.value)));
        let cleared = self.cleared.iter().map(|(key, seq)| (key.as_str(), *seq, None));
        for (key, seq, value) in entries.chain(cleared) {
            let Some(target) = family::lookup(key).filter(|target| target.family == family_of)
            else {
                continue;
            };
            let mask = target.leaves();
            for (bit, slot) in best.iter_mut().enumerate() {
                if mask & (1 << bit) != 0 && slot.is_none_or(|(other, ..)| other < seq) {
                    *slot = Some((seq, target, key, value));
                }
            }
        }
        best.into_iter()
            .enumerate()
            .map(|(bit, slot)| {
                let (_, target, key, value) = slot?;
                let value = Self::resolved(key, value?, resolve)?;
                family::leaf_value(target, &value, bit)
            })
            .collect()
    }

    /// Reads a canonical tag, resolving constants and composing family values from their leaves.
    #[must_use]
    pub fn lookup(&self, tag: &str, resolve: Resolver<'_>) -> Option<Value> {
        let Some(target) = family::lookup(tag) else {
            return self
                .entries
                .get(tag)
                .and_then(|entry| Self::resolved(tag, &entry.value, resolve));
        };
        if let Some(entry) = self.entries.get(tag) {
            if self.is_latest(tag, entry.seq) {
                return Self::resolved(tag, &entry.value, resolve);
            }
        }
        family::compose(target, &self.family_leaves(target.family, resolve))
    }

    /// CSS declarations of the family a tag belongs to, `None` for other tags.
    ///
    /// An empty declaration value means the CSS property is to be removed.
    #[must_use]
    pub fn family_css(&self, tag: &str, resolve: Resolver<'_>) -> Option<Vec<(&'static str, String)>> {
        let target = family::lookup(tag)?;
        Some(family::css(target.family, self.family_value(tag, resolve).as_ref()))
    }

    /// The whole-family value of the family a tag belongs to, composed from its leaves.
    #[must_use]
    pub fn family_value(&self, tag: &str, resolve: Resolver<'_>) -> Option<Value> {
        let target = family::lookup(tag)?;
        let whole = family::FamilyTag {
            family: target.family,
            shape: family::Shape::All,
        };
        family::compose(whole, &self.family_leaves(target.family, resolve))
    }

    /// Stored tags in sorted order.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterates stored entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(tag, entry)| (tag.as_str(), &entry.value))
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{BorderSide, Bounds, LineStyle, Size};
    use rui_color::Color;

    fn none(_: &str, _: &str) -> Option<Value> {
        None
    }

    #[test]
    fn padding_shorthand_and_sides() {
        let mut props = Properties::new();
        props.set("padding", "4px,8px,12px,16px").unwrap();
        for (tag, px) in [
            ("padding-top", 4.0),
            ("padding-right", 8.0),
            ("padding-bottom", 12.0),
            ("padding-left", 16.0),
        ] {
            assert_eq!(props.lookup(tag, &none), Some(Value::Size(Size::px(px))), "{tag}");
        }

        props.set("padding-left", "1px").unwrap();
        assert_eq!(
            props.lookup("padding", &none),
            Some(Value::Bounds(Bounds::new(4.0, 8.0, 12.0, 1.0)))
        );
        props.remove("padding-left");
        assert_eq!(
            props.lookup("padding", &none),
            Some(Value::Bounds(Bounds::new(4.0, 8.0, 12.0, 16.0)))
        );

        props.remove("padding");
        assert!(props.is_empty());
        assert_eq!(props.lookup("padding-top", &none), None);
    }

    #[test]
    fn removing_a_covered_side_clears_only_that_side() {
        let mut props = Properties::new();
        props.set("padding", "4px").unwrap();
        assert_eq!(props.remove("padding-left"), vec!["padding-left".to_string()]);
        assert_eq!(props.lookup("padding-left", &none), None);
        assert_eq!(props.lookup("padding-top", &none), Some(Value::Size(Size::px(4.0))));
        let Some(Value::Bounds(bounds)) = props.lookup("padding", &none) else {
            panic!("expected composed padding");
        };
        assert!(bounds.left.is_auto());
        assert_eq!(props.family_css("padding", &none).unwrap()[0].0, "padding");

        props.set("padding-left", "2px").unwrap();
        assert_eq!(props.lookup("padding-left", &none), Some(Value::Size(Size::px(2.0))));
        props.remove("padding-left");
        assert_eq!(props.lookup("padding-left", &none), Some(Value::Size(Size::px(4.0))));

        props.set("border", "solid 2px red").unwrap();
        props.remove("border-left-color");
        assert_eq!(props.lookup("border-left-color", &none), None);
        assert_eq!(props.lookup("border-left-width", &none), Some(Value::Size(Size::px(2.0))));
        assert_eq!(props.lookup("border-top-color", &none), Some(Value::Color(Color::RED)));

        props.remove("border");
        props.remove("padding");
        assert!(props.is_empty());
        assert_eq!(props.lookup("border-left-color", &none), None);
    }

    #[test]
    fn shorthand_overwrites_sides() {
        let mut props = Properties::new();
        props.set("margin-left", "3px").unwrap();
        let changed = props.set("margin", "1px").unwrap();
        assert_eq!(changed, vec!["margin".to_string(), "margin-left".to_string()]);
        assert_eq!(props.tags(), vec!["margin".to_string()]);
        assert_eq!(props.lookup("margin-left", &none), Some(Value::Size(Size::px(1.0))));
    }

    #[test]
    fn top_margin_alias() {
        let mut props = Properties::new();
        props.set("Top-Margin", 2).unwrap();
        assert!(props.contains("margin-top"));
    }

    #[test]
    fn border_leaves() {
        let mut props = Properties::new();
        props.set("border", "solid 2px red").unwrap();
        props.set("border-left-color", "blue").unwrap();
        let Some(Value::Border(border)) = props.lookup("border", &none) else {
            panic!("expected a composed border");
        };
        assert_eq!(border.top, BorderSide::new(LineStyle::Solid, 2.0, Color::RED));
        assert_eq!(border.left.color, Some(Color::BLUE));
        assert_eq!(props.lookup("border-left-style", &none), Some(Value::Int(1)));
        assert_eq!(props.lookup("border-width", &none), Some(Value::Size(Size::px(2.0))));

        let css = props.family_css("border-top", &none).unwrap();
        assert_eq!(css[0], ("border-style", "solid".to_string()));
        assert_eq!(
            css[2].1,
            "rgb(255,0,0) rgb(255,0,0) rgb(255,0,0) rgb(0,0,255)"
        );
    }

    #[test]
    fn radius_leaves() {
        let mut props = Properties::new();
        props.set("radius", "4px").unwrap();
        props.set("radius-top-left-y", "8px").unwrap();
        assert_eq!(props.lookup("radius-top-left-x", &none), Some(Value::Size(Size::px(4.0))));
        let css = props.family_css("radius", &none).unwrap();
        assert_eq!(css, vec![("border-radius", "4px 4px 4px 4px / 8px 4px 4px 4px".to_string())]);
    }

    #[test]
    fn equal_write_is_no_change() {
        let mut props = Properties::new();
        assert_eq!(props.set("width", "10px").unwrap(), vec!["width".to_string()]);
        assert!(props.set("width", 10).unwrap().is_empty());
        assert_eq!(props.set("width", "auto").unwrap(), vec!["width".to_string()]);
        assert!(props.get("width").is_none());
    }

    #[test]
    fn failed_write_keeps_map() {
        let mut props = Properties::new();
        props.set("opacity", 0.5).unwrap();
        let before = props.clone();
        assert!(props.set("opacity", 5).is_err());
        assert!(props.set("no-such-tag", 1).is_err());
        assert_eq!(props, before);
    }

    #[test]
    fn constants_resolve_at_read_time() {
        let mut props = Properties::new();
        props.set("padding", "@gap").unwrap();
        let resolve = |tag: &str, name: &str| {
            (name == "gap")
                .then(|| coerce_tag(tag, Value::from("6px"), None).ok().flatten())
                .flatten()
        };
        assert_eq!(props.lookup("padding-top", &resolve), Some(Value::Size(Size::px(6.0))));
        assert_eq!(props.get("padding"), Some(&Value::Constant("gap".into())));
    }
}
