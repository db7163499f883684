//! Keyframe scripts of single properties.

use alloc::collections::BTreeMap;

use crate::data::{DataObject, DataValue};
use crate::error::PropertyError;
use crate::properties::{self, coerce};
use crate::value::Value;

/// The values one property takes during an animation.
///
/// Keyframe positions are percentages in `1..=99`; positions `0` and `100`
/// are the `from` and `to` values.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedProperty {
    tag: String,
    from: Option<Value>,
    to: Option<Value>,
    key_frames: BTreeMap<u32, Value>,
}

impl AnimatedProperty {
    /// A script of `tag` running from `from` to `to`.
    pub fn new(tag: &str, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self {
            tag: properties::normalize(tag),
            from: Some(from.into()),
            to: Some(to.into()),
            key_frames: BTreeMap::new(),
        }
    }

    /// Adds the value at `position` percent.
    #[must_use]
    pub fn with_key_frame(mut self, position: u32, value: impl Into<Value>) -> Self {
        self.set_key_frame(position, value);
        self
    }

    /// Sets the value at `position` percent; 0 replaces `from`, 100 or more replaces `to`.
    pub fn set_key_frame(&mut self, position: u32, value: impl Into<Value>) {
        match position {
            0 => self.from = Some(value.into()),
            100.. => self.to = Some(value.into()),
            position => {
                self.key_frames.insert(position, value.into());
            }
        }
    }

    /// Reads a script from a resource object:
    /// `_{ tag = width, from = 100px, to = 300px, key-frames = _{ 50 = 200px } }`.
    ///
    /// # Errors
    ///
    /// Fails without a tag, or without both the `from` and `to` values.
    pub fn from_object(object: &DataObject) -> Result<Self, PropertyError> {
        let tag = object
            .text("tag")
            .ok_or_else(|| PropertyError::IncompleteAnimatedProperty(String::new()))?;
        let mut property = Self {
            tag: properties::normalize(tag),
            from: object.node("from").map(|node| coerce::from_data(&node.value)),
            to: object.node("to").map(|node| coerce::from_data(&node.value)),
            key_frames: BTreeMap::new(),
        };
        if let Some(frames) = object.object("key-frames") {
            for node in frames.nodes() {
                let position = node
                    .tag
                    .trim()
                    .trim_end_matches('%')
                    .parse::<u32>()
                    .map_err(|_| PropertyError::parse("key-frames", node.tag.clone()))?;
                if let DataValue::Text(_) | DataValue::Object(_) = node.value {
                    property.set_key_frame(position, coerce::from_data(&node.value));
                }
            }
        }
        property.validate()?;
        Ok(property)
    }

    /// Checks that both ends of the script are present.
    ///
    /// # Errors
    ///
    /// [`PropertyError::IncompleteAnimatedProperty`] when `from` or `to` is missing.
    pub fn validate(&self) -> Result<(), PropertyError> {
        if self.tag.is_empty() || self.from.is_none() || self.to.is_none() {
            return Err(PropertyError::IncompleteAnimatedProperty(self.tag.clone()));
        }
        Ok(())
    }

    /// The animated tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value at the start.
    #[must_use]
    pub const fn from(&self) -> Option<&Value> {
        self.from.as_ref()
    }

    /// Value at the end, applied to the view when the animation finishes.
    #[must_use]
    pub const fn to(&self) -> Option<&Value> {
        self.to.as_ref()
    }

    /// Intermediate values by position.
    #[must_use]
    pub const fn key_frames(&self) -> &BTreeMap<u32, Value> {
        &self.key_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_frames_collapse() {
        let property = AnimatedProperty::new("Width", "1px", "2px")
            .with_key_frame(0, "10px")
            .with_key_frame(100, "30px")
            .with_key_frame(50, "20px");
        assert_eq!(property.tag(), "width");
        assert_eq!(property.from(), Some(&Value::from("10px")));
        assert_eq!(property.to(), Some(&Value::from("30px")));
        assert_eq!(property.key_frames().keys().copied().collect::<Vec<_>>(), vec![50]);
    }

    #[test]
    fn resource_object() {
        let object = DataObject::parse(
            "_{ tag = width, from = 100px, to = 300px, key-frames = _{ \"50\" = 200px } }",
        )
        .unwrap();
        let property = AnimatedProperty::from_object(&object).unwrap();
        assert_eq!(property.key_frames().get(&50), Some(&Value::from("200px")));

        let incomplete = DataObject::parse("_{ tag = width, from = 100px }").unwrap();
        assert_eq!(
            AnimatedProperty::from_object(&incomplete),
            Err(PropertyError::IncompleteAnimatedProperty("width".into()))
        );
    }
}
