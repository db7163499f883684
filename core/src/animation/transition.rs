//! The `animation` and `transition` properties of a view.

use alloc::collections::BTreeMap;

use super::{Animation, keyframes_body, timing_css};
use crate::bridge::JsArg;
use crate::error::PropertyError;
use crate::event::kinds;
use crate::properties::{PropertyKind, constant_name};
use crate::value::{Value, format_number};
use crate::view::View;
use crate::view::css;

fn css_name(tag: &str) -> String {
    css::declarations(tag, None)
        .and_then(|declarations| declarations.first().map(|(name, _)| (*name).to_string()))
        .unwrap_or_else(|| tag.to_string())
}

/// The CSS `transition` shorthand: `property duration [timing] [delay]` per entry.
#[must_use]
pub fn transitions_css(transitions: &BTreeMap<String, Animation>) -> String {
    transitions
        .iter()
        .map(|(tag, animation)| {
            let mut entry = format!("{} {}s", css_name(tag), format_number(animation.duration()));
            if !animation.timing().is_empty() {
                entry.push(' ');
                entry.push_str(animation.timing());
            }
            if animation.delay() > 0.0 {
                if animation.timing().is_empty() {
                    entry.push_str(" ease");
                }
                entry.push_str(&format!(" {}s", format_number(animation.delay())));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn animations_of(value: Value) -> Result<Option<Vec<Animation>>, PropertyError> {
    let animations = match value {
        Value::Animations(list) => list,
        Value::Text(text) if text.trim().is_empty() => return Ok(None),
        Value::Object(object) => vec![Animation::from_object(&object)?],
        Value::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(object) => Animation::from_object(&object),
                Value::Animations(mut list) if list.len() == 1 => list
                    .pop()
                    .ok_or_else(|| PropertyError::incompatible("animation", "animations")),
                other => Err(PropertyError::incompatible("animation", other.kind())),
            })
            .collect::<Result<_, _>>()?,
        other => return Err(PropertyError::incompatible("animation", other.kind())),
    };
    if animations.iter().any(|animation| animation.properties().is_empty()) {
        return Err(PropertyError::EmptyAnimation);
    }
    Ok((!animations.is_empty()).then_some(animations))
}

impl View {
    /// Stores the `animation` property, registering the keyframes of new
    /// animations and releasing those of the replaced ones.
    pub(crate) fn set_animations(&self, value: Value) -> Result<Vec<String>, PropertyError> {
        let animations = animations_of(value)?;
        let bodies = animations
            .iter()
            .flatten()
            .map(|animation| keyframes_body(self, animation.properties()))
            .collect::<Result<Vec<_>, _>>()?;

        let bridge = self.session().bridge();
        if let Some(animations) = &animations {
            for (animation, body) in animations.iter().zip(&bodies) {
                let (name, css) = self.session().acquire_keyframes(body);
                if let Some(css) = css {
                    bridge.add_animation_css(&css);
                }
                animation.set_keyframes_name(Some(name));
            }
        }
        if let Some(Value::Animations(old)) = self.get_raw("animation") {
            for animation in old {
                if let Some(name) = animation.keyframes_name() {
                    if let Some(css) = self.session().release_keyframes(&name) {
                        bridge.set_animation_css(&css);
                    }
                }
            }
        }
        Ok(self.store_raw("animation", animations.map(Value::Animations)))
    }

    fn transitions(&self) -> BTreeMap<String, Animation> {
        match self.get_raw("transition") {
            Some(Value::Transitions(transitions)) => transitions,
            _ => BTreeMap::new(),
        }
    }

    /// Sets or clears the transition of one property tag.
    pub fn set_transition(&self, tag: &str, animation: Option<Animation>) -> bool {
        let tag = self.widget_hooks().normalize(tag);
        let mut transitions = self.transitions();
        match animation {
            Some(animation) => {
                let Some(timing) = self.resolve_timing(animation.timing()) else {
                    tracing::warn!(tag, timing = animation.timing(), "unresolved transition timing function");
                    return false;
                };
                let animation = if timing == animation.timing() {
                    animation
                } else {
                    animation.with_timing(timing)
                };
                transitions.insert(tag, animation);
            }
            None => {
                transitions.remove(&tag);
            }
        }
        self.set("transition", Value::Transitions(transitions))
    }

    /// The transition of one property tag.
    #[must_use]
    pub fn transition(&self, tag: &str) -> Option<Animation> {
        self.transitions().get(&self.widget_hooks().normalize(tag)).cloned()
    }

    /// The transition a pending animated set of `tag` restores when the runtime
    /// reports its end; `Some(None)` means the tag had no transition before.
    #[must_use]
    pub fn saved_transition(&self, tag: &str) -> Option<Option<Animation>> {
        self.data().transition_saves.get(tag).cloned()
    }

    /// Sets a property through a one-off transition.
    ///
    /// Without a positive duration or with an invalid timing function this is
    /// a plain [`View::set`]. Otherwise the prior transition of the tag is
    /// saved, `animation` becomes its transition until the runtime reports the
    /// end of the change, and the value is written. A rejected value restores
    /// the prior transition at once.
    pub fn set_animated(&self, tag: &str, value: impl Into<Value>, animation: &Animation) -> bool {
        let tag = self.widget_hooks().normalize(tag);
        let timing = self.resolve_timing(animation.timing());
        let Some(timing) = timing.filter(|_| animation.duration() > 0.0) else {
            return self.set(&tag, value);
        };
        let animation = if timing == animation.timing() {
            animation.clone()
        } else {
            animation.with_timing(timing)
        };

        if self.updates_enabled() {
            let bridge = self.session().bridge();
            for event in ["transition-end-event", "transition-cancel-event"] {
                if let Some(kind) = kinds::dom_event(event) {
                    bridge.update_property(self.html_id(), kind.js_event, &JsArg::from(kind.handler()));
                }
            }
        }

        let mut transitions = self.transitions();
        let prior = transitions.get(&tag).cloned();
        self.data_mut()
            .transition_saves
            .entry(tag.clone())
            .or_insert(prior);
        transitions.insert(tag.clone(), animation);
        self.set("transition", Value::Transitions(transitions));

        if self.set(&tag, value) {
            true
        } else {
            self.transition_finished(&tag);
            false
        }
    }

    // `@name` timing functions come from the session constants
    fn resolve_timing(&self, timing: &str) -> Option<String> {
        let Some(name) = constant_name(timing) else {
            return timing_css(timing);
        };
        let resolved = self
            .session()
            .resolve_constant("timing-function", name, Some(PropertyKind::Text));
        match resolved {
            Some(Value::Text(text)) => timing_css(&text),
            _ => None,
        }
    }

    /// Restores the transition saved by [`View::set_animated`] for a property
    /// whose transition the runtime reported as ended or cancelled.
    ///
    /// `property` is the view tag or its CSS property name.
    pub fn transition_finished(&self, property: &str) {
        let tag = {
            let data = self.data();
            if data.transition_saves.contains_key(property) {
                Some(property.to_string())
            } else {
                data.transition_saves
                    .keys()
                    .find(|tag| css_name(tag) == property)
                    .cloned()
            }
        };
        let Some(tag) = tag else {
            return;
        };
        let Some(prior) = self.data_mut().transition_saves.remove(&tag) else {
            return;
        };
        let mut transitions = self.transitions();
        match prior {
            Some(animation) => {
                transitions.insert(tag, animation);
            }
            None => {
                transitions.remove(&tag);
            }
        }
        self.set("transition", Value::Transitions(transitions));
    }
}
