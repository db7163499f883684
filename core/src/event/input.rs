//! Input events decoded from runtime messages.

use crate::data::{DataObject, DataValue};

fn time_stamp(data: &DataObject) -> u64 {
    data.text("timeStamp")
        .map(|text| text.split('.').next().unwrap_or_default())
        .and_then(|text| text.parse().ok())
        .unwrap_or_default()
}

fn float(data: &DataObject, tag: &str) -> f64 {
    data.float(tag).unwrap_or_default()
}

/// A keyboard event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Milliseconds since the epoch, as reported by the browser.
    pub time_stamp: u64,
    /// Key value, e.g. `"a"` or `"Enter"`.
    pub key: String,
    /// Physical key code, e.g. `"KeyA"`.
    pub code: String,
    /// Repeated by holding the key down.
    pub repeat: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
}

impl KeyEvent {
    /// Decodes a `key-down-event`/`key-up-event` message.
    #[must_use]
    pub fn from_data(data: &DataObject) -> Self {
        Self {
            time_stamp: time_stamp(data),
            key: data.text("key").unwrap_or_default().to_string(),
            code: data.text("code").unwrap_or_default().to_string(),
            repeat: data.flag("repeat"),
            ctrl_key: data.flag("ctrlKey"),
            shift_key: data.flag("shiftKey"),
            alt_key: data.flag("altKey"),
            meta_key: data.flag("metaKey"),
        }
    }

    /// Returns `true` for the keys that activate a focused element.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        matches!(self.code.as_str(), "Space" | "Enter" | "NumpadEnter")
            || matches!(self.key.as_str(), " " | "Enter")
    }
}

/// A mouse event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseEvent {
    pub time_stamp: u64,
    /// Button that triggered the event: 0 primary, 1 auxiliary, 2 secondary.
    pub button: i64,
    /// Mask of the pressed buttons.
    pub buttons: i64,
    /// Coordinates within the view.
    pub x: f64,
    pub y: f64,
    /// Coordinates within the application viewport.
    pub client_x: f64,
    pub client_y: f64,
    /// Screen coordinates.
    pub screen_x: f64,
    pub screen_y: f64,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
}

impl MouseEvent {
    /// Decodes a mouse message.
    #[must_use]
    pub fn from_data(data: &DataObject) -> Self {
        Self {
            time_stamp: time_stamp(data),
            button: data.int("button").unwrap_or_default(),
            buttons: data.int("buttons").unwrap_or_default(),
            x: float(data, "x"),
            y: float(data, "y"),
            client_x: float(data, "clientX"),
            client_y: float(data, "clientY"),
            screen_x: float(data, "screenX"),
            screen_y: float(data, "screenY"),
            ctrl_key: data.flag("ctrlKey"),
            shift_key: data.flag("shiftKey"),
            alt_key: data.flag("altKey"),
            meta_key: data.flag("metaKey"),
        }
    }
}

/// A pointer event: a mouse event plus the pointer geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerEvent {
    pub mouse: MouseEvent,
    pub pointer_id: i64,
    pub width: f64,
    pub height: f64,
    pub pressure: f64,
    pub tangential_pressure: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub twist: f64,
    /// `mouse`, `pen` or `touch`.
    pub pointer_type: String,
    pub is_primary: bool,
}

impl PointerEvent {
    /// Decodes a pointer message.
    #[must_use]
    pub fn from_data(data: &DataObject) -> Self {
        Self {
            mouse: MouseEvent::from_data(data),
            pointer_id: data.int("pointerId").unwrap_or_default(),
            width: float(data, "width"),
            height: float(data, "height"),
            pressure: float(data, "pressure"),
            tangential_pressure: float(data, "tangentialPressure"),
            tilt_x: float(data, "tiltX"),
            tilt_y: float(data, "tiltY"),
            twist: float(data, "twist"),
            pointer_type: data.text("pointerType").unwrap_or_default().to_string(),
            is_primary: data.flag("isPrimary"),
        }
    }
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Touch {
    /// Stable id of the contact while it lasts.
    pub identifier: i64,
    /// Coordinates within the view.
    pub x: f64,
    pub y: f64,
    pub client_x: f64,
    pub client_y: f64,
    pub screen_x: f64,
    pub screen_y: f64,
    /// Radii of the contact ellipse.
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the contact ellipse in degrees.
    pub rotation_angle: f64,
    /// Pressure between 0 and 1.
    pub force: f64,
}

impl Touch {
    fn from_data(data: &DataObject) -> Self {
        Self {
            identifier: data.int("identifier").unwrap_or_default(),
            x: float(data, "x"),
            y: float(data, "y"),
            client_x: float(data, "clientX"),
            client_y: float(data, "clientY"),
            screen_x: float(data, "screenX"),
            screen_y: float(data, "screenY"),
            radius_x: float(data, "radiusX"),
            radius_y: float(data, "radiusY"),
            rotation_angle: float(data, "rotationAngle"),
            force: float(data, "force"),
        }
    }
}

/// A touch event with the contacts of the changed touches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchEvent {
    pub time_stamp: u64,
    pub touches: Vec<Touch>,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
}

impl TouchEvent {
    /// Decodes a touch message; `touches` is an array of contact objects.
    #[must_use]
    pub fn from_data(data: &DataObject) -> Self {
        let touches = data
            .array("touches")
            .unwrap_or_default()
            .iter()
            .filter_map(DataValue::as_object)
            .map(Touch::from_data)
            .collect();
        Self {
            time_stamp: time_stamp(data),
            touches,
            ctrl_key: data.flag("ctrlKey"),
            shift_key: data.flag("shiftKey"),
            alt_key: data.flag("altKey"),
            meta_key: data.flag("metaKey"),
        }
    }
}

/// Position and size of a view as measured by the runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    /// Left edge relative to the parent.
    pub left: f64,
    /// Top edge relative to the parent.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Frame {
    /// Decodes `x`, `y`, `width`, `height` of a `resize` message.
    #[must_use]
    pub fn from_data(data: &DataObject) -> Self {
        Self {
            left: float(data, "x"),
            top: float(data, "y"),
            width: float(data, "width"),
            height: float(data, "height"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        let data = DataObject::parse(
            "key-down-event{id=id000001, timeStamp=1234.5, key=\" \", code=Space, ctrlKey=1}",
        )
        .unwrap();
        let event = KeyEvent::from_data(&data);
        assert_eq!(event.time_stamp, 1234);
        assert!(event.ctrl_key && !event.shift_key);
        assert!(event.is_activation());

        let data = DataObject::parse("pointer-down{x=1.5, y=2, pointerId=7, pointerType=pen}").unwrap();
        let event = PointerEvent::from_data(&data);
        assert_eq!(event.mouse.x, 1.5);
        assert_eq!(event.pointer_id, 7);
        assert_eq!(event.pointer_type, "pen");

        let data = DataObject::parse(
            "touch-start{timeStamp=20, shiftKey=1, touches=[_{identifier=3, x=4, y=5.5, force=0.5}, _{identifier=4}, text]}",
        )
        .unwrap();
        let event = TouchEvent::from_data(&data);
        assert_eq!(event.time_stamp, 20);
        assert!(event.shift_key);
        assert_eq!(event.touches.len(), 2);
        assert_eq!(event.touches[0].identifier, 3);
        assert_eq!(event.touches[0].y, 5.5);
        assert_eq!(event.touches[0].force, 0.5);
        assert_eq!(event.touches[1].identifier, 4);
        assert!(TouchEvent::from_data(&DataObject::new("touch-end")).touches.is_empty());
    }
}
