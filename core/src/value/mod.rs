//! The value taxonomy stored in property maps.
//!
//! A [`Value`] is both what callers pass to `set` and what the property map
//! stores after coercion. The coercion rules of each tag live in
//! [`crate::properties`].

mod angle;
mod border;
mod bounds;
mod clip;
pub mod datetime;
mod filter;
pub mod gradient;
mod radius;
mod range;
mod shadow;
mod size;

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use core::any::Any;
use core::fmt::{self, Debug, Display};

pub use angle::{Angle, AngleUnit};
pub use border::{Border, BorderSide, LineStyle};
pub use bounds::Bounds;
pub use clip::ClipShape;
pub use filter::{FILTER_AMOUNTS, ViewFilter};
pub use gradient::{AngleStop, BackgroundElement, GradientStop, LinearDirection, RadialExtent, RadialShape};
pub use radius::{Corner, Radius};
pub use range::{CellIndex, Range};
pub use rui_color::Color;
pub use shadow::{Shadow, box_shadow_css, text_shadow_css};
pub use size::{Size, SizeFunc, SizeFuncArg, SizeFuncKind, SizeUnit};
pub use time::{Date, Time};

use crate::animation::{AnimatedProperty, Animation};
use crate::data::DataObject;
use crate::event::{BindingTable, EventListeners};
use crate::view::View;

/// Formats a number the way `%g` does: shortest form, exponent for very small or large values.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(power) = exponent.parse::<i32>() else {
        return scientific;
    };
    if (-4..21).contains(&power) {
        return format!("{value}");
    }
    let sign = if power < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", power.abs())
}

/// An opaque shared value, used for adapters and callbacks stored as properties.
#[derive(Clone)]
pub struct Handle(Rc<dyn Any>);

impl Handle {
    /// Wraps a value.
    pub fn new<T: 'static>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Borrows the value as `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handle")
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A `@name` reference resolved against the session constants when read.
    Constant(String),
    /// Text.
    Text(String),
    /// Integer; enums are stored as their index.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Flag.
    Bool(bool),
    /// Length.
    Size(Size),
    /// List of lengths, e.g. grid tracks.
    Sizes(Vec<Size>),
    /// Angle.
    Angle(Angle),
    /// Color.
    Color(Color),
    /// Inclusive integer range.
    Range(Range),
    /// Four sizes.
    Bounds(Bounds),
    /// Four border sides.
    Border(Border),
    /// One border side, an outline or a column separator.
    BorderSide(BorderSide),
    /// Corner radii.
    Radius(Radius),
    /// One corner radius.
    Corner(Corner),
    /// Shadows.
    Shadows(Vec<Shadow>),
    /// Background layers.
    Background(Vec<BackgroundElement>),
    /// Graphical filter effects.
    Filter(Box<ViewFilter>),
    /// Clip or float-around shape.
    ClipShape(ClipShape),
    /// A keyframe script of one property.
    AnimatedProperty(Box<AnimatedProperty>),
    /// Running or attached animations.
    Animations(Vec<Animation>),
    /// Transition per property tag.
    Transitions(BTreeMap<String, Animation>),
    /// List of strings.
    Texts(Vec<String>),
    /// List of integers.
    Ints(Vec<i64>),
    /// Calendar date.
    Date(Date),
    /// Time of day.
    Time(Time),
    /// Table cell coordinates.
    Cell(CellIndex),
    /// One view.
    View(View),
    /// Ordered views.
    Views(Vec<View>),
    /// A resource object.
    Object(DataObject),
    /// Heterogeneous list, e.g. listeners or objects from resources.
    List(Vec<Value>),
    /// Event listeners of one tag.
    Listeners(EventListeners),
    /// Binding target used by listeners given by name.
    Binding(Rc<BindingTable>),
    /// Opaque value.
    Handle(Handle),
}

impl Value {
    /// Short name of the value kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Size(_) => "size",
            Self::Sizes(_) => "sizes",
            Self::Angle(_) => "angle",
            Self::Color(_) => "color",
            Self::Range(_) => "range",
            Self::Bounds(_) => "bounds",
            Self::Border(_) => "border",
            Self::BorderSide(_) => "border side",
            Self::Radius(_) => "radius",
            Self::Corner(_) => "corner",
            Self::Shadows(_) => "shadows",
            Self::Background(_) => "background",
            Self::Filter(_) => "filter",
            Self::ClipShape(_) => "clip shape",
            Self::AnimatedProperty(_) => "animated property",
            Self::Animations(_) => "animations",
            Self::Transitions(_) => "transitions",
            Self::Texts(_) => "texts",
            Self::Ints(_) => "ints",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Cell(_) => "cell",
            Self::View(_) => "view",
            Self::Views(_) => "views",
            Self::Object(_) => "object",
            Self::List(_) => "list",
            Self::Listeners(_) => "listeners",
            Self::Binding(_) => "binding",
            Self::Handle(_) => "handle",
        }
    }

    /// Text content.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer content; floats with no fraction are accepted.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        }
    }

    /// Float content; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Flag content.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Size content.
    #[must_use]
    pub const fn as_size(&self) -> Option<&Size> {
        match self {
            Self::Size(size) => Some(size),
            _ => None,
        }
    }

    /// Color content.
    #[must_use]
    pub const fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Angle content.
    #[must_use]
    pub const fn as_angle(&self) -> Option<Angle> {
        match self {
            Self::Angle(angle) => Some(*angle),
            _ => None,
        }
    }

    /// View content.
    #[must_use]
    pub const fn as_view(&self) -> Option<&View> {
        match self {
            Self::View(view) => Some(view),
            _ => None,
        }
    }

    /// Opaque content.
    #[must_use]
    pub const fn as_handle(&self) -> Option<&Handle> {
        match self {
            Self::Handle(handle) => Some(handle),
            _ => None,
        }
    }
}

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(name) => write!(f, "@{name}"),
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_number(*value)),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Size(size) => Display::fmt(size, f),
            Self::Sizes(sizes) => f.write_str(&join(sizes, ",")),
            Self::Angle(angle) => Display::fmt(angle, f),
            Self::Color(color) => Display::fmt(color, f),
            Self::Range(range) => Display::fmt(range, f),
            Self::Bounds(bounds) => Display::fmt(bounds, f),
            Self::Border(border) => Display::fmt(border, f),
            Self::BorderSide(side) => Display::fmt(side, f),
            Self::Radius(radius) => Display::fmt(radius, f),
            Self::Corner(corner) => write!(f, "{} / {}", corner.x, corner.y),
            Self::Filter(filter) => f.write_str(&filter.css()),
            Self::ClipShape(shape) => f.write_str(&shape.css()),
            Self::Texts(texts) => f.write_str(&texts.join(",")),
            Self::Ints(values) => f.write_str(&join(values, ",")),
            Self::Date(date) => f.write_str(&datetime::format_date(*date)),
            Self::Time(time) => f.write_str(&datetime::format_time(*time)),
            Self::Cell(cell) => Display::fmt(cell, f),
            Self::Object(object) => Display::fmt(object, f),
            Self::List(items) => f.write_str(&join(items, ",")),
            other => write!(f, "<{}>", other.kind()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    Size => Size,
    Vec<Size> => Sizes,
    Angle => Angle,
    Color => Color,
    Range => Range,
    Bounds => Bounds,
    Border => Border,
    BorderSide => BorderSide,
    Radius => Radius,
    Corner => Corner,
    Vec<Shadow> => Shadows,
    Vec<BackgroundElement> => Background,
    ClipShape => ClipShape,
    Vec<Animation> => Animations,
    BTreeMap<String, Animation> => Transitions,
    Vec<String> => Texts,
    Vec<i64> => Ints,
    Date => Date,
    Time => Time,
    CellIndex => Cell,
    View => View,
    Vec<View> => Views,
    DataObject => Object,
    Vec<Value> => List,
    EventListeners => Listeners,
    Rc<BindingTable> => Binding,
    Handle => Handle,
}

impl From<AnimatedProperty> for Value {
    fn from(value: AnimatedProperty) -> Self {
        Self::AnimatedProperty(Box::new(value))
    }
}

impl From<ViewFilter> for Value {
    fn from(value: ViewFilter) -> Self {
        Self::Filter(Box::new(value))
    }
}

impl From<SizeFunc> for Value {
    fn from(value: SizeFunc) -> Self {
        Self::Size(Size::function(value))
    }
}

impl From<Shadow> for Value {
    fn from(value: Shadow) -> Self {
        Self::Shadows(vec![value])
    }
}

impl From<BackgroundElement> for Value {
    fn from(value: BackgroundElement) -> Self {
        Self::Background(vec![value])
    }
}

impl From<Animation> for Value {
    fn from(value: Animation) -> Self {
        Self::Animations(vec![value])
    }
}

impl From<BindingTable> for Value {
    fn from(value: BindingTable) -> Self {
        Self::Binding(Rc::new(value))
    }
}

impl From<&[&str]> for Value {
    fn from(value: &[&str]) -> Self {
        Self::Texts(value.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(value: [&str; N]) -> Self {
        Self::Texts(value.iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_format() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::from(Size::px(3.0)).to_string(), "3px");
        assert_eq!(Value::Constant("gap".into()).to_string(), "@gap");
        assert_eq!(Value::from(["a", "b"]).to_string(), "a,b");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
    }

    #[test]
    fn animated_property_nests_values() {
        let value = Value::from(AnimatedProperty::new("width", "1px", "2px"));
        let Value::AnimatedProperty(property) = &value else {
            panic!("expected an animated property, got {value:?}");
        };
        assert_eq!(property.tag(), "width");
        assert_eq!(value.kind(), "animated property");
    }
}
