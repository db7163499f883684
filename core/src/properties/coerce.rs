//! Conversion of caller values into the stored kind of a tag.

use super::tables::EnumSpec;
use crate::data::{DataObject, DataValue};
use crate::error::PropertyError;
use crate::value::{
    Angle, BackgroundElement, BorderSide, ClipShape, Color, FILTER_AMOUNTS, Range, Shadow, Size, Value,
    ViewFilter, datetime,
};

/// The stored kind of a property tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind {
    /// Free text.
    Text,
    /// List of strings.
    Texts,
    /// A length.
    Size,
    /// List of lengths.
    Sizes,
    /// A color; zero removes.
    Color,
    /// A flag.
    Bool,
    /// An integer.
    Int,
    /// A number within `min..=max`.
    Float {
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// An index into a value table.
    Enum(&'static EnumSpec),
    /// An angle.
    Angle,
    /// An integer range.
    Range,
    /// One line of a border, outline or separator.
    BorderSide,
    /// Shadow list.
    Shadows,
    /// Background layers.
    Background,
    /// Filter effects.
    Filter,
    /// Basic shape; plain CSS text is kept as text.
    ClipShape,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Table cell coordinates.
    Cell,
    /// A child view.
    View,
    /// Child views.
    Views,
    /// A resource object.
    Object,
    /// An opaque value.
    Handle,
}

const FORBIDDEN: &str = ",;|\"'`+(){}[]<>/\\*&%! \t\r\n";

/// Returns the constant name of a `@name` text.
///
/// A name may be written verbatim or backquoted; an invalid name is plain text.
#[must_use]
pub fn constant_name(text: &str) -> Option<&str> {
    let name = text.trim().strip_prefix('@')?;
    let name = name
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
        .unwrap_or(name);
    (!name.is_empty() && !name.contains(|ch| FORBIDDEN.contains(ch))).then_some(name)
}

/// Coerces `value` to `kind`.
///
/// Returns `Ok(None)` when the value means "remove": an empty text, an auto
/// size or a zero color. A `@name` text is kept as a constant reference.
///
/// # Errors
///
/// Returns the reason the value cannot be stored under `tag`.
pub fn coerce(tag: &str, kind: PropertyKind, value: Value) -> Result<Option<Value>, PropertyError> {
    if let Value::Text(text) = &value {
        if text.trim().is_empty() && kind != PropertyKind::Text {
            return Ok(None);
        }
        if let Some(name) = constant_name(text) {
            return Ok(Some(Value::Constant(name.to_string())));
        }
    }
    if let Value::Constant(_) = value {
        return Ok(Some(value));
    }

    let incompatible = |value: &Value| PropertyError::incompatible(tag, value.kind());
    match kind {
        PropertyKind::Text => match value {
            Value::Text(text) if text.is_empty() => Ok(None),
            Value::Text(_) => Ok(Some(value)),
            Value::Int(_) | Value::Float(_) | Value::Bool(_) => {
                Ok(Some(Value::Text(value.to_string())))
            }
            other => Err(incompatible(&other)),
        },
        PropertyKind::Texts => texts(tag, value),
        PropertyKind::Size => size(tag, value).map(|size| size.map(Value::Size)),
        PropertyKind::Sizes => sizes(tag, value),
        PropertyKind::Color => color(tag, &value).map(|color| color.map(Value::Color)),
        PropertyKind::Bool => bool_value(tag, &value).map(|flag| Some(Value::Bool(flag))),
        PropertyKind::Int => int(tag, &value).map(|value| Some(Value::Int(value))),
        PropertyKind::Float { min, max } => {
            float(tag, &value, min, max).map(|value| Some(Value::Float(value)))
        }
        PropertyKind::Enum(spec) => {
            enum_index(tag, &value, spec).map(|index| Some(Value::Int(index)))
        }
        PropertyKind::Angle => angle(tag, &value).map(|angle| Some(Value::Angle(angle))),
        PropertyKind::Range => match value {
            Value::Range(_) => Ok(Some(value)),
            Value::Int(index) => Ok(Some(Value::Range(Range::single(index)))),
            Value::Text(text) => text
                .parse::<Range>()
                .map(|range| Some(Value::Range(range)))
                .map_err(|_| PropertyError::parse(tag, text)),
            other => Err(incompatible(&other)),
        },
        PropertyKind::BorderSide => border_side(tag, value).map(|side| Some(Value::BorderSide(side))),
        PropertyKind::Shadows => shadows(tag, value),
        PropertyKind::Background => background(tag, value),
        PropertyKind::Filter => filter(tag, value),
        PropertyKind::ClipShape => clip_shape(tag, value),
        PropertyKind::Date => match value {
            Value::Date(_) => Ok(Some(value)),
            Value::Text(text) => datetime::parse_date(&text)
                .map(|date| Some(Value::Date(date)))
                .map_err(|_| PropertyError::parse(tag, text)),
            other => Err(incompatible(&other)),
        },
        PropertyKind::Time => match value {
            Value::Time(_) => Ok(Some(value)),
            Value::Text(text) => datetime::parse_time(&text)
                .map(|time| Some(Value::Time(time)))
                .map_err(|_| PropertyError::parse(tag, text)),
            other => Err(incompatible(&other)),
        },
        PropertyKind::Cell => match value {
            Value::Cell(_) => Ok(Some(value)),
            Value::Text(text) => text
                .parse()
                .map(|cell| Some(Value::Cell(cell)))
                .map_err(|_| PropertyError::parse(tag, text)),
            other => Err(incompatible(&other)),
        },
        PropertyKind::View => match value {
            Value::View(_) => Ok(Some(value)),
            other => Err(incompatible(&other)),
        },
        PropertyKind::Views => match value {
            Value::Views(views) if views.is_empty() => Ok(None),
            Value::Views(_) => Ok(Some(value)),
            Value::View(view) => Ok(Some(Value::Views(vec![view]))),
            Value::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::View(view) => Ok(view),
                    other => Err(incompatible(&other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|views| Some(Value::Views(views))),
            other => Err(incompatible(&other)),
        },
        PropertyKind::Object => match value {
            Value::Object(_) => Ok(Some(value)),
            Value::Text(text) => DataObject::parse(&text)
                .map(|object| Some(Value::Object(object)))
                .map_err(|_| PropertyError::parse(tag, text)),
            other => Err(incompatible(&other)),
        },
        PropertyKind::Handle => match value {
            Value::Handle(_) => Ok(Some(value)),
            other => Err(incompatible(&other)),
        },
    }
}

/// Coerces a size; `Ok(None)` for auto.
///
/// # Errors
///
/// Fails for non-size values and unparseable text.
pub fn size(tag: &str, value: Value) -> Result<Option<Size>, PropertyError> {
    let size = match value {
        Value::Size(size) => size,
        Value::Int(_) | Value::Float(_) => Size::px(value.as_float().unwrap_or_default()),
        Value::Text(text) => text
            .parse::<Size>()
            .map_err(|_| PropertyError::parse(tag, text))?,
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    Ok((!size.is_auto()).then_some(size))
}

fn sizes(tag: &str, value: Value) -> Result<Option<Value>, PropertyError> {
    let sizes = match value {
        Value::Sizes(sizes) => sizes,
        Value::Size(_) | Value::Int(_) | Value::Float(_) => {
            size(tag, value)?.map_or_else(|| vec![Size::auto()], |size| vec![size])
        }
        Value::Text(text) => text
            .split(',')
            .map(|part| part.trim().parse::<Size>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| PropertyError::parse(tag, text))?,
        Value::List(items) => items
            .into_iter()
            .map(|item| size(tag, item).map(Option::unwrap_or_default))
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    Ok((!sizes.is_empty()).then_some(Value::Sizes(sizes)))
}

/// Coerces a color; `Ok(None)` for the zero color.
///
/// # Errors
///
/// Fails for non-color values and unparseable text.
pub fn color(tag: &str, value: &Value) -> Result<Option<Color>, PropertyError> {
    let color = match value {
        Value::Color(color) => *color,
        Value::Int(argb) => u32::try_from(*argb)
            .map(Color::new)
            .map_err(|_| PropertyError::parse(tag, argb.to_string()))?,
        Value::Text(text) => text
            .parse::<Color>()
            .map_err(|_| PropertyError::parse(tag, text.clone()))?,
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    Ok((!color.is_zero()).then_some(color))
}

/// Coerces a flag.
///
/// # Errors
///
/// Fails for anything but a bool, `0`/`1` or one of the flag words.
pub fn bool_value(tag: &str, value: &Value) -> Result<bool, PropertyError> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::Int(0) => Ok(false),
        Value::Int(1) => Ok(true),
        Value::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(PropertyError::parse(tag, text.clone())),
        },
        other => Err(PropertyError::incompatible(tag, other.kind())),
    }
}

/// Coerces an integer.
///
/// # Errors
///
/// Fails for non-integral values and unparseable text.
pub fn int(tag: &str, value: &Value) -> Result<i64, PropertyError> {
    match value {
        Value::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| PropertyError::parse(tag, text.clone())),
        other => other
            .as_int()
            .ok_or_else(|| PropertyError::incompatible(tag, other.kind())),
    }
}

/// Coerces a number and checks it against `min..=max`.
///
/// # Errors
///
/// Fails for non-numbers, unparseable text and out-of-range values.
pub fn float(tag: &str, value: &Value, min: f64, max: f64) -> Result<f64, PropertyError> {
    let number = match value {
        Value::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| PropertyError::parse(tag, text.clone()))?,
        other => other
            .as_float()
            .ok_or_else(|| PropertyError::incompatible(tag, other.kind()))?,
    };
    if number < min || number > max {
        return Err(PropertyError::OutOfRange {
            tag: tag.to_string(),
            value: number,
            min,
            max,
        });
    }
    Ok(number)
}

/// Coerces an enum value to its index.
///
/// # Errors
///
/// Fails for names and indices outside the table.
pub fn enum_index(tag: &str, value: &Value, spec: &EnumSpec) -> Result<i64, PropertyError> {
    let not_in_enum = |text: String| PropertyError::NotInEnum {
        tag: tag.to_string(),
        text,
    };
    let index = match value {
        Value::Text(text) => spec.index_of(text).ok_or_else(|| not_in_enum(text.clone()))?,
        Value::Int(index) => usize::try_from(*index)
            .ok()
            .filter(|index| *index < spec.values.len())
            .ok_or_else(|| not_in_enum(index.to_string()))?,
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    i64::try_from(index).map_err(|_| not_in_enum(index.to_string()))
}

/// Coerces an angle; numbers are radians.
///
/// # Errors
///
/// Fails for non-angle values and unparseable text.
pub fn angle(tag: &str, value: &Value) -> Result<Angle, PropertyError> {
    match value {
        Value::Angle(angle) => Ok(*angle),
        Value::Text(text) => text
            .parse()
            .map_err(|_| PropertyError::parse(tag, text.clone())),
        other => other
            .as_float()
            .map(Angle::rad)
            .ok_or_else(|| PropertyError::incompatible(tag, other.kind())),
    }
}

fn texts(tag: &str, value: Value) -> Result<Option<Value>, PropertyError> {
    let texts = match value {
        Value::Texts(texts) => texts,
        Value::Text(text) => vec![text],
        Value::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Text(text) => Ok(text),
                Value::Int(_) | Value::Float(_) | Value::Bool(_) => Ok(item.to_string()),
                other => Err(PropertyError::incompatible(tag, other.kind())),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Value::Object(object) => object
            .nodes()
            .iter()
            .filter_map(|node| node.value.as_text().map(ToString::to_string))
            .collect(),
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    Ok((!texts.is_empty()).then_some(Value::Texts(texts)))
}

/// Coerces one border line from a side, its text form or a resource object.
///
/// # Errors
///
/// Fails for other kinds and malformed parts.
pub fn border_side(tag: &str, value: Value) -> Result<BorderSide, PropertyError> {
    match value {
        Value::BorderSide(side) => Ok(side),
        Value::Text(text) => text.parse().map_err(|_| PropertyError::parse(tag, text)),
        Value::Object(object) => side_from_object(tag, &object, ""),
        other => Err(PropertyError::incompatible(tag, other.kind())),
    }
}

/// Reads `{prefix}style`, `{prefix}width` and `{prefix}color` of an object.
pub(crate) fn side_from_object(
    tag: &str,
    object: &DataObject,
    prefix: &str,
) -> Result<BorderSide, PropertyError> {
    let field = |name: &str| object.text(&format!("{prefix}{name}"));
    let mut side = BorderSide::default();
    if let Some(style) = field("style") {
        side.style = Some(
            crate::value::LineStyle::from_name(style)
                .or_else(|| style.trim().parse().ok().and_then(crate::value::LineStyle::from_index))
                .ok_or_else(|| PropertyError::parse(tag, style))?,
        );
    }
    if let Some(width) = field("width") {
        side.width = size(tag, Value::from(width))?;
    }
    if let Some(text) = field("color") {
        side.color = color(tag, &Value::from(text))?;
    }
    Ok(side)
}

fn shadow_from_object(tag: &str, object: &DataObject) -> Result<Shadow, PropertyError> {
    let size_of = |name: &str| {
        object
            .text(name)
            .map_or(Ok(None), |text| size(tag, Value::from(text)))
            .map(Option::unwrap_or_default)
    };
    Ok(Shadow {
        x_offset: size_of("x-offset")?,
        y_offset: size_of("y-offset")?,
        blur: size_of("blur")?,
        spread: size_of("spread-radius")?,
        color: object
            .text("color")
            .map_or(Ok(None), |text| color(tag, &Value::from(text)))?
            .unwrap_or(Color::BLACK),
        inset: object.flag("inset"),
    })
}

fn shadows(tag: &str, value: Value) -> Result<Option<Value>, PropertyError> {
    let shadows = match value {
        Value::Shadows(shadows) => shadows,
        Value::Object(object) => vec![shadow_from_object(tag, &object)?],
        Value::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(object) => shadow_from_object(tag, &object),
                Value::Shadows(mut shadows) if shadows.len() == 1 => {
                    Ok(shadows.remove(0))
                }
                other => Err(PropertyError::incompatible(tag, other.kind())),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    Ok((!shadows.is_empty()).then_some(Value::Shadows(shadows)))
}

fn background_item(tag: &str, object: &DataObject) -> Result<BackgroundElement, PropertyError> {
    BackgroundElement::from_object(object).map_err(|error| PropertyError::parse(tag, error.text))
}

fn background(tag: &str, value: Value) -> Result<Option<Value>, PropertyError> {
    let elements = match value {
        Value::Background(elements) => elements,
        Value::Object(object) => vec![background_item(tag, &object)?],
        Value::Text(text) => {
            let object =
                DataObject::parse(&text).map_err(|_| PropertyError::parse(tag, text.clone()))?;
            vec![background_item(tag, &object)?]
        }
        Value::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(object) => background_item(tag, &object),
                other => Err(PropertyError::incompatible(tag, other.kind())),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    Ok((!elements.is_empty()).then_some(Value::Background(elements)))
}

fn filter_from_object(tag: &str, object: &DataObject) -> Result<ViewFilter, PropertyError> {
    let mut filter = ViewFilter::default();
    for (name, min, max) in FILTER_AMOUNTS {
        if let Some(text) = object.text(name) {
            let amount = float(tag, &Value::from(text.trim().trim_end_matches('%')), min, max)?;
            if let Some(slot) = filter.amount_mut(name) {
                *slot = Some(amount);
            }
        }
    }
    if let Some(text) = object.text("hue-rotate") {
        filter.hue_rotate = Some(angle(tag, &Value::from(text))?);
    }
    if let Some(node) = object.node("drop-shadow") {
        filter.drop_shadow = match &node.value {
            DataValue::Object(shadow) => vec![shadow_from_object(tag, shadow)?],
            DataValue::Array(items) => items
                .iter()
                .filter_map(DataValue::as_object)
                .map(|shadow| shadow_from_object(tag, shadow))
                .collect::<Result<Vec<_>, _>>()?,
            DataValue::Text(text) => return Err(PropertyError::parse(tag, text.clone())),
        };
    }
    Ok(filter)
}

fn filter(tag: &str, value: Value) -> Result<Option<Value>, PropertyError> {
    let filter = match value {
        Value::Filter(filter) => *filter,
        Value::Object(object) => filter_from_object(tag, &object)?,
        Value::Text(text) => {
            let object =
                DataObject::parse(&text).map_err(|_| PropertyError::parse(tag, text.clone()))?;
            filter_from_object(tag, &object)?
        }
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    Ok((!filter.is_empty()).then(|| Value::from(filter)))
}

fn shape_from_object(tag: &str, object: &DataObject) -> Result<ClipShape, PropertyError> {
    let size_of = |name: &str| {
        object
            .text(name)
            .map_or(Ok(None), |text| size(tag, Value::from(text)))
            .map(Option::unwrap_or_default)
    };
    match object.tag().to_ascii_lowercase().as_str() {
        "inset" => Ok(ClipShape::Inset {
            top: size_of("top")?,
            right: size_of("right")?,
            bottom: size_of("bottom")?,
            left: size_of("left")?,
            radius: size_of("radius")?,
        }),
        "circle" => Ok(ClipShape::circle(size_of("x")?, size_of("y")?, size_of("radius")?)),
        "ellipse" => Ok(ClipShape::ellipse(
            size_of("x")?,
            size_of("y")?,
            size_of("radius-x")?,
            size_of("radius-y")?,
        )),
        "polygon" => {
            let coordinates: Vec<&str> = match object.node("points").map(|node| &node.value) {
                Some(DataValue::Text(text)) => text.split(',').collect(),
                Some(DataValue::Array(items)) => items.iter().filter_map(DataValue::as_text).collect(),
                _ => Vec::new(),
            };
            if coordinates.len() < 6 || coordinates.len() % 2 != 0 {
                return Err(PropertyError::parse(tag, object.to_string()));
            }
            let points = coordinates
                .chunks(2)
                .map(|pair| {
                    let coordinate =
                        |text: &str| size(tag, Value::from(text)).map(Option::unwrap_or_default);
                    Ok((coordinate(pair[0])?, coordinate(pair[1])?))
                })
                .collect::<Result<Vec<_>, PropertyError>>()?;
            Ok(ClipShape::Polygon(points))
        }
        _ => Err(PropertyError::parse(tag, object.to_string())),
    }
}

fn clip_shape(tag: &str, value: Value) -> Result<Option<Value>, PropertyError> {
    match value {
        Value::ClipShape(_) => Ok(Some(value)),
        Value::Object(object) => shape_from_object(tag, &object).map(|shape| Some(Value::ClipShape(shape))),
        Value::Text(text) => match DataObject::parse(&text) {
            Ok(object) => shape_from_object(tag, &object).map(|shape| Some(Value::ClipShape(shape))),
            Err(_) => Ok(Some(Value::Text(text))),
        },
        other => Err(PropertyError::incompatible(tag, other.kind())),
    }
}

/// Converts a data-text node value into a property value.
#[must_use]
pub fn from_data(value: &DataValue) -> Value {
    match value {
        DataValue::Text(text) => Value::Text(text.clone()),
        DataValue::Object(object) => Value::Object(object.clone()),
        DataValue::Array(items) => Value::List(items.iter().map(from_data).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::tables;

    #[test]
    fn constants() {
        assert_eq!(constant_name("@gap"), Some("gap"));
        assert_eq!(constant_name("@`x`"), Some("x"));
        assert_eq!(constant_name("@a,b"), None);
        assert_eq!(constant_name("gap"), None);
        assert_eq!(
            coerce("width", PropertyKind::Size, "@gap".into()).unwrap(),
            Some(Value::Constant("gap".into()))
        );
    }

    #[test]
    fn sizes_and_auto() {
        assert_eq!(
            coerce("width", PropertyKind::Size, 10.into()).unwrap(),
            Some(Value::Size(Size::px(10.0)))
        );
        assert_eq!(coerce("width", PropertyKind::Size, "auto".into()).unwrap(), None);
        assert_eq!(coerce("width", PropertyKind::Size, "".into()).unwrap(), None);
        assert!(matches!(
            coerce("width", PropertyKind::Size, "ten".into()),
            Err(PropertyError::Parse { .. })
        ));
        assert!(matches!(
            coerce("width", PropertyKind::Size, true.into()),
            Err(PropertyError::Incompatible { kind: "bool", .. })
        ));
    }

    #[test]
    fn colors_bools_and_floats() {
        assert_eq!(coerce("text-color", PropertyKind::Color, 0.into()).unwrap(), None);
        assert_eq!(
            coerce("text-color", PropertyKind::Color, "#FF0000".into()).unwrap(),
            Some(Value::Color(Color::RED))
        );
        for text in ["yes", "On", "1", "true"] {
            assert_eq!(bool_value("disabled", &text.into()), Ok(true));
        }
        assert_eq!(bool_value("disabled", &0.into()), Ok(false));
        assert!(bool_value("disabled", &2.into()).is_err());

        let opacity = tables::kind("opacity").unwrap();
        assert_eq!(coerce("opacity", opacity, "0.5".into()).unwrap(), Some(Value::Float(0.5)));
        assert!(matches!(
            coerce("opacity", opacity, 2.into()),
            Err(PropertyError::OutOfRange { .. })
        ));
    }

    #[test]
    fn enums_and_ranges() {
        let kind = tables::kind("animation-direction").unwrap();
        assert_eq!(coerce("animation-direction", kind, "alternate".into()).unwrap(), Some(Value::Int(2)));
        assert_eq!(coerce("animation-direction", kind, 3.into()).unwrap(), Some(Value::Int(3)));
        assert!(matches!(
            coerce("animation-direction", kind, "nonsense".into()),
            Err(PropertyError::NotInEnum { .. })
        ));
        assert!(coerce("animation-direction", kind, 9.into()).is_err());
        assert_eq!(
            coerce("row", PropertyKind::Range, "1:3".into()).unwrap(),
            Some(Value::Range(Range::new(1, 3)))
        );
    }

    #[test]
    fn objects() {
        let object = DataObject::parse("shadow{x-offset = 1px, y-offset = 2px, blur = 3px, color = red}")
            .unwrap();
        let Some(Value::Shadows(shadows)) =
            coerce("shadow", PropertyKind::Shadows, Value::Object(object)).unwrap()
        else {
            panic!("expected shadows");
        };
        assert_eq!(shadows[0].box_css(), "1px 2px 3px 0 rgb(255,0,0)");

        let side = border_side("border", "solid 1px blue".into()).unwrap();
        assert_eq!(side.css(), "1px solid rgb(0,0,255)");
    }

    #[test]
    fn filters_from_resource_text() {
        let text = "filter{blur = 3, sepia = 20%, hue-rotate = 45deg, drop-shadow = _{x-offset = 1px, y-offset = 1px, color = red}}";
        let Some(Value::Filter(filter)) = coerce("filter", PropertyKind::Filter, text.into()).unwrap() else {
            panic!("expected a filter");
        };
        assert_eq!(
            filter.css(),
            "blur(3px) sepia(20%) hue-rotate(45deg) drop-shadow(1px 1px 0 rgb(255,0,0))"
        );
        assert!(matches!(
            coerce("filter", PropertyKind::Filter, "filter{opacity = 150}".into()),
            Err(PropertyError::OutOfRange { .. })
        ));
        assert_eq!(coerce("filter", PropertyKind::Filter, "filter{}".into()).unwrap(), None);
    }

    #[test]
    fn clip_shapes() {
        let Some(Value::ClipShape(shape)) =
            coerce("clip", PropertyKind::ClipShape, "ellipse{x = 10px, radius-x = 4px, radius-y = 6px}".into())
                .unwrap()
        else {
            panic!("expected a shape");
        };
        assert_eq!(shape.css(), "ellipse(4px 6px at 10px 50%)");

        let polygon = coerce("clip", PropertyKind::ClipShape, "polygon{points = \"0,0,100%,0,50%,100%\"}".into())
            .unwrap()
            .unwrap();
        assert_eq!(polygon.to_string(), "polygon(0 0, 100% 0, 50% 100%)");
        assert!(coerce("clip", PropertyKind::ClipShape, "polygon{points = \"0,0\"}".into()).is_err());
        assert!(coerce("clip", PropertyKind::ClipShape, "star{}".into()).is_err());

        // raw CSS is not a data object and stays text
        assert_eq!(
            coerce("clip", PropertyKind::ClipShape, "circle(50%)".into()).unwrap(),
            Some(Value::Text("circle(50%)".into()))
        );
    }
}
