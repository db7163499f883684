//! Shorthand families: tags that cover several leaf values.
//!
//! Every family tag covers a set of leaves, kept as a bit mask. The value of a
//! leaf is taken from the most recently written entry covering it, so a side
//! written after its shorthand overrides only that side, and removing the side
//! exposes the shorthand again.

use super::coerce::{self, side_from_object};
use super::tables;
use crate::data::DataObject;
use crate::error::PropertyError;
use crate::value::{Border, BorderSide, Bounds, Corner, LineStyle, Radius, Size, Value};

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];
const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-right", "bottom-left"];
const FIELDS: [&str; 3] = ["style", "width", "color"];
const AXES: [&str; 2] = ["x", "y"];

/// A shorthand family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Margin,
    Padding,
    CellPadding,
    Border,
    Outline,
    Radius,
}

/// The part of a family a tag addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// The whole family.
    All,
    /// One side or corner.
    Side(usize),
    /// One field (border style, radius axis, ...) of every side.
    Field(usize),
    /// One field of one side.
    Leaf(usize, usize),
}

/// A tag that belongs to a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyTag {
    pub family: Family,
    pub shape: Shape,
}

impl Family {
    const fn fields(self) -> usize {
        match self {
            Self::Margin | Self::Padding | Self::CellPadding => 1,
            Self::Border => 3,
            Self::Outline => 0,
            Self::Radius => 2,
        }
    }

    const fn leaf_count(self) -> usize {
        match self {
            Self::Margin | Self::Padding | Self::CellPadding => 4,
            Self::Border => 12,
            Self::Outline => 3,
            Self::Radius => 8,
        }
    }
}

impl FamilyTag {
    /// Bit mask of the covered leaves.
    pub fn leaves(self) -> u16 {
        let all = (1u16 << self.family.leaf_count()) - 1;
        let fields = self.family.fields();
        match (self.family, self.shape) {
            (_, Shape::All) => all,
            (Family::Outline, Shape::Field(field)) => 1 << field,
            (Family::Outline, _) => 0,
            (Family::Margin | Family::Padding | Family::CellPadding, Shape::Side(side)) => {
                1 << side
            }
            (_, Shape::Side(side)) => ((1 << fields) - 1) << (side * fields),
            (_, Shape::Field(field)) => (0..4).fold(0, |mask, side| mask | 1 << (side * fields + field)),
            (_, Shape::Leaf(side, field)) => 1 << (side * fields + field),
        }
    }

    /// The kind a single covered leaf is coerced to.
    fn leaf_kind(self, bit: usize) -> LeafKind {
        match self.family {
            Family::Margin | Family::Padding | Family::CellPadding | Family::Radius => {
                LeafKind::Size
            }
            Family::Border => LeafKind::from_field(bit % 3),
            Family::Outline => LeafKind::from_field(bit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeafKind {
    Style,
    Size,
    Color,
}

impl LeafKind {
    const fn from_field(field: usize) -> Self {
        match field {
            0 => Self::Style,
            1 => Self::Size,
            _ => Self::Color,
        }
    }
}

/// Maps the alternative spellings to canonical tags: `top-margin` is `margin-top`.
pub fn alias(tag: &str) -> Option<String> {
    for (index, side) in SIDES.iter().enumerate() {
        let Some(rest) = tag.strip_prefix(side).and_then(|rest| rest.strip_prefix('-')) else {
            continue;
        };
        if matches!(rest, "margin" | "padding" | "cell-padding") {
            return Some(format!("{rest}-{}", SIDES[index]));
        }
    }
    None
}

fn position(names: &[&str], text: &str) -> Option<usize> {
    names.iter().position(|name| *name == text)
}

/// Identifies a family tag.
pub fn lookup(tag: &str) -> Option<FamilyTag> {
    let found = |family, shape| Some(FamilyTag { family, shape });

    for (family, prefix) in [
        (Family::Margin, "margin"),
        (Family::Padding, "padding"),
        (Family::CellPadding, "cell-padding"),
    ] {
        if tag == prefix {
            return found(family, Shape::All);
        }
        if let Some(side) = tag
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| position(&SIDES, rest))
        {
            return found(family, Shape::Side(side));
        }
    }

    if tag == "border" {
        return found(Family::Border, Shape::All);
    }
    if let Some(rest) = tag.strip_prefix("border-") {
        if let Some(side) = position(&SIDES, rest) {
            return found(Family::Border, Shape::Side(side));
        }
        if let Some(field) = position(&FIELDS, rest) {
            return found(Family::Border, Shape::Field(field));
        }
        if let Some((side, field)) = rest.split_once('-') {
            if let (Some(side), Some(field)) = (position(&SIDES, side), position(&FIELDS, field)) {
                return found(Family::Border, Shape::Leaf(side, field));
            }
        }
    }

    if tag == "outline" {
        return found(Family::Outline, Shape::All);
    }
    if let Some(field) = tag
        .strip_prefix("outline-")
        .and_then(|rest| position(&FIELDS, rest))
    {
        return found(Family::Outline, Shape::Field(field));
    }

    if tag == "radius" {
        return found(Family::Radius, Shape::All);
    }
    if let Some(rest) = tag.strip_prefix("radius-") {
        if let Some(axis) = position(&AXES, rest) {
            return found(Family::Radius, Shape::Field(axis));
        }
        if let Some(corner) = position(&CORNERS, rest) {
            return found(Family::Radius, Shape::Side(corner));
        }
        if let Some((corner, axis)) = rest.rsplit_once('-') {
            if let (Some(corner), Some(axis)) = (position(&CORNERS, corner), position(&AXES, axis)) {
                return found(Family::Radius, Shape::Leaf(corner, axis));
            }
        }
    }
    None
}

fn line_style(tag: &str, value: &Value) -> Result<i64, PropertyError> {
    let spec = tables::enum_spec("border-style").ok_or_else(|| PropertyError::UnknownTag(tag.to_string()))?;
    coerce::enum_index(tag, value, spec)
}

fn leaf(tag: &str, kind: LeafKind, value: Value) -> Result<Option<Value>, PropertyError> {
    match kind {
        LeafKind::Style => line_style(tag, &value).map(|index| Some(Value::Int(index))),
        LeafKind::Size => coerce::size(tag, value).map(|size| size.map(Value::Size)),
        LeafKind::Color => coerce::color(tag, &value).map(|color| color.map(Value::Color)),
    }
}

fn bounds_from_object(tag: &str, object: &DataObject) -> Result<Bounds, PropertyError> {
    let side = |name: &str| {
        object
            .text(name)
            .map_or(Ok(None), |text| coerce::size(tag, Value::from(text)))
            .map(Option::unwrap_or_default)
    };
    Ok(Bounds {
        top: side("top")?,
        right: side("right")?,
        bottom: side("bottom")?,
        left: side("left")?,
    })
}

fn border_from_object(tag: &str, object: &DataObject) -> Result<Border, PropertyError> {
    let common = side_from_object(tag, object, "")?;
    let mut sides = [common.clone(), common.clone(), common.clone(), common];
    for (side, name) in sides.iter_mut().zip(SIDES) {
        let own = side_from_object(tag, object, &format!("{name}-"))?;
        if own.style.is_some() {
            side.style = own.style;
        }
        if own.width.is_some() {
            side.width = own.width;
        }
        if own.color.is_some() {
            side.color = own.color;
        }
    }
    let [top, right, bottom, left] = sides;
    Ok(Border {
        top,
        right,
        bottom,
        left,
    })
}

fn radius_from_object(tag: &str, object: &DataObject) -> Result<Radius, PropertyError> {
    let size_of = |name: &str| {
        object
            .text(name)
            .map_or(Ok(None), |text| coerce::size(tag, Value::from(text)))
    };
    let mut radius = Radius::default();
    let all_x = size_of("x")?;
    let all_y = size_of("y")?;
    let corners = [
        &mut radius.top_left,
        &mut radius.top_right,
        &mut radius.bottom_right,
        &mut radius.bottom_left,
    ];
    for (corner, name) in corners.into_iter().zip(CORNERS) {
        let both = size_of(name)?;
        corner.x = size_of(&format!("{name}-x"))?
            .or_else(|| both.clone())
            .or_else(|| all_x.clone())
            .unwrap_or_default();
        corner.y = size_of(&format!("{name}-y"))?
            .or(both)
            .or_else(|| all_y.clone())
            .unwrap_or_default();
    }
    Ok(radius)
}

/// Coerces a value written to a family tag.
pub fn coerce_value(
    target: FamilyTag,
    tag: &str,
    value: Value,
) -> Result<Option<Value>, PropertyError> {
    let incompatible = |value: &Value| PropertyError::incompatible(tag, value.kind());
    match (target.family, target.shape) {
        (Family::Margin | Family::Padding | Family::CellPadding, Shape::All) => match value {
            Value::Bounds(_) => Ok(Some(value)),
            Value::Text(text) if text.contains(',') => text
                .parse::<Bounds>()
                .map(|bounds| Some(Value::Bounds(bounds)))
                .map_err(|_| PropertyError::parse(tag, text)),
            Value::Object(object) => bounds_from_object(tag, &object).map(|b| Some(Value::Bounds(b))),
            other => coerce::size(tag, other).map(|size| size.map(|size| Value::Bounds(Bounds::all(size)))),
        },
        (Family::Border, Shape::All) => match value {
            Value::Border(_) => Ok(Some(value)),
            Value::Object(object) => border_from_object(tag, &object).map(|b| Some(Value::Border(b))),
            other => coerce::border_side(tag, other).map(|side| Some(Value::BorderSide(side))),
        },
        (Family::Border, Shape::Side(_)) | (Family::Outline, Shape::All) => {
            coerce::border_side(tag, value).map(|side| Some(Value::BorderSide(side)))
        }
        (Family::Radius, Shape::All) => match value {
            Value::Radius(_) => Ok(Some(value)),
            Value::Corner(corner) => Ok(Some(Value::Radius(Radius {
                top_left: corner.clone(),
                top_right: corner.clone(),
                bottom_right: corner.clone(),
                bottom_left: corner,
            }))),
            Value::Object(object) => radius_from_object(tag, &object).map(|r| Some(Value::Radius(r))),
            other => coerce::size(tag, other).map(|size| size.map(Value::Size)),
        },
        (Family::Radius, Shape::Side(_)) => match value {
            Value::Corner(_) => Ok(Some(value)),
            Value::Text(text) if text.contains('/') => {
                let (x, y) = text.split_once('/').unwrap_or_default();
                let x = coerce::size(tag, Value::from(x))?.unwrap_or_default();
                let y = coerce::size(tag, Value::from(y))?.unwrap_or_default();
                Ok(Some(Value::Corner(Corner { x, y })))
            }
            other => coerce::size(tag, other).map(|size| size.map(Value::Size)),
        },
        (_, Shape::Field(_) | Shape::Leaf(..) | Shape::Side(_)) => {
            let bit = target.leaves().trailing_zeros() as usize;
            match value {
                value @ (Value::Text(_)
                | Value::Int(_)
                | Value::Float(_)
                | Value::Size(_)
                | Value::Color(_)) => leaf(tag, target.leaf_kind(bit), value),
                other => Err(incompatible(&other)),
            }
        }
    }
}

fn side_field(side: &BorderSide, field: usize) -> Option<Value> {
    match field {
        0 => side.style.map(|style| Value::Int(style as i64)),
        1 => side.width.clone().filter(|width| !width.is_auto()).map(Value::Size),
        _ => side.color.filter(|color| !color.is_zero()).map(Value::Color),
    }
}

fn present(size: &Size) -> Option<Value> {
    (!size.is_auto()).then(|| Value::Size(size.clone()))
}

/// The value a stored entry contributes to one leaf.
pub fn leaf_value(target: FamilyTag, value: &Value, bit: usize) -> Option<Value> {
    match (target.family, value) {
        (Family::Margin | Family::Padding | Family::CellPadding, Value::Bounds(bounds)) => {
            present(bounds.sides()[bit])
        }
        (Family::Border, Value::Border(border)) => side_field(border.sides()[bit / 3], bit % 3),
        (Family::Border, Value::BorderSide(side)) => side_field(side, bit % 3),
        (Family::Outline, Value::BorderSide(side)) => side_field(side, bit),
        (Family::Radius, Value::Radius(radius)) => {
            let corner = radius.corners()[bit / 2];
            present(if bit % 2 == 0 { &corner.x } else { &corner.y })
        }
        (Family::Radius, Value::Corner(corner)) => {
            present(if bit % 2 == 0 { &corner.x } else { &corner.y })
        }
        (_, Value::Size(size)) => present(size),
        (_, Value::Int(_) | Value::Color(_)) => Some(value.clone()),
        _ => None,
    }
}

fn side_from_leaves(leaves: &[Option<Value>], offset: usize) -> BorderSide {
    BorderSide {
        style: leaves[offset]
            .as_ref()
            .and_then(Value::as_int)
            .and_then(LineStyle::from_index),
        width: leaves[offset + 1].as_ref().and_then(Value::as_size).cloned(),
        color: leaves[offset + 2].as_ref().and_then(Value::as_color),
    }
}

fn size_leaf(leaves: &[Option<Value>], bit: usize) -> Size {
    leaves[bit]
        .as_ref()
        .and_then(Value::as_size)
        .cloned()
        .unwrap_or_default()
}

/// Builds the value of `target` from its leaves; `leaves` is indexed by leaf bit.
pub fn compose(target: FamilyTag, leaves: &[Option<Value>]) -> Option<Value> {
    let mask = target.leaves();
    let covered: Vec<usize> = (0..target.family.leaf_count())
        .filter(|bit| mask & (1 << bit) != 0)
        .collect();
    if covered.iter().all(|bit| leaves[*bit].is_none()) {
        return None;
    }
    let corner = |index: usize| Corner {
        x: size_leaf(leaves, index * 2),
        y: size_leaf(leaves, index * 2 + 1),
    };
    let uniform = || {
        let first = leaves[covered[0]].clone();
        covered
            .iter()
            .all(|bit| leaves[*bit] == first)
            .then_some(first)
            .flatten()
    };

    match (target.family, target.shape) {
        (Family::Margin | Family::Padding | Family::CellPadding, Shape::All) => {
            Some(Value::Bounds(Bounds {
                top: size_leaf(leaves, 0),
                right: size_leaf(leaves, 1),
                bottom: size_leaf(leaves, 2),
                left: size_leaf(leaves, 3),
            }))
        }
        (Family::Border, Shape::All) => Some(Value::Border(Border {
            top: side_from_leaves(leaves, 0),
            right: side_from_leaves(leaves, 3),
            bottom: side_from_leaves(leaves, 6),
            left: side_from_leaves(leaves, 9),
        })),
        (Family::Border, Shape::Side(side)) => {
            Some(Value::BorderSide(side_from_leaves(leaves, side * 3)))
        }
        (Family::Outline, Shape::All) => Some(Value::BorderSide(side_from_leaves(leaves, 0))),
        (Family::Radius, Shape::All) => Some(Value::Radius(Radius {
            top_left: corner(0),
            top_right: corner(1),
            bottom_right: corner(2),
            bottom_left: corner(3),
        })),
        (Family::Radius, Shape::Side(index)) => Some(Value::Corner(corner(index))),
        _ => uniform(),
    }
}

/// CSS declarations of a whole family, empty values meaning "remove".
pub fn css(family: Family, value: Option<&Value>) -> Vec<(&'static str, String)> {
    match family {
        Family::Margin | Family::Padding => {
            let name = if family == Family::Margin { "margin" } else { "padding" };
            let text = match value {
                Some(Value::Bounds(bounds)) => bounds.css(),
                _ => String::new(),
            };
            vec![(name, text)]
        }
        Family::CellPadding => Vec::new(),
        Family::Border => match value {
            Some(Value::Border(border)) => border.css_declarations().to_vec(),
            _ => vec![
                ("border-style", String::new()),
                ("border-width", String::new()),
                ("border-color", String::new()),
            ],
        },
        Family::Outline => {
            let text = match value {
                Some(Value::BorderSide(side)) => side.css(),
                _ => String::new(),
            };
            vec![("outline", text)]
        }
        Family::Radius => {
            let text = match value {
                Some(Value::Radius(radius)) => radius.css(),
                _ => String::new(),
            };
            vec![("border-radius", text)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_masks() {
        let mask = |tag| lookup(tag).map(FamilyTag::leaves);
        assert_eq!(mask("padding"), Some(0b1111));
        assert_eq!(mask("padding-left"), Some(0b1000));
        assert_eq!(mask("border"), Some(0xFFF));
        assert_eq!(mask("border-top"), Some(0b111));
        assert_eq!(mask("border-style"), Some(0b001_001_001_001));
        assert_eq!(mask("border-left-color"), Some(1 << 11));
        assert_eq!(mask("outline-width"), Some(0b010));
        assert_eq!(mask("radius-x"), Some(0b0101_0101));
        assert_eq!(mask("radius-bottom-left"), Some(0b1100_0000));
        assert_eq!(mask("radius-top-right-y"), Some(0b1000));
        assert_eq!(mask("outline-offset"), None);
        assert_eq!(mask("width"), None);
        assert_eq!(alias("top-margin").as_deref(), Some("margin-top"));
        assert_eq!(alias("left-cell-padding").as_deref(), Some("cell-padding-left"));
    }

    #[test]
    fn coerce_shorthands() {
        let padding = lookup("padding").unwrap();
        assert_eq!(
            coerce_value(padding, "padding", "4px".into()).unwrap(),
            Some(Value::Bounds(Bounds::all(Size::px(4.0))))
        );
        let style = lookup("border-left-style").unwrap();
        assert_eq!(
            coerce_value(style, "border-left-style", "dashed".into()).unwrap(),
            Some(Value::Int(2))
        );
        let color = lookup("outline-color").unwrap();
        assert!(coerce_value(color, "outline-color", "nope".into()).is_err());
    }
}
