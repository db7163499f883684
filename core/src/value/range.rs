use core::fmt::{self, Display};
use core::str::FromStr;

use crate::error::ValueParseError;

/// An inclusive integer range, used for grid placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// First index.
    pub first: i64,
    /// Last index, included.
    pub last: i64,
}

impl Range {
    /// Builds a range.
    #[must_use]
    pub const fn new(first: i64, last: i64) -> Self {
        Self { first, last }
    }

    /// A range of one index.
    #[must_use]
    pub const fn single(index: i64) -> Self {
        Self::new(index, index)
    }

    /// CSS grid line form: `first+1 / last+2`.
    #[must_use]
    pub fn grid_css(&self) -> String {
        format!("{} / {}", self.first + 1, self.last + 2)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}:{}", self.first, self.last)
        }
    }
}

impl FromStr for Range {
    type Err = ValueParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueParseError::new("range", text);
        let parse = |part: &str| part.trim().parse::<i64>().map_err(|_| invalid());
        match text.split_once(':') {
            Some((first, last)) if !last.contains(':') => Ok(Self::new(parse(first)?, parse(last)?)),
            Some(_) => Err(invalid()),
            None => parse(text).map(Self::single),
        }
    }
}

impl From<i64> for Range {
    fn from(value: i64) -> Self {
        Self::single(value)
    }
}

/// Row and column of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellIndex {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

impl CellIndex {
    /// Builds a cell index.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

impl FromStr for CellIndex {
    type Err = ValueParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueParseError::new("cell", text);
        let (row, column) = text.split_once(',').ok_or_else(invalid)?;
        Ok(Self::new(
            row.trim().parse().map_err(|_| invalid())?,
            column.trim().parse().map_err(|_| invalid())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_text() {
        assert_eq!("2:4".parse::<Range>().unwrap(), Range::new(2, 4));
        assert_eq!(" 3 ".parse::<Range>().unwrap(), Range::single(3));
        assert!("1:2:3".parse::<Range>().is_err());
        assert_eq!(Range::new(1, 1).to_string(), "1");
        assert_eq!(Range::new(0, 2).grid_css(), "1 / 4");
    }

    #[test]
    fn cell_text() {
        assert_eq!("1, 2".parse::<CellIndex>().unwrap(), CellIndex::new(1, 2));
        assert!("1".parse::<CellIndex>().is_err());
    }
}
