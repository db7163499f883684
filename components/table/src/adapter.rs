//! Table content: the adapter interface and the two ready-made adapters.

use rui_core::properties::coerce;
use rui_core::{Color, DataObject, Params, Value, View};

/// Content of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCell {
    /// Nothing is drawn.
    Empty,
    /// Plain text, escaped on output.
    Text(String),
    /// An integer.
    Int(i64),
    /// A number written in its shortest form.
    Float(f64),
    /// A check mark.
    Bool(bool),
    /// A color swatch followed by its text form.
    Color(Color),
    /// A view rendered inside the cell.
    View(View),
    /// Merges the cell into the one on its left.
    HorizontalJoin,
    /// Merges the cell into the one above.
    VerticalJoin,
}

impl From<&str> for TableCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TableCell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for TableCell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for TableCell {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for TableCell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for TableCell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Color> for TableCell {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<View> for TableCell {
    fn from(value: View) -> Self {
        Self::View(value)
    }
}

/// Supplies the rows and columns of a [`TableView`](crate::TableView).
///
/// The style and selection hooks are optional. The `row-style`,
/// `column-style`, `cell-style` and `allow-selection` properties of the table
/// take precedence over the adapter's own answers.
pub trait TableAdapter {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Content of one cell.
    fn cell(&self, row: usize, column: usize) -> TableCell;

    /// Style of a row.
    fn row_style(&self, _row: usize) -> Option<Params> {
        None
    }

    /// Style of a column, written to the `<colgroup>`.
    fn column_style(&self, _column: usize) -> Option<Params> {
        None
    }

    /// Style of a cell; `row-span` and `column-span` merge cells.
    fn cell_style(&self, _row: usize, _column: usize) -> Option<Params> {
        None
    }

    /// Whether a cell may become current in cell selection mode.
    fn allow_cell_selection(&self, _row: usize, _column: usize) -> bool {
        true
    }

    /// Whether a row may become current in row selection mode.
    fn allow_row_selection(&self, _row: usize) -> bool {
        true
    }
}

/// Row, column and cell styles given separately from the content.
pub trait TableStyle {
    /// Style of a row.
    fn row_style(&self, _row: usize) -> Option<Params> {
        None
    }

    /// Style of a column.
    fn column_style(&self, _column: usize) -> Option<Params> {
        None
    }

    /// Style of a cell.
    fn cell_style(&self, _row: usize, _column: usize) -> Option<Params> {
        None
    }
}

/// Selection permissions given separately from the content.
pub trait TableSelection {
    /// Whether a cell may become current.
    fn allow_cell(&self, _row: usize, _column: usize) -> bool {
        true
    }

    /// Whether a row may become current.
    fn allow_row(&self, _row: usize) -> bool {
        true
    }
}

/// One style per line, e.g. `row-style = [_{ background-color = #FFEEEEEE }, _{}]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStyles(Vec<Params>);

impl LineStyles {
    /// Styles of the lines in order.
    #[must_use]
    pub fn new(styles: Vec<Params>) -> Self {
        Self(styles)
    }

    /// Reads a list of resource objects; entries that are not objects stay unstyled.
    #[must_use]
    pub fn from_values(values: &[Value]) -> Self {
        Self(
            values
                .iter()
                .map(|value| match value {
                    Value::Object(object) => object_params(object),
                    _ => Params::new(),
                })
                .collect(),
        )
    }

    fn line(&self, index: usize) -> Option<Params> {
        self.0.get(index).filter(|params| !params.is_empty()).cloned()
    }
}

impl TableStyle for LineStyles {
    fn row_style(&self, row: usize) -> Option<Params> {
        self.line(row)
    }

    fn column_style(&self, column: usize) -> Option<Params> {
        self.line(column)
    }
}

fn object_params(object: &DataObject) -> Params {
    let mut params = Params::new();
    for node in object.nodes() {
        params.push(&node.tag, coerce::from_data(&node.value));
    }
    params
}

fn widest<T>(rows: &[Vec<T>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

/// Content given as rows of cells; joins become `row-span` and `column-span`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleTableAdapter {
    rows: Vec<Vec<TableCell>>,
    columns: usize,
}

impl SimpleTableAdapter {
    /// An adapter over `rows`; the widest row gives the column count.
    #[must_use]
    pub fn new(rows: Vec<Vec<TableCell>>) -> Self {
        let columns = widest(&rows);
        Self { rows, columns }
    }

    fn is(&self, row: usize, column: usize, join: &TableCell) -> bool {
        self.rows.get(row).and_then(|cells| cells.get(column)) == Some(join)
    }
}

impl TableAdapter for SimpleTableAdapter {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell(&self, row: usize, column: usize) -> TableCell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .cloned()
            .unwrap_or(TableCell::Empty)
    }

    fn cell_style(&self, row: usize, column: usize) -> Option<Params> {
        let column_span = (column + 1..self.columns)
            .take_while(|&next| self.is(row, next, &TableCell::HorizontalJoin))
            .count();
        let row_span = (row + 1..self.rows.len())
            .take_while(|&next| self.is(next, column, &TableCell::VerticalJoin))
            .count();
        if row_span == 0 && column_span == 0 {
            return None;
        }
        let mut params = Params::new();
        if row_span > 0 {
            params.push("row-span", row_span + 1);
        }
        if column_span > 0 {
            params.push("column-span", column_span + 1);
        }
        Some(params)
    }
}

/// Content given as rows of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTableAdapter {
    rows: Vec<Vec<String>>,
    columns: usize,
}

impl TextTableAdapter {
    /// An adapter over `rows`; the widest row gives the column count.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let columns = widest(&rows);
        Self { rows, columns }
    }

    /// Reads a resource list of rows, each a list of texts.
    #[must_use]
    pub fn from_values(rows: &[Value]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| match row {
                    Value::Texts(texts) => texts.clone(),
                    Value::List(items) => items.iter().map(ToString::to_string).collect(),
                    other => vec![other.to_string()],
                })
                .collect(),
        )
    }
}

impl TableAdapter for TextTableAdapter {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell(&self, row: usize, column: usize) -> TableCell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or(TableCell::Empty, |text| TableCell::Text(text.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_become_spans() {
        let adapter = SimpleTableAdapter::new(vec![
            vec!["a".into(), TableCell::HorizontalJoin, "b".into()],
            vec![TableCell::VerticalJoin, "c".into(), "d".into()],
            vec!["e".into()],
        ]);
        assert_eq!(adapter.column_count(), 3);
        assert_eq!(
            adapter.cell_style(0, 0),
            Some(Params::new().with("row-span", 2).with("column-span", 2))
        );
        assert_eq!(adapter.cell_style(0, 2), None);
        assert_eq!(adapter.cell(2, 2), TableCell::Empty);
    }

    #[test]
    fn text_rows_from_resources() {
        let adapter = TextTableAdapter::from_values(&[
            Value::from(["name", "age"]),
            Value::List(vec![Value::from("Ann"), Value::from(41)]),
        ]);
        assert_eq!(adapter.row_count(), 2);
        assert_eq!(adapter.cell(1, 1), TableCell::Text("41".into()));
    }
}
