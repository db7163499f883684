use core::any::Any;
use core::cell::RefCell;
use core::fmt::Write;
use std::rc::Rc;

use rui_core::bridge::JsArg;
use rui_core::properties::Properties;
use rui_core::value::{CellIndex, Handle, format_number};
use rui_core::view::escape_html;
use rui_core::{
    CssBuilder, DataObject, Params, PropertyError, PropertyKind, Session, Value, View, Widget, js_args,
};

use crate::adapter::{LineStyles, SimpleTableAdapter, TableAdapter, TableCell, TableSelection, TableStyle, TextTableAdapter};

const NONE: i64 = 0;
const CELL: i64 = 1;
const ROW: i64 = 2;

const FOCUSED: &str = "ruiCurrentTableCellFocused";
const BLURRED: &str = "ruiCurrentTableCell";

type Adapter = Rc<dyn TableAdapter>;
type Style = Rc<dyn TableStyle>;
type Selection = Rc<dyn TableSelection>;

/// Wraps an adapter for the `content` property.
pub fn content(adapter: impl TableAdapter + 'static) -> Value {
    Value::Handle(Handle::new(Rc::new(adapter) as Adapter))
}

/// Wraps row, column or cell styles for `row-style`, `column-style` or `cell-style`.
pub fn style(style: impl TableStyle + 'static) -> Value {
    Value::Handle(Handle::new(Rc::new(style) as Style))
}

/// Wraps selection permissions for `allow-selection`.
pub fn selection(selection: impl TableSelection + 'static) -> Value {
    Value::Handle(Handle::new(Rc::new(selection) as Selection))
}

impl From<SimpleTableAdapter> for Value {
    fn from(adapter: SimpleTableAdapter) -> Self {
        content(adapter)
    }
}

impl From<TextTableAdapter> for Value {
    fn from(adapter: TextTableAdapter) -> Self {
        content(adapter)
    }
}

impl From<LineStyles> for Value {
    fn from(styles: LineStyles) -> Self {
        style(styles)
    }
}

/// Styles a scratch element so row, column and cell styles go through the
/// regular property engine.
#[derive(Debug)]
struct CellStyle;

impl Widget for CellStyle {
    fn type_name(&self) -> &'static str {
        "TableCell"
    }
}

/// A table drawn from a [`TableAdapter`].
///
/// Rows have the html id `<table id>-<row>` and cells `<table id>-<row>-<column>`.
/// With `selection-mode = cell` the runtime moves the current cell with the
/// keyboard and reports it with `currentCell`; `table-cell-selected` receives
/// the row and the column. Row mode works the same way with `currentRow` and
/// `table-row-selected`.
#[derive(Debug, Default)]
pub struct TableView {
    cell_views: RefCell<Vec<View>>,
}

impl TableView {
    /// Creates a table view.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self::default(), params)
    }

    /// The content adapter.
    #[must_use]
    pub fn adapter(view: &View) -> Option<Rc<dyn TableAdapter>> {
        handle(view, "content")
    }

    /// The selection mode: `0` none, `1` cell, `2` row.
    #[must_use]
    pub fn selection_mode(view: &View) -> i64 {
        view.get_int("selection-mode").unwrap_or(NONE)
    }

    /// The current cell; in row mode only the row is meaningful.
    #[must_use]
    pub fn current(view: &View) -> Option<CellIndex> {
        match view.get("current") {
            Some(Value::Cell(cell)) => Some(cell),
            _ => None,
        }
    }

    /// Rows rendered in `<thead>`.
    #[must_use]
    pub fn head_height(view: &View) -> usize {
        count(view, "head-height")
    }

    /// Rows rendered in `<tfoot>`.
    #[must_use]
    pub fn foot_height(view: &View) -> usize {
        count(view, "foot-height")
    }

    /// Re-renders every row after the adapter's data changed.
    pub fn reload(view: &View) {
        if !view.updates_enabled() {
            return;
        }
        if let Some(adapter) = TableView::adapter(view) {
            let bridge = view.session().bridge();
            bridge.update_property(view.html_id(), "data-rows", &JsArg::from(adapter.row_count()));
            bridge.update_property(view.html_id(), "data-columns", &JsArg::from(adapter.column_count()));
        }
        view.update_inner_html();
    }

    /// Re-renders the content of one cell.
    pub fn reload_cell(view: &View, row: usize, column: usize) {
        let Some(adapter) = TableView::adapter(view) else {
            return;
        };
        if !view.updates_enabled() {
            return;
        }
        let mut buffer = String::new();
        if let Some(table) = view.widget::<Self>() {
            table.write_cell(view, &adapter, row, column, &mut buffer);
        }
        view.session()
            .bridge()
            .update_inner_html(&cell_id(view, row, column), &buffer);
    }

    fn write_cell(&self, view: &View, adapter: &Adapter, row: usize, column: usize, buffer: &mut String) {
        match adapter.cell(row, column) {
            TableCell::Empty | TableCell::HorizontalJoin | TableCell::VerticalJoin => {}
            TableCell::Text(text) => buffer.push_str(&escape_html(&text)),
            TableCell::Int(value) => {
                let _ = write!(buffer, "{value}");
            }
            TableCell::Float(value) => buffer.push_str(&format_number(value)),
            TableCell::Bool(value) => buffer.push_str(if value { "&#x2611;" } else { "&#x2610;" }),
            TableCell::Color(color) => {
                let _ = write!(
                    buffer,
                    "<div style=\"display: inline; height: 1em; background-color: {};\">&nbsp;&nbsp;&nbsp;&nbsp;</div> {color}",
                    color.css()
                );
            }
            TableCell::View(cell) => {
                cell.set_parent(Some(view));
                cell.write_html(buffer);
                self.cell_views.borrow_mut().push(cell);
            }
        }
    }

    fn write_rows(&self, view: &View, adapter: &Adapter, section: Section, buffer: &mut String) {
        let mode = TableView::selection_mode(view);
        let current = TableView::current(view);
        let current_class = if view.has_focus() { current_style(view) } else { blurred_style(view) };
        let row_style = handle::<Style>(view, "row-style");
        let cell_style = handle::<Style>(view, "cell-style");
        let allow = handle::<Selection>(view, "allow-selection");
        let scratch = Scratch::new(view.session());
        let columns = adapter.column_count();
        let mut covered: Vec<(usize, usize)> = Vec::new();

        for row in section.rows.clone() {
            let style = row_style
                .as_ref()
                .and_then(|style| style.row_style(row))
                .or_else(|| adapter.row_style(row));
            let css = style.map(|params| scratch.css(&[], &params)).unwrap_or_default();

            let _ = write!(buffer, "<tr id=\"{}\"", row_id(view, row));
            if mode == ROW {
                if current.is_some_and(|current| current.row == row) {
                    let _ = write!(buffer, " class=\"{current_class}\"");
                }
                buffer.push_str(" onclick=\"tableRowClickEvent(this, event)\"");
                let allowed = allow.as_ref().map_or_else(|| adapter.allow_row_selection(row), |allow| allow.allow_row(row));
                if !allowed {
                    buffer.push_str(" data-disabled=\"1\"");
                }
            }
            if !css.is_empty() {
                let _ = write!(buffer, " style=\"{css}\"");
            }
            buffer.push('>');

            for column in 0..columns {
                if covered.contains(&(row, column)) {
                    continue;
                }
                let mut row_span = 0;
                let mut column_span = 0;
                let mut params = Params::new();
                for (tag, value) in cell_style
                    .as_ref()
                    .and_then(|style| style.cell_style(row, column))
                    .or_else(|| adapter.cell_style(row, column))
                    .unwrap_or_default()
                {
                    match rui_core::properties::normalize(&tag).as_str() {
                        "row-span" => row_span = span(&value),
                        "column-span" => column_span = span(&value),
                        _ => params.push(&tag, value),
                    }
                }
                let css = scratch.css(&section.cell_defaults, &params);

                let _ = write!(
                    buffer,
                    "<{} id=\"{}\" class=\"ruiView",
                    section.cell_tag,
                    cell_id(view, row, column)
                );
                if mode == CELL && current == Some(CellIndex::new(row, column)) {
                    let _ = write!(buffer, " {current_class}");
                }
                buffer.push('"');
                if mode == CELL {
                    buffer.push_str(" onclick=\"tableCellClickEvent(this, event)\"");
                    let allowed = allow.as_ref().map_or_else(
                        || adapter.allow_cell_selection(row, column),
                        |allow| allow.allow_cell(row, column),
                    );
                    if !allowed {
                        buffer.push_str(" data-disabled=\"1\"");
                    }
                }
                if column_span > 1 {
                    let _ = write!(buffer, " colspan=\"{column_span}\"");
                    covered.extend((column + 1..column + column_span).map(|next| (row, next)));
                }
                if row_span > 1 {
                    let _ = write!(buffer, " rowspan=\"{row_span}\"");
                    let width = column_span.max(1);
                    for next in row + 1..row + row_span {
                        covered.extend((column..column + width).map(|c| (next, c)));
                    }
                }
                if !css.is_empty() {
                    let _ = write!(buffer, " style=\"{css}\"");
                }
                buffer.push('>');
                self.write_cell(view, adapter, row, column, buffer);
                let _ = write!(buffer, "</{}>", section.cell_tag);
            }
            buffer.push_str("</tr>");
        }
    }
}

/// Rows of one `<thead>`, `<tbody>` or `<tfoot>` block and their cell defaults.
struct Section {
    rows: core::ops::Range<usize>,
    cell_tag: &'static str,
    cell_defaults: Vec<(&'static str, Value)>,
}

/// A detached view whose inline style renders a parameter list.
struct Scratch(View);

impl Scratch {
    fn new(session: &Session) -> Self {
        Self(View::create(session, CellStyle, Params::new()))
    }

    fn css(&self, defaults: &[(&'static str, Value)], params: &Params) -> String {
        for tag in self.0.tags() {
            self.0.remove(&tag);
        }
        for (tag, value) in defaults {
            self.0.set(tag, value.clone());
        }
        for (tag, value) in params.iter() {
            if !self.0.set(tag, value.clone()) {
                tracing::warn!(tag, "table style property skipped");
            }
        }
        self.0.inline_style()
    }
}

fn handle<T: Clone + 'static>(view: &View, tag: &str) -> Option<T> {
    match view.get_raw(tag) {
        Some(Value::Handle(handle)) => handle.downcast_ref::<T>().cloned(),
        _ => None,
    }
}

fn count(view: &View, tag: &str) -> usize {
    view.get_int(tag)
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(0)
}

fn span(value: &Value) -> usize {
    value
        .as_int()
        .or_else(|| value.as_text().and_then(|text| text.trim().parse().ok()))
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(0)
}

fn row_id(view: &View, row: usize) -> String {
    format!("{}-{row}", view.html_id())
}

fn cell_id(view: &View, row: usize, column: usize) -> String {
    format!("{}-{row}-{column}", view.html_id())
}

fn current_style(view: &View) -> String {
    view.get_text("current-style").unwrap_or_else(|| FOCUSED.to_string())
}

fn blurred_style(view: &View) -> String {
    view.get_text("current-inactive-style")
        .unwrap_or_else(|| BLURRED.to_string())
}

fn data_current(view: &View) -> Option<String> {
    let current = TableView::current(view)?;
    match TableView::selection_mode(view) {
        CELL => Some(cell_id(view, current.row, current.column)),
        ROW => Some(row_id(view, current.row)),
        _ => None,
    }
}

fn gap_css(view: &View) -> [(&'static str, String); 2] {
    match view.get_size("gap") {
        Some(gap) if !gap.is_auto() && gap.value > 0.0 => {
            [("border-spacing", gap.css("0")), ("border-collapse", "separate".into())]
        }
        _ => [("border-spacing", "0".into()), ("border-collapse", "collapse".into())],
    }
}

fn cell(tag: &str, value: Value) -> Result<Option<Value>, PropertyError> {
    match value {
        Value::Cell(_) => Ok(Some(value)),
        Value::Int(row) => usize::try_from(row)
            .map(|row| Some(Value::Cell(CellIndex::new(row, 0))))
            .map_err(|_| PropertyError::parse(tag, row.to_string())),
        Value::Text(text) if text.contains(',') => text
            .parse::<CellIndex>()
            .map(|cell| Some(Value::Cell(cell)))
            .map_err(|_| PropertyError::parse(tag, text)),
        Value::Text(text) => text
            .trim()
            .parse::<usize>()
            .map(|row| Some(Value::Cell(CellIndex::new(row, 0))))
            .map_err(|_| PropertyError::parse(tag, text)),
        Value::Object(object) => Ok(Some(Value::Cell(CellIndex::new(
            index(object.int("row")),
            index(object.int("column")),
        )))),
        other => Err(PropertyError::incompatible(tag, other.kind())),
    }
}

fn index(value: Option<i64>) -> usize {
    value.and_then(|value| usize::try_from(value).ok()).unwrap_or(0)
}

fn coordinate(data: &DataObject, tag: &str) -> Option<usize> {
    data.int(tag).and_then(|value| usize::try_from(value).ok())
}

impl Widget for TableView {
    fn type_name(&self) -> &'static str {
        "TableView"
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        match tag {
            "gap" => Some(PropertyKind::Size),
            "current-style" | "current-inactive-style" | "head-style" | "foot-style" => Some(PropertyKind::Text),
            _ => None,
        }
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        match tag {
            "table-cell-clicked" | "table-cell-selected" => Some(2),
            "table-row-clicked" | "table-row-selected" => Some(1),
            _ => None,
        }
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        let stored = match (tag, value) {
            ("content", Value::Handle(handle)) if handle.downcast_ref::<Adapter>().is_some() => {
                Some(Value::Handle(handle))
            }
            ("content", Value::List(rows)) => Some(content(TextTableAdapter::from_values(&rows))),
            ("row-style" | "column-style" | "cell-style", Value::Handle(handle))
                if handle.downcast_ref::<Style>().is_some() =>
            {
                Some(Value::Handle(handle))
            }
            ("row-style" | "column-style", Value::List(lines)) => Some(style(LineStyles::from_values(&lines))),
            ("allow-selection", Value::Handle(handle)) if handle.downcast_ref::<Selection>().is_some() => {
                Some(Value::Handle(handle))
            }
            ("content" | "row-style" | "column-style" | "cell-style" | "allow-selection", other) => {
                return Err(PropertyError::incompatible(tag, other.kind()));
            }
            ("cell-border", value) => {
                Properties::new().set("border", value.clone())?;
                Some(value)
            }
            ("current", value) => cell(tag, value)?,
            (_, value) => return view.base_set(tag, value),
        };
        Ok(view.store_raw(tag, stored))
    }

    fn changed(&self, view: &View, tag: &str) {
        match tag {
            "content" | "row-style" | "column-style" | "cell-style" | "allow-selection" | "cell-border"
            | "head-height" | "head-style" | "foot-height" | "foot-style" | "table-vertical-align"
            | "table-cell-clicked" | "table-cell-selected" | "table-row-clicked" | "table-row-selected" => {
                TableView::reload(view);
            }
            tag if tag.starts_with("cell-padding") => TableView::reload(view),
            "current" => {
                let Some(current) = TableView::current(view) else {
                    return;
                };
                let id = view.html_id();
                match TableView::selection_mode(view) {
                    CELL => {
                        if view.updates_enabled() {
                            view.session().bridge().call_func(
                                "setTableCellCursorByID",
                                &js_args![id, current.row, current.column],
                            );
                        }
                        view.fire("table-cell-selected", &[&current.row as &dyn Any, &current.column as &dyn Any]);
                    }
                    ROW => {
                        if view.updates_enabled() {
                            view.session()
                                .bridge()
                                .call_func("setTableRowCursorByID", &js_args![id, current.row]);
                        }
                        view.fire("table-row-selected", &[&current.row as &dyn Any]);
                    }
                    _ => {}
                }
            }
            "gap" if view.updates_enabled() => view.update_css(&gap_css(view)),
            "selection-mode" if view.updates_enabled() => {
                let bridge = view.session().bridge();
                let id = view.html_id();
                let batch = bridge.start_update_script(id);
                let mode = TableView::selection_mode(view);
                if mode == NONE {
                    for name in ["tabindex", "data-current", "onfocus", "onblur", "onkeydown", "data-selection"] {
                        bridge.remove_property(id, name);
                    }
                } else {
                    let (selection, keydown) = if mode == CELL {
                        ("cell", "tableViewCellKeyDownEvent(this, event)")
                    } else {
                        ("row", "tableViewRowKeyDownEvent(this, event)")
                    };
                    bridge.update_property(id, "tabindex", &JsArg::from(view.get_int("tab-index").unwrap_or(0)));
                    bridge.update_property(id, "onfocus", &JsArg::from("tableViewFocusEvent(this, event)"));
                    bridge.update_property(id, "onblur", &JsArg::from("tableViewBlurEvent(this, event)"));
                    bridge.update_property(id, "data-selection", &JsArg::from(selection));
                    bridge.update_property(id, "data-focusitemstyle", &JsArg::from(current_style(view)));
                    bridge.update_property(id, "data-bluritemstyle", &JsArg::from(blurred_style(view)));
                    match data_current(view) {
                        Some(current) => bridge.update_property(id, "data-current", &JsArg::from(current)),
                        None => bridge.remove_property(id, "data-current"),
                    }
                    bridge.update_property(id, "onkeydown", &JsArg::from(keydown));
                }
                if batch {
                    bridge.finish_update_script(id);
                }
                view.update_inner_html();
            }
            "gap" | "selection-mode" => {}
            _ => view.base_changed(tag),
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "table".to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        if let Some(adapter) = TableView::adapter(view) {
            let _ = write!(
                buffer,
                " data-rows=\"{}\" data-columns=\"{}\"",
                adapter.row_count(),
                adapter.column_count()
            );
        }
        let mode = TableView::selection_mode(view);
        if mode == NONE {
            return;
        }
        let _ = write!(
            buffer,
            " tabindex=\"{}\" onfocus=\"tableViewFocusEvent(this, event)\" onblur=\"tableViewBlurEvent(this, event)\" \
             data-focusitemstyle=\"{}\" data-bluritemstyle=\"{}\"",
            view.get_int("tab-index").unwrap_or(0),
            current_style(view),
            blurred_style(view)
        );
        if mode == ROW {
            buffer.push_str(" data-selection=\"row\" onkeydown=\"tableViewRowKeyDownEvent(this, event)\"");
        } else {
            buffer.push_str(" data-selection=\"cell\" onkeydown=\"tableViewCellKeyDownEvent(this, event)\"");
        }
        if let Some(current) = data_current(view) {
            let _ = write!(buffer, " data-current=\"{current}\"");
        }
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        self.cell_views.borrow_mut().clear();
        let Some(adapter) = TableView::adapter(view) else {
            return;
        };
        let rows = adapter.row_count();
        let columns = adapter.column_count();
        if rows == 0 || columns == 0 {
            return;
        }

        let session = view.session();
        let held = !session.ignore_view_updates();
        if held {
            session.set_ignore_view_updates(true);
        }

        if let Some(style) = handle::<Style>(view, "column-style") {
            let scratch = Scratch::new(session);
            buffer.push_str("<colgroup>");
            for column in 0..columns {
                let css = style
                    .column_style(column)
                    .or_else(|| adapter.column_style(column))
                    .map(|params| scratch.css(&[], &params))
                    .unwrap_or_default();
                if css.is_empty() {
                    buffer.push_str("<col>");
                } else {
                    let _ = write!(buffer, "<col style=\"{css}\">");
                }
            }
            buffer.push_str("</colgroup>");
        }

        let vertical_align = match view.get_int("table-vertical-align") {
            Some(1) => "bottom",
            Some(2) => "middle",
            Some(3 | 4) => "baseline",
            _ => "top",
        };
        let mut defaults = Vec::new();
        if let Some(border) = view.get_raw("cell-border") {
            defaults.push(("border", border));
        }
        if let Some(padding) = view.get("cell-padding") {
            defaults.push(("padding", padding));
        }

        let head = TableView::head_height(view).min(rows);
        let foot = TableView::foot_height(view).min(rows - head);
        let section_start = |tag: &str, style: Option<String>, buffer: &mut String| {
            let _ = write!(buffer, "<{tag}");
            if let Some(style) = style {
                let _ = write!(buffer, " class=\"{}\"", escape_html(&style));
            }
            let _ = write!(buffer, " style=\"vertical-align: {vertical_align};\">");
        };

        if head > 0 {
            section_start("thead", view.get_text("head-style"), buffer);
            let section = Section { rows: 0..head, cell_tag: "th", cell_defaults: defaults.clone() };
            self.write_rows(view, &adapter, section, buffer);
            buffer.push_str("</thead>");
        }
        if rows > head + foot {
            section_start("tbody", None, buffer);
            let section = Section { rows: head..rows - foot, cell_tag: "td", cell_defaults: defaults.clone() };
            self.write_rows(view, &adapter, section, buffer);
            buffer.push_str("</tbody>");
        }
        if foot > 0 {
            section_start("tfoot", view.get_text("foot-style"), buffer);
            let section = Section { rows: rows - foot..rows, cell_tag: "td", cell_defaults: defaults };
            self.write_rows(view, &adapter, section, buffer);
            buffer.push_str("</tfoot>");
        }

        if held {
            session.set_ignore_view_updates(false);
        }
    }

    fn css_style(&self, view: &View, builder: &mut CssBuilder) {
        view.base_css_style(builder);
        builder.extend(gap_css(view));
    }

    fn subviews(&self, _view: &View) -> Vec<View> {
        self.cell_views.borrow().clone()
    }

    fn handle_command(&self, view: &View, command: &str, data: &DataObject) -> bool {
        let current = TableView::current(view);
        match command {
            "currentRow" => {
                let Some(row) = coordinate(data, "row") else {
                    tracing::warn!(view = view.html_id(), "currentRow without a row");
                    return true;
                };
                if current.map(|current| current.row) != Some(row) {
                    let column = current.map_or(0, |current| current.column);
                    let changed = view.store_raw("current", Some(Value::Cell(CellIndex::new(row, column))));
                    view.fire("table-row-selected", &[&row as &dyn Any]);
                    for tag in changed {
                        view.fire_change_listeners(&tag);
                    }
                }
            }
            "currentCell" => {
                let (Some(row), Some(column)) = (coordinate(data, "row"), coordinate(data, "column")) else {
                    tracing::warn!(view = view.html_id(), "currentCell without a row and a column");
                    return true;
                };
                let cell = CellIndex::new(row, column);
                if current != Some(cell) {
                    let changed = view.store_raw("current", Some(Value::Cell(cell)));
                    view.fire("table-cell-selected", &[&row as &dyn Any, &column as &dyn Any]);
                    for tag in changed {
                        view.fire_change_listeners(&tag);
                    }
                }
            }
            "rowClick" => {
                if let Some(row) = coordinate(data, "row") {
                    view.fire("table-row-clicked", &[&row as &dyn Any]);
                }
            }
            "cellClick" => {
                if let (Some(row), Some(column)) = (coordinate(data, "row"), coordinate(data, "column")) {
                    view.fire("table-cell-clicked", &[&row as &dyn Any, &column as &dyn Any]);
                }
            }
            _ => return view.base_handle_command(command, data),
        }
        true
    }
}
