use core::any::Any;
use core::cell::RefCell;

use rui_core::{DataObject, DataValue, Params, Session, View, Widget};
use time::OffsetDateTime;

use crate::write_attribute;

/// A file chosen in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileInfo {
    /// File name without the directory.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type reported by the browser, may be empty.
    pub mime_type: String,
    /// Last modification time, when the browser knows it.
    pub last_modified: Option<OffsetDateTime>,
}

impl FileInfo {
    /// Decodes one entry of the `files` array of a `fileSelected` message.
    #[must_use]
    pub fn from_object(object: &DataObject) -> Option<Self> {
        let name = object.text("name")?.to_string();
        let last_modified = object
            .int("last-modified")
            .and_then(|ms| OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok());
        Some(Self {
            name,
            size: object.int("size").and_then(|size| u64::try_from(size).ok()).unwrap_or(0),
            mime_type: object.text("mime-type").unwrap_or_default().to_string(),
            last_modified,
        })
    }
}

/// An `<input type="file">`; `file-selected-event` receives `&Vec<FileInfo>`.
///
/// `accept` takes the browser's comma separated list of types or extensions.
#[derive(Debug, Default)]
pub struct FilePicker {
    files: RefCell<Vec<FileInfo>>,
}

impl FilePicker {
    /// Creates a file picker.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self::default(), params)
    }

    /// The files of the last selection.
    #[must_use]
    pub fn files(view: &View) -> Vec<FileInfo> {
        view.widget::<Self>()
            .map(|picker| picker.files.borrow().clone())
            .unwrap_or_default()
    }

    /// Whether several files may be chosen.
    #[must_use]
    pub fn is_multiple(view: &View) -> bool {
        view.get_bool("multiple").unwrap_or(false)
    }
}

impl Widget for FilePicker {
    fn type_name(&self) -> &'static str {
        "FilePicker"
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        (tag == "file-selected-event").then_some(1)
    }

    fn changed(&self, view: &View, tag: &str) {
        match tag {
            "accept" => super::update_attribute(view, "accept", accept(view)),
            "multiple" => super::update_attribute(view, "multiple", FilePicker::is_multiple(view).then(String::new)),
            _ => view.base_changed(tag),
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "input".to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        write_attribute(buffer, "type", "file");
        if let Some(accept) = accept(view) {
            write_attribute(buffer, "accept", &accept);
        }
        if FilePicker::is_multiple(view) {
            buffer.push_str(" multiple");
        }
        buffer.push_str(" onchange=\"fileSelectedEvent(this)\"");
    }

    fn html_disabled(&self) -> bool {
        true
    }

    fn focusable(&self) -> bool {
        true
    }

    fn handle_command(&self, view: &View, command: &str, data: &DataObject) -> bool {
        if command != "fileSelected" {
            return view.base_handle_command(command, data);
        }
        let files: Vec<FileInfo> = data
            .array("files")
            .unwrap_or_default()
            .iter()
            .filter_map(DataValue::as_object)
            .filter_map(FileInfo::from_object)
            .collect();
        tracing::debug!(view = view.html_id(), count = files.len(), "files selected");
        self.files.replace(files.clone());
        view.fire("file-selected-event", &[&files as &dyn Any]);
        true
    }
}

fn accept(view: &View) -> Option<String> {
    view.get_text("accept").filter(|accept| !accept.is_empty())
}
