//! Messages of the page runtime.
//!
//! Every frame the page sends is one data object in text form; its tag is the
//! command. The server answers a `startSession` with the session id script and
//! then only sends scripts.

use rui_core::{DataError, DataObject};

/// First message of a new page.
pub const START_SESSION: &str = "startSession";

/// First message of a page that lost its connection.
pub const RECONNECT: &str = "reconnect";

/// Reply to a synchronous request.
pub const ANSWER: &str = "answer";

/// A decoded page message.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    /// Starts the session; the object carries the session info fields.
    Start(DataObject),
    /// Fulfills a pending request.
    Answer(DataObject),
    /// Everything else, routed through the session.
    Event(DataObject),
}

impl Incoming {
    /// Parses one frame.
    ///
    /// # Errors
    ///
    /// Returns the parse error of malformed text.
    pub fn parse(text: &str) -> Result<Self, DataError> {
        DataObject::parse(text.trim()).map(Self::classify)
    }

    /// Sorts a message by its tag.
    #[must_use]
    pub fn classify(message: DataObject) -> Self {
        match message.tag() {
            START_SESSION | RECONNECT => Self::Start(message),
            ANSWER => Self::Answer(message),
            _ => Self::Event(message),
        }
    }
}

/// The script telling the page its session id.
#[must_use]
pub fn session_id_script(id: u64) -> String {
    format!("sessionID = '{id}';")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_sorted_by_tag() {
        let Ok(Incoming::Start(start)) = Incoming::parse("startSession{touch=1, language=de}\n") else {
            panic!("startSession not recognised");
        };
        assert_eq!(start.text("language"), Some("de"));

        assert!(matches!(
            Incoming::parse("reconnect{session=12}"),
            Ok(Incoming::Start(_))
        ));
        assert!(matches!(
            Incoming::parse("answer{answerID=3, width=10}"),
            Ok(Incoming::Answer(_))
        ));
        let Ok(Incoming::Event(event)) = Incoming::parse("click-event{id=id000002}") else {
            panic!("event not recognised");
        };
        assert_eq!(event.text("id"), Some("id000002"));
    }

    #[test]
    fn malformed_frames_fail() {
        assert!(Incoming::parse("click-event{id=").is_err());
    }

    #[test]
    fn greeting() {
        assert_eq!(session_id_script(7), "sessionID = '7';");
    }
}
