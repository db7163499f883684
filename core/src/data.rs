//! The data-text format used by the runtime messages and by resource descriptions.
//!
//! ```text
//! tag {
//!     key = value,
//!     "quoted key" = 'quoted value'
//!     list = [ item, obj{ a = 1 } ],
//!     nested = _{ x = `raw \n text` },
//! }
//! ```
//!
//! Nodes are separated by `,` or a newline. `//` and `/* */` comments are skipped.
//! Double and single quoted strings accept `\n \r \t \" \' \\ \xHH \uHHHH` escapes;
//! backquoted strings are raw.

use core::fmt::{self, Display, Write};

use crate::error::DataError;

/// A value of a data node: text, object or array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    /// Plain text.
    Text(String),
    /// A nested object.
    Object(DataObject),
    /// An array of values.
    Array(Vec<DataValue>),
}

impl DataValue {
    /// The text, if the value is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The object, if the value is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&DataObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The elements, if the value is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// A key and its value inside an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataNode {
    /// Key of the node.
    pub tag: String,
    /// Value of the node.
    pub value: DataValue,
}

/// A tagged object holding ordered nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataObject {
    tag: String,
    nodes: Vec<DataNode>,
}

impl DataObject {
    /// An empty object.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            nodes: Vec::new(),
        }
    }

    /// Parses a data text.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] describing the first syntax error.
    pub fn parse(text: &str) -> Result<Self, DataError> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut parser = Parser {
            data: text.chars().collect(),
            pos: 0,
        };
        let tag = parser.parse_tag()?;
        parser.skip_spaces(true);
        parser.parse_object(tag)
    }

    /// The object tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The nodes in their original order.
    #[must_use]
    pub fn nodes(&self) -> &[DataNode] {
        &self.nodes
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, tag: &str) -> Option<&DataNode> {
        self.nodes.iter().find(|node| node.tag == tag)
    }

    /// Text value of a node.
    #[must_use]
    pub fn text(&self, tag: &str) -> Option<&str> {
        self.node(tag).and_then(|node| node.value.as_text())
    }

    /// Object value of a node.
    #[must_use]
    pub fn object(&self, tag: &str) -> Option<&Self> {
        self.node(tag).and_then(|node| node.value.as_object())
    }

    /// Array value of a node.
    #[must_use]
    pub fn array(&self, tag: &str) -> Option<&[DataValue]> {
        self.node(tag).and_then(|node| node.value.as_array())
    }

    /// Parses a node's text as an integer.
    #[must_use]
    pub fn int(&self, tag: &str) -> Option<i64> {
        self.text(tag).and_then(|text| text.trim().parse().ok())
    }

    /// Parses a node's text as a float.
    #[must_use]
    pub fn float(&self, tag: &str) -> Option<f64> {
        self.text(tag).and_then(|text| text.trim().parse().ok())
    }

    /// Reads a flag written by the runtime as `1`/`0` (or `true`/`false`).
    #[must_use]
    pub fn flag(&self, tag: &str) -> bool {
        matches!(self.text(tag).map(str::trim), Some("1" | "true"))
    }

    /// Sets or replaces a node.
    pub fn set(&mut self, tag: impl Into<String>, value: DataValue) {
        let tag = tag.into();
        if let Some(node) = self.nodes.iter_mut().find(|node| node.tag == tag) {
            node.value = value;
        } else {
            self.nodes.push(DataNode { tag, value });
        }
    }

    /// Sets a text node.
    pub fn set_text(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        self.set(tag, DataValue::Text(text.into()));
    }

    /// Builder form of [`DataObject::set_text`].
    #[must_use]
    pub fn with(mut self, tag: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_text(tag, text);
        self
    }

    /// Removes a node.
    pub fn remove(&mut self, tag: &str) -> Option<DataNode> {
        let index = self.nodes.iter().position(|node| node.tag == tag)?;
        Some(self.nodes.remove(index))
    }
}

fn is_stop(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '=' | '{' | '}' | '[' | ']' | ',' | '\'' | '"' | '`' | '/')
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty() || text.chars().any(|ch| is_stop(ch) || ch.is_control())
}

fn write_text(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if !needs_quotes(text) {
        return f.write_str(text);
    }
    f.write_char('"')?;
    for ch in text.chars() {
        match ch {
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            ch if (ch as u32) < 0x20 => write!(f, "\\x{:02X}", ch as u32)?,
            ch => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}

impl Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write_text(f, text),
            Self::Object(object) => Display::fmt(object, f),
            Self::Array(items) => {
                f.write_char('[')?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    Display::fmt(item, f)?;
                }
                f.write_char(']')
            }
        }
    }
}

impl Display for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_text(f, &self.tag)?;
        f.write_char('{')?;
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write_text(f, &node.tag)?;
            f.write_str(" = ")?;
            Display::fmt(&node.value, f)?;
        }
        f.write_char('}')
    }
}

struct Parser {
    data: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.data.get(self.pos).copied()
    }

    fn expect_peek(&self) -> Result<char, DataError> {
        self.peek().ok_or(DataError::UnexpectedEnd)
    }

    fn unexpected(&self, ch: char) -> DataError {
        DataError::UnexpectedChar {
            ch,
            offset: self.pos,
        }
    }

    fn skip_spaces(&mut self, skip_newline: bool) {
        while let Some(ch) = self.peek() {
            match ch {
                '\n' if !skip_newline => return,
                '/' => match self.data.get(self.pos + 1) {
                    Some('/') => {
                        while self.peek().is_some_and(|ch| ch != '\n') {
                            self.pos += 1;
                        }
                        continue;
                    }
                    Some('*') => {
                        self.pos += 2;
                        while self.pos < self.data.len()
                            && !(self.data[self.pos] == '*'
                                && self.data.get(self.pos + 1) == Some(&'/'))
                        {
                            self.pos += 1;
                        }
                        self.pos = (self.pos + 2).min(self.data.len());
                        continue;
                    }
                    _ => return,
                },
                ch if ch.is_whitespace() => {}
                _ => return,
            }
            self.pos += 1;
        }
    }

    fn hex(&mut self, digits: usize, start: usize) -> Result<char, DataError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .peek()
                .and_then(|ch| ch.to_digit(16))
                .ok_or(DataError::InvalidEscape(start))?;
            code = code * 16 + digit;
            self.pos += 1;
        }
        char::from_u32(code).ok_or(DataError::InvalidEscape(start))
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, DataError> {
        let start = self.pos;
        self.pos += 1;
        let mut text = String::new();
        loop {
            let ch = self.peek().ok_or(DataError::UnterminatedString(start))?;
            self.pos += 1;
            if ch == quote {
                break;
            }
            if ch != '\\' {
                text.push(ch);
                continue;
            }
            let escape = self.pos - 1;
            let ch = self.peek().ok_or(DataError::UnterminatedString(start))?;
            self.pos += 1;
            match ch {
                'n' => text.push('\n'),
                'r' => text.push('\r'),
                't' => text.push('\t'),
                '"' => text.push('"'),
                '\'' => text.push('\''),
                '\\' => text.push('\\'),
                'x' | 'X' => text.push(self.hex(2, escape)?),
                'u' | 'U' => text.push(self.hex(4, escape)?),
                _ => return Err(DataError::InvalidEscape(escape)),
            }
        }
        self.skip_spaces(false);
        Ok(text)
    }

    fn parse_tag(&mut self) -> Result<String, DataError> {
        self.skip_spaces(true);
        match self.expect_peek()? {
            '`' => {
                let start = self.pos;
                self.pos += 1;
                let begin = self.pos;
                while self.peek().is_some_and(|ch| ch != '`') {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(DataError::UnterminatedString(start));
                }
                let text = self.data[begin..self.pos].iter().collect();
                self.pos += 1;
                self.skip_spaces(false);
                Ok(text)
            }
            quote @ ('\'' | '"') => self.parse_quoted(quote),
            _ => {
                let begin = self.pos;
                while self.peek().is_some_and(|ch| !is_stop(ch)) {
                    self.pos += 1;
                }
                let text = self.data[begin..self.pos].iter().collect();
                self.skip_spaces(false);
                Ok(text)
            }
        }
    }

    fn parse_object(&mut self, tag: String) -> Result<DataObject, DataError> {
        let ch = self.expect_peek()?;
        if ch != '{' {
            return Err(self.unexpected(ch));
        }
        self.pos += 1;
        let mut object = DataObject::new(tag);

        loop {
            self.skip_spaces(true);
            while self.peek() == Some(',') {
                self.pos += 1;
                self.skip_spaces(true);
            }
            if self.expect_peek()? == '}' {
                self.pos += 1;
                self.skip_spaces(false);
                return Ok(object);
            }

            let node = self.parse_node()?;
            object.nodes.push(node);

            match self.expect_peek()? {
                '}' | ',' | '\n' => {}
                ch => return Err(self.unexpected(ch)),
            }
        }
    }

    fn parse_node(&mut self) -> Result<DataNode, DataError> {
        let tag = self.parse_tag()?;
        self.skip_spaces(true);
        let ch = self.expect_peek()?;
        if ch != '=' {
            return Err(self.unexpected(ch));
        }
        self.pos += 1;
        self.skip_spaces(true);

        let value = match self.expect_peek()? {
            '[' => DataValue::Array(self.parse_array()?),
            '{' => DataValue::Object(self.parse_object("_".to_string())?),
            ch @ ('}' | ']' | '=') => return Err(self.unexpected(ch)),
            _ => {
                let text = self.parse_tag()?;
                if self.peek() == Some('{') {
                    DataValue::Object(self.parse_object(text)?)
                } else {
                    DataValue::Text(text)
                }
            }
        };
        Ok(DataNode { tag, value })
    }

    fn parse_array(&mut self) -> Result<Vec<DataValue>, DataError> {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_spaces(true);
            while self.peek() == Some(',') {
                self.pos += 1;
                self.skip_spaces(true);
            }
            if self.expect_peek()? == ']' {
                self.pos += 1;
                self.skip_spaces(false);
                return Ok(items);
            }

            let text = self.parse_tag()?;
            if self.peek() == Some('{') {
                items.push(DataValue::Object(self.parse_object(text)?));
            } else {
                items.push(DataValue::Text(text));
            }

            match self.expect_peek()? {
                ']' | ',' | '\n' => {}
                ch => return Err(self.unexpected(ch)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_text() {
        let text = "obj1 {\n\
            key1 = val1,\n\
            key2=obj2{\n\
                key2.1=[val2.1,obj2.2{}, obj2.3{}],\n\
                \"key 2.2\"='val 2.2'\n\
                // comment\n\
                key2.3/* comment */ = {\n\
                }\n\
                'key2.4' = obj2.3{ text = \" \"},\n\
                key2.5= [],\n\
            },\n\
            key3 = \"\\n \\t \\\\ \\\" ' \\x4F\\u01Ea\",\n\
            key4=`\\n raw`\r}";
        let object = DataObject::parse(text).unwrap();
        assert_eq!(object.tag(), "obj1");
        assert_eq!(object.nodes().len(), 4);
        assert_eq!(object.text("key1"), Some("val1"));
        assert_eq!(object.text("key3"), Some("\n \t \\ \" ' O\u{01ea}"));
        assert_eq!(object.text("key4"), Some("\\n raw"));

        let key2 = object.object("key2").unwrap();
        assert_eq!(key2.tag(), "obj2");
        assert_eq!(key2.array("key2.1").unwrap().len(), 3);
        assert_eq!(key2.text("key 2.2"), Some("val 2.2"));
        assert_eq!(key2.object("key2.3").unwrap().tag(), "_");
        assert_eq!(key2.object("key2.4").unwrap().text("text"), Some(" "));
        assert!(key2.array("key2.5").unwrap().is_empty());
    }

    #[test]
    fn runtime_message() {
        let message = DataObject::parse("itemSelected{session=1, id=id000003, number=2}").unwrap();
        assert_eq!(message.tag(), "itemSelected");
        assert_eq!(message.int("number"), Some(2));
        assert_eq!(message.text("id"), Some("id000003"));
    }

    #[test]
    fn errors() {
        assert_eq!(
            DataObject::parse("obj { key = \"open"),
            Err(DataError::UnterminatedString(12))
        );
        assert!(matches!(
            DataObject::parse("obj { key }"),
            Err(DataError::UnexpectedChar { ch: '}', .. })
        ));
        assert_eq!(DataObject::parse("obj { key = 1"), Err(DataError::UnexpectedEnd));
        assert!(matches!(
            DataObject::parse("obj { key = \"\\q\" }"),
            Err(DataError::InvalidEscape(_))
        ));
    }

    #[test]
    fn writer_quotes_when_needed() {
        let object = DataObject::new("answer")
            .with("answerID", "3")
            .with("value", "two words");
        assert_eq!(object.to_string(), "answer{answerID = 3, value = \"two words\"}");
        assert_eq!(DataObject::parse(&object.to_string()).unwrap(), object);
    }
}
