//! In-memory element tree for WordPress export files.

use pressdown_types::RawNode;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Malformed XML at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    #[error("Document has no root element")]
    Empty,
}

/// One element of the export. Names are stored without namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parse a document and return its root element
    pub fn parse(xml: &str) -> Result<XmlNode, XmlError> {
        let mut reader = Reader::from_str(xml);
        // Index 0 is a synthetic document node collecting the root element.
        let mut stack: Vec<XmlNode> = vec![XmlNode::default()];

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(XmlNode::from_start(&e)),
                Ok(Event::Empty(e)) => {
                    let node = XmlNode::from_start(&e);
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
                Ok(Event::End(_)) => {
                    if stack.len() > 1 {
                        if let Some(node) = stack.pop() {
                            if let Some(parent) = stack.last_mut() {
                                parent.children.push(node);
                            }
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    // HTML entities such as &nbsp; are not XML entities; keep them verbatim.
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(_) => String::from_utf8_lossy(&e).into_owned(),
                    };
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(source) => {
                    return Err(XmlError::Syntax {
                        position: reader.buffer_position(),
                        source,
                    })
                }
                _ => {}
            }
        }

        if stack.len() > 1 {
            let open = stack.last().map(|n| n.name.clone()).unwrap_or_default();
            return Err(XmlError::UnexpectedEof(open));
        }

        stack
            .pop()
            .and_then(|document| document.children.into_iter().next())
            .ok_or(XmlError::Empty)
    }

    fn from_start(e: &BytesStart<'_>) -> XmlNode {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
        let attributes = e
            .attributes()
            .flatten()
            .map(|attr| {
                let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
                let value = attr
                    .unescape_value()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
                (key, value)
            })
            .collect();

        XmlNode {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated text and CDATA directly inside this element
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl RawNode for XmlNode {
    fn child(&self, tag: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == tag)
    }

    fn children(&self, tag: &str) -> Vec<&Self> {
        self.children.iter().filter(|c| c.name == tag).collect()
    }

    fn optional_child_value(&self, tag: &str, index: usize) -> Option<&str> {
        self.children
            .iter()
            .filter(|c| c.name == tag)
            .nth(index)
            .map(|c| c.text.as_str())
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
