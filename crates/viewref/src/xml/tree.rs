//! Minimal element tree built from quick-xml events.
//!
//! The persisted fragments are small, so decoding works on a materialized
//! tree instead of a streaming cursor. Text is kept exactly as written
//! (no trimming) because expression bodies must survive byte-for-byte.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
    pub name: String,
    attrs: IndexMap<String, String>,
    pub children: Vec<Element>,
    /// Concatenated text and CDATA directly inside this element.
    pub text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let mut attrs = IndexMap::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attrs.insert(key, value);
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attrs,
            ..Self::default()
        })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Attribute value, or the empty string when absent.
    pub fn attr_or_empty(&self, key: &str) -> &str {
        self.attr(key).unwrap_or("")
    }

    pub fn require(&self, element: &'static str, attribute: &'static str) -> Result<&str> {
        self.attr(attribute)
            .ok_or(Error::MissingAttribute { element, attribute })
    }

    /// Parse an optional `true`/`false` attribute; absent means `false`.
    pub fn flag(&self, element: &'static str, attribute: &'static str) -> Result<bool> {
        match self.attr(attribute) {
            None | Some("false") => Ok(false),
            Some("true") => Ok(true),
            Some(other) => Err(Error::InvalidAttribute {
                element,
                attribute,
                value: other.to_string(),
            }),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn expect_name(&self, expected: &'static str) -> Result<()> {
        if self.name == expected {
            Ok(())
        } else {
            Err(Error::UnexpectedElement {
                expected,
                found: self.name.clone(),
            })
        }
    }
}

/// Parse a document and return its root element.
pub(crate) fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::open(&start)?),
            Event::Empty(start) => {
                let element = Element::open(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::End(_) => {
                // quick-xml has already matched the end tag to its start.
                let Some(element) = stack.pop() else {
                    break;
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Err(Error::MissingElement {
        parent: "document",
        child: "root",
    })
}
