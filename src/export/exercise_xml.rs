//! Exercise list XML document.
//!
//! The list is kept as a plain element tree so that exercises written by
//! other tools survive a read/append/write cycle with their elements,
//! attributes and text untouched.

use crate::export::types::{ExerciseRecord, ExportError};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

pub const ROOT_ELEMENT: &str = "exercise-list";
pub const EXERCISE_ELEMENT: &str = "exercise";

/// One element with its attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Trimmed text of the first child called `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .and_then(|child| child.text.as_deref())
            .map(str::trim)
    }
}

impl From<&ExerciseRecord> for XmlNode {
    fn from(record: &ExerciseRecord) -> Self {
        let mut node = XmlNode::new(EXERCISE_ELEMENT);
        node.children = record
            .fields()
            .into_iter()
            .map(|(name, value)| XmlNode::with_text(name, value))
            .collect();
        node
    }
}

/// An empty `<exercise-list>` root.
pub fn empty_document() -> XmlNode {
    XmlNode::new(ROOT_ELEMENT)
}

/// Parse an exercise list document into its root element.
pub fn parse_document(content: &str) -> Result<XmlNode, ExportError> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(start_node(e)?),
            Ok(Event::Empty(ref e)) => {
                let node = start_node(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| {
                    ExportError::InvalidDocument(format!("Failed to unescape text: {}", e))
                })?;
                if let Some(node) = stack.last_mut() {
                    node.text.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                if let Some(node) = stack.last_mut() {
                    node.text.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().ok_or_else(|| {
                    ExportError::InvalidDocument("unexpected closing tag".to_string())
                })?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExportError::InvalidDocument(format!(
                    "XML parsing error: {}",
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ExportError::InvalidDocument(format!(
            "element <{}> is never closed",
            open.name
        )));
    }

    let root =
        root.ok_or_else(|| ExportError::InvalidDocument("document has no root element".to_string()))?;
    if root.name != ROOT_ELEMENT {
        return Err(ExportError::InvalidDocument(format!(
            "expected <{}> root, found <{}>",
            ROOT_ELEMENT, root.name
        )));
    }

    Ok(root)
}

fn start_node(event: &BytesStart) -> Result<XmlNode, ExportError> {
    let mut node = XmlNode::new(String::from_utf8_lossy(event.name().as_ref()).to_string());
    for attr in event.attributes() {
        let attr = attr.map_err(|e| ExportError::InvalidDocument(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ExportError::InvalidDocument(e.to_string()))?;
        node.attributes.push((key, value.to_string()));
    }
    Ok(node)
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), ExportError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => {
            return Err(ExportError::InvalidDocument(
                "more than one root element".to_string(),
            ));
        }
        None => *root = Some(node),
    }
    Ok(())
}

/// Serialize a document tree with an XML declaration and two-space indent.
pub fn write_document(root: &XmlNode) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    write_node(&mut writer, root)?;

    let result = writer.into_inner().into_inner();
    String::from_utf8(result).map_err(|e| ExportError::XmlError(e.to_string()))
}

fn write_node<W: std::io::Write>(writer: &mut Writer<W>, node: &XmlNode) -> Result<(), ExportError> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| ExportError::XmlError(e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    if let Some(text) = &node.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| ExportError::XmlError(e.to_string()))?;
    }

    for child in &node.children {
        write_node(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    Ok(())
}
