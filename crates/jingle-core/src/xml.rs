//! Minimal XML element tree read and written with quick-xml.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};

/// An XML element with attributes in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written (may carry a prefix)
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Child elements
    pub children: Vec<Element>,
    /// Text content
    pub text: Option<String>,
}

impl Element {
    /// Element without attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Element carrying an `xmlns` attribute
    pub fn with_ns(name: impl Into<String>, ns: &str) -> Self {
        Self::new(name).attr("xmlns", ns)
    }

    /// Add an attribute
    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    /// Add an attribute when a value is present
    pub fn attr_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// Add a child
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set the text content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    /// Attribute value
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Children with the given local name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    /// First child with the given local name
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    /// Parse a document and return its root element
    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(element_from_start(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(top) = stack.last_mut() {
                        let text = e.unescape().map_err(|err| Error::Xml(err.to_string()))?;
                        top.text = Some(text.into_owned());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::Xml("unexpected end of document".to_string()));
        }
        root.ok_or_else(|| Error::Xml("document has no root element".to_string()))
    }

    /// Serialize the element and its subtree
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        write_element(&mut writer, self)?;
        let xml = writer.into_inner().into_inner();
        String::from_utf8(xml).map_err(|e| Error::Xml(e.to_string()))
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::Xml("multiple root elements".to_string())),
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| Error::Xml(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| Error::Xml(e.to_string()))?;
    if let Some(text) = &element.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| Error::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let xml = r#"<jingle xmlns="urn:xmpp:jingle:1" sid="abc"><content name="audio"><description media="audio"/></content><content name="video"/></jingle>"#;
        let root = Element::parse(xml).unwrap();
        assert_eq!(root.name, "jingle");
        assert_eq!(root.get_attr("sid"), Some("abc"));
        assert_eq!(root.children_named("content").count(), 2);
        let audio = root.find_child("content").unwrap();
        assert_eq!(audio.find_child("description").unwrap().get_attr("media"), Some("audio"));
    }

    #[test]
    fn test_text_and_escaping() {
        let element = Element::new("fingerprint").attr("hash", "sha-256").text("AB:CD & <EF>");
        let xml = element.to_xml().unwrap();
        assert_eq!(xml, r#"<fingerprint hash="sha-256">AB:CD &amp; &lt;EF&gt;</fingerprint>"#);
        assert_eq!(Element::parse(&xml).unwrap(), element);
    }

    #[test]
    fn test_local_name_strips_prefix() {
        let root = Element::parse(r#"<j:jingle xmlns:j="urn:xmpp:jingle:1"/>"#).unwrap();
        assert_eq!(root.local_name(), "jingle");
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(Element::parse("<a><b></a>"), Err(Error::Xml(_))));
        assert!(matches!(Element::parse(""), Err(Error::Xml(_))));
        assert!(matches!(Element::parse("<a>"), Err(Error::Xml(_))));
    }
}
