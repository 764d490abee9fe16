//! Minimal mutable XML tree
//!
//! Transfer files are edited in place: sections gain and lose definitions
//! while user comments and unknown markup must survive. `quick-xml` supplies
//! the event reader and escaping; this module keeps the tree.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use rulegen_domain::{Error, Result};

/// A child node of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    /// Processing instruction body, target included
    Instruction(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attr`]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`Element::push`]
    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    /// Builder that appends several children
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self.push(child);
        }
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any previous value in place
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Child elements, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |el| el.name == name)
    }

    /// Whether the element has no child elements (comments do not count)
    pub fn has_no_elements(&self) -> bool {
        self.elements().next().is_none()
    }

    /// Keep only the child elements for which `keep` returns true
    ///
    /// Text and comment nodes are left untouched.
    pub fn retain_elements(&mut self, mut keep: impl FnMut(&Element) -> bool) {
        self.children.retain(|node| match node {
            Node::Element(el) => keep(el),
            _ => true,
        });
    }

    /// Visit this element and every descendant element in document order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in self.elements() {
            child.walk(visit);
        }
    }
}

/// A parsed document: optional DOCTYPE body plus the root element
///
/// Comments and processing instructions around the root land in `prolog`
/// and `epilog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub doctype: Option<String>,
    pub prolog: Vec<Node>,
    pub root: Element,
    pub epilog: Vec<Node>,
}

/// Parse `text` into a tree
///
/// `document` names the source in error messages. Whitespace-only text is
/// dropped; comments and processing instructions are kept.
pub fn parse(text: &str, document: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut doctype = None;
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::xml(
                document,
                format!("{e} (at byte {})", reader.buffer_position()),
            )
        })?;
        match event {
            Event::Start(start) => stack.push(open_element(&start, document)?),
            Event::Empty(start) => {
                let element = open_element(&start, document)?;
                attach(&mut stack, &mut root, element, document)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::xml(document, "unexpected closing tag"))?;
                attach(&mut stack, &mut root, element, document)?;
            }
            Event::Text(raw) => {
                let content = raw
                    .unescape()
                    .map_err(|e| Error::xml(document, e.to_string()))?;
                push_text(&mut stack, content.trim(), document)?;
            }
            Event::CData(raw) => {
                let content = String::from_utf8_lossy(&raw).into_owned();
                push_text(&mut stack, content.trim(), document)?;
            }
            Event::Comment(raw) => {
                let node = Node::Comment(String::from_utf8_lossy(&raw).into_owned());
                place_misc(&mut stack, root.is_some(), &mut prolog, &mut epilog, node);
            }
            Event::PI(raw) => {
                let node = Node::Instruction(String::from_utf8_lossy(&raw).trim().to_string());
                place_misc(&mut stack, root.is_some(), &mut prolog, &mut epilog, node);
            }
            Event::DocType(raw) => {
                doctype = Some(String::from_utf8_lossy(&raw).trim().to_string());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::xml(
            document,
            format!("element <{}> is never closed", open.name),
        ));
    }
    let root = root.ok_or_else(|| Error::xml(document, "document has no root element"))?;
    Ok(XmlDocument {
        doctype,
        prolog,
        root,
        epilog,
    })
}

fn place_misc(
    stack: &mut [Element],
    after_root: bool,
    prolog: &mut Vec<Node>,
    epilog: &mut Vec<Node>,
    node: Node,
) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if after_root => epilog.push(node),
        None => prolog.push(node),
    }
}

fn open_element(start: &BytesStart<'_>, document: &str) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| Error::xml(document, e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::xml(document, e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    document: &str,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::xml(document, "more than one root element"));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], content: &str, document: &str) -> Result<()> {
    if content.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Text(content.to_string()));
            Ok(())
        }
        None => Err(Error::xml(document, "text outside the root element")),
    }
}

/// Serialize a document with an XML declaration and indentation
pub fn to_string(document: &XmlDocument, indent: usize) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    if let Some(doctype) = &document.doctype {
        out.push_str("<!DOCTYPE ");
        out.push_str(doctype);
        out.push_str(">\n");
    }
    for node in &document.prolog {
        write_node(&mut out, node, 0, indent);
    }
    write_element(&mut out, &document.root, 0, indent);
    for node in &document.epilog {
        write_node(&mut out, node, 0, indent);
    }
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize, indent: usize) {
    if let Node::Element(element) = node {
        write_element(out, element, depth, indent);
        return;
    }
    out.push_str(&" ".repeat(depth * indent));
    match node {
        Node::Text(text) => out.push_str(&escape(text.as_str())),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Instruction(body) => {
            out.push_str("<?");
            out.push_str(body);
            out.push_str("?>");
        }
        Node::Element(_) => {}
    }
    out.push('\n');
}

fn write_element(out: &mut String, element: &Element, depth: usize, indent: usize) {
    let pad = " ".repeat(depth * indent);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    let text_only = element
        .children
        .iter()
        .all(|node| matches!(node, Node::Text(_)));
    if text_only {
        out.push('>');
        for node in &element.children {
            if let Node::Text(text) = node {
                out.push_str(&escape(text.as_str()));
            }
        }
    } else {
        out.push_str(">\n");
        for node in &element.children {
            write_node(out, node, depth + 1, indent);
        }
        out.push_str(&pad);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}
