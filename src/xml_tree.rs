//! Owned XML element tree used by the response normalizer.
//!
//! `roxmltree` does the parsing; this module copies the parts the normalizer
//! cares about (local names, attributes, direct text, child elements) into a
//! small owned structure so the flattening rules do not depend on any
//! particular parser's output shape.

use crate::errors::AppError;
use std::collections::BTreeMap;

/// An element with its attributes, direct text and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Local name, without namespace prefix.
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenation of the element's own text and CDATA nodes.
    pub text: String,
    pub children: Vec<XmlNode>,
}

/// How an element reads when a plain value is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar<'a> {
    Text(&'a str),
    /// Element carries attributes, typically `xsi:nil="true"`.
    Nil,
    /// Element has child elements.
    Nested,
}

impl<'a> Scalar<'a> {
    /// Trimmed text, or `None` for nil and nested values.
    pub fn into_trimmed(self) -> Option<String> {
        match self {
            Scalar::Text(text) => Some(text.trim().to_string()),
            Scalar::Nil | Scalar::Nested => None,
        }
    }
}

impl XmlNode {
    /// Parses a document and returns its root element.
    pub fn parse(xml: &str) -> Result<XmlNode, AppError> {
        let doc = roxmltree::Document::parse(xml)?;
        Ok(Self::from_element(doc.root_element()))
    }

    fn from_element(node: roxmltree::Node<'_, '_>) -> XmlNode {
        let attributes = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_element(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            }
        }

        XmlNode {
            name: node.tag_name().name().to_string(),
            attributes,
            text,
            children,
        }
    }

    /// First child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Like [`XmlNode::child`], but a missing element is a malformed response.
    pub fn require(&self, name: &str) -> Result<&XmlNode, AppError> {
        self.child(name).ok_or_else(|| {
            AppError::MalformedResponse(format!("missing <{}> inside <{}>", name, self.name))
        })
    }

    /// Follows a fixed chain of child names.
    pub fn descend(&self, path: &[&str]) -> Result<&XmlNode, AppError> {
        path.iter().try_fold(self, |node, name| node.require(name))
    }

    /// All child elements with the given local name, in document order.
    pub fn children_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn scalar(&self) -> Scalar<'_> {
        if self.has_attributes() {
            Scalar::Nil
        } else if !self.children.is_empty() {
            Scalar::Nested
        } else {
            Scalar::Text(&self.text)
        }
    }

    /// Flattens the child elements into `name -> trimmed text`.
    ///
    /// Nil and nested children map to `None`. When a name repeats, the first
    /// occurrence wins.
    pub fn flatten(&self) -> BTreeMap<String, Option<String>> {
        let mut fields = BTreeMap::new();
        for child in &self.children {
            fields
                .entry(child.name.clone())
                .or_insert_with(|| child.scalar().into_trimmed());
        }
        fields
    }
}
