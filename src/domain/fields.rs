//! Typed child-field lookups over a single XML element.
//!
//! Only direct children are searched and only the first element with a
//! matching local tag name counts. A present child without text reads as `""`,
//! which keeps "absent" and "empty" apart.

use std::borrow::Cow;
use std::str::FromStr;

use roxmltree::Node;

use crate::domain::error::{DomainError, DomainResult};

/// Field accessor wrapping one element of a parsed document.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Fields<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// First direct child element named `tag`.
    pub fn child(&self, tag: &str) -> Option<Node<'a, 'input>> {
        first_child(self.node, tag)
    }

    /// Raw text of the child, `None` if the child does not exist.
    pub fn text(&self, tag: &str) -> Option<Cow<'a, str>> {
        self.child(tag).map(element_text)
    }

    /// Child text parsed as a float; an absent child is `Ok(None)`.
    pub fn float(&self, tag: &str) -> DomainResult<Option<f64>> {
        self.text(tag).map(|raw| parse_number(tag, &raw)).transpose()
    }

    /// Child text parsed as an integer; absence is an error.
    pub fn required_int(&self, tag: &str) -> DomainResult<i64> {
        parse_number(tag, &self.required_text(tag)?)
    }

    /// Child text parsed as a float; absence is an error.
    pub fn required_float(&self, tag: &str) -> DomainResult<f64> {
        parse_number(tag, &self.required_text(tag)?)
    }

    /// Only a missing child or one without any text counts as missing;
    /// whitespace is text and fails number parsing instead.
    fn required_text(&self, tag: &str) -> DomainResult<Cow<'a, str>> {
        match self.text(tag) {
            Some(raw) if !raw.is_empty() => Ok(raw),
            _ => Err(DomainError::MissingField(tag.to_string())),
        }
    }
}

/// Text directly inside `node` before its first child element.
///
/// Comments and processing instructions are skipped, so text split by them is
/// joined. Borrows from the document unless joining was needed.
pub fn element_text<'a>(node: Node<'a, '_>) -> Cow<'a, str> {
    let mut parts = node
        .children()
        .take_while(|n| !n.is_element())
        .filter(|n| n.is_text())
        .filter_map(|n| n.text());

    match (parts.next(), parts.next()) {
        (None, _) => Cow::Borrowed(""),
        (Some(only), None) => Cow::Borrowed(only),
        (Some(first), Some(second)) => {
            let mut joined = String::from(first);
            joined.push_str(second);
            joined.extend(parts);
            Cow::Owned(joined)
        }
    }
}

/// First direct child element of `node` with local name `tag`.
pub fn first_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

fn parse_number<T: FromStr>(tag: &str, raw: &str) -> DomainResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| DomainError::MalformedNumber {
            field: tag.to_string(),
            value: raw.to_string(),
        })
}
