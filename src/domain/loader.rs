//! Document loader: parses order XML and assembles a [`PurchaseOrder`].

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use crate::domain::entities::{Address, LineItem, PurchaseOrder};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::{element_text, first_child};

pub const SHIP_TO: &str = "shipTo";
pub const BILL_TO: &str = "billTo";
pub const ITEMS: &str = "items";
pub const ITEM: &str = "item";
pub const COMMENT: &str = "comment";
pub const ORDER_DATE: &str = "orderDate";

/// Parse `text` into a document tree.
///
/// The returned document borrows `text`; records built from it borrow the document.
pub fn parse(text: &str, allow_dtd: bool) -> DomainResult<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)?;
    debug!(
        "parse: root=<{}> nodes={}",
        doc.root_element().tag_name().name(),
        doc.descendants().count()
    );
    Ok(doc)
}

/// Locate the order sections and build the aggregate.
///
/// Only structural presence is checked here. Numeric fields are parsed when read.
pub fn load<'a, 'input>(doc: &'a Document<'input>) -> DomainResult<PurchaseOrder<'a, 'input>> {
    let root = doc.root_element();

    let order_date = root.attribute(ORDER_DATE);
    let ship_to = Address::new(section(root, SHIP_TO)?);
    let bill_to = Address::new(section(root, BILL_TO)?);
    let comment = first_child(root, COMMENT).map(element_text);

    let items: Vec<_> = section(root, ITEMS)?
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == ITEM)
        .map(LineItem::new)
        .collect();
    debug!("load: {} items, order_date={:?}", items.len(), order_date);

    Ok(PurchaseOrder {
        ship_to,
        bill_to,
        items,
        order_date,
        comment,
    })
}

fn section<'a, 'input>(root: Node<'a, 'input>, tag: &str) -> DomainResult<Node<'a, 'input>> {
    first_child(root, tag).ok_or_else(|| DomainError::MissingSection(tag.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_unclosed_element() {
        let err = parse("<purchaseOrder><shipTo>", false).unwrap_err();
        assert!(matches!(err, DomainError::MalformedDocument(_)));
    }

    #[test]
    fn parse_rejects_dtd_unless_allowed() {
        let xml = "<!DOCTYPE purchaseOrder><purchaseOrder/>";
        assert!(parse(xml, false).is_err());
        assert!(parse(xml, true).is_ok());
    }

    #[test]
    fn load_reports_first_missing_section() {
        let doc = parse("<purchaseOrder><items/></purchaseOrder>", false).unwrap();
        let err = load(&doc).unwrap_err();
        assert!(matches!(err, DomainError::MissingSection(ref s) if s == SHIP_TO));
    }

    #[test]
    fn load_requires_bill_to() {
        let doc = parse("<purchaseOrder><shipTo/><items/></purchaseOrder>", false).unwrap();
        let err = load(&doc).unwrap_err();
        assert!(matches!(err, DomainError::MissingSection(ref s) if s == BILL_TO));
    }

    #[test]
    fn load_skips_non_item_children_of_items() {
        let doc = parse(
            "<purchaseOrder><shipTo/><billTo/><items><note/><item/>text<item/></items></purchaseOrder>",
            false,
        )
        .unwrap();
        let order = load(&doc).unwrap();
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn load_reads_comment_after_leading_xml_comment() {
        let doc = parse(
            "<purchaseOrder><shipTo/><billTo/><comment><!-- note -->Rush</comment><items/></purchaseOrder>",
            false,
        )
        .unwrap();
        let order = load(&doc).unwrap();
        assert_eq!(order.comment.as_deref(), Some("Rush"));
    }

    #[test]
    fn load_does_not_search_nested_sections() {
        let doc = parse(
            "<purchaseOrder><wrapper><shipTo/></wrapper><billTo/><items/></purchaseOrder>",
            false,
        )
        .unwrap();
        assert!(matches!(load(&doc), Err(DomainError::MissingSection(_))));
    }
}
