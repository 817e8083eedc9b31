//! Domain entities: typed views over a parsed order document
//!
//! Records borrow their element from the document and compute every field on
//! read, so a bad number is only reported when that field is asked for.

use std::borrow::Cow;

use roxmltree::Node;

use crate::domain::error::DomainResult;
use crate::domain::fields::Fields;

/// Postal address (`<shipTo>` / `<billTo>`). Every field is optional.
#[derive(Debug, Clone, Copy)]
pub struct Address<'a, 'input> {
    fields: Fields<'a, 'input>,
}

impl<'a, 'input> Address<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self {
            fields: Fields::new(node),
        }
    }

    pub fn name(&self) -> Option<Cow<'a, str>> {
        self.fields.text("name")
    }

    pub fn street(&self) -> Option<Cow<'a, str>> {
        self.fields.text("street")
    }

    pub fn city(&self) -> Option<Cow<'a, str>> {
        self.fields.text("city")
    }

    /// `<zip>` as a number; `Ok(None)` when the element is missing.
    pub fn postal_code(&self) -> DomainResult<Option<f64>> {
        self.fields.float("zip")
    }
}

/// One `<item>` of the order. Quantity and price must be present and numeric.
#[derive(Debug, Clone, Copy)]
pub struct LineItem<'a, 'input> {
    fields: Fields<'a, 'input>,
}

impl<'a, 'input> LineItem<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self {
            fields: Fields::new(node),
        }
    }

    pub fn product(&self) -> Option<Cow<'a, str>> {
        self.fields.text("product")
    }

    pub fn quantity(&self) -> DomainResult<i64> {
        self.fields.required_int("quantity")
    }

    pub fn price(&self) -> DomainResult<f64> {
        self.fields.required_float("price")
    }
}

/// The assembled order. Built once by the loader, never mutated.
#[derive(Debug, Clone)]
pub struct PurchaseOrder<'a, 'input> {
    pub ship_to: Address<'a, 'input>,
    pub bill_to: Address<'a, 'input>,
    pub items: Vec<LineItem<'a, 'input>>,
    pub order_date: Option<&'a str>,
    pub comment: Option<Cow<'a, str>>,
}

impl PurchaseOrder<'_, '_> {
    /// Read every numeric field once, failing on the first bad one.
    ///
    /// Loading only checks structure; this is the eager counterpart for
    /// callers that want all field errors up front.
    pub fn validate(&self) -> DomainResult<()> {
        self.ship_to.postal_code()?;
        self.bill_to.postal_code()?;
        for item in &self.items {
            item.quantity()?;
            item.price()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;

    #[test]
    fn address_reads_all_fields() {
        let doc = roxmltree::Document::parse(
            "<shipTo><name>Ann</name><street>Elm 1</street><city>Oslo</city><zip>0150</zip></shipTo>",
        )
        .unwrap();
        let address = Address::new(doc.root_element());

        assert_eq!(address.name().as_deref(), Some("Ann"));
        assert_eq!(address.street().as_deref(), Some("Elm 1"));
        assert_eq!(address.city().as_deref(), Some("Oslo"));
        assert_eq!(address.postal_code().unwrap(), Some(150.0));
    }

    #[test]
    fn line_item_missing_price_is_an_error() {
        let doc = roxmltree::Document::parse("<item><product>Bolt</product><quantity>2</quantity></item>")
            .unwrap();
        let item = LineItem::new(doc.root_element());

        assert_eq!(item.quantity().unwrap(), 2);
        assert!(matches!(item.price(), Err(DomainError::MissingField(ref f)) if f == "price"));
    }

    #[test]
    fn line_item_without_product_still_has_numbers() {
        let doc = roxmltree::Document::parse("<item><quantity>1</quantity><price>0.5</price></item>")
            .unwrap();
        let item = LineItem::new(doc.root_element());

        assert_eq!(item.product(), None);
        assert_eq!(item.price().unwrap(), 0.5);
    }

    #[test]
    fn reads_are_repeatable() {
        let doc = roxmltree::Document::parse("<item><quantity>x</quantity><price>1</price></item>")
            .unwrap();
        let item = LineItem::new(doc.root_element());

        assert!(item.quantity().is_err());
        assert!(item.quantity().is_err());
        assert_eq!(item.price().unwrap(), item.price().unwrap());
    }
}
