//! Tests for document loading and the typed order records

use rstest::rstest;

use poreport::domain::{load, parse, DomainError};
use poreport::util::testing::{init_test_setup, SAMPLE_ORDER};

fn order_xml(ship_to: &str, comment: &str, items: &str) -> String {
    format!(
        r#"<purchaseOrder>
  {ship_to}
  <billTo><name>Bob</name></billTo>
  {comment}
  {items}
</purchaseOrder>"#
    )
}

// ============================================================
// Reference document
// ============================================================

#[test]
fn given_reference_order_when_loading_then_all_fields_are_typed() {
    init_test_setup();
    let doc = parse(SAMPLE_ORDER, false).unwrap();

    let order = load(&doc).unwrap();

    assert_eq!(order.order_date, Some("2024-01-15"));
    assert_eq!(order.comment.as_deref(), Some("Rush order"));
    assert_eq!(order.ship_to.name().as_deref(), Some("Alice"));
    assert_eq!(order.ship_to.street().as_deref(), Some("1 Main St"));
    assert_eq!(order.ship_to.city().as_deref(), Some("Springfield"));
    assert_eq!(order.ship_to.postal_code().unwrap(), Some(62704.0));
    assert_eq!(order.bill_to.name().as_deref(), Some("Bob"));
    assert_eq!(order.bill_to.postal_code().unwrap(), Some(62705.0));

    assert_eq!(order.items.len(), 2);
    let first = &order.items[0];
    assert_eq!(first.product().as_deref(), Some("Widget"));
    assert_eq!(first.quantity().unwrap(), 3);
    assert_eq!(first.price().unwrap(), 9.99);
    let second = &order.items[1];
    assert_eq!(second.product().as_deref(), Some("Gadget"));
    assert_eq!(second.quantity().unwrap(), 1);
    assert_eq!(second.price().unwrap(), 19.5);
}

#[test]
fn given_reference_order_when_validating_then_succeeds() {
    let doc = parse(SAMPLE_ORDER, false).unwrap();
    let order = load(&doc).unwrap();
    assert!(order.validate().is_ok());
}

// ============================================================
// Structural errors
// ============================================================

#[rstest]
#[case::ship_to("<purchaseOrder><billTo/><items/></purchaseOrder>", "shipTo")]
#[case::bill_to("<purchaseOrder><shipTo/><items/></purchaseOrder>", "billTo")]
#[case::items("<purchaseOrder><shipTo/><billTo/></purchaseOrder>", "items")]
fn given_missing_section_when_loading_then_fails_with_its_name(
    #[case] xml: &str,
    #[case] expected: &str,
) {
    let doc = parse(xml, false).unwrap();

    let err = load(&doc).unwrap_err();

    assert!(
        matches!(err, DomainError::MissingSection(ref name) if name == expected),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case::empty("")]
#[case::not_xml("purchase order")]
#[case::unclosed("<purchaseOrder><shipTo></purchaseOrder>")]
fn given_malformed_input_when_parsing_then_fails(#[case] xml: &str) {
    let err = parse(xml, false).unwrap_err();
    assert!(matches!(err, DomainError::MalformedDocument(_)));
}

#[test]
fn given_minimal_sections_when_loading_then_addresses_exist_with_absent_fields() {
    let doc = parse("<purchaseOrder><shipTo/><billTo/><items/></purchaseOrder>", false).unwrap();

    let order = load(&doc).unwrap();

    assert_eq!(order.ship_to.name(), None);
    assert_eq!(order.bill_to.city(), None);
    assert_eq!(order.order_date, None);
}

// ============================================================
// Items
// ============================================================

#[test]
fn given_empty_items_section_when_loading_then_items_are_empty() {
    let xml = order_xml("<shipTo/>", "", "<items></items>");
    let doc = parse(&xml, false).unwrap();

    let order = load(&doc).unwrap();

    assert!(order.items.is_empty());
}

#[test]
fn given_items_when_loading_then_document_order_is_kept() {
    let xml = order_xml(
        "<shipTo/>",
        "",
        "<items><item><product>a</product></item><item><product>b</product></item><item><product>c</product></item></items>",
    );
    let doc = parse(&xml, false).unwrap();

    let order = load(&doc).unwrap();

    let products: Vec<_> = order.items.iter().map(|i| i.product().unwrap_or_default()).collect();
    assert_eq!(products, ["a", "b", "c"]);
}

#[test]
fn given_non_numeric_quantity_when_reading_then_only_quantity_fails() {
    let xml = order_xml(
        "<shipTo/>",
        "",
        "<items><item><product>Widget</product><quantity>abc</quantity><price>1.0</price></item></items>",
    );
    let doc = parse(&xml, false).unwrap();

    // Loading does not look at numeric fields
    let order = load(&doc).unwrap();
    let item = &order.items[0];

    let err = item.quantity().unwrap_err();
    assert!(matches!(
        err,
        DomainError::MalformedNumber { ref field, ref value } if field == "quantity" && value == "abc"
    ));
    assert_eq!(item.product().as_deref(), Some("Widget"));
    assert_eq!(item.price().unwrap(), 1.0);
    assert!(matches!(order.validate(), Err(DomainError::MalformedNumber { .. })));
}

#[rstest]
#[case::no_element("<item><price>1</price></item>")]
#[case::empty_element("<item><quantity></quantity><price>1</price></item>")]
#[case::comment_only("<item><quantity><!-- tbd --></quantity><price>1</price></item>")]
fn given_missing_quantity_when_reading_then_fails_with_missing_field(#[case] item: &str) {
    let xml = order_xml("<shipTo/>", "", &format!("<items>{item}</items>"));
    let doc = parse(&xml, false).unwrap();
    let order = load(&doc).unwrap();

    let err = order.items[0].quantity().unwrap_err();

    assert!(matches!(err, DomainError::MissingField(ref f) if f == "quantity"));
}

#[rstest]
#[case::spaces("<quantity>   </quantity>")]
#[case::newline("<quantity>\n  </quantity>")]
fn given_whitespace_quantity_when_reading_then_fails_with_malformed_number(#[case] quantity: &str) {
    let xml = order_xml(
        "<shipTo/>",
        "",
        &format!("<items><item>{quantity}<price>1</price></item></items>"),
    );
    let doc = parse(&xml, false).unwrap();
    let order = load(&doc).unwrap();

    let err = order.items[0].quantity().unwrap_err();

    assert!(
        matches!(err, DomainError::MalformedNumber { ref field, .. } if field == "quantity"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn given_quantity_after_xml_comment_when_reading_then_number_is_parsed() {
    let xml = order_xml(
        "<shipTo/>",
        "",
        "<items><item><quantity><!-- n -->3</quantity><price><!-- eur -->2.5</price></item></items>",
    );
    let doc = parse(&xml, false).unwrap();
    let order = load(&doc).unwrap();

    assert_eq!(order.items[0].quantity().unwrap(), 3);
    assert_eq!(order.items[0].price().unwrap(), 2.5);
}

// ============================================================
// Optional fields
// ============================================================

#[test]
fn given_ship_to_without_zip_when_reading_then_postal_code_is_absent() {
    let xml = order_xml(
        "<shipTo><name>Alice</name><city>Springfield</city></shipTo>",
        "",
        "<items/>",
    );
    let doc = parse(&xml, false).unwrap();
    let order = load(&doc).unwrap();

    assert_eq!(order.ship_to.postal_code().unwrap(), None);
    assert_eq!(order.ship_to.city().as_deref(), Some("Springfield"));
}

#[test]
fn given_non_numeric_zip_when_reading_then_fails_with_malformed_number() {
    let xml = order_xml("<shipTo><zip>SW1A 1AA</zip></shipTo>", "", "<items/>");
    let doc = parse(&xml, false).unwrap();
    let order = load(&doc).unwrap();

    assert!(matches!(
        order.ship_to.postal_code(),
        Err(DomainError::MalformedNumber { .. })
    ));
}

#[rstest]
#[case::empty_pair("<comment></comment>", Some(""))]
#[case::self_closing("<comment/>", Some(""))]
#[case::text("<comment>Leave at door</comment>", Some("Leave at door"))]
#[case::after_xml_comment("<comment><!-- note -->Rush</comment>", Some("Rush"))]
#[case::split_by_xml_comment("<comment>Rush<!-- x --> order</comment>", Some("Rush order"))]
#[case::only_xml_comment("<comment><!-- note --></comment>", Some(""))]
#[case::absent("", None)]
fn given_comment_variant_when_loading_then_presence_is_preserved(
    #[case] comment: &str,
    #[case] expected: Option<&str>,
) {
    let xml = order_xml("<shipTo/>", comment, "<items/>");
    let doc = parse(&xml, false).unwrap();

    let order = load(&doc).unwrap();

    assert_eq!(order.comment.as_deref(), expected);
}

// ============================================================
// Concurrency
// ============================================================

#[test]
fn given_loaded_order_when_read_from_threads_then_results_agree() {
    let doc = parse(SAMPLE_ORDER, false).unwrap();
    let order = load(&doc).unwrap();

    let totals: Vec<f64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    order
                        .items
                        .iter()
                        .map(|i| i.quantity().unwrap() as f64 * i.price().unwrap())
                        .sum::<f64>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(totals.windows(2).all(|w| w[0] == w[1]));
}
