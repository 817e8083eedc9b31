//! Human-readable rendering of a loaded order and of the document outline.

use roxmltree::Node;
use termtree::Tree;

use crate::config::Settings;
use crate::domain::{Address, DomainResult, PurchaseOrder};

/// Render the full order report.
///
/// Every typed field is read exactly once; the first field error aborts rendering.
pub fn render_report(order: &PurchaseOrder, settings: &Settings) -> DomainResult<String> {
    let missing = settings.missing_placeholder.as_str();
    let mut out = String::new();

    out.push_str(&format!("Order date: {}\n", order.order_date.unwrap_or(missing)));
    out.push_str(&format!("Comment: {}\n", order.comment.as_deref().unwrap_or(missing)));
    render_address(&mut out, "Ship to", &order.ship_to, missing)?;
    render_address(&mut out, "Bill to", &order.bill_to, missing)?;

    out.push_str("Items:\n");
    for (i, item) in order.items.iter().enumerate() {
        out.push_str(&format!("  Item {}:\n", i + 1));
        out.push_str(&format!("    Product: {}\n", item.product().as_deref().unwrap_or(missing)));
        out.push_str(&format!("    Quantity: {}\n", item.quantity()?));
        out.push_str(&format!(
            "    Price: {}{}\n",
            settings.currency_symbol,
            format_number(item.price()?)
        ));
    }
    Ok(out)
}

fn render_address(
    out: &mut String,
    label: &str,
    address: &Address,
    missing: &str,
) -> DomainResult<()> {
    let postal_code = address
        .postal_code()?
        .map(format_number)
        .unwrap_or_else(|| missing.to_string());

    out.push_str(&format!("{}:\n", label));
    out.push_str(&format!("  Name: {}\n", address.name().as_deref().unwrap_or(missing)));
    out.push_str(&format!("  Street: {}\n", address.street().as_deref().unwrap_or(missing)));
    out.push_str(&format!("  City: {}\n", address.city().as_deref().unwrap_or(missing)));
    out.push_str(&format!("  Postal code: {}\n", postal_code));
    Ok(())
}

/// Shortest round-trip form, whole numbers keep a trailing `.0`.
fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

/// Tag-name outline of `node`, `depth` levels of element children deep.
pub fn render_outline(node: Node, depth: usize) -> Tree<String> {
    let leaves: Vec<_> = if depth == 0 {
        Vec::new()
    } else {
        node.children()
            .filter(|n| n.is_element())
            .map(|n| render_outline(n, depth - 1))
            .collect()
    };
    Tree::new(node.tag_name().name().to_string()).with_leaves(leaves)
}
