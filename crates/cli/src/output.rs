//! Terminal output.
//!
//! Formatting is kept in pure functions so it can be tested; the `print`
//! helpers are the only places that write to stdout or stderr.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use shopfront_core::round_cents;
use shopfront_storefront::models::{CartLine, Identity, OrderSummary, Product};
use shopfront_storefront::navigation::Route;
use shopfront_storefront::services::{Notification, Severity};

/// Format a decimal amount as dollars.
pub fn money(amount: Decimal) -> String {
    format!("${:.2}", round_cents(amount))
}

/// One line per product: id, name, price and stock.
pub fn product_row(product: &Product) -> String {
    let mut row = format!("{:>3}  {:<32} {:>10}", product.id, product.name, product.price);
    if let Some(old) = product.old_price.filter(|_| product.is_on_sale()) {
        let _ = write!(row, "  (was {old})");
    }
    if !product.in_stock {
        row.push_str("  [out of stock]");
    }
    row
}

/// Full product detail.
pub fn product_detail(product: &Product, category_name: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", product.name, product.id);
    let _ = writeln!(out, "{}", product.description);
    let _ = write!(out, "Price: {}", product.price);
    if let Some(old) = product.old_price.filter(|_| product.is_on_sale()) {
        let _ = write!(out, " (was {old})");
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "Rating: {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    let _ = writeln!(
        out,
        "Category: {}",
        category_name.unwrap_or_else(|| product.category.as_str())
    );
    out.push_str(if product.in_stock {
        "In stock"
    } else {
        "Out of stock"
    });
    out
}

/// Cart lines followed by the order summary.
pub fn cart(lines: &[CartLine], summary: &OrderSummary) -> String {
    if lines.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = String::new();
    for line in lines {
        let _ = writeln!(
            out,
            "{:>3}  {:<32} {:>3} x {:>10} = {:>10}",
            line.product.id,
            line.product.name,
            line.quantity,
            line.product.price,
            money(line.line_total())
        );
    }
    out.push_str(&summary_block(summary));
    out
}

/// Subtotal, shipping, tax and total.
pub fn summary_block(summary: &OrderSummary) -> String {
    let shipping = if summary.shipping.is_zero() {
        "Free".to_string()
    } else {
        money(summary.shipping)
    };
    format!(
        "Subtotal ({} items): {}\nShipping: {}\nTax: {}\nTotal: {}",
        summary.item_count,
        money(summary.subtotal),
        shipping,
        money(summary.tax),
        money(summary.total)
    )
}

pub fn identity(identity: &Identity) -> String {
    format!("{} <{}> (id {})", identity.name, identity.email, identity.id)
}

pub fn notification(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Info => "*",
        Severity::Destructive => "!",
    };
    format!(
        "{marker} {}: {}",
        notification.title, notification.description
    )
}

#[allow(clippy::print_stdout)]
pub fn print(text: &str) {
    println!("{text}");
}

#[allow(clippy::print_stderr)]
pub fn error(message: &str) {
    eprintln!("error: {message}");
}

pub fn notifications(notifications: &[Notification]) {
    for n in notifications {
        print(&notification(n));
    }
}

pub fn navigation(route: &Route) {
    print(&format!("-> {route}"));
}
