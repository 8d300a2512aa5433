// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Receipt fixtures.
//
// Builds the narrow monospace markup a POS till renders for thermal
// printing: header, line items, totals, footer. Timestamps are injected by
// the caller so repeated runs and tests can pin them.

use chrono::{DateTime, Utc};

/// One line item on a receipt.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price in the till's currency.
    pub price: f64,
}

impl OrderItem {
    /// Extended price for the line (quantity times unit price).
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// An order as the POS hands it to the print pipeline.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_number: String,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub customer: String,
}

/// The fixed order the integration probes submit.
pub fn sample_order(now: DateTime<Utc>) -> Order {
    Order {
        order_number: "TEST001".into(),
        timestamp: now,
        items: vec![
            OrderItem {
                name: "Coffee".into(),
                quantity: 2,
                price: 5.50,
            },
            OrderItem {
                name: "Sandwich".into(),
                quantity: 1,
                price: 12.99,
            },
        ],
        subtotal: 24.49,
        tax: 2.45,
        total: 26.94,
        customer: "Test Customer".into(),
    }
}

/// Render an order as 300px-wide monospace receipt markup.
pub fn receipt_html(order: &Order) -> String {
    let mut html = String::new();
    html.push_str(r#"<div style="width: 300px; font-family: monospace; font-size: 12px;">"#);
    html.push_str(r#"<div style="text-align: center; font-weight: bold;">TEST RESTAURANT</div>"#);
    html.push_str(r#"<div style="text-align: center;">123 Main Street<br>Test City, TS 12345</div>"#);
    html.push_str("<hr>");
    html.push_str(&format!("<div><strong>Order #{}</strong></div>", order.order_number));
    html.push_str(&format!(
        "<div>{}</div>",
        order.timestamp.format("%d %b %Y, %l:%M %p")
    ));
    html.push_str("<hr>");
    for item in &order.items {
        html.push_str(&format!(
            "<div>{}x {} - ${:.2}</div>",
            item.quantity,
            item.name,
            item.line_total()
        ));
    }
    html.push_str("<hr>");
    html.push_str(&format!("<div>Subtotal: ${:.2}</div>", order.subtotal));
    html.push_str(&format!("<div>Tax: ${:.2}</div>", order.tax));
    html.push_str(&format!("<div><strong>Total: ${:.2}</strong></div>", order.total));
    html.push_str("<hr>");
    html.push_str(r#"<div style="text-align: center;">Thank you for your business!</div>"#);
    html.push_str("</div>");
    html
}

/// The standalone receipt the silent-print suite renders to a 384px png,
/// sized for 80mm thermal paper.
pub fn receipt_template(now: DateTime<Utc>) -> String {
    let mut html = String::new();
    html.push_str(
        r#"<div style="width: 300px; font-family: monospace; text-align: center; padding: 20px;">"#,
    );
    html.push_str("<h2>RECEIPT</h2><hr>");
    html.push_str(&format!("<p>Date: {}</p>", now.format("%Y-%m-%d")));
    html.push_str(&format!("<p>Time: {}</p>", now.format("%H:%M:%S")));
    html.push_str("<hr>");
    html.push_str(r#"<div style="text-align: left;">"#);
    html.push_str("<p>1x Test Product A.........$10.00</p>");
    html.push_str("<p>2x Test Product B.........$25.00</p>");
    html.push_str("<p>1x Test Product C...........$5.00</p>");
    html.push_str("</div><hr>");
    html.push_str("<p><strong>Total: $40.00</strong></p><hr>");
    html.push_str("<p>Thank you for your purchase!</p>");
    html.push_str("<p>Visit us again soon!</p>");
    html.push_str("</div>");
    html
}
