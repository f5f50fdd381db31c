use std::fmt::Write;

use crate::sales::Sale;

const STORE_NAME: &str = "RetailFlow";
const WIDTH: usize = 40;

pub fn render_receipt(sale: &Sale) -> String {
    let mut out = String::new();
    let rule = "-".repeat(WIDTH);

    let _ = writeln!(out, "{STORE_NAME:^WIDTH$}");
    let _ = writeln!(out, "{:^WIDTH$}", "Sale Receipt");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Sale ID: {}", sale.id);
    let _ = writeln!(out, "Date: {}", sale.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Cashier: {}", sale.cashier_id);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Items Purchased:");

    for item in &sale.items {
        let _ = writeln!(out, "{} (SKU: {})", item.name, item.sku);
        let each = format!("  {} x ${:.2}", item.quantity, item.price);
        let line = format!("${:.2}", item.line_total());
        let _ = writeln!(out, "{each}{line:>pad$}", pad = WIDTH.saturating_sub(each.len()));
    }

    let _ = writeln!(out, "{rule}");
    amount_row(&mut out, "Subtotal:", sale.subtotal);
    amount_row(
        &mut out,
        &format!("Tax ({:.0}%):", sale.tax_rate * 100.0),
        sale.tax_amount,
    );
    amount_row(&mut out, "Total:", sale.total);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:^WIDTH$}", "Thank you for your purchase!");

    out
}

fn amount_row(out: &mut String, label: &str, amount: f64) {
    let value = format!("${amount:.2}");
    let _ = writeln!(out, "{label}{value:>pad$}", pad = WIDTH.saturating_sub(label.len()));
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::sales::SaleItem;

    #[test]
    fn renders_items_and_totals() {
        let sale = Sale {
            id: "sale-1".to_string(),
            items: vec![SaleItem {
                product_id: "p1".to_string(),
                name: "Green Tea".to_string(),
                sku: "TEA-001".to_string(),
                price: 2.5,
                quantity: 3,
            }],
            subtotal: 7.5,
            tax_rate: 0.10,
            tax_amount: 0.75,
            total: 8.25,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 14, 30, 0).unwrap(),
            cashier_id: "casey".to_string(),
        };

        let receipt = render_receipt(&sale);

        assert!(receipt.contains("RetailFlow"));
        assert!(receipt.contains("Sale ID: sale-1"));
        assert!(receipt.contains("Date: 2025-03-01 14:30:00 UTC"));
        assert!(receipt.contains("Cashier: casey"));
        assert!(receipt.contains("Green Tea (SKU: TEA-001)"));
        assert!(receipt.contains("3 x $2.50"));
        assert!(receipt.contains("$7.50"));
        assert!(receipt.contains("Tax (10%):"));
        assert!(receipt.contains("$0.75"));
        assert!(receipt.contains("$8.25"));
        assert!(receipt.trim_end().ends_with("Thank you for your purchase!"));
    }
}
