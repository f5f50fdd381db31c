use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::SaleError, products::Product};

pub const TAX_RATE: f64 = 0.10;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
}

impl SaleItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub items: Vec<SaleItem>,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub timestamp: DateTime<Utc>,
    /// Username of the seller.
    pub cashier_id: String,
}

/// One requested product and how many of it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: u32,
}

impl SaleLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Validates `lines` against `products` and builds the sale.
///
/// Returns the catalog with stock already decremented alongside the sale;
/// nothing is persisted here. Lines are applied in order against a working
/// copy, so two lines for the same product draw from the same stock. Prices
/// come from the catalog.
pub fn checkout(
    products: &[Product],
    lines: &[SaleLine],
    cashier: &str,
    now: DateTime<Utc>,
) -> Result<(Vec<Product>, Sale), SaleError> {
    if lines.is_empty() {
        return Err(SaleError::EmptyCart);
    }

    let mut products = products.to_vec();
    let mut items = Vec::with_capacity(lines.len());
    let mut subtotal = 0.0;

    for line in lines {
        let product = products
            .iter_mut()
            .find(|p| p.id == line.product_id)
            .ok_or_else(|| SaleError::ProductNotFound(line.product_id.clone()))?;

        if product.quantity < line.quantity {
            return Err(SaleError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested: line.quantity,
            });
        }

        product.quantity -= line.quantity;

        let item = SaleItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
            quantity: line.quantity,
        };
        subtotal += item.line_total();
        items.push(item);
    }

    let tax_amount = subtotal * TAX_RATE;
    let total = subtotal + tax_amount;

    // Non-finite amounts serialize as null and would poison sales.json.
    if !(subtotal.is_finite() && tax_amount.is_finite() && total.is_finite()) {
        return Err(SaleError::AmountOutOfRange);
    }

    let sale = Sale {
        id: Uuid::new_v4().to_string(),
        items,
        subtotal,
        tax_rate: TAX_RATE,
        tax_amount,
        total,
        timestamp: now,
        cashier_id: cashier.to_string(),
    };

    Ok((products, sale))
}

/// Newest first.
pub fn sort_newest_first(sales: &mut [Sale]) {
    sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("Green Tea", "TEA-001", 2.5, 10, None),
            Product::new("Coffee Beans", "COF-001", 12.0, 2, None),
        ]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn computes_totals_and_decrements_stock() {
        let products = catalog();
        let lines = [
            SaleLine::new(&products[0].id, 4),
            SaleLine::new(&products[1].id, 1),
        ];

        let (updated, sale) = checkout(&products, &lines, "casey", Utc::now()).unwrap();

        assert_eq!(updated[0].quantity, 6);
        assert_eq!(updated[1].quantity, 1);
        assert!(close(sale.subtotal, 22.0));
        assert!(close(sale.tax_amount, 2.2));
        assert!(close(sale.total, 24.2));
        assert_eq!(sale.tax_rate, TAX_RATE);
        assert_eq!(sale.cashier_id, "casey");
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.items[1].sku, "COF-001");
    }

    #[test]
    fn input_catalog_is_untouched() {
        let products = catalog();
        let lines = [SaleLine::new(&products[0].id, 1)];

        checkout(&products, &lines, "casey", Utc::now()).unwrap();

        assert_eq!(products[0].quantity, 10);
    }

    #[test]
    fn rejects_empty_cart() {
        assert_eq!(
            checkout(&catalog(), &[], "casey", Utc::now()),
            Err(SaleError::EmptyCart)
        );
    }

    #[test]
    fn rejects_unknown_product() {
        let lines = [SaleLine::new("missing", 1)];

        assert_eq!(
            checkout(&catalog(), &lines, "casey", Utc::now()),
            Err(SaleError::ProductNotFound("missing".to_string()))
        );
    }

    #[test]
    fn rejects_insufficient_stock() {
        let products = catalog();
        let lines = [SaleLine::new(&products[1].id, 3)];

        let err = checkout(&products, &lines, "casey", Utc::now()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Not enough stock for Coffee Beans. Available: 2, Requested: 3"
        );
    }

    #[test]
    fn repeated_lines_share_stock() {
        let products = catalog();
        let lines = [
            SaleLine::new(&products[1].id, 2),
            SaleLine::new(&products[1].id, 1),
        ];

        assert_eq!(
            checkout(&products, &lines, "casey", Utc::now()),
            Err(SaleError::InsufficientStock {
                name: "Coffee Beans".to_string(),
                available: 0,
                requested: 1,
            })
        );
    }

    #[test]
    fn rejects_totals_that_overflow() {
        let products = vec![Product::new("Gold Bar", "GLD-001", 1e308, 10, None)];
        let lines = [SaleLine::new(&products[0].id, 2)];

        assert_eq!(
            checkout(&products, &lines, "casey", Utc::now()),
            Err(SaleError::AmountOutOfRange)
        );
    }

    #[test]
    fn sorts_newest_first() {
        let products = catalog();
        let lines = [SaleLine::new(&products[0].id, 1)];
        let earlier = Utc::now() - chrono::Duration::hours(1);

        let (_, old) = checkout(&products, &lines, "casey", earlier).unwrap();
        let (_, new) = checkout(&products, &lines, "casey", Utc::now()).unwrap();
        let mut sales = vec![old.clone(), new.clone()];

        sort_newest_first(&mut sales);

        assert_eq!(sales[0].id, new.id);
        assert_eq!(sales[1].id, old.id);
    }
}
