use serde::Serialize;

use crate::{error::CartError, products::Product, sales::SaleLine};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub cart_quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    Set,
    Removed,
    /// Asked for more than the stock; the line now holds all of it.
    Capped(u32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let held = self
            .line(&product.id)
            .map(|line| line.cart_quantity)
            .unwrap_or(0);
        let wanted = held.saturating_add(quantity);

        if wanted > product.quantity {
            return Err(CartError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested: wanted,
            });
        }

        match self.lines.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => {
                line.product = product.clone();
                line.cart_quantity = wanted;
            }
            None => self.lines.push(CartLine {
                product: product.clone(),
                cart_quantity: quantity,
            }),
        }

        Ok(())
    }

    /// Sets a line's quantity. Zero or less removes the line, more than the
    /// stock known to the line caps at that stock.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<CartUpdate, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product.id == product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        if quantity <= 0 {
            self.lines.remove(index);
            return Ok(CartUpdate::Removed);
        }

        let line = &mut self.lines[index];
        let stock = line.product.quantity;

        if quantity > i64::from(stock) {
            line.cart_quantity = stock;
            return Ok(CartUpdate::Capped(stock));
        }

        line.cart_quantity = quantity as u32;
        Ok(CartUpdate::Set)
    }

    pub fn remove(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);

        if self.lines.len() == before {
            return Err(CartError::NotInCart(product_id.to_string()));
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.product.price * f64::from(line.cart_quantity))
            .sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.cart_quantity).sum()
    }

    pub fn sale_lines(&self) -> Vec<SaleLine> {
        self.lines
            .iter()
            .map(|line| SaleLine::new(&line.product.id, line.cart_quantity))
            .collect()
    }

    fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }
}
