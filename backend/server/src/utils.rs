use axum::body::Bytes;
use records::{MAX_PRICE, Role, SaleLine};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::AppError::{self, Invalid, MalformedPayload},
    payloads::{NewProduct, NewSale, NewUser, ProductUpdate, UserUpdate},
};

pub fn parse<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Malformed payload: {e}");
        MalformedPayload
    })
}

#[derive(Default)]
struct Checks {
    errors: Vec<String>,
}

impl Checks {
    fn min_len(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.errors
                .push(format!("{field} must be at least {min} characters"));
        }
        self
    }

    fn check(&mut self, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(message.to_string());
        }
        self
    }

    fn finish(&mut self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            return Ok(());
        }

        Err(Invalid(std::mem::take(&mut self.errors)))
    }
}

fn parse_role(role: &str) -> Option<Role> {
    match role {
        "admin" => Some(Role::Admin),
        "cashier" => Some(Role::Cashier),
        _ => None,
    }
}

/// New accounts are always cashiers.
pub fn validate_new_user(user: &NewUser) -> Result<(), AppError> {
    Checks::default()
        .min_len("name", &user.name, 2)
        .min_len("username", &user.username, 3)
        .min_len("password", &user.password, 6)
        .check(user.role == "cashier", "role must be 'cashier'")
        .finish()
}

pub fn validate_user_update(update: &UserUpdate) -> Result<Option<Role>, AppError> {
    let mut checks = Checks::default();

    if let Some(name) = &update.name {
        checks.min_len("name", name, 2);
    }
    if let Some(password) = &update.password {
        checks.min_len("password", password, 6);
    }

    let role = update.role.as_deref().map(parse_role);
    checks.check(
        !matches!(role, Some(None)),
        "role must be 'admin' or 'cashier'",
    );
    checks.finish()?;

    Ok(role.flatten())
}

fn check_price(checks: &mut Checks, price: f64) {
    checks.check(price.is_finite() && price > 0.0, "price must be positive");
    checks.check(price.is_nan() || price <= MAX_PRICE, "price must be at most 1000000");
}

fn check_stock(checks: &mut Checks, quantity: i64) {
    checks.check(
        (0..=i64::from(u32::MAX)).contains(&quantity),
        "quantity must be a non-negative integer",
    );
}

fn check_image_url(checks: &mut Checks, url: Option<&str>) {
    if let Some(url) = url {
        checks.check(
            url.is_empty() || is_http_url(url),
            "imageUrl must be an http(s) URL or empty",
        );
    }
}

pub fn validate_new_product(product: &NewProduct) -> Result<(), AppError> {
    let mut checks = Checks::default();
    checks
        .min_len("name", &product.name, 3)
        .min_len("sku", &product.sku, 3);
    check_price(&mut checks, product.price);
    check_stock(&mut checks, product.quantity);
    check_image_url(&mut checks, product.image_url.as_deref());
    checks.finish()
}

pub fn validate_product_update(update: &ProductUpdate) -> Result<(), AppError> {
    let mut checks = Checks::default();

    if let Some(name) = &update.name {
        checks.min_len("name", name, 3);
    }
    if let Some(sku) = &update.sku {
        checks.min_len("sku", sku, 3);
    }
    if let Some(price) = update.price {
        check_price(&mut checks, price);
    }
    if let Some(quantity) = update.quantity {
        check_stock(&mut checks, quantity);
    }
    if let Some(url) = &update.image_url {
        check_image_url(&mut checks, url.as_deref());
    }

    checks.finish()
}

pub fn sale_lines(sale: &NewSale) -> Result<Vec<SaleLine>, AppError> {
    let mut checks = Checks::default();
    checks.check(!sale.cart_items.is_empty(), "cartItems must not be empty");

    let lines = sale
        .cart_items
        .iter()
        .filter_map(|item| match positive_quantity(item.cart_quantity) {
            Some(quantity) => Some(SaleLine::new(&item.id, quantity)),
            None => {
                checks.check(false, "cartQuantity must be a positive integer");
                None
            }
        })
        .collect();

    checks.finish()?;
    Ok(lines)
}

pub fn cart_quantity(quantity: i64) -> Result<u32, AppError> {
    positive_quantity(quantity)
        .ok_or_else(|| Invalid(vec!["quantity must be a positive integer".to_string()]))
}

fn positive_quantity(quantity: i64) -> Option<u32> {
    u32::try_from(quantity).ok().filter(|q| *q > 0)
}

pub fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !url.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
