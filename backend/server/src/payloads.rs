//! Request bodies. Numeric fields are read wide and range-checked in
//! [`crate::utils`] so bad values surface as `Invalid input`, not as a parse
//! failure.
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub quantity: i64,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    /// Absent leaves the image alone, `null` or `""` clears it.
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub cart_items: Vec<SaleCartItem>,
}

/// Extra cart fields sent by clients (name, price, ...) are ignored; the
/// catalog is authoritative.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleCartItem {
    pub id: String,
    pub cart_quantity: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAdd {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Deserialize)]
pub struct CartQuantity {
    pub quantity: i64,
}

#[derive(Deserialize, Default)]
pub struct ProductSearch {
    pub search: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
