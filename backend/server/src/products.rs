use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State as AppState},
    http::StatusCode,
    response::IntoResponse,
};
use records::Product;
use serde_json::json;
use tracing::info;

use crate::{
    auth::{CurrentUser, require_admin},
    error::AppError,
    payloads::{NewProduct, ProductSearch, ProductUpdate},
    state::State,
    utils::{parse, validate_new_product, validate_product_update},
};

pub async fn list_products_handler(
    AppState(state): AppState<Arc<State>>,
    Query(query): Query<ProductSearch>,
) -> Result<impl IntoResponse, AppError> {
    let mut products = state.files.read_products()?;

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        products.retain(|product| product.matches(term));
    }

    Ok(Json(products))
}

pub async fn get_product_handler(
    AppState(state): AppState<Arc<State>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .files
        .read_products()?
        .into_iter()
        .find(|product| product.id == id)
        .map(Json)
        .ok_or(AppError::NotFound("Product not found"))
}

/// Barcode scanners hand back the SKU.
pub async fn product_by_sku_handler(
    AppState(state): AppState<Arc<State>>,
    Path(sku): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .files
        .read_products()?
        .into_iter()
        .find(|product| product.sku == sku)
        .map(Json)
        .ok_or(AppError::NotFound("Product not found"))
}

pub async fn create_product_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&caller, "Only admins can add products.")?;

    let payload: NewProduct = parse(&body)?;
    validate_new_product(&payload)?;

    let _writer = state.writer.lock().await;
    let mut products = state.files.read_products()?;

    if products.iter().any(|product| product.sku == payload.sku) {
        return Err(AppError::Conflict("Product with this SKU already exists"));
    }

    let product = Product::new(
        &payload.name,
        &payload.sku,
        payload.price,
        payload.quantity as u32,
        payload.image_url,
    );
    products.push(product.clone());
    state.files.write_products(&products)?;

    info!(sku = %product.sku, by = %caller.username, "Product added");

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&caller, "Only admins can update products.")?;

    let payload: ProductUpdate = parse(&body)?;
    validate_product_update(&payload)?;

    let _writer = state.writer.lock().await;
    let mut products = state.files.read_products()?;

    if let Some(sku) = &payload.sku {
        if products.iter().any(|p| p.id != id && &p.sku == sku) {
            return Err(AppError::Conflict("Product with this SKU already exists"));
        }
    }

    let product = products
        .iter_mut()
        .find(|product| product.id == id)
        .ok_or(AppError::NotFound("Product not found"))?;

    if let Some(name) = &payload.name {
        product.rename(name);
    }
    if let Some(sku) = payload.sku {
        product.sku = sku;
    }
    if let Some(price) = payload.price {
        product.price = price;
    }
    if let Some(quantity) = payload.quantity {
        product.quantity = quantity as u32;
    }
    if let Some(image_url) = payload.image_url {
        product.image_url = image_url.filter(|url| !url.is_empty());
    }

    let updated = product.clone();
    state.files.write_products(&products)?;

    info!(sku = %updated.sku, by = %caller.username, "Product updated");

    Ok(Json(updated))
}

pub async fn delete_product_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&caller, "Only admins can delete products.")?;

    let _writer = state.writer.lock().await;
    let mut products = state.files.read_products()?;
    let before = products.len();
    products.retain(|product| product.id != id);

    if products.len() == before {
        return Err(AppError::NotFound("Product not found"));
    }

    state.files.write_products(&products)?;

    info!(deleted = %id, by = %caller.username, "Product deleted");

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
