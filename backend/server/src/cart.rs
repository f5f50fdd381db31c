//! Server-held carts, one per signed-in user, kept in memory only.
use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State as AppState},
    http::StatusCode,
    response::IntoResponse,
};
use records::{Cart, CartError, CartLine, CartUpdate};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    auth::CurrentUser,
    error::AppError,
    payloads::{CartAdd, CartQuantity},
    sales::commit_sale,
    state::State,
    utils::{cart_quantity, parse},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: f64,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

pub async fn view_cart_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
) -> impl IntoResponse {
    let carts = state.carts.lock().await;
    let view = carts
        .get(&caller.id)
        .map(CartView::from)
        .unwrap_or_else(|| CartView::from(&Cart::new()));

    Json(view)
}

pub async fn add_item_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let payload: CartAdd = parse(&body)?;
    let quantity = cart_quantity(payload.quantity)?;

    let product = state
        .files
        .read_products()?
        .into_iter()
        .find(|product| product.id == payload.product_id)
        .ok_or(AppError::NotFound("Product not found"))?;

    let mut carts = state.carts.lock().await;
    let cart = carts.entry(caller.id.clone()).or_default();
    cart.add(&product, quantity)?;

    debug!(user = %caller.username, sku = %product.sku, quantity, "Cart item added");

    Ok(Json(CartView::from(&*cart)))
}

pub async fn update_item_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(product_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let CartQuantity { quantity } = parse(&body)?;

    let mut carts = state.carts.lock().await;
    let cart = carts
        .get_mut(&caller.id)
        .ok_or_else(|| CartError::NotInCart(product_id.clone()))?;

    if let CartUpdate::Capped(stock) = cart.update_quantity(&product_id, quantity)? {
        debug!(user = %caller.username, %product_id, stock, "Cart quantity capped at stock");
    }

    Ok(Json(CartView::from(&*cart)))
}

pub async fn remove_item_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut carts = state.carts.lock().await;
    let cart = carts
        .get_mut(&caller.id)
        .ok_or_else(|| CartError::NotInCart(product_id.clone()))?;
    cart.remove(&product_id)?;

    Ok(Json(CartView::from(&*cart)))
}

pub async fn clear_cart_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
) -> impl IntoResponse {
    state.carts.lock().await.remove(&caller.id);

    Json(CartView::from(&Cart::new()))
}

/// Sells the caller's cart. The cart is only emptied once the sale is on disk,
/// and stays locked until then so no edit slips in between.
pub async fn checkout_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let _writer = state.writer.lock().await;
    let mut carts = state.carts.lock().await;

    let lines = carts
        .get(&caller.id)
        .map(Cart::sale_lines)
        .unwrap_or_default();

    let sale = commit_sale(&state, &caller, &lines)?;

    carts.remove(&caller.id);
    info!(user = %caller.username, sale_id = %sale.id, "Cart checked out");

    Ok((StatusCode::CREATED, Json(sale)))
}
