use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State as AppState},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};
use chrono::Utc;
use records::{Sale, SaleJournal, SaleLine, User, checkout, render_receipt, sort_newest_first};
use tracing::{info, warn};

use crate::{
    auth::{CurrentUser, can_view_sale},
    error::AppError,
    payloads::NewSale,
    state::State,
    utils::{parse, sale_lines},
};

/// Checks `lines` against current stock and commits the sale through the
/// journal. Holds the writer lock from the catalog read to the last write.
pub async fn record_sale(state: &State, seller: &User, lines: &[SaleLine]) -> Result<Sale, AppError> {
    let _writer = state.writer.lock().await;

    commit_sale(state, seller, lines)
}

/// Same as [`record_sale`] for callers already holding `state.writer`.
pub fn commit_sale(state: &State, seller: &User, lines: &[SaleLine]) -> Result<Sale, AppError> {
    let journal = SaleJournal::new(&state.files);

    if let Some(sale) = journal.recover()? {
        warn!(sale_id = %sale.id, "Replayed interrupted sale from journal");
    }

    let products = state.files.read_products()?;
    let (products, sale) = checkout(&products, lines, &seller.username, Utc::now()).map_err(|e| {
        warn!(seller = %seller.username, "Sale rejected: {e}");
        e
    })?;

    journal.commit(&products, &sale)?;

    info!(
        sale_id = %sale.id,
        seller = %seller.username,
        items = sale.items.len(),
        total = sale.total,
        "Sale recorded"
    );

    Ok(sale)
}

pub async fn list_sales_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let mut sales = state.files.read_sales()?;
    sales.retain(|sale| can_view_sale(&caller, &sale.cashier_id));
    sort_newest_first(&mut sales);

    Ok(Json(sales))
}

pub async fn create_sale_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let payload: NewSale = parse(&body)?;
    let lines = sale_lines(&payload)?;

    let sale = record_sale(&state, &caller, &lines).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn get_sale_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    find_visible_sale(&state, &caller, &id).map(Json)
}

pub async fn receipt_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sale = find_visible_sale(&state, &caller, &id)?;

    Ok((
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_receipt(&sale),
    ))
}

fn find_visible_sale(state: &State, caller: &User, id: &str) -> Result<Sale, AppError> {
    let sale = state
        .files
        .read_sales()?
        .into_iter()
        .find(|sale| sale.id == id)
        .ok_or(AppError::NotFound("Sale not found"))?;

    if !can_view_sale(caller, &sale.cashier_id) {
        return Err(AppError::Forbidden(
            "You do not have permission to view this sale.",
        ));
    }

    Ok(sale)
}
