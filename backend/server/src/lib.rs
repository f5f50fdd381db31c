//! HTTP surface of the till: catalog, carts, sales and account
//! administration over the JSON data directory.
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post, put},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod auth;
pub mod cart;
pub mod config;
pub mod database;
pub mod error;
pub mod payloads;
pub mod products;
pub mod routes;
pub mod sales;
pub mod state;
pub mod utils;

use cart::{
    add_item_handler, checkout_handler, clear_cart_handler, remove_item_handler,
    update_item_handler, view_cart_handler,
};
use error::AppError;
use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    product_by_sku_handler, update_product_handler,
};
use routes::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    login_handler, logout_handler, update_user_handler,
};
use sales::{create_sale_handler, get_sale_handler, list_sales_handler, receipt_handler};
use state::State;

pub async fn start_server() -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new()?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(state.config.cors_max_age));

    Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/register", post(create_user_handler))
        .route("/api/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/api/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route(
            "/api/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/api/products/{id}",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route("/api/products/sku/{sku}", get(product_by_sku_handler))
        .route("/api/sales", get(list_sales_handler).post(create_sale_handler))
        .route("/api/sales/{id}", get(get_sale_handler))
        .route("/api/sales/{id}/receipt", get(receipt_handler))
        .route("/api/cart", get(view_cart_handler).delete(clear_cart_handler))
        .route("/api/cart/items", post(add_item_handler))
        .route(
            "/api/cart/items/{id}",
            put(update_item_handler).delete(remove_item_handler),
        )
        .route("/api/cart/checkout", post(checkout_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
