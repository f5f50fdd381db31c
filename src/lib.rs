//! # Till Documentation
//!
//! Point-of-sale and inventory service for a small shop.
//!
//! Cashiers ring up sales from a cart, admins manage the catalog and the
//! accounts. Everything persists as flat JSON files in one data directory.
//!
//!
//!
//! # General Infrastructure
//! - `server` crate: axum REST API, the only process that writes during business hours
//! - `records` crate: entity types, JSON files, checkout math, sale journal, receipts
//! - `process` crate: offline CLI for imports, reports and journal recovery
//! - Data directory: `users.json`, `products.json`, `sales.json`, and `sale.journal` while a sale commits
//!
//!
//!
//! # Selling
//!
//! **Goal**: stock and sales history never disagree, even if the process dies mid-sale.
//!
//! - Every write handler queues on one writer lock, held from the first read to the last write
//! - Checkout validates each cart line against the catalog, in order, on a working copy
//! - Prices come from the catalog, never from the client
//! - Tax is a flat 10% of the subtotal, amounts stored unrounded
//! - The finished catalog and sale go to `sale.journal` first, then to the data files
//! - Startup (and the next sale) replays a journal left behind by a crash
//!
//!
//!
//! # Notes
//!
//! ## Sessions
//! The bearer token is the user id. There is no session store; each request
//! re-reads `users.json`, so deleting a user revokes their token at once.
//!
//! ## Carts
//! Carts live in server memory, one per user id. They are a convenience over
//! `POST /api/sales` and vanish on restart or logout. Stock is checked when an
//! item is added and again at checkout.
//!
//!
//!
//! # Setup
//!
//! Run the server.
//! ```sh
//! RUST_LOG=info TILL_DATA_DIR=./data cargo run
//! ```
//!
//! Default admin on first start: `admin` / `password`, or the contents of
//! `/run/secrets/TILL_ADMIN_PASSWORD`.
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//!
//!
//! ## Maintenance
//!
//! Import a product list.
//! ```sh
//! cargo run -p process -- --data-dir ./data import products.json
//! ```
//!
//! Sales report for the last week.
//! ```sh
//! cargo run -p process -- --data-dir ./data report --days 7
//! ```
//!
//! Finish an interrupted sale by hand.
//! ```sh
//! cargo run -p process -- --data-dir ./data recover
//! ```

pub mod api;
