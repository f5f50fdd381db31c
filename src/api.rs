//! # API Reference
//!
//! Requests/responses between clients and the server. JSON everywhere,
//! camelCase field names.
//!
//! ## Auth
//!
//! Header
//! - `Authorization: Bearer <user id>` on everything except login, logout and catalog reads
//! - Missing or unknown token: 401
//! - Known user, wrong role: 403 `{"message": "Forbidden: ..."}`
//!
//! Login
//! - `POST /api/auth/login` `{username, password}`
//! - 200 `{user, token}`, the user never carries a password
//! - 401 `Invalid username or password`
//!
//! Logout
//! - `POST /api/auth/logout`, always 200, drops the caller's cart
//!
//! ## Users (admin)
//!
//! - `GET /api/users`, `GET /api/users/{id}`
//! - `POST /api/users` (alias `POST /api/auth/register`) `{name, username, password, role: "cashier"}`
//! - `PUT /api/users/{id}` `{name?, password?, role?}`
//! - `DELETE /api/users/{id}`
//! - `admin-001` can only be edited by itself, stays admin, and cannot be deleted
//!
//! ## Products
//!
//! - `GET /api/products?search=tea` matches name or SKU, no auth
//! - `GET /api/products/{id}`, `GET /api/products/sku/{sku}` (barcode lookup), no auth
//! - `POST /api/products` `{name, sku, price, quantity, imageUrl?}` (admin)
//! - `PUT /api/products/{id}` any subset of the above, `imageUrl: null` clears (admin)
//! - `DELETE /api/products/{id}` (admin)
//!
//! Product
//! ```json
//! {"id": "…", "name": "Green Tea", "sku": "TEA-001", "price": 2.5, "quantity": 10, "data-ai-hint": "green"}
//! ```
//!
//! ## Sales
//!
//! - `POST /api/sales` `{cartItems: [{id, cartQuantity}, …]}`, 201 with the sale
//! - Unknown product: 400. Not enough stock: 409
//! - `GET /api/sales`: admins get everything, cashiers their own, newest first
//! - `GET /api/sales/{id}`, `GET /api/sales/{id}/receipt` (`text/plain`)
//!
//! Sale
//! ```json
//! {"id": "…", "items": [{"productId": "…", "name": "Green Tea", "sku": "TEA-001", "price": 2.5, "quantity": 2}],
//!  "subtotal": 5.0, "taxRate": 0.1, "taxAmount": 0.5, "total": 5.5,
//!  "timestamp": "2025-03-01T14:30:00Z", "cashierId": "casey"}
//! ```
//!
//! ## Cart
//!
//! - `GET /api/cart` `{items, total, itemCount}`
//! - `POST /api/cart/items` `{productId, quantity}`
//! - `PUT /api/cart/items/{id}` `{quantity}`: 0 or less removes, above stock caps
//! - `DELETE /api/cart/items/{id}`, `DELETE /api/cart`
//! - `POST /api/cart/checkout`: 201 with the sale, cart emptied
