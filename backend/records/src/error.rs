use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Product with ID {0} not found.")]
    ProductNotFound(String),

    #[error("Not enough stock for {name}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    #[error("Sale total is out of range")]
    AmountOutOfRange,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Only {available} of {name} available, cannot hold {requested}.")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    #[error("Product with ID {0} is not in the cart.")]
    NotInCart(String),
}
