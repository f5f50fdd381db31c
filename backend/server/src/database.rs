//! # JSON data directory
//!
//! Flat files, one list per entity.
//!
//! ## Requirements
//!
//! - Small dataset: a shop's catalog, a handful of accounts, the sales log
//! - Every request re-reads what it needs, no in-memory copy to keep in sync
//! - A sale must never leave stock and sales history disagreeing
//!
//! ## Implementation
//!
//! - `users.json`, `products.json`, `sales.json` under `TILL_DATA_DIR`
//! - Writes land through temp file + rename
//! - All writers queue on one lock held across read, validate and write
//! - Sales commit through `sale.journal`, replayed here on startup
//! - An unreadable journal stops startup instead of being dropped
use records::{DataFiles, SaleJournal};
use tracing::{error, info, warn};

use crate::{config::Config, error::AppError};

pub fn init_data(config: &Config) -> Result<DataFiles, AppError> {
    let files = DataFiles::new(&config.data_dir);
    files.ensure_dir()?;

    if files.ensure_default_admin(&config.admin_password)? {
        info!("Seeded default admin account");
    }

    let recovered = SaleJournal::new(&files)
        .recover()
        .inspect_err(|e| error!("Sale journal needs attention: {e}"))?;
    if let Some(sale) = recovered {
        warn!(sale_id = %sale.id, "Replayed interrupted sale from journal");
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use records::{Product, SaleLine, checkout};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn seeds_admin_in_fresh_directory() {
        let dir = tempdir().unwrap();
        let config = Config::with_data_dir(dir.path().join("data"));

        let files = init_data(&config).unwrap();

        let users = files.read_users().unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].password_matches("password"));
    }

    #[test]
    fn replays_pending_journal() {
        let dir = tempdir().unwrap();
        let config = Config::with_data_dir(dir.path());
        let files = DataFiles::new(dir.path());
        let products = vec![Product::new("Green Tea", "TEA-001", 2.5, 10, None)];
        files.write_products(&products).unwrap();

        let (updated, sale) = checkout(
            &products,
            &[SaleLine::new(&products[0].id, 2)],
            "casey",
            chrono::Utc::now(),
        )
        .unwrap();
        let journal = std::fs::File::create(files.journal()).unwrap();
        serde_json::to_writer(journal, &serde_json::json!({ "products": updated, "sale": sale }))
            .unwrap();

        init_data(&config).unwrap();

        assert!(!files.journal().exists());
        assert_eq!(files.read_products().unwrap()[0].quantity, 8);
        assert_eq!(files.read_sales().unwrap()[0].id, sale.id);
    }

    #[test]
    fn refuses_to_start_on_unreadable_journal() {
        let dir = tempdir().unwrap();
        let config = Config::with_data_dir(dir.path());
        let files = DataFiles::new(dir.path());
        std::fs::write(files.journal(), "not json").unwrap();

        assert!(matches!(init_data(&config), Err(AppError::Records(_))));
        assert!(files.journal().exists());
    }
}
