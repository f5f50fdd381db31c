//! # Offline Maintenance
//!
//! Jobs that run against the data directory while the server is stopped.
//!
//! ## Import
//! 1. Read a JSON list of products (`name`, `sku`, `price`, `quantity`, `imageUrl?`).
//! 2. Sanitize names and SKUs.
//! 3. Skip rows that would fail the API's own product rules.
//! 4. Skip SKUs already in the catalog, or seen earlier in the same file.
//! 5. Append the rest with fresh ids, one write at the end.
//!
//! ## Recover
//! Finish a sale whose commit was interrupted, same as the server does on startup.
//!
//! ## Report
//! Sale count, items sold and money totals, overall and per cashier, with
//! optional cashier and day-window filters.
use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, TimeDelta, Utc};
use indicatif::{ProgressBar, ProgressStyle};

pub mod models;
pub mod utils;

use models::{ImportRow, ImportSummary, Report, ReportFilter};
use records::{DataFiles, MAX_PRICE, Product, Sale, SaleJournal};
use utils::{add_sale, sanitize, sanitize_sku};

pub fn import_products(files: &DataFiles, source: &Path) -> Result<ImportSummary> {
    let data = fs::read(source).with_context(|| format!("reading {}", source.display()))?;
    let rows: Vec<ImportRow> =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", source.display()))?;

    let mut products = files.read_products()?;
    println!("Loaded Products: {}", products.len());
    println!("Rows To Import: {}\n", rows.len());

    let mut known: HashSet<String> = products.iter().map(|p| p.sku.clone()).collect();
    let mut summary = ImportSummary::default();

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    for row in rows {
        pb.set_message(format!("Importing {}", row.sku));

        match product_from_row(row) {
            None => summary.invalid += 1,
            Some(product) if !known.insert(product.sku.clone()) => summary.duplicates += 1,
            Some(product) => {
                products.push(product);
                summary.added += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");

    if summary.added > 0 {
        files.write_products(&products)?;
    }

    println!("\nNew Products: {}", summary.added);
    println!("Duplicate SKUs: {}", summary.duplicates);
    println!("Invalid Rows: {}", summary.invalid);
    println!("Catalog Size: {}", products.len());

    Ok(summary)
}

fn product_from_row(row: ImportRow) -> Option<Product> {
    let name = sanitize(&row.name);
    let sku = sanitize_sku(&row.sku);
    let quantity = u32::try_from(row.quantity).ok()?;

    let price_ok = row.price.is_finite() && row.price > 0.0 && row.price <= MAX_PRICE;
    if name.chars().count() < 3 || sku.len() < 3 || !price_ok {
        return None;
    }

    let image_url = row
        .image_url
        .map(|url| url.trim().to_string())
        .filter(|url| url.starts_with("http://") || url.starts_with("https://"));

    Some(Product::new(&name, &sku, row.price, quantity, image_url))
}

pub fn recover(files: &DataFiles) -> Result<Option<Sale>> {
    let recovered = SaleJournal::new(files).recover()?;

    match &recovered {
        Some(sale) => println!("Replayed sale {} by {} ({:.2})", sale.id, sale.cashier_id, sale.total),
        None => println!("No pending sale journal. Nothing to do."),
    }

    Ok(recovered)
}

pub fn seed(files: &DataFiles, password: &str) -> Result<bool> {
    files.ensure_dir()?;
    let seeded = files.ensure_default_admin(password)?;

    if seeded {
        println!("Default admin created.");
    } else {
        println!("Default admin already present.");
    }

    Ok(seeded)
}

pub fn build_report(sales: &[Sale], filter: &ReportFilter, now: DateTime<Utc>) -> Result<Report> {
    let since = filter
        .days
        .map(|days| {
            TimeDelta::try_days(days)
                .and_then(|window| now.checked_sub_signed(window))
                .ok_or_else(|| anyhow!("--days {days} is out of range"))
        })
        .transpose()?;
    let mut report = Report::default();

    let selected = sales
        .iter()
        .filter(|sale| since.is_none_or(|since| sale.timestamp >= since))
        .filter(|sale| {
            filter
                .cashier
                .as_deref()
                .is_none_or(|cashier| sale.cashier_id == cashier)
        });

    for sale in selected {
        add_sale(&mut report.overall, sale);
        add_sale(
            report.by_cashier.entry(sale.cashier_id.clone()).or_default(),
            sale,
        );
    }

    Ok(report)
}

pub fn report(files: &DataFiles, filter: &ReportFilter) -> Result<Report> {
    let sales = files.read_sales()?;
    let report = build_report(&sales, filter, Utc::now())?;

    println!("Sales: {}", report.overall.sales);
    println!("Items Sold: {}", report.overall.items);
    println!("Subtotal: ${:.2}", report.overall.subtotal);
    println!("Tax: ${:.2}", report.overall.tax);
    println!("Total: ${:.2}\n", report.overall.total);

    for (cashier, totals) in &report.by_cashier {
        println!(
            "{cashier:<20} {:>5} sales {:>12}",
            totals.sales,
            format!("${:.2}", totals.total)
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use records::{SaleLine, checkout};
    use tempfile::tempdir;

    use super::*;

    fn write_rows(dir: &Path, json: &str) -> std::path::PathBuf {
        let path = dir.join("import.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn import_skips_invalid_and_duplicate_rows() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path());
        files
            .write_products(&[Product::new("Green Tea", "TEA-001", 2.5, 10, None)])
            .unwrap();

        let source = write_rows(
            dir.path(),
            r#"[
                {"name": "  Coffee   Beans ", "sku": "cof-001", "price": 12.0, "quantity": 4},
                {"name": "Tea Refill", "sku": "tea-001", "price": 2.0, "quantity": 1},
                {"name": "Mug", "sku": "MUG-001", "price": 0, "quantity": 1},
                {"name": "Cup", "sku": "CUP-001", "price": 3.0, "quantity": -1},
                {"name": "Gold Bar", "sku": "GLD-001", "price": 1e308, "quantity": 1},
                {"name": "Decaf Beans", "sku": "COF-001", "price": 11.0, "quantity": 2},
                {"name": "Kettle", "sku": "KET-001", "price": 30.0, "quantity": 1, "imageUrl": "https://img.example/k.png"}
            ]"#,
        );

        let summary = import_products(&files, &source).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                added: 2,
                duplicates: 2,
                invalid: 3,
            }
        );

        let products = files.read_products().unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[1].name, "Coffee Beans");
        assert_eq!(products[1].sku, "COF-001");
        assert_eq!(products[1].hint.as_deref(), Some("coffee"));
        assert_eq!(
            products[2].image_url.as_deref(),
            Some("https://img.example/k.png")
        );
    }

    #[test]
    fn import_rejects_unreadable_file() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path());

        assert!(import_products(&files, &dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn report_filters_by_cashier_and_window() {
        let products = vec![Product::new("Green Tea", "TEA-001", 2.0, 100, None)];
        let line = [SaleLine::new(&products[0].id, 5)];
        let now = Utc::now();

        let (_, recent) = checkout(&products, &line, "casey", now).unwrap();
        let (_, other) = checkout(&products, &line, "morgan", now).unwrap();
        let (_, old) = checkout(&products, &line, "casey", now - TimeDelta::days(30)).unwrap();
        let sales = vec![recent, other, old];

        let all = build_report(&sales, &ReportFilter::default(), now).unwrap();
        assert_eq!(all.overall.sales, 3);
        assert_eq!(all.overall.items, 15);
        assert_eq!(all.by_cashier.len(), 2);
        assert_eq!(all.by_cashier["casey"].sales, 2);

        let week = build_report(
            &sales,
            &ReportFilter {
                cashier: Some("casey".to_string()),
                days: Some(7),
            },
            now,
        )
        .unwrap();
        assert_eq!(week.overall.sales, 1);
        assert!((week.overall.total - 11.0).abs() < 1e-9);
    }

    #[test]
    fn report_rejects_window_beyond_calendar() {
        let now = Utc::now();

        for days in [1_000_000_000, i64::MAX] {
            let filter = ReportFilter {
                cashier: None,
                days: Some(days),
            };
            assert!(build_report(&[], &filter, now).is_err());
        }
    }

    #[test]
    fn recover_and_seed_on_fresh_directory() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path().join("data"));

        assert!(seed(&files, "hunter22").unwrap());
        assert!(!seed(&files, "hunter22").unwrap());
        assert!(recover(&files).unwrap().is_none());
    }
}
