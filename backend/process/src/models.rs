use std::collections::BTreeMap;

use serde::Deserialize;

/// One row of an import file. Loosely typed so bad rows can be counted
/// instead of failing the whole file.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImportRow {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub quantity: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

#[derive(Debug, Default)]
pub struct ReportFilter {
    pub cashier: Option<String>,
    pub days: Option<i64>,
}

#[derive(Debug, Default, PartialEq)]
pub struct Totals {
    pub sales: usize,
    pub items: u64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Default, PartialEq)]
pub struct Report {
    pub overall: Totals,
    pub by_cashier: BTreeMap<String, Totals>,
}
