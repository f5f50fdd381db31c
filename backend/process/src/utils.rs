use std::sync::LazyLock;

use records::Sale;
use regex::Regex;

use crate::models::Totals;

static CONTROL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{Cc}]").unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SKU_JUNK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9-]").unwrap());

/// Display names: control characters dropped, whitespace collapsed.
pub fn sanitize(input: &str) -> String {
    let s = CONTROL.replace_all(input, " ");

    SPACES.replace_all(s.trim(), " ").into_owned()
}

/// SKUs: uppercase letters, digits and dashes only, spaces become dashes.
pub fn sanitize_sku(input: &str) -> String {
    let s = SPACES.replace_all(input.trim(), "-");

    SKU_JUNK.replace_all(&s, "").to_uppercase()
}

pub fn add_sale(totals: &mut Totals, sale: &Sale) {
    totals.sales += 1;
    totals.items += sale.items.iter().map(|item| u64::from(item.quantity)).sum::<u64>();
    totals.subtotal += sale.subtotal;
    totals.tax += sale.tax_amount;
    totals.total += sale.total;
}

#[cfg(test)]
mod tests {
    use super::{sanitize, sanitize_sku};

    #[test]
    fn test_basic() {
        assert_eq!(sanitize("Green Tea"), "Green Tea");
        assert_eq!(sanitize("Earl\tGrey"), "Earl Grey");
        assert_eq!(sanitize("Mug\u{7}"), "Mug");
    }

    #[test]
    fn test_leading_trailing_spaces() {
        assert_eq!(sanitize("   hello   "), "hello");
        assert_eq!(sanitize("  multiple   spaces  "), "multiple spaces");
    }

    #[test]
    fn test_keeps_punctuation() {
        assert_eq!(sanitize("Tea (Loose-Leaf), 100g"), "Tea (Loose-Leaf), 100g");
    }

    #[test]
    fn test_sku() {
        assert_eq!(sanitize_sku(" tea-001 "), "TEA-001");
        assert_eq!(sanitize_sku("cof 12"), "COF-12");
        assert_eq!(sanitize_sku("mug#7!"), "MUG7");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("     "), "");
        assert_eq!(sanitize_sku("  "), "");
    }
}
