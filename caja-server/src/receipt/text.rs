//! Plain-text receipt renderer
//!
//! Writes one fixed-width text document per sale into the receipts
//! directory. File names derive from the sale id, which the ledger
//! guarantees unique, so an existing file is never overwritten.

use chrono::Local;
use shared::models::Sale;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receipt column width in characters
const WIDTH: usize = 32;

/// Render a finalized sale as a fixed-width text document
pub fn render(sale: &Sale, store_name: &str) -> String {
    let mut out = String::new();
    let sep_double = "=".repeat(WIDTH);
    let sep_single = "-".repeat(WIDTH);

    out.push_str(&sep_double);
    out.push('\n');
    out.push_str(&center(store_name));
    out.push('\n');
    out.push_str(&center(&format!("TICKET #{}", sale.id)));
    out.push('\n');
    out.push_str(&sep_double);
    out.push('\n');

    let local = sale.date.with_timezone(&Local);
    out.push_str(&format!("Date: {}\n", local.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("Payment: {}\n", sale.payment_method));
    out.push_str(&sep_single);
    out.push('\n');

    for item in &sale.items {
        out.push_str(&item.name);
        out.push('\n');
        out.push_str(&lr(
            &format!("  {} x {}", item.quantity, item.unit_price),
            &item.subtotal.to_string(),
        ));
        out.push('\n');
    }

    out.push_str(&sep_single);
    out.push('\n');
    out.push_str(&lr("Subtotal", &sale.subtotal.to_string()));
    out.push('\n');
    out.push_str(&lr(
        &format!("Tax {}%", sale.tax_percentage),
        &sale.tax_amount().to_string(),
    ));
    out.push('\n');
    out.push_str(&lr("TOTAL", &sale.total.to_string()));
    out.push('\n');

    out
}

/// Write the receipt for `sale` into `dir` as `ticket_<id>.txt`
///
/// An already-existing receipt for the same id is left untouched.
pub fn write(dir: &Path, sale: &Sale, store_name: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("ticket_{}.txt", sale.id));

    if path.exists() {
        debug!(path = %path.display(), "Receipt already exists, not overwriting");
        return Ok(path);
    }

    fs::write(&path, render(sale, store_name))?;
    debug!(path = %path.display(), "Receipt written");
    Ok(path)
}

fn center(s: &str) -> String {
    let len = s.chars().count();
    if len >= WIDTH {
        return s.to_string();
    }
    format!("{}{}", " ".repeat((WIDTH - len) / 2), s)
}

fn lr(left: &str, right: &str) -> String {
    let lw = left.chars().count();
    let rw = right.chars().count();
    if lw + rw >= WIDTH {
        return format!("{} {}", left, right);
    }
    format!("{}{}{}", left, " ".repeat(WIDTH - lw - rw), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::SaleItem;

    fn sample_sale() -> Sale {
        Sale {
            id: 42,
            date: Utc::now(),
            payment_method: "cash".to_string(),
            items: vec![SaleItem {
                product_id: 1,
                name: "Yerba Mate".to_string(),
                quantity: 2,
                unit_price: Decimal::new(750, 2),
                subtotal: Decimal::new(1500, 2),
            }],
            subtotal: Decimal::new(1500, 2),
            total: Decimal::new(1815, 2),
            tax_percentage: Decimal::from(21),
        }
    }

    #[test]
    fn test_render_contains_all_fields() {
        let doc = render(&sample_sale(), "CAJA POS");
        assert!(doc.contains("CAJA POS"));
        assert!(doc.contains("TICKET #42"));
        assert!(doc.contains("Payment: cash"));
        assert!(doc.contains("Yerba Mate"));
        assert!(doc.contains("2 x 7.50"));
        assert!(doc.contains("15.00"));
        assert!(doc.contains("Tax 21%"));
        assert!(doc.contains("3.15"));
        assert!(doc.contains("18.15"));
    }

    #[test]
    fn test_write_creates_file_named_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), &sample_sale(), "CAJA POS").unwrap();
        assert_eq!(path.file_name().unwrap(), "ticket_42.txt");
        assert!(path.exists());
    }

    #[test]
    fn test_write_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sale = sample_sale();

        let path = write(dir.path(), &sale, "CAJA POS").unwrap();
        fs::write(&path, "original").unwrap();

        write(dir.path(), &sale, "CAJA POS").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }
}
