//! Sales ledger

use crate::store::{JsonStore, StoreResult};
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use shared::models::{DailyTotal, Sale};
use tracing::info;

/// Number of entries returned by the recent-sales projection
pub const RECENT_SALES: usize = 3;

/// Sale history backed by one JSON document
///
/// Sales are append-only; the ledger owns id assignment. Ids are a
/// monotonic counter over the document rather than wall-clock millis,
/// so rapid consecutive sales can never collide.
#[derive(Debug, Clone)]
pub struct SalesLedger {
    store: JsonStore,
}

impl SalesLedger {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Full sales history
    pub fn list(&self) -> StoreResult<Vec<Sale>> {
        self.store.read()
    }

    /// Last `n` sales, most recent first
    pub fn recent(&self, n: usize) -> StoreResult<Vec<Sale>> {
        let sales = self.list()?;
        Ok(sales.into_iter().rev().take(n).collect())
    }

    /// Find one sale by id
    pub fn find_by_id(&self, id: i64) -> StoreResult<Option<Sale>> {
        let sales = self.list()?;
        Ok(sales.into_iter().find(|s| s.id == id))
    }

    /// Sum and count of the sales recorded on the same local calendar
    /// day as `reference`
    ///
    /// Calendar-day comparison, not a 24h window: a sale one second
    /// before local midnight does not count toward the next day.
    pub fn daily_total(&self, reference: DateTime<Local>) -> StoreResult<DailyTotal> {
        let sales = self.list()?;
        let day = reference.date_naive();

        let same_day: Vec<&Sale> = sales
            .iter()
            .filter(|s| s.date.with_timezone(&Local).date_naive() == day)
            .collect();

        Ok(DailyTotal {
            total: same_day.iter().map(|s| s.total).sum::<Decimal>(),
            count: same_day.len(),
        })
    }

    /// Append a finalized sale, assigning the next id when the sale
    /// carries none (`id <= 0`)
    pub fn append(&self, mut sale: Sale) -> StoreResult<Sale> {
        let mut sales = self.list()?;

        if sale.id <= 0 {
            sale.id = sales.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        }

        sales.push(sale.clone());
        self.store.write(&sales)?;

        info!(id = sale.id, total = %sale.total, "Sale appended to ledger");
        Ok(sale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ledger() -> (tempfile::TempDir, SalesLedger) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("sales.json"));
        (dir, SalesLedger::new(store))
    }

    fn sale(date: DateTime<chrono::Utc>, total: i64) -> Sale {
        Sale {
            id: 0,
            date,
            payment_method: "cash".to_string(),
            items: vec![],
            subtotal: Decimal::from(total),
            total: Decimal::from(total),
            tax_percentage: Decimal::ZERO,
        }
    }

    #[test]
    fn test_append_assigns_monotonic_ids() {
        let (_dir, ledger) = ledger();
        let a = ledger.append(sale(Utc::now(), 10)).unwrap();
        let b = ledger.append(sale(Utc::now(), 20)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_recent_is_most_recent_first_and_capped() {
        let (_dir, ledger) = ledger();
        for total in 1..=5 {
            ledger.append(sale(Utc::now(), total)).unwrap();
        }

        let recent = ledger.recent(RECENT_SALES).unwrap();
        assert_eq!(recent.len(), 3);
        let ids: Vec<i64> = recent.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[test]
    fn test_recent_on_empty_ledger() {
        let (_dir, ledger) = ledger();
        assert!(ledger.recent(RECENT_SALES).unwrap().is_empty());
    }

    #[test]
    fn test_daily_total_excludes_other_calendar_days() {
        let (_dir, ledger) = ledger();

        // One second before local midnight on May 1st
        let before_midnight = Local.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap();
        // One second after local midnight on May 2nd
        let after_midnight = Local.with_ymd_and_hms(2024, 5, 2, 0, 0, 1).unwrap();

        ledger
            .append(sale(before_midnight.with_timezone(&Utc), 100))
            .unwrap();

        let day_two = ledger.daily_total(after_midnight).unwrap();
        assert_eq!(day_two.count, 0);
        assert_eq!(day_two.total, Decimal::ZERO);

        let day_one = ledger.daily_total(before_midnight).unwrap();
        assert_eq!(day_one.count, 1);
        assert_eq!(day_one.total, Decimal::from(100));
    }

    #[test]
    fn test_daily_total_sums_matches() {
        let (_dir, ledger) = ledger();
        let noon = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        ledger.append(sale(noon.with_timezone(&Utc), 10)).unwrap();
        ledger.append(sale(noon.with_timezone(&Utc), 25)).unwrap();

        let total = ledger.daily_total(noon).unwrap();
        assert_eq!(total.count, 2);
        assert_eq!(total.total, Decimal::from(35));
    }

    #[test]
    fn test_find_by_id() {
        let (_dir, ledger) = ledger();
        let recorded = ledger.append(sale(Utc::now(), 10)).unwrap();

        assert_eq!(ledger.find_by_id(recorded.id).unwrap(), Some(recorded));
        assert_eq!(ledger.find_by_id(999).unwrap(), None);
    }
}
