use crate::store::KvStore;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Storage slot holding the full portfolio collection.
pub const STORAGE_KEY: &str = "portfolios";

/// One named investment sub-portfolio.
///
/// `name` is a case-insensitive unique key. `allocation_actual_percent` is
/// derived (value / combined total * 100) and refreshed on every scrape; it
/// is persisted only as a cache and never trusted between scrapes. The
/// target percentage is the user's, persisted, 0 for new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub name: String,
    pub value: f64,
    pub allocation_actual_percent: f64,
    pub allocation_target_percent: f64,
}

impl PortfolioRecord {
    pub fn new(name: impl Into<String>, value: f64, actual_percent: f64) -> PortfolioRecord {
        PortfolioRecord {
            name: name.into(),
            value,
            allocation_actual_percent: actual_percent,
            allocation_target_percent: 0.0,
        }
    }
}

/// Aggregate view over all sub-portfolios. Recomputed on demand, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedPortfolio {
    pub total_value: f64,
    pub portfolios: Vec<PortfolioRecord>,
}

/// CRUD over the persisted portfolio collection.
///
/// The repository exclusively owns the persisted collection; page
/// controllers only hold transient combined views for rendering.
pub struct PortfolioRepository {
    store: Rc<KvStore>,
}

impl PortfolioRepository {
    pub fn new(store: Rc<KvStore>) -> PortfolioRepository {
        PortfolioRepository { store }
    }

    /// All stored records in insertion order, `[]` when nothing is stored.
    pub fn list_all(&self) -> Vec<PortfolioRecord> {
        self.store.get(STORAGE_KEY).unwrap_or_default()
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<PortfolioRecord> {
        self.list_all()
            .into_iter()
            .find(|pf| pf.name.eq_ignore_ascii_case(name))
    }

    /// Insert or replace by case-insensitive name.
    ///
    /// An existing record keeps its position; a new name is appended. The
    /// full collection is persisted after every call. A failing write is
    /// logged and absorbed so the enrichment degrades instead of breaking
    /// the host page.
    pub fn upsert(&self, record: PortfolioRecord) {
        let mut portfolios = self.list_all();

        match portfolios
            .iter()
            .position(|pf| pf.name.eq_ignore_ascii_case(&record.name))
        {
            Some(idx) => portfolios[idx] = record,
            None => portfolios.push(record),
        }

        if let Err(e) = self.store.set(STORAGE_KEY, &portfolios) {
            log::error!("repository: persisting portfolios failed: {e}");
        }
    }

    /// Fold the stored records into the combined view.
    pub fn get_combined(&self) -> CombinedPortfolio {
        let portfolios = self.list_all();

        let mut total_value = 0.0;
        for portfolio in &portfolios {
            total_value += portfolio.value;
        }

        CombinedPortfolio {
            total_value,
            portfolios,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_repo() -> (tempfile::TempDir, PortfolioRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(dir.path().join("db")).unwrap();
        (dir, PortfolioRepository::new(Rc::new(store)))
    }

    fn record(name: &str, value: f64) -> PortfolioRecord {
        PortfolioRecord::new(name, value, 0.0)
    }

    #[test]
    fn test_empty_repository() {
        let (_dir, repo) = temp_repo();
        assert!(repo.list_all().is_empty());

        let combined = repo.get_combined();
        assert_eq!(combined.total_value, 0.0);
        assert!(combined.portfolios.is_empty());
    }

    #[test]
    fn test_combined_total_is_exact_sum() {
        let (_dir, repo) = temp_repo();
        repo.upsert(record("Tech", 1200.0));
        repo.upsert(record("Bonds", 800.0));
        repo.upsert(record("Cash", 500.5));

        let combined = repo.get_combined();
        assert_eq!(combined.total_value, 2500.5);
        assert_eq!(combined.portfolios.len(), 3);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let (_dir, repo) = temp_repo();
        repo.upsert(record("Tech", 1000.0));
        repo.upsert(record("Tech", 1000.0));

        assert_eq!(repo.list_all(), vec![record("Tech", 1000.0)]);
    }

    #[test]
    fn test_upsert_preserves_position_and_appends() {
        let (_dir, repo) = temp_repo();
        repo.upsert(record("Tech", 1000.0));
        repo.upsert(record("Bonds", 500.0));
        repo.upsert(record("Tech", 1500.0));
        repo.upsert(record("Cash", 100.0));

        let names: Vec<String> = repo.list_all().into_iter().map(|pf| pf.name).collect();
        assert_eq!(names, vec!["Tech", "Bonds", "Cash"]);
        assert_eq!(repo.list_all()[0].value, 1500.0);
    }

    #[test]
    fn test_name_matching_is_case_insensitive() {
        let (_dir, repo) = temp_repo();
        repo.upsert(record("Tech", 1000.0));

        let found = repo.find("tech").unwrap();
        assert_eq!(found.name, "Tech");

        repo.upsert(record("TECH", 2000.0));
        assert_eq!(repo.list_all().len(), 1);
    }

    #[test]
    fn test_persisted_layout_is_camel_case() {
        let rec = PortfolioRecord {
            name: "Tech".to_string(),
            value: 1000.0,
            allocation_actual_percent: 50.0,
            allocation_target_percent: 60.0,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("allocationActualPercent"));
        assert!(json.contains("allocationTargetPercent"));
    }
}
