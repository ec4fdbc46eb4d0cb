//! Transaction filter for reports and exports

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{CategoryId, Transaction};

/// Date range and category filter. Unset fields do not filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportFilter {
    /// Inclusive start date
    pub start: Option<NaiveDate>,
    /// Inclusive end date
    pub end: Option<NaiveDate>,
    /// Exact category match
    pub category_id: Option<CategoryId>,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.start.is_some_and(|start| txn.date < start) {
            return false;
        }
        if self.end.is_some_and(|end| txn.date > end) {
            return false;
        }
        match self.category_id {
            Some(category_id) => txn.category_id == Some(category_id),
            None => true,
        }
    }

    /// Matching transactions, in their original order
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction};

    fn on(y: i32, m: u32, d: u32) -> Transaction {
        Transaction::from_new(NewTransaction::expense(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Money::from_units(1),
        ))
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let filter = ReportFilter::new().start(start).end(end);

        assert!(filter.matches(&on(2025, 1, 1)));
        assert!(filter.matches(&on(2025, 1, 31)));
        assert!(!filter.matches(&on(2024, 12, 31)));
        assert!(!filter.matches(&on(2025, 2, 1)));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let ledger = vec![on(2020, 1, 1), on(2030, 1, 1)];
        let filter = ReportFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&ledger).len(), 2);
    }

    #[test]
    fn test_category_is_exact_match() {
        let food = CategoryId::new();
        let mut tagged = on(2025, 1, 1);
        tagged.category_id = Some(food);
        let untagged = on(2025, 1, 1);

        let filter = ReportFilter::new().category(food);
        let result = filter.apply(&[tagged.clone(), untagged]);
        assert_eq!(result, vec![tagged]);
    }
}
