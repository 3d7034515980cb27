//! Pure filtering and aggregation functions over record lists.

use std::collections::BTreeSet;

use crate::record::{Record, RecordKind};

/// How far back the year selector reaches below the current year.
const YEAR_WINDOW_BEFORE: i32 = 5;
/// How far forward the year selector reaches past the current year.
const YEAR_WINDOW_AFTER: i32 = 1;

/// A month/year predicate restricting which records are displayed and summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFilter {
    /// The calendar month to match, 1-12. Zero matches every month.
    pub month: u8,
    /// The calendar year to match. `None` matches every year.
    pub year: Option<i32>,
}

impl RecordFilter {
    /// The filter that matches every record.
    pub const ALL: RecordFilter = RecordFilter {
        month: 0,
        year: None,
    };

    fn matches(&self, record: &Record) -> bool {
        let month_ok = self.month == 0 || u8::from(record.date.month()) == self.month;
        let year_ok = self.year.is_none_or(|year| record.date.year() == year);

        month_ok && year_ok
    }
}

/// The records matching `filter`, sorted by date descending.
///
/// The sort is stable, so records sharing a date keep their insertion order.
pub fn filter_records(records: &[Record], filter: &RecordFilter) -> Vec<Record> {
    let mut matching: Vec<Record> = records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect();

    matching.sort_by(|a, b| b.date.cmp(&a.date));

    matching
}

/// Income, expense and balance totals over a record list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// The sum of amounts over income records.
    pub income: f64,
    /// The sum of amounts over expense records.
    pub expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
}

/// Sum the amounts in `records` into income/expense/balance totals.
pub fn summarize(records: &[Record]) -> Totals {
    let mut income = 0.0;
    let mut expenses = 0.0;

    for record in records {
        match record.kind {
            RecordKind::Income => income += record.amount,
            RecordKind::Expense => expenses += record.amount,
        }
    }

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// The years to offer in the year filter selector, ascending.
///
/// The distinct years present in `records`, unioned with a fixed window
/// around `current_year` so the selector is useful even for an empty store.
pub fn year_range(records: &[Record], current_year: i32) -> Vec<i32> {
    let mut years: BTreeSet<i32> = records.iter().map(|record| record.date.year()).collect();
    years.extend((current_year - YEAR_WINDOW_BEFORE)..=(current_year + YEAR_WINDOW_AFTER));

    years.into_iter().collect()
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod summarize_tests {
    use time::macros::date;

    use crate::record::{Record, RecordId, RecordKind};

    use super::summarize;

    fn record_with(kind: RecordKind, amount: f64) -> Record {
        Record {
            id: RecordId::generate(),
            date: date!(2024 - 05 - 01),
            description: "Test".to_owned(),
            category: "Misc".to_owned(),
            kind,
            amount,
            note: None,
        }
    }

    #[test]
    fn empty_list_sums_to_zero() {
        let totals = summarize(&[]);

        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expenses, 0.0);
        assert_eq!(totals.balance, 0.0);
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let records = [
            record_with(RecordKind::Income, 5_000_000.0),
            record_with(RecordKind::Expense, 1_500_000.0),
            record_with(RecordKind::Expense, 500_000.0),
        ];

        let totals = summarize(&records);

        assert_eq!(totals.income, 5_000_000.0);
        assert_eq!(totals.expenses, 2_000_000.0);
        assert_eq!(totals.balance, totals.income - totals.expenses);
    }

    #[test]
    fn expenses_only_yield_negative_balance() {
        let records = [record_with(RecordKind::Expense, 100.0)];

        let totals = summarize(&records);

        assert_eq!(totals.balance, -100.0);
    }
}
