//! Parsing and coercion of imported record documents.
//!
//! Imports are best-effort: the document as a whole must be a JSON array,
//! but individual entries are coerced rather than rejected, and entries that
//! cannot be salvaged are silently dropped.

use std::collections::HashSet;

use serde_json::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    record::{Record, RecordId, RecordKind},
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse an uploaded document into the records that will replace the store.
///
/// Each entry is coerced:
/// - `id` is preserved when present (regenerated on duplicates within the
///   document), otherwise generated;
/// - `type` becomes [RecordKind::Expense] only when it is exactly
///   `"expense"`, otherwise [RecordKind::Income];
/// - `amount` is coerced to a number, defaulting to 0 when non-numeric;
/// - `note` is kept only when present and the entry is an expense.
///
/// Entries without a parseable `date`, a non-blank `desc` or a non-blank
/// `category`, or with a negative `amount`, are dropped.
///
/// # Errors
/// This function will return an [Error::InvalidImportDocument] if `document`
/// is not valid JSON or the top level value is not an array.
pub fn parse_import_document(document: &str) -> Result<Vec<Record>, Error> {
    let value: Value =
        serde_json::from_str(document).map_err(|_| Error::InvalidImportDocument)?;

    let Value::Array(entries) = value else {
        return Err(Error::InvalidImportDocument);
    };

    let mut seen_ids = HashSet::new();
    let records = entries
        .iter()
        .filter_map(|entry| coerce_entry(entry, &mut seen_ids))
        .collect();

    Ok(records)
}

/// Coerce one document entry into a [Record], or `None` when the entry
/// cannot be salvaged.
fn coerce_entry(entry: &Value, seen_ids: &mut HashSet<RecordId>) -> Option<Record> {
    let date = entry
        .get("date")
        .and_then(Value::as_str)
        .and_then(|text| Date::parse(text, DATE_FORMAT).ok())?;
    let description = non_blank_string(entry.get("desc"))?;
    let category = non_blank_string(entry.get("category"))?;

    let kind = match entry.get("type").and_then(Value::as_str) {
        Some("expense") => RecordKind::Expense,
        _ => RecordKind::Income,
    };

    let amount = coerce_amount(entry.get("amount"));
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }

    let id = match entry.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => RecordId::from(id.to_owned()),
        _ => RecordId::generate(),
    };
    // A duplicate within the document would break the uniqueness invariant,
    // so the later entry gets a fresh ID.
    let id = if seen_ids.contains(&id) {
        RecordId::generate()
    } else {
        id
    };
    seen_ids.insert(id.clone());

    let note = match kind {
        RecordKind::Expense => non_blank_string(entry.get("note")),
        RecordKind::Income => None,
    };

    Some(Record {
        id,
        date,
        description,
        category,
        kind,
        amount,
        note,
    })
}

fn non_blank_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn coerce_amount(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

// ============================================================================
// TESTS
// ============================================================================
