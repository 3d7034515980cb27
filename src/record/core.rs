//! Defines the core record model and its validation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The opaque unique identifier of a record.
///
/// Generated when a record is created and immutable afterwards. Imported
/// documents may carry their own identifiers, which are preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh unique record ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a record tracks money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Money flowing in, e.g. a salary payment.
    Income,
    /// Money flowing out, e.g. groceries.
    Expense,
}

impl RecordKind {
    /// The capitalized label used in tables and badges.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Income => write!(f, "income"),
            RecordKind::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(RecordKind::Income),
            "expense" => Ok(RecordKind::Expense),
            other => Err(Error::InvalidKind(other.to_owned())),
        }
    }
}

/// A single income or expense transaction.
///
/// To create a new `Record`, use [Record::build]. The serialized field names
/// (`desc`, `type`) match the on-disk document shape, so exports from this
/// app and documents written by earlier versions of the tool both import
/// cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The ID of the record.
    pub id: RecordId,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    #[serde(rename = "desc")]
    pub description: String,
    /// The category the transaction belongs to, e.g. "Groceries".
    pub category: String,
    /// Whether the record is income or an expense.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// The amount of money earned or spent. Always zero or greater.
    pub amount: f64,
    /// An optional note. Only expense records carry notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Record {
    /// Create a new record.
    ///
    /// Shortcut for [RecordDraft] for discoverability.
    pub fn build(kind: RecordKind, amount: f64, date: Date) -> RecordDraft {
        RecordDraft {
            kind,
            amount,
            date,
            description: String::new(),
            category: String::new(),
            note: None,
        }
    }
}

/// A draft for creating [Record] instances.
///
/// Set the required text fields with the builder methods, then call
/// [RecordDraft::finalize] to validate the draft and attach an ID.
#[derive(Debug, PartialEq, Clone)]
pub struct RecordDraft {
    /// Whether the record is income or an expense.
    pub kind: RecordKind,

    /// The monetary amount of the transaction.
    ///
    /// Always non-negative; the direction of the money flow is carried by
    /// `kind` rather than the sign.
    pub amount: f64,

    /// The date when the transaction occurred.
    ///
    /// This represents the actual transaction date (when money moved), not
    /// when it was recorded.
    pub date: Date,

    /// A human-readable description of the transaction.
    ///
    /// # Examples
    /// - `"Salary - January 2025"`
    /// - `"Weekly groceries"`
    pub description: String,

    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category: String,

    /// Optional free-form note.
    ///
    /// Only kept when the record is an expense; income records never carry
    /// notes.
    pub note: Option<String>,
}

impl RecordDraft {
    /// Set the description for the record.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category for the record.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the note for the record.
    ///
    /// The note is discarded during [RecordDraft::finalize] unless the record
    /// is an expense and the note is non-blank.
    pub fn note(mut self, note: Option<&str>) -> Self {
        self.note = note.map(ToOwned::to_owned);
        self
    }

    /// Validate the draft and build the final [Record] instance.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyField] if the description or category is blank,
    /// - or [Error::InvalidAmount] if the amount is not a finite number,
    /// - or [Error::NegativeAmount] if the amount is less than zero.
    pub fn finalize(self, id: RecordId) -> Result<Record, Error> {
        let description = self.description.trim().to_owned();
        if description.is_empty() {
            return Err(Error::EmptyField("description"));
        }

        let category = self.category.trim().to_owned();
        if category.is_empty() {
            return Err(Error::EmptyField("category"));
        }

        if !self.amount.is_finite() {
            return Err(Error::InvalidAmount(self.amount.to_string()));
        }

        if self.amount < 0.0 {
            return Err(Error::NegativeAmount);
        }

        let note = match self.kind {
            RecordKind::Expense => self
                .note
                .as_deref()
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(ToOwned::to_owned),
            RecordKind::Income => None,
        };

        Ok(Record {
            id,
            date: self.date,
            description,
            category,
            kind: self.kind,
            amount: self.amount,
            note,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
