//! Record management for the ledger.
//!
//! This module contains everything related to records:
//! - The `Record` model and `RecordDraft` for creating records
//! - The `RecordStore` that owns the collection and mirrors it to disk
//! - Filtering and aggregation over record lists
//! - View handlers for the record-related web pages

mod amount;
mod clear_endpoint;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod export_endpoint;
mod filter;
mod form;
mod import;
mod import_endpoint;
mod import_page;
mod records_page;
mod store;
mod view;

pub use self::core::{Record, RecordDraft, RecordId, RecordKind};
pub use store::{FileSlot, MemorySlot, RecordStore, StorageSlot};

pub use clear_endpoint::clear_records_endpoint;
pub use create_endpoint::create_record_endpoint;
pub use delete_endpoint::delete_record_endpoint;
pub use export_endpoint::export_records_endpoint;
pub use import_endpoint::import_records_endpoint;
pub use import_page::get_import_page;
pub use records_page::get_records_page;
