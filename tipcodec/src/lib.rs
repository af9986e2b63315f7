#![forbid(unsafe_code)]
//! Tooltip extraction, exchange and merge for application object definitions.
//!
//! Tooltips of UI elements are multilingual property strings such as
//! `ENU=Customer No.;DEU=Debitornr.`. This crate pulls them out of object
//! files into a flat tab-delimited exchange file that translators can edit,
//! and merges the edited file back into the objects.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tipcodec::{ExportOptions, JsonObjectStore, export_tooltips, import_tooltips};
//!
//! let store = JsonObjectStore::new();
//! let options = ExportOptions::new()
//!     .with_pattern("*.json")
//!     .with_generate_tooltips(true);
//! export_tooltips(&store, "objects", "tooltips.tsv", &options)?;
//!
//! // ... translate tooltips.tsv ...
//!
//! import_tooltips(&store, "objects", "tooltips.tsv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Object containers other than the bundled JSON one plug in through the
//! [`ObjectStore`](traits::ObjectStore), [`ApplicationObject`](traits::ApplicationObject)
//! and [`ObjectElement`](traits::ObjectElement) traits.

pub mod codec;
pub mod duplicates;
pub mod error;
pub mod extract;
pub mod formats;
pub mod index;
pub mod merge;
pub mod options;
pub mod property;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{ExportSummary, collect_tooltips, export_tooltips, find_source_files, import_tooltips},
    duplicates::DuplicateTracker,
    error::Error,
    formats::{ExchangeFile, JsonObjectStore},
    index::ObjectIndex,
    merge::{ImportMerger, ImportSummary},
    options::ExportOptions,
    types::{ElementType, MultiLanguageText, ObjectIdentity, PropertyKind, Tooltip, TrackedObject},
};
