//! File formats handled by tipcodec.
//!
//! - [`exchange`]: the tab-delimited tooltip exchange file.
//! - [`objects`]: the JSON object-definition container.

pub mod exchange;
pub mod objects;

// Reexporting the formats for easier access
pub use exchange::{ExchangeEntry, ExchangeFile, ExchangeRecord};
pub use objects::{ElementDefinition, JsonObjectStore, ObjectDefinition};
