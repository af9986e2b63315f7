//! Multilingual property strings.
//!
//! Two directions with two different shapes:
//!
//! - [`encode`] produces the single-line form `ENU=Customer;DEU=Debitor`, the
//!   value written into an element's `ToolTipML` property.
//! - [`decode`] reads the native form an element hands back, one language per
//!   line (`ENU=Customer;` / `DEU=Debitor`).
//!
//! The two are not inverses of each other and are kept as separate functions.

use tracing::warn;

use crate::{error::Error, types::MultiLanguageText};

/// Prefix marking text that was generated rather than authored.
pub const GENERATED_PREFIX: &str = "### ";

/// Pseudo-language carrying a caption derived from a source expression.
pub const SOURCE_EXPR_LANGUAGE: &str = "@@@";

/// Returns true if `text` carries the generated marker.
pub fn is_generated(text: &str) -> bool {
    text.starts_with(GENERATED_PREFIX)
}

/// Encodes `text` into a `;`-joined multilingual property string.
///
/// Generated entries are left out unless `include_generated` is set. Values
/// containing `;` are quoted, with embedded quotes doubled.
pub fn encode(text: &MultiLanguageText, include_generated: bool) -> String {
    let mut encoded = String::new();
    let mut first = true;
    for (language, value) in text.iter() {
        if is_generated(value) && !include_generated {
            continue;
        }
        if !first {
            encoded.push(';');
        }
        first = false;

        encoded.push_str(language);
        encoded.push('=');
        if value.contains(';') {
            encoded.push('"');
            encoded.push_str(&value.replace('"', "\"\""));
            encoded.push('"');
        } else {
            encoded.push_str(value);
        }
    }
    encoded
}

/// Decodes a native multilingual property string, one language per line.
///
/// Malformed lines are logged and skipped; the remaining languages are still
/// decoded. A language appearing twice keeps the last text.
pub fn decode(raw: &str) -> MultiLanguageText {
    let mut text = MultiLanguageText::new();
    for record in raw.split(['\r', '\n']) {
        if record.trim().is_empty() {
            continue;
        }
        match decode_record(record) {
            Ok((language, value)) => text.insert(language, value),
            Err(e) => warn!("skipping property record: {}", e),
        }
    }
    text
}

/// Decodes one `LANG=text` line of a native property string.
pub fn decode_record(record: &str) -> Result<(String, String), Error> {
    let (language, rest) = record
        .split_once('=')
        .ok_or_else(|| Error::MalformedProperty(record.to_string()))?;
    let language = language.trim();
    if language.is_empty() {
        return Err(Error::MalformedProperty(record.to_string()));
    }

    let mut value = rest.trim();
    value = value.strip_prefix('"').unwrap_or(value);
    value = value.strip_suffix(';').unwrap_or(value);
    value = value.strip_suffix('"').unwrap_or(value);
    // Stored text may itself contain doubled quotes, hence two passes.
    let value = value.replace("\"\"", "\"").replace("\"\"", "\"");

    Ok((language.to_string(), value))
}
