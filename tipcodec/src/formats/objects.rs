//! JSON container for application object definitions.
//!
//! A file holds an array of objects:
//!
//! ```json
//! [
//!   {
//!     "type": 8,
//!     "number": 21,
//!     "name": "Customer Card",
//!     "elements": [
//!       { "type": 30, "id": 2, "properties": { "CaptionML": "ENU=No.;\nDEU=Nr." } }
//!     ]
//!   }
//! ]
//! ```
//!
//! Multilingual properties are stored in their native form, one
//! `LANG=text` segment per line.
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    traits::{ApplicationObject, ObjectElement, ObjectStore, Parser},
    types::{ElementType, ObjectIdentity, PropertyKind},
};

lazy_static! {
    static ref LANGUAGE_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]+$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    #[serde(rename = "type")]
    pub object_type: ElementType,
    pub number: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<ElementDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDefinition {
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub id: i32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<PropertyKind, String>,
}

impl ElementDefinition {
    pub fn new(element_type: impl Into<ElementType>, id: i32) -> Self {
        Self {
            element_type: element_type.into(),
            id,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, kind: PropertyKind, value: impl Into<String>) -> Self {
        self.properties.insert(kind, value.into());
        self
    }
}

impl ObjectElement for ElementDefinition {
    fn element_type(&self) -> ElementType {
        self.element_type
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn string_property(&self, kind: PropertyKind) -> Result<Option<String>, Error> {
        Ok(self.properties.get(&kind).cloned())
    }

    fn set_string_property(&mut self, kind: PropertyKind, value: &str) -> Result<(), Error> {
        let stored = match kind {
            PropertyKind::ToolTipMl | PropertyKind::CaptionMl => to_native(kind, value)?,
            PropertyKind::SourceExpr => value.to_string(),
        };
        self.properties.insert(kind, stored);
        Ok(())
    }
}

impl ApplicationObject for ObjectDefinition {
    type Element = ElementDefinition;

    fn identity(&self) -> ObjectIdentity {
        ObjectIdentity::new(self.object_type, self.number)
    }

    fn elements(&self) -> &[ElementDefinition] {
        &self.elements
    }

    fn elements_mut(&mut self) -> &mut [ElementDefinition] {
        &mut self.elements
    }
}

impl Parser for Vec<ObjectDefinition> {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        write_objects(self, writer)
    }
}

fn write_objects<W: Write>(objects: &[ObjectDefinition], mut writer: W) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, objects).map_err(Error::Parse)?;
    writer.write_all(b"\n").map_err(Error::Io)?;
    writer.flush().map_err(Error::Io)
}

/// [`ObjectStore`] reading and writing JSON object files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObjectStore;

impl JsonObjectStore {
    pub fn new() -> Self {
        JsonObjectStore
    }
}

impl ObjectStore for JsonObjectStore {
    type Object = ObjectDefinition;

    fn load(&self, path: &Path) -> Result<Vec<ObjectDefinition>, Error> {
        Vec::<ObjectDefinition>::read_from(path).map_err(|e| match e {
            Error::Parse(e) => Error::ObjectFile {
                path: path.to_path_buf(),
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            },
            other => other,
        })
    }

    fn save(&self, path: &Path, objects: &[ObjectDefinition]) -> Result<(), Error> {
        let file = File::create(path).map_err(Error::Io)?;
        write_objects(objects, BufWriter::new(file))
    }
}

/// Converts a `;`-joined property value into the native one-segment-per-line
/// form, rejecting values the container cannot hold.
fn to_native(kind: PropertyKind, value: &str) -> Result<String, Error> {
    if value.contains(['\r', '\n']) {
        return Err(Error::property_rejected(kind, "line breaks are not allowed"));
    }

    let segments = split_segments(value);
    for segment in &segments {
        let Some((language, _)) = segment.split_once('=') else {
            return Err(Error::property_rejected(
                kind,
                format!("segment `{}` has no language", segment),
            ));
        };
        if !LANGUAGE_CODE_REGEX.is_match(language) {
            return Err(Error::property_rejected(
                kind,
                format!("invalid language code `{}`", language),
            ));
        }
    }
    Ok(segments.join(";\n"))
}

/// Splits on `;` outside quoted values.
///
/// A value is quoted only when its `"` directly follows the segment's first
/// `=`. Inside it `""` is a literal quote and a lone `"` closes the value;
/// quotes anywhere else are plain text.
fn split_segments(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut chars = value.char_indices().peekable();
    let mut in_quotes = false;
    let mut seen_equals = false;
    let mut start = 0;
    while let Some((pos, ch)) = chars.next() {
        if in_quotes {
            if ch == '"' && chars.next_if(|&(_, next)| next == '"').is_none() {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            '=' if !seen_equals => {
                seen_equals = true;
                in_quotes = chars.next_if(|&(_, next)| next == '"').is_some();
            }
            ';' => {
                segments.push(&value[start..pos]);
                start = pos + 1;
                seen_equals = false;
            }
            _ => {}
        }
    }
    if start < value.len() {
        segments.push(&value[start..]);
    }
    segments
}
