//! Core types shared by the extractor, the exchange format and the merger.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::property;

/// Numeric element type code.
///
/// Object types and element types share one code space, so the same type is
/// used for the identity of an object and for the controls inside it. Codes
/// without a known name are still valid and display as their number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementType(pub i32);

impl ElementType {
    pub const TABLE: ElementType = ElementType(1);
    pub const REPORT: ElementType = ElementType(3);
    pub const CODEUNIT: ElementType = ElementType(5);
    pub const XMLPORT: ElementType = ElementType(6);
    pub const MENU_SUITE: ElementType = ElementType(7);
    pub const PAGE: ElementType = ElementType(8);
    pub const QUERY: ElementType = ElementType(9);
    pub const FIELD: ElementType = ElementType(20);
    pub const KEY: ElementType = ElementType(21);
    pub const CONTROL: ElementType = ElementType(30);
    pub const ACTION: ElementType = ElementType(31);
    pub const DATA_ITEM: ElementType = ElementType(40);
    pub const COLUMN: ElementType = ElementType(41);

    /// Returns the numeric code.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Returns the symbolic name of a known code.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            1 => "Table",
            3 => "Report",
            5 => "Codeunit",
            6 => "XMLport",
            7 => "MenuSuite",
            8 => "Page",
            9 => "Query",
            20 => "Field",
            21 => "Key",
            30 => "Control",
            31 => "Action",
            40 => "DataItem",
            41 => "Column",
            _ => return None,
        };
        Some(name)
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<i32> for ElementType {
    fn from(code: i32) -> Self {
        ElementType(code)
    }
}

/// String-valued element properties the tooltip tools read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "ToolTipML")]
    ToolTipMl,
    #[serde(rename = "CaptionML")]
    CaptionMl,
    #[serde(rename = "SourceExpr")]
    SourceExpr,
}

impl Display for PropertyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKind::ToolTipMl => write!(f, "ToolTipML"),
            PropertyKind::CaptionMl => write!(f, "CaptionML"),
            PropertyKind::SourceExpr => write!(f, "SourceExpr"),
        }
    }
}

/// Stable identity of an application object.
///
/// Ordering is by type, then number, which is the order objects are exported
/// and merged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectIdentity {
    pub object_type: ElementType,
    pub number: i32,
}

impl ObjectIdentity {
    pub fn new(object_type: impl Into<ElementType>, number: i32) -> Self {
        Self {
            object_type: object_type.into(),
            number,
        }
    }
}

impl Display for ObjectIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.object_type, self.number)
    }
}

/// Language code to text mapping that keeps insertion order.
///
/// Inserting a language that is already present replaces its text without
/// moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiLanguageText {
    entries: Vec<(String, String)>,
}

impl MultiLanguageText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the text for `language`.
    pub fn insert(&mut self, language: impl Into<String>, text: impl Into<String>) {
        let language = language.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(lang, _)| *lang == language) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((language, text)),
        }
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, text)| text.as_str())
    }

    /// Iterates `(language, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(lang, text)| (lang.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for MultiLanguageText {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut text = MultiLanguageText::new();
        for (language, value) in iter {
            text.insert(language, value);
        }
        text
    }
}

/// The multilingual tooltip of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub element_type: ElementType,
    pub element_id: i32,
    pub text: MultiLanguageText,
}

impl Tooltip {
    pub fn new(element_type: impl Into<ElementType>, element_id: i32) -> Self {
        Self::with_text(element_type, element_id, MultiLanguageText::new())
    }

    pub fn with_text(
        element_type: impl Into<ElementType>,
        element_id: i32,
        text: MultiLanguageText,
    ) -> Self {
        Self {
            element_type: element_type.into(),
            element_id,
            text,
        }
    }

    pub fn add_text(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.text.insert(language, text);
    }

    /// Encodes the tooltip as a multilingual property string.
    pub fn to_property(&self, include_generated: bool) -> String {
        property::encode(&self.text, include_generated)
    }
}

/// An object seen during a run, with the tooltips collected for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedObject {
    pub identity: ObjectIdentity,
    /// Path of the object file relative to the source root, `/`-separated.
    pub filename: String,
    pub tooltips: Vec<Tooltip>,
}

impl TrackedObject {
    pub fn new(identity: ObjectIdentity, filename: impl Into<String>) -> Self {
        Self {
            identity,
            filename: filename.into(),
            tooltips: Vec::new(),
        }
    }
}
