//! Traits for format-agnostic parsing and for the object container collaborator.
//!
//! [`Parser`] is implemented by file formats owned by this crate. The
//! [`ObjectStore`], [`ApplicationObject`] and [`ObjectElement`] traits describe
//! what the tooltip tools need from an object-definition container: loading
//! and saving a file of objects, an object's identity and elements, and
//! reading or writing an element's string properties.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{
    error::Error,
    types::{ElementType, ObjectIdentity, PropertyKind},
};

/// A trait for parsing and writing one file.
///
/// # Example
///
/// ```rust,no_run
/// use tipcodec::traits::Parser;
/// let exchange = tipcodec::formats::ExchangeFile::read_from("tooltips.tsv")?;
/// exchange.write_to("tooltips_copy.tsv")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// A UI element (control, field, action...) inside an application object.
pub trait ObjectElement {
    fn element_type(&self) -> ElementType;

    fn id(&self) -> i32;

    /// Reads a string property; `Ok(None)` when the element does not carry it.
    fn string_property(&self, kind: PropertyKind) -> Result<Option<String>, Error>;

    /// Writes a string property.
    ///
    /// Fails with [`Error::PropertyRejected`] when the value is not valid for
    /// this element, leaving the element unchanged.
    fn set_string_property(&mut self, kind: PropertyKind, value: &str) -> Result<(), Error>;
}

/// A top-level application object definition.
pub trait ApplicationObject {
    type Element: ObjectElement;

    fn identity(&self) -> ObjectIdentity;

    fn elements(&self) -> &[Self::Element];

    fn elements_mut(&mut self) -> &mut [Self::Element];
}

/// Loads and saves the objects of one container file.
pub trait ObjectStore {
    type Object: ApplicationObject;

    /// Loads every object in `path`, in file order.
    fn load(&self, path: &Path) -> Result<Vec<Self::Object>, Error>;

    /// Rewrites `path` with `objects`, in the given order.
    fn save(&self, path: &Path, objects: &[Self::Object]) -> Result<(), Error>;
}
