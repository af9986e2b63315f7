//! Export and import runs.
//!
//! An export walks a source directory, extracts the tooltips of every object
//! found in the matching files and writes them to an exchange file. An import
//! reads an exchange file back and merges its tooltips into the object files
//! below a root directory.
use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use ignore::WalkBuilder;
use tracing::{error, warn};

use crate::{
    duplicates::DuplicateTracker,
    error::Error,
    extract::extract,
    formats::ExchangeFile,
    index::ObjectIndex,
    merge::{ImportMerger, ImportSummary},
    options::ExportOptions,
    traits::{ApplicationObject, ObjectStore, Parser},
};

/// Counts collected while exporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub objects: usize,
    pub tooltips: usize,
    /// Language entries flagged as repeating an earlier translation.
    pub duplicates: usize,
    pub files_read: usize,
    /// Files that could not be loaded.
    pub files_failed: Vec<PathBuf>,
}

/// Lists the files below `dir` whose file name matches `pattern`, searching
/// subdirectories too. The result is sorted by path.
pub fn find_source_files<P: AsRef<Path>>(dir: P, pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref();
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::InvalidPattern(format!("{}: {}", pattern, e)))?
        .compile_matcher();
    if !dir.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", dir.display()),
        )));
    }

    let mut files = Vec::new();
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if entry
            .path()
            .file_name()
            .is_some_and(|name| matcher.is_match(name))
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Returns `path` relative to `root`, with `/` separators.
pub fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Extracts the tooltips of every object in the matching files below `dir`.
///
/// A file that cannot be loaded is logged and skipped. An object found in
/// more than one file keeps the file it was first seen in.
pub fn collect_tooltips<S: ObjectStore, P: AsRef<Path>>(
    store: &S,
    dir: P,
    options: &ExportOptions,
) -> Result<(ObjectIndex, ExportSummary), Error> {
    let dir = dir.as_ref();
    let mut index = ObjectIndex::new();
    let mut summary = ExportSummary::default();

    for file in find_source_files(dir, &options.pattern)? {
        let objects = match store.load(&file) {
            Ok(objects) => objects,
            Err(e) => {
                error!("skipping {}: {}", file.display(), e);
                summary.files_failed.push(file);
                continue;
            }
        };
        summary.files_read += 1;

        let filename = relative_name(dir, &file);
        for object in &objects {
            let identity = object.identity();
            if let Some(existing) = index.get(&identity) {
                warn!(
                    "{} in {} was already read from {}",
                    identity, filename, existing.filename
                );
            }
            let tooltips = extract(object, options.generate_tooltips);
            index
                .get_or_create(identity, &filename)
                .tooltips
                .extend(tooltips);
        }
    }

    summary.objects = index.len();
    summary.tooltips = index.tooltip_count();
    Ok((index, summary))
}

/// Extracts tooltips below `dir` and writes them to the exchange file at
/// `output`.
pub fn export_tooltips<S: ObjectStore, P: AsRef<Path>, Q: AsRef<Path>>(
    store: &S,
    dir: P,
    output: Q,
    options: &ExportOptions,
) -> Result<ExportSummary, Error> {
    let (index, mut summary) = collect_tooltips(store, dir, options)?;

    let mut tracker = DuplicateTracker::new();
    let exchange = ExchangeFile::from_index(&index, &mut tracker);
    summary.duplicates = exchange
        .records
        .iter()
        .flat_map(|record| &record.entries)
        .filter(|entry| entry.duplicate)
        .count();

    exchange.write_to(output)?;
    Ok(summary)
}

/// Reads the exchange file at `exchange` and merges its tooltips into the
/// object files below `root`.
pub fn import_tooltips<S: ObjectStore, P: AsRef<Path>, Q: AsRef<Path>>(
    store: &S,
    root: P,
    exchange: Q,
) -> Result<ImportSummary, Error> {
    let exchange = ExchangeFile::read_from(exchange)?;
    let skipped = exchange.skipped;
    let index = exchange.into_index();

    let mut summary = ImportMerger::new(store, root.as_ref()).merge(&index);
    summary.skipped_records = skipped;
    Ok(summary)
}
