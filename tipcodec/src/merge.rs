//! Merging edited tooltips back into object files.
//!
//! Objects are visited in index order. Consecutive objects that live in the
//! same file share one loaded batch; the batch is saved when the next object
//! belongs to a different file, and once more at the end.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::{
    index::ObjectIndex,
    traits::{ApplicationObject, ObjectElement, ObjectStore},
    types::{PropertyKind, TrackedObject},
};

/// Counts collected while merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Objects referenced by the exchange file.
    pub objects: usize,
    /// Tooltips of objects found in their target file.
    pub tooltips: usize,
    /// Elements whose tooltip property was written.
    pub updated: usize,
    /// Tooltips left alone because only generated text remained.
    pub unchanged: usize,
    pub missing_objects: usize,
    pub missing_elements: usize,
    /// Tooltips the container refused to store.
    pub rejected: usize,
    /// Exchange lines dropped as unparseable before merging.
    pub skipped_records: usize,
    /// Files that were loaded, in processing order.
    pub files: Vec<PathBuf>,
    /// Files that could not be loaded or saved.
    pub failed_files: Vec<PathBuf>,
}

/// An object file loaded for merging. `objects` is `None` when loading
/// failed; such a batch is never saved.
struct Batch<O> {
    path: PathBuf,
    objects: Option<Vec<O>>,
}

/// Applies tooltips from an [`ObjectIndex`] to object files under `root`.
pub struct ImportMerger<'a, S: ObjectStore> {
    store: &'a S,
    root: PathBuf,
}

impl<'a, S: ObjectStore> ImportMerger<'a, S> {
    pub fn new(store: &'a S, root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            root: root.into(),
        }
    }

    /// Merges every tracked object into its file.
    pub fn merge(&self, index: &ObjectIndex) -> ImportSummary {
        let mut summary = ImportSummary {
            objects: index.len(),
            ..Default::default()
        };
        let mut batch: Option<Batch<S::Object>> = None;

        for tracked in index {
            let path = self.root.join(&tracked.filename);
            if batch.as_ref().is_none_or(|open| open.path != path) {
                if let Some(previous) = batch.take() {
                    self.flush(previous, &mut summary);
                }
                batch = Some(self.open(path, &mut summary));
            }

            if let Some(Batch {
                path,
                objects: Some(objects),
            }) = batch.as_mut()
            {
                apply(tracked, objects, path, &mut summary);
            }
        }

        if let Some(last) = batch.take() {
            self.flush(last, &mut summary);
        }
        summary
    }

    fn open(&self, path: PathBuf, summary: &mut ImportSummary) -> Batch<S::Object> {
        info!("processing {}", path.display());
        summary.files.push(path.clone());
        match self.store.load(&path) {
            Ok(objects) => Batch {
                path,
                objects: Some(objects),
            },
            Err(e) => {
                error!("skipping {}: {}", path.display(), e);
                summary.failed_files.push(path.clone());
                Batch {
                    path,
                    objects: None,
                }
            }
        }
    }

    fn flush(&self, batch: Batch<S::Object>, summary: &mut ImportSummary) {
        let Some(objects) = batch.objects else {
            return;
        };
        if let Err(e) = self.store.save(&batch.path, &objects) {
            error!("cannot write {}: {}", batch.path.display(), e);
            summary.failed_files.push(batch.path);
        }
    }
}

fn apply<O: ApplicationObject>(
    tracked: &TrackedObject,
    objects: &mut [O],
    path: &Path,
    summary: &mut ImportSummary,
) {
    let Some(object) = objects
        .iter_mut()
        .find(|object| object.identity() == tracked.identity)
    else {
        warn!("{}: object {} not found", path.display(), tracked.identity);
        summary.missing_objects += 1;
        return;
    };

    for tooltip in &tracked.tooltips {
        summary.tooltips += 1;
        let Some(element) = object.elements_mut().iter_mut().find(|element| {
            element.id() == tooltip.element_id && element.element_type() == tooltip.element_type
        }) else {
            warn!(
                "{}: {} {} not found in {}",
                path.display(),
                tooltip.element_type,
                tooltip.element_id,
                tracked.identity
            );
            summary.missing_elements += 1;
            continue;
        };

        let value = tooltip.to_property(false);
        if value.is_empty() {
            summary.unchanged += 1;
            continue;
        }
        match element.set_string_property(PropertyKind::ToolTipMl, &value) {
            Ok(()) => summary.updated += 1,
            Err(e) => {
                error!(
                    "{}: cannot set tooltip of {} {} in {}: {}",
                    path.display(),
                    tooltip.element_type,
                    tooltip.element_id,
                    tracked.identity,
                    e
                );
                summary.rejected += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use super::*;
    use crate::{
        error::Error,
        formats::{ElementDefinition, ObjectDefinition},
        types::{ElementType, ObjectIdentity, Tooltip},
    };

    /// Object store keeping files in memory and recording every save.
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, Vec<ObjectDefinition>>>,
        saves: RefCell<Vec<PathBuf>>,
    }

    impl MemoryStore {
        fn with_file(self, name: &str, objects: Vec<ObjectDefinition>) -> Self {
            self.files
                .borrow_mut()
                .insert(Path::new("root").join(name), objects);
            self
        }

        fn file(&self, name: &str) -> Vec<ObjectDefinition> {
            self.files.borrow()[&Path::new("root").join(name)].clone()
        }
    }

    impl ObjectStore for MemoryStore {
        type Object = ObjectDefinition;

        fn load(&self, path: &Path) -> Result<Vec<ObjectDefinition>, Error> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such file",
                ))
            })
        }

        fn save(&self, path: &Path, objects: &[ObjectDefinition]) -> Result<(), Error> {
            self.saves.borrow_mut().push(path.to_path_buf());
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), objects.to_vec());
            Ok(())
        }
    }

    fn object(object_type: i32, number: i32, ids: &[i32]) -> ObjectDefinition {
        ObjectDefinition {
            object_type: ElementType(object_type),
            number,
            name: String::new(),
            elements: ids
                .iter()
                .map(|id| ElementDefinition::new(ElementType::CONTROL, *id))
                .collect(),
        }
    }

    fn tooltip(id: i32, text: &str) -> Tooltip {
        let mut tooltip = Tooltip::new(ElementType::CONTROL, id);
        tooltip.add_text("ENU", text);
        tooltip
    }

    fn tooltip_of(objects: &[ObjectDefinition], number: i32, id: i32) -> Option<String> {
        objects
            .iter()
            .find(|o| o.number == number)
            .and_then(|o| o.elements.iter().find(|e| e.id == id))
            .and_then(|e| e.properties.get(&PropertyKind::ToolTipMl).cloned())
    }

    #[test]
    fn test_updates_both_elements_of_one_object_only() {
        let store = MemoryStore::default().with_file(
            "Codeunit50000.json",
            vec![object(5, 50000, &[1, 2]), object(5, 50001, &[1, 2])],
        );
        let mut index = ObjectIndex::new();
        let identity = ObjectIdentity::new(5, 50000);
        index.append(identity, "Codeunit50000.json", tooltip(1, "First"));
        index.append(identity, "Codeunit50000.json", tooltip(2, "Second"));

        let summary = ImportMerger::new(&store, "root").merge(&index);
        assert_eq!(summary.updated, 2);

        let objects = store.file("Codeunit50000.json");
        assert_eq!(tooltip_of(&objects, 50000, 1).as_deref(), Some("ENU=First"));
        assert_eq!(tooltip_of(&objects, 50000, 2).as_deref(), Some("ENU=Second"));
        assert_eq!(tooltip_of(&objects, 50001, 1), None);
        assert_eq!(tooltip_of(&objects, 50001, 2), None);
    }

    #[test]
    fn test_missing_object_does_not_stop_the_file() {
        let store = MemoryStore::default().with_file("Pages.json", vec![object(8, 21, &[1])]);
        let mut index = ObjectIndex::new();
        index.append(ObjectIdentity::new(8, 20), "Pages.json", tooltip(1, "Ghost"));
        index.append(ObjectIdentity::new(8, 21), "Pages.json", tooltip(1, "Name"));

        let summary = ImportMerger::new(&store, "root").merge(&index);
        assert_eq!(summary.missing_objects, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(*store.saves.borrow(), vec![Path::new("root").join("Pages.json")]);
        assert_eq!(
            tooltip_of(&store.file("Pages.json"), 21, 1).as_deref(),
            Some("ENU=Name")
        );
    }

    #[test]
    fn test_missing_element_is_skipped() {
        let store = MemoryStore::default().with_file("Pages.json", vec![object(8, 21, &[1])]);
        let mut index = ObjectIndex::new();
        index.append(ObjectIdentity::new(8, 21), "Pages.json", tooltip(9, "Nowhere"));
        let mut action = Tooltip::new(ElementType::ACTION, 1);
        action.add_text("ENU", "Wrong element type");
        index.append(ObjectIdentity::new(8, 21), "Pages.json", action);
        index.append(ObjectIdentity::new(8, 21), "Pages.json", tooltip(1, "Name"));

        let summary = ImportMerger::new(&store, "root").merge(&index);
        assert_eq!(summary.missing_elements, 2);
        assert_eq!(summary.updated, 1);
    }

    #[test]
    fn test_generated_only_tooltip_is_not_written() {
        let store = MemoryStore::default().with_file("Pages.json", vec![object(8, 21, &[1])]);
        let mut index = ObjectIndex::new();
        index.append(
            ObjectIdentity::new(8, 21),
            "Pages.json",
            tooltip(1, "### Customer No."),
        );

        let summary = ImportMerger::new(&store, "root").merge(&index);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(tooltip_of(&store.file("Pages.json"), 21, 1), None);
    }

    #[test]
    fn test_rejected_value_does_not_stop_the_object() {
        let store = MemoryStore::default().with_file("Pages.json", vec![object(8, 21, &[1, 2])]);
        let mut index = ObjectIndex::new();
        let mut bad = Tooltip::new(ElementType::CONTROL, 1);
        bad.add_text("E N", "Bad language");
        index.append(ObjectIdentity::new(8, 21), "Pages.json", bad);
        index.append(ObjectIdentity::new(8, 21), "Pages.json", tooltip(2, "Good"));

        let summary = ImportMerger::new(&store, "root").merge(&index);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.updated, 1);
        let objects = store.file("Pages.json");
        assert_eq!(tooltip_of(&objects, 21, 1), None);
        assert_eq!(tooltip_of(&objects, 21, 2).as_deref(), Some("ENU=Good"));
    }

    #[test]
    fn test_unreadable_file_is_not_saved() {
        let store = MemoryStore::default().with_file("Good.json", vec![object(8, 22, &[1])]);
        let mut index = ObjectIndex::new();
        index.append(ObjectIdentity::new(8, 21), "Missing.json", tooltip(1, "Lost"));
        index.append(ObjectIdentity::new(8, 22), "Good.json", tooltip(1, "Kept"));

        let summary = ImportMerger::new(&store, "root").merge(&index);
        assert_eq!(summary.failed_files, vec![Path::new("root").join("Missing.json")]);
        assert_eq!(summary.files.len(), 2);
        assert_eq!(*store.saves.borrow(), vec![Path::new("root").join("Good.json")]);
        assert_eq!(
            tooltip_of(&store.file("Good.json"), 22, 1).as_deref(),
            Some("ENU=Kept")
        );
    }

    #[test]
    fn test_one_save_per_consecutive_file() {
        let store = MemoryStore::default()
            .with_file("A.json", vec![object(8, 1, &[1]), object(8, 2, &[1])])
            .with_file("B.json", vec![object(8, 3, &[1])]);
        let mut index = ObjectIndex::new();
        index.append(ObjectIdentity::new(8, 1), "A.json", tooltip(1, "One"));
        index.append(ObjectIdentity::new(8, 2), "A.json", tooltip(1, "Two"));
        index.append(ObjectIdentity::new(8, 3), "B.json", tooltip(1, "Three"));

        let summary = ImportMerger::new(&store, "root").merge(&index);
        assert_eq!(summary.updated, 3);
        assert_eq!(
            *store.saves.borrow(),
            vec![Path::new("root").join("A.json"), Path::new("root").join("B.json")]
        );
    }
}
