//! Objects seen during one export or import run, keyed by identity.

use std::collections::{BTreeMap, btree_map};

use crate::types::{ObjectIdentity, Tooltip, TrackedObject};

/// Ordered collection of [`TrackedObject`]s.
///
/// Iteration follows [`ObjectIdentity`] order (type, then number), so both
/// the exchange file and the merge visit objects deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectIndex {
    objects: BTreeMap<ObjectIdentity, TrackedObject>,
}

impl ObjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the object for `identity`, creating it with `filename` when it
    /// has not been seen yet. An existing object keeps its original filename.
    pub fn get_or_create(
        &mut self,
        identity: ObjectIdentity,
        filename: &str,
    ) -> &mut TrackedObject {
        self.objects
            .entry(identity)
            .or_insert_with(|| TrackedObject::new(identity, filename))
    }

    /// Appends a tooltip to the object for `identity`.
    pub fn append(&mut self, identity: ObjectIdentity, filename: &str, tooltip: Tooltip) {
        self.get_or_create(identity, filename).tooltips.push(tooltip);
    }

    pub fn get(&self, identity: &ObjectIdentity) -> Option<&TrackedObject> {
        self.objects.get(identity)
    }

    pub fn contains(&self, identity: &ObjectIdentity) -> bool {
        self.objects.contains_key(identity)
    }

    pub fn iter(&self) -> btree_map::Values<'_, ObjectIdentity, TrackedObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Total number of tooltips across all objects.
    pub fn tooltip_count(&self) -> usize {
        self.objects.values().map(|obj| obj.tooltips.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ObjectIndex {
    type Item = &'a TrackedObject;
    type IntoIter = btree_map::Values<'a, ObjectIdentity, TrackedObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
