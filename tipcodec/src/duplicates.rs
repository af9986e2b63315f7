//! Detection of repeated translations across one export run.

use std::collections::HashSet;

use sha1::{Digest, Sha1};

/// Remembers every `(language, text)` pair written during a run.
///
/// The tracker stores SHA-1 digests rather than the texts themselves. A
/// digest collision would flag an unrelated pair as a duplicate; the flag is
/// advisory, so that is acceptable.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    seen: HashSet<[u8; 20]>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the pair was already seen, otherwise records it.
    pub fn is_duplicate(&mut self, language: &str, text: &str) -> bool {
        !self.seen.insert(fingerprint(language, text))
    }

    /// Number of distinct pairs seen so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

fn fingerprint(language: &str, text: &str) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(language.as_bytes());
    hasher.update(text.as_bytes());
    hasher.finalize().into()
}
