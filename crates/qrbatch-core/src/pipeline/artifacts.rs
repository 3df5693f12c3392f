//! Named artifacts produced by one run.

use indexmap::IndexMap;
use serde::Serialize;

/// A rendered QR image bound to a unique name within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Unique name within the run, without extension.
    pub name: String,
    /// Text drawn beneath the code.
    pub caption: String,
    /// The encoded target.
    pub target: String,
    /// 1-based data row this artifact came from.
    pub row: usize,
    pub width: u32,
    pub height: u32,
    /// JPEG-encoded image.
    #[serde(skip)]
    pub jpeg: Vec<u8>,
}

impl Artifact {
    /// Archive entry name for this artifact.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, ARTIFACT_EXTENSION)
    }
}

/// File extension of artifact entries.
pub const ARTIFACT_EXTENSION: &str = "jpg";

/// Artifacts keyed by unique name, in the order they were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    entries: IndexMap<String, Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// First name from `base`, `base_1`, `base_2`, ... not yet in the set.
    pub fn resolve_name(&self, base: &str) -> String {
        if !self.entries.contains_key(base) {
            return base.to_string();
        }
        let mut counter = 1usize;
        loop {
            let candidate = format!("{base}_{counter}");
            if !self.entries.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Insert an artifact under a name derived from `base`, returning the
    /// name it was stored under. The artifact's `name` field is overwritten.
    pub fn insert_unique(&mut self, base: &str, mut artifact: Artifact) -> String {
        let name = self.resolve_name(base);
        artifact.name = name.clone();
        self.entries.insert(name.clone(), artifact);
        name
    }

    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in production order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.entries.values()
    }
}

impl<'a> IntoIterator for &'a ArtifactSet {
    type Item = &'a Artifact;
    type IntoIter = indexmap::map::Values<'a, String, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
pub(crate) fn test_artifact(row: usize) -> Artifact {
    Artifact {
        name: String::new(),
        caption: String::new(),
        target: format!("https://{row}.example"),
        row,
        width: 1,
        height: 1,
        jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
    }
}
