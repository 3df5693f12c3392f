//! ZIP packaging of a run's artifacts.
//!
//! The archive is built entirely in memory: one Deflate-compressed entry
//! `<name>.jpg` per artifact, in production order, and nothing else.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::pipeline::ArtifactSet;

/// Errors that can occur while packaging artifacts.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The run produced no artifacts, so there is nothing to download.
    #[error("No QR codes were generated")]
    NothingToPackage,

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error while writing an entry.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Package every artifact into a ZIP archive.
///
/// Returns [`PackageError::NothingToPackage`] for an empty set; callers
/// should treat that as "no download available".
pub fn package(artifacts: &ArtifactSet) -> Result<Vec<u8>, PackageError> {
    if artifacts.is_empty() {
        return Err(PackageError::NothingToPackage);
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for artifact in artifacts {
        writer.start_file(artifact.file_name(), options)?;
        writer.write_all(&artifact.jpeg)?;
    }

    let cursor = writer.finish()?;
    let bytes = cursor.into_inner();
    tracing::debug!(entries = artifacts.len(), bytes = bytes.len(), "packaged archive");
    Ok(bytes)
}

/// Entry names of a ZIP archive, in directory order.
pub fn entry_names(archive: &[u8]) -> Result<Vec<String>, PackageError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    let mut names = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        names.push(zip.by_index(i)?.name().to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{process, BatchProcessor};
    use crate::render::RenderOptions;
    use crate::table::InputRow;
    use std::io::Read;

    fn small_set(labels: &[&str]) -> ArtifactSet {
        let mut opts = RenderOptions::default();
        opts.size = 64;
        opts.caption_height = 16;
        let rows: Vec<_> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| InputRow::new(*l, format!("https://{i}.example")))
            .collect();
        BatchProcessor::new(opts).process(&rows).artifacts
    }

    #[test]
    fn test_package_empty_set() {
        assert!(matches!(
            package(&ArtifactSet::new()),
            Err(PackageError::NothingToPackage)
        ));
    }

    #[test]
    fn test_package_entry_names() {
        let set = small_set(&["Store A", "Store A", "Kiosk"]);
        let bytes = package(&set).unwrap();
        let names = entry_names(&bytes).unwrap();
        assert_eq!(names, vec!["Store A.jpg", "Store A_1.jpg", "Kiosk.jpg"]);
    }

    #[test]
    fn test_package_entries_hold_jpegs() {
        let set = small_set(&["Gate"]);
        let bytes = package(&set).unwrap();

        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = zip.by_name("Gate.jpg").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, set.get("Gate").unwrap().jpeg);
    }

    #[test]
    fn test_scenario_archive() {
        let rows = vec![
            InputRow::new("Store A", "https://a.example"),
            InputRow::new("Store A", "https://b.example"),
            InputRow::new("Kiosk", ""),
        ];
        let (artifacts, _) = process(&rows);
        let names = entry_names(&package(&artifacts).unwrap()).unwrap();
        assert_eq!(names.len(), artifacts.len());
        assert_eq!(names, vec!["Store A.jpg", "Store A_1.jpg"]);
    }

    #[test]
    fn test_entry_names_rejects_garbage() {
        assert!(matches!(entry_names(b"not a zip"), Err(PackageError::Zip(_))));
    }
}
