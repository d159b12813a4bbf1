//! Cache validity policies and source fingerprints.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use segview_core::LabelValue;
use serde::{Deserialize, Serialize};

use crate::Result;

/// How the cache decides that an existing artifact may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// Any existing file is a hit. Artifacts are never checked against the
    /// source, so replacing the source volume serves stale results until the
    /// artifacts are invalidated.
    #[default]
    Presence,
    /// A file is a hit only if the recorded source fingerprint still matches
    /// the source volume on disk.
    Fingerprint,
}

/// Identity of the source volume an artifact set was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFingerprint {
    /// Source volume path as configured.
    pub source: PathBuf,
    /// Label value the artifacts isolate.
    pub label: String,
    /// Source size in bytes.
    pub len: u64,
    /// Source modification time, seconds since the Unix epoch.
    pub modified_secs: u64,
    /// Sub-second part of the modification time.
    pub modified_nanos: u32,
}

impl SourceFingerprint {
    /// Fingerprints `source` as it currently is on disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `source` cannot be inspected.
    pub fn of(source: &Path, label: LabelValue) -> Result<Self> {
        let meta = fs::metadata(source)?;
        let modified = meta
            .modified()?
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Ok(Self {
            source: source.to_path_buf(),
            label: label.to_string(),
            len: meta.len(),
            modified_secs: modified.as_secs(),
            modified_nanos: modified.subsec_nanos(),
        })
    }

    /// Reads a manifest, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the manifest exists but cannot be read, or a
    /// manifest error if it does not parse.
    pub fn load(manifest: &Path) -> Result<Option<Self>> {
        if !manifest.exists() {
            return Ok(None);
        }
        let reader = BufReader::new(File::open(manifest)?);
        Ok(Some(serde_json::from_reader(reader)?))
    }

    /// Writes this fingerprint as a manifest.
    ///
    /// The manifest is written next to its final path and renamed into
    /// place, so readers never see a partial file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the manifest cannot be written.
    pub fn save(&self, manifest: &Path) -> Result<()> {
        let mut tmp = manifest.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.flush()?;
        }
        fs::rename(&tmp, manifest)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_policy_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CachePolicy::Fingerprint).unwrap(),
            "\"fingerprint\""
        );
        let policy: CachePolicy = serde_json::from_str("\"presence\"").unwrap();
        assert_eq!(policy, CachePolicy::Presence);
    }

    #[test]
    fn test_manifest_save_and_load() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("ct.nrrd");
        fs::write(&source, b"NRRD0004").unwrap();
        let label = LabelValue::new(3.0).unwrap();

        let fp = SourceFingerprint::of(&source, label).unwrap();
        assert_eq!(fp.len, 8);
        assert_eq!(fp.label, "3.0");

        let manifest = dir.path().join("segment_3.0.manifest.json");
        assert!(SourceFingerprint::load(&manifest).unwrap().is_none());
        fp.save(&manifest).unwrap();
        assert_eq!(SourceFingerprint::load(&manifest).unwrap(), Some(fp));
    }

    #[test]
    fn test_save_replaces_manifest_without_leftovers() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("ct.nrrd");
        fs::write(&source, b"NRRD0004").unwrap();
        let manifest = dir.path().join("segment_1.0.manifest.json");
        fs::write(&manifest, b"{\"source\": \"ct.nr").unwrap();

        let fp = SourceFingerprint::of(&source, LabelValue::new(1.0).unwrap()).unwrap();
        fp.save(&manifest).unwrap();
        assert_eq!(SourceFingerprint::load(&manifest).unwrap(), Some(fp));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("ct.nrrd");
        let label = LabelValue::new(1.0).unwrap();
        fs::write(&source, b"short").unwrap();
        let before = SourceFingerprint::of(&source, label).unwrap();
        fs::write(&source, b"a longer replacement volume").unwrap();
        let after = SourceFingerprint::of(&source, label).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let dir = tempdir().unwrap();
        let label = LabelValue::new(1.0).unwrap();
        assert!(SourceFingerprint::of(&dir.path().join("nope.nrrd"), label).is_err());
    }
}
