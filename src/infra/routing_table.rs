// ============================================================
// Layer 6 — Routing Table
// ============================================================
// Destination directories under the base directory:
//
//   <base>/
//     OCR_Documents/
//     MS_Office_Documents/{Word,Excel,PowerPoint}/
//     Media_Files/{Images,Audio,Video}/
//
// Every FileFamily maps to exactly one directory; the match in
// `destination` is exhaustive so a new family cannot be added
// without a home.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::category::FileFamily;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    base_dir:      PathBuf,
    ocr_documents: PathBuf,
    word:          PathBuf,
    excel:         PathBuf,
    powerpoint:    PathBuf,
    images:        PathBuf,
    audio:         PathBuf,
    video:         PathBuf,
}

impl RoutingTable {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let office = base_dir.join("MS_Office_Documents");
        let media = base_dir.join("Media_Files");
        Self {
            ocr_documents: base_dir.join("OCR_Documents"),
            word:          office.join("Word"),
            excel:         office.join("Excel"),
            powerpoint:    office.join("PowerPoint"),
            images:        media.join("Images"),
            audio:         media.join("Audio"),
            video:         media.join("Video"),
            base_dir,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn ocr_documents(&self) -> &Path {
        &self.ocr_documents
    }

    pub fn destination(&self, family: FileFamily) -> &Path {
        match family {
            FileFamily::Word => &self.word,
            FileFamily::Excel => &self.excel,
            FileFamily::PowerPoint => &self.powerpoint,
            FileFamily::Image => &self.images,
            FileFamily::Audio => &self.audio,
            FileFamily::Video => &self.video,
        }
    }

    /// Create every directory of the layout. Existing ones are left alone.
    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.ocr_documents)?;
        for family in FileFamily::ALL {
            fs::create_dir_all(self.destination(family))?;
        }
        tracing::info!(base = %self.base_dir.display(), "directory layout ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_land_in_their_own_directories() {
        let table = RoutingTable::new("/srv/docs");
        assert_eq!(
            table.destination(FileFamily::Word),
            Path::new("/srv/docs/MS_Office_Documents/Word")
        );
        assert_eq!(
            table.destination(FileFamily::Audio),
            Path::new("/srv/docs/Media_Files/Audio")
        );
        assert_eq!(table.ocr_documents(), Path::new("/srv/docs/OCR_Documents"));

        let mut dirs: Vec<_> = FileFamily::ALL.iter().map(|f| table.destination(*f)).collect();
        dirs.sort();
        dirs.dedup();
        assert_eq!(dirs.len(), FileFamily::ALL.len());
    }

    #[test]
    fn ensure_directories_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let table = RoutingTable::new(tmp.path());
        table.ensure_directories().unwrap();
        table.ensure_directories().unwrap();

        assert!(table.ocr_documents().is_dir());
        for family in FileFamily::ALL {
            assert!(table.destination(family).is_dir(), "{family}");
        }
    }
}
