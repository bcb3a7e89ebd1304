// ============================================================
// Layer 3 — Categories
// ============================================================
// Two closed sets:
//   DocumentClass — labels the statistical classifier can emit
//   FileFamily    — pseudo-categories assigned by extension alone
//
// Category wraps both so every ClassificationResult carries
// exactly one value from a closed enumeration, never free text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content categories learned from the labeled corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentClass {
    Application,
    Report,
    Complaint,
    Memo,
    Letter,
    Invoice,
}

impl DocumentClass {
    pub const ALL: [DocumentClass; 6] = [
        DocumentClass::Application,
        DocumentClass::Report,
        DocumentClass::Complaint,
        DocumentClass::Memo,
        DocumentClass::Letter,
        DocumentClass::Invoice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentClass::Application => "Application",
            DocumentClass::Report      => "Report",
            DocumentClass::Complaint   => "Complaint",
            DocumentClass::Memo        => "Memo",
            DocumentClass::Letter      => "Letter",
            DocumentClass::Invoice     => "Invoice",
        }
    }
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown document category '{0}'")]
pub struct ParseCategoryError(pub String);

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for DocumentClass {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DocumentClass::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Extension families dispatched without OCR or classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFamily {
    Word,
    Excel,
    PowerPoint,
    Image,
    Audio,
    Video,
}

impl FileFamily {
    pub const ALL: [FileFamily; 6] = [
        FileFamily::Word,
        FileFamily::Excel,
        FileFamily::PowerPoint,
        FileFamily::Image,
        FileFamily::Audio,
        FileFamily::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileFamily::Word       => "Word",
            FileFamily::Excel      => "Excel",
            FileFamily::PowerPoint => "PowerPoint",
            FileFamily::Image      => "Image",
            FileFamily::Audio      => "Audio",
            FileFamily::Video      => "Video",
        }
    }
}

impl fmt::Display for FileFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The category reported for a processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Inferred by the classifier from extracted text.
    Classified(DocumentClass),
    /// Assigned from the extension family.
    Dispatched(FileFamily),
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Classified(class)  => class.as_str(),
            Category::Dispatched(family) => family.as_str(),
        }
    }

    pub fn is_statistical(self) -> bool {
        matches!(self, Category::Classified(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("invoice".parse(), Ok(DocumentClass::Invoice));
        assert_eq!("  MEMO ".parse(), Ok(DocumentClass::Memo));
        assert_eq!("Application".parse(), Ok(DocumentClass::Application));
    }

    #[test]
    fn rejects_unknown_label() {
        let err = "Receipt".parse::<DocumentClass>().unwrap_err();
        assert_eq!(err, ParseCategoryError("Receipt".into()));
    }

    #[test]
    fn category_display_uses_plain_names() {
        assert_eq!(Category::Dispatched(FileFamily::PowerPoint).to_string(), "PowerPoint");
        assert_eq!(Category::Classified(DocumentClass::Report).to_string(), "Report");
        assert!(Category::Classified(DocumentClass::Report).is_statistical());
        assert!(!Category::Dispatched(FileFamily::Word).is_statistical());
    }

    #[test]
    fn family_serializes_lowercase() {
        let json = serde_json::to_string(&FileFamily::PowerPoint).unwrap();
        assert_eq!(json, "\"powerpoint\"");
    }
}
