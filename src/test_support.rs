// ============================================================
// Test Support — Fakes and Fixtures
// ============================================================
// Shared fixtures for unit tests: in-memory OCR seams and a small
// labeled corpus with clearly separable vocabulary per category.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::category::DocumentClass;
use crate::domain::document::LabeledDocument;
use crate::domain::traits::{OcrEngine, PageRasterizer};
use crate::error::OcrError;

enum Reply {
    Fixed(String),
    EchoBytes,
    Timeout(Duration),
}

pub struct FakeOcr {
    reply:  Reply,
    images: Mutex<Vec<Vec<u8>>>,
}

impl FakeOcr {
    pub fn replying(text: &str) -> Self {
        Self::with(Reply::Fixed(text.to_string()))
    }

    /// Returns the image bytes as text; pairs with [`FakeRasterizer`].
    pub fn echo_page_marker() -> Self {
        Self::with(Reply::EchoBytes)
    }

    pub fn timing_out(after: Duration) -> Self {
        Self::with(Reply::Timeout(after))
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            images: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    pub fn last_image(&self) -> Option<Vec<u8>> {
        self.images.lock().unwrap().last().cloned()
    }
}

impl OcrEngine for FakeOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        self.images.lock().unwrap().push(image.to_vec());
        match &self.reply {
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::EchoBytes => Ok(String::from_utf8_lossy(image).into_owned()),
            Reply::Timeout(after) => Err(OcrError::Timeout {
                program: "fake-ocr".into(),
                timeout: *after,
            }),
        }
    }
}

/// Renders page `n` as the bytes of `"page-n "`.
pub struct FakeRasterizer {
    pages: usize,
}

impl FakeRasterizer {
    pub fn pages(pages: usize) -> Self {
        Self { pages }
    }
}

impl PageRasterizer for FakeRasterizer {
    fn page_count(&self, _path: &Path) -> Result<usize, OcrError> {
        Ok(self.pages)
    }

    fn render_page(&self, _path: &Path, page: usize) -> Result<Vec<u8>, OcrError> {
        Ok(format!("page-{page} ").into_bytes())
    }
}

/// Ten documents per category for Application and Report, with
/// distinct vocabularies.
pub fn two_class_corpus() -> Vec<LabeledDocument> {
    let applications = [
        "I hereby apply for the position of clerk",
        "application for a business licence renewal",
        "please accept my application for the bursary",
        "I wish to apply for a permit to trade",
        "application letter for the vacant post of driver",
        "kindly consider my application for funding",
        "apply for registration of a new company",
        "my application for study leave is attached",
        "request to apply for an internship position",
        "application form for a land permit enclosed",
    ];
    let reports = [
        "quarterly report on network infrastructure rollout",
        "annual report of the ministry budget performance",
        "the report summarises connectivity statistics",
        "monthly progress report on rural broadband",
        "audit report findings and recommendations",
        "report on the performance of postal services",
        "statistics report for the fiscal quarter",
        "status report covering infrastructure projects",
        "the findings of this report indicate growth",
        "final report on broadband statistics and performance",
    ];

    applications
        .iter()
        .map(|t| LabeledDocument::new(*t, DocumentClass::Application))
        .chain(reports.iter().map(|t| LabeledDocument::new(*t, DocumentClass::Report)))
        .collect()
}
