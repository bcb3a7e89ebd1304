//! Classification-and-routing pipeline for incoming office documents.
//!
//! Scanned images and PDFs are OCR'd and classified by content with a
//! TF-IDF + multinomial Naive Bayes model; office and media files are
//! filed into per-family directories by extension.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;

#[cfg(test)]
pub(crate) mod test_support;
