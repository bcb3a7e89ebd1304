// ============================================================
// Layer 4 — Word Document Text
// ============================================================
// A .docx file is a ZIP archive of XML parts; docx-rs parses it
// into a typed tree:
//
//   Document
//     └── Paragraph
//           └── Run
//                 └── Text (the actual words)
//
// Paragraph text is joined with newlines; empty paragraphs are
// dropped. Used by the `extract` command only: routing never opens
// Word files, it moves them.

use std::fs;
use std::path::Path;

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::error::{PipelineError, Result};

pub fn docx_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| PipelineError::extraction(path, "open", e))?;

    let docx = read_docx(&bytes)
        .map_err(|e| PipelineError::extraction(path, "decode", format!("{e:?}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Runs in one paragraph belong to the same sentence: no separator.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}
