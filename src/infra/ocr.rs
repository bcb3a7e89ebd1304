// ============================================================
// Layer 6 — OCR and Rasterization Processes
// ============================================================
// Production implementations of the OCR seams, driving external
// binaries:
//
//   Tesseract  tesseract stdin stdout -l eng --psm 6 --oem 3
//              (PNG piped in, text read back; no files touched)
//   Poppler    pdfinfo <pdf>                       → "Pages: N"
//              pdftoppm -f i -l i -r DPI -png -singlefile <pdf> <tmp>/page
//
// Every call runs under a timeout. On expiry the child is killed and
// OcrError::Timeout returned; the caller decides whether to retry.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::traits::{OcrEngine, PageRasterizer};
use crate::error::OcrError;

/// Tesseract command-line OCR engine.
#[derive(Debug, Clone)]
pub struct Tesseract {
    pub binary:   PathBuf,
    pub language: String,
    /// Page segmentation mode (6 = single uniform block of text).
    pub psm:      u8,
    /// OCR engine mode (3 = default engine).
    pub oem:      u8,
    pub timeout:  Duration,
}

impl OcrEngine for Tesseract {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("--oem")
            .arg(self.oem.to_string());

        let stdout = run_with_timeout(cmd, Some(image), self.timeout)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Poppler utilities (`pdfinfo`, `pdftoppm`) as a page rasterizer.
#[derive(Debug, Clone)]
pub struct Poppler {
    pub pdfinfo:  PathBuf,
    pub pdftoppm: PathBuf,
    pub dpi:      u32,
    pub timeout:  Duration,
}

impl PageRasterizer for Poppler {
    fn page_count(&self, path: &Path) -> Result<usize, OcrError> {
        let mut cmd = Command::new(&self.pdfinfo);
        cmd.arg(path);
        let out = run_with_timeout(cmd, None, self.timeout)?;
        parse_page_count(&String::from_utf8_lossy(&out)).ok_or_else(|| OcrError::Failed {
            program: self.pdfinfo.display().to_string(),
            detail:  "no 'Pages:' line in output".into(),
        })
    }

    fn render_page(&self, path: &Path, page: usize) -> Result<Vec<u8>, OcrError> {
        // removed when `scratch` drops
        let scratch = tempfile::tempdir()?;
        let root = scratch.path().join("page");

        let mut cmd = Command::new(&self.pdftoppm);
        cmd.arg("-f")
            .arg(page.to_string())
            .arg("-l")
            .arg(page.to_string())
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg("-singlefile")
            .arg(path)
            .arg(&root);
        run_with_timeout(cmd, None, self.timeout)?;

        Ok(std::fs::read(root.with_extension("png"))?)
    }
}

/// Extract N from pdfinfo's `Pages:          N` line.
pub fn parse_page_count(pdfinfo_output: &str) -> Option<usize> {
    pdfinfo_output
        .lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|rest| rest.trim().parse().ok())
}

/// Run `cmd`, optionally feeding `stdin`, and return its stdout.
///
/// The pipeline itself is synchronous; each call drives the child on a
/// throwaway current-thread runtime. stdin is fed concurrently with
/// collecting stdout/stderr, so a chatty child never blocks on a full pipe.
pub fn run_with_timeout(
    cmd:     Command,
    stdin:   Option<&[u8]>,
    timeout: Duration,
) -> Result<Vec<u8>, OcrError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_child(cmd, stdin, timeout))
}

async fn run_child(
    mut cmd: Command,
    stdin:   Option<&[u8]>,
    timeout: Duration,
) -> Result<Vec<u8>, OcrError> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();

    cmd.stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| OcrError::Spawn {
        program: program.clone(),
        source,
    })?;

    let pipe = child.stdin.take();
    let feed = async move {
        if let (Some(bytes), Some(mut pipe)) = (stdin, pipe) {
            // BrokenPipe: the child exited without reading all of its input
            match pipe.write_all(bytes).await {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                _ => {}
            }
        }
        Ok(())
    };
    let run = async {
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        fed?;
        output
    };

    // on expiry `run` is dropped with the child, which kill_on_drop terminates
    let output = match tokio::time::timeout(timeout, run).await {
        Ok(output) => output?,
        Err(_) => {
            tracing::warn!(%program, timeout_secs = timeout.as_secs_f32(), "OCR process timed out");
            return Err(OcrError::Timeout { program, timeout });
        }
    };

    if !output.status.success() {
        return Err(OcrError::Failed {
            program,
            detail: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn page_count_is_parsed_from_pdfinfo() {
        let out = "Title:          Scan\nProducer:       scanner\nPages:          12\nEncrypted:      no\n";
        assert_eq!(parse_page_count(out), Some(12));
        assert_eq!(parse_page_count("Title: x\n"), None);
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let cmd = Command::new("/definitely/not/a/real/ocr-binary");
        let err = run_with_timeout(cmd, None, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn stdin_is_piped_through() {
        let cmd = Command::new("cat");
        let out = run_with_timeout(cmd, Some(b"scanned text"), Duration::from_secs(5)).unwrap();
        assert_eq!(out, b"scanned text");
    }

    #[cfg(unix)]
    #[test]
    fn slow_process_times_out() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");
        let started = Instant::now();
        let err = run_with_timeout(cmd, None, Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, OcrError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_reports_stderr() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo bad page >&2; exit 3");
        let err = run_with_timeout(cmd, None, Duration::from_secs(5)).unwrap_err();
        match err {
            OcrError::Failed { detail, .. } => assert!(detail.contains("bad page"), "{detail}"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
