//! Input resolution: normalise a user-typed path and validate the PDF.
//!
//! Paths arrive from an interactive prompt, so they often carry the
//! quoting a file manager's "copy as path" adds and Windows-style
//! backslashes. Normalisation is plain string handling. We validate the
//! PDF magic bytes (`%PDF`) before handing the path to pdfium so callers
//! get a meaningful error rather than an opaque load failure.

use crate::error::Pdf2LongError;
use std::path::PathBuf;
use tracing::debug;

/// Normalise raw user input into a usable file-system path string.
///
/// Trims surrounding whitespace, converts backslashes to forward slashes,
/// and strips one matching pair of surrounding single or double quotes.
pub fn normalize_path_input(raw: &str) -> String {
    let s = raw.trim().replace('\\', "/");
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return s[1..s.len() - 1].to_string();
        }
    }
    s
}

/// Resolve a PDF path, validating existence, readability, and magic bytes.
pub fn resolve_pdf(path_str: &str) -> Result<PathBuf, Pdf2LongError> {
    let path = PathBuf::from(normalize_path_input(path_str));

    if !path.exists() {
        return Err(Pdf2LongError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(Pdf2LongError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2LongError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2LongError::FileNotFound { path });
        }
    }

    debug!("Resolved PDF: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn normalize_strips_double_quotes() {
        assert_eq!(normalize_path_input("\"/tmp/a.pdf\""), "/tmp/a.pdf");
    }

    #[test]
    fn normalize_strips_single_quotes() {
        assert_eq!(normalize_path_input("'/tmp/a b.pdf'"), "/tmp/a b.pdf");
    }

    #[test]
    fn normalize_converts_backslashes() {
        assert_eq!(
            normalize_path_input(r"C:\docs\report.pdf"),
            "C:/docs/report.pdf"
        );
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_path_input("  a.pdf \n"), "a.pdf");
    }

    #[test]
    fn normalize_leaves_unmatched_quote_alone() {
        assert_eq!(normalize_path_input("\"a.pdf"), "\"a.pdf");
    }

    #[test]
    fn normalize_leaves_plain_path_alone() {
        assert_eq!(normalize_path_input("doc.pdf"), "doc.pdf");
    }

    #[test]
    fn resolve_missing_file_errors() {
        let err = resolve_pdf("/definitely/not/a/real/file.pdf").unwrap_err();
        assert!(matches!(err, Pdf2LongError::FileNotFound { .. }));
    }

    #[test]
    fn resolve_non_pdf_errors_with_magic() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello world").unwrap();
        let err = resolve_pdf(f.path().to_str().unwrap()).unwrap_err();
        match err {
            Pdf2LongError::NotAPdf { magic, .. } => assert_eq!(&magic, b"hell"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn resolve_accepts_pdf_magic() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.7\n%rest-of-document").unwrap();
        let path = resolve_pdf(f.path().to_str().unwrap()).unwrap();
        assert_eq!(path, f.path());
    }

    #[test]
    fn resolve_accepts_quoted_existing_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.4").unwrap();
        let quoted = format!("\"{}\"", f.path().display());
        assert!(resolve_pdf(&quoted).is_ok());
    }
}
