use std::path::Path;

use crate::error::AppError;

/// File extensions accepted for ingestion.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["txt", "pdf"];

/// Returns the lowercased extension after the final dot, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

pub fn allowed_file(filename: &str) -> bool {
    file_extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Extracts text from an uploaded file that already passed the extension
/// gate. PDFs go through `pdf-extract` on a blocking thread, everything else
/// is read as UTF-8 with undecodable bytes dropped.
pub async fn extract_text(path: &Path) -> Result<String, AppError> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        extract_pdf_text(path).await
    } else {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).replace('\u{FFFD}', ""))
    }
}

/// Concatenated text layer of every page. Pages without extractable text
/// contribute nothing; a document that fails to parse is an error.
async fn extract_pdf_text(path: &Path) -> Result<String, AppError> {
    let pdf_bytes = tokio::fs::read(path).await?;

    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf_bytes))
        .await?
        .map_err(|err| AppError::PdfParse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_gate_accepts_txt_and_pdf_only() {
        assert!(allowed_file("notes.txt"));
        assert!(allowed_file("Report.PDF"));
        assert!(!allowed_file("payload.exe"));
        assert!(!allowed_file("archive.tar.gz"));
        assert!(!allowed_file("no_extension"));
    }

    #[test]
    fn extension_is_taken_after_the_final_dot() {
        assert_eq!(file_extension("a.b.txt"), Some("txt".to_string()));
        assert_eq!(file_extension("UPPER.TXT"), Some("txt".to_string()));
        assert_eq!(file_extension("no_extension"), None);
    }

    #[tokio::test]
    async fn plain_text_is_read_verbatim() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "hello world").expect("write");

        let text = extract_text(file.path()).await.expect("extract");
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn undecodable_bytes_are_ignored() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"caf\xff\xfee ok").expect("write");

        let text = extract_text(file.path()).await.expect("extract");
        assert_eq!(text, "cafe ok");
    }

    #[tokio::test]
    async fn garbage_pdf_reports_a_parse_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .expect("temp file");
        file.write_all(b"this is not a pdf").expect("write");

        let err = extract_text(file.path()).await.expect_err("should fail");
        assert!(matches!(err, AppError::PdfParse(_)));
    }
}
