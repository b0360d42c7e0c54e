use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Everything that can go wrong between picking a file and holding a
/// stored snapshot. Each variant's message is the single line shown to
/// the user before the upload UI resets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Only PDF and DOCX files are allowed.")]
    UnsupportedType,
    #[error("File size must be less than 5MB.")]
    TooLarge,
    #[error("Please sign in before uploading a resume.")]
    SignedOut,
    /// Non-success response whose body carried an `error` message.
    #[error("{0}")]
    Server(String),
    /// Transport, decode, or persistence failure.
    #[error("Upload failed. Please try again.")]
    Failed,
}

/// Local checks, performed before any network call.
pub fn validate_upload(mime: &str, size: u64) -> Result<(), UploadError> {
    if mime != PDF_MIME && mime != DOCX_MIME {
        return Err(UploadError::UnsupportedType);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

/// Preview label for a selected file, e.g. "1.25 MB".
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
