//! Payment proof upload

use std::{
    fmt::{self, Debug, Formatter},
    path::Path,
};

use thiserror::Error;

/// Multipart field the proof image is sent in.
pub const PROOF_FIELD: &str = "payment_proof";

/// Largest proof the server accepts, in bytes.
pub const MAX_PROOF_BYTES: usize = 2 * 1024 * 1024;

/// Message shown when a proof is submitted without a file.
pub const NO_FILE_SELECTED: &str = "Please choose a payment proof file.";

/// Image formats accepted as proof of payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofFormat {
    /// JPEG image.
    Jpeg,

    /// PNG image.
    Png,

    /// GIF image.
    Gif,
}

impl ProofFormat {
    /// Format for a file extension, if accepted.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// MIME type sent with the upload.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// Errors choosing a proof file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The file is not a JPEG, PNG or GIF image.
    #[error("Unsupported file type for {0}. Accepted formats: JPG, PNG, GIF (max 2MB).")]
    UnsupportedFormat(String),

    /// Submit was pressed with nothing selected.
    #[error("Please choose a payment proof file.")]
    NoFileSelected,
}

/// A proof image chosen for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ProofFile {
    file_name: String,
    format: ProofFormat,
    bytes: Vec<u8>,
}

impl Debug for ProofFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofFile")
            .field("file_name", &self.file_name)
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ProofFile {
    /// Wrap file contents, deriving the format from the file name's extension.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::UnsupportedFormat`] for anything but JPEG, PNG or GIF.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();

        let format = Path::new(&file_name)
            .extension()
            .and_then(|extension| extension.to_str())
            .and_then(ProofFormat::from_extension)
            .ok_or_else(|| UploadError::UnsupportedFormat(file_name.clone()))?;

        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }

    /// Original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Image format.
    pub fn format(&self) -> ProofFormat {
        self.format
    }

    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the file exceeds what the server will accept.
    pub fn exceeds_limit(&self) -> bool {
        self.bytes.len() > MAX_PROOF_BYTES
    }
}

/// Upload widget state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing chosen yet.
    #[default]
    Idle,

    /// A file is chosen and ready to send.
    FileSelected(ProofFile),

    /// The file is being sent.
    Uploading(ProofFile),

    /// The server accepted the proof.
    Succeeded(String),

    /// The upload failed or was rejected locally.
    Failed(String),
}

impl UploadState {
    /// Choose a file, discarding any previous message or error.
    pub fn select(&mut self, file: ProofFile) {
        *self = Self::FileSelected(file);
    }

    /// Start uploading the selected file and hand it back for sending.
    ///
    /// Without a selected file the state becomes [`UploadState::Failed`] and nothing is
    /// returned. While an upload is already running nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::NoFileSelected`] when there is nothing to send.
    pub fn begin(&mut self) -> Result<Option<ProofFile>, UploadError> {
        match std::mem::take(self) {
            Self::FileSelected(file) => {
                *self = Self::Uploading(file.clone());

                Ok(Some(file))
            }
            uploading @ Self::Uploading(_) => {
                *self = uploading;

                Ok(None)
            }
            Self::Idle | Self::Succeeded(_) | Self::Failed(_) => {
                *self = Self::Failed(NO_FILE_SELECTED.to_string());

                Err(UploadError::NoFileSelected)
            }
        }
    }

    /// Finish the running upload successfully. Ignored unless uploading.
    pub fn succeed(&mut self, message: impl Into<String>) -> bool {
        self.finish(Self::Succeeded(message.into()))
    }

    /// Finish the running upload with an error. Ignored unless uploading.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        self.finish(Self::Failed(message.into()))
    }

    fn finish(&mut self, terminal: Self) -> bool {
        if !self.is_uploading() {
            return false;
        }

        *self = terminal;

        true
    }

    /// Whether an upload is in flight.
    pub fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading(_))
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::FileSelected(_))
    }

    /// Success message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded(message) => Some(message),
            _ => None,
        }
    }

    /// Error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
