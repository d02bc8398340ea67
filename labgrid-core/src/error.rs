use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glyph input: {0}")]
    Input(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unable to locate any food report categories in the supplied PDF.")]
    NoCategoriesFound,

    #[error("Food PDF validation failed: missing expected categories {}.", .0.join(", "))]
    MissingRequiredHeader(Vec<String>),
}

impl From<serde_json::Error> for LabgridError {
    fn from(err: serde_json::Error) -> Self {
        LabgridError::Input(err.to_string())
    }
}

impl LabgridError {
    /// Returns true for the document-level rejections raised after all pages were parsed
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            LabgridError::NoCategoriesFound | LabgridError::MissingRequiredHeader(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LabgridError>;
