//! Draft articles as they arrive from the authoring form, and their
//! fail-fast validation.
//!
//! A `PostDraft` carries raw form input (strings, optional file). It
//! becomes a `ValidatedDraft` before any network call happens; a draft
//! that fails validation performs zero I/O.

use super::category::Category;
use super::errors::ValidationError;

/// A binary image as submitted by the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Raw authoring input, exactly as the form hands it over.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    /// Category as a string; matched exactly (case-sensitive) against
    /// the publishable vocabulary during validation.
    pub category: String,
    pub image: Option<ImageFile>,
    pub content: String,
}

/// A draft whose fields have all been checked. Only this type reaches
/// the gateways.
#[derive(Debug, Clone)]
pub struct ValidatedDraft {
    pub title: String,
    pub category: Category,
    pub image: ImageFile,
    pub content: String,
}

impl PostDraft {
    /// Check all four fields, failing on the first violation.
    ///
    /// Check order: title, category, image, content. The "Home"
    /// sentinel is rejected with its own error so the UI can point at
    /// the category selector rather than a generic parse failure.
    pub fn validate(self) -> Result<ValidatedDraft, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let category = match self.category.as_str() {
            "" => return Err(ValidationError::MissingCategory),
            "Home" => return Err(ValidationError::ReservedCategory),
            raw => raw
                .parse::<Category>()
                .map_err(|_| ValidationError::UnknownCategory(raw.to_string()))?,
        };

        let image = match self.image {
            Some(image) if !image.is_empty() => image,
            _ => return Err(ValidationError::MissingImage),
        };

        if self.content.trim().is_empty() {
            return Err(ValidationError::MissingContent);
        }

        Ok(ValidatedDraft {
            title: self.title,
            category,
            image,
            content: self.content,
        })
    }
}
