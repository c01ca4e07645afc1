use thiserror::Error;

/// Policy controlling how much the generation capability may rely on
/// external or general knowledge versus the user-supplied seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundingStrategy {
    /// Use only the seed material.
    Strict,
    /// Blend the seed with the model's general knowledge.
    General,
    /// Additionally use a live web-search capability; responses carry
    /// citations.
    Grounded,
}

/// Normalized user input for course generation: pasted text or an uploaded
/// document as raw bytes plus a declared media type.
///
/// No local text extraction happens for documents; extraction, if any, is
/// the generation capability's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseSeed {
    Text(String),
    Document { data: Vec<u8>, media_type: String },
}

impl CourseSeed {
    /// Create a text seed, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::EmptyText` if the text is empty after trimming.
    pub fn from_text(text: impl Into<String>) -> Result<Self, SeedError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SeedError::EmptyText);
        }
        Ok(Self::Text(trimmed.to_string()))
    }

    /// Create a document seed from raw bytes and a declared media type.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::EmptyDocument` for zero-byte documents and
    /// `SeedError::MissingMediaType` when no media type is declared.
    pub fn from_document(
        data: Vec<u8>,
        media_type: impl Into<String>,
    ) -> Result<Self, SeedError> {
        let media_type = media_type.into();
        if media_type.trim().is_empty() {
            return Err(SeedError::MissingMediaType);
        }
        if data.is_empty() {
            return Err(SeedError::EmptyDocument);
        }
        Ok(Self::Document { data, media_type })
    }

    /// Returns true for document seeds.
    #[must_use]
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeedError {
    #[error("seed text cannot be empty")]
    EmptyText,

    #[error("seed document is empty")]
    EmptyDocument,

    #[error("seed document has no media type")]
    MissingMediaType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_seed_is_trimmed() {
        let seed = CourseSeed::from_text("  photosynthesis \n").unwrap();
        assert_eq!(seed, CourseSeed::Text("photosynthesis".into()));
    }

    #[test]
    fn blank_text_seed_is_rejected() {
        assert_eq!(
            CourseSeed::from_text("   ").unwrap_err(),
            SeedError::EmptyText
        );
    }

    #[test]
    fn document_seed_requires_media_type() {
        let err = CourseSeed::from_document(vec![1, 2, 3], " ").unwrap_err();
        assert_eq!(err, SeedError::MissingMediaType);
    }

    #[test]
    fn document_seed_rejects_empty_bytes() {
        let err = CourseSeed::from_document(Vec::new(), "application/pdf").unwrap_err();
        assert_eq!(err, SeedError::EmptyDocument);
    }
}
