//! Firestore Errors

use location_registry::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirestoreError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Firestore returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Document has no name")]
    MissingName,

    #[error("Document is missing field `{0}`")]
    MissingField(&'static str),
}

impl FirestoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FirestoreError::Status { status: 404, .. })
    }

    /// Failures of list calls
    pub fn into_read_error(self) -> StoreError {
        StoreError::unavailable(self.to_string())
    }

    /// Failures of create/update/delete calls
    pub fn into_write_error(self) -> StoreError {
        if self.is_not_found() {
            StoreError::not_found(self.to_string())
        } else {
            StoreError::write(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_store_not_found() {
        let error = FirestoreError::Status {
            status: 404,
            message: "No document to update".to_string(),
        };
        assert!(matches!(error.into_write_error(), StoreError::NotFound(_)));

        let error = FirestoreError::Status {
            status: 403,
            message: "Missing or insufficient permissions.".to_string(),
        };
        assert!(matches!(error.into_write_error(), StoreError::Write(_)));
        assert!(matches!(
            FirestoreError::MissingName.into_read_error(),
            StoreError::Unavailable(_)
        ));
    }
}
