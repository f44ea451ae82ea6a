use std::path::PathBuf;
use thiserror::Error;

/// Raw input that cannot be mapped onto the engine's vocabulary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid {field}: {value:?} is not one of [{expected}]")]
    UnknownCategory {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid {field}: blank entries are not allowed")]
    BlankValue { field: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::UnknownCategory { field, .. } => field,
            ValidationError::BlankValue { field } => field,
        }
    }
}

/// A scoring weight that would make scores meaningless
#[derive(Error, Debug, Clone, PartialEq)]
#[error("scoring.weights.{field} must be a finite, non-negative number (got {value})")]
pub struct InvalidWeight {
    pub field: &'static str,
    pub value: f64,
}

/// A catalog that must not be served
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog entry #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),

    #[error("catalog entry {id} lists no occasions")]
    NoOccasions { id: String },

    #[error("catalog entry {id} has a blank lifestyle tag")]
    BlankLifestyleTag { id: String },

    #[error("catalog entry {id} has no {dimension} rating for {category}")]
    IncompleteFit {
        id: String,
        dimension: &'static str,
        category: &'static str,
    },

    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("malformed TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a whole matching call
#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::UnknownCategory {
            field: "skin_tone",
            value: "purple".to_string(),
            expected: "warm, cool".to_string(),
        };
        assert_eq!(err.field(), "skin_tone");
        assert_eq!(
            err.to_string(),
            "invalid skin_tone: \"purple\" is not one of [warm, cool]"
        );
    }

    #[test]
    fn test_match_error_is_transparent() {
        let err: MatchError = ValidationError::BlankValue { field: "lifestyle" }.into();
        assert_eq!(err.to_string(), "invalid lifestyle: blank entries are not allowed");
    }
}
