use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Startup failures. Every variant is fatal: the app cannot run without its
/// model artifacts.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The compressed model could not be read, inflated, or written out.
    #[error("Error decompressing the model file {} into {}: {source}", .src.display(), .dst.display())]
    Decompress {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An artifact could not be read or deserialized.
    #[error("Error loading the {artifact} from {}: {source:#}", .path.display())]
    Load {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Artifacts were loaded but were not fitted against the same columns.
    #[error("The {artifact} expects {found} features but the feature list has {expected}")]
    Mismatch {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_shows_full_context_chain() {
        let source = anyhow::anyhow!("expected value at line 1").context("parsing JSON");
        let err = BootstrapError::Load {
            artifact: "feature columns",
            path: PathBuf::from("artifacts/feature_columns.json"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("feature columns"));
        assert!(msg.contains("artifacts/feature_columns.json"));
        assert!(msg.contains("parsing JSON: expected value at line 1"));
    }

    #[test]
    fn mismatch_names_both_sizes() {
        let err = BootstrapError::Mismatch {
            artifact: "model",
            expected: 8,
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "The model expects 5 features but the feature list has 8"
        );
    }
}
