//! Errors surfaced by the transformation pipeline.
//!
//! Collaborators (codecs, trait bodies, mapping loaders) report failures as
//! `anyhow::Error`; the pipeline wraps them here together with the name of
//! the class or resource being processed. A failure only ever concerns that
//! one object: callers processing batches keep going with the rest.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    /// The class could not be read from its source.
    #[error("Failed to read class {name}: {source:#}")]
    Read {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The transformed class could not be serialized.
    #[error("Failed to write class {name}: {source:#}")]
    Write {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A trait returned an error; later traits were not applied.
    #[error("Trait failed on {name}: {source:#}")]
    Trait {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming was requested but no symbol table is configured.
    #[error("Renaming requested without a symbol table")]
    MissingSymbolTable,

    /// A class modifier was run with no stages and no renaming.
    #[error("No visitors configured and renaming not requested")]
    EmptyPipeline,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TransformError {
    /// Name of the class or resource the error concerns, if any.
    pub fn object_name(&self) -> Option<&str> {
        match self {
            Self::Read { name, .. } | Self::Write { name, .. } | Self::Trait { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_name_and_cause() {
        let err = TransformError::Read {
            name: "a/B".into(),
            source: anyhow::anyhow!("truncated input"),
        };
        let msg = err.to_string();
        assert!(msg.contains("a/B"));
        assert!(msg.contains("truncated input"));
        assert_eq!(err.object_name(), Some("a/B"));
    }

    #[test]
    fn test_source_chain_is_preserved() {
        let err = TransformError::Trait {
            name: "a/B".into(),
            source: anyhow::anyhow!("inner").context("outer"),
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("outer"));
        assert!(err.to_string().contains("outer: inner"));
    }

    #[test]
    fn test_precondition_errors_have_no_object() {
        assert_eq!(TransformError::MissingSymbolTable.object_name(), None);
        assert_eq!(TransformError::EmptyPipeline.object_name(), None);
    }
}
