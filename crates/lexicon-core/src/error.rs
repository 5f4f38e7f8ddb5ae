//! Error types for the lexicon builder

use std::path::PathBuf;

use thiserror::Error;

use crate::feats::FeatureError;
use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("sentence {sentence}, token {token} (id \"{id}\"): {source}")]
    Token {
        sentence: usize,
        token: usize,
        id: String,
        #[source]
        source: FeatureError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serialized lexicon is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl LexiconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LexiconError::Io {
            path: path.into(),
            source,
        }
    }
}
