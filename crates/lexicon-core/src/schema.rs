//! Corpus loading and shape validation.
//!
//! The document is read into a `serde_json::Value` first and then checked
//! sentence by sentence and token by token, so every problem can be reported
//! with its position (`sentences[2].tokens[4]`) instead of a bare line/column.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::builder::BuildOptions;
use crate::feats::parse_feats;
use crate::types::{Corpus, Sentence, Token};

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDiagnostic {
    pub file: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub token_id: Option<String>,
    pub message: String,
}

impl fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.file, self.path, self.message)?;
        if let Some(ref id) = self.token_id {
            write!(f, " (token id \"{id}\")")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{file}: invalid JSON: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{first} ({total} schema problem(s) in total)")]
    Invalid {
        first: SchemaDiagnostic,
        total: usize,
    },
}

// ---------------------------------------------------------------------------
// Raw document shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename = "Corpus")]
struct RawCorpus {
    sentences: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename = "Sentence")]
struct RawSentence {
    sentence_text: String,
    tokens: Vec<Value>,
}

struct Checker<'a> {
    file: &'a str,
    /// When set, feature strings of tokens these options keep are parsed too.
    features: Option<&'a BuildOptions>,
    diagnostics: Vec<SchemaDiagnostic>,
}

impl<'a> Checker<'a> {
    fn report(&mut self, path: String, token_id: Option<String>, message: impl ToString) {
        self.diagnostics.push(SchemaDiagnostic {
            file: self.file.to_string(),
            path,
            token_id,
            message: message.to_string(),
        });
    }

    fn check_document(&mut self, root: Value) -> Corpus {
        let raw = match RawCorpus::deserialize(root) {
            Ok(raw) => raw,
            Err(e) => {
                self.report("$".into(), None, e);
                return Corpus::default();
            }
        };

        let sentences = raw
            .sentences
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| self.check_sentence(format!("sentences[{i}]"), value))
            .collect();

        Corpus { sentences }
    }

    fn check_sentence(&mut self, path: String, value: Value) -> Option<Sentence> {
        let raw = match RawSentence::deserialize(value) {
            Ok(raw) => raw,
            Err(e) => {
                self.report(path, None, e);
                return None;
            }
        };

        let mut tokens = Vec::with_capacity(raw.tokens.len());
        for (j, value) in raw.tokens.into_iter().enumerate() {
            let token_path = format!("{path}.tokens[{j}]");
            let token_id = value.get("id").and_then(Value::as_str).map(str::to_string);

            match Token::deserialize(value) {
                Ok(token) => {
                    if let Some(options) = self.features {
                        if !options.is_excluded(&token.pos) {
                            if let Err(e) = parse_feats(token.feats.as_deref()) {
                                self.report(format!("{token_path}.feats"), token_id, e);
                            }
                        }
                    }
                    tokens.push(token);
                }
                Err(e) => self.report(token_path, token_id, e),
            }
        }

        Some(Sentence {
            sentence_text: raw.sentence_text,
            tokens,
        })
    }
}

fn check(
    content: &str,
    file: &str,
    features: Option<&BuildOptions>,
) -> Result<(Corpus, Vec<SchemaDiagnostic>), serde_json::Error> {
    let root: Value = serde_json::from_str(content)?;
    let mut checker = Checker {
        file,
        features,
        diagnostics: Vec::new(),
    };
    let corpus = checker.check_document(root);
    Ok((corpus, checker.diagnostics))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load a corpus document, rejecting it if any sentence or token is malformed.
///
/// Only the shape is checked here. Feature strings are parsed by the builder,
/// which skips filtered tokens and reports errors with their position.
pub fn load_corpus(content: &str, file: &str) -> Result<Corpus, SchemaError> {
    let (corpus, mut diagnostics) = check(content, file, None).map_err(|source| SchemaError::Json {
        file: file.to_string(),
        source,
    })?;

    if diagnostics.is_empty() {
        return Ok(corpus);
    }

    let total = diagnostics.len();
    Err(SchemaError::Invalid {
        first: diagnostics.swap_remove(0),
        total,
    })
}

/// Load several corpus documents and concatenate their sentences in order.
pub fn load_corpus_files<'a, I>(files: I) -> Result<Corpus, SchemaError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut corpus = Corpus::default();
    for (file, content) in files {
        corpus.sentences.extend(load_corpus(content, file)?.sentences);
    }
    Ok(corpus)
}

/// Collect every schema problem in a document instead of stopping at the first.
///
/// Unlike [`load_corpus`], this also parses the feature string of every token
/// a build with `options` would aggregate, so `validate` agrees with `build`.
pub fn validate_corpus(
    content: &str,
    file: &str,
    options: &BuildOptions,
) -> Vec<SchemaDiagnostic> {
    match check(content, file, Some(options)) {
        Ok((_, diagnostics)) => diagnostics,
        Err(e) => vec![SchemaDiagnostic {
            file: file.to_string(),
            path: "$".into(),
            token_id: None,
            message: format!("invalid JSON: {e}"),
        }],
    }
}
