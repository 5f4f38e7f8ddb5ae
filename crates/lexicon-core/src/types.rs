use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::feats::FeatureSet;

// ---------------------------------------------------------------------------
// Input corpus (deserialized from the annotated sentence document)
// ---------------------------------------------------------------------------

/// One annotated word occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub text: String,
    pub lemma: String,
    pub pos: String,
    #[serde(default)]
    pub pos_finegrained: Option<String>,
    #[serde(default)]
    pub feats: Option<String>,
    pub start_char: String,
    pub end_char: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub sentence_text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub sentences: Vec<Sentence>,
}

impl Corpus {
    /// Number of tokens across all sentences.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Output lexicon (serialized to JSON — field names match the published format)
// ---------------------------------------------------------------------------

/// One distinct surface realization of a lemma+POS entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordForm {
    pub wordform: String,
    #[serde(default)]
    pub freq: u64,
    #[serde(flatten)]
    pub features: FeatureSet,
}

impl WordForm {
    pub fn new(text: &str, features: FeatureSet) -> Self {
        Self {
            wordform: text.to_string(),
            freq: 1,
            features,
        }
    }

    /// The raw feature string this word form was first seen with.
    pub fn feats(&self) -> Option<&str> {
        self.features.feats.as_deref()
    }
}

/// All word forms sharing one lemma and coarse part-of-speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub lemma: String,
    pub pos: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub pos_finegrained: Option<String>,
    #[serde(default)]
    pub freq: u64,
    pub wordforms: BTreeMap<String, WordForm>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub entries: BTreeMap<String, Entry>,
}

/// Synthetic entry key: `"{lemma}_{pos}"`.
pub fn entry_key(lemma: &str, pos: &str) -> String {
    format!("{lemma}_{pos}")
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, lemma: &str, pos: &str) -> Option<&Entry> {
        self.entries.get(&entry_key(lemma, pos))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of word forms across every entry.
    pub fn wordform_count(&self) -> usize {
        self.entries.values().map(|e| e.wordforms.len()).sum()
    }
}
