//! Entry aggregation: decides per token whether to create an entry, add a
//! word form, or count an existing one.

use std::collections::btree_map::Entry as MapEntry;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::feats::{parse_feats, FeatureError};
use crate::types::{entry_key, Entry, Lexicon, Token, WordForm};

// ---------------------------------------------------------------------------
// Aggregation mode
// ---------------------------------------------------------------------------

/// How repeated surface texts inside one entry are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Word forms are keyed by surface text alone. A repeat with different
    /// features bumps the first-seen form; an identical repeat is not counted.
    /// Entry frequency stays at 1.
    #[default]
    Compat,
    /// Word forms are keyed by (surface text, feature string). Later analyses
    /// of a seen text are stored as `text#2`, `text#3`, ... and every token
    /// is counted on both its word form and its entry.
    Homographs,
}

impl AggregationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationMode::Compat => "compat",
            AggregationMode::Homographs => "homographs",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compat" => Ok(AggregationMode::Compat),
            "homographs" => Ok(AggregationMode::Homographs),
            other => Err(format!(
                "unknown aggregation mode \"{other}\" (expected compat or homographs)"
            )),
        }
    }
}

/// What a single `ingest` call did to the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
    NewEntry,
    NewWordForm,
    Counted,
    Unchanged,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

impl Lexicon {
    /// Fold one token into the lexicon. The caller filters out tokens whose
    /// POS should not be recorded. A feature error leaves the lexicon as it was.
    pub fn ingest(
        &mut self,
        token: &Token,
        mode: AggregationMode,
    ) -> Result<Ingested, FeatureError> {
        let key = entry_key(&token.lemma, &token.pos);
        trace!(key = %key, text = %token.text, "ingesting token");

        match self.entries.entry(key) {
            MapEntry::Vacant(slot) => {
                let entry = Entry::from_token(slot.key().clone(), token)?;
                slot.insert(entry);
                Ok(Ingested::NewEntry)
            }
            MapEntry::Occupied(mut slot) => slot.get_mut().absorb(token, mode),
        }
    }
}

enum Slot {
    Found(String),
    Vacant(String),
}

impl Entry {
    fn from_token(key: String, token: &Token) -> Result<Self, FeatureError> {
        let features = parse_feats(token.feats.as_deref())?;
        let mut entry = Entry {
            lemma: token.lemma.clone(),
            pos: token.pos.clone(),
            key,
            pos_finegrained: token.pos_finegrained.clone(),
            freq: 1,
            wordforms: Default::default(),
        };
        entry
            .wordforms
            .insert(token.text.clone(), WordForm::new(&token.text, features));
        Ok(entry)
    }

    fn absorb(&mut self, token: &Token, mode: AggregationMode) -> Result<Ingested, FeatureError> {
        match mode {
            AggregationMode::Compat => self.absorb_compat(token),
            AggregationMode::Homographs => self.absorb_homograph(token),
        }
    }

    fn absorb_compat(&mut self, token: &Token) -> Result<Ingested, FeatureError> {
        if let Some(existing) = self.wordforms.get_mut(&token.text) {
            if existing.feats() != token.feats.as_deref() {
                existing.freq += 1;
                return Ok(Ingested::Counted);
            }
            return Ok(Ingested::Unchanged);
        }

        let features = parse_feats(token.feats.as_deref())?;
        self.wordforms
            .insert(token.text.clone(), WordForm::new(&token.text, features));
        Ok(Ingested::NewWordForm)
    }

    fn absorb_homograph(&mut self, token: &Token) -> Result<Ingested, FeatureError> {
        let outcome = match self.locate(&token.text, token.feats.as_deref()) {
            Slot::Found(key) => {
                if let Some(existing) = self.wordforms.get_mut(&key) {
                    existing.freq += 1;
                }
                Ingested::Counted
            }
            Slot::Vacant(key) => {
                let features = parse_feats(token.feats.as_deref())?;
                self.wordforms
                    .insert(key, WordForm::new(&token.text, features));
                Ingested::NewWordForm
            }
        };
        self.freq += 1;
        Ok(outcome)
    }

    /// Walk `text`, `text#2`, `text#3`, ... until the analysis with matching
    /// features is found or a free key turns up.
    fn locate(&self, text: &str, feats: Option<&str>) -> Slot {
        let mut key = text.to_string();
        let mut n = 1;
        loop {
            match self.wordforms.get(&key) {
                None => return Slot::Vacant(key),
                Some(wf) if wf.wordform == text && wf.feats() == feats => {
                    return Slot::Found(key)
                }
                Some(_) => {
                    n += 1;
                    key = format!("{text}#{n}");
                }
            }
        }
    }

    /// Every word form recorded for a surface text, in homograph order.
    pub fn analyses<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a WordForm> + 'a {
        self.wordforms.values().filter(move |wf| wf.wordform == text)
    }
}
