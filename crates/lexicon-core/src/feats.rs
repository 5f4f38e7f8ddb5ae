//! Morphological feature strings (`Case=Nom|Number=Sing`) and their
//! normalized attribute record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("malformed feature pair \"{pair}\" in \"{feats}\": expected Attr=Value")]
    MissingSeparator { pair: String, feats: String },
}

// ---------------------------------------------------------------------------
// Attribute names
// ---------------------------------------------------------------------------

/// The closed set of morphological attributes a lexicon records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    NumType,
    Case,
    NumberPsor,
    PersonPsor,
    Number,
    VerbForm,
    Mood,
    Person,
    Tense,
    Gender,
    Aspect,
    PronType,
    Voice,
}

impl FeatureName {
    pub const ALL: [FeatureName; 13] = [
        FeatureName::NumType,
        FeatureName::Case,
        FeatureName::NumberPsor,
        FeatureName::PersonPsor,
        FeatureName::Number,
        FeatureName::VerbForm,
        FeatureName::Mood,
        FeatureName::Person,
        FeatureName::Tense,
        FeatureName::Gender,
        FeatureName::Aspect,
        FeatureName::PronType,
        FeatureName::Voice,
    ];

    /// Lower-cased attribute name as it appears in a feature string.
    pub fn key(self) -> &'static str {
        match self {
            FeatureName::NumType => "numtype",
            FeatureName::Case => "case",
            FeatureName::NumberPsor => "number[psor]",
            FeatureName::PersonPsor => "person[psor]",
            FeatureName::Number => "number",
            FeatureName::VerbForm => "verbform",
            FeatureName::Mood => "mood",
            FeatureName::Person => "person",
            FeatureName::Tense => "tense",
            FeatureName::Gender => "gender",
            FeatureName::Aspect => "aspect",
            FeatureName::PronType => "prontype",
            FeatureName::Voice => "voice",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.key() == key)
    }
}

// ---------------------------------------------------------------------------
// Feature set
// ---------------------------------------------------------------------------

/// Normalized morphology of one word form. Attributes missing from the raw
/// string hold the empty string; `feats` keeps the raw string as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub feats: Option<String>,
    #[serde(default)]
    pub numtype: String,
    #[serde(default)]
    pub case: String,
    #[serde(default)]
    pub number_psor: String,
    #[serde(default)]
    pub person_psor: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub verbform: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub person: String,
    #[serde(default)]
    pub tense: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub aspect: String,
    #[serde(default)]
    pub prontype: String,
    #[serde(default)]
    pub voice: String,
}

impl FeatureSet {
    pub fn get(&self, name: FeatureName) -> &str {
        match name {
            FeatureName::NumType => &self.numtype,
            FeatureName::Case => &self.case,
            FeatureName::NumberPsor => &self.number_psor,
            FeatureName::PersonPsor => &self.person_psor,
            FeatureName::Number => &self.number,
            FeatureName::VerbForm => &self.verbform,
            FeatureName::Mood => &self.mood,
            FeatureName::Person => &self.person,
            FeatureName::Tense => &self.tense,
            FeatureName::Gender => &self.gender,
            FeatureName::Aspect => &self.aspect,
            FeatureName::PronType => &self.prontype,
            FeatureName::Voice => &self.voice,
        }
    }

    fn slot_mut(&mut self, name: FeatureName) -> &mut String {
        match name {
            FeatureName::NumType => &mut self.numtype,
            FeatureName::Case => &mut self.case,
            FeatureName::NumberPsor => &mut self.number_psor,
            FeatureName::PersonPsor => &mut self.person_psor,
            FeatureName::Number => &mut self.number,
            FeatureName::VerbForm => &mut self.verbform,
            FeatureName::Mood => &mut self.mood,
            FeatureName::Person => &mut self.person,
            FeatureName::Tense => &mut self.tense,
            FeatureName::Gender => &mut self.gender,
            FeatureName::Aspect => &mut self.aspect,
            FeatureName::PronType => &mut self.prontype,
            FeatureName::Voice => &mut self.voice,
        }
    }

    /// True when no recognized attribute carries a value.
    pub fn is_blank(&self) -> bool {
        FeatureName::ALL.iter().all(|name| self.get(*name).is_empty())
    }
}

/// Parse a raw `Attr=Value|Attr=Value` string into a [`FeatureSet`].
///
/// Matching is case-insensitive and values are lower-cased. Each pair splits
/// on its first `=`. Unknown attributes are ignored and a repeated attribute
/// keeps its last value. A pair without `=` is rejected as a whole.
pub fn parse_feats(raw: Option<&str>) -> Result<FeatureSet, FeatureError> {
    let mut set = FeatureSet {
        feats: raw.map(str::to_string),
        ..FeatureSet::default()
    };

    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Ok(set);
    };

    let lowered = raw.to_lowercase();
    for pair in lowered.split('|') {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| FeatureError::MissingSeparator {
                pair: pair.to_string(),
                feats: raw.to_string(),
            })?;
        if let Some(name) = FeatureName::from_key(name) {
            *set.slot_mut(name) = value.to_string();
        }
    }

    Ok(set)
}
