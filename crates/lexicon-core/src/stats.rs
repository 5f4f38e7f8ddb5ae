use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Lexicon;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFrequency {
    pub key: String,
    pub wordforms: usize,
    pub freq: u64,
}

/// Summary figures for a built lexicon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconStats {
    pub entries: usize,
    pub wordforms: usize,
    /// Sum of every word form frequency.
    pub total_freq: u64,
    /// Extra analyses of a surface text within one entry (`text#2`, ...).
    pub homographs: usize,
    pub by_pos: BTreeMap<String, usize>,
    pub top_entries: Vec<EntryFrequency>,
}

impl LexiconStats {
    pub fn compute(lexicon: &Lexicon, top: usize) -> Self {
        let mut stats = LexiconStats {
            entries: lexicon.len(),
            ..Default::default()
        };
        let mut ranked = Vec::with_capacity(lexicon.len());

        for entry in lexicon.entries.values() {
            *stats.by_pos.entry(entry.pos.clone()).or_default() += 1;
            stats.wordforms += entry.wordforms.len();

            let mut entry_freq = 0;
            let mut analyses: BTreeMap<&str, usize> = BTreeMap::new();
            for wf in entry.wordforms.values() {
                entry_freq += wf.freq;
                *analyses.entry(wf.wordform.as_str()).or_default() += 1;
            }
            stats.homographs += analyses.values().map(|n| n - 1).sum::<usize>();
            stats.total_freq += entry_freq;
            ranked.push(EntryFrequency {
                key: entry.key.clone(),
                wordforms: entry.wordforms.len(),
                freq: entry_freq,
            });
        }

        // Stable sort keeps key order among ties.
        ranked.sort_by(|a, b| b.freq.cmp(&a.freq));
        ranked.truncate(top);
        stats.top_entries = ranked;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregationMode;
    use crate::types::Token;

    fn token(text: &str, lemma: &str, pos: &str, feats: Option<&str>) -> Token {
        Token {
            id: "1".into(),
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            pos_finegrained: None,
            feats: feats.map(str::to_string),
            start_char: "0".into(),
            end_char: "0".into(),
        }
    }

    #[test]
    fn counts_and_ranks() {
        let mut lexicon = Lexicon::new();
        let mode = AggregationMode::Homographs;
        for t in [
            token("saw", "see", "VERB", Some("Tense=Past")),
            token("sees", "see", "VERB", None),
            token("saw", "saw", "NOUN", Some("Number=Sing")),
            token("saw", "saw", "NOUN", Some("Number=Sing|Case=Acc")),
            token("saw", "saw", "NOUN", Some("Number=Sing")),
        ] {
            lexicon.ingest(&t, mode).unwrap();
        }

        let stats = LexiconStats::compute(&lexicon, 1);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.wordforms, 4);
        assert_eq!(stats.total_freq, 5);
        assert_eq!(stats.homographs, 1);
        assert_eq!(stats.by_pos["VERB"], 1);
        assert_eq!(
            stats.top_entries,
            vec![EntryFrequency {
                key: "saw_NOUN".into(),
                wordforms: 2,
                freq: 3,
            }]
        );
    }

    #[test]
    fn literal_numbered_text_is_not_a_homograph() {
        let mut lexicon = Lexicon::new();
        let mode = AggregationMode::Homographs;
        for t in [
            token("c", "c", "X", Some("Case=Nom")),
            token("c", "c", "X", Some("Case=Gen")),
            token("c#2", "c", "X", None),
        ] {
            lexicon.ingest(&t, mode).unwrap();
        }

        let keys: Vec<_> = lexicon.get("c", "X").unwrap().wordforms.keys().cloned().collect();
        assert_eq!(keys, vec!["c", "c#2", "c#2#2"]);

        let stats = LexiconStats::compute(&lexicon, 10);
        assert_eq!(stats.wordforms, 3);
        assert_eq!(stats.homographs, 1);
    }

    #[test]
    fn empty_lexicon() {
        let stats = LexiconStats::compute(&Lexicon::new(), 10);
        assert_eq!(stats, LexiconStats::default());
    }
}
