use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::{AggregationMode, Ingested};
use crate::error::LexiconError;
use crate::types::{Corpus, Lexicon, Sentence};

/// Coarse POS tags left out of a lexicon unless configured otherwise.
pub const DEFAULT_EXCLUDED_POS: &[&str] = &["NUM", "PUNCT"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    #[serde(default)]
    pub mode: AggregationMode,
    #[serde(default = "default_excluded_pos")]
    pub exclude_pos: Vec<String>,
}

fn default_excluded_pos() -> Vec<String> {
    DEFAULT_EXCLUDED_POS.iter().map(|p| p.to_string()).collect()
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mode: AggregationMode::default(),
            exclude_pos: default_excluded_pos(),
        }
    }
}

impl BuildOptions {
    pub fn is_excluded(&self, pos: &str) -> bool {
        self.exclude_pos.iter().any(|p| p == pos)
    }
}

/// Counters collected while building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub sentences: usize,
    pub tokens: usize,
    pub skipped: usize,
    pub entries: usize,
    pub wordforms: usize,
}

/// Drives tokens into a [`Lexicon`] in input order.
pub struct LexiconBuilder {
    options: BuildOptions,
    lexicon: Lexicon,
    report: BuildReport,
}

impl LexiconBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            lexicon: Lexicon::new(),
            report: BuildReport::default(),
        }
    }

    pub fn add_corpus(&mut self, corpus: &Corpus) -> Result<(), LexiconError> {
        for sentence in &corpus.sentences {
            self.add_sentence(sentence)?;
        }
        Ok(())
    }

    pub fn add_sentence(&mut self, sentence: &Sentence) -> Result<(), LexiconError> {
        let sentence_index = self.report.sentences;
        self.report.sentences += 1;

        for (token_index, token) in sentence.tokens.iter().enumerate() {
            self.report.tokens += 1;
            if self.options.is_excluded(&token.pos) {
                self.report.skipped += 1;
                continue;
            }

            let outcome = self
                .lexicon
                .ingest(token, self.options.mode)
                .map_err(|source| LexiconError::Token {
                    sentence: sentence_index,
                    token: token_index,
                    id: token.id.clone(),
                    source,
                })?;

            match outcome {
                Ingested::NewEntry => {
                    debug!(lemma = %token.lemma, pos = %token.pos, "new entry");
                }
                Ingested::NewWordForm => {
                    debug!(
                        lemma = %token.lemma,
                        pos = %token.pos,
                        text = %token.text,
                        "new word form"
                    );
                }
                Ingested::Counted | Ingested::Unchanged => {}
            }
        }

        Ok(())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn finish(mut self) -> (Lexicon, BuildReport) {
        self.report.entries = self.lexicon.len();
        self.report.wordforms = self.lexicon.wordform_count();
        info!(
            mode = %self.options.mode,
            sentences = self.report.sentences,
            tokens = self.report.tokens,
            skipped = self.report.skipped,
            entries = self.report.entries,
            wordforms = self.report.wordforms,
            "lexicon built"
        );
        (self.lexicon, self.report)
    }
}

/// Build a lexicon from a whole corpus in one pass.
pub fn build_lexicon(
    corpus: &Corpus,
    options: &BuildOptions,
) -> Result<(Lexicon, BuildReport), LexiconError> {
    let mut builder = LexiconBuilder::new(options.clone());
    builder.add_corpus(corpus)?;
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;
    use pretty_assertions::assert_eq;

    fn sentence(tokens: &[(&str, &str, &str)]) -> Sentence {
        Sentence {
            sentence_text: String::new(),
            tokens: tokens
                .iter()
                .enumerate()
                .map(|(i, (text, lemma, pos))| Token {
                    id: (i + 1).to_string(),
                    text: text.to_string(),
                    lemma: lemma.to_string(),
                    pos: pos.to_string(),
                    pos_finegrained: None,
                    feats: None,
                    start_char: "0".into(),
                    end_char: "0".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn default_options_skip_num_and_punct() {
        let options = BuildOptions::default();
        assert!(options.is_excluded("NUM"));
        assert!(options.is_excluded("PUNCT"));
        assert!(!options.is_excluded("NOUN"));
        assert!(!options.is_excluded("num"));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: BuildOptions = serde_json::from_str(r#"{"mode": "homographs"}"#).unwrap();
        assert_eq!(options.mode, AggregationMode::Homographs);
        assert_eq!(options.exclude_pos, vec!["NUM", "PUNCT"]);
    }

    #[test]
    fn builder_accumulates_across_sentences() {
        let mut builder = LexiconBuilder::new(BuildOptions::default());
        builder
            .add_sentence(&sentence(&[("Cats", "cat", "NOUN"), ("2", "2", "NUM")]))
            .unwrap();
        assert_eq!(builder.lexicon().len(), 1);

        builder
            .add_sentence(&sentence(&[("cat", "cat", "NOUN"), ("!", "!", "PUNCT")]))
            .unwrap();
        let (lexicon, report) = builder.finish();

        assert_eq!(lexicon.get("cat", "NOUN").unwrap().wordforms.len(), 2);
        assert_eq!(
            report,
            BuildReport {
                sentences: 2,
                tokens: 4,
                skipped: 2,
                entries: 1,
                wordforms: 2,
            }
        );
    }
}
