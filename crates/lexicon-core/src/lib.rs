pub mod aggregate;
pub mod builder;
pub mod error;
pub mod feats;
pub mod output;
pub mod schema;
pub mod stats;
pub mod types;

pub use aggregate::{AggregationMode, Ingested};
pub use builder::{build_lexicon, BuildOptions, BuildReport, LexiconBuilder, DEFAULT_EXCLUDED_POS};
pub use error::LexiconError;
pub use feats::{parse_feats, FeatureError, FeatureName, FeatureSet};
pub use output::{output_path, read_lexicon, to_json, write_lexicon};
pub use schema::{load_corpus, load_corpus_files, validate_corpus, SchemaDiagnostic, SchemaError};
pub use stats::{EntryFrequency, LexiconStats};
pub use types::*;
