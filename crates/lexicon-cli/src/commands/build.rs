use std::path::{Path, PathBuf};

use lexicon_core::{
    build_lexicon, load_corpus_files, to_json, write_lexicon, AggregationMode, BuildOptions,
};
use tracing::info;

use crate::reader::{read_config_file, read_corpus_files, read_project_config, LexiconConfig};

pub struct BuildArgs<'a> {
    pub path: &'a Path,
    pub output: Option<&'a Path>,
    pub mode: Option<&'a str>,
    pub exclude_pos: &'a [String],
    pub config: Option<&'a Path>,
}

/// Load the project config: an explicit `--config` wins over one found in
/// the input directory.
pub fn load_config(
    path: &Path,
    explicit: Option<&Path>,
) -> Result<Option<LexiconConfig>, String> {
    match explicit {
        Some(config_path) => read_config_file(config_path).map(Some),
        None if path.is_dir() => read_project_config(path),
        None => Ok(None),
    }
}

/// Command-line flags take precedence over config values.
pub fn resolve_options(
    args: &BuildArgs,
    config: Option<&LexiconConfig>,
) -> Result<BuildOptions, String> {
    let mut options = BuildOptions::default();

    if let Some(mode) = args.mode {
        options.mode = mode.parse::<AggregationMode>()?;
    } else if let Some(mode) = config.and_then(|c| c.mode) {
        options.mode = mode;
    }

    if !args.exclude_pos.is_empty() {
        options.exclude_pos = args.exclude_pos.to_vec();
    } else if let Some(pos) = config.and_then(|c| c.exclude_pos.clone()) {
        options.exclude_pos = pos;
    }

    Ok(options)
}

pub fn run_build(args: &BuildArgs) -> Result<String, String> {
    let config = load_config(args.path, args.config)?;
    let options = resolve_options(args, config.as_ref())?;

    let files = read_corpus_files(args.path, config.as_ref())?;
    if files.is_empty() {
        return Err(format!(
            "No corpus files (.json) found at: {}",
            args.path.display()
        ));
    }

    if let Some(name) = config.as_ref().and_then(|c| c.name.as_deref()) {
        info!(project = name, "using project config");
    }
    info!(
        input = %args.path.display(),
        files = files.len(),
        mode = %options.mode,
        "creating lexicon"
    );

    let corpus = load_corpus_files(files.iter().map(|f| (f.path.as_str(), f.content.as_str())))
        .map_err(|e| e.to_string())?;
    let (lexicon, report) = build_lexicon(&corpus, &options).map_err(|e| e.to_string())?;

    let output: Option<PathBuf> = args
        .output
        .map(Path::to_path_buf)
        .or_else(|| config.as_ref().and_then(LexiconConfig::output_path));

    match output {
        Some(out_path) => {
            let written = write_lexicon(&lexicon, &out_path).map_err(|e| e.to_string())?;
            Ok(format!(
                "Written {} entries ({} word forms, {} of {} tokens skipped) to {}",
                report.entries,
                report.wordforms,
                report.skipped,
                report.tokens,
                written.display()
            ))
        }
        None => to_json(&lexicon).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args<'a>(mode: Option<&'a str>, exclude_pos: &'a [String]) -> BuildArgs<'a> {
        BuildArgs {
            path: Path::new("corpus.json"),
            output: None,
            mode,
            exclude_pos,
            config: None,
        }
    }

    #[test]
    fn defaults_without_config() {
        let options = resolve_options(&args(None, &[]), None).unwrap();
        assert_eq!(options, BuildOptions::default());
    }

    #[test]
    fn config_fills_unset_flags() {
        let config: LexiconConfig =
            serde_yaml::from_str("mode: homographs\nexclude_pos: [PUNCT, SYM]\n").unwrap();
        let options = resolve_options(&args(None, &[]), Some(&config)).unwrap();
        assert_eq!(options.mode, AggregationMode::Homographs);
        assert_eq!(options.exclude_pos, vec!["PUNCT".to_string(), "SYM".to_string()]);
    }

    #[test]
    fn flags_win_over_config() {
        let config: LexiconConfig =
            serde_yaml::from_str("mode: homographs\nexclude_pos: [PUNCT]\n").unwrap();
        let exclude = vec!["X".to_string()];
        let options = resolve_options(&args(Some("compat"), &exclude), Some(&config)).unwrap();
        assert_eq!(options.mode, AggregationMode::Compat);
        assert_eq!(options.exclude_pos, exclude);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(resolve_options(&args(Some("merge"), &[]), None).is_err());
    }
}
