use std::path::Path;

use lexicon_core::{validate_corpus, SchemaDiagnostic};

use crate::commands::build::{load_config, resolve_options, BuildArgs};
use crate::reader::read_corpus_files;

pub struct ValidateArgs<'a> {
    pub path: &'a Path,
    pub format: &'a str,
    pub exclude_pos: &'a [String],
    pub config: Option<&'a Path>,
}

/// Validate corpus files; returns the report and the number of problems found.
///
/// Files and the POS filter are resolved the same way `build` resolves them.
pub fn run_validate(args: &ValidateArgs) -> Result<(String, usize), String> {
    let input_path = args.path;
    let config = load_config(input_path, args.config)?;
    let options = resolve_options(
        &BuildArgs {
            path: input_path,
            output: None,
            mode: None,
            exclude_pos: args.exclude_pos,
            config: args.config,
        },
        config.as_ref(),
    )?;
    let files = read_corpus_files(input_path, config.as_ref())?;

    if files.is_empty() {
        return Err(format!(
            "No corpus files (.json) found at: {}",
            input_path.display()
        ));
    }

    let diagnostics: Vec<SchemaDiagnostic> = files
        .iter()
        .flat_map(|f| validate_corpus(&f.content, &f.path, &options))
        .collect();
    let error_count = diagnostics.len();
    let file_count = files.len();

    if args.format == "json" {
        let output = serde_json::json!({
            "diagnostics": diagnostics,
            "summary": {
                "errors": error_count,
                "files": file_count,
            }
        });
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        return Ok((json, error_count));
    }

    // Human-readable format
    let mut lines: Vec<String> = diagnostics.iter().map(|d| format!("error: {d}")).collect();

    let error_word = if error_count == 1 { "error" } else { "errors" };
    let file_word = if file_count == 1 { "file" } else { "files" };
    lines.push(format!("{error_count} {error_word} in {file_count} {file_word}."));

    Ok((lines.join("\n"), error_count))
}
