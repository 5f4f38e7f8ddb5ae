use std::fs;
use std::path::{Path, PathBuf};

use lexicon_core::AggregationMode;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "lexicon.config.yaml";

/// A corpus file with its path and content.
pub struct CorpusFile {
    pub path: String,
    pub content: String,
}

/// Project configuration from lexicon.config.yaml.
#[derive(Debug, Default, Deserialize)]
pub struct LexiconConfig {
    pub name: Option<String>,
    pub sources: Option<Vec<String>>,
    pub mode: Option<AggregationMode>,
    pub exclude_pos: Option<Vec<String>>,
    pub output: Option<PathBuf>,
    /// Directory holding the config file; relative paths in it start here.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl LexiconConfig {
    /// The configured output path, resolved against the config's directory.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|out| {
            if out.is_absolute() {
                out.clone()
            } else {
                self.base_dir.join(out)
            }
        })
    }
}

/// Read corpus files from a path (file or directory).
pub fn read_corpus_files(
    input_path: &Path,
    config: Option<&LexiconConfig>,
) -> Result<Vec<CorpusFile>, String> {
    if !input_path.exists() {
        return Err(format!("Path does not exist: {}", input_path.display()));
    }

    if input_path.is_file() {
        return Ok(vec![read_file(input_path)?]);
    }

    if input_path.is_dir() {
        return match config.and_then(|c| c.sources.as_ref()) {
            Some(patterns) if !patterns.is_empty() => read_from_patterns(patterns, input_path),
            _ => scan_directory(input_path),
        };
    }

    Err(format!(
        "Path is neither a file nor a directory: {}",
        input_path.display()
    ))
}

/// Read project config from lexicon.config.yaml if it exists.
pub fn read_project_config(dir_path: &Path) -> Result<Option<LexiconConfig>, String> {
    let config_path = dir_path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    read_config_file(&config_path).map(Some)
}

/// Read an explicitly named config file.
pub fn read_config_file(config_path: &Path) -> Result<LexiconConfig, String> {
    let content = fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read config {}: {}", config_path.display(), e))?;
    let mut config: LexiconConfig = serde_yaml::from_str(&content)
        .map_err(|e| format!("Invalid YAML config {}: {}", config_path.display(), e))?;
    config.base_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(config)
}

fn read_file(path: &Path) -> Result<CorpusFile, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(CorpusFile {
        path: path.to_string_lossy().to_string(),
        content,
    })
}

fn glob_sorted(pattern: &Path) -> Result<Vec<PathBuf>, String> {
    let pattern_str = pattern.to_string_lossy().replace('\\', "/");
    let entries = glob::glob(&pattern_str)
        .map_err(|e| format!("Invalid glob pattern '{}': {}", pattern_str, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => return Err(format!("Glob error: {}", e)),
        }
    }
    paths.sort();
    Ok(paths)
}

fn scan_directory(dir_path: &Path) -> Result<Vec<CorpusFile>, String> {
    glob_sorted(&dir_path.join("**/*.json"))?
        .iter()
        .map(|path| read_file(path))
        .collect()
}

fn read_from_patterns(patterns: &[String], base_dir: &Path) -> Result<Vec<CorpusFile>, String> {
    let mut files: Vec<CorpusFile> = Vec::new();
    let mut seen: std::collections::HashSet<PathBuf> = std::collections::HashSet::new();

    for pattern in patterns {
        for path in glob_sorted(&base_dir.join(pattern))? {
            if seen.insert(path.clone()) {
                files.push(read_file(&path)?);
            }
        }
    }

    Ok(files)
}
