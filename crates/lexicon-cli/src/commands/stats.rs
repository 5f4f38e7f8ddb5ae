use std::path::Path;

use lexicon_core::{read_lexicon, LexiconStats};

pub fn run_stats(lexicon_path: &Path, format: &str, top: usize) -> Result<String, String> {
    let lexicon = read_lexicon(lexicon_path).map_err(|e| e.to_string())?;
    let stats = LexiconStats::compute(&lexicon, top);

    if format == "json" {
        return serde_json::to_string_pretty(&stats)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    let mut lines = vec![
        format!("entries:    {}", stats.entries),
        format!("word forms: {}", stats.wordforms),
        format!("frequency:  {}", stats.total_freq),
        format!("homographs: {}", stats.homographs),
    ];

    if !stats.by_pos.is_empty() {
        lines.push(String::new());
        lines.push("by part of speech:".into());
        for (pos, count) in &stats.by_pos {
            lines.push(format!("  {pos:<8} {count}"));
        }
    }

    if !stats.top_entries.is_empty() {
        lines.push(String::new());
        lines.push(format!("top {} entries:", stats.top_entries.len()));
        for e in &stats.top_entries {
            lines.push(format!("  {:<24} {:>6}  ({} forms)", e.key, e.freq, e.wordforms));
        }
    }

    Ok(lines.join("\n"))
}
