//! Lyrics corpus - tabular title/content files feeding the word pool

use crate::error::{PassForgeError, Result};
use crate::pool::TokenPool;
use std::path::Path;

/// Recognized header names for the title column
const TITLE_HEADERS: &[&str] = &["title", "name"];

/// Recognized header names for the free-text column
const CONTENT_HEADERS: &[&str] = &["lyrics", "content", "text"];

/// One corpus row
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    pub title: String,
    pub content: String,
}

/// A loaded lyrics corpus.
///
/// The file is CSV with a header row naming a title column and a content
/// column. Fields may be double-quoted (commas allowed inside quotes, `""`
/// escapes a quote); quoted fields do not span lines.
#[derive(Debug, Clone)]
pub struct LyricsCorpus {
    entries: Vec<CorpusEntry>,
}

impl LyricsCorpus {
    /// Load a corpus file. Missing files are configuration errors; rows
    /// lacking either column are data errors carrying the line number.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PassForgeError::config(format!("cannot read corpus {}: {}", path.display(), e))
        })?;

        let mut lines = content.lines().enumerate();
        let (_, header) = lines
            .next()
            .ok_or_else(|| PassForgeError::parse("corpus file is empty", None))?;

        let columns = parse_csv_line(header);
        let (title_idx, content_idx) = locate_columns(&columns)?;

        let mut entries = Vec::new();
        for (line_num, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = parse_csv_line(line);
            let needed = title_idx.max(content_idx);
            if fields.len() <= needed {
                return Err(PassForgeError::parse(
                    format!(
                        "row has {} columns, needs at least {}",
                        fields.len(),
                        needed + 1
                    ),
                    Some(line_num + 1),
                ));
            }
            entries.push(CorpusEntry {
                title: fields[title_idx].clone(),
                content: fields[content_idx].clone(),
            });
        }

        tracing::debug!(path = %path.display(), rows = entries.len(), "Loaded corpus");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deduplicated pool of every whitespace-separated word in the corpus
    /// (titles and content both contribute)
    pub fn word_pool(&self) -> TokenPool {
        let words = self.entries.iter().flat_map(|entry| {
            entry
                .title
                .split_whitespace()
                .chain(entry.content.split_whitespace())
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
        });
        TokenPool::from_words("corpus", words)
    }

    /// Whether any corpus word appears in the given dictionary pool.
    ///
    /// Guards against binary junk or non-language corpora before generation.
    pub fn has_readable_words(&self, dictionary: &TokenPool) -> bool {
        self.entries.iter().any(|entry| {
            entry
                .title
                .split_whitespace()
                .chain(entry.content.split_whitespace())
                .any(|word| dictionary.contains(&word.to_lowercase()))
        })
    }
}

fn locate_columns(header: &[String]) -> Result<(usize, usize)> {
    let find = |names: &[&str]| {
        header
            .iter()
            .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
    };

    match (find(TITLE_HEADERS), find(CONTENT_HEADERS)) {
        (Some(t), Some(c)) => Ok((t, c)),
        _ if header.len() >= 2 => {
            tracing::warn!(
                header = ?header,
                "Unrecognized corpus headers, assuming title in column 1 and content in column 2"
            );
            Ok((0, 1))
        }
        _ => Err(PassForgeError::parse(
            "corpus needs a title column and a content column",
            Some(1),
        )),
    }
}

/// Split one CSV line into fields, honoring double quotes
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
