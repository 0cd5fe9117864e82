//! Lyrics site scraper - fetches a page and persists a title/lyrics corpus

use crate::error::{PassForgeError, Result};
use crate::types::ScrapeConfig;
use regex::Regex;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::time::timeout;

/// Result of one scrape-and-persist run
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub csv_path: PathBuf,
    pub rows: usize,
}

/// Scrapes song titles and lyrics bodies from a page and writes them as a
/// corpus CSV that [`crate::corpus::LyricsCorpus`] can load back.
pub struct LyricsScraper {
    client: Client,
    config: ScrapeConfig,
}

impl LyricsScraper {
    pub fn new() -> Self {
        Self::with_config(ScrapeConfig::default())
    }

    pub fn with_config(config: ScrapeConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create configured HTTP client: {}. Using default.", e);
                Client::new()
            });

        Self { client, config }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetch `url`, extract title and lyrics elements, and write them to a
    /// CSV file in `out_dir`. Fails rather than writing an empty corpus.
    pub async fn scrape_to_csv(&self, url: &str, out_dir: &Path) -> Result<ScrapeOutcome> {
        let url = validate_url(url)?;
        let html = self.fetch_with_retry(&url).await?;

        let titles = extract_class_text(&html, &self.config.title_class);
        let lyrics = extract_class_text(&html, &self.config.lyrics_class);

        tracing::debug!(
            url = %url,
            titles = titles.len(),
            lyrics = lyrics.len(),
            "Extracted elements"
        );

        let rows: Vec<(String, String)> = titles.into_iter().zip(lyrics).collect();
        if rows.is_empty() {
            return Err(PassForgeError::parse(
                format!(
                    "no elements matched classes '{}' / '{}'",
                    self.config.title_class, self.config.lyrics_class
                ),
                None,
            ));
        }

        let csv_path = out_dir.join(csv_file_name(&url));
        write_corpus_csv(&csv_path, &rows)?;

        tracing::info!(path = %csv_path.display(), rows = rows.len(), "Corpus written");
        Ok(ScrapeOutcome {
            csv_path,
            rows: rows.len(),
        })
    }

    async fn fetch_with_retry(&self, url: &reqwest::Url) -> Result<String> {
        let attempts = self.config.retry_attempts.max(1);
        let mut last_err = PassForgeError::network("no attempts made", None, None);

        for attempt in 1..=attempts {
            let send = timeout(self.config.timeout, self.client.get(url.clone()).send()).await;

            match send {
                Err(_) => {
                    last_err = PassForgeError::network(
                        format!("request timed out after {:?}", self.config.timeout),
                        None,
                        Some(url.to_string()),
                    );
                    tracing::debug!(url = %url, attempt, "Fetch timed out");
                }
                Ok(Err(e)) => {
                    last_err = e.into();
                    tracing::debug!(url = %url, attempt, error = %last_err, "Fetch failed");
                }
                Ok(Ok(response)) => {
                    let status = response.status();
                    if !status.is_success() {
                        // A definite server answer; retrying will not change it.
                        return Err(PassForgeError::network(
                            format!("request failed with status {}", status),
                            Some(status.as_u16()),
                            Some(url.to_string()),
                        ));
                    }
                    return response.text().await.map_err(|e| {
                        PassForgeError::network(e.to_string(), None, Some(url.to_string()))
                    });
                }
            }
        }

        Err(last_err)
    }
}

impl Default for LyricsScraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and sanity-check a user-supplied URL.
///
/// A URL without a scheme gets a "did you mean https://..." suggestion;
/// this is its own error category, distinct from network failures.
pub fn validate_url(url: &str) -> Result<reqwest::Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(PassForgeError::validation("URL must not be empty"));
    }

    if !url.contains("://") {
        return Err(PassForgeError::malformed_url(
            url,
            Some(format!("https://{}", url)),
        ));
    }

    let parsed = reqwest::Url::parse(url)
        .map_err(|_| PassForgeError::malformed_url(url, None))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(PassForgeError::malformed_url(
            url,
            Some(url.replacen(other, "https", 1)),
        )),
    }
}

/// Collect the text of every element whose class attribute contains `class`.
///
/// The opening tag is located by regex; the matching closing tag is found by
/// depth counting so nested same-name elements do not cut the body short.
/// Inner markup is stripped and whitespace collapsed.
fn extract_class_text(html: &str, class: &str) -> Vec<String> {
    let pattern = format!(
        r#"<([a-zA-Z][a-zA-Z0-9]*)\b[^>]*class="[^"]*{}[^"]*"[^>]*>"#,
        regex::escape(class)
    );
    let open_re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!(class, error = %e, "Invalid extraction pattern");
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for caps in open_re.captures_iter(html) {
        let whole = caps.get(0).unwrap();
        let tag = &caps[1];
        if let Some(body) = element_body(&html[whole.end()..], tag) {
            let text = strip_tags(body);
            if !text.is_empty() {
                out.push(text);
            }
        }
    }
    out
}

/// Body of an element given the text right after its opening tag, balancing
/// nested tags of the same name
fn element_body<'a>(rest: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut depth = 1usize;
    let mut pos = 0usize;

    while depth > 0 {
        let next_open = find_tag_open(rest, pos, &open);
        let next_close = rest[pos..].find(&close).map(|i| i + pos)?;

        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + open.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..next_close]);
                }
                pos = next_close + close.len();
            }
        }
    }
    None
}

/// Next occurrence of `open` that is a whole tag name, not a prefix of a
/// longer one (`<div` must not match `<divider`)
fn find_tag_open(rest: &str, from: usize, open: &str) -> Option<usize> {
    let mut pos = from;
    while let Some(i) = rest[pos..].find(open).map(|i| i + pos) {
        match rest[i + open.len()..].chars().next() {
            Some(c) if c.is_ascii_alphanumeric() => pos = i + open.len(),
            _ => return Some(i),
        }
    }
    None
}

/// Remove markup and collapse whitespace to single spaces
fn strip_tags(html: &str) -> String {
    let tag_re = Regex::new(r"<[^>]+>").expect("static pattern");
    let text = tag_re.replace_all(html, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Corpus file name derived from the last URL path segment
/// (hyphens become underscores, as the original tool named its exports)
fn csv_file_name(url: &reqwest::Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("lyrics");
    format!("{}.csv", segment.replace('-', "_"))
}

fn write_corpus_csv(path: &Path, rows: &[(String, String)]) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)
        .map_err(|e| PassForgeError::io(e.to_string(), Some(path.display().to_string())))?;

    writeln!(file, "Title,Lyrics")?;
    for (title, lyrics) in rows {
        writeln!(file, "{},{}", quote_field(title), quote_field(lyrics))?;
    }
    Ok(())
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
