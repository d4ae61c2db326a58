//! Free-text mining of issue bodies
//!
//! Pulls the "Root Cause Analysis" section out of an issue body, splits it
//! into normalized sentence fragments, and optionally merges near-duplicate
//! sentences through a text-completion endpoint. The merge is strictly
//! best-effort: without a client it is a pure pass-through, and any request
//! failure falls back to the untouched sentence list.

pub mod client;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use client::{CompletionClient, MergedSentence};

/// Shortest fragment worth keeping, measured after marker stripping.
const MIN_SENTENCE_CHARS: usize = 10;

/// How many distinct repeated sentences the merge request may carry.
const MAX_MERGE_CANDIDATES: usize = 30;

/// RCA section headings, tried in order; first match wins.
static RCA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?si)(?:\A|\n)##[ \t]*RCA[^\n]*\n?(.*?)(?:\n##|\z)",
        r"(?si)(?:\A|\n)###[ \t]*RCA[^\n]*\n?(.*?)(?:\n###|\z)",
        r"(?si)(?:\A|\n)#[ \t]*RCA[^\n]*\n?(.*?)(?:\n#|\z)",
        r"(?si)\*\*[ \t]*RCA[ \t]*\*\*:?[ \t]*\n?(.*?)(?:\n\*\*|\n#|\z)",
        r"(?si)(?:\A|\n)[ \t]*RCA[ \t]*:[ \t]*(.*?)(?:\n#|\n[ \t]*\n|\z)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Sentence boundaries: terminal punctuation plus whitespace, or newlines.
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+|\n+").unwrap());

/// Markdown noise: emphasis/heading markers anywhere, bullets at line start.
static MARKDOWN_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-+*][ \t]+|[*_`#>]+").unwrap());

/// Extract the RCA section from an issue body.
///
/// Returns the first matching pattern's capture, trimmed, or `None` when
/// the body is empty or carries no RCA heading in any recognized spelling.
pub fn extract_rca(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    for pattern in RCA_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(body) {
            return Some(captures[1].trim().to_string());
        }
    }
    None
}

/// Split free text into normalized sentence fragments.
///
/// Fragments are stripped of markdown markers, lowercased, and
/// whitespace-collapsed; anything shorter than 10 characters after
/// stripping is noise and dropped.
pub fn extract_sentences(text: &str) -> Vec<String> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(normalize_fragment)
        .filter(|fragment| fragment.chars().count() >= MIN_SENTENCE_CHARS)
        .collect()
}

fn normalize_fragment(raw: &str) -> String {
    let stripped = MARKDOWN_MARKERS.replace_all(raw, "");
    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A distinct sentence and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceCount {
    pub sentence: String,
    pub count: usize,
}

/// Result of [`process_sentences`].
#[derive(Debug, Clone, Default)]
pub struct SentenceBatch {
    /// Sentences after merging, or the untouched input on the fallback path
    pub normalized: Vec<String>,
    /// The repeated sentences that were candidates for merging
    pub filtered: Vec<SentenceCount>,
}

/// Merge near-duplicate sentences through the completion endpoint.
///
/// Without a client this is the offline default: the input passes through
/// unchanged with no candidates. With one, sentences occurring at least
/// twice (top 30 by frequency) go out in a single merge request; on success
/// each returned `{normalized, count}` group expands back into `count`
/// copies so downstream frequency counting keeps working. Every failure
/// mode logs and falls back to the untouched input; the caller never sees
/// an error.
pub async fn process_sentences(
    sentences: Vec<String>,
    client: Option<&CompletionClient>,
) -> SentenceBatch {
    let Some(client) = client else {
        return SentenceBatch {
            normalized: sentences,
            filtered: Vec::new(),
        };
    };

    let mut frequencies: IndexMap<String, usize> = IndexMap::new();
    for sentence in &sentences {
        *frequencies.entry(sentence.clone()).or_insert(0) += 1;
    }

    let mut filtered: Vec<SentenceCount> = frequencies
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(sentence, count)| SentenceCount { sentence, count })
        .collect();
    // stable sort keeps first-seen order among equal counts
    filtered.sort_by(|a, b| b.count.cmp(&a.count));
    filtered.truncate(MAX_MERGE_CANDIDATES);

    if filtered.is_empty() {
        return SentenceBatch {
            normalized: sentences,
            filtered,
        };
    }

    match client.merge_duplicates(&filtered).await {
        Ok(groups) => {
            let normalized = groups
                .iter()
                .flat_map(|group| {
                    std::iter::repeat(group.normalized.clone()).take(group.count)
                })
                .collect();
            SentenceBatch {
                normalized,
                filtered,
            }
        }
        Err(error) => {
            tracing::warn!(error = %error, "sentence merge failed, keeping raw sentences");
            SentenceBatch {
                normalized: sentences,
                filtered,
            }
        }
    }
}
