use std::collections::HashMap;

use super::token::is_word_char;

/// Tokens shorter than this never enter the vocabulary. Short tokens are
/// rarely useful completions and would dominate low-specificity matches.
const MIN_TOKEN_LEN: usize = 3;

/// Learn a vocabulary from the given text fragments.
///
/// Scans every fragment for maximal runs of word characters, drops runs
/// shorter than [`MIN_TOKEN_LEN`], and deduplicates case-insensitively:
/// the first original-casing spelling seen for a lowercase key is kept,
/// later differently-cased occurrences are dropped silently. The result
/// is sorted ascending by lowercase form with ordinal comparison, so the
/// output is deterministic regardless of fragment order.
///
/// Pure function of its input; empty or degenerate text yields an empty
/// vocabulary, never an error.
pub fn extract<'a, I>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut first_spelling: HashMap<String, String> = HashMap::new();
    for text in texts {
        for run in text.split(|c: char| !is_word_char(c)) {
            // Runs are pure ASCII, so byte length equals char count.
            if run.len() < MIN_TOKEN_LEN {
                continue;
            }
            first_spelling
                .entry(run.to_lowercase())
                .or_insert_with(|| run.to_string());
        }
    }

    let mut entries: Vec<(String, String)> = first_spelling.into_iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().map(|(_, spelling)| spelling).collect()
}
