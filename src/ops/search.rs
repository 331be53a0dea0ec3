use std::ops::Range;

use regex::Regex;

use crate::model::Board;

/// Which field of an item matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchField {
    Text,
    /// A note at this index within the item.
    Note(usize),
}

/// A search hit on the board.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub item_id: u64,
    pub field: MatchField,
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search item text and note text across the whole board.
pub fn search_board(board: &Board, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for item in &board.items {
        let spans = find_matches(re, &item.text);
        if !spans.is_empty() {
            hits.push(SearchHit {
                item_id: item.id,
                field: MatchField::Text,
                spans,
            });
        }
        for (idx, note) in item.notes.iter().enumerate() {
            let spans = find_matches(re, &note.text);
            if !spans.is_empty() {
                hits.push(SearchHit {
                    item_id: item.id,
                    field: MatchField::Note(idx),
                    spans,
                });
            }
        }
    }
    hits
}

/// Item ids with at least one hit, in board order, deduplicated.
pub fn matching_item_ids(board: &Board, re: &Regex) -> Vec<u64> {
    let mut ids = Vec::new();
    for hit in search_board(board, re) {
        if ids.last() != Some(&hit.item_id) {
            ids.push(hit.item_id);
        }
    }
    ids
}
