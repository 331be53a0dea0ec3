use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::item::{Item, Note};

/// The whole persisted queue: items, the draft pad, and the id counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub items: Vec<Item>,
    /// Free-form scratch text (the draft pad). Not part of the corpus the
    /// completion vocabulary learns from.
    #[serde(default)]
    pub draft: String,
    #[serde(default)]
    pub next_id: u64,
}

impl Board {
    /// Append a new item to the queue and return its id.
    /// Whitespace-only text is rejected (returns `None`).
    pub fn add_item(&mut self, text: &str) -> Option<u64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Item::new(id, trimmed.to_string()));
        Some(id)
    }

    pub fn find(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Replace an item's text. Whitespace-only text leaves it unchanged.
    pub fn set_text(&mut self, id: u64, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.find_mut(id) {
            Some(item) => {
                item.text = trimmed.to_string();
                true
            }
            None => false,
        }
    }

    /// Flip an item between open and done, stamping/clearing `resolved`.
    pub fn toggle_done(&mut self, id: u64) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                item.done = !item.done;
                item.resolved = item.done.then(Utc::now);
                true
            }
            None => false,
        }
    }

    /// Attach a follow-up note. Whitespace-only text is dropped.
    pub fn add_note(&mut self, id: u64, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.find_mut(id) {
            Some(item) => {
                item.notes.push(Note::new(trimmed.to_string()));
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    pub fn open_count(&self) -> usize {
        self.items.iter().filter(|i| !i.done).count()
    }

    /// Every stored text fragment the completion vocabulary learns from:
    /// item text plus all attached note text. The draft pad is scratch
    /// and deliberately excluded.
    pub fn text_fragments(&self) -> Vec<&str> {
        let mut fragments = Vec::new();
        for item in &self.items {
            fragments.push(item.text.as_str());
            for note in &item.notes {
                fragments.push(note.text.as_str());
            }
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(texts: &[&str]) -> Board {
        let mut board = Board::default();
        for t in texts {
            board.add_item(t);
        }
        board
    }

    // --- add / edit ---

    #[test]
    fn add_assigns_increasing_ids() {
        let mut board = Board::default();
        assert_eq!(board.add_item("first"), Some(1));
        assert_eq!(board.add_item("second"), Some(2));
        assert_eq!(board.items.len(), 2);
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut board = Board::default();
        assert_eq!(board.add_item("   "), None);
        assert!(board.items.is_empty());
        assert_eq!(board.next_id, 0);
    }

    #[test]
    fn add_trims_surrounding_whitespace() {
        let mut board = Board::default();
        let id = board.add_item("  padded  ").unwrap();
        assert_eq!(board.find(id).unwrap().text, "padded");
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut board = board_with(&["one", "two"]);
        board.remove(2);
        assert_eq!(board.add_item("three"), Some(3));
    }

    #[test]
    fn set_text_replaces_and_rejects_blank() {
        let mut board = board_with(&["original"]);
        assert!(board.set_text(1, "updated"));
        assert_eq!(board.find(1).unwrap().text, "updated");
        assert!(!board.set_text(1, "  "));
        assert_eq!(board.find(1).unwrap().text, "updated");
    }

    // --- done / notes / remove ---

    #[test]
    fn toggle_done_stamps_and_clears_resolved() {
        let mut board = board_with(&["task"]);
        assert!(board.toggle_done(1));
        assert!(board.find(1).unwrap().done);
        assert!(board.find(1).unwrap().resolved.is_some());
        assert!(board.toggle_done(1));
        assert!(!board.find(1).unwrap().done);
        assert!(board.find(1).unwrap().resolved.is_none());
    }

    #[test]
    fn toggle_done_on_missing_id_is_false() {
        let mut board = Board::default();
        assert!(!board.toggle_done(99));
    }

    #[test]
    fn notes_accumulate_in_order() {
        let mut board = board_with(&["task"]);
        assert!(board.add_note(1, "first note"));
        assert!(board.add_note(1, "second note"));
        let item = board.find(1).unwrap();
        assert_eq!(item.notes.len(), 2);
        assert_eq!(item.notes[0].text, "first note");
        assert_eq!(item.notes[1].text, "second note");
    }

    #[test]
    fn blank_note_is_dropped() {
        let mut board = board_with(&["task"]);
        assert!(!board.add_note(1, "  "));
        assert!(board.find(1).unwrap().notes.is_empty());
    }

    #[test]
    fn remove_deletes_only_the_target() {
        let mut board = board_with(&["one", "two", "three"]);
        assert!(board.remove(2));
        assert!(!board.remove(2));
        let ids: Vec<u64> = board.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn open_count_ignores_done_items() {
        let mut board = board_with(&["one", "two", "three"]);
        board.toggle_done(2);
        assert_eq!(board.open_count(), 2);
    }

    // --- corpus ---

    #[test]
    fn text_fragments_cover_items_and_notes_but_not_draft() {
        let mut board = board_with(&["alpha item", "beta item"]);
        board.add_note(1, "gamma note");
        board.draft = "draft-only words".into();
        let fragments = board.text_fragments();
        assert_eq!(fragments, vec!["alpha item", "gamma note", "beta item"]);
    }

    #[test]
    fn fragments_feed_the_vocabulary() {
        let mut board = board_with(&["Review kube-proxy rollout"]);
        board.add_note(1, "rollout blocked on config");
        let vocab = crate::complete::extract(board.text_fragments());
        assert_eq!(
            vocab,
            vec!["blocked", "config", "kube-proxy", "Review", "rollout"]
        );
    }
}
