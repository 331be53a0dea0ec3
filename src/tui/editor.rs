use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::complete::{KeyOutcome, Session, SessionConfig, SessionKey};
use crate::util::unicode;

/// A text input with its own completion session.
///
/// Every surface that takes typed text (quick capture, inline item edit,
/// the note box, the draft pad) owns one of these, so they all drive the
/// completion engine identically. The buffer holds the text, `cursor` is
/// a byte offset into it, and every mutation or cursor move re-feeds the
/// session with the current state.
#[derive(Debug, Clone)]
pub struct EditField {
    pub buffer: String,
    pub cursor: usize,
    pub session: Session,
}

/// Map a terminal key event onto the completion contract. This is the
/// only place the mapping exists; surfaces must not hand-roll it.
fn session_key(key: &KeyEvent) -> Option<SessionKey> {
    match key.code {
        KeyCode::Esc => Some(SessionKey::Esc),
        KeyCode::BackTab => Some(SessionKey::BackTab),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(SessionKey::BackTab),
        KeyCode::Tab => Some(SessionKey::Tab),
        KeyCode::Up => Some(SessionKey::Up),
        KeyCode::Down => Some(SessionKey::Down),
        _ => None,
    }
}

impl EditField {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_text(String::new(), config)
    }

    /// Start editing existing text with the cursor at the end.
    pub fn with_text(buffer: String, config: SessionConfig) -> Self {
        let cursor = buffer.len();
        EditField {
            buffer,
            cursor,
            session: Session::new(config),
        }
    }

    /// Re-feed the session with the current buffer and cursor.
    pub fn refresh(&mut self, vocabulary: &[String]) {
        self.session.refresh(&self.buffer, self.cursor, vocabulary);
    }

    /// Offer a key to the completion session before any other handling.
    /// Returns true when the session consumed it (including an accept,
    /// which is applied to the buffer here).
    pub fn handle_session_key(&mut self, key: &KeyEvent, vocabulary: &[String]) -> bool {
        let Some(sk) = session_key(key) else {
            return false;
        };
        match self.session.handle_key(sk, &self.buffer) {
            KeyOutcome::Pass => false,
            KeyOutcome::Consumed => true,
            KeyOutcome::Accepted(result) => {
                self.buffer = result.next_value;
                self.cursor = result.next_cursor;
                self.refresh(vocabulary);
                true
            }
        }
    }

    // --- mutations ---

    pub fn insert_char(&mut self, c: char, vocabulary: &[String]) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.refresh(vocabulary);
    }

    pub fn insert_newline(&mut self, vocabulary: &[String]) {
        self.insert_char('\n', vocabulary);
    }

    pub fn backspace(&mut self, vocabulary: &[String]) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.drain(prev..self.cursor);
            self.cursor = prev;
        }
        self.refresh(vocabulary);
    }

    pub fn delete_word_back(&mut self, vocabulary: &[String]) {
        let target = unicode::word_boundary_left(&self.buffer, self.cursor);
        self.buffer.drain(target..self.cursor);
        self.cursor = target;
        self.refresh(vocabulary);
    }

    pub fn kill_to_start(&mut self, vocabulary: &[String]) {
        self.buffer.drain(..self.cursor);
        self.cursor = 0;
        self.refresh(vocabulary);
    }

    // --- cursor movement ---

    pub fn move_left(&mut self, vocabulary: &[String]) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
        self.refresh(vocabulary);
    }

    pub fn move_right(&mut self, vocabulary: &[String]) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
        self.refresh(vocabulary);
    }

    pub fn move_word_left(&mut self, vocabulary: &[String]) {
        self.cursor = unicode::word_boundary_left(&self.buffer, self.cursor);
        self.refresh(vocabulary);
    }

    pub fn move_word_right(&mut self, vocabulary: &[String]) {
        self.cursor = unicode::word_boundary_right(&self.buffer, self.cursor);
        self.refresh(vocabulary);
    }

    pub fn move_home(&mut self, vocabulary: &[String]) {
        self.cursor = self.line_start();
        self.refresh(vocabulary);
    }

    pub fn move_end(&mut self, vocabulary: &[String]) {
        self.cursor = self.line_end();
        self.refresh(vocabulary);
    }

    /// Move to the same column on the previous line (draft pad;
    /// single-line fields never contain `\n`).
    pub fn move_up(&mut self, vocabulary: &[String]) {
        let line_start = self.line_start();
        if line_start == 0 {
            self.cursor = 0;
        } else {
            let col = self.cursor - line_start;
            let prev_start = self.buffer[..line_start - 1]
                .rfind('\n')
                .map_or(0, |i| i + 1);
            let prev_len = (line_start - 1) - prev_start;
            self.cursor = snap_to_boundary(&self.buffer, prev_start + col.min(prev_len));
        }
        self.refresh(vocabulary);
    }

    /// Move to the same column on the next line.
    pub fn move_down(&mut self, vocabulary: &[String]) {
        let line_start = self.line_start();
        match self.buffer[self.cursor..].find('\n') {
            None => self.cursor = self.buffer.len(),
            Some(offset) => {
                let col = self.cursor - line_start;
                let next_start = self.cursor + offset + 1;
                let next_end = self.buffer[next_start..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| next_start + i);
                let next_len = next_end - next_start;
                self.cursor = snap_to_boundary(&self.buffer, next_start + col.min(next_len));
            }
        }
        self.refresh(vocabulary);
    }

    /// Byte offset of the start of the line the cursor is on.
    pub fn line_start(&self) -> usize {
        self.buffer[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    /// Byte offset of the end of the line the cursor is on.
    pub fn line_end(&self) -> usize {
        self.buffer[self.cursor..]
            .find('\n')
            .map_or(self.buffer.len(), |i| self.cursor + i)
    }

    /// Cursor position as (line index, byte column within the line).
    pub fn line_col(&self) -> (usize, usize) {
        let line = self.buffer[..self.cursor].matches('\n').count();
        (line, self.cursor - self.line_start())
    }
}

fn snap_to_boundary(s: &str, mut offset: usize) -> usize {
    offset = offset.min(s.len());
    while offset > 0 && !s.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
