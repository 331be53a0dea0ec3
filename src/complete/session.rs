use super::rank;
use super::rank::DEFAULT_LIMIT;
use super::token::{self, TokenInfo};

/// Tuning knobs for a completion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Master switch; a disabled session never opens.
    pub enabled: bool,
    /// Maximum number of suggestions offered.
    pub limit: usize,
    /// Minimum token length before the list opens.
    pub min_chars: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            enabled: true,
            limit: DEFAULT_LIMIT,
            min_chars: 3,
        }
    }
}

/// The text/cursor mutation produced by accepting a suggestion.
///
/// `next_value` is the host text with the in-progress token replaced by
/// `accepted`; `next_cursor` sits immediately after the inserted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptResult {
    pub next_value: String,
    pub next_cursor: usize,
    pub accepted: String,
}

/// Keys the integration contract routes through the session.
///
/// Host inputs translate their native key events into these in exactly
/// one place, so every surface drives the session identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    Tab,
    BackTab,
    Up,
    Down,
    Esc,
}

/// What the host should do with a key after offering it to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The session is closed; the key falls through to normal handling.
    Pass,
    /// The session consumed the key; nothing further to apply.
    Consumed,
    /// A suggestion was accepted; apply the mutation to the host buffer.
    Accepted(AcceptResult),
}

/// Per-input completion state machine.
///
/// A session is either *closed* (no list shown) or *open* (list visible
/// with a selected entry). There is no hidden timer or async step: every
/// transition happens inside [`Session::refresh`], which recomputes the
/// whole state from the host's current text and cursor. Each text-input
/// surface owns exactly one session; sessions never share state.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    token: TokenInfo,
    suggestions: Vec<String>,
    open: bool,
    selected: usize,
    /// Token text the user dismissed with Esc. Suppresses reopening while
    /// the token under the cursor still reads the same; typing on (or
    /// moving to another word) clears it.
    dismissed: Option<String>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            config,
            token: TokenInfo::default(),
            suggestions: Vec::new(),
            open: false,
            selected: 0,
            dismissed: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    /// Recompute the full state from the host's current text and cursor.
    ///
    /// Call this after every keystroke or cursor movement. The selection
    /// resets to the top whenever the token text changes, and whenever
    /// the recomputed list no longer reaches the previous selection.
    pub fn refresh(&mut self, text: &str, cursor: usize, vocabulary: &[String]) {
        let current = token::detect(text, cursor);
        if current.token != self.token.token {
            self.selected = 0;
            // Dismissal is keyed to the token occurrence it silenced.
            if self.dismissed.as_deref() != Some(current.token.as_str()) {
                self.dismissed = None;
            }
        }
        self.token = current;

        let suppressed = self.dismissed.as_deref() == Some(self.token.token.as_str());
        if !self.config.enabled || suppressed || self.token.token.len() < self.config.min_chars {
            self.suggestions.clear();
            self.open = false;
            self.selected = 0;
            return;
        }

        self.suggestions = rank::rank(&self.token.token, vocabulary, self.config.limit);
        if self.suggestions.is_empty() {
            self.open = false;
            self.selected = 0;
        } else {
            if self.selected >= self.suggestions.len() {
                self.selected = 0;
            }
            self.open = true;
        }
    }

    /// Move the selection by `delta`, wrapping at both ends. No-op with
    /// an empty list.
    pub fn cycle(&mut self, delta: isize) {
        let len = self.suggestions.len() as isize;
        if len == 0 {
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    /// Close the list without touching the host text. The session stays
    /// quiet until the token under the cursor changes.
    pub fn dismiss(&mut self) {
        self.dismissed = Some(self.token.token.clone());
        self.suggestions.clear();
        self.open = false;
        self.selected = 0;
    }

    /// Build the mutation for the currently selected suggestion.
    ///
    /// `text` must be the same buffer passed to the last [`refresh`];
    /// the result is computed against the token span detected there.
    /// Returns `None` while closed or with nothing selected; callers
    /// treat that as "nothing to do", not an error.
    ///
    /// [`refresh`]: Session::refresh
    pub fn accept(&self, text: &str) -> Option<AcceptResult> {
        if !self.open || self.suggestions.is_empty() {
            return None;
        }
        let idx = self.selected.min(self.suggestions.len() - 1);
        let accepted = self.suggestions[idx].clone();

        let mut next_value = String::with_capacity(text.len() + accepted.len());
        next_value.push_str(&text[..self.token.start]);
        next_value.push_str(&accepted);
        next_value.push_str(&text[self.token.end..]);
        let next_cursor = self.token.start + accepted.len();

        Some(AcceptResult {
            next_value,
            next_cursor,
            accepted,
        })
    }

    /// The shared keyboard contract, evaluated in precedence order.
    ///
    /// While open: Esc dismisses, Tab accepts (BackTab cycles backward),
    /// Up/Down cycle. All of these are consumed, whether or not an accept
    /// produced a result. While closed every key passes through, so Esc
    /// and Tab keep their normal meaning in the host input.
    pub fn handle_key(&mut self, key: SessionKey, text: &str) -> KeyOutcome {
        if !self.open {
            return KeyOutcome::Pass;
        }
        match key {
            SessionKey::Esc => {
                self.dismiss();
                KeyOutcome::Consumed
            }
            SessionKey::Tab => match self.accept(text) {
                Some(result) => KeyOutcome::Accepted(result),
                None => KeyOutcome::Consumed,
            },
            SessionKey::BackTab => {
                self.cycle(-1);
                KeyOutcome::Consumed
            }
            SessionKey::Down => {
                self.cycle(1);
                KeyOutcome::Consumed
            }
            SessionKey::Up => {
                self.cycle(-1);
                KeyOutcome::Consumed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complete::{detect, extract};
    use pretty_assertions::assert_eq;

    fn vocab(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    fn open_session(text: &str, vocab: &[String]) -> Session {
        let mut s = Session::new(SessionConfig::default());
        s.refresh(text, text.len(), vocab);
        s
    }

    // --- open/closed transitions ---

    #[test]
    fn opens_when_token_matches() {
        let v = vocab(&["deploy", "deployment"]);
        let s = open_session("dep", &v);
        assert!(s.is_open());
        assert_eq!(s.suggestions(), ["deploy", "deployment"]);
        assert_eq!(s.selected(), 0);
    }

    #[test]
    fn stays_closed_below_min_chars() {
        let v = vocab(&["abacus", "abandon"]);
        let s = open_session("ab", &v);
        assert!(!s.is_open());
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn min_chars_is_configurable() {
        let v = vocab(&["abacus"]);
        let mut s = Session::new(SessionConfig {
            min_chars: 2,
            ..Default::default()
        });
        s.refresh("ab", 2, &v);
        assert!(s.is_open());
    }

    #[test]
    fn stays_closed_when_disabled() {
        let v = vocab(&["deploy"]);
        let mut s = Session::new(SessionConfig {
            enabled: false,
            ..Default::default()
        });
        s.refresh("dep", 3, &v);
        assert!(!s.is_open());
    }

    #[test]
    fn closed_with_empty_vocabulary() {
        let s = open_session("abc", &[]);
        assert!(!s.is_open());
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn closes_again_when_token_stops_matching() {
        let v = vocab(&["deploy"]);
        let mut s = open_session("dep", &v);
        assert!(s.is_open());
        s.refresh("depz", 4, &v);
        assert!(!s.is_open());
        assert!(s.suggestions().is_empty());
    }

    // --- selection reset rules ---

    #[test]
    fn selection_resets_when_token_changes() {
        let v = vocab(&["alpha", "alphabet"]);
        let mut s = open_session("alp", &v);
        s.cycle(1);
        assert_eq!(s.selected(), 1);
        // Token text changes -> selection back to the top.
        s.refresh("alph", 4, &v);
        assert_eq!(s.selected(), 0);
    }

    #[test]
    fn selection_resets_when_list_shrinks_past_it() {
        let v = vocab(&["alpha", "alphabet"]);
        let mut s = open_session("alp", &v);
        s.cycle(1);
        assert_eq!(s.selected(), 1);
        // Same token text, recomputed against a smaller vocabulary.
        s.refresh("alp", 3, &vocab(&["alpha"]));
        assert_eq!(s.selected(), 0);
        assert!(s.is_open());
    }

    #[test]
    fn selection_survives_refresh_with_same_token() {
        let v = vocab(&["alpha", "alphabet"]);
        let mut s = open_session("alp", &v);
        s.cycle(1);
        s.refresh("alp", 3, &v);
        assert_eq!(s.selected(), 1);
    }

    // --- cycling ---

    #[test]
    fn cycle_wraps_both_ways() {
        let v = vocab(&["alpha", "alphabet"]);
        let mut s = open_session("alp", &v);
        s.cycle(1);
        assert_eq!(s.selected(), 1);
        s.cycle(1);
        assert_eq!(s.selected(), 0); // wraps forward
        s.cycle(-1);
        assert_eq!(s.selected(), 1); // wraps backward
    }

    #[test]
    fn cycle_is_a_noop_with_no_suggestions() {
        let mut s = Session::new(SessionConfig::default());
        s.cycle(1);
        s.cycle(-1);
        assert_eq!(s.selected(), 0);
    }

    // --- dismissal ---

    #[test]
    fn dismiss_closes_until_token_changes() {
        let v = vocab(&["deploy", "deployment"]);
        let mut s = open_session("dep", &v);
        s.dismiss();
        assert!(!s.is_open());
        // Same token: stays dismissed.
        s.refresh("dep", 3, &v);
        assert!(!s.is_open());
        // Token changed: dismissal lifts and the list reopens.
        s.refresh("depl", 4, &v);
        assert!(s.is_open());
    }

    #[test]
    fn dismissal_lifts_even_if_the_same_word_recurs() {
        let v = vocab(&["deploy"]);
        let mut s = open_session("dep", &v);
        s.dismiss();
        // Move away (empty token), then type the same word again.
        s.refresh("dep ", 4, &v);
        s.refresh("dep dep", 7, &v);
        assert!(s.is_open());
    }

    // --- accept ---

    #[test]
    fn accept_replaces_the_token_and_moves_the_cursor() {
        let v = vocab(&["bug", "build"]);
        let mut s = Session::new(SessionConfig {
            min_chars: 2,
            ..Default::default()
        });
        let text = "fix bu";
        s.refresh(text, 6, &v);
        let result = s.accept(text).unwrap();
        assert_eq!(result.next_value, "fix bug");
        assert_eq!(result.next_cursor, 7);
        assert_eq!(result.accepted, "bug");
    }

    #[test]
    fn accept_respects_the_selected_entry() {
        let v = vocab(&["bug", "build"]);
        let mut s = Session::new(SessionConfig {
            min_chars: 2,
            ..Default::default()
        });
        let text = "fix bu";
        s.refresh(text, 6, &v);
        s.cycle(1);
        let result = s.accept(text).unwrap();
        assert_eq!(result.next_value, "fix build");
        assert_eq!(result.accepted, "build");
    }

    #[test]
    fn accept_preserves_text_after_the_cursor() {
        let v = vocab(&["deploy"]);
        let mut s = Session::new(SessionConfig::default());
        let text = "dep and more";
        s.refresh(text, 3, &v);
        let result = s.accept(text).unwrap();
        assert_eq!(result.next_value, "deploy and more");
        assert_eq!(result.next_cursor, 6);
    }

    #[test]
    fn accept_while_closed_is_a_noop() {
        let s = Session::new(SessionConfig::default());
        assert_eq!(s.accept("anything"), None);
    }

    #[test]
    fn accepting_is_a_fixed_point() {
        // Re-detecting at the new cursor yields exactly the accepted word,
        // so accepting again reproduces the same token.
        let v = extract(["deploy the kube-proxy config"]);
        let mut s = Session::new(SessionConfig::default());
        let text = "restart kub";
        s.refresh(text, text.len(), &v);
        let result = s.accept(text).unwrap();

        let redetected = detect(&result.next_value, result.next_cursor);
        assert_eq!(redetected.token, result.accepted);
        assert_eq!(redetected.end, result.next_cursor);
    }

    // --- key contract ---

    #[test]
    fn keys_pass_through_while_closed() {
        let mut s = Session::new(SessionConfig::default());
        for key in [
            SessionKey::Tab,
            SessionKey::BackTab,
            SessionKey::Up,
            SessionKey::Down,
            SessionKey::Esc,
        ] {
            assert_eq!(s.handle_key(key, ""), KeyOutcome::Pass);
        }
    }

    #[test]
    fn esc_dismisses_and_is_consumed() {
        let v = vocab(&["deploy"]);
        let mut s = open_session("dep", &v);
        assert_eq!(s.handle_key(SessionKey::Esc, "dep"), KeyOutcome::Consumed);
        assert!(!s.is_open());
    }

    #[test]
    fn tab_accepts_and_returns_the_mutation() {
        let v = vocab(&["deploy"]);
        let mut s = open_session("dep", &v);
        match s.handle_key(SessionKey::Tab, "dep") {
            KeyOutcome::Accepted(result) => {
                assert_eq!(result.next_value, "deploy");
                assert_eq!(result.next_cursor, 6);
            }
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn back_tab_cycles_backward() {
        let v = vocab(&["alpha", "alphabet"]);
        let mut s = open_session("alp", &v);
        assert_eq!(
            s.handle_key(SessionKey::BackTab, "alp"),
            KeyOutcome::Consumed
        );
        assert_eq!(s.selected(), 1);
    }

    #[test]
    fn arrows_cycle_and_are_consumed() {
        let v = vocab(&["alpha", "alphabet"]);
        let mut s = open_session("alp", &v);
        assert_eq!(s.handle_key(SessionKey::Down, "alp"), KeyOutcome::Consumed);
        assert_eq!(s.selected(), 1);
        assert_eq!(s.handle_key(SessionKey::Up, "alp"), KeyOutcome::Consumed);
        assert_eq!(s.selected(), 0);
    }
}
