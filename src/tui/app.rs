use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::complete::{self, SessionConfig};
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::store;
use crate::io::watcher::{FileEvent, StoreWatcher};
use crate::model::{Board, Config};

use super::editor::EditField;
use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The item queue.
    Queue,
    /// The free-form draft pad.
    Draft,
}

/// Current interaction mode (queue view only; the draft pad is modeless).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Quick-capture input at the top of the queue.
    Capture,
    /// Inline edit of the selected item's text.
    Edit,
    /// Follow-up note input under the selected item.
    Note,
    Search,
}

/// Main application state.
pub struct App {
    pub board: Board,
    pub config: Config,
    pub theme: Theme,
    pub store_dir: PathBuf,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the visible item list.
    pub cursor: usize,
    pub scroll_offset: usize,
    pub draft_scroll: usize,
    /// Item ids whose notes are expanded.
    pub expanded: HashSet<u64>,
    pub show_done: bool,
    pub show_help: bool,
    /// Quick-capture input (Mode::Capture).
    pub capture: Option<EditField>,
    /// Inline item editor: (item id, field).
    pub edit: Option<(u64, EditField)>,
    /// Follow-up note input: (item id, field).
    pub note: Option<(u64, EditField)>,
    /// The draft pad; its buffer mirrors `board.draft`.
    pub draft: EditField,
    /// Completion vocabulary, rebuilt whenever the board changes.
    pub vocabulary: Vec<String>,
    pub search_input: String,
    pub last_search: Option<String>,
    /// Transient message for the status row; cleared on the next key.
    pub status: Option<String>,
    /// Screen cell the completion dropdown attaches to, set during render
    /// by whichever view holds the active input.
    pub popup_anchor: Option<(u16, u16)>,
}

impl App {
    pub fn new(board: Board, config: Config, store_dir: PathBuf) -> Self {
        let theme = Theme::from_config(&config.ui);
        let session = config.complete.session();
        let draft = EditField::with_text(board.draft.clone(), session);
        let vocabulary = complete::extract(board.text_fragments());

        App {
            board,
            config,
            theme,
            store_dir,
            view: View::Queue,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            draft_scroll: 0,
            expanded: HashSet::new(),
            show_done: false,
            show_help: false,
            capture: None,
            edit: None,
            note: None,
            draft,
            vocabulary,
            search_input: String::new(),
            last_search: None,
            status: None,
            popup_anchor: None,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        self.config.complete.session()
    }

    /// Relearn the vocabulary from the current board contents.
    pub fn rebuild_vocabulary(&mut self) {
        self.vocabulary = complete::extract(self.board.text_fragments());
    }

    /// Ids of the items currently shown, in board order.
    pub fn visible_ids(&self) -> Vec<u64> {
        self.board
            .items
            .iter()
            .filter(|i| self.show_done || !i.done)
            .map(|i| i.id)
            .collect()
    }

    pub fn cursor_item_id(&self) -> Option<u64> {
        self.visible_ids().get(self.cursor).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.visible_ids().len();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
    }

    /// The input field currently receiving keystrokes, if any.
    pub fn active_field(&self) -> Option<&EditField> {
        match self.view {
            View::Draft => Some(&self.draft),
            View::Queue => match self.mode {
                Mode::Capture => self.capture.as_ref(),
                Mode::Edit => self.edit.as_ref().map(|(_, f)| f),
                Mode::Note => self.note.as_ref().map(|(_, f)| f),
                _ => None,
            },
        }
    }

    /// Save the board, write a debounced backup, and relearn the
    /// vocabulary. Failures surface in the status row rather than
    /// interrupting the session.
    pub fn persist(&mut self) {
        if let Err(e) = store::save_board(&self.store_dir, &self.board) {
            self.status = Some(format!("save failed: {e}"));
            return;
        }
        if let Err(e) = store::maybe_backup(&self.store_dir, &self.config.store) {
            self.status = Some(format!("backup failed: {e}"));
        }
        self.rebuild_vocabulary();
    }

    /// The search regex for highlighting: the live input while searching,
    /// the last committed pattern otherwise. Invalid patterns fall back
    /// to a literal match.
    pub fn active_search_re(&self) -> Option<Regex> {
        let pattern = match self.mode {
            Mode::Search if !self.search_input.is_empty() => &self.search_input,
            Mode::Search => return None,
            _ => self.last_search.as_deref()?,
        };
        Regex::new(&format!("(?i){pattern}"))
            .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
            .ok()
    }
}

/// Restore UI state from .state.json.
pub fn restore_ui_state(app: &mut App) {
    let ui_state = match read_ui_state(&app.store_dir) {
        Some(s) => s,
        None => return,
    };

    if ui_state.view == "draft" {
        app.view = View::Draft;
    }
    app.cursor = ui_state.cursor;
    app.scroll_offset = ui_state.scroll_offset;
    app.expanded = ui_state.expanded;
    app.show_done = ui_state.show_done;
    app.last_search = ui_state.last_search;
    app.clamp_cursor();
}

/// Save UI state to .state.json.
pub fn save_ui_state(app: &App) {
    let ui_state = UiState {
        view: match app.view {
            View::Queue => "queue".to_string(),
            View::Draft => "draft".to_string(),
        },
        cursor: app.cursor,
        scroll_offset: app.scroll_offset,
        expanded: app.expanded.clone(),
        show_done: app.show_done,
        last_search: app.last_search.clone(),
    };
    let _ = write_ui_state(&app.store_dir, &ui_state);
}

/// Reload the board after an external change, but only while idle: an
/// in-progress edit must not be yanked out from under the user.
fn reload_if_idle(app: &mut App) {
    if app.view != View::Queue || app.mode != Mode::Navigate {
        return;
    }
    match store::load_board(&app.store_dir) {
        Ok(board) if board != app.board => {
            app.board = board;
            app.draft = EditField::with_text(app.board.draft.clone(), app.session_config());
            app.rebuild_vocabulary();
            app.clamp_cursor();
            app.status = Some("board changed on disk, reloaded".into());
        }
        // Our own saves echo back through the watcher; identical content
        // means nothing to do. Errors: keep the in-memory board.
        _ => {}
    }
}

/// Run the TUI application.
pub fn run(store_dir_flag: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let store_dir = store::resolve_store_dir(store_dir_flag);
    store::ensure_store_dir(&store_dir)?;
    let board = store::load_board(&store_dir)?;
    let config = store::load_config(&store_dir);

    let mut app = App::new(board, config, store_dir.clone());
    restore_ui_state(&mut app);

    // Watching is best-effort; the app works without it.
    let watcher = StoreWatcher::start(&store_dir).ok();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.status = None;
            input::handle_key(app, key);
            // Debounced UI-state save: every ~5 key presses.
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        if let Some(w) = watcher {
            for FileEvent::BoardChanged in w.poll() {
                reload_if_idle(app);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
