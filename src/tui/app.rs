//! Application state and intent dispatch

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::detail::SecretDetail;
use crate::repository::ItemRepository;
use crate::tui::list::ListController;
use crate::tui::overlay::RevealOverlay;

/// Rows moved by PageUp/PageDown
const PAGE: isize = 10;

/// Which widget receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    List,
}

/// Discrete user intents, decoded from key and mouse events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Quit,
    FocusSearch,
    FocusList,
    QueryChanged(String),
    Navigate(isize),
    SelectFirst,
    SelectLast,
    /// Open the overlay for the row under the cursor
    Select,
    ToggleVisibility,
    Close,
    DismissError,
}

/// Main application state
pub struct App {
    /// Whether the app is running
    pub running: bool,

    /// Current focus area
    pub focus: Focus,

    /// Collection alias shown in the header
    pub collection: String,

    repository: ItemRepository,

    pub list: ListController,

    pub overlay: RevealOverlay,

    /// Current error message to display
    pub error_message: Option<String>,

    /// Layout areas for mouse click detection
    pub search_area: Rect,
    pub list_area: Rect,

    /// Scroll offset of the list (updated during render)
    pub list_scroll_offset: usize,
}

impl App {
    pub fn new(repository: ItemRepository, collection: String) -> Self {
        let list = ListController::new(repository.records());
        Self {
            running: true,
            focus: Focus::Search,
            collection,
            repository,
            list,
            overlay: RevealOverlay::default(),
            error_message: None,
            search_area: Rect::default(),
            list_area: Rect::default(),
            list_scroll_offset: 0,
        }
    }

    pub fn repository(&self) -> &ItemRepository {
        &self.repository
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(intent) = self.intent_for_key(key) {
            self.dispatch(intent);
        }
    }

    /// Decode a key press into an intent for the current focus and overlay
    pub fn intent_for_key(&self, key: KeyEvent) -> Option<Intent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Intent::Quit);
        }

        // Any key dismisses the error popup
        if self.error_message.is_some() {
            return Some(Intent::DismissError);
        }

        if self.overlay.is_open() {
            return match key.code {
                KeyCode::Char('v') => Some(Intent::ToggleVisibility),
                KeyCode::Esc => Some(Intent::Close),
                KeyCode::Char('q') => Some(Intent::Quit),
                _ => None,
            };
        }

        match self.focus {
            Focus::Search => self.search_intent(key),
            Focus::List => Self::list_intent(key),
        }
    }

    fn search_intent(&self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Esc | KeyCode::Down => Some(Intent::FocusList),
            KeyCode::Backspace => {
                let mut query = self.list.query().to_string();
                query.pop()?;
                Some(Intent::QueryChanged(query))
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut query = self.list.query().to_string();
                query.push(c);
                Some(Intent::QueryChanged(query))
            }
            _ => None,
        }
    }

    fn list_intent(key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Char('q') => Some(Intent::Quit),
            KeyCode::Char('v') | KeyCode::Enter => Some(Intent::Select),
            KeyCode::Char('/') => Some(Intent::FocusSearch),
            KeyCode::Down | KeyCode::Char('j') => Some(Intent::Navigate(1)),
            KeyCode::Up | KeyCode::Char('k') => Some(Intent::Navigate(-1)),
            KeyCode::PageDown => Some(Intent::Navigate(PAGE)),
            KeyCode::PageUp => Some(Intent::Navigate(-PAGE)),
            KeyCode::Home | KeyCode::Char('g') => Some(Intent::SelectFirst),
            KeyCode::End | KeyCode::Char('G') => Some(Intent::SelectLast),
            _ => None,
        }
    }

    /// Apply an intent
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Quit => self.running = false,
            Intent::FocusSearch => self.focus = Focus::Search,
            Intent::FocusList => self.focus = Focus::List,
            Intent::QueryChanged(query) => {
                self.list.on_query_changed(self.repository.records(), &query);
            }
            Intent::Navigate(delta) => self.list.navigate(delta),
            Intent::SelectFirst => self.list.select_first(),
            Intent::SelectLast => self.list.select_last(),
            Intent::Select => self.open_selected(),
            Intent::ToggleVisibility => self.overlay.toggle_visibility(),
            Intent::Close => self.overlay.close(),
            Intent::DismissError => self.error_message = None,
        }
    }

    /// Open the overlay for the row under the cursor, if any
    fn open_selected(&mut self) {
        let Some(index) = self.list.selected_master_index() else {
            return;
        };
        let Some(record) = self.repository.get(index) else {
            return;
        };
        let item = self.repository.source(record);

        if let Err(e) = self.overlay.open(|| SecretDetail::fetch(item)) {
            tracing::warn!("Failed to open '{}': {}", record.identifier, e);
            self.error_message = Some(e.to_string());
        }
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        // The overlay and the error popup are keyboard-only
        if self.overlay.is_open() || self.error_message.is_some() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = (mouse.column, mouse.row);
                if Self::is_in_area(x, y, self.search_area) {
                    self.dispatch(Intent::FocusSearch);
                } else if Self::is_in_area(x, y, self.list_area) {
                    self.dispatch(Intent::FocusList);
                    // Account for the border and the header row
                    if let Some(relative_y) = y.checked_sub(self.list_area.y + 2) {
                        self.list
                            .select_row(self.list_scroll_offset + relative_y as usize);
                    }
                }
            }
            MouseEventKind::ScrollDown => self.dispatch(Intent::Navigate(1)),
            MouseEventKind::ScrollUp => self.dispatch(Intent::Navigate(-1)),
            _ => {}
        }
    }

    fn is_in_area(x: u16, y: u16, area: Rect) -> bool {
        x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
    }
}
