//! Digit-entry widget model for verification codes.
//!
//! The widget is a fixed row of single-character cells. Each cell holds
//! either nothing or one ASCII digit; the code is the concatenation of the
//! cells. Keyboard focus is tracked by index and mirrored onto one
//! [`FocusHandle`] per cell so a host can move its real input focus.

use std::fmt;

/// Imperative focus operations on one rendered cell
pub trait FocusHandle: Send {
    /// Move keyboard focus to this cell
    fn focus(&mut self);

    /// Select the cell's current content so the next keystroke overtypes it
    fn select_all(&mut self);
}

/// Focus handle for hosts without a rendered cell
///
/// Records how often it was focused and selected, which is all a headless
/// host (or a test) needs to know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessHandle {
    pub focus_count: usize,
    pub select_count: usize,
}

impl FocusHandle for HeadlessHandle {
    fn focus(&mut self) {
        self.focus_count += 1;
    }

    fn select_all(&mut self) {
        self.select_count += 1;
    }
}

/// Keyboard and clipboard events addressed to one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellInput {
    /// A character typed into the cell
    Char { index: usize, ch: char },
    /// Backspace pressed in the cell
    Backspace { index: usize },
    /// Left arrow pressed in the cell
    ArrowLeft { index: usize },
    /// Right arrow pressed in the cell
    ArrowRight { index: usize },
    /// Clipboard text pasted into the cell
    Paste { index: usize, text: String },
    /// The cell received focus (click or tab)
    Focus { index: usize },
}

/// Callback invoked with the full code whenever a mutation completes it
pub type CompletionCallback = Box<dyn FnMut(&str) + Send>;

/// Verification code entry with per-cell focus handles
pub struct DigitEntry<H: FocusHandle = HeadlessHandle> {
    cells: Vec<Option<char>>,
    handles: Vec<H>,
    focused: usize,
    on_complete: Option<CompletionCallback>,
}

impl DigitEntry<HeadlessHandle> {
    /// Create an entry with `length` cells (at least one) and headless handles
    pub fn new(length: usize) -> Self {
        Self::from_handles(vec![HeadlessHandle::default(); length.max(1)])
    }
}

impl<H: FocusHandle> DigitEntry<H> {
    /// Create an entry with one cell per handle; `None` if no handles are given
    pub fn with_handles(handles: Vec<H>) -> Option<Self> {
        if handles.is_empty() {
            return None;
        }
        Some(Self::from_handles(handles))
    }

    fn from_handles(handles: Vec<H>) -> Self {
        Self {
            cells: vec![None; handles.len()],
            handles,
            focused: 0,
            on_complete: None,
        }
    }

    /// Register the completion callback, replacing any previous one
    pub fn on_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Number of cells
    pub fn code_length(&self) -> usize {
        self.cells.len()
    }

    /// Content of one cell
    pub fn cell(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// Content of all cells in order
    pub fn cells(&self) -> &[Option<char>] {
        &self.cells
    }

    /// Index of the focused cell
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Focus handle of one cell
    pub fn handle(&self, index: usize) -> Option<&H> {
        self.handles.get(index)
    }

    /// Concatenation of the filled cells
    pub fn code(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    /// Whether every cell holds a digit
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Route an input event to the matching operation
    ///
    /// Returns the completed code when the event left every cell filled.
    pub fn apply(&mut self, input: CellInput) -> Option<String> {
        match input {
            CellInput::Char { index, ch } => self.input(index, ch),
            CellInput::Backspace { index } => {
                self.backspace(index);
                None
            }
            CellInput::ArrowLeft { index } => {
                self.move_left(index);
                None
            }
            CellInput::ArrowRight { index } => {
                self.move_right(index);
                None
            }
            CellInput::Paste { index, text } => self.paste(index, &text),
            CellInput::Focus { index } => {
                self.focus(index);
                None
            }
        }
    }

    /// Type a character into a cell
    ///
    /// Non-digits are rejected and leave the cell unchanged. A digit replaces
    /// the cell content and advances focus unless this is the last cell.
    pub fn input(&mut self, index: usize, ch: char) -> Option<String> {
        if index >= self.cells.len() || !ch.is_ascii_digit() {
            return None;
        }
        self.cells[index] = Some(ch);
        if index + 1 < self.cells.len() {
            self.move_focus(index + 1);
        }
        self.notify_if_complete()
    }

    /// Backspace in a cell
    ///
    /// A filled cell is cleared in place. An empty cell clears its left
    /// neighbour and moves focus there; on the first cell nothing happens.
    pub fn backspace(&mut self, index: usize) {
        if index >= self.cells.len() {
            return;
        }
        if self.cells[index].is_some() {
            self.cells[index] = None;
        } else if index > 0 {
            self.cells[index - 1] = None;
            self.move_focus(index - 1);
        }
    }

    /// Left arrow: focus the previous cell, content untouched
    pub fn move_left(&mut self, index: usize) {
        if index > 0 && index < self.cells.len() {
            self.move_focus(index - 1);
        }
    }

    /// Right arrow: focus the next cell, content untouched
    pub fn move_right(&mut self, index: usize) {
        if index + 1 < self.cells.len() {
            self.move_focus(index + 1);
        }
    }

    /// Paste clipboard text into a cell
    ///
    /// On the first cell the digits of `text` (non-digits filtered out) fill
    /// the cells from the left, up to the cell count, and focus lands on the
    /// cell after the last one filled, clamped to the last cell. Any other
    /// cell accepts a single character like a typed key, so only the first
    /// character of the clipboard counts.
    pub fn paste(&mut self, index: usize, text: &str) -> Option<String> {
        if index >= self.cells.len() {
            return None;
        }
        if index != 0 {
            return text.chars().next().and_then(|ch| self.input(index, ch));
        }

        let digits: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(self.cells.len())
            .collect();
        if digits.is_empty() {
            return None;
        }

        for (cell, digit) in self.cells.iter_mut().zip(&digits) {
            *cell = Some(*digit);
        }
        self.move_focus(digits.len().min(self.cells.len() - 1));
        self.notify_if_complete()
    }

    /// Focus a cell and select its content
    pub fn focus(&mut self, index: usize) {
        if index < self.cells.len() {
            self.move_focus(index);
        }
    }

    /// Empty every cell and focus the first one
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.move_focus(0);
    }

    fn move_focus(&mut self, index: usize) {
        self.focused = index;
        let handle = &mut self.handles[index];
        handle.focus();
        handle.select_all();
    }

    fn notify_if_complete(&mut self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        let code = self.code();
        if let Some(callback) = self.on_complete.as_mut() {
            callback(&code);
        }
        Some(code)
    }
}

impl<H: FocusHandle> fmt::Debug for DigitEntry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitEntry")
            .field("cells", &self.cells)
            .field("focused", &self.focused)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}
