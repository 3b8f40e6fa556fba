//! Main application state and logic

use roundtable_core::controller::Submission;
use roundtable_core::view::is_blank;
use roundtable_core::{Page, Selection};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::ui::theme::Theme;
use crate::ui::{FocusedPanel, Overlay};
use crate::worker::{WorkerRequest, WorkerResponse};

/// Input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - typing a comment
    Insert,
}

/// Main application state
pub struct App {
    // Channel communication with the network worker
    pub request_tx: mpsc::Sender<WorkerRequest>,
    pub response_rx: mpsc::Receiver<WorkerResponse>,

    // Display regions and selected category
    pub page: Page,

    // UI state
    pub theme: Theme,
    pub focused_panel: FocusedPanel,
    overlay: Option<Overlay>,

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,
    submitted_draft: Option<(u64, String)>, // (comments generation, text), restored if posting fails

    // Status
    status_message: Option<String>,
    pub should_quit: bool,

    /// Requests sent but not yet answered
    pub in_flight: usize,
}

impl App {
    /// Create a new application with channel endpoints
    pub fn new(
        request_tx: mpsc::Sender<WorkerRequest>,
        response_rx: mpsc::Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            request_tx,
            response_rx,
            page: Page::new(),
            theme: Theme::default(),
            focused_panel: FocusedPanel::default(),
            overlay: None,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            submitted_draft: None,
            status_message: None,
            should_quit: false,
            in_flight: 0,
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Initial load: select All and fetch everything
    pub fn load(&mut self) {
        self.select_category(Selection::All);
    }

    /// Change the selected category and refresh
    pub fn select_category(&mut self, selection: Selection) {
        if !self.worker_ready() {
            return;
        }
        tracing::info!(category = %selection, "category changed");
        self.page.select(selection);
        self.refresh();
    }

    /// Select the option `delta` steps away in the selector, wrapping around
    pub fn cycle_category(&mut self, delta: isize) {
        let options = Selection::options();
        let current = options
            .iter()
            .position(|s| s == self.page.selected())
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(options.len() as isize) as usize;
        self.select_category(options[next].clone());
    }

    /// Select a selector option by position (0 = All)
    pub fn select_option(&mut self, index: usize) {
        if let Some(selection) = Selection::options().into_iter().nth(index) {
            self.select_category(selection);
        }
    }

    /// Re-fetch catalog and comments for the current category
    pub fn refresh(&mut self) {
        if !self.worker_ready() {
            return;
        }
        let ticket = self.page.begin_refresh();
        self.set_status(format!("Loading {}...", ticket.selection));
        self.dispatch(WorkerRequest::Refresh(ticket));
    }

    /// Post the input buffer as a comment for the current category
    pub fn submit_comment(&mut self) {
        if is_blank(&self.input_buffer) {
            self.set_status("Comment is empty");
            return;
        }
        if !self.worker_ready() {
            return;
        }
        match self.page.begin_submit(&self.input_buffer) {
            Submission::Skip => {
                self.set_status("Comment is empty");
            }
            Submission::Post(pending) => {
                let draft = std::mem::take(&mut self.input_buffer);
                self.submitted_draft = Some((pending.ticket.generation, draft));
                self.cursor_position = 0;
                self.set_status("Posting comment...");
                self.dispatch(WorkerRequest::PostComment(pending));
            }
        }
    }

    /// Delete the comment under the comment cursor
    pub fn delete_selected_comment(&mut self) {
        let Some(id) = self.page.comments.selected().map(|row| row.id.clone()) else {
            self.set_status("No comment selected");
            return;
        };
        if !self.worker_ready() {
            return;
        }
        let ticket = self.page.begin_delete();
        self.set_status("Deleting comment...");
        self.dispatch(WorkerRequest::DeleteComment { ticket, id });
    }

    /// Look up the knight under the gallery cursor
    pub fn activate_selected_knight(&mut self) {
        let Some(name) = self
            .page
            .gallery
            .selected()
            .map(|card| card.activation_key().to_string())
        else {
            return;
        };
        if !self.worker_ready() {
            return;
        }
        let ticket = self.page.begin_lookup(&name);
        self.dispatch(WorkerRequest::Lookup(ticket));
    }

    /// Move the cursor of the focused list
    pub fn move_cursor(&mut self, delta: isize) {
        match self.focused_panel {
            FocusedPanel::Gallery => self.page.gallery.move_cursor(delta),
            FocusedPanel::Comments => self.page.comments.move_cursor(delta),
        }
    }

    /// Whether a request can be queued right now. Checked before any page
    /// state is committed so a refused request leaves nothing half-begun.
    fn worker_ready(&mut self) -> bool {
        if self.request_tx.is_closed() {
            self.set_status("Network worker stopped");
            false
        } else if self.request_tx.capacity() == 0 {
            self.set_status("Worker busy, please retry");
            false
        } else {
            true
        }
    }

    /// Queue a request. Returns false if the worker refused it.
    ///
    /// Callers check [`App::worker_ready`] first and this is the only
    /// sender, so a refusal here means the worker vanished in between.
    fn dispatch(&mut self, request: WorkerRequest) -> bool {
        match self.request_tx.try_send(request) {
            Ok(()) => {
                self.in_flight += 1;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "worker refused request");
                self.set_status("Network worker stopped");
                false
            }
        }
    }

    // =========================================================================
    // Worker responses
    // =========================================================================

    /// Apply every response that has arrived. Returns true if any did.
    pub fn drain_responses(&mut self) -> bool {
        let mut received = false;
        loop {
            match self.response_rx.try_recv() {
                Ok(response) => {
                    self.apply_response(response);
                    received = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.set_status("Network worker stopped");
                    break;
                }
            }
        }
        received
    }

    /// Render a finished round trip if it is still current
    pub fn apply_response(&mut self, response: WorkerResponse) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match response {
            WorkerResponse::Refreshed(result) => {
                if self.page.apply_refresh(result) {
                    if self.page.gallery.notice().is_some() {
                        self.set_status("Could not load knights");
                    } else {
                        let count = self.page.gallery.cards().len();
                        self.set_status(format!("{} - {count} knights", self.page.selected()));
                    }
                }
            }
            WorkerResponse::Comments(result) => {
                let generation = result.ticket.generation;
                let failed = result.comments.is_err();
                let applied = self.page.apply_comments(result);
                if applied && failed {
                    self.restore_draft(generation);
                    self.set_status("Comment request failed");
                } else {
                    self.forget_draft(generation);
                    if applied {
                        self.clear_status();
                    }
                }
            }
            WorkerResponse::Details(result) => {
                self.page.apply_lookup(result);
            }
        }
    }

    /// Put a failed comment back into the input unless something new was typed
    fn restore_draft(&mut self, generation: u64) {
        if let Some(draft) = self.take_draft(generation) {
            if self.input_buffer.is_empty() {
                self.set_input(draft);
            }
        }
    }

    /// Drop the draft once its own post has been answered
    fn forget_draft(&mut self, generation: u64) {
        self.take_draft(generation);
    }

    fn take_draft(&mut self, generation: u64) -> Option<String> {
        match &self.submitted_draft {
            Some((pending, _)) if *pending == generation => {
                self.submitted_draft.take().map(|(_, draft)| draft)
            }
            _ => None,
        }
    }

    // =========================================================================
    // Input editing
    // =========================================================================

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        // Convert cursor position (character index) to byte index
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.remove_char_at_cursor();
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        self.remove_char_at_cursor();
    }

    fn remove_char_at_cursor(&mut self) {
        if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position) {
            self.input_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Set input buffer content and move cursor to end (unicode-safe)
    pub fn set_input(&mut self, content: impl Into<String>) {
        self.input_buffer = content.into();
        self.cursor_position = self.input_buffer.chars().count();
    }

    // =========================================================================
    // Overlay, focus, status
    // =========================================================================

    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn cycle_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Gallery => FocusedPanel::Comments,
            FocusedPanel::Comments => FocusedPanel::Gallery,
        };
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }
}
