use crate::app::event::LedgerId;
use crate::config::AppConfig;
use crate::ledger::{format_number, Entry, LedgerError, Operation};
use chrono::Local;
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthStr;

/// How long a status-bar message stays up, in ticks (50ms each).
const STATUS_TICKS: u64 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BufferKey {
    Overview,
    Ledger(LedgerId),
}

#[derive(Debug, Clone)]
pub struct Message {
    pub timestamp: String,
    pub sender: String,
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageKind {
    Entry,
    Total,
    System,
    Error,
}

#[derive(Debug)]
pub struct Buffer {
    pub messages: Vec<Message>,
    pub scroll_offset: usize,
    pub unread_count: usize,
    pub has_error: bool,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            scroll_offset: 0,
            unread_count: 0,
            has_error: false,
        }
    }

    pub fn add_message(&mut self, msg: Message, max_scrollback: usize) {
        self.messages.push(msg);
        if self.messages.len() > max_scrollback {
            let excess = self.messages.len() - max_scrollback;
            self.messages.drain(..excess);
            self.scroll_offset = self.scroll_offset.saturating_sub(excess);
        }
    }
}

/// Display mirror of one open ledger. The authoritative total lives in the
/// accumulator owned by `LedgerManager`; this copy is refreshed from the
/// events it emits.
#[derive(Debug, Clone)]
pub struct LedgerState {
    pub id: LedgerId,
    pub name: String,
    pub total: f64,
    pub applied: usize,
    pub rejected: usize,
    pub last_entry: Option<Entry>,
}

impl LedgerState {
    pub fn new(id: LedgerId, name: String) -> Self {
        Self {
            id,
            name,
            total: 0.0,
            applied: 0,
            rejected: 0,
            last_entry: None,
        }
    }
}

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    /// Byte offset into `text`, always on a char boundary.
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
        }
    }

    /// Terminal columns between the start of the line and the cursor.
    pub fn cursor_width(&self) -> usize {
        self.text[..self.cursor].width()
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Take the submitted line, recording it in history unless it repeats
    /// the previous entry.
    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.is_empty() && self.history.last() != Some(&text) {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            Some(0) => return,
            Some(i) => i - 1,
            None => self.history.len() - 1,
        };
        self.history_index = Some(idx);
        self.set_text(self.history[idx].clone());
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.set_text(self.history[i + 1].clone());
            }
            Some(_) => {
                self.history_index = None;
                self.clear();
            }
            None => {}
        }
    }

    pub fn delete_word_back(&mut self) {
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end_matches(' ');
        let start = trimmed.rfind(' ').map(|i| i + 1).unwrap_or(0);
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    LedgerTree,
    EntryArea,
    Input,
    Summary,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: u64,
}

pub struct AppState {
    pub config: AppConfig,
    pub ledgers: Vec<LedgerState>,
    pub buffers: BTreeMap<BufferKey, Buffer>,
    pub active_buffer: Option<BufferKey>,
    pub input: InputState,
    pub focus: FocusPanel,
    pub next_ledger_id: LedgerId,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<StatusMessage>,
    pub tick_count: u64,
    pub timestamp_format: String,
    /// Messages added since the last drain, for the journal.
    pub new_messages: Vec<(BufferKey, Message)>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let timestamp_format = config.ui.timestamp_format.clone();
        let mut buffers = BTreeMap::new();
        buffers.insert(BufferKey::Overview, Buffer::new());
        Self {
            config,
            ledgers: Vec::new(),
            buffers,
            active_buffer: Some(BufferKey::Overview),
            input: InputState::new(),
            focus: FocusPanel::Input,
            next_ledger_id: 0,
            should_quit: false,
            dirty: true,
            status_message: None,
            tick_count: 0,
            timestamp_format,
            new_messages: Vec::new(),
        }
    }

    pub fn allocate_ledger_id(&mut self) -> LedgerId {
        let id = self.next_ledger_id;
        self.next_ledger_id += 1;
        id
    }

    /// Register a ledger and make it the active buffer.
    pub fn add_ledger(&mut self, ledger: LedgerState) {
        let key = BufferKey::Ledger(ledger.id);
        self.buffers.entry(key.clone()).or_insert_with(Buffer::new);
        self.ledgers.push(ledger);
        self.set_active_buffer(key);
    }

    pub fn remove_ledger(&mut self, id: LedgerId) -> Option<LedgerState> {
        let pos = self.ledgers.iter().position(|l| l.id == id)?;
        let key = BufferKey::Ledger(id);
        self.buffers.remove(&key);
        if self.active_buffer.as_ref() == Some(&key) {
            self.set_active_buffer(BufferKey::Overview);
        }
        self.dirty = true;
        Some(self.ledgers.remove(pos))
    }

    pub fn get_ledger(&self, id: LedgerId) -> Option<&LedgerState> {
        self.ledgers.iter().find(|l| l.id == id)
    }

    pub fn get_ledger_mut(&mut self, id: LedgerId) -> Option<&mut LedgerState> {
        self.ledgers.iter_mut().find(|l| l.id == id)
    }

    pub fn find_ledger_by_name(&self, name: &str) -> Option<&LedgerState> {
        self.ledgers.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn format_number(&self, x: f64) -> String {
        format_number(x, self.config.ui.precision)
    }

    pub fn add_message_to_buffer(&mut self, key: &BufferKey, msg: Message) {
        let max = self.config.ui.max_scrollback;
        let is_active = self.active_buffer.as_ref() == Some(key);
        let is_error = msg.kind == MessageKind::Error;
        self.new_messages.push((key.clone(), msg.clone()));
        let buf = self.buffers.entry(key.clone()).or_insert_with(Buffer::new);
        buf.add_message(msg, max);
        if !is_active {
            buf.unread_count += 1;
            buf.has_error |= is_error;
        }
        self.dirty = true;
    }

    fn push(&mut self, key: &BufferKey, sender: &str, text: String, kind: MessageKind) {
        let msg = Message {
            timestamp: Local::now().format(&self.timestamp_format).to_string(),
            sender: sender.to_string(),
            text,
            kind,
        };
        self.add_message_to_buffer(key, msg);
    }

    pub fn system_message(&mut self, key: &BufferKey, text: String) {
        self.push(key, "***", text, MessageKind::System);
    }

    pub fn error_message(&mut self, key: &BufferKey, text: String) {
        self.push(key, "!!!", text, MessageKind::Error);
    }

    /// Error shown in whichever buffer the user is looking at.
    pub fn error_in_active(&mut self, text: String) {
        let key = self.active_buffer.clone().unwrap_or(BufferKey::Overview);
        self.error_message(&key, text);
    }

    pub fn record_entry(&mut self, id: LedgerId, entry: Entry) {
        let text = format!(
            "{} {}    {} {} {} = {}",
            entry.operation,
            self.format_number(entry.operand),
            self.format_number(entry.before),
            entry.operation.symbol(),
            self.format_number(entry.operand),
            self.format_number(entry.after),
        );
        let Some(ledger) = self.get_ledger_mut(id) else {
            return;
        };
        ledger.total = entry.after;
        ledger.applied += 1;
        ledger.last_entry = Some(entry);
        self.push(&BufferKey::Ledger(id), entry.operation.symbol(), text, MessageKind::Entry);
    }

    pub fn record_rejection(&mut self, id: LedgerId, operation: Operation, error: &LedgerError) {
        let Some(ledger) = self.get_ledger_mut(id) else {
            return;
        };
        ledger.rejected += 1;
        self.error_message(
            &BufferKey::Ledger(id),
            format!("{} rejected: {}", operation, error),
        );
    }

    pub fn report_total(&mut self, id: LedgerId, total: f64) {
        let text = format!("total = {}", self.format_number(total));
        let Some(ledger) = self.get_ledger_mut(id) else {
            return;
        };
        ledger.total = total;
        self.push(&BufferKey::Ledger(id), "=", text, MessageKind::Total);
    }

    pub fn set_active_buffer(&mut self, key: BufferKey) {
        if let Some(buf) = self.buffers.get_mut(&key) {
            buf.unread_count = 0;
            buf.has_error = false;
        }
        self.active_buffer = Some(key);
        self.dirty = true;
    }

    pub fn active_ledger_id(&self) -> Option<LedgerId> {
        match self.active_buffer {
            Some(BufferKey::Ledger(id)) => Some(id),
            _ => None,
        }
    }

    pub fn active_ledger(&self) -> Option<&LedgerState> {
        self.active_ledger_id().and_then(|id| self.get_ledger(id))
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Input => FocusPanel::LedgerTree,
            FocusPanel::LedgerTree => FocusPanel::EntryArea,
            FocusPanel::EntryArea => FocusPanel::Summary,
            FocusPanel::Summary => FocusPanel::Input,
        };
        self.dirty = true;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            expires_at: self.tick_count + STATUS_TICKS,
        });
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.text.clone();
        }
        let applied: usize = self.ledgers.iter().map(|l| l.applied).sum();
        let rejected: usize = self.ledgers.iter().map(|l| l.rejected).sum();
        let mut s = format!("Ledgers: {} | Entries: {}", self.ledgers.len(), applied);
        if rejected > 0 {
            s.push_str(&format!(" | Rejected: {}", rejected));
        }
        s
    }

    fn step_buffer(&mut self, forward: bool) {
        let keys: Vec<_> = self.buffers.keys().cloned().collect();
        if keys.is_empty() {
            return;
        }
        let current = self
            .active_buffer
            .as_ref()
            .and_then(|k| keys.iter().position(|x| x == k))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % keys.len()
        } else {
            (current + keys.len() - 1) % keys.len()
        };
        self.set_active_buffer(keys[next].clone());
    }

    pub fn select_next_buffer(&mut self) {
        self.step_buffer(true);
    }

    pub fn select_prev_buffer(&mut self) {
        self.step_buffer(false);
    }
}
