use crate::app::action::Action;
use crate::app::event::{AppEvent, LedgerId};
use crate::app::state::*;
use crate::config::naming::generate_ledger_name;
use crate::ledger::commands::{self, ParsedCommand, COMMANDS};
use crate::ledger::Operation;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::EntryApplied { ledger_id, entry } => {
            state.record_entry(ledger_id, entry);
            vec![]
        }
        AppEvent::EntryRejected {
            ledger_id,
            operation,
            error,
        } => {
            state.record_rejection(ledger_id, operation, &error);
            vec![]
        }
        AppEvent::TotalReported { ledger_id, total } => {
            state.report_total(ledger_id, total);
            vec![]
        }
        AppEvent::Tick => handle_tick(state),
    }
}

fn handle_tick(state: &mut AppState) -> Vec<Action> {
    state.tick_count = state.tick_count.wrapping_add(1);
    let expired = state
        .status_message
        .as_ref()
        .is_some_and(|m| state.tick_count >= m.expires_at);
    if expired {
        state.status_message = None;
        state.dirty = true;
    }
    vec![]
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return vec![Action::Quit],
            KeyCode::Char('n') => {
                state.select_next_buffer();
                return vec![];
            }
            KeyCode::Char('p') => {
                state.select_prev_buffer();
                return vec![];
            }
            _ => {}
        }
    }

    // Tab to cycle focus (when not in input; the input uses it for completion)
    if key.code == KeyCode::Tab && state.focus != FocusPanel::Input {
        state.cycle_focus();
        return vec![];
    }

    match state.focus {
        FocusPanel::Input => handle_input_key(state, key),
        FocusPanel::EntryArea => handle_entry_key(state, key),
        FocusPanel::LedgerTree => handle_tree_key(state, key),
        FocusPanel::Summary => vec![],
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => {
            let text = state.input.take_text();
            if text.trim().is_empty() {
                return vec![];
            }
            match commands::parse_command(&text) {
                Some(cmd) => handle_command(state, cmd),
                None => {
                    state.error_in_active(format!(
                        "Not understood: {}  (try `+ 5`, `/div 2`, or /help)",
                        text.trim()
                    ));
                    vec![]
                }
            }
        }
        KeyCode::Backspace => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                state.input.delete_word_back();
            } else {
                state.input.delete_back();
            }
            vec![]
        }
        KeyCode::Delete => {
            state.input.delete_forward();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        KeyCode::Up => {
            state.input.history_up();
            vec![]
        }
        KeyCode::Down => {
            state.input.history_down();
            vec![]
        }
        KeyCode::Tab => {
            if state.input.text.starts_with('/') {
                try_command_completion(state);
            } else if state.input.text.is_empty() {
                state.cycle_focus();
            }
            vec![]
        }
        KeyCode::PageUp => {
            scroll_up(state);
            vec![]
        }
        KeyCode::PageDown => {
            scroll_down(state);
            vec![]
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'a' => state.input.move_home(),
                    'e' => state.input.move_end(),
                    'w' => state.input.delete_word_back(),
                    'u' => state.input.clear(),
                    _ => {}
                }
            } else {
                state.input.insert_char(c);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_entry_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::PageUp | KeyCode::Up => scroll_up(state),
        KeyCode::PageDown | KeyCode::Down => scroll_down(state),
        KeyCode::Char(c) => {
            // Start typing: switch to input
            state.focus = FocusPanel::Input;
            state.input.insert_char(c);
        }
        _ => {}
    }
    vec![]
}

fn handle_tree_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up => state.select_prev_buffer(),
        KeyCode::Down => state.select_next_buffer(),
        KeyCode::Enter => state.focus = FocusPanel::Input,
        _ => {}
    }
    vec![]
}

fn scroll_up(state: &mut AppState) {
    if let Some(ref key) = state.active_buffer {
        if let Some(buf) = state.buffers.get_mut(key) {
            let max_scroll = buf.messages.len().saturating_sub(1);
            buf.scroll_offset = (buf.scroll_offset + 5).min(max_scroll);
            state.dirty = true;
        }
    }
}

fn scroll_down(state: &mut AppState) {
    if let Some(ref key) = state.active_buffer {
        if let Some(buf) = state.buffers.get_mut(key) {
            buf.scroll_offset = buf.scroll_offset.saturating_sub(5);
            state.dirty = true;
        }
    }
}

fn try_command_completion(state: &mut AppState) {
    let text = state.input.text.clone();
    let parts: Vec<&str> = text[1..].splitn(2, ' ').collect();
    let cmd = parts.first().unwrap_or(&"").to_lowercase();

    // Completing the command name itself
    if parts.len() == 1 {
        if let Some(first) = COMMANDS.iter().find(|c| c.starts_with(cmd.as_str())) {
            state.input.set_text(format!("/{} ", first));
        }
        return;
    }

    // Completing a ledger name
    if matches!(cmd.as_str(), "switch" | "sw") {
        let partial = parts[1].trim().to_lowercase();
        let found = state
            .ledgers
            .iter()
            .find(|l| l.name.to_lowercase().starts_with(&partial))
            .map(|l| l.name.clone());
        if let Some(name) = found {
            state.input.set_text(format!("/{} {}", cmd, name));
        }
    }
}

/// The ledger a mutation or query applies to. Reports on the status bar when
/// the overview is active.
fn require_active_ledger(state: &mut AppState) -> Option<LedgerId> {
    let id = state.active_ledger_id();
    if id.is_none() {
        state.set_status("No active ledger. Open one with /new or pick one with Ctrl-N");
    }
    id
}

fn handle_command(state: &mut AppState, cmd: ParsedCommand) -> Vec<Action> {
    match cmd {
        ParsedCommand::Apply { operation, operand } => match require_active_ledger(state) {
            Some(ledger_id) => vec![Action::Apply {
                ledger_id,
                operation,
                operand,
            }],
            None => vec![],
        },
        ParsedCommand::Total => match require_active_ledger(state) {
            Some(ledger_id) => vec![Action::QueryTotal { ledger_id }],
            None => vec![],
        },
        ParsedCommand::New { name } => {
            let name = name.unwrap_or_else(generate_ledger_name);
            if let Some(id) = state.find_ledger_by_name(&name).map(|l| l.id) {
                let key = BufferKey::Ledger(id);
                state.set_active_buffer(key.clone());
                state.error_message(&key, format!("Ledger '{}' is already open", name));
                vec![]
            } else {
                vec![Action::OpenLedger { name }]
            }
        }
        ParsedCommand::Close => match require_active_ledger(state) {
            Some(ledger_id) => vec![Action::CloseLedger { ledger_id }],
            None => vec![],
        },
        ParsedCommand::List => {
            let key = state.active_buffer.clone().unwrap_or(BufferKey::Overview);
            if state.ledgers.is_empty() {
                state.system_message(&key, "No open ledgers.".to_string());
            } else {
                let lines: Vec<String> = state
                    .ledgers
                    .iter()
                    .map(|l| {
                        format!(
                            "  {}  total {}  ({} entries, {} rejected)",
                            l.name,
                            state.format_number(l.total),
                            l.applied,
                            l.rejected
                        )
                    })
                    .collect();
                for line in lines {
                    state.system_message(&key, line);
                }
            }
            vec![]
        }
        ParsedCommand::Switch { name } => {
            match state.find_ledger_by_name(&name).map(|l| l.id) {
                Some(id) => state.set_active_buffer(BufferKey::Ledger(id)),
                None => {
                    let names: Vec<_> = state.ledgers.iter().map(|l| l.name.as_str()).collect();
                    let text = format!("Unknown ledger '{}'. Open: {}", name, names.join(", "));
                    state.error_in_active(text);
                }
            }
            vec![]
        }
        ParsedCommand::Keep => {
            let Some(name) = state.active_ledger().map(|l| l.name.clone()) else {
                state.set_status("No active ledger to keep");
                return vec![];
            };
            if state.config.ledgers.iter().any(|l| l.name.eq_ignore_ascii_case(&name)) {
                state.set_status(format!("'{}' is already in the config", name));
                vec![]
            } else {
                vec![Action::KeepLedger { name }]
            }
        }
        ParsedCommand::Help => {
            let key = state.active_buffer.clone().unwrap_or(BufferKey::Overview);
            for line in help_lines() {
                state.system_message(&key, line);
            }
            vec![]
        }
        ParsedCommand::Quit => vec![Action::Quit],
    }
}

pub fn help_lines() -> Vec<String> {
    let mut lines = vec!["Arithmetic (applies to the active ledger):".to_string()];
    for op in Operation::ALL {
        lines.push(format!("  /{:<10} <n>   or   {} <n>", op.verb(), op.symbol()));
    }
    lines.extend(
        [
            "Ledgers:",
            "  /total          show the active ledger's total",
            "  /new [name]     open a ledger (random name if omitted)",
            "  /close          close the active ledger",
            "  /list           list open ledgers",
            "  /switch <name>  switch ledger (Ctrl-N / Ctrl-P also cycle)",
            "  /keep           reopen the active ledger on next start",
            "  /quit           exit",
            "Non-numeric operands are rejected and leave the total unchanged.",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    lines
}
