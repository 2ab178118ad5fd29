mod app;
mod config;
mod ledger;
mod logging;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::*;
use crate::config::model::ScriptStep;
use crate::ledger::manager::LedgerManager;
use crate::logging::LedgerJournal;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    logging::init_tracing(&cfg.diagnostics)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Everything the event loop drives besides the UI state: the accumulators,
/// the journal and the config file `/keep` writes to.
struct Host {
    manager: LedgerManager,
    journal: LedgerJournal,
    config_path: PathBuf,
}

impl Host {
    /// Register a new ledger in the UI state and the manager, then run its
    /// startup script.
    fn open_ledger(&mut self, state: &mut AppState, name: String, script: &[ScriptStep]) -> Result<Vec<Action>> {
        let ledger_id = state.allocate_ledger_id();
        self.manager.open(ledger_id)?;
        state.add_ledger(LedgerState::new(ledger_id, name.clone()));
        let key = BufferKey::Ledger(ledger_id);
        state.system_message(&key, format!("Opened ledger '{}' at 0", name));
        let mut follow_up = Vec::new();
        if !script.is_empty() {
            state.system_message(&key, format!("Running {} scripted step(s)", script.len()));
            for event in self.manager.run_script(ledger_id, script)? {
                follow_up.extend(handler::handle_event(state, event));
            }
        }
        tracing::info!(ledger_id, name = %name, steps = script.len(), "ledger ready");
        Ok(follow_up)
    }

    /// Carry out actions in order, including any that handling their results
    /// produces.
    fn run(&mut self, state: &mut AppState, actions: Vec<Action>) {
        let mut queue = VecDeque::from(actions);
        while let Some(action) = queue.pop_front() {
            queue.extend(self.perform(state, action));
        }
        self.flush_journal(state);
    }

    fn perform(&mut self, state: &mut AppState, action: Action) -> Vec<Action> {
        match action {
            Action::OpenLedger { name } => match self.open_ledger(state, name, &[]) {
                Ok(follow_up) => return follow_up,
                Err(e) => state.error_in_active(format!("Open failed: {:#}", e)),
            },
            Action::CloseLedger { ledger_id } => {
                // Journal what the ledger produced while its name is still known
                self.flush_journal(state);
                let closed = self.manager.close(ledger_id);
                if let Err(ref e) = closed {
                    state.error_in_active(format!("Close failed: {:#}", e));
                }
                if let Some(ledger) = state.remove_ledger(ledger_id) {
                    let total = closed.unwrap_or(ledger.total);
                    state.system_message(
                        &BufferKey::Overview,
                        format!("Closed ledger '{}' at {}", ledger.name, state.format_number(total)),
                    );
                }
            }
            Action::Apply {
                ledger_id,
                operation,
                operand,
            } => match self.manager.apply(ledger_id, operation, &operand) {
                Ok(event) => return handler::handle_event(state, event),
                Err(e) => state.error_in_active(format!("{} failed: {:#}", operation, e)),
            },
            Action::QueryTotal { ledger_id } => match self.manager.report_total(ledger_id) {
                Ok(event) => return handler::handle_event(state, event),
                Err(e) => state.error_in_active(format!("Total failed: {:#}", e)),
            },
            Action::KeepLedger { name } => {
                match config::keep_ledger(&mut state.config, &name, &self.config_path) {
                    Ok(()) => state.set_status(format!("'{}' will reopen on next start", name)),
                    Err(e) => state.error_in_active(format!("Saving config failed: {:#}", e)),
                }
            }
            Action::Quit => {
                state.should_quit = true;
            }
        }
        vec![]
    }

    /// Hand queued ledger messages to the journal.
    fn flush_journal(&mut self, state: &mut AppState) {
        for (key, msg) in state.new_messages.drain(..) {
            let BufferKey::Ledger(id) = key else { continue };
            if let Some(ledger) = state.ledgers.iter().find(|l| l.id == id) {
                self.journal.record(&ledger.name, &msg);
            }
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg.clone());
    let mut host = Host {
        manager: LedgerManager::new(),
        journal: LedgerJournal::new(&cfg.journal),
        config_path: config::config_path(),
    };

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(error)) => {
                    tracing::warn!(%error, "terminal event stream failed");
                    break;
                }
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    let overview = BufferKey::Overview;
    state.system_message(&overview, "Welcome to tally".to_string());
    state.system_message(&overview, String::new());
    for line in handler::help_lines() {
        state.system_message(&overview, line);
    }

    for ledger_cfg in cfg.ledgers.iter().filter(|l| l.auto_open) {
        match host.open_ledger(&mut state, ledger_cfg.name.clone(), &ledger_cfg.script) {
            Ok(follow_up) => host.run(&mut state, follow_up),
            Err(e) => state.error_message(
                &overview,
                format!("Could not open '{}': {:#}", ledger_cfg.name, e),
            ),
        }
    }

    // Start on the first configured ledger, or the overview if there is none
    match state.ledgers.first().map(|l| l.id) {
        Some(id) => state.set_active_buffer(BufferKey::Ledger(id)),
        None => state.set_active_buffer(overview),
    }
    host.flush_journal(&mut state);

    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);
        host.run(&mut state, actions);

        if state.should_quit {
            tracing::info!(ledgers = state.ledgers.len(), "quitting");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
