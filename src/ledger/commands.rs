//! User input parser.
//!
//! Parses `/command arg ...` lines and bare arithmetic lines like `+ 5` or
//! `div 2` into typed [`ParsedCommand`] values that the event handler can act
//! on. Operands are left as [`Operand`]s; validating them is the
//! accumulator's job.

use crate::ledger::operand::Operand;
use crate::ledger::operation::Operation;

/// A parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCommand {
    Apply { operation: Operation, operand: Operand },
    Total,
    New { name: Option<String> },
    Close,
    List,
    Switch { name: String },
    Keep,
    Help,
    Quit,
}

/// Command names offered by tab completion.
pub const COMMANDS: &[&str] = &[
    "add", "sub", "subtract", "mul", "multiply", "div", "divide", "total", "new", "open",
    "close", "list", "ls", "switch", "sw", "keep", "help", "quit", "exit",
];

/// Parse one line of input.
///
/// Returns `None` for empty input, unknown commands, and bare lines that do
/// not start with an operation. Commands are case-insensitive.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match input.strip_prefix('/') {
        Some(rest) => parse_slash(rest),
        None => parse_bare(input),
    }
}

fn parse_slash(rest: &str) -> Option<ParsedCommand> {
    let mut parts = rest.splitn(2, ' ');
    let cmd = parts.next()?.to_lowercase();
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match cmd.as_str() {
        "add" | "sub" | "subtract" | "mul" | "multiply" | "div" | "divide" => {
            let operation = Operation::from_word(&cmd)?;
            // A missing operand is still a mutation attempt; the boundary
            // rejects it rather than the parser dropping it.
            let operand = arg.map(Operand::from_input).unwrap_or(Operand::Missing);
            Some(ParsedCommand::Apply { operation, operand })
        }
        "total" | "t" => Some(ParsedCommand::Total),
        "new" | "open" => Some(ParsedCommand::New {
            name: arg.map(str::to_string),
        }),
        "close" => Some(ParsedCommand::Close),
        "list" | "ls" => Some(ParsedCommand::List),
        "switch" | "sw" => Some(ParsedCommand::Switch {
            name: arg?.to_string(),
        }),
        "keep" => Some(ParsedCommand::Keep),
        "help" | "h" => Some(ParsedCommand::Help),
        "quit" | "exit" => Some(ParsedCommand::Quit),
        _ => None,
    }
}

/// `+ 5`, `*4`, `÷ 2`, `times 3`, `div2`.
fn parse_bare(input: &str) -> Option<ParsedCommand> {
    let first = input.chars().next()?;
    if let Some(operation) = Operation::from_symbol(first) {
        let operand = Operand::from_input(&input[first.len_utf8()..]);
        return Some(ParsedCommand::Apply { operation, operand });
    }

    // Leading word, glued to the operand or not
    let split = input
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(input.len());
    let (word, rest) = input.split_at(split);
    let operation = Operation::from_word(word)?;
    Some(ParsedCommand::Apply {
        operation,
        operand: Operand::from_input(rest),
    })
}
