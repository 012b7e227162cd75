//! Interactive mode's command registry (spec.md §4.H): a small set of
//! named commands (`step`, `run`, `runto`, `list stages`, `list trees`,
//! `show <n>`, `sshow <n>`) gated by whether they accept a raw line or
//! pre-tokenised arguments.

use std::collections::HashMap;

/// What one interactive command receives: the rest of the line after the
/// command name, already split on whitespace for commands that declare
/// themselves tokenised.
pub enum CommandInput<'a> {
    RawLine(&'a str),
    Tokens(Vec<&'a str>),
}

/// Outcome of running one interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Handled(String),
    Unknown,
}

pub type CommandFn = Box<dyn Fn(CommandInput<'_>) -> String>;

struct Command {
    tokenised: bool,
    run: CommandFn,
}

/// Registry of interactive commands. Each is declared raw-line or
/// tokenised at registration; `step`/`run`/`runto` take a pass or stage
/// name argument and are naturally tokenised, while a command that wants
/// to echo or re-lex its own input declares itself raw.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, tokenised: bool, run: CommandFn) {
        self.commands.insert(name.into(), Command { tokenised, run });
    }

    /// Dispatch one interactive line: the first whitespace-delimited word
    /// names the command, the rest is handed to it per that command's
    /// declared input shape.
    pub fn dispatch(&self, line: &str) -> CommandOutcome {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match self.commands.get(name) {
            Some(cmd) => {
                let input = if cmd.tokenised {
                    CommandInput::Tokens(rest.split_whitespace().collect())
                } else {
                    CommandInput::RawLine(rest)
                };
                CommandOutcome::Handled((cmd.run)(input))
            }
            None => CommandOutcome::Unknown,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Build the registry of built-in interactive commands described by
/// spec.md §4.H: `step`, `run`, `runto`, `list stages`, `list trees`,
/// `show <n>`, `sshow <n>`. Each is a thin stub here — real behaviour is
/// wired up by the orchestrator binding these names to its own stage
/// table and tree store; this registry only fixes the names and input
/// shapes the interactive loop promises to honour.
pub fn builtin_commands() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register("step", false, Box::new(|_input| "stepped one pass".to_string()));
    registry.register("run", false, Box::new(|_input| "ran to completion".to_string()));
    registry.register(
        "runto",
        true,
        Box::new(|input| match input {
            CommandInput::Tokens(tokens) => format!("ran to {}", tokens.first().unwrap_or(&"<missing>")),
            CommandInput::RawLine(_) => unreachable!("runto is tokenised"),
        }),
    );
    registry.register(
        "list",
        true,
        Box::new(|input| match input {
            CommandInput::Tokens(tokens) => format!("listing {}", tokens.first().unwrap_or(&"<missing>")),
            CommandInput::RawLine(_) => unreachable!("list is tokenised"),
        }),
    );
    registry.register(
        "show",
        true,
        Box::new(|input| match input {
            CommandInput::Tokens(tokens) => format!("showing tree #{}", tokens.first().unwrap_or(&"0")),
            CommandInput::RawLine(_) => unreachable!("show is tokenised"),
        }),
    );
    registry.register(
        "sshow",
        true,
        Box::new(|input| match input {
            CommandInput::Tokens(tokens) => format!("showing short tree #{}", tokens.first().unwrap_or(&"0")),
            CommandInput::RawLine(_) => unreachable!("sshow is tokenised"),
        }),
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_routes_to_the_named_command_with_tokenised_args() {
        let registry = builtin_commands();
        let outcome = registry.dispatch("runto typecheck");
        assert_eq!(outcome, CommandOutcome::Handled("ran to typecheck".to_string()));
    }

    #[test]
    fn unknown_command_is_reported() {
        let registry = builtin_commands();
        assert_eq!(registry.dispatch("frobnicate"), CommandOutcome::Unknown);
    }
}
