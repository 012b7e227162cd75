//! Compiler orchestration (spec.md §4.H): the stage table, CLI surface,
//! specs file, tree/token dump producers, interactive command registry
//! and the compile context's error/warning bookkeeping.

#[cfg(feature = "cli")]
pub mod cli;
mod context;
mod dump;
mod interactive;
pub mod specs;
mod stage;

pub use context::{CompileContext, SourceCounters};
pub use dump::{dump_token_xml, dump_tree_sexpr, dump_tree_xml, NamespaceRegistry};
pub use interactive::{builtin_commands, CommandInput, CommandOutcome, CommandRegistry};
pub use specs::{SpecsData, SpecsError, SpecsSource, TomlSpecsSource};
pub use stage::{StageEntry, StageFlags, StageId, StageResult, StageTable};

#[cfg(feature = "cli")]
pub use cli::CliArgs;
