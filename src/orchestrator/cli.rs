//! The CLI surface (spec.md §6), gated behind the `cli` feature since it
//! depends on `clap`. Unknown long options are collected rather than
//! rejected, per spec.md §6's "unknown long options are deferred to the
//! target/back-end".

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "noccd", about = "NOCC compiler kernel driver")]
pub struct CliArgs {
    /// Source module to compile. Required unless `--not-main-module` is
    /// set (spec.md §4.H `NoMainModule`).
    pub module: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, value_name = "PATH")]
    pub specs_file: Option<String>,

    /// `cpu-vendor-os` triple.
    #[arg(long)]
    pub target: Option<String>,

    /// Repeatable `--stop-<passname>` boundary.
    #[arg(long = "stop", value_name = "PASSNAME")]
    pub stop: Vec<String>,

    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "-")]
    pub dump_tree: Option<String>,

    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "-")]
    pub dump_stree: Option<String>,

    #[arg(long)]
    pub interactive: bool,

    #[arg(long)]
    pub treecheck: bool,

    #[arg(long)]
    pub not_main_module: bool,

    #[arg(long)]
    pub dump_specs: bool,
    #[arg(long)]
    pub dump_extns: bool,
    #[arg(long)]
    pub dump_lexers: bool,
    #[arg(long)]
    pub dump_targets: bool,
    #[arg(long)]
    pub dump_node_types: bool,
    #[arg(long)]
    pub dump_chooks: bool,
    #[arg(long, value_name = "PATH")]
    pub dump_tokens_to: Option<String>,
    #[arg(long)]
    pub dump_dfas: bool,
    #[arg(long)]
    pub dump_grammar: bool,

    /// The five reserved disable-check flags (spec.md §6).
    #[arg(long)]
    pub no_alias_check: bool,
    #[arg(long)]
    pub no_usage_check: bool,
    #[arg(long)]
    pub no_def_check: bool,
    #[arg(long)]
    pub no_traces_check: bool,
    #[arg(long)]
    pub no_mobility_check: bool,

    /// Anything this struct doesn't recognise, handed to the target after
    /// front-end init rather than rejected at parse time.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}
