//! `noccd`: a thin CLI driver over `nocc_core`'s orchestrator. Front ends,
//! back ends and signing are external collaborators; this binary only
//! wires up the reserved option surface, the specs file, and the stage
//! table's default eligibility rules.

use clap::Parser;
use nocc_core::orchestrator::{CliArgs, CompileContext, SpecsSource, StageTable, TomlSpecsSource};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = CliArgs::parse();

    if args.module.is_none() && !args.not_main_module {
        tracing::error!("no main source module was given and --not-main-module was not set");
        return ExitCode::FAILURE;
    }

    let specs = match &args.specs_file {
        Some(path) => match TomlSpecsSource.load(&PathBuf::from(path)) {
            Ok(specs) => Some(specs),
            Err(err) => {
                tracing::error!(%err, "failed to load specs file");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    if args.dump_specs {
        println!("{specs:#?}");
    }

    let stage_table = StageTable::default_table();
    let eligible = stage_table.eligible(args.interactive, true);
    tracing::info!(stages = eligible.len(), "stage table ready");

    let ctx = CompileContext::new();
    ExitCode::from(ctx.exit_code() as u8)
}
