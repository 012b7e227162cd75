//! The compiler's stage table (spec.md §4.H): a fixed, ordered list of
//! named stages with stable short IDs, each gated by flags and reporting
//! one of a small set of outcomes back to the orchestrator.

use std::fmt;

/// The exact stable short IDs spec.md §4.H enumerates, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Lex extension discovery.
    Lext,
    /// Dependency extraction.
    Dext,
    /// Dependency resolution.
    Drfcn,
    /// Compiler-context checks.
    Cchk,
    /// Interactive-mode extension discovery.
    Iext,
    /// Interactive tree rewrite.
    Itrw,
    /// Interactive trace.
    Itrace,
    /// Front-end target resolution.
    Ftarg,
    /// Back-end (host) target resolution.
    Htarg,
    /// Open lexer.
    Olex,
    /// Scan lexer (tokenize only).
    Slex,
    /// Parse.
    Parse,
    /// Scanner-only parse.
    Sparse,
    /// Combined parse.
    Cparse,
    /// Dump node types.
    Dnt,
    /// Dump short node types.
    Dsnt,
    /// Dump short node tags.
    Dsntag,
    /// Front-end option processing.
    Feopt,
    /// Front-end passes.
    Feps,
    /// Interactive target.
    Itarg,
    /// Back-end option processing.
    Beopt,
    /// Back-end passes.
    Beps,
}

impl StageId {
    /// The exact short-id spellings named in spec.md §4.H — stable, used
    /// in `--stop-<passname>` style CLI plumbing and diagnostics.
    pub fn short_name(&self) -> &'static str {
        match self {
            StageId::Lext => "lext",
            StageId::Dext => "dext",
            StageId::Drfcn => "drfcn",
            StageId::Cchk => "cchk",
            StageId::Iext => "iext",
            StageId::Itrw => "itrw",
            StageId::Itrace => "itrace",
            StageId::Ftarg => "ftarg",
            StageId::Htarg => "htarg",
            StageId::Olex => "olex",
            StageId::Slex => "slex",
            StageId::Parse => "parse",
            StageId::Sparse => "sparse",
            StageId::Cparse => "cparse",
            StageId::Dnt => "dnt",
            StageId::Dsnt => "dsnt",
            StageId::Dsntag => "dsntag",
            StageId::Feopt => "feopt",
            StageId::Feps => "feps",
            StageId::Itarg => "itarg",
            StageId::Beopt => "beopt",
            StageId::Beps => "beps",
        }
    }

    pub const ALL: [StageId; 22] = [
        StageId::Lext,
        StageId::Dext,
        StageId::Drfcn,
        StageId::Cchk,
        StageId::Iext,
        StageId::Itrw,
        StageId::Itrace,
        StageId::Ftarg,
        StageId::Htarg,
        StageId::Olex,
        StageId::Slex,
        StageId::Parse,
        StageId::Sparse,
        StageId::Cparse,
        StageId::Dnt,
        StageId::Dsnt,
        StageId::Dsntag,
        StageId::Feopt,
        StageId::Feps,
        StageId::Itarg,
        StageId::Beopt,
        StageId::Beps,
    ];

    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.short_name() == name)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Per-stage flags gating when it is eligible to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageFlags {
    /// Stage is skipped in interactive mode.
    pub no_interactive: bool,
    /// Stage must be explicitly requested; it never runs as part of the
    /// default automatic pipeline.
    pub no_automatic: bool,
}

/// What running a stage reports back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageResult {
    /// Continue to the next stage.
    Ok,
    /// Stop the whole compiler run now, successfully.
    ExitCompiler,
    /// Stop the whole compiler run now, having reported an error.
    ErrorThenExit(String),
    /// A dump-only stage completed; exit cleanly after it without running
    /// later stages.
    CleanExitAfterDump,
}

#[derive(Clone)]
pub struct StageEntry {
    pub id: StageId,
    pub flags: StageFlags,
}

/// The ordered stage table. Built once at startup in the exact order
/// spec.md §4.H lists, then driven by the orchestrator loop.
pub struct StageTable {
    entries: Vec<StageEntry>,
}

impl StageTable {
    /// The default table: every [`StageId::ALL`] entry, no flags set,
    /// in pipeline order. Individual entries can be re-flagged afterwards
    /// by a front end's `post_setup`.
    pub fn default_table() -> Self {
        Self {
            entries: StageId::ALL
                .into_iter()
                .map(|id| StageEntry { id, flags: StageFlags::default() })
                .collect(),
        }
    }

    pub fn set_flags(&mut self, id: StageId, flags: StageFlags) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.flags = flags;
        }
    }

    pub fn entries(&self) -> &[StageEntry] {
        &self.entries
    }

    /// Stages eligible to run given whether this is an interactive session
    /// and whether automatic (as opposed to explicitly requested) stages
    /// are being driven.
    pub fn eligible(&self, interactive: bool, automatic: bool) -> Vec<StageId> {
        self.entries
            .iter()
            .filter(|e| !(interactive && e.flags.no_interactive))
            .filter(|e| !(automatic && e.flags.no_automatic))
            .map(|e| e.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_round_trip() {
        for id in StageId::ALL {
            assert_eq!(StageId::from_short_name(id.short_name()), Some(id));
        }
    }

    #[test]
    fn no_automatic_stage_is_excluded_from_the_default_run() {
        let mut table = StageTable::default_table();
        table.set_flags(StageId::Itrace, StageFlags { no_automatic: true, ..Default::default() });
        let eligible = table.eligible(false, true);
        assert!(!eligible.contains(&StageId::Itrace));
        let eligible = table.eligible(false, false);
        assert!(eligible.contains(&StageId::Itrace));
    }
}
