use std::collections::HashMap;

/// Per-source-file error/warning counters, the authoritative per-compile
/// signal spec.md §7 describes. Owned by the orchestrator and threaded by
/// reference to whatever stage is currently running (spec.md §5's
/// "compile context owned by the orchestrator").
#[derive(Debug, Clone, Default)]
pub struct SourceCounters {
    pub errors: usize,
    pub warnings: usize,
}

/// The compile context: one entry per source module under compilation,
/// plus whether any stage signalled an outright exit-with-error.
#[derive(Debug, Default)]
pub struct CompileContext {
    counters: HashMap<String, SourceCounters>,
    stage_signalled_error: bool,
}

impl CompileContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_error(&mut self, module: &str) {
        self.counters.entry(module.to_string()).or_default().errors += 1;
    }
    pub fn record_warning(&mut self, module: &str) {
        self.counters.entry(module.to_string()).or_default().warnings += 1;
    }

    pub fn signal_stage_error(&mut self) {
        self.stage_signalled_error = true;
    }

    pub fn counters(&self, module: &str) -> SourceCounters {
        self.counters.get(module).cloned().unwrap_or_default()
    }

    pub fn total_errors(&self) -> usize {
        self.counters.values().map(|c| c.errors).sum()
    }
    pub fn total_warnings(&self) -> usize {
        self.counters.values().map(|c| c.warnings).sum()
    }

    /// `0` on success, including clean stops; non-zero if any pass
    /// reported errors or a stage signalled exit-with-error (spec.md §6).
    pub fn exit_code(&self) -> i32 {
        if self.stage_signalled_error || self.total_errors() > 0 {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_run_exits_zero() {
        let ctx = CompileContext::new();
        assert_eq!(ctx.exit_code(), 0);
    }

    #[test]
    fn recorded_error_makes_exit_code_nonzero() {
        let mut ctx = CompileContext::new();
        ctx.record_error("main.nocc");
        assert_eq!(ctx.exit_code(), 1);
        assert_eq!(ctx.counters("main.nocc").errors, 1);
    }

    #[test]
    fn stage_signalled_error_overrides_a_clean_counter_state() {
        let mut ctx = CompileContext::new();
        ctx.signal_stage_error();
        assert_eq!(ctx.exit_code(), 1);
    }
}
