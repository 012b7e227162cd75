use super::context::PassContext;
use super::treecheck::TreeChecker;
use crate::error::PassError;
use crate::token::Origin;
use crate::tree::NodeTagRegistry;

/// What a pass function reports about its own completion: whether the
/// pipeline should keep walking the rest of the list, or halt right here
/// as if a `--stop-<passname>` boundary had been hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Continue,
    Stop,
}

pub type PassFn = Box<dyn Fn(&mut PassContext<'_>) -> Result<PassOutcome, PassError>>;

/// One registered pass: its name (for `--stop-<name>` and ordering),
/// origin (which front/back end contributed it), the function itself, and
/// whether it is a valid `--stop-*` boundary and currently enabled.
pub struct PassDescriptor {
    pub name: String,
    pub origin: Origin,
    pub stoppoint: bool,
    pub enabled: bool,
    run: PassFn,
}

impl PassDescriptor {
    pub fn new(name: impl Into<String>, origin: Origin, stoppoint: bool, run: PassFn) -> Self {
        Self {
            name: name.into(),
            origin,
            stoppoint,
            enabled: true,
            run,
        }
    }
}

/// An ordered list of passes (spec.md §4.G). Front-end and back-end pass
/// lists are each one of these; `nocc_addcompilerpass`'s before/after
/// insertion is `insert_before`/`insert_after` below.
#[derive(Default)]
pub struct PassList {
    passes: Vec<PassDescriptor>,
}

impl PassList {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.passes.iter().position(|p| p.name == name)
    }

    fn check_unique(&self, name: &str) -> Result<(), PassError> {
        if self.index_of(name).is_some() {
            Err(PassError::DuplicatePass(name.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn add_pass(&mut self, pass: PassDescriptor) -> Result<(), PassError> {
        self.check_unique(&pass.name)?;
        self.passes.push(pass);
        Ok(())
    }

    /// `nocc_addcompilerpass` with a before-anchor: insert immediately
    /// before the named pass.
    pub fn insert_before(&mut self, anchor: &str, pass: PassDescriptor) -> Result<(), PassError> {
        self.check_unique(&pass.name)?;
        let at = self
            .index_of(anchor)
            .ok_or_else(|| PassError::UnknownAnchor { new: pass.name.clone(), anchor: anchor.to_string() })?;
        self.passes.insert(at, pass);
        Ok(())
    }

    pub fn insert_after(&mut self, anchor: &str, pass: PassDescriptor) -> Result<(), PassError> {
        self.check_unique(&pass.name)?;
        let at = self
            .index_of(anchor)
            .ok_or_else(|| PassError::UnknownAnchor { new: pass.name.clone(), anchor: anchor.to_string() })?;
        self.passes.insert(at + 1, pass);
        Ok(())
    }

    pub fn name_to_index(&self) -> std::collections::HashMap<String, usize> {
        self.passes
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

/// What [`run_fe_passes`] reports once it finishes or halts.
#[derive(Debug, Default)]
pub struct PassRunReport {
    pub ran: Vec<String>,
    pub stopped_at: Option<String>,
    pub errors: Vec<(String, Origin, String)>,
    pub warnings: Vec<(String, Origin, String)>,
}

/// `run_fe_passes`: walk a pass list in order, running each enabled pass
/// in turn. Before and after every pass, if tree-checking is enabled,
/// [`TreeChecker`] validates the whole tree; a violation with the error
/// budget already exhausted aborts the run outright (spec.md §4.G failure
/// semantics), otherwise it is recorded as an error and the run continues.
/// A pass whose descriptor is marked `stoppoint` and whose name matches
/// `stop_after` halts the pipeline immediately after it runs.
pub fn run_fe_passes(
    passes: &PassList,
    ctx_tree: &mut crate::tree::Tree,
    node_tags: &NodeTagRegistry,
    root: crate::tree::NodeId,
    treecheck_enabled: bool,
    error_budget: usize,
    stop_after: Option<&str>,
) -> Result<PassRunReport, PassError> {
    let mut report = PassRunReport::default();
    let mut errors_seen = 0usize;

    for (index, pass) in passes.passes.iter().enumerate() {
        if !pass.enabled {
            continue;
        }

        if treecheck_enabled {
            let violations = TreeChecker::check(ctx_tree, node_tags, root, index);
            for v in violations {
                errors_seen += 1;
                report.errors.push((pass.name.clone(), v.origin, format!("tag '{}' invalid at this pass", v.tag_name)));
                if errors_seen > error_budget {
                    return Err(PassError::TreeCheckViolation { pass: pass.name.clone(), tag: v.tag_name });
                }
            }
        }

        let mut pass_ctx = PassContext::new(ctx_tree, root, index);
        let outcome = (pass.run)(&mut pass_ctx)?;

        for (origin, message) in pass_ctx.errors {
            errors_seen += 1;
            report.errors.push((pass.name.clone(), origin, message));
        }
        for (origin, message) in pass_ctx.warnings {
            report.warnings.push((pass.name.clone(), origin, message));
        }

        report.ran.push(pass.name.clone());

        if errors_seen > error_budget {
            return Err(PassError::Fatal(format!("error budget exceeded after pass '{}'", pass.name)));
        }

        let requested_stop = stop_after.is_some_and(|s| s == pass.name);
        if outcome == PassOutcome::Stop || (pass.stoppoint && requested_stop) {
            report.stopped_at = Some(pass.name.clone());
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::context::PassContext as Ctx;
    use crate::tree::{Arity, NodeTypeRegistry, Tree};

    fn noop_pass(name: &str) -> PassDescriptor {
        PassDescriptor::new(name, Origin::Synthetic, true, Box::new(|_ctx: &mut Ctx<'_>| Ok(PassOutcome::Continue)))
    }

    #[test]
    fn passes_run_in_registration_order_and_report_names() {
        let mut list = PassList::new();
        list.add_pass(noop_pass("prescope")).unwrap();
        list.add_pass(noop_pass("typecheck")).unwrap();

        let mut registry = NodeTypeRegistry::new();
        let nt = registry.new_node_type("n", Arity::Fixed(0), 0, 0).unwrap();
        let mut tree = Tree::new();
        let root = tree.create(&registry, nt, None, Origin::Synthetic, vec![]).unwrap();
        let node_tags = NodeTagRegistry::new();

        let report = run_fe_passes(&list, &mut tree, &node_tags, root, false, 0, None).unwrap();
        assert_eq!(report.ran, vec!["prescope".to_string(), "typecheck".to_string()]);
        assert!(report.stopped_at.is_none());
    }

    #[test]
    fn stop_after_named_stoppoint_halts_the_pipeline() {
        let mut list = PassList::new();
        list.add_pass(noop_pass("prescope")).unwrap();
        list.add_pass(noop_pass("typecheck")).unwrap();

        let mut registry = NodeTypeRegistry::new();
        let nt = registry.new_node_type("n", Arity::Fixed(0), 0, 0).unwrap();
        let mut tree = Tree::new();
        let root = tree.create(&registry, nt, None, Origin::Synthetic, vec![]).unwrap();
        let node_tags = NodeTagRegistry::new();

        let report = run_fe_passes(&list, &mut tree, &node_tags, root, false, 0, Some("prescope")).unwrap();
        assert_eq!(report.ran, vec!["prescope".to_string()]);
        assert_eq!(report.stopped_at, Some("prescope".to_string()));
    }

    #[test]
    fn insert_before_places_pass_ahead_of_its_anchor() {
        let mut list = PassList::new();
        list.add_pass(noop_pass("typecheck")).unwrap();
        list.insert_before("typecheck", noop_pass("prescope")).unwrap();
        assert_eq!(list.name_to_index()["prescope"], 0);
    }
}
