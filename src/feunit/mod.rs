//! Front-end unit glue (spec.md §4.F): a front end is composed from an
//! ordered list of units, each contributing the same four construction
//! steps a langdef drives (`init_nodes`, `reg_reducers`, `init_dfatrans`,
//! `post_setup`). Grounded in `original_source/include/feunit.h`'s
//! `feunit_do_init_tokens`/`feunit_do_init_nodes`/`feunit_do_reg_reducers`,
//! which drive the same list in the same order.

use crate::dfa::DfaTbl;
use crate::error::FeunitError;
use crate::token::{KeywordTable, SymbolTable};
use crate::tree::{NodeTagRegistry, NodeTypeRegistry};

/// Shared construction state every front-end unit's steps mutate.
pub struct FeuContext {
    pub symbols: SymbolTable,
    pub keywords: KeywordTable,
    pub node_types: NodeTypeRegistry,
    pub node_tags: NodeTagRegistry,
    pub dfa_table: DfaTbl,
}

impl FeuContext {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            keywords: KeywordTable::new(),
            node_types: NodeTypeRegistry::new(),
            node_tags: NodeTagRegistry::new(),
            dfa_table: DfaTbl::new(),
        }
    }
}

impl Default for FeuContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One front-end unit's four construction steps, matching the
/// `(init_nodes, reg_reducers, init_dfatrans, post_setup, ident)` shape
/// named in spec.md §4.F. Each step defaults to a no-op so a unit that only
/// needs, say, `init_dfatrans` doesn't have to stub the rest.
pub trait FrontEndUnit {
    fn ident(&self) -> &str;

    fn init_nodes(&self, _ctx: &mut FeuContext) -> Result<(), FeunitError> {
        Ok(())
    }
    fn reg_reducers(&self, _ctx: &mut FeuContext) -> Result<(), FeunitError> {
        Ok(())
    }
    fn init_dfatrans(&self, _ctx: &mut FeuContext) -> Result<(), FeunitError> {
        Ok(())
    }
    fn post_setup(&self, _ctx: &mut FeuContext) -> Result<(), FeunitError> {
        Ok(())
    }

    /// Whether a failure in any of this unit's steps should abort language
    /// construction outright, rather than just being reported and skipped.
    fn earlyfail(&self) -> bool {
        true
    }
}

type Step = fn(&dyn FrontEndUnit, &mut FeuContext) -> Result<(), FeunitError>;

/// An ordered composition of front-end units, driven one step at a time
/// across the whole list (every unit's `init_nodes` before any unit's
/// `reg_reducers`, and so on) so later units can depend on earlier ones
/// having already registered their tokens and node types.
#[derive(Default)]
pub struct FeunitList {
    units: Vec<Box<dyn FrontEndUnit>>,
}

impl FeunitList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, unit: Box<dyn FrontEndUnit>) -> Result<(), FeunitError> {
        if self.units.iter().any(|u| u.ident() == unit.ident()) {
            return Err(FeunitError::Duplicate(unit.ident().to_string()));
        }
        self.units.push(unit);
        Ok(())
    }

    fn run_step(&self, ctx: &mut FeuContext, step_name: &'static str, step: Step) -> Result<Vec<String>, FeunitError> {
        let mut failed = Vec::new();
        for unit in &self.units {
            if let Err(_err) = step(unit.as_ref(), ctx) {
                if unit.earlyfail() {
                    return Err(FeunitError::EarlyFail(unit.ident().to_string(), step_name));
                }
                failed.push(unit.ident().to_string());
            }
        }
        Ok(failed)
    }

    pub fn run_init_nodes(&self, ctx: &mut FeuContext) -> Result<Vec<String>, FeunitError> {
        self.run_step(ctx, "init_nodes", |u, c| u.init_nodes(c))
    }
    pub fn run_reg_reducers(&self, ctx: &mut FeuContext) -> Result<Vec<String>, FeunitError> {
        self.run_step(ctx, "reg_reducers", |u, c| u.reg_reducers(c))
    }
    pub fn run_init_dfatrans(&self, ctx: &mut FeuContext) -> Result<Vec<String>, FeunitError> {
        self.run_step(ctx, "init_dfatrans", |u, c| u.init_dfatrans(c))
    }
    pub fn run_post_setup(&self, ctx: &mut FeuContext) -> Result<Vec<String>, FeunitError> {
        self.run_step(ctx, "post_setup", |u, c| u.post_setup(c))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting {
        ident: &'static str,
        fail: bool,
        earlyfail: bool,
    }

    impl FrontEndUnit for Counting {
        fn ident(&self) -> &str {
            self.ident
        }
        fn init_nodes(&self, ctx: &mut FeuContext) -> Result<(), FeunitError> {
            if self.fail {
                return Err(FeunitError::EarlyFail(self.ident.to_string(), "init_nodes"));
            }
            ctx.keywords.add(self.ident);
            Ok(())
        }
        fn earlyfail(&self) -> bool {
            self.earlyfail
        }
    }

    #[test]
    fn units_run_in_registration_order() {
        let mut list = FeunitList::new();
        list.register(Box::new(Counting { ident: "a", fail: false, earlyfail: true })).unwrap();
        list.register(Box::new(Counting { ident: "b", fail: false, earlyfail: true })).unwrap();
        let mut ctx = FeuContext::new();
        list.run_init_nodes(&mut ctx).unwrap();
        assert!(ctx.keywords.lookup("a").is_some());
        assert!(ctx.keywords.lookup("b").is_some());
    }

    #[test]
    fn earlyfail_unit_aborts_the_whole_step() {
        let mut list = FeunitList::new();
        list.register(Box::new(Counting { ident: "a", fail: true, earlyfail: true })).unwrap();
        let mut ctx = FeuContext::new();
        assert!(list.run_init_nodes(&mut ctx).is_err());
    }

    #[test]
    fn non_earlyfail_unit_is_skipped_and_reported() {
        let mut list = FeunitList::new();
        list.register(Box::new(Counting { ident: "a", fail: true, earlyfail: false })).unwrap();
        let mut ctx = FeuContext::new();
        let failed = list.run_init_nodes(&mut ctx).unwrap();
        assert_eq!(failed, vec!["a".to_string()]);
    }

    #[test]
    fn duplicate_ident_is_rejected() {
        let mut list = FeunitList::new();
        list.register(Box::new(Counting { ident: "a", fail: false, earlyfail: true })).unwrap();
        let err = list.register(Box::new(Counting { ident: "a", fail: false, earlyfail: true }));
        assert!(err.is_err());
    }
}
