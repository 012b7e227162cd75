use crate::error::TreeError;
use std::collections::HashMap;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(u32);

/// A sparse per-node payload attached via a compiler hook (`chook`). The
/// vtable the redesign note in spec.md §9 calls for in place of the
/// original's function-pointer triple (copy/free/dump).
pub trait ChookPayload: Debug {
    fn clone_boxed(&self) -> Box<dyn ChookPayload>;
    fn dump(&self, out: &mut dyn std::fmt::Write) -> std::fmt::Result;
}

/// Registry mapping a hook name to a stable [`HookId`] (`tnode_lookupornewchook`).
/// Hook ids are assigned once and never reused, matching the "hook-id
/// assignment is a one-shot registry write" note: no walk ever observes the
/// registry mutating underneath it.
#[derive(Default)]
pub struct HookRegistry {
    names: Vec<String>,
    by_name: HashMap<String, HookId>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `tnode_lookupornewchook`: returns the existing id for `name`, or
    /// registers and returns a new one.
    pub fn lookup_or_new(&mut self, name: &str) -> HookId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = HookId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<HookId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: HookId) -> &str {
        &self.names[id.0 as usize]
    }
}

/// The sparse hook map carried by every tree node: `HashMap<HookId, Box<dyn
/// ChookPayload>>` rather than a per-language fixed struct, per spec.md §9.
#[derive(Debug, Default)]
pub struct ChookMap {
    hooks: HashMap<HookId, Box<dyn ChookPayload>>,
}

impl Clone for ChookMap {
    fn clone(&self) -> Self {
        Self {
            hooks: self
                .hooks
                .iter()
                .map(|(id, payload)| (*id, payload.clone_boxed()))
                .collect(),
        }
    }
}

impl ChookMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// `tnode_setchook`.
    pub fn set(&mut self, id: HookId, payload: Box<dyn ChookPayload>) -> Option<Box<dyn ChookPayload>> {
        self.hooks.insert(id, payload)
    }

    /// `tnode_getchook`.
    pub fn get(&self, id: HookId) -> Option<&dyn ChookPayload> {
        self.hooks.get(&id).map(|b| b.as_ref())
    }

    pub fn remove(&mut self, id: HookId) -> Option<Box<dyn ChookPayload>> {
        self.hooks.remove(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HookId, &Box<dyn ChookPayload>)> {
        self.hooks.iter()
    }

    /// `tnode_promotechooks`: merge `other`'s hooks into `self`, used when
    /// collapsing a transparent wrapper node into its single child.
    ///
    /// Collision policy (spec.md §9 Open Question, decided *prefer-inner*):
    /// when both maps carry the same hook id, the inner node's value (the
    /// child being promoted, passed as `self`) wins and the outer's entry
    /// (`other`) is dropped.
    pub fn promote_from(&mut self, other: &ChookMap) -> Result<(), TreeError> {
        for (id, payload) in other.hooks.iter() {
            self.hooks.entry(*id).or_insert_with(|| payload.clone_boxed());
        }
        Ok(())
    }
}
