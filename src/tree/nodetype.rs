use crate::error::TreeError;
use crate::tree::{NodeId, Tree};
use std::collections::HashMap;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeTypeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpTableId(u32);

/// A node-type's subnode-slot arity. Most node-types have a fixed number
/// of subnodes fixed at registration (`tnode_newnodetype`'s `nsub`); the
/// reserved list node-type is the one exception, since `parser_addtolist`
/// and friends grow a list's children after creation, so it is registered
/// `Variable` and skips the creation-time arity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variable,
}

/// The state a pass needs when it calls an operation, standing in for the
/// original's variadic argument list. The redesign note in spec.md §9 asks
/// for a tagged-union bundle rather than one trait-object shape per arity;
/// this enum enumerates the shapes the kernel's own passes actually need.
pub enum OpArgs<'a> {
    /// No extra state beyond the node itself (e.g. a pure query op).
    None,
    /// A read-only view of the rest of the tree (e.g. a dump op).
    Tree(&'a Tree),
    /// A mutable view of the tree (e.g. a rewrite op).
    TreeMut(&'a mut Tree),
}

/// What an operation call reports back to its caller: whether a tree walk
/// invoking it should continue, stop, or (for query-style ops) a numeric
/// result, mirroring the original's "numeric short id + continue/stop"
/// convention for `cops`/`lops` dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutcome {
    Continue,
    Stop,
    Value(i64),
}

/// A compiler operation (`compop`): language-independent, e.g. pretty-print
/// or constant-fold.
pub trait CompOp: Debug {
    fn call(&self, node: NodeId, args: OpArgs<'_>) -> Result<OpOutcome, TreeError>;
}

/// A language operation (`langop`): supplied per-language, e.g. type-check.
pub trait LangOp: Debug {
    fn call(&self, node: NodeId, args: OpArgs<'_>) -> Result<OpOutcome, TreeError>;
}

/// An ordered, named operation table with a "next table" delegation chain —
/// the Rust realization of `tnode_insertcompops`/`tnode_insertlangops`,
/// which prepend a table in front of an existing one rather than replacing
/// it outright.
struct OpTable<Op: ?Sized> {
    parent: Option<OpTableId>,
    by_name: HashMap<String, (u16, Box<Op>)>,
}

impl<Op: ?Sized> OpTable<Op> {
    fn new(parent: Option<OpTableId>) -> Self {
        Self {
            parent,
            by_name: HashMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct NodeTypeDef {
    pub name: String,
    /// Subnode slot arity (`nsub`).
    pub nsub: Arity,
    /// Name slot arity (`nname`): how many of this type's nodes' name
    /// slots are populated, independent of subnode count.
    pub nname: usize,
    /// Hook slot arity (`nhook`): how many distinct compiler hooks a node
    /// of this type is expected to carry. Unlike `nsub`, this is not
    /// enforced at creation time — hooks are attached after creation via
    /// [`crate::tree::ChookMap::set`], sparse and keyed by [`crate::tree::HookId`]
    /// rather than passed as creation arguments, so `nhook` here is
    /// advisory bookkeeping rather than a checked invariant.
    pub nhook: usize,
    comp_table: Option<OpTableId>,
    lang_table: Option<OpTableId>,
}

/// Registry of node types and their operation tables (spec.md §4.B).
/// Frozen once langdef loading completes, per the grow-only-during-parse
/// rule in spec.md §5.
#[derive(Default)]
pub struct NodeTypeRegistry {
    defs: Vec<NodeTypeDef>,
    by_name: HashMap<String, NodeTypeId>,
    comp_tables: Vec<OpTable<dyn CompOp>>,
    lang_tables: Vec<OpTable<dyn LangOp>>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `tnode_newnodetype(name, &id_out, nsub, nname, nhook, flags)`.
    pub fn new_node_type(
        &mut self,
        name: impl Into<String>,
        nsub: Arity,
        nname: usize,
        nhook: usize,
    ) -> Result<NodeTypeId, TreeError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TreeError::DuplicateNodeType(name));
        }
        let id = NodeTypeId(self.defs.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.defs.push(NodeTypeDef {
            name,
            nsub,
            nname,
            nhook,
            comp_table: None,
            lang_table: None,
        });
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<NodeTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: NodeTypeId) -> &str {
        &self.defs[id.0 as usize].name
    }

    pub fn nsub(&self, id: NodeTypeId) -> Arity {
        self.defs[id.0 as usize].nsub
    }

    pub fn nname(&self, id: NodeTypeId) -> usize {
        self.defs[id.0 as usize].nname
    }

    pub fn nhook(&self, id: NodeTypeId) -> usize {
        self.defs[id.0 as usize].nhook
    }

    fn new_comp_table(&mut self, parent: Option<OpTableId>) -> OpTableId {
        let id = OpTableId(self.comp_tables.len() as u32);
        self.comp_tables.push(OpTable::new(parent));
        id
    }
    fn new_lang_table(&mut self, parent: Option<OpTableId>) -> OpTableId {
        let id = OpTableId(self.lang_tables.len() as u32);
        self.lang_tables.push(OpTable::new(parent));
        id
    }

    /// `tnode_setcompops`: install a fresh compop table, replacing any
    /// previously-set table wholesale.
    pub fn set_comp_ops(&mut self, node_type: NodeTypeId) -> OpTableId {
        let table = self.new_comp_table(None);
        self.defs[node_type.0 as usize].comp_table = Some(table);
        table
    }

    /// `tnode_insertcompops`: prepend a new table in front of the node
    /// type's existing one (or create the first table if none exists yet),
    /// so lookups fall through to the previous table on a miss.
    pub fn insert_comp_ops(&mut self, node_type: NodeTypeId) -> OpTableId {
        let parent = self.defs[node_type.0 as usize].comp_table;
        let table = self.new_comp_table(parent);
        self.defs[node_type.0 as usize].comp_table = Some(table);
        table
    }

    pub fn set_lang_ops(&mut self, node_type: NodeTypeId) -> OpTableId {
        let table = self.new_lang_table(None);
        self.defs[node_type.0 as usize].lang_table = Some(table);
        table
    }

    pub fn insert_lang_ops(&mut self, node_type: NodeTypeId) -> OpTableId {
        let parent = self.defs[node_type.0 as usize].lang_table;
        let table = self.new_lang_table(parent);
        self.defs[node_type.0 as usize].lang_table = Some(table);
        table
    }

    /// `tnode_newcompop`: register a named comp-op with a stable numeric
    /// short id in the given table.
    pub fn new_comp_op(
        &mut self,
        table: OpTableId,
        name: impl Into<String>,
        short_id: u16,
        op: Box<dyn CompOp>,
    ) {
        self.comp_tables[table.0 as usize]
            .by_name
            .insert(name.into(), (short_id, op));
    }

    pub fn new_lang_op(
        &mut self,
        table: OpTableId,
        name: impl Into<String>,
        short_id: u16,
        op: Box<dyn LangOp>,
    ) {
        self.lang_tables[table.0 as usize]
            .by_name
            .insert(name.into(), (short_id, op));
    }

    fn comp_table_chain(&self, node_type: NodeTypeId) -> Option<OpTableId> {
        self.defs[node_type.0 as usize].comp_table
    }
    fn lang_table_chain(&self, node_type: NodeTypeId) -> Option<OpTableId> {
        self.defs[node_type.0 as usize].lang_table
    }

    /// `tnode_hascompop`: whether `name` resolves in this node type's table
    /// or any ancestor table reached by following `parent` links.
    pub fn has_comp_op(&self, node_type: NodeTypeId, name: &str) -> bool {
        let mut cursor = self.comp_table_chain(node_type);
        while let Some(id) = cursor {
            let table = &self.comp_tables[id.0 as usize];
            if table.by_name.contains_key(name) {
                return true;
            }
            cursor = table.parent;
        }
        false
    }

    /// `tnode_callcompop`: look up `name` by walking the table chain and
    /// invoke it. `tnode_callcompop_i` (the numeric-short-id variant) is
    /// realized by callers matching on `OpOutcome::Value` instead of a
    /// separate entry point.
    pub fn call_comp_op(
        &self,
        node_type: NodeTypeId,
        name: &str,
        node: NodeId,
        args: OpArgs<'_>,
    ) -> Result<OpOutcome, TreeError> {
        let mut cursor = self.comp_table_chain(node_type);
        while let Some(id) = cursor {
            let table = &self.comp_tables[id.0 as usize];
            if let Some((_, op)) = table.by_name.get(name) {
                return op.call(node, args);
            }
            cursor = table.parent;
        }
        Err(TreeError::UnknownOperation(
            self.name(node_type).to_string(),
            name.to_string(),
        ))
    }

    pub fn has_lang_op(&self, node_type: NodeTypeId, name: &str) -> bool {
        let mut cursor = self.lang_table_chain(node_type);
        while let Some(id) = cursor {
            let table = &self.lang_tables[id.0 as usize];
            if table.by_name.contains_key(name) {
                return true;
            }
            cursor = table.parent;
        }
        false
    }

    pub fn call_lang_op(
        &self,
        node_type: NodeTypeId,
        name: &str,
        node: NodeId,
        args: OpArgs<'_>,
    ) -> Result<OpOutcome, TreeError> {
        let mut cursor = self.lang_table_chain(node_type);
        while let Some(id) = cursor {
            let table = &self.lang_tables[id.0 as usize];
            if let Some((_, op)) = table.by_name.get(name) {
                return op.call(node, args);
            }
            cursor = table.parent;
        }
        Err(TreeError::UnknownOperation(
            self.name(node_type).to_string(),
            name.to_string(),
        ))
    }
}
