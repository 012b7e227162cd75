use super::file::{LangdefFile, SectionItem};
use super::lookup::LangdefLookup;
use crate::dfa::{DfaTbl, TblOp};
use crate::error::LangdefError;
use crate::token::{KeywordTable, SymbolTable, TokenKind};
use crate::tree::{Arity, NodeTagFlags, NodeTagId, NodeTagRegistry, NodeTypeRegistry};
use std::collections::HashMap;

/// Result of applying a [`LangdefFile`]'s declarations to a language's
/// registries: everything the later processing steps, and front-end unit
/// composition, need to finish wiring the language up.
pub struct LoadedLangdef {
    pub ident: String,
    pub node_tags: HashMap<String, NodeTagId>,
    /// Pass-name bounds per tag, deferred until the pass pipeline's
    /// name-to-index map is known (`treecheck_setup`, step 6).
    pending_bounds: Vec<(NodeTagId, Option<String>, Option<String>)>,
    pub dfa_table: DfaTbl,
    /// Reducer/grammar-rule bodies, keyed by name, left as text for a front
    /// end to bind to actual [`crate::tree::CompOp`]/[`crate::tree::LangOp`]
    /// implementations during `reg_reducers`.
    pub grules: HashMap<String, String>,
    pub rfuncs: HashMap<String, String>,
    pub dfa_error_handlers: Vec<(String, String)>,
    pub imports: Vec<String>,
    pub before: Vec<String>,
    pub after: Vec<String>,
}

impl LoadedLangdef {
    /// `init_tokens`, `init_nodes`, `reg_reducers` and `init_dfatrans`
    /// (steps 1-4 of spec.md §4.E) applied eagerly in one pass over the
    /// file's items, since none of them depend on information only
    /// available after every langdef in an import chain has loaded.
    pub fn build(
        file: &LangdefFile,
        symbols: &mut SymbolTable,
        keywords: &mut KeywordTable,
        node_types: &mut NodeTypeRegistry,
        node_tags: &mut NodeTagRegistry,
    ) -> Result<Self, LangdefError> {
        let mut loaded = LoadedLangdef {
            ident: file.ident.clone(),
            node_tags: HashMap::new(),
            pending_bounds: Vec::new(),
            dfa_table: DfaTbl::new(),
            grules: HashMap::new(),
            rfuncs: HashMap::new(),
            dfa_error_handlers: Vec::new(),
            imports: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
        };

        for item in &file.items {
            match item {
                // init_tokens
                SectionItem::Symbol(text) => {
                    symbols.lookup(text);
                }
                SectionItem::Keyword(text) => {
                    keywords.add(text);
                }
                // init_nodes
                SectionItem::Tnode { name, invalid_before, invalid_after, flags } => {
                    let flags = decode_tag_flags(flags);
                    // The line-oriented langdef format declares a tnode's
                    // shape flags and pass bounds but never a separate
                    // owning node-type, so one node-type is synthesized per
                    // tnode entry, named after the tag, with variable arity
                    // until a richer langdef syntax parses real `nsub`.
                    let owner = node_types
                        .new_node_type(name.clone(), Arity::Variable, 0, 0)
                        .map_err(|e| LangdefError::Parse {
                            ident: file.ident.clone(),
                            line: 0,
                            message: e.to_string(),
                        })?;
                    let tag = node_tags
                        .new_node_tag(name.clone(), owner, flags)
                        .map_err(|e| LangdefError::Parse {
                            ident: file.ident.clone(),
                            line: 0,
                            message: e.to_string(),
                        })?;
                    loaded.node_tags.insert(name.clone(), tag);
                    loaded
                        .pending_bounds
                        .push((tag, invalid_before.clone(), invalid_after.clone()));
                }
                // reg_reducers
                SectionItem::Grule { name, body } => {
                    loaded.grules.insert(name.clone(), body.clone());
                }
                SectionItem::Rfunc { name, body } => {
                    loaded.rfuncs.insert(name.clone(), body.clone());
                }
                // init_dfatrans
                SectionItem::Bnf { nonterminal, body } => {
                    loaded.dfa_table.add_rule(nonterminal.clone(), decode_bnf_body(body), false);
                }
                SectionItem::Table { name, body } => {
                    loaded.dfa_table.add_rule(name.clone(), decode_bnf_body(body), true);
                }
                SectionItem::Dfaerr { node, handler } => {
                    loaded.dfa_error_handlers.push((node.clone(), handler.clone()));
                }
                SectionItem::Import(ident) => loaded.imports.push(ident.clone()),
                SectionItem::Before(pass) => loaded.before.push(pass.clone()),
                SectionItem::After(pass) => loaded.after.push(pass.clone()),
            }
        }

        Ok(loaded)
    }

    /// `post_setup` (step 5): resolve this langdef's `import` list against
    /// the shared lookup registry, merging each imported file's DFA table
    /// into this one's (earlier imports take priority, per
    /// `dfa_mergetables`'s alternative-order rule).
    pub fn post_setup(
        &mut self,
        lookup: &LangdefLookup,
        symbols: &mut SymbolTable,
        keywords: &mut KeywordTable,
        node_types: &mut NodeTypeRegistry,
        node_tags: &mut NodeTagRegistry,
    ) -> Result<(), LangdefError> {
        for ident in self.imports.clone() {
            let imported = lookup.lookup(&ident)?;
            let imported_loaded = LoadedLangdef::build(&imported, symbols, keywords, node_types, node_tags)?;
            self.dfa_table
                .merge(imported_loaded.dfa_table)
                .map_err(|e| LangdefError::Parse {
                    ident: self.ident.clone(),
                    line: 0,
                    message: e.to_string(),
                })?;
            for (k, v) in imported_loaded.grules {
                self.grules.entry(k).or_insert(v);
            }
            for (k, v) in imported_loaded.rfuncs {
                self.rfuncs.entry(k).or_insert(v);
            }
        }
        Ok(())
    }

    /// `treecheck_setup` (step 6): resolve each tnode's `invalid_before`/
    /// `invalid_after` pass *names* into pass *indices* using the pipeline's
    /// name-to-index map, and install the bounds on the node-tag registry.
    /// An unresolvable pass name is a langdef error rather than a silent
    /// no-op, since a misspelled bound would otherwise defeat the
    /// tree-checker invisibly.
    pub fn treecheck_setup(
        &self,
        pass_index: &HashMap<String, usize>,
        node_tags: &mut NodeTagRegistry,
    ) -> Result<(), LangdefError> {
        for (tag, before, after) in &self.pending_bounds {
            let before_idx = before
                .as_ref()
                .map(|name| resolve_pass(&self.ident, name, pass_index))
                .transpose()?;
            let after_idx = after
                .as_ref()
                .map(|name| resolve_pass(&self.ident, name, pass_index))
                .transpose()?;
            node_tags.set_pass_bounds(*tag, before_idx, after_idx);
        }
        Ok(())
    }
}

fn resolve_pass(ident: &str, name: &str, pass_index: &HashMap<String, usize>) -> Result<usize, LangdefError> {
    pass_index.get(name).copied().ok_or_else(|| LangdefError::Parse {
        ident: ident.to_string(),
        line: 0,
        message: format!("tnode bound references unknown pass '{name}'"),
    })
}

fn decode_tag_flags(flags: &[String]) -> NodeTagFlags {
    let mut out = NodeTagFlags::default();
    for flag in flags {
        match flag.as_str() {
            "transparent" => out.transparent = true,
            "long_decl" => out.long_decl = true,
            "short_decl" => out.short_decl = true,
            "long_proc" => out.long_proc = true,
            "long_action" => out.long_action = true,
            "synchronising_type" => out.synchronising_type = true,
            "indented_list" => out.indented_list = true,
            _ => {}
        }
    }
    out
}

/// Decode a `bnf`/`table` body's whitespace-separated tokens into table
/// ops. Supported forms: `MATCH(<kind>) -> <target>`, `PUSH(<kind>) ->
/// <nonterminal>`, `DEFAULT -> <target>`, `RETURN`, `REDUCE(<name>[,
/// <arg>])`.
fn decode_bnf_body(body: &str) -> Vec<TblOp> {
    let mut ops = Vec::new();
    for clause in body.split(';').map(str::trim).filter(|c| !c.is_empty()) {
        if let Some(rest) = clause.strip_prefix("MATCH(") {
            if let Some((kind, target)) = rest.split_once(") -> ") {
                if let Some(kind) = decode_kind(kind) {
                    ops.push(TblOp::Match { on: kind, target: target.trim().to_string() });
                }
            }
        } else if let Some(rest) = clause.strip_prefix("PUSH(") {
            if let Some((kind, nonterminal)) = rest.split_once(") -> ") {
                if let Some(kind) = decode_kind(kind) {
                    ops.push(TblOp::Push { on: kind, nonterminal: nonterminal.trim().to_string() });
                }
            }
        } else if let Some(target) = clause.strip_prefix("DEFAULT -> ") {
            ops.push(TblOp::DefaultTo(target.trim().to_string()));
        } else if clause == "RETURN" {
            ops.push(TblOp::DefaultReturn);
        } else if let Some(rest) = clause.strip_prefix("REDUCE(") {
            let rest = rest.trim_end_matches(')');
            let (name, arg) = match rest.split_once(',') {
                Some((name, arg)) => (name.trim(), arg.trim().parse::<i64>().ok()),
                None => (rest.trim(), None),
            };
            ops.push(TblOp::Reduce { name: name.to_string(), arg });
        }
    }
    ops
}

fn decode_kind(name: &str) -> Option<TokenKind> {
    Some(match name.trim() {
        "Keyword" => TokenKind::Keyword,
        "Symbol" => TokenKind::Symbol,
        "Integer" => TokenKind::Integer,
        "Real" => TokenKind::Real,
        "StringLit" => TokenKind::StringLit,
        "Name" => TokenKind::Name,
        "Newline" => TokenKind::Newline,
        "Indent" => TokenKind::Indent,
        "Outdent" => TokenKind::Outdent,
        "End" => TokenKind::End,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::langdef::file;

    #[test]
    fn build_registers_tokens_and_node_tags() {
        let text = "ident: demo\nsymbol: +\nkeyword: if\ntnode: expr invalid_before=typecheck transparent\n";
        let file = file::parse("demo", text).unwrap();
        let mut symbols = SymbolTable::new();
        let mut keywords = KeywordTable::new();
        let mut node_types = NodeTypeRegistry::new();
        let mut tags = NodeTagRegistry::new();

        let loaded = LoadedLangdef::build(&file, &mut symbols, &mut keywords, &mut node_types, &mut tags).unwrap();
        assert!(keywords.lookup("if").is_some());
        assert!(loaded.node_tags.contains_key("expr"));
    }

    #[test]
    fn treecheck_setup_resolves_named_bounds() {
        let text = "tnode: expr invalid_before=typecheck\n";
        let file = file::parse("demo", text).unwrap();
        let mut symbols = SymbolTable::new();
        let mut keywords = KeywordTable::new();
        let mut node_types = NodeTypeRegistry::new();
        let mut tags = NodeTagRegistry::new();
        let loaded = LoadedLangdef::build(&file, &mut symbols, &mut keywords, &mut node_types, &mut tags).unwrap();

        let mut pass_index = HashMap::new();
        pass_index.insert("typecheck".to_string(), 3);
        loaded.treecheck_setup(&pass_index, &mut tags).unwrap();

        let tag = loaded.node_tags["expr"];
        assert_eq!(tags.get(tag).invalid_before, Some(3));
    }

    #[test]
    fn treecheck_setup_rejects_unknown_pass_name() {
        let text = "tnode: expr invalid_before=nosuchpass\n";
        let file = file::parse("demo", text).unwrap();
        let mut symbols = SymbolTable::new();
        let mut keywords = KeywordTable::new();
        let mut node_types = NodeTypeRegistry::new();
        let mut tags = NodeTagRegistry::new();
        let loaded = LoadedLangdef::build(&file, &mut symbols, &mut keywords, &mut node_types, &mut tags).unwrap();

        assert!(loaded.treecheck_setup(&HashMap::new(), &mut tags).is_err());
    }
}
