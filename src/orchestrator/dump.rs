//! Tree and token dump producers (spec.md §6): an XML form
//! (`nocc:treedump`/`nocc:parsetree`, with an ordered namespace registry)
//! and an s-expression form, plus a streaming per-token dump.

use crate::token::{Origin, Token};
use crate::tree::{NodeTagRegistry, NodeTypeRegistry, Tree};
use crate::tree::NodeId;
use std::fmt::Write as _;

/// An ordered `(short-name, uri)` namespace table for the XML dump form,
/// matching the original's `nocc:` default namespace plus whatever a
/// front end layers on top of it.
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    entries: Vec<(String, String)>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        let mut ns = Self::default();
        ns.register("nocc", "https://nocc-project.example/ns/core");
        ns
    }

    pub fn register(&mut self, short_name: impl Into<String>, uri: impl Into<String>) {
        self.entries.push((short_name.into(), uri.into()));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a subtree as `nocc:treedump`/`nocc:parsetree` XML.
pub fn dump_tree_xml(
    tree: &Tree,
    node_types: &NodeTypeRegistry,
    node_tags: &NodeTagRegistry,
    root: NodeId,
    namespaces: &NamespaceRegistry,
) -> String {
    let mut out = String::new();
    out.push_str("<nocc:treedump");
    for (short, uri) in namespaces.entries() {
        let _ = write!(out, " xmlns:{short}=\"{uri}\"", short = short, uri = escape_xml(uri));
    }
    out.push_str(">\n");
    write_node_xml(tree, node_types, node_tags, root, &mut out, 1);
    out.push_str("</nocc:treedump>\n");
    out
}

fn write_node_xml(
    tree: &Tree,
    node_types: &NodeTypeRegistry,
    node_tags: &NodeTagRegistry,
    node: NodeId,
    out: &mut String,
    depth: usize,
) {
    let indent = "  ".repeat(depth);
    let data = tree.get(node);
    let type_name = node_types.name(data.node_type);
    let tag_name = data.tag.map(|t| node_tags.get(t).name.as_str());

    let _ = write!(out, "{indent}<nocc:parsetree type=\"{}\"", escape_xml(type_name));
    if let Some(tag) = tag_name {
        let _ = write!(out, " tag=\"{}\"", escape_xml(tag));
    }
    let _ = write!(out, " origin=\"{}\"", escape_xml(&data.origin.to_string()));

    if data.children.is_empty() {
        out.push_str("/>\n");
    } else {
        out.push_str(">\n");
        for &child in &data.children {
            write_node_xml(tree, node_types, node_tags, child, out, depth + 1);
        }
        let _ = writeln!(out, "{indent}</nocc:parsetree>");
    }
}

/// Render a subtree as an s-expression: `(type-name [tag] child...)`.
pub fn dump_tree_sexpr(tree: &Tree, node_types: &NodeTypeRegistry, node_tags: &NodeTagRegistry, root: NodeId) -> String {
    let mut out = String::new();
    write_node_sexpr(tree, node_types, node_tags, root, &mut out);
    out
}

fn write_node_sexpr(tree: &Tree, node_types: &NodeTypeRegistry, node_tags: &NodeTagRegistry, node: NodeId, out: &mut String) {
    let data = tree.get(node);
    out.push('(');
    out.push_str(node_types.name(data.node_type));
    if let Some(tag) = data.tag {
        let _ = write!(out, " :{}", node_tags.get(tag).name);
    }
    for &child in &data.children {
        out.push(' ');
        write_node_sexpr(tree, node_types, node_tags, child, out);
    }
    out.push(')');
}

/// Render one streamed `<token type="…" … />` line, per spec.md §6's
/// per-top-level-token token dump. Tokens nested inside another (e.g. a
/// macro-expanded inclusion) are transparent to the stream: the caller
/// simply doesn't emit them as separate top-level entries.
pub fn dump_token_xml(token: &Token) -> String {
    format!(
        "<token type=\"{:?}\" origin=\"{}\" width=\"{}\"/>",
        token.kind,
        escape_xml(&format_origin(&token.origin)),
        token.width
    )
}

fn format_origin(origin: &Origin) -> String {
    origin.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{TokenPayload};
    use crate::tree::{Arity, NodeTypeRegistry as Nt};

    #[test]
    fn xml_dump_escapes_attribute_values_and_nests_children() {
        let mut node_types = Nt::new();
        let leaf_ty = node_types.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let root_ty = node_types.new_node_type("root", Arity::Fixed(1), 0, 0).unwrap();
        let node_tags = NodeTagRegistry::new();
        let mut tree = Tree::new();
        let leaf = tree.create(&node_types, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        let root = tree
            .create(&node_types, root_ty, None, Origin::Synthetic, vec![leaf])
            .unwrap();

        let xml = dump_tree_xml(&tree, &node_types, &node_tags, root, &NamespaceRegistry::new());
        assert!(xml.contains("type=\"root\""));
        assert!(xml.contains("type=\"leaf\""));
    }

    #[test]
    fn sexpr_dump_nests_children_in_order() {
        let mut node_types = Nt::new();
        let leaf_ty = node_types.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let root_ty = node_types.new_node_type("root", Arity::Fixed(1), 0, 0).unwrap();
        let node_tags = NodeTagRegistry::new();
        let mut tree = Tree::new();
        let leaf = tree.create(&node_types, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        let root = tree
            .create(&node_types, root_ty, None, Origin::Synthetic, vec![leaf])
            .unwrap();

        let sexpr = dump_tree_sexpr(&tree, &node_types, &node_tags, root);
        assert_eq!(sexpr, "(root (leaf))");
    }

    #[test]
    fn token_dump_renders_kind_and_origin() {
        let token = Token::new(crate::token::TokenKind::Name, TokenPayload::None, Origin::Synthetic, 3);
        let line = dump_token_xml(&token);
        assert!(line.starts_with("<token type=\"Name\""));
    }
}
