use crate::error::LangdefError;

/// One item contributed by a langdef file's body (spec.md §4.E). The
/// original groups these under `section` headers purely for readability;
/// nothing downstream cares which section an item came from, so the parsed
/// form is a flat list rather than nested section structs.
#[derive(Debug, Clone)]
pub enum SectionItem {
    /// A grammar rule function: `grule: <name> <body>`.
    Grule { name: String, body: String },
    /// A reducer function: `rfunc: <name> <body>`.
    Rfunc { name: String, body: String },
    /// A BNF production: `bnf: <nonterminal> := <body>`.
    Bnf { nonterminal: String, body: String },
    /// A raw DFA transition table fragment: `table: <name> <body>`.
    Table { name: String, body: String },
    Symbol(String),
    Keyword(String),
    /// `dfaerr: <node> <handler>` — the DFA node to install as the named
    /// node's error handler.
    Dfaerr { node: String, handler: String },
    /// `tnode: <name> [invalid_before=<pass>] [invalid_after=<pass>] [flag
    /// ...]` — a node-tag declaration.
    Tnode {
        name: String,
        invalid_before: Option<String>,
        invalid_after: Option<String>,
        flags: Vec<String>,
    },
    Import(String),
    Before(String),
    After(String),
}

/// The parsed contents of one `.ldef` file, before any of its declarations
/// have been applied to a registry.
#[derive(Debug, Clone, Default)]
pub struct LangdefFile {
    pub ident: String,
    pub desc: String,
    pub maintainer: String,
    pub items: Vec<SectionItem>,
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    Some((key.trim(), rest.trim()))
}

/// Parse a langdef file's text. The format is deliberately simple and
/// line-oriented (spec.md §0): one declaration per line, blank lines and
/// `#`-prefixed comments ignored, `section <name>` / `end` lines used only
/// for human readability and otherwise skipped.
pub fn parse(ident: &str, text: &str) -> Result<LangdefFile, LangdefError> {
    let mut file = LangdefFile {
        ident: ident.to_string(),
        ..Default::default()
    };

    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line == "end" || line.starts_with("section ") {
            continue;
        }

        let parse_err = |message: String| LangdefError::Parse {
            ident: ident.to_string(),
            line: lineno + 1,
            message,
        };

        let (key, value) = split_key_value(line).ok_or_else(|| {
            parse_err(format!("expected '<key>: <value>', got '{line}'"))
        })?;

        match key {
            "ident" => file.ident = value.to_string(),
            "desc" => file.desc = value.trim_matches('"').to_string(),
            "maintainer" => file.maintainer = value.trim_matches('"').to_string(),
            "symbol" => file.items.push(SectionItem::Symbol(value.to_string())),
            "keyword" => file.items.push(SectionItem::Keyword(value.to_string())),
            "import" => file.items.push(SectionItem::Import(value.to_string())),
            "before" => file.items.push(SectionItem::Before(value.to_string())),
            "after" => file.items.push(SectionItem::After(value.to_string())),
            "grule" => {
                let (name, body) = value
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| parse_err("grule requires a name and a body".into()))?;
                file.items.push(SectionItem::Grule { name: name.to_string(), body: body.trim().to_string() });
            }
            "rfunc" => {
                let (name, body) = value
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| parse_err("rfunc requires a name and a body".into()))?;
                file.items.push(SectionItem::Rfunc { name: name.to_string(), body: body.trim().to_string() });
            }
            "bnf" => {
                let (nonterminal, body) = value
                    .split_once(":=")
                    .ok_or_else(|| parse_err("bnf requires '<nonterminal> := <body>'".into()))?;
                file.items.push(SectionItem::Bnf {
                    nonterminal: nonterminal.trim().to_string(),
                    body: body.trim().to_string(),
                });
            }
            "table" => {
                let (name, body) = value
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| parse_err("table requires a name and a body".into()))?;
                file.items.push(SectionItem::Table { name: name.to_string(), body: body.trim().to_string() });
            }
            "dfaerr" => {
                let (node, handler) = value
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| parse_err("dfaerr requires '<node> <handler>'".into()))?;
                file.items.push(SectionItem::Dfaerr { node: node.to_string(), handler: handler.trim().to_string() });
            }
            "tnode" => file.items.push(parse_tnode(value, &parse_err)?),
            other => return Err(parse_err(format!("unknown langdef key '{other}'"))),
        }
    }

    Ok(file)
}

fn parse_tnode(value: &str, parse_err: &dyn Fn(String) -> LangdefError) -> Result<SectionItem, LangdefError> {
    let mut words = value.split_whitespace();
    let name = words
        .next()
        .ok_or_else(|| parse_err("tnode requires a name".into()))?
        .to_string();

    let mut invalid_before = None;
    let mut invalid_after = None;
    let mut flags = Vec::new();

    for word in words {
        if let Some(pass) = word.strip_prefix("invalid_before=") {
            invalid_before = Some(pass.to_string());
        } else if let Some(pass) = word.strip_prefix("invalid_after=") {
            invalid_after = Some(pass.to_string());
        } else {
            flags.push(word.to_string());
        }
    }

    Ok(SectionItem::Tnode { name, invalid_before, invalid_after, flags })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_fields_and_symbol_declarations() {
        let text = "ident: demo\ndesc: \"Demo language\"\nmaintainer: nobody\nsymbol: +\nkeyword: if\n";
        let file = parse("demo", text).unwrap();
        assert_eq!(file.desc, "Demo language");
        assert_eq!(file.items.len(), 2);
    }

    #[test]
    fn tnode_flags_and_pass_bounds_are_parsed() {
        let text = "tnode: expr invalid_before=typecheck transparent\n";
        let file = parse("demo", text).unwrap();
        match &file.items[0] {
            SectionItem::Tnode { name, invalid_before, flags, .. } => {
                assert_eq!(name, "expr");
                assert_eq!(invalid_before.as_deref(), Some("typecheck"));
                assert_eq!(flags, &["transparent"]);
            }
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn unknown_key_is_reported_with_line_number() {
        let text = "bogus: value\n";
        let err = parse("demo", text).unwrap_err();
        match err {
            LangdefError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("wrong error variant: {other:?}"),
        }
    }
}
