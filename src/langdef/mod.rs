//! The language-definition loader (spec.md §4.E): parses `.ldef` text files
//! and applies their declarations — tokens, node tags, grammar rules, DFA
//! tables, imports — to a language's registries in six ordered steps.

mod file;
mod loader;
mod lookup;

pub use file::{parse, LangdefFile, SectionItem};
pub use loader::LoadedLangdef;
pub use lookup::LangdefLookup;
