use super::file::{self, LangdefFile};
use crate::error::LangdefError;
use std::collections::HashMap;
use std::rc::Rc;

/// Maps a language `ident` to its parsed langdef file, recovered from
/// `original_source/include/langdeflookup.h` and `misc/langdeflookup.c`.
/// The original generates this table with `gperf` for O(1) startup lookup;
/// that is a build-time optimisation of a fixed, small key set and is not
/// reproduced here (see DESIGN.md) — a plain `HashMap` serves the same
/// first-registration-wins contract as `keyword_add`.
#[derive(Default)]
pub struct LangdefLookup {
    by_ident: HashMap<String, Rc<LangdefFile>>,
}

impl LangdefLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register `text` under `ident`. Re-registering an `ident`
    /// already present is a no-op that returns the cached definition,
    /// mirroring `keyword_add`'s first-registration-wins contract.
    pub fn load(&mut self, ident: &str, text: &str) -> Result<Rc<LangdefFile>, LangdefError> {
        if let Some(existing) = self.by_ident.get(ident) {
            return Ok(Rc::clone(existing));
        }
        let parsed = Rc::new(file::parse(ident, text)?);
        self.by_ident.insert(ident.to_string(), Rc::clone(&parsed));
        Ok(parsed)
    }

    pub fn lookup(&self, ident: &str) -> Result<Rc<LangdefFile>, LangdefError> {
        self.by_ident
            .get(ident)
            .cloned()
            .ok_or_else(|| LangdefError::NotFound(ident.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_ident.len()
    }
    pub fn is_empty(&self) -> bool {
        self.by_ident.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reloading_the_same_ident_returns_the_cached_definition() {
        let mut lookup = LangdefLookup::new();
        lookup.load("demo", "desc: first\n").unwrap();
        let second = lookup.load("demo", "desc: second\n").unwrap();
        assert_eq!(second.desc, "first");
    }

    #[test]
    fn unknown_ident_is_reported() {
        let lookup = LangdefLookup::new();
        assert!(lookup.lookup("missing").is_err());
    }
}
