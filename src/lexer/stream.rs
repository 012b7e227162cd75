use super::{Lex, TokenImpl};
use std::fmt::Display;
use std::ops::{Add, Index, Sub};

/// Index into the *filtered* (structural-only) token stream.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FltrPtr(usize);

/// Index into the *original* (unfiltered) token stream, including
/// non-structural tokens such as comments.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenPtr(usize);

impl Default for TokenPtr {
    fn default() -> Self {
        Self(0)
    }
}
impl Display for TokenPtr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl TokenPtr {
    pub fn origin() -> Self {
        Self(0)
    }
    pub fn is_origin(&self) -> bool {
        self.0 == 0
    }
    pub fn index(&self) -> usize {
        self.0
    }
}
impl From<usize> for TokenPtr {
    fn from(us: usize) -> Self {
        TokenPtr(us)
    }
}
impl Add<usize> for TokenPtr {
    type Output = Self;
    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs)
    }
}
impl Sub<usize> for TokenPtr {
    type Output = Self;
    fn sub(self, rhs: usize) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl Default for FltrPtr {
    fn default() -> Self {
        Self(0)
    }
}
impl Display for FltrPtr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl FltrPtr {
    pub fn index(&self) -> usize {
        self.0
    }
}
impl From<usize> for FltrPtr {
    fn from(us: usize) -> Self {
        FltrPtr(us)
    }
}
impl Add<usize> for FltrPtr {
    type Output = Self;
    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs)
    }
}
impl Sub<usize> for FltrPtr {
    type Output = Self;
    fn sub(self, rhs: usize) -> Self::Output {
        Self(self.0 - rhs)
    }
}

/// A token stream paired with the filtered index of its structural tokens.
/// Gives the parser substrate (component D) a total per-file token order
/// plus O(log n) navigation between the filtered and original views.
#[derive(Debug, Clone)]
pub struct TokenStream<'lex, TToken> {
    filtered: Vec<TokenPtr>,
    original: &'lex [Lex<TToken>],
}

impl<'lex, TToken: TokenImpl> From<&'lex Vec<Lex<TToken>>> for TokenStream<'lex, TToken> {
    fn from(segments: &'lex Vec<Lex<TToken>>) -> Self {
        let filtered = segments
            .iter()
            .enumerate()
            .filter_map(|(j, lex)| lex.token.is_structural().then(|| TokenPtr::from(j)))
            .collect();
        Self::new(segments, filtered)
    }
}

impl<'lex, TToken> TokenStream<'lex, TToken> {
    pub fn new(original: &'lex [Lex<TToken>], filtered: Vec<TokenPtr>) -> Self {
        Self { filtered, original }
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn get(&self, index: FltrPtr) -> Option<&Lex<TToken>> {
        self.filtered.get(index.index()).map(|s| &self.original[s.index()])
    }

    pub fn token_ptr(&self, index: FltrPtr) -> TokenPtr {
        self.filtered[index.index()]
    }

    pub fn find_filtered_index(&self, index: TokenPtr) -> Result<FltrPtr, FltrPtr> {
        match self.filtered.binary_search(&index) {
            Ok(i) => Ok(FltrPtr::from(i)),
            Err(i) => Err(FltrPtr::from(i)),
        }
    }

    pub fn original(&self) -> &'lex [Lex<TToken>] {
        self.original
    }

    pub fn iter_filtered(&self) -> impl Iterator<Item = &Lex<TToken>> {
        self.filtered.iter().map(move |p| &self.original[p.index()])
    }
}

impl<'lex, TToken> Index<FltrPtr> for TokenStream<'lex, TToken> {
    type Output = Lex<TToken>;
    fn index(&self, index: FltrPtr) -> &Self::Output {
        &self.original[self.filtered[index.index()].index()]
    }
}

impl<'lex, TToken> Index<TokenPtr> for TokenStream<'lex, TToken> {
    type Output = Lex<TToken>;
    fn index(&self, index: TokenPtr) -> &Self::Output {
        &self.original[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn filters_out_non_structural_tokens() {
        let lexes = vec![
            Lex::new(TokenKind::Name, 0, 3),
            Lex::new(TokenKind::Comment, 3, 10),
            Lex::new(TokenKind::End, 10, 10),
        ];
        let stream = TokenStream::from(&lexes);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream[FltrPtr::from(1)].token, TokenKind::End);
    }
}
