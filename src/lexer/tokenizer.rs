use super::{ILexeme, ITokenization, Lex, LexError, LexemeRef, TokenImpl};
use crate::util::{Code, Log};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;
use std::fmt::Write;

/// A single-state tokenizer: lexeme utilities are tried in order at every
/// input position until one consumes a token.
pub struct Tokenizer<TToken = i8, TState = u8> {
    lexers: Vec<LexemeRef<TToken, TState>>,
}

impl<TToken> Tokenizer<TToken, u8> {
    pub fn new(lexers: Vec<LexemeRef<TToken, u8>>) -> Self {
        Self { lexers }
    }
}

/// A state-based tokenizer. Each state has its own ordered set of lexeme
/// utilities; a [`crate::lex_util::StateMixin`] (or thunk variant) changes
/// the active state as tokens are consumed, which is how a language with a
/// lexically distinct sub-mode (e.g. a quoted string with embedded
/// interpolation) is handled without a second tokenization pass.
pub struct CombinedTokenizer<TT = i8, TS = u8> {
    analyzers: Vec<(TS, Vec<LexemeRef<TT, TS>>)>,
    default_state: TS,
    debug: OnceCell<Log<&'static str>>,
}

impl<TT, TS: Ord + Eq + Copy> CombinedTokenizer<TT, TS> {
    pub fn new(default_state: TS, lexemes: Vec<LexemeRef<TT, TS>>) -> Self {
        Self {
            analyzers: vec![(default_state, lexemes)],
            default_state,
            debug: OnceCell::new(),
        }
    }

    pub fn add_state(&mut self, state: TS, lexemes: Vec<LexemeRef<TT, TS>>) {
        let index = match self.analyzers.binary_search_by_key(&state, |a| a.0) {
            Ok(i) => i + 1,
            Err(i) => i,
        };
        self.analyzers.insert(index, (state, lexemes))
    }

    pub fn set_log(&mut self, log_label: Log<&'static str>) -> Result<(), String> {
        self.debug
            .set(log_label)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }
}

impl<TToken: TokenImpl, TState: Copy + Debug + Ord + Eq> ITokenization
    for CombinedTokenizer<TToken, TState>
{
    type Token = TToken;

    fn tokenize(&self, code: &Code) -> Result<Vec<Lex<TToken>>, LexError> {
        let mut tokenized_stream: Vec<Lex<TToken>> = Vec::new();
        let mut pointer: usize = 0;
        let eof_pointer: usize = code.value.len();

        let mut state_stack = Vec::<TState>::new();
        let mut current_state = self.default_state;
        let mut current_analyzer = match self
            .analyzers
            .binary_search_by_key(&&current_state, |(b, _)| b)
        {
            Ok(index) => &self.analyzers[index],
            Err(_) => panic!("tokenizer state '{:?}' is not implemented", current_state),
        };

        loop {
            match current_analyzer
                .1
                .iter()
                .find_map(|lexer| lexer.consume(code, pointer, &tokenized_stream, &mut state_stack))
            {
                Some(lex_data) => {
                    debug_assert_eq!(pointer, lex_data.start);
                    pointer = lex_data.end;
                    tokenized_stream.push(lex_data);

                    if pointer == eof_pointer {
                        tokenized_stream.push(Lex::new(TToken::eof(), eof_pointer, eof_pointer));
                        break Ok(tokenized_stream);
                    }
                }
                None => {
                    break Err(LexError::new(
                        pointer,
                        format!("failed to tokenize input @ {}", code.obtain_position(pointer)),
                    ));
                }
            }

            let latest_state = state_stack.last().copied().unwrap_or(self.default_state);
            if latest_state != current_state {
                current_analyzer = match self
                    .analyzers
                    .binary_search_by_key(&latest_state, |(b, _)| *b)
                {
                    Ok(index) => &self.analyzers[index],
                    Err(_) => panic!("tokenizer state '{:?}' is not implemented", latest_state),
                };
                current_state = latest_state;
            }
        }
    }

    fn build_grammar(&self) -> Result<String, std::fmt::Error> {
        let mut writer = String::new();
        for (state, lexers) in &self.analyzers {
            writeln!(writer, "fragment {:?} {{", state)?;
            for fields in lexers.iter().map(|l| l.get_grammar_field()) {
                for (t, s) in &fields {
                    writeln!(writer, "{:>6}{:?} : {} ,", "", t, s)?;
                }
            }
            writeln!(writer, "}}")?;
        }
        Ok(writer)
    }
}

impl<TToken: TokenImpl, TState: Copy + Debug + Default + Ord + Eq> ITokenization
    for Tokenizer<TToken, TState>
{
    type Token = TToken;

    fn tokenize(&self, code: &Code) -> Result<Vec<Lex<TToken>>, LexError> {
        let mut tokenized_stream: Vec<Lex<TToken>> = Vec::new();
        let mut pointer: usize = 0;
        let eof_pointer: usize = code.value.len();
        let mut state_stack = Vec::new();

        loop {
            match self
                .lexers
                .iter()
                .find_map(|lexer| lexer.consume(code, pointer, &tokenized_stream, &mut state_stack))
            {
                Some(lex_data) => {
                    debug_assert_eq!(pointer, lex_data.start);
                    pointer = lex_data.end;
                    tokenized_stream.push(lex_data);

                    if pointer == eof_pointer {
                        tokenized_stream.push(Lex::new(TToken::eof(), eof_pointer, eof_pointer));
                        break Ok(tokenized_stream);
                    }
                }
                None => {
                    break Err(LexError::new(
                        pointer,
                        format!("failed to tokenize input @ {}", code.obtain_position(pointer)),
                    ));
                }
            }
        }
    }

    fn build_grammar(&self) -> Result<String, std::fmt::Error> {
        let mut writer = String::new();
        writeln!(writer, "fragment {{")?;
        for fields in self.lexers.iter().map(|l| l.get_grammar_field()) {
            for (t, s) in &fields {
                writeln!(writer, "{:>6}{:?} : {} ,", "", t, s)?;
            }
        }
        writeln!(writer, "}}")?;
        Ok(writer)
    }
}
