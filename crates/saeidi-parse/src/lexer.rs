use crate::lexicon::Lexicon;
use crate::token::{Tok, TokKind};
use saeidi_ast::span::Span;

/// Tokenize a whole source text. The result always ends with exactly one
/// `Eof` token.
pub fn tokenize(src: &str) -> Vec<Tok> {
    Lexer::new(src).collect()
}

/// Left-to-right tokenizer over one source text.
///
/// Yields the `Eof` token once and then stops.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    lexicon: &'static Lexicon,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            lexicon: Lexicon::global(),
            done: false,
        }
    }

    fn span(&self, start: usize) -> Span {
        Span {
            start: start as u32,
            end: self.pos as u32,
        }
    }

    pub fn next_tok(&mut self) -> Tok {
        loop {
            let src = self.src;
            let rest = &src[self.pos..];
            if rest.is_empty() {
                return Tok::eof(self.line, self.pos as u32);
            }
            let start = self.pos;

            let Some((rule, len)) = self.lexicon.match_prefix(rest) else {
                return self.unknown(start);
            };
            let text = &rest[..len];
            self.line += newlines(text);
            self.pos += len;
            if rule.ignore {
                continue;
            }

            let literal = match rule.kind {
                // quotes are single bytes
                TokKind::Str => Some(text[1..text.len() - 1].to_string()),
                TokKind::Number => Some(text.to_string()),
                _ => None,
            };
            return Tok {
                kind: rule.kind,
                text: text.to_string(),
                literal,
                line: self.line,
                span: self.span(start),
            };
        }
    }

    /// No rule matched: take one character plus the letter/digit run after it.
    fn unknown(&mut self, start: usize) -> Tok {
        let src = self.src;
        let rest = &src[start..];
        let len = self.lexicon.unknown_len(rest);
        let text = &rest[..len];
        self.line += newlines(text);
        self.pos += len;
        tracing::trace!(line = self.line, text, "unknown token");
        Tok {
            kind: TokKind::Unknown,
            text: text.to_string(),
            literal: None,
            line: self.line,
            span: self.span(start),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Tok;

    fn next(&mut self) -> Option<Tok> {
        if self.done {
            return None;
        }
        let tok = self.next_tok();
        if tok.kind == TokKind::Eof {
            self.done = true;
        }
        Some(tok)
    }
}

fn newlines(text: &str) -> u32 {
    text.bytes().filter(|&b| b == b'\n').count() as u32
}
