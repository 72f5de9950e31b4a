#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod diag;
mod lexer;
mod lexicon;
mod parser;
mod token;

pub use diag::{render_report, Diagnostic, ParseErrors};
pub use lexer::{tokenize, Lexer};
pub use lexicon::{Lexicon, Rule};
pub use parser::{parse, parse_str, ParseOutput, Parser};
pub use token::{Tok, TokKind};
