//! The ordered rule table the lexer tries at every position.
//!
//! Matching is first-match in declaration order, not longest-match, so the
//! order of [`RULES`] decides what a lexeme becomes:
//!
//! - a keyword that is a textual prefix of another keyword comes after it
//!   (`لفلهم` before `لف`), and two-word keywords come before anything
//!   sharing their first word;
//! - every keyword comes before the identifier rule;
//! - two-character operators come before their one-character prefixes;
//! - a digit run glued to a letter is not a number, so no rule matches and
//!   the lexer falls back to an `Unknown` token.

use crate::token::TokKind;
use regex::Regex;
use std::sync::LazyLock;

static LEXICON: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::compile(RULES));

/// Source form of one lexicon rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    pattern: PatternDef,
    kind: TokKind,
    ignore: bool,
    /// Rejects a match when this pattern matches right after it.
    not_followed_by: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
enum PatternDef {
    Exact(&'static str),
    Regex(&'static str),
}

impl RuleDef {
    const fn exact(text: &'static str, kind: TokKind) -> Self {
        Self {
            pattern: PatternDef::Exact(text),
            kind,
            ignore: false,
            not_followed_by: None,
        }
    }

    const fn regex(pattern: &'static str, kind: TokKind) -> Self {
        Self {
            pattern: PatternDef::Regex(pattern),
            kind,
            ignore: false,
            not_followed_by: None,
        }
    }

    const fn skip(pattern: &'static str) -> Self {
        Self {
            pattern: PatternDef::Regex(pattern),
            kind: TokKind::Unknown,
            ignore: true,
            not_followed_by: None,
        }
    }

    const fn not_followed_by(mut self, pattern: &'static str) -> Self {
        self.not_followed_by = Some(pattern);
        self
    }

    #[cfg(test)]
    fn exact_text(&self) -> Option<&'static str> {
        match self.pattern {
            PatternDef::Exact(s) => Some(s),
            PatternDef::Regex(_) => None,
        }
    }
}

/// Letters, digits and `_` that may follow the first character of an
/// `Unknown` token.
const UNKNOWN_TAIL: &str = r"[\p{L}\p{Nd}_]*";

pub const RULES: &[RuleDef] = &[
    RuleDef::skip(r"\s+"),
    // keywords
    RuleDef::exact("سامو عليكم", TokKind::KwMain),
    RuleDef::exact("حيسبة", TokKind::KwFn),
    RuleDef::exact("رقم", TokKind::KwInt),
    RuleDef::exact("كلام", TokKind::KwStr),
    RuleDef::exact("كسر", TokKind::KwFloat),
    RuleDef::exact("صحغلط", TokKind::KwBool),
    RuleDef::exact("اكتوب", TokKind::KwPrint),
    RuleDef::exact("اظهره", TokKind::KwShow),
    RuleDef::exact("لو", TokKind::KwIf),
    RuleDef::exact("والا", TokKind::KwElse),
    RuleDef::exact("علطول", TokKind::KwWhile),
    RuleDef::exact("لفلهم", TokKind::KwForEach),
    RuleDef::exact("لف", TokKind::KwLoop),
    RuleDef::exact("الجوف", TokKind::KwReturn),
    RuleDef::exact("تسهيل", TokKind::KwTasheel),
    RuleDef::exact("عيلة", TokKind::KwClass),
    RuleDef::exact("ولا حاجة", TokKind::KwNothing),
    RuleDef::exact("جاعد", TokKind::KwStatic),
    // literals / identifiers
    RuleDef::regex(r#""[^"]*""#, TokKind::Str),
    RuleDef::regex(r"[0-9٠-٩۰-۹]+", TokKind::Number).not_followed_by(r"[\p{L}0-9٠-٩۰-۹_]"),
    RuleDef::regex(r"[\p{L}_][\p{L}0-9_]*", TokKind::Ident),
    // operators
    RuleDef::exact("++", TokKind::PlusPlus),
    RuleDef::exact("==", TokKind::EqEq),
    RuleDef::exact("!=", TokKind::BangEq),
    RuleDef::exact(">=", TokKind::Ge),
    RuleDef::exact("<=", TokKind::Le),
    RuleDef::exact("+", TokKind::Plus),
    RuleDef::exact("-", TokKind::Minus),
    RuleDef::exact("*", TokKind::Star),
    RuleDef::exact("/", TokKind::Slash),
    RuleDef::exact("=", TokKind::Eq),
    RuleDef::exact("<", TokKind::Lt),
    RuleDef::exact(">", TokKind::Gt),
    RuleDef::exact("!", TokKind::Bang),
    // punctuation
    RuleDef::exact("(", TokKind::LParen),
    RuleDef::exact(")", TokKind::RParen),
    RuleDef::exact("{", TokKind::LBrace),
    RuleDef::exact("}", TokKind::RBrace),
    RuleDef::exact("[", TokKind::LBracket),
    RuleDef::exact("]", TokKind::RBracket),
    RuleDef::exact(";", TokKind::Semicolon),
    RuleDef::exact(",", TokKind::Comma),
    RuleDef::exact(".", TokKind::Dot),
];

#[derive(Debug)]
pub struct Rule {
    pub kind: TokKind,
    pub ignore: bool,
    re: Regex,
    not_followed_by: Option<Regex>,
}

impl Rule {
    /// Byte length of this rule's match at the start of `rest`, if any.
    fn match_len(&self, rest: &str) -> Option<usize> {
        let m = self.re.find(rest)?;
        if m.end() == 0 {
            return None;
        }
        if let Some(reject) = &self.not_followed_by {
            if reject.is_match(&rest[m.end()..]) {
                return None;
            }
        }
        Some(m.end())
    }
}

/// Compiled, priority-ordered rule list.
#[derive(Debug)]
pub struct Lexicon {
    rules: Vec<Rule>,
    unknown_tail: Regex,
}

impl Lexicon {
    /// The process-wide lexicon built from [`RULES`].
    pub fn global() -> &'static Lexicon {
        &LEXICON
    }

    fn compile(defs: &[RuleDef]) -> Self {
        let rules = defs
            .iter()
            .map(|d| {
                let source = match d.pattern {
                    PatternDef::Exact(s) => regex::escape(s),
                    PatternDef::Regex(p) => p.to_string(),
                };
                Rule {
                    kind: d.kind,
                    ignore: d.ignore,
                    re: anchored(&source),
                    not_followed_by: d.not_followed_by.map(anchored),
                }
            })
            .collect();
        Self {
            rules,
            unknown_tail: anchored(UNKNOWN_TAIL),
        }
    }

    /// First rule, in priority order, matching a non-empty prefix of `rest`.
    pub fn match_prefix(&self, rest: &str) -> Option<(&Rule, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_len(rest).map(|len| (rule, len)))
    }

    /// Byte length of the fallback token at the start of `rest`: the first
    /// character plus the letter, digit or `_` run after it.
    pub fn unknown_len(&self, rest: &str) -> usize {
        let Some(first) = rest.chars().next() else {
            return 0;
        };
        let head = first.len_utf8();
        head + self.unknown_tail.find(&rest[head..]).map_or(0, |m| m.end())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

fn anchored(source: &str) -> Regex {
    Regex::new(&format!("^(?:{source})")).expect("lexicon patterns are constant")
}
