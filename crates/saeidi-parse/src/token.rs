use saeidi_ast::span::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokKind {
    // trivia / eof / error
    Eof,
    /// A run of characters no lexicon rule accepted (e.g. `5رقم`).
    Unknown,
    // keywords
    KwMain,    // سامو عليكم
    KwFn,      // حيسبة
    KwInt,     // رقم
    KwStr,     // كلام
    KwFloat,   // كسر
    KwBool,    // صحغلط
    KwPrint,   // اكتوب
    KwShow,    // اظهره
    KwIf,      // لو
    KwElse,    // والا
    KwWhile,   // علطول
    KwForEach, // لفلهم
    KwLoop,    // لف
    KwReturn,  // الجوف
    KwTasheel, // تسهيل
    KwClass,   // عيلة
    KwNothing, // ولا حاجة
    KwStatic,  // جاعد
    // idents / literals
    Ident,
    Str,
    Number,
    // punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    // operators
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    EqEq,
    Bang,
    BangEq,
    Gt,
    Ge,
    Lt,
    Le,
    PlusPlus,
}

impl TokKind {
    /// Every keyword kind, in lexicon priority order.
    pub const KEYWORDS: [TokKind; 18] = [
        TokKind::KwMain,
        TokKind::KwFn,
        TokKind::KwInt,
        TokKind::KwStr,
        TokKind::KwFloat,
        TokKind::KwBool,
        TokKind::KwPrint,
        TokKind::KwShow,
        TokKind::KwIf,
        TokKind::KwElse,
        TokKind::KwWhile,
        TokKind::KwForEach,
        TokKind::KwLoop,
        TokKind::KwReturn,
        TokKind::KwTasheel,
        TokKind::KwClass,
        TokKind::KwNothing,
        TokKind::KwStatic,
    ];

    /// Fixed source text of keywords, punctuation and operators.
    pub fn fixed_text(self) -> Option<&'static str> {
        use TokKind::*;
        let s = match self {
            KwMain => "سامو عليكم",
            KwFn => "حيسبة",
            KwInt => "رقم",
            KwStr => "كلام",
            KwFloat => "كسر",
            KwBool => "صحغلط",
            KwPrint => "اكتوب",
            KwShow => "اظهره",
            KwIf => "لو",
            KwElse => "والا",
            KwWhile => "علطول",
            KwForEach => "لفلهم",
            KwLoop => "لف",
            KwReturn => "الجوف",
            KwTasheel => "تسهيل",
            KwClass => "عيلة",
            KwNothing => "ولا حاجة",
            KwStatic => "جاعد",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Semicolon => ";",
            Comma => ",",
            Dot => ".",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Eq => "=",
            EqEq => "==",
            Bang => "!",
            BangEq => "!=",
            Gt => ">",
            Ge => ">=",
            Lt => "<",
            Le => "<=",
            PlusPlus => "++",
            Eof | Unknown | Ident | Str | Number => return None,
        };
        Some(s)
    }

    /// `رقم`, `كلام`, `كسر`, `صحغلط`
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokKind::KwInt | TokKind::KwStr | TokKind::KwFloat | TokKind::KwBool
        )
    }
}

/// Human-readable form used in "expected ..." diagnostics.
impl fmt::Display for TokKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_text() {
            Some(s) => write!(f, "'{s}'"),
            None => match self {
                TokKind::Eof => f.write_str("end of input"),
                TokKind::Unknown => f.write_str("unknown token"),
                TokKind::Ident => f.write_str("identifier"),
                TokKind::Str => f.write_str("string literal"),
                TokKind::Number => f.write_str("number literal"),
                _ => write!(f, "{self:?}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tok {
    pub kind: TokKind,
    /// Source text exactly as matched.
    pub text: String,
    /// Decoded value for literals: unquoted string content or raw digits.
    pub literal: Option<String>,
    /// 1-based line, counted after the newlines inside the match.
    pub line: u32,
    pub span: Span,
}

impl Tok {
    pub fn eof(line: u32, at: u32) -> Self {
        Tok {
            kind: TokKind::Eof,
            text: String::new(),
            literal: None,
            line,
            span: Span { start: at, end: at },
        }
    }
}
