pub mod span {
    use serde::Serialize;

    /// Byte range into the source text, `end` exclusive.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub start: u32,
        pub end: u32,
    }
}

pub mod ast {
    use super::span::Span;
    use serde::Serialize;

    /// Root of a parsed source file: one class and its functions.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Program {
        pub class_name: Ident,
        pub functions: Vec<Function>,
    }

    impl Program {
        /// Top-level statements summed over every function body.
        pub fn statement_count(&self) -> usize {
            self.functions.iter().map(|f| f.body.stmts.len()).sum()
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Function {
        pub is_static: bool,
        pub ret_ty: Option<Ident>,
        pub name: Ident,
        pub body: Block,
    }

    impl Function {
        /// Lexeme of the declared return type, `void` when none was written.
        pub fn return_type_text(&self) -> &str {
            self.ret_ty.as_ref().map_or("void", |t| t.text.as_str())
        }

        pub fn line(&self) -> u32 {
            self.name.line
        }
    }

    /// A name as written in the source. Also used for type names, which may be
    /// keywords (`رقم`) or plain identifiers.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Ident {
        pub text: String,
        pub line: u32,
        pub span: Span,
    }

    #[derive(Debug, Clone, PartialEq, Default, Serialize)]
    pub struct Block {
        pub stmts: Vec<Stmt>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct VarDecl {
        pub ty: Ident,
        pub name: Ident,
        pub init: Option<Expr>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Stmt {
        VarDecl(VarDecl),
        Assign {
            target: Ident,
            value: Expr,
        },
        Print {
            expr: Expr,
        },
        If {
            cond: Expr,
            then_: Box<Stmt>,
            else_: Option<Box<Stmt>>,
        },
        While {
            cond: Expr,
            body: Box<Stmt>,
        },
        For {
            init: Option<ForInit>,
            cond: Option<Expr>,
            step: Option<Expr>,
            body: Box<Stmt>,
        },
        Block(Block),
        Return {
            value: Option<Expr>,
        },
    }

    /// First clause of a counted loop.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum ForInit {
        VarDecl(VarDecl),
        Assign { target: Ident, value: Expr },
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Expr {
        Lit(Lit),
        Var(Ident),
        Binary {
            lhs: Box<Expr>,
            op: BinOp,
            rhs: Box<Expr>,
        },
        PostfixIncrement(Ident),
    }

    /// Literal values keep their source text; numbers are not converted here.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub enum Lit {
        /// Raw digit run, ASCII or native digits.
        Num(String),
        /// String content without the surrounding quotes.
        Str(String),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum BinOp {
        // equality / relational
        Eq,
        Ne,
        Lt,
        Le,
        Gt,
        Ge,
        // arithmetic
        Add,
        Sub,
        Mul,
        Div,
    }

    impl BinOp {
        pub fn symbol(self) -> &'static str {
            match self {
                BinOp::Eq => "==",
                BinOp::Ne => "!=",
                BinOp::Lt => "<",
                BinOp::Le => "<=",
                BinOp::Gt => ">",
                BinOp::Ge => ">=",
                BinOp::Add => "+",
                BinOp::Sub => "-",
                BinOp::Mul => "*",
                BinOp::Div => "/",
            }
        }
    }
}
