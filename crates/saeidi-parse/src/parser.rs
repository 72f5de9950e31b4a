use crate::diag::{Diagnostic, ParseErrors};
use crate::lexer::tokenize;
use crate::token::{Tok, TokKind};
use anyhow::{Context, Result};
use saeidi_ast::ast::{
    BinOp, Block, Expr, ForInit, Function, Ident, Lit, Program, Stmt, VarDecl,
};

/// A recoverable failure carries the diagnostic the nearest recovery point
/// records.
type PResult<T> = std::result::Result<T, Diagnostic>;

/// Tokenize and parse `src`, failing with every diagnostic if any was recorded.
pub fn parse_str(file: &str, src: &str) -> Result<Program> {
    let tokens = tokenize(src);
    let out = parse(&tokens);
    match out.program {
        Some(program) if out.diagnostics.is_empty() => Ok(program),
        _ => Err(ParseErrors(out.diagnostics))
            .with_context(|| format!("failed to parse {file}")),
    }
}

/// Parse a token sequence into a best-effort program plus diagnostics.
pub fn parse(tokens: &[Tok]) -> ParseOutput {
    Parser::new(tokens).parse()
}

#[derive(Debug)]
pub struct ParseOutput {
    /// `None` only when the class header itself is malformed.
    pub program: Option<Program>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

const COMPARISON_OPS: &[(TokKind, BinOp)] = &[
    (TokKind::Gt, BinOp::Gt),
    (TokKind::Ge, BinOp::Ge),
    (TokKind::Lt, BinOp::Lt),
    (TokKind::Le, BinOp::Le),
    (TokKind::EqEq, BinOp::Eq),
    (TokKind::BangEq, BinOp::Ne),
];
const TERM_OPS: &[(TokKind, BinOp)] = &[
    (TokKind::Plus, BinOp::Add),
    (TokKind::Minus, BinOp::Sub),
];
const FACTOR_OPS: &[(TokKind, BinOp)] = &[
    (TokKind::Star, BinOp::Mul),
    (TokKind::Slash, BinOp::Div),
];

pub struct Parser<'t> {
    tokens: &'t [Tok],
    pos: usize,
    /// Returned once the cursor runs past the slice.
    eof: Tok,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Tok]) -> Self {
        let eof = match tokens.last() {
            Some(t) if t.kind == TokKind::Eof => t.clone(),
            Some(t) => Tok::eof(t.line, t.span.end),
            None => Tok::eof(1, 0),
        };
        Self {
            tokens,
            pos: 0,
            eof,
            diagnostics: Vec::new(),
        }
    }

    pub fn parse(mut self) -> ParseOutput {
        let program = self.parse_program();
        tracing::debug!(
            functions = program.as_ref().map_or(0, |p| p.functions.len()),
            diagnostics = self.diagnostics.len(),
            "parse finished"
        );
        ParseOutput {
            program,
            diagnostics: self.diagnostics,
        }
    }

    // ======= cursor =======

    fn cur(&self) -> &Tok {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek_next(&self) -> &Tok {
        self.tokens.get(self.pos + 1).unwrap_or(&self.eof)
    }

    fn at(&self, k: TokKind) -> bool {
        self.cur().kind == k
    }

    fn is_eof(&self) -> bool {
        self.at(TokKind::Eof)
    }

    fn bump(&mut self) -> Tok {
        let t = self.cur().clone();
        if !self.is_eof() {
            self.pos += 1;
        }
        t
    }

    fn eat(&mut self, k: TokKind) -> bool {
        if self.at(k) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, k: TokKind, message: &str) -> PResult<Tok> {
        if self.at(k) {
            Ok(self.bump())
        } else {
            Err(self.error_here(message, k.to_string()))
        }
    }

    fn error_here(&self, message: &str, expected: impl Into<String>) -> Diagnostic {
        let t = self.cur();
        Diagnostic::new(t.line, message, t.text.clone(), expected)
    }

    // ======= class / functions =======

    /// `عيلة Name { function* }`. A malformed header aborts with no program.
    fn parse_program(&mut self) -> Option<Program> {
        let class_name = match self.parse_class_header() {
            Ok(name) => name,
            Err(d) => {
                self.diagnostics.push(d);
                return None;
            }
        };

        let mut functions = Vec::new();
        while !self.at(TokKind::RBrace) && !self.is_eof() {
            let start = self.pos;
            match self.parse_function() {
                Ok(f) => functions.push(f),
                Err(d) => self.recover_function(d, start),
            }
        }

        match self.expect(TokKind::RBrace, "expected '}' to close the class") {
            Ok(_) if !self.is_eof() => {
                let d = self.error_here("unexpected tokens after the class body", "end of input");
                self.diagnostics.push(d);
            }
            Ok(_) => {}
            Err(d) => self.diagnostics.push(d),
        }

        Some(Program {
            class_name,
            functions,
        })
    }

    fn parse_class_header(&mut self) -> PResult<Ident> {
        if !self.at(TokKind::KwClass) {
            return Err(self.error_here(
                "a program must start with 'عيلة'",
                TokKind::KwClass.to_string(),
            ));
        }
        self.bump();
        let name = self.expect(TokKind::Ident, "expected class name")?;
        self.expect(TokKind::LBrace, "expected '{' after the class name")?;
        Ok(ident(name))
    }

    /// Parse a function: `[جاعد] حيسبة [type] name ( ) { stmt* }`
    fn parse_function(&mut self) -> PResult<Function> {
        let is_static = self.eat(TokKind::KwStatic);
        if !self.at(TokKind::KwFn) {
            return Err(self.error_here(
                "expected 'حيسبة' to start a function",
                TokKind::KwFn.to_string(),
            ));
        }
        self.bump();

        let ret_ty = self.parse_return_type();
        let name = match self.cur().kind {
            TokKind::KwMain | TokKind::Ident => ident(self.bump()),
            _ => return Err(self.error_here("expected function name", "function name")),
        };

        self.expect(TokKind::LParen, "expected '('")?;
        self.expect(TokKind::RParen, "expected ')'")?;
        self.expect(TokKind::LBrace, "expected '{' to open the function body")?;
        let body = self.parse_block_body();
        self.expect(TokKind::RBrace, "expected '}' to close the function")?;

        Ok(Function {
            is_static,
            ret_ty,
            name,
            body,
        })
    }

    /// A primitive type keyword is always a return type. A plain identifier is
    /// one only when another name (identifier or `سامو عليكم`) follows it.
    fn parse_return_type(&mut self) -> Option<Ident> {
        let kind = self.cur().kind;
        let is_type = kind.is_primitive_type()
            || (kind == TokKind::Ident
                && matches!(self.peek_next().kind, TokKind::Ident | TokKind::KwMain));
        is_type.then(|| ident(self.bump()))
    }

    // ======= blocks and statements =======

    /// Statements up to, not including, the block's `}`. A failed statement is
    /// recorded and skipped. Also stops before a function start, so a missing
    /// `}` does not swallow the next function.
    fn parse_block_body(&mut self) -> Block {
        let mut stmts = Vec::new();
        while !self.at_block_boundary() && !self.is_eof() {
            let start = self.pos;
            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(d) => self.recover_statement(d, start),
            }
        }
        Block { stmts }
    }

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        match self.cur().kind {
            k if k.is_primitive_type() => {
                let decl = self.parse_var_decl()?;
                self.expect(TokKind::Semicolon, "expected ';'")?;
                Ok(Stmt::VarDecl(decl))
            }
            TokKind::KwPrint => {
                self.bump();
                let expr = self.parse_expr()?;
                self.expect(TokKind::Semicolon, "expected ';'")?;
                Ok(Stmt::Print { expr })
            }
            TokKind::KwIf => self.parse_if(),
            TokKind::KwWhile => self.parse_while(),
            TokKind::KwLoop => self.parse_loop(),
            TokKind::LBrace => {
                self.bump();
                let block = self.parse_block_body();
                self.expect(TokKind::RBrace, "expected '}'")?;
                Ok(Stmt::Block(block))
            }
            TokKind::Ident => {
                let target = ident(self.bump());
                self.expect(TokKind::Eq, "expected '='")?;
                let value = self.parse_expr()?;
                self.expect(TokKind::Semicolon, "expected ';'")?;
                Ok(Stmt::Assign { target, value })
            }
            TokKind::KwReturn => {
                self.bump();
                let value = if self.at(TokKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(TokKind::Semicolon, "expected ';' after 'الجوف'")?;
                Ok(Stmt::Return { value })
            }
            _ => Err(self.error_here("unexpected statement", "statement")),
        }
    }

    /// `type name [= expr]`, without the terminating `;`.
    fn parse_var_decl(&mut self) -> PResult<VarDecl> {
        let ty = ident(self.bump());
        let name = ident(self.expect(TokKind::Ident, "expected variable name")?);
        let init = if self.eat(TokKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(VarDecl { ty, name, init })
    }

    /// `لو ( cond ) stmt [والا stmt]`
    fn parse_if(&mut self) -> PResult<Stmt> {
        self.bump();
        self.expect(TokKind::LParen, "expected '(' after 'لو'")?;
        let cond = self.parse_expr()?;
        self.expect(TokKind::RParen, "expected ')'")?;
        let then_ = Box::new(self.parse_stmt()?);
        let else_ = if self.eat(TokKind::KwElse) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If { cond, then_, else_ })
    }

    /// `علطول ( cond ) stmt`
    fn parse_while(&mut self) -> PResult<Stmt> {
        self.bump();
        self.expect(TokKind::LParen, "expected '(' after 'علطول'")?;
        let cond = self.parse_expr()?;
        self.expect(TokKind::RParen, "expected ')'")?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::While { cond, body })
    }

    /// `لف` introduces both loop forms. Past the `(`, a type keyword, a `;`, or
    /// `name =` starts a counted loop `لف (init; cond; step) stmt`; anything
    /// else is the condition of `لف (cond) stmt`.
    fn parse_loop(&mut self) -> PResult<Stmt> {
        self.bump();
        self.expect(TokKind::LParen, "expected '(' after 'لف'")?;

        let kind = self.cur().kind;
        let assigns = kind == TokKind::Ident && self.peek_next().kind == TokKind::Eq;
        if !(kind.is_primitive_type() || kind == TokKind::Semicolon || assigns) {
            let cond = self.parse_expr()?;
            self.expect(TokKind::RParen, "expected ')'")?;
            let body = Box::new(self.parse_stmt()?);
            return Ok(Stmt::While { cond, body });
        }

        let init = if kind.is_primitive_type() {
            Some(ForInit::VarDecl(self.parse_var_decl()?))
        } else if assigns {
            let target = ident(self.bump());
            self.bump(); // '='
            let value = self.parse_expr()?;
            Some(ForInit::Assign { target, value })
        } else {
            None
        };
        self.expect(TokKind::Semicolon, "expected ';' after the loop initializer")?;

        let cond = if self.at(TokKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokKind::Semicolon, "expected ';' after the loop condition")?;

        let step = if self.at(TokKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokKind::RParen, "expected ')' to close the loop header")?;

        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::For {
            init,
            cond,
            step,
            body,
        })
    }

    // ======= expressions =======
    //
    // Precedence (low -> high), all binary tiers left-associative:
    //   comparison  > >= < <= == !=
    //   term        + -
    //   factor      * /
    //   postfix     name++
    //   primary     number, string, name, ( expr )

    fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> PResult<Expr> {
        self.parse_binary(COMPARISON_OPS, Self::parse_term)
    }

    fn parse_term(&mut self) -> PResult<Expr> {
        self.parse_binary(TERM_OPS, Self::parse_factor)
    }

    fn parse_factor(&mut self) -> PResult<Expr> {
        self.parse_binary(FACTOR_OPS, Self::parse_postfix)
    }

    fn parse_binary(
        &mut self,
        ops: &[(TokKind, BinOp)],
        operand: fn(&mut Self) -> PResult<Expr>,
    ) -> PResult<Expr> {
        let mut lhs = operand(self)?;
        while let Some(&(_, op)) = ops.iter().find(|(k, _)| self.at(*k)) {
            self.bump();
            let rhs = operand(self)?;
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// `++` only applies to a bare variable; after anything else it is left
    /// for the caller to reject.
    fn parse_postfix(&mut self) -> PResult<Expr> {
        match self.parse_primary()? {
            Expr::Var(id) if self.at(TokKind::PlusPlus) => {
                self.bump();
                Ok(Expr::PostfixIncrement(id))
            }
            expr => Ok(expr),
        }
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        match self.cur().kind {
            TokKind::Number => Ok(Expr::Lit(Lit::Num(literal(self.bump())))),
            TokKind::Str => Ok(Expr::Lit(Lit::Str(literal(self.bump())))),
            TokKind::Ident => Ok(Expr::Var(ident(self.bump()))),
            TokKind::LParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(TokKind::RParen, "expected ')'")?;
                Ok(inner)
            }
            _ => Err(self.error_here("unexpected expression", "expression")),
        }
    }

    // ======= recovery =======

    fn at_block_boundary(&self) -> bool {
        matches!(
            self.cur().kind,
            TokKind::RBrace | TokKind::KwFn | TokKind::KwStatic
        )
    }

    /// Record `diag`, then skip to the next likely statement start: just past a
    /// `;` or a skipped `{ }` group, or before a statement keyword or block
    /// boundary. Inside a skipped group only its closing `}` ends the skip; a
    /// function start ends it at any depth. At least one token is consumed
    /// between `start` and the resume point unless a boundary ends the block.
    fn recover_statement(&mut self, diag: Diagnostic, start: usize) {
        tracing::debug!(
            line = diag.line,
            found = %diag.found,
            message = %diag.message,
            "statement recovery"
        );
        self.diagnostics.push(diag);

        let mut progressed = self.pos > start;
        let mut depth = 0usize;
        while !self.is_eof() {
            let kind = self.cur().kind;
            if matches!(kind, TokKind::KwFn | TokKind::KwStatic) {
                return;
            }
            if depth == 0
                && (kind == TokKind::RBrace || (progressed && starts_statement(kind)))
            {
                return;
            }
            self.bump();
            progressed = true;
            match kind {
                TokKind::LBrace => depth += 1,
                TokKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                TokKind::Semicolon if depth == 0 => return,
                _ => {}
            }
        }
    }

    /// Record `diag`, then skip to the next function start or to the `}` that
    /// closes the class. Balanced `{ }` groups are skipped whole.
    fn recover_function(&mut self, diag: Diagnostic, start: usize) {
        tracing::debug!(
            line = diag.line,
            found = %diag.found,
            message = %diag.message,
            "function recovery"
        );
        self.diagnostics.push(diag);

        let mut progressed = self.pos > start;
        let mut depth = 0usize;
        while !self.is_eof() {
            match self.cur().kind {
                TokKind::KwFn | TokKind::KwStatic if progressed => return,
                TokKind::RBrace if depth == 0 => return,
                TokKind::RBrace => depth -= 1,
                TokKind::LBrace => depth += 1,
                _ => {}
            }
            self.bump();
            progressed = true;
        }
    }
}

fn starts_statement(kind: TokKind) -> bool {
    kind.is_primitive_type()
        || matches!(
            kind,
            TokKind::KwPrint
                | TokKind::KwIf
                | TokKind::KwWhile
                | TokKind::KwLoop
                | TokKind::KwReturn
        )
}

fn ident(tok: Tok) -> Ident {
    Ident {
        text: tok.text,
        line: tok.line,
        span: tok.span,
    }
}

fn literal(tok: Tok) -> String {
    tok.literal.unwrap_or(tok.text)
}
