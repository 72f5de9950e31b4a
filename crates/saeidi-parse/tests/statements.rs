use saeidi_ast::ast::{Block, Expr, ForInit, Lit, Stmt};
use saeidi_parse::parse_str;

/// Helper: wrap statements in a class and function, return the body.
fn body(stmts: &str) -> Block {
    let src = format!("عيلة T {{ حيسبة f () {{ {stmts} }} }}");
    let program = parse_str("<mem>", &src).expect("parse ok");
    program.functions[0].body.clone()
}

fn only(stmts: &str) -> Stmt {
    let mut b = body(stmts);
    assert_eq!(b.stmts.len(), 1, "{:?}", b.stmts);
    b.stmts.remove(0)
}

// ============ declarations / assignment ============

#[test]
fn var_decl_with_initializer() {
    let Stmt::VarDecl(d) = only("رقم ن = 5 ;") else {
        panic!("expected VarDecl");
    };
    assert_eq!(d.ty.text, "رقم");
    assert_eq!(d.name.text, "ن");
    assert_eq!(d.init, Some(Expr::Lit(Lit::Num("5".into()))));
}

#[test]
fn var_decl_without_initializer() {
    let Stmt::VarDecl(d) = only("كلام اسم;") else {
        panic!("expected VarDecl");
    };
    assert_eq!(d.ty.text, "كلام");
    assert!(d.init.is_none());
}

#[test]
fn every_primitive_type_declares() {
    let b = body("رقم a; كلام b; كسر c; صحغلط d;");
    let tys: Vec<_> = b
        .stmts
        .iter()
        .map(|s| match s {
            Stmt::VarDecl(d) => d.ty.text.as_str(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(tys, vec!["رقم", "كلام", "كسر", "صحغلط"]);
}

#[test]
fn assignment() {
    let Stmt::Assign { target, value } = only("x = x + 1;") else {
        panic!("expected Assign");
    };
    assert_eq!(target.text, "x");
    assert!(matches!(value, Expr::Binary { .. }));
}

#[test]
fn print_statement() {
    let Stmt::Print { expr } = only("اكتوب ( \"hi\" ) ;") else {
        panic!("expected Print");
    };
    assert_eq!(expr, Expr::Lit(Lit::Str("hi".into())));
}

#[test]
fn return_with_and_without_value() {
    let b = body("الجوف ; الجوف x ;");
    assert!(matches!(&b.stmts[0], Stmt::Return { value: None }));
    assert!(matches!(&b.stmts[1], Stmt::Return { value: Some(Expr::Var(id)) } if id.text == "x"));
}

// ============ control flow ============

#[test]
fn if_without_else() {
    let Stmt::If { cond, then_, else_ } = only("لو (x > 1) اكتوب x;") else {
        panic!("expected If");
    };
    assert!(matches!(cond, Expr::Binary { .. }));
    assert!(matches!(*then_, Stmt::Print { .. }));
    assert!(else_.is_none());
}

#[test]
fn if_with_else_blocks() {
    let Stmt::If { then_, else_, .. } = only("لو (x >= ۱۸) { اكتوب 1; } والا { اكتوب 2; اكتوب 3; }")
    else {
        panic!("expected If");
    };
    let Stmt::Block(t) = *then_ else {
        panic!("expected Block");
    };
    assert_eq!(t.stmts.len(), 1);
    let Some(e) = else_ else {
        panic!("expected else branch");
    };
    let Stmt::Block(e) = *e else {
        panic!("expected Block");
    };
    assert_eq!(e.stmts.len(), 2);
}

#[test]
fn while_keyword() {
    let Stmt::While { cond, body } = only("علطول (n < ۳) { n = n + 1; }") else {
        panic!("expected While");
    };
    assert!(matches!(cond, Expr::Binary { .. }));
    assert!(matches!(*body, Stmt::Block(_)));
}

#[test]
fn nested_block_statement() {
    let Stmt::Block(b) = only("{ رقم a = 1; { اكتوب a; } }") else {
        panic!("expected Block");
    };
    assert_eq!(b.stmts.len(), 2);
    assert!(matches!(&b.stmts[1], Stmt::Block(inner) if inner.stmts.len() == 1));
}

#[test]
fn empty_body() {
    assert!(body("").stmts.is_empty());
}

// ============ loop disambiguation ============

#[test]
fn loop_with_typed_initializer_is_counted() {
    let Stmt::For {
        init,
        cond,
        step,
        body,
    } = only("لف (رقم i = 0; i < 2; i++) { }")
    else {
        panic!("expected For");
    };
    let Some(ForInit::VarDecl(d)) = init else {
        panic!("expected declaration initializer");
    };
    assert_eq!(d.name.text, "i");
    assert!(cond.is_some());
    assert!(matches!(step, Some(Expr::PostfixIncrement(id)) if id.text == "i"));
    assert!(matches!(*body, Stmt::Block(ref b) if b.stmts.is_empty()));
}

#[test]
fn loop_with_condition_only_is_while() {
    let Stmt::While { cond, .. } = only("لف (n < 3) { }") else {
        panic!("expected While");
    };
    assert!(matches!(cond, Expr::Binary { .. }));
}

#[test]
fn loop_with_bare_variable_is_while() {
    assert!(matches!(only("لف (n) { }"), Stmt::While { .. }));
    assert!(matches!(only("لف (n++) { }"), Stmt::While { .. }));
}

#[test]
fn loop_with_empty_clauses_is_counted() {
    let Stmt::For {
        init, cond, step, ..
    } = only("لف (;;) { }")
    else {
        panic!("expected For");
    };
    assert!(init.is_none() && cond.is_none() && step.is_none());
}

#[test]
fn loop_with_assignment_initializer_is_counted() {
    let Stmt::For { init, .. } = only("لف (i = 0; i < 10; i++) اكتوب i;") else {
        panic!("expected For");
    };
    assert!(matches!(init, Some(ForInit::Assign { ref target, .. }) if target.text == "i"));
}

#[test]
fn sample_program_body() {
    let b = body(
        r#"
        رقم سن = ٢٥ ;
        كلام اسم = "محمود" ;
        اكتوب ( " أنا " + اسم + " وعندي " + سن ) ;
        لو (سن >= ۱۸) { اكتوب ( "راجل" ); } والا { اكتوب ( "ذاكر" ); }
        رقم العد = 0;
        علطول (العد < ۳) { اكتوب (العد); العد = العد + 1; }
        لف (رقم i = 0; i < 2; i++) { اكتوب(i); }
        الجوف ;
        "#,
    );
    assert_eq!(b.stmts.len(), 8);
    assert!(matches!(b.stmts[6], Stmt::For { .. }));
    assert!(matches!(b.stmts[7], Stmt::Return { value: None }));
}
