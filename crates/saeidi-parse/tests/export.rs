//! The AST serializes to JSON for external tools.

use saeidi_parse::parse_str;
use serde_json::{json, Value};

#[test]
fn minimal_program_json_shape() {
    let program = parse_str("<mem>", "عيلة T { حيسبة س () { رقم ن = 5 ; } }").unwrap();
    let v = serde_json::to_value(&program).unwrap();

    assert_eq!(v["class_name"]["text"], "T");
    let f = &v["functions"][0];
    assert_eq!(f["is_static"], false);
    assert_eq!(f["ret_ty"], Value::Null);
    assert_eq!(f["name"]["text"], "س");

    let decl = &f["body"]["stmts"][0]["VarDecl"];
    assert_eq!(decl["ty"]["text"], "رقم");
    assert_eq!(decl["name"]["text"], "ن");
    assert_eq!(decl["init"], json!({ "Lit": { "Num": "5" } }));
}

#[test]
fn binary_and_loop_nodes_json_shape() {
    let program = parse_str(
        "<mem>",
        "عيلة T { حيسبة f () { لف (رقم i = 0; i < 2; i++) اكتوب \"x\" + i; } }",
    )
    .unwrap();
    let v = serde_json::to_value(&program).unwrap();
    let for_ = &v["functions"][0]["body"]["stmts"][0]["For"];

    assert_eq!(for_["init"]["VarDecl"]["name"]["text"], "i");
    assert_eq!(for_["cond"]["Binary"]["op"], "Lt");
    assert_eq!(for_["step"]["PostfixIncrement"]["text"], "i");

    let print = &for_["body"]["Print"]["expr"]["Binary"];
    assert_eq!(print["op"], "Add");
    assert_eq!(print["lhs"], json!({ "Lit": { "Str": "x" } }));
}
