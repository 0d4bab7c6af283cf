//! Expressions, calls and variables

use super::helpers::output;

#[test]
fn test_set_assigns_constant() {
    let source = r#"<cxx:set><cxx:var name="x"></cxx:var><cxx:const>1</cxx:const></cxx:set>"#;
    assert_eq!(output(source), "x = 1");
}

#[test]
fn test_eol_property_terminates_statement() {
    let source =
        r#"<cxx:set eol><cxx:var name="x"></cxx:var><cxx:const>1</cxx:const></cxx:set>"#;
    assert_eq!(output(source), "x = 1;");
}

#[test]
fn test_binary_operators() {
    let cases = [
        ("great", ">"),
        ("greatequal", ">="),
        ("less", "<"),
        ("lessequan", "<="),
        ("equal", "=="),
        ("notequal", "!="),
        ("plus", "+"),
        ("minus", "-"),
        ("times", "*"),
        ("divid", "/"),
        ("mod", "%"),
    ];
    for (tag, op) in cases {
        let source = format!(
            r#"<cxx:{tag}><cxx:var name="a"></cxx:var><cxx:var name="b"></cxx:var></cxx:{tag}>"#
        );
        assert_eq!(output(&source), format!("a {op} b"), "operator {tag}");
    }
}

#[test]
fn test_parentheses_group_subexpression() {
    let source = concat!(
        "<cxx:times>",
        "<cxx:parentheses><cxx:plus>",
        r#"<cxx:var name="a"></cxx:var><cxx:var name="b"></cxx:var>"#,
        "</cxx:plus></cxx:parentheses>",
        "<cxx:const>2</cxx:const>",
        "</cxx:times>"
    );
    assert_eq!(output(source), "(a + b) * 2");
}

#[test]
fn test_call_separates_arguments() {
    let source = concat!(
        r#"<cxx:call name="f">"#,
        "<cxx:const>1</cxx:const>",
        r#"<cxx:var name="y"></cxx:var>"#,
        "<cxx:string>s</cxx:string>",
        "</cxx:call>"
    );
    assert_eq!(output(source), r#"f(1, y, "s")"#);
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(output(r#"<cxx:call name="f"></cxx:call>"#), "f()");
}

#[test]
fn test_invoke_on_object_and_pointer() {
    let dot = r#"<cxx:var name="obj"><cxx:invoke name="run"></cxx:invoke></cxx:var>"#;
    assert_eq!(output(dot), "obj.run()");

    let arrow = concat!(
        r#"<cxx:var name="obj"><cxx:invoke name="run" ptr>"#,
        "<cxx:const>2</cxx:const>",
        "</cxx:invoke></cxx:var>"
    );
    assert_eq!(output(arrow), "obj->run(2)");
}

#[test]
fn test_var_forms() {
    assert_eq!(
        output(r#"<cxx:var type="int" name="a"></cxx:var>"#),
        "int a"
    );
    assert_eq!(output(r#"<cxx:var name="p" val></cxx:var>"#), "(*p)");
    assert_eq!(output(r#"<cxx:var name="v" addr></cxx:var>"#), "(&v)");
    assert_eq!(output(r#"<cxx:var name="v" ref></cxx:var>"#), "(&v)");
}

#[test]
fn test_var_with_subscript_child() {
    let source =
        r#"<cxx:var name="arr"><cxx:subscript><cxx:const>0</cxx:const></cxx:subscript></cxx:var>"#;
    assert_eq!(output(source), "arr[0]");
}

#[test]
fn test_list_and_typeinit() {
    let list = "<cxx:list><cxx:const>1</cxx:const><cxx:const>2</cxx:const></cxx:list>";
    assert_eq!(output(list), "{1, 2}");
    assert_eq!(output("<cxx:list></cxx:list>"), "{}");

    let init = r#"<cxx:typeinit type="std::string"><cxx:string>hi</cxx:string></cxx:typeinit>"#;
    assert_eq!(output(init), r#"std::string("hi")"#);
}

#[test]
fn test_string_keeps_content_verbatim() {
    assert_eq!(output(r#"<cxx:string>a\n</cxx:string>"#), r#""a\n""#);
    assert_eq!(output("<cxx:string></cxx:string>"), r#""""#);
}

#[test]
fn test_increments_and_decrements() {
    let var = r#"<cxx:var name="i"></cxx:var>"#;
    let cases = [
        ("post_increase", "(i)++"),
        ("pre_increase", "++(i)"),
        ("post_decrease", "(i)--"),
        ("pre_decrease", "--(i)"),
    ];
    for (tag, expected) in cases {
        let source = format!("<cxx:{tag}>{var}</cxx:{tag}>");
        assert_eq!(output(&source), expected, "construct {tag}");
    }
}

#[test]
fn test_keywords() {
    assert_eq!(output("<cxx:return></cxx:return>"), "return;");
    assert_eq!(output("<cxx:true></cxx:true>"), "true");
    assert_eq!(
        output(r#"<cxx:delete></cxx:delete><cxx:var name="p"></cxx:var>"#),
        "delete p"
    );
    assert_eq!(
        output(r#"<cxx:new></cxx:new><cxx:typeinit type="Foo"></cxx:typeinit>"#),
        "newFoo()"
    );
}

#[test]
fn test_code_line_and_empty() {
    assert_eq!(output("<cxx:code>int x = 0;</cxx:code>"), "int x = 0;");
    assert_eq!(
        output(r#"<cxx:line><cxx:call name="f"></cxx:call></cxx:line>"#),
        "f();"
    );
    assert_eq!(output("<cxx:line></cxx:line>"), ";");
    assert_eq!(output("<cxx:empty></cxx:empty>"), "");
}
