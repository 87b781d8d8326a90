use expect_test::{Expect, expect};

fn check(text: &str, expected: Expect) {
    let (tree, errors) = crate::parse(text);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    expected.assert_eq(&crate::debug_dump(&tree));
}

#[test]
fn property_with_initializer() {
    check(
        "val x = 1",
        expect![[r#"
            MODULE
              PROPERTY
                VAL_KW "val"
                NAME "x"
                EQ "="
                LITERAL
                  INT_NUMBER "1"
        "#]],
    );
}

#[test]
fn modifier_list_precedes_class_keyword() {
    check(
        "abstract class Foo",
        expect![[r#"
            MODULE
              CLASS
                MODIFIER_LIST
                  ABSTRACT_KW "abstract"
                CLASS_KW "class"
                NAME "Foo"
        "#]],
    );
}

#[test]
fn safe_call_in_function_body() {
    check(
        "fun f() { a?.b() }",
        expect![[r#"
            MODULE
              FUN
                FUN_KW "fun"
                NAME "f"
                VALUE_PARAM_LIST
                  LEFT_PAREN "("
                  RIGHT_PAREN ")"
                BLOCK
                  LEFT_BRACE "{"
                  SAFE_ACCESS_EXPR
                    REFERENCE_EXPR
                      NAME "a"
                    SAFE_ACCESS "?."
                    CALL_EXPR
                      REFERENCE_EXPR
                        NAME "b"
                      VALUE_ARG_LIST
                        LEFT_PAREN "("
                        RIGHT_PAREN ")"
                  RIGHT_BRACE "}"
        "#]],
    );
}

#[test]
fn multi_declarator_property_keeps_commas_flat() {
    check(
        "val x = 1, y = 2",
        expect![[r#"
            MODULE
              PROPERTY
                VAL_KW "val"
                NAME "x"
                EQ "="
                LITERAL
                  INT_NUMBER "1"
                COMMA ","
                NAME "y"
                EQ "="
                LITERAL
                  INT_NUMBER "2"
        "#]],
    );
}

#[test]
fn delegated_supertype_keeps_class_body() {
    check(
        "class Foo : Bar by baz { }",
        expect![[r#"
            MODULE
              CLASS
                CLASS_KW "class"
                NAME "Foo"
                COLON ":"
                SUPER_TYPE_LIST
                  DELEGATED_SUPER_TYPE_ENTRY
                    TYPE_REFERENCE
                      USER_TYPE
                        REFERENCE_EXPR
                          NAME "Bar"
                    BY_KW "by"
                    REFERENCE_EXPR
                      NAME "baz"
                CLASS_BODY
                  LEFT_BRACE "{"
                  RIGHT_BRACE "}"
        "#]],
    );
}

#[test]
fn nullable_types_nest() {
    check(
        "val x: T?? = y",
        expect![[r#"
            MODULE
              PROPERTY
                VAL_KW "val"
                NAME "x"
                COLON ":"
                TYPE_REFERENCE
                  NULLABLE_TYPE
                    NULLABLE_TYPE
                      USER_TYPE
                        REFERENCE_EXPR
                          NAME "T"
                      QUEST "?"
                    QUEST "?"
                EQ "="
                REFERENCE_EXPR
                  NAME "y"
        "#]],
    );
}

#[test]
fn secondary_constructor_with_delegation() {
    check(
        "class A { constructor(x: Int) : this() { } }",
        expect![[r#"
            MODULE
              CLASS
                CLASS_KW "class"
                NAME "A"
                CLASS_BODY
                  LEFT_BRACE "{"
                  SECONDARY_CONSTRUCTOR
                    CONSTRUCTOR_KW "constructor"
                    VALUE_PARAM_LIST
                      LEFT_PAREN "("
                      VALUE_PARAM
                        NAME "x"
                        COLON ":"
                        TYPE_REFERENCE
                          USER_TYPE
                            REFERENCE_EXPR
                              NAME "Int"
                      RIGHT_PAREN ")"
                    COLON ":"
                    CONSTRUCTOR_DELEGATION_CALL
                      CONSTRUCTOR_DELEGATION_REFERENCE
                        THIS_KW "this"
                      VALUE_ARG_LIST
                        LEFT_PAREN "("
                        RIGHT_PAREN ")"
                    BLOCK
                      LEFT_BRACE "{"
                      RIGHT_BRACE "}"
                  RIGHT_BRACE "}"
        "#]],
    );
}

#[test]
fn parse_is_lossless() {
    let text = "fun main() {\n    val x = 1 // comment\n}\n";
    let (tree, errors) = crate::parse(text);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(tree.text(), text);

    // The root covers everything up to the trailing newline, which attaches
    // to the closing brace as trailing trivia.
    let root = tree.root();
    assert_eq!(root.text_trimmed(), text.trim_end());
}

#[test]
fn errors_recover_without_panicking() {
    let cases = ["val = 1", "class", "fun f( {", "a?.", "import", "class C : by { }"];
    for case in cases {
        let (tree, errors) = crate::parse(case);
        assert!(!errors.is_empty(), "expected errors for {case:?}");
        assert_eq!(tree.root().kind(), louhi_syntax::SyntaxKind::MODULE);
    }
}

#[test]
fn both_backends_materialize_the_same_text() {
    let db = salsa::DatabaseImpl::new();
    let text = "abstract class Foo { fun bar() { } }";
    let file = louhi_inputs::File::new(&db, "test.lh".into(), text.to_owned());

    let red_root = crate::parse_file(&db, file);
    let (flat, _) = crate::parse(text);
    assert_eq!(red_root.text_range(&db).len(), flat.root().text_range().len());
    assert_eq!(red_root.text_trimmed_range(&db), flat.root().text_trimmed_range());
}
