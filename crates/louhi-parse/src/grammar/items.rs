use louhi_syntax::SyntaxKind::{self, *};
use louhi_syntax::SyntaxSet;

use super::{delimited, exprs, name, types};
use crate::parser::{CompletedMarker, Marker, Parser};

const DECLARATION_RECOVERY: SyntaxSet =
    SyntaxSet::new([CLASS_KW, OBJECT_KW, FUN_KW, VAL_KW, VAR_KW, RIGHT_BRACE]);

pub(crate) fn module(p: &mut Parser) {
    let m = p.start();

    if p.at(PACKAGE_KW) {
        package_directive(p);
    }
    while p.at(IMPORT_KW) {
        import_directive(p);
    }
    while !p.at(EOF) {
        if p.eat(SEMICOLON) {
            continue;
        }
        item(p);
    }

    m.complete(p, MODULE);
}

fn package_directive(p: &mut Parser) {
    let m = p.start();
    p.advance();

    let _ = reference(p);
    while p.at(DOT) {
        p.advance();
        let _ = reference(p);
    }
    let _ = p.eat(SEMICOLON);

    m.complete(p, PACKAGE_DIRECTIVE);
}

fn import_directive(p: &mut Parser) {
    let m = p.start();
    p.advance();

    if let Some(mut path) = reference(p) {
        while p.at(DOT) {
            let qualified = path.precede(p);
            p.advance();
            let _ = reference(p);
            path = qualified.complete(p, DOT_EXPR);
        }
    }
    if p.at(AS_KW) {
        let alias = p.start();
        p.advance();
        name(p, &DECLARATION_RECOVERY);
        alias.complete(p, IMPORT_ALIAS);
    }
    let _ = p.eat(SEMICOLON);

    m.complete(p, IMPORT_DIRECTIVE);
}

fn reference(p: &mut Parser) -> Option<CompletedMarker> {
    if !p.at(NAME) {
        p.error("expected a name");
        return None;
    }
    let m = p.start();
    p.advance();
    Some(m.complete(p, REFERENCE_EXPR))
}

pub(crate) fn item(p: &mut Parser) {
    let m = p.start();
    let has_modifiers = modifier_list(p);

    match p.peek_kind() {
        CLASS_KW => class(p, m),
        OBJECT_KW => {
            object_decl(p, m);
        }
        FUN_KW => function(p, m),
        VAL_KW | VAR_KW => property(p, m),
        CONSTRUCTOR_KW => secondary_constructor(p, m),
        INIT_KW => class_initializer(p, m),
        _ => {
            p.error("expected a declaration");
            if !has_modifiers {
                p.advance();
            }
            m.complete(p, ERROR);
        }
    }
}

/// Parses annotations and modifier keywords into a `MODIFIER_LIST`. Returns
/// `false` when there was nothing to parse.
pub(crate) fn modifier_list(p: &mut Parser) -> bool {
    if !p.at(AT) && !p.at_set(&SyntaxKind::MODIFIER_KEYWORDS) {
        return false;
    }

    let m = p.start();
    loop {
        if p.at(AT) {
            annotation_entry(p);
        } else if p.at_set(&SyntaxKind::MODIFIER_KEYWORDS) {
            p.advance();
        } else {
            break;
        }
    }
    m.complete(p, MODIFIER_LIST);
    true
}

pub(crate) fn annotation_entry(p: &mut Parser) {
    let m = p.start();
    p.advance();

    let at_target =
        matches!(p.peek_kind(), NAME | FIELD_KW | GET_KW | SET_KW) && p.nth_kind(1) == COLON;
    if at_target {
        let target = p.start();
        p.advance();
        target.complete(p, ANNOTATION_TARGET);
        p.advance();
    }

    let callee = p.start();
    let user_type = p.start();
    let _ = reference(p);
    user_type.complete(p, USER_TYPE);
    callee.complete(p, CONSTRUCTOR_CALLEE);

    if p.at(LEFT_PAREN) {
        exprs::value_arg_list(p);
    }

    m.complete(p, ANNOTATION_ENTRY);
}

fn class(p: &mut Parser, m: Marker) {
    p.advance();
    name(p, &DECLARATION_RECOVERY);

    if p.at(LT) {
        type_param_list(p);
    }
    if p.at(LEFT_PAREN) || p.at(CONSTRUCTOR_KW) || at_modified_constructor(p) {
        primary_constructor(p);
    }
    if p.eat(COLON) {
        super_type_list(p);
    }
    if p.at(LEFT_BRACE) {
        class_body(p);
    }

    m.complete(p, CLASS);
}

fn at_modified_constructor(p: &Parser) -> bool {
    let mut n = 0;
    while SyntaxKind::MODIFIER_KEYWORDS.contains(p.nth_kind(n)) {
        n += 1;
    }
    n > 0 && p.nth_kind(n) == CONSTRUCTOR_KW
}

fn primary_constructor(p: &mut Parser) {
    let m = p.start();
    modifier_list(p);
    let _ = p.eat(CONSTRUCTOR_KW);
    if p.at(LEFT_PAREN) {
        value_param_list(p);
    } else {
        p.error("expected constructor parameters");
    }
    m.complete(p, PRIMARY_CONSTRUCTOR);
}

fn object_decl(p: &mut Parser, m: Marker) -> CompletedMarker {
    p.advance();

    if p.at(NAME) {
        p.advance();
    }
    if p.eat(COLON) {
        super_type_list(p);
    }
    if p.at(LEFT_BRACE) {
        class_body(p);
    }

    m.complete(p, OBJECT_DECL)
}

/// Anonymous `object` in expression position.
pub(crate) fn object_literal(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    let decl = p.start();
    object_decl(p, decl);
    m.complete(p, OBJECT_LITERAL)
}

pub(crate) fn super_type_list(p: &mut Parser) {
    let m = p.start();
    loop {
        super_type_entry(p);
        if !p.eat(COMMA) {
            break;
        }
    }
    m.complete(p, SUPER_TYPE_LIST);
}

fn super_type_entry(p: &mut Parser) {
    let m = p.start();
    types::type_ref(p);

    if p.at(BY_KW) {
        p.advance();
        let saved = p.set_trailing_lambda_allowed(false);
        let _ = exprs::expr(p);
        p.set_trailing_lambda_allowed(saved);
        m.complete(p, DELEGATED_SUPER_TYPE_ENTRY);
    } else if p.at(LEFT_PAREN) {
        exprs::value_arg_list(p);
        m.complete(p, SUPER_TYPE_CALL_ENTRY);
    } else {
        m.complete(p, SUPER_TYPE_ENTRY);
    }
}

pub(crate) fn class_body(p: &mut Parser) {
    let m = p.start();
    p.advance();

    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        if p.eat(SEMICOLON) {
            continue;
        }
        item(p);
    }
    p.expect(RIGHT_BRACE);

    m.complete(p, CLASS_BODY);
}

fn function(p: &mut Parser, m: Marker) {
    p.advance();

    if p.at(NAME) && p.nth_kind(1) == DOT && p.nth_kind(2) == NAME {
        let receiver = p.start();
        let user_type = p.start();
        let _ = reference(p);
        user_type.complete(p, USER_TYPE);
        receiver.complete(p, TYPE_REFERENCE);
        p.advance();
    }

    if p.at(NAME) {
        p.advance();
    }
    if p.at(LT) {
        type_param_list(p);
    }
    if p.at(LEFT_PAREN) {
        value_param_list(p);
    } else {
        p.error("expected function parameters");
    }
    if p.eat(COLON) {
        types::type_ref(p);
    }
    function_body(p);

    m.complete(p, FUN);
}

fn function_body(p: &mut Parser) {
    if p.at(LEFT_BRACE) {
        exprs::block(p);
    } else if p.eat(EQ) {
        let _ = exprs::expr(p);
    }
}

fn type_param_list(p: &mut Parser) {
    let m = p.start();
    delimited(
        p,
        LT,
        GT,
        COMMA,
        "expected a type parameter",
        &SyntaxSet::new([NAME, IN_KW, OUT_KW, REIFIED_KW]),
        type_param,
    );
    m.complete(p, TYPE_PARAM_LIST);
}

fn type_param(p: &mut Parser) -> bool {
    if !p.at(NAME) && !p.at(AT) && !p.at_set(&SyntaxKind::MODIFIER_KEYWORDS) {
        return false;
    }

    let m = p.start();
    modifier_list(p);
    if p.at(NAME) {
        p.advance();
    } else {
        p.error("expected a type parameter name");
    }
    m.complete(p, TYPE_PARAM);
    true
}

pub(crate) fn value_param_list(p: &mut Parser) {
    let m = p.start();
    delimited(
        p,
        LEFT_PAREN,
        RIGHT_PAREN,
        COMMA,
        "expected a parameter",
        &SyntaxSet::new([NAME, VAL_KW, VAR_KW]),
        value_param,
    );
    m.complete(p, VALUE_PARAM_LIST);
}

fn value_param(p: &mut Parser) -> bool {
    if !p.at(NAME)
        && !p.at(AT)
        && !p.at_set(&SyntaxKind::MODIFIER_KEYWORDS)
        && !p.at_set(&SyntaxKind::VAL_VAR)
    {
        return false;
    }

    let m = p.start();
    modifier_list(p);
    if !p.eat(VAL_KW) {
        let _ = p.eat(VAR_KW);
    }
    if p.at(NAME) {
        p.advance();
    } else {
        p.error("expected a parameter name");
    }
    if p.eat(COLON) {
        types::type_ref(p);
    }
    if p.eat(EQ) {
        let _ = exprs::expr(p);
    }
    m.complete(p, VALUE_PARAM);
    true
}

fn property(p: &mut Parser, m: Marker) {
    p.advance();

    property_declarator(p);
    while p.at(COMMA) {
        p.advance();
        property_declarator(p);
    }
    while at_accessor_start(p) {
        property_accessor(p);
    }
    let _ = p.eat(SEMICOLON);

    m.complete(p, PROPERTY);
}

fn property_declarator(p: &mut Parser) {
    if p.at(NAME) {
        p.advance();
    } else {
        p.error("expected a property name");
        return;
    }

    if p.eat(COLON) {
        types::type_ref(p);
    }
    if p.at(BY_KW) {
        let delegate = p.start();
        p.advance();
        let _ = exprs::expr(p);
        delegate.complete(p, PROPERTY_DELEGATE);
    } else if p.eat(EQ) {
        let _ = exprs::expr(p);
    }
}

fn at_accessor_start(p: &Parser) -> bool {
    let mut n = 0;
    while SyntaxKind::MODIFIER_KEYWORDS.contains(p.nth_kind(n)) {
        n += 1;
    }
    matches!(p.nth_kind(n), GET_KW | SET_KW)
}

fn property_accessor(p: &mut Parser) {
    let m = p.start();
    modifier_list(p);

    if !p.eat(GET_KW) {
        p.expect(SET_KW);
    }
    if p.at(LEFT_PAREN) {
        value_param_list(p);
    }
    if p.eat(COLON) {
        types::type_ref(p);
    }
    if p.at(LEFT_BRACE) {
        exprs::block(p);
    } else if p.eat(EQ) {
        let _ = exprs::expr(p);
    }

    m.complete(p, PROPERTY_ACCESSOR);
}

fn secondary_constructor(p: &mut Parser, m: Marker) {
    p.advance();

    if p.at(LEFT_PAREN) {
        value_param_list(p);
    } else {
        p.error("expected constructor parameters");
    }
    if p.eat(COLON) {
        let call = p.start();
        let reference = p.start();
        if p.at(THIS_KW) || p.at(SUPER_KW) {
            p.advance();
        } else {
            p.error("expected `this` or `super`");
        }
        reference.complete(p, CONSTRUCTOR_DELEGATION_REFERENCE);
        if p.at(LEFT_PAREN) {
            exprs::value_arg_list(p);
        }
        call.complete(p, CONSTRUCTOR_DELEGATION_CALL);
    }
    if p.at(LEFT_BRACE) {
        exprs::block(p);
    }

    m.complete(p, SECONDARY_CONSTRUCTOR);
}

fn class_initializer(p: &mut Parser, m: Marker) {
    p.advance();

    if p.at(LEFT_BRACE) {
        exprs::block(p);
    } else {
        p.error("expected an initializer block");
    }

    m.complete(p, CLASS_INITIALIZER);
}
