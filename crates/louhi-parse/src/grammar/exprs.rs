use louhi_syntax::SyntaxKind::{self, *};
use louhi_syntax::SyntaxSet;

use super::{items, types};
use crate::parser::{CompletedMarker, Parser};

const EXPR_FIRST: SyntaxSet = SyntaxSet::new([
    INT_NUMBER,
    CHAR_LITERAL,
    STRING,
    NAME,
    THIS_KW,
    SUPER_KW,
    FIELD_KW,
    LEFT_PAREN,
    LEFT_BRACE,
    IF_KW,
    WHEN_KW,
    RETURN_KW,
    OBJECT_KW,
    AT,
    EXCL,
    MINUS,
    PLUS,
]);

pub(crate) fn block(p: &mut Parser) {
    let m = p.start();
    p.advance();

    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        stmt(p);
    }
    p.expect(RIGHT_BRACE);

    m.complete(p, BLOCK);
}

pub(crate) fn stmt(p: &mut Parser) {
    while p.eat(SEMICOLON) {}
    if p.at(RIGHT_BRACE) || p.at(EOF) {
        return;
    }

    match p.peek_kind() {
        VAL_KW | VAR_KW | FUN_KW | CLASS_KW | CONSTRUCTOR_KW | INIT_KW => items::item(p),
        OBJECT_KW if p.nth_kind(1) == NAME => items::item(p),
        kind if SyntaxKind::MODIFIER_KEYWORDS.contains(kind) => items::item(p),
        _ => {
            let _ = expr(p);
        }
    }
}

pub(crate) fn expr(p: &mut Parser) -> Option<CompletedMarker> {
    let lhs = binary_expr(p, 0)?;

    if p.at_set(&SyntaxKind::ALL_ASSIGNMENTS) {
        let m = lhs.precede(p);
        operation_reference(p);
        let _ = expr(p);
        return Some(m.complete(p, BINARY_EXPR));
    }

    Some(lhs)
}

fn operation_reference(p: &mut Parser) {
    let m = p.start();
    p.advance();
    m.complete(p, OPERATION_REFERENCE);
}

fn binary_binding_power(kind: SyntaxKind) -> Option<u8> {
    match kind {
        OR_OR => Some(1),
        AND_AND => Some(2),
        EQEQ | NOT_EQ => Some(3),
        LT | GT | LT_EQ | GT_EQ | IN_KW => Some(4),
        ELVIS => Some(5),
        PLUS | MINUS => Some(6),
        STAR | SLASH | PERCENT => Some(7),
        _ => None,
    }
}

fn binary_expr(p: &mut Parser, min_bp: u8) -> Option<CompletedMarker> {
    let mut lhs = unary_expr(p)?;

    loop {
        match p.peek_kind() {
            AS_KW | IS_KW => {
                let m = lhs.precede(p);
                operation_reference(p);
                types::type_ref(p);
                lhs = m.complete(p, BINARY_WITH_TYPE);
            }
            kind => {
                let Some(bp) = binary_binding_power(kind) else { break };
                if bp <= min_bp {
                    break;
                }

                let m = lhs.precede(p);
                operation_reference(p);
                // The elvis operator chains to the right.
                let _ = binary_expr(p, if kind == ELVIS { bp - 1 } else { bp });
                lhs = m.complete(p, BINARY_EXPR);
            }
        }
    }

    Some(lhs)
}

fn unary_expr(p: &mut Parser) -> Option<CompletedMarker> {
    match p.peek_kind() {
        EXCL | MINUS | PLUS => {
            let m = p.start();
            operation_reference(p);
            let _ = unary_expr(p);
            Some(m.complete(p, PREFIX_EXPR))
        }
        _ => postfix_expr(p),
    }
}

fn postfix_expr(p: &mut Parser) -> Option<CompletedMarker> {
    let mut lhs = primary_expr(p)?;

    loop {
        lhs = match p.peek_kind() {
            DOT => qualified(p, lhs, DOT_EXPR),
            SAFE_ACCESS => qualified(p, lhs, SAFE_ACCESS_EXPR),
            COLONCOLON => {
                let m = lhs.precede(p);
                p.advance();
                if p.at(NAME) {
                    let reference = p.start();
                    p.advance();
                    reference.complete(p, REFERENCE_EXPR);
                } else {
                    p.error("expected a callable name");
                }
                m.complete(p, CALLABLE_REF_EXPR)
            }
            LEFT_PAREN => {
                let m = lhs.precede(p);
                value_arg_list(p);
                m.complete(p, CALL_EXPR)
            }
            LEFT_BRACKET => {
                let m = lhs.precede(p);
                indices(p);
                m.complete(p, ARRAY_ACCESS_EXPR)
            }
            LEFT_BRACE if p.trailing_lambda_allowed() => {
                let m = lhs.precede(p);
                lambda_expr(p);
                m.complete(p, CALL_EXPR)
            }
            _ => break,
        };
    }

    Some(lhs)
}

fn qualified(p: &mut Parser, lhs: CompletedMarker, kind: SyntaxKind) -> CompletedMarker {
    let m = lhs.precede(p);
    p.advance();
    selector_expr(p);
    m.complete(p, kind)
}

/// The element after `.` or `?.`: a name, optionally called.
fn selector_expr(p: &mut Parser) {
    if !matches!(p.peek_kind(), NAME | FIELD_KW) {
        p.error("expected a selector");
        return;
    }

    let reference = p.start();
    p.advance();
    let selector = reference.complete(p, REFERENCE_EXPR);

    match p.peek_kind() {
        LEFT_PAREN => {
            let call = selector.precede(p);
            value_arg_list(p);
            call.complete(p, CALL_EXPR);
        }
        LEFT_BRACE => {
            let call = selector.precede(p);
            lambda_expr(p);
            call.complete(p, CALL_EXPR);
        }
        _ => {}
    }
}

pub(crate) fn value_arg_list(p: &mut Parser) {
    let m = p.start();
    p.advance();

    while !p.at(RIGHT_PAREN) && !p.at(EOF) {
        if p.at(COMMA) {
            let unexpected = p.start();
            p.error("unexpected `,`");
            p.advance();
            unexpected.complete(p, ERROR);
            continue;
        }
        value_arg(p);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(RIGHT_PAREN);

    m.complete(p, VALUE_ARG_LIST);
}

fn value_arg(p: &mut Parser) {
    let m = p.start();

    if p.at(NAME) && p.nth_kind(1) == EQ {
        let arg_name = p.start();
        let reference = p.start();
        p.advance();
        reference.complete(p, REFERENCE_EXPR);
        arg_name.complete(p, VALUE_ARG_NAME);
        p.advance();
    }
    // Spread of a collection argument.
    let _ = p.eat(STAR);
    let _ = expr(p);

    m.complete(p, VALUE_ARG);
}

fn indices(p: &mut Parser) {
    let m = p.start();
    p.advance();

    let _ = expr(p);
    while p.eat(COMMA) {
        let _ = expr(p);
    }
    p.expect(RIGHT_BRACKET);

    m.complete(p, INDICES);
}

fn lambda_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if at_lambda_params(p) {
        lambda_param_list(p);
        p.expect(ARROW);
    }
    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        stmt(p);
    }
    p.expect(RIGHT_BRACE);

    m.complete(p, LAMBDA_EXPR)
}

fn at_lambda_params(p: &Parser) -> bool {
    let mut n = 0;
    loop {
        if p.nth_kind(n) != NAME {
            return false;
        }
        n += 1;
        if p.nth_kind(n) == COLON {
            n += 1;
            if p.nth_kind(n) != NAME {
                return false;
            }
            n += 1;
            while p.nth_kind(n) == QUEST {
                n += 1;
            }
        }
        match p.nth_kind(n) {
            COMMA => n += 1,
            ARROW => return true,
            _ => return false,
        }
    }
}

fn lambda_param_list(p: &mut Parser) {
    let m = p.start();
    loop {
        let param = p.start();
        p.advance();
        if p.eat(COLON) {
            types::type_ref(p);
        }
        param.complete(p, VALUE_PARAM);
        if !p.eat(COMMA) {
            break;
        }
    }
    m.complete(p, VALUE_PARAM_LIST);
}

fn if_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.advance();

    p.expect(LEFT_PAREN);
    let _ = expr(p);
    p.expect(RIGHT_PAREN);
    control_body(p);
    if p.eat(ELSE_KW) {
        control_body(p);
    }

    m.complete(p, IF_EXPR)
}

fn control_body(p: &mut Parser) {
    if p.at(LEFT_BRACE) {
        block(p);
    } else {
        let _ = expr(p);
    }
}

fn when_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if p.eat(LEFT_PAREN) {
        let _ = expr(p);
        p.expect(RIGHT_PAREN);
    }
    p.expect(LEFT_BRACE);
    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        when_entry(p);
    }
    p.expect(RIGHT_BRACE);

    m.complete(p, WHEN_EXPR)
}

fn when_entry(p: &mut Parser) {
    let m = p.start();

    if !p.eat(ELSE_KW) {
        loop {
            if p.at(IN_KW) {
                let condition = p.start();
                operation_reference(p);
                let _ = expr(p);
                condition.complete(p, WHEN_CONDITION_IN_RANGE);
            } else {
                let _ = expr(p);
            }
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    p.expect(ARROW);
    control_body(p);
    while p.eat(SEMICOLON) {}

    m.complete(p, WHEN_ENTRY);
}

fn return_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if p.at(AT) && p.nth_kind(1) == NAME {
        let label = p.start();
        p.advance();
        p.advance();
        label.complete(p, LABEL_QUALIFIER);
    }
    if p.at_set(&EXPR_FIRST) {
        let _ = expr(p);
    }

    m.complete(p, RETURN_EXPR)
}

fn labeled_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();

    let label = p.start();
    p.advance();
    p.advance();
    label.complete(p, LABEL_QUALIFIER);
    let _ = expr(p);

    m.complete(p, LABELED_EXPR)
}

fn annotated_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    items::annotation_entry(p);
    let _ = expr(p);
    m.complete(p, ANNOTATED_EXPR)
}

fn primary_expr(p: &mut Parser) -> Option<CompletedMarker> {
    match p.peek_kind() {
        INT_NUMBER | CHAR_LITERAL | STRING => {
            let m = p.start();
            p.advance();
            Some(m.complete(p, LITERAL))
        }
        NAME if p.nth_kind(1) == AT => Some(labeled_expr(p)),
        NAME | THIS_KW | SUPER_KW | FIELD_KW => {
            let m = p.start();
            p.advance();
            Some(m.complete(p, REFERENCE_EXPR))
        }
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            if !p.at(RIGHT_PAREN) {
                let _ = expr(p);
            }
            p.expect(RIGHT_PAREN);
            Some(m.complete(p, PAREN_EXPR))
        }
        LEFT_BRACE => Some(lambda_expr(p)),
        IF_KW => Some(if_expr(p)),
        WHEN_KW => Some(when_expr(p)),
        RETURN_KW => Some(return_expr(p)),
        OBJECT_KW => Some(items::object_literal(p)),
        AT => Some(annotated_expr(p)),
        _ => {
            p.error_and_bump("expected an expression");
            None
        }
    }
}
