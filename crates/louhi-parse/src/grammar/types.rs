use louhi_syntax::SyntaxKind::*;

use crate::parser::Parser;

pub(crate) fn type_ref(p: &mut Parser) {
    let m = p.start();
    type_element(p);
    m.complete(p, TYPE_REFERENCE);
}

fn type_element(p: &mut Parser) {
    if !p.at(NAME) {
        p.error("expected a type");
        return;
    }

    let m = p.start();
    loop {
        let reference = p.start();
        p.advance();
        reference.complete(p, REFERENCE_EXPR);
        if p.at(DOT) && p.nth_kind(1) == NAME {
            p.advance();
        } else {
            break;
        }
    }
    let mut element = m.complete(p, USER_TYPE);

    while p.at(QUEST) {
        let nullable = element.precede(p);
        p.advance();
        element = nullable.complete(p, NULLABLE_TYPE);
    }
}
