//! Structure lookups shared by the strategies, written once against
//! [`NodeView`]. All of them are total: a miss is `None`, never a panic.

use louhi_syntax::SyntaxKind::*;
use louhi_syntax::{NodeView, SyntaxKind, SyntaxSet};

pub(crate) fn child_of_kind<V: NodeView>(node: V, kind: SyntaxKind) -> Option<V> {
    node.children().find(|child| child.kind() == kind)
}

pub(crate) fn last_child_of_kind<V: NodeView>(node: V, kind: SyntaxKind) -> Option<V> {
    let mut result = None;
    for child in node.children() {
        if child.kind() == kind {
            result = Some(child);
        }
    }
    result
}

pub(crate) fn child_in_set<V: NodeView>(node: V, set: &SyntaxSet) -> Option<V> {
    node.children().find(|child| set.contains(child.kind()))
}

pub(crate) fn last_child<V: NodeView>(node: V) -> Option<V> {
    node.children().last()
}

/// Depth-first search for `kind`, direct children first. Local functions and
/// lambdas are opaque when `follow_functions` is off.
pub(crate) fn find_descendant<V: NodeView>(
    node: V,
    kind: SyntaxKind,
    follow_functions: bool,
) -> Option<V> {
    child_of_kind(node, kind).or_else(|| {
        node.children().find_map(|child| {
            if !follow_functions && matches!(child.kind(), FUN | LAMBDA_EXPR) {
                return None;
            }
            find_descendant(child, kind, follow_functions)
        })
    })
}

pub(crate) fn find_descendant_in_set<V: NodeView>(node: V, set: &SyntaxSet) -> Option<V> {
    child_in_set(node, set)
        .or_else(|| node.children().find_map(|child| find_descendant_in_set(child, set)))
}

pub(crate) fn find_first_descendant<V, F>(node: V, predicate: F) -> Option<V>
where
    V: NodeView,
    F: Fn(V) -> bool + Copy,
{
    node.children()
        .find(|child| predicate(*child))
        .or_else(|| node.children().find_map(|child| find_first_descendant(child, predicate)))
}

pub(crate) fn find_last_descendant<V, F>(node: V, predicate: F) -> Option<V>
where
    V: NodeView,
    F: Fn(V) -> bool + Copy,
{
    let children: Vec<V> = node.children().collect();
    children.iter().rev().copied().find(|child| predicate(*child)).or_else(|| {
        children.iter().rev().copied().find_map(|child| find_last_descendant(child, predicate))
    })
}

pub(crate) fn collect_descendants_of_kind<V: NodeView>(node: V, kind: SyntaxKind, out: &mut Vec<V>) {
    for child in node.children() {
        if child.kind() == kind {
            out.push(child);
        }
        collect_descendants_of_kind(child, kind, out);
    }
}

pub(crate) fn has_error_descendant<V: NodeView>(node: V) -> bool {
    node.children().any(|child| child.kind() == ERROR || has_error_descendant(child))
}

pub(crate) fn find_parent_of_kind<V: NodeView>(node: V, kind: SyntaxKind) -> Option<V> {
    let mut parent = node.parent();
    while let Some(candidate) = parent {
        if candidate.kind() == kind {
            return Some(candidate);
        }
        parent = candidate.parent();
    }
    None
}

pub(crate) fn name_token<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, NAME)
}

pub(crate) fn modifier_list<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, MODIFIER_LIST)
}

pub(crate) fn modifier_in<V: NodeView>(node: V, set: &SyntaxSet) -> Option<V> {
    modifier_list(node).and_then(|list| child_in_set(list, set))
}

pub(crate) fn modifier_of_kind<V: NodeView>(node: V, kind: SyntaxKind) -> Option<V> {
    modifier_list(node).and_then(|list| child_of_kind(list, kind))
}

pub(crate) fn val_or_var_keyword<V: NodeView>(node: V) -> Option<V> {
    child_in_set(node, &SyntaxKind::VAL_VAR)
}

pub(crate) fn constructor_keyword<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, CONSTRUCTOR_KW)
}

pub(crate) fn object_keyword<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, OBJECT_KW)
}

pub(crate) fn operation_reference<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, OPERATION_REFERENCE)
}

pub(crate) fn value_param_list<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, VALUE_PARAM_LIST)
}

pub(crate) fn type_param_list<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, TYPE_PARAM_LIST)
}

pub(crate) fn supertypes_list<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, SUPER_TYPE_LIST)
}

pub(crate) fn primary_constructor<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, PRIMARY_CONSTRUCTOR)
}

/// The declared (return or ascribed) type: the first type reference after the
/// colon, so a receiver type is never picked up.
pub(crate) fn type_reference<V: NodeView>(node: V) -> Option<V> {
    node.children()
        .skip_while(|child| child.kind() != COLON)
        .find(|child| child.kind() == TYPE_REFERENCE)
}

pub(crate) fn receiver_type_reference<V: NodeView>(node: V) -> Option<V> {
    for child in node.children() {
        match child.kind() {
            COLON | LEFT_PAREN | VALUE_PARAM_LIST => return None,
            TYPE_REFERENCE => return Some(child),
            _ => {}
        }
    }
    None
}

/// `get`/`set` keyword standing in for an accessor's missing name.
pub(crate) fn accessor_name_placeholder<V: NodeView>(node: V) -> Option<V> {
    child_of_kind(node, GET_KW).or_else(|| child_of_kind(node, SET_KW))
}

pub(crate) fn getter<V: NodeView>(node: V) -> Option<V> {
    node.children().find(|child| {
        child.kind() == PROPERTY_ACCESSOR && child_of_kind(*child, GET_KW).is_some()
    })
}

pub(crate) fn setter<V: NodeView>(node: V) -> Option<V> {
    node.children().find(|child| {
        child.kind() == PROPERTY_ACCESSOR && child_of_kind(*child, SET_KW).is_some()
    })
}

/// The initializer expression following `=`, if any.
pub(crate) fn default_value<V: NodeView>(node: V) -> Option<V> {
    let mut children = node.children().skip_while(|child| child.kind() != EQ);
    children.next()?;
    children.next()
}

/// The selector of a qualified access: the first expression after the
/// `.`/`?.`/`::` token.
pub(crate) fn selector<V: NodeView>(node: V) -> Option<V> {
    let mut separator_found = false;
    for child in node.children() {
        match child.kind() {
            DOT | SAFE_ACCESS | COLONCOLON => separator_found = true,
            kind if separator_found && kind.is_expression() => return Some(child),
            _ => {}
        }
    }
    None
}

pub(crate) fn first_child_expression<V: NodeView>(node: V) -> Option<V> {
    node.children().find(|child| child.kind().is_expression())
}

pub(crate) fn last_child_expression<V: NodeView>(node: V) -> Option<V> {
    let mut result = None;
    for child in node.children() {
        if child.kind().is_expression() {
            result = Some(child);
        }
    }
    result
}

pub(crate) fn find_expression_deep<V: NodeView>(node: V) -> Option<V> {
    find_first_descendant(node, |child| child.kind().is_expression())
}

/// Strips parenthesized, labeled, and annotated wrappers down to the wrapped
/// expression.
pub(crate) fn unwrap_parens_labels_and_annotations<V: NodeView>(node: V) -> V {
    let mut unwrapped = node;
    loop {
        let inner = match unwrapped.kind() {
            PAREN_EXPR | ANNOTATED_EXPR => first_child_expression(unwrapped),
            LABELED_EXPR => last_child_expression(unwrapped),
            _ => return unwrapped,
        };
        match inner {
            Some(inner) => unwrapped = inner,
            None => return unwrapped,
        }
    }
}

/// The callee of a call. With `locate_referenced_name`, nested parentheses
/// are peeled so that in `(super)()` only `super` is marked.
pub(crate) fn reference_expression<V: NodeView>(node: V, locate_referenced_name: bool) -> Option<V> {
    let mut result = first_child_expression(node)?;
    while locate_referenced_name && result.kind() == PAREN_EXPR {
        match first_child_expression(result) {
            Some(inner) => result = inner,
            None => break,
        }
    }
    Some(result)
}

/// The name part of a type element: `Foo` in `Foo`, `Foo?`, `Foo??`.
pub(crate) fn referenced_type_expression<V: NodeView>(node: V) -> Option<V> {
    match node.kind() {
        USER_TYPE => child_of_kind(node, REFERENCE_EXPR),
        NULLABLE_TYPE => child_in_set(node, &SyntaxKind::TYPE_ELEMENTS)
            .and_then(referenced_type_expression),
        _ => None,
    }
}

/// First leaf of the declaration, skipping annotations: where the
/// "start-to-name" range begins.
pub(crate) fn first_meaningful_leaf<V: NodeView>(node: V) -> Option<V> {
    if node.is_leaf() {
        return Some(node);
    }
    for child in node.children() {
        if child.kind() == ANNOTATION_ENTRY {
            continue;
        }
        if let Some(leaf) = first_meaningful_leaf(child) {
            return Some(leaf);
        }
    }
    None
}
