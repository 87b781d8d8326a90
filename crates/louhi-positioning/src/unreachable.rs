//! The unreachable-code strategy: the one strategy that consumes a
//! structured payload instead of just the anchor node.

use louhi_syntax::{NodeView, SyntaxKind, SyntaxNodePtr};
use rustc_hash::FxHashSet;
use text_size::TextRange;

use crate::ranges::{mark_element, merge_adjacent};

/// Control-flow facts attached to an unreachable-code diagnostic.
///
/// Nodes are referenced by [`SyntaxNodePtr`] so the payload is valid for
/// either tree backend parsed from the same text.
#[derive(Clone, Debug, Default)]
pub struct UnreachablePayload {
    pub reachable: FxHashSet<SyntaxNodePtr>,
    pub unreachable: FxHashSet<SyntaxNodePtr>,
}

impl UnreachablePayload {
    pub fn new(
        reachable: impl IntoIterator<Item = SyntaxNodePtr>,
        unreachable: impl IntoIterator<Item = SyntaxNodePtr>,
    ) -> Self {
        Self {
            reachable: reachable.into_iter().collect(),
            unreachable: unreachable.into_iter().collect(),
        }
    }
}

/// Marks the unreachable parts under `node`: the largest wholly-unreachable
/// subtrees plus stray leaves between them, with punctuation that merely
/// neighbors reachable code dropped, merged into maximal spans.
///
/// Returns `None` when there is nothing meaningful to mark; the caller then
/// falls back to the default strategy.
pub(crate) fn mark_unreachable<V: NodeView>(
    node: V,
    payload: &UnreachablePayload,
) -> Option<Vec<TextRange>> {
    if !has_in_set(node, &payload.reachable) {
        return None;
    }

    let mut collected = Vec::new();
    collect(node, payload, &mut collected);
    let marked: Vec<V> = collected
        .into_iter()
        .filter(|element| !is_meaningless_next_to_reachable(*element, payload))
        .collect();

    if marked.is_empty() {
        return None;
    }

    Some(merge_adjacent(marked.into_iter().flat_map(mark_element).collect()))
}

fn collect<V: NodeView>(node: V, payload: &UnreachablePayload, out: &mut Vec<V>) {
    for child in node.children() {
        if payload.unreachable.contains(&child.ptr()) {
            out.push(child);
            continue;
        }

        let fully_reachable =
            payload.reachable.contains(&child.ptr()) && !has_in_set(child, &payload.unreachable);
        if fully_reachable {
            continue;
        }

        if child.is_leaf() {
            out.push(child);
        } else {
            collect(child, payload, out);
        }
    }
}

/// Whether any strict descendant of `node` is in `set`.
fn has_in_set<V: NodeView>(node: V, set: &FxHashSet<SyntaxNodePtr>) -> bool {
    node.children().any(|child| set.contains(&child.ptr()) || has_in_set(child, set))
}

/// Punctuation does not count as unreachable content when it sits next to
/// reachable code; marking it would only produce noise around the real
/// ranges.
fn is_meaningless_next_to_reachable<V: NodeView>(element: V, payload: &UnreachablePayload) -> bool {
    let kind = element.kind();
    let meaningless = SyntaxKind::PUNCTUATION.contains(kind) || kind.is_trivia();
    if !meaningless {
        return false;
    }

    let Some(parent) = element.parent() else {
        return true;
    };
    parent.children().any(|sibling| payload.reachable.contains(&sibling.ptr()))
}
