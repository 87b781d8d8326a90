//! Range construction and merging.

use louhi_syntax::NodeView;
use text_size::TextRange;

pub(crate) fn mark_element<V: NodeView>(element: V) -> Vec<TextRange> {
    vec![element.range()]
}

/// Span from the start of `from` to the end of `to`. Endpoints out of order
/// (possible on error-recovery trees) are reordered instead of panicking.
pub(crate) fn mark_range<V: NodeView>(from: V, to: V) -> Vec<TextRange> {
    vec![range_between(from.range(), to.range())]
}

pub(crate) fn range_between(from: TextRange, to: TextRange) -> TextRange {
    let start = from.start();
    let end = to.end();
    if start <= end { TextRange::new(start, end) } else { TextRange::new(end, start) }
}

/// Merges overlapping and touching ranges into maximal spans. Sorted,
/// disjoint input comes back unchanged.
pub(crate) fn merge_adjacent(mut ranges: Vec<TextRange>) -> Vec<TextRange> {
    ranges.sort_by_key(|range| (range.start(), range.end()));

    let mut merged: Vec<TextRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start() <= last.end() => {
                *last = TextRange::new(last.start(), last.end().max(range.end()));
            }
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn merge_joins_touching_and_overlapping() {
        let merged = merge_adjacent(vec![range(0, 3), range(3, 5), range(7, 9), range(8, 12)]);
        assert_eq!(merged, vec![range(0, 5), range(7, 12)]);
    }

    #[test]
    fn merge_sorts_first() {
        let merged = merge_adjacent(vec![range(7, 9), range(0, 3)]);
        assert_eq!(merged, vec![range(0, 3), range(7, 9)]);
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merge_adjacent(vec![range(0, 2), range(4, 6), range(9, 10)]);
        let twice = merge_adjacent(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_keeps_contained_ranges_folded() {
        let merged = merge_adjacent(vec![range(0, 10), range(2, 4)]);
        assert_eq!(merged, vec![range(0, 10)]);
    }
}
