//! End-to-end checks of the strategy catalog over parsed sources: the
//! canonical marking scenarios plus the engine-wide guarantees (determinism,
//! totality, in-bounds results).

use louhi_parse::parse;
use louhi_positioning::{PositionedDiagnostic, PositioningStrategy, UnreachablePayload};
use louhi_syntax::{NodeOrToken, NodeView, SyntaxElement, SyntaxKind, SyntaxTree};
use text_size::TextRange;

fn find<'t>(tree: &'t SyntaxTree, kind: SyntaxKind) -> SyntaxElement<'t> {
    fn go<'t>(element: SyntaxElement<'t>, kind: SyntaxKind) -> Option<SyntaxElement<'t>> {
        if NodeView::kind(element) == kind {
            return Some(element);
        }
        element.children().find_map(|child| go(child, kind))
    }
    go(NodeOrToken::Node(tree.root()), kind).unwrap_or_else(|| panic!("no {kind:?} in the tree"))
}

fn collect<'t>(tree: &'t SyntaxTree, kind: SyntaxKind) -> Vec<SyntaxElement<'t>> {
    fn go<'t>(element: SyntaxElement<'t>, kind: SyntaxKind, out: &mut Vec<SyntaxElement<'t>>) {
        if NodeView::kind(element) == kind {
            out.push(element);
        }
        for child in element.children() {
            go(child, kind, out);
        }
    }
    let mut out = Vec::new();
    go(NodeOrToken::Node(tree.root()), kind, &mut out);
    out
}

#[track_caller]
fn checked_parse(text: &str) -> SyntaxTree {
    let (tree, errors) = parse(text);
    assert!(errors.is_empty(), "unexpected errors in {text:?}: {errors:?}");
    tree
}

#[test]
fn abstract_modifier_marks_exactly_the_keyword() {
    let text = "abstract class Foo";
    let tree = checked_parse(text);
    let class = find(&tree, SyntaxKind::CLASS);

    let ranges = PositioningStrategy::AbstractModifier.mark(class);
    assert_eq!(ranges, vec![TextRange::new(0.into(), 8.into())]);
    assert_eq!(&text[ranges[0]], "abstract");
}

#[test]
fn commas_marks_each_comma_of_a_multi_declarator_property() {
    let text = "val x = 1, y = 2";
    let tree = checked_parse(text);
    let property = find(&tree, SyntaxKind::PROPERTY);

    let ranges = PositioningStrategy::Commas.mark(property);
    assert_eq!(ranges, vec![TextRange::new(9.into(), 10.into())]);
    assert_eq!(&text[ranges[0]], ",");
}

#[test]
fn value_arguments_spans_last_argument_to_closing_parenthesis() {
    let text = "fun f() { foo(1, 2,) }";
    let tree = checked_parse(text);
    let call = find(&tree, SyntaxKind::CALL_EXPR);

    let ranges = PositioningStrategy::ValueArguments.mark(call);
    assert_eq!(ranges.len(), 1);
    assert_eq!(&text[ranges[0]], "2,)");
}

#[test]
fn selector_by_qualified_excludes_the_receiver() {
    let text = "fun f() { a?.b() }";
    let tree = checked_parse(text);
    let qualified = find(&tree, SyntaxKind::SAFE_ACCESS_EXPR);

    let ranges = PositioningStrategy::SelectorByQualified.mark(qualified);
    assert_eq!(ranges.len(), 1);
    assert_eq!(&text[ranges[0]], "b()");
}

#[test]
fn declaration_name_falls_back_past_the_absent_modifier_search() {
    let text = "class Foo";
    let tree = checked_parse(text);
    let class = find(&tree, SyntaxKind::CLASS);

    let ranges = PositioningStrategy::DeclarationName.mark(class);
    assert_eq!(ranges.len(), 1);
    assert_eq!(&text[ranges[0]], "Foo");
}

#[test]
fn commas_cardinality_matches_the_comma_count() {
    let text = "fun f() { g(1, 2, 3, 4) }";
    let tree = checked_parse(text);
    let arguments = find(&tree, SyntaxKind::VALUE_ARG_LIST);

    let ranges = PositioningStrategy::Commas.mark(arguments);
    assert_eq!(ranges.len(), 3);
    for range in &ranges {
        assert_eq!(range.len(), 1.into());
        assert_eq!(&text[*range], ",");
    }
}

const CORPUS: &[&str] = &[
    "abstract class Foo",
    "class Foo : Bar by baz { }",
    "val x = 1, y = 2",
    "fun f() { foo(1, 2,) }",
    "fun f() { a?.b() }",
    "import a.b as c",
    "package a.b\nval x: T?? = other",
    "class A { companion object { } constructor(x: Int) : this() { } init { } }",
    "fun f() { if (a) b else { c() } }",
    "fun f() { when (x) { in r -> 1; else -> 2 } }",
    "fun f() { x += 1; y = a.b; return@f 2 }",
    "val o = object : Foo { fun g() { } }",
    "private lateinit var name: String",
    "fun g(vararg xs: Int, f: Int = 3) { g(*xs) }",
    "val p by lazy { 1 }",
    "fun h() { l@ if (a) b }",
    "@Ann(1) class B { @field:Ann val y = 2 }",
    "fun i() { val c = 'x'; val n = 42L; val s = \"hi\" }",
    "fun j(x: Int): Int = x + 1",
    "class G<in T, out U, reified V> { }",
    "fun k() { arr[1, 2] = 3 }",
    "fun l() { (super)() }",
    "fun Foo.ext() { }",
    "enum class Color { }",
    "fun f() { a::b }",
    "sealed class S<T>(val seed: T) : Base(), Marker { }",
];

/// Every strategy on every element of every corpus file: never panics, never
/// returns an empty list, never leaves the file.
#[test]
fn fallback_totality_over_the_corpus() {
    fn sweep(element: SyntaxElement<'_>, text: &str) {
        for &strategy in PositioningStrategy::ALL {
            let ranges = strategy.mark(element);
            assert!(
                !ranges.is_empty(),
                "{} produced no ranges for {:?} in {text:?}",
                strategy.name(),
                NodeView::kind(element),
            );
            for range in ranges {
                assert!(
                    usize::from(range.end()) <= text.len(),
                    "{} escaped the file for {:?} in {text:?}",
                    strategy.name(),
                    NodeView::kind(element),
                );
            }
        }
        for child in element.children() {
            sweep(child, text);
        }
    }

    for text in CORPUS {
        let tree = checked_parse(text);
        sweep(NodeOrToken::Node(tree.root()), text);
    }
}

#[test]
fn marking_is_deterministic() {
    for text in CORPUS {
        let tree = checked_parse(text);
        fn sweep(element: SyntaxElement<'_>) {
            for &strategy in PositioningStrategy::ALL {
                assert_eq!(strategy.mark(element), strategy.mark(element));
            }
            for child in element.children() {
                sweep(child);
            }
        }
        sweep(NodeOrToken::Node(tree.root()));
    }
}

#[test]
fn single_token_strategies_stay_inside_their_anchor() {
    let text = "abstract class Foo { fun f() { } }";
    let tree = checked_parse(text);
    let class = find(&tree, SyntaxKind::CLASS);
    let anchor = NodeView::range(class);

    for strategy in [
        PositioningStrategy::AbstractModifier,
        PositioningStrategy::DeclarationName,
        PositioningStrategy::DeclarationWithBody,
        PositioningStrategy::SupertypesList,
        PositioningStrategy::Default,
    ] {
        for range in strategy.mark(class) {
            assert!(
                anchor.contains_range(range),
                "{} escaped the anchor: {range:?} vs {anchor:?}",
                strategy.name(),
            );
        }
    }
}

#[test]
fn unreachable_code_marks_merged_spans_after_a_return() {
    let text = "fun f() { return; val a = 1; val b = 2 }";
    let tree = checked_parse(text);
    let block = find(&tree, SyntaxKind::BLOCK);

    let reachable = [NodeView::ptr(find(&tree, SyntaxKind::RETURN_EXPR))];
    let unreachable: Vec<_> =
        collect(&tree, SyntaxKind::PROPERTY).into_iter().map(NodeView::ptr).collect();

    let diagnostic = PositionedDiagnostic::with_payload(
        block,
        PositioningStrategy::UnreachableCode,
        UnreachablePayload::new(reachable, unreachable),
    );

    let marked: Vec<&str> = diagnostic.mark().into_iter().map(|range| &text[range]).collect();
    assert_eq!(marked, vec!["val a = 1;", "val b = 2"]);
}

#[test]
fn unreachable_code_without_reachable_children_marks_the_anchor() {
    let text = "fun f() { val a = 1 }";
    let tree = checked_parse(text);
    let block = find(&tree, SyntaxKind::BLOCK);

    let diagnostic = PositionedDiagnostic::with_payload(
        block,
        PositioningStrategy::UnreachableCode,
        UnreachablePayload::default(),
    );

    let ranges = diagnostic.mark();
    assert_eq!(ranges, vec![NodeView::range(block)]);
}

#[test]
fn strategies_resolve_by_stable_name() {
    for &strategy in PositioningStrategy::ALL {
        assert_eq!(PositioningStrategy::from_name(strategy.name()), Some(strategy));
    }
    assert_eq!(PositioningStrategy::from_name("nonsense"), None);
}

#[test]
fn invalid_diagnostics_are_detectable_before_marking() {
    let text = "val x = 1";
    let tree = checked_parse(text);
    let property = find(&tree, SyntaxKind::PROPERTY);

    let delegate = PositionedDiagnostic::new(property, PositioningStrategy::PropertyDelegate);
    assert!(!delegate.is_valid());
    // Even an invalid diagnostic still marks something sensible.
    assert!(!delegate.mark().is_empty());

    let name = PositionedDiagnostic::new(property, PositioningStrategy::DeclarationName);
    assert!(name.is_valid());
    assert_eq!(&text[name.mark()[0]], "x");
}
