//! The two tree backends must be indistinguishable through the navigation
//! contract: for every source, every node, and every strategy, the computed
//! ranges have to be byte-identical. Divergence here means a bug in one of
//! the adapters, not something to paper over at runtime.

use louhi_inputs::File;
use louhi_positioning::PositioningStrategy;
use louhi_syntax::{NodeOrToken, NodeView, RedRef};

const SOURCES: &[&str] = &[
    "abstract class Foo",
    "class Foo : Bar by baz { }",
    "val x = 1, y = 2",
    "fun f() { foo(1, 2,) }",
    "fun f() { a?.b() }",
    "import a.b as c",
    "package a.b\nval x: T?? = other",
    "class A { companion object { } constructor(x: Int) : this() { } init { } }",
    "fun f() { when (x) { in r -> 1; else -> 2 } }",
    "fun f() { x += 1; y = a.b; return@f 2 }",
    "val o = object : Foo { fun g() { } }",
    "fun g(vararg xs: Int, f: Int = 3) { g(*xs) }",
    "fun h() { l@ if (a) b }",
    "@Ann(1) class B { @field:Ann val y = 2 }",
    "fun i() { val c = 'x'; val n = 42L }",
    "class G<in T, out U, reified V> { }",
    "fun l() { (super)() }",
    "fun Foo.ext() { }",
];

type Row = (String, String, Vec<(u32, u32)>);

fn sweep<V: NodeView>(element: V, out: &mut Vec<Row>) {
    for &strategy in PositioningStrategy::ALL {
        let ranges = strategy
            .mark(element)
            .into_iter()
            .map(|range| (range.start().into(), range.end().into()))
            .collect();
        out.push((strategy.name().to_owned(), format!("{:?}", element.kind()), ranges));
    }
    for child in element.children() {
        sweep(child, out);
    }
}

fn flat_rows(text: &str) -> Vec<Row> {
    let (tree, errors) = louhi_parse::parse(text);
    assert!(errors.is_empty(), "unexpected errors in {text:?}: {errors:?}");
    let mut rows = Vec::new();
    sweep(NodeOrToken::Node(tree.root()), &mut rows);
    rows
}

#[salsa::tracked]
fn red_rows(db: &dyn salsa::Database, file: File) -> Vec<Row> {
    let root = louhi_parse::parse_file(db, file);
    let mut rows = Vec::new();
    sweep(RedRef::new(db, NodeOrToken::Node(root)), &mut rows);
    rows
}

#[test]
fn backends_agree_on_every_strategy_and_node() {
    let db = salsa::DatabaseImpl::new();

    for (index, text) in SOURCES.iter().enumerate() {
        let file = File::new(&db, format!("case{index}.lh").into(), (*text).to_owned());
        let red = red_rows(&db, file);
        let flat = flat_rows(text);
        assert_eq!(red, flat, "backend divergence for {text:?}");
    }
}

#[test]
fn red_marks_reach_the_renderer_as_in_bounds_diagnostics() {
    let db = salsa::DatabaseImpl::new();
    let text = "abstract class Foo";
    let file = File::new(&db, "render.lh".into(), text.to_owned());

    let rows = red_rows(&db, file);
    let (_, _, ranges) = rows
        .iter()
        .find(|(name, kind, _)| name == "abstract_modifier" && kind == "CLASS")
        .expect("the class row is present");
    assert_eq!(ranges, &vec![(0, 8)]);

    let diagnostic = louhi_errors::Diagnostic::new(
        louhi_errors::Severity::Error,
        "abstract is not allowed here",
        ranges.iter().map(|&(start, end)| louhi_errors::TextRange::new(start.into(), end.into())).collect(),
    );
    let rendered = diagnostic
        .render(&louhi_errors::Renderer::plain(), "render.lh", text)
        .to_string();
    assert!(rendered.contains("abstract is not allowed here"), "{rendered}");
}
