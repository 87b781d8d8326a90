//! Parse errors accumulated through the tracked parse query, with positions
//! a renderer can map back to lines.

use louhi_errors::{Diagnostic, Severity};
use louhi_inputs::File;
use louhi_parse::parse_file;

#[test]
fn broken_input_accumulates_positioned_diagnostics() {
    let db = salsa::DatabaseImpl::new();
    let fixture = "val = 1";
    let file = File::new(&db, "broken.lh".into(), fixture.to_owned());

    let diagnostics = parse_file::accumulated::<Diagnostic>(&db, file);
    assert!(!diagnostics.is_empty());

    let line_index = file.line_index(&db);
    let mut messages = Vec::new();
    for diagnostic in &diagnostics {
        assert_eq!(diagnostic.severity(), Severity::Error);
        let position = line_index.line_col(diagnostic.range().start());
        assert_eq!(position.line, 0, "all errors in this fixture are on the first line");
        messages.push(diagnostic.message().to_owned());
    }
    assert!(
        messages.iter().any(|message| message == "expected a property name"),
        "{messages:?}",
    );
}

#[test]
fn unclosed_parameter_list_points_at_the_end_of_input() {
    let db = salsa::DatabaseImpl::new();
    let fixture = "fun f(";
    let file = File::new(&db, "unclosed.lh".into(), fixture.to_owned());

    let diagnostics = parse_file::accumulated::<Diagnostic>(&db, file);
    assert!(!diagnostics.is_empty());
    for diagnostic in &diagnostics {
        assert!(usize::from(diagnostic.range().end()) <= fixture.len());
    }
}

#[test]
fn well_formed_input_accumulates_nothing() {
    let db = salsa::DatabaseImpl::new();
    let file = File::new(
        &db,
        "clean.lh".into(),
        "abstract class Foo { fun bar() { } }".to_owned(),
    );

    let diagnostics = parse_file::accumulated::<Diagnostic>(&db, file);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.len());
}
