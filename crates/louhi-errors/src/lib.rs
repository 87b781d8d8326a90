use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// A rendered-facing diagnostic: a message plus the text ranges to mark.
///
/// The first range is the primary one; the rest are secondary marks produced
/// by multi-range positioning (commas, unreachable code).
#[salsa::accumulator]
pub struct Diagnostic {
    message: String,
    severity: Severity,
    ranges: Vec<TextRange>,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn ranges(&self) -> &[TextRange] {
        &self.ranges
    }

    pub fn range(&self) -> TextRange {
        self.ranges.first().copied().unwrap_or_else(|| TextRange::empty(0.into()))
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), severity: Severity::Error, ranges: vec![range] }
    }

    pub fn warning(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), severity: Severity::Warning, ranges: vec![range] }
    }

    pub fn new(severity: Severity, message: impl Into<String>, ranges: Vec<TextRange>) -> Self {
        Self { message: message.into(), severity, ranges }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = match self.severity {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
        };
        let mut snippet = Snippet::source(text).origin(path).fold(true);
        for (index, range) in self.ranges.iter().enumerate() {
            let label = if index == 0 { "here" } else { "and here" };
            snippet = snippet.annotation(level.span((*range).into()).label(label));
        }
        renderer.render(level.title(&self.message).snippet(snippet))
    }
}
