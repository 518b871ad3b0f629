//! Blame rendering for terminal output.
//!
//! Adapts [`Blame`](quill_syntax::blame::Blame) records to miette diagnostics
//! so the CLI can show the offending source line with an underline. Severity
//! maps directly: blame errors are miette errors, warnings are warnings, and
//! infos become advice.

use miette::{Diagnostic, LabeledSpan, NamedSource, Report, Severity};
use quill_syntax::blame::{Blame, BlameSeverity, Blames};
use quill_syntax::source::SourceUnit;
use thiserror::Error;

/// One blame bound to the source text it points into.
#[derive(Debug, Error)]
#[error("{message}")]
struct BlameDiagnostic {
    message: String,
    severity: Severity,
    src: NamedSource<String>,
    at: miette::SourceSpan,
}

impl Diagnostic for BlameDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::underline(self.at))))
    }
}

fn to_miette_severity(severity: BlameSeverity) -> Severity {
    match severity {
        BlameSeverity::Error => Severity::Error,
        BlameSeverity::Warning => Severity::Warning,
        BlameSeverity::Info => Severity::Advice,
    }
}

fn diagnostic(name: &str, text: &str, blame: &Blame) -> BlameDiagnostic {
    let offset = blame.span.start.offset.min(text.len());
    // Zero-width spans still get a one-byte underline so the caret lands
    // somewhere visible.
    let len = blame.span.len().max(1).min(text.len().saturating_sub(offset).max(1));
    BlameDiagnostic {
        message: blame.kind.to_string(),
        severity: to_miette_severity(blame.severity()),
        src: NamedSource::new(name, text.to_owned()),
        at: (offset, len).into(),
    }
}

/// Render every blame of a compiled unit, most of the work delegated to
/// miette's fancy report handler.
pub fn render(unit: &SourceUnit) -> String {
    let mut out = String::new();
    for blame in unit.blames.iter() {
        let report = Report::new(diagnostic(&unit.name, &unit.text, blame));
        out.push_str(&format!("{report:?}"));
    }
    out
}

/// One-line tally like `2 errors, 1 warning`.
pub fn summary(blames: &Blames) -> String {
    let errors = blames.count_of(BlameSeverity::Error);
    let warnings = blames.count_of(BlameSeverity::Warning);
    let infos = blames.count_of(BlameSeverity::Info);

    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{} error{}", errors, plural(errors)));
    }
    if warnings > 0 {
        parts.push(format!("{} warning{}", warnings, plural(warnings)));
    }
    if infos > 0 {
        parts.push(format!("{} note{}", infos, plural(infos)));
    }
    if parts.is_empty() {
        "no problems".to_owned()
    } else {
        parts.join(", ")
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
