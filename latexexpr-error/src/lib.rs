//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Errors in `latexexpr` are not tied to a source file, since expressions are built in code rather
//! than parsed. Instead, every [`Error`] carries the LaTeX source of the node that caused it, and
//! its spans point into that source. The report produced by [`Error::build_report`] therefore
//! shows the offending fragment of the expression, highlighted.

// lets `#[derive(ErrorKind)]` refer to this crate by name from within its own tests
extern crate self as latexexpr_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `latexexpr_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send {
    /// Returns the error kind as [`Any`], so that callers can inspect the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with the LaTeX source of the expression that caused it.
#[derive(Debug)]
pub struct Error {
    /// The LaTeX source of the node this error originated from.
    pub source: String,

    /// The regions of [`Error::source`] that should be highlighted. There is always at least one.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error whose single span covers the whole source.
    pub fn new(source: impl Into<String>, kind: impl ErrorKind + 'static) -> Self {
        let source = source.into();
        let spans = vec![0..source.len()];
        Self { source, spans, kind: Box::new(kind) }
    }

    /// Creates a new error with the given spans. An empty list of spans is replaced with a span
    /// covering the whole source.
    pub fn with_spans(
        source: impl Into<String>,
        mut spans: Vec<Range<usize>>,
        kind: impl ErrorKind + 'static,
    ) -> Self {
        let source = source.into();
        if spans.is_empty() {
            spans.push(0..source.len());
        }
        Self { source, spans, kind: Box::new(kind) }
    }

    /// Returns the error kind if it is of type `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if the error kind is of type `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str) {
        let report = self.build_report(src_id);
        if report.eprint((src_id, Source::from(&self.source))).is_err() {
            eprintln!("{}", self);
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use latexexpr_attrs::ErrorKind;
    use super::*;

    /// The variable has no value.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` has no value", self.name),
        labels = ["this variable"],
        help = "give the variable a value before computing the result",
    )]
    struct NoValue {
        name: String,
    }

    /// Something without any fields.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "something went wrong", labels = [""])]
    struct Unit;

    /// Render a report to a string without colors.
    fn render(err: &Error) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(&err.source)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn whole_source_span() {
        let err = Error::new("{a_{22}}", NoValue { name: "a_{22}".to_string() });
        assert_eq!(err.spans, vec![0..8]);
        assert_eq!(err.to_string(), "`a_{22}` has no value");
    }

    #[test]
    fn downcast() {
        let err = Error::new("{x}", Unit);
        assert!(err.is::<Unit>());
        assert!(!err.is::<NoValue>());
        assert_eq!(err.downcast_ref::<Unit>(), Some(&Unit));
    }

    #[test]
    fn empty_spans_cover_source() {
        let err = Error::with_spans("{x} + {y}", Vec::new(), Unit);
        assert_eq!(err.spans, vec![0..9]);
    }

    #[test]
    fn report_contents() {
        let err = Error::new("{v_1}", NoValue { name: "v_1".to_string() });
        let report = render(&err);
        assert!(report.contains("`v_1` has no value"));
        assert!(report.contains("this variable"));
        assert!(report.contains("give the variable a value"));
        assert!(report.contains("{v_1}"));
    }
}
