//! Rendering of [`TestResult`]s for stdout.
//!
//! Text output is a fixed-width banner followed by the hypotheses, the
//! numbers behind the decision, and the verdict. JSON output serializes
//! the results as-is.

use std::fmt::Write as _;

use serde::Serialize;

use crate::hypothesis::{Decision, TestResult};

const RULE: &str = "-------------------------------------------";
const BANNER_WIDTH: usize = RULE.len() - 1;

/// Human-readable block for one test.
///
/// # Examples
/// ```
/// use u_hypotest::hypothesis::{Decision, Hypotheses, TestKind, TestResult};
/// use u_hypotest::report::render_text;
/// let result = TestResult {
///     kind: TestKind::StudentT,
///     hypotheses: Hypotheses { null: "no effect".into(), alternative: "effect".into() },
///     significance_level: 0.05,
///     degrees_of_freedom: 2,
///     critical_value: 2.92,
///     statistic: 0.0,
///     decision: Decision::FailToReject,
/// };
/// let text = render_text(&result);
/// assert!(text.contains("Degrees of Freedom: 2"));
/// assert!(text.contains("Null hypothesis is NOT REJECTED: no effect"));
/// ```
pub fn render_text(result: &TestResult) -> String {
    let kind = result.kind;
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{:<width$}|", kind.to_string(), width = BANNER_WIDTH);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Null hypothesis: {}", result.hypotheses.null);
    let _ = writeln!(out, "Alt hypothesis: {}", result.hypotheses.alternative);
    let _ = writeln!(out);
    let _ = writeln!(out, "Significance level: {}", result.significance_level);
    let _ = writeln!(out, "Degrees of Freedom: {}", result.degrees_of_freedom);
    let _ = writeln!(out, "{}: {}", kind.critical_label(), result.critical_value);
    let _ = writeln!(out, "{}: {}", kind.statistic_label(), result.statistic);
    let _ = writeln!(out);
    let verdict = match result.decision {
        Decision::Reject => "REJECTED",
        Decision::FailToReject => "NOT REJECTED",
    };
    let _ = writeln!(out, "Null hypothesis is {verdict}: {}", result.conclusion());
    let _ = writeln!(out, "{RULE}");
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [TestResult],
}

/// One pretty-printed JSON document holding every result.
pub fn render_json(results: &[TestResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { results })
}
