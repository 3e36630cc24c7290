use unicode_truncate::UnicodeTruncateStr;

use crate::probe::prelude::*;

// "DELETE" is the widest method we accept.
const METHOD_WIDTH: usize = 6;

fn to_fixed_width(input: &str, width: usize) -> String {
    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

/// One human-readable line per completed probe. Distinguishes "the server
/// said no" (a status line, whatever the code) from "the network said no"
/// (an error line).
pub fn probe_line(result: &ProbeResult) -> String {
    let method = to_fixed_width(result.spec.method.as_str(), METHOD_WIDTH);
    match (&result.error, result.status) {
        (Some(error), _) => format!(
            "{method} {} - Error: {error} ({:.1}ms)",
            result.spec.path, result.duration_ms
        ),
        (None, Some(code)) => format!(
            "{method} {} - Status: {code} ({:.1}ms)",
            result.spec.path, result.duration_ms
        ),
        (None, None) => format!(
            "{method} {} - Error: no status recorded ({:.1}ms)",
            result.spec.path, result.duration_ms
        ),
    }
}

pub fn print_probe_line(result: &ProbeResult) {
    println!("{}", probe_line(result));
}

/// Session summary printed after the last probe.
pub fn summary(results: &[ProbeResult]) -> String {
    let completed = results.iter().filter(|r| r.transport_ok()).count();
    let failed = results.len() - completed;
    format!(
        "{} probes: {completed} completed, {failed} transport error{}",
        results.len(),
        if failed == 1 { "" } else { "s" }
    )
}
