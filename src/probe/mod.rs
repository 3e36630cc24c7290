pub mod result;
pub mod runner;
pub mod session;
pub mod spec;

pub mod prelude {
    pub use super::result::ProbeResult;
    pub use super::runner::run;
    pub use super::session::{FailOn, ProbeSession};
    pub use super::spec::{HttpMethod, RequestSpec};
}

use std::fmt::Write;

/// Flattens an error and its source chain into a single-line description,
/// suitable for one report line per probe.
pub(crate) fn error_chain(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
