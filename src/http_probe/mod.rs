pub mod error;
pub mod probe;
pub mod result;
pub mod transport;

pub mod prelude {
    pub use super::error::{BoxError, ProbeError};
    pub use super::probe::{ProbeConfig, Prober};
    pub use super::result::{Head, Outcome, Reply};
    pub use super::transport::{HttpTransport, Transport};
}

use std::fmt::Write;

/// Render an error and every `source()` below it on one line.
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
