//! Logging setup.
//!
//! The crate reports what it does via [tracing]. Failing record fields
//! are reported at trace level, values rejected by invariants at debug
//! level, and sinks that stop accepting data at warn level.

use std::io;
use tracing_subscriber::EnvFilter;

/// Sets up logging of events reported by the crate.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable debug level logging:
///   RUST_LOG=DEBUG
///
/// Or to see which record fields failed to read:
///   RUST_LOG=wireschema::schema::record=TRACE
///
/// Events go to stderr so they don't mix with bytes a program writes to
/// stdout. Calling the function more than once does no harm. Only the
/// first call installs a subscriber.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .compact()
        .without_time()
        .try_init()
        .ok();
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::init_logging;
    use crate::schema::uint8;

    #[test]
    fn init_twice() {
        init_logging();
        init_logging();
        assert!(uint8().ensure(|n| *n < 10).parse_slice(&[20]).is_err());
    }
}
