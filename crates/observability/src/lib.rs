//! Process-wide logging setup shared by the skill binaries.

/// Initialize tracing for the process.
///
/// Safe to call more than once. Returns `true` only for the call that
/// installed the subscriber.
pub fn init() -> bool {
    tracing::init()
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
