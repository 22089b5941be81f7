//! Soft-error reporting for invariant violations the core recovers from locally.
//!
//! None of the errors in [`CoreError`] ever abort the process or unwind a stack: the
//! operation that triggered one is ignored or turned into a well-defined no-op, and the
//! caller observes that through an ordinary return value (`false`, a terminal iterator,
//! a zero count) rather than through this type. The sink exists purely so a host
//! application can log or assert on violations during development.

/// A soft, recoverable invariant violation reported through a [`World`](crate::World)'s
/// error sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A literal was constructed with both a datatype and a language tag. The language
    /// tag wins; the datatype is silently ignored.
    #[error("literal given both a datatype and a language tag; the language tag was kept")]
    DatatypeAndLanguageBothGiven,
    /// Reserved for future invariant additions that don't yet warrant their own variant.
    #[error("{0}")]
    Other(String),
}

/// A callback invoked whenever the core detects a [`CoreError`].
///
/// Installed with [`World::set_error_sink`](crate::World::set_error_sink). The default
/// sink writes a one-line message to standard error, mirroring how the reference C
/// library reports soft errors when the caller installs no handler of its own.
pub type ErrorSink = Box<dyn FnMut(&CoreError)>;

pub(crate) fn default_error_sink() -> ErrorSink {
    Box::new(|error| eprintln!("quadstore: {error}"))
}
