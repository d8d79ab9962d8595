use rustyline::error::ReadlineError;
use thiserror::Error;

/// Errors surfaced by a selection call.
///
/// Input that does not resolve to a node is never reported here; the menu simply
/// asks again. Only configuration problems and faults of the input/output
/// collaborators reach the caller.
#[derive(Error, Debug)]
pub enum MenuError {
    /// The tree is deeper than the number of configured label sequences.
    #[error("menu is {depth} levels deep but only {configured} label sequences are configured")]
    Configuration { depth: usize, configured: usize },

    /// The input stream was closed before a valid selection was read.
    #[error("input closed before a selection was made")]
    InputClosed,

    /// The user interrupted the prompt (Ctrl-C).
    #[error("selection interrupted")]
    Interrupted,

    /// A label sequence name in configuration was not recognised.
    #[error("unknown label sequence '{0}' (expected 'alpha' or 'numeric')")]
    UnknownLabelSequence(String),

    /// The composite selection pattern failed to compile.
    #[error("invalid selection pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Line editor error
    #[error("line editor error: {0}")]
    Readline(#[from] ReadlineError),
}
