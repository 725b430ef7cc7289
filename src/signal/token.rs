//! The signal handle observed by running operations.

use crate::signal::cause::Cause;
use crate::signal::linked::LinkedSignal;
use crate::signal::source::Signal;

/// Either a source signal or a linked one.
#[derive(Debug, Clone)]
pub enum Token {
    Source(Signal),
    Linked(LinkedSignal),
}

impl Token {
    /// Whether the underlying signal has fired.
    pub fn is_fired(&self) -> bool {
        match self {
            Token::Source(signal) => signal.is_fired(),
            Token::Linked(linked) => linked.is_fired(),
        }
    }

    /// Cause of the firing (the attributed trigger for linked signals).
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Token::Source(signal) => signal.cause(),
            Token::Linked(linked) => linked.cause(),
        }
    }

    /// Wait until the underlying signal fires.
    pub async fn fired(&self) {
        match self {
            Token::Source(signal) => signal.fired().await,
            Token::Linked(linked) => linked.fired().await,
        }
    }
}

impl From<Signal> for Token {
    fn from(signal: Signal) -> Self {
        Token::Source(signal)
    }
}

impl From<LinkedSignal> for Token {
    fn from(linked: LinkedSignal) -> Self {
        Token::Linked(linked)
    }
}
