//! Error type for thesaurus lookups.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Error type for thesaurus lookups.
///
/// Apart from [`Error::TooManyWords`], every variant describes the failure
/// of a single word and is stored in that word's slot of a
/// [`Phrase`][crate::phrase::Phrase]. The type is `Clone` so that results
/// can be handed around freely; I/O errors are therefore kept in an `Arc`.
#[derive(Clone, Debug)]
pub enum Error {
    /// The word is empty or contains whitespace.
    InvalidWord(String),

    /// Resolving the server address or connecting to it failed.
    Connect(Arc<std::io::Error>),

    /// Connecting to the server took too long.
    ConnectTimeout,

    /// Writing the request gave an error.
    Write(Arc<std::io::Error>),

    /// Reading the response gave an error.
    Read(Arc<std::io::Error>),

    /// Reading the response took too long.
    ReadTimeout,

    /// The server closed the connection before a match or no-match
    /// status line was seen.
    Unresolved,

    /// The server reported a match but no synonym could be extracted.
    MalformedMatch,

    /// The phrase has more words than may be looked up at the same time
    /// and the client is configured to reject such phrases.
    TooManyWords {
        /// Number of words in the phrase.
        words: usize,

        /// The configured limit of parallel lookups.
        limit: usize,
    },

    /// The lookup task panicked or was cancelled.
    TaskFailed,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::InvalidWord(word) => {
                write!(f, "invalid word {:?}", word)
            }
            Error::Connect(_) => write!(f, "error connecting to server"),
            Error::ConnectTimeout => {
                write!(f, "timeout connecting to server")
            }
            Error::Write(_) => write!(f, "error writing to stream"),
            Error::Read(_) => write!(f, "error reading from stream"),
            Error::ReadTimeout => write!(f, "timeout reading from stream"),
            Error::Unresolved => {
                write!(f, "connection closed before a status line")
            }
            Error::MalformedMatch => {
                write!(f, "no synonym found in match response")
            }
            Error::TooManyWords { words, limit } => write!(
                f,
                "phrase has {} words, at most {} are allowed",
                words, limit
            ),
            Error::TaskFailed => write!(f, "lookup task failed"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidWord(_) => None,
            Error::Connect(e) => Some(e),
            Error::ConnectTimeout => None,
            Error::Write(e) => Some(e),
            Error::Read(e) => Some(e),
            Error::ReadTimeout => None,
            Error::Unresolved => None,
            Error::MalformedMatch => None,
            Error::TooManyWords { .. } => None,
            Error::TaskFailed => None,
        }
    }
}
