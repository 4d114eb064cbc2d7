//! Building DICT requests and parsing thesaurus responses.
//!
//! A lookup sends a single `DEFINE` command for the `moby-thesaurus`
//! database and then reads the server's reply until one of two status lines
//! shows up:
//!
//! * `151` introduces a definition. For the thesaurus, the definition is a
//!   comma separated list of synonyms preceded by a header line, e.g.
//!   `6 Moby Thesaurus words for "run":`. The first synonym is extracted
//!   from this text.
//! * `552` means the word is not in the database. The word itself is the
//!   result then.
//!
//! Everything else the server sends, such as the `220` banner or the `150`
//! count line, is collected but otherwise ignored.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;
use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::error::Error;

//------------ Constants -----------------------------------------------------

/// The database all lookups are sent to.
pub const DATABASE: &str = "moby-thesaurus";

/// Status line prefix of a definition that follows.
const MATCH: &[u8] = b"151 ";

/// Status line prefix of a failed lookup.
const NO_MATCH: &[u8] = b"552 ";

/// How many bytes we try to read at once.
const READ_CHUNK: usize = 1024;

//------------ Resolution ----------------------------------------------------

/// The outcome of a completed exchange with the server.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The server had an entry; this is its first synonym.
    Synonym(String),

    /// The server had no entry; this is the trimmed original word.
    NoMatch(String),
}

impl Resolution {
    /// Returns the resolved word.
    pub fn as_str(&self) -> &str {
        match self {
            Resolution::Synonym(word) | Resolution::NoMatch(word) => word,
        }
    }

    /// Returns whether the server provided a synonym.
    pub fn is_synonym(&self) -> bool {
        matches!(self, Resolution::Synonym(_))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//------------ Requests ------------------------------------------------------

/// Checks that a word can be sent as a single lookup.
///
/// A word must not be empty and must not contain any whitespace.
pub fn check_word(word: &str) -> Result<(), Error> {
    if word.is_empty() || word.contains(char::is_whitespace) {
        return Err(Error::InvalidWord(word.into()));
    }
    Ok(())
}

/// Builds the request line for looking up `word`.
pub fn build_request(word: &str) -> Result<Bytes, Error> {
    check_word(word)?;
    let mut buf = BytesMut::with_capacity(
        "define  \n".len() + DATABASE.len() + word.len(),
    );
    buf.put_slice(b"define ");
    buf.put_slice(DATABASE.as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(word.as_bytes());
    buf.put_u8(b'\n');
    Ok(buf.freeze())
}

//------------ Responses -----------------------------------------------------

/// Reads the server's reply to a lookup of `word`.
///
/// Reading stops as soon as the reply can be decided. In particular, the
/// stream is not read to its end, so a server keeping the connection open
/// for further commands is fine.
///
/// If the stream ends before either status line was seen, the lookup is
/// unresolved.
pub async fn read_response<R: AsyncRead + Unpin>(
    io: &mut R,
    word: &str,
) -> Result<Resolution, Error> {
    let mut buf = BytesMut::with_capacity(READ_CHUNK);
    loop {
        buf.reserve(READ_CHUNK);
        let len = io
            .read_buf(&mut buf)
            .await
            .map_err(|e| Error::Read(Arc::new(e)))?;
        trace!(len, "read from stream");
        let eof = len == 0;
        if let Some(res) = examine(&buf, word, eof)? {
            return Ok(res);
        }
        if eof {
            return Err(Error::Unresolved);
        }
    }
}

/// Looks at everything received so far.
///
/// Returns `Ok(None)` if more data is needed.
fn examine(
    buf: &[u8],
    word: &str,
    eof: bool,
) -> Result<Option<Resolution>, Error> {
    match find_status(buf) {
        None => Ok(None),
        Some(Status::NoMatch) => {
            Ok(Some(Resolution::NoMatch(word.trim().into())))
        }
        Some(Status::Match(start)) => {
            let body = String::from_utf8_lossy(&buf[start..]);
            match first_synonym(&body, eof) {
                Extract::Complete(synonym) => {
                    Ok(Some(Resolution::Synonym(synonym.into())))
                }
                Extract::Incomplete => Ok(None),
                Extract::Malformed => Err(Error::MalformedMatch),
            }
        }
    }
}

//------------ Status --------------------------------------------------------

/// A status line we are interested in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Status {
    /// A definition follows, starting at the given index.
    Match(usize),

    /// There is no definition.
    NoMatch,
}

/// Finds the first line starting with one of the status codes.
fn find_status(buf: &[u8]) -> Option<Status> {
    let starts = std::iter::once(0).chain(
        buf.iter()
            .enumerate()
            .filter(|(_, ch)| **ch == b'\n')
            .map(|(pos, _)| pos + 1),
    );
    for start in starts {
        let line = &buf[start..];
        if line.starts_with(MATCH) {
            return Some(Status::Match(start));
        }
        if line.starts_with(NO_MATCH) {
            return Some(Status::NoMatch);
        }
    }
    None
}

//------------ Synonym Extraction --------------------------------------------

/// The result of trying to extract a synonym.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Extract<'a> {
    /// The synonym is complete.
    Complete(&'a str),

    /// More data is needed.
    Incomplete,

    /// The text doesn't contain a synonym.
    Malformed,
}

/// Extracts the first synonym from a definition.
///
/// The `body` starts with the `151` status line. The synonym is found by
/// taking the second comma separated field of the body. If that field
/// contains a colon, only the part after the first colon is kept, which
/// skips the `... words for "run":` header. The result is trimmed and cut
/// at the first line break.
///
/// The synonym is complete once it is followed by a comma. Otherwise, it is
/// only complete if the definition has ended, either because the `.` line
/// was seen or because the stream ended as indicated by `eof`.
fn first_synonym(body: &str, eof: bool) -> Extract<'_> {
    let (body, finished) = match find_terminator(body) {
        Some(end) => (&body[..end], true),
        None => (body, eof),
    };
    let rest = match body.split_once(',') {
        Some((_, rest)) => rest,
        None if finished => return Extract::Malformed,
        None => return Extract::Incomplete,
    };
    let field = match rest.split_once(',') {
        Some((field, _)) => field,
        None if finished => rest,
        None => return Extract::Incomplete,
    };
    let field = match field.split_once(':') {
        Some((_, after)) => after,
        None => field,
    };
    let field = field.trim_start();
    let synonym = match field.find(|ch| ch == '\r' || ch == '\n') {
        Some(end) => &field[..end],
        None => field,
    };
    let synonym = synonym.trim();
    if synonym.is_empty() {
        Extract::Malformed
    } else {
        Extract::Complete(synonym)
    }
}

/// Returns the index of the line break before the `.` line ending a text.
fn find_terminator(body: &str) -> Option<usize> {
    ["\n.\r\n", "\n.\n"]
        .iter()
        .filter_map(|term| body.find(term))
        .min()
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use tokio_test::io::Builder;

    const BANNER: &[u8] =
        b"220 dict.dict.org dictd 1.12.1/rf on Linux 4.19.0-10-amd64 \
          <auth.mime> <100.abc@dict.dict.org>\r\n";

    #[test]
    fn request_line() {
        assert_eq!(
            build_request("run").unwrap().as_ref(),
            b"define moby-thesaurus run\n"
        );
    }

    #[rstest]
    #[case("two words")]
    #[case("tab\there")]
    #[case("line\n")]
    #[case("")]
    fn request_rejects_invalid_words(#[case] word: &str) {
        assert!(matches!(
            build_request(word),
            Err(Error::InvalidWord(w)) if w == word
        ));
    }

    #[test]
    fn synonym_from_short_definition() {
        let body = "151 \"run\" moby \"thesaurus\"\r\nmove, dash, sprint, \
                    jog\r\n.";
        assert_eq!(first_synonym(body, false), Extract::Complete("dash"));
    }

    #[test]
    fn synonym_skips_header_line() {
        let body = "151 \"run\" moby-thesaurus \"Moby Thesaurus II by Grady \
                    Ward, 1.0\"\r\n\r\n6 Moby Thesaurus words for \
                    \"run\":\r\n   abscond, bolt, career\r\n";
        assert_eq!(first_synonym(body, false), Extract::Complete("abscond"));
    }

    #[test]
    fn synonym_needs_terminating_comma() {
        let body = "151 \"run\" moby-thesaurus \"Moby Thesaurus II by Grady \
                    Ward, 1.0\"\r\n\r\n";
        assert_eq!(first_synonym(body, false), Extract::Incomplete);
        let body = "151 \"run\" moby \"thesaurus\"\r\nmove, da";
        assert_eq!(first_synonym(body, false), Extract::Incomplete);
        assert_eq!(first_synonym(body, true), Extract::Complete("da"));
    }

    #[test]
    fn synonym_before_end_of_text() {
        let body = "151 \"x\" moby \"thesaurus\"\r\nfoo, bar\r\n.\r\n250 ok\r\n";
        assert_eq!(first_synonym(body, false), Extract::Complete("bar"));
    }

    #[test]
    fn synonym_missing() {
        let body = "151 \"x\" moby \"thesaurus\"\r\n.\r\n";
        assert_eq!(first_synonym(body, false), Extract::Malformed);
        let body = "151 \"x\" moby \"thesaurus\"\r\nfoo, \r\n.\r\n";
        assert_eq!(first_synonym(body, false), Extract::Malformed);
    }

    #[test]
    fn status_only_at_line_start() {
        assert_eq!(find_status(b"220 banner 151 \r\n"), None);
        assert_eq!(find_status(b"220 banner\r\n15"), None);
        assert_eq!(
            find_status(b"220 banner\r\n151 \"x\""),
            Some(Status::Match(12))
        );
        assert_eq!(find_status(b"552 no match\r\n"), Some(Status::NoMatch));
    }

    #[tokio::test]
    async fn read_match() {
        let mut io = Builder::new()
            .read(
                b"151 \"run\" moby \"thesaurus\"\r\n\
                  move, dash, sprint, jog\r\n.",
            )
            .build();
        assert_eq!(
            read_response(&mut io, "run").await.unwrap(),
            Resolution::Synonym("dash".into())
        );
    }

    #[tokio::test]
    async fn read_match_in_pieces() {
        let mut io = Builder::new()
            .read(BANNER)
            .read(
                b"150 1 definitions retrieved\r\n151 \"run\" moby-thesaurus \
                  \"Moby Thesaurus II by Grady Ward, 1.0\"\r\n\r\n",
            )
            .read(b"6 Moby Thesaurus words for \"run\":\r\n   absc")
            .read(b"ond, bolt, career, dash\r\n")
            .build();
        assert_eq!(
            read_response(&mut io, "run").await.unwrap(),
            Resolution::Synonym("abscond".into())
        );
    }

    #[tokio::test]
    async fn read_no_match() {
        let mut io = Builder::new()
            .read(BANNER)
            .read(b"552 no match [d/n]\r\n")
            .build();
        assert_eq!(
            read_response(&mut io, " xyzzy ").await.unwrap(),
            Resolution::NoMatch("xyzzy".into())
        );
    }

    #[tokio::test]
    async fn read_closed_without_status() {
        let mut io = Builder::new().build();
        assert!(matches!(
            read_response(&mut io, "run").await,
            Err(Error::Unresolved)
        ));

        let mut io = Builder::new().read(BANNER).build();
        assert!(matches!(
            read_response(&mut io, "run").await,
            Err(Error::Unresolved)
        ));
    }

    #[tokio::test]
    async fn read_error() {
        let mut io = Builder::new()
            .read(BANNER)
            .read_error(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset",
            ))
            .build();
        assert!(matches!(
            read_response(&mut io, "run").await,
            Err(Error::Read(_))
        ));
    }
}
