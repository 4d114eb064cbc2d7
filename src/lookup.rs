//! Looking up a single word.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::codec::{self, Resolution};
use crate::config::Config;
use crate::connect::AsyncConnect;
use crate::error::Error;

//------------ Lookup --------------------------------------------------------

/// Resolves one word over one connection.
///
/// A lookup opens a connection, sends the request, reads the response and
/// closes the connection again. The connection is owned by the future
/// returned by [`resolve`][Self::resolve] and is dropped on every way out
/// of it, including errors, timeouts, and cancellation.
#[derive(Clone, Debug)]
pub struct Lookup<C> {
    /// Source of new connections.
    connect: C,

    /// Time allowed for establishing a connection.
    connect_timeout: Duration,

    /// Time allowed for the exchange once connected.
    read_timeout: Duration,
}

impl<C: AsyncConnect> Lookup<C> {
    /// Creates a new lookup using the timeouts from `config`.
    pub fn new(connect: C, config: &Config) -> Self {
        Self {
            connect,
            connect_timeout: config.connect_timeout(),
            read_timeout: config.read_timeout(),
        }
    }

    /// Returns a reference to the connection source.
    pub fn connect(&self) -> &C {
        &self.connect
    }

    /// Resolves `word` to its first synonym.
    ///
    /// An invalid word is refused before any connection is made.
    pub async fn resolve(&self, word: &str) -> Result<Resolution, Error> {
        let request = codec::build_request(word)?;

        let mut conn = timeout(self.connect_timeout, self.connect.connect())
            .await
            .map_err(|_| Error::ConnectTimeout)?
            .map_err(|e| Error::Connect(Arc::new(e)))?;

        let res = timeout(
            self.read_timeout,
            exchange(&mut conn, &request, word),
        )
        .await
        .map_err(|_| Error::ReadTimeout)??;

        // The server waits for further commands, so we hang up.
        if let Err(err) = conn.shutdown().await {
            trace!(%err, "shutdown failed");
        }
        debug!(word, resolved = res.as_str(), "lookup done");
        Ok(res)
    }
}

/// Sends the request and reads the response.
async fn exchange<T: AsyncRead + AsyncWrite + Unpin>(
    conn: &mut T,
    request: &[u8],
    word: &str,
) -> Result<Resolution, Error> {
    conn.write_all(request)
        .await
        .map_err(|e| Error::Write(Arc::new(e)))?;
    conn.flush().await.map_err(|e| Error::Write(Arc::new(e)))?;
    trace!(word, "request sent");
    codec::read_response(conn, word).await
}

//============ Tests =========================================================
