//! Creating connections to the DICT server.
//!
//! Every lookup uses a fresh connection. Connections are never shared
//! between lookups or reused for a second word.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use core::future::Future;
use core::pin::Pin;
use std::boxed::Box;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{lookup_host, TcpStream};
use tracing::debug;

//------------ AsyncConnect --------------------------------------------------

/// Establish a connection asynchronously.
///
/// This is the seam between lookups and the network. Tests implement it
/// with in-memory streams.
pub trait AsyncConnect {
    /// The type of an established connection.
    type Connection: AsyncRead + AsyncWrite + Send + Unpin;

    /// The future establishing the connection.
    type Fut: Future<Output = Result<Self::Connection, io::Error>> + Send;

    /// Returns a future that establishes a new connection.
    fn connect(&self) -> Self::Fut;
}

//------------ TcpConnect --------------------------------------------------

/// Create new TCP connections over IPv4.
#[derive(Clone, Debug)]
pub struct TcpConnect {
    /// Host name or address of the server.
    host: String,

    /// Port of the server.
    port: u16,
}

impl TcpConnect {
    /// Create new TCP connections.
    ///
    /// The host name is resolved anew for every connection.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl AsyncConnect for TcpConnect {
    type Connection = TcpStream;
    type Fut = Pin<
        Box<
            dyn Future<Output = Result<Self::Connection, std::io::Error>>
                + Send,
        >,
    >;

    fn connect(&self) -> Self::Fut {
        Box::pin(connect_ipv4(self.host.clone(), self.port))
    }
}

/// Connects to the first IPv4 address of `host` that accepts.
async fn connect_ipv4(host: String, port: u16) -> Result<TcpStream, io::Error> {
    let mut last_err = None;
    for addr in lookup_host((host.as_str(), port))
        .await?
        .filter(|addr| addr.is_ipv4())
    {
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                debug!(%addr, "connected");
                return Ok(stream);
            }
            Err(err) => {
                debug!(%addr, %err, "connect failed");
                last_err = Some(err)
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no IPv4 address for {}", host),
        )
    }))
}

//============ Tests =========================================================
