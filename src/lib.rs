//! A client for looking up synonyms via the DICT protocol.
//!
//! This crate resolves words to their first synonym in the
//! `moby-thesaurus` database of a DICT server as described in
//! [RFC 2229](https://tools.ietf.org/html/rfc2229). The default server is
//! `www.dict.org` on port 2628.
//!
//! Every word is looked up over a fresh connection. A phrase is resolved by
//! looking up all its words in parallel and putting the results back into
//! the original order.
//!
//! # Modules
//!
//! * [phrase] contains the [`Client`][phrase::Client] which is the main
//!   entry point. It splits phrases and runs the lookups.
//! * [lookup] resolves a single word over a single connection.
//! * [connect] creates the connections to the server.
//! * [codec] builds requests and parses the server's responses.
//! * [config] and [error] contain the configuration and error types.
//!
//! # Reference of Feature Flags
//!
//! * `logging`: Adds the
//!   [tracing-subscriber](https://github.com/tokio-rs/tracing) crate as a
//!   dependency and enables the `logging` module for setting up log output.
//!   The library itself always reports events via
//!   [tracing](https://github.com/tokio-rs/tracing).
//!
//! # Example
//!
//! ```no_run
//! # async fn run() {
//! use dictsyn::phrase::Client;
//!
//! let client = Client::new(None);
//! println!("Synonym: {}", client.synonym("run").await);
//! # }
//! ```

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod config;
pub mod connect;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod lookup;
pub mod phrase;

mod test;

pub use self::codec::Resolution;
pub use self::config::{Config, OverflowPolicy};
pub use self::error::Error;
pub use self::phrase::{Client, LookupResult, Phrase};
