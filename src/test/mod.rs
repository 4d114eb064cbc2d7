//! Tooling for testing lookups without a network.
//!
//! The [`server`] module provides a connection source that hands out
//! in-memory streams, each served by a small fake DICT server.
#![cfg(test)]
