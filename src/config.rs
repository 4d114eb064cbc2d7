//! Client configuration.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use core::cmp;
use std::time::Duration;

//------------ Configuration Constants ----------------------------------------

/// The default DICT server.
const DEF_HOST: &str = "www.dict.org";

/// The DICT port as assigned by IANA.
const DEF_PORT: u16 = 2628;

/// Configuration limits for the maximum number of parallel lookups.
const MAX_PARALLEL: DefMinMax<usize> = DefMinMax::new(25, 1, 1000);

/// Configuration limits for the connect timeout.
const CONNECT_TIMEOUT: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(10),
    Duration::from_millis(1),
    Duration::from_secs(300),
);

/// Configuration limits for the read timeout.
const READ_TIMEOUT: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(10),
    Duration::from_millis(1),
    Duration::from_secs(300),
);

//------------ OverflowPolicy ------------------------------------------------

/// What to do with a phrase that has more words than parallel lookups are
/// allowed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OverflowPolicy {
    /// Look up all words, excess words wait for a running lookup to finish.
    #[default]
    Queue,

    /// Refuse the whole phrase without looking up any word.
    Reject,
}

//------------ Config ---------------------------------------------------------

/// Configuration for a thesaurus client.
#[derive(Clone, Debug)]
pub struct Config {
    /// Host name or address of the DICT server.
    host: String,

    /// Port of the DICT server.
    port: u16,

    /// Maximum number of lookups in flight at the same time.
    max_parallel: usize,

    /// Connect timeout.
    connect_timeout: Duration,

    /// Read timeout.
    read_timeout: Duration,

    /// What to do with phrases longer than `max_parallel`.
    overflow: OverflowPolicy,
}

impl Config {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the host name of the DICT server.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Sets the host name of the DICT server.
    pub fn set_host(&mut self, value: impl Into<String>) {
        self.host = value.into()
    }

    /// Returns the port of the DICT server.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Sets the port of the DICT server.
    pub fn set_port(&mut self, value: u16) {
        self.port = value
    }

    /// Returns the maximum number of parallel lookups.
    ///
    /// Once this many lookups are outstanding, what happens to the
    /// remaining words of a phrase depends on the
    /// [overflow policy][Self::overflow].
    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Sets the maximum number of parallel lookups.
    ///
    /// If this value is too small or too large, it will be caped.
    pub fn set_max_parallel(&mut self, value: usize) {
        self.max_parallel = MAX_PARALLEL.limit(value)
    }

    /// Returns the connect timeout.
    ///
    /// This covers resolving the server's address and establishing the
    /// connection.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Sets the connect timeout.
    ///
    /// If this value is too small or too large, it will be caped.
    pub fn set_connect_timeout(&mut self, value: Duration) {
        self.connect_timeout = CONNECT_TIMEOUT.limit(value)
    }

    /// Returns the read timeout.
    ///
    /// The read timeout is the maximum amount of time for sending a
    /// request and receiving the response once connected.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Sets the read timeout.
    ///
    /// If this value is too small or too large, it will be caped.
    pub fn set_read_timeout(&mut self, value: Duration) {
        self.read_timeout = READ_TIMEOUT.limit(value)
    }

    /// Returns the overflow policy.
    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Sets the overflow policy.
    pub fn set_overflow(&mut self, value: OverflowPolicy) {
        self.overflow = value
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEF_HOST.into(),
            port: DEF_PORT,
            max_parallel: MAX_PARALLEL.default(),
            connect_timeout: CONNECT_TIMEOUT.default(),
            read_timeout: READ_TIMEOUT.default(),
            overflow: OverflowPolicy::default(),
        }
    }
}

//------------ DefMinMax -----------------------------------------------------

/// A default value together with the range a value must be in.
#[derive(Clone, Copy)]
struct DefMinMax<T> {
    /// The default value,
    def: T,

    /// The minimum value,
    min: T,

    /// The maximum value,
    max: T,
}

impl<T> DefMinMax<T> {
    /// Creates a new value.
    const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    /// Returns the default value.
    fn default(self) -> T {
        self.def
    }

    /// Trim the given value to fit into the minimum/maximum range.
    fn limit(self, value: T) -> T
    where
        T: Ord,
    {
        cmp::max(self.min, cmp::min(self.max, value))
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.host(), "www.dict.org");
        assert_eq!(config.port(), 2628);
        assert_eq!(config.max_parallel(), 25);
        assert_eq!(config.overflow(), OverflowPolicy::Queue);
    }

    #[test]
    fn limits() {
        let mut config = Config::new();
        config.set_max_parallel(0);
        assert_eq!(config.max_parallel(), 1);
        config.set_max_parallel(1_000_000);
        assert_eq!(config.max_parallel(), 1000);
        config.set_read_timeout(Duration::ZERO);
        assert_eq!(config.read_timeout(), Duration::from_millis(1));
        config.set_connect_timeout(Duration::from_secs(3600));
        assert_eq!(config.connect_timeout(), Duration::from_secs(300));
    }
}
