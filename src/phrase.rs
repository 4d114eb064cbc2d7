//! Looking up all words of a phrase in parallel.
//!
//! A [`Client`] splits a phrase into words and spawns one lookup task per
//! word. Each task resolves its word over its own connection. The results
//! are put back into the order of the words in the phrase, no matter in
//! which order the lookups finish.
//!
//! The number of lookups in flight is limited by
//! [`Config::max_parallel`]. What happens to a phrase with more words is
//! decided by the [`OverflowPolicy`]: either the excess words wait for a
//! free slot or the phrase is refused as a whole.
//!
//! A failed lookup never affects the other words of the phrase. Its error is
//! kept in the word's [`LookupResult`] and the word itself is used in the
//! rendered phrase.
//!
//! ```no_run
//! # async fn run() -> Result<(), dictsyn::error::Error> {
//! use dictsyn::phrase::Client;
//!
//! let client = Client::new(None);
//! let phrase = client.process_phrase("run fast now").await?;
//! println!("New phrase: {}", phrase);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::codec::Resolution;
use crate::config::{Config, OverflowPolicy};
use crate::connect::{AsyncConnect, TcpConnect};
use crate::error::Error;
use crate::lookup::Lookup;

//------------ Client --------------------------------------------------------

/// A thesaurus client.
///
/// Cloning a client is cheap. Clones share the limit on parallel lookups.
#[derive(Debug)]
pub struct Client<C> {
    /// User configuration.
    config: Config,

    /// The lookup shared by all tasks.
    lookup: Arc<Lookup<C>>,

    /// Semaphore limiting the number of lookups in flight.
    semaphore: Arc<Semaphore>,
}

impl<C> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            lookup: self.lookup.clone(),
            semaphore: self.semaphore.clone(),
        }
    }
}

impl Client<TcpConnect> {
    /// Creates a client talking to the configured DICT server over TCP.
    pub fn new(config: Option<Config>) -> Self {
        let config = config.unwrap_or_default();
        let connect = TcpConnect::new(config.host(), config.port());
        Self::with_connect(Some(config), connect)
    }
}

impl<C> Client<C>
where
    C: AsyncConnect + Send + Sync + 'static,
{
    /// Creates a client using the given connection source.
    pub fn with_connect(config: Option<Config>, connect: C) -> Self {
        let config = config.unwrap_or_default();
        Self {
            lookup: Arc::new(Lookup::new(connect, &config)),
            semaphore: Arc::new(Semaphore::new(config.max_parallel())),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves a single word.
    ///
    /// The lookup counts against the limit of parallel lookups.
    pub async fn resolve(&self, word: &str) -> Result<Resolution, Error> {
        let _permit = self.acquire().await;
        self.lookup.resolve(word).await
    }

    /// Returns the first synonym of the word on `line`.
    ///
    /// Surrounding whitespace is ignored. If there is no synonym or the
    /// lookup fails, the trimmed line is returned.
    pub async fn synonym(&self, line: &str) -> String {
        let word = line.trim();
        match self.resolve(word).await {
            Ok(res) => res.as_str().into(),
            Err(err) => {
                warn!(word, %err, "lookup failed");
                word.into()
            }
        }
    }

    /// Resolves all words of a phrase.
    ///
    /// All lookups are run in parallel, each in its own task. The method
    /// returns once every lookup has finished. Dropping the returned future
    /// aborts the lookups still running.
    ///
    /// The only error returned is [`Error::TooManyWords`] if the phrase is
    /// too long for [`OverflowPolicy::Reject`]. Errors of individual lookups
    /// are part of the returned phrase.
    pub async fn process_phrase(&self, line: &str) -> Result<Phrase, Error> {
        let words = split_words(line);
        if self.config.overflow() == OverflowPolicy::Reject
            && words.len() > self.config.max_parallel()
        {
            return Err(Error::TooManyWords {
                words: words.len(),
                limit: self.config.max_parallel(),
            });
        }
        debug!(words = words.len(), "processing phrase");

        let mut tasks = JoinSet::new();
        for (index, word) in words.iter().enumerate() {
            let client = self.clone();
            let word = word.clone();
            tasks.spawn(async move {
                let outcome = client.resolve(&word).await;
                (index, outcome)
            });
        }

        // Slots of tasks that don't report back keep the failure.
        let mut outcomes: Vec<Result<Resolution, Error>> =
            vec![Err(Error::TaskFailed); words.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = outcome,
                Err(err) => warn!(%err, "lookup task failed"),
            }
        }

        let results = words
            .into_iter()
            .zip(outcomes)
            .enumerate()
            .map(|(index, (word, outcome))| {
                if let Err(err) = &outcome {
                    warn!(
                        index,
                        word = word.as_str(),
                        %err,
                        "lookup failed"
                    );
                }
                LookupResult {
                    index,
                    word,
                    outcome,
                }
            })
            .collect();
        Ok(Phrase { results })
    }

    /// Waits for a free lookup slot.
    async fn acquire(&self) -> tokio::sync::SemaphorePermit<'_> {
        self.semaphore
            .acquire()
            .await
            .expect("the semaphore has not been closed")
    }
}

/// Splits a phrase into its words.
///
/// Words are separated by any amount of whitespace including line breaks.
pub fn split_words(line: &str) -> Vec<String> {
    line.split_whitespace().map(Into::into).collect()
}

//------------ LookupResult --------------------------------------------------

/// The result of looking up one word of a phrase.
#[derive(Clone, Debug)]
pub struct LookupResult {
    /// Position of the word in the phrase.
    index: usize,

    /// The word as it appeared in the phrase.
    word: String,

    /// What the lookup produced.
    outcome: Result<Resolution, Error>,
}

impl LookupResult {
    /// Returns the position of the word in the phrase, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the original word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Returns the outcome of the lookup.
    pub fn outcome(&self) -> &Result<Resolution, Error> {
        &self.outcome
    }

    /// Returns the error if the lookup failed.
    pub fn error(&self) -> Option<&Error> {
        self.outcome.as_ref().err()
    }

    /// Returns the word to show for this result.
    ///
    /// This is the synonym if there was one and the original word
    /// otherwise.
    pub fn display(&self) -> &str {
        match &self.outcome {
            Ok(res) => res.as_str(),
            Err(_) => &self.word,
        }
    }
}

//------------ Phrase --------------------------------------------------------

/// The results for all words of a phrase in their original order.
#[derive(Clone, Debug, Default)]
pub struct Phrase {
    /// One result per word, ordered by position.
    results: Vec<LookupResult>,
}

impl Phrase {
    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns whether the phrase has no words.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the results in phrase order.
    pub fn results(&self) -> &[LookupResult] {
        &self.results
    }

    /// Returns an iterator over the words whose lookup failed.
    pub fn failures(&self) -> impl Iterator<Item = &LookupResult> + '_ {
        self.results.iter().filter(|res| res.error().is_some())
    }

    /// Returns the resolved words separated by single spaces.
    pub fn render(&self) -> String {
        self.results
            .iter()
            .map(LookupResult::display)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Converts the phrase into its results.
    pub fn into_results(self) -> Vec<LookupResult> {
        self.results
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

//============ Tests =========================================================
