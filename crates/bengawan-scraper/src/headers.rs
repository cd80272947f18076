//! Browser-like request headers for booking page fetches.
//!
//! The User-Agent is drawn from a small fixed pool through an injected
//! [`IndexChooser`], so production picks at random while tests pin the
//! choice.

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, USER_AGENT};

use crate::error::ScraperError;

pub const BROWSER_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
];

pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Picks an index into a non-empty pool of `len` entries.
pub trait IndexChooser: Send + Sync {
    fn choose(&self, len: usize) -> usize;
}

/// Uniform random choice using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChooser;

impl IndexChooser for RandomChooser {
    fn choose(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }
}

/// Always picks the same slot (wrapped to the pool size).
#[derive(Debug, Clone, Copy)]
pub struct FixedChooser(pub usize);

impl IndexChooser for FixedChooser {
    fn choose(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.0 % len
        }
    }
}

/// One concrete set of headers for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserHeaders {
    pub user_agent: String,
    pub accept: String,
    pub connection: String,
}

impl BrowserHeaders {
    /// Converts to a `HeaderMap`, skipping any value that is not a valid
    /// header value.
    #[must_use]
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in [
            (USER_AGENT, &self.user_agent),
            (ACCEPT, &self.accept),
            (CONNECTION, &self.connection),
        ] {
            match HeaderValue::from_str(value) {
                Ok(v) => {
                    map.insert(name, v);
                }
                Err(e) => {
                    tracing::warn!(header = %name, error = %e, "skipping invalid header value");
                }
            }
        }
        map
    }
}

/// Pool of User-Agent strings plus the chooser that selects between them.
pub struct HeaderPool {
    user_agents: Vec<String>,
    chooser: Box<dyn IndexChooser>,
}

impl std::fmt::Debug for HeaderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderPool")
            .field("user_agents", &self.user_agents.len())
            .finish_non_exhaustive()
    }
}

impl Default for HeaderPool {
    fn default() -> Self {
        Self::browsers(RandomChooser)
    }
}

impl HeaderPool {
    /// Builds a pool over a custom set of User-Agent strings.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::EmptyHeaderPool`] when `user_agents` is empty.
    pub fn new<C>(user_agents: Vec<String>, chooser: C) -> Result<Self, ScraperError>
    where
        C: IndexChooser + 'static,
    {
        if user_agents.is_empty() {
            return Err(ScraperError::EmptyHeaderPool);
        }
        Ok(Self {
            user_agents,
            chooser: Box::new(chooser),
        })
    }

    /// The built-in desktop browser pool with the given chooser.
    pub fn browsers<C>(chooser: C) -> Self
    where
        C: IndexChooser + 'static,
    {
        Self {
            user_agents: BROWSER_USER_AGENTS.iter().map(|ua| (*ua).to_string()).collect(),
            chooser: Box::new(chooser),
        }
    }

    #[must_use]
    pub fn pick(&self) -> BrowserHeaders {
        let idx = self.chooser.choose(self.user_agents.len());
        let user_agent = self
            .user_agents
            .get(idx)
            .or_else(|| self.user_agents.first())
            .cloned()
            .unwrap_or_default();
        BrowserHeaders {
            user_agent,
            accept: BROWSER_ACCEPT.to_string(),
            connection: "keep-alive".to_string(),
        }
    }
}
