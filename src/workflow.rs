//! Workflow
//!
//! One invocation: parse the query, get the category set (cache or scrape),
//! resolve, emit. Every capability is injected, so the whole cycle runs
//! without a launcher, a network or a real cache directory.

use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{CacheMode, Config};
use crate::error::{Result, WsawError};
use crate::services::activity::{ActivityLogger, LogLevel};
use crate::services::cache::{content_hash, Cache, CacheStore};
use crate::tools::feedback::{Feedback, FeedbackSink};
use crate::tools::fetch::{fetch_page, HttpFetcher, Page};
use crate::tools::icons::IconStore;
use crate::tools::query::{category_names, resolve, Query};
use crate::tools::scrape::{extract, extract_sequential};
use crate::types::CategorySet;

/// Cache key of the serialized category set.
pub const CATEGORIES_KEY: &str = "categories";
/// Cache key of the last seen page hash (hash mode only).
pub const CONTENT_HASH_KEY: &str = "content-hash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Wrong number of arguments; nothing was emitted.
    Skipped,
    /// Feedback was sent with this many items.
    Emitted { items: usize },
}

pub struct Workflow<C, F: ?Sized, S> {
    config: Config,
    cache: Cache<C>,
    fetcher: Arc<F>,
    icons: IconStore<F>,
    sink: S,
    activity: Option<ActivityLogger>,
    force_refresh: bool,
}

impl<C, F, S> Workflow<C, F, S>
where
    C: CacheStore,
    F: HttpFetcher + ?Sized + 'static,
    S: FeedbackSink,
{
    pub fn new(config: Config, cache: C, fetcher: Arc<F>, sink: S) -> Self {
        let icons = IconStore::new(config.icon_dir(), Arc::clone(&fetcher));
        Self {
            config,
            cache: Cache::new(cache),
            fetcher,
            icons,
            sink,
            activity: None,
            force_refresh: false,
        }
    }

    pub fn with_activity_log(mut self, logger: ActivityLogger) -> Self {
        self.activity = Some(logger);
        self
    }

    /// Ignore cache freshness for this run.
    pub fn force_refresh(mut self, yes: bool) -> Self {
        self.force_refresh = yes;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &Cache<C> {
        &self.cache
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one query. Errors mean nothing was emitted.
    pub async fn run<A: AsRef<str>>(&mut self, args: &[A]) -> Result<Outcome> {
        let Some(query) = Query::from_args(args) else {
            log::debug!("ignoring query with {} arguments", args.len());
            return Ok(Outcome::Skipped);
        };

        let categories = match self.categories().await {
            Ok(categories) => categories,
            Err(e) => {
                self.note(LogLevel::Error, "error", &e.to_string());
                return Err(e);
            }
        };
        log::debug!("categories: {:?}", category_names(&categories));

        let sites = resolve(&query, &categories);
        log::debug!("{query:?} matched {} sites", sites.len());

        let feedback = Feedback::from_sites(&sites);
        self.sink.send(&feedback)?;
        Ok(Outcome::Emitted {
            items: feedback.len(),
        })
    }

    /// The current category set, from cache when still valid.
    pub async fn categories(&self) -> Result<CategorySet> {
        match self.config.cache_mode {
            CacheMode::Ttl => self.categories_by_ttl().await,
            CacheMode::Hash => self.categories_by_hash().await,
        }
    }

    async fn categories_by_ttl(&self) -> Result<CategorySet> {
        let ttl = if self.force_refresh {
            Duration::ZERO
        } else {
            self.config.ttl
        };

        let refreshed = Cell::new(false);
        let loaded = self
            .cache
            .load_or_store_json(CATEGORIES_KEY, ttl, || async {
                refreshed.set(true);
                match fetch_page(&*self.fetcher, self.config.source_url.as_str()).await {
                    Page::Fetched { html } => self.scrape(&html).await,
                    Page::Unreachable { reason } => Err(WsawError::Unreachable(reason)),
                }
            })
            .await;

        match loaded {
            Ok(categories) => {
                if refreshed.get() {
                    self.note_refresh(&categories);
                }
                Ok(categories)
            }
            Err(WsawError::Unreachable(reason)) => self.fallback(&reason),
            Err(e) => Err(e),
        }
    }

    async fn categories_by_hash(&self) -> Result<CategorySet> {
        let html = match fetch_page(&*self.fetcher, self.config.source_url.as_str()).await {
            Page::Fetched { html } => html,
            Page::Unreachable { reason } => return self.fallback(&reason),
        };

        let hash = content_hash(html.as_bytes());
        let unchanged = self.cache.load(CONTENT_HASH_KEY)?.as_deref() == Some(hash.as_bytes());
        if unchanged && !self.force_refresh {
            if let Some(categories) = self.cache.load_json(CATEGORIES_KEY)? {
                log::debug!("page unchanged ({hash}), using stored categories");
                return Ok(categories);
            }
        }

        let categories = self.scrape(&html).await?;
        self.cache.store_json(CATEGORIES_KEY, &categories)?;
        // Hash last: an interrupted refresh must not mark old data as current.
        self.cache.store(CONTENT_HASH_KEY, hash.as_bytes())?;
        self.note_refresh(&categories);
        Ok(categories)
    }

    async fn scrape(&self, html: &str) -> Result<CategorySet> {
        let url = self.config.source_url.as_str();
        let categories = if self.config.sequential {
            extract_sequential(html, url, &self.icons).await?
        } else {
            extract(html, url, &self.icons).await?
        };

        if self.config.prune_icons {
            match self.icons.prune(&categories) {
                Ok(0) => {}
                Ok(n) => log::info!("pruned {n} stale icons"),
                Err(e) => log::warn!("icon prune failed: {e}"),
            }
        }
        Ok(categories)
    }

    /// The page is down: keep whatever was stored, never overwrite it.
    fn fallback(&self, reason: &str) -> Result<CategorySet> {
        self.note(LogLevel::Warn, "unreachable", reason);
        match self.cache.load_json::<CategorySet>(CATEGORIES_KEY)? {
            Some(stale) => {
                log::warn!("source unreachable, using stored categories: {reason}");
                Ok(stale)
            }
            None => {
                log::warn!("source unreachable and nothing stored: {reason}");
                Ok(Vec::new())
            }
        }
    }

    fn note_refresh(&self, categories: &CategorySet) {
        let sites: usize = categories.iter().map(|c| c.sites.len()).sum();
        let details = format!("{} categories, {sites} sites", categories.len());
        log::info!("refreshed: {details}");
        self.note(LogLevel::Info, "refresh", &details);
    }

    fn note(&self, level: LogLevel, event: &str, details: &str) {
        let Some(logger) = &self.activity else {
            return;
        };
        let details = (!details.is_empty()).then_some(details);
        if let Err(e) = logger.log(level, self.config.source_host(), event, details) {
            log::warn!("activity log write failed: {e}");
        }
    }
}
