//! # Document Cache
//!
//! Maps a live document to its most recently parsed model, keyed by URI and
//! validated by `(version, language_id)`. A hit returns the same `Arc`; any
//! version or language change reparses.
//!
//! Storage is a `moka` cache with two bounds:
//! - **size**: at most `max_entries` identities under strict LRU eviction
//! - **time**: entries idle for a whole cleanup interval expire
//!
//! moka only drops expired entries during its maintenance, so a [`Sweeper`]
//! thread runs that maintenance every cleanup interval.

pub mod sweeper;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;

use crate::model::PropertyCatalog;
use crate::parsing::ast::KafkaFileDocument;
use crate::parsing::parse_kafka_file;
use crate::parsing::text::TextDocument;

pub use sweeper::Sweeper;

pub const DEFAULT_MAX_ENTRIES: usize = 10;
pub const DEFAULT_CLEANUP_INTERVAL_SECONDS: i64 = 60;

/// Size and time bounds of a [`LanguageModelCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    pub max_entries: usize,
    /// Sweep period and idle lifetime; `None` disables the sweep.
    pub cleanup_interval: Option<Duration>,
}

impl CacheOptions {
    /// A non-positive interval disables the sweep.
    pub fn from_seconds(max_entries: usize, cleanup_interval_seconds: i64) -> Self {
        let cleanup_interval = u64::try_from(cleanup_interval_seconds)
            .ok()
            .filter(|&s| s > 0)
            .map(Duration::from_secs);
        Self {
            max_entries,
            cleanup_interval,
        }
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::from_seconds(DEFAULT_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECONDS)
    }
}

/// A parsed model and the document identity it was parsed from.
struct Entry<T> {
    model: Arc<T>,
    version: i64,
    language_id: Arc<str>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            version: self.version,
            language_id: Arc::clone(&self.language_id),
        }
    }
}

type ParseFn<T> = dyn Fn(&dyn TextDocument) -> T + Send + Sync;

/// LRU- and TTL-bounded cache of parsed models.
///
/// Parsing happens outside the cache, so a slow parse never blocks hits on
/// other documents.
pub struct LanguageModelCache<T> {
    entries: Cache<String, Entry<T>>,
    options: CacheOptions,
    parse: Box<ParseFn<T>>,
    sweeper: Option<Sweeper>,
}

/// The cache of parsed kafka files.
pub type DocumentCache = LanguageModelCache<KafkaFileDocument>;

impl LanguageModelCache<KafkaFileDocument> {
    /// A cache that parses kafka files against `catalog`.
    pub fn for_kafka_files(options: CacheOptions, catalog: PropertyCatalog) -> Self {
        Self::new(options, move |doc| parse_kafka_file(doc, &catalog))
    }
}

impl<T: Send + Sync + 'static> LanguageModelCache<T> {
    pub fn new<F>(options: CacheOptions, parse: F) -> Self
    where
        F: Fn(&dyn TextDocument) -> T + Send + Sync + 'static,
    {
        let mut builder = Cache::builder()
            .max_capacity(options.max_entries.max(1) as u64)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(|uri: Arc<String>, _entry: Entry<T>, cause| match cause {
                RemovalCause::Size => debug!("cache evicted least recently used: {uri}"),
                RemovalCause::Expired => debug!("cache expired idle entry: {uri}"),
                _ => {}
            });
        if let Some(interval) = options.cleanup_interval {
            builder = builder.time_to_idle(interval);
        }
        let entries = builder.build();
        let sweeper = options
            .cleanup_interval
            .and_then(|interval| spawn_sweeper(entries.clone(), interval));
        Self {
            entries,
            options,
            parse: Box::new(parse),
            sweeper,
        }
    }

    pub fn options(&self) -> CacheOptions {
        self.options
    }

    /// Returns the model for `doc`, parsing only when nothing valid is cached.
    pub fn get(&self, doc: &dyn TextDocument) -> Arc<T> {
        let uri = doc.uri();
        let version = doc.version();
        let language_id = doc.language_id();

        if let Some(entry) = self.entries.get(uri)
            && entry.version == version
            && *entry.language_id == *language_id
        {
            debug!("cache hit: {uri} v{version}");
            return entry.model;
        }

        debug!("cache miss: {uri} v{version}, parsing");
        let model = Arc::new((self.parse)(doc));
        let is_new = !self.entries.contains_key(uri);
        self.entries.insert(
            uri.to_string(),
            Entry {
                model: Arc::clone(&model),
                version,
                language_id: Arc::from(language_id),
            },
        );
        if is_new {
            // Applies pending accesses in order, then evicts down to capacity.
            self.entries.run_pending_tasks();
        }
        model
    }

    /// Drops the entry for a closed or deleted document.
    pub fn on_document_removed(&self, doc: &dyn TextDocument) {
        self.remove_uri(doc.uri());
    }

    pub fn remove_uri(&self, uri: &str) -> bool {
        let removed = self.entries.remove(uri).is_some();
        if removed {
            self.entries.run_pending_tasks();
            debug!("cache removed: {uri}");
        }
        removed
    }

    /// Runs one expiry pass now; returns how many entries were dropped.
    ///
    /// Does nothing when the sweep is disabled.
    pub fn sweep_expired(&self) -> usize {
        if self.options.cleanup_interval.is_none() {
            return 0;
        }
        sweep(&self.entries)
    }

    /// Stops the sweeper and clears every entry.
    pub fn dispose(&mut self) {
        if let Some(mut sweeper) = self.sweeper.take() {
            sweeper.stop();
        }
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.as_ref().is_some_and(Sweeper::is_running)
    }

    /// Number of live entries, counted after pending maintenance.
    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.entries.contains_key(uri)
    }
}

fn sweep<T: Send + Sync + 'static>(entries: &Cache<String, Entry<T>>) -> usize {
    let before = entries.entry_count();
    entries.run_pending_tasks();
    let removed = before.saturating_sub(entries.entry_count()) as usize;
    if removed > 0 {
        debug!("cache sweep removed {removed} idle entries");
    }
    removed
}

fn spawn_sweeper<T: Send + Sync + 'static>(
    entries: Cache<String, Entry<T>>,
    interval: Duration,
) -> Option<Sweeper> {
    match Sweeper::spawn(interval, move || {
        sweep(&entries);
    }) {
        Ok(sweeper) => Some(sweeper),
        Err(e) => {
            warn!("could not start cache sweeper, idle entries stay until the next write: {e}");
            None
        }
    }
}
