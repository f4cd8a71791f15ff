// Bungalow availability: the calendar-day unavailable set fed to the
// calendar widget, the async source the portal fetches it from, and a TTL
// cache sitting between the two so month navigation does not hammer the
// upstream feed.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Unknown bungalow: {0}")]
    UnknownBungalow(String),

    #[error("Availability source unavailable: {0}")]
    SourceUnavailable(String),
}

// Set of calendar days that cannot be booked. Membership is compared by
// calendar day only; timestamps are truncated on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnavailableDates {
    days: HashSet<NaiveDate>,
}

impl UnavailableDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: NaiveDate) {
        self.days.insert(day);
    }

    pub fn insert_timestamp(&mut self, at: DateTime<Utc>) {
        self.days.insert(at.date_naive());
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<NaiveDate> for UnavailableDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

// Upstream seam for availability data. The production portal would back this
// with the booking office feed; tests and demos use the fixture source.
#[async_trait]
pub trait AvailabilitySource: Send + Sync + 'static {
    async fn fetch_unavailable(
        &self,
        bungalow_id: &str,
        year: i32,
        month: u32,
    ) -> Result<UnavailableDates, AvailabilityError>;
}

// Fixture-backed source holding a fixed per-bungalow date list
#[derive(Debug, Default)]
pub struct FixtureAvailabilitySource {
    blocked: HashMap<String, Vec<NaiveDate>>,
}

impl FixtureAvailabilitySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocked_dates(
        mut self,
        bungalow_id: &str,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        self.blocked
            .entry(bungalow_id.to_string())
            .or_default()
            .extend(dates);
        self
    }
}

#[async_trait]
impl AvailabilitySource for FixtureAvailabilitySource {
    async fn fetch_unavailable(
        &self,
        bungalow_id: &str,
        year: i32,
        month: u32,
    ) -> Result<UnavailableDates, AvailabilityError> {
        let dates = self
            .blocked
            .get(bungalow_id)
            .ok_or_else(|| AvailabilityError::UnknownBungalow(bungalow_id.to_string()))?;

        Ok(dates
            .iter()
            .filter(|d| d.year() == year && d.month() == month)
            .copied()
            .collect())
    }
}

// Cache configuration options
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            default_ttl: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Default)]
struct CacheStats {
    hit_count: AtomicUsize,
    miss_count: AtomicUsize,
    expired_count: AtomicUsize,
    eviction_count: AtomicUsize,
    fetch_count: AtomicUsize,
}

// Point-in-time snapshot of the cache counters
#[derive(Debug, Default, Clone)]
pub struct CacheStatsReport {
    pub entries: usize,
    pub hit_count: usize,
    pub miss_count: usize,
    pub expired_count: usize,
    pub eviction_count: usize,
    pub fetch_count: usize,
}

struct CacheEntry {
    dates: UnavailableDates,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

fn cache_key(bungalow_id: &str, year: i32, month: u32) -> String {
    format!("{}:{:04}-{:02}", bungalow_id, year, month)
}

// TTL cache over an AvailabilitySource, keyed by (bungalow, month). The
// sync lookup/insert pair is the hot path; unavailable_for is the
// fetch-through entry point the calendar host calls.
pub struct CachedAvailability<S> {
    source: S,
    entries: DashMap<String, CacheEntry>,
    config: CacheConfig,
    stats: CacheStats,
}

impl<S> CachedAvailability<S> {
    pub fn new(source: S, config: CacheConfig) -> Self {
        Self {
            source,
            entries: DashMap::new(),
            config,
            stats: CacheStats::default(),
        }
    }

    pub fn lookup(&self, bungalow_id: &str, year: i32, month: u32) -> Option<UnavailableDates> {
        let key = cache_key(bungalow_id, year, month);

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired() {
                self.stats.hit_count.fetch_add(1, Ordering::Relaxed);
                return Some(entry.dates.clone());
            }
        } else {
            self.stats.miss_count.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        // Expired entry: drop it and report a miss
        self.entries.remove(&key);
        self.stats.expired_count.fetch_add(1, Ordering::Relaxed);
        self.stats.miss_count.fetch_add(1, Ordering::Relaxed);
        debug!(%key, "availability cache entry expired");
        None
    }

    pub fn insert(
        &self,
        bungalow_id: &str,
        year: i32,
        month: u32,
        dates: UnavailableDates,
        ttl: Option<Duration>,
    ) {
        if self.entries.len() >= self.config.max_entries {
            self.evict_oldest();
        }

        let key = cache_key(bungalow_id, year, month);
        self.entries.insert(
            key,
            CacheEntry {
                dates,
                created_at: Instant::now(),
                ttl: ttl.unwrap_or(self.config.default_ttl),
            },
        );
    }

    // Drops entries for one bungalow, or everything when None. Returns the
    // number of entries removed.
    pub fn invalidate(&self, bungalow_id: Option<&str>) -> usize {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|e| {
                bungalow_id.map_or(true, |b| {
                    e.key().split(':').next().map_or(false, |head| head == b)
                })
            })
            .map(|e| e.key().clone())
            .collect();

        let count = keys.len();
        for key in keys {
            self.entries.remove(&key);
        }
        count
    }

    pub fn stats(&self) -> CacheStatsReport {
        CacheStatsReport {
            entries: self.entries.len(),
            hit_count: self.stats.hit_count.load(Ordering::Relaxed),
            miss_count: self.stats.miss_count.load(Ordering::Relaxed),
            expired_count: self.stats.expired_count.load(Ordering::Relaxed),
            eviction_count: self.stats.eviction_count.load(Ordering::Relaxed),
            fetch_count: self.stats.fetch_count.load(Ordering::Relaxed),
        }
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|e| e.value().created_at)
            .map(|e| e.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.eviction_count.fetch_add(1, Ordering::Relaxed);
            debug!(%key, "evicted oldest availability cache entry");
        }
    }
}

impl<S: AvailabilitySource> CachedAvailability<S> {
    pub async fn unavailable_for(
        &self,
        bungalow_id: &str,
        year: i32,
        month: u32,
    ) -> Result<UnavailableDates, AvailabilityError> {
        if let Some(dates) = self.lookup(bungalow_id, year, month) {
            return Ok(dates);
        }

        self.stats.fetch_count.fetch_add(1, Ordering::Relaxed);
        let dates = self
            .source
            .fetch_unavailable(bungalow_id, year, month)
            .await
            .map_err(|e| {
                warn!(bungalow_id, year, month, error = %e, "availability fetch failed");
                e
            })?;

        self.insert(bungalow_id, year, month, dates.clone(), None);
        Ok(dates)
    }
}
