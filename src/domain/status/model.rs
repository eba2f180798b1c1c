use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written by this service.
pub const STATUS_SCHEMA_VERSION: u32 = 2;

/// One generated audio artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub version: u64,
    pub filename: String,
    pub url: String,
    /// `None` for entries imported from records that carried no usable timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Durable pointer and log of generated audio, stored as `status.json`.
///
/// `version` and `audio_url` always mirror the newest history entry so that
/// readers of the old flat shape keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    schema_version: u32,
    version: u64,
    audio_url: Option<String>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self {
            schema_version: STATUS_SCHEMA_VERSION,
            version: 0,
            audio_url: None,
            history: Vec::new(),
        }
    }
}

impl StatusRecord {
    /// Record with a version counter but no artifacts (e.g. a migrated flat
    /// record whose pointer was empty).
    pub fn with_version(version: u64) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Record from possibly inconsistent stored fields, reconciled by
    /// [`StatusRecord::normalized`].
    pub(crate) fn from_parts(
        version: u64,
        audio_url: Option<String>,
        history: Vec<HistoryEntry>,
    ) -> Self {
        Self {
            schema_version: STATUS_SCHEMA_VERSION,
            version,
            audio_url,
            history,
        }
        .normalized()
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.audio_url.as_deref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Entry for the next conversion, numbered `version + 1`. `None` once the
    /// counter cannot be incremented any further.
    pub fn next_entry(
        &self,
        filename: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Option<HistoryEntry> {
        let version = self.version.checked_add(1)?;

        Some(HistoryEntry {
            version,
            filename: filename.into(),
            url: url.into(),
            created_at: Some(created_at),
        })
    }

    /// Append an entry produced by [`StatusRecord::next_entry`].
    pub fn append(&mut self, entry: HistoryEntry) {
        debug_assert_eq!(self.version.checked_add(1), Some(entry.version));
        self.push(entry);
    }

    /// Restore the pointer invariant after decoding a record written by
    /// another process.
    ///
    /// History is ordered by version. A top-level pointer newer than the
    /// history becomes an entry of its own, so numbering never goes back.
    pub(crate) fn normalized(mut self) -> Self {
        self.history.sort_by_key(|entry| entry.version);

        let last_version = self.history.last().map_or(0, |entry| entry.version);
        if self.version > last_version {
            if let Some(url) = self.audio_url.take().filter(|url| !url.is_empty()) {
                self.history.push(HistoryEntry {
                    version: self.version,
                    filename: filename_from_url(&url),
                    url,
                    created_at: None,
                });
            }
        }

        match self.history.last() {
            Some(last) => {
                self.version = last.version;
                self.audio_url = Some(last.url.clone());
            }
            None => self.audio_url = None,
        }
        self
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.version = entry.version;
        self.audio_url = Some(entry.url.clone());
        self.history.push(entry);
    }

    pub fn to_json_pretty(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

/// Last non-empty path segment of an object URL.
pub(crate) fn filename_from_url(url: &str) -> String {
    url.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(url)
        .to_string()
}
