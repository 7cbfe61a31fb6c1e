use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog keys starting with this character carry metadata, not platforms.
pub const METADATA_PREFIX: char = '$';

/// Placeholder substituted with the username in a platform url.
pub const USERNAME_PLACEHOLDER: &str = "{}";

pub fn is_metadata_key(name: &str) -> bool {
    name.starts_with(METADATA_PREFIX)
}

/// How a platform signals that a profile does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    StatusCode,
    Message,
}

/// Body substrings that mark a missing profile. The catalog allows either a
/// bare string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMsg {
    Single(String),
    Many(Vec<String>),
}

impl ErrorMsg {
    pub fn patterns(&self) -> &[String] {
        match self {
            ErrorMsg::Single(msg) => std::slice::from_ref(msg),
            ErrorMsg::Many(msgs) => msgs,
        }
    }

    /// True when no pattern is listed at all.
    pub fn is_empty(&self) -> bool {
        self.patterns().is_empty()
    }

    /// True when some pattern is the empty string, which matches every body.
    pub fn has_blank_pattern(&self) -> bool {
        self.patterns().iter().any(|p| p.is_empty())
    }
}

/// One probe target as described by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDefinition {
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    pub error_type: ErrorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<ErrorMsg>,
}

impl PlatformDefinition {
    pub fn status_code(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            error_type: ErrorType::StatusCode,
            error_msg: None,
        }
    }

    pub fn message(url: impl Into<String>, error_msg: ErrorMsg) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            error_type: ErrorType::Message,
            error_msg: Some(error_msg),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Url of the profile page for `username`. Only the first placeholder is
    /// replaced.
    pub fn profile_url(&self, username: &str) -> String {
        self.url.replacen(USERNAME_PLACEHOLDER, username, 1)
    }

    /// Body substrings that indicate "not found". Empty for status-code
    /// platforms.
    pub fn error_patterns(&self) -> &[String] {
        self.error_msg.as_ref().map(ErrorMsg::patterns).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Platform(PlatformDefinition),
    Metadata(serde_json::Value),
}

/// Name-keyed set of platform definitions plus metadata entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn insert_platform(&mut self, name: impl Into<String>, definition: PlatformDefinition) {
        self.insert(name, CatalogEntry::Platform(definition));
    }

    pub fn insert_metadata(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.insert(name, CatalogEntry::Metadata(value));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Probe targets: platform entries whose name is not a metadata key.
    pub fn platforms(&self) -> impl Iterator<Item = (&str, &PlatformDefinition)> {
        self.entries().filter_map(|(name, entry)| match entry {
            CatalogEntry::Platform(definition) if !is_metadata_key(name) => Some((name, definition)),
            _ => None,
        })
    }

    pub fn metadata(&self, key: &str) -> Option<&serde_json::Value> {
        match self.entries.get(key) {
            Some(CatalogEntry::Metadata(value)) => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of executing one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Response { status: u16, body: String },
    /// Timeout, DNS, connection or TLS failure.
    TransportFailure(String),
}

/// Classification of one probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "url", rename_all = "snake_case")]
pub enum Verdict {
    Found(String),
    NotFound,
    Error,
}

impl Verdict {
    pub fn is_found(&self) -> bool {
        matches!(self, Verdict::Found(_))
    }

    pub fn found_url(&self) -> Option<&str> {
        match self {
            Verdict::Found(url) => Some(url),
            _ => None,
        }
    }
}

/// Emitted once per completed probe, in completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub platform: String,
    pub verdict: Verdict,
    pub completed: usize,
    pub total: usize,
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoundAccount {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Positive matches in completion order.
    pub found: Vec<FoundAccount>,
    pub total: usize,
    pub completed: usize,
    pub errors: usize,
    pub cancelled: bool,
}

impl ScanReport {
    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.completed == self.total
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanInfo {
    pub username: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_seconds: f64,
    pub concurrency: usize,
    pub timeout_seconds: u64,
}

/// Shape of the `--output` JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedReport {
    pub scan_info: ScanInfo,
    pub report: ScanReport,
}
