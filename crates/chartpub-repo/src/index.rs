//! Repository index types
//!
//! Helm-compatible `index.yaml` catalog and the merge engine that keeps it
//! up to date across releases. Every append replaces the exact
//! `(name, version)` pair it targets, keeps all other history, and leaves
//! each name's list sorted newest version first.

use chartpub_core::{DEFAULT_API_VERSION, Manifest, scalar_to_string};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::clock::{Clock, format_timestamp};
use crate::error::{RepoError, Result};
use crate::version::compare_versions;

/// The only index schema this engine reads or writes
pub const INDEX_API_VERSION: &str = "v1";

/// Entry keys computed by the engine; manifests and overrides never set them
pub const RESERVED_FIELDS: [&str; 6] = [
    "name",
    "version",
    "apiVersion",
    "created",
    "digest",
    "urls",
];

/// Extra entry fields applied after manifest passthrough
pub type Overrides = IndexMap<String, Value>;

/// Repository index (Helm-compatible)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryIndex {
    api_version: String,

    /// When this index was last appended to
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_scalar"
    )]
    generated: Option<String>,

    /// Entries by chart name, each list newest version first
    #[serde(default, deserialize_with = "entries_or_empty")]
    entries: BTreeMap<String, Vec<IndexEntry>>,

    /// Other top-level keys (`serverInfo`, `annotations`, ...)
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl Default for RepositoryIndex {
    fn default() -> Self {
        Self::empty()
    }
}

/// What [`RepositoryIndex::load_with_outcome`] found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file at the path
    Missing,
    /// File parsed as a v1 index
    Loaded,
    /// File existed but was unusable and has been replaced by an empty index
    Discarded { reason: String },
}

impl RepositoryIndex {
    /// An index with no entries and no `generated` timestamp
    pub fn empty() -> Self {
        Self {
            api_version: INDEX_API_VERSION.to_string(),
            generated: None,
            entries: BTreeMap::new(),
            extra: IndexMap::new(),
        }
    }

    /// Load an index from `path`, falling back to an empty index
    ///
    /// A missing, unreadable, unparsable or non-v1 file never fails the
    /// caller. Discarded files are reported through `tracing`.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        Self::load_with_outcome(path).0
    }

    /// Like [`RepositoryIndex::load`], but also reports what happened
    pub fn load_with_outcome<P: AsRef<Path>>(path: P) -> (Self, LoadOutcome) {
        let path = path.as_ref();
        if !path.exists() {
            return (Self::empty(), LoadOutcome::Missing);
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| format!("unreadable: {}", e))
            .and_then(|content| Self::from_yaml(&content));

        match parsed {
            Ok(index) => (index, LoadOutcome::Loaded),
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    %reason,
                    "Discarding existing index, starting from an empty one"
                );
                (Self::empty(), LoadOutcome::Discarded { reason })
            }
        }
    }

    /// Parse a v1 index document
    fn from_yaml(yaml: &str) -> std::result::Result<Self, String> {
        let document: Value = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;

        let api_version = document.get("apiVersion").and_then(scalar_to_string);
        if api_version.as_deref() != Some(INDEX_API_VERSION) {
            return Err(format!(
                "unsupported apiVersion {}, expected {}",
                api_version.as_deref().unwrap_or("<none>"),
                INDEX_API_VERSION
            ));
        }

        serde_yaml::from_value(document).map_err(|e| e.to_string())
    }

    /// Serialize the index to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the index to `path`, replacing any existing file
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RepoError::io(parent, e))?;
        }
        let content = self.to_yaml()?;
        std::fs::write(path, content).map_err(|e| RepoError::io(path, e))
    }

    /// Index schema version (always `v1`)
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Timestamp of the most recent append, if any
    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// True when no chart has any entry
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// A top-level key other than `apiVersion`, `generated` and `entries`
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// All chart names, alphabetically
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All versions of a chart, newest first
    pub fn get(&self, name: &str) -> &[IndexEntry] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// A specific version of a chart
    pub fn get_version(&self, name: &str, version: &str) -> Option<&IndexEntry> {
        self.get(name).iter().find(|e| e.version == version)
    }

    /// Highest version of a chart
    pub fn latest(&self, name: &str) -> Option<&IndexEntry> {
        self.get(name).first()
    }

    /// Index one archive and return the merged result
    ///
    /// The receiver is left untouched. Any existing entry with the same name
    /// and version string is replaced; everything else is preserved.
    pub fn append(
        &self,
        manifest: &Manifest,
        archive_path: &Path,
        base_url: &str,
        overrides: Option<&Overrides>,
        clock: &dyn Clock,
    ) -> Result<Self> {
        let name = manifest.name();
        if name.trim().is_empty() {
            return Err(RepoError::InvalidInput {
                message: "manifest name must not be empty".to_string(),
            });
        }
        let version = manifest
            .version()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| RepoError::InvalidInput {
                message: format!("manifest for {} has no version", name),
            })?;

        let digest = digest_file(archive_path)?;
        let created = format_timestamp(&clock.now());
        let urls = build_urls(base_url, archive_path)?;

        let entry = IndexEntry {
            api_version: Some(
                manifest
                    .api_version()
                    .unwrap_or(DEFAULT_API_VERSION)
                    .to_string(),
            ),
            name: name.to_string(),
            version: version.to_string(),
            created: Some(created.clone()),
            digest: Some(digest),
            urls,
            metadata: entry_metadata(manifest, overrides),
        };

        let mut next = self.clone();
        let versions = next.entries.entry(entry.name.clone()).or_default();
        let replaced = versions.len();
        versions.retain(|existing| existing.version != entry.version);
        let replaced = replaced - versions.len();

        tracing::debug!(
            name = %entry.name,
            version = %entry.version,
            replaced,
            "Appending index entry"
        );

        versions.insert(0, entry);
        versions.sort_by(|a, b| compare_versions(&b.version, &a.version));

        next.api_version = INDEX_API_VERSION.to_string();
        next.generated = Some(created);
        Ok(next)
    }
}

/// One version of one chart in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Chart schema tag
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_scalar"
    )]
    pub api_version: Option<String>,

    /// Chart name
    #[serde(deserialize_with = "scalar")]
    pub name: String,

    /// Chart version
    #[serde(deserialize_with = "scalar")]
    pub version: String,

    /// When this entry was written
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_scalar"
    )]
    pub created: Option<String>,

    /// Hex SHA-256 of the archive
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_scalar"
    )]
    pub digest: Option<String>,

    /// Download locations
    #[serde(default)]
    pub urls: Vec<String>,

    /// Passthrough and override fields
    #[serde(flatten)]
    pub metadata: IndexMap<String, Value>,
}

impl IndexEntry {
    /// Primary download URL
    pub fn download_url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }
}

/// True for keys only the engine may set
pub fn is_reserved(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}

/// Manifest fields minus reserved keys, then overrides on top
fn entry_metadata(manifest: &Manifest, overrides: Option<&Overrides>) -> IndexMap<String, Value> {
    let mut metadata = IndexMap::new();

    for (key, value) in manifest.fields() {
        if is_reserved(key) {
            if !matches!(key, "name" | "version" | "apiVersion") {
                tracing::debug!(field = key, "Ignoring reserved field from manifest");
            }
            continue;
        }
        metadata.insert(key.to_string(), coerce_field(key, value));
    }

    for (key, value) in overrides.into_iter().flatten() {
        if is_reserved(key) {
            tracing::warn!(field = %key, "Ignoring override of reserved index field");
            continue;
        }
        metadata.insert(key.clone(), coerce_field(key, value));
    }

    metadata
}

/// Helm requires `appVersion` to be a string
fn coerce_field(key: &str, value: &Value) -> Value {
    match (key, value) {
        ("appVersion", Value::Number(n)) => Value::String(n.to_string()),
        _ => value.clone(),
    }
}

/// Hex-encoded SHA-256 of a file's bytes
pub fn digest_file(path: &Path) -> Result<String> {
    let archive_error = |source| RepoError::Archive {
        path: path.display().to_string(),
        source,
    };

    let file = std::fs::File::open(path).map_err(archive_error)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(archive_error)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Download URLs for an archive
///
/// A blank base URL yields the bare file name, resolved by clients relative
/// to the index itself.
pub fn build_urls(base_url: &str, archive_path: &Path) -> Result<Vec<String>> {
    let file_name = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| RepoError::InvalidInput {
            message: format!("archive path {} has no file name", archive_path.display()),
        })?;

    let base = base_url.trim();
    if base.is_empty() {
        return Ok(vec![file_name]);
    }

    Ok(vec![format!("{}/{}", base.trim_end_matches('/'), file_name)])
}

fn scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value).ok_or_else(|| serde::de::Error::custom("expected a scalar value"))
}

fn optional_scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => scalar_to_string(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected a scalar value")),
    }
}

fn entries_or_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Vec<IndexEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
