//! Block directory state: four independent slices under one root
//!
//! The shape mirrors what the editor UI reads: every field serializes to
//! camelCase, and error notices serialize as a message string or `false`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A block offered by the block directory API
///
/// The record is owned by the API; this crate stores and returns it
/// without looking inside. Unknown fields are ignored on decode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadableBlock {
    pub id: String,
    /// Block type slug, e.g. `boxer/boxer`
    pub name: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub rating: f32,
    pub rating_count: u32,
    pub active_installs: u64,
    pub author_block_rating: f32,
    pub author_block_count: u32,
    pub author: String,
    /// Script and style URLs the block needs once installed
    pub assets: Vec<String>,
    pub humanized_updated: String,
}

/// A block type present on the local installation
///
/// Identity is the `name` slug; removal matches on it. Decodes from a
/// full record or a bare name string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireInstalledBlockType")]
pub struct InstalledBlockType {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,
}

impl InstalledBlockType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether `other` refers to the same block type
    pub fn same_type(&self, other: &InstalledBlockType) -> bool {
        self.name == other.name
    }
}

#[derive(Deserialize)]
struct InstalledRecord {
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    assets: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireInstalledBlockType {
    Name(String),
    Record(InstalledRecord),
}

impl From<WireInstalledBlockType> for InstalledBlockType {
    fn from(wire: WireInstalledBlockType) -> Self {
        match wire {
            WireInstalledBlockType::Name(name) => InstalledBlockType::new(name),
            WireInstalledBlockType::Record(record) => Self {
                name: record.name,
                title: record.title,
                id: record.id,
                assets: record.assets,
            },
        }
    }
}

impl From<&str> for InstalledBlockType {
    fn from(name: &str) -> Self {
        InstalledBlockType::new(name)
    }
}

impl From<&DownloadableBlock> for InstalledBlockType {
    fn from(block: &DownloadableBlock) -> Self {
        Self {
            name: block.name.clone(),
            title: block.title.clone(),
            id: block.id.clone(),
            assets: block.assets.clone(),
        }
    }
}

/// Request status and results for one search term
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub is_requesting: bool,
    #[serde(default)]
    pub results: Vec<DownloadableBlock>,
}

/// Search term -> request status and results
pub type DownloadableBlocksState = BTreeMap<String, SearchResults>;

/// Installed block types and in-flight installs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockManagementState {
    /// Append-only list; duplicates are kept
    #[serde(default)]
    pub installed_block_types: Vec<InstalledBlockType>,
    #[serde(default)]
    pub is_installing: BTreeMap<String, bool>,
}

/// A per-block error notice
///
/// `Cleared` is an explicit "no error" marker, kept in the map so the UI
/// can tell a resolved error from one never reported. On the wire it is
/// `false`; a message is a plain string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireNotice", into = "WireNotice")]
pub enum ErrorNotice {
    Message(String),
    Cleared,
}

impl ErrorNotice {
    /// The message, or `None` when cleared
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorNotice::Message(message) => Some(message),
            ErrorNotice::Cleared => None,
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, ErrorNotice::Cleared)
    }
}

impl From<&str> for ErrorNotice {
    fn from(message: &str) -> Self {
        ErrorNotice::Message(message.to_string())
    }
}

impl From<String> for ErrorNotice {
    fn from(message: String) -> Self {
        ErrorNotice::Message(message)
    }
}

impl From<Option<String>> for ErrorNotice {
    fn from(message: Option<String>) -> Self {
        message.map_or(ErrorNotice::Cleared, ErrorNotice::Message)
    }
}

impl fmt::Display for ErrorNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorNotice::Message(message) => f.write_str(message),
            ErrorNotice::Cleared => f.write_str("false"),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireNotice {
    Message(String),
    Flag(bool),
}

impl TryFrom<WireNotice> for ErrorNotice {
    type Error = String;

    fn try_from(wire: WireNotice) -> Result<Self, Self::Error> {
        match wire {
            WireNotice::Message(message) => Ok(ErrorNotice::Message(message)),
            WireNotice::Flag(false) => Ok(ErrorNotice::Cleared),
            WireNotice::Flag(true) => {
                Err("error notice must be a message string or `false`, found `true`".to_string())
            }
        }
    }
}

impl From<ErrorNotice> for WireNotice {
    fn from(notice: ErrorNotice) -> Self {
        match notice {
            ErrorNotice::Message(message) => WireNotice::Message(message),
            ErrorNotice::Cleared => WireNotice::Flag(false),
        }
    }
}

/// Block id -> error notice
pub type ErrorNotices = BTreeMap<String, ErrorNotice>;

/// Root state of the block directory store
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, block_directory::DebugState)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockDirectoryState {
    #[debug(section = "Search", label = "queries", with = "describe_searches")]
    pub downloadable_blocks: DownloadableBlocksState,

    #[debug(section = "Installed", label = "block types", with = "describe_installed")]
    pub block_management: BlockManagementState,

    #[debug(section = "Permissions", label = "install blocks")]
    pub has_permission: bool,

    #[debug(section = "Errors", label = "notices", with = "describe_notices")]
    pub error_notices: ErrorNotices,
}

fn describe_searches(searches: &DownloadableBlocksState) -> String {
    if searches.is_empty() {
        return "none".to_string();
    }
    searches
        .iter()
        .map(|(query, entry)| {
            let status = if entry.is_requesting {
                "requesting"
            } else {
                "done"
            };
            format!("{query:?} {status} ({} results)", entry.results.len())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_installed(management: &BlockManagementState) -> String {
    let mut names: Vec<&str> = management
        .installed_block_types
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    let installing: Vec<&str> = management
        .is_installing
        .iter()
        .filter(|(_, busy)| **busy)
        .map(|(id, _)| id.as_str())
        .collect();

    if names.is_empty() {
        names.push("none");
    }
    if installing.is_empty() {
        names.join(", ")
    } else {
        format!("{} (installing: {})", names.join(", "), installing.join(", "))
    }
}

fn describe_notices(notices: &ErrorNotices) -> String {
    if notices.is_empty() {
        return "none".to_string();
    }
    notices
        .iter()
        .map(|(id, notice)| format!("{id}: {notice}"))
        .collect::<Vec<_>>()
        .join(", ")
}
