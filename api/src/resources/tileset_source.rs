use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, Result};

pub const CANONICAL_ID_PREFIX: &str = "mapbox://tileset-source/";

const MAX_NAME_LENGTH: usize = 32;

static CANONICAL_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^mapbox://tileset-source/(.+)/(.+)$").expect("Canonical id pattern is valid")
});

/// The textual form a tileset source reference was given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdForm<'a> {
    /// `mapbox://tileset-source/{owner}/{name}`
    Canonical { owner: &'a str, name: &'a str },
    /// `{owner}.{name}`
    Namespaced { owner: &'a str, name: &'a str },
    /// `{name}`
    Bare { name: &'a str },
}

impl<'a> IdForm<'a> {
    /// Classify a raw reference. Patterns are tried in order: canonical, namespaced, bare.
    ///
    /// The name is always the last segment after splitting on `.` or `/`, so the same logical
    /// reference yields the same name whatever form it was written in.
    pub fn classify(raw: &'a str) -> Self {
        let name = raw.rsplit(|c: char| c == '.' || c == '/').next().unwrap_or(raw);

        if let Some(captures) = CANONICAL_ID_PATTERN.captures(raw) {
            if let Some(owner) = captures.get(1) {
                return IdForm::Canonical {
                    owner: owner.as_str(),
                    name,
                };
            }
        }

        match raw.split_once('.') {
            Some((owner, _)) => IdForm::Namespaced { owner, name },
            None => IdForm::Bare { name },
        }
    }

    pub fn owner(&self) -> &'a str {
        match *self {
            IdForm::Canonical { owner, .. } | IdForm::Namespaced { owner, .. } => owner,
            IdForm::Bare { .. } => "",
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            IdForm::Canonical { name, .. }
            | IdForm::Namespaced { name, .. }
            | IdForm::Bare { name } => name,
        }
    }
}

/// A validated reference to a tileset source.
///
/// Parsed from any of the three accepted forms (see [`IdForm`]). The short name is used to
/// address the source in URL paths, the canonical id to reference it from a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct TilesetSourceId {
    raw: String,
    owner: String,
    name: String,
}

impl TilesetSourceId {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Owner parsed from the reference, empty for the bare form.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn short_id(&self) -> &str {
        &self.name
    }

    /// `mapbox://tileset-source/{owner}/{name}`.
    ///
    /// An empty owner is rendered as is, giving `mapbox://tileset-source//{name}`.
    pub fn canonical_id(&self) -> String {
        format!("{}{}/{}", CANONICAL_ID_PREFIX, self.owner, self.name)
    }

    /// Canonical id with `default_owner` standing in for a missing owner.
    pub fn canonical_id_with_owner(&self, default_owner: &str) -> String {
        let owner = if self.owner.is_empty() {
            default_owner
        } else {
            &self.owner
        };
        format!("{}{}/{}", CANONICAL_ID_PREFIX, owner, self.name)
    }

    pub fn form(&self) -> IdForm<'_> {
        IdForm::classify(&self.raw)
    }
}

fn is_valid_name(name: &str) -> bool {
    (1..=MAX_NAME_LENGTH).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for TilesetSourceId {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self> {
        let form = IdForm::classify(string);
        if !is_valid_name(form.name()) {
            return Err(Error::BadTilesetSourceId {
                identifier: string.into(),
            });
        }

        Ok(TilesetSourceId {
            raw: string.into(),
            owner: form.owner().into(),
            name: form.name().into(),
        })
    }
}

impl Display for TilesetSourceId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        write!(formatter, "{}", self.raw)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TilesetSource {
    pub id: TilesetSourceId,
    pub files: u64,
    pub size: u64,
    pub size_nice: Option<String>,
}

/// Raw geospatial content uploaded to a tileset source, forwarded without inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePayload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl SourcePayload {
    pub const DEFAULT_FILE_NAME: &'static str = "file.geojson";

    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        SourcePayload {
            file_name: Self::DEFAULT_FILE_NAME.to_owned(),
            content: content.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub(crate) struct GetResponse {
    pub id: TilesetSourceId,
    pub files: u64,
    pub size: u64,
    #[serde(default)]
    pub size_nice: Option<String>,
}

impl From<GetResponse> for TilesetSource {
    fn from(response: GetResponse) -> Self {
        TilesetSource {
            id: response.id,
            files: response.files,
            size: response.size,
            size_nice: response.size_nice,
        }
    }
}

/// Response to both creating and replacing a tileset source.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub(crate) struct WriteResponse {
    pub id: TilesetSourceId,
    pub files: u64,
    pub file_size: u64,
    pub source_size: u64,
}

impl From<WriteResponse> for TilesetSource {
    fn from(response: WriteResponse) -> Self {
        TilesetSource {
            id: response.id,
            files: response.files,
            size: response.file_size,
            size_nice: Some(response.source_size.to_string()),
        }
    }
}
