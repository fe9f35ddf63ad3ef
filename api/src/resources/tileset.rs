use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, Result};

/// Highest zoom level the tiling service generates tiles for.
pub const MAX_ZOOM: u8 = 22;

pub const RECIPE_VERSION: u32 = 1;

/// The unique name of a tileset within its owner's account, without the `{owner}.` prefix.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct TilesetId(pub String);

impl TilesetId {
    /// `{owner}.{id}`, the form used to address the tileset in URL paths.
    pub fn full_id(&self, owner: &str) -> String {
        format!("{}.{}", owner, self.0)
    }
}

impl FromStr for TilesetId {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self> {
        if string.is_empty() || string.contains(['.', '/']) {
            Err(Error::BadTilesetId {
                identifier: string.into(),
            })
        } else {
            Ok(TilesetId(string.into()))
        }
    }
}

impl Display for TilesetId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    min_zoom: u8,
    max_zoom: u8,
}

impl ZoomRange {
    pub fn new(min_zoom: u8, max_zoom: u8) -> Result<Self> {
        if min_zoom <= max_zoom && max_zoom <= MAX_ZOOM {
            Ok(ZoomRange { min_zoom, max_zoom })
        } else {
            Err(Error::BadZoomRange { min_zoom, max_zoom })
        }
    }

    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Layer {
    pub source: String,
    pub minzoom: u8,
    pub maxzoom: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Recipe {
    pub version: u32,
    pub layers: BTreeMap<String, Layer>,
}

impl Recipe {
    /// A recipe generating one layer from one source.
    pub fn single_layer(layer_name: impl Into<String>, source: String, zoom: ZoomRange) -> Self {
        let mut layers = BTreeMap::new();
        layers.insert(
            layer_name.into(),
            Layer {
                source,
                minzoom: zoom.min_zoom(),
                maxzoom: zoom.max_zoom(),
            },
        );
        Recipe {
            version: RECIPE_VERSION,
            layers,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Tileset {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub center: Vec<f64>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub visibility: String,
    pub status: String,
    #[serde(default)]
    pub filesize: Option<u64>,
}

impl Tileset {
    /// The id without its `{owner}.` prefix.
    pub fn short_id(&self) -> &str {
        self.id
            .split_once('.')
            .map_or(self.id.as_str(), |(_, short_id)| short_id)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewTileset<'request> {
    pub recipe: &'request Recipe,
    pub name: &'request str,
    pub description: &'request str,
    pub attribution: Vec<Attribution>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Attribution {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub(crate) struct PublishResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "jobId")]
    pub job_id: String,
}
