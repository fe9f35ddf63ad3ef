use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::resources::tileset::Recipe;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct JobId(pub String);

impl FromStr for JobId {
    type Err = Infallible;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(JobId(string.into()))
    }
}

impl Display for JobId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        write!(formatter, "{}", self.0)
    }
}

/// A processing job started by publishing a tileset. Its stage is advanced server side.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub stage: JobStage,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub created_nice: Option<String>,
    #[serde(default)]
    pub published: Option<i64>,
    #[serde(rename = "tilesetId", default)]
    pub tileset_id: String,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    #[serde(default)]
    pub warnings: Vec<serde_json::Value>,
    #[serde(default)]
    pub recipe: Option<Recipe>,
}

#[derive(Debug, Clone, SerializeDisplay, DeserializeFromStr, PartialEq, Eq, Hash)]
pub enum JobStage {
    Queued,
    Processing,
    Success,
    Failed,
    Superseded,
    Unknown(Box<str>),
}

impl JobStage {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobStage::Success | JobStage::Failed | JobStage::Superseded
        )
    }
}

impl FromStr for JobStage {
    type Err = Infallible;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(match string {
            "queued" => JobStage::Queued,
            "processing" => JobStage::Processing,
            "success" => JobStage::Success,
            "failed" => JobStage::Failed,
            "superseded" => JobStage::Superseded,
            value => JobStage::Unknown(value.into()),
        })
    }
}

impl Display for JobStage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        write!(
            formatter,
            "{}",
            match self {
                JobStage::Queued => "queued",
                JobStage::Processing => "processing",
                JobStage::Success => "success",
                JobStage::Failed => "failed",
                JobStage::Superseded => "superseded",
                JobStage::Unknown(value) => value.as_ref(),
            }
        )
    }
}
