//! Bring a tileset and its backing source to a published state.
//!
//! One run is strictly sequential: look the source up, then either replace its contents or
//! create it together with the tileset, then publish the tileset and read the resulting job
//! once. Nothing is kept between runs, the tiling service is the only source of truth. Errors
//! abort the run where they occur and earlier writes are left in place, so a failed run is
//! repaired by running it again.

use log::{debug, info};
use serde::Serialize;
use std::str::FromStr;

use crate::{
    error::Result,
    resources::{
        job::{Job, JobId},
        tileset::{Recipe, TilesetId, ZoomRange},
        tileset_source::{SourcePayload, TilesetSource, TilesetSourceId},
    },
    TilesetService,
};

/// Caller supplied parameters of a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileRequest<'request> {
    /// Tileset source reference in any accepted form.
    pub tileset_source: &'request str,
    pub tileset_id: &'request TilesetId,
    pub tileset_name: &'request str,
    pub layer_name: &'request str,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub payload: &'request SourcePayload,
}

/// Which branch a run took for the tileset source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePath {
    /// The source was new; it was created along with the tileset.
    Created,
    /// The source existed and its contents were replaced. The tileset was left untouched.
    Updated,
}

/// What a successful run observed. The job stage is reported, not acted upon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobObservation {
    pub path: SourcePath,
    pub tileset_source: TilesetSource,
    pub recipe: Option<Recipe>,
    pub job_id: JobId,
    pub job: Job,
}

pub fn reconcile_and_publish(
    service: &impl TilesetService,
    request: &ReconcileRequest<'_>,
) -> Result<JobObservation> {
    let source_id = TilesetSourceId::from_str(request.tileset_source)?;
    let zoom = ZoomRange::new(request.min_zoom, request.max_zoom)?;

    let (path, tileset_source, recipe) = match service.get_tileset_source(&source_id)? {
        Some(existing) => {
            info!(
                "Tileset source `{}` exists, replacing its contents.",
                existing.id.canonical_id()
            );
            let updated = service.update_tileset_source(&existing.id, request.payload)?;
            (SourcePath::Updated, updated, None)
        }
        None => {
            info!(
                "Tileset source `{}` does not exist, creating it.",
                source_id.short_id()
            );
            let created = service.create_tileset_source(&source_id, request.payload)?;

            let recipe =
                Recipe::single_layer(request.layer_name, created.id.canonical_id(), zoom);
            info!(
                "Creating tileset `{}` with layer `{}` from `{}`.",
                request.tileset_id,
                request.layer_name,
                created.id.canonical_id()
            );
            service.create_tileset(request.tileset_id, request.tileset_name, &recipe)?;
            (SourcePath::Created, created, Some(recipe))
        }
    };

    let job_id = service.publish_tileset(request.tileset_id)?;
    info!(
        "Published tileset `{}` as job `{}`.",
        request.tileset_id, job_id
    );

    let job = service.get_job(request.tileset_id, &job_id)?;
    info!("Job `{}` is at stage `{}`.", job_id, job.stage);
    debug!("{:?}", job);

    Ok(JobObservation {
        path,
        tileset_source,
        recipe,
        job_id,
        job,
    })
}
