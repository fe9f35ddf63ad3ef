use anyhow::{Context, Result};
use log::info;
use mapbox_uploader_client::{
    reconcile_and_publish, Client, ReconcileRequest, SourcePayload, TilesetId, TilesetSourceId,
    ZoomRange,
};
use std::path::PathBuf;
use structopt::StructOpt;

use crate::{printer::Printer, utils::read_payload};

#[derive(Debug, StructOpt)]
pub struct PublishArgs {
    #[structopt(name = "tileset-source")]
    /// Tileset source to create or replace. One of `mapbox://tileset-source/{owner}/{id}`,
    /// `{owner}.{id}` or `{id}`
    tileset_source: TilesetSourceId,

    #[structopt(name = "tileset")]
    /// Id of the tileset to create and publish, without the `{owner}.` prefix
    tileset: TilesetId,

    #[structopt(short = "f", long = "file", parse(from_os_str))]
    /// Path to the line-delimited GeoJSON to upload. If not specified, stdin is used.
    file: Option<PathBuf>,

    #[structopt(short = "n", long = "name")]
    /// Display name of a newly created tileset. Defaults to the tileset id.
    name: Option<String>,

    #[structopt(short = "l", long = "layer")]
    /// Layer name in the recipe of a newly created tileset. Defaults to the tileset id.
    layer: Option<String>,

    #[structopt(long = "min-zoom", default_value = "0")]
    /// Lowest zoom level to generate tiles for
    min_zoom: u8,

    #[structopt(long = "max-zoom", default_value = "5")]
    /// Highest zoom level to generate tiles for
    max_zoom: u8,
}

pub fn run(args: &PublishArgs, client: &Client, printer: &Printer) -> Result<()> {
    let PublishArgs {
        tileset_source,
        tileset,
        file,
        name,
        layer,
        min_zoom,
        max_zoom,
    } = args;

    ZoomRange::new(*min_zoom, *max_zoom)?;

    let content = read_payload(file.as_deref())?;
    let mut payload = SourcePayload::new(content);
    if let Some(file_name) = file
        .as_ref()
        .and_then(|file| file.file_name())
        .and_then(|file_name| file_name.to_str())
    {
        payload = payload.with_file_name(file_name);
    }

    let observation = reconcile_and_publish(
        client,
        &ReconcileRequest {
            tileset_source: tileset_source.raw(),
            tileset_id: tileset,
            tileset_name: name.as_deref().unwrap_or(&tileset.0),
            layer_name: layer.as_deref().unwrap_or(&tileset.0),
            min_zoom: *min_zoom,
            max_zoom: *max_zoom,
            payload: &payload,
        },
    )
    .with_context(|| format!("Could not publish tileset `{}`", tileset.full_id(client.owner())))?;

    if !observation.job.stage.is_finished() {
        info!(
            "Job `{}` is still running, check on it with `mbu get job {} {}`.",
            observation.job_id, tileset, observation.job_id
        );
    }
    printer.print_resources(&[observation])
}
