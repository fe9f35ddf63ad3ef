use anyhow::{anyhow, Context, Result};
use mapbox_uploader_client::{Client, JobId, TilesetId, TilesetSourceId};
use structopt::StructOpt;

use crate::printer::Printer;

#[derive(Debug, StructOpt)]
pub enum GetArgs {
    #[structopt(name = "tileset-sources")]
    /// List the tileset sources of the account
    TilesetSources,

    #[structopt(name = "tileset-source")]
    /// Get a single tileset source
    TilesetSource {
        #[structopt(name = "tileset-source")]
        /// Id of the tileset source, in any accepted form
        tileset_source: TilesetSourceId,
    },

    #[structopt(name = "tilesets")]
    /// List the tilesets of the account
    Tilesets,

    #[structopt(name = "jobs")]
    /// List the processing jobs of a tileset
    Jobs {
        #[structopt(name = "tileset")]
        /// Id of the tileset, without the `{owner}.` prefix
        tileset: TilesetId,
    },

    #[structopt(name = "job")]
    /// Get a single processing job of a tileset
    Job {
        #[structopt(name = "tileset")]
        /// Id of the tileset, without the `{owner}.` prefix
        tileset: TilesetId,

        #[structopt(name = "job-id")]
        /// Id of the job
        job_id: JobId,
    },
}

pub fn run(get_args: &GetArgs, client: &Client, printer: &Printer) -> Result<()> {
    match get_args {
        GetArgs::TilesetSources => {
            let tileset_sources = client
                .get_tileset_sources()
                .context("Operation to list tileset sources has failed.")?;
            printer.print_resources(&tileset_sources)
        }
        GetArgs::TilesetSource { tileset_source } => {
            let found = client
                .get_tileset_source(tileset_source)
                .context("Operation to get tileset source has failed.")?
                .ok_or_else(|| {
                    anyhow!(
                        "Tileset source `{}` does not exist.",
                        tileset_source.canonical_id()
                    )
                })?;
            printer.print_resources(&[found])
        }
        GetArgs::Tilesets => {
            let tilesets = client
                .get_tilesets()
                .context("Operation to list tilesets has failed.")?;
            printer.print_resources(&tilesets)
        }
        GetArgs::Jobs { tileset } => {
            let jobs = client
                .get_jobs(tileset)
                .context("Operation to list jobs has failed.")?;
            printer.print_resources(&jobs)
        }
        GetArgs::Job { tileset, job_id } => {
            let job = client
                .get_job(tileset, job_id)
                .context("Operation to get job has failed.")?;
            printer.print_resources(&[job])
        }
    }
}
