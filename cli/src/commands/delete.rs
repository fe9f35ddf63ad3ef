use anyhow::{Context, Result};
use log::info;
use mapbox_uploader_client::{Client, TilesetId, TilesetSourceId};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub enum DeleteArgs {
    #[structopt(name = "tileset-source")]
    /// Delete a tileset source
    TilesetSource {
        #[structopt(name = "tileset-source")]
        /// Id of the tileset source to delete, in any accepted form
        tileset_source: TilesetSourceId,
    },

    #[structopt(name = "tileset")]
    /// Delete a tileset
    Tileset {
        #[structopt(name = "tileset")]
        /// Id of the tileset to delete, without the `{owner}.` prefix
        tileset: TilesetId,
    },
}

pub fn run(delete_args: &DeleteArgs, client: &Client) -> Result<()> {
    match delete_args {
        DeleteArgs::TilesetSource { tileset_source } => {
            client
                .delete_tileset_source(tileset_source)
                .context("Operation to delete tileset source has failed.")?;
            info!("Deleted tileset source `{}`.", tileset_source.short_id());
        }
        DeleteArgs::Tileset { tileset } => {
            client
                .delete_tileset(tileset)
                .context("Operation to delete tileset has failed.")?;
            info!("Deleted tileset `{}`.", tileset.full_id(client.owner()));
        }
    };
    Ok(())
}
