use anyhow::{Context, Result};
use log::info;
use mapbox_uploader_client::{Client, Recipe, TilesetId, TilesetSourceId, ZoomRange};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub enum UpdateArgs {
    #[structopt(name = "recipe")]
    /// Replace the recipe of an existing tileset with a single layer recipe
    Recipe {
        #[structopt(name = "tileset")]
        /// Id of the tileset to update, without the `{owner}.` prefix
        tileset: TilesetId,

        #[structopt(name = "tileset-source")]
        /// Tileset source the layer is generated from, in any accepted form
        tileset_source: TilesetSourceId,

        #[structopt(short = "l", long = "layer")]
        /// Layer name. Defaults to the tileset id.
        layer: Option<String>,

        #[structopt(long = "min-zoom", default_value = "0")]
        /// Lowest zoom level to generate tiles for
        min_zoom: u8,

        #[structopt(long = "max-zoom", default_value = "5")]
        /// Highest zoom level to generate tiles for
        max_zoom: u8,
    },
}

pub fn run(update_args: &UpdateArgs, client: &Client) -> Result<()> {
    match update_args {
        UpdateArgs::Recipe {
            tileset,
            tileset_source,
            layer,
            min_zoom,
            max_zoom,
        } => {
            let zoom = ZoomRange::new(*min_zoom, *max_zoom)?;
            let recipe = Recipe::single_layer(
                layer.as_deref().unwrap_or(&tileset.0),
                tileset_source.canonical_id_with_owner(client.owner()),
                zoom,
            );
            client
                .update_tileset_recipe(tileset, &recipe)
                .context("Operation to update the tileset recipe has failed.")?;
            info!(
                "Updated recipe of tileset `{}`, publish it again to apply.",
                tileset.full_id(client.owner())
            );
        }
    };
    Ok(())
}
