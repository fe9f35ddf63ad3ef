use crate::{
    commands::{
        config::ConfigArgs, delete::DeleteArgs, get::GetArgs, publish::PublishArgs,
        update::UpdateArgs,
    },
    printer::OutputFormat,
};
use anyhow::{anyhow, Error, Result};
use reqwest::Url;
use std::{path::PathBuf, str::FromStr};
use structopt::StructOpt;

/// mbu reconciles tileset sources and tilesets with the Mapbox Tiling Service.
#[derive(Debug, StructOpt)]
#[structopt(
    global_settings = &[
        structopt::clap::AppSettings::ColoredHelp,
        structopt::clap::AppSettings::InferSubcommands,
    ]
)]
pub struct Args {
    #[structopt(long = "config-file", parse(from_os_str))]
    /// Path to the configuration file. Typically defaults to ~/.config/mapbox-uploader on Linux.
    pub config: Option<PathBuf>,

    #[structopt(short = "c", long = "context")]
    /// Specify what context to use. Overrides the current context, if any.
    pub context: Option<String>,

    #[structopt(short = "v", long = "verbose")]
    /// Enable more verbose logging.
    pub verbose: bool,

    #[structopt(long = "endpoint", parse(try_from_str))]
    /// Specify what endpoint to use. Overrides the one from the current
    /// context, if any.
    pub endpoint: Option<Url>,

    #[structopt(long = "owner")]
    /// Specify the account owning tileset sources and tilesets. Overrides the
    /// one from the current context, if any.
    pub owner: Option<String>,

    #[structopt(short = "k", long = "accept-invalid-certificates", parse(try_from_str))]
    /// Whether to accept invalid TLS certificates.
    pub accept_invalid_certificates: Option<bool>,

    #[structopt(long = "token")]
    /// Specify what access token to use. Overrides the one from the current
    /// context, if any.
    pub token: Option<String>,

    #[structopt(long = "proxy")]
    /// URL for an HTTP proxy that will be used for all requests. Overrides the
    /// one from the current context, if any.
    pub proxy: Option<Url>,

    #[structopt(long = "retries", default_value = "0")]
    /// Number of times to retry read requests that time out or fail with a
    /// server error. Writes are never retried.
    pub retries: u8,

    #[structopt(short = "o", long = "output", default_value = "table")]
    /// Output format. One of: table, json
    pub output: OutputFormat,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    #[structopt(name = "completion")]
    /// Output shell completion code for the specified shell (bash or zsh)
    Completion { shell: Shell },

    #[structopt(name = "config")]
    /// Manage authentication and endpoint contexts
    Config {
        #[structopt(subcommand)]
        config_args: ConfigArgs,
    },

    #[structopt(name = "publish")]
    /// Upload a tileset source, create its tileset if needed and publish it
    Publish {
        #[structopt(flatten)]
        publish_args: PublishArgs,
    },

    #[structopt(name = "get")]
    /// Display tileset sources, tilesets and processing jobs
    Get {
        #[structopt(subcommand)]
        get_args: GetArgs,
    },

    #[structopt(name = "update")]
    /// Update existing resources
    Update {
        #[structopt(subcommand)]
        update_args: UpdateArgs,
    },

    #[structopt(name = "delete")]
    /// Delete a resource
    Delete {
        #[structopt(subcommand)]
        delete_args: DeleteArgs,
    },
}

#[derive(Debug)]
pub enum Shell {
    Bash,
    Zsh,
}

impl FromStr for Shell {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self> {
        match string {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            _ => Err(anyhow!("unknown shell: '{}'", string)),
        }
    }
}
