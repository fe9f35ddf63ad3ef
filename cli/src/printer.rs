use colored::Colorize;
use mapbox_uploader_client::{Job, JobObservation, JobStage, SourcePath, Tileset, TilesetSource};
use prettytable::{cell, format, row, Row, Table};
use serde::Serialize;

use anyhow::{anyhow, Context, Error, Result};
use std::{
    io::{self, Write},
    str::FromStr,
};

pub fn print_resources_as_json<Resource>(
    resources: impl IntoIterator<Item = Resource>,
    mut writer: impl Write,
) -> Result<()>
where
    Resource: Serialize,
{
    for resource in resources {
        serde_json::to_writer(&mut writer, &resource)
            .context("Could not serialise resource.")
            .and_then(|_| writeln!(writer).context("Failed to write JSON resource to writer."))?;
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self> {
        match string {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("unknown output format: '{}'", string)),
        }
    }
}

/// Represents a resource that is able to be displayed as a table.
///
/// The implementation must implement `to_table_headers` to return headers for the resource type,
/// and `to_table_row`, which should return a data row for the given resource instance.
pub trait DisplayTable {
    fn to_table_headers() -> Row;

    fn to_table_row(&self) -> Row;
}

impl DisplayTable for TilesetSource {
    fn to_table_headers() -> Row {
        row![bFg => "Name", "ID", "Files", "Size"]
    }

    fn to_table_row(&self) -> Row {
        let full_name = format!(
            "{}{}{}",
            self.id.owner().dimmed(),
            "/".dimmed(),
            self.id.short_id()
        );
        row![
            full_name,
            self.id.canonical_id(),
            self.files,
            match &self.size_nice {
                Some(size_nice) => size_nice.clone(),
                None => self.size.to_string(),
            }
        ]
    }
}

impl DisplayTable for Tileset {
    fn to_table_headers() -> Row {
        row![bFg => "ID", "Name", "Visibility", "Status", "Modified (UTC)"]
    }

    fn to_table_row(&self) -> Row {
        row![
            self.id,
            self.name,
            self.visibility,
            self.status,
            self.modified.format("%Y-%m-%d %H:%M:%S"),
        ]
    }
}

impl DisplayTable for Job {
    fn to_table_headers() -> Row {
        row![bFg => "ID", "Tileset", "Stage", "Created", "Errors", "Warnings"]
    }

    fn to_table_row(&self) -> Row {
        row![
            self.id.0,
            self.tileset_id,
            colored_stage(&self.stage),
            match &self.created_nice {
                Some(created_nice) => created_nice.as_str().into(),
                None => self.created.to_string().dimmed(),
            },
            self.errors.len(),
            self.warnings.len(),
        ]
    }
}

impl DisplayTable for JobObservation {
    fn to_table_headers() -> Row {
        row![bFg => "Tileset Source", "Source", "Tileset", "Job", "Stage"]
    }

    fn to_table_row(&self) -> Row {
        row![
            self.tileset_source.id.canonical_id(),
            match self.path {
                SourcePath::Created => "created".green(),
                SourcePath::Updated => "updated".normal(),
            },
            self.job.tileset_id,
            self.job_id.0,
            colored_stage(&self.job.stage),
        ]
    }
}

fn colored_stage(stage: &JobStage) -> colored::ColoredString {
    let stage_name = stage.to_string();
    match stage {
        JobStage::Success => stage_name.green(),
        JobStage::Failed => stage_name.red().bold(),
        JobStage::Unknown(_) => stage_name.dimmed(),
        _ => stage_name.normal(),
    }
}

/// Helper trait to allow collection of resources to be converted into a table.
pub trait IntoTable {
    fn into_table(self) -> Table;
}

/// All iterators of resources can be converted into a table.
impl<'a, Iterable, Item: 'a> IntoTable for Iterable
where
    Iterable: IntoIterator<Item = &'a Item>,
    Item: DisplayTable,
{
    fn into_table(self) -> Table {
        let mut table = new_table();
        table.set_titles(Item::to_table_headers());
        for resource in self.into_iter() {
            table.add_row(resource.to_table_row());
        }
        table
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    let format = format::FormatBuilder::new()
        .column_separator(' ')
        .borders(' ')
        .separators(&[], format::LineSeparator::new('-', '+', '+', '+'))
        .padding(0, 1)
        .build();
    table.set_format(format);
    table
}

fn print_table<T: IntoTable>(resources: T) {
    let table = resources.into_table();
    table.printstd();
}

pub struct Printer {
    output: OutputFormat,
}

impl Printer {
    pub fn new(output: OutputFormat) -> Self {
        Self { output }
    }

    pub fn print_resources<T, Resource>(&self, resources: T) -> Result<()>
    where
        T: IntoIterator<Item = Resource> + IntoTable,
        Resource: Serialize,
    {
        match self.output {
            OutputFormat::Table => print_table(resources),
            OutputFormat::Json => print_resources_as_json(resources, io::stdout().lock())?,
        };
        Ok(())
    }
}
