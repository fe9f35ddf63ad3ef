use anyhow::{Context, Result};
use log::debug;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct UploaderConfig {
    current_context: Option<String>,
    contexts: Vec<ContextConfig>,
}

impl UploaderConfig {
    pub fn get_all_contexts(&self) -> &Vec<ContextConfig> {
        &self.contexts
    }

    pub fn get_context(&self, name: &str) -> Option<&ContextConfig> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Insert or replace a context, returning whether one with that name existed.
    pub fn set_context(&mut self, context: ContextConfig) -> bool {
        if let Some(index) = self.context_position(&context.name) {
            self.contexts[index] = context;
            true
        } else {
            self.contexts.push(context);
            false
        }
    }

    pub fn delete_context(&mut self, name: &str) -> bool {
        if let Some(index) = self.context_position(name) {
            self.contexts.remove(index);
            if self.current_context.as_deref() == Some(name) {
                self.current_context = None
            }
            true
        } else {
            false
        }
    }

    pub fn get_current_context(&self) -> Option<&ContextConfig> {
        self.current_context
            .as_ref()
            .and_then(|current_context| self.get_context(current_context))
    }

    pub fn set_current_context(&mut self, name: &str) -> bool {
        if self.get_context(name).is_some() {
            self.current_context = Some(name.to_owned());
            true
        } else {
            false
        }
    }

    pub fn num_contexts(&self) -> usize {
        self.contexts.len()
    }

    fn context_position(&self, name: &str) -> Option<usize> {
        self.contexts
            .iter()
            .position(|context| context.name == name)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ContextConfig {
    pub name: String,
    pub endpoint: Url,
    /// Mapbox username owning the tileset sources and tilesets.
    pub owner: String,
    pub token: Option<String>,
    #[serde(default)]
    pub accept_invalid_certificates: bool,
    #[serde(default)]
    pub proxy: Option<Url>,
}

pub fn read_uploader_config(path: impl AsRef<Path>) -> Result<UploaderConfig> {
    debug!("Reading config file at `{}`", path.as_ref().display());
    if path.as_ref().exists() {
        let file = File::open(&path)
            .with_context(|| format!("Could not open config file `{}`", path.as_ref().display()))?;
        let config_reader = BufReader::new(file);
        serde_json::from_reader(config_reader)
            .with_context(|| format!("Could not parse config file `{}`", path.as_ref().display()))
    } else {
        Ok(Default::default())
    }
}

pub fn write_uploader_config(path: impl AsRef<Path>, config: &UploaderConfig) -> Result<()> {
    debug!("Writing config file at `{}`", path.as_ref().display());
    let file = File::create(&path)
        .with_context(|| format!("Could not create config file `{}`", path.as_ref().display()))?;
    let config_writer = BufWriter::new(file);
    serde_json::to_writer_pretty(config_writer, &config).with_context(|| {
        format!(
            "Could not serialise configuration to `{}`",
            path.as_ref().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context(name: &str) -> ContextConfig {
        ContextConfig {
            name: name.to_owned(),
            endpoint: Url::parse("https://api.mapbox.com").unwrap(),
            owner: "test-user".to_owned(),
            token: Some("test-token".to_owned()),
            accept_invalid_certificates: false,
            proxy: None,
        }
    }

    #[test]
    fn set_and_delete_contexts() {
        let mut config = UploaderConfig::default();
        assert!(!config.set_context(context("dev")));
        assert!(!config.set_context(context("prod")));
        assert!(config.set_context(context("dev")));
        assert_eq!(config.num_contexts(), 2);

        assert!(config.set_current_context("dev"));
        assert!(!config.set_current_context("staging"));
        assert_eq!(config.get_current_context().unwrap().name, "dev");

        assert!(config.delete_context("dev"));
        assert!(config.get_current_context().is_none());
        assert!(!config.delete_context("dev"));
    }

    #[test]
    fn config_file_roundtrips() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("contexts.json");

        assert_eq!(read_uploader_config(&path).unwrap().num_contexts(), 0);

        let mut config = UploaderConfig::default();
        config.set_context(context("dev"));
        config.set_current_context("dev");
        write_uploader_config(&path, &config).unwrap();

        let read = read_uploader_config(&path).unwrap();
        assert_eq!(read.get_current_context(), Some(&context("dev")));
    }

    #[test]
    fn optional_fields_default() {
        let config: UploaderConfig = serde_json::from_str(
            r#"{
                "current_context": "dev",
                "contexts": [{
                    "name": "dev",
                    "endpoint": "https://api.mapbox.com/",
                    "owner": "test-user",
                    "token": null
                }]
            }"#,
        )
        .unwrap();
        let context = config.get_current_context().unwrap();
        assert!(!context.accept_invalid_certificates);
        assert_eq!(context.proxy, None);
    }
}
