use std::path::Path;

use serde::Deserialize;

use crate::gres::GresConfig;
use crate::nodes::{NodeRangeGroup, Topology};

/// Cluster description loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    #[serde(default)]
    pub gres: GresConfig,
    #[serde(default)]
    pub node_groups: Vec<NodeRangeGroup>,
    /// Nodes hidden from node listings, range tokens are allowed.
    #[serde(default)]
    pub excluded_nodes: Vec<String>,
}

impl ClusterConfig {
    pub fn parse(input: &str) -> crate::Result<ClusterConfig> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> crate::Result<ClusterConfig> {
        log::debug!("Loading cluster configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads the configuration file if a path was given, otherwise uses defaults.
    pub fn load_optional(path: Option<&Path>) -> crate::Result<ClusterConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(ClusterConfig::default()),
        }
    }

    pub fn topology(&self) -> Topology {
        Topology::new(&self.node_groups, &self.excluded_nodes)
    }
}
