//! Reconciliation of the node list reported by Slurm with the cluster topology.

use serde::{Deserialize, Deserializer, Serialize};

use crate::gres::{GresParser, GresSummary};
use crate::nodes::Topology;

/// A compute node as reported by `scontrol show nodes --json`.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_state")]
    pub state: Vec<String>,
    #[serde(default)]
    pub gres: Option<String>,
    #[serde(default, deserialize_with = "deserialize_gres_used")]
    pub gres_used: String,
}

#[derive(Deserialize)]
struct NodeList {
    nodes: Vec<NodeRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StateField {
    Single(String),
    Multiple(Vec<String>),
}

/// Older Slurm versions report the state as a single string, newer ones as a list of flags.
fn deserialize_state<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StateField>::deserialize(deserializer)? {
        Some(StateField::Single(state)) => vec![state],
        Some(StateField::Multiple(states)) => states,
        None => Vec::new(),
    })
}

fn deserialize_gres_used<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses the output of `scontrol show nodes --json`.
pub fn parse_node_records(json: &str) -> crate::Result<Vec<NodeRecord>> {
    let list: NodeList = serde_json::from_str(json)?;
    Ok(list.nodes)
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeOverview {
    pub name: String,
    pub state: Vec<String>,
    /// Description of the configured group that contains the node.
    pub group: Option<String>,
    pub gres: GresSummary,
}

/// Builds the node listing: excluded nodes are dropped, the remaining ones keep
/// the order in which the scheduler reported them.
pub fn build_overview(
    records: Vec<NodeRecord>,
    topology: &Topology,
    parser: &GresParser,
) -> Vec<NodeOverview> {
    records
        .into_iter()
        .filter(|record| {
            let excluded = topology.is_excluded(&record.name);
            if excluded {
                log::debug!("Skipping excluded node {}", record.name);
            }
            !excluded
        })
        .map(|record| {
            let gres = parser.parse(record.gres.as_deref(), &record.gres_used);
            NodeOverview {
                group: topology
                    .group_of(&record.name)
                    .map(|group| group.description.clone()),
                name: record.name,
                state: record.state,
                gres,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterTotals {
    pub nodes: usize,
    pub gpu_nodes: usize,
    pub gpu_total: f64,
    pub gpu_used: f64,
}

impl ClusterTotals {
    pub fn from_overview(nodes: &[NodeOverview]) -> Self {
        nodes.iter().fold(
            ClusterTotals {
                nodes: nodes.len(),
                ..Default::default()
            },
            |mut totals, node| {
                if node.gres.has_gpus() {
                    totals.gpu_nodes += 1;
                }
                totals.gpu_total += node.gres.gpu_total;
                totals.gpu_used += node.gres.gpu_used;
                totals
            },
        )
    }
}
