use serde::{Deserialize, Serialize};

use crate::nodes::expand_node_token;
use crate::{Map, Set};

/// A named group of nodes as written in the configuration file.
/// `nodes` may contain literal hostnames and range tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRangeGroup {
    pub nodes: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl NodeRangeGroup {
    /// Hostnames of the group with all range tokens expanded, in configuration order.
    pub fn expand_nodes(&self) -> Vec<String> {
        self.nodes
            .iter()
            .flat_map(|token| expand_node_token(token))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopologyGroup {
    pub description: String,
    pub nodes: Vec<String>,
}

/// Expanded view of the node groups and the excluded nodes of a cluster.
#[derive(Debug, Default)]
pub struct Topology {
    groups: Vec<TopologyGroup>,
    node_to_group: Map<String, usize>,
    excluded: Set<String>,
}

impl Topology {
    pub fn new(groups: &[NodeRangeGroup], excluded_nodes: &[String]) -> Self {
        let mut node_to_group = Map::default();
        let groups: Vec<TopologyGroup> = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let nodes = group.expand_nodes();
                for node in &nodes {
                    if let Some(previous) = node_to_group.get(node.as_str()) {
                        if *previous != index {
                            log::debug!(
                                "Node {node} is listed in multiple groups, keeping group #{previous}"
                            );
                        }
                    } else {
                        node_to_group.insert(node.clone(), index);
                    }
                }
                TopologyGroup {
                    description: group.description.clone(),
                    nodes,
                }
            })
            .collect();

        let excluded: Set<String> = excluded_nodes
            .iter()
            .flat_map(|token| expand_node_token(token))
            .collect();

        log::debug!(
            "Loaded topology with {} group(s), {} grouped node(s) and {} excluded node(s)",
            groups.len(),
            node_to_group.len(),
            excluded.len()
        );

        Self {
            groups,
            node_to_group,
            excluded,
        }
    }

    pub fn groups(&self) -> &[TopologyGroup] {
        &self.groups
    }

    /// Returns the first configured group that contains `hostname`.
    pub fn group_of(&self, hostname: &str) -> Option<&TopologyGroup> {
        self.node_to_group
            .get(hostname)
            .map(|index| &self.groups[*index])
    }

    pub fn is_excluded(&self, hostname: &str) -> bool {
        self.excluded.contains(hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(description: &str, nodes: &[&str]) -> NodeRangeGroup {
        NodeRangeGroup {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_expand_group_nodes() {
        let group = group("A100", &["gpu01-03", "bigmem", "x[1-2]"]);
        assert_eq!(
            group.expand_nodes(),
            vec!["gpu01", "gpu02", "gpu03", "bigmem", "x1", "x2"]
        );
    }

    #[test]
    fn test_topology_groups() {
        let topology = Topology::new(
            &[group("A100", &["gpu01-02"]), group("CPU", &["cn1-3"])],
            &[],
        );
        assert_eq!(topology.groups().len(), 2);
        assert_eq!(topology.groups()[1].nodes, vec!["cn1", "cn2", "cn3"]);
        assert_eq!(topology.group_of("gpu02").unwrap().description, "A100");
        assert_eq!(topology.group_of("cn3").unwrap().description, "CPU");
        assert!(topology.group_of("cn4").is_none());
    }

    #[test]
    fn test_topology_duplicate_node() {
        let topology = Topology::new(
            &[group("first", &["n1-2"]), group("second", &["n2-3"])],
            &[],
        );
        assert_eq!(topology.group_of("n2").unwrap().description, "first");
        assert_eq!(topology.group_of("n3").unwrap().description, "second");
        assert_eq!(topology.groups()[1].nodes, vec!["n2", "n3"]);
    }

    #[test]
    fn test_topology_exclusion() {
        let topology = Topology::new(&[], &["login01-02".to_string(), "dtn".to_string()]);
        assert!(topology.is_excluded("login01"));
        assert!(topology.is_excluded("login02"));
        assert!(topology.is_excluded("dtn"));
        assert!(!topology.is_excluded("login03"));
    }

    #[test]
    fn test_empty_group() {
        let topology = Topology::new(&[group("reversed", &["n5-1"])], &[]);
        assert!(topology.groups()[0].nodes.is_empty());
    }
}
