use crate::gres::GresSummary;
use crate::nodes::TopologyGroup;
use crate::overview::{ClusterTotals, NodeOverview};

#[derive(clap::ValueEnum, Clone)]
pub enum Outputs {
    CLI,
    JSON,
    Quiet,
}

pub trait Output {
    // Resources
    fn print_gres_summary(&self, summary: &GresSummary);

    // Nodes
    fn print_hostnames(&self, hostnames: &[String]);
    fn print_node_groups(&self, groups: &[TopologyGroup]);
    fn print_node_overview(&self, nodes: &[NodeOverview], totals: &ClusterTotals);

    // Errors
    fn print_error(&self, error: anyhow::Error);
}
