use serde::Serialize;
use serde_json::json;

use crate::client::output::outputs::Output;
use crate::gres::GresSummary;
use crate::nodes::TopologyGroup;
use crate::overview::{ClusterTotals, NodeOverview};

#[derive(Default)]
pub struct JsonOutput;

impl JsonOutput {
    fn print(&self, data: impl Serialize) {
        match serde_json::to_string_pretty(&data) {
            Ok(output) => println!("{output}"),
            Err(error) => log::error!("Cannot serialize output: {error:?}"),
        }
    }
}

impl Output for JsonOutput {
    fn print_gres_summary(&self, summary: &GresSummary) {
        self.print(summary);
    }

    fn print_hostnames(&self, hostnames: &[String]) {
        self.print(hostnames);
    }

    fn print_node_groups(&self, groups: &[TopologyGroup]) {
        self.print(groups);
    }

    fn print_node_overview(&self, nodes: &[NodeOverview], totals: &ClusterTotals) {
        self.print(json!({
            "nodes": nodes,
            "totals": totals,
        }));
    }

    fn print_error(&self, error: anyhow::Error) {
        self.print(json!({
            "error": format!("{error:?}"),
        }));
    }
}
