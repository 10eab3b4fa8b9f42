use crate::client::output::format_gpu_amount;
use crate::client::output::outputs::Output;
use crate::gres::GresSummary;
use crate::nodes::TopologyGroup;
use crate::overview::{ClusterTotals, NodeOverview};

#[derive(Default)]
pub struct Quiet;

impl Output for Quiet {
    fn print_gres_summary(&self, summary: &GresSummary) {
        println!(
            "{} {}",
            format_gpu_amount(summary.gpu_used),
            format_gpu_amount(summary.gpu_total)
        );
    }

    fn print_hostnames(&self, hostnames: &[String]) {
        for hostname in hostnames {
            println!("{hostname}");
        }
    }

    fn print_node_groups(&self, groups: &[TopologyGroup]) {
        for group in groups {
            for node in &group.nodes {
                println!("{node}");
            }
        }
    }

    fn print_node_overview(&self, nodes: &[NodeOverview], _totals: &ClusterTotals) {
        for node in nodes {
            println!(
                "{} {} {}",
                node.name,
                format_gpu_amount(node.gres.gpu_used),
                format_gpu_amount(node.gres.gpu_total)
            );
        }
    }

    fn print_error(&self, error: anyhow::Error) {
        eprintln!("{error:?}");
    }
}
