use cli_table::format::{Justify, Separator};
use cli_table::{Cell, CellStruct, Color, ColorChoice, Style, Table, TableStruct, print_stdout};
use colored::Colorize;

use crate::client::output::format_gpu_amount;
use crate::client::output::outputs::Output;
use crate::gres::GresSummary;
use crate::nodes::TopologyGroup;
use crate::overview::{ClusterTotals, NodeOverview};

pub struct CliOutput {
    color_policy: ColorChoice,
}

impl CliOutput {
    pub fn new(color_policy: ColorChoice) -> CliOutput {
        CliOutput { color_policy }
    }

    fn print_vertical_table(&self, rows: Vec<Vec<CellStruct>>) {
        let table = rows.table().separator(
            Separator::builder()
                .column(Some(Default::default()))
                .build(),
        );
        self.print_table(table);
    }

    fn print_horizontal_table(&self, rows: Vec<Vec<CellStruct>>, header: Vec<CellStruct>) {
        let table = rows
            .table()
            .separator(
                Separator::builder()
                    .title(Some(Default::default()))
                    .column(Some(Default::default()))
                    .build(),
            )
            .title(header);
        self.print_table(table);
    }

    fn print_table(&self, table: TableStruct) {
        let table = table.color_choice(self.color_policy);
        if let Err(e) = print_stdout(table) {
            log::error!("Cannot print table to stdout: {:?}", e);
        }
    }
}

/// Picks a color based on how much of the available GPUs is allocated.
fn utilization_color(used: f64, total: f64) -> Option<Color> {
    if total <= 0.0 {
        None
    } else if used >= total {
        Some(Color::Red)
    } else if used > 0.0 {
        Some(Color::Yellow)
    } else {
        Some(Color::Green)
    }
}

fn gpu_cell(summary: &GresSummary) -> CellStruct {
    if !summary.has_gpus() {
        return "-".cell().justify(Justify::Right);
    }
    format!(
        "{}/{}",
        format_gpu_amount(summary.gpu_used),
        format_gpu_amount(summary.gpu_total)
    )
    .cell()
    .justify(Justify::Right)
    .foreground_color(utilization_color(summary.gpu_used, summary.gpu_total))
}

fn resources_cell(summary: &GresSummary) -> CellStruct {
    summary
        .resources
        .iter()
        .map(|entry| format!("{}={}/{}", entry.name, entry.used, entry.total))
        .collect::<Vec<_>>()
        .join(", ")
        .cell()
}

impl Output for CliOutput {
    fn print_gres_summary(&self, summary: &GresSummary) {
        let mut rows = vec![
            vec![
                "GPUs (Total)".cell().bold(true),
                format_gpu_amount(summary.gpu_total).cell(),
            ],
            vec![
                "GPUs (Used)".cell().bold(true),
                format_gpu_amount(summary.gpu_used)
                    .cell()
                    .foreground_color(utilization_color(summary.gpu_used, summary.gpu_total)),
            ],
            vec![
                "MIG".cell().bold(true),
                (if summary.is_mig { "yes" } else { "no" }).cell(),
            ],
        ];
        for entry in &summary.resources {
            rows.push(vec![
                format!("Resource {}", entry.name).cell().bold(true),
                format!("{}/{}", entry.used, entry.total).cell(),
            ]);
        }
        self.print_vertical_table(rows);
    }

    fn print_hostnames(&self, hostnames: &[String]) {
        for hostname in hostnames {
            println!("{hostname}");
        }
    }

    fn print_node_groups(&self, groups: &[TopologyGroup]) {
        let rows: Vec<_> = groups
            .iter()
            .map(|group| {
                vec![
                    group.description.clone().cell(),
                    group.nodes.len().cell().justify(Justify::Right),
                    group.nodes.join(",").cell(),
                ]
            })
            .collect();

        let header = vec![
            "Group".cell().bold(true),
            "Count".cell().bold(true),
            "Nodes".cell().bold(true),
        ];
        self.print_horizontal_table(rows, header);
    }

    fn print_node_overview(&self, nodes: &[NodeOverview], totals: &ClusterTotals) {
        let rows: Vec<_> = nodes
            .iter()
            .map(|node| {
                vec![
                    node.name.clone().cell(),
                    node.group.as_deref().unwrap_or("").cell(),
                    node.state.join("+").cell(),
                    gpu_cell(&node.gres),
                    resources_cell(&node.gres),
                ]
            })
            .collect();

        let header = vec![
            "Node".cell().bold(true),
            "Group".cell().bold(true),
            "State".cell().bold(true),
            "GPUs (Used/Total)".cell().bold(true),
            "Resources".cell().bold(true),
        ];
        self.print_horizontal_table(rows, header);

        println!(
            "{} node(s), {} with GPUs, {}/{} GPUs used",
            totals.nodes,
            totals.gpu_nodes,
            format_gpu_amount(totals.gpu_used).as_str().bold(),
            format_gpu_amount(totals.gpu_total).as_str().bold()
        );
    }

    fn print_error(&self, error: anyhow::Error) {
        eprintln!("{}", format!("{error:?}").as_str().red());
    }
}
