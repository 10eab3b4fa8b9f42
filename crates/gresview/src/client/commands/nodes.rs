use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::client::globalsettings::GlobalSettings;
use crate::gres::GresParser;
use crate::nodes::{expand, parse_hostlist};
use crate::overview::{ClusterTotals, build_overview, parse_node_records};

#[derive(Parser)]
pub struct ExpandOpts {
    /// Node tokens, e.g. `node01-08` or `login1`
    #[arg(required = true)]
    pub tokens: Vec<String>,
}

#[derive(Parser)]
pub struct HostlistOpts {
    /// Host list expression, e.g. `gpu[01-04,07],login1`
    pub hostlist: String,
}

#[derive(Parser)]
pub struct NodesOpts {
    /// File with the output of `scontrol show nodes --json`, `-` reads stdin
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,
}

pub fn command_expand(gsettings: &GlobalSettings, opts: ExpandOpts) -> anyhow::Result<()> {
    let hostnames: Vec<String> = opts.tokens.iter().flat_map(|token| expand(token)).collect();
    gsettings.printer().print_hostnames(&hostnames);
    Ok(())
}

pub fn command_hostlist(gsettings: &GlobalSettings, opts: HostlistOpts) -> anyhow::Result<()> {
    let hostnames = parse_hostlist(&opts.hostlist)?;
    gsettings.printer().print_hostnames(&hostnames);
    Ok(())
}

pub fn command_groups(gsettings: &GlobalSettings) -> anyhow::Result<()> {
    let topology = gsettings.config().topology();
    if topology.groups().is_empty() {
        log::warn!("No node groups are configured, use `--config` to pass a configuration file");
    }
    gsettings.printer().print_node_groups(topology.groups());
    Ok(())
}

pub fn command_nodes(gsettings: &GlobalSettings, opts: NodesOpts) -> anyhow::Result<()> {
    let input = read_input(&opts.input)?;
    let records = parse_node_records(&input)
        .with_context(|| format!("Cannot parse node list from {}", opts.input.display()))?;
    log::debug!("Loaded {} node record(s)", records.len());

    let topology = gsettings.config().topology();
    let parser = GresParser::new(gsettings.config().gres);
    let nodes = build_overview(records, &topology, &parser);
    let totals = ClusterTotals::from_overview(&nodes);
    gsettings.printer().print_node_overview(&nodes, &totals);
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read node list from {}", path.display()))
    }
}
