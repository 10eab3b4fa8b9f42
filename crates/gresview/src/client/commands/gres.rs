use clap::Parser;

use crate::client::globalsettings::GlobalSettings;
use crate::gres::GresParser;

#[derive(Parser)]
pub struct GresOpts {
    /// Configured resources of the node (the `gres` field)
    #[arg(long)]
    pub total: Option<String>,

    /// Allocated resources of the node (the `gres_used` field)
    #[arg(long, default_value = "")]
    pub used: String,
}

pub fn command_gres(gsettings: &GlobalSettings, opts: GresOpts) -> anyhow::Result<()> {
    let parser = GresParser::new(gsettings.config().gres);
    let summary = parser.parse(opts.total.as_deref(), &opts.used);
    gsettings.printer().print_gres_summary(&summary);
    Ok(())
}
