use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::client::commands::gres::GresOpts;
use crate::client::commands::nodes::{ExpandOpts, HostlistOpts, NodesOpts};
use crate::client::output::outputs::Outputs;

#[derive(clap::ValueEnum, Clone)]
pub enum ColorPolicy {
    /// Use colors if the stdout is detected to be a terminal.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

// Common CLI options
#[derive(Parser)]
pub struct CommonOpts {
    /// Path to the cluster configuration file (TOML)
    #[arg(
        long,
        value_hint = clap::ValueHint::FilePath,
        global = true,
        env = "GRESVIEW_CONFIG",
        help_heading("GLOBAL OPTIONS")
    )]
    pub config: Option<PathBuf>,

    /// Sets console color policy
    #[arg(
        long,
        default_value_t = ColorPolicy::Auto,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub colors: ColorPolicy,

    /// Sets output formatting
    #[arg(
        long,
        env = "GRESVIEW_OUTPUT_MODE",
        default_value_t = Outputs::CLI,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub output_mode: Outputs,

    /// Enables more detailed log output
    #[arg(
        long,
        env = "GRESVIEW_DEBUG",
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub debug: bool,
}

// Root CLI options
#[derive(Parser)]
#[command(
    author,
    about,
    version(crate::GRESVIEW_VERSION),
    disable_help_subcommand(true),
    help_expected(true)
)]
pub struct RootOptions {
    #[clap(flatten)]
    pub common: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    /// Summarize the GPU allocation described by a pair of GRES strings
    Gres(GresOpts),
    /// Expand node range tokens such as `node01-08`
    Expand(ExpandOpts),
    /// Expand a bracketed Slurm host list such as `gpu[01-04,07]`
    Hostlist(HostlistOpts),
    /// Show the node groups of the cluster configuration
    Groups,
    /// Summarize GPU usage of nodes from `scontrol show nodes --json` output
    Nodes(NodesOpts),
    /// Generate shell completion script
    GenerateCompletion(GenerateCompletionOpts),
}

#[derive(Parser)]
pub struct GenerateCompletionOpts {
    /// Shell flavour for which the completion script should be generated
    #[arg(value_enum)]
    pub shell: Shell,
}
