use std::io::{self, IsTerminal};

use clap::{CommandFactory, FromArgMatches};
use clap_complete::generate;
use cli_table::ColorChoice;

use gresview::client::commands::gres::command_gres;
use gresview::client::commands::nodes::{
    command_expand, command_groups, command_hostlist, command_nodes,
};
use gresview::client::globalsettings::GlobalSettings;
use gresview::client::output::cli::CliOutput;
use gresview::client::output::json::JsonOutput;
use gresview::client::output::outputs::{Output, Outputs};
use gresview::client::output::quiet::Quiet;
use gresview::common::cli::{
    ColorPolicy, CommonOpts, GenerateCompletionOpts, RootOptions, SubCommand,
};
use gresview::common::config::ClusterConfig;
use gresview::common::setup::setup_logging;

fn make_printer(opts: &CommonOpts) -> Box<dyn Output> {
    let color_policy = match opts.colors {
        ColorPolicy::Always => ColorChoice::AlwaysAnsi,
        ColorPolicy::Auto => {
            if io::stdout().is_terminal() {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            }
        }
        ColorPolicy::Never => ColorChoice::Never,
    };

    match opts.output_mode {
        Outputs::CLI => {
            match color_policy {
                ColorChoice::Always | ColorChoice::AlwaysAnsi => {
                    colored::control::set_override(true)
                }
                ColorChoice::Never => colored::control::set_override(false),
                _ => {}
            }
            Box::new(CliOutput::new(color_policy))
        }
        Outputs::JSON => Box::<JsonOutput>::default(),
        Outputs::Quiet => Box::<Quiet>::default(),
    }
}

fn generate_completion(opts: GenerateCompletionOpts) -> anyhow::Result<()> {
    let mut app = RootOptions::command();
    generate(opts.shell, &mut app, "gresview", &mut io::stdout());
    Ok(())
}

fn main() {
    let matches = RootOptions::command().get_matches();
    let top_opts = match RootOptions::from_arg_matches(&matches) {
        Ok(opts) => opts,
        Err(error) => error.exit(),
    };

    setup_logging(top_opts.common.debug);

    let printer = make_printer(&top_opts.common);
    let config = match ClusterConfig::load_optional(top_opts.common.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            printer.print_error(anyhow::Error::from(error).context("Cannot load configuration"));
            std::process::exit(1);
        }
    };
    let gsettings = GlobalSettings::new(config, printer);

    let result = match top_opts.subcmd {
        SubCommand::Gres(opts) => command_gres(&gsettings, opts),
        SubCommand::Expand(opts) => command_expand(&gsettings, opts),
        SubCommand::Hostlist(opts) => command_hostlist(&gsettings, opts),
        SubCommand::Groups => command_groups(&gsettings),
        SubCommand::Nodes(opts) => command_nodes(&gsettings, opts),
        SubCommand::GenerateCompletion(opts) => generate_completion(opts),
    };

    if let Err(e) = result {
        gsettings.printer().print_error(e);
        std::process::exit(1);
    }
}
