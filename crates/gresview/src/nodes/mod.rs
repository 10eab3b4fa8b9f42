//! Hostname range notation used in the cluster topology configuration.

mod hostlist;
mod range;
mod topology;

pub use hostlist::parse_hostlist;
pub use range::expand;
pub use topology::{NodeRangeGroup, Topology, TopologyGroup};

/// Expands a single node token from the configuration.
///
/// Bracketed Slurm host lists (`gpu[01-04]`) are expanded with [`parse_hostlist`],
/// everything else with [`expand`]. A malformed bracket expression is kept as a
/// literal hostname.
pub fn expand_node_token(token: &str) -> Vec<String> {
    if token.contains('[') {
        match parse_hostlist(token) {
            Ok(hosts) => hosts,
            Err(error) => {
                log::warn!("Cannot expand host list `{token}`, using it verbatim:\n{error:?}");
                vec![token.to_string()]
            }
        }
    } else {
        expand(token)
    }
}
