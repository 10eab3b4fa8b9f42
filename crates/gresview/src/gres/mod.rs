//! Normalization of Slurm generic resource (GRES) strings into GPU counts.
//!
//! A node reports its accelerators in one of three incompatible encodings:
//! whole devices (`gpu:4`), shards of shared devices (`shard:8`) or MIG
//! slices (`gpu:1g.5gb:7`). [`GresParser`] turns the `gres` and `gres_used`
//! strings of a node into a [`GresSummary`] with a single "GPUs used / GPUs
//! total" figure regardless of the encoding in use.

mod summary;
mod token;

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

pub use summary::{GresSummary, ResourceEntry};
pub use token::{
    DescriptorSide, GPU_RESOURCE_NAME, GresEncoding, GresToken, MIG_MARKER, SHARD_RESOURCE_NAME,
    first_number, leading_number, split_descriptor,
};

use summary::ResourceAccumulator;

pub const DEFAULT_SHARDS_PER_GPU: NonZeroU32 = NonZeroU32::new(4).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GresConfig {
    /// How many shards make up a single GPU on nodes that only report shards.
    #[serde(default = "default_shards_per_gpu")]
    pub shards_per_gpu: NonZeroU32,
}

fn default_shards_per_gpu() -> NonZeroU32 {
    DEFAULT_SHARDS_PER_GPU
}

impl Default for GresConfig {
    fn default() -> Self {
        Self {
            shards_per_gpu: DEFAULT_SHARDS_PER_GPU,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GresParser {
    config: GresConfig,
}

impl GresParser {
    pub fn new(config: GresConfig) -> Self {
        Self { config }
    }

    /// Parses the configured (`gres`) and allocated (`gres_used`) resources of a node.
    ///
    /// Never fails: tokens that cannot be understood contribute nothing.
    pub fn parse(&self, gres: Option<&str>, gres_used: &str) -> GresSummary {
        let mut resources = ResourceAccumulator::default();
        if let Some(gres) = gres {
            resources.add_descriptor(gres, DescriptorSide::Total);
        }
        resources.add_descriptor(gres_used, DescriptorSide::Used);
        resources.summarize(self.config.shards_per_gpu)
    }
}

/// Parses a pair of GRES strings with the default configuration.
pub fn parse_gres(gres: Option<&str>, gres_used: &str) -> GresSummary {
    GresParser::default().parse(gres, gres_used)
}
