use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::Map;
use crate::gres::token::{
    DescriptorSide, GPU_RESOURCE_NAME, GresToken, MIG_MARKER, SHARD_RESOURCE_NAME,
    split_descriptor,
};

/// Configured and allocated amount of a single resource type on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(rename = "type")]
    pub name: String,
    pub total: u64,
    /// May exceed `total` when the scheduler reports inconsistent data.
    pub used: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GresSummary {
    /// Sorted by resource name.
    pub resources: Vec<ResourceEntry>,
    pub gpu_used: f64,
    pub gpu_total: f64,
    #[serde(rename = "isMIG")]
    pub is_mig: bool,
}

impl GresSummary {
    pub fn resource(&self, name: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|entry| entry.name == name)
    }

    pub fn has_gpus(&self) -> bool {
        self.gpu_total > 0.0 || self.gpu_used > 0.0
    }
}

#[derive(Default)]
pub(super) struct ResourceAccumulator {
    entries: Map<String, ResourceEntry>,
    is_mig: bool,
}

impl ResourceAccumulator {
    pub fn add_descriptor(&mut self, descriptor: &str, side: DescriptorSide) {
        for item in split_descriptor(descriptor) {
            match GresToken::parse(item, side) {
                Some(token) => self.add_token(token, side),
                None => log::trace!("Ignoring GRES item `{item}`"),
            }
        }
    }

    fn add_token(&mut self, token: GresToken, side: DescriptorSide) {
        self.is_mig |= token.encoding.is_mig();
        let name = token.encoding.resource_name();
        let entry = self
            .entries
            .entry_ref(name)
            .or_insert_with(|| ResourceEntry {
                name: name.to_string(),
                total: 0,
                used: 0,
            });
        match side {
            DescriptorSide::Total => entry.total = entry.total.saturating_add(token.count),
            DescriptorSide::Used => entry.used = entry.used.saturating_add(token.count),
        }
    }

    pub fn summarize(self, shards_per_gpu: NonZeroU32) -> GresSummary {
        let (gpu_total, gpu_used) = if self.is_mig {
            log::trace!("Summarizing MIG slices");
            self.entries
                .values()
                .filter(|entry| entry.name.contains(MIG_MARKER))
                .fold((0.0, 0.0), |(total, used), entry| {
                    (total + entry.total as f64, used + entry.used as f64)
                })
        } else {
            match (
                self.entries.get(GPU_RESOURCE_NAME),
                self.entries.get(SHARD_RESOURCE_NAME),
            ) {
                (Some(gpu), Some(shard)) => {
                    log::trace!("Summarizing whole devices with shards");
                    gpus_with_shards(gpu, shard)
                }
                (None, Some(shard)) => {
                    log::trace!("Summarizing shards, {shards_per_gpu} per device");
                    let shards_per_gpu = f64::from(shards_per_gpu.get());
                    (
                        shard.total as f64 / shards_per_gpu,
                        shard.used as f64 / shards_per_gpu,
                    )
                }
                (Some(gpu), None) => {
                    log::trace!("Summarizing whole devices");
                    (gpu.total as f64, gpu.used as f64)
                }
                (None, None) => (0.0, 0.0),
            }
        };

        let mut resources: Vec<ResourceEntry> = self.entries.into_values().collect();
        resources.sort_unstable_by(|a, b| a.name.cmp(&b.name));

        GresSummary {
            resources,
            gpu_used,
            gpu_total,
            is_mig: self.is_mig,
        }
    }
}

/// A node that reports both whole devices and shards lists every fully allocated
/// GPU under `gpu` and the partially allocated ones in shard units.
/// Returns `(total, used)`.
fn gpus_with_shards(gpu: &ResourceEntry, shard: &ResourceEntry) -> (f64, f64) {
    let shards_per_gpu = if gpu.total == 0 {
        1.0
    } else {
        shard.total as f64 / gpu.total as f64
    };
    let partial = if shards_per_gpu > 0.0 {
        (shard.used as f64 % shards_per_gpu) / shards_per_gpu
    } else {
        0.0
    };
    (gpu.total as f64, (gpu.used as f64).floor() + partial)
}
