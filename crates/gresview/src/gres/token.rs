//! Tokenization and classification of individual GRES descriptor items.
//!
//! Slurm prints generic resources as comma separated items such as
//! `gpu:4`, `gpu:mi25:4(S:0)`, `shard:8` or `gpu:1g.5gb:2(IDX:0,1)`. Only the
//! `gpu` and `shard` families are relevant for accelerator accounting.

/// Marker contained in every MIG profile name (`1g.5gb`, `3g.20gb`, ...).
pub const MIG_MARKER: &str = "g.";

/// Legacy device naming that stores its count in the third colon field.
pub const LEGACY_DEVICE_MARKER: &str = "mi25";

pub const GPU_RESOURCE_NAME: &str = "gpu";
pub const SHARD_RESOURCE_NAME: &str = "shard";

/// Which of the two per-node descriptors is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorSide {
    /// `gres`, the configured resources of a node.
    Total,
    /// `gres_used`, the resources allocated to running jobs.
    Used,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GresEncoding {
    /// Whole accelerator devices.
    Device,
    /// Software defined fractions of a device.
    Shard,
    /// Hardware partition of a device, identified by its profile.
    MigSlice { profile: String },
}

impl GresEncoding {
    /// Name of the resource entry that tokens of this encoding accumulate into.
    pub fn resource_name(&self) -> &str {
        match self {
            GresEncoding::Device => GPU_RESOURCE_NAME,
            GresEncoding::Shard => SHARD_RESOURCE_NAME,
            GresEncoding::MigSlice { profile } => profile,
        }
    }

    pub fn is_mig(&self) -> bool {
        matches!(self, GresEncoding::MigSlice { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GresToken {
    pub encoding: GresEncoding,
    pub count: u64,
}

impl GresToken {
    /// Classifies a single descriptor item.
    ///
    /// Returns `None` when the item does not describe a `gpu` or `shard`
    /// resource, or when there is nothing after the resource prefix.
    pub fn parse(item: &str, side: DescriptorSide) -> Option<GresToken> {
        let (prefix, token) = find_resource_token(item)?;
        let details = &token[prefix.len() + 1..];
        if details.is_empty() {
            return None;
        }

        let token = if details.contains(MIG_MARKER) {
            parse_mig_slice(details)
        } else if details.contains(LEGACY_DEVICE_MARKER) {
            GresToken {
                encoding: GresEncoding::Device,
                count: token
                    .split(':')
                    .nth(2)
                    .map(|field| leading_number(strip_parenthesis(field)))
                    .unwrap_or(0),
            }
        } else {
            let encoding = if prefix == SHARD_RESOURCE_NAME {
                GresEncoding::Shard
            } else {
                GresEncoding::Device
            };
            let count = match side {
                DescriptorSide::Total => leading_number(details),
                DescriptorSide::Used => first_number(details),
            };
            GresToken { encoding, count }
        };
        Some(token)
    }
}

/// Count of a MIG slice is the field that follows the profile name.
/// `used` descriptors append the allocated indices in parentheses, which are stripped.
fn parse_mig_slice(details: &str) -> GresToken {
    let mut fields = details.split(':');
    let profile = fields
        .by_ref()
        .find(|field| field.contains(MIG_MARKER))
        .unwrap_or(details);
    let count = fields
        .next()
        .map(|field| leading_number(strip_parenthesis(field)))
        .unwrap_or(0);
    GresToken {
        encoding: GresEncoding::MigSlice {
            profile: strip_parenthesis(profile).to_string(),
        },
        count,
    }
}

/// Finds the leftmost `gpu:` or `shard:` marker inside the item.
/// Returns the matched resource prefix and the item from the marker onwards.
fn find_resource_token(item: &str) -> Option<(&'static str, &str)> {
    [GPU_RESOURCE_NAME, SHARD_RESOURCE_NAME]
        .into_iter()
        .filter_map(|prefix| {
            item.match_indices(prefix)
                .find(|(index, _)| item[index + prefix.len()..].starts_with(':'))
                .map(|(index, _)| (index, prefix))
        })
        .min_by_key(|(index, _)| *index)
        .map(|(index, prefix)| (prefix, &item[index..]))
}

/// Splits a descriptor at commas that are not enclosed in parentheses.
/// `gpu:1g.5gb:2(IDX:0,1),shard:4` yields `gpu:1g.5gb:2(IDX:0,1)` and `shard:4`.
pub fn split_descriptor(descriptor: &str) -> impl Iterator<Item = &str> {
    let mut depth: usize = 0;
    let mut start = 0;
    let mut items = Vec::new();
    for (index, c) in descriptor.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&descriptor[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    items.push(&descriptor[start..]);
    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Removes a trailing parenthesized suffix: `2(IDX:0-1)` -> `2`.
fn strip_parenthesis(value: &str) -> &str {
    match value.find('(') {
        Some(index) => &value[..index],
        None => value,
    }
}

/// Parses the decimal digits at the start of `value` (after whitespace).
/// Returns zero when there are none or when the number does not fit into `u64`.
pub fn leading_number(value: &str) -> u64 {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().unwrap_or(0)
}

/// Parses the first run of decimal digits found anywhere in `value`.
pub fn first_number(value: &str) -> u64 {
    match value.find(|c: char| c.is_ascii_digit()) {
        Some(start) => leading_number(&value[start..]),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(item: &str, side: DescriptorSide) -> Option<(String, u64)> {
        GresToken::parse(item, side).map(|t| (t.encoding.resource_name().to_string(), t.count))
    }

    fn item(name: &str, count: u64) -> Option<(String, u64)> {
        Some((name.to_string(), count))
    }

    #[test]
    fn test_split_descriptor() {
        assert_eq!(
            split_descriptor("gpu:2,shard:8").collect::<Vec<_>>(),
            vec!["gpu:2", "shard:8"]
        );
        assert_eq!(
            split_descriptor("gpu:1g.5gb:2(IDX:0,1),gpu:2g.10gb:1(IDX:2)").collect::<Vec<_>>(),
            vec!["gpu:1g.5gb:2(IDX:0,1)", "gpu:2g.10gb:1(IDX:2)"]
        );
        assert_eq!(
            split_descriptor(" gpu:1 ,, ").collect::<Vec<_>>(),
            vec!["gpu:1"]
        );
        assert_eq!(split_descriptor("").count(), 0);
    }

    #[test]
    fn test_split_descriptor_unbalanced() {
        assert_eq!(
            split_descriptor("gpu:1),shard:2").collect::<Vec<_>>(),
            vec!["gpu:1)", "shard:2"]
        );
        assert_eq!(
            split_descriptor("gpu:1(IDX:0,shard:2").collect::<Vec<_>>(),
            vec!["gpu:1(IDX:0,shard:2"]
        );
    }

    #[test]
    fn test_device_token() {
        assert_eq!(parse("gpu:4", DescriptorSide::Total), item("gpu", 4));
        assert_eq!(parse("gpu:4(S:0-1)", DescriptorSide::Total), item("gpu", 4));
        assert_eq!(parse("gpu:2(IDX:0-1)", DescriptorSide::Used), item("gpu", 2));
        assert_eq!(parse("gpu:IDX:3", DescriptorSide::Used), item("gpu", 3));
    }

    #[test]
    fn test_device_token_non_numeric_total() {
        assert_eq!(parse("gpu:a100:4", DescriptorSide::Total), item("gpu", 0));
        assert_eq!(parse("gpu:abc", DescriptorSide::Used), item("gpu", 0));
    }

    #[test]
    fn test_shard_token() {
        assert_eq!(parse("shard:8", DescriptorSide::Total), item("shard", 8));
        assert_eq!(
            parse("shard:2(IDX:0)", DescriptorSide::Used),
            item("shard", 2)
        );
    }

    #[test]
    fn test_mig_token() {
        let token = GresToken::parse("gpu:1g.5gb:4", DescriptorSide::Total).unwrap();
        assert_eq!(
            token.encoding,
            GresEncoding::MigSlice {
                profile: "1g.5gb".to_string()
            }
        );
        assert_eq!(token.count, 4);
        assert!(token.encoding.is_mig());

        assert_eq!(
            parse("gpu:1g.5gb:2(IDX:0,1)", DescriptorSide::Used),
            item("1g.5gb", 2)
        );
        assert_eq!(parse("gpu:3g.20gb:0", DescriptorSide::Used), item("3g.20gb", 0));
        assert_eq!(parse("gpu:1g.5gb", DescriptorSide::Total), item("1g.5gb", 0));
    }

    #[test]
    fn test_mig_token_with_shard_prefix() {
        assert_eq!(parse("shard:1g.5gb:3", DescriptorSide::Total), item("1g.5gb", 3));
    }

    #[test]
    fn test_legacy_device_token() {
        assert_eq!(parse("gpu:mi25:4", DescriptorSide::Total), item("gpu", 4));
        assert_eq!(
            parse("gpu:mi25:2(IDX:0-1)", DescriptorSide::Used),
            item("gpu", 2)
        );
        assert_eq!(parse("shard:mi25:8", DescriptorSide::Total), item("gpu", 8));
        assert_eq!(parse("gpu:mi25", DescriptorSide::Total), item("gpu", 0));
    }

    #[test]
    fn test_ignored_tokens() {
        assert_eq!(parse("mps:100", DescriptorSide::Total), None);
        assert_eq!(parse("(null)", DescriptorSide::Total), None);
        assert_eq!(parse("gpu:", DescriptorSide::Total), None);
        assert_eq!(parse("gpu", DescriptorSide::Used), None);
        assert_eq!(parse("", DescriptorSide::Used), None);
    }

    #[test]
    fn test_marker_inside_item() {
        assert_eq!(parse("gres/gpu:2", DescriptorSide::Total), item("gpu", 2));
        assert_eq!(parse("gpushard:3", DescriptorSide::Total), item("shard", 3));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(leading_number("12abc"), 12);
        assert_eq!(leading_number("  7"), 7);
        assert_eq!(leading_number("abc"), 0);
        assert_eq!(leading_number(""), 0);
        assert_eq!(leading_number("99999999999999999999999"), 0);
        assert_eq!(first_number("IDX:0-1"), 0);
        assert_eq!(first_number("abc15def3"), 15);
        assert_eq!(first_number("none"), 0);
    }
}
