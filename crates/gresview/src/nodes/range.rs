/// Expands a `<prefix><start>-<end>` token into individual hostnames.
///
/// Numbers are zero-padded to the width of `start` (`node01-03` yields
/// `node01`, `node02`, `node03`). Tokens without a trailing numeric range are
/// returned unchanged; a range whose end is smaller than its start is empty.
pub fn expand(token: &str) -> Vec<String> {
    let Some(range) = split_range(token) else {
        return vec![token.to_string()];
    };
    let (Ok(start), Ok(end)) = (range.start.parse::<u64>(), range.end.parse::<u64>()) else {
        log::debug!("Node range `{token}` does not fit into integers, using it verbatim");
        return vec![token.to_string()];
    };
    let width = range.start.len();
    (start..=end)
        .map(|index| format!("{}{index:0width$}", range.prefix))
        .collect()
}

struct RangeToken<'a> {
    prefix: &'a str,
    start: &'a str,
    end: &'a str,
}

/// Splits `token` into a prefix and two digit runs separated by the last dash.
/// The start digits are the longest digit run that directly precedes the dash.
fn split_range(token: &str) -> Option<RangeToken<'_>> {
    let (head, end) = token.rsplit_once('-')?;
    if end.is_empty() || !end.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let prefix_len = head.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if prefix_len == head.len() {
        return None;
    }
    Some(RangeToken {
        prefix: &head[..prefix_len],
        start: &head[prefix_len..],
        end,
    })
}
