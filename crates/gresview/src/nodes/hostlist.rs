use chumsky::Parser;
use chumsky::primitive::{filter, just};
use chumsky::text::TextParser;

use crate::common::parser2::{CharParser, ParseError, all_consuming, parse_padded_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaddedRange {
    start: u64,
    // Inclusive
    end: u64,
    width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostPart {
    Literal(String),
    Ranges(Vec<PaddedRange>),
}

/// Parses `n[-m]` inside brackets. Padding is taken from the start of the range.
fn parse_padded_range() -> impl CharParser<PaddedRange> {
    let end = just('-').ignore_then(parse_padded_number()).or_not();
    parse_padded_number()
        .then(end)
        .try_map(|((start, width), end), span| {
            let end = end.map(|(end, _)| end).unwrap_or(start);
            if end < start {
                Err(ParseError::custom(
                    span,
                    "Range end must not be smaller than its start",
                ))
            } else {
                Ok(PaddedRange { start, end, width })
            }
        })
        .labelled("range")
}

fn parse_bracket() -> impl CharParser<HostPart> {
    parse_padded_range()
        .padded()
        .separated_by(just(','))
        .at_least(1)
        .delimited_by(just('['), just(']'))
        .map(HostPart::Ranges)
}

fn parse_literal() -> impl CharParser<HostPart> {
    filter(|c: &char| !matches!(c, '[' | ']' | ',') && !c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(HostPart::Literal)
}

/// A single host pattern such as `rack[1-2]-gpu[01-04]`.
fn parse_host_pattern() -> impl CharParser<Vec<HostPart>> {
    parse_bracket()
        .or(parse_literal())
        .repeated()
        .at_least(1)
        .labelled("hostname")
}

fn parse_hostlist_inner() -> impl CharParser<Vec<Vec<HostPart>>> {
    parse_host_pattern()
        .padded()
        .separated_by(just(','))
        .at_least(1)
}

fn expand_pattern(parts: &[HostPart]) -> Vec<String> {
    let mut hosts = vec![String::new()];
    for part in parts {
        hosts = match part {
            HostPart::Literal(literal) => hosts
                .into_iter()
                .map(|mut host| {
                    host.push_str(literal);
                    host
                })
                .collect(),
            HostPart::Ranges(ranges) => hosts
                .iter()
                .flat_map(|host| {
                    ranges.iter().flat_map(move |range| {
                        (range.start..=range.end)
                            .map(move |index| format!("{host}{index:0width$}", width = range.width))
                    })
                })
                .collect(),
        };
    }
    hosts
}

/// Expands a Slurm host list such as `gpu[01-03,07],login1` into hostnames.
///
/// Several bracket groups inside one pattern produce their cartesian product,
/// in the order in which they are written.
pub fn parse_hostlist(input: &str) -> anyhow::Result<Vec<String>> {
    let patterns = all_consuming(parse_hostlist_inner()).parse_text(input)?;
    Ok(patterns
        .iter()
        .flat_map(|parts| expand_pattern(parts))
        .collect())
}
