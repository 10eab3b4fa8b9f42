use anyhow::anyhow;
use chumsky::Parser;
use chumsky::error::Simple;
use chumsky::primitive::{end, filter};
use colored::Color;

pub type ParseError = Simple<char>;

pub trait CharParser<T>: Parser<char, T, Error = ParseError> + Sized {
    fn parse_text(&self, input: &str) -> anyhow::Result<T> {
        self.parse(input)
            .map_err(|errors| anyhow!("{}", format_errors_cli(input, errors)))
    }
}
impl<T, P> CharParser<T> for P where P: Parser<char, T, Error = ParseError> {}

#[cfg(not(test))]
fn color_string<S: AsRef<str>>(string: S, color: Color) -> colored::ColoredString {
    use colored::Colorize;
    string.as_ref().color(color)
}

#[cfg(test)]
fn color_string<S: AsRef<str>>(string: S, _color: Color) -> String {
    string.as_ref().to_string()
}

/// Formats `chumsky` error into a user-visible (optionally colored) string.
/// Only the first error is rendered.
pub fn format_errors_cli(input: &str, mut errors: Vec<ParseError>) -> String {
    use chumsky::Span;
    use std::fmt::Write;

    const ERROR_COLOR: Color = Color::Red;

    let Some(error) = errors.drain(..).next() else {
        return format!("Cannot parse `{input}`");
    };

    let mut output = String::new();

    let span = error.span();
    let expected = if error.expected().len() == 0 {
        "something else".to_string()
    } else {
        let mut expected = error
            .expected()
            .map(|expected| match expected {
                Some(expected) => expected.to_string(),
                None => "<end of input>".to_string(),
            })
            .collect::<Vec<_>>();
        expected.sort_unstable();
        expected
            .into_iter()
            .map(|expected| color_string(expected, Color::Blue).to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    };

    let _ = writeln!(
        output,
        "{} found{}, expected {}:",
        if error.found().is_some() {
            "Unexpected token"
        } else {
            "Unexpected end of input"
        },
        match error.label() {
            Some(label) => format!(
                " while attempting to parse {}",
                color_string(label, Color::Yellow)
            ),
            None => String::new(),
        },
        expected,
    );

    if input.is_empty() {
        output.push_str("(the input was empty)");
        return output;
    }

    let _ = writeln!(
        output,
        "  {}{}{}",
        input.chars().take(span.start()).collect::<String>(),
        color_string(
            input
                .chars()
                .skip(span.start())
                .take(span.end() - span.start())
                .collect::<String>(),
            ERROR_COLOR
        ),
        input.chars().skip(span.end()).collect::<String>()
    );

    let spaces = " ".repeat(2 + span.start());
    let _ = writeln!(output, "{spaces}{}", color_string("|", ERROR_COLOR));

    let note = match error.reason() {
        chumsky::error::SimpleReason::Custom(msg) => msg.clone(),
        _ => format!(
            "Unexpected {}",
            error
                .found()
                .map(|c| format!("token `{c}`"))
                .unwrap_or_else(|| "end of input".to_string())
        ),
    };
    let _ = writeln!(
        output,
        "{spaces}{}{}",
        color_string("--- ", ERROR_COLOR),
        color_string(note, ERROR_COLOR)
    );

    output
}

/// Parses a run of decimal digits and remembers how many digits were written,
/// so that `007` can be reproduced with its zero padding.
pub fn parse_padded_number() -> impl CharParser<(u64, usize)> {
    filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|digits, span| {
            digits
                .parse::<u64>()
                .map(|value| (value, digits.len()))
                .map_err(|_| ParseError::custom(span, "Cannot parse as 8-byte unsigned integer"))
        })
        .labelled("number")
}

/// Return a parser that will fail if there is any input following the text parsed by the
/// provided parser.
pub fn all_consuming<T>(parser: impl CharParser<T>) -> impl CharParser<T> {
    parser.then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::expect_parser_error;

    #[test]
    fn test_parse_padded_number() {
        assert_eq!(parse_padded_number().parse_text("0").unwrap(), (0, 1));
        assert_eq!(parse_padded_number().parse_text("17").unwrap(), (17, 2));
        assert_eq!(parse_padded_number().parse_text("0042").unwrap(), (42, 4));
    }

    #[test]
    fn test_parse_padded_number_empty() {
        insta::assert_snapshot!(expect_parser_error(parse_padded_number(), ""), @r###"
        Unexpected end of input found while attempting to parse number, expected something else:
        (the input was empty)
        "###);
    }

    #[test]
    fn test_parse_padded_number_invalid() {
        insta::assert_snapshot!(expect_parser_error(parse_padded_number(), "x"), @r###"
        Unexpected token found while attempting to parse number, expected something else:
          x
          |
          --- Unexpected token `x`
        "###);
    }

    #[test]
    fn test_parse_padded_number_overflow() {
        assert!(
            all_consuming(parse_padded_number())
                .parse_text("99999999999999999999999")
                .is_err()
        );
    }
}
