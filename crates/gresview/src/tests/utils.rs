use crate::common::parser2::{CharParser, all_consuming};

/// Runs the parser on the whole input and returns the rendered error message.
pub fn expect_parser_error<T: std::fmt::Debug>(parser: impl CharParser<T>, input: &str) -> String {
    match all_consuming(parser).parse_text(input) {
        Ok(value) => panic!("The parser should have failed, but it returned {value:?}"),
        Err(error) => error.to_string(),
    }
}
