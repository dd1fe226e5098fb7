use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::ds::value::JsString;

#[derive(Parser)]
#[grammar = "ds/operations/numeric_string.pest"] // relative to src
struct NumericStringParser;

/// Converts a string to a number. Strings that are not a numeric literal give NaN; empty or
/// white-space-only strings give 0.
pub fn string_to_number(s: &JsString) -> f64 {
    parse_string_numeric_literal(&s.to_rust_string()).unwrap_or(f64::NAN)
}

pub(crate) fn parse_string_numeric_literal(text: &str) -> Option<f64> {
    let literal = NumericStringParser::parse(Rule::string_numeric_literal, text)
        .ok()?
        .next()?;
    let mut value = 0.0;
    for pair in literal.into_inner() {
        match pair.as_rule() {
            Rule::hex_integer_literal => value = hex_digits_to_number(&pair.as_str()[2..]),
            Rule::str_decimal_literal => value = decimal_literal_to_number(pair),
            Rule::EOI => {}
            _ => return None,
        }
    }
    Some(value)
}

fn hex_digits_to_number(digits: &str) -> f64 {
    digits.chars().fold(0.0, |acc, c| {
        acc * 16.0 + c.to_digit(16).map_or(0.0, |d| d as f64)
    })
}

fn decimal_literal_to_number(pair: Pair<Rule>) -> f64 {
    let mut negative = false;
    let mut magnitude = f64::NAN;
    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::sign => negative = inner_pair.as_str() == "-",
            Rule::infinity => magnitude = f64::INFINITY,
            Rule::decimal_number => {
                magnitude = inner_pair.as_str().parse::<f64>().unwrap_or(f64::NAN)
            }
            _ => {}
        }
    }
    if negative {
        -magnitude
    } else {
        magnitude
    }
}
