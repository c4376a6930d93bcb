//! Evaluation of the integer constant expressions vendor headers use in `#define`s,
//! e.g. `(-1765328171L)`, `0x00000200` or `((krb5_error_code)-5)`.

use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while, take_while1};
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{delimited, preceded, terminated};
use nom::IResult;

use crate::error::ProbeError;
use crate::scan::identifier;

pub fn parse_c_integer(input: &str) -> Result<i64, ProbeError> {
    match all_consuming(delimited(multispace0, expression, multispace0))(input) {
        Ok((_, value)) => Ok(value),
        Err(_) => Err(ProbeError::Literal(input.trim().to_string())),
    }
}

/// Same as [`parse_c_integer`], narrowed to a C `int`.
pub fn parse_c_int(name: &str, input: &str) -> Result<i32, ProbeError> {
    let value = parse_c_integer(input)?;
    i32::try_from(value).map_err(|_| ProbeError::OutOfRange {
        name: name.to_string(),
        value,
    })
}

fn expression(input: &str) -> IResult<&str, i64> {
    alt((cast, parenthesized, negated, positive, literal))(input)
}

fn ws<'a, O>(inner: impl FnMut(&'a str) -> IResult<&'a str, O>) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

fn cast(input: &str) -> IResult<&str, i64> {
    preceded(delimited(char('('), ws(identifier), char(')')), ws(expression))(input)
}

fn parenthesized(input: &str) -> IResult<&str, i64> {
    delimited(char('('), ws(expression), char(')'))(input)
}

fn negated(input: &str) -> IResult<&str, i64> {
    map_res(preceded(char('-'), ws(expression)), |value: i64| {
        value.checked_neg().ok_or("overflow")
    })(input)
}

fn positive(input: &str) -> IResult<&str, i64> {
    preceded(char('+'), ws(expression))(input)
}

fn literal(input: &str) -> IResult<&str, i64> {
    terminated(
        alt((hexadecimal, octal, decimal)),
        take_while(|c: char| matches!(c, 'u' | 'U' | 'l' | 'L')),
    )(input)
}

fn hexadecimal(input: &str) -> IResult<&str, i64> {
    map_res(
        preceded(tag_no_case("0x"), take_while1(|c: char| c.is_ascii_hexdigit())),
        |digits: &str| i64::from_str_radix(digits, 16),
    )(input)
}

fn octal(input: &str) -> IResult<&str, i64> {
    map_res(
        preceded(char('0'), take_while1(|c: char| c.is_digit(8))),
        |digits: &str| i64::from_str_radix(digits, 8),
    )(input)
}

fn decimal(input: &str) -> IResult<&str, i64> {
    map_res(digit1, |digits: &str| digits.parse::<i64>())(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decimal() {
        assert_eq!(parse_c_integer("30").unwrap(), 30);
        assert_eq!(parse_c_integer("  0 ").unwrap(), 0);
    }

    #[test]
    fn mit_style_error_code() {
        assert_eq!(parse_c_integer("(-1765328171L)").unwrap(), -1765328171);
        assert_eq!(parse_c_integer("( - 1765328171L )").unwrap(), -1765328171);
    }

    #[test]
    fn hex_flags_with_suffix() {
        assert_eq!(parse_c_integer("0x00000200").unwrap(), 0x200);
        assert_eq!(parse_c_integer("0X1fUL").unwrap(), 0x1f);
    }

    #[test]
    fn octal_literal() {
        assert_eq!(parse_c_integer("010").unwrap(), 8);
    }

    #[test]
    fn casts_are_transparent() {
        assert_eq!(parse_c_integer("((krb5_error_code)-5)").unwrap(), -5);
        assert_eq!(parse_c_integer("(int) 7").unwrap(), 7);
    }

    #[test]
    fn rejects_non_constant_expansions() {
        assert!(matches!(parse_c_integer("some_function()"), Err(ProbeError::Literal(_))));
        assert!(parse_c_integer("1 + 2").is_err());
        assert!(parse_c_integer("").is_err());
    }

    #[test]
    fn narrowing_to_c_int() {
        assert_eq!(parse_c_int("X", "-1").unwrap(), -1);
        assert!(matches!(
            parse_c_int("X", "0x100000000"),
            Err(ProbeError::OutOfRange { value: 0x1_0000_0000, .. })
        ));
    }
}
