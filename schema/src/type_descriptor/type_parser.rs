//! Parser for generic type signatures
//!
//! This module uses nom to parse the signature text the reflection layer
//! reports for declared types:
//! - `int`
//! - `java.util.List<com.acme.Item>`
//! - `java.util.Map<java.lang.String, java.util.List<com.acme.Item>>`
//! - `com.acme.Item[]`, `java.util.List<String>[]`
//! - `java.util.List<? extends com.acme.Item>`

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{all_consuming, opt, recognize};
use nom::multi::{many0_count, separated_list1};
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

use super::{TypeDescriptor, TypeName};
use crate::constants::MAX_SIGNATURE_NESTING;
use crate::error::{Error, Result};

/// Unbounded wildcards resolve to the root object type
const TYPE_JAVA_OBJECT: &str = "java.lang.Object";

/// Parse an identifier segment (alphanumeric, `_` or `$`)
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '$').parse(input)
}

/// Parse a qualified name separated by `.` or `::`
fn qualified_name(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(alt((tag("::"), tag("."))), identifier)).parse(input)
}

/// Parse a wildcard argument, keeping its bound when one is declared
fn wildcard(input: &str) -> IResult<&str, TypeDescriptor> {
    preceded(
        char('?'),
        opt(preceded(
            (multispace1, alt((tag("extends"), tag("super"))), multispace1),
            signature,
        )),
    )
    .map(|bound| bound.unwrap_or_else(|| TypeDescriptor::concrete(TYPE_JAVA_OBJECT)))
    .parse(input)
}

/// Parse `<A, B<C>, ...>`
fn type_arguments(input: &str) -> IResult<&str, Vec<TypeDescriptor>> {
    delimited(
        (char('<'), multispace0),
        separated_list1((multispace0, char(','), multispace0), alt((wildcard, signature))),
        (multispace0, char('>')),
    )
    .parse(input)
}

/// Parse a complete signature: name, optional arguments, optional array dimensions
fn signature(input: &str) -> IResult<&str, TypeDescriptor> {
    (
        qualified_name,
        opt(type_arguments),
        many0_count((multispace0, tag("[]"))),
    )
        .map(|(raw, arguments, dimensions)| build_descriptor(raw, arguments, dimensions))
        .parse(input)
}

/// Arrays are nominal types of their own, named by the element signature plus `[]`
fn build_descriptor(
    raw: &str,
    arguments: Option<Vec<TypeDescriptor>>,
    dimensions: usize,
) -> TypeDescriptor {
    let element = arguments.map_or_else(
        || TypeDescriptor::concrete(raw),
        |arguments| TypeDescriptor::parameterized(raw, arguments),
    );

    if dimensions == 0 {
        return element;
    }

    TypeDescriptor::Concrete(TypeName::from(format!(
        "{element}{}",
        "[]".repeat(dimensions)
    )))
}

/// Deepest `<` nesting in `input`, counted without recursion
fn nesting_depth(input: &str) -> usize {
    input
        .chars()
        .fold((0_usize, 0_usize), |(depth, deepest), c| match c {
            '<' => (depth + 1, deepest.max(depth + 1)),
            '>' => (depth.saturating_sub(1), deepest),
            _ => (depth, deepest),
        })
        .1
}

/// Parse a generic type signature into a `TypeDescriptor`
///
/// The parser recurses once per type-argument level, so signatures nested
/// deeper than `MAX_SIGNATURE_NESTING` are rejected before parsing starts.
pub fn parse_signature(input: &str) -> Result<TypeDescriptor> {
    let depth = nesting_depth(input);
    if depth > MAX_SIGNATURE_NESTING {
        return Err(Error::InvalidSignature {
            signature: input.chars().take(80).collect(),
            reason:    format!(
                "type arguments nested {depth} levels deep, maximum is {MAX_SIGNATURE_NESTING}"
            ),
        }
        .into());
    }

    match all_consuming(signature).parse(input.trim()) {
        Ok((_, descriptor)) => Ok(descriptor),
        Err(e) => Err(Error::InvalidSignature {
            signature: input.to_string(),
            reason:    e.to_string(),
        }
        .into()),
    }
}
