// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0, space0},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded, terminated},
    IResult, Parser,
};

use super::{LibAttribute, LibAttributeValue, LibGroup, LibValue, Liberty};

enum Statement {
    Attribute(LibAttribute),
    Group(LibGroup),
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '.' || c == '-')(input)
}

fn quoted_string(input: &str) -> IResult<&str, &str> {
    let (rest, _) = char('"')(input)?;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Ok((&rest[i + 1..], &rest[..i])),
            _ => escaped = false,
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn quoted_value(input: &str) -> IResult<&str, LibValue> {
    map(quoted_string, |s: &str| LibValue::Quoted(s.to_string())).parse(input)
}

fn bare_arg(input: &str) -> IResult<&str, LibValue> {
    map(
        take_while1(|c: char| !c.is_whitespace() && !",()\"{};".contains(c)),
        |s: &str| LibValue::Word(s.to_string()),
    )
    .parse(input)
}

/// Bare simple-attribute value, running up to `;`, end of line or `}`.
/// May be empty (`comment : ;`).
fn bare_value(input: &str) -> IResult<&str, LibValue> {
    map(take_till(|c: char| c == ';' || c == '\n' || c == '}'), |s: &str| {
        LibValue::Word(s.trim_end().to_string())
    })
    .parse(input)
}

/// Arguments between parentheses, separated by commas and/or whitespace
fn arg_list(input: &str) -> IResult<&str, Vec<LibValue>> {
    delimited(
        char('('),
        many0(preceded(
            multispace0,
            terminated(
                alt((quoted_value, bare_arg)),
                opt(preceded(multispace0, char(','))),
            ),
        )),
        preceded(multispace0, char(')')),
    )
    .parse(input)
}

fn statement_end(input: &str) -> IResult<&str, Option<char>> {
    preceded(space0, opt(char(';'))).parse(input)
}

fn simple_attribute<'a>(input: &'a str, name: &str) -> IResult<&'a str, Statement> {
    let (input, _) = char(':')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, value) = alt((quoted_value, bare_value)).parse(input)?;
    let (input, _) = statement_end(input)?;

    Ok((
        input,
        Statement::Attribute(LibAttribute {
            name: name.to_string(),
            value: LibAttributeValue::Simple(value),
        }),
    ))
}

fn group_or_complex_attribute<'a>(input: &'a str, name: &str) -> IResult<&'a str, Statement> {
    let (input, args) = arg_list(input)?;
    let (after_space, _) = multispace0(input)?;

    if let Ok((rest, _)) = char::<&str, nom::error::Error<&str>>('{')(after_space) {
        let (rest, (attributes, groups)) = group_body(rest)?;
        let (rest, _) = statement_end(rest)?;
        return Ok((
            rest,
            Statement::Group(LibGroup {
                group_type: name.to_string(),
                args,
                attributes,
                groups,
            }),
        ));
    }

    let (input, _) = statement_end(input)?;
    Ok((
        input,
        Statement::Attribute(LibAttribute {
            name: name.to_string(),
            value: LibAttributeValue::Complex(args),
        }),
    ))
}

fn statement(input: &str) -> IResult<&str, Statement> {
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0(input)?;

    if input.starts_with(':') {
        simple_attribute(input, name)
    } else {
        group_or_complex_attribute(input, name)
    }
}

/// Statements up to and including the closing `}`
fn group_body(input: &str) -> IResult<&str, (Vec<LibAttribute>, Vec<LibGroup>)> {
    let mut attributes = Vec::new();
    let mut groups = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;

        if let Some(rest) = rest.strip_prefix('}') {
            return Ok((rest, (attributes, groups)));
        }

        // Stray separators between statements
        if let Some(rest) = rest.strip_prefix(';') {
            remaining = rest;
            continue;
        }

        let (rest, stmt) = statement(rest)?;
        match stmt {
            Statement::Attribute(attr) => attributes.push(attr),
            Statement::Group(group) => groups.push(group),
        }
        remaining = rest;
    }
}

/// Parse preprocessed Liberty text into its top-level group forest.
///
/// Top-level attributes are skipped; parsing stops at the first construct
/// that is neither a group nor an attribute.
pub fn parse_liberty(input: &str) -> IResult<&str, Liberty> {
    let mut groups = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        if rest.is_empty() {
            remaining = rest;
            break;
        }
        if let Some(rest) = rest.strip_prefix(';') {
            remaining = rest;
            continue;
        }

        let (rest, stmt) = statement(rest)?;
        if let Statement::Group(group) = stmt {
            groups.push(group);
        }
        remaining = rest;
    }

    Ok((remaining, Liberty { groups }))
}
