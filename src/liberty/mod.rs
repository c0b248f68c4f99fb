// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Liberty description tree
//!
//! A Liberty file is a forest of groups. Every group has a type tag
//! (`library`, `cell`, `pin`, ...), positional arguments, attributes and
//! nested child groups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single token from the Liberty source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibValue {
    /// Bare token such as `input`, `1.0` or `INV_X1`
    Word(String),
    /// Double-quoted string, stored without the surrounding quotes
    Quoted(String),
}

impl LibValue {
    /// Value with surrounding quote characters stripped
    pub fn unquoted(&self) -> &str {
        match self {
            LibValue::Word(s) | LibValue::Quoted(s) => s,
        }
    }
}

impl fmt::Display for LibValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibValue::Word(s) => write!(f, "{s}"),
            LibValue::Quoted(s) => write!(f, "\"{s}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibAttributeValue {
    /// `name : value ;`
    Simple(LibValue),
    /// `name ( value, value, ... ) ;`
    Complex(Vec<LibValue>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibAttribute {
    pub name: String,
    pub value: LibAttributeValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibGroup {
    pub group_type: String,
    pub args: Vec<LibValue>,
    pub attributes: Vec<LibAttribute>,
    pub groups: Vec<LibGroup>,
}

impl LibGroup {
    pub fn new(group_type: &str) -> Self {
        Self {
            group_type: group_type.to_string(),
            args: Vec::new(),
            attributes: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Append a quoted positional argument
    pub fn with_arg(mut self, arg: &str) -> Self {
        self.args.push(LibValue::Quoted(arg.to_string()));
        self
    }

    /// Append a simple attribute; plain identifiers and numbers are stored
    /// bare, everything else quoted
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        let bare = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '.');
        let value = if bare {
            LibValue::Word(value.to_string())
        } else {
            LibValue::Quoted(value.to_string())
        };
        self.attributes.push(LibAttribute {
            name: name.to_string(),
            value: LibAttributeValue::Simple(value),
        });
        self
    }

    pub fn with_group(mut self, group: LibGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn arg(&self, index: usize) -> Option<&LibValue> {
        self.args.get(index)
    }

    /// First positional argument, quote-stripped
    pub fn name(&self) -> Option<&str> {
        self.arg(0).map(LibValue::unquoted)
    }

    /// First simple attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&LibValue> {
        self.attributes
            .iter()
            .filter(|attr| attr.name == name)
            .find_map(|attr| match &attr.value {
                LibAttributeValue::Simple(value) => Some(value),
                LibAttributeValue::Complex(_) => None,
            })
    }

    /// First complex attribute called `name`
    pub fn complex_attribute(&self, name: &str) -> Option<&[LibValue]> {
        self.attributes
            .iter()
            .filter(|attr| attr.name == name)
            .find_map(|attr| match &attr.value {
                LibAttributeValue::Complex(values) => Some(values.as_slice()),
                LibAttributeValue::Simple(_) => None,
            })
    }

    /// Direct child groups of the given type, in declaration order
    pub fn groups<'a>(&'a self, group_type: &'a str) -> impl Iterator<Item = &'a LibGroup> + 'a {
        self.groups
            .iter()
            .filter(move |group| group.group_type == group_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liberty {
    pub groups: Vec<LibGroup>,
}

impl Liberty {
    /// The first top-level `library` group, falling back to the first group
    pub fn library(&self) -> Option<&LibGroup> {
        self.groups
            .iter()
            .find(|group| group.group_type == "library")
            .or_else(|| self.groups.first())
    }
}

pub mod liberty_parser;
pub mod preprocessor;
pub mod reader;
