// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! JVM type and method descriptors, rendered in Java source form for the comments the
//! printer attaches to backing fields and accessors.

use thiserror::Error;

use crate::bitenum::BitEnum;
use crate::flags::AccessFlag;
use crate::names::{external_class_name, external_short_class_name};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("empty type descriptor")]
    Empty,
    #[error("unexpected character {found:?} at offset {offset} in descriptor {descriptor:?}")]
    UnexpectedChar {
        descriptor: String,
        offset: usize,
        found: char,
    },
    #[error("unterminated class type in descriptor {0:?}")]
    UnterminatedClass(String),
    #[error("trailing data after type in descriptor {0:?}")]
    TrailingData(String),
    #[error("method descriptor {0:?} has no parameter list")]
    MissingParameters(String),
}

pub fn is_internal_primitive_type(descriptor: &str) -> bool {
    matches!(
        descriptor,
        "Z" | "B" | "C" | "S" | "I" | "F" | "J" | "D" | "V"
    )
}

/// `Lpkg/Name;` -> `pkg/Name`. Anything that is not a class type comes back unchanged.
pub fn internal_class_name_from_type(descriptor: &str) -> &str {
    match (descriptor.strip_suffix(';'), descriptor.find('L')) {
        (Some(body), Some(start)) if start < body.len() => &body[start + 1..],
        _ => descriptor,
    }
}

fn primitive_name(c: char) -> Option<&'static str> {
    Some(match c {
        'Z' => "boolean",
        'B' => "byte",
        'C' => "char",
        'S' => "short",
        'I' => "int",
        'F' => "float",
        'J' => "long",
        'D' => "double",
        'V' => "void",
        _ => return None,
    })
}

/// Parse one type starting at `offset`, returning its external form and the offset just
/// past it.
fn parse_type(descriptor: &str, offset: usize) -> Result<(String, usize), DescriptorError> {
    let rest = &descriptor[offset..];
    let dimensions = rest.chars().take_while(|c| *c == '[').count();
    let start = offset + dimensions;
    let Some(c) = descriptor[start..].chars().next() else {
        return Err(if descriptor.is_empty() {
            DescriptorError::Empty
        } else {
            DescriptorError::UnterminatedClass(descriptor.to_string())
        });
    };
    let (element, end) = if let Some(name) = primitive_name(c) {
        (name.to_string(), start + 1)
    } else if c == 'L' {
        let Some(len) = descriptor[start..].find(';') else {
            return Err(DescriptorError::UnterminatedClass(descriptor.to_string()));
        };
        (
            external_class_name(&descriptor[start + 1..start + len]),
            start + len + 1,
        )
    } else {
        return Err(DescriptorError::UnexpectedChar {
            descriptor: descriptor.to_string(),
            offset: start,
            found: c,
        });
    };
    Ok((element + &"[]".repeat(dimensions), end))
}

/// `[Ljava/lang/String;` -> `java.lang.String[]`.
pub fn external_type(descriptor: &str) -> Result<String, DescriptorError> {
    let (external, end) = parse_type(descriptor, 0)?;
    if end != descriptor.len() {
        return Err(DescriptorError::TrailingData(descriptor.to_string()));
    }
    Ok(external)
}

/// Split a method descriptor into its external argument types and return type.
pub fn external_method_types(
    descriptor: &str,
) -> Result<(Vec<String>, String), DescriptorError> {
    if !descriptor.starts_with('(') {
        return Err(DescriptorError::MissingParameters(descriptor.to_string()));
    }
    let mut arguments = vec![];
    let mut offset = 1;
    loop {
        match descriptor[offset..].chars().next() {
            Some(')') => break,
            Some(_) => {
                let (argument, end) = parse_type(descriptor, offset)?;
                arguments.push(argument);
                offset = end;
            }
            None => return Err(DescriptorError::MissingParameters(descriptor.to_string())),
        }
    }
    let (return_type, end) = parse_type(descriptor, offset + 1)?;
    if end != descriptor.len() {
        return Err(DescriptorError::TrailingData(descriptor.to_string()));
    }
    Ok((arguments, return_type))
}

const METHOD_ACCESS_KEYWORDS: [(AccessFlag, &str); 9] = [
    (AccessFlag::Public, "public "),
    (AccessFlag::Private, "private "),
    (AccessFlag::Protected, "protected "),
    (AccessFlag::Static, "static "),
    (AccessFlag::Final, "final "),
    (AccessFlag::Synchronized, "synchronized "),
    (AccessFlag::Native, "native "),
    (AccessFlag::Abstract, "abstract "),
    (AccessFlag::Strict, "strictfp "),
];

pub fn external_access_flags(access: BitEnum<AccessFlag>) -> String {
    METHOD_ACCESS_KEYWORDS
        .iter()
        .filter(|(flag, _)| access.contains(*flag))
        .map(|(_, keyword)| *keyword)
        .collect()
}

/// `int myInt` for a field, as declared in Java source.
pub fn external_full_field_description(
    access: BitEnum<AccessFlag>,
    name: &str,
    descriptor: &str,
) -> Result<String, DescriptorError> {
    Ok(format!(
        "{}{} {name}",
        external_access_flags(access),
        external_type(descriptor)?
    ))
}

/// `public final int getX()` for a method; constructors take the short class name.
pub fn external_full_method_description(
    internal_class_name: &str,
    access: BitEnum<AccessFlag>,
    name: &str,
    descriptor: &str,
) -> Result<String, DescriptorError> {
    let (arguments, return_type) = external_method_types(descriptor)?;
    let head = if name == "<init>" {
        let external = external_class_name(internal_class_name);
        external_short_class_name(&external).to_string()
    } else {
        format!("{return_type} {name}")
    };
    Ok(format!(
        "{}{head}({})",
        external_access_flags(access),
        arguments.join(", ")
    ))
}
