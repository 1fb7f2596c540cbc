//! Identifier derivation for generated types and fields.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `address_line one.two-three` | [`identifier_from`] | `AddressLineOneTwoThree` |
//! | `#/definitions/address` | [`type_name_for`] | `Address` |
//! | `#` with title `Person` | [`type_name_for`] | `Person` |

use crate::ast::{SchemaNode, ROOT_POINTER};

/// Name used when nothing else yields an identifier.
pub const ROOT_TYPE_NAME: &str = "Root";

const DELIMITERS: [char; 4] = ['_', ' ', '.', '-'];

/// Builds an identifier by splitting on `_`, space, `.` and `-` and
/// upper-casing the first character of every segment.
///
/// # Examples
///
/// ```
/// use schema_structgen::naming::identifier_from;
///
/// assert_eq!(identifier_from("address_line one.two-three"), "AddressLineOneTwoThree");
/// assert_eq!(identifier_from("camelCase"), "CamelCase");
/// assert_eq!(identifier_from(""), "");
/// ```
pub fn identifier_from(raw: &str) -> String {
    raw.split(DELIMITERS).map(capitalize).collect()
}

/// Derives the type name for the node at `pointer`.
///
/// The root is named after its title, then its description. Any other pointer
/// is named from its last `tail_segments` path components. Names are not
/// unique across pointers.
pub fn type_name_for(pointer: &str, node: &SchemaNode, tail_segments: usize) -> String {
    let name = if pointer == ROOT_POINTER {
        [node.title.as_str(), node.description.as_str()]
            .into_iter()
            .map(identifier_from)
            .find(|name| !name.is_empty())
            .unwrap_or_default()
    } else {
        let clean = pointer.replace("#/", "");
        let parts: Vec<&str> = clean.split('/').collect();
        let start = parts.len().saturating_sub(tail_segments);
        parts[start..].iter().map(|part| identifier_from(part)).collect()
    };

    if name.is_empty() {
        ROOT_TYPE_NAME.to_string()
    } else {
        name
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
