//! Loader for the line-oriented hierarchy file format.
//!
//! One class per line, three `;`-separated sections:
//!
//! ```text
//! # name : superclasses ; properties ; typedefs
//! helioDataArray : helioObject
//! helioCollection : helioObject ; WRAP_EXCLUDE
//! helioLookupTable : helioObject ; WRAP_SPECIAL ; IndexType = 0x107 helioIdType
//! ```
//!
//! Properties are flags (`WRAP_EXCLUDE`) or `KEY=VALUE` pairs. A typedef
//! maps an alias to a packed type word (hex or decimal) plus an optional
//! underlying class name. Blank lines and `#` comments are skipped.

use std::fs;
use std::path::Path;

use bindery_decl::TypeDesc;

use crate::entry::{Hierarchy, HierarchyEntry, TypedefTarget};
use crate::error::{HierarchyError, Result};

/// Read and parse a hierarchy file.
pub fn load(path: &Path) -> Result<Hierarchy> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parse hierarchy-file text.
pub fn parse(text: &str) -> Result<Hierarchy> {
    let mut hierarchy = Hierarchy::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        hierarchy.insert(parse_entry(line, idx + 1)?);
    }

    Ok(hierarchy)
}

fn malformed(line: usize, reason: impl Into<String>) -> HierarchyError {
    HierarchyError::Malformed {
        line,
        reason: reason.into(),
    }
}

fn parse_entry(line: &str, lineno: usize) -> Result<HierarchyEntry> {
    let mut sections = line.splitn(3, ';');

    let head = sections.next().unwrap_or_default();
    let (name, supers) = match head.split_once(':') {
        Some((name, supers)) => (name.trim(), supers),
        None => (head.trim(), ""),
    };
    if name.is_empty() {
        return Err(malformed(lineno, "missing class name"));
    }

    let mut entry = HierarchyEntry::new(name);
    entry.superclasses = supers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if let Some(props) = sections.next() {
        for prop in props.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match prop.split_once('=') {
                Some((key, value)) => {
                    entry
                        .properties
                        .insert(key.trim().to_string(), value.trim().to_string());
                }
                None => {
                    entry.properties.insert(prop.to_string(), String::new());
                }
            }
        }
    }

    if let Some(typedefs) = sections.next() {
        for decl in typedefs.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (alias, target) = parse_typedef(decl, lineno)?;
            entry.typedefs.insert(alias, target);
        }
    }

    Ok(entry)
}

fn parse_typedef(decl: &str, lineno: usize) -> Result<(String, TypedefTarget)> {
    let (alias, rhs) = decl
        .split_once('=')
        .ok_or_else(|| malformed(lineno, format!("typedef without '=': {decl}")))?;
    let alias = alias.trim();
    if alias.is_empty() {
        return Err(malformed(lineno, "typedef without an alias name"));
    }

    let mut parts = rhs.split_whitespace();
    let word = parts
        .next()
        .ok_or_else(|| malformed(lineno, format!("typedef without a type word: {decl}")))?;
    let word = match word.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => word.parse(),
    }
    .map_err(|_| malformed(lineno, format!("bad type word in typedef: {decl}")))?;

    let class_name = parts.next().unwrap_or_default().to_string();

    Ok((
        alias.to_string(),
        TypedefTarget {
            ty: TypeDesc::from_raw(word),
            class_name,
        },
    ))
}
