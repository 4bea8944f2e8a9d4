//! Minimal INI file parsing.

use anyhow::{Result, bail};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Keys and raw values of one INI section.
pub type IniSection = BTreeMap<String, String>;

/// A parsed INI file: section name → key → raw string value.
///
/// No type coercion happens here; each consumer interprets its own keys.
///
/// # Examples
///
/// ```
/// use pynotes_cli::config::ini::parse_str;
///
/// let doc = parse_str("[CORE]\ndefault_editor = vim\n").unwrap();
/// assert_eq!(doc.get("CORE", "default_editor"), Some("vim"));
/// assert_eq!(doc.get("GIT", "use_git"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: BTreeMap<String, IniSection>,
}

impl IniDocument {
    /// Look up `key` in `section`. Section names are case-sensitive, keys are not.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .get(&key.to_lowercase())
            .map(String::as_str)
    }

    /// Return every key of `section`, if the section exists.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(name)
    }

    /// Iterate over section names in sorted order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Whether the document has no sections at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Read and parse the INI file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if the file does not exist,
/// [`ConfigError::Io`] if it cannot be read, and
/// [`ConfigError::InvalidSyntax`] if it cannot be parsed.
pub fn parse_file(path: &Path) -> Result<IniDocument, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_str(&content).map_err(|e| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: format!("{e:#}"),
    })
}

/// Parse INI content from a string.
///
/// Format:
/// ```ini
/// # full-line comment
/// [CORE]
/// default_editor = vim
/// note_directory: ~/notes
/// ```
///
/// Keys are lower-cased; section names keep their case. Only whole-line
/// comments exist: a `#` or `;` later in a line is part of the value.
///
/// # Errors
///
/// Returns an error if:
/// - An entry appears outside of a section header
/// - A line is neither a header nor a `key = value` / `key: value` pair
/// - A section or a key within a section is defined twice
pub fn parse_str(content: &str) -> Result<IniDocument> {
    let mut doc = IniDocument::default();
    let mut current: Option<String> = None;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        let line_num = line_num + 1;

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(header) = parse_header(trimmed) {
            if doc.sections.contains_key(&header) {
                bail!("duplicate section [{header}] at line {line_num}");
            }
            doc.sections.insert(header.clone(), IniSection::new());
            current = Some(header);
        } else if let Some(name) = &current {
            let Some((key, value)) = parse_kv_line(trimmed) else {
                bail!("invalid key-value pair at line {line_num}: {trimmed}");
            };
            if let Some(section) = doc.sections.get_mut(name) {
                if section.contains_key(&key) {
                    bail!("duplicate key '{key}' in section [{name}] at line {line_num}");
                }
                section.insert(key, value);
            }
        } else {
            bail!("entry outside of section at line {line_num}: {trimmed}");
        }
    }

    Ok(doc)
}

/// Parse a `[header]` line keeping its case.
fn parse_header(line: &str) -> Option<String> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return None;
    }
    Some(inner.to_string())
}

/// Parse a `key = value` or `key: value` line. The value is kept verbatim
/// apart from surrounding whitespace. Whichever delimiter comes first wins.
fn parse_kv_line(line: &str) -> Option<(String, String)> {
    let idx = line.find(['=', ':'])?;
    let key = line.get(..idx)?.trim();
    let value = line.get(idx + 1..)?.trim();
    if key.is_empty() {
        return None;
    }
    Some((
        key.to_lowercase(),
        value.to_string(),
    ))
}
