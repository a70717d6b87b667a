use std::collections::{HashMap, HashSet};

use crate::hierarchy::{node::*, UINode};

// Field names land in generated Java, so anything colliding with a
// keyword gets a trailing underscore.
const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
];

/// Reduce an arbitrary attribute value to a legal field identifier.
/// Returns an empty string when nothing usable remains.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut out = String::new();
    let mut last_was_underscore = false;

    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_underscore = false;
        } else if !last_was_underscore && !out.is_empty() {
            out.push('_');
            last_was_underscore = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }

    if out.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
        out.insert(0, '_');
    }
    if JAVA_KEYWORDS.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

/// Name for one element, in priority order: accessibility id, resource-id
/// suffix (after the last `/`), sanitized text, positional fallback.
pub fn base_name(node: &UINode, index: usize) -> String {
    if let Some(value) = node.non_empty_attr(ATTR_ACCESSIBILITY_ID) {
        let name = sanitize_identifier(value);
        if !name.is_empty() {
            return name;
        }
    }
    if let Some(value) = node.non_empty_attr(ATTR_RESOURCE_ID) {
        let suffix = value.rsplit('/').next().unwrap_or(value);
        let name = sanitize_identifier(suffix);
        if !name.is_empty() {
            return name;
        }
    }
    if let Some(value) = node.text_or_label() {
        let name = sanitize_identifier(value);
        if !name.is_empty() {
            return name;
        }
    }
    format!("element_{}", index)
}

/// Deduplicates names within one page object. Collisions get a numeric
/// suffix in first-seen order: `login`, `login_2`, `login_3`, ...
#[derive(Debug, Default)]
pub struct NameAllocator {
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, base: String) -> String {
        loop {
            let count = self.counts.entry(base.clone()).or_insert(0);
            *count += 1;
            let candidate = if *count == 1 {
                base.clone()
            } else {
                format!("{}_{}", base, count)
            };
            // A sanitized value may itself look like a suffixed name, so
            // issued names are checked, not just the base.
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
