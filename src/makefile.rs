//! Make-target catalog - parses runnable build targets out of a Makefile.
//!
//! A recognized line has the shape `target: ... ## description`. Anything
//! without both markers, or whose target starts with `.`, is ignored.

use std::fs;
use std::path::Path;

use crate::models::MakeTarget;

/// Parse make targets from raw file content.
pub fn parse_targets(content: &str) -> Vec<MakeTarget> {
    let mut targets = Vec::new();

    for line in content.lines() {
        let Some(colon) = line.find(':') else {
            continue;
        };
        let Some(marker) = line.find("##") else {
            continue;
        };
        if marker < colon {
            continue;
        }

        let name = line[..colon].trim();
        if name.is_empty() || name.starts_with('.') {
            continue;
        }
        let description = line[marker + 2..].trim();

        targets.push(MakeTarget {
            name: name.to_string(),
            description: description.to_string(),
        });
    }

    targets
}

/// Load targets from a file path. A missing or unreadable file yields an
/// empty catalog, not an error.
pub fn load_targets(path: impl AsRef<Path>) -> Vec<MakeTarget> {
    match fs::read_to_string(path.as_ref()) {
        Ok(content) => parse_targets(&content),
        Err(e) => {
            tracing::debug!(path = %path.as_ref().display(), error = %e, "No make-target file");
            Vec::new()
        }
    }
}
