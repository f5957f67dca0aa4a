//! Parsing utilities for `pacman -Si` output and dependency specifications.

/// What: Extract the list value of a `pacman -Si` field such as "Depends On".
///
/// Inputs:
/// - `text`: Raw stdout emitted by `pacman -Si` for a package.
/// - `field`: Field label, e.g. `"Depends On"` or `"Conflicts With"`.
///
/// Output:
/// - Whitespace-separated tokens of the field; empty for `None` or a missing field.
///
/// Details:
/// - Follows indented continuation lines, which pacman emits when a field
///   wraps.
/// - Only the first package block is read when several repos answer.
#[must_use]
pub fn parse_si_list(text: &str, field: &str) -> Vec<String> {
    let mut collecting = false;
    let mut raw = String::new();
    for line in text.lines() {
        if collecting {
            if line.starts_with(' ') && !line.contains(" : ") {
                raw.push(' ');
                raw.push_str(line.trim());
                continue;
            }
            break;
        }
        if let Some((key, value)) = line.split_once(':')
            && key.trim() == field
        {
            raw.push_str(value.trim());
            collecting = true;
        }
    }
    let raw = raw.trim();
    if raw.is_empty() || raw == "None" {
        return Vec::new();
    }
    raw.split_whitespace().map(str::to_string).collect()
}

/// What: Dependency package names from `pacman -Si` output.
///
/// Inputs:
/// - `text`: Raw stdout emitted by `pacman -Si`.
///
/// Output:
/// - Package names with version constraints removed and virtual shared-library
///   entries (`libfoo.so=1-64`) dropped, in declared order.
#[must_use]
pub fn parse_pacman_si_deps(text: &str) -> Vec<String> {
    parse_si_list(text, "Depends On")
        .iter()
        .filter(|s| !is_virtual_so(s))
        .map(|s| parse_dep_spec(s).0)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Whether a dependency token names a shared library provision.
fn is_virtual_so(spec: &str) -> bool {
    spec.ends_with(".so") || spec.contains(".so.") || spec.contains(".so=")
}

/// What: Split a dependency spec into name and version constraint.
///
/// Inputs:
/// - `spec`: Token such as `python>=3.12` or `glibc`.
///
/// Output:
/// - `(name, constraint)`; the constraint keeps its operator and is empty when absent.
#[must_use]
pub fn parse_dep_spec(spec: &str) -> (String, String) {
    for op in ["<=", ">=", "=", "<", ">"] {
        if let Some(pos) = spec.find(op) {
            let name = spec[..pos].trim().to_string();
            let version = spec[pos..].trim().to_string();
            return (name, version);
        }
    }
    (spec.trim().to_string(), String::new())
}
