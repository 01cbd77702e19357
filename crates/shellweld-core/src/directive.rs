//! Directive grammar for script lines.
//!
//! A single pass of pattern matching classifies each line into a
//! [`LineClass`], keeping the matching priority explicit and testable in
//! isolation from the recursive expansion logic.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Prefix of a shebang line.
pub const SHEBANG_PREFIX: &str = "#!";

/// Prefix of a tooling-only comment, meaningful only in top-level files.
pub const TOOLING_PREFIX: &str = "#%";

/// Prefix that terminates processing of the current file.
pub const FOOTER_PREFIX: &str = "###FOOTER";

/// Regex pattern for an inclusion directive.
/// An optionally indented `source` keyword, then an optionally quoted path
/// ending in `.bash`, and nothing else on the line. The capture is greedy:
/// a line naming two `.bash` paths captures through the last one.
const INCLUDE_PATTERN: &str = r#"^\s*source\s+["']*(.*\.bash)["']*\s*$"#;

/// Regex pattern for a description directive, searched anywhere in the line.
const DESCRIPTION_PATTERN: &str = r"\s*#DESC[: ]+(.+)\s*$";

/// Regex pattern for a removal marker. The preceding `\W` means the marker
/// only counts when it trails other content; at column 0 it does not match.
const REMOVE_PATTERN: &str = r"\W#%remove\s*";

/// Regex pattern for a brace-delimited placeholder in an include path.
const PLACEHOLDER_PATTERN: &str = r"\$\{.+\}";

static INCLUDE_REGEX: OnceLock<Regex> = OnceLock::new();
static DESCRIPTION_REGEX: OnceLock<Regex> = OnceLock::new();
static REMOVE_REGEX: OnceLock<Regex> = OnceLock::new();
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn include_regex() -> &'static Regex {
    INCLUDE_REGEX.get_or_init(|| Regex::new(INCLUDE_PATTERN).expect("invalid regex pattern"))
}

fn description_regex() -> &'static Regex {
    DESCRIPTION_REGEX
        .get_or_init(|| Regex::new(DESCRIPTION_PATTERN).expect("invalid regex pattern"))
}

fn remove_regex() -> &'static Regex {
    REMOVE_REGEX.get_or_init(|| Regex::new(REMOVE_PATTERN).expect("invalid regex pattern"))
}

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("invalid regex pattern"))
}

/// Classification of a single script line.
///
/// Produced by [`classify`]; the expansion engine decides what each class
/// means at the current depth and clean level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Inclusion directive. Holds the captured path exactly as written,
    /// before placeholder collapse.
    Include { path: String },
    /// Description directive. Holds the free text after the marker.
    Description { text: String },
    /// Removal marker; the line is dropped.
    Remove,
    /// Footer marker; processing of the file stops here.
    Footer,
    /// Any other line, emitted as-is.
    Plain,
}

/// Classifies one line against the directive grammar.
///
/// Priority when several patterns could apply: footer, then inclusion,
/// then description, then removal. First match wins; anything else is
/// [`LineClass::Plain`]. The caller is expected to have stripped trailing
/// whitespace already.
pub fn classify(line: &str) -> LineClass {
    if line.starts_with(FOOTER_PREFIX) {
        return LineClass::Footer;
    }
    if let Some(caps) = include_regex().captures(line) {
        return LineClass::Include {
            path: caps[1].to_string(),
        };
    }
    if let Some(caps) = description_regex().captures(line) {
        return LineClass::Description {
            text: caps[1].to_string(),
        };
    }
    if remove_regex().is_match(line) {
        return LineClass::Remove;
    }
    LineClass::Plain
}

/// Collapses every `${...}` placeholder in an include path to a literal `.`.
///
/// The inner match is greedy, so `a${X}b${Y}c.bash` collapses to `a.c.bash`
/// rather than `a.b.c.bash`. This is lossy by design: the concrete filename
/// is attempted as-is and a missing file surfaces as a read error, with no
/// separate unresolved-template validation.
pub fn collapse_placeholders(path: &str) -> String {
    placeholder_regex().replace_all(path, ".").into_owned()
}

/// Renders the provenance marker emitted above inlined content.
///
/// The marker carries the tooling prefix, so recompiling an artifact strips
/// it again from included positions.
pub fn include_marker(name: &str) -> String {
    format!("{}include '{}'", TOOLING_PREFIX, name)
}

/// Returns the final path component, or the whole string when there is none.
pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
