//! Recursive script expansion.
//!
//! The engine reads a file line by line, classifies each line against the
//! directive grammar, and splices included files into the output in place.
//! Recursion is synchronous and depth-first: a file is fully read before
//! any of its inclusions are expanded, so no handle stays open across the
//! recursive boundary.

use std::fs;
use std::path::Path;

use log::info;

use crate::directive::{
    basename, classify, collapse_placeholders, include_marker, LineClass, SHEBANG_PREFIX,
    TOOLING_PREFIX,
};
use crate::error::{ExpandError, ExpandResult};
use crate::options::ExpandOptions;

/// The result of expanding one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Output lines in source order, with inclusions expanded in place.
    pub content: Vec<String>,
    /// Description fragments from this file, joined with `"; "` in the
    /// order encountered. Empty when the file declares none.
    pub description: String,
}

/// The expansion engine.
///
/// Holds the options for a run; each [`expand`](Expander::expand) call is
/// otherwise pure with respect to its input path and the filesystem.
pub struct Expander {
    options: ExpandOptions,
}

impl Expander {
    /// Creates an engine with default options.
    pub fn new() -> Self {
        Self {
            options: ExpandOptions::default(),
        }
    }

    /// Creates an engine with the given options.
    pub fn with_options(options: ExpandOptions) -> Self {
        Self { options }
    }

    /// Expands `path` and everything it includes, starting at depth 0.
    ///
    /// # Arguments
    /// * `path` - The top-level script to expand
    ///
    /// # Returns
    /// * The expanded content and accumulated description, or the first
    ///   error encountered anywhere in the inclusion tree. Expansion is
    ///   all-or-nothing: a failed nested inclusion fails the whole call.
    pub fn expand(&self, path: impl AsRef<Path>) -> ExpandResult<Expansion> {
        self.expand_at(path.as_ref(), 0)
    }

    fn expand_at(&self, path: &Path, depth: usize) -> ExpandResult<Expansion> {
        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                return Err(ExpandError::DepthLimitExceeded {
                    path: path.to_path_buf(),
                    limit,
                });
            }
        }

        let text = fs::read_to_string(path)
            .map_err(|source| ExpandError::file_read(path, source))?;

        let mut content = Vec::new();
        let mut description = String::new();

        for raw in text.lines() {
            let line = raw.trim_end();

            // Shebangs and tooling comments belong to the top-level file
            // only; repeating them from included fragments would corrupt
            // the output.
            if depth > 0
                && (line.starts_with(SHEBANG_PREFIX) || line.starts_with(TOOLING_PREFIX))
            {
                continue;
            }

            // At the strictest clean level every comment-only line goes,
            // at any depth. This check comes before the footer check, so
            // a footer line is itself consumed as a comment here and does
            // not terminate the file.
            if self.options.clean.strips_comments() && line.trim_start().starts_with('#') {
                continue;
            }

            match classify(line) {
                LineClass::Footer => break,
                LineClass::Include { path: raw_path } => {
                    let resolved = collapse_placeholders(&raw_path);
                    info!("include '{}' => '{}'", raw_path, resolved);

                    content.push(String::new());
                    if self.options.clean.marks_inclusions() {
                        content.push(include_marker(basename(&resolved)));
                    }

                    let nested = self
                        .expand_at(Path::new(&resolved), depth + 1)
                        .map_err(|source| ExpandError::include_failed(path, source))?;
                    content.extend(nested.content);
                    // nested descriptions stay local to their own file
                }
                LineClass::Description { text } => {
                    info!("found description '{}'", text);
                    if description.is_empty() {
                        description = text;
                    } else {
                        description.push_str("; ");
                        description.push_str(&text);
                    }
                }
                LineClass::Remove => {}
                LineClass::Plain => content.push(line.to_string()),
            }
        }

        Ok(Expansion {
            content,
            description,
        })
    }
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}
