//! Shellweld Expansion Engine
//!
//! This crate turns a "base" shell script into a single self-contained
//! script by recursively inlining the files it `source`s, while a small
//! grammar of comment directives controls what ends up in the output.
//!
//! # Overview
//!
//! Each line of a script is classified against the directive grammar:
//!
//! - **Inclusion**: `source "lib.bash"` is replaced in place by the
//!   expanded content of `lib.bash`, preceded by a blank separator and
//!   (by default) a `#%include 'lib.bash'` provenance marker
//! - **Description**: `#DESC: text` accumulates into a per-file
//!   description string and is never emitted
//! - **Removal**: a trailing `#%remove` marker drops the line
//! - **Footer**: `###FOOTER` stops processing of the current file
//!
//! Shebang and `#%` tooling lines are kept in the top-level file and
//! stripped from included ones. A clean level controls marker and comment
//! suppression.
//!
//! # Example
//!
//! ```no_run
//! use shellweld_core::{CleanLevel, ExpandOptions, Expander};
//!
//! let options = ExpandOptions::new().clean(CleanLevel::Markers);
//! let expansion = Expander::with_options(options).expand("tool-base.bash")?;
//!
//! println!("{}", expansion.content.join("\n"));
//! println!("description: {}", expansion.description);
//! # Ok::<(), shellweld_core::ExpandError>(())
//! ```
//!
//! # Modules
//!
//! - [`directive`]: Line grammar, classifier, and placeholder collapse
//! - [`expand`]: The recursive expansion engine
//! - [`options`]: Clean levels and run options
//! - [`error`]: Engine error types

pub mod directive;
pub mod error;
pub mod expand;
pub mod options;

// Re-export commonly used types at the crate root
pub use directive::{classify, collapse_placeholders, LineClass};
pub use error::{ExpandError, ExpandResult};
pub use expand::{Expander, Expansion};
pub use options::{CleanLevel, ExpandOptions, MAX_CLEAN_LEVEL};
