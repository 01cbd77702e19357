//! Destination path derivation for compiled scripts.
//!
//! A bare input compiles to a file one directory above it, with the
//! `-base.` infix stripped from the name. The `input:output` target form
//! overrides that. Either way the result is folded lexically and shown
//! relative to the current directory.

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Splits an `input:output` target into its parts.
///
/// Splits on the first colon only, so `a:b:c` yields input `a` and
/// destination `b:c`.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once(':') {
        Some((input, output)) => (input, Some(output)),
        None => (target, None),
    }
}

/// Derives the destination for a bare input path.
///
/// The destination lives one directory above the input, with every
/// `-base.` in the file name replaced by `.`. A name without the infix
/// keeps its name and still hops one directory up.
pub fn derive_dest(input: &str) -> PathBuf {
    let path = Path::new(input);
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or(input);
    dir.join("..").join(name.replace("-base.", "."))
}

/// Folds `.` and `..` components without touching the filesystem.
///
/// The destination usually does not exist yet, so this stays lexical;
/// symlinks are not resolved and `..` above the root is a no-op.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().map(|part| part.as_os_str()).collect()
}

/// Re-expresses `path` relative to `base`. Both must be absolute and
/// already folded.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let shared = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in shared..base_parts.len() {
        result.push("..");
    }
    for part in &path_parts[shared..] {
        result.push(part.as_os_str());
    }
    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// Resolves the final destination for a target.
///
/// Takes the explicit output when given, otherwise derives one, then
/// absolutizes against the current directory, folds, and re-expresses the
/// result relative to it.
pub fn resolve_dest(input: &str, explicit: Option<&str>) -> io::Result<PathBuf> {
    let dest = match explicit {
        Some(output) => PathBuf::from(output),
        None => derive_dest(input),
    };
    let cwd = env::current_dir()?;
    let absolute = normalize_lexically(&cwd.join(dest));
    Ok(relative_to(&absolute, &cwd))
}
