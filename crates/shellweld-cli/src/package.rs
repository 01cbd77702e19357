//! Artifact packaging: expanded content plus the license footer.

use std::fs;
use std::io;
use std::path::Path;

/// Fallback description for scripts that declare none.
pub const DEFAULT_DESCRIPTION: &str = "generated script";

/// License notice appended to every artifact, one comment line per row.
const LICENSE_NOTICE: &str = "\
#     This program is free software: you can redistribute it and/or modify
#     it under the terms of the GNU Affero General Public License as published
#     by the Free Software Foundation, either version 3 of the License, or
#     (at your option) any later version.

#     This program is distributed in the hope that it will be useful,
#     but WITHOUT ANY WARRANTY; without even the implied warranty of
#     MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
#     GNU Affero General Public License for more details.

#     You should have received a copy of the GNU Affero General Public License
#     along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

/// The description as it appears in the artifact: the accumulated text,
/// or [`DEFAULT_DESCRIPTION`] when the script declared none.
pub fn effective_description(description: &str) -> &str {
    if description.is_empty() {
        DEFAULT_DESCRIPTION
    } else {
        description
    }
}

/// Renders the footer block for an artifact.
///
/// The block opens with a `###` divider, names the destination and its
/// description, then carries the copyright line and the license notice.
/// An empty description falls back to [`DEFAULT_DESCRIPTION`].
pub fn render_footer(
    dest_name: &str,
    description: &str,
    year: i32,
    holder: Option<&str>,
) -> String {
    let description = effective_description(description);
    let copyright = match holder {
        Some(holder) => format!("#     Copyright (C) {year}  {holder}"),
        None => format!("#     Copyright (C) {year}"),
    };
    format!("###\n# {dest_name} - {description}\n{copyright}\n\n{LICENSE_NOTICE}\n")
}

/// Writes the artifact: the content lines joined with newlines, a single
/// trailing newline, then the footer block.
pub fn write_artifact(dest: &Path, content: &[String], footer: &str) -> io::Result<()> {
    fs::write(dest, format!("{}\n{}", content.join("\n"), footer))
}
