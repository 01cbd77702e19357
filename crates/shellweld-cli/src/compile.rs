//! Compile command implementation
//!
//! Drives the full pipeline for each target: expand inclusions, append
//! the license footer, write the checksum sidecar, and detach-sign the
//! finished artifact. Checksum and signing failures abort the run.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Datelike;
use colored::Colorize;
use log::info;

use shellweld_core::directive::basename;
use shellweld_core::{CleanLevel, ExpandOptions, Expander};

use crate::checksum;
use crate::dest;
use crate::package;
use crate::signer;
use crate::summary::{ArtifactSummary, RunSummary};

/// Run the compile command
///
/// # Arguments
/// * `targets` - Input scripts, each optionally in `input:output` form
/// * `clean_count` - Number of `--clean` flags passed
/// * `max_depth` - Optional inclusion depth ceiling
/// * `copyright` - Holder name for the footer copyright line
/// * `gpg` - Explicit signing binary
/// * `no_sign` - Skip the signing step
/// * `json` - Print a machine-readable run summary to stdout
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    targets: &[String],
    clean_count: u8,
    max_depth: Option<usize>,
    copyright: Option<&str>,
    gpg: Option<&Path>,
    no_sign: bool,
    json: bool,
) -> Result<ExitCode> {
    let outcome = run_targets(targets, clean_count, max_depth, copyright, gpg, no_sign, json);

    match outcome {
        Ok(artifacts) => {
            if json {
                let summary = RunSummary::success(artifacts);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&summary)
                        .context("Failed to serialize run summary")?
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if json => {
            let summary = RunSummary::failure(format!("{e:#}"));
            println!(
                "{}",
                serde_json::to_string_pretty(&summary)
                    .context("Failed to serialize run summary")?
            );
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e),
    }
}

fn run_targets(
    targets: &[String],
    clean_count: u8,
    max_depth: Option<usize>,
    copyright: Option<&str>,
    gpg: Option<&Path>,
    no_sign: bool,
    json: bool,
) -> Result<Vec<ArtifactSummary>> {
    let clean = CleanLevel::from_count(clean_count)?;
    let mut options = ExpandOptions::new().clean(clean);
    if let Some(limit) = max_depth {
        options = options.max_depth(limit);
    }
    let expander = Expander::with_options(options);

    let mut artifacts = Vec::with_capacity(targets.len());
    for target in targets {
        let (input, explicit) = dest::split_target(target);
        if !json {
            eprintln!("{} {}", "Compiling:".cyan().bold(), input);
        }

        let dest = dest::resolve_dest(input, explicit)
            .with_context(|| format!("Failed to resolve destination for '{input}'"))?;
        let dest_display = dest.display().to_string();
        info!("writing output to '{}'", dest_display);

        let expansion = expander
            .expand(input)
            .with_context(|| format!("Failed to expand '{input}'"))?;

        let year = chrono::Local::now().year();
        let footer = package::render_footer(
            basename(&dest_display),
            &expansion.description,
            year,
            copyright,
        );
        package::write_artifact(&dest, &expansion.content, &footer).with_context(|| {
            let parent = dest
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            format!(
                "Could not write '{}': does '{}' exist?",
                dest_display,
                parent.display()
            )
        })?;

        let sha512 = match checksum::write_sidecar(&dest, &dest_display) {
            Ok(hex) => hex,
            Err(e) => {
                // a failed checksum step must not leave a sidecar behind
                let _ = fs::remove_file(checksum::sidecar_path(&dest_display));
                return Err(e).with_context(|| {
                    format!("Unable to generate SHA-512 sum for '{dest_display}'")
                });
            }
        };

        let signature = if no_sign {
            None
        } else {
            let gpg_bin = signer::find_gpg(gpg)?;
            signer::sign_detached(&gpg_bin, &dest)
                .with_context(|| format!("Unable to generate signature for '{dest_display}'"))?;
            Some(format!("{dest_display}.asc"))
        };

        if !json {
            eprintln!("{} {} -> {}", "SUCCESS".green().bold(), input, dest_display);
        }

        artifacts.push(ArtifactSummary {
            source: input.to_string(),
            dest: dest_display,
            description: package::effective_description(&expansion.description).to_string(),
            sha512,
            signature,
        });
    }

    Ok(artifacts)
}
