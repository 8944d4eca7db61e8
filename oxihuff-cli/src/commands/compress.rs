//! Compress command implementation.

use crate::utils::{
    CODE_EXT, EMBEDDED_EXT, SHORT_EXT, create_progress_bar, derived_path, space_savings,
};
use clap::ValueEnum;
use oxihuff_codec::{HuffmanConfig, compress};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How the tree is stored alongside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Single `.huff` file with the tree in its preamble
    #[default]
    Embedded,
    /// `.code` text description plus `.short` payload
    Textual,
}

impl OutputFormat {
    /// Codec configuration for this format.
    pub fn config(self) -> HuffmanConfig {
        match self {
            OutputFormat::Embedded => HuffmanConfig::EMBEDDED,
            OutputFormat::Textual => HuffmanConfig::TEXTUAL,
        }
    }
}

pub fn cmd_compress(
    files: &[PathBuf],
    format: OutputFormat,
    output: Option<&Path>,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let config = format.config();
    let pb = create_progress_bar(files.len() as u64, progress);
    let mut total_in = 0u64;
    let mut total_out = 0u64;

    for input in files {
        pb.set_message(input.display().to_string());
        let data = fs::read(input)?;
        debug!(file = %input.display(), bytes = data.len(), "compressing");

        let compressed = compress(&data, config)?;
        let written = match compressed.description {
            None => {
                let out_path = derived_path(input, output, EMBEDDED_EXT);
                fs::write(&out_path, &compressed.payload)?;
                if verbose {
                    println!("  {} -> {}", input.display(), out_path.display());
                }
                compressed.payload.len() as u64
            }
            Some(description) => {
                let code_path = derived_path(input, output, CODE_EXT);
                let short_path = derived_path(input, output, SHORT_EXT);
                fs::write(&code_path, description.as_bytes())?;
                fs::write(&short_path, &compressed.payload)?;
                if verbose {
                    println!(
                        "  {} -> {}, {}",
                        input.display(),
                        code_path.display(),
                        short_path.display()
                    );
                }
                (description.len() + compressed.payload.len()) as u64
            }
        };

        info!(
            file = %input.display(),
            original = data.len(),
            compressed = written,
            "compressed"
        );
        if verbose {
            println!(
                "    {} -> {} bytes ({:.1}% saved)",
                data.len(),
                written,
                space_savings(data.len() as u64, written)
            );
        }

        total_in += data.len() as u64;
        total_out += written;
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "Compressed {} file(s): {} -> {} bytes ({:.1}% saved)",
        files.len(),
        total_in,
        total_out,
        space_savings(total_in, total_out)
    );
    Ok(())
}
