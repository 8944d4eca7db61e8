//! Decompress command implementation.

use crate::utils::{
    CODE_EXT, EMBEDDED_EXT, NEW_EXT, SHORT_EXT, UNHUFF_EXT, create_progress_bar, derived_path,
    extension_of,
};
use oxihuff_codec::{decompress_embedded, decompress_textual};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A compressed input on disk, recognized by its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packed {
    /// Self-describing `.huff` file.
    Embedded(PathBuf),
    /// `.code` description and `.short` payload sharing a stem.
    Textual { code: PathBuf, short: PathBuf },
}

impl Packed {
    /// Recognize `path`. Either half of a textual pair names the pair.
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        match extension_of(path).as_deref() {
            Some(EMBEDDED_EXT) => Ok(Packed::Embedded(path.to_path_buf())),
            Some(CODE_EXT) => Ok(Packed::Textual {
                code: path.to_path_buf(),
                short: sibling(path, SHORT_EXT),
            }),
            Some(SHORT_EXT) => Ok(Packed::Textual {
                code: sibling(path, CODE_EXT),
                short: path.to_path_buf(),
            }),
            _ => Err(format!(
                "{}: expected a .{}, .{} or .{} file",
                path.display(),
                EMBEDDED_EXT,
                CODE_EXT,
                SHORT_EXT
            )
            .into()),
        }
    }

    /// The file named on the command line for this input.
    pub fn source(&self) -> &Path {
        match self {
            Packed::Embedded(path) => path,
            Packed::Textual { code, .. } => code,
        }
    }

    /// Extension given to the restored data.
    pub fn restored_extension(&self) -> &'static str {
        match self {
            Packed::Embedded(_) => UNHUFF_EXT,
            Packed::Textual { .. } => NEW_EXT,
        }
    }

    /// Read and fully decode the input.
    pub fn decode(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let data = match self {
            Packed::Embedded(path) => decompress_embedded(&fs::read(path)?)?,
            Packed::Textual { code, short } => {
                let description = fs::read_to_string(code)?;
                let payload = fs::read(short)?;
                decompress_textual(&description, &payload)?
            }
        };
        Ok(data)
    }
}

/// The other half of a textual pair. An upper-case extension on `path`
/// gives an upper-case sibling.
fn sibling(path: &Path, extension: &str) -> PathBuf {
    let upper = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| !e.bytes().any(|b| b.is_ascii_lowercase()));
    if upper {
        path.with_extension(extension.to_ascii_uppercase())
    } else {
        path.with_extension(extension)
    }
}

pub fn cmd_decompress(
    files: &[PathBuf],
    output: Option<&Path>,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let pb = create_progress_bar(files.len() as u64, progress);
    let mut total = 0u64;

    for input in files {
        pb.set_message(input.display().to_string());
        let packed = Packed::from_path(input)?;
        let data = packed
            .decode()
            .map_err(|e| format!("{}: {}", packed.source().display(), e))?;

        let out_path = derived_path(packed.source(), output, packed.restored_extension());
        fs::write(&out_path, &data)?;
        debug!(file = %out_path.display(), bytes = data.len(), "restored");
        if verbose {
            println!(
                "  {} -> {} ({} bytes)",
                input.display(),
                out_path.display(),
                data.len()
            );
        }

        total += data.len() as u64;
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("Decompressed {} file(s), {} bytes", files.len(), total);
    Ok(())
}
