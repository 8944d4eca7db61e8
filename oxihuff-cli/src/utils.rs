//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxihuff_codec::Symbol;
use std::path::{Path, PathBuf};

/// Extension of embedded-format output.
pub const EMBEDDED_EXT: &str = "huff";
/// Extension of the textual code description.
pub const CODE_EXT: &str = "code";
/// Extension of the textual-format payload.
pub const SHORT_EXT: &str = "short";
/// Extension of data restored from the embedded format.
pub const UNHUFF_EXT: &str = "unhuff";
/// Extension of data restored from the textual format.
pub const NEW_EXT: &str = "new";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    ProgressBar::new(len).with_style(style)
}

/// Path of the file derived from `input` with a new extension, placed in
/// `out_dir` or else next to the input.
///
/// `notes.txt` becomes `notes.huff`; only the last extension is replaced.
pub fn derived_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    dir.join(name)
}

/// Lower-cased extension of `path`, if any.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Space saved by compression, as a percentage of the original size.
pub fn space_savings(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// Human-readable form of a symbol for code listings.
pub fn symbol_label(symbol: Symbol) -> String {
    match symbol {
        Symbol::PseudoEof => "EOF".to_string(),
        Symbol::Byte(b) if b.is_ascii_graphic() => format!("'{}'", b as char),
        Symbol::Byte(b' ') => "' '".to_string(),
        Symbol::Byte(b) => format!("0x{:02X}", b),
    }
}
