//! Final result lines printed after a successful run.

use std::path::Path;

use bytesize::ByteSize;
use console::style;

use crate::digest::Verdict;
use crate::types::ProcessorMode;

/// Formats a byte count for display, e.g. `116 B` or `1.5 KiB`.
pub fn format_bytes(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Prints the outcome of a cipher run.
pub fn show_success(mode: ProcessorMode, input: &Path, output: &Path, written: u64) {
    println!(
        "{} {}",
        style("✓").green(),
        style(format!("{}: {} -> {} ({})", mode.label(), input.display(), output.display(), format_bytes(written))).bold()
    );
}

/// Prints the outcome of a digest comparison.
pub fn show_verdict(verdict: Verdict, count: usize) {
    let message = match verdict {
        Verdict::Single => "1 file hashed".to_owned(),
        Verdict::Equal => format!("{count} files, all digests equal"),
    };
    println!("{} {}", style("✓").green(), style(message).bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(116), "116 B");
    }
}
