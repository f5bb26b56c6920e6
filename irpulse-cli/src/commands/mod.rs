//! One module per subcommand

pub mod dec;
pub mod del;
pub mod enc;
pub mod list;
pub mod rec;
pub mod send;

use colored::*;
use irpulse_core::Frame;

/// Print frames one per line
pub(crate) fn print_frames(frames: &[Frame]) {
    if frames.is_empty() {
        println!("  {}", "no frames".dimmed());
    }
    for (i, frame) in frames.iter().enumerate() {
        println!("  frame {}: {}", i, frame);
    }
}

pub(crate) fn ok(message: impl std::fmt::Display) {
    println!("{} {}", "✓".green(), message);
}

pub(crate) fn fail(message: impl std::fmt::Display) {
    println!("{} {}", "✗".red(), message);
}
