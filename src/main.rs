//! rCalmlog main entrypoint.

use rcalmlog::run;
use rcalmlog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
