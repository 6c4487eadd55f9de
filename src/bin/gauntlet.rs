// Gauntlet CLI entry point.
// Usage: gauntlet run <manifest> [--jobs N] [--log FILE] [--json-report FILE]

use gauntlet::cli;

fn main() {
    env_logger::init();
    if cli::run() {
        std::process::exit(1);
    }
}
