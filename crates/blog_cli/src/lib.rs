pub mod generate;
pub mod site;

use tracing::Level;

/// Human-readable log lines on stderr, INFO and above.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
