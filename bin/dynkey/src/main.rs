//! dynkey token tool.

mod cli;
mod logging;

fn main() -> eyre::Result<()> {
    cli::run()
}
