use clap::Parser;

use glass::{Config, Driver};

/// Logs go to stderr, and only when `RUST_LOG` is set, e.g. `RUST_LOG=glass=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();

    let config = Config::parse();
    let mut driver = Driver::new(config);

    if let Err(err) = driver.run() {
        eprintln!("{}", err.render());

        for line in err.diagnostics() {
            eprintln!("{line}");
        }

        std::process::exit(1);
    }
}
