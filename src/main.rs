use frest::cli::{parse_args, run_cli_command, USAGE};
use frest::config::SessionConfig;
use frest::logging::init_logging;

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config = SessionConfig::from_env();
    tracing::debug!(
        api = %config.api_base_url,
        storage = %config.storage_path.display(),
        "Loaded configuration"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let output = runtime.block_on(run_cli_command(command, &config))?;
    println!("{}", output);
    Ok(())
}
