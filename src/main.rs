use std::process::ExitCode;
use log::debug;

use deepseek_probe::{ProbeConfig, Reporter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode
{   let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("warn")
    ).init();
    match dotenv
    {   Ok(path) => debug!("Loaded environment from {}", path.display())
      , Err(e) => debug!("No .env loaded: {}", e)
    }

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock());

    let code = match ProbeConfig::from_env()
    {   Ok(config) => deepseek_probe::run(&config, &mut reporter).await
      , Err(e) => deepseek_probe::finish(Err(e), &mut reporter)
    };
    ExitCode::from(code)
}
