use clap::Parser;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("provmatch=info,reqwest=warn"),
    )
    .init();

    let cli = provmatch::cli::Cli::parse();
    log::debug!("Starting provmatch: {:?}", cli.command);

    match provmatch::run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("provmatch failed: {e}");
            eprintln!("{}", e.user_message());
            std::process::ExitCode::FAILURE
        }
    }
}
