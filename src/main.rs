use anyhow::{Context, Result};
use debtcleaner::cli::{self, Commands, ToolArg};
use debtcleaner::core::ToolKind;
use debtcleaner::observability::init_tracing;
use debtcleaner::{AnalysisRequest, AnalysisService, ProcessRunner, Settings};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = cli::parse_args();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    init_tracing(settings.debug);

    match cli.command {
        Commands::Serve { host, port } => handle_serve(settings, host, port),
        Commands::Analyze {
            path,
            tools,
            bandit_config,
            no_debug,
            pretty,
            output,
        } => handle_analyze(settings, path, tools, bandit_config, no_debug, pretty, output),
        Commands::Versions => handle_versions(settings),
    }
}

fn build_service(settings: Settings) -> AnalysisService {
    AnalysisService::new(settings, Arc::new(ProcessRunner::new()))
}

fn handle_serve(mut settings: Settings, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }
    let address = settings.server.bind_address();
    tracing::info!(name = %settings.project_name, version = %settings.version, "starting service");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(debtcleaner::server::serve(build_service(settings), &address))
        .with_context(|| format!("Server on {address} failed"))
}

fn handle_analyze(
    settings: Settings,
    path: PathBuf,
    tools: Vec<ToolArg>,
    bandit_config: Option<PathBuf>,
    no_debug: bool,
    pretty: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut request = AnalysisRequest::new(path)
        .with_tools(tools.into_iter().map(|tool| ToolKind::from(tool).name()));
    request.config_file = bandit_config;
    if no_debug {
        request.debug = Some(false);
    }

    let response = build_service(settings)
        .analyze(&request)
        .context("Analysis failed")?;
    debtcleaner::output::output_json(&response, pretty, output)
}

fn handle_versions(settings: Settings) -> Result<()> {
    let versions = build_service(settings).versions();
    println!("{}", serde_json::to_string_pretty(&versions)?);
    Ok(())
}
