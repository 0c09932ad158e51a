use anyhow::{Context, Result};
use clap::Parser;
use hacker_agent_app::bootstrap::{profile_table, select_profile};
use hacker_agent_app::cli::{Cli, Command, ConfigAction};
use hacker_agent_app::config::{DataPaths, Settings, DATA_DIR_ENV};
use hacker_agent_app::repl::{Repl, SESSION_ENDED};
use hacker_agent_core::{LoopMetrics, RetryLoop};
use hacker_agent_executor::{AgentExecutor, OsType, PackageInstaller, ShellExecutor};
use hacker_agent_interfaces::render::panel;
use hacker_agent_interfaces::{Interface, TerminalInterface};
use hacker_agent_memory::{InstalledToolRegistry, JsonFileStore, LlmProfile, ProfileStore};
use hacker_agent_providers::{LlmCommandGenerator, LlmSummarizer, OpenAICompatibleProvider};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "warn,hacker_agent_app=debug,hacker_agent_core=debug,\
hacker_agent_memory=debug,hacker_agent_executor=debug,hacker_agent_tools=debug,\
hacker_agent_providers=debug,hacker_agent_interfaces=debug";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let paths = DataPaths::resolve(cli.data_dir.clone(), std::env::var(DATA_DIR_ENV).ok());
    let mut settings = Settings::load(&paths.settings())?.apply_env(|key| std::env::var(key).ok())?;
    if let Some(max_retries) = cli.max_retries {
        settings.max_retries = max_retries;
    }
    if let Err(e) = settings.validate() {
        eprintln!("💡 Tip: check {}", paths.settings().display());
        return Err(e.context("Invalid settings"));
    }

    match cli.command {
        Some(Command::Config { action: ConfigAction::Reset }) => config_reset(&paths).await,
        Some(Command::Config { action: ConfigAction::Show }) => config_show(&paths, &settings).await,
        Some(Command::Config { action: ConfigAction::Init }) => config_init(&paths, &settings),
        Some(Command::Run { request }) => {
            let request = request.join(" ");
            let repl = start(&paths, &settings, cli.profile.as_deref()).await?;
            let outcome = repl.run_once(&request).await;
            if outcome.is_none() {
                println!("{}", SESSION_ENDED);
            }
            Ok(match outcome {
                Some(outcome) if outcome.is_executed() => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        None => {
            println!("{}", panel("", "Welcome to the AI Hacker Agent! 🤖"));
            let repl = start(&paths, &settings, cli.profile.as_deref()).await?;
            repl.run().await;
            println!("{}", SESSION_ENDED);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Wires the stores, host executor, LLM collaborators and tool catalog.
async fn start(
    paths: &DataPaths,
    settings: &Settings,
    requested_profile: Option<&str>,
) -> Result<Repl<TerminalInterface>> {
    let os = OsType::detect()?;
    let manager = os.package_manager();
    let interface = Arc::new(TerminalInterface::new());

    let profiles = ProfileStore::open_file(paths.profiles())
        .await
        .context("Failed to load LLM profiles")?;
    let profile = select_profile(&profiles, requested_profile, interface.as_ref()).await?;
    interface
        .send_output(&format!(
            "Using LLM: {} ({})\n",
            profile.name, profile.model_name
        ))
        .await;

    let registry = Arc::new(
        InstalledToolRegistry::open_file(paths.installed_tools())
            .await
            .context("Failed to load installed tools")?,
    );
    let shell = Arc::new(ShellExecutor::new(settings.shell.clone()));
    let installer = Arc::new(PackageInstaller::new(manager, shell.clone(), registry));
    let executor = Arc::new(AgentExecutor::new(shell.clone(), installer.clone()));

    let provider = Arc::new(OpenAICompatibleProvider::with_timeout(
        profile.base_url().to_string(),
        profile.api_key.clone(),
        profile.model_name.clone(),
        settings.request_timeout(),
    ));
    let generator = Arc::new(
        LlmCommandGenerator::new(provider.clone(), os.host_profile())
            .with_params(settings.generation),
    );
    let summarizer = Arc::new(LlmSummarizer::new(provider).with_params(settings.summary));

    let retry_loop = RetryLoop::new(generator, executor, summarizer)
        .with_max_retries(settings.max_retries)
        .with_metrics(LoopMetrics::new());

    interface
        .show_status("Starting tool discovery on host system...")
        .await;
    let catalog = hacker_agent_tools::discover(shell.as_ref(), manager).await;
    interface
        .show_status(&format!("Discovery complete. Found {} tools.", catalog.len()))
        .await;

    Ok(Repl::new(interface, retry_loop, installer, catalog))
}

async fn config_reset(paths: &DataPaths) -> Result<ExitCode> {
    println!("Resetting configuration...");
    let existed = JsonFileStore::<Vec<LlmProfile>>::new(paths.profiles())
        .delete()
        .await
        .context("Failed to delete LLM profiles")?;
    if existed {
        println!("✅ Configuration reset. Run hacker-agent again to reconfigure.");
    } else {
        println!("ℹ️  No stored LLM profiles at {}", paths.profiles().display());
    }
    Ok(ExitCode::SUCCESS)
}

fn config_init(paths: &DataPaths, settings: &Settings) -> Result<ExitCode> {
    let path = paths.settings();
    if path.exists() {
        println!("ℹ️  {} already exists, leaving it untouched", path.display());
        return Ok(ExitCode::SUCCESS);
    }
    settings.save(&path)?;
    println!("✅ Wrote {}", path.display());
    Ok(ExitCode::SUCCESS)
}

async fn config_show(paths: &DataPaths, settings: &Settings) -> Result<ExitCode> {
    println!("📁 Data directory: {}", paths.root().display());
    println!("\n⚙️  Settings:\n{}", serde_yaml::to_string(settings)?);

    let profiles = ProfileStore::open_file(paths.profiles())
        .await
        .context("Failed to load LLM profiles")?
        .list()
        .await;
    if profiles.is_empty() {
        println!("No LLM profiles configured.");
    } else {
        println!("🔌 LLM profiles:\n{}", profile_table(&profiles));
    }
    Ok(ExitCode::SUCCESS)
}
