use crate::cli::{Cli, Command};
use anyhow::{Context, bail};
use autoagents_llm::LLMProvider;
use autoagents_llm::backends::anthropic::Anthropic;
use autoagents_llm::backends::openai::OpenAI;
use autoagents_llm::builder::LLMBuilder;
use chrono::Local;
use futures_util::StreamExt;
use insight_rs_config::{Domain, InsightConfig, LayeredConfigOptions, ModelConfig, ModelProvider};
use insight_rs_core::{InsightHub, LoopSettings, build_history_store};
use insight_rs_data::{BankingLedger, ClimateHub};
use insight_rs_protocol::{AnalysisStatus, Step, StepKind};
use insight_rs_server::{AppState, Dataset};
use insight_rs_tools::{banking_tool_registry, climate_tool_registry};
use log::{debug, info};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Environment variable overriding `model.name`.
const MODEL_ENV: &str = "INSIGHT_MODEL";
const OBSERVATION_PREVIEW_CHARS: usize = 400;

/// Everything a command needs once config and provider are resolved.
#[derive(Debug)]
pub struct Runtime {
    pub config: InsightConfig,
    pub hub: InsightHub,
    pub dataset: Dataset,
}

/// Entry point shared by `main`.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    info!(
        "starting insight (config_set={}, command={})",
        cli.config.is_some(),
        match cli.command {
            Command::Serve { .. } => "serve",
            Command::Ask { .. } => "ask",
        }
    );
    let mut config = load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli.command, std::env::var(MODEL_ENV).ok())?;
    let llm = build_llm(&config.model)?;
    let runtime = build_runtime(config, llm)?;
    match cli.command {
        Command::Serve { .. } => serve(runtime).await,
        Command::Ask { query, .. } => ask(runtime, query.join(" ")).await,
    }
}

/// Load the layered config from the cwd, with `path` applied last.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<InsightConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = path {
        info!("adding runtime config layer: {}", path.display());
        options = options.with_runtime_path(path);
    }
    let layered = InsightConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    Ok(layered.config)
}

/// Apply command-line and environment overrides, then re-validate.
pub fn apply_overrides(
    config: &mut InsightConfig,
    command: &Command,
    model: Option<String>,
) -> anyhow::Result<()> {
    if let Command::Serve { host, port, .. } = command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }
    if let Some(domain) = command.domain() {
        config.agent.domain = domain;
    }
    if let Some(model) = model.filter(|name| !name.trim().is_empty()) {
        config.model.name = model;
    }
    config.validate().context("invalid configuration")?;
    Ok(())
}

/// Build the hosted model provider named in the config.
pub fn build_llm(model: &ModelConfig) -> anyhow::Result<Arc<dyn LLMProvider>> {
    let key_env = model.provider.api_key_env();
    let Ok(api_key) = std::env::var(key_env) else {
        bail!(
            "{key_env} is required for the {} provider",
            model.provider.as_str()
        );
    };
    info!(
        "building LLM provider (provider={}, model={}, max_tokens={})",
        model.provider.as_str(),
        model.name,
        model.max_tokens
    );
    let llm: Arc<dyn LLMProvider> = match model.provider {
        ModelProvider::Openai => LLMBuilder::<OpenAI>::new()
            .api_key(api_key)
            .model(model.name.clone())
            .max_tokens(model.max_tokens)
            .build()
            .context("failed to build OpenAI LLM provider")?,
        ModelProvider::Anthropic => LLMBuilder::<Anthropic>::new()
            .api_key(api_key)
            .model(model.name.clone())
            .max_tokens(model.max_tokens)
            .build()
            .context("failed to build Anthropic LLM provider")?,
    };
    Ok(llm)
}

/// Generate the domain dataset and assemble the hub around `llm`.
pub fn build_runtime(config: InsightConfig, llm: Arc<dyn LLMProvider>) -> anyhow::Result<Runtime> {
    let as_of = Local::now().date_naive();
    let seed = config.data.seed;
    let (dataset, tools) = match config.agent.domain {
        Domain::Climate => {
            let hub = Arc::new(ClimateHub::generate(seed, as_of));
            (Dataset::Climate(hub.clone()), climate_tool_registry(hub))
        }
        Domain::Banking => {
            let ledger = Arc::new(BankingLedger::generate(seed, as_of));
            (Dataset::Banking(ledger.clone()), banking_tool_registry(ledger))
        }
    };
    let history = build_history_store(&config.history).context("failed to open analysis history")?;
    let hub = InsightHub::builder(llm, tools)
        .settings(LoopSettings::from_config(&config))
        .history(history)
        .sources(dataset.sources())
        .stream_buffer(config.agent.stream_buffer)
        .build();
    info!(
        "runtime ready (domain={}, seed={}, as_of={})",
        config.agent.domain.as_str(),
        seed,
        as_of
    );
    Ok(Runtime {
        config,
        hub,
        dataset,
    })
}

async fn serve(runtime: Runtime) -> anyhow::Result<()> {
    let Runtime {
        config,
        hub,
        dataset,
    } = runtime;
    insight_rs_server::serve(AppState::new(hub, dataset), &config.server)
        .await
        .context("server failed")
}

async fn ask(runtime: Runtime, query: String) -> anyhow::Result<()> {
    let mut stream = runtime.hub.analyze_stream(query);
    while let Some(step) = stream.steps.next().await {
        println!("{}", render_step(&step));
    }
    let analysis = stream.finish().await.context("analysis did not finish")?;
    if analysis.status != AnalysisStatus::Completed {
        bail!(
            "analysis failed: {}",
            analysis.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

/// One terminal line per step.
fn render_step(step: &Step) -> String {
    let label = step.kind.label();
    match &step.kind {
        StepKind::Reasoning { content } | StepKind::Result { content } => {
            format!("[{label}] {content}")
        }
        StepKind::Action { tool_name, input } => format!("[{label}] {tool_name} {input}"),
        StepKind::Observation {
            tool_name,
            output,
            is_error,
        } => {
            let marker = if *is_error { " (error)" } else { "" };
            format!("[{label}] {tool_name}{marker}: {}", preview(output))
        }
        StepKind::Plan { plan } => format!(
            "[{label}] {} ({}/{} steps, {:?})",
            plan.goal,
            plan.current_step,
            plan.steps.len(),
            plan.status
        ),
    }
}

fn preview(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= OBSERVATION_PREVIEW_CHARS {
        return text;
    }
    let mut short: String = text.chars().take(OBSERVATION_PREVIEW_CHARS).collect();
    short.push('…');
    short
}
