//! Loan Advisor Entry Point
//!
//! Thin interactive shell around the response policy: loads settings,
//! injects the optional remote backend, then processes one query at a
//! time to completion.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use loan_advisor_agent::{messages, Assistant};
use loan_advisor_config::{load_settings, Settings};
use loan_advisor_llm::{LlmBackend, LlmConfig, OpenAIBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("loan_advisor=info")),
        )
        .init();

    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("LOAN_ADVISOR_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Settings::default()
        }
    };

    // Assumption bounds are enforced once, here; the estimator relies on it.
    let assumptions = settings.assumptions()?;

    let backend = build_backend(&settings);
    let offline = settings.offline_mode || backend.is_none();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        offline_mode = settings.offline_mode,
        remote_configured = backend.is_some(),
        "loan advisor starting"
    );

    let assistant = Assistant::new(assumptions, settings.offline_mode, backend);

    println!("Loan Advisor");
    println!("Ask me anything about home loans, interest rates, or the home buying process in South Africa.");
    if offline {
        println!("(offline mode: estimates only, no remote advisor)");
    }
    println!("Commands: 'faq' for common questions, 'quit' to exit.\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();

        match query {
            "" => continue,
            "quit" | "exit" => break,
            "faq" => print_faq(),
            _ => {
                let reply = assistant.respond(query).await;
                println!("{}\n", reply.render());
            }
        }
    }

    Ok(())
}

/// Construct the remote backend if an API key is available. A keyless
/// deployment warns and continues offline instead of failing startup.
fn build_backend(settings: &Settings) -> Option<Arc<dyn LlmBackend>> {
    let api_key = match settings.llm.resolved_api_key() {
        Some(key) => key,
        None => {
            tracing::warn!("no API key found, continuing in offline mode");
            return None;
        }
    };

    let config = LlmConfig {
        endpoint: settings.llm.endpoint.clone(),
        api_key,
        model: settings.llm.model.clone(),
        max_tokens: settings.llm.max_tokens,
        temperature: settings.llm.temperature,
        timeout: settings.llm.timeout(),
    };

    match OpenAIBackend::new(config) {
        Ok(backend) => Some(Arc::new(backend) as Arc<dyn LlmBackend>),
        Err(e) => {
            tracing::warn!(error = %e, "failed to construct remote backend, continuing offline");
            None
        }
    }
}

fn print_faq() {
    println!("Common South African home-loan questions (offline):");
    for (question, answer) in messages::faq() {
        println!("- {question}: {answer}");
    }
    println!();
}
