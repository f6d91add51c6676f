use clap::Parser;
use colored::*;
use std::path::Path;
use std::process;
use tracing::info;

use lifeflow::api::response::extract_text;
use lifeflow::api::ModelList;
use lifeflow::cli::{Args, Command};
use lifeflow::config::Config;
use lifeflow::ui::output::{
    display_api_error, display_error, display_status, save_models_output, SaveOutcome,
};
use lifeflow::{logging, server};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            display_error(&e);
            process::exit(1);
        }
    };

    logging::init(config.verbose);

    let result = match &args.command {
        Command::Models { .. } => list_models(&config).await,
        Command::Generate { prompt, .. } => generate(&config, &prompt.join(" ")).await,
        Command::Serve { .. } => server::serve(config.port).await.map_err(Into::into),
    };

    if let Err(e) = result {
        display_error(&e);
        process::exit(1);
    }
}

async fn list_models(config: &Config) -> lifeflow::Result<()> {
    let client = config.client()?;

    println!("Fetching models...");
    let response = client.list_models().await?;

    if !response.is_success() {
        display_status(response.status_code);
        display_api_error(&response);
    }

    if let Some(Ok(list)) = response.json::<ModelList>() {
        info!(count = list.models.len(), "models listed");
    }

    let path = Path::new(&config.models_file);
    match save_models_output(&response, path)? {
        SaveOutcome::Written => {
            println!("{}", format!("Done. Written to {}", path.display()).green());
        }
        SaveOutcome::RawBody(body) => println!("{}", body),
    }

    Ok(())
}

async fn generate(config: &Config, prompt: &str) -> lifeflow::Result<()> {
    let prompt = if prompt.trim().is_empty() {
        lifeflow::config::default_prompt()
    } else {
        prompt.to_string()
    };

    let client = config.client()?;
    if config.verbose {
        eprintln!("{}", format!("[lifeflow] Using model: {}", config.model).dimmed());
    }

    let response = client.generate_content(&config.model, &prompt).await?;
    display_status(response.status_code);

    match response.as_json().and_then(extract_text) {
        Some(text) => println!("{}", text),
        None => {
            display_api_error(&response);
            println!("{}", response.body_text());
        }
    }

    Ok(())
}
