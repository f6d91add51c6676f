use colored::*;
use std::env;

use lifeflow::api::{GenerateContentRequest, RequestDescriptor};
use lifeflow::config::{default_prompt, Config};

/// Sends one generateContent request and prints the status and the body
/// exactly as received, without any decoding.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let prompt = if args.is_empty() {
        default_prompt()
    } else {
        args.join(" ")
    };

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    });
    let client = config.client().unwrap_or_else(|e| {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    });

    let body = GenerateContentRequest::from_prompt(prompt);
    println!("{}", "Request payload:".bold());
    println!("{}", serde_json::to_string_pretty(&body)?);
    println!("{}", "-".repeat(80).dimmed());

    let path = format!(
        "/{}/models/{}:generateContent",
        client.api_version(),
        config.model
    );
    let descriptor = RequestDescriptor::post_json(path, &body)?;

    match client.send_raw(descriptor).await {
        Ok(response) => {
            println!("Status: {}", response.status_code());
            println!("Body: {}", String::from_utf8_lossy(response.body()));
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
