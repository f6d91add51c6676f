use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lifeflow")]
#[command(about = "LifeFlow backend and Generative Language API tools", long_about = None)]
pub struct Args {
    #[arg(short = 'v', long = "verbose", global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        long = "api-host",
        global = true,
        help = "Override the API host (default: generativelanguage.googleapis.com)"
    )]
    pub api_host: Option<String>,

    #[arg(
        long = "timeout",
        global = true,
        help = "Request timeout in seconds (default: none)"
    )]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available models and write them to a file
    Models {
        #[arg(short = 'o', long = "output", help = "File to write the model list to")]
        output: Option<String>,
    },

    /// Send a single prompt and print the generated text
    Generate {
        #[arg(short = 'm', long = "model", help = "Model to use (e.g. gemini-2.0-flash)")]
        model: Option<String>,

        #[arg(help = "Prompt to send")]
        prompt: Vec<String>,
    },

    /// Run the HTTP liveness server
    Serve {
        #[arg(short = 'p', long = "port", help = "Port to listen on (default: 3000)")]
        port: Option<u16>,
    },
}
