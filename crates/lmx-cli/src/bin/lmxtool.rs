use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lmx_cli::commands::{config_ops, predict_ops, repl_ops, url_ops};

#[derive(Parser)]
#[command(
    name = "lmxtool",
    about = "Text-continuation explorer",
    version = lmx_engine::engine_version()
)]
struct Cli {
    /// Settings TOML (defaults are built in)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write JSON trace logs to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Explore continuations interactively
    Repl {
        /// Starting sentence, as if opened from a deep link
        #[arg(long)]
        text: Option<String>,
    },
    /// Request candidates for a sentence once
    Predict {
        /// Sentence prefix
        text: String,
        /// Token to append before predicting
        #[arg(long)]
        next: Option<String>,
        /// Number of candidates to request
        #[arg(long)]
        top_k: Option<u32>,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Settings file
        file: String,
    },
    /// Print the deep-link query string for a sentence
    UrlEncode {
        text: String,
        /// Token appended to the sentence
        #[arg(long)]
        next: Option<String>,
    },
    /// Print the sentence carried by a query string
    UrlDecode {
        query: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.trace_dir {
        lmx_engine::trace_init::init_tracing(dir);
    }

    match cli.command {
        Command::Repl { text } => {
            let settings = config_ops::load(cli.settings.as_deref());
            repl_ops::repl(settings, text.as_deref());
        }
        Command::Predict { text, next, top_k } => {
            let settings = config_ops::load(cli.settings.as_deref());
            predict_ops::predict(settings, &text, next.as_deref(), top_k);
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::UrlEncode { text, next } => url_ops::url_encode(&text, next.as_deref()),
        Command::UrlDecode { query } => url_ops::url_decode(&query),
    }
}
