use std::path::PathBuf;

use anyhow::{Context, Result};
use chatdeck_cli::{bot, predict, studio, Theme};
use chatdeck_core::{build_responder, constants::responder::ECHO, Settings};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chatdeck")]
#[command(about = "chatdeck - iris predictor, chatbot and chat studio in the terminal")]
#[command(version)]
struct Cli {
    /// Color theme (dark, light, tokyo-night, dracula)
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict an iris species from four measurements
    Predict {
        /// Measurements as sepal_length,sepal_width,petal_length,petal_width; opens the form if omitted
        #[arg(short, long)]
        features: Option<String>,

        /// Model file (JSON linear model)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
    /// Single-chat bot
    Bot {
        /// Send one message, print the reply and exit
        #[arg(short, long)]
        prompt: Option<String>,

        /// Responder to answer with (placeholder, echo)
        #[arg(short, long)]
        responder: Option<String>,
    },
    /// Multi-chat studio with image upload and drawing canvas
    Studio {
        /// Send one message, print the reply and exit
        #[arg(short, long)]
        prompt: Option<String>,

        /// Responder to answer with (placeholder, echo)
        #[arg(short, long)]
        responder: Option<String>,

        /// Simulated response delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Settings::load(),
    };
    let theme = Theme::by_name(cli.theme.as_deref().unwrap_or(&settings.ui.theme));

    match cli.command {
        Command::Predict { features, model } => {
            let model_path = model.unwrap_or_else(|| settings.classifier.model_path.clone());
            match features {
                Some(features) => predict::run_single(&model_path, &features)?,
                None => predict::run_tui(&model_path, theme).await?,
            }
        }
        Command::Bot { prompt, responder } => {
            settings.responder.kind = responder.unwrap_or_else(|| ECHO.to_string());
            let responder = build_responder(&settings)?;
            match prompt {
                Some(prompt) => bot::run_single_prompt(&settings, responder.as_ref(), &prompt).await?,
                None => bot::run_tui(&settings, responder, theme).await?,
            }
        }
        Command::Studio {
            prompt,
            responder,
            delay_ms,
        } => {
            if let Some(kind) = responder {
                settings.responder.kind = kind;
            }
            if let Some(ms) = delay_ms {
                settings.responder.delay_ms = ms;
            }
            let responder = build_responder(&settings)?;
            match prompt {
                Some(prompt) => studio::run_single_prompt(&settings, responder.as_ref(), &prompt).await?,
                None => studio::run_tui(&settings, responder, theme).await?,
            }
        }
        Command::Config { init } => {
            if init {
                settings.save_to(&config_path)?;
                println!("Wrote {}", config_path.display());
            } else {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&settings)?);
            }
        }
    }

    Ok(())
}
