// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - files:    list the frontend files a repository walk would collect
// - info:     show basic repository information
// - generate: generate a Streamlit UI and review it interactively
// - chat:     a plain chatbot on the same model settings
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ui-forge",
    version,
    about = "Generate a Streamlit UI from a GitHub repository's frontend files",
    long_about = "ui-forge walks a GitHub repository, collects its frontend source files \
                  (.html, .css, .js, .jsx, .tsx, .vue, .py) and asks a language model to build a \
                  Streamlit UI for it. The result can then be refined with free-text feedback."
)]
pub struct Cli {
    /// Path to a config file (default: <config dir>/ui-forge/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the frontend files of a GitHub repository
    ///
    /// Example: ui-forge files https://github.com/user/repo
    Files {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show name, description, language, stars and forks of a repository
    Info {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate a Streamlit UI for a repository and refine it with feedback
    ///
    /// Example: ui-forge generate https://github.com/user/repo --output-dir ui
    Generate {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        #[command(flatten)]
        model: ModelArgs,

        /// Where /save (and --once) write generated_ui_vN.py
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Save the first version and exit instead of starting a review session
        #[arg(long)]
        once: bool,

        /// Allow /preview to run generated code in a sandboxed child process
        #[arg(long)]
        allow_preview: bool,
    },

    /// Chat with the model ('exit' to quit)
    Chat {
        #[command(flatten)]
        model: ModelArgs,
    },
}

/// Model settings shared by `generate` and `chat`
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Model name (overrides the config file)
    #[arg(long)]
    pub model: Option<String>,
}
