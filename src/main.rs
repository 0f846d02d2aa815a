// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap and load the config file
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = nothing found, 2 = error)
// =============================================================================

mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - optional settings file
mod generate;  // src/generate/ - talking to the language model
mod github;    // src/github/ - GitHub-specific functionality
mod preview;   // src/preview.rs - sandboxed preview of generated code
mod session;   // src/session/ - the interactive review session

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands, ModelArgs};
use config::Config;
use generate::{ChatClient, ChatSettings, UiGenerator};
use github::{Extraction, GitHubClient, RepoInfo, WalkStage};
use session::{ReviewContext, Session};

#[tokio::main]
async fn main() {
    // Logs go to stderr so --json output on stdout stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ui_forge=info")))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = success
//   Ok(1) = nothing found (no matching files, failed lookup)
//   Err   = anything else, reported as exit code 2
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Files { repo_url, json } => handle_files(&config, &repo_url, json).await,
        Commands::Info { repo_url, json } => handle_info(&config, &repo_url, json).await,
        Commands::Generate {
            repo_url,
            model,
            output_dir,
            once,
            allow_preview,
        } => {
            let mut config = config;
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if allow_preview {
                config.preview.enabled = true;
            }
            handle_generate(&config, &repo_url, &model, once).await
        }
        Commands::Chat { model } => handle_chat(&config, &model).await,
    }
}

fn github_client(config: &Config) -> Result<GitHubClient> {
    GitHubClient::new(&config.github_api_url, config.github_token.as_deref())
        .context("Failed to create GitHub client")
}

fn ui_generator(config: &Config, args: &ModelArgs) -> Result<UiGenerator> {
    let client = ChatClient::new(ChatSettings {
        base_url: config.openai_api_url.clone(),
        api_key: args.api_key.clone(),
        model: args.model.clone().unwrap_or_else(|| config.model.clone()),
        temperature: config.temperature,
        timeout: config.request_timeout(),
    })
    .context("Failed to create model client")?;

    Ok(UiGenerator::new(client))
}

// Walks the repository and reports what it found.
// Ok(None) means the walk worked but found no frontend files.
async fn extract(client: &GitHubClient, repo_url: &str) -> Result<Option<Extraction>> {
    println!("🔍 Scanning GitHub repository: {}", repo_url);

    let extraction = github::extract_frontend_files(client, repo_url)
        .await
        .with_context(|| format!("Error extracting repository {}", repo_url))?;

    match &extraction {
        Some(extraction) => {
            println!("📄 Found {} frontend file(s)", extraction.files.len());
            print_failures(extraction);
        }
        None => println!("⚠️  No frontend files found in the repository"),
    }

    Ok(extraction)
}

// Handles the 'files' subcommand
//
// Walks without collapsing an empty result to None, so the skipped
// directories and files are still reported when nothing matched.
async fn handle_files(config: &Config, repo_url: &str, json: bool) -> Result<i32> {
    let client = github_client(config)?;
    let repo = github::parse_repo_url(repo_url)?;

    if !json {
        println!("🔍 Scanning GitHub repository: {}", repo);
    }
    let extraction = github::walk_repository(&client, &repo)
        .await
        .with_context(|| format!("Error extracting repository {}", repo_url))?;
    let found = !extraction.files.is_empty();

    if json {
        // Keep stdout pure JSON: no progress lines
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(if found { 0 } else { 1 });
    }

    if !found {
        println!("⚠️  No frontend files found in the repository");
        print_failures(&extraction);
        return Ok(1);
    }

    println!("📄 Found {} frontend file(s)", extraction.files.len());
    print_failures(&extraction);

    println!();
    println!("{:<60} {:<10} {:>10}", "PATH", "TYPE", "BYTES");
    println!("{}", "=".repeat(82));
    for file in &extraction.files {
        println!(
            "{:<60} {:<10} {:>10}",
            truncate(&file.path, 57),
            file.extension,
            file.content.len()
        );
    }

    Ok(0)
}

// Handles the 'info' subcommand
async fn handle_info(config: &Config, repo_url: &str, json: bool) -> Result<i32> {
    let client = github_client(config)?;

    // get_repo_info has already logged why it failed
    let Some(info) = client.get_repo_info(repo_url).await else {
        return Ok(1);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_repo_info(&info);
    }
    Ok(0)
}

// Handles the 'generate' subcommand
async fn handle_generate(config: &Config, repo_url: &str, args: &ModelArgs, once: bool) -> Result<i32> {
    let client = github_client(config)?;
    let generator = ui_generator(config, args)?;

    // A bad URL stops here, before either lookup can report it
    let repo = github::parse_repo_url(repo_url)?;

    match client.fetch_repo_info(&repo).await {
        Ok(info) => print_repo_info(&info),
        Err(e) => tracing::error!("Error getting repository information: {}", e),
    }

    let Some(extraction) = extract(&client, repo_url).await? else {
        eprintln!("❌ No suitable files found in the repository.");
        return Ok(1);
    };

    println!("\n🎨 Generating UI with {}...", generator.model());
    let code = generator
        .generate_ui(&extraction.files)
        .await
        .context("Failed to generate UI")?;

    let mut session = Session::new();
    session.start(code);
    println!("✅ Initial UI generated! (version {})", session.version());

    if once {
        let path = session.save(&config.output_dir)?;
        println!("💾 Saved {}", path.display());
        return Ok(0);
    }

    println!("Review it with /show, type feedback to improve it, /help for commands.\n");

    let ctx = ReviewContext {
        generator: &generator,
        files: &extraction.files,
        preview: &config.preview,
        output_dir: &config.output_dir,
    };
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    session::run_review(&ctx, &mut session, stdin, &mut stdout).await?;

    Ok(0)
}

// Handles the 'chat' subcommand
async fn handle_chat(config: &Config, args: &ModelArgs) -> Result<i32> {
    let generator = ui_generator(config, args)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("💬 Chatting with {} ('exit' to quit)", generator.model());
    loop {
        print!("You: ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            println!("Chatbot: Goodbye!");
            break;
        }

        match generator.chat(line).await {
            Ok(reply) => println!("Chatbot: {}", reply),
            Err(e) => eprintln!("❌ {}", e),
        }
    }

    Ok(0)
}

fn print_failures(extraction: &Extraction) {
    if extraction.failures.is_empty() {
        return;
    }

    println!("⚠️  Skipped {} item(s):", extraction.failures.len());
    for failure in &extraction.failures {
        let what = match failure.stage {
            WalkStage::Listing => "directory",
            WalkStage::Content => "file",
        };
        println!("   {} {}: {}", what, display_path(&failure.path), failure.message);
    }
}

fn print_repo_info(info: &RepoInfo) {
    println!("📦 {}", info.name);
    if !info.description.is_empty() {
        println!("   {}", info.description);
    }
    if !info.language.is_empty() {
        println!("   Language: {}", info.language);
    }
    println!("   ⭐ {}  🍴 {}", info.stars, info.forks);
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

// Truncate long paths for the table, on a char boundary
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
