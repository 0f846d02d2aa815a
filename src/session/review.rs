// src/session/review.rs
// =============================================================================
// The interactive review loop: show the generated code, take feedback,
// ask the model for a revision, repeat.
//
// The loop owns nothing global. Everything it needs arrives through
// ReviewContext, and the Session it updates is borrowed from the caller.
// Model and preview failures are reported and the loop carries on.
// =============================================================================

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::input::{help, parse_input, Input};
use super::state::Session;
use crate::generate::UiGenerator;
use crate::github::MatchedFile;
use crate::preview::{run_preview, PreviewConfig};

/// What the review loop works with, borrowed for its whole run.
pub struct ReviewContext<'a> {
    pub generator: &'a UiGenerator,
    pub files: &'a [MatchedFile],
    pub preview: &'a PreviewConfig,
    pub output_dir: &'a Path,
}

// Reads lines from `input` until /quit or end of input
pub async fn run_review<R, W>(
    ctx: &ReviewContext<'_>,
    session: &mut Session,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "v{}> ", session.version())?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(command) => handle(ctx, session, command, out).await?,
            Err(message) => writeln!(out, "⚠️  {}", message)?,
        }
    }

    Ok(())
}

async fn handle<W: Write>(
    ctx: &ReviewContext<'_>,
    session: &mut Session,
    input: Input,
    out: &mut W,
) -> Result<()> {
    match input {
        Input::Empty | Input::Quit => {}
        Input::Help => writeln!(out, "{}", help())?,
        Input::Show => show_code(session, out)?,
        Input::History => show_history(session, out)?,
        Input::Save(dir) => {
            let dir = dir.as_deref().unwrap_or(ctx.output_dir);
            match session.save(dir) {
                Ok(path) => writeln!(out, "💾 Saved {}", path.display())?,
                Err(e) => writeln!(out, "❌ {}", e)?,
            }
        }
        Input::Preview => preview(ctx, session, out).await?,
        Input::Reset => {
            session.reset();
            writeln!(out, "🔄 Starting over, regenerating from {} file(s)...", ctx.files.len())?;
            match ctx.generator.generate_ui(ctx.files).await {
                Ok(code) => {
                    session.start(code);
                    writeln!(out, "✅ Generated version {}", session.version())?;
                }
                Err(e) => writeln!(out, "❌ Generation failed: {} (try /reset again)", e)?,
            }
        }
        Input::Feedback {
            categories,
            details,
        } => {
            let entry = match session.prepare_feedback(categories, &details) {
                Ok(entry) => entry,
                Err(e) => {
                    writeln!(out, "⚠️  {}", e)?;
                    return Ok(());
                }
            };
            let Some(code) = session.code() else {
                return Ok(());
            };

            writeln!(out, "🛠️  Improving code based on feedback...")?;
            let result = ctx.generator.improve_code(code, &entry.details).await;
            match result {
                Ok(improved) => {
                    session.apply_revision(entry, improved);
                    writeln!(
                        out,
                        "✅ Code improved! Now at version {} (/show to review)",
                        session.version()
                    )?;
                }
                Err(e) => writeln!(out, "❌ Improvement failed: {}", e)?,
            }
        }
    }

    Ok(())
}

fn show_code<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    match session.code() {
        Some(code) => {
            writeln!(out, "── Generated UI Code (Version {}) ──", session.version())?;
            writeln!(out, "{}", code)?;
        }
        None => writeln!(out, "⚠️  No code yet")?,
    }
    Ok(())
}

fn show_history<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    if session.history().is_empty() {
        writeln!(out, "No feedback given yet")?;
        return Ok(());
    }

    for (i, entry) in session.history().iter().enumerate() {
        let categories: Vec<String> = entry.categories.iter().map(|c| c.to_string()).collect();
        if categories.is_empty() {
            writeln!(out, "Version {} (on v{}): {}", i + 1, entry.version, entry.details)?;
        } else {
            writeln!(
                out,
                "Version {} (on v{}) [{}]: {}",
                i + 1,
                entry.version,
                categories.join(", "),
                entry.details
            )?;
        }
    }
    Ok(())
}

async fn preview<W: Write>(ctx: &ReviewContext<'_>, session: &Session, out: &mut W) -> Result<()> {
    let Some(code) = session.code() else {
        writeln!(out, "⚠️  No code yet")?;
        return Ok(());
    };

    match run_preview(ctx.preview, code).await {
        Ok(outcome) => {
            let status = if outcome.succeeded() { "✅" } else { "❌" };
            writeln!(out, "{} Preview exited with {:?}", status, outcome.exit_code)?;
            if !outcome.stdout.is_empty() {
                writeln!(out, "{}", outcome.stdout.trim_end())?;
            }
            if !outcome.stderr.is_empty() {
                writeln!(out, "{}", outcome.stderr.trim_end())?;
            }
        }
        Err(e) => writeln!(out, "⚠️  {}", e)?,
    }
    Ok(())
}
