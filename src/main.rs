//! Chatline - interactive terminal conversation
//!
//! Asks one sample question, then runs a conversation loop on stdin until
//! the user types `exit`.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info};

use chatline::{ChatSession, Config, Transcript};

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatline=info".into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Chatline");

    // Missing credentials are fatal here, never per call
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    let session = ChatSession::from_config(&config)?;

    // All console output goes through these two handles so prompts and
    // replies come out in order.
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();

    say(&mut stdout, "=== Simple Question-Answer Example ===\n").await?;
    let question = "What is the capital of France?";
    say(&mut stdout, &format!("Question: {}\n", question)).await?;
    match session.ask_question(question).await {
        Ok(answer) => say(&mut stdout, &format!("Answer: {}\n\n", answer)).await?,
        Err(e) => {
            error!(error = %e, "Simple question failed");
            say(&mut stderr, &format!("{}\n\n", e.render())).await?;
        }
    }

    run_conversation(&session, &mut stdout, &mut stderr).await?;

    info!("Chatline finished");
    Ok(())
}

/// Write and flush
async fn say<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}

/// Interactive loop over stdin
async fn run_conversation<O, E>(session: &ChatSession, stdout: &mut O, stderr: &mut E) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let mut transcript = Transcript::with_system_prompt(SYSTEM_PROMPT);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    say(stdout, "=== Interactive Conversation ===\n").await?;
    say(stdout, "Type your messages ('/reset' to start over, 'exit' to quit):\n").await?;

    loop {
        say(stdout, "\nYou: ").await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("exit") {
            info!("User exited conversation");
            break;
        }
        if input.is_empty() {
            continue;
        }
        if input == "/reset" {
            transcript.reset();
            transcript.set_system_turn(SYSTEM_PROMPT);
            say(stdout, "Conversation cleared.\n").await?;
            continue;
        }

        match session.chat(&mut transcript, input).await {
            Ok(reply) => say(stdout, &format!("Assistant: {}\n", reply)).await?,
            Err(e) => {
                error!(error = %e, "Conversation turn failed");
                say(stderr, &format!("{}\n", e.render())).await?;
            }
        }
    }

    Ok(())
}
