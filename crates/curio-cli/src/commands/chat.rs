use std::io::Write;

use clap::Parser;
use curio::config::ClientConfig;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::client::ChatClient;
use crate::error::CliResult;
use crate::output::{banner, render_message, render_report};
use crate::session::ChatSession;

#[derive(Parser)]
pub struct ChatCommand {}

impl ChatCommand {
    pub async fn execute(&self, config: &ClientConfig) -> CliResult<()> {
        let client = ChatClient::new(config)?;
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();

        println!("{}", banner());

        run_session(&client, stdin, &mut stdout).await?;
        Ok(())
    }
}

/// Drive a session from `input` until EOF or `/quit`
///
/// Each line is one submission. Bubbles are written to `out` as they are
/// appended; the rescue report is reprinted whenever a turn stores a new one.
pub async fn run_session<R, W>(client: &ChatClient, input: R, out: &mut W) -> CliResult<ChatSession>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = ChatSession::new();
    for message in session.messages() {
        writeln!(out, "{}", render_message(message))?;
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }

        let Some((pending, turn)) = session.submit(&line) else {
            continue;
        };
        if let Some(sent) = pending.messages().last() {
            writeln!(out, "{}", render_message(sent))?;
        }
        writeln!(out, "Thinking...")?;
        out.flush()?;

        let outcome = client.process_message(&turn.message, &turn.history).await;
        let resolved = pending.resolve(outcome);

        if let Some(reply) = resolved.messages().last() {
            writeln!(out, "{}", render_message(reply))?;
        }
        if resolved.rescue_data() != session.rescue_data() {
            if let Some(record) = resolved.rescue_data() {
                writeln!(out, "\n{}\n", render_report(record))?;
            }
        }

        session = resolved;
    }

    Ok(session)
}
