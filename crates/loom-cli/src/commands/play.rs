use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use colored::Colorize;

use loom_engine::{GameSession, TurnOutcome};
use loom_llm::{Endpoints, HttpClient, LlmClient, ScriptedClient};

pub fn run(
    module: &Path,
    replay: Option<&Path>,
    timeout: u64,
    max_attempts: u32,
) -> Result<(), String> {
    let content = super::load_module(module)?;

    let client: Box<dyn LlmClient> = match replay {
        Some(path) => Box::new(
            ScriptedClient::from_json_file(path)
                .map_err(|e| format!("failed to load replay file: {e}"))?,
        ),
        None => Box::new(
            HttpClient::new(Endpoints::from_env(), Duration::from_secs(timeout))
                .map_err(|e| e.to_string())?,
        ),
    };

    let mut session = GameSession::new(&content, client.as_ref())
        .map_err(|e| format!("failed to start game: {e}"))?
        .with_max_attempts(max_attempts);

    println!("  {} Loom", "Starting".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        let intro = session.begin_turn().map_err(|e| e.to_string())?;
        if let Some(feedback) = intro.feedback {
            println!("{}\n", feedback.cyan());
        }
        if let Some(scene) = intro.scene {
            println!("{scene}\n");
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        println!();

        match session.process(line.trim()) {
            Ok(TurnOutcome::Quit) => {
                println!("Goodbye!");
                break;
            }
            Ok(TurnOutcome::Continue { output }) => {
                if let Some(output) = output {
                    println!("{output}\n");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "turn failed");
                println!("{}\n", e.player_message().yellow());
            }
        }
    }

    Ok(())
}
