// Replydesk demo entry point
// Reads messages from stdin, prints one JSON object per line to stdout.

use anyhow::Context;
use replydesk_core::brain::Intent;
use replydesk_core::logging::{init_tracing, LogFormat};
use replydesk_core::{AppError, ChatEngine, ChatServiceHandle, EngineConfig};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// One line of user input
#[derive(Debug, PartialEq)]
enum Command {
    Chat(String),
    Suggest(String),
    Entities(String),
    Teach { pattern: String, response: String },
    TeachIntent { intent: Intent, response: String },
    Quit,
}

fn split_pair(rest: &str, usage: &str) -> Result<(String, String), AppError> {
    let (left, right) = rest
        .split_once("=>")
        .ok_or_else(|| AppError::Validation(format!("usage: {}", usage)))?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return Err(AppError::Validation(format!("usage: {}", usage)));
    }
    Ok((left.to_string(), right.to_string()))
}

fn parse_command(line: &str) -> Result<Command, AppError> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return Ok(Command::Quit);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Command::Chat(line.to_string()));
    };

    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "suggest" => Ok(Command::Suggest(rest.to_string())),
        "entities" => Ok(Command::Entities(rest.trim().to_string())),
        "teach" => {
            let (pattern, response) = split_pair(rest, "/teach <pattern> => <response>")?;
            Ok(Command::Teach { pattern, response })
        }
        "intent" => {
            let (label, response) = split_pair(rest, "/intent <label> => <response>")?;
            Ok(Command::TeachIntent {
                intent: label.parse()?,
                response,
            })
        }
        other => Err(AppError::Validation(format!("unknown command '/{}'", other))),
    }
}

async fn execute(service: &ChatServiceHandle, command: Command) -> Result<serde_json::Value, AppError> {
    let output = match command {
        Command::Chat(text) => serde_json::to_value(service.classify(text).await?)?,
        Command::Suggest(partial) => json!({ "suggestions": service.suggest(partial).await? }),
        Command::Entities(text) => json!({ "entities": service.extract_entities(text).await? }),
        Command::Teach { pattern, response } => {
            service.add_pattern(pattern.as_str(), response).await?;
            json!({ "learned": { "pattern": pattern.to_lowercase() } })
        }
        Command::TeachIntent { intent, response } => {
            service.add_intent_response(intent, response).await?;
            json!({ "learned": { "intent": intent } })
        }
        Command::Quit => json!({ "bye": true }),
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing(LogFormat::from_env())?;

    let config = EngineConfig::from_env().context("failed to load engine configuration")?;
    let service = ChatServiceHandle::new(ChatEngine::new(config));
    info!("Starting replydesk ({} tier)", service.engine().config().tier);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let output = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(&service, command).await,
            Err(e) => Err(e),
        };
        let output = output.unwrap_or_else(|e| {
            warn!("Request failed: {}", e);
            json!({ "error": e.to_string() })
        });
        println!("{}", output);
    }

    service.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_chat() {
        assert_eq!(
            parse_command("  Hello there ").ok(),
            Some(Command::Chat("Hello there".to_string()))
        );
        assert_eq!(parse_command("EXIT").ok(), Some(Command::Quit));
    }

    #[test]
    fn test_teach_commands() {
        assert_eq!(
            parse_command("/teach opening hours => We open at 9.").ok(),
            Some(Command::Teach {
                pattern: "opening hours".to_string(),
                response: "We open at 9.".to_string(),
            })
        );
        assert_eq!(
            parse_command("/intent product => Ask about our bundles.").ok(),
            Some(Command::TeachIntent {
                intent: Intent::ProductInquiry,
                response: "Ask about our bundles.".to_string(),
            })
        );
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_command("/teach no arrow here").is_err());
        assert!(parse_command("/intent weather => sunny").is_err());
        assert!(parse_command("/dance").is_err());
    }
}
