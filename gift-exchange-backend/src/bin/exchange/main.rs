mod command;
mod error;

use gift_exchange_backend::telemetry::setup_telemetry;
use gift_exchange_backend::{
    Exchange, ExchangeError, ExchangeSettings, LogNotifier, ParticipantDirectory as _,
    StaticDirectory,
};
use gift_exchange_config::get_config;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader};
use tracing::{error, info};

use crate::command::{Command, HELP};
use crate::error::AppError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    setup_telemetry();

    program().await
}

fn respond<T: Serialize>(result: Result<T, ExchangeError>) -> Result<Value, AppError> {
    match result {
        Ok(value) => Ok(serde_json::to_value(value)?),
        Err(exchange_error) => {
            if !exchange_error.is_not_found() {
                error!(%exchange_error, "request failed");
            }
            Ok(json!({
                "error": exchange_error.to_string(),
                "notFound": exchange_error.is_not_found(),
            }))
        }
    }
}

async fn program() -> Result<(), AppError> {
    let config = get_config()?;
    let settings = ExchangeSettings::from(&config);
    let directory = StaticDirectory::new(config.participants)?;
    info!(
        participants = directory.list_all().len(),
        "loaded participants"
    );
    let exchange = Exchange::new(directory, LogNotifier, settings);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match line.parse::<Command>() {
            Ok(Command::Reveal(giver_id)) => respond(exchange.request_reveal(&giver_id))?,
            Ok(Command::Broadcast) => respond(exchange.request_broadcast().await)?,
            Ok(Command::Reset) => serde_json::to_value(exchange.request_reset())?,
            Ok(Command::Help) => json!({ "commands": HELP }),
            Ok(Command::Quit) => break,
            Err(command_error) => json!({ "error": command_error.to_string() }),
        };
        stdout.write_all(format!("{response}\n").as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
