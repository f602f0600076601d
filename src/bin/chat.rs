use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;
use log::info;

use dsm5_chat::chat::controller::ChatController;
use dsm5_chat::chat::input::{handle_key, KeyOutcome};
use dsm5_chat::chat::relay_client::{HttpRelayClient, PromptRelay};
use dsm5_chat::chat::tui::{self, AppEvent, EventHandler};
use dsm5_chat::chat::ui;
use dsm5_chat::config::{ChatMode, ClientConfig, Config};
use dsm5_chat::services::relay::Relay;

fn init_logging(log_file: Option<&str>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr would draw over the terminal UI
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    Ok(())
}

fn build_relay(config: &ClientConfig) -> Arc<dyn PromptRelay> {
    match config.mode {
        ChatMode::Remote => {
            let client = HttpRelayClient::new(config.relay_url.clone());
            info!("Sending prompts to {}", client.url());
            Arc::new(client)
        }
        ChatMode::Direct => {
            info!("Running the relay in-process");
            Arc::new(Relay::from_config(&Config::from_env()))
        }
    }
}

async fn run(terminal: &mut tui::Tui, relay: Arc<dyn PromptRelay>) -> Result<()> {
    let mut controller = ChatController::new();
    let mut events = EventHandler::new();

    terminal.draw(|frame| ui::render(frame, &mut controller))?;

    while let Some(event) = events.next().await {
        match event {
            AppEvent::Key(key) => match handle_key(&mut controller, key) {
                KeyOutcome::Quit => break,
                KeyOutcome::Submit(ticket) => {
                    let relay = relay.clone();
                    let tx = events.sender();
                    tokio::spawn(async move {
                        let result = relay.submit_prompt(ticket.prompt()).await;
                        let _ = tx.send(AppEvent::Reply(ticket, result));
                    });
                }
                KeyOutcome::Continue => {}
            },
            AppEvent::Reply(ticket, result) => {
                controller.resolve(&ticket, result);
            }
            AppEvent::Tick => controller.tick(),
            AppEvent::Resize(_, _) => {}
        }

        terminal.draw(|frame| ui::render(frame, &mut controller))?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = ClientConfig::from_env();
    init_logging(config.log_file.as_deref())?;

    let relay = build_relay(&config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, relay).await;
    tui::restore()?;
    result
}
