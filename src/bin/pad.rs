//! Terminal controller for the Tank Duo screen server
//!
//! Usage: `pad [ws://host:port/controller]`, then type commands:
//! `+l`/`-l` press/release left, `+r`/`-r` press/release right,
//! `both` taps both buttons, `quit` leaves.

use anyhow::Context;
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tank_duo::controller::{Pad, PadCommand, RoleLabel};
use tank_duo::ws::protocol::ServerMsg;

const DEFAULT_URL: &str = "ws://127.0.0.1:8080/controller";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.to_string());
    let (socket, _) = connect_async(url.as_str())
        .await
        .with_context(|| format!("Failed to connect to {}", url))?;
    info!(%url, "Connected to screen");

    let (mut ws_sink, mut ws_stream) = socket.split();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pad = Pad::new();
    let mut label = RoleLabel::default();

    println!("{}", label.text());

    loop {
        tokio::select! {
            incoming = ws_stream.next() => {
                let Some(frame) = incoming else { break };
                match frame.context("WebSocket error")? {
                    Message::Text(text) => match serde_json::from_str::<ServerMsg>(&text) {
                        Ok(ServerMsg::Welcome { device_id, orientation }) => {
                            info!(%device_id, ?orientation, "Welcome");
                        }
                        Ok(msg) => {
                            if label.apply(&msg) {
                                println!("{}", label.text());
                            }
                        }
                        Err(e) => debug!(error = %e, "Ignoring unknown server message"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(command) = PadCommand::parse(&line) else {
                    warn!(input = %line, "Unknown command (use +l -l +r -r both quit)");
                    continue;
                };
                if command == PadCommand::Quit {
                    break;
                }
                for (button, down) in command.transitions() {
                    if let Some(msg) = pad.set(button, down) {
                        let json = serde_json::to_string(&msg)?;
                        ws_sink.send(Message::Text(json)).await?;
                    }
                }
            }
        }
    }

    let _ = ws_sink.send(Message::Close(None)).await;
    info!("Controller closed");
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
