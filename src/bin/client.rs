use chat_relay::cli::ClientArgs;
use chat_relay::conversation::ConversationStore;
use chat_relay::conversation::message::{ format_time, Message };
use chat_relay::conversation::transport::HttpRelayTransport;
use clap::Parser;
use dotenv::dotenv;
use log::info;
use std::error::Error;
use std::sync::Arc;
use tokio::io::{ AsyncBufReadExt, BufReader };
use tokio::sync::mpsc;

fn render(message: &Message) -> String {
    format!(
        "[{}] {}: {}",
        format_time(&message.timestamp),
        message.role.speaker(),
        message.content
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = ClientArgs::parse();

    let transport = HttpRelayTransport::new(&args.relay_url)?;
    let store = ConversationStore::new(Arc::new(transport));
    info!("Chatting through relay at {}", args.relay_url);

    println!("Start a conversation. Type /clear to reset, /quit to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "/quit" => break,
                    "/clear" => {
                        store.clear().await;
                        println!("(conversation cleared)");
                        continue;
                    }
                    _ => {}
                }

                store.set_input(line).await;
                if !store.can_submit().await {
                    if store.is_pending().await {
                        println!("(still waiting for the previous reply)");
                    }
                    continue;
                }
                let Some(request) = store.begin_input().await else { continue };
                if let Some(user) = store.messages().await.last() {
                    println!("{}", render(user));
                }
                println!("AI is typing...");

                let store = store.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reply = store.complete_turn(request).await;
                    let _ = tx.send(reply);
                });
            }
            Some(reply) = rx.recv() => {
                println!("{}", render(&reply));
            }
        }
    }

    Ok(())
}
