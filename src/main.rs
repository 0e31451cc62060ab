use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use gnn_recommender_client::{
    services::{HttpRecommender, Orchestrator},
    state::Store,
    ui::{parse_command, render_input, render_state, Command, Controller, Dispatch, HELP},
    Config,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.recommender_log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let api = HttpRecommender::from_config(&config).context("Failed to build backend client")?;
    tracing::info!(api_url = %api.api_url(), "Recommender client starting");

    let store = Store::new();
    let orchestrator = Orchestrator::new(Arc::new(api), store.clone());
    let mut controller = Controller::new(orchestrator);

    // Renderer: redraw the results on every state change
    let mut updates = store.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            println!("{}", render_state(&state));
        }
    });

    println!("GNN Recommender System");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Show => {
                print!("{}", render_input(controller.input()));
                println!("{}", render_state(&store.snapshot()));
            }
            Command::Action(action) => match controller.dispatch(action) {
                Dispatch::Disabled(reason) => println!("Not available: {}", reason),
                Dispatch::Dismissed(false) => println!("No error to dismiss"),
                Dispatch::Edited | Dispatch::Dismissed(true) | Dispatch::Started(_) => {}
            },
        }
    }

    renderer.abort();
    Ok(())
}
