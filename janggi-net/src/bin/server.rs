use clap::Parser;
use tokio::io::BufReader;
use tokio::net::TcpListener;

use janggi_core::Game;
use janggi_net::{init_logging, Config, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging();

    let listener = TcpListener::bind(config.socket_addr()).await?;
    log::info!("listening on {}", listener.local_addr()?);

    let (stream, peer) = listener.accept().await?;
    log::info!("connected by {peer}");

    let mut session = Session::host(stream, Game::new()).await?;
    println!("You play {}. Enter moves as `A7 A6`, `/q` to quit.", session.color());

    let end = session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    println!("{end}");
    Ok(())
}
