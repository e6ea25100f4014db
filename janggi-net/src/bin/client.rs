use clap::Parser;
use tokio::io::BufReader;
use tokio::net::TcpStream;

use janggi_net::{init_logging, Config, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging();

    let address = config.socket_addr();
    let stream = TcpStream::connect(address).await?;
    log::info!("connected to {address}");

    let mut session = Session::join(stream).await?;
    println!("You play {}. Enter moves as `A7 A6`, `/q` to quit.", session.color());

    let end = session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    println!("{end}");
    Ok(())
}
