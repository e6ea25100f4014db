use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use env_logger::Env;

pub const DEFAULT_PORT: u16 = 7777;

/// Connection settings shared by the server and the client.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about)]
pub struct Config {
    /// Address to listen on (server) or connect to (client).
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub address: IpAddr,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Install the stderr logger. Verbosity comes from `RUST_LOG` and defaults
/// to `info`.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{style}[{}] [{:5}]{style:#} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args(),
                style = buf.default_level_style(record.level()),
            )
        })
        .init();
}
