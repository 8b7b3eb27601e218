use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::LazyLock;

/// Process-wide configuration, merged from defaults and `CARTD_*` env vars.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_env);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server listen address. Env: `CARTD_LISTEN_ADDR`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port. Env: `CARTD_LISTEN_PORT`. Default: `8000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// SQLite database URL. Env: `CARTD_DATABASE_URL`. Default: `sqlite://cartd.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Log level used when `RUST_LOG` is unset. Env: `CARTD_LOGLEVEL`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            listen_port: default_listen_port(),
            database_url: default_database_url(),
            loglevel: default_loglevel(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("CARTD_"))
            .extract()
            .unwrap_or_else(|err| panic!("failed to load configuration: {err}"))
    }
}

fn default_listen_addr() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

fn default_listen_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "sqlite://cartd.db".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}
