//! Process configuration from flags and environment.

use std::net::SocketAddr;

use clap::Parser;

use crate::server::DEFAULT_MAX_BODY_BYTES;

/// Runtime settings. Every flag can also come from its `NEWREST_*`
/// environment variable.
#[derive(Clone, Debug, Parser)]
#[command(name = "newrest", version, about = "Calculator and person HTTP endpoints")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "NEWREST_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Log filter used when `RUST_LOG` is not set (e.g. `info`, `newrest=debug`).
    #[arg(long, env = "NEWREST_LOG", default_value = "info")]
    pub log_level: String,

    /// Largest request body accepted, in bytes; larger ones get `413`.
    #[arg(long, env = "NEWREST_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Emit logs as JSON lines.
    #[arg(long, env = "NEWREST_JSON_LOGS")]
    pub json_logs: bool,

    /// Preload a couple of sample people.
    #[arg(long, env = "NEWREST_SEED_DEMO")]
    pub seed_demo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["newrest"]).unwrap();
        assert_eq!(cfg.bind, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(!cfg.json_logs);
        assert!(!cfg.seed_demo);
    }

    #[test]
    fn flags_override() {
        let cfg = Config::try_parse_from([
            "newrest",
            "--bind",
            "127.0.0.1:8080",
            "--log-level",
            "debug",
            "--max-body-bytes",
            "1024",
            "--json-logs",
            "--seed-demo",
        ])
        .unwrap();
        assert_eq!(cfg.bind.port(), 8080);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.max_body_bytes, 1024);
        assert!(cfg.json_logs && cfg.seed_demo);
    }

    #[test]
    fn rejects_bad_address() {
        assert!(Config::try_parse_from(["newrest", "--bind", "nowhere"]).is_err());
    }
}
