//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

/// Longest accepted photo expiry window, in days
pub const MAX_EXPIRY_DAYS: u64 = 36_500;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pixflow")]
#[command(about = "Serves event photo expiry countdowns for the PixFlow site")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Days event photos stay available after a detail page is opened
    #[arg(short, long, default_value = "15", value_parser = clap::value_parser!(u64).range(1..=MAX_EXPIRY_DAYS))]
    pub expiry_days: u64,

    /// Countdown re-sampling interval in milliseconds
    #[arg(short, long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["pixflow"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.expiry_days, 15);
        assert_eq!(config.tick(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn overrides_and_rejects_zero_tick() {
        let config = Config::try_parse_from(["pixflow", "-p", "8080", "-e", "3", "-t", "250", "-v"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.expiry_days, 3);
        assert_eq!(config.tick(), Duration::from_millis(250));
        assert_eq!(config.log_level(), "debug");

        assert!(Config::try_parse_from(["pixflow", "--tick-ms", "0"]).is_err());
    }

    #[test]
    fn rejects_out_of_range_expiry() {
        assert!(Config::try_parse_from(["pixflow", "--expiry-days", "200000000000"]).is_err());
        assert!(Config::try_parse_from(["pixflow", "--expiry-days", "0"]).is_err());

        let max = MAX_EXPIRY_DAYS.to_string();
        let config = Config::try_parse_from(["pixflow", "--expiry-days", max.as_str()]).unwrap();
        assert_eq!(config.expiry_days, MAX_EXPIRY_DAYS);
    }
}
