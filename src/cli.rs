use clap::Parser;
use std::path::PathBuf;

use crate::config::StatuserConfig;

#[derive(Parser, Debug)]
#[command(name = "statuser")]
#[command(author = "Statuser Team")]
#[command(version = "0.1.0")]
#[command(about = "Print host, monit and consul status as a two-column report", long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and <STATUSER_ENV>.toml
    #[arg(short, long, default_value = "config", env = "STATUSER_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Print without ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Colors are on unless disabled by flag, config or `NO_COLOR`
    pub fn color_enabled(&self, config: &StatuserConfig) -> bool {
        !self.no_color && config.display.color && std::env::var_os("NO_COLOR").is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["statuser"]).unwrap();
        assert!(!cli.no_color);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["statuser", "--config-dir", "/etc/statuser", "--no-color"])
            .unwrap();
        assert_eq!(cli.config_dir, PathBuf::from("/etc/statuser"));
        assert!(!cli.color_enabled(&StatuserConfig::default()));
    }

    #[test]
    fn test_config_can_disable_color() {
        let cli = Cli::try_parse_from(["statuser"]).unwrap();
        let mut config = StatuserConfig::default();
        config.display.color = false;
        assert!(!cli.color_enabled(&config));
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["statuser", "extra"]).is_err());
    }
}
