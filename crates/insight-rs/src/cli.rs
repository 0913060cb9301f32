use clap::{Parser, Subcommand};
use insight_rs_config::Domain;
use std::path::PathBuf;

/// Command-line options for the `insight` binary.
#[derive(Debug, Parser)]
#[command(name = "insight", version, about = "Tool-calling analysis agent")]
pub struct Cli {
    /// Optional path to an insight.json5 config applied on top of the layered config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP and WebSocket API
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,
        /// Bind port
        #[arg(long)]
        port: Option<u16>,
        /// Dataset and tool set (climate or banking)
        #[arg(long)]
        domain: Option<Domain>,
    },
    /// Run one analysis and print its trace
    Ask {
        /// Dataset and tool set (climate or banking)
        #[arg(long)]
        domain: Option<Domain>,
        /// Question to analyse
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

impl Command {
    pub fn domain(&self) -> Option<Domain> {
        match self {
            Command::Serve { domain, .. } | Command::Ask { domain, .. } => *domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use insight_rs_config::Domain;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::parse_from([
            "insight", "serve", "--port", "9000", "--domain", "banking",
        ]);
        match &cli.command {
            Command::Serve { host, port, .. } => {
                assert_eq!(host, &None);
                assert_eq!(port, &Some(9000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.command.domain(), Some(Domain::Banking));
    }

    #[test]
    fn ask_joins_query_words() {
        let cli = Cli::parse_from([
            "insight",
            "--config",
            "custom.json5",
            "ask",
            "average",
            "of",
            "[10, 20, 30]",
        ]);
        assert_eq!(
            cli.config.as_deref().map(|p| p.to_string_lossy().into_owned()),
            Some("custom.json5".to_string())
        );
        let Command::Ask { query, domain } = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(domain, None);
        assert_eq!(query.join(" "), "average of [10, 20, 30]");
    }

    #[test]
    fn rejects_unknown_domain() {
        assert!(Cli::try_parse_from(["insight", "ask", "--domain", "weather", "q"]).is_err());
    }
}
