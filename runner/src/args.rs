use std::path::PathBuf;

use clap::Parser;
use libsql_node::{FailurePolicy, LibsqlOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run SQL node operations against a libsql database")]
pub(crate) struct Args {
    /// JSON file with one operation descriptor or an array of them; `-` reads stdin
    pub(crate) operations: PathBuf,
    /// Remote database URL, e.g. libsql://db-org.turso.io
    #[arg(long, env = "LIBSQL_URL")]
    pub(crate) url: Option<String>,
    #[arg(long, env = "LIBSQL_AUTH_TOKEN", hide_env_values = true)]
    pub(crate) auth_token: Option<String>,
    /// Local database file; takes precedence over --url
    #[arg(long)]
    pub(crate) local: Option<PathBuf>,
    #[arg(long, default_value_t = 4)]
    pub(crate) max_connections: usize,
    #[arg(long, value_enum, default_value = "fail-fast")]
    pub(crate) on_failure: FailurePolicy,
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
    #[arg(long)]
    pub(crate) verbose: bool,
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct RunConfig {
    pub(crate) operations: PathBuf,
    pub(crate) database: LibsqlOptions,
    pub(crate) policy: FailurePolicy,
    pub(crate) log: Option<PathBuf>,
    pub(crate) verbose: bool,
    pub(crate) pretty: bool,
}

impl RunConfig {
    pub(crate) fn from_args(args: Args) -> Result<Self, String> {
        let database = match (args.local, args.url) {
            (Some(path), _) => LibsqlOptions::local(path.to_string_lossy().into_owned()),
            (None, Some(url)) => LibsqlOptions::remote(url, args.auth_token),
            (None, None) => return Err("either --url (or LIBSQL_URL) or --local is required".to_string()),
        };

        Ok(RunConfig {
            operations: args.operations,
            database: database.with_max_connections(args.max_connections.max(1)),
            policy: args.on_failure,
            log: args.log,
            verbose: args.verbose,
            pretty: args.pretty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libsql_node::LibsqlTarget;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn local_wins_over_url() {
        let args = parse(&["libsql-node", "ops.json", "--url", "libsql://x", "--local", "db.sqlite"]);
        let config = RunConfig::from_args(args).unwrap();
        assert_eq!(
            config.database.target,
            LibsqlTarget::Local {
                path: "db.sqlite".into()
            }
        );
    }

    #[test]
    fn pool_size_is_at_least_one() {
        let args = parse(&["libsql-node", "ops.json", "--local", "db.sqlite", "--max-connections", "0"]);
        assert_eq!(RunConfig::from_args(args).unwrap().database.max_connections, 1);
    }

    #[test]
    fn failure_policy_flag() {
        let args = parse(&["libsql-node", "ops.json", "--local", "db", "--on-failure", "continue"]);
        assert_eq!(args.on_failure, FailurePolicy::Continue);
    }
}
