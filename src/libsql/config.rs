use std::fmt;

use deadpool_libsql::libsql::Builder;
use deadpool_libsql::{Manager, Pool};

use crate::error::SqlNodeError;

const DEFAULT_MAX_CONNECTIONS: usize = 4;

/// Which database the client talks to.
#[derive(Clone, PartialEq, Eq)]
pub enum LibsqlTarget {
    /// A sqld / Turso endpoint such as `libsql://db-org.turso.io`.
    Remote { url: String, auth_token: String },
    /// A local database file (or `:memory:`).
    Local { path: String },
}

// Keeps the auth token out of logs.
impl fmt::Debug for LibsqlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for LibsqlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibsqlTarget::Remote { url, .. } => write!(f, "remote {url}"),
            LibsqlTarget::Local { path } => write!(f, "local {path}"),
        }
    }
}

/// Options for configuring a libsql client.
#[derive(Debug, Clone)]
pub struct LibsqlOptions {
    pub target: LibsqlTarget,
    pub max_connections: usize,
}

impl LibsqlOptions {
    #[must_use]
    pub fn remote(url: String, auth_token: Option<String>) -> Self {
        Self {
            target: LibsqlTarget::Remote {
                url,
                auth_token: auth_token.unwrap_or_default(),
            },
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    #[must_use]
    pub fn local(path: String) -> Self {
        Self {
            target: LibsqlTarget::Local { path },
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    #[must_use]
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    fn validate(&self) -> Result<(), SqlNodeError> {
        if self.max_connections == 0 {
            return Err(SqlNodeError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        match &self.target {
            LibsqlTarget::Remote { url, .. } if url.trim().is_empty() => {
                Err(SqlNodeError::Config("missing database url".to_string()))
            }
            LibsqlTarget::Local { path } if path.trim().is_empty() => {
                Err(SqlNodeError::Config("missing database path".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Fluent builder for libsql options.
#[derive(Debug, Clone)]
pub struct LibsqlOptionsBuilder {
    opts: LibsqlOptions,
}

impl LibsqlOptionsBuilder {
    #[must_use]
    pub fn remote(url: String) -> Self {
        Self {
            opts: LibsqlOptions::remote(url, None),
        }
    }

    #[must_use]
    pub fn local(path: String) -> Self {
        Self {
            opts: LibsqlOptions::local(path),
        }
    }

    /// Set the auth token; ignored for local targets.
    #[must_use]
    pub fn auth_token(mut self, token: String) -> Self {
        if let LibsqlTarget::Remote { auth_token, .. } = &mut self.opts.target {
            *auth_token = token;
        }
        self
    }

    #[must_use]
    pub fn max_connections(mut self, max_connections: usize) -> Self {
        self.opts.max_connections = max_connections;
        self
    }

    #[must_use]
    pub fn finish(self) -> LibsqlOptions {
        self.opts
    }

    /// Connect with the accumulated options.
    ///
    /// # Errors
    /// See [`LibsqlClient::connect`].
    pub async fn build(self) -> Result<LibsqlClient, SqlNodeError> {
        LibsqlClient::connect(self.finish()).await
    }
}

/// Pooled libsql client; implements `ExecutionCapability`.
#[derive(Clone)]
pub struct LibsqlClient {
    pub(super) pool: Pool,
    target: LibsqlTarget,
}

impl fmt::Debug for LibsqlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibsqlClient")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl LibsqlClient {
    #[must_use]
    pub fn builder_remote(url: String) -> LibsqlOptionsBuilder {
        LibsqlOptionsBuilder::remote(url)
    }

    #[must_use]
    pub fn builder_local(path: String) -> LibsqlOptionsBuilder {
        LibsqlOptionsBuilder::local(path)
    }

    /// Open the database and build a connection pool, checking out one connection as a smoke test.
    ///
    /// # Errors
    /// Returns `SqlNodeError::Config` if the options are invalid, or the database or pool cannot
    /// be created.
    pub async fn connect(opts: LibsqlOptions) -> Result<Self, SqlNodeError> {
        opts.validate()?;

        let db = match &opts.target {
            LibsqlTarget::Remote { url, auth_token } => {
                Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await
            }
            LibsqlTarget::Local { path } => Builder::new_local(path.clone()).build().await,
        }
        .map_err(|e| SqlNodeError::Config(format!("Failed to create libsql database: {e}")))?;

        let manager = Manager::from_libsql_database(db);
        let pool = Pool::builder(manager)
            .max_size(opts.max_connections)
            .build()
            .map_err(|e| SqlNodeError::Config(format!("Failed to create libsql pool: {e}")))?;

        let _conn = pool.get().await.map_err(|e| {
            SqlNodeError::Config(format!("Failed to get libsql connection: {e}"))
        })?;

        tracing::info!(
            database = %opts.target,
            max_connections = opts.max_connections,
            "libsql client ready"
        );

        Ok(LibsqlClient {
            pool,
            target: opts.target,
        })
    }

    #[must_use]
    pub fn target(&self) -> &LibsqlTarget {
        &self.target
    }
}
