//! Server wiring for Folio: configuration, dependency construction, router.
//!
//! Nothing here touches the database or the mail API. Both are validated on
//! first use, so a server with missing credentials still starts and reports
//! the problem as a failed submission.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use axum::Router;
use config::{ConfigBuilder, builder::DefaultState};
use folio_api::{AppState, Timeouts, api_router};
use folio_mail::{HttpMailer, MailerConfig};
use folio_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FOLIO_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  /// SQLite database file. Unset means every submission fails as
  /// storage-unavailable.
  #[serde(default)]
  pub database_path:      Option<PathBuf>,
  #[serde(default = "default_timeout_secs")]
  pub store_timeout_secs: u64,
  #[serde(default = "default_timeout_secs")]
  pub mail_timeout_secs:  u64,
  #[serde(default)]
  pub mail:               MailerConfig,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_timeout_secs() -> u64 { 10 }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under the environment.
  pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(path.into()).required(false))
        .add_source(env_source()),
    )
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    let settings = builder.build().context("failed to read configuration")?;
    let mut cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.database_path = cfg.database_path.as_deref().map(expand_tilde);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn timeouts(&self) -> Timeouts {
    Timeouts {
      store: Duration::from_secs(self.store_timeout_secs),
      mail:  Duration::from_secs(self.mail_timeout_secs),
    }
  }
}

/// `FOLIO_PORT`, `FOLIO_DATABASE_PATH`, `FOLIO_MAIL__SENDER`, ...
fn env_source() -> config::Environment {
  config::Environment::with_prefix("FOLIO")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Wiring ───────────────────────────────────────────────────────────────────

/// Construct the lazily connected store and the mailer for `cfg`.
pub fn app_state(cfg: &ServerConfig) -> anyhow::Result<AppState<SqliteStore, HttpMailer>> {
  let store = SqliteStore::from_config(cfg.database_path.clone());
  let mailer = HttpMailer::new(cfg.mail.clone(), Duration::from_secs(cfg.mail_timeout_secs))
    .context("failed to build mail client")?;
  Ok(AppState::new(Arc::new(store), Arc::new(mailer)).with_timeouts(cfg.timeouts()))
}

/// The full application router: the API under `/api`, with request tracing.
pub fn router(state: AppState<SqliteStore, HttpMailer>) -> Router {
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use config::FileFormat;
  use tower::ServiceExt as _;

  fn from_toml(toml: &str) -> ServerConfig {
    ServerConfig::from_builder(
      config::Config::builder().add_source(config::File::from_str(toml, FileFormat::Toml)),
    )
    .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "127.0.0.1:3000");
    assert!(cfg.database_path.is_none());
    assert_eq!(cfg.timeouts().store, Duration::from_secs(10));
    assert_eq!(cfg.mail.api_url, "https://api.postmarkapp.com");
    assert!(cfg.mail.sender.is_none());
  }

  #[test]
  fn toml_file_sets_every_section() {
    let cfg = from_toml(
      r#"
        host = "0.0.0.0"
        port = 8080
        database_path = "/var/lib/folio/contact.sqlite"
        store_timeout_secs = 3
        mail_timeout_secs = 4

        [mail]
        api_url = "http://localhost:9000"
        sender = "owner@example.com"
        server_token = "token"
      "#,
    );
    assert_eq!(cfg.address(), "0.0.0.0:8080");
    assert_eq!(
      cfg.database_path.as_deref(),
      Some(Path::new("/var/lib/folio/contact.sqlite"))
    );
    assert_eq!(cfg.timeouts().store, Duration::from_secs(3));
    assert_eq!(cfg.timeouts().mail, Duration::from_secs(4));
    assert_eq!(cfg.mail.api_url, "http://localhost:9000");
    assert_eq!(cfg.mail.sender.as_deref(), Some("owner@example.com"));
    assert_eq!(cfg.mail.server_token.as_deref(), Some("token"));
    assert!(cfg.mail.recipient.is_none());
  }

  #[test]
  fn environment_overrides_file() {
    let env: config::Map<String, String> = [
      ("FOLIO_PORT", "9999"),
      ("FOLIO_MAIL__SENDER", "env@example.com"),
      ("FOLIO_MAIL__RECIPIENT", "inbox@example.com"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let cfg = ServerConfig::from_builder(
      config::Config::builder()
        .add_source(config::File::from_str(
          "port = 1234\n[mail]\nsender = \"file@example.com\"\n",
          FileFormat::Toml,
        ))
        .add_source(env_source().source(Some(env))),
    )
    .unwrap();

    assert_eq!(cfg.port, 9999);
    assert_eq!(cfg.mail.sender.as_deref(), Some("env@example.com"));
    assert_eq!(cfg.mail.recipient.as_deref(), Some("inbox@example.com"));
  }

  #[test]
  fn smtp_style_mail_keys_are_rejected() {
    let err = ServerConfig::from_builder(config::Config::builder().add_source(
      config::File::from_str(
        "[mail]\naccount = \"me@gmail.com\"\npassword = \"hunter2\"\n",
        FileFormat::Toml,
      ),
    ))
    .unwrap_err();
    assert!(format!("{err:#}").contains("unknown field"), "{err:#}");
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/folio/contact.sqlite")),
      PathBuf::from(home).join("folio/contact.sqlite")
    );
    assert_eq!(expand_tilde(Path::new("/abs/path")), PathBuf::from("/abs/path"));
  }

  #[tokio::test]
  async fn unconfigured_server_starts_and_fails_per_request() {
    let state = app_state(&from_toml("")).unwrap();
    let app = router(state);

    let post = Request::builder()
      .method("POST")
      .uri("/api/contact")
      .header("content-type", "application/json")
      .body(Body::from(
        r#"{"name":"Ada","email":"ada@example.com","message":"Hello"}"#,
      ))
      .unwrap();
    let resp = app.clone().oneshot(post).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let get = Request::builder()
      .method("GET")
      .uri("/api/contact")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(get).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
  }
}
