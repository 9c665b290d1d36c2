//! Run the hooks bound to an event on a single JSON document.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use addrgeo::hooks::DEFAULT_EVENT;
use addrgeo::{build_hooks, AddressRecord, Config};

#[derive(Parser, Debug)]
#[command(name = "apply")]
#[command(about = "Apply address hooks to a JSON document")]
struct Args {
    /// Input document, read from stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Event whose hooks are run
    #[arg(short, long, default_value = DEFAULT_EVENT)]
    event: String,

    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean document
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let content = match &args.input {
        Some(path) => read_input(path)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let rendered = apply(&config, &args.event, &content).await?;

    match &args.output {
        Some(path) => write_output(path, &rendered)?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: &Path, rendered: &str) -> Result<()> {
    fs::write(path, format!("{}\n", rendered))
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Parse `content`, run the hooks bound to `event` and render the result as
/// pretty-printed JSON.
async fn apply(config: &Config, event: &str, content: &str) -> Result<String> {
    let record: AddressRecord =
        serde_json::from_str(content).context("Input is not a valid address document")?;

    let (hooks, _log) = build_hooks(config)?;
    info!("Running '{}' hooks: {:?}", event, hooks.bound(event));

    let record = hooks.run(event, record).await?;
    Ok(serde_json::to_string_pretty(&record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use serde_json::{json, Value};

    /// Stand-in lookup service answering every search with `body`.
    async fn fake_nominatim(body: &'static str) -> Config {
        let app = Router::new().route("/search", get(move || async move { body }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = Config::default();
        config.lookup.endpoint = format!("http://{}/search", addr);
        config
    }

    #[tokio::test]
    async fn test_apply_validate() {
        let body = r#"[{"lat":"39.95","lon":"-75.16",
            "address":{"state":"Pennsylvania","country":"United States"}}]"#;
        let config = fake_nominatim(body).await;
        let input = json!({"name": "ADDR-0001", "city": "Philadelphia"}).to_string();

        let rendered = apply(&config, DEFAULT_EVENT, &input).await.unwrap();
        let doc: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(doc["name"], "ADDR-0001");
        assert_eq!(doc["state"], "PA");
        assert_eq!(doc["country"], "United States");
        assert!(doc["location"].as_str().unwrap().contains("[-75.16,39.95]"));
    }

    #[tokio::test]
    async fn test_apply_lookup_failure() {
        let config = fake_nominatim("not json").await;
        let input = json!({"city": "Berlin"}).to_string();

        let err = apply(&config, DEFAULT_EVENT, &input).await.unwrap_err();
        assert!(err.to_string().starts_with("Geolocation failed: "));
    }

    #[tokio::test]
    async fn test_apply_unbound_event() {
        let mut config = Config::default();
        config.lookup.endpoint = "http://127.0.0.1:9/search".to_string();
        let input = json!({"city": "Berlin", "custom_field": 7}).to_string();

        let rendered = apply(&config, "on_trash", &input).await.unwrap();
        let doc: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(doc["city"], "Berlin");
        assert_eq!(doc["custom_field"], 7);
        assert_eq!(doc["state"], Value::Null);
    }

    #[tokio::test]
    async fn test_apply_rejects_invalid_document() {
        let config = Config::default();
        let err = apply(&config, DEFAULT_EVENT, "not json").await.unwrap_err();
        assert_eq!(err.to_string(), "Input is not a valid address document");
    }

    #[test]
    fn test_file_input_and_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        fs::write(&input, r#"{"city": "Berlin"}"#).unwrap();

        assert_eq!(read_input(&input).unwrap(), r#"{"city": "Berlin"}"#);
        write_output(&output, "{}").unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "{}\n");

        let err = read_input(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read "));
    }
}
