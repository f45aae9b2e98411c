mod file_capture;
mod outbox;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lostfound_contract::encode_canonical;
use lostfound_ports::{FormHost, StaticPermissions, StaticSession};
use lostfound_workflow::{FormConfig, FormPorts, SubmitOutcome, UploadForm, ValidationErrors};
use serde::Deserialize;
use tracing::{info, warn};

use crate::file_capture::FileImageCapture;
use crate::outbox::OutboxStore;

#[derive(Debug, Parser)]
#[command(author, version, about = "Post lost item reports from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in the form once and post it.
    Post {
        #[arg(long, default_value = "config/lostfound.toml")]
        config: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        location: String,
        /// Photo of the item. Leaving it out behaves like cancelling the picker.
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ImageSource::Library)]
        source: ImageSource,
    },
    /// Print a posted report from the outbox.
    Show {
        #[arg(long, default_value = "config/lostfound.toml")]
        config: PathBuf,
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImageSource {
    Library,
    Camera,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RuntimeConfig {
    form: FormConfig,
    session: SessionSection,
    device: DeviceSection,
    outbox: OutboxSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SessionSection {
    user_id: Option<String>,
    phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct DeviceSection {
    camera_granted: bool,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            camera_granted: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct OutboxSection {
    dir: PathBuf,
}

impl Default for OutboxSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("outbox"),
        }
    }
}

/// Stands in for the screen that hosts the form.
struct TerminalHost;

impl FormHost for TerminalHost {
    fn set_show_upload_form(&self, visible: bool) {
        info!(visible, "upload form visibility changed");
    }

    fn alert(&self, message: &str) {
        warn!(alert = message, "alert shown to user");
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Post {
            config,
            title,
            location,
            image,
            source,
        } => post(config, title, location, image, source).await,
        Command::Show { config, id } => show(config, id).await,
    }
}

fn load_config(config_path: &Path) -> Result<RuntimeConfig> {
    if !config_path.exists() {
        info!(path = %config_path.display(), "config file not found; using defaults");
        return Ok(RuntimeConfig::default());
    }

    let config_source = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read config file {}", config_path.display()))?;
    toml::from_str(&config_source)
        .with_context(|| format!("invalid config TOML at {}", config_path.display()))
}

fn session_from(section: &SessionSection) -> StaticSession {
    match &section.user_id {
        Some(user_id) => StaticSession::signed_in(user_id.clone(), section.phone_number.clone()),
        None => StaticSession::signed_out(),
    }
}

async fn post(
    config_path: PathBuf,
    title: String,
    location: String,
    image: Option<PathBuf>,
    source: ImageSource,
) -> Result<()> {
    let config = load_config(&config_path)?;

    let ports = FormPorts {
        capture: Arc::new(FileImageCapture::new(image)),
        permissions: Arc::new(StaticPermissions::new(config.device.camera_granted)),
        session: Arc::new(session_from(&config.session)),
        store: Arc::new(OutboxStore::new(config.outbox.dir.clone())),
        host: Arc::new(TerminalHost),
    };
    let form = UploadForm::new(ports, config.form.clone());

    form.open().await?;
    form.set_title(title).await;
    form.set_location(location).await;

    let status = match source {
        ImageSource::Library => form.pick_image().await,
        ImageSource::Camera => form.capture_image().await,
    }
    .context("failed to attach image")?;
    info!(?status, ?source, "image step finished");

    match form.submit().await? {
        SubmitOutcome::Posted(record) => {
            println!("posted lost item {}", record.id);
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            print_field_errors(&errors);
            bail!("lost item report rejected")
        }
        SubmitOutcome::PostFailed {
            record,
            error,
            draft_kept,
        } => Err(anyhow!(error)).with_context(|| {
            format!(
                "failed to post lost item {} (draft kept: {draft_kept})",
                record.id
            )
        }),
    }
}

fn print_field_errors(errors: &ValidationErrors) {
    for (field, message) in [
        ("title", &errors.title),
        ("location", &errors.location),
        ("image", &errors.image),
    ] {
        if !message.is_empty() {
            eprintln!("{field}: {message}");
        }
    }
}

async fn show(config_path: PathBuf, id: String) -> Result<()> {
    let config = load_config(&config_path)?;
    let store = OutboxStore::new(config.outbox.dir);
    let record = store
        .load(&id)
        .await
        .with_context(|| format!("lost item {id} not found in {}", store.dir().display()))?;

    let rendered = encode_canonical(&record).context("failed to render record")?;
    println!("{}", String::from_utf8_lossy(&rendered));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{session_from, RuntimeConfig};
    use lostfound_ports::SessionProvider;
    use lostfound_workflow::StoreFailurePolicy;

    #[test]
    fn parses_full_config() {
        let config: RuntimeConfig = toml::from_str(
            r#"
            [form]
            on_store_failure = "keep_draft"

            [form.capture]
            quality = 0.7

            [session]
            user_id = "finder-9"
            phone_number = "+15550199"

            [device]
            camera_granted = false

            [outbox]
            dir = "/tmp/lostfound"
            "#,
        )
        .expect("parse");

        assert_eq!(config.form.on_store_failure, StoreFailurePolicy::KeepDraft);
        assert_eq!(config.form.capture.quality, 0.7);
        assert!(!config.device.camera_granted);
        assert_eq!(config.outbox.dir.to_str(), Some("/tmp/lostfound"));

        let finder = session_from(&config.session).finder_identity();
        assert_eq!(finder.id, "finder-9");
        assert_eq!(finder.phone_number, "+15550199");
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: RuntimeConfig = toml::from_str("").expect("parse");

        assert!(config.device.camera_granted);
        assert_eq!(config.outbox.dir.to_str(), Some("outbox"));
        assert_eq!(config.form.on_store_failure, StoreFailurePolicy::CloseAnyway);
        assert_eq!(session_from(&config.session).finder_identity().id, "");
    }
}
