//! The document generation pipeline.
//!
//! Source → normalize/extract → render → single write. The whole document is
//! built in memory before anything touches the output path, so a failure at
//! any stage leaves no file behind.

use crate::progress;
use crate::settings::{load_config_file, output_file_name, resolve_settings, Overrides, Settings};
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use subgraph_markdown::{render_with, EntityDocument, RenderOptions};
use subgraph_schema::parse_schema;
use thiserror::Error;

/// Where the raw schema text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// A CID resolved through the configured IPFS gateway.
    Ipfs { cid: String },
    /// A schema file on disk.
    File(PathBuf),
}

#[derive(Debug, Error)]
#[error("Failed to read schema file {}", path.display())]
pub struct SchemaFileError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// Everything a generation run needs from the command line.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub protocol: String,
    pub source: SchemaSource,
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    pub to_stdout: bool,
}

/// A rendered document and what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub markdown: String,
    pub entities: usize,
    pub fields: usize,
}

/// Run the pipeline from the current working directory.
pub async fn run(args: GenerateArgs, output_opts: OutputOptions) -> Result<()> {
    let current_dir = std::env::current_dir().context("Failed to determine working directory")?;
    execute(args, output_opts, &current_dir).await
}

#[tracing::instrument(skip_all, fields(protocol = %args.protocol))]
async fn execute(args: GenerateArgs, output_opts: OutputOptions, start_dir: &Path) -> Result<()> {
    let start_time = std::time::Instant::now();

    let config = load_config_file(args.config.as_deref(), start_dir)?;
    let settings = resolve_settings(&args.overrides, config.as_ref())?;
    // Stdout needs no file name.
    let file_name = if args.to_stdout {
        None
    } else {
        Some(output_file_name(&args.protocol)?)
    };

    let show_progress = output_opts.show_progress && !args.to_stdout;
    let raw = load_source(&args.source, &settings, show_progress).await?;

    let generated = generate_markdown(&raw, &settings.title)?;

    let Some(file_name) = file_name else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(generated.markdown.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    };

    let path = settings.output_dir.join(file_name);
    write_document(&path, &generated.markdown)?;

    if output_opts.show_info {
        println!(
            "{} Documented {} entities ({} fields) in {}",
            "✓".green(),
            generated.entities,
            generated.fields,
            path.display().to_string().cyan()
        );
        println!(
            "  {} {:.2}s",
            "⏱".dimmed(),
            start_time.elapsed().as_secs_f64()
        );
    }
    Ok(())
}

async fn load_source(source: &SchemaSource, settings: &Settings, show_progress: bool) -> Result<String> {
    match source {
        SchemaSource::File(path) => {
            tracing::debug!(path = %path.display(), "Reading schema file");
            std::fs::read_to_string(path).map_err(|source| {
                SchemaFileError {
                    path: path.clone(),
                    source,
                }
                .into()
            })
        }
        SchemaSource::Ipfs { cid } => {
            let client = settings.client();
            let locator = client.locator(cid)?;

            let spinner = progress::fetch_spinner(show_progress, &locator);
            let result = client.fetch_url(&locator).await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }

            result.with_context(|| format!("Failed to fetch schema from {locator}"))
        }
    }
}

/// Parses `raw` and renders the entity reference under `title`.
#[tracing::instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn generate_markdown(raw: &str, title: &str) -> Result<Generated> {
    let parsed = parse_schema(raw).context("Failed to extract entities from schema")?;
    let document = EntityDocument::from_parsed(&parsed);
    let markdown = render_with(&document, &RenderOptions::default().with_title(title));

    Ok(Generated {
        markdown,
        entities: document.sections().len(),
        fields: document.field_count(),
    })
}

/// Writes the finished document, creating the output directory if needed.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExitCode;
    use subgraph_test_utils::assertions::{index_entries, table_rows};
    use subgraph_test_utils::fixtures::{DEX_ENTITIES, DEX_SCHEMA, ERC20_SCHEMA, UNCLOSED_SCHEMA};
    use subgraph_test_utils::gateway::serve;

    const QUIET: OutputOptions = OutputOptions {
        show_progress: false,
        show_info: false,
    };

    fn file_args(protocol: &str, schema: &Path, output_dir: &Path) -> GenerateArgs {
        GenerateArgs {
            protocol: protocol.to_string(),
            source: SchemaSource::File(schema.to_path_buf()),
            config: None,
            overrides: Overrides {
                output_dir: Some(output_dir.to_path_buf()),
                ..Overrides::default()
            },
            to_stdout: false,
        }
    }

    fn ipfs_args(protocol: &str, gateway: String, output_dir: &Path) -> GenerateArgs {
        GenerateArgs {
            protocol: protocol.to_string(),
            source: SchemaSource::Ipfs {
                cid: "QmSchema".to_string(),
            },
            config: None,
            overrides: Overrides {
                gateway: Some(gateway),
                retry: Some(0),
                no_proxy: true,
                output_dir: Some(output_dir.to_path_buf()),
                ..Overrides::default()
            },
            to_stdout: false,
        }
    }

    #[test]
    fn test_generate_markdown_counts() {
        let generated = generate_markdown(DEX_SCHEMA, "Subgraph Entities").unwrap();
        assert_eq!(generated.entities, 5);
        assert_eq!(generated.fields, 20);
        assert!(generated.markdown.starts_with("# Subgraph Entities\n"));
    }

    #[test]
    fn test_generate_markdown_custom_title() {
        let generated = generate_markdown(ERC20_SCHEMA, "ERC20 Entities").unwrap();
        assert!(generated.markdown.starts_with("# ERC20 Entities\n"));
        assert_eq!(index_entries(&generated.markdown), vec!["Token"]);
    }

    #[test]
    fn test_generate_markdown_malformed_schema() {
        let err = generate_markdown(UNCLOSED_SCHEMA, "Subgraph Entities").unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::SchemaError);
    }

    #[test]
    fn test_write_document_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docs/nested/out.md");
        write_document(&path, "# Title\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Title\n");
    }

    #[tokio::test]
    async fn test_execute_writes_named_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema = temp_dir.path().join("schema.graphql");
        std::fs::write(&schema, ERC20_SCHEMA).unwrap();
        let out_dir = temp_dir.path().join("out");

        execute(file_args("Token", &schema, &out_dir), QUIET, temp_dir.path())
            .await
            .unwrap();

        let written = std::fs::read_to_string(out_dir.join("Token_Subgraph_Entities.md")).unwrap();
        assert_eq!(index_entries(&written), vec!["Token"]);
        assert_eq!(table_rows(&written, "Token").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_execute_malformed_schema_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema = temp_dir.path().join("schema.graphql");
        std::fs::write(&schema, UNCLOSED_SCHEMA).unwrap();
        let out_dir = temp_dir.path().join("out");

        let err = execute(file_args("Broken", &schema, &out_dir), QUIET, temp_dir.path())
            .await
            .unwrap_err();

        assert_eq!(ExitCode::for_error(&err), ExitCode::SchemaError);
        assert!(!out_dir.join("Broken_Subgraph_Entities.md").exists());
    }

    #[tokio::test]
    async fn test_execute_missing_schema_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing.graphql");

        let err = execute(file_args("X", &missing, temp_dir.path()), QUIET, temp_dir.path())
            .await
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::FetchError);
        assert!(!temp_dir.path().join("X_Subgraph_Entities.md").exists());
    }

    #[tokio::test]
    async fn test_execute_fetches_cid_from_gateway() {
        let temp_dir = tempfile::tempdir().unwrap();
        let gateway = serve(vec![(200, DEX_SCHEMA)]).await;
        let out_dir = temp_dir.path().join("out");

        execute(ipfs_args("Dex", gateway, &out_dir), QUIET, temp_dir.path())
            .await
            .unwrap();

        let written = std::fs::read_to_string(out_dir.join("Dex_Subgraph_Entities.md")).unwrap();
        assert_eq!(index_entries(&written), DEX_ENTITIES);
    }

    #[tokio::test]
    async fn test_execute_gateway_error_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let gateway = serve(vec![(404, "no link named")]).await;
        let out_dir = temp_dir.path().join("out");

        let err = execute(ipfs_args("Dex", gateway, &out_dir), QUIET, temp_dir.path())
            .await
            .unwrap_err();

        assert_eq!(ExitCode::for_error(&err), ExitCode::FetchError);
        assert!(!out_dir.join("Dex_Subgraph_Entities.md").exists());
    }

    #[tokio::test]
    async fn test_execute_stdout_accepts_any_protocol() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema = temp_dir.path().join("schema.graphql");
        std::fs::write(&schema, ERC20_SCHEMA).unwrap();

        let mut args = file_args("a/b", &schema, temp_dir.path());
        args.to_stdout = true;
        execute(args, QUIET, temp_dir.path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_uses_discovered_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join(".subgraphdocsrc.json"),
            r#"{"title": "DEX Entities", "outputDir": "generated"}"#,
        )
        .unwrap();
        let schema = temp_dir.path().join("schema.graphql");
        std::fs::write(&schema, DEX_SCHEMA).unwrap();

        let mut args = file_args("Dex", &schema, temp_dir.path());
        args.overrides.output_dir = None;
        execute(args, QUIET, temp_dir.path()).await.unwrap();

        let written = std::fs::read_to_string(
            temp_dir
                .path()
                .join("generated")
                .join("Dex_Subgraph_Entities.md"),
        )
        .unwrap();
        assert!(written.starts_with("# DEX Entities\n"));
    }

    #[tokio::test]
    async fn test_execute_invalid_protocol_is_config_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema = temp_dir.path().join("schema.graphql");
        std::fs::write(&schema, ERC20_SCHEMA).unwrap();

        let err = execute(file_args("a/b", &schema, temp_dir.path()), QUIET, temp_dir.path())
            .await
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);
    }
}
