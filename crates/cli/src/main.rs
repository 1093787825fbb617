mod exit_code;
mod generate;
mod progress;
mod settings;

use clap::Parser;
use colored::Colorize;
use exit_code::ExitCode;
use generate::{GenerateArgs, SchemaSource};
use settings::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subgraph-docs")]
#[command(
    about = "Generate a Markdown entity reference from a subgraph's GraphQL schema",
    long_about = None
)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Protocol name; the output is written to <PROTOCOL>_Subgraph_Entities.md
    #[arg(value_name = "PROTOCOL")]
    protocol: String,

    /// IPFS content identifier of the subgraph's schema.graphql
    #[arg(value_name = "CID", required_unless_present = "schema_file")]
    cid: Option<String>,

    /// Read the schema from a local file instead of IPFS
    #[arg(long, value_name = "FILE", conflicts_with = "cid")]
    schema_file: Option<PathBuf>,

    /// IPFS gateway host (default: ipfs.io)
    #[arg(long, value_name = "HOST")]
    gateway: Option<String>,

    /// Path to config file (default: nearest .subgraphdocsrc)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write the Markdown file to (default: current directory)
    #[arg(short, long, value_name = "DIR", conflicts_with = "stdout")]
    output_dir: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Title of the generated page
    #[arg(long)]
    title: Option<String>,

    /// HTTP headers to send to the gateway (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    headers: Vec<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(long)]
    timeout: Option<u64>,

    /// Number of retry attempts on failure (overrides config file)
    #[arg(long)]
    retry: Option<u32>,

    /// Connect to the gateway directly, ignoring HTTP_PROXY/HTTPS_PROXY
    #[arg(long)]
    no_proxy: bool,

    /// Force colored output even when not a TTY
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    fn into_generate_args(self) -> GenerateArgs {
        let source = match (self.schema_file, self.cid) {
            (Some(path), _) => SchemaSource::File(path),
            (None, cid) => SchemaSource::Ipfs {
                cid: cid.unwrap_or_default(),
            },
        };

        GenerateArgs {
            protocol: self.protocol,
            source,
            config: self.config,
            overrides: Overrides {
                gateway: self.gateway,
                headers: self.headers,
                timeout: self.timeout,
                retry: self.retry,
                output_dir: self.output_dir,
                title: self.title,
                no_proxy: self.no_proxy,
            },
            to_stdout: self.stdout,
        }
    }
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "otel")]
    let otel_guard = init_telemetry();

    #[cfg(not(feature = "otel"))]
    init_tracing();

    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    let result = generate::run(cli.into_generate_args(), output_opts).await;

    #[cfg(feature = "otel")]
    if let Some(provider) = otel_guard {
        if let Err(e) = provider.shutdown() {
            eprintln!("Error shutting down tracer provider: {e:?}");
        }
    }

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(error) => {
            let code = ExitCode::for_error(&error);
            eprintln!("{} {}", "✗".red().bold(), format!("{error:#}").red());
            code
        }
    };
    tracing::debug!(%code, "Exiting");
    code.exit();
}

/// Initialize basic tracing without OpenTelemetry
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}

/// Initialize OpenTelemetry tracing with OTLP exporter
#[cfg(feature = "otel")]
fn init_telemetry() -> Option<opentelemetry_sdk::trace::SdkTracerProvider> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::SdkTracerProvider;
    use opentelemetry_sdk::Resource;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let otel_enabled = std::env::var("OTEL_TRACES_ENABLED")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    if !otel_enabled {
        init_tracing();
        return None;
    }

    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to create OTLP exporter, tracing to stderr only: {e}");
            init_tracing();
            return None;
        }
    };

    let provider = SdkTracerProvider::builder()
        .with_resource(Resource::builder().with_service_name("subgraph-docs").build())
        .with_batch_exporter(exporter)
        .build();

    opentelemetry::global::set_tracer_provider(provider.clone());

    let telemetry = tracing_opentelemetry::layer().with_tracer(provider.tracer("subgraph-docs"));

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(telemetry)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Some(provider)
}


#[cfg(test)]
mod color_tests {
    use super::configure_colors;
    use colored::control::{self, SHOULD_COLORIZE};
    use std::sync::Mutex;

    // Serializes tests that modify global state (env vars and color override)
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn with_clean_env<F: FnOnce()>(f: F) {
        let _lock = TEST_MUTEX.lock().unwrap();

        let saved: Vec<_> = ["NO_COLOR", "CLICOLOR", "CLICOLOR_FORCE"]
            .into_iter()
            .map(|var| (var, std::env::var_os(var)))
            .collect();
        for (var, _) in &saved {
            std::env::remove_var(var);
        }
        control::unset_override();

        f();

        control::unset_override();
        for (var, value) in saved {
            if let Some(value) = value {
                std::env::set_var(var, value);
            }
        }
    }

    #[test]
    fn color_flag_forces_colors_on() {
        with_clean_env(|| {
            configure_colors(true, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn no_color_flag_forces_colors_off() {
        with_clean_env(|| {
            configure_colors(false, true);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn color_flag_overrides_no_color_env() {
        with_clean_env(|| {
            std::env::set_var("NO_COLOR", "1");
            configure_colors(true, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn no_color_env_disables_colors() {
        with_clean_env(|| {
            std::env::set_var("NO_COLOR", "");
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_force_enables_colors() {
        with_clean_env(|| {
            std::env::set_var("CLICOLOR_FORCE", "1");
            configure_colors(false, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_zero_disables_colors() {
        with_clean_env(|| {
            std::env::set_var("CLICOLOR", "0");
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }
}
