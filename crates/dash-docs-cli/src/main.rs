// crates/dash-docs-cli/src/main.rs
// ============================================================================
// Module: Dash Docs CLI Entry Point
// Description: Command dispatcher for the docs server and build-time checks.
// Purpose: Serve the site backend, manage the schema bundle, validate content.
// Dependencies: clap, dash-docs-*, thiserror, tokio
// ============================================================================

//! ## Overview
//! `dash-docs` runs the docs HTTP server, writes or checks the on-disk schema
//! bundle, validates the content collections against the site sidebar, and
//! prints the default dashboard configuration. Build-time failures exit
//! non-zero with every issue written to stderr.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use dash_docs_config::DashDocsConfig;
use dash_docs_content::ContentError;
use dash_docs_content::DocsCollection;
use dash_docs_content::SiteConfig;
use dash_docs_content::YamlSchemaCollection;
use dash_docs_schema::SchemaBundleBuilder;
use dash_docs_schema::SchemaRegistry;
use dash_docs_schema::registry::render_yaml;
use dash_docs_server::DocsServer;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "dash-docs", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the docs HTTP server.
    Serve(ServeCommand),
    /// Schema bundle utilities.
    Schemas {
        /// Selected schema subcommand.
        #[command(subcommand)]
        command: SchemasCommand,
    },
    /// Content collection utilities.
    Content {
        /// Selected content subcommand.
        #[command(subcommand)]
        command: ContentCommand,
    },
    /// Print the default dashboard configuration as YAML.
    Defaults,
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to dash-docs.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Schema bundle subcommands.
#[derive(Subcommand, Debug)]
enum SchemasCommand {
    /// Write the schema bundle to disk.
    Generate(BundleArgs),
    /// Verify the on-disk schema bundle matches the registry.
    Check(BundleArgs),
}

/// Shared schema bundle arguments.
#[derive(Args, Debug)]
struct BundleArgs {
    /// Output directory (defaults to `public`).
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
    /// Include YAML renditions under `yaml/`.
    #[arg(long, action = ArgAction::SetTrue)]
    yaml: bool,
}

/// Content subcommands.
#[derive(Subcommand, Debug)]
enum ContentCommand {
    /// Validate docs pages, YAML schemas, and sidebar links.
    Check(ContentCheckCommand),
}

/// Configuration for the `content check` command.
#[derive(Args, Debug)]
struct ContentCheckCommand {
    /// Docs pages collection root.
    #[arg(long, value_name = "DIR")]
    docs: PathBuf,
    /// YAML schema collection root.
    #[arg(long, value_name = "DIR")]
    schemas: PathBuf,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("dash-docs {version}"))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Schemas {
            command,
        } => match command {
            SchemasCommand::Generate(args) => command_schemas_generate(&args),
            SchemasCommand::Check(args) => command_schemas_check(&args),
        },
        Commands::Content {
            command: ContentCommand::Check(command),
        } => command_content_check(&command),
        Commands::Defaults => command_defaults(),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Loads configuration and serves until interrupted.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = DashDocsConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    let server = DocsServer::from_config(&config)
        .map_err(|err| CliError::new(format!("failed to start server: {err}")))?;
    let addr = server.bind_addr();
    if !addr.ip().is_loopback() {
        write_stderr_line(&format!(
            "warning: binding to non-loopback address {addr}; the server has no authentication"
        ))?;
    }
    write_stderr_line(&format!("dash-docs listening on http://{addr}"))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Writes the schema bundle to disk.
fn command_schemas_generate(args: &BundleArgs) -> CliResult<ExitCode> {
    let out = bundle_output_dir(args);
    let manifest = bundle_builder(args)
        .write_to(&out)
        .map_err(|err| CliError::new(format!("schema generation failed: {err}")))?;
    write_stdout_line(&format!(
        "wrote {} schema artifacts to {}",
        manifest.artifacts.len(),
        out.display()
    ))?;
    Ok(ExitCode::SUCCESS)
}

/// Verifies the on-disk schema bundle.
fn command_schemas_check(args: &BundleArgs) -> CliResult<ExitCode> {
    let out = bundle_output_dir(args);
    bundle_builder(args)
        .verify_output(&out)
        .map_err(|err| CliError::new(format!("schema check failed: {err}")))?;
    write_stdout_line(&format!("schema bundle in {} is up to date", out.display()))?;
    Ok(ExitCode::SUCCESS)
}

/// Validates both content collections and the sidebar links.
fn command_content_check(command: &ContentCheckCommand) -> CliResult<ExitCode> {
    match check_content(command) {
        Ok(summary) => {
            write_stdout_line(&summary)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failures) => {
            for failure in &failures {
                write_stderr_line(failure)?;
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prints the default dashboard configuration.
fn command_defaults() -> CliResult<ExitCode> {
    let defaults = SchemaRegistry::builtin()
        .default_tree()
        .map_err(|err| CliError::new(format!("failed to compose defaults: {err}")))?;
    let yaml = render_yaml(&defaults)
        .map_err(|err| CliError::new(format!("failed to render defaults: {err}")))?;
    write_stdout_bytes(yaml.as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the bundle builder for the given arguments.
fn bundle_builder(args: &BundleArgs) -> SchemaBundleBuilder {
    SchemaBundleBuilder::new(SchemaRegistry::builtin()).with_yaml(args.yaml)
}

/// Resolves the bundle output directory.
fn bundle_output_dir(args: &BundleArgs) -> PathBuf {
    args.out.clone().unwrap_or_else(SchemaBundleBuilder::default_output_dir)
}

/// Runs every content check and returns a summary or every failure line.
fn check_content(command: &ContentCheckCommand) -> Result<String, Vec<String>> {
    let mut failures = Vec::new();
    let docs = match DocsCollection::load(&command.docs) {
        Ok(docs) => Some(docs),
        Err(err) => {
            failures.extend(failure_lines("docs", err));
            None
        }
    };
    let schemas = match YamlSchemaCollection::load(&command.schemas) {
        Ok(schemas) => Some(schemas),
        Err(err) => {
            failures.extend(failure_lines("schemas", err));
            None
        }
    };
    if let Some(docs) = &docs
        && let Err(err) = SiteConfig::gh_dash().check_links(docs)
    {
        failures.extend(failure_lines("sidebar", err));
    }
    match (docs, schemas) {
        (Some(docs), Some(schemas)) if failures.is_empty() => Ok(format!(
            "content ok: {} pages, {} schema documents",
            docs.len(),
            schemas.len()
        )),
        _ => Err(failures),
    }
}

/// Splits a content error into one prefixed line per issue.
fn failure_lines(scope: &str, err: ContentError) -> Vec<String> {
    match err {
        ContentError::Invalid(issues) | ContentError::BrokenLinks(issues) => {
            issues.into_iter().map(|issue| format!("{scope}: {issue}")).collect()
        }
        ContentError::Io(message) => vec![format!("{scope}: {message}")],
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("")
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> CliResult<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}").map_err(|err| CliError::new(output_error("stderr", &err)))
}

/// Formats an output write failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Writes the error to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "{message}");
    ExitCode::FAILURE
}
