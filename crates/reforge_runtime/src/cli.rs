//! Command-line interface.

use std::fmt::Write as _;
use std::path::PathBuf;

use reforge_engine::{
    Decision, HandlerRegistry, LegacyKind, MigrationConfig, MigrationQueue, MigrationReport,
    Migrator, Outcome,
};
use reforge_foundation::{ComponentTag, Error, ErrorKind, Result};
use reforge_storage::{DocumentBackend, DocumentKind, Handle, Workspace};
use tracing_subscriber::{EnvFilter, fmt};

use crate::backend::FileBackend;
use crate::prompt::PromptConfirm;

/// CLI configuration parsed from arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding the document files.
    pub root: Option<PathBuf>,
    /// Documents to migrate; every document under the root when empty.
    pub documents: Vec<String>,
    /// Legacy tag to migrate; every registered tag when `None`.
    pub handler: Option<String>,
    /// Migrate every registered legacy tag.
    pub all: bool,
    /// Report planned changes without writing.
    pub dry_run: bool,
    /// Apply destructive handlers without asking.
    pub assume_yes: bool,
    /// Print the registered handlers and exit.
    pub list_handlers: bool,
    /// Log at debug level.
    pub verbose: bool,
    /// Print help and exit.
    pub show_help: bool,
    /// Print version and exit.
    pub show_version: bool,
}

impl CliConfig {
    /// Returns the engine configuration these flags select.
    #[must_use]
    pub fn migration_config(&self) -> MigrationConfig {
        if self.assume_yes {
            MigrationConfig::unattended().with_record_changes(self.verbose)
        } else {
            MigrationConfig::interactive().with_record_changes(self.verbose)
        }
    }
}

/// Parses command-line arguments (including the program name).
///
/// # Errors
///
/// Returns a message for unknown options, missing values and conflicting
/// flags.
pub fn parse_args(args: &[String]) -> std::result::Result<CliConfig, String> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-n" | "--dry-run" => config.dry_run = true,
            "-y" | "--yes" => config.assume_yes = true,
            "-a" | "--all" => config.all = true,
            "-l" | "--list-handlers" => config.list_handlers = true,
            "-v" | "--verbose" => config.verbose = true,
            "--handler" => {
                i += 1;
                if i >= args.len() {
                    return Err("--handler requires a component tag".into());
                }
                config.handler = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}"));
            }
            arg if config.root.is_none() => config.root = Some(PathBuf::from(arg)),
            arg => config.documents.push(arg.to_string()),
        }
        i += 1;
    }

    if config.all && config.handler.is_some() {
        return Err("--handler and --all cannot be combined".into());
    }
    let informational = config.show_help || config.show_version || config.list_handlers;
    if config.root.is_none() && !informational {
        return Err("missing document directory (see --help)".into());
    }

    Ok(config)
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings, or debug output with
/// `verbose`. Logs go to stderr.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs a parsed command and returns its report, if a migration ran.
///
/// # Errors
///
/// Returns an error if the document directory cannot be opened or listed,
/// or the confirmation prompt cannot be created.
pub fn run(config: &CliConfig) -> Result<Option<MigrationReport>> {
    if config.show_help {
        print!("{}", help_text());
        return Ok(None);
    }
    if config.show_version {
        println!("reforge {}", env!("CARGO_PKG_VERSION"));
        return Ok(None);
    }

    let registry = HandlerRegistry::builtin();
    if config.list_handlers {
        print!("{}", handler_list(&registry));
        return Ok(None);
    }

    let root = config
        .root
        .as_ref()
        .ok_or_else(|| Error::new(ErrorKind::Internal("no document directory".into())))?;
    let mut ws = Workspace::with_backend(FileBackend::open(root)?);
    let queue = build_queue(&ws, &config.documents)?;

    let mut migrator = Migrator::new(registry).with_config(config.migration_config());
    migrator = if config.assume_yes || config.dry_run {
        migrator.with_confirm(Decision::Proceed)
    } else {
        migrator.with_confirm(PromptConfirm::terminal()?)
    };

    let report = match &config.handler {
        Some(tag) => migrator.migrate(&mut ws, &queue, &ComponentTag::new(tag), config.dry_run),
        None => migrator.migrate_all(&mut ws, &queue, config.dry_run),
    };
    Ok(Some(report))
}

/// Queues the named documents, or every document when none are named.
///
/// Documents that do not exist or cannot be read are reported and skipped.
///
/// # Errors
///
/// Returns an error if the backend cannot be listed.
pub fn build_queue<B: DocumentBackend>(
    ws: &Workspace<B>,
    documents: &[String],
) -> Result<MigrationQueue> {
    let paths = if documents.is_empty() {
        ws.documents()?
    } else {
        documents.to_vec()
    };

    let mut queue = MigrationQueue::new();
    for path in &paths {
        let handle = match ws.backend().read(path) {
            Ok(Some(document)) => match document.kind {
                DocumentKind::Template => Handle::template(path),
                DocumentKind::Aggregate => Handle::aggregate(path),
            },
            Ok(None) => {
                eprintln!("\x1b[33mwarning:\x1b[0m no document at {path}");
                continue;
            }
            Err(err) => {
                tracing::warn!(%path, error = %err, "unreadable document skipped");
                eprintln!("\x1b[33mwarning:\x1b[0m skipping {path}: {err}");
                continue;
            }
        };
        let found = queue.enqueue(ws, &handle);
        tracing::debug!(%handle, found, "document queued");
    }
    Ok(queue)
}

/// Renders the handler list printed by `--list-handlers`.
#[must_use]
pub fn handler_list(registry: &HandlerRegistry) -> String {
    let mut out = String::new();
    for tag in registry.legacy_tags() {
        let Ok(handler) = registry.lookup(&tag) else {
            continue;
        };
        let builtin = if LegacyKind::from_tag(&tag).is_some() {
            ""
        } else {
            " (custom)"
        };
        let confirm = if handler.requires_confirmation() {
            " [confirm]"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{tag} -> {}{confirm}{builtin}",
            handler.replacement_tag()
        );
    }
    out
}

/// Renders a report with ANSI colors, one object per line.
#[must_use]
pub fn render_report(report: &MigrationReport) -> String {
    let mut out = String::new();
    for object in report.objects() {
        let color = match object.outcome {
            Outcome::Migrated(_) => "32",
            Outcome::Planned(_) => "36",
            Outcome::Unchanged => "2",
            Outcome::Skipped | Outcome::Pending => "33",
            Outcome::Failed(_) => "31",
        };
        let _ = write!(
            out,
            "\x1b[{color}m{:>9}\x1b[0m {}",
            object.outcome.label(),
            object.key
        );
        match &object.outcome {
            Outcome::Failed(err) => {
                let _ = writeln!(out, ": {err}");
            }
            outcome => {
                let _ = writeln!(out);
                for replacement in outcome.replacements() {
                    let _ = writeln!(out, "          {replacement}");
                    for change in &replacement.changes {
                        let _ = writeln!(out, "            {change}");
                    }
                }
            }
        }
    }

    let prefix = if report.dry_run { "dry run: " } else { "" };
    let suffix = if report.aborted { " (aborted)" } else { "" };
    let _ = writeln!(out, "\x1b[1m{prefix}{}{suffix}\x1b[0m", report.summary());
    out
}

/// Returns the `--help` text.
#[must_use]
pub fn help_text() -> String {
    format!(
        "\x1b[1mReforge\x1b[0m {} - Migrates deprecated components to their replacements

\x1b[1mUSAGE:\x1b[0m
    reforge [OPTIONS] <DIR> [DOCUMENTS...]

\x1b[1mARGUMENTS:\x1b[0m
    <DIR>             Directory of template and aggregate documents
    [DOCUMENTS...]    Document paths relative to DIR (default: all)

\x1b[1mOPTIONS:\x1b[0m
    --handler <TAG>       Migrate only components with this legacy tag
    -a, --all             Migrate every registered legacy tag (default)
    -n, --dry-run         Report planned changes without writing
    -y, --yes             Apply destructive handlers without asking
    -l, --list-handlers   List registered handlers and exit
    -v, --verbose         Debug logging and field-level change lists
    -h, --help            Print help information
    -V, --version         Print version information

\x1b[1mENVIRONMENT:\x1b[0m
    RUST_LOG              Overrides the log filter (e.g. reforge_engine=debug)

\x1b[1mEXAMPLES:\x1b[0m
    reforge assets                         Migrate every document
    reforge --dry-run -v assets            Show what would change
    reforge --handler OldManip assets a.tpl  Migrate one tag in one template
",
        env!("CARGO_PKG_VERSION")
    )
}
