//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates options, and runs the selected operation.

use anyhow::{Result, bail};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use pkgfix::cli::{Args, Command};
use pkgfix::output as out;
use pkgfix::{
    CONFIG_ENV_VAR, Config, DirOutcome, PkgfixError, default_config_path, load_config,
    remove_boms, rename_namespace, shutdown,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        out::print_error("No command given. Use `strip-bom` or `rename-namespace` (see --help).");
        bail!("no command given");
    };

    // Config file values first, CLI flags win.
    let mut cfg: Config = load_config().inspect_err(|e| {
        out::print_error(&format!("Failed to load config: {e:#}"));
    })?;
    args.apply_overrides(&mut cfg);

    // Hold the guard so buffered file logs are flushed on exit and on SIGINT.
    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
    })?;
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        if let Err(e) = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file and stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        }) {
            out::print_warn(&format!("Could not install interrupt handler: {e}"));
        }
    }

    debug!("Starting pkgfix: {:?}", args);

    let result = match command {
        Command::StripBom(_) => run_strip_bom(&cfg),
        Command::RenameNamespace(_) => run_rename_namespace(&cfg),
    };

    if let Err(e) = &result {
        log_failure(e);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn run_strip_bom(cfg: &Config) -> Result<()> {
    let opts = cfg.bom_options()?;
    let report = remove_boms(&opts)?;

    out::print_failures(&report.failures);
    if opts.dry_run {
        out::print_summary(&format!("Dry-run: would fix encoding for {} files.", report.fixed_count()));
    } else {
        out::print_summary(&format!("Fixed encoding for {} files.", report.fixed_count()));
    }
    if !report.failures.is_empty() {
        out::print_warn(&format!("{} files could not be processed.", report.failures.len()));
    }
    Ok(())
}

fn run_rename_namespace(cfg: &Config) -> Result<()> {
    let opts = cfg.rename_options()?;
    let report = rename_namespace(&opts)?;

    for dir in &report.dirs {
        match dir {
            DirOutcome::Renamed { from, to } => {
                let verb = if opts.dry_run { "Would rename" } else { "Renamed" };
                out::print_info(&format!("{verb} directory {} to {}", from.display(), to.display()));
            }
            DirOutcome::Missing(from) => {
                out::print_info(&format!("Directory {} not found (maybe already renamed?)", from.display()));
            }
            DirOutcome::Failed { from, message, .. } => {
                out::print_warn(&format!("Could not rename {}: {message}", from.display()));
            }
        }
    }
    out::print_failures(&report.failures);
    let prefix = if opts.dry_run { "Dry-run: would update" } else { "Updated" };
    out::print_summary(&format!("{prefix} {} {} files.", report.updated_count(), opts.extension));
    if !report.failures.is_empty() {
        out::print_warn(&format!("{} files could not be processed.", report.failures.len()));
    }
    Ok(())
}

/// Structured error log with a stable code for the well-known failures.
fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<PkgfixError>() {
        Some(PkgfixError::Interrupted) => {
            error!(code = 130u16, kind = "interrupted", "Aborted by user")
        }
        Some(pe) => {
            error!(code = pe.code(), error = %pe, "Run failed");
            out::print_error(&pe.to_string());
        }
        None => {
            error!(error = ?e, "Run failed");
            out::print_error(&format!("{e:#}"));
        }
    }
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV_VAR) {
        out::print_info(&format!(
            "Using {CONFIG_ENV_VAR} (explicit):\n  {}\n",
            std::path::Path::new(&cfg_env).display()
        ));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default pkgfix config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file there; built-in defaults apply.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}
