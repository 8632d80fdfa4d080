//! touchring - cycle Wacom touchring modes.
//!
//! Each run advances the touchring to the next mode of the active tablet
//! profile, updates the mode LED and rebinds the ring on every pad.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use touchring::cli::{Cli, Commands, CompletionsArgs, InitArgs};
use touchring::config::{self, Settings};
use touchring::discovery::discover_devices;
use touchring::error::Result;
use touchring::led::{LedFile, LedLocator};
use touchring::logging::build_dispatch;
use touchring::output::{select_output, Output};
use touchring::runner::SystemRunner;
use touchring::toggle::Toggler;
use touchring::VERSION;

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("touchring {VERSION}");
        return;
    }

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let dispatch = build_dispatch(cli.log_options());
    let output = select_output(cli.quiet, cli.json);

    let code = tracing::dispatcher::with_default(&dispatch, || match run(&cli, output.as_ref()) {
        Ok(()) => 0,
        Err(e) => {
            debug!(error = ?e, exit_code = e.exit_code(), "Fatal error");
            output.error(&e);
            e.exit_code()
        }
    });

    std::process::exit(code);
}

fn run(cli: &Cli, output: &dyn Output) -> Result<()> {
    match &cli.command {
        None | Some(Commands::Toggle) => cmd_toggle(cli, output),
        Some(Commands::Status) => cmd_status(cli, output),
        Some(Commands::Devices) => cmd_devices(cli, output),
        Some(Commands::CheckConfig) => cmd_check_config(cli, output),
        Some(Commands::Init(args)) => cmd_init(cli, args, output),
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

// === Command Implementations ===

fn cmd_toggle(cli: &Cli, output: &dyn Output) -> Result<()> {
    let settings = load_settings(cli)?;
    let led = led_file(cli, &settings)?;

    let runner = SystemRunner::new();
    let report = Toggler::new(&runner, &settings)
        .dry_run(cli.dry_run)
        .toggle(&led)?;

    output.toggled(&report);
    Ok(())
}

fn cmd_status(cli: &Cli, output: &dyn Output) -> Result<()> {
    let settings = load_settings(cli)?;
    let led = led_file(cli, &settings)?;

    let runner = SystemRunner::new();
    let report = Toggler::new(&runner, &settings).status(&led)?;

    output.status(&report);
    Ok(())
}

fn cmd_devices(cli: &Cli, output: &dyn Output) -> Result<()> {
    let settings = load_settings(cli)?;
    let devices = discover_devices(&SystemRunner::new(), &settings.commands.xsetwacom);
    output.devices(&devices);
    Ok(())
}

fn cmd_check_config(cli: &Cli, output: &dyn Output) -> Result<()> {
    let settings = load_settings(cli)?;
    output.config(&settings);
    Ok(())
}

fn cmd_init(cli: &Cli, args: &InitArgs, output: &dyn Output) -> Result<()> {
    let path: PathBuf = match args.path.as_ref().or(cli.config.as_ref()) {
        Some(path) => config::expand_home(path)?,
        None => config::default_config_path()?,
    };

    config::init_config(&path, args.force)?;
    output.initialized(&path);
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "touchring", &mut io::stdout());
    Ok(())
}

// === Utility Functions ===

/// Load and validate the profile table before touching any device.
fn load_settings(cli: &Cli) -> Result<Settings> {
    let settings = config::resolve_settings(cli.config.as_deref())?;
    debug!(source = %settings.source, profiles = settings.table.len(), "Profiles loaded");
    Ok(settings)
}

/// The LED file from the command line, the config file, or a sysfs search.
fn led_file(cli: &Cli, settings: &Settings) -> Result<LedFile> {
    if let Some(path) = &cli.led_file {
        return Ok(LedFile::new(config::expand_home(path)?));
    }
    if let Some(path) = &settings.led_file {
        return Ok(LedFile::new(path));
    }
    let locator = match &cli.sysfs_root {
        Some(root) => LedLocator::at_root(root),
        None => LedLocator::system(),
    };
    LedFile::locate(&locator)
}
