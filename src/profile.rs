//! Active tablet profile selection.
//!
//! The desktop session knows which tablet profile the user picked (KDE's
//! wacom daemon by default). Its name selects the table entry; anything
//! unknown falls back to the "Default" profile.

use tracing::{debug, instrument};

use crate::config::{Profile, ProfileTable};
use crate::runner::CommandRunner;

/// Ask the desktop session for the active profile name.
///
/// Returns `None` if the query cannot run, exits nonzero, or prints nothing.
#[instrument(skip(runner))]
pub fn query_active_profile(runner: &dyn CommandRunner, query: &[String]) -> Option<String> {
    let (program, args) = query.split_first()?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = match runner.run(program, &args) {
        Ok(output) => output,
        Err(e) => {
            debug!(error = %e, "Profile query could not run");
            return None;
        }
    };
    if !output.is_success() {
        debug!(
            status = ?output.status,
            stderr = %output.stderr.trim(),
            "Profile query failed"
        );
        return None;
    }

    let name = output.stdout.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Pick the table entry for `name`, falling back to "Default".
pub fn select_profile<'t>(table: &'t ProfileTable, name: Option<&str>) -> &'t Profile {
    match name.and_then(|n| table.get(n.trim())) {
        Some(profile) => profile,
        None => {
            debug!(
                requested = ?name,
                "Profile not defined, falling back to '{}'",
                table.default_profile().name
            );
            table.default_profile()
        }
    }
}

/// Query the session and select the matching profile.
pub fn active_profile<'t>(
    runner: &dyn CommandRunner,
    query: &[String],
    table: &'t ProfileTable,
) -> &'t Profile {
    let name = query_active_profile(runner, query);
    let profile = select_profile(table, name.as_deref());
    debug!(
        profile = %profile.name,
        modes = profile.mode_count(),
        "Selected profile"
    );
    profile
}
