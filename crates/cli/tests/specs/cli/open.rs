//! Open request specs
//!
//! Driving Visual Studio needs COM, so off Windows a well-formed request
//! fails after logging what it would open.

use crate::prelude::*;

#[cfg(not(windows))]
#[test]
fn automation_unavailable_off_windows() {
    let project = Project::game();
    project
        .vsopen()
        .args(&["devenv.exe", "Game.sln", "Assets/Player.cs", "12"])
        .fails()
        .code(1)
        .stderr_has("Error: Visual Studio automation is only available on Windows")
        .stdout_has("opening")
        .stdout_lacks("displayProgressBar");
}

#[cfg(not(windows))]
#[test]
fn solution_only_request_reaches_automation() {
    let project = Project::game();
    project
        .vsopen()
        .args(&["", "Game.sln"])
        .fails()
        .code(1)
        .stderr_has("only available on Windows")
        .stderr_lacks("wrong number of arguments");
}

#[cfg(not(windows))]
#[test]
fn logging_is_quiet_at_warn_level() {
    let project = Project::game();
    let run = project
        .vsopen()
        .args(&["devenv.exe", "Game.sln"])
        .env("RUST_LOG", "warn")
        .command()
        .output()
        .unwrap();
    assert!(!String::from_utf8_lossy(&run.stdout).contains("opening"));
}
