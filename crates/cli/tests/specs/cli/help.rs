//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_shows_usage_and_exits_zero() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("<INSTALLATION_PATH>")
        .stdout_has("<SOLUTION_PATH>");
}

#[test]
fn version_exits_zero() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has(concat!("vsopen ", env!("CARGO_PKG_VERSION")));
}
