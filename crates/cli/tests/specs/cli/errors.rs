//! CLI argument error specs
//!
//! Wrong argument counts print the count, the usage line and every argument
//! received, then exit 1.

use crate::prelude::*;

#[test]
fn no_arguments_is_rejected() {
    cli()
        .fails()
        .code(1)
        .stderr_has("1: wrong number of arguments\n")
        .stderr_has(USAGE)
        .stdout_eq("");
}

#[test]
fn missing_solution_is_rejected() {
    cli()
        .args(&["devenv.exe"])
        .fails()
        .code(1)
        .stderr_has("2: wrong number of arguments\n")
        .stderr_has(&format!("{USAGE}\n"))
        .stderr_has("\ndevenv.exe\n");
}

#[test]
fn file_without_line_is_rejected() {
    cli()
        .args(&["devenv.exe", "Game.sln", "Player.cs"])
        .fails()
        .code(1)
        .stderr_has("4: wrong number of arguments\n")
        .stderr_has("\ndevenv.exe\nGame.sln\nPlayer.cs\n");
}

#[test]
fn extra_argument_is_rejected() {
    cli()
        .args(&["devenv.exe", "Game.sln", "Player.cs", "10", "extra"])
        .fails()
        .code(1)
        .stderr_has("6: wrong number of arguments\n")
        .stderr_has("\nextra\n");
}

#[test]
fn non_numeric_line_is_rejected() {
    cli()
        .args(&["devenv.exe", "Game.sln", "Player.cs", "ten"])
        .fails()
        .code(1)
        .stderr_has("invalid line number\n")
        .stderr_has(USAGE)
        .stderr_lacks("wrong number of arguments");
}

#[test]
fn empty_solution_is_an_argument_error() {
    cli()
        .args(&["devenv.exe", ""])
        .fails()
        .code(1)
        .stderr_has("Error: invalid arguments")
        .stderr_has("solution path is empty")
        .stderr_lacks("wrong number of arguments");
}
