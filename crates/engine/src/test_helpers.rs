// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use vsopen_adapters::{FakeAutomation, FakeLauncher, FakeProgress};
use vsopen_core::{FakeClock, FileTarget, TargetRequest};

use crate::{Opener, Timeouts};

/// Pid the fake launcher hands out for new Visual Studio processes.
pub(crate) const LAUNCHED_PID: u32 = 7000;

/// Fakes plus a project directory with real files, so path equivalence works.
pub(crate) struct TestContext {
    pub automation: FakeAutomation,
    pub launcher: FakeLauncher,
    pub clock: FakeClock,
    pub progress: FakeProgress,
    pub devenv: PathBuf,
    pub other_devenv: PathBuf,
    pub solution: PathBuf,
    pub other_solution: PathBuf,
    pub source_file: PathBuf,
    _dir: TempDir,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        Self::with_launcher(FakeLauncher::with_pid(LAUNCHED_PID))
    }

    pub(crate) fn with_launcher(launcher: FakeLauncher) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let touch = |relative: &str| {
            let path = dir.path().join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "").unwrap();
            path
        };
        Self {
            automation: FakeAutomation::new(),
            launcher,
            clock: FakeClock::new(),
            progress: FakeProgress::new(),
            devenv: touch("VS2022/Common7/IDE/devenv.exe"),
            other_devenv: touch("VS2019/Common7/IDE/devenv.exe"),
            solution: touch("Game/Game.sln"),
            other_solution: touch("Other/Other.sln"),
            source_file: touch("Game/Assets/Player.cs"),
            _dir: dir,
        }
    }

    /// Request for the game solution with the default installation.
    pub(crate) fn request(&self, file: Option<FileTarget>) -> TargetRequest {
        TargetRequest {
            executable: Some(self.devenv.clone()),
            solution: self.solution.clone(),
            file,
        }
    }

    pub(crate) fn file_at(&self, line: i32) -> FileTarget {
        FileTarget {
            path: self.source_file.clone(),
            line,
        }
    }

    pub(crate) fn opener(
        &self,
    ) -> Opener<'_, FakeAutomation, FakeLauncher, FakeClock, FakeProgress> {
        Opener::new(
            &self.automation,
            &self.launcher,
            &self.clock,
            &self.progress,
            Timeouts::default(),
        )
    }
}

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a closure with tracing output captured at the CLI's default `info` level
pub(crate) fn with_tracing<T>(f: impl FnOnce() -> T) -> (String, T) {
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (logs.contents(), result)
}
