// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn only_entry(automation: &FakeAutomation) -> FakeEntry {
    let mut entries: Vec<_> = automation.entries().unwrap().collect();
    assert_eq!(entries.len(), 1);
    entries.remove(0)
}

#[test]
fn fake_filter_guards_nest_and_restore() {
    let automation = FakeAutomation::new();
    let outer_policy = RetryPolicy::default();
    let inner_policy = RetryPolicy::new(
        std::time::Duration::from_millis(10),
        std::time::Duration::from_millis(20),
    );

    let outer = automation.install_retry_filter(outer_policy).unwrap();
    {
        let _inner = automation.install_retry_filter(inner_policy).unwrap();
        assert_eq!(automation.filter_depth(), 2);
        assert_eq!(automation.active_policy(), Some(inner_policy));
    }
    assert_eq!(automation.filter_depth(), 1);
    assert_eq!(automation.active_policy(), Some(outer_policy));
    drop(outer);
    assert_eq!(automation.filter_depth(), 0);

    assert_eq!(
        automation.calls(),
        vec![
            AutomationCall::InstallFilter { depth: 1 },
            AutomationCall::InstallFilter { depth: 2 },
            AutomationCall::RestoreFilter { depth: 1 },
            AutomationCall::RestoreFilter { depth: 0 },
        ]
    );
}

#[test]
fn fake_editor_calls_are_rejected_without_filter() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(10).with_executable("/vs/devenv.exe"));

    let editor = only_entry(&automation).bind().unwrap();
    assert!(matches!(editor.full_name(), Err(AutomationError::Busy)));

    let _filter = automation.install_retry_filter(RetryPolicy::default()).unwrap();
    assert_eq!(editor.full_name().unwrap(), "/vs/devenv.exe");
}

#[test]
fn fake_instance_registers_after_scans() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(10).registered_after(2));

    assert_eq!(automation.entries().unwrap().count(), 0);
    assert_eq!(automation.entries().unwrap().count(), 0);
    assert_eq!(automation.entries().unwrap().count(), 1);
    assert_eq!(automation.scans(), 3);
}

#[test]
fn fake_directory_can_be_unavailable() {
    let automation = FakeAutomation::new();
    automation.set_directory_unavailable(true);
    assert!(automation.entries().is_err());
}

#[test]
fn fake_solution_opens_after_scripted_polls() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(10).opens_after(2));
    let _filter = automation.install_retry_filter(RetryPolicy::default()).unwrap();

    let solution = only_entry(&automation).bind().unwrap().solution().unwrap();
    assert!(!solution.is_open().unwrap());
    assert!(!solution.is_open().unwrap());
    assert!(solution.is_open().unwrap());
    assert_eq!(automation.open_polls(10), 3);
}

#[test]
fn fake_solution_unavailable_for_scripted_requests() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(10).solution_unavailable_for(1));
    let _filter = automation.install_retry_filter(RetryPolicy::default()).unwrap();

    let editor = only_entry(&automation).bind().unwrap();
    assert!(editor.solution().is_err());
    assert!(editor.solution().is_ok());
}

#[test]
fn fake_open_file_records_path_and_view_kind() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(10));
    let _filter = automation.install_retry_filter(RetryPolicy::default()).unwrap();

    let editor = only_entry(&automation).bind().unwrap();
    let window = editor
        .item_operations()
        .unwrap()
        .open_file(Path::new("/src/Player.cs"), "{kind}")
        .unwrap();
    assert!(window.is_some());
    assert!(automation.calls().contains(&AutomationCall::OpenFile {
        pid: 10,
        path: PathBuf::from("/src/Player.cs"),
        view_kind: "{kind}".to_string(),
    }));
}
