// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use vsopen_adapters::{AutomationCall, FakeAutomation, FakeInstance};

#[test]
fn find_by_process_id_picks_matching_pid() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(100));
    automation.add_instance(FakeInstance::new(200));

    let editor = find_by_process_id(&automation, RetryPolicy::default(), 200).unwrap();

    assert_eq!(editor.pid(), 200);
}

#[test]
fn find_by_process_id_misses_unknown_pid() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(100));

    assert!(find_by_process_id(&automation, RetryPolicy::default(), 300).is_none());
}

#[test]
fn foreign_registrations_are_never_bound() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(100).with_identity("!Excel.Application:100"));
    automation.add_instance(FakeInstance::new(200));

    let editor = find_instance(&automation, RetryPolicy::default(), IdentityFilter::any(), |_| true)
        .unwrap();

    assert_eq!(editor.pid(), 200);
    let binds: Vec<_> = automation
        .calls()
        .into_iter()
        .filter(|c| matches!(c, AutomationCall::Bind { .. }))
        .collect();
    assert_eq!(
        binds,
        vec![AutomationCall::Bind {
            identity: "!VisualStudio.DTE.17.0:200".to_string()
        }]
    );
}

#[test]
fn first_accepted_instance_wins() {
    let automation = FakeAutomation::new();
    for pid in [1, 2, 3] {
        automation.add_instance(FakeInstance::new(pid));
    }

    let mut seen = Vec::new();
    let editor = find_instance(&automation, RetryPolicy::default(), IdentityFilter::any(), |e| {
        seen.push(e.pid());
        e.pid() >= 2
    })
    .unwrap();

    assert_eq!(editor.pid(), 2);
    assert_eq!(seen, vec![1, 2]);
}

#[test]
fn filter_is_active_during_predicate_and_restored_after() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(1));

    let mut depth_seen = 0;
    find_instance(&automation, RetryPolicy::default(), IdentityFilter::any(), |_| {
        depth_seen = automation.filter_depth();
        false
    });

    assert_eq!(depth_seen, 1);
    assert_eq!(automation.filter_depth(), 0);
}

#[test]
fn unavailable_directory_is_not_found() {
    let automation = FakeAutomation::new();
    automation.add_instance(FakeInstance::new(1));
    automation.set_directory_unavailable(true);

    assert!(find_by_process_id(&automation, RetryPolicy::default(), 1).is_none());
    assert_eq!(automation.filter_depth(), 0);
}
