//! Integration tests for the main menu loop

mod common;

use common::{group, run_script, test_options, Call, FakeGroupApi};
use okta_groups::ui::actions::{RANDOM_GROUP_DESCRIPTION, RANDOM_GROUP_PREFIX};
use okta_groups::ui::{MAIN_MENU_LABEL, WRONG_CHOICE};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

#[test]
fn test_exit_immediately() {
    let mut api = FakeGroupApi::default();
    let transcript = run_script(&mut api, "exit\n", &test_options());

    assert!(api.calls.is_empty());
    assert_eq!(transcript.stderr.matches(MAIN_MENU_LABEL).count(), 1);
    assert_eq!(transcript.stdout, "");
}

#[test]
fn test_exit_with_surrounding_whitespace() {
    let mut api = FakeGroupApi::default();
    run_script(&mut api, "   exit  \n2\n", &test_options());

    assert!(api.calls.is_empty());
}

#[test]
fn test_invalid_inputs_redisplay_menu() {
    let mut api = FakeGroupApi::default();
    let transcript = run_script(&mut api, "4\nEXIT\n\nhello\nexit\n", &test_options());

    assert!(api.calls.is_empty());
    assert_eq!(transcript.stderr.matches(WRONG_CHOICE).count(), 4);
    assert_eq!(transcript.stderr.matches(MAIN_MENU_LABEL).count(), 5);
}

#[test]
fn test_closed_input_terminates() {
    let mut api = FakeGroupApi::default();
    let transcript = run_script(&mut api, "", &test_options());

    assert!(api.calls.is_empty());
    assert_eq!(transcript.stderr.matches(MAIN_MENU_LABEL).count(), 1);
}

#[test]
fn test_list_scenario() {
    let mut api = FakeGroupApi::with_groups(vec![group("00g1", "Engineering", "Eng team")]);
    let transcript = run_script(&mut api, "2\nexit\n", &test_options());

    assert_eq!(api.calls, vec![Call::List]);
    assert!(transcript.stdout.contains("Status: 200 OK"));
    assert!(transcript.stdout.contains("ID: 00g1"));
    assert!(transcript.stdout.contains("Name: Engineering"));
    assert!(transcript.stdout.contains("Description: Eng team"));
}

#[test]
fn test_list_empty() {
    let mut api = FakeGroupApi::default();
    let transcript = run_script(&mut api, "2\nexit\n", &test_options());

    assert_eq!(api.calls, vec![Call::List]);
    assert!(transcript.stdout.ends_with("Groups:\n"));
    assert!(!transcript.stdout.contains("Error"));
}

#[test]
fn test_list_failure_is_reported_and_loop_continues() {
    let mut api = FakeGroupApi {
        list_failure: Some(StatusCode::UNAUTHORIZED),
        ..Default::default()
    };
    let transcript = run_script(&mut api, "2\n2\nexit\n", &test_options());

    assert_eq!(api.calls, vec![Call::List, Call::List]);
    assert_eq!(transcript.stdout.matches("Error: 401 Unauthorized").count(), 2);
    assert_eq!(transcript.stderr.matches(MAIN_MENU_LABEL).count(), 3);
}

#[test]
fn test_create_random_group() {
    let mut api = FakeGroupApi::default();
    let transcript = run_script(&mut api, "1\nexit\n", &test_options());

    assert_eq!(api.calls.len(), 1);
    let Call::Create(profile) = &api.calls[0] else {
        panic!("expected a create call, got {:?}", api.calls[0]);
    };
    let n: u32 = profile
        .name
        .strip_prefix(RANDOM_GROUP_PREFIX)
        .unwrap()
        .parse()
        .unwrap();
    assert!(n < 1_000_000);
    assert_eq!(profile.description.as_deref(), Some(RANDOM_GROUP_DESCRIPTION));

    assert!(transcript.stdout.contains("Okta Response Status: 200 OK"));
    assert!(transcript.stdout.contains(&format!("\"name\": \"{}\"", profile.name)));
}

#[test]
fn test_create_names_follow_session_seed() {
    let mut first = FakeGroupApi::default();
    let mut second = FakeGroupApi::default();
    run_script(&mut first, "1\n1\nexit\n", &test_options());
    run_script(&mut second, "1\n1\nexit\n", &test_options());

    assert_eq!(first.calls, second.calls);
}

#[test]
fn test_create_then_list_shows_new_group() {
    let mut api = FakeGroupApi::default();
    let transcript = run_script(&mut api, "1\n2\nexit\n", &test_options());

    assert_eq!(api.groups.len(), 1);
    assert!(transcript.stdout.contains("ID: 00gNEW1"));
}

#[test]
fn test_create_failure_is_reported_and_loop_continues() {
    let mut api = FakeGroupApi {
        create_failure: Some(StatusCode::INTERNAL_SERVER_ERROR),
        ..Default::default()
    };
    let transcript = run_script(&mut api, "1\n2\nexit\n", &test_options());

    assert_eq!(api.calls.len(), 2);
    assert_eq!(api.calls[1], Call::List);
    assert!(api.groups.is_empty());
    assert!(transcript
        .stdout
        .contains(&format!("Error: 500 Internal Server Error - {}\n", common::ERROR_BODY)));
    assert!(!transcript.stdout.contains("OKTA GROUP:CREATE RESPONSE"));
    assert!(transcript.stdout.contains("OKTA GROUPS:LIST RESPONSE"));
    assert_eq!(transcript.stderr.matches(MAIN_MENU_LABEL).count(), 3);
}
