// Create and List menu actions.

use super::{with_spinner, Console, LoopOptions};
use crate::api::{ApiResponse, Group, GroupApi, GroupProfile};
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::info;

pub const RANDOM_GROUP_PREFIX: &str = "Random Group ";
pub const RANDOM_GROUP_DESCRIPTION: &str = "Random Group Generation for Demo";

/// Exclusive upper bound of the number in a random group name.
pub const RANDOM_GROUP_BOUND: u32 = 1_000_000;

/// Profile of a demo group named `Random Group <n>`, `0 <= n < 1_000_000`.
pub fn random_group_profile<G: Rng + ?Sized>(rng: &mut G) -> GroupProfile {
    let n = rng.gen_range(0..RANDOM_GROUP_BOUND);
    GroupProfile {
        name: format!("{}{}", RANDOM_GROUP_PREFIX, n),
        description: Some(RANDOM_GROUP_DESCRIPTION.to_string()),
    }
}

pub fn format_create_report(response: &ApiResponse<Group>) -> String {
    let profile = serde_json::to_string_pretty(&response.body.profile)
        .unwrap_or_else(|e| format!("error formatting group profile: {}", e));
    format!(
        "\n\n********** OKTA GROUP:CREATE RESPONSE **************\n\nOkta Response Status: {}\nOkta Group:\n{}",
        response.status, profile
    )
}

pub fn format_list_report(response: &ApiResponse<Vec<Group>>) -> String {
    let mut report = format!(
        "\n\n********** OKTA GROUPS:LIST RESPONSE **************\n\nStatus: {}\nGroups:\n",
        response.status
    );
    for group in &response.body {
        report.push_str(&format!(
            "\nID: {}\nName: {}\nDescription: {}\n",
            group.id,
            group.name(),
            group.description()
        ));
    }
    report
}

/// Create a randomly named group and print the result.
pub fn create_random_group<A, G, R, O, E>(
    api: &mut A,
    console: &mut Console<R, O, E>,
    rng: &mut G,
    options: &LoopOptions,
) -> io::Result<()>
where
    A: GroupApi,
    G: Rng + ?Sized,
    R: BufRead,
    O: Write,
    E: Write,
{
    let profile = random_group_profile(rng);
    match with_spinner(options, "Creating group...", || api.create_group(&profile)) {
        Ok(response) => {
            info!(id = %response.body.id, name = %response.body.name(), "group created");
            console.report(&format_create_report(&response))
        }
        Err(e) => console.report(&format!("Error: {}\n", e)),
    }
}

/// List the first page of groups.
pub fn list_groups<A, R, O, E>(
    api: &mut A,
    console: &mut Console<R, O, E>,
    options: &LoopOptions,
) -> io::Result<()>
where
    A: GroupApi,
    R: BufRead,
    O: Write,
    E: Write,
{
    match with_spinner(options, "Fetching groups...", || api.list_groups()) {
        Ok(response) => console.report(&format_list_report(&response)),
        Err(e) => console.report(&format!("Error: {}\n", e)),
    }
}
