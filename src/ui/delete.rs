// Delete sub-flow: list the groups, let the operator pick one by its ordinal,
// confirm, then delete it.

use super::{with_spinner, Console, LoopOptions};
use crate::api::{Group, GroupApi};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::thread;
use tracing::{debug, info};

const SELECT_GROUP: &str =
    "\n\nWhich group would you like to delete? Make a valid choice and press <Enter>\n\n";
const ABANDON_HINT: &str = "\n\nType <exit> to abandon\n\n";
pub const WRONG_GROUP_CHOICE: &str =
    "\n\nSorry, but you didn't enter a valid choice! The prompt will be displayed again.\n\n";

/// Maps the ordinals shown in the delete prompt to group ids. Lives only for
/// one run of the sub-flow.
#[derive(Debug, Default)]
pub struct SelectionIndex {
    ids: HashMap<String, String>,
    listing: String,
}

impl SelectionIndex {
    pub fn from_groups(groups: &[Group]) -> Self {
        let mut ids = HashMap::with_capacity(groups.len());
        let mut entries = Vec::with_capacity(groups.len());
        for (i, group) in groups.iter().enumerate() {
            ids.insert(i.to_string(), group.id.clone());
            entries.push(format!(
                "{}) Name: {}\nID:{}\nDescription:{}",
                i,
                group.name(),
                group.id,
                group.description()
            ));
        }
        SelectionIndex {
            ids,
            listing: entries.join("\n\n"),
        }
    }

    /// Group id for an exactly matching ordinal key.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.ids.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Numbered listing shown above the prompt.
    pub fn listing(&self) -> &str {
        &self.listing
    }
}

pub fn confirmation_prompt(id: &str) -> String {
    format!(
        "\n\nYou've chosen to delete the group with id {} - are you sure? y/n\n",
        id
    )
}

/// Fetch the groups, prompt for one and delete it after confirmation.
/// Returns to the main menu after one deletion attempt, on `exit`, or when
/// the groups could not be listed.
pub fn delete_group_selector<A, R, O, E>(
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
    let groups = match with_spinner(options, "Fetching groups...", || api.list_groups()) {
        Ok(response) => response.body,
        Err(e) => {
            console.prompt("there was an error retrieving groups\n")?;
            return console.report(&format!("Error: {}\n", e));
        }
    };
    let index = SelectionIndex::from_groups(&groups);
    debug!(groups = index.len(), "built selection index");

    loop {
        console.prompt(&format!("{}{}{}", index.listing(), SELECT_GROUP, ABANDON_HINT))?;
        let Some(choice) = console.read_line()? else {
            debug!("input closed, abandoning delete");
            return Ok(());
        };

        if let Some(id) = index.resolve(&choice) {
            if confirmed(console, id, options)? {
                delete_group(api, console, id, options)?;
            } else {
                debug!(id, "delete not confirmed");
            }
            return Ok(());
        } else if choice == "exit" {
            return Ok(());
        } else {
            console.prompt(WRONG_GROUP_CHOICE)?;
            thread::sleep(options.retry_pause);
        }
    }
}

/// Only an exact `y` confirms.
fn confirmed<R, O, E>(
    console: &mut Console<R, O, E>,
    id: &str,
    options: &LoopOptions,
) -> io::Result<bool>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    if !options.confirm_delete {
        return Ok(true);
    }
    console.prompt(&confirmation_prompt(id))?;
    Ok(console.read_line()?.as_deref() == Some("y"))
}

fn delete_group<A, R, O, E>(
    api: &mut A,
    console: &mut Console<R, O, E>,
    id: &str,
    options: &LoopOptions,
) -> io::Result<()>
where
    A: GroupApi,
    R: BufRead,
    O: Write,
    E: Write,
{
    let header = "\n\n********** OKTA GROUP:DELETE RESPONSE **************\n\n";
    match with_spinner(options, "Deleting group...", || api.delete_group(id)) {
        Ok(StatusCode::NO_CONTENT) => {
            info!(id, "group deleted");
            console.report(&format!("{}deleted group with id {}\n", header, id))
        }
        Ok(status) => {
            debug!(id, %status, "unexpected delete status");
            console.report(&format!("{}error deleting group with id {}\n", header, id))
        }
        Err(e) => console.report(&format!("{}Error: {}\n", header, e)),
    }
}
