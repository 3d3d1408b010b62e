//! People command handlers.

use tabled::Tabled;

use netdex_core::{Inventory, PersonId, PersonSummary, owner_choices};

use crate::cli::{GlobalOpts, PeopleArgs, PeopleCommand};
use crate::error::CliError;
use crate::output;

use super::{devices, util};

#[derive(Tabled)]
struct PersonRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl PersonRow {
    fn new(p: &PersonSummary) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
        }
    }
}

pub async fn handle(
    inventory: &Inventory,
    args: PeopleArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PeopleCommand::List => {
            let people = owner_choices(&inventory.people().await?);
            let out = output::render_list(
                &global.output,
                &people,
                PersonRow::new,
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PeopleCommand::Devices { person } => {
            let id: PersonId = util::parse_id("person", &person)?;
            devices::list(inventory, Some(id), global).await
        }
    }
}
