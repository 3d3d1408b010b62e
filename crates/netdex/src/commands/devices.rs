//! Device command handlers.

use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use netdex_core::{
    Device, DeviceId, DeviceSummary, FieldChange, Inventory, PersonId, PersonSummary, owner_label,
};

use crate::cli::{DevicesArgs, DevicesCommand, EditDeviceArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Role")]
    primary: &'static str,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

impl DeviceRow {
    pub(super) fn new(d: &DeviceSummary, people: &[PersonSummary]) -> Self {
        Self {
            id: d.id.to_string(),
            name: output::or_dash(Some(d.name.as_str())),
            mac: d.mac_address.to_string(),
            owner: owner_label(d.owner_id, people).to_owned(),
            primary: output::primary_label(d.is_primary),
            last_seen: output::ago(d.last_seen),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct DeviceDetail {
    #[serde(flatten)]
    device: Device,
    vendor: String,
    owner_name: Option<String>,
}

fn detail(d: &DeviceDetail) -> String {
    let dev = &d.device;
    [
        format!("ID:         {}", dev.id),
        format!("Name:       {}", output::or_dash(Some(dev.name.as_str()))),
        format!("MAC:        {}", dev.mac_address),
        format!("Vendor:     {}", output::or_dash(Some(d.vendor.as_str()))),
        format!("Owner:      {}", owner_display(d)),
        format!("Role:       {}", output::primary_label(dev.is_primary)),
        format!("Note:       {}", output::or_dash(Some(dev.note.as_str()))),
        format!(
            "First seen: {} ({})",
            dev.first_seen.format("%Y-%m-%d %H:%M UTC"),
            output::ago(dev.first_seen)
        ),
        format!(
            "Last seen:  {} ({})",
            dev.last_seen.format("%Y-%m-%d %H:%M UTC"),
            output::ago(dev.last_seen)
        ),
    ]
    .join("\n")
}

fn owner_display(d: &DeviceDetail) -> String {
    match (&d.owner_name, d.device.owner_id) {
        (Some(name), _) => name.clone(),
        (None, Some(id)) => format!("#{id}"),
        (None, None) => netdex_core::UNASSIGNED_LABEL.into(),
    }
}

fn owner_name(owner: Option<PersonId>, people: &[PersonSummary]) -> Option<String> {
    let id = owner?;
    people.iter().find(|p| p.id == id).map(|p| p.name.clone())
}

/// People are only needed to label the owner column in tables.
async fn people_for_table(
    inventory: &Inventory,
    format: &OutputFormat,
) -> Result<Vec<PersonSummary>, CliError> {
    if matches!(format, OutputFormat::Table) {
        Ok(inventory.people().await?)
    } else {
        Ok(Vec::new())
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List { owner } => {
            let owner = owner
                .map(|o| util::parse_id::<PersonId>("owner", &o))
                .transpose()?;
            list(inventory, owner, global).await
        }

        DevicesCommand::Get { device } => {
            let id: DeviceId = util::parse_id("device", &device)?;
            let device = inventory.device(id).await?;
            let vendor = inventory.vendor(&device.mac_address).await;
            let people = inventory.people().await?;

            let view = DeviceDetail {
                owner_name: owner_name(device.owner_id, &people),
                device,
                vendor,
            };
            let out = output::render_single(&global.output, &view, detail, |d| {
                d.device.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Edit(edit) => handle_edit(inventory, edit, global).await,
    }
}

/// Shared by `devices list` and `people devices`.
pub(super) async fn list(
    inventory: &Inventory,
    owner: Option<PersonId>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let projection = inventory.device_list();
    projection.load(owner).await?;
    let devices = projection.devices().unwrap_or_default();
    let people = people_for_table(inventory, &global.output).await?;

    let out = output::render_list(
        &global.output,
        devices.as_slice(),
        |d| DeviceRow::new(d, &people),
        |d| d.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn handle_edit(
    inventory: &Inventory,
    edit: EditDeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id: DeviceId = util::parse_id("device", &edit.device)?;
    let owner = edit
        .owner
        .as_deref()
        .map(|o| util::parse_id::<PersonId>("owner", o))
        .transpose()?;

    let mut session = inventory.edit_session(id).await?;

    if let Some(name) = edit.name {
        session.set_field(FieldChange::Name(name));
    }
    if let Some(note) = edit.note {
        session.set_field(FieldChange::Note(note));
    }
    if let Some(owner) = owner {
        session.set_field(FieldChange::Owner(Some(owner)));
    } else if edit.unassign {
        session.set_field(FieldChange::Owner(None));
    }
    if let Some(primary) = edit.primary {
        session.set_field(FieldChange::Primary(primary));
    }

    if !session.is_dirty() {
        return Err(CliError::Validation {
            field: "edit".into(),
            reason: "nothing to change; pass --name, --note, --owner, --unassign or --primary"
                .into(),
        });
    }
    if !session.can_commit() {
        return Err(CliError::Validation {
            field: "primary".into(),
            reason: format!(
                "device #{id} has never been classified; pass --primary true or --primary false"
            ),
        });
    }

    let updated = inventory.commit(&mut session).await?;

    // The update is applied; a failed owner-name read only blanks the label.
    let people = inventory.people().await.unwrap_or_else(|e| {
        warn!(error = %e, "owner lookup after update failed");
        Vec::new()
    });

    let view = DeviceDetail {
        owner_name: owner_name(updated.owner_id, &people),
        device: updated.as_ref().clone(),
        vendor: String::new(),
    };
    let out = output::render_single(&global.output, &view, detail, |d| d.device.id.to_string());
    output::print_output(&out, global.quiet);
    Ok(())
}
