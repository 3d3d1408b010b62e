//! Scan command handlers.

use tabled::Tabled;

use netdex_core::{DiscoveryRow, Inventory, ScanId, ScanSummary};

use crate::cli::{GlobalOpts, ScansArgs, ScansCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ScanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Finished")]
    finished: String,
}

impl ScanRow {
    fn new(s: &ScanSummary) -> Self {
        Self {
            id: s.id.to_string(),
            started: s.started_at.map_or_else(|| "-".into(), output::ago),
            finished: s.finished_at.map_or_else(|| "running".into(), output::ago),
        }
    }
}

#[derive(Tabled)]
struct DiscoveryTableRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Role")]
    primary: &'static str,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "IP")]
    ip: String,
}

impl DiscoveryTableRow {
    fn new(r: &DiscoveryRow) -> Self {
        Self {
            device: r.device_id.to_string(),
            name: output::or_dash(r.name.as_deref()),
            mac: r
                .mac_address
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string),
            owner: output::or_dash(r.owner_name.as_deref()),
            primary: output::primary_label(r.is_primary),
            hostname: output::or_dash(r.hostname.as_deref()),
            ip: output::or_dash(r.ip_address.as_deref()),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: ScansArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ScansCommand::List => {
            let scans = inventory.scans().await?;
            let out = output::render_list(&global.output, &scans, ScanRow::new, |s| {
                s.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ScansCommand::Show { scan } => {
            let id: ScanId = util::parse_id("scan", &scan)?;
            let scan = inventory.scan(id).await?;

            let joiner = inventory.discovery_joiner();
            joiner.load(&scan).await?;
            let rows = joiner.rows();

            let out = output::render_list(
                &global.output,
                &rows,
                DiscoveryTableRow::new,
                |r| r.device_id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
