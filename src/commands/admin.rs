use crate::*;
use std::path::Path;

/// Operator commands that only touch the persisted state and the
/// maintenance switch. Returns `Ok(false)` when the command belongs to
/// the runtime handler instead.
pub fn handle_gate_commands(
    cli: &Cli,
    cfg: &SiteConfig,
    state: &mut State,
    root: &Path,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Maintenance => {
            let m = fetch_maintenance(root, cfg);
            let decision = decide(&m, state.maintenance_bypass);
            let report = MaintenanceReport {
                enabled: decision.enabled,
                bypassed: decision.bypassed,
                blocked: decision.blocked(),
                message: m.message,
                available_at: m.available_at,
            };
            print_one(cli.json, report, |r| {
                format!(
                    "enabled={} bypassed={} blocked={}",
                    r.enabled, r.bypassed, r.blocked
                )
            })?;
        }
        Commands::Bypass { command } => match command {
            BypassCommands::Set => {
                state.maintenance_bypass = true;
                save_state(state)?;
                audit("bypass_set", serde_json::json!({"via": "command"}));
                print_one(cli.json, "set", |_| "maintenance bypass set".to_string())?;
            }
            BypassCommands::Clear => {
                state.maintenance_bypass = false;
                save_state(state)?;
                audit("bypass_clear", serde_json::json!({"via": "command"}));
                print_one(cli.json, "cleared", |_| {
                    "maintenance bypass cleared".to_string()
                })?;
            }
            BypassCommands::Status => {
                let status = BypassStatus {
                    maintenance_bypass: state.maintenance_bypass,
                };
                print_one(cli.json, status, |s| {
                    format!("maintenance_bypass={}", s.maintenance_bypass)
                })?;
            }
        },
        _ => return Ok(false),
    }

    Ok(true)
}
