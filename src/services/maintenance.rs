use chrono::Utc;
use std::path::Path;
use std::time::Duration;

use crate::content::{is_remote, resolve_path};
use crate::domain::models::{MaintenanceConfig, SiteConfig};

#[derive(Debug, Clone, Copy)]
pub struct MaintenanceDecision {
    pub enabled: bool,
    pub bypassed: bool,
}

impl MaintenanceDecision {
    pub fn blocked(&self) -> bool {
        self.enabled && !self.bypassed
    }
}

pub fn decide(cfg: &MaintenanceConfig, bypass: bool) -> MaintenanceDecision {
    MaintenanceDecision {
        enabled: cfg.enabled,
        bypassed: bypass,
    }
}

/// Append a timestamp parameter so intermediaries never serve a stale
/// copy of the switch document.
pub fn cache_busted(url: &str, ts_ms: i64) -> String {
    if url.contains('?') {
        format!("{url}&ts={ts_ms}")
    } else {
        format!("{url}?ts={ts_ms}")
    }
}

/// Fetch the maintenance switch. Always a fresh read; there is no cache
/// fallback here, and any fetch or parse failure means "not in
/// maintenance" so an unreachable switch never takes the site down.
pub fn fetch_maintenance(root: &Path, cfg: &SiteConfig) -> MaintenanceConfig {
    load_fresh(root, &cfg.maintenance).unwrap_or_default()
}

fn load_fresh(root: &Path, source: &str) -> anyhow::Result<MaintenanceConfig> {
    let raw = if is_remote(source) {
        let url = cache_busted(source, Utc::now().timestamp_millis());
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(2500))
            .build()?;
        client
            .get(url)
            .header("Cache-Control", "no-store")
            .send()?
            .error_for_status()?
            .text()?
    } else {
        std::fs::read_to_string(resolve_path(root, source))?
    };
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_only_when_enabled_and_not_bypassed() {
        let enabled = MaintenanceConfig {
            enabled: true,
            ..MaintenanceConfig::default()
        };
        let disabled = MaintenanceConfig::default();

        assert!(decide(&enabled, false).blocked());
        assert!(!decide(&enabled, true).blocked());
        assert!(!decide(&disabled, false).blocked());
        assert!(!decide(&disabled, true).blocked());
    }

    #[test]
    fn cache_buster_respects_existing_query() {
        assert_eq!(
            cache_busted("https://x.test/m.json", 7),
            "https://x.test/m.json?ts=7"
        );
        assert_eq!(
            cache_busted("https://x.test/m.json?v=2", 7),
            "https://x.test/m.json?v=2&ts=7"
        );
    }

    #[test]
    fn unreachable_switch_means_not_in_maintenance() {
        let cfg = SiteConfig::default();
        let missing = std::env::temp_dir().join("folio-no-such-site");
        let m = fetch_maintenance(&missing, &cfg);
        assert!(!m.enabled);
    }

    #[test]
    fn malformed_switch_means_not_in_maintenance() {
        let dir = std::env::temp_dir().join("folio-maint-malformed");
        std::fs::create_dir_all(dir.join("data")).unwrap();
        std::fs::write(dir.join("data/maintenance.json"), "{not json").unwrap();
        let m = fetch_maintenance(&dir, &SiteConfig::default());
        assert!(!m.enabled);
    }
}
