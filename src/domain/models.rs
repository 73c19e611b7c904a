use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Operator-local persisted state. Survives across runs until explicitly
/// cleared; the only field today is the maintenance bypass.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    #[serde(default)]
    pub maintenance_bypass: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
    pub about: Vec<String>,
    pub resume: Option<String>,
    pub works: String,
    pub research: String,
    pub maintenance: String,
    pub featured_works: usize,
    pub featured_research: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            tagline: String::new(),
            about: Vec::new(),
            resume: None,
            works: "data/works.json".to_string(),
            research: "data/research.json".to_string(),
            maintenance: "data/maintenance.json".to_string(),
            featured_works: 4,
            featured_research: 3,
        }
    }
}

/// Remote maintenance switch document. Every field defaults so a partial
/// or empty document parses to "not in maintenance".
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceConfig {
    pub enabled: bool,
    pub message: Option<String>,
    pub available_at: Option<String>,
    pub contact: Option<MaintenanceContact>,
    pub bg_image: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct MaintenanceContact {
    pub whatsapp: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
    pub current: bool,
}

/// Full result of routing one fragment: the markup plus the navigation
/// state the chrome applies alongside it.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub path: String,
    pub view: String,
    pub title: String,
    pub section: Option<String>,
    pub drawer_open: bool,
    pub breadcrumbs: Vec<Crumb>,
    pub html: String,
}

#[derive(Serialize)]
pub struct ListEntry {
    pub slug: String,
    pub title: String,
}

#[derive(Serialize)]
pub struct MaintenanceReport {
    pub enabled: bool,
    pub bypassed: bool,
    pub blocked: bool,
    pub message: Option<String>,
    pub available_at: Option<String>,
}

#[derive(Serialize)]
pub struct BypassStatus {
    pub maintenance_bypass: bool,
}

#[derive(Serialize)]
pub struct DanglingRef {
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
pub struct ValidationReport {
    pub works: usize,
    pub research: usize,
    pub dangling_related: Vec<DanglingRef>,
}
