use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::models::{DanglingRef, SiteConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkItem {
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub hero_image: Option<String>,
    pub tags: Vec<String>,
    pub password_protected: bool,
    pub role: Option<String>,
    pub timeline: Option<String>,
    pub context: Option<String>,
    pub scope: Option<String>,
    pub problem: Option<String>,
    pub goals: Vec<String>,
    pub methods: Vec<String>,
    pub process: Option<WorkProcess>,
    pub results: Option<WorkResults>,
    pub challenges: Option<String>,
    pub credits: Option<String>,
    pub related: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkProcess {
    pub highlights: Vec<String>,
    pub before_after: Vec<ImagePair>,
    pub decisions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ImagePair {
    pub before: String,
    pub after: String,
    pub alt: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct WorkResults {
    pub quant: Option<String>,
    pub qual: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ResearchItem {
    pub slug: String,
    pub title: String,
    pub venue: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub findings: Option<Vec<String>>,
    pub pdf: Option<String>,
    pub slides: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WorksDoc {
    works: Vec<WorkItem>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ResearchDoc {
    research: Vec<ResearchItem>,
}

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("duplicate work slug: {0}")]
    DuplicateWorkSlug(String),
    #[error("duplicate research slug: {0}")]
    DuplicateResearchSlug(String),
}

/// Both collections plus the per-collection load outcome. A failed load
/// leaves the collection empty and records the error so index views can
/// surface an explicit retry notice instead of a silently blank grid.
#[derive(Debug, Default, Clone)]
pub struct ContentStore {
    pub works: Vec<WorkItem>,
    pub research: Vec<ResearchItem>,
    pub works_error: Option<String>,
    pub research_error: Option<String>,
}

impl ContentStore {
    pub fn load(root: &Path, cfg: &SiteConfig) -> Self {
        let mut store = Self::default();
        match load_document(root, &cfg.works)
            .and_then(|raw| Ok(serde_json::from_str::<WorksDoc>(&raw)?))
        {
            Ok(doc) => store.works = doc.works,
            Err(e) => store.works_error = Some(e.to_string()),
        }
        match load_document(root, &cfg.research)
            .and_then(|raw| Ok(serde_json::from_str::<ResearchDoc>(&raw)?))
        {
            Ok(doc) => store.research = doc.research,
            Err(e) => store.research_error = Some(e.to_string()),
        }
        store
    }

    pub fn work(&self, slug: &str) -> Option<&WorkItem> {
        self.works.iter().find(|w| w.slug == slug)
    }

    pub fn research_item(&self, slug: &str) -> Option<&ResearchItem> {
        self.research.iter().find(|r| r.slug == slug)
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn resolve_path(root: &Path, source: &str) -> PathBuf {
    let p = Path::new(source);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

fn cache_path(source: &str) -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let id = hex::encode(hasher.finalize());
    Ok(PathBuf::from(home)
        .join(".cache")
        .join("folio")
        .join("content")
        .join(format!("{}.json", id)))
}

fn fetch_text(url: &str, timeout_ms: u64) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let resp = client.get(url).send()?.error_for_status()?;
    Ok(resp.text()?)
}

/// Read one content document as text. Remote sources are fetched and
/// mirrored into the cache; if the fetch fails and a cached copy exists,
/// the cached copy is served instead.
pub fn load_document(root: &Path, source: &str) -> anyhow::Result<String> {
    if is_remote(source) {
        let cache = cache_path(source)?;
        match fetch_text(source, 2500) {
            Ok(body) => {
                if let Some(parent) = cache.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&cache, &body)?;
                return Ok(body);
            }
            Err(_) if cache.exists() => {
                return Ok(std::fs::read_to_string(cache)?);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(std::fs::read_to_string(resolve_path(root, source))?)
}

pub fn validate(store: &ContentStore) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for w in &store.works {
        if !seen.insert(&w.slug) {
            return Err(ContentError::DuplicateWorkSlug(w.slug.clone()));
        }
    }
    let mut seen = HashSet::new();
    for r in &store.research {
        if !seen.insert(&r.slug) {
            return Err(ContentError::DuplicateResearchSlug(r.slug.clone()));
        }
    }
    Ok(())
}

/// `related` references that do not resolve to a known work slug. These
/// are dropped from rendering, so they are reported rather than fatal.
pub fn dangling_related(store: &ContentStore) -> Vec<DanglingRef> {
    let known: HashSet<&str> = store.works.iter().map(|w| w.slug.as_str()).collect();
    let mut out = Vec::new();
    for w in &store.works {
        for target in &w.related {
            if !known.contains(target.as_str()) {
                out.push(DanglingRef {
                    from: w.slug.clone(),
                    to: target.clone(),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(slug: &str) -> WorkItem {
        WorkItem {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            ..WorkItem::default()
        }
    }

    #[test]
    fn parses_camel_case_fields() {
        let raw = r#"{
            "works": [{
                "slug": "alpha",
                "title": "Alpha",
                "heroImage": "img/a.png",
                "passwordProtected": true,
                "process": {"beforeAfter": [{"before": "b.png", "after": "a.png"}]}
            }]
        }"#;
        let doc: WorksDoc = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.works.len(), 1);
        assert_eq!(doc.works[0].hero_image.as_deref(), Some("img/a.png"));
        assert!(doc.works[0].password_protected);
        let process = doc.works[0].process.as_ref().unwrap();
        assert_eq!(process.before_after[0].before, "b.png");
    }

    #[test]
    fn research_abstract_keyword_round_trips() {
        let raw = r#"{"research": [{"slug": "r1", "title": "T", "abstract": "sum"}]}"#;
        let doc: ResearchDoc = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.research[0].abstract_text.as_deref(), Some("sum"));
    }

    #[test]
    fn validate_rejects_duplicate_slugs() {
        let store = ContentStore {
            works: vec![work("alpha"), work("alpha")],
            ..ContentStore::default()
        };
        let err = validate(&store).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateWorkSlug(s) if s == "alpha"));
    }

    #[test]
    fn dangling_related_reports_unresolved_targets() {
        let mut alpha = work("alpha");
        alpha.related = vec!["beta".to_string(), "ghost".to_string()];
        let store = ContentStore {
            works: vec![alpha, work("beta")],
            ..ContentStore::default()
        };
        let dangling = dangling_related(&store);
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].to, "ghost");
    }

    #[test]
    fn load_records_error_and_leaves_collection_empty() {
        let tmp = std::env::temp_dir().join("folio-missing-content");
        let cfg = SiteConfig::default();
        let store = ContentStore::load(&tmp, &cfg);
        assert!(store.works.is_empty());
        assert!(store.works_error.is_some());
        assert!(store.research.is_empty());
        assert!(store.research_error.is_some());
    }
}
