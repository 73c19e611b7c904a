use crate::content::ContentStore;
use crate::domain::models::{Crumb, MaintenanceConfig, RenderedPage, SiteConfig};
use crate::services::views;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Lit(&'static str),
    Slug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    WorkIndex,
    WorkDetail,
    ResearchIndex,
    ResearchDetail,
    About,
    NotFound,
    Maintenance,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::WorkIndex => "work_index",
            View::WorkDetail => "work_detail",
            View::ResearchIndex => "research_index",
            View::ResearchDetail => "research_detail",
            View::About => "about",
            View::NotFound => "not_found",
            View::Maintenance => "maintenance",
        }
    }
}

use Segment::{Lit, Slug};

/// Ordered route table, first match wins. Patterns are literal segments
/// plus at most one trailing slug capture.
pub const ROUTES: &[(&[Segment], View)] = &[
    (&[], View::Home),
    (&[Lit("work")], View::WorkIndex),
    (&[Lit("work"), Slug], View::WorkDetail),
    (&[Lit("research")], View::ResearchIndex),
    (&[Lit("research"), Slug], View::ResearchDetail),
    (&[Lit("about")], View::About),
];

#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch {
    Matched { view: View, slug: Option<String> },
    NotFound,
}

/// Strip a leading `#`, default the empty fragment to `/`, and drop any
/// query suffix so only the path participates in matching.
pub fn normalize_fragment(fragment: &str) -> String {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    let path = match raw.find(|c| c == '?' || c == '#') {
        Some(i) => &raw[..i],
        None => raw,
    };
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Pull a `bypass=1|0` parameter out of the fragment's query suffix.
/// Returns the routable path and the toggle, last occurrence winning.
pub fn extract_bypass(fragment: &str) -> (String, Option<bool>) {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    let (path, query) = match raw.find(|c| c == '?' || c == '#') {
        Some(i) => (&raw[..i], Some(&raw[i + 1..])),
        None => (raw, None),
    };
    let mut toggle = None;
    if let Some(query) = query {
        for pair in query.split(|c| c == '&' || c == '#') {
            match pair {
                "bypass=1" => toggle = Some(true),
                "bypass=0" => toggle = Some(false),
                _ => {}
            }
        }
    }
    let path = if path.is_empty() { "/" } else { path };
    (path.to_string(), toggle)
}

pub fn match_route(path: &str) -> RouteMatch {
    let path = normalize_fragment(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    for (pattern, view) in ROUTES {
        if pattern.len() != segments.len() {
            continue;
        }
        let mut slug = None;
        let mut matched = true;
        for (seg, part) in pattern.iter().zip(segments.iter()) {
            match seg {
                Lit(lit) => {
                    if lit != part {
                        matched = false;
                        break;
                    }
                }
                Slug => slug = Some((*part).to_string()),
            }
        }
        if matched {
            return RouteMatch::Matched { view: *view, slug };
        }
    }
    RouteMatch::NotFound
}

pub fn active_section(view: View) -> Option<&'static str> {
    match view {
        View::Home => Some("home"),
        View::WorkIndex | View::WorkDetail => Some("work"),
        View::ResearchIndex | View::ResearchDetail => Some("research"),
        View::About => Some("about"),
        View::NotFound | View::Maintenance => None,
    }
}

fn crumb(label: &str, href: &str) -> Crumb {
    Crumb {
        label: label.to_string(),
        href: Some(href.to_string()),
        current: false,
    }
}

fn crumb_current(label: &str) -> Crumb {
    Crumb {
        label: label.to_string(),
        href: None,
        current: true,
    }
}

fn not_found_parts() -> (View, String, Vec<Crumb>, String) {
    (
        View::NotFound,
        "Not found".to_string(),
        Vec::new(),
        views::not_found(),
    )
}

/// Match a fragment against the route table and produce the rendered page
/// plus the navigation state the chrome applies: breadcrumbs, active
/// section marker, drawer closed. Pure over its inputs, so routing the
/// same path twice yields the same page.
pub fn render_route(
    cfg: &SiteConfig,
    store: &ContentStore,
    fragment: &str,
    filter: Option<&str>,
) -> RenderedPage {
    let path = normalize_fragment(fragment);
    let (view, title, breadcrumbs, html) = match match_route(&path) {
        RouteMatch::Matched {
            view: View::Home, ..
        } => (
            View::Home,
            cfg.title.clone(),
            Vec::new(),
            views::home(cfg, store),
        ),
        RouteMatch::Matched {
            view: View::WorkIndex,
            ..
        } => (
            View::WorkIndex,
            "Work".to_string(),
            vec![crumb("Home", "#/"), crumb_current("Work")],
            views::work_index(store, filter.unwrap_or(views::ALL_CATEGORY)),
        ),
        RouteMatch::Matched {
            view: View::WorkDetail,
            slug: Some(slug),
        } => match store.work(&slug) {
            Some(w) => (
                View::WorkDetail,
                w.title.clone(),
                vec![
                    crumb("Home", "#/"),
                    crumb("Work", "#/work"),
                    crumb_current(&w.title),
                ],
                views::work_detail(store, w),
            ),
            None => not_found_parts(),
        },
        RouteMatch::Matched {
            view: View::ResearchIndex,
            ..
        } => (
            View::ResearchIndex,
            "Research".to_string(),
            vec![crumb("Home", "#/"), crumb_current("Research")],
            views::research_index(store),
        ),
        RouteMatch::Matched {
            view: View::ResearchDetail,
            slug: Some(slug),
        } => match store.research_item(&slug) {
            Some(r) => (
                View::ResearchDetail,
                r.title.clone(),
                vec![
                    crumb("Home", "#/"),
                    crumb("Research", "#/research"),
                    crumb_current(&r.title),
                ],
                views::research_detail(r),
            ),
            None => not_found_parts(),
        },
        RouteMatch::Matched {
            view: View::About, ..
        } => (
            View::About,
            "About".to_string(),
            vec![crumb("Home", "#/"), crumb_current("About")],
            views::about(cfg),
        ),
        _ => not_found_parts(),
    };

    RenderedPage {
        path,
        view: view.as_str().to_string(),
        title,
        section: active_section(view).map(str::to_string),
        drawer_open: false,
        breadcrumbs,
        html,
    }
}

/// Page produced when the maintenance gate preempts routing. No section
/// marker, no breadcrumbs; the route handlers never ran.
pub fn maintenance_page(
    cfg: &SiteConfig,
    m: &MaintenanceConfig,
    fragment: &str,
) -> RenderedPage {
    RenderedPage {
        path: normalize_fragment(fragment),
        view: View::Maintenance.as_str().to_string(),
        title: cfg.title.clone(),
        section: None,
        drawer_open: false,
        breadcrumbs: Vec::new(),
        html: views::maintenance_screen(cfg, m),
    }
}

/// Generation counter for navigations. Each `begin` supersedes the token
/// of any navigation still in flight; results produced for a stale token
/// are discarded instead of overwriting a newer view.
#[derive(Debug, Default)]
pub struct NavSession {
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct NavToken {
    generation: u64,
}

impl NavSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> NavToken {
        self.generation += 1;
        NavToken {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, token: &NavToken) -> bool {
        token.generation == self.generation
    }

    pub fn apply<T>(&self, token: &NavToken, produce: impl FnOnce() -> T) -> Option<T> {
        if self.is_current(token) {
            Some(produce())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentStore, ResearchItem, WorkItem};

    fn store() -> ContentStore {
        ContentStore {
            works: vec![WorkItem {
                slug: "alpha".to_string(),
                title: "Alpha".to_string(),
                tags: vec!["IA".to_string()],
                ..WorkItem::default()
            }],
            research: vec![ResearchItem {
                slug: "paper".to_string(),
                title: "Paper".to_string(),
                ..ResearchItem::default()
            }],
            ..ContentStore::default()
        }
    }

    #[test]
    fn matches_static_routes() {
        assert_eq!(
            match_route("/"),
            RouteMatch::Matched {
                view: View::Home,
                slug: None
            }
        );
        assert_eq!(
            match_route("/work"),
            RouteMatch::Matched {
                view: View::WorkIndex,
                slug: None
            }
        );
        assert_eq!(
            match_route("/about"),
            RouteMatch::Matched {
                view: View::About,
                slug: None
            }
        );
    }

    #[test]
    fn matches_slug_routes() {
        assert_eq!(
            match_route("/work/alpha"),
            RouteMatch::Matched {
                view: View::WorkDetail,
                slug: Some("alpha".to_string())
            }
        );
        assert_eq!(
            match_route("#/research/paper"),
            RouteMatch::Matched {
                view: View::ResearchDetail,
                slug: Some("paper".to_string())
            }
        );
    }

    #[test]
    fn unknown_paths_do_not_match() {
        assert_eq!(match_route("/nope"), RouteMatch::NotFound);
        assert_eq!(match_route("/work/a/b"), RouteMatch::NotFound);
    }

    #[test]
    fn empty_fragment_defaults_to_home() {
        assert_eq!(normalize_fragment(""), "/");
        assert_eq!(normalize_fragment("#"), "/");
        assert_eq!(
            match_route(""),
            RouteMatch::Matched {
                view: View::Home,
                slug: None
            }
        );
    }

    #[test]
    fn extract_bypass_reads_and_strips_parameter() {
        assert_eq!(extract_bypass("/work?bypass=1"), ("/work".to_string(), Some(true)));
        assert_eq!(extract_bypass("#/?bypass=0"), ("/".to_string(), Some(false)));
        assert_eq!(extract_bypass("/about"), ("/about".to_string(), None));
        assert_eq!(
            extract_bypass("/work?x=2&bypass=1"),
            ("/work".to_string(), Some(true))
        );
    }

    #[test]
    fn known_slug_renders_detail_not_not_found() {
        let cfg = SiteConfig::default();
        let page = render_route(&cfg, &store(), "/work/alpha", None);
        assert_eq!(page.view, "work_detail");
        assert_eq!(page.title, "Alpha");
    }

    #[test]
    fn unknown_slug_renders_not_found() {
        let cfg = SiteConfig::default();
        for fragment in ["/work/ghost", "/research/ghost"] {
            let page = render_route(&cfg, &store(), fragment, None);
            assert_eq!(page.view, "not_found");
            assert!(page.breadcrumbs.is_empty());
        }
    }

    #[test]
    fn fixed_routes_never_render_not_found() {
        let cfg = SiteConfig::default();
        for fragment in ["/", "/work", "/research", "/about"] {
            let page = render_route(&cfg, &store(), fragment, None);
            assert_ne!(page.view, "not_found", "fragment {fragment}");
        }
    }

    #[test]
    fn detail_breadcrumbs_have_three_entries() {
        let cfg = SiteConfig::default();
        let page = render_route(&cfg, &store(), "/work/alpha", None);
        assert_eq!(page.breadcrumbs.len(), 3);
        assert_eq!(page.breadcrumbs[0].label, "Home");
        assert!(page.breadcrumbs[0].href.is_some());
        assert_eq!(page.breadcrumbs[1].href.as_deref(), Some("#/work"));
        assert!(page.breadcrumbs[2].current);
        assert!(page.breadcrumbs[2].href.is_none());
    }

    #[test]
    fn index_pages_carry_section_marker_and_closed_drawer() {
        let cfg = SiteConfig::default();
        let page = render_route(&cfg, &store(), "/research", None);
        assert_eq!(page.section.as_deref(), Some("research"));
        assert!(!page.drawer_open);
        assert_eq!(page.breadcrumbs.len(), 2);
    }

    #[test]
    fn routing_is_idempotent() {
        let cfg = SiteConfig::default();
        let s = store();
        let first = render_route(&cfg, &s, "/work", Some("IA"));
        let second = render_route(&cfg, &s, "/work", Some("IA"));
        assert_eq!(first, second);
    }

    #[test]
    fn stale_navigation_token_is_discarded() {
        let mut session = NavSession::new();
        let stale = session.begin();
        let fresh = session.begin();
        assert_eq!(session.apply(&stale, || "old"), None);
        assert_eq!(session.apply(&fresh, || "new"), Some("new"));
    }
}
