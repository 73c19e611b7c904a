use crate::content::{ContentStore, ResearchItem, WorkItem};
use crate::domain::models::{MaintenanceConfig, SiteConfig};
use crate::services::markup::{escape_html, list_items};

pub const ALL_CATEGORY: &str = "All";

/// Fixed category chips on the work index. The e-commerce label carries a
/// non-breaking hyphen (U+2011), which `normalize_category` folds to ASCII.
pub const WORK_FILTERS: &[&str] = &[
    ALL_CATEGORY,
    "Research",
    "IA",
    "E\u{2011}commerce",
    "Accessibility",
    "Content Strategy",
];

pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase().replace('\u{2011}', "-")
}

/// Map arbitrary input onto the fixed chip set; anything unknown falls
/// back to "All" so exactly one chip is ever active.
pub fn canonical_category(raw: &str) -> &'static str {
    WORK_FILTERS
        .iter()
        .copied()
        .find(|f| normalize_category(f) == normalize_category(raw))
        .unwrap_or(ALL_CATEGORY)
}

pub fn filter_works<'a>(works: &'a [WorkItem], category: &str) -> Vec<&'a WorkItem> {
    let category = canonical_category(category);
    if category == ALL_CATEGORY {
        return works.iter().collect();
    }
    let wanted = normalize_category(category);
    works
        .iter()
        .filter(|w| w.tags.iter().any(|t| normalize_category(t) == wanted))
        .collect()
}

fn load_notice(label: &str, href: &str) -> String {
    format!(
        r##"<p class="notice" role="alert">Couldn&#39;t load {label}. <a href="{href}">Retry</a></p>"##,
        label = escape_html(label),
        href = escape_html(href),
    )
}

pub fn work_card(w: &WorkItem) -> String {
    let href = format!("#/work/{}", escape_html(&w.slug));
    let title = escape_html(&w.title);
    let cta = if w.password_protected {
        "Enter Password"
    } else {
        "View Case Study"
    };

    let mut out = String::new();
    match &w.hero_image {
        Some(img) => out.push_str(&format!(
            r#"<article class="work-hero" style="--img:url('{}')">"#,
            escape_html(img)
        )),
        None => out.push_str(r#"<article class="work-hero">"#),
    }
    out.push_str(r#"<div class="content">"#);
    if w.password_protected {
        out.push_str(r#"<div class="eyebrow">🔒 Protected</div>"#);
    }
    out.push_str(&format!(
        r##"<h3 class="title"><a href="{href}">{title}</a></h3>"##
    ));
    if let Some(sub) = &w.subtitle {
        out.push_str(&format!(r#"<p class="sub">{}</p>"#, escape_html(sub)));
    }
    out.push_str(&format!(
        r##"<a class="cta" href="{href}" aria-label="{cta} for {title}">{cta} <span aria-hidden="true">→</span></a>"##
    ));
    out.push_str("</div>");

    let tags: Vec<&String> = w.tags.iter().take(6).collect();
    if !tags.is_empty() {
        out.push_str(r#"<div class="tags">"#);
        for t in tags {
            out.push_str(&format!(r#"<span class="tag">{}</span>"#, escape_html(t)));
        }
        out.push_str("</div>");
    }
    out.push_str(&format!(
        r##"<a class="cover-link" href="{href}" aria-label="Open {title}"></a>"##
    ));
    out.push_str("</article>");
    out
}

fn research_meta(r: &ResearchItem) -> String {
    let mut parts = Vec::new();
    if let Some(venue) = &r.venue {
        parts.push(escape_html(venue));
    }
    if let Some(year) = r.year {
        parts.push(year.to_string());
    }
    parts.join(" • ")
}

fn research_card(r: &ResearchItem) -> String {
    let href = format!("#/research/{}", escape_html(&r.slug));
    let mut out = String::new();
    out.push_str(r#"<article class="card"><div class="body">"#);
    out.push_str(&format!(
        r##"<h3><a href="{href}">{}</a></h3>"##,
        escape_html(&r.title)
    ));
    let meta = research_meta(r);
    if !meta.is_empty() {
        out.push_str(&format!(r#"<p class="meta">{meta}</p>"#));
    }
    if let Some(abs) = &r.abstract_text {
        out.push_str(&format!("<p>{}</p>", escape_html(abs)));
    }
    if let Some(pdf) = &r.pdf {
        out.push_str(&format!(
            r#"<p><a href="{}" download>Download PDF</a></p>"#,
            escape_html(pdf)
        ));
    }
    out.push_str(&format!(r##"<p><a href="{href}">Read more</a></p>"##));
    out.push_str("</div></article>");
    out
}

pub fn home(cfg: &SiteConfig, store: &ContentStore) -> String {
    let mut out = String::new();
    out.push_str(r#"<section class="hero"><div>"#);
    out.push_str(&format!(
        r#"<h1 class="title">{}</h1>"#,
        escape_html(&cfg.title)
    ));
    if !cfg.tagline.is_empty() {
        out.push_str(&format!(
            r#"<p class="sub">{}</p>"#,
            escape_html(&cfg.tagline)
        ));
    }
    out.push_str("</div></section>");

    out.push_str(r#"<section class="section"><h2>Featured Work</h2>"#);
    if store.works_error.is_some() {
        out.push_str(&load_notice("case studies", "#/"));
    }
    out.push_str(r#"<div class="grid cols-2">"#);
    for w in store.works.iter().take(cfg.featured_works) {
        out.push_str(&work_card(w));
    }
    out.push_str("</div></section>");

    out.push_str(r#"<section class="section"><h2>Latest Research</h2>"#);
    if store.research_error.is_some() {
        out.push_str(&load_notice("research items", "#/"));
    }
    out.push_str(r#"<div class="grid">"#);
    for r in store.research.iter().take(cfg.featured_research) {
        out.push_str(&research_card(r));
    }
    out.push_str("</div></section>");

    out.push_str(
        r##"<section class="section center"><div><h2>Need a researcher who designs?</h2><div class="cta-row"><a class="btn" href="#/work">See projects</a></div></div></section>"##,
    );
    out
}

pub fn work_index(store: &ContentStore, category: &str) -> String {
    let active = canonical_category(category);
    let mut out = String::new();
    out.push_str(r#"<section class="section"><h1 class="title">Work</h1>"#);
    out.push_str(
        r#"<p class="sub">Selected projects across research, information architecture, accessibility, and e-commerce trust.</p>"#,
    );
    if store.works_error.is_some() {
        out.push_str(&load_notice("case studies", "#/work"));
    }
    out.push_str(r#"<div class="filters" role="group" aria-label="Filter projects">"#);
    for f in WORK_FILTERS {
        let pressed = if *f == active { "true" } else { "false" };
        out.push_str(&format!(
            r#"<button class="chip" aria-pressed="{pressed}" data-filter="{f}">{f}</button>"#,
            f = escape_html(f),
        ));
    }
    out.push_str("</div>");
    out.push_str(r#"<div class="grid cols-2" id="workGrid">"#);
    for w in filter_works(&store.works, active) {
        out.push_str(&work_card(w));
    }
    out.push_str("</div></section>");
    out
}

fn kv_row(label: &str, value: &Option<String>) -> String {
    format!(
        "<div><strong>{label}:</strong> {}</div>",
        value.as_deref().map(escape_html).unwrap_or_default()
    )
}

pub fn work_detail(store: &ContentStore, w: &WorkItem) -> String {
    let mut out = String::new();
    out.push_str(r#"<article class="detail"><header>"#);
    out.push_str(&format!("<h1>{}</h1>", escape_html(&w.title)));
    out.push_str(r#"<div class="kv">"#);
    out.push_str(&kv_row("Role", &w.role));
    out.push_str(&kv_row("Timeline", &w.timeline));
    out.push_str(&kv_row("Context", &w.context));
    out.push_str(&kv_row("Scope", &w.scope));
    out.push_str("</div></header>");

    out.push_str(&format!(
        r#"<section class="section"><h2>Problem &amp; Context</h2><p>{}</p></section>"#,
        w.problem.as_deref().map(escape_html).unwrap_or_default()
    ));
    out.push_str(&format!(
        r#"<section class="section"><h2>Goals &amp; Hypotheses</h2><ul>{}</ul></section>"#,
        list_items(&w.goals)
    ));
    let methods: Vec<String> = w.methods.iter().map(|m| escape_html(m)).collect();
    out.push_str(&format!(
        r#"<section class="section"><h2>Methods</h2><p>{}</p></section>"#,
        methods.join(" • ")
    ));

    out.push_str(r#"<section class="section"><h2>Process Highlights</h2>"#);
    if let Some(process) = &w.process {
        out.push_str(&format!("<ul>{}</ul>", list_items(&process.highlights)));
        for pair in &process.before_after {
            let alt = pair.alt.as_deref().map(escape_html).unwrap_or_default();
            out.push_str(&format!(
                r#"<div class="grid cols-2"><img src="{}" alt="{alt} before"><img src="{}" alt="{alt} after"></div>"#,
                escape_html(&pair.before),
                escape_html(&pair.after),
            ));
        }
        out.push_str(&format!(
            "<h3>Decisions</h3><ul>{}</ul>",
            list_items(&process.decisions)
        ));
    }
    out.push_str("</section>");

    out.push_str(r#"<section class="section"><h2>Results</h2>"#);
    let results = w.results.clone().unwrap_or_default();
    out.push_str(&format!(
        "<p><strong>Quant:</strong> {}</p>",
        results.quant.as_deref().map(escape_html).unwrap_or_default()
    ));
    out.push_str(&format!(
        "<p><strong>Qual:</strong> {}</p>",
        results.qual.as_deref().map(escape_html).unwrap_or_default()
    ));
    out.push_str("</section>");

    out.push_str(&format!(
        r#"<section class="section"><h2>Challenges &amp; Trade-offs</h2><p>{}</p></section>"#,
        w.challenges.as_deref().map(escape_html).unwrap_or_default()
    ));
    out.push_str(&format!(
        r#"<section class="section"><h2>Credits / Ethics</h2><p>{}</p></section>"#,
        w.credits.as_deref().map(escape_html).unwrap_or_default()
    ));

    // Unresolved related slugs are dropped, not rendered as errors.
    out.push_str(r#"<section class="section"><h2>Related</h2><div class="grid cols-2">"#);
    for slug in &w.related {
        if let Some(related) = store.work(slug) {
            out.push_str(&work_card(related));
        }
    }
    out.push_str("</div></section></article>");
    out
}

pub fn research_index(store: &ContentStore) -> String {
    let mut out = String::new();
    out.push_str(r#"<section class="section"><h1 class="title">Research</h1>"#);
    out.push_str(r#"<p class="sub">Papers, talks, and applied research.</p>"#);
    if store.research_error.is_some() {
        out.push_str(&load_notice("research items", "#/research"));
    }
    out.push_str(r#"<div class="grid">"#);
    for r in &store.research {
        out.push_str(&research_card(r));
    }
    out.push_str("</div></section>");
    out
}

pub fn research_detail(r: &ResearchItem) -> String {
    let mut out = String::new();
    out.push_str(r#"<article class="detail"><header>"#);
    out.push_str(&format!("<h1>{}</h1>", escape_html(&r.title)));
    out.push_str(r#"<div class="kv">"#);
    out.push_str(&kv_row("Authors", &r.authors));
    out.push_str(&kv_row("Venue", &r.venue));
    out.push_str(&format!(
        "<div><strong>Year:</strong> {}</div>",
        r.year.map(|y| y.to_string()).unwrap_or_default()
    ));
    out.push_str("</div></header>");

    if let Some(abs) = &r.abstract_text {
        out.push_str(&format!(
            r#"<section class="section"><h2>Abstract</h2><p>{}</p></section>"#,
            escape_html(abs)
        ));
    }
    if let Some(findings) = &r.findings {
        out.push_str(&format!(
            r#"<section class="section"><h2>Findings / Contributions</h2><ul>{}</ul></section>"#,
            list_items(findings)
        ));
    }

    out.push_str(r#"<section class="section"><h2>Artifacts</h2><ul>"#);
    if let Some(pdf) = &r.pdf {
        out.push_str(&format!(
            r#"<li><a href="{}" download>PDF</a></li>"#,
            escape_html(pdf)
        ));
    }
    if let Some(slides) = &r.slides {
        out.push_str(&format!(
            r#"<li><a href="{}" download>Slides</a></li>"#,
            escape_html(slides)
        ));
    }
    out.push_str("</ul></section></article>");
    out
}

pub fn about(cfg: &SiteConfig) -> String {
    let mut out = String::new();
    out.push_str(r#"<section class="section"><h1 class="title">About</h1><div>"#);
    for para in &cfg.about {
        out.push_str(&format!("<p>{}</p>", escape_html(para)));
    }
    if let Some(resume) = &cfg.resume {
        out.push_str(&format!(
            r#"<p><a href="{}" download>Download resume (PDF)</a></p>"#,
            escape_html(resume)
        ));
    }
    out.push_str("</div></section>");
    out
}

pub fn not_found() -> String {
    r##"<section class="section"><h1>Not found</h1><p>That page doesn&#39;t exist. Try <a href="#/">Home</a>.</p></section>"##
        .to_string()
}

fn format_available_at(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(&chrono::Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn maintenance_screen(cfg: &SiteConfig, m: &MaintenanceConfig) -> String {
    let mut out = String::new();
    match &m.bg_image {
        Some(bg) => out.push_str(&format!(
            r#"<section class="maintenance-screen" style="--maint-bg:url('{}')">"#,
            escape_html(bg)
        )),
        None => out.push_str(r#"<section class="maintenance-screen">"#),
    }
    out.push_str(r#"<div class="maintenance-card">"#);
    out.push_str(&format!("<h1>{}</h1>", escape_html(&cfg.title)));
    let msg = m.message.as_deref().unwrap_or("We're making improvements.");
    out.push_str(&format!(r#"<p class="sub">{}</p>"#, escape_html(msg)));
    if let Some(when) = &m.available_at {
        out.push_str(&format!(
            r#"<p class="mono">Expected back online: {}</p>"#,
            escape_html(&format_available_at(when))
        ));
    }
    out.push_str(r#"<div class="maintenance-actions">"#);
    if let Some(contact) = &m.contact {
        if let Some(whatsapp) = &contact.whatsapp {
            out.push_str(&format!(
                r#"<a class="btn ghost" href="{}" target="_blank" rel="noopener">WhatsApp me</a>"#,
                escape_html(whatsapp)
            ));
        }
        if let Some(email) = &contact.email {
            out.push_str(&format!(
                r#"<a class="btn ghost" href="mailto:{}">Email me</a>"#,
                escape_html(email)
            ));
        }
    }
    out.push_str("</div></div></section>");
    out
}
