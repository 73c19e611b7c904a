use crate::*;
use std::path::Path;

pub fn handle_runtime_commands(
    cli: &Cli,
    cfg: &SiteConfig,
    state: &mut State,
    root: &Path,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Route { fragment, filter } => {
            let (path, toggle) = extract_bypass(fragment);
            if let Some(on) = toggle {
                state.maintenance_bypass = on;
                save_state(state)?;
                audit(
                    if on { "bypass_set" } else { "bypass_clear" },
                    serde_json::json!({"via": "fragment", "path": path}),
                );
            }

            let mut session = NavSession::new();
            let token = session.begin();
            let (switch, store) = with_progress(!cli.json, || {
                let switch = fetch_maintenance(root, cfg);
                let store = ContentStore::load(root, cfg);
                (switch, store)
            });

            let decision = decide(&switch, state.maintenance_bypass);
            let Some(page) = session.apply(&token, || {
                if decision.blocked() {
                    audit("maintenance_block", serde_json::json!({"path": path}));
                    maintenance_page(cfg, &switch, &path)
                } else {
                    render_route(cfg, &store, &path, filter.as_deref())
                }
            }) else {
                return Ok(());
            };

            audit(
                "route",
                serde_json::json!({"path": page.path, "view": page.view}),
            );
            print_one(cli.json, page, |p| p.html.clone())?;
        }
        Commands::List { collection } => {
            let store = ContentStore::load(root, cfg);
            let entries: Vec<ListEntry> = match collection {
                Collection::Work => store
                    .works
                    .iter()
                    .map(|w| ListEntry {
                        slug: w.slug.clone(),
                        title: w.title.clone(),
                    })
                    .collect(),
                Collection::Research => store
                    .research
                    .iter()
                    .map(|r| ListEntry {
                        slug: r.slug.clone(),
                        title: r.title.clone(),
                    })
                    .collect(),
            };
            print_out(cli.json, &entries, |e| format!("{}\t{}", e.slug, e.title))?;
        }
        Commands::Validate => {
            let store = ContentStore::load(root, cfg);
            content::validate(&store)?;
            let report = ValidationReport {
                works: store.works.len(),
                research: store.research.len(),
                dangling_related: content::dangling_related(&store),
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!(
                    "content valid: {} works, {} research items",
                    report.works, report.research
                );
                for d in &report.dangling_related {
                    println!("dangling related: {} -> {}", d.from, d.to);
                }
            }
        }
        Commands::Maintenance | Commands::Bypass { .. } => {
            unreachable!("handled before content loading")
        }
    }

    Ok(())
}
