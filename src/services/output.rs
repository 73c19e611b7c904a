use crate::content::ContentError;
use crate::domain::models::JsonOut;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

fn error_code(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<ContentError>() {
        Some(ContentError::DuplicateWorkSlug(_))
        | Some(ContentError::DuplicateResearchSlug(_)) => "DUPLICATE_SLUG",
        None => "ERROR",
    }
}

/// Terminal failure path: machine-readable envelope under `--json`,
/// human-readable line otherwise.
pub fn fail(json: bool, err: &anyhow::Error) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": false,
                "error": {"code": error_code(err), "message": err.to_string()}
            })
        );
    } else {
        eprintln!("error: {:#}", err);
    }
}
