// src/presentation/web/templates.rs
use std::sync::LazyLock;
use tera::{Context, Tera};

static ENGINE: LazyLock<Result<Tera, tera::Error>> = LazyLock::new(build);

fn build() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../../../templates/portal/base.html")),
        ("login.html", include_str!("../../../templates/portal/login.html")),
        ("list.html", include_str!("../../../templates/portal/list.html")),
        ("detail.html", include_str!("../../../templates/portal/detail.html")),
        ("form.html", include_str!("../../../templates/portal/form.html")),
        ("review.html", include_str!("../../../templates/portal/review.html")),
        ("error.html", include_str!("../../../templates/portal/error.html")),
    ])?;
    tera.autoescape_on(vec![".html"]);
    Ok(tera)
}

/// Fails when a bundled template does not parse.
pub fn ensure_loaded() -> Result<(), String> {
    ENGINE
        .as_ref()
        .map(|_| ())
        .map_err(|err| format!("portal templates failed to load: {err}"))
}

pub fn render(name: &str, context: &Context) -> Result<String, String> {
    let engine = ENGINE
        .as_ref()
        .map_err(|err| format!("portal templates unavailable: {err}"))?;
    engine
        .render(name, context)
        .map_err(|err| format!("failed to render {name}: {err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_templates_parse() {
        assert!(ensure_loaded().is_ok());
    }

    #[test]
    fn error_page_escapes_the_message() {
        let mut context = Context::new();
        context.insert("viewer", &Option::<()>::None);
        context.insert("status", &404);
        context.insert("reason", "Not Found");
        context.insert("message", "<script>");
        let html = render("error.html", &context).expect("render");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("404"));
    }
}
