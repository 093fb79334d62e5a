use std::path::Path;
use tera::Tera;

const DEFAULT_INDEX: &str = include_str!("../templates/index.html");

/// Loads the built-in pages, then lets any `*.html` in `template_dir`
/// override them.
pub fn load(template_dir: &Path) -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", DEFAULT_INDEX)?;

    if template_dir.is_dir() {
        let files = std::fs::read_dir(template_dir)
            .map_err(|e| tera::Error::msg(format!("Cannot read {}: {}", template_dir.display(), e)))?
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "html"))
            .filter_map(|p| {
                let name = p.file_name()?.to_str()?.to_string();
                Some((p, Some(name)))
            })
            .collect::<Vec<_>>();
        tera.add_template_files(files)?;
    }

    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_index_renders_form() {
        let dir = tempfile::tempdir().unwrap();
        let tera = load(&dir.path().join("missing")).unwrap();

        let mut ctx = tera::Context::new();
        ctx.insert("title", "Emotion Detector");
        let html = tera.render("index.html", &ctx).unwrap();
        assert!(html.contains(r#"action="/predict""#));
        assert!(html.contains(r#"name="image""#));
    }

    #[test]
    fn directory_templates_override_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "custom {{ title }}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let tera = load(dir.path()).unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("title", "form");
        assert_eq!(tera.render("index.html", &ctx).unwrap(), "custom form");
    }
}
