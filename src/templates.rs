// templates.rs

// Bring in Askama templating
use askama::Template;

use pulldown_cmark::{Parser, html};

/// The single page: ingredient form, current list, recipe trigger, and the
/// rendered recipe. Conditional sections follow the state the app shell
/// passes in.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub ingredients: Vec<String>,
    pub can_generate: bool,
    pub generating: bool,
    pub recipe_html: Option<String>,
    pub notice: Option<String>,
    pub stylesheet: &'static str,
}

impl IndexTemplate {
    pub fn new(
        ingredients: Vec<String>,
        can_generate: bool,
        generating: bool,
        recipe_html: Option<String>,
        notice: Option<String>,
    ) -> Self {
        Self {
            ingredients,
            can_generate,
            generating,
            recipe_html,
            notice,
            stylesheet: "/chef.css",
        }
    }
}

/// Render the completion's lightweight markup (headings, lists, emphasis)
/// into HTML for the recipe section.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new(text);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_renders_headings_and_lists() {
        let html = render_markdown("# Pancakes\n\n- egg\n- flour\n\n*whisk* well");
        assert!(html.contains("<h1>Pancakes</h1>"));
        assert!(html.contains("<li>egg</li>"));
        assert!(html.contains("<em>whisk</em>"));
    }

    #[test]
    fn page_shows_trigger_only_when_enabled() {
        let page = IndexTemplate::new(
            vec!["egg".to_string(), "flour".to_string()],
            false,
            false,
            None,
            None,
        )
        .render()
        .unwrap();
        assert!(!page.contains("Get recipe"));

        let page = IndexTemplate::new(
            vec!["egg".to_string(), "flour".to_string(), "milk".to_string()],
            true,
            false,
            None,
            None,
        )
        .render()
        .unwrap();
        assert!(page.contains("Get recipe"));
    }

    #[test]
    fn page_disables_trigger_while_generating() {
        let page = IndexTemplate::new(
            vec!["egg".to_string(), "flour".to_string(), "milk".to_string()],
            true,
            true,
            None,
            None,
        )
        .render()
        .unwrap();
        assert!(page.contains("disabled"));
        assert!(page.contains("Generating"));
    }

    #[test]
    fn page_includes_recipe_and_notice_when_present() {
        let page = IndexTemplate::new(
            vec!["egg".to_string(), "flour".to_string(), "milk".to_string()],
            true,
            false,
            Some("<h1>Pancakes</h1>".to_string()),
            Some("recipe service unreachable".to_string()),
        )
        .render()
        .unwrap();
        assert!(page.contains("<h1>Pancakes</h1>"));
        assert!(page.contains("recipe service unreachable"));
    }
}
