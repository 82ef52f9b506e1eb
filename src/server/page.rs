//! Server-rendered form page

use minijinja::Environment;
use serde::Serialize;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Values shown on the form page
#[derive(Debug, Default, Serialize)]
pub struct IndexView<'a> {
    /// URL echoed back into the input field
    pub url: &'a str,
    /// Cleaned text, when a conversion succeeded
    pub text: Option<&'a str>,
    /// Message shown above the result area
    pub error: Option<&'a str>,
}

/// Renders pages from the embedded templates.
///
/// Templates named `*.html` are auto-escaped, so document text and
/// user-supplied URLs are safe to interpolate.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, view: &IndexView<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(view)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_form_and_no_result() {
        let html = PageRenderer::new()
            .unwrap()
            .render_index(&IndexView::default())
            .unwrap();
        assert!(html.contains(r#"name="url""#));
        assert!(!html.contains("<pre>"));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_text_and_url_are_escaped() {
        let html = PageRenderer::new()
            .unwrap()
            .render_index(&IndexView {
                url: "https://example.com/?a=1&b=\"2\"",
                text: Some("<script>alert(1)</script>"),
                error: None,
            })
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("a=1&amp;b="));
    }

    #[test]
    fn test_error_is_shown() {
        let html = PageRenderer::new()
            .unwrap()
            .render_index(&IndexView {
                error: Some("ZIPファイルを展開できません。"),
                ..Default::default()
            })
            .unwrap();
        assert!(html.contains("ZIPファイルを展開できません。"));
    }
}
