use crate::error::{IngestError, Result};
use scraper::{Html, Selector};

/// Title and paragraph text pulled out of an HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlText {
    pub title: Option<String>,
    pub text: String,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| IngestError::Html(e.to_string()))
}

/// Collect the trimmed `<title>` and the text of every `<p>`, paragraphs
/// joined by a single space.
pub fn extract_html(body: &str) -> Result<HtmlText> {
    let doc = Html::parse_document(body);
    let title = doc
        .select(&selector("title")?)
        .next()
        .map(|n| n.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());
    let text = doc
        .select(&selector("p")?)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(HtmlText { title, text })
}
