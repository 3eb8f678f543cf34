//! Markdown rendering for article bodies

use comrak::ComrakOptions;

fn render_options() -> ComrakOptions {
    let mut option = ComrakOptions::default();
    option.extension.autolink = true;
    option.render.hardbreaks = true;
    option.render.unsafe_ = true;
    option
}

/// Render an article body to HTML
///
/// Raw HTML in the body is kept, bare URLs become links and single newlines
/// become `<br />`. Empty input renders to an empty string.
pub fn render_markdown(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    comrak::markdown_to_html(content, &render_options())
}
