use pulldown_cmark::{html, Options, Parser};

/// Converts a Markdown body into an HTML fragment.
pub(crate) fn render(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);

    let mut body_html = String::new();
    html::push_html(&mut body_html, parser);
    body_html
}
