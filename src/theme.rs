use std::{io::Write, path::Path};

use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};
use log::info;
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page";
const POST_TEMPLATE: &str = "post";

fn excerpt_of(text: &str, len: i64) -> String {
    let Ok(len) = usize::try_from(len) else {
        return text.to_owned();
    };
    match text.char_indices().nth(len) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Plain text of an HTML fragment: tags removed, entities decoded.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    html_escape::decode_html_entities(&text).into_owned()
}

handlebars_helper!(trim: |s: str| s.trim_matches(&['\r', '\n'][..]).to_owned());
handlebars_helper!(excerpt: |s: str, len: i64| excerpt_of(s, len));
handlebars_helper!(striptags: |s: str| strip_tags(s));
handlebars_helper!(range: |n: u64| (1..=n).collect::<Vec<u64>>());

/// The listing and post templates of a theme, with the helpers they may use.
#[derive(Debug)]
pub(crate) struct Theme {
    handlebars: Handlebars<'static>,
}

impl Theme {
    /// Loads `templates/page.html` and `templates/post.html` from `theme_dir`.
    pub fn load(theme_dir: &Path) -> anyhow::Result<Self> {
        let template_dir = theme_dir.join("templates");

        let mut handlebars = Handlebars::new();
        handlebars.register_helper("trim", Box::new(trim));
        handlebars.register_helper("excerpt", Box::new(excerpt));
        handlebars.register_helper("striptags", Box::new(striptags));
        handlebars.register_helper("range", Box::new(range));

        for (name, file) in [(PAGE_TEMPLATE, "page.html"), (POST_TEMPLATE, "post.html")] {
            let path = template_dir.join(file);
            handlebars
                .register_template_file(name, &path)
                .with_context(|| format!("while loading template {path:?}"))?;
        }

        info!("Loaded theme from {theme_dir:?}");
        Ok(Self { handlebars })
    }

    pub fn render_page<T: Serialize, W: Write>(&self, data: &T, writer: W) -> anyhow::Result<()> {
        self.handlebars
            .render_to_write(PAGE_TEMPLATE, data, writer)
            .context("while rendering page template")
    }

    pub fn render_post<T: Serialize, W: Write>(&self, data: &T, writer: W) -> anyhow::Result<()> {
        self.handlebars
            .render_to_write(POST_TEMPLATE, data, writer)
            .context("while rendering post template")
    }
}
