use serde::Serialize;

/// Front matter of one post, plus the fields derived from it while loading.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PostMetadata {
    pub title: String,
    /// Unix seconds.
    pub timestamp: i64,
    /// `timestamp` rendered with the configured date format.
    pub time: String,
    pub author: String,
    pub slug: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Post {
    #[serde(flatten)]
    pub meta: PostMetadata,
    /// Rendered HTML body.
    pub content: String,
}

impl PostMetadata {
    /// Decodes a block of `key: value` lines.
    ///
    /// Keys are matched case-insensitively. Unknown keys, lines without a
    /// separator, comment lines and values that do not parse are skipped and
    /// leave the corresponding field at its zero value.
    pub fn parse(block: &str) -> Self {
        let mut meta = Self::default();
        for line in block.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = unquote(value.trim());

            match key.trim().to_ascii_lowercase().as_str() {
                "title" => meta.title = value.to_string(),
                "author" => meta.author = value.to_string(),
                "slug" => meta.slug = value.to_string(),
                "timestamp" => {
                    if let Ok(timestamp) = value.parse() {
                        meta.timestamp = timestamp;
                    }
                }
                _ => {}
            }
        }
        meta
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
