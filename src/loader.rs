use std::{fmt::Write as _, fs, path::Path};

use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Local, TimeZone, Utc};
use log::{debug, info, warn};

use crate::{
    config::Config,
    markdown,
    metadata::{Post, PostMetadata},
};

const POST_EXTENSION: &str = ".md";
const BODY_TRIM: [char; 3] = [' ', '\r', '\n'];

/// Splits a post into its front-matter block and its body.
///
/// The front matter runs up to and including the first empty line. Without
/// one, the whole input is front matter and the body is empty.
pub(crate) fn split_front_matter(content: &str) -> (&str, &str) {
    match content.find("\n\n") {
        Some(idx) => content.split_at(idx + 2),
        None => (content, ""),
    }
}

pub(crate) fn format_timestamp(timestamp: i64, format: &str) -> anyhow::Result<String> {
    let time = Local
        .timestamp_opt(timestamp, 0)
        .earliest()
        .with_context(|| format!("timestamp out of range: {timestamp}"))?;

    let mut formatted = String::new();
    write!(formatted, "{}", time.format(format))
        .map_err(|_| anyhow!("invalid date format: {format:?}"))?;
    Ok(formatted)
}

fn modified_timestamp(path: &Path) -> anyhow::Result<i64> {
    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("while reading modification time of {path:?}"))?;
    Ok(DateTime::<Utc>::from(modified).timestamp())
}

/// File name with everything from its last `.` removed. `.md` gives an empty slug.
fn slug_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(dot) => name[..dot].to_string(),
        None => name,
    }
}

fn validate_slug(slug: &str) -> anyhow::Result<()> {
    if slug.is_empty() || slug == "." || slug == ".." || slug.contains(&['/', '\\'][..]) {
        bail!("invalid slug: {slug:?}");
    }
    Ok(())
}

/// Reads one post file: front matter, derived fields and HTML body.
pub(crate) fn load_post(config: &Config, path: &Path) -> anyhow::Result<Post> {
    debug!("Loading {path:?}");
    let content = fs::read_to_string(path).with_context(|| format!("while reading {path:?}"))?;
    let (front_matter, body) = split_front_matter(&content);

    let mut meta = PostMetadata::parse(front_matter);

    if meta.timestamp <= 0 {
        meta.timestamp = modified_timestamp(path)?;
    }
    meta.time = format_timestamp(meta.timestamp, &config.date_format)?;

    if meta.slug.is_empty() {
        meta.slug = slug_from_path(path);
    }
    validate_slug(&meta.slug)?;

    let content = markdown::render(body.trim_matches(&BODY_TRIM[..]));

    Ok(Post { meta, content })
}

/// Loads every post directly inside the input directory, ordered by file name.
pub(crate) fn load_posts(config: &Config) -> anyhow::Result<Vec<Post>> {
    let input_dir = &config.input_dir;
    let mut entries = fs::read_dir(input_dir)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .with_context(|| format!("while listing {input_dir:?}"))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut posts = vec![];
    for entry in entries {
        let file_name = entry.file_name();
        if !file_name
            .to_string_lossy()
            .to_lowercase()
            .ends_with(POST_EXTENSION)
        {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            warn!("{path:?} is not a file. skipping...");
            continue;
        }
        posts.push(load_post(config, &path).with_context(|| format!("while loading {path:?}"))?);
    }

    info!("Loaded {} posts from {input_dir:?}", posts.len());
    Ok(posts)
}
