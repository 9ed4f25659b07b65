use std::path::Path;

use log::{info, warn};

use crate::{config::Config, metadata::Post, paginator, theme::Theme};

mod data;
mod utils;

use data::{ListPageData, PostPageData, SiteData};
use utils::{copy_tree, create_dir, reset_dir, write_file};

fn generate_posts(
    out_dir: &Path,
    theme: &Theme,
    site: &SiteData,
    posts: &[Post],
) -> anyhow::Result<()> {
    let post_dir = out_dir.join("post");
    create_dir(&post_dir)?;

    for post in posts {
        let data = PostPageData { site, post };
        let path = post_dir.join(format!("{}.html", post.meta.slug));
        write_file(&path, |w| theme.render_post(&data, w))?;
    }
    Ok(())
}

fn generate_pages(
    config: &Config,
    theme: &Theme,
    site: &SiteData,
    posts: &[Post],
) -> anyhow::Result<usize> {
    let out_dir = &config.output_dir;
    let page_dir = out_dir.join("page");
    create_dir(&page_dir)?;

    let pages = paginator::paginate(posts, config.posts_per_page);
    for page in pages.iter() {
        let data = ListPageData {
            site,
            posts: &page.posts,
            current_page: page.number,
            page_count: page.page_count,
            shortlen: config.short_length,
            prev_page: (page.number > 1).then(|| page.number - 1),
            next_page: (page.number < page.page_count).then(|| page.number + 1),
        };

        let path = page_dir.join(format!("{}.html", page.number));
        write_file(&path, |w| theme.render_page(&data, w))?;

        if page.number == 1 {
            write_file(&out_dir.join("index.html"), |w| theme.render_page(&data, w))?;
        }
    }
    Ok(pages.len())
}

/// Regenerates the whole output directory.
///
/// Whatever was in the output directory before is deleted. On error the
/// directory is left as far as publishing got.
pub(crate) fn publish(config: &Config, theme: &Theme, posts: &[Post]) -> anyhow::Result<()> {
    let out_dir = &config.output_dir;
    reset_dir(out_dir)?;

    let static_dir = config.theme_dir.join("static");
    if static_dir.is_dir() {
        copy_tree(&static_dir, out_dir)?;
    } else {
        warn!("Theme has no static directory ({static_dir:?}). ignoring...");
    }

    let site = SiteData::from(config);
    generate_posts(out_dir, theme, &site, posts)?;
    let page_count = generate_pages(config, theme, &site, posts)?;

    info!(
        "Published {} posts on {page_count} pages to {out_dir:?}",
        posts.len()
    );
    Ok(())
}
