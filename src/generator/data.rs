use serde::Serialize;

use crate::{config::Config, metadata::Post};

/// Values shared by every rendered page.
#[derive(Serialize, Debug)]
pub(super) struct SiteData<'a> {
    pub title: &'a str,
    pub base: &'a str,
    pub disqus_shortname: &'a str,
    pub google_analytics_id: &'a str,
    pub cookie_warning: bool,
}

impl<'a> From<&'a Config> for SiteData<'a> {
    fn from(config: &'a Config) -> Self {
        Self {
            title: &config.title,
            base: &config.base_url,
            disqus_shortname: &config.disqus_shortname,
            google_analytics_id: &config.google_analytics_id,
            cookie_warning: config.cookie_warning,
        }
    }
}

#[derive(Serialize, Debug)]
pub(super) struct PostPageData<'a> {
    #[serde(flatten)]
    pub site: &'a SiteData<'a>,
    pub post: &'a Post,
}

#[derive(Serialize, Debug)]
pub(super) struct ListPageData<'a> {
    #[serde(flatten)]
    pub site: &'a SiteData<'a>,
    pub posts: &'a [&'a Post],
    pub current_page: usize,
    pub page_count: usize,
    pub shortlen: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<usize>,
}
