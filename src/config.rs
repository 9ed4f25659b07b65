use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::{bail, Context};
use chrono::format::{Item, StrftimeItems};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};

/// Build parameters, read once from the command line and never mutated.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub theme_dir: PathBuf,

    pub title: String,
    pub base_url: String,
    pub date_format: String,

    pub posts_per_page: NonZeroUsize,
    /// Excerpt length handed to the listing template. `-1` disables excerpts.
    pub short_length: i64,

    pub disqus_shortname: String,
    pub google_analytics_id: String,
    pub cookie_warning: bool,
}

pub(crate) fn command() -> Command {
    command!().args([
        Arg::new("input")
            .long("input")
            .help("Directory where blog posts are stored (in markdown format)")
            .value_parser(value_parser!(PathBuf))
            .default_value("input"),
        Arg::new("output")
            .long("output")
            .help("Directory of generated html. Existing contents will be removed.")
            .value_parser(value_parser!(PathBuf))
            .default_value("output"),
        Arg::new("theme")
            .long("theme")
            .help("Directory containing theme files (templates/ and static/)")
            .value_parser(value_parser!(PathBuf))
            .default_value("theme"),
        Arg::new("title")
            .long("title")
            .help("Blog title")
            .default_value("Blag."),
        Arg::new("dateformat")
            .long("dateformat")
            .help("Time layout of post dates, in strftime syntax")
            .default_value("%Y-%m-%d %H:%M:%S"),
        Arg::new("baseurl")
            .long("baseurl")
            .help("URL that will be used in <base href=\"\"> element")
            .default_value("/"),
        Arg::new("disqus")
            .long("disqus")
            .help("Disqus shortname. If empty, comments will be disabled."),
        Arg::new("google")
            .long("google")
            .help("Google Analytics tracker ID. If empty, analytics will be disabled."),
        Arg::new("cookies")
            .long("cookies")
            .help("Show a cookie law warning, if the theme supports it")
            .action(ArgAction::SetTrue),
        Arg::new("pps")
            .long("pps")
            .help("Post count per page")
            .value_parser(value_parser!(u64).range(1..))
            .default_value("10"),
        Arg::new("short")
            .long("short")
            .help("Length of shortened versions of posts (-1 disables shortening)")
            .value_parser(value_parser!(i64).range(-1..))
            .allow_negative_numbers(true)
            .default_value("250"),
    ])
}

fn required<T>(matches: &ArgMatches, id: &str) -> anyhow::Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .get_one::<T>(id)
        .cloned()
        .with_context(|| format!("missing value for --{id}"))
}

fn optional(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let date_format: String = required(matches, "dateformat")?;
        validate_date_format(&date_format)?;

        let pps: u64 = required(matches, "pps")?;
        let posts_per_page = usize::try_from(pps)
            .ok()
            .and_then(NonZeroUsize::new)
            .with_context(|| format!("invalid post count per page: {pps}"))?;

        Ok(Self {
            input_dir: required(matches, "input")?,
            output_dir: required(matches, "output")?,
            theme_dir: required(matches, "theme")?,
            title: required(matches, "title")?,
            base_url: required(matches, "baseurl")?,
            date_format,
            posts_per_page,
            short_length: required(matches, "short")?,
            disqus_shortname: optional(matches, "disqus"),
            google_analytics_id: optional(matches, "google"),
            cookie_warning: matches.get_flag("cookies"),
        })
    }
}

fn validate_date_format(format: &str) -> anyhow::Result<()> {
    if format.is_empty() {
        bail!("date format must not be empty");
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        bail!("invalid date format: {format:?}");
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::Path;

    pub(crate) fn config_from<I, T>(args: I) -> Config
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args).unwrap();
        Config::from_matches(&matches).unwrap()
    }

    /// A config rooted in `root`, with `input/`, `output/` and `theme/` inside it.
    pub(crate) fn config_in(root: &Path, pps: usize) -> Config {
        config_from([
            "blag".to_string(),
            format!("--input={}", root.join("input").display()),
            format!("--output={}", root.join("output").display()),
            format!("--theme={}", root.join("theme").display()),
            format!("--pps={pps}"),
            "--dateformat=%s".to_string(),
        ])
    }

    #[test]
    fn defaults() {
        let config = config_from(["blag"]);
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.theme_dir, PathBuf::from("theme"));
        assert_eq!(config.title, "Blag.");
        assert_eq!(config.base_url, "/");
        assert_eq!(config.date_format, "%Y-%m-%d %H:%M:%S");
        assert_eq!(config.posts_per_page.get(), 10);
        assert_eq!(config.short_length, 250);
        assert_eq!(config.disqus_shortname, "");
        assert_eq!(config.google_analytics_id, "");
        assert!(!config.cookie_warning);
    }

    #[test]
    fn explicit_values() {
        let config = config_from([
            "blag",
            "--title",
            "My Blog",
            "--disqus",
            "myblog",
            "--google",
            "UA-1",
            "--cookies",
            "--pps",
            "3",
            "--short",
            "-1",
        ]);
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.disqus_shortname, "myblog");
        assert_eq!(config.google_analytics_id, "UA-1");
        assert!(config.cookie_warning);
        assert_eq!(config.posts_per_page.get(), 3);
        assert_eq!(config.short_length, -1);
    }

    #[test]
    fn zero_posts_per_page_is_rejected() {
        assert!(command().try_get_matches_from(["blag", "--pps", "0"]).is_err());
    }

    #[test]
    fn short_below_minus_one_is_rejected() {
        assert!(command()
            .try_get_matches_from(["blag", "--short", "-2"])
            .is_err());
    }

    #[test]
    fn invalid_date_format_is_rejected() {
        let matches = command()
            .try_get_matches_from(["blag", "--dateformat", "%Q"])
            .unwrap();
        assert!(Config::from_matches(&matches).is_err());

        let matches = command()
            .try_get_matches_from(["blag", "--dateformat="])
            .unwrap();
        assert!(Config::from_matches(&matches).is_err());
    }
}
