//! render
//!
//! Markdown to HTML rendering.
//!
//! # Architecture
//!
//! The engine only sees the [`MarkdownRenderer`] trait. [`CmarkRenderer`] is
//! the default implementation, backed by `pulldown-cmark`.
//!
//! # Asset prefixes
//!
//! Panel notes are rendered inline on their parent's page, so relative
//! image and link targets inside them would resolve against the wrong
//! folder. The decorator passes the note's id as an asset prefix and the
//! renderer rewrites relative targets to `<prefix>/<target>`.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};
use thiserror::Error;

/// Errors from markdown rendering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("markdown rendering failed: {0}")]
    Failed(String),
}

/// Converts markdown text to HTML.
///
/// Implementations must return an empty string for empty input and must
/// not keep state between calls.
pub trait MarkdownRenderer {
    /// Render `markdown`, rewriting relative asset targets under
    /// `asset_prefix` when one is given.
    fn render(&self, markdown: &str, asset_prefix: Option<&str>) -> Result<String, RenderError>;
}

/// Markdown extensions enabled on the default renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub tasklists: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: false,
            tasklists: true,
        }
    }
}

impl MarkdownOptions {
    fn to_cmark(self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.tasklists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// The default `pulldown-cmark` renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkRenderer {
    options: MarkdownOptions,
}

impl CmarkRenderer {
    /// Create a renderer with the given extensions.
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str, asset_prefix: Option<&str>) -> Result<String, RenderError> {
        if markdown.trim().is_empty() {
            return Ok(String::new());
        }

        let prefix = asset_prefix.filter(|p| !p.is_empty());
        let parser = Parser::new_ext(markdown, self.options.to_cmark()).map(|event| match prefix {
            Some(prefix) => prefix_event(event, prefix),
            None => event,
        });

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, parser);
        Ok(html)
    }
}

fn prefix_event<'a>(event: Event<'a>, prefix: &str) -> Event<'a> {
    match event {
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: prefix_target(dest_url, prefix),
            title,
            id,
        }),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: prefix_target(dest_url, prefix),
            title,
            id,
        }),
        other => other,
    }
}

fn prefix_target<'a>(target: CowStr<'a>, prefix: &str) -> CowStr<'a> {
    if !is_relative(&target) {
        return target;
    }
    let rest = target.strip_prefix("./").unwrap_or(&target);
    CowStr::from(format!("{}/{}", prefix.trim_end_matches('/'), rest))
}

/// A target is relative when it has no scheme, is not rooted and is not a
/// fragment or query on the current page.
fn is_relative(target: &str) -> bool {
    if target.is_empty() || target.starts_with(['/', '#', '?']) {
        return false;
    }
    let before_slash = target.split('/').next().unwrap_or_default();
    !before_slash.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str, prefix: Option<&str>) -> String {
        CmarkRenderer::default().render(md, prefix).unwrap()
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render("", None), "");
        assert_eq!(render("  \n\t", Some("note")), "");
    }

    #[test]
    fn renders_basic_markdown() {
        let html = render("# Title\n\nSome *text*.", None);
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn renders_tables_by_default() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n", None);
        assert!(html.contains("<table>"));
    }

    #[test]
    fn tables_can_be_disabled() {
        let renderer = CmarkRenderer::new(MarkdownOptions {
            tables: false,
            ..Default::default()
        });
        let html = renderer
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n", None)
            .unwrap();
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn prefixes_relative_images() {
        let html = render("![diagram](img/arch.png)", Some("note-01"));
        assert!(html.contains(r#"src="note-01/img/arch.png""#), "{html}");
    }

    #[test]
    fn strips_dot_slash_before_prefixing() {
        let html = render("![d](./img/arch.png)", Some("note-01/"));
        assert!(html.contains(r#"src="note-01/img/arch.png""#), "{html}");
    }

    #[test]
    fn leaves_absolute_targets_alone() {
        let html = render(
            "![a](https://cdn.example/a.png) [b](/topic/b) [c](#top) [d](mailto:x@y.z)",
            Some("note-01"),
        );
        assert!(html.contains(r#"src="https://cdn.example/a.png""#));
        assert!(html.contains(r#"href="/topic/b""#));
        assert!(html.contains(r##"href="#top""##));
        assert!(html.contains(r#"href="mailto:x@y.z""#));
    }

    #[test]
    fn prefixes_relative_links() {
        let html = render("[slides](archives/slides.pdf)", Some("note-01"));
        assert!(html.contains(r#"href="note-01/archives/slides.pdf""#), "{html}");
    }

    #[test]
    fn no_prefix_without_asset_prefix() {
        let html = render("![diagram](img/arch.png)", None);
        assert!(html.contains(r#"src="img/arch.png""#));
        let html = render("![diagram](img/arch.png)", Some(""));
        assert!(html.contains(r#"src="img/arch.png""#));
    }

    #[test]
    fn relative_detection() {
        assert!(is_relative("img/a.png"));
        assert!(is_relative("a.png"));
        assert!(is_relative("dir/with:colon.png"));
        assert!(!is_relative("http://x/a.png"));
        assert!(!is_relative("data:image/png;base64,AAAA"));
        assert!(!is_relative("/abs.png"));
        assert!(!is_relative(""));
    }
}
