//! Static HTML report of a submission.
//!
//! One page with a card per platform: the adapted image, the generated copy
//! with hashtags and the focus keyword highlighted, a copy button, a download
//! link and a word/character footer.
//!
//! ## Features
//!
//! - **Direction**: `dir="rtl"` for Arabic, `ltr` otherwise
//! - **Theme**: `data-theme` on `<html>` picks the light or dark palette
//! - **Configurable colors**: CSS custom properties generated from the config
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/report.css`: Base styles (colors injected from config)
//! - `static/copy.js`: Clipboard copy for the per-card buttons
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! generated text is escaped automatically.

use crate::config::{ColorConfig, generate_color_css};
use crate::content::PlatformContent;
use crate::generate::SubmissionResult;
use crate::imaging::AdaptedImage;
use crate::input::Language;
use crate::messages::{titled_labels, ui_text};
use crate::naming::image_filename;
use crate::platform::Platform;
use crate::state::Theme;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/report.css");
const JS: &str = include_str!("../static/copy.js");

// ============================================================================
// Highlighting
// ============================================================================

/// A run of post text with its highlight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Hashtag(&'a str),
    Keyword(&'a str),
}

/// Split `text` into whitespace and non-whitespace runs and classify each.
///
/// Whitespace is kept verbatim so line breaks survive. A token starting with
/// `#` is a hashtag; otherwise a token containing the keyword
/// (case-insensitive) is a keyword match. A blank keyword matches nothing.
pub fn highlight_segments<'a>(text: &'a str, keyword: &str) -> Vec<Segment<'a>> {
    let keyword = keyword.trim().to_lowercase();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                segments.push(classify(&text[start..i], &keyword));
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        segments.push(classify(&text[start..], &keyword));
    }
    segments
}

fn classify<'a>(token: &'a str, keyword: &str) -> Segment<'a> {
    if token.starts_with('#') {
        Segment::Hashtag(token)
    } else if !keyword.is_empty() && token.to_lowercase().contains(keyword) {
        Segment::Keyword(token)
    } else {
        Segment::Plain(token)
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// What the report needs besides the result itself.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub keyword: &'a str,
    /// Slug used in image filenames.
    pub product: &'a str,
    pub language: Language,
    pub theme: Theme,
    pub colors: &'a ColorConfig,
}

/// Renders the base HTML document structure
fn base_document(title: &str, ctx: &ReportContext, content: Markup) -> Markup {
    let css = format!("{}\n\n{}", generate_color_css(ctx.colors), CSS_STATIC);
    let dir = if ctx.language.is_rtl() { "rtl" } else { "ltr" };
    html! {
        (DOCTYPE)
        html lang=(ctx.language.code()) dir=(dir) data-theme=(ctx.theme.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn highlighted(text: &str, keyword: &str) -> Markup {
    html! {
        @for segment in highlight_segments(text, keyword) {
            @match segment {
                Segment::Plain(s) => { (s) }
                Segment::Hashtag(s) => { span.hashtag { (s) } }
                Segment::Keyword(s) => { span.keyword { (s) } }
            }
        }
    }
}

fn post_body(platform: Platform, content: &PlatformContent, ctx: &ReportContext) -> Markup {
    match content {
        PlatformContent::Text(text) => html! {
            div.post-text { (highlighted(text, ctx.keyword)) }
        },
        PlatformContent::Titled(post) => {
            let (title_label, desc_label) = titled_labels(platform, ctx.language);
            html! {
                span.post-label { (title_label) }
                div.post-title { (highlighted(&post.title, ctx.keyword)) }
                span.post-label { (desc_label) }
                div.post-text { (highlighted(&post.description, ctx.keyword)) }
            }
        }
    }
}

/// Renders one platform card
fn post_card(
    platform: Platform,
    content: &PlatformContent,
    image: Option<&AdaptedImage>,
    ctx: &ReportContext,
) -> Markup {
    let t = ui_text(ctx.language);
    let stats = content.stats();
    let copy_id = format!("copy-{}", platform.key());

    html! {
        article.post-card id=(platform.key()) {
            header.post-card-header {
                span { (platform.display_name()) }
                button.copy-button type="button"
                    data-copy-target=(copy_id)
                    data-copy-label=(t.copy)
                    data-copied-label=(t.copied) { (t.copy) }
            }
            @if let Some(img) = image {
                @let file = image_filename(ctx.product, platform, img.media_type);
                img.post-card-image src=(file) alt=(platform.display_name())
                    width=(img.width) height=(img.height) loading="lazy";
                div.post-card-image-meta {
                    span { (img.width) "×" (img.height) }
                    a.download-link href=(file) download=(file) { (t.download) }
                }
            }
            div.post-card-body {
                (post_body(platform, content, ctx))
            }
            // The parser drops one newline right after `<textarea>`
            textarea id=(copy_id) hidden readonly { "\n" (content.text_to_copy()) }
            footer.post-card-footer {
                span { strong { (stats.words) } " " (t.words) }
                span { strong { (stats.characters) } " " (t.characters) }
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Render the full report page for `result`.
///
/// Cards follow [`Platform::ALL`] order.
pub fn render_report(result: &SubmissionResult, ctx: &ReportContext) -> Markup {
    let t = ui_text(ctx.language);
    let content = html! {
        header.report-header {
            h1 { (t.title) }
            p.subtitle { (t.subtitle) }
            h2 { (t.results) }
        }
        main.card-grid {
            @for platform in Platform::ALL {
                @if let Some(content) = result.posts.get(&platform) {
                    (post_card(platform, content, result.images.get(&platform), ctx))
                }
            }
        }
    };
    base_document(t.title, ctx, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PostStats, TitledPost};
    use crate::imaging::MediaType;
    use std::collections::BTreeMap;

    // =========================================================================
    // Highlighting tests
    // =========================================================================

    #[test]
    fn highlight_preserves_text_exactly() {
        let text = "Best mug\n\n  ever #coffee";
        let joined: String = highlight_segments(text, "mug")
            .iter()
            .map(|s| match s {
                Segment::Plain(t) | Segment::Hashtag(t) | Segment::Keyword(t) => *t,
            })
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn highlight_classifies_hashtags_and_keywords() {
        let segments = highlight_segments("New MUGS! #mug", "mug");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("New"),
                Segment::Plain(" "),
                Segment::Keyword("MUGS!"),
                Segment::Plain(" "),
                Segment::Hashtag("#mug"),
            ]
        );
    }

    #[test]
    fn blank_keyword_matches_nothing() {
        let segments = highlight_segments("a b", "  ");
        assert!(segments.iter().all(|s| matches!(s, Segment::Plain(_))));
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert!(highlight_segments("", "x").is_empty());
    }

    // =========================================================================
    // Page renderer tests
    // =========================================================================

    fn result() -> SubmissionResult {
        let mut posts = BTreeMap::new();
        posts.insert(
            Platform::Facebook,
            PlatformContent::Text("Try our mug <b>now</b> #coffee".into()),
        );
        posts.insert(
            Platform::Youtube,
            PlatformContent::Titled(TitledPost {
                title: "Mug review".into(),
                description: "Watch it".into(),
            }),
        );
        let mut images = BTreeMap::new();
        images.insert(
            Platform::Facebook,
            AdaptedImage {
                width: 1080,
                height: 1080,
                media_type: MediaType::Jpeg,
                bytes: vec![1, 2, 3],
            },
        );
        SubmissionResult { posts, images }
    }

    fn render(language: Language, theme: Theme) -> String {
        let colors = ColorConfig::default();
        let ctx = ReportContext {
            keyword: "mug",
            product: "mug",
            language,
            theme,
            colors: &colors,
        };
        render_report(&result(), &ctx).into_string()
    }

    #[test]
    fn report_includes_doctype_and_direction() {
        let html = render(Language::En, Theme::Light);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"dir="ltr""#));
        assert!(html.contains(r#"data-theme="light""#));

        let html = render(Language::Ar, Theme::Dark);
        assert!(html.contains(r#"lang="ar""#));
        assert!(html.contains(r#"dir="rtl""#));
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains("كلمة"));
    }

    #[test]
    fn report_links_images_by_download_name() {
        let html = render(Language::En, Theme::Light);
        assert!(html.contains(r#"src="mug-facebook-image.jpeg""#));
        assert!(html.contains(r#"download="mug-facebook-image.jpeg""#));
        assert!(html.contains("1080×1080"));
    }

    #[test]
    fn report_highlights_and_escapes() {
        let html = render(Language::En, Theme::Light);
        assert!(html.contains(r#"<span class="hashtag">#coffee</span>"#));
        assert!(html.contains(r#"<span class="keyword">mug</span>"#));
        assert!(!html.contains("<b>now</b>"));
        assert!(html.contains("&lt;b&gt;now&lt;/b&gt;"));
    }

    #[test]
    fn titled_card_uses_localized_labels() {
        let html = render(Language::En, Theme::Light);
        assert!(html.contains("🎬 Video Title"));
        assert!(html.contains("📝 Video Description"));
    }

    #[test]
    fn footer_shows_stats() {
        let html = render(Language::En, Theme::Light);
        let stats = PostStats::of("Mug review\n\nWatch it");
        assert!(html.contains(&format!("<strong>{}</strong> Words", stats.words)));
    }

    #[test]
    fn header_shows_subtitle() {
        let html = render(Language::En, Theme::Light);
        assert!(html.contains("Create optimized posts and adapt your image for all platforms."));
        let html = render(Language::Ar, Theme::Light);
        assert!(html.contains("أنشئ منشورات احترافية"));
    }

    #[test]
    fn copy_button_carries_both_labels() {
        let html = render(Language::En, Theme::Light);
        assert!(html.contains(r#"data-copy-label="Copy""#));
        assert!(html.contains(r#"data-copied-label="Copied!""#));
        // The script restores the stored label, not whatever is showing
        assert!(JS.contains("dataset.copyLabel"));
    }

    /// Text between the opening `<textarea id="copy-{key}" ...>` and its close.
    fn textarea_body<'a>(html: &'a str, key: &str) -> &'a str {
        let start = html.find(&format!(r#"id="copy-{key}""#)).unwrap();
        let open_end = start + html[start..].find('>').unwrap() + 1;
        let close = open_end + html[open_end..].find("</textarea>").unwrap();
        &html[open_end..close]
    }

    #[test]
    fn copy_text_keeps_leading_newline() {
        let mut result = result();
        result
            .posts
            .insert(Platform::Vk, PlatformContent::Text("\nStarts on line two".into()));
        let colors = ColorConfig::default();
        let ctx = ReportContext {
            keyword: "mug",
            product: "mug",
            language: Language::En,
            theme: Theme::Light,
            colors: &colors,
        };
        let html = render_report(&result, &ctx).into_string();

        // One newline is swallowed by the HTML parser; the rest is the exact copy text
        let body = textarea_body(&html, "vk");
        assert_eq!(body, "\n\nStarts on line two");
        assert_eq!(&body[1..], result.posts[&Platform::Vk].text_to_copy());
    }

    #[test]
    fn cards_follow_platform_order() {
        let html = render(Language::En, Theme::Light);
        let fb = html.find(r#"id="facebook""#).unwrap();
        let yt = html.find(r#"id="youtube""#).unwrap();
        assert!(fb < yt);
    }
}
