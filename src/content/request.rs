//! Assembles the generation request from user input.
//!
//! Pure data assembly: no network, no clock except in
//! [`build_request_for_today`].

use super::schema::response_schema;
use crate::input::{Language, UserInput};
use crate::platform::Platform;
use chrono::NaiveDate;
use serde_json::Value;
use std::fmt::Write as _;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Everything the generation API needs for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub schema: Value,
    pub temperature: f32,
    pub language: Language,
}

/// Long English date, e.g. `Friday, October 16, 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Build the request for `input` as of `date`.
///
/// `language` only decides which language wins when the description mixes
/// several; the output follows the description's own language otherwise.
pub fn build_request(input: &UserInput, language: Language, date: NaiveDate) -> ContentRequest {
    ContentRequest {
        system_instruction: system_instruction(language),
        prompt: prompt(input, date),
        schema: response_schema(),
        temperature: DEFAULT_TEMPERATURE,
        language,
    }
}

/// [`build_request`] with the local current date.
pub fn build_request_for_today(input: &UserInput, language: Language) -> ContentRequest {
    build_request(input, language, chrono::Local::now().date_naive())
}

fn platform_list() -> String {
    let names: Vec<&str> = Platform::ALL.iter().map(|p| p.display_name()).collect();
    names.join(", ")
}

fn platform_specifics(platform: Platform) -> &'static str {
    match platform {
        Platform::Facebook => "Conversational, moderate length, link preview focus.",
        Platform::Instagram => {
            "Visual storytelling, \"Link in Bio\" call to action, a block of 15-20 relevant hashtags at the bottom."
        }
        Platform::Twitter => {
            "Concise, trending hashtags, direct link. The post MUST NOT exceed 300 characters."
        }
        Platform::Linkedin => {
            "Professional, industry-focused, clear value proposition, bullet points where applicable, 3-5 hashtags."
        }
        Platform::Vk => {
            "Informal yet informative, community-focused, structured like a Facebook post."
        }
        Platform::Pinterest => "SEO-heavy title and description.",
        Platform::Youtube => {
            "High-impact title (under 60 characters preferred, never over 100). Detailed SEO description where the first two sentences matter most; put the link in the first paragraph and 3-5 hashtags at the bottom."
        }
        Platform::Tiktok => {
            "Energetic hook in the first line, short caption, \"Link in Bio\" call to action, 3-6 trending hashtags."
        }
    }
}

fn system_instruction(language: Language) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are an expert Social Media Manager and SEO Specialist.\n\
         Your task is to create highly optimized and visually appealing social media posts for {}.",
        platform_list()
    );
    out.push_str("\nGuidelines:\n");
    out.push_str("1. Tone: professional, engaging and persuasive.\n");
    let _ = writeln!(
        out,
        "2. Language: the output MUST be in the same language as the user's description. If mixed, prioritize {}.",
        language.english_name()
    );
    out.push_str(
        "3. Emoji strategy: decorate every post with relevant, well-placed emojis that improve \
         readability and draw attention to key points such as the call to action. Match the \
         platform's tone: more playful on Instagram, more restrained on LinkedIn.\n",
    );

    let linked: Vec<&str> = Platform::ALL
        .iter()
        .filter(|p| p.allows_inline_link())
        .map(|p| p.display_name())
        .collect();
    let bio: Vec<&str> = Platform::ALL
        .iter()
        .filter(|p| !p.allows_inline_link())
        .map(|p| p.display_name())
        .collect();
    let _ = writeln!(
        out,
        "4. Structure: use line breaks for readability and the focus keyword naturally. \
         Include the product URL where it is clickable ({}). For {} use a \"Link in Bio\" \
         call to action instead of the raw URL.",
        linked.join(", "),
        bio.join(" and ")
    );

    out.push_str("5. Platform specifics:\n");
    for platform in Platform::ALL {
        let _ = writeln!(
            out,
            "   - {}: {}",
            platform.display_name(),
            platform_specifics(platform)
        );
    }

    out.push_str(
        "6. Hashtag strategy: select the strongest, highest-converting hashtags for US and \
         European markets. Consider the current date and season for trending tags, and mix \
         broad niche tags with specific long-tail tags.\n",
    );
    out
}

fn prompt(input: &UserInput, date: NaiveDate) -> String {
    format!(
        "Product Description: {}\n\
         Product URL: {}\n\
         Focus Keyword: {}\n\
         Current Date for Trends: {}\n\n\
         Generate posts for all platforms ({}). Ensure hashtags are optimized for US/EU markets at this specific time.",
        input.description.trim(),
        input.product_url.trim(),
        input.keyword.trim(),
        format_long_date(date),
        platform_list()
    )
}
