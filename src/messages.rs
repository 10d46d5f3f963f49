//! Localized user-facing text.
//!
//! One static table per [`Language`]. Error detail is never localized; only
//! the short messages a user sees are.

use crate::input::Language;
use crate::platform::Platform;

pub struct UiText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub results: &'static str,
    pub copy: &'static str,
    pub copied: &'static str,
    pub download: &'static str,
    /// Shown for every failure except a validation failure.
    pub error: &'static str,
    /// Shown when a required field is missing.
    pub fill_all: &'static str,
    pub pinterest_title: &'static str,
    pub pinterest_desc: &'static str,
    pub youtube_title: &'static str,
    pub youtube_desc: &'static str,
    pub words: &'static str,
    pub characters: &'static str,
}

static EN: UiText = UiText {
    title: "Social Media AI Generator",
    subtitle: "Create optimized posts and adapt your image for all platforms.",
    results: "Generated Results",
    copy: "Copy",
    copied: "Copied!",
    download: "Download",
    error: "Something went wrong. Please try again.",
    fill_all: "Please fill in all fields, including the image.",
    pinterest_title: "📌 Pin Title",
    pinterest_desc: "📄 Pin Description",
    youtube_title: "🎬 Video Title",
    youtube_desc: "📝 Video Description",
    words: "Words",
    characters: "Characters",
};

static AR: UiText = UiText {
    title: "مولد محتوى التواصل الاجتماعي",
    subtitle: "أنشئ منشورات احترافية وعدّل صورتك لتناسب جميع المنصات.",
    results: "النتائج المولدة",
    copy: "نسخ",
    copied: "تم النسخ!",
    download: "تحميل",
    error: "حدث خطأ ما. يرجى المحاولة مرة أخرى.",
    fill_all: "يرجى ملء جميع الحقول، بما في ذلك الصورة.",
    pinterest_title: "📌 عنوان المنشور",
    pinterest_desc: "📄 وصف المنشور",
    youtube_title: "🎬 عنوان الفيديو",
    youtube_desc: "📝 وصف الفيديو",
    words: "كلمة",
    characters: "حرف",
};

pub fn ui_text(language: Language) -> &'static UiText {
    match language {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}

/// Labels for the title and description of a titled post.
pub fn titled_labels(platform: Platform, language: Language) -> (&'static str, &'static str) {
    let t = ui_text(language);
    match platform {
        Platform::Pinterest => (t.pinterest_title, t.pinterest_desc),
        Platform::Youtube => (t.youtube_title, t.youtube_desc),
        _ => ("Title", "Description"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_have_distinct_messages() {
        assert_eq!(ui_text(Language::En).error, "Something went wrong. Please try again.");
        assert_eq!(ui_text(Language::Ar).words, "كلمة");
        assert_ne!(ui_text(Language::En).fill_all, ui_text(Language::Ar).fill_all);
    }

    #[test]
    fn titled_labels_per_platform() {
        assert_eq!(
            titled_labels(Platform::Youtube, Language::En),
            ("🎬 Video Title", "📝 Video Description")
        );
        assert_eq!(
            titled_labels(Platform::Pinterest, Language::Ar).0,
            "📌 عنوان المنشور"
        );
        assert_eq!(titled_labels(Platform::Vk, Language::En), ("Title", "Description"));
    }
}
