//! Download filenames for adapted images.
//!
//! Every exported image is named `<product>-<platform>-image.<ext>`:
//! - `<product>` is a slug of the focus keyword ([`product_slug`])
//! - `<platform>` is the platform key (`tiktok`, `youtube`, ...)
//! - `<ext>` is the MIME subtype of the image (`png`, `jpeg`, `webp`)
//!
//! ## Slugs
//!
//! Letters and digits are kept (lowercased, any script); every other run of
//! characters becomes a single dash. Leading and trailing dashes are dropped.
//! - `"Stoneware Mug"` → `"stoneware-mug"`
//! - `"  50% OFF!! "` → `"50-off"`
//! - `"قهوة عربية"` → `"قهوة-عربية"`
//! - `"!!!"` → `"product"` (fallback)

use crate::imaging::MediaType;
use crate::platform::Platform;

/// Slug used when the keyword has no letters or digits.
pub const FALLBACK_PRODUCT: &str = "product";

/// Filename-safe slug of a product keyword.
pub fn product_slug(keyword: &str) -> String {
    let mut slug = String::with_capacity(keyword.len());
    let mut pending_dash = false;
    for c in keyword.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        FALLBACK_PRODUCT.to_string()
    } else {
        slug
    }
}

/// `<product>-<platform>-image.<ext>` for one adapted image.
pub fn image_filename(product: &str, platform: Platform, media_type: MediaType) -> String {
    format!("{}-{}-image.{}", product, platform.key(), media_type.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_dashes_spaces() {
        assert_eq!(product_slug("Stoneware Mug"), "stoneware-mug");
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(product_slug("  50% OFF!! "), "50-off");
        assert_eq!(product_slug("a--b__c"), "a-b-c");
    }

    #[test]
    fn slug_strips_path_separators() {
        assert_eq!(product_slug("../etc/passwd"), "etc-passwd");
        assert_eq!(product_slug(r"C:\tmp"), "c-tmp");
    }

    #[test]
    fn slug_keeps_non_latin_letters() {
        assert_eq!(product_slug("قهوة عربية"), "قهوة-عربية");
    }

    #[test]
    fn slug_falls_back_when_empty() {
        assert_eq!(product_slug(""), "product");
        assert_eq!(product_slug("!!!"), "product");
    }

    #[test]
    fn filename_uses_mime_subtype() {
        assert_eq!(
            image_filename("mug", Platform::Tiktok, MediaType::Jpeg),
            "mug-tiktok-image.jpeg"
        );
        assert_eq!(
            image_filename("mug", Platform::Youtube, MediaType::WebP),
            "mug-youtube-image.webp"
        );
    }
}
