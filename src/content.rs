//! Static site copy in both languages.

use crate::model::{Bilingual, DetailKind};

/// Hero headline, one entry per fill line.
pub const HEADLINE: [Bilingual; 2] = [
    Bilingual {
        en: "Design, code and",
        zh: "设计、代码与",
    },
    Bilingual {
        en: "everything in between",
        zh: "两者之间的一切",
    },
];

/// Text typed by the hero scroll indicator.
pub const SCROLL_INDICATOR: Bilingual = Bilingual {
    en: "Scroll to explore",
    zh: "向下滑动以浏览",
};

/// Text typed inside the design detail overlay.
pub const DESIGN_PROMPT: Bilingual = Bilingual {
    en: "scroll to explore",
    zh: "滑动以探索",
};

/// Titles of the default four content pages.
pub const PAGE_TITLES: [Bilingual; 4] = [
    Bilingual {
        en: "Green Apple's Thousand and One Nights",
        zh: "青苹果的一千零一夜",
    },
    Bilingual {
        en: "AI Coding",
        zh: "AI 编程",
    },
    Bilingual {
        en: "Graphic Design",
        zh: "平面设计",
    },
    Bilingual {
        en: "Photography",
        zh: "摄影",
    },
];

/// Title for page `index`, `None` past the default four.
pub fn page_title(index: usize) -> Option<Bilingual> {
    PAGE_TITLES.get(index).copied()
}

/// Title of a detail overlay.
pub fn overlay_title(kind: DetailKind) -> Bilingual {
    match kind {
        DetailKind::Apple => Bilingual {
            en: "Inside the apple",
            zh: "走进青苹果",
        },
        DetailKind::AiCoding => Bilingual {
            en: "Building with AI",
            zh: "与 AI 一起构建",
        },
        DetailKind::Design => Bilingual {
            en: "Design reel",
            zh: "设计合集",
        },
    }
}

/// Label of the language toggle: the language it switches to.
pub const LANGUAGE_TOGGLE: Bilingual = Bilingual {
    en: "中文",
    zh: "EN",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Language;

    #[test]
    fn headline_matches_default_line_count() {
        let config = crate::config::NavConfig::default();
        assert_eq!(HEADLINE.len(), config.text_fill.line_ranges.len());
    }

    #[test]
    fn page_titles_cover_default_pages_only() {
        assert!(page_title(3).is_some());
        assert!(page_title(4).is_none());
        assert_eq!(page_title(1).map(|t| t.get(Language::Zh)), Some("AI 编程"));
    }

    #[test]
    fn toggle_label_names_the_other_language() {
        assert_eq!(LANGUAGE_TOGGLE.get(Language::En), "中文");
    }
}
