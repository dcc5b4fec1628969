//! Tree names, one per entity type.

pub(crate) const HERO: &str = "hero";
pub(crate) const FEATURED: &str = "featured";
pub(crate) const QUOTE: &str = "quote";
pub(crate) const LANDING: &str = "landing";
pub(crate) const LEARNING_POINTS_SECTION: &str = "learning_points_section";
pub(crate) const TESTIMONIAL_SECTION: &str = "testimonial_section";
pub(crate) const ABOUT_BOOK: &str = "about_book";
pub(crate) const AUTHOR: &str = "author";
pub(crate) const BONUS_SECTION: &str = "bonus_section";
pub(crate) const GUARANTEE_SECTION: &str = "guarantee_section";
pub(crate) const SCHOLARSHIP_SECTION: &str = "scholarship_section";
pub(crate) const YOUTUBE_FRAMEWORK_SECTION: &str = "youtube_framework_section";
pub(crate) const QUESTIONS_SECTION: &str = "questions_section";
pub(crate) const SITE_SETTINGS: &str = "site_settings";

pub(crate) const TESTIMONIALS: &str = "testimonials";
pub(crate) const ARTICLES: &str = "articles";
pub(crate) const VIDEOS: &str = "videos";
pub(crate) const LEARNING_POINTS: &str = "learning_points";
pub(crate) const FOOTER_CATEGORIES: &str = "footer_categories";
pub(crate) const FOOTER_LINKS: &str = "footer_links";
pub(crate) const SOCIAL_LINKS: &str = "social_links";
pub(crate) const BONUS_ITEMS: &str = "bonus_items";
pub(crate) const MILESTONES: &str = "milestones";
pub(crate) const THEME_SETTINGS: &str = "theme_settings";
pub(crate) const SEO_METADATA: &str = "seo_metadata";
