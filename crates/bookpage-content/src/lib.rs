//! Content entity types for the bookpage landing site.
//!
//! Two families of entities recur throughout the storage layer:
//!
//! - **Singleton sections** ([`sections`]): at most one live instance each
//!   (hero, author, site settings, ...). Every field has a literal default;
//!   the `Default` impls here are the single source of those defaults,
//!   consulted by every storage backend so a freshly created section looks
//!   identical regardless of where it is stored.
//! - **Collections** ([`collections`]): zero-or-many independently
//!   addressable records (testimonials, milestones, footer links, ...),
//!   each with an opaque string id assigned by the backend.
//!
//! All types serialize with camelCase field names, which is also the
//! on-disk document format of the document backend.

pub mod collections;
pub mod progress;
pub mod sections;

pub use collections::{
    Article, ArticlePatch, BonusItem, BonusItemPatch, FooterCategory, FooterCategoryPatch,
    FooterLink, FooterLinkPatch, LearningPoint, LearningPointPatch, Milestone, MilestonePatch,
    NewArticle, NewBonusItem, NewFooterCategory, NewFooterLink, NewLearningPoint, NewMilestone,
    NewSeoMetadata, NewSocialLink, NewTestimonial, NewThemeSettings, NewVideo, SeoMetadata,
    SeoMetadataPatch, SocialLink, SocialLinkPatch, Testimonial, TestimonialPatch, ThemeSettings,
    ThemeSettingsPatch, Video, VideoPatch,
};
pub use progress::overall_progress;
pub use sections::{
    AboutBook, AboutBookPatch, Author, AuthorPatch, BonusSection, BonusSectionPatch, Featured,
    FeaturedPatch, GuaranteeSection, GuaranteeSectionPatch, Hero, HeroPatch, Landing, LandingPatch,
    LearningPointsSection, LearningPointsSectionPatch, QuestionsSection, QuestionsSectionPatch,
    Quote, QuotePatch, ScholarshipSection, ScholarshipSectionPatch, SiteSettings,
    SiteSettingsPatch, TestimonialSection, TestimonialSectionPatch, YoutubeFrameworkSection,
    YoutubeFrameworkSectionPatch,
};
