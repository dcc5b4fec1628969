//! The [`ContentStorage`] trait: the contract every backend satisfies.
//!
//! One implementation is selected at process start from configuration and
//! handed to consumers as an `Arc<dyn ContentStorage>`; the two production
//! backends never serve from the same process. The migration tool is the
//! only consumer holding two handles at once.
//!
//! # Contract
//!
//! **Singleton sections** expose a getter returning `Ok(None)` when the
//! section has never been written, and an `update_*` method that never
//! reports absence: it creates the section from its `Default` values with
//! the patch applied when missing, otherwise patches the stored record
//! field-wise (`None` keeps, `Some` overwrites) and stamps `updated_at`.
//!
//! **Collections** expose list/get/create/update/delete. `update` returns
//! `Ok(None)` and `delete` returns `Ok(false)` for a missing id, never an
//! error. Ids are opaque strings: the relational backend uses decimal row
//! ids, the document backend UUID strings, and an id whose format the
//! backend does not recognize is simply not found. Nothing may assume an
//! id format survives a backend migration.
//!
//! **Ordering**: learning points, footer categories, footer links, bonus
//! items and milestones list ascending by `order_index`; other collections
//! return backend-native order with no guarantee.
//!
//! **Errors**: only infrastructure failures (connection, query, corrupt
//! data) surface as `Err`; they are logged at the storage call site and
//! propagated for the caller to map to a 500-equivalent.

use async_trait::async_trait;

use bookpage_content::{
    AboutBook, AboutBookPatch, Article, ArticlePatch, Author, AuthorPatch, BonusItem,
    BonusItemPatch, BonusSection, BonusSectionPatch, Featured, FeaturedPatch, FooterCategory,
    FooterCategoryPatch, FooterLink, FooterLinkPatch, GuaranteeSection, GuaranteeSectionPatch,
    Hero, HeroPatch, Landing, LandingPatch, LearningPoint, LearningPointPatch,
    LearningPointsSection, LearningPointsSectionPatch, Milestone, MilestonePatch, NewArticle,
    NewBonusItem, NewFooterCategory, NewFooterLink, NewLearningPoint, NewMilestone,
    NewSeoMetadata, NewSocialLink, NewTestimonial, NewThemeSettings, NewVideo, QuestionsSection,
    QuestionsSectionPatch, Quote, QuotePatch, ScholarshipSection, ScholarshipSectionPatch,
    SeoMetadata, SeoMetadataPatch, SiteSettings, SiteSettingsPatch, SocialLink, SocialLinkPatch,
    Testimonial, TestimonialPatch, TestimonialSection, TestimonialSectionPatch, ThemeSettings,
    ThemeSettingsPatch, Video, VideoPatch, YoutubeFrameworkSection, YoutubeFrameworkSectionPatch,
};

use crate::error::Result;

/// Storage abstraction for all bookpage content.
///
/// See the module docs for the full behavioral contract.
#[async_trait]
pub trait ContentStorage: Send + Sync {
    // --- Singleton sections ---

    async fn hero(&self) -> Result<Option<Hero>>;
    async fn update_hero(&self, patch: HeroPatch) -> Result<Hero>;

    async fn featured(&self) -> Result<Option<Featured>>;
    async fn update_featured(&self, patch: FeaturedPatch) -> Result<Featured>;

    async fn quote(&self) -> Result<Option<Quote>>;
    async fn update_quote(&self, patch: QuotePatch) -> Result<Quote>;

    async fn landing(&self) -> Result<Option<Landing>>;
    async fn update_landing(&self, patch: LandingPatch) -> Result<Landing>;

    async fn learning_points_section(&self) -> Result<Option<LearningPointsSection>>;
    async fn update_learning_points_section(
        &self,
        patch: LearningPointsSectionPatch,
    ) -> Result<LearningPointsSection>;

    async fn testimonial_section(&self) -> Result<Option<TestimonialSection>>;
    async fn update_testimonial_section(
        &self,
        patch: TestimonialSectionPatch,
    ) -> Result<TestimonialSection>;

    async fn about_book(&self) -> Result<Option<AboutBook>>;
    async fn update_about_book(&self, patch: AboutBookPatch) -> Result<AboutBook>;

    async fn author(&self) -> Result<Option<Author>>;
    async fn update_author(&self, patch: AuthorPatch) -> Result<Author>;

    async fn bonus_section(&self) -> Result<Option<BonusSection>>;
    async fn update_bonus_section(&self, patch: BonusSectionPatch) -> Result<BonusSection>;

    async fn guarantee_section(&self) -> Result<Option<GuaranteeSection>>;
    async fn update_guarantee_section(
        &self,
        patch: GuaranteeSectionPatch,
    ) -> Result<GuaranteeSection>;

    async fn scholarship_section(&self) -> Result<Option<ScholarshipSection>>;
    async fn update_scholarship_section(
        &self,
        patch: ScholarshipSectionPatch,
    ) -> Result<ScholarshipSection>;

    async fn youtube_framework_section(&self) -> Result<Option<YoutubeFrameworkSection>>;
    async fn update_youtube_framework_section(
        &self,
        patch: YoutubeFrameworkSectionPatch,
    ) -> Result<YoutubeFrameworkSection>;

    async fn questions_section(&self) -> Result<Option<QuestionsSection>>;
    async fn update_questions_section(
        &self,
        patch: QuestionsSectionPatch,
    ) -> Result<QuestionsSection>;

    async fn site_settings(&self) -> Result<Option<SiteSettings>>;
    async fn update_site_settings(&self, patch: SiteSettingsPatch) -> Result<SiteSettings>;

    // --- Testimonials ---

    /// List testimonials, newest-first not guaranteed (backend-native
    /// order). `limit` caps the result for admin paging.
    async fn testimonials(&self, limit: Option<usize>) -> Result<Vec<Testimonial>>;
    async fn testimonial(&self, id: &str) -> Result<Option<Testimonial>>;
    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial>;
    async fn update_testimonial(
        &self,
        id: &str,
        patch: TestimonialPatch,
    ) -> Result<Option<Testimonial>>;
    async fn delete_testimonial(&self, id: &str) -> Result<bool>;

    // --- Articles ---

    async fn articles(&self, limit: Option<usize>) -> Result<Vec<Article>>;
    async fn article(&self, id: &str) -> Result<Option<Article>>;
    async fn create_article(&self, new: NewArticle) -> Result<Article>;
    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Option<Article>>;
    async fn delete_article(&self, id: &str) -> Result<bool>;

    // --- Videos ---

    async fn videos(&self, limit: Option<usize>) -> Result<Vec<Video>>;
    async fn video(&self, id: &str) -> Result<Option<Video>>;
    async fn create_video(&self, new: NewVideo) -> Result<Video>;
    async fn update_video(&self, id: &str, patch: VideoPatch) -> Result<Option<Video>>;
    async fn delete_video(&self, id: &str) -> Result<bool>;

    // --- Learning points (ordered) ---

    async fn learning_points(&self) -> Result<Vec<LearningPoint>>;
    async fn learning_point(&self, id: &str) -> Result<Option<LearningPoint>>;
    async fn create_learning_point(&self, new: NewLearningPoint) -> Result<LearningPoint>;
    async fn update_learning_point(
        &self,
        id: &str,
        patch: LearningPointPatch,
    ) -> Result<Option<LearningPoint>>;
    async fn delete_learning_point(&self, id: &str) -> Result<bool>;

    // --- Footer categories (ordered) ---

    async fn footer_categories(&self) -> Result<Vec<FooterCategory>>;
    async fn footer_category(&self, id: &str) -> Result<Option<FooterCategory>>;
    async fn create_footer_category(&self, new: NewFooterCategory) -> Result<FooterCategory>;
    async fn update_footer_category(
        &self,
        id: &str,
        patch: FooterCategoryPatch,
    ) -> Result<Option<FooterCategory>>;
    async fn delete_footer_category(&self, id: &str) -> Result<bool>;

    // --- Footer links (ordered) ---

    async fn footer_links(&self) -> Result<Vec<FooterLink>>;
    async fn footer_link(&self, id: &str) -> Result<Option<FooterLink>>;
    async fn create_footer_link(&self, new: NewFooterLink) -> Result<FooterLink>;
    async fn update_footer_link(
        &self,
        id: &str,
        patch: FooterLinkPatch,
    ) -> Result<Option<FooterLink>>;
    async fn delete_footer_link(&self, id: &str) -> Result<bool>;

    // --- Social links ---

    async fn social_links(&self) -> Result<Vec<SocialLink>>;
    async fn social_link(&self, id: &str) -> Result<Option<SocialLink>>;
    async fn create_social_link(&self, new: NewSocialLink) -> Result<SocialLink>;
    async fn update_social_link(
        &self,
        id: &str,
        patch: SocialLinkPatch,
    ) -> Result<Option<SocialLink>>;
    async fn delete_social_link(&self, id: &str) -> Result<bool>;

    // --- Bonus items (ordered) ---

    async fn bonus_items(&self) -> Result<Vec<BonusItem>>;
    async fn bonus_item(&self, id: &str) -> Result<Option<BonusItem>>;
    async fn create_bonus_item(&self, new: NewBonusItem) -> Result<BonusItem>;
    async fn update_bonus_item(
        &self,
        id: &str,
        patch: BonusItemPatch,
    ) -> Result<Option<BonusItem>>;
    async fn delete_bonus_item(&self, id: &str) -> Result<bool>;

    // --- Milestones (ordered) ---

    async fn milestones(&self) -> Result<Vec<Milestone>>;
    async fn milestone(&self, id: &str) -> Result<Option<Milestone>>;
    async fn create_milestone(&self, new: NewMilestone) -> Result<Milestone>;
    async fn update_milestone(
        &self,
        id: &str,
        patch: MilestonePatch,
    ) -> Result<Option<Milestone>>;
    async fn delete_milestone(&self, id: &str) -> Result<bool>;

    // --- Themes ---

    async fn themes(&self) -> Result<Vec<ThemeSettings>>;
    async fn theme(&self, id: &str) -> Result<Option<ThemeSettings>>;
    /// New themes start inactive; use [`Self::set_active_theme`].
    async fn create_theme(&self, new: NewThemeSettings) -> Result<ThemeSettings>;
    async fn update_theme(
        &self,
        id: &str,
        patch: ThemeSettingsPatch,
    ) -> Result<Option<ThemeSettings>>;
    async fn delete_theme(&self, id: &str) -> Result<bool>;
    /// The theme currently applied site-wide, if any.
    async fn active_theme(&self) -> Result<Option<ThemeSettings>>;
    /// Make `id` the single active theme.
    ///
    /// Clears `applies_globally` everywhere else and sets it on `id` in
    /// one atomic step; after `Ok(Some(_))` exactly one theme is active.
    /// Returns `Ok(None)` when `id` does not exist, in which case the
    /// previous active theme is left untouched.
    async fn set_active_theme(&self, id: &str) -> Result<Option<ThemeSettings>>;

    // --- SEO metadata ---

    async fn seo_entries(&self) -> Result<Vec<SeoMetadata>>;
    async fn seo_entry(&self, id: &str) -> Result<Option<SeoMetadata>>;
    /// New entries start non-default; use [`Self::set_default_seo`].
    async fn create_seo_entry(&self, new: NewSeoMetadata) -> Result<SeoMetadata>;
    async fn update_seo_entry(
        &self,
        id: &str,
        patch: SeoMetadataPatch,
    ) -> Result<Option<SeoMetadata>>;
    /// Deleting the default entry is rejected at the API layer, not here.
    async fn delete_seo_entry(&self, id: &str) -> Result<bool>;
    /// The fallback entry used for pages without specific metadata.
    async fn default_seo(&self) -> Result<Option<SeoMetadata>>;
    /// Exact-page lookup; the fallback to [`Self::default_seo`] is the
    /// caller's job.
    async fn seo_for_page(&self, page: &str) -> Result<Option<SeoMetadata>>;
    /// Make `id` the single default entry. Same atomicity contract as
    /// [`Self::set_active_theme`].
    async fn set_default_seo(&self, id: &str) -> Result<Option<SeoMetadata>>;
}
