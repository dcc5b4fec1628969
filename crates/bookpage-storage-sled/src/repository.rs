//! `ContentStorage` implementation over sled trees.
//!
//! Singleton updates are the document equivalent of the relational
//! update-or-insert: read the fixed key, patch the stored document or
//! start from the shared defaults, write back. Default filling therefore
//! comes from the same `Default` impls the relational backend uses; the
//! two backends cannot drift apart field by field.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use uuid::Uuid;

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
use bookpage_storage::{ContentStorage, Result};

use crate::{SledStorage, corrupt_err, io_err, trees, valid_id};

impl SledStorage {
    /// Set a boolean flag on exactly one document of a tree and clear it
    /// everywhere else, inside a single sled transaction.
    ///
    /// The key set is captured before the transaction; the transaction
    /// re-reads every touched document, so a concurrent writer conflicts
    /// and retries rather than leaving two flagged documents behind.
    fn set_exclusive_flag<T>(
        &self,
        tree: &'static str,
        key: &str,
        flag: fn(&mut T, bool),
    ) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let t = self.tree(tree)?;
        let keys = t
            .iter()
            .keys()
            .collect::<std::result::Result<Vec<_>, sled::Error>>()
            .map_err(|e| io_err(e, tree))?;

        let outcome = t.transaction(|tx| {
            for k in &keys {
                let Some(bytes) = tx.get(k)? else {
                    continue;
                };
                let mut doc: T = serde_json::from_slice(&bytes)
                    .map_err(|e| ConflictableTransactionError::Abort(corrupt_err(e, tree)))?;
                flag(&mut doc, k.as_ref() == key.as_bytes());
                let json = serde_json::to_vec(&doc)
                    .map_err(|e| ConflictableTransactionError::Abort(corrupt_err(e, tree)))?;
                tx.insert(k.as_ref(), json)?;
            }
            Ok(())
        });

        match outcome {
            Ok(()) => {
                t.flush().map_err(|e| io_err(e, tree))?;
                Ok(())
            }
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(io_err(e, tree)),
        }
    }
}

/// Sort an ordered collection ascending by `order_index`, ties by id.
fn sort_by_order<T>(items: &mut [T], order_index: impl Fn(&T) -> i64, id: impl Fn(&T) -> String) {
    items.sort_by_key(|item| (order_index(item), id(item)));
}

#[async_trait]
impl ContentStorage for SledStorage {
    // --- Singleton sections ---

    async fn hero(&self) -> Result<Option<Hero>> {
        self.read_singleton(trees::HERO)
    }

    async fn update_hero(&self, patch: HeroPatch) -> Result<Hero> {
        let mut section: Hero = self.read_singleton(trees::HERO)?.unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::HERO, &section)?;
        Ok(section)
    }

    async fn featured(&self) -> Result<Option<Featured>> {
        self.read_singleton(trees::FEATURED)
    }

    async fn update_featured(&self, patch: FeaturedPatch) -> Result<Featured> {
        let mut section: Featured = self.read_singleton(trees::FEATURED)?.unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::FEATURED, &section)?;
        Ok(section)
    }

    async fn quote(&self) -> Result<Option<Quote>> {
        self.read_singleton(trees::QUOTE)
    }

    async fn update_quote(&self, patch: QuotePatch) -> Result<Quote> {
        let mut section: Quote = self.read_singleton(trees::QUOTE)?.unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::QUOTE, &section)?;
        Ok(section)
    }

    async fn landing(&self) -> Result<Option<Landing>> {
        self.read_singleton(trees::LANDING)
    }

    async fn update_landing(&self, patch: LandingPatch) -> Result<Landing> {
        let mut section: Landing = self.read_singleton(trees::LANDING)?.unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::LANDING, &section)?;
        Ok(section)
    }

    async fn learning_points_section(&self) -> Result<Option<LearningPointsSection>> {
        self.read_singleton(trees::LEARNING_POINTS_SECTION)
    }

    async fn update_learning_points_section(
        &self,
        patch: LearningPointsSectionPatch,
    ) -> Result<LearningPointsSection> {
        let mut section: LearningPointsSection = self
            .read_singleton(trees::LEARNING_POINTS_SECTION)?
            .unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::LEARNING_POINTS_SECTION, &section)?;
        Ok(section)
    }

    async fn testimonial_section(&self) -> Result<Option<TestimonialSection>> {
        self.read_singleton(trees::TESTIMONIAL_SECTION)
    }

    async fn update_testimonial_section(
        &self,
        patch: TestimonialSectionPatch,
    ) -> Result<TestimonialSection> {
        let mut section: TestimonialSection = self
            .read_singleton(trees::TESTIMONIAL_SECTION)?
            .unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::TESTIMONIAL_SECTION, &section)?;
        Ok(section)
    }

    async fn about_book(&self) -> Result<Option<AboutBook>> {
        self.read_singleton(trees::ABOUT_BOOK)
    }

    async fn update_about_book(&self, patch: AboutBookPatch) -> Result<AboutBook> {
        let mut section: AboutBook = self.read_singleton(trees::ABOUT_BOOK)?.unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::ABOUT_BOOK, &section)?;
        Ok(section)
    }

    async fn author(&self) -> Result<Option<Author>> {
        self.read_singleton(trees::AUTHOR)
    }

    async fn update_author(&self, patch: AuthorPatch) -> Result<Author> {
        let mut section: Author = self.read_singleton(trees::AUTHOR)?.unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::AUTHOR, &section)?;
        Ok(section)
    }

    async fn bonus_section(&self) -> Result<Option<BonusSection>> {
        self.read_singleton(trees::BONUS_SECTION)
    }

    async fn update_bonus_section(&self, patch: BonusSectionPatch) -> Result<BonusSection> {
        let mut section: BonusSection =
            self.read_singleton(trees::BONUS_SECTION)?.unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::BONUS_SECTION, &section)?;
        Ok(section)
    }

    async fn guarantee_section(&self) -> Result<Option<GuaranteeSection>> {
        self.read_singleton(trees::GUARANTEE_SECTION)
    }

    async fn update_guarantee_section(
        &self,
        patch: GuaranteeSectionPatch,
    ) -> Result<GuaranteeSection> {
        let mut section: GuaranteeSection = self
            .read_singleton(trees::GUARANTEE_SECTION)?
            .unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::GUARANTEE_SECTION, &section)?;
        Ok(section)
    }

    async fn scholarship_section(&self) -> Result<Option<ScholarshipSection>> {
        self.read_singleton(trees::SCHOLARSHIP_SECTION)
    }

    async fn update_scholarship_section(
        &self,
        patch: ScholarshipSectionPatch,
    ) -> Result<ScholarshipSection> {
        let mut section: ScholarshipSection = self
            .read_singleton(trees::SCHOLARSHIP_SECTION)?
            .unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::SCHOLARSHIP_SECTION, &section)?;
        Ok(section)
    }

    async fn youtube_framework_section(&self) -> Result<Option<YoutubeFrameworkSection>> {
        self.read_singleton(trees::YOUTUBE_FRAMEWORK_SECTION)
    }

    async fn update_youtube_framework_section(
        &self,
        patch: YoutubeFrameworkSectionPatch,
    ) -> Result<YoutubeFrameworkSection> {
        let mut section: YoutubeFrameworkSection = self
            .read_singleton(trees::YOUTUBE_FRAMEWORK_SECTION)?
            .unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::YOUTUBE_FRAMEWORK_SECTION, &section)?;
        Ok(section)
    }

    async fn questions_section(&self) -> Result<Option<QuestionsSection>> {
        self.read_singleton(trees::QUESTIONS_SECTION)
    }

    async fn update_questions_section(
        &self,
        patch: QuestionsSectionPatch,
    ) -> Result<QuestionsSection> {
        let mut section: QuestionsSection = self
            .read_singleton(trees::QUESTIONS_SECTION)?
            .unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::QUESTIONS_SECTION, &section)?;
        Ok(section)
    }

    async fn site_settings(&self) -> Result<Option<SiteSettings>> {
        self.read_singleton(trees::SITE_SETTINGS)
    }

    async fn update_site_settings(&self, patch: SiteSettingsPatch) -> Result<SiteSettings> {
        let mut section: SiteSettings =
            self.read_singleton(trees::SITE_SETTINGS)?.unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        self.write_singleton(trees::SITE_SETTINGS, &section)?;
        Ok(section)
    }

    // --- Testimonials ---

    async fn testimonials(&self, limit: Option<usize>) -> Result<Vec<Testimonial>> {
        let mut items: Vec<Testimonial> = self.read_all(trees::TESTIMONIALS)?;
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    async fn testimonial(&self, id: &str) -> Result<Option<Testimonial>> {
        self.read_by_id(trees::TESTIMONIALS, id)
    }

    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial> {
        let record = Testimonial {
            id: Uuid::new_v4().to_string(),
            quote: new.quote,
            name: new.name,
            role: new.role,
            avatar_url: new.avatar_url,
            created_at: Utc::now(),
        };
        self.write_doc(trees::TESTIMONIALS, &record.id, &record)?;
        Ok(record)
    }

    async fn update_testimonial(
        &self,
        id: &str,
        patch: TestimonialPatch,
    ) -> Result<Option<Testimonial>> {
        let Some(mut record) = self.read_by_id::<Testimonial>(trees::TESTIMONIALS, id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::TESTIMONIALS, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_testimonial(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::TESTIMONIALS, id)
    }

    // --- Articles ---

    async fn articles(&self, limit: Option<usize>) -> Result<Vec<Article>> {
        let mut items: Vec<Article> = self.read_all(trees::ARTICLES)?;
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    async fn article(&self, id: &str) -> Result<Option<Article>> {
        self.read_by_id(trees::ARTICLES, id)
    }

    async fn create_article(&self, new: NewArticle) -> Result<Article> {
        let record = Article {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            url: new.url,
            image_url: new.image_url,
            excerpt: new.excerpt,
            created_at: Utc::now(),
        };
        self.write_doc(trees::ARTICLES, &record.id, &record)?;
        Ok(record)
    }

    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Option<Article>> {
        let Some(mut record) = self.read_by_id::<Article>(trees::ARTICLES, id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::ARTICLES, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_article(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::ARTICLES, id)
    }

    // --- Videos ---

    async fn videos(&self, limit: Option<usize>) -> Result<Vec<Video>> {
        let mut items: Vec<Video> = self.read_all(trees::VIDEOS)?;
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    async fn video(&self, id: &str) -> Result<Option<Video>> {
        self.read_by_id(trees::VIDEOS, id)
    }

    async fn create_video(&self, new: NewVideo) -> Result<Video> {
        let record = Video {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            video_url: new.video_url,
            thumbnail_url: new.thumbnail_url,
            description: new.description,
            created_at: Utc::now(),
        };
        self.write_doc(trees::VIDEOS, &record.id, &record)?;
        Ok(record)
    }

    async fn update_video(&self, id: &str, patch: VideoPatch) -> Result<Option<Video>> {
        let Some(mut record) = self.read_by_id::<Video>(trees::VIDEOS, id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::VIDEOS, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_video(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::VIDEOS, id)
    }

    // --- Learning points ---

    async fn learning_points(&self) -> Result<Vec<LearningPoint>> {
        let mut items: Vec<LearningPoint> = self.read_all(trees::LEARNING_POINTS)?;
        sort_by_order(&mut items, |p| p.order_index, |p| p.id.clone());
        Ok(items)
    }

    async fn learning_point(&self, id: &str) -> Result<Option<LearningPoint>> {
        self.read_by_id(trees::LEARNING_POINTS, id)
    }

    async fn create_learning_point(&self, new: NewLearningPoint) -> Result<LearningPoint> {
        let record = LearningPoint {
            id: Uuid::new_v4().to_string(),
            text: new.text,
            icon: new.icon,
            order_index: new.order_index,
        };
        self.write_doc(trees::LEARNING_POINTS, &record.id, &record)?;
        Ok(record)
    }

    async fn update_learning_point(
        &self,
        id: &str,
        patch: LearningPointPatch,
    ) -> Result<Option<LearningPoint>> {
        let Some(mut record) = self.read_by_id::<LearningPoint>(trees::LEARNING_POINTS, id)?
        else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::LEARNING_POINTS, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_learning_point(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::LEARNING_POINTS, id)
    }

    // --- Footer categories ---

    async fn footer_categories(&self) -> Result<Vec<FooterCategory>> {
        let mut items: Vec<FooterCategory> = self.read_all(trees::FOOTER_CATEGORIES)?;
        sort_by_order(&mut items, |c| c.order_index, |c| c.id.clone());
        Ok(items)
    }

    async fn footer_category(&self, id: &str) -> Result<Option<FooterCategory>> {
        self.read_by_id(trees::FOOTER_CATEGORIES, id)
    }

    async fn create_footer_category(&self, new: NewFooterCategory) -> Result<FooterCategory> {
        let record = FooterCategory {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            order_index: new.order_index,
        };
        self.write_doc(trees::FOOTER_CATEGORIES, &record.id, &record)?;
        Ok(record)
    }

    async fn update_footer_category(
        &self,
        id: &str,
        patch: FooterCategoryPatch,
    ) -> Result<Option<FooterCategory>> {
        let Some(mut record) = self.read_by_id::<FooterCategory>(trees::FOOTER_CATEGORIES, id)?
        else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::FOOTER_CATEGORIES, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_footer_category(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::FOOTER_CATEGORIES, id)
    }

    // --- Footer links ---

    async fn footer_links(&self) -> Result<Vec<FooterLink>> {
        let mut items: Vec<FooterLink> = self.read_all(trees::FOOTER_LINKS)?;
        sort_by_order(&mut items, |l| l.order_index, |l| l.id.clone());
        Ok(items)
    }

    async fn footer_link(&self, id: &str) -> Result<Option<FooterLink>> {
        self.read_by_id(trees::FOOTER_LINKS, id)
    }

    async fn create_footer_link(&self, new: NewFooterLink) -> Result<FooterLink> {
        let record = FooterLink {
            id: Uuid::new_v4().to_string(),
            category_id: new.category_id,
            label: new.label,
            url: new.url,
            order_index: new.order_index,
        };
        self.write_doc(trees::FOOTER_LINKS, &record.id, &record)?;
        Ok(record)
    }

    async fn update_footer_link(
        &self,
        id: &str,
        patch: FooterLinkPatch,
    ) -> Result<Option<FooterLink>> {
        let Some(mut record) = self.read_by_id::<FooterLink>(trees::FOOTER_LINKS, id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::FOOTER_LINKS, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_footer_link(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::FOOTER_LINKS, id)
    }

    // --- Social links ---

    async fn social_links(&self) -> Result<Vec<SocialLink>> {
        self.read_all(trees::SOCIAL_LINKS)
    }

    async fn social_link(&self, id: &str) -> Result<Option<SocialLink>> {
        self.read_by_id(trees::SOCIAL_LINKS, id)
    }

    async fn create_social_link(&self, new: NewSocialLink) -> Result<SocialLink> {
        let record = SocialLink {
            id: Uuid::new_v4().to_string(),
            platform: new.platform,
            url: new.url,
        };
        self.write_doc(trees::SOCIAL_LINKS, &record.id, &record)?;
        Ok(record)
    }

    async fn update_social_link(
        &self,
        id: &str,
        patch: SocialLinkPatch,
    ) -> Result<Option<SocialLink>> {
        let Some(mut record) = self.read_by_id::<SocialLink>(trees::SOCIAL_LINKS, id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::SOCIAL_LINKS, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_social_link(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::SOCIAL_LINKS, id)
    }

    // --- Bonus items ---

    async fn bonus_items(&self) -> Result<Vec<BonusItem>> {
        let mut items: Vec<BonusItem> = self.read_all(trees::BONUS_ITEMS)?;
        sort_by_order(&mut items, |b| b.order_index, |b| b.id.clone());
        Ok(items)
    }

    async fn bonus_item(&self, id: &str) -> Result<Option<BonusItem>> {
        self.read_by_id(trees::BONUS_ITEMS, id)
    }

    async fn create_bonus_item(&self, new: NewBonusItem) -> Result<BonusItem> {
        let record = BonusItem {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            icon: new.icon,
            order_index: new.order_index,
        };
        self.write_doc(trees::BONUS_ITEMS, &record.id, &record)?;
        Ok(record)
    }

    async fn update_bonus_item(
        &self,
        id: &str,
        patch: BonusItemPatch,
    ) -> Result<Option<BonusItem>> {
        let Some(mut record) = self.read_by_id::<BonusItem>(trees::BONUS_ITEMS, id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::BONUS_ITEMS, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_bonus_item(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::BONUS_ITEMS, id)
    }

    // --- Milestones ---

    async fn milestones(&self) -> Result<Vec<Milestone>> {
        let mut items: Vec<Milestone> = self.read_all(trees::MILESTONES)?;
        sort_by_order(&mut items, |m| m.order_index, |m| m.id.clone());
        Ok(items)
    }

    async fn milestone(&self, id: &str) -> Result<Option<Milestone>> {
        self.read_by_id(trees::MILESTONES, id)
    }

    async fn create_milestone(&self, new: NewMilestone) -> Result<Milestone> {
        let record = Milestone {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            progress: new.progress,
            completed: new.completed,
            order_index: new.order_index,
        };
        self.write_doc(trees::MILESTONES, &record.id, &record)?;
        Ok(record)
    }

    async fn update_milestone(
        &self,
        id: &str,
        patch: MilestonePatch,
    ) -> Result<Option<Milestone>> {
        let Some(mut record) = self.read_by_id::<Milestone>(trees::MILESTONES, id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::MILESTONES, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_milestone(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::MILESTONES, id)
    }

    // --- Themes ---

    async fn themes(&self) -> Result<Vec<ThemeSettings>> {
        self.read_all(trees::THEME_SETTINGS)
    }

    async fn theme(&self, id: &str) -> Result<Option<ThemeSettings>> {
        self.read_by_id(trees::THEME_SETTINGS, id)
    }

    async fn create_theme(&self, new: NewThemeSettings) -> Result<ThemeSettings> {
        let record = ThemeSettings {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            primary_color: new.primary_color,
            background_color: new.background_color,
            text_color: new.text_color,
            applies_globally: false,
            created_at: Utc::now(),
        };
        self.write_doc(trees::THEME_SETTINGS, &record.id, &record)?;
        Ok(record)
    }

    async fn update_theme(
        &self,
        id: &str,
        patch: ThemeSettingsPatch,
    ) -> Result<Option<ThemeSettings>> {
        let Some(mut record) = self.read_by_id::<ThemeSettings>(trees::THEME_SETTINGS, id)?
        else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::THEME_SETTINGS, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_theme(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::THEME_SETTINGS, id)
    }

    async fn active_theme(&self) -> Result<Option<ThemeSettings>> {
        let themes: Vec<ThemeSettings> = self.read_all(trees::THEME_SETTINGS)?;
        Ok(themes.into_iter().find(|t| t.applies_globally))
    }

    async fn set_active_theme(&self, id: &str) -> Result<Option<ThemeSettings>> {
        let Some(key) = valid_id(id) else {
            return Ok(None);
        };
        if self
            .read_by_id::<ThemeSettings>(trees::THEME_SETTINGS, &key)?
            .is_none()
        {
            return Ok(None);
        }

        self.set_exclusive_flag::<ThemeSettings>(trees::THEME_SETTINGS, &key, |doc, on| {
            doc.applies_globally = on;
        })?;
        self.read_by_id(trees::THEME_SETTINGS, &key)
    }

    // --- SEO metadata ---

    async fn seo_entries(&self) -> Result<Vec<SeoMetadata>> {
        self.read_all(trees::SEO_METADATA)
    }

    async fn seo_entry(&self, id: &str) -> Result<Option<SeoMetadata>> {
        self.read_by_id(trees::SEO_METADATA, id)
    }

    async fn create_seo_entry(&self, new: NewSeoMetadata) -> Result<SeoMetadata> {
        let record = SeoMetadata {
            id: Uuid::new_v4().to_string(),
            page: new.page,
            title: new.title,
            description: new.description,
            keywords: new.keywords,
            og_image_url: new.og_image_url,
            is_default: false,
        };
        self.write_doc(trees::SEO_METADATA, &record.id, &record)?;
        Ok(record)
    }

    async fn update_seo_entry(
        &self,
        id: &str,
        patch: SeoMetadataPatch,
    ) -> Result<Option<SeoMetadata>> {
        let Some(mut record) = self.read_by_id::<SeoMetadata>(trees::SEO_METADATA, id)? else {
            return Ok(None);
        };
        record.apply(patch);
        self.write_doc(trees::SEO_METADATA, &record.id, &record)?;
        Ok(Some(record))
    }

    async fn delete_seo_entry(&self, id: &str) -> Result<bool> {
        self.remove_doc(trees::SEO_METADATA, id)
    }

    async fn default_seo(&self) -> Result<Option<SeoMetadata>> {
        let entries: Vec<SeoMetadata> = self.read_all(trees::SEO_METADATA)?;
        Ok(entries.into_iter().find(|s| s.is_default))
    }

    async fn seo_for_page(&self, page: &str) -> Result<Option<SeoMetadata>> {
        let entries: Vec<SeoMetadata> = self.read_all(trees::SEO_METADATA)?;
        Ok(entries.into_iter().find(|s| s.page == page))
    }

    async fn set_default_seo(&self, id: &str) -> Result<Option<SeoMetadata>> {
        let Some(key) = valid_id(id) else {
            return Ok(None);
        };
        if self
            .read_by_id::<SeoMetadata>(trees::SEO_METADATA, &key)?
            .is_none()
        {
            return Ok(None);
        }

        self.set_exclusive_flag::<SeoMetadata>(trees::SEO_METADATA, &key, |doc, on| {
            doc.is_default = on;
        })?;
        self.read_by_id(trees::SEO_METADATA, &key)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use bookpage_content::{
        Hero, HeroPatch, NewFooterCategory, NewFooterLink, NewMilestone, NewSeoMetadata,
        NewTestimonial, NewThemeSettings, SiteSettingsPatch, TestimonialPatch,
    };
    use bookpage_storage::ContentStorage;

    use crate::{SINGLETON_KEY, SledStorage, trees};

    fn open_storage() -> (SledStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = SledStorage::open(dir.path().join("content")).unwrap();
        (storage, dir)
    }

    fn new_theme(name: &str) -> NewThemeSettings {
        NewThemeSettings {
            name: name.to_owned(),
            primary_color: "#1a73e8".to_owned(),
            background_color: "#ffffff".to_owned(),
            text_color: "#1f2933".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_singleton_absent_on_fresh_store() {
        let (storage, _dir) = open_storage();

        assert!(storage.hero().await.unwrap().is_none());
        assert!(storage.site_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_fresh_singleton_fills_defaults() {
        let (storage, _dir) = open_storage();

        let hero = storage
            .update_hero(HeroPatch {
                title: Some("Custom title".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(hero.title, "Custom title");
        assert_eq!(hero.cta_text, Hero::default().cta_text);

        let fetched = storage.hero().await.unwrap().unwrap();
        assert_eq!(fetched.title, "Custom title");
    }

    #[tokio::test]
    async fn test_disjoint_partial_updates_union() {
        let (storage, _dir) = open_storage();

        storage
            .update_site_settings(SiteSettingsPatch {
                site_title: Some("First".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        storage
            .update_site_settings(SiteSettingsPatch {
                tagline: Some("Second".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();

        let settings = storage.site_settings().await.unwrap().unwrap();
        assert_eq!(settings.site_title, "First");
        assert_eq!(settings.tagline, "Second");
    }

    #[tokio::test]
    async fn test_stored_documents_use_camel_case_fields() {
        let (storage, _dir) = open_storage();
        storage.update_hero(HeroPatch::default()).await.unwrap();

        let tree = storage.tree(trees::HERO).unwrap();
        let bytes = tree.get(SINGLETON_KEY).unwrap().unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert!(doc.get("ctaText").is_some());
        assert!(doc.get("updatedAt").is_some());
        assert!(doc.get("cta_text").is_none());
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (storage, _dir) = open_storage();

        let created = storage
            .create_testimonial(NewTestimonial {
                quote: "Changed how I work".to_owned(),
                name: "Priya".to_owned(),
                role: "Tech lead".to_owned(),
                avatar_url: None,
            })
            .await
            .unwrap();
        let fetched = storage.testimonial(&created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_non_uuid_id_is_not_found() {
        let (storage, _dir) = open_storage();

        assert!(storage.testimonial("42").await.unwrap().is_none());
        assert!(!storage.delete_testimonial("42").await.unwrap());
        assert!(storage
            .update_testimonial("42", TestimonialPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (storage, _dir) = open_storage();
        let created = storage
            .create_footer_category(NewFooterCategory {
                title: "Resources".to_owned(),
                order_index: 0,
            })
            .await
            .unwrap();

        assert!(storage.delete_footer_category(&created.id).await.unwrap());
        assert!(storage.footer_category(&created.id).await.unwrap().is_none());
        assert!(!storage.delete_footer_category(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_milestones_ordered_by_order_index() {
        let (storage, _dir) = open_storage();
        for (title, order_index) in [("c", 20), ("a", 0), ("b", 10)] {
            storage
                .create_milestone(NewMilestone {
                    title: title.to_owned(),
                    description: None,
                    progress: 0,
                    completed: false,
                    order_index,
                })
                .await
                .unwrap();
        }

        let milestones = storage.milestones().await.unwrap();
        let titles: Vec<_> = milestones.iter().map(|m| m.title.as_str()).collect();

        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_footer_link_keeps_category_reference() {
        let (storage, _dir) = open_storage();
        let category = storage
            .create_footer_category(NewFooterCategory {
                title: "Resources".to_owned(),
                order_index: 0,
            })
            .await
            .unwrap();

        let link = storage
            .create_footer_link(NewFooterLink {
                category_id: category.id.clone(),
                label: "Blog".to_owned(),
                url: "/blog".to_owned(),
                order_index: 1,
            })
            .await
            .unwrap();

        let fetched = storage.footer_link(&link.id).await.unwrap().unwrap();
        assert_eq!(fetched.category_id, category.id);
    }

    #[tokio::test]
    async fn test_set_active_theme_is_exclusive() {
        let (storage, _dir) = open_storage();
        let first = storage.create_theme(new_theme("Light")).await.unwrap();
        let second = storage.create_theme(new_theme("Dark")).await.unwrap();

        storage.set_active_theme(&first.id).await.unwrap();
        let activated = storage.set_active_theme(&second.id).await.unwrap().unwrap();

        assert!(activated.applies_globally);
        let active: Vec<_> = storage
            .themes()
            .await
            .unwrap()
            .into_iter()
            .filter(|t| t.applies_globally)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);
    }

    #[tokio::test]
    async fn test_set_active_theme_unknown_id_is_none() {
        let (storage, _dir) = open_storage();
        let theme = storage.create_theme(new_theme("Light")).await.unwrap();
        storage.set_active_theme(&theme.id).await.unwrap();

        let missing = uuid::Uuid::new_v4().to_string();
        assert!(storage.set_active_theme(&missing).await.unwrap().is_none());
        assert_eq!(
            storage.active_theme().await.unwrap().map(|t| t.id),
            Some(theme.id)
        );
    }

    #[tokio::test]
    async fn test_seo_default_flag_moves_exclusively() {
        let (storage, _dir) = open_storage();
        let home = storage
            .create_seo_entry(NewSeoMetadata {
                page: "/".to_owned(),
                title: "Home".to_owned(),
                description: "Landing".to_owned(),
                keywords: None,
                og_image_url: None,
            })
            .await
            .unwrap();
        let buy = storage
            .create_seo_entry(NewSeoMetadata {
                page: "/buy".to_owned(),
                title: "Buy".to_owned(),
                description: "Purchase".to_owned(),
                keywords: None,
                og_image_url: None,
            })
            .await
            .unwrap();

        storage.set_default_seo(&home.id).await.unwrap();
        storage.set_default_seo(&buy.id).await.unwrap();

        let defaults: Vec<_> = storage
            .seo_entries()
            .await
            .unwrap()
            .into_iter()
            .filter(|s| s.is_default)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, buy.id);

        assert!(storage.seo_for_page("/missing").await.unwrap().is_none());
        assert_eq!(
            storage.default_seo().await.unwrap().map(|s| s.id),
            Some(buy.id)
        );
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content");
        let created = {
            let storage = SledStorage::open(&path).unwrap();
            storage
                .create_testimonial(NewTestimonial {
                    quote: "Persistent".to_owned(),
                    name: "Sam".to_owned(),
                    role: String::new(),
                    avatar_url: None,
                })
                .await
                .unwrap()
        };

        let reopened = SledStorage::open(&path).unwrap();
        let fetched = reopened.testimonial(&created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }
}
