//! In-memory storage implementation for testing.
//!
//! Provides [`MemoryStorage`] so trait consumers (the migration tool, a
//! future route layer) can be unit-tested without a real backend. Ids are
//! decimal counter strings; nothing persists beyond the process.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

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
use crate::storage::ContentStorage;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,

    hero: Option<Hero>,
    featured: Option<Featured>,
    quote: Option<Quote>,
    landing: Option<Landing>,
    learning_points_section: Option<LearningPointsSection>,
    testimonial_section: Option<TestimonialSection>,
    about_book: Option<AboutBook>,
    author: Option<Author>,
    bonus_section: Option<BonusSection>,
    guarantee_section: Option<GuaranteeSection>,
    scholarship_section: Option<ScholarshipSection>,
    youtube_framework_section: Option<YoutubeFrameworkSection>,
    questions_section: Option<QuestionsSection>,
    site_settings: Option<SiteSettings>,

    testimonials: Vec<Testimonial>,
    articles: Vec<Article>,
    videos: Vec<Video>,
    learning_points: Vec<LearningPoint>,
    footer_categories: Vec<FooterCategory>,
    footer_links: Vec<FooterLink>,
    social_links: Vec<SocialLink>,
    bonus_items: Vec<BonusItem>,
    milestones: Vec<Milestone>,
    themes: Vec<ThemeSettings>,
    seo_entries: Vec<SeoMetadata>,
}

impl Inner {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// In-memory storage for tests.
///
/// Implements the full [`ContentStorage`] contract over `RwLock`-guarded
/// vectors. State is arranged through the trait itself (`create_*`,
/// `update_*`), so tests exercise the same call paths production code
/// uses.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sort an ordered collection ascending by `order_index`, ties by id.
fn sorted_by_order<T: Clone>(
    items: &[T],
    order_index: impl Fn(&T) -> i64,
    id: impl Fn(&T) -> i64,
) -> Vec<T> {
    let mut out = items.to_vec();
    out.sort_by_key(|item| (order_index(item), id(item)));
    out
}

fn numeric_id(id: &str) -> i64 {
    id.parse().unwrap_or(0)
}

#[async_trait]
impl ContentStorage for MemoryStorage {
    // --- Singleton sections ---

    async fn hero(&self) -> Result<Option<Hero>> {
        Ok(self.inner.read().unwrap().hero.clone())
    }

    async fn update_hero(&self, patch: HeroPatch) -> Result<Hero> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.hero.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.hero = Some(section.clone());
        Ok(section)
    }

    async fn featured(&self) -> Result<Option<Featured>> {
        Ok(self.inner.read().unwrap().featured.clone())
    }

    async fn update_featured(&self, patch: FeaturedPatch) -> Result<Featured> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.featured.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.featured = Some(section.clone());
        Ok(section)
    }

    async fn quote(&self) -> Result<Option<Quote>> {
        Ok(self.inner.read().unwrap().quote.clone())
    }

    async fn update_quote(&self, patch: QuotePatch) -> Result<Quote> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.quote.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.quote = Some(section.clone());
        Ok(section)
    }

    async fn landing(&self) -> Result<Option<Landing>> {
        Ok(self.inner.read().unwrap().landing.clone())
    }

    async fn update_landing(&self, patch: LandingPatch) -> Result<Landing> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.landing.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.landing = Some(section.clone());
        Ok(section)
    }

    async fn learning_points_section(&self) -> Result<Option<LearningPointsSection>> {
        Ok(self.inner.read().unwrap().learning_points_section.clone())
    }

    async fn update_learning_points_section(
        &self,
        patch: LearningPointsSectionPatch,
    ) -> Result<LearningPointsSection> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.learning_points_section.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.learning_points_section = Some(section.clone());
        Ok(section)
    }

    async fn testimonial_section(&self) -> Result<Option<TestimonialSection>> {
        Ok(self.inner.read().unwrap().testimonial_section.clone())
    }

    async fn update_testimonial_section(
        &self,
        patch: TestimonialSectionPatch,
    ) -> Result<TestimonialSection> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.testimonial_section.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.testimonial_section = Some(section.clone());
        Ok(section)
    }

    async fn about_book(&self) -> Result<Option<AboutBook>> {
        Ok(self.inner.read().unwrap().about_book.clone())
    }

    async fn update_about_book(&self, patch: AboutBookPatch) -> Result<AboutBook> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.about_book.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.about_book = Some(section.clone());
        Ok(section)
    }

    async fn author(&self) -> Result<Option<Author>> {
        Ok(self.inner.read().unwrap().author.clone())
    }

    async fn update_author(&self, patch: AuthorPatch) -> Result<Author> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.author.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.author = Some(section.clone());
        Ok(section)
    }

    async fn bonus_section(&self) -> Result<Option<BonusSection>> {
        Ok(self.inner.read().unwrap().bonus_section.clone())
    }

    async fn update_bonus_section(&self, patch: BonusSectionPatch) -> Result<BonusSection> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.bonus_section.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.bonus_section = Some(section.clone());
        Ok(section)
    }

    async fn guarantee_section(&self) -> Result<Option<GuaranteeSection>> {
        Ok(self.inner.read().unwrap().guarantee_section.clone())
    }

    async fn update_guarantee_section(
        &self,
        patch: GuaranteeSectionPatch,
    ) -> Result<GuaranteeSection> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.guarantee_section.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.guarantee_section = Some(section.clone());
        Ok(section)
    }

    async fn scholarship_section(&self) -> Result<Option<ScholarshipSection>> {
        Ok(self.inner.read().unwrap().scholarship_section.clone())
    }

    async fn update_scholarship_section(
        &self,
        patch: ScholarshipSectionPatch,
    ) -> Result<ScholarshipSection> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.scholarship_section.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.scholarship_section = Some(section.clone());
        Ok(section)
    }

    async fn youtube_framework_section(&self) -> Result<Option<YoutubeFrameworkSection>> {
        Ok(self.inner.read().unwrap().youtube_framework_section.clone())
    }

    async fn update_youtube_framework_section(
        &self,
        patch: YoutubeFrameworkSectionPatch,
    ) -> Result<YoutubeFrameworkSection> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.youtube_framework_section.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.youtube_framework_section = Some(section.clone());
        Ok(section)
    }

    async fn questions_section(&self) -> Result<Option<QuestionsSection>> {
        Ok(self.inner.read().unwrap().questions_section.clone())
    }

    async fn update_questions_section(
        &self,
        patch: QuestionsSectionPatch,
    ) -> Result<QuestionsSection> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.questions_section.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.questions_section = Some(section.clone());
        Ok(section)
    }

    async fn site_settings(&self) -> Result<Option<SiteSettings>> {
        Ok(self.inner.read().unwrap().site_settings.clone())
    }

    async fn update_site_settings(&self, patch: SiteSettingsPatch) -> Result<SiteSettings> {
        let mut inner = self.inner.write().unwrap();
        let mut section = inner.site_settings.take().unwrap_or_default();
        section.apply(patch);
        section.updated_at = Utc::now();
        inner.site_settings = Some(section.clone());
        Ok(section)
    }

    // --- Testimonials ---

    async fn testimonials(&self, limit: Option<usize>) -> Result<Vec<Testimonial>> {
        let mut items = self.inner.read().unwrap().testimonials.clone();
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    async fn testimonial(&self, id: &str) -> Result<Option<Testimonial>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.testimonials.iter().find(|t| t.id == id).cloned())
    }

    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial> {
        let mut inner = self.inner.write().unwrap();
        let record = Testimonial {
            id: inner.next_id(),
            quote: new.quote,
            name: new.name,
            role: new.role,
            avatar_url: new.avatar_url,
            created_at: Utc::now(),
        };
        inner.testimonials.push(record.clone());
        Ok(record)
    }

    async fn update_testimonial(
        &self,
        id: &str,
        patch: TestimonialPatch,
    ) -> Result<Option<Testimonial>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.testimonials.iter_mut().find(|t| t.id == id).map(|t| {
            t.apply(patch);
            t.clone()
        }))
    }

    async fn delete_testimonial(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.testimonials.len();
        inner.testimonials.retain(|t| t.id != id);
        Ok(inner.testimonials.len() < before)
    }

    // --- Articles ---

    async fn articles(&self, limit: Option<usize>) -> Result<Vec<Article>> {
        let mut items = self.inner.read().unwrap().articles.clone();
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    async fn article(&self, id: &str) -> Result<Option<Article>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn create_article(&self, new: NewArticle) -> Result<Article> {
        let mut inner = self.inner.write().unwrap();
        let record = Article {
            id: inner.next_id(),
            title: new.title,
            url: new.url,
            image_url: new.image_url,
            excerpt: new.excerpt,
            created_at: Utc::now(),
        };
        inner.articles.push(record.clone());
        Ok(record)
    }

    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Option<Article>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.articles.iter_mut().find(|a| a.id == id).map(|a| {
            a.apply(patch);
            a.clone()
        }))
    }

    async fn delete_article(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.articles.len();
        inner.articles.retain(|a| a.id != id);
        Ok(inner.articles.len() < before)
    }

    // --- Videos ---

    async fn videos(&self, limit: Option<usize>) -> Result<Vec<Video>> {
        let mut items = self.inner.read().unwrap().videos.clone();
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    async fn video(&self, id: &str) -> Result<Option<Video>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn create_video(&self, new: NewVideo) -> Result<Video> {
        let mut inner = self.inner.write().unwrap();
        let record = Video {
            id: inner.next_id(),
            title: new.title,
            video_url: new.video_url,
            thumbnail_url: new.thumbnail_url,
            description: new.description,
            created_at: Utc::now(),
        };
        inner.videos.push(record.clone());
        Ok(record)
    }

    async fn update_video(&self, id: &str, patch: VideoPatch) -> Result<Option<Video>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.videos.iter_mut().find(|v| v.id == id).map(|v| {
            v.apply(patch);
            v.clone()
        }))
    }

    async fn delete_video(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.videos.len();
        inner.videos.retain(|v| v.id != id);
        Ok(inner.videos.len() < before)
    }

    // --- Learning points ---

    async fn learning_points(&self) -> Result<Vec<LearningPoint>> {
        let inner = self.inner.read().unwrap();
        Ok(sorted_by_order(
            &inner.learning_points,
            |p| p.order_index,
            |p| numeric_id(&p.id),
        ))
    }

    async fn learning_point(&self, id: &str) -> Result<Option<LearningPoint>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.learning_points.iter().find(|p| p.id == id).cloned())
    }

    async fn create_learning_point(&self, new: NewLearningPoint) -> Result<LearningPoint> {
        let mut inner = self.inner.write().unwrap();
        let record = LearningPoint {
            id: inner.next_id(),
            text: new.text,
            icon: new.icon,
            order_index: new.order_index,
        };
        inner.learning_points.push(record.clone());
        Ok(record)
    }

    async fn update_learning_point(
        &self,
        id: &str,
        patch: LearningPointPatch,
    ) -> Result<Option<LearningPoint>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.learning_points.iter_mut().find(|p| p.id == id).map(|p| {
            p.apply(patch);
            p.clone()
        }))
    }

    async fn delete_learning_point(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.learning_points.len();
        inner.learning_points.retain(|p| p.id != id);
        Ok(inner.learning_points.len() < before)
    }

    // --- Footer categories ---

    async fn footer_categories(&self) -> Result<Vec<FooterCategory>> {
        let inner = self.inner.read().unwrap();
        Ok(sorted_by_order(
            &inner.footer_categories,
            |c| c.order_index,
            |c| numeric_id(&c.id),
        ))
    }

    async fn footer_category(&self, id: &str) -> Result<Option<FooterCategory>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.footer_categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create_footer_category(&self, new: NewFooterCategory) -> Result<FooterCategory> {
        let mut inner = self.inner.write().unwrap();
        let record = FooterCategory {
            id: inner.next_id(),
            title: new.title,
            order_index: new.order_index,
        };
        inner.footer_categories.push(record.clone());
        Ok(record)
    }

    async fn update_footer_category(
        &self,
        id: &str,
        patch: FooterCategoryPatch,
    ) -> Result<Option<FooterCategory>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.footer_categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.apply(patch);
            c.clone()
        }))
    }

    async fn delete_footer_category(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.footer_categories.len();
        inner.footer_categories.retain(|c| c.id != id);
        Ok(inner.footer_categories.len() < before)
    }

    // --- Footer links ---

    async fn footer_links(&self) -> Result<Vec<FooterLink>> {
        let inner = self.inner.read().unwrap();
        Ok(sorted_by_order(
            &inner.footer_links,
            |l| l.order_index,
            |l| numeric_id(&l.id),
        ))
    }

    async fn footer_link(&self, id: &str) -> Result<Option<FooterLink>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.footer_links.iter().find(|l| l.id == id).cloned())
    }

    async fn create_footer_link(&self, new: NewFooterLink) -> Result<FooterLink> {
        let mut inner = self.inner.write().unwrap();
        let record = FooterLink {
            id: inner.next_id(),
            category_id: new.category_id,
            label: new.label,
            url: new.url,
            order_index: new.order_index,
        };
        inner.footer_links.push(record.clone());
        Ok(record)
    }

    async fn update_footer_link(
        &self,
        id: &str,
        patch: FooterLinkPatch,
    ) -> Result<Option<FooterLink>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.footer_links.iter_mut().find(|l| l.id == id).map(|l| {
            l.apply(patch);
            l.clone()
        }))
    }

    async fn delete_footer_link(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.footer_links.len();
        inner.footer_links.retain(|l| l.id != id);
        Ok(inner.footer_links.len() < before)
    }

    // --- Social links ---

    async fn social_links(&self) -> Result<Vec<SocialLink>> {
        Ok(self.inner.read().unwrap().social_links.clone())
    }

    async fn social_link(&self, id: &str) -> Result<Option<SocialLink>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.social_links.iter().find(|s| s.id == id).cloned())
    }

    async fn create_social_link(&self, new: NewSocialLink) -> Result<SocialLink> {
        let mut inner = self.inner.write().unwrap();
        let record = SocialLink {
            id: inner.next_id(),
            platform: new.platform,
            url: new.url,
        };
        inner.social_links.push(record.clone());
        Ok(record)
    }

    async fn update_social_link(
        &self,
        id: &str,
        patch: SocialLinkPatch,
    ) -> Result<Option<SocialLink>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.social_links.iter_mut().find(|s| s.id == id).map(|s| {
            s.apply(patch);
            s.clone()
        }))
    }

    async fn delete_social_link(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.social_links.len();
        inner.social_links.retain(|s| s.id != id);
        Ok(inner.social_links.len() < before)
    }

    // --- Bonus items ---

    async fn bonus_items(&self) -> Result<Vec<BonusItem>> {
        let inner = self.inner.read().unwrap();
        Ok(sorted_by_order(
            &inner.bonus_items,
            |b| b.order_index,
            |b| numeric_id(&b.id),
        ))
    }

    async fn bonus_item(&self, id: &str) -> Result<Option<BonusItem>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.bonus_items.iter().find(|b| b.id == id).cloned())
    }

    async fn create_bonus_item(&self, new: NewBonusItem) -> Result<BonusItem> {
        let mut inner = self.inner.write().unwrap();
        let record = BonusItem {
            id: inner.next_id(),
            title: new.title,
            description: new.description,
            icon: new.icon,
            order_index: new.order_index,
        };
        inner.bonus_items.push(record.clone());
        Ok(record)
    }

    async fn update_bonus_item(
        &self,
        id: &str,
        patch: BonusItemPatch,
    ) -> Result<Option<BonusItem>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.bonus_items.iter_mut().find(|b| b.id == id).map(|b| {
            b.apply(patch);
            b.clone()
        }))
    }

    async fn delete_bonus_item(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.bonus_items.len();
        inner.bonus_items.retain(|b| b.id != id);
        Ok(inner.bonus_items.len() < before)
    }

    // --- Milestones ---

    async fn milestones(&self) -> Result<Vec<Milestone>> {
        let inner = self.inner.read().unwrap();
        Ok(sorted_by_order(
            &inner.milestones,
            |m| m.order_index,
            |m| numeric_id(&m.id),
        ))
    }

    async fn milestone(&self, id: &str) -> Result<Option<Milestone>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.milestones.iter().find(|m| m.id == id).cloned())
    }

    async fn create_milestone(&self, new: NewMilestone) -> Result<Milestone> {
        let mut inner = self.inner.write().unwrap();
        let record = Milestone {
            id: inner.next_id(),
            title: new.title,
            description: new.description,
            progress: new.progress,
            completed: new.completed,
            order_index: new.order_index,
        };
        inner.milestones.push(record.clone());
        Ok(record)
    }

    async fn update_milestone(
        &self,
        id: &str,
        patch: MilestonePatch,
    ) -> Result<Option<Milestone>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.milestones.iter_mut().find(|m| m.id == id).map(|m| {
            m.apply(patch);
            m.clone()
        }))
    }

    async fn delete_milestone(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.milestones.len();
        inner.milestones.retain(|m| m.id != id);
        Ok(inner.milestones.len() < before)
    }

    // --- Themes ---

    async fn themes(&self) -> Result<Vec<ThemeSettings>> {
        Ok(self.inner.read().unwrap().themes.clone())
    }

    async fn theme(&self, id: &str) -> Result<Option<ThemeSettings>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.themes.iter().find(|t| t.id == id).cloned())
    }

    async fn create_theme(&self, new: NewThemeSettings) -> Result<ThemeSettings> {
        let mut inner = self.inner.write().unwrap();
        let record = ThemeSettings {
            id: inner.next_id(),
            name: new.name,
            primary_color: new.primary_color,
            background_color: new.background_color,
            text_color: new.text_color,
            applies_globally: false,
            created_at: Utc::now(),
        };
        inner.themes.push(record.clone());
        Ok(record)
    }

    async fn update_theme(
        &self,
        id: &str,
        patch: ThemeSettingsPatch,
    ) -> Result<Option<ThemeSettings>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.themes.iter_mut().find(|t| t.id == id).map(|t| {
            t.apply(patch);
            t.clone()
        }))
    }

    async fn delete_theme(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.themes.len();
        inner.themes.retain(|t| t.id != id);
        Ok(inner.themes.len() < before)
    }

    async fn active_theme(&self) -> Result<Option<ThemeSettings>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.themes.iter().find(|t| t.applies_globally).cloned())
    }

    async fn set_active_theme(&self, id: &str) -> Result<Option<ThemeSettings>> {
        let mut inner = self.inner.write().unwrap();
        if !inner.themes.iter().any(|t| t.id == id) {
            return Ok(None);
        }
        for theme in &mut inner.themes {
            theme.applies_globally = theme.id == id;
        }
        Ok(inner.themes.iter().find(|t| t.id == id).cloned())
    }

    // --- SEO metadata ---

    async fn seo_entries(&self) -> Result<Vec<SeoMetadata>> {
        Ok(self.inner.read().unwrap().seo_entries.clone())
    }

    async fn seo_entry(&self, id: &str) -> Result<Option<SeoMetadata>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.seo_entries.iter().find(|s| s.id == id).cloned())
    }

    async fn create_seo_entry(&self, new: NewSeoMetadata) -> Result<SeoMetadata> {
        let mut inner = self.inner.write().unwrap();
        let record = SeoMetadata {
            id: inner.next_id(),
            page: new.page,
            title: new.title,
            description: new.description,
            keywords: new.keywords,
            og_image_url: new.og_image_url,
            is_default: false,
        };
        inner.seo_entries.push(record.clone());
        Ok(record)
    }

    async fn update_seo_entry(
        &self,
        id: &str,
        patch: SeoMetadataPatch,
    ) -> Result<Option<SeoMetadata>> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.seo_entries.iter_mut().find(|s| s.id == id).map(|s| {
            s.apply(patch);
            s.clone()
        }))
    }

    async fn delete_seo_entry(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.seo_entries.len();
        inner.seo_entries.retain(|s| s.id != id);
        Ok(inner.seo_entries.len() < before)
    }

    async fn default_seo(&self) -> Result<Option<SeoMetadata>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.seo_entries.iter().find(|s| s.is_default).cloned())
    }

    async fn seo_for_page(&self, page: &str) -> Result<Option<SeoMetadata>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.seo_entries.iter().find(|s| s.page == page).cloned())
    }

    async fn set_default_seo(&self, id: &str) -> Result<Option<SeoMetadata>> {
        let mut inner = self.inner.write().unwrap();
        if !inner.seo_entries.iter().any(|s| s.id == id) {
            return Ok(None);
        }
        for entry in &mut inner.seo_entries {
            entry.is_default = entry.id == id;
        }
        Ok(inner.seo_entries.iter().find(|s| s.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use bookpage_content::{HeroPatch, NewFooterCategory, NewMilestone, NewTestimonial,
        NewThemeSettings, TestimonialPatch};

    use super::*;

    fn new_theme(name: &str) -> NewThemeSettings {
        NewThemeSettings {
            name: name.to_owned(),
            primary_color: "#1a73e8".to_owned(),
            background_color: "#ffffff".to_owned(),
            text_color: "#1f2933".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_singleton_absent_until_first_update() {
        let storage = MemoryStorage::new();

        assert!(storage.hero().await.unwrap().is_none());

        storage.update_hero(HeroPatch::default()).await.unwrap();

        assert!(storage.hero().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_fresh_fills_defaults() {
        let storage = MemoryStorage::new();

        let hero = storage
            .update_hero(HeroPatch {
                title: Some("Custom".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(hero.title, "Custom");
        // Omitted fields carry the shared defaults.
        assert_eq!(hero.cta_text, Hero::default().cta_text);
    }

    #[tokio::test]
    async fn test_disjoint_updates_union() {
        let storage = MemoryStorage::new();

        storage
            .update_hero(HeroPatch {
                title: Some("One".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        let hero = storage
            .update_hero(HeroPatch {
                subtitle: Some("Two".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(hero.title, "One");
        assert_eq!(hero.subtitle, "Two");
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let storage = MemoryStorage::new();

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
    async fn test_update_missing_returns_none() {
        let storage = MemoryStorage::new();

        let result = storage
            .update_testimonial("999", TestimonialPatch::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let storage = MemoryStorage::new();
        let created = storage
            .create_footer_category(NewFooterCategory {
                title: "Resources".to_owned(),
                order_index: 0,
            })
            .await
            .unwrap();

        assert!(storage.delete_footer_category(&created.id).await.unwrap());
        assert!(storage.footer_category(&created.id).await.unwrap().is_none());
        // Second delete reports not-found.
        assert!(!storage.delete_footer_category(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_milestones_sorted_by_order_index() {
        let storage = MemoryStorage::new();
        for (title, order_index) in [("c", 2), ("a", 0), ("b", 1)] {
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
    async fn test_set_active_theme_moves_flag() {
        let storage = MemoryStorage::new();
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
    async fn test_set_active_theme_missing_id_keeps_previous() {
        let storage = MemoryStorage::new();
        let theme = storage.create_theme(new_theme("Light")).await.unwrap();
        storage.set_active_theme(&theme.id).await.unwrap();

        assert!(storage.set_active_theme("999").await.unwrap().is_none());
        assert_eq!(
            storage.active_theme().await.unwrap().map(|t| t.id),
            Some(theme.id)
        );
    }

    #[tokio::test]
    async fn test_testimonials_limit() {
        let storage = MemoryStorage::new();
        for i in 0..5 {
            storage
                .create_testimonial(NewTestimonial {
                    quote: format!("quote {i}"),
                    name: format!("name {i}"),
                    role: String::new(),
                    avatar_url: None,
                })
                .await
                .unwrap();
        }

        assert_eq!(storage.testimonials(Some(3)).await.unwrap().len(), 3);
        assert_eq!(storage.testimonials(None).await.unwrap().len(), 5);
    }
}
