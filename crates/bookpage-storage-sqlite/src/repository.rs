//! `ContentStorage` implementation over the SQLite pool.
//!
//! Singleton updates follow the update-or-insert pattern: fetch the (at
//! most one) row, patch it with `COALESCE(?, column)` per field when it
//! exists, otherwise insert patch values over the shared defaults.
//! Collection ids arrive as strings; anything that does not parse as an
//! integer row id is not-found by definition and never reaches SQL.

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
use bookpage_storage::{ContentStorage, Result, StorageError, StorageErrorKind};

use crate::rows::{
    AboutBookRow, ArticleRow, AuthorRow, BonusItemRow, FeaturedRow, FooterCategoryRow,
    FooterLinkRow, GuaranteeSectionRow, HeadingSectionRow, HeroRow, LandingRow, LearningPointRow,
    MilestoneRow, QuestionsSectionRow, QuoteRow, ScholarshipSectionRow, SeoMetadataRow,
    SiteSettingsRow, SocialLinkRow, TestimonialRow, ThemeSettingsRow, VideoRow,
    YoutubeFrameworkSectionRow,
};
use crate::{BACKEND, SqliteStorage};

/// Map a sqlx failure to a storage error, logging at the call site.
fn query_err(err: sqlx::Error, entity: &'static str) -> StorageError {
    tracing::error!(entity, error = %err, "sqlite query failed");
    StorageError::new(StorageErrorKind::Query)
        .with_backend(BACKEND)
        .with_context(entity)
        .with_source(err)
}

/// Parse a contract-level id into a row id. Non-numeric ids cannot refer
/// to any row, so callers treat `None` as not-found.
fn numeric_id(id: &str) -> Option<i64> {
    id.parse().ok()
}

/// Translate an optional list limit into SQLite's `LIMIT` operand, where
/// a negative value means "no limit".
fn sql_limit(limit: Option<usize>) -> i64 {
    limit.and_then(|n| i64::try_from(n).ok()).unwrap_or(-1)
}

// Per-entity row fetch helpers. Singletons take no key and return the
// first row; collections fetch by row id.
impl SqliteStorage {
    async fn hero_row(&self) -> Result<Option<HeroRow>> {
        sqlx::query_as::<_, HeroRow>(
            "SELECT id, title, subtitle, cta_text, cta_url, image_url, updated_at \
             FROM hero ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "hero"))
    }

    async fn featured_row(&self) -> Result<Option<FeaturedRow>> {
        sqlx::query_as::<_, FeaturedRow>(
            "SELECT id, heading, subheading, badge_url, updated_at \
             FROM featured ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "featured"))
    }

    async fn quote_row(&self) -> Result<Option<QuoteRow>> {
        sqlx::query_as::<_, QuoteRow>(
            "SELECT id, text, attribution, updated_at FROM quote ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "quote"))
    }

    async fn landing_row(&self) -> Result<Option<LandingRow>> {
        sqlx::query_as::<_, LandingRow>(
            "SELECT id, headline, subheadline, background_image_url, updated_at \
             FROM landing ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "landing"))
    }

    async fn learning_points_section_row(&self) -> Result<Option<HeadingSectionRow>> {
        sqlx::query_as::<_, HeadingSectionRow>(
            "SELECT id, heading, subheading, updated_at \
             FROM learning_points_section ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "learning_points_section"))
    }

    async fn testimonial_section_row(&self) -> Result<Option<HeadingSectionRow>> {
        sqlx::query_as::<_, HeadingSectionRow>(
            "SELECT id, heading, subheading, updated_at \
             FROM testimonial_section ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "testimonial_section"))
    }

    async fn about_book_row(&self) -> Result<Option<AboutBookRow>> {
        sqlx::query_as::<_, AboutBookRow>(
            "SELECT id, heading, description, cover_image_url, updated_at \
             FROM about_book ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "about_book"))
    }

    async fn author_row(&self) -> Result<Option<AuthorRow>> {
        sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, bio, photo_url, website_url, updated_at \
             FROM author ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "author"))
    }

    async fn bonus_section_row(&self) -> Result<Option<HeadingSectionRow>> {
        sqlx::query_as::<_, HeadingSectionRow>(
            "SELECT id, heading, subheading, updated_at FROM bonus_section ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "bonus_section"))
    }

    async fn guarantee_section_row(&self) -> Result<Option<GuaranteeSectionRow>> {
        sqlx::query_as::<_, GuaranteeSectionRow>(
            "SELECT id, heading, body, badge_text, updated_at \
             FROM guarantee_section ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "guarantee_section"))
    }

    async fn scholarship_section_row(&self) -> Result<Option<ScholarshipSectionRow>> {
        sqlx::query_as::<_, ScholarshipSectionRow>(
            "SELECT id, heading, body, application_url, updated_at \
             FROM scholarship_section ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "scholarship_section"))
    }

    async fn youtube_framework_section_row(&self) -> Result<Option<YoutubeFrameworkSectionRow>> {
        sqlx::query_as::<_, YoutubeFrameworkSectionRow>(
            "SELECT id, heading, video_url, description, updated_at \
             FROM youtube_framework_section ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "youtube_framework_section"))
    }

    async fn questions_section_row(&self) -> Result<Option<QuestionsSectionRow>> {
        sqlx::query_as::<_, QuestionsSectionRow>(
            "SELECT id, heading, body, contact_email, updated_at \
             FROM questions_section ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "questions_section"))
    }

    async fn site_settings_row(&self) -> Result<Option<SiteSettingsRow>> {
        sqlx::query_as::<_, SiteSettingsRow>(
            "SELECT id, site_title, tagline, contact_email, footer_text, updated_at \
             FROM site_settings ORDER BY id LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "site_settings"))
    }

    async fn testimonial_row(&self, id: i64) -> Result<Option<TestimonialRow>> {
        sqlx::query_as::<_, TestimonialRow>(
            "SELECT id, quote, name, role, avatar_url, created_at \
             FROM testimonials WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "testimonial"))
    }

    async fn article_row(&self, id: i64) -> Result<Option<ArticleRow>> {
        sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, url, image_url, excerpt, created_at FROM articles WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "article"))
    }

    async fn video_row(&self, id: i64) -> Result<Option<VideoRow>> {
        sqlx::query_as::<_, VideoRow>(
            "SELECT id, title, video_url, thumbnail_url, description, created_at \
             FROM videos WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "video"))
    }

    async fn learning_point_row(&self, id: i64) -> Result<Option<LearningPointRow>> {
        sqlx::query_as::<_, LearningPointRow>(
            "SELECT id, text, icon, order_index FROM learning_points WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "learning_point"))
    }

    async fn footer_category_row(&self, id: i64) -> Result<Option<FooterCategoryRow>> {
        sqlx::query_as::<_, FooterCategoryRow>(
            "SELECT id, title, order_index FROM footer_categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "footer_category"))
    }

    async fn footer_link_row(&self, id: i64) -> Result<Option<FooterLinkRow>> {
        sqlx::query_as::<_, FooterLinkRow>(
            "SELECT id, category_id, label, url, order_index FROM footer_links WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "footer_link"))
    }

    async fn social_link_row(&self, id: i64) -> Result<Option<SocialLinkRow>> {
        sqlx::query_as::<_, SocialLinkRow>(
            "SELECT id, platform, url FROM social_links WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "social_link"))
    }

    async fn bonus_item_row(&self, id: i64) -> Result<Option<BonusItemRow>> {
        sqlx::query_as::<_, BonusItemRow>(
            "SELECT id, title, description, icon, order_index FROM bonus_items WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "bonus_item"))
    }

    async fn milestone_row(&self, id: i64) -> Result<Option<MilestoneRow>> {
        sqlx::query_as::<_, MilestoneRow>(
            "SELECT id, title, description, progress, completed, order_index \
             FROM milestones WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "milestone"))
    }

    async fn theme_row(&self, id: i64) -> Result<Option<ThemeSettingsRow>> {
        sqlx::query_as::<_, ThemeSettingsRow>(
            "SELECT id, name, primary_color, background_color, text_color, applies_globally, \
             created_at FROM theme_settings WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "theme_settings"))
    }

    async fn seo_row(&self, id: i64) -> Result<Option<SeoMetadataRow>> {
        sqlx::query_as::<_, SeoMetadataRow>(
            "SELECT id, page, title, description, keywords, og_image_url, is_default \
             FROM seo_metadata WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "seo_metadata"))
    }
}

#[async_trait]
impl ContentStorage for SqliteStorage {
    // --- Singleton sections ---

    async fn hero(&self) -> Result<Option<Hero>> {
        self.hero_row().await?.map(HeroRow::into_section).transpose()
    }

    async fn update_hero(&self, patch: HeroPatch) -> Result<Hero> {
        let now = Utc::now();
        match self.hero_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE hero SET title = COALESCE(?1, title), \
                     subtitle = COALESCE(?2, subtitle), cta_text = COALESCE(?3, cta_text), \
                     cta_url = COALESCE(?4, cta_url), image_url = COALESCE(?5, image_url), \
                     updated_at = ?6 WHERE id = ?7",
                )
                .bind(patch.title.as_deref())
                .bind(patch.subtitle.as_deref())
                .bind(patch.cta_text.as_deref())
                .bind(patch.cta_url.as_deref())
                .bind(patch.image_url.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "hero"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = Hero::default();
                let section = Hero {
                    title: patch.title.unwrap_or(defaults.title),
                    subtitle: patch.subtitle.unwrap_or(defaults.subtitle),
                    cta_text: patch.cta_text.unwrap_or(defaults.cta_text),
                    cta_url: patch.cta_url.unwrap_or(defaults.cta_url),
                    image_url: patch.image_url.unwrap_or(defaults.image_url),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO hero (title, subtitle, cta_text, cta_url, image_url, updated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .bind(&section.title)
                .bind(&section.subtitle)
                .bind(&section.cta_text)
                .bind(&section.cta_url)
                .bind(&section.image_url)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "hero"))?;
                Ok(section)
            }
        }
    }

    async fn featured(&self) -> Result<Option<Featured>> {
        self.featured_row()
            .await?
            .map(FeaturedRow::into_section)
            .transpose()
    }

    async fn update_featured(&self, patch: FeaturedPatch) -> Result<Featured> {
        let now = Utc::now();
        match self.featured_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE featured SET heading = COALESCE(?1, heading), \
                     subheading = COALESCE(?2, subheading), badge_url = COALESCE(?3, badge_url), \
                     updated_at = ?4 WHERE id = ?5",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.subheading.as_deref())
                .bind(patch.badge_url.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "featured"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = Featured::default();
                let section = Featured {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    subheading: patch.subheading.unwrap_or(defaults.subheading),
                    badge_url: patch.badge_url.unwrap_or(defaults.badge_url),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO featured (heading, subheading, badge_url, updated_at) \
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&section.heading)
                .bind(&section.subheading)
                .bind(&section.badge_url)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "featured"))?;
                Ok(section)
            }
        }
    }

    async fn quote(&self) -> Result<Option<Quote>> {
        self.quote_row().await?.map(QuoteRow::into_section).transpose()
    }

    async fn update_quote(&self, patch: QuotePatch) -> Result<Quote> {
        let now = Utc::now();
        match self.quote_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE quote SET text = COALESCE(?1, text), \
                     attribution = COALESCE(?2, attribution), updated_at = ?3 WHERE id = ?4",
                )
                .bind(patch.text.as_deref())
                .bind(patch.attribution.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "quote"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = Quote::default();
                let section = Quote {
                    text: patch.text.unwrap_or(defaults.text),
                    attribution: patch.attribution.unwrap_or(defaults.attribution),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO quote (text, attribution, updated_at) VALUES (?1, ?2, ?3)",
                )
                .bind(&section.text)
                .bind(&section.attribution)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "quote"))?;
                Ok(section)
            }
        }
    }

    async fn landing(&self) -> Result<Option<Landing>> {
        self.landing_row()
            .await?
            .map(LandingRow::into_section)
            .transpose()
    }

    async fn update_landing(&self, patch: LandingPatch) -> Result<Landing> {
        let now = Utc::now();
        match self.landing_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE landing SET headline = COALESCE(?1, headline), \
                     subheadline = COALESCE(?2, subheadline), \
                     background_image_url = COALESCE(?3, background_image_url), \
                     updated_at = ?4 WHERE id = ?5",
                )
                .bind(patch.headline.as_deref())
                .bind(patch.subheadline.as_deref())
                .bind(patch.background_image_url.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "landing"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = Landing::default();
                let section = Landing {
                    headline: patch.headline.unwrap_or(defaults.headline),
                    subheadline: patch.subheadline.unwrap_or(defaults.subheadline),
                    background_image_url: patch
                        .background_image_url
                        .unwrap_or(defaults.background_image_url),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO landing (headline, subheadline, background_image_url, \
                     updated_at) VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&section.headline)
                .bind(&section.subheadline)
                .bind(&section.background_image_url)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "landing"))?;
                Ok(section)
            }
        }
    }

    async fn learning_points_section(&self) -> Result<Option<LearningPointsSection>> {
        self.learning_points_section_row()
            .await?
            .map(HeadingSectionRow::into_learning_points_section)
            .transpose()
    }

    async fn update_learning_points_section(
        &self,
        patch: LearningPointsSectionPatch,
    ) -> Result<LearningPointsSection> {
        let now = Utc::now();
        match self.learning_points_section_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE learning_points_section SET heading = COALESCE(?1, heading), \
                     subheading = COALESCE(?2, subheading), updated_at = ?3 WHERE id = ?4",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.subheading.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "learning_points_section"))?;

                let mut section = row.into_learning_points_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = LearningPointsSection::default();
                let section = LearningPointsSection {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    subheading: patch.subheading.unwrap_or(defaults.subheading),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO learning_points_section (heading, subheading, updated_at) \
                     VALUES (?1, ?2, ?3)",
                )
                .bind(&section.heading)
                .bind(&section.subheading)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "learning_points_section"))?;
                Ok(section)
            }
        }
    }

    async fn testimonial_section(&self) -> Result<Option<TestimonialSection>> {
        self.testimonial_section_row()
            .await?
            .map(HeadingSectionRow::into_testimonial_section)
            .transpose()
    }

    async fn update_testimonial_section(
        &self,
        patch: TestimonialSectionPatch,
    ) -> Result<TestimonialSection> {
        let now = Utc::now();
        match self.testimonial_section_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE testimonial_section SET heading = COALESCE(?1, heading), \
                     subheading = COALESCE(?2, subheading), updated_at = ?3 WHERE id = ?4",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.subheading.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "testimonial_section"))?;

                let mut section = row.into_testimonial_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = TestimonialSection::default();
                let section = TestimonialSection {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    subheading: patch.subheading.unwrap_or(defaults.subheading),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO testimonial_section (heading, subheading, updated_at) \
                     VALUES (?1, ?2, ?3)",
                )
                .bind(&section.heading)
                .bind(&section.subheading)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "testimonial_section"))?;
                Ok(section)
            }
        }
    }

    async fn about_book(&self) -> Result<Option<AboutBook>> {
        self.about_book_row()
            .await?
            .map(AboutBookRow::into_section)
            .transpose()
    }

    async fn update_about_book(&self, patch: AboutBookPatch) -> Result<AboutBook> {
        let now = Utc::now();
        match self.about_book_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE about_book SET heading = COALESCE(?1, heading), \
                     description = COALESCE(?2, description), \
                     cover_image_url = COALESCE(?3, cover_image_url), \
                     updated_at = ?4 WHERE id = ?5",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.description.as_deref())
                .bind(patch.cover_image_url.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "about_book"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = AboutBook::default();
                let section = AboutBook {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    description: patch.description.unwrap_or(defaults.description),
                    cover_image_url: patch.cover_image_url.unwrap_or(defaults.cover_image_url),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO about_book (heading, description, cover_image_url, updated_at) \
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&section.heading)
                .bind(&section.description)
                .bind(&section.cover_image_url)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "about_book"))?;
                Ok(section)
            }
        }
    }

    async fn author(&self) -> Result<Option<Author>> {
        self.author_row()
            .await?
            .map(AuthorRow::into_section)
            .transpose()
    }

    async fn update_author(&self, patch: AuthorPatch) -> Result<Author> {
        let now = Utc::now();
        match self.author_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE author SET name = COALESCE(?1, name), bio = COALESCE(?2, bio), \
                     photo_url = COALESCE(?3, photo_url), \
                     website_url = COALESCE(?4, website_url), updated_at = ?5 WHERE id = ?6",
                )
                .bind(patch.name.as_deref())
                .bind(patch.bio.as_deref())
                .bind(patch.photo_url.as_deref())
                .bind(patch.website_url.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "author"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = Author::default();
                let section = Author {
                    name: patch.name.unwrap_or(defaults.name),
                    bio: patch.bio.unwrap_or(defaults.bio),
                    photo_url: patch.photo_url.unwrap_or(defaults.photo_url),
                    website_url: patch.website_url.unwrap_or(defaults.website_url),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO author (name, bio, photo_url, website_url, updated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .bind(&section.name)
                .bind(&section.bio)
                .bind(&section.photo_url)
                .bind(&section.website_url)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "author"))?;
                Ok(section)
            }
        }
    }

    async fn bonus_section(&self) -> Result<Option<BonusSection>> {
        self.bonus_section_row()
            .await?
            .map(HeadingSectionRow::into_bonus_section)
            .transpose()
    }

    async fn update_bonus_section(&self, patch: BonusSectionPatch) -> Result<BonusSection> {
        let now = Utc::now();
        match self.bonus_section_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE bonus_section SET heading = COALESCE(?1, heading), \
                     subheading = COALESCE(?2, subheading), updated_at = ?3 WHERE id = ?4",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.subheading.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "bonus_section"))?;

                let mut section = row.into_bonus_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = BonusSection::default();
                let section = BonusSection {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    subheading: patch.subheading.unwrap_or(defaults.subheading),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO bonus_section (heading, subheading, updated_at) \
                     VALUES (?1, ?2, ?3)",
                )
                .bind(&section.heading)
                .bind(&section.subheading)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "bonus_section"))?;
                Ok(section)
            }
        }
    }

    async fn guarantee_section(&self) -> Result<Option<GuaranteeSection>> {
        self.guarantee_section_row()
            .await?
            .map(GuaranteeSectionRow::into_section)
            .transpose()
    }

    async fn update_guarantee_section(
        &self,
        patch: GuaranteeSectionPatch,
    ) -> Result<GuaranteeSection> {
        let now = Utc::now();
        match self.guarantee_section_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE guarantee_section SET heading = COALESCE(?1, heading), \
                     body = COALESCE(?2, body), badge_text = COALESCE(?3, badge_text), \
                     updated_at = ?4 WHERE id = ?5",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.body.as_deref())
                .bind(patch.badge_text.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "guarantee_section"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = GuaranteeSection::default();
                let section = GuaranteeSection {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    body: patch.body.unwrap_or(defaults.body),
                    badge_text: patch.badge_text.unwrap_or(defaults.badge_text),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO guarantee_section (heading, body, badge_text, updated_at) \
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&section.heading)
                .bind(&section.body)
                .bind(&section.badge_text)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "guarantee_section"))?;
                Ok(section)
            }
        }
    }

    async fn scholarship_section(&self) -> Result<Option<ScholarshipSection>> {
        self.scholarship_section_row()
            .await?
            .map(ScholarshipSectionRow::into_section)
            .transpose()
    }

    async fn update_scholarship_section(
        &self,
        patch: ScholarshipSectionPatch,
    ) -> Result<ScholarshipSection> {
        let now = Utc::now();
        match self.scholarship_section_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE scholarship_section SET heading = COALESCE(?1, heading), \
                     body = COALESCE(?2, body), \
                     application_url = COALESCE(?3, application_url), \
                     updated_at = ?4 WHERE id = ?5",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.body.as_deref())
                .bind(patch.application_url.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "scholarship_section"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = ScholarshipSection::default();
                let section = ScholarshipSection {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    body: patch.body.unwrap_or(defaults.body),
                    application_url: patch.application_url.unwrap_or(defaults.application_url),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO scholarship_section (heading, body, application_url, \
                     updated_at) VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&section.heading)
                .bind(&section.body)
                .bind(&section.application_url)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "scholarship_section"))?;
                Ok(section)
            }
        }
    }

    async fn youtube_framework_section(&self) -> Result<Option<YoutubeFrameworkSection>> {
        self.youtube_framework_section_row()
            .await?
            .map(YoutubeFrameworkSectionRow::into_section)
            .transpose()
    }

    async fn update_youtube_framework_section(
        &self,
        patch: YoutubeFrameworkSectionPatch,
    ) -> Result<YoutubeFrameworkSection> {
        let now = Utc::now();
        match self.youtube_framework_section_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE youtube_framework_section SET heading = COALESCE(?1, heading), \
                     video_url = COALESCE(?2, video_url), \
                     description = COALESCE(?3, description), updated_at = ?4 WHERE id = ?5",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.video_url.as_deref())
                .bind(patch.description.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "youtube_framework_section"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = YoutubeFrameworkSection::default();
                let section = YoutubeFrameworkSection {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    video_url: patch.video_url.unwrap_or(defaults.video_url),
                    description: patch.description.unwrap_or(defaults.description),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO youtube_framework_section (heading, video_url, description, \
                     updated_at) VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&section.heading)
                .bind(&section.video_url)
                .bind(&section.description)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "youtube_framework_section"))?;
                Ok(section)
            }
        }
    }

    async fn questions_section(&self) -> Result<Option<QuestionsSection>> {
        self.questions_section_row()
            .await?
            .map(QuestionsSectionRow::into_section)
            .transpose()
    }

    async fn update_questions_section(
        &self,
        patch: QuestionsSectionPatch,
    ) -> Result<QuestionsSection> {
        let now = Utc::now();
        match self.questions_section_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE questions_section SET heading = COALESCE(?1, heading), \
                     body = COALESCE(?2, body), contact_email = COALESCE(?3, contact_email), \
                     updated_at = ?4 WHERE id = ?5",
                )
                .bind(patch.heading.as_deref())
                .bind(patch.body.as_deref())
                .bind(patch.contact_email.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "questions_section"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = QuestionsSection::default();
                let section = QuestionsSection {
                    heading: patch.heading.unwrap_or(defaults.heading),
                    body: patch.body.unwrap_or(defaults.body),
                    contact_email: patch.contact_email.unwrap_or(defaults.contact_email),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO questions_section (heading, body, contact_email, updated_at) \
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&section.heading)
                .bind(&section.body)
                .bind(&section.contact_email)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "questions_section"))?;
                Ok(section)
            }
        }
    }

    async fn site_settings(&self) -> Result<Option<SiteSettings>> {
        self.site_settings_row()
            .await?
            .map(SiteSettingsRow::into_section)
            .transpose()
    }

    async fn update_site_settings(&self, patch: SiteSettingsPatch) -> Result<SiteSettings> {
        let now = Utc::now();
        match self.site_settings_row().await? {
            Some(row) => {
                sqlx::query(
                    "UPDATE site_settings SET site_title = COALESCE(?1, site_title), \
                     tagline = COALESCE(?2, tagline), \
                     contact_email = COALESCE(?3, contact_email), \
                     footer_text = COALESCE(?4, footer_text), updated_at = ?5 WHERE id = ?6",
                )
                .bind(patch.site_title.as_deref())
                .bind(patch.tagline.as_deref())
                .bind(patch.contact_email.as_deref())
                .bind(patch.footer_text.as_deref())
                .bind(now.to_rfc3339())
                .bind(row.id)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "site_settings"))?;

                let mut section = row.into_section()?;
                section.apply(patch);
                section.updated_at = now;
                Ok(section)
            }
            None => {
                let defaults = SiteSettings::default();
                let section = SiteSettings {
                    site_title: patch.site_title.unwrap_or(defaults.site_title),
                    tagline: patch.tagline.unwrap_or(defaults.tagline),
                    contact_email: patch.contact_email.unwrap_or(defaults.contact_email),
                    footer_text: patch.footer_text.unwrap_or(defaults.footer_text),
                    updated_at: now,
                };
                sqlx::query(
                    "INSERT INTO site_settings (site_title, tagline, contact_email, \
                     footer_text, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .bind(&section.site_title)
                .bind(&section.tagline)
                .bind(&section.contact_email)
                .bind(&section.footer_text)
                .bind(now.to_rfc3339())
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "site_settings"))?;
                Ok(section)
            }
        }
    }

    // --- Testimonials ---

    async fn testimonials(&self, limit: Option<usize>) -> Result<Vec<Testimonial>> {
        let rows = sqlx::query_as::<_, TestimonialRow>(
            "SELECT id, quote, name, role, avatar_url, created_at FROM testimonials LIMIT ?1",
        )
        .bind(sql_limit(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "testimonials"))?;
        rows.into_iter().map(TestimonialRow::into_entity).collect()
    }

    async fn testimonial(&self, id: &str) -> Result<Option<Testimonial>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        self.testimonial_row(id)
            .await?
            .map(TestimonialRow::into_entity)
            .transpose()
    }

    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO testimonials (quote, name, role, avatar_url, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&new.quote)
        .bind(&new.name)
        .bind(&new.role)
        .bind(new.avatar_url.as_deref())
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "testimonials"))?;

        Ok(Testimonial {
            id: result.last_insert_rowid().to_string(),
            quote: new.quote,
            name: new.name,
            role: new.role,
            avatar_url: new.avatar_url,
            created_at: now,
        })
    }

    async fn update_testimonial(
        &self,
        id: &str,
        patch: TestimonialPatch,
    ) -> Result<Option<Testimonial>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.testimonial_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE testimonials SET quote = COALESCE(?1, quote), name = COALESCE(?2, name), \
             role = COALESCE(?3, role), avatar_url = COALESCE(?4, avatar_url) WHERE id = ?5",
        )
        .bind(patch.quote.as_deref())
        .bind(patch.name.as_deref())
        .bind(patch.role.as_deref())
        .bind(patch.avatar_url.as_deref())
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "testimonials"))?;

        let mut entity = row.into_entity()?;
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_testimonial(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM testimonials WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "testimonials"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Articles ---

    async fn articles(&self, limit: Option<usize>) -> Result<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, url, image_url, excerpt, created_at FROM articles LIMIT ?1",
        )
        .bind(sql_limit(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "articles"))?;
        rows.into_iter().map(ArticleRow::into_entity).collect()
    }

    async fn article(&self, id: &str) -> Result<Option<Article>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        self.article_row(id)
            .await?
            .map(ArticleRow::into_entity)
            .transpose()
    }

    async fn create_article(&self, new: NewArticle) -> Result<Article> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO articles (title, url, image_url, excerpt, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&new.title)
        .bind(&new.url)
        .bind(new.image_url.as_deref())
        .bind(new.excerpt.as_deref())
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "articles"))?;

        Ok(Article {
            id: result.last_insert_rowid().to_string(),
            title: new.title,
            url: new.url,
            image_url: new.image_url,
            excerpt: new.excerpt,
            created_at: now,
        })
    }

    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Option<Article>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.article_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE articles SET title = COALESCE(?1, title), url = COALESCE(?2, url), \
             image_url = COALESCE(?3, image_url), excerpt = COALESCE(?4, excerpt) WHERE id = ?5",
        )
        .bind(patch.title.as_deref())
        .bind(patch.url.as_deref())
        .bind(patch.image_url.as_deref())
        .bind(patch.excerpt.as_deref())
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "articles"))?;

        let mut entity = row.into_entity()?;
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_article(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM articles WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "articles"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Videos ---

    async fn videos(&self, limit: Option<usize>) -> Result<Vec<Video>> {
        let rows = sqlx::query_as::<_, VideoRow>(
            "SELECT id, title, video_url, thumbnail_url, description, created_at \
             FROM videos LIMIT ?1",
        )
        .bind(sql_limit(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "videos"))?;
        rows.into_iter().map(VideoRow::into_entity).collect()
    }

    async fn video(&self, id: &str) -> Result<Option<Video>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        self.video_row(id)
            .await?
            .map(VideoRow::into_entity)
            .transpose()
    }

    async fn create_video(&self, new: NewVideo) -> Result<Video> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO videos (title, video_url, thumbnail_url, description, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&new.title)
        .bind(&new.video_url)
        .bind(new.thumbnail_url.as_deref())
        .bind(new.description.as_deref())
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "videos"))?;

        Ok(Video {
            id: result.last_insert_rowid().to_string(),
            title: new.title,
            video_url: new.video_url,
            thumbnail_url: new.thumbnail_url,
            description: new.description,
            created_at: now,
        })
    }

    async fn update_video(&self, id: &str, patch: VideoPatch) -> Result<Option<Video>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.video_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE videos SET title = COALESCE(?1, title), \
             video_url = COALESCE(?2, video_url), \
             thumbnail_url = COALESCE(?3, thumbnail_url), \
             description = COALESCE(?4, description) WHERE id = ?5",
        )
        .bind(patch.title.as_deref())
        .bind(patch.video_url.as_deref())
        .bind(patch.thumbnail_url.as_deref())
        .bind(patch.description.as_deref())
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "videos"))?;

        let mut entity = row.into_entity()?;
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_video(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM videos WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "videos"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Learning points ---

    async fn learning_points(&self) -> Result<Vec<LearningPoint>> {
        let rows = sqlx::query_as::<_, LearningPointRow>(
            "SELECT id, text, icon, order_index FROM learning_points \
             ORDER BY order_index ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "learning_points"))?;
        Ok(rows.into_iter().map(LearningPointRow::into_entity).collect())
    }

    async fn learning_point(&self, id: &str) -> Result<Option<LearningPoint>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        Ok(self
            .learning_point_row(id)
            .await?
            .map(LearningPointRow::into_entity))
    }

    async fn create_learning_point(&self, new: NewLearningPoint) -> Result<LearningPoint> {
        let result = sqlx::query(
            "INSERT INTO learning_points (text, icon, order_index) VALUES (?1, ?2, ?3)",
        )
        .bind(&new.text)
        .bind(new.icon.as_deref())
        .bind(new.order_index)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "learning_points"))?;

        Ok(LearningPoint {
            id: result.last_insert_rowid().to_string(),
            text: new.text,
            icon: new.icon,
            order_index: new.order_index,
        })
    }

    async fn update_learning_point(
        &self,
        id: &str,
        patch: LearningPointPatch,
    ) -> Result<Option<LearningPoint>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.learning_point_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE learning_points SET text = COALESCE(?1, text), \
             icon = COALESCE(?2, icon), order_index = COALESCE(?3, order_index) WHERE id = ?4",
        )
        .bind(patch.text.as_deref())
        .bind(patch.icon.as_deref())
        .bind(patch.order_index)
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "learning_points"))?;

        let mut entity = row.into_entity();
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_learning_point(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM learning_points WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "learning_points"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Footer categories ---

    async fn footer_categories(&self) -> Result<Vec<FooterCategory>> {
        let rows = sqlx::query_as::<_, FooterCategoryRow>(
            "SELECT id, title, order_index FROM footer_categories \
             ORDER BY order_index ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "footer_categories"))?;
        Ok(rows
            .into_iter()
            .map(FooterCategoryRow::into_entity)
            .collect())
    }

    async fn footer_category(&self, id: &str) -> Result<Option<FooterCategory>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        Ok(self
            .footer_category_row(id)
            .await?
            .map(FooterCategoryRow::into_entity))
    }

    async fn create_footer_category(&self, new: NewFooterCategory) -> Result<FooterCategory> {
        let result =
            sqlx::query("INSERT INTO footer_categories (title, order_index) VALUES (?1, ?2)")
                .bind(&new.title)
                .bind(new.order_index)
                .execute(self.pool())
                .await
                .map_err(|e| query_err(e, "footer_categories"))?;

        Ok(FooterCategory {
            id: result.last_insert_rowid().to_string(),
            title: new.title,
            order_index: new.order_index,
        })
    }

    async fn update_footer_category(
        &self,
        id: &str,
        patch: FooterCategoryPatch,
    ) -> Result<Option<FooterCategory>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.footer_category_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE footer_categories SET title = COALESCE(?1, title), \
             order_index = COALESCE(?2, order_index) WHERE id = ?3",
        )
        .bind(patch.title.as_deref())
        .bind(patch.order_index)
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "footer_categories"))?;

        let mut entity = row.into_entity();
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_footer_category(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM footer_categories WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "footer_categories"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Footer links ---

    async fn footer_links(&self) -> Result<Vec<FooterLink>> {
        let rows = sqlx::query_as::<_, FooterLinkRow>(
            "SELECT id, category_id, label, url, order_index FROM footer_links \
             ORDER BY order_index ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "footer_links"))?;
        Ok(rows.into_iter().map(FooterLinkRow::into_entity).collect())
    }

    async fn footer_link(&self, id: &str) -> Result<Option<FooterLink>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        Ok(self
            .footer_link_row(id)
            .await?
            .map(FooterLinkRow::into_entity))
    }

    async fn create_footer_link(&self, new: NewFooterLink) -> Result<FooterLink> {
        // A category id that does not parse cannot reference any row;
        // store 0 rather than failing (orphans are tolerated).
        let category_id = numeric_id(&new.category_id).unwrap_or(0);
        let result = sqlx::query(
            "INSERT INTO footer_links (category_id, label, url, order_index) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(category_id)
        .bind(&new.label)
        .bind(&new.url)
        .bind(new.order_index)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "footer_links"))?;

        Ok(FooterLink {
            id: result.last_insert_rowid().to_string(),
            category_id: category_id.to_string(),
            label: new.label,
            url: new.url,
            order_index: new.order_index,
        })
    }

    async fn update_footer_link(
        &self,
        id: &str,
        patch: FooterLinkPatch,
    ) -> Result<Option<FooterLink>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.footer_link_row(row_id).await? else {
            return Ok(None);
        };

        let category_id = patch.category_id.as_deref().and_then(|c| c.parse::<i64>().ok());
        sqlx::query(
            "UPDATE footer_links SET category_id = COALESCE(?1, category_id), \
             label = COALESCE(?2, label), url = COALESCE(?3, url), \
             order_index = COALESCE(?4, order_index) WHERE id = ?5",
        )
        .bind(category_id)
        .bind(patch.label.as_deref())
        .bind(patch.url.as_deref())
        .bind(patch.order_index)
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "footer_links"))?;

        let mut entity = row.into_entity();
        let patch = FooterLinkPatch {
            category_id: category_id.map(|c| c.to_string()),
            ..patch
        };
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_footer_link(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM footer_links WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "footer_links"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Social links ---

    async fn social_links(&self) -> Result<Vec<SocialLink>> {
        let rows = sqlx::query_as::<_, SocialLinkRow>(
            "SELECT id, platform, url FROM social_links",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "social_links"))?;
        Ok(rows.into_iter().map(SocialLinkRow::into_entity).collect())
    }

    async fn social_link(&self, id: &str) -> Result<Option<SocialLink>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        Ok(self
            .social_link_row(id)
            .await?
            .map(SocialLinkRow::into_entity))
    }

    async fn create_social_link(&self, new: NewSocialLink) -> Result<SocialLink> {
        let result = sqlx::query("INSERT INTO social_links (platform, url) VALUES (?1, ?2)")
            .bind(&new.platform)
            .bind(&new.url)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "social_links"))?;

        Ok(SocialLink {
            id: result.last_insert_rowid().to_string(),
            platform: new.platform,
            url: new.url,
        })
    }

    async fn update_social_link(
        &self,
        id: &str,
        patch: SocialLinkPatch,
    ) -> Result<Option<SocialLink>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.social_link_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE social_links SET platform = COALESCE(?1, platform), \
             url = COALESCE(?2, url) WHERE id = ?3",
        )
        .bind(patch.platform.as_deref())
        .bind(patch.url.as_deref())
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "social_links"))?;

        let mut entity = row.into_entity();
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_social_link(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM social_links WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "social_links"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Bonus items ---

    async fn bonus_items(&self) -> Result<Vec<BonusItem>> {
        let rows = sqlx::query_as::<_, BonusItemRow>(
            "SELECT id, title, description, icon, order_index FROM bonus_items \
             ORDER BY order_index ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "bonus_items"))?;
        Ok(rows.into_iter().map(BonusItemRow::into_entity).collect())
    }

    async fn bonus_item(&self, id: &str) -> Result<Option<BonusItem>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        Ok(self
            .bonus_item_row(id)
            .await?
            .map(BonusItemRow::into_entity))
    }

    async fn create_bonus_item(&self, new: NewBonusItem) -> Result<BonusItem> {
        let result = sqlx::query(
            "INSERT INTO bonus_items (title, description, icon, order_index) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.icon.as_deref())
        .bind(new.order_index)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "bonus_items"))?;

        Ok(BonusItem {
            id: result.last_insert_rowid().to_string(),
            title: new.title,
            description: new.description,
            icon: new.icon,
            order_index: new.order_index,
        })
    }

    async fn update_bonus_item(
        &self,
        id: &str,
        patch: BonusItemPatch,
    ) -> Result<Option<BonusItem>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.bonus_item_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE bonus_items SET title = COALESCE(?1, title), \
             description = COALESCE(?2, description), icon = COALESCE(?3, icon), \
             order_index = COALESCE(?4, order_index) WHERE id = ?5",
        )
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.icon.as_deref())
        .bind(patch.order_index)
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "bonus_items"))?;

        let mut entity = row.into_entity();
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_bonus_item(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM bonus_items WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "bonus_items"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Milestones ---

    async fn milestones(&self) -> Result<Vec<Milestone>> {
        let rows = sqlx::query_as::<_, MilestoneRow>(
            "SELECT id, title, description, progress, completed, order_index FROM milestones \
             ORDER BY order_index ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "milestones"))?;
        Ok(rows.into_iter().map(MilestoneRow::into_entity).collect())
    }

    async fn milestone(&self, id: &str) -> Result<Option<Milestone>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        Ok(self
            .milestone_row(id)
            .await?
            .map(MilestoneRow::into_entity))
    }

    async fn create_milestone(&self, new: NewMilestone) -> Result<Milestone> {
        let result = sqlx::query(
            "INSERT INTO milestones (title, description, progress, completed, order_index) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(new.progress)
        .bind(new.completed)
        .bind(new.order_index)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "milestones"))?;

        Ok(Milestone {
            id: result.last_insert_rowid().to_string(),
            title: new.title,
            description: new.description,
            progress: new.progress,
            completed: new.completed,
            order_index: new.order_index,
        })
    }

    async fn update_milestone(
        &self,
        id: &str,
        patch: MilestonePatch,
    ) -> Result<Option<Milestone>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.milestone_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE milestones SET title = COALESCE(?1, title), \
             description = COALESCE(?2, description), progress = COALESCE(?3, progress), \
             completed = COALESCE(?4, completed), order_index = COALESCE(?5, order_index) \
             WHERE id = ?6",
        )
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.progress)
        .bind(patch.completed)
        .bind(patch.order_index)
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "milestones"))?;

        let mut entity = row.into_entity();
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_milestone(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM milestones WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "milestones"))?;
        Ok(result.rows_affected() > 0)
    }

    // --- Themes ---

    async fn themes(&self) -> Result<Vec<ThemeSettings>> {
        let rows = sqlx::query_as::<_, ThemeSettingsRow>(
            "SELECT id, name, primary_color, background_color, text_color, applies_globally, \
             created_at FROM theme_settings",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "theme_settings"))?;
        rows.into_iter().map(ThemeSettingsRow::into_entity).collect()
    }

    async fn theme(&self, id: &str) -> Result<Option<ThemeSettings>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        self.theme_row(id)
            .await?
            .map(ThemeSettingsRow::into_entity)
            .transpose()
    }

    async fn create_theme(&self, new: NewThemeSettings) -> Result<ThemeSettings> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO theme_settings (name, primary_color, background_color, text_color, \
             applies_globally, created_at) VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        )
        .bind(&new.name)
        .bind(&new.primary_color)
        .bind(&new.background_color)
        .bind(&new.text_color)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "theme_settings"))?;

        Ok(ThemeSettings {
            id: result.last_insert_rowid().to_string(),
            name: new.name,
            primary_color: new.primary_color,
            background_color: new.background_color,
            text_color: new.text_color,
            applies_globally: false,
            created_at: now,
        })
    }

    async fn update_theme(
        &self,
        id: &str,
        patch: ThemeSettingsPatch,
    ) -> Result<Option<ThemeSettings>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.theme_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE theme_settings SET name = COALESCE(?1, name), \
             primary_color = COALESCE(?2, primary_color), \
             background_color = COALESCE(?3, background_color), \
             text_color = COALESCE(?4, text_color) WHERE id = ?5",
        )
        .bind(patch.name.as_deref())
        .bind(patch.primary_color.as_deref())
        .bind(patch.background_color.as_deref())
        .bind(patch.text_color.as_deref())
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "theme_settings"))?;

        let mut entity = row.into_entity()?;
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_theme(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM theme_settings WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "theme_settings"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn active_theme(&self) -> Result<Option<ThemeSettings>> {
        sqlx::query_as::<_, ThemeSettingsRow>(
            "SELECT id, name, primary_color, background_color, text_color, applies_globally, \
             created_at FROM theme_settings WHERE applies_globally = 1 LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "theme_settings"))?
        .map(ThemeSettingsRow::into_entity)
        .transpose()
    }

    async fn set_active_theme(&self, id: &str) -> Result<Option<ThemeSettings>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.theme_row(row_id).await? else {
            return Ok(None);
        };

        // Both flag flips commit together so no request can observe two
        // active themes, or none.
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| query_err(e, "theme_settings"))?;
        sqlx::query("UPDATE theme_settings SET applies_globally = 0 WHERE applies_globally = 1")
            .execute(&mut *tx)
            .await
            .map_err(|e| query_err(e, "theme_settings"))?;
        sqlx::query("UPDATE theme_settings SET applies_globally = 1 WHERE id = ?1")
            .bind(row_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| query_err(e, "theme_settings"))?;
        tx.commit()
            .await
            .map_err(|e| query_err(e, "theme_settings"))?;

        let mut entity = row.into_entity()?;
        entity.applies_globally = true;
        Ok(Some(entity))
    }

    // --- SEO metadata ---

    async fn seo_entries(&self) -> Result<Vec<SeoMetadata>> {
        let rows = sqlx::query_as::<_, SeoMetadataRow>(
            "SELECT id, page, title, description, keywords, og_image_url, is_default \
             FROM seo_metadata",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| query_err(e, "seo_metadata"))?;
        Ok(rows.into_iter().map(SeoMetadataRow::into_entity).collect())
    }

    async fn seo_entry(&self, id: &str) -> Result<Option<SeoMetadata>> {
        let Some(id) = numeric_id(id) else {
            return Ok(None);
        };
        Ok(self.seo_row(id).await?.map(SeoMetadataRow::into_entity))
    }

    async fn create_seo_entry(&self, new: NewSeoMetadata) -> Result<SeoMetadata> {
        let result = sqlx::query(
            "INSERT INTO seo_metadata (page, title, description, keywords, og_image_url, \
             is_default) VALUES (?1, ?2, ?3, ?4, ?5, 0)",
        )
        .bind(&new.page)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.keywords.as_deref())
        .bind(new.og_image_url.as_deref())
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "seo_metadata"))?;

        Ok(SeoMetadata {
            id: result.last_insert_rowid().to_string(),
            page: new.page,
            title: new.title,
            description: new.description,
            keywords: new.keywords,
            og_image_url: new.og_image_url,
            is_default: false,
        })
    }

    async fn update_seo_entry(
        &self,
        id: &str,
        patch: SeoMetadataPatch,
    ) -> Result<Option<SeoMetadata>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.seo_row(row_id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE seo_metadata SET page = COALESCE(?1, page), title = COALESCE(?2, title), \
             description = COALESCE(?3, description), keywords = COALESCE(?4, keywords), \
             og_image_url = COALESCE(?5, og_image_url) WHERE id = ?6",
        )
        .bind(patch.page.as_deref())
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.keywords.as_deref())
        .bind(patch.og_image_url.as_deref())
        .bind(row_id)
        .execute(self.pool())
        .await
        .map_err(|e| query_err(e, "seo_metadata"))?;

        let mut entity = row.into_entity();
        entity.apply(patch);
        Ok(Some(entity))
    }

    async fn delete_seo_entry(&self, id: &str) -> Result<bool> {
        let Some(id) = numeric_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM seo_metadata WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| query_err(e, "seo_metadata"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn default_seo(&self) -> Result<Option<SeoMetadata>> {
        Ok(sqlx::query_as::<_, SeoMetadataRow>(
            "SELECT id, page, title, description, keywords, og_image_url, is_default \
             FROM seo_metadata WHERE is_default = 1 LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "seo_metadata"))?
        .map(SeoMetadataRow::into_entity))
    }

    async fn seo_for_page(&self, page: &str) -> Result<Option<SeoMetadata>> {
        Ok(sqlx::query_as::<_, SeoMetadataRow>(
            "SELECT id, page, title, description, keywords, og_image_url, is_default \
             FROM seo_metadata WHERE page = ?1 LIMIT 1",
        )
        .bind(page)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| query_err(e, "seo_metadata"))?
        .map(SeoMetadataRow::into_entity))
    }

    async fn set_default_seo(&self, id: &str) -> Result<Option<SeoMetadata>> {
        let Some(row_id) = numeric_id(id) else {
            return Ok(None);
        };
        let Some(row) = self.seo_row(row_id).await? else {
            return Ok(None);
        };

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| query_err(e, "seo_metadata"))?;
        sqlx::query("UPDATE seo_metadata SET is_default = 0 WHERE is_default = 1")
            .execute(&mut *tx)
            .await
            .map_err(|e| query_err(e, "seo_metadata"))?;
        sqlx::query("UPDATE seo_metadata SET is_default = 1 WHERE id = ?1")
            .bind(row_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| query_err(e, "seo_metadata"))?;
        tx.commit()
            .await
            .map_err(|e| query_err(e, "seo_metadata"))?;

        let mut entity = row.into_entity();
        entity.is_default = true;
        Ok(Some(entity))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use bookpage_content::{
        Hero, HeroPatch, NewFooterCategory, NewFooterLink, NewMilestone, NewSeoMetadata,
        NewTestimonial, NewThemeSettings, QuotePatch, TestimonialPatch,
    };
    use bookpage_storage::ContentStorage;

    use crate::SqliteStorage;

    async fn open_storage() -> (SqliteStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("content.db").display());
        let storage = SqliteStorage::connect(&url).await.unwrap();
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
    async fn test_connect_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("content.db").display());

        // Schema init must survive a second connect against the same file.
        let first = SqliteStorage::connect(&url).await.unwrap();
        first.update_hero(HeroPatch::default()).await.unwrap();
        let second = SqliteStorage::connect(&url).await.unwrap();

        assert!(second.hero().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_singleton_absent_on_fresh_store() {
        let (storage, _dir) = open_storage().await;

        assert!(storage.hero().await.unwrap().is_none());
        assert!(storage.site_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_fresh_singleton_fills_defaults() {
        let (storage, _dir) = open_storage().await;

        let hero = storage
            .update_hero(HeroPatch {
                title: Some("Custom title".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(hero.title, "Custom title");
        assert_eq!(hero.cta_text, Hero::default().cta_text);

        // And the same record comes back from the getter.
        let fetched = storage.hero().await.unwrap().unwrap();
        assert_eq!(fetched.title, "Custom title");
        assert_eq!(fetched.cta_text, Hero::default().cta_text);
    }

    #[tokio::test]
    async fn test_disjoint_partial_updates_union() {
        let (storage, _dir) = open_storage().await;

        storage
            .update_quote(QuotePatch {
                text: Some("First".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        storage
            .update_quote(QuotePatch {
                attribution: Some("Second".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();

        let quote = storage.quote().await.unwrap().unwrap();
        assert_eq!(quote.text, "First");
        assert_eq!(quote.attribution, "Second");
    }

    #[tokio::test]
    async fn test_singleton_update_does_not_duplicate_rows() {
        let (storage, _dir) = open_storage().await;

        for i in 0..3 {
            storage
                .update_hero(HeroPatch {
                    title: Some(format!("Title {i}")),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hero")
            .fetch_one(storage.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (storage, _dir) = open_storage().await;

        let created = storage
            .create_testimonial(NewTestimonial {
                quote: "Changed how I work".to_owned(),
                name: "Priya".to_owned(),
                role: "Tech lead".to_owned(),
                avatar_url: Some("/avatars/priya.png".to_owned()),
            })
            .await
            .unwrap();
        let fetched = storage.testimonial(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched.quote, created.quote);
        assert_eq!(fetched.avatar_url, created.avatar_url);
    }

    #[tokio::test]
    async fn test_collection_update_patches_fields() {
        let (storage, _dir) = open_storage().await;
        let created = storage
            .create_testimonial(NewTestimonial {
                quote: "Original".to_owned(),
                name: "Sam".to_owned(),
                role: "Reader".to_owned(),
                avatar_url: None,
            })
            .await
            .unwrap();

        let updated = storage
            .update_testimonial(
                &created.id,
                TestimonialPatch {
                    quote: Some("Edited".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.quote, "Edited");
        assert_eq!(updated.name, "Sam");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let (storage, _dir) = open_storage().await;

        assert!(storage.testimonial("abc-123").await.unwrap().is_none());
        assert!(!storage.delete_testimonial("abc-123").await.unwrap());
        assert!(storage
            .update_testimonial("abc-123", TestimonialPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (storage, _dir) = open_storage().await;
        let created = storage
            .create_milestone(NewMilestone {
                title: "Outline".to_owned(),
                description: None,
                progress: 0,
                completed: false,
                order_index: 0,
            })
            .await
            .unwrap();

        assert!(storage.delete_milestone(&created.id).await.unwrap());
        assert!(storage.milestone(&created.id).await.unwrap().is_none());
        assert!(!storage.delete_milestone(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_milestones_ordered_by_order_index() {
        let (storage, _dir) = open_storage().await;
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
        let order: Vec<i64> = milestones.iter().map(|m| m.order_index).collect();

        assert!(order.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(milestones[0].title, "a");
    }

    #[tokio::test]
    async fn test_footer_link_keeps_category_reference() {
        let (storage, _dir) = open_storage().await;
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

        assert_eq!(link.category_id, category.id);
        let fetched = storage.footer_link(&link.id).await.unwrap().unwrap();
        assert_eq!(fetched.category_id, category.id);
    }

    #[tokio::test]
    async fn test_set_active_theme_is_exclusive() {
        let (storage, _dir) = open_storage().await;
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
        assert_eq!(
            storage.active_theme().await.unwrap().map(|t| t.id),
            Some(second.id)
        );
    }

    #[tokio::test]
    async fn test_set_active_theme_unknown_id_is_none() {
        let (storage, _dir) = open_storage().await;
        let theme = storage.create_theme(new_theme("Light")).await.unwrap();
        storage.set_active_theme(&theme.id).await.unwrap();

        assert!(storage.set_active_theme("9999").await.unwrap().is_none());
        // Previous active theme is untouched.
        assert_eq!(
            storage.active_theme().await.unwrap().map(|t| t.id),
            Some(theme.id)
        );
    }

    #[tokio::test]
    async fn test_seo_default_flag_moves_atomically() {
        let (storage, _dir) = open_storage().await;
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
    }

    #[tokio::test]
    async fn test_seo_for_page_is_exact_match_only() {
        let (storage, _dir) = open_storage().await;
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
        storage.set_default_seo(&home.id).await.unwrap();

        // No fallback at storage level; the caller consults default_seo.
        assert!(storage.seo_for_page("/missing").await.unwrap().is_none());
        assert_eq!(
            storage.default_seo().await.unwrap().map(|s| s.id),
            Some(home.id)
        );
    }

    #[tokio::test]
    async fn test_testimonials_limit() {
        let (storage, _dir) = open_storage().await;
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

        assert_eq!(storage.testimonials(Some(2)).await.unwrap().len(), 2);
        assert_eq!(storage.testimonials(None).await.unwrap().len(), 5);
    }
}
