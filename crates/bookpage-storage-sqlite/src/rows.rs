//! Row structs mapping snake_case columns to contract types.
//!
//! Every query selects explicit columns into one of these structs; the
//! `into_*` conversions rename fields, render integer ids as decimal
//! strings and parse stored RFC 3339 timestamps. A timestamp that no
//! longer parses is a `Corrupt` storage error, not a panic.

use chrono::{DateTime, Utc};

use bookpage_content::{
    AboutBook, Article, Author, BonusItem, BonusSection, Featured, FooterCategory, FooterLink,
    GuaranteeSection, Hero, Landing, LearningPoint, LearningPointsSection, Milestone,
    QuestionsSection, Quote, ScholarshipSection, SeoMetadata, SiteSettings, SocialLink,
    Testimonial, TestimonialSection, ThemeSettings, Video, YoutubeFrameworkSection,
};
use bookpage_storage::{StorageError, StorageErrorKind};

use crate::BACKEND;

/// Parse a stored RFC 3339 timestamp.
pub(crate) fn parse_timestamp(
    value: &str,
    entity: &'static str,
) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt)
                .with_backend(BACKEND)
                .with_context(entity)
                .with_source(e)
        })
}

// --- Singleton sections ---

#[derive(sqlx::FromRow)]
pub(crate) struct HeroRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) cta_text: String,
    pub(crate) cta_url: String,
    pub(crate) image_url: String,
    pub(crate) updated_at: String,
}

impl HeroRow {
    pub(crate) fn into_section(self) -> Result<Hero, StorageError> {
        Ok(Hero {
            title: self.title,
            subtitle: self.subtitle,
            cta_text: self.cta_text,
            cta_url: self.cta_url,
            image_url: self.image_url,
            updated_at: parse_timestamp(&self.updated_at, "hero")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct FeaturedRow {
    pub(crate) id: i64,
    pub(crate) heading: String,
    pub(crate) subheading: String,
    pub(crate) badge_url: String,
    pub(crate) updated_at: String,
}

impl FeaturedRow {
    pub(crate) fn into_section(self) -> Result<Featured, StorageError> {
        Ok(Featured {
            heading: self.heading,
            subheading: self.subheading,
            badge_url: self.badge_url,
            updated_at: parse_timestamp(&self.updated_at, "featured")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct QuoteRow {
    pub(crate) id: i64,
    pub(crate) text: String,
    pub(crate) attribution: String,
    pub(crate) updated_at: String,
}

impl QuoteRow {
    pub(crate) fn into_section(self) -> Result<Quote, StorageError> {
        Ok(Quote {
            text: self.text,
            attribution: self.attribution,
            updated_at: parse_timestamp(&self.updated_at, "quote")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct LandingRow {
    pub(crate) id: i64,
    pub(crate) headline: String,
    pub(crate) subheadline: String,
    pub(crate) background_image_url: String,
    pub(crate) updated_at: String,
}

impl LandingRow {
    pub(crate) fn into_section(self) -> Result<Landing, StorageError> {
        Ok(Landing {
            headline: self.headline,
            subheadline: self.subheadline,
            background_image_url: self.background_image_url,
            updated_at: parse_timestamp(&self.updated_at, "landing")?,
        })
    }
}

/// Shared row shape for the heading/subheading sections.
#[derive(sqlx::FromRow)]
pub(crate) struct HeadingSectionRow {
    pub(crate) id: i64,
    pub(crate) heading: String,
    pub(crate) subheading: String,
    pub(crate) updated_at: String,
}

impl HeadingSectionRow {
    pub(crate) fn into_learning_points_section(
        self,
    ) -> Result<LearningPointsSection, StorageError> {
        Ok(LearningPointsSection {
            heading: self.heading,
            subheading: self.subheading,
            updated_at: parse_timestamp(&self.updated_at, "learning_points_section")?,
        })
    }

    pub(crate) fn into_testimonial_section(self) -> Result<TestimonialSection, StorageError> {
        Ok(TestimonialSection {
            heading: self.heading,
            subheading: self.subheading,
            updated_at: parse_timestamp(&self.updated_at, "testimonial_section")?,
        })
    }

    pub(crate) fn into_bonus_section(self) -> Result<BonusSection, StorageError> {
        Ok(BonusSection {
            heading: self.heading,
            subheading: self.subheading,
            updated_at: parse_timestamp(&self.updated_at, "bonus_section")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct AboutBookRow {
    pub(crate) id: i64,
    pub(crate) heading: String,
    pub(crate) description: String,
    pub(crate) cover_image_url: String,
    pub(crate) updated_at: String,
}

impl AboutBookRow {
    pub(crate) fn into_section(self) -> Result<AboutBook, StorageError> {
        Ok(AboutBook {
            heading: self.heading,
            description: self.description,
            cover_image_url: self.cover_image_url,
            updated_at: parse_timestamp(&self.updated_at, "about_book")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct AuthorRow {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) bio: String,
    pub(crate) photo_url: String,
    pub(crate) website_url: String,
    pub(crate) updated_at: String,
}

impl AuthorRow {
    pub(crate) fn into_section(self) -> Result<Author, StorageError> {
        Ok(Author {
            name: self.name,
            bio: self.bio,
            photo_url: self.photo_url,
            website_url: self.website_url,
            updated_at: parse_timestamp(&self.updated_at, "author")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct GuaranteeSectionRow {
    pub(crate) id: i64,
    pub(crate) heading: String,
    pub(crate) body: String,
    pub(crate) badge_text: String,
    pub(crate) updated_at: String,
}

impl GuaranteeSectionRow {
    pub(crate) fn into_section(self) -> Result<GuaranteeSection, StorageError> {
        Ok(GuaranteeSection {
            heading: self.heading,
            body: self.body,
            badge_text: self.badge_text,
            updated_at: parse_timestamp(&self.updated_at, "guarantee_section")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ScholarshipSectionRow {
    pub(crate) id: i64,
    pub(crate) heading: String,
    pub(crate) body: String,
    pub(crate) application_url: String,
    pub(crate) updated_at: String,
}

impl ScholarshipSectionRow {
    pub(crate) fn into_section(self) -> Result<ScholarshipSection, StorageError> {
        Ok(ScholarshipSection {
            heading: self.heading,
            body: self.body,
            application_url: self.application_url,
            updated_at: parse_timestamp(&self.updated_at, "scholarship_section")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct YoutubeFrameworkSectionRow {
    pub(crate) id: i64,
    pub(crate) heading: String,
    pub(crate) video_url: String,
    pub(crate) description: String,
    pub(crate) updated_at: String,
}

impl YoutubeFrameworkSectionRow {
    pub(crate) fn into_section(self) -> Result<YoutubeFrameworkSection, StorageError> {
        Ok(YoutubeFrameworkSection {
            heading: self.heading,
            video_url: self.video_url,
            description: self.description,
            updated_at: parse_timestamp(&self.updated_at, "youtube_framework_section")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct QuestionsSectionRow {
    pub(crate) id: i64,
    pub(crate) heading: String,
    pub(crate) body: String,
    pub(crate) contact_email: String,
    pub(crate) updated_at: String,
}

impl QuestionsSectionRow {
    pub(crate) fn into_section(self) -> Result<QuestionsSection, StorageError> {
        Ok(QuestionsSection {
            heading: self.heading,
            body: self.body,
            contact_email: self.contact_email,
            updated_at: parse_timestamp(&self.updated_at, "questions_section")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct SiteSettingsRow {
    pub(crate) id: i64,
    pub(crate) site_title: String,
    pub(crate) tagline: String,
    pub(crate) contact_email: String,
    pub(crate) footer_text: String,
    pub(crate) updated_at: String,
}

impl SiteSettingsRow {
    pub(crate) fn into_section(self) -> Result<SiteSettings, StorageError> {
        Ok(SiteSettings {
            site_title: self.site_title,
            tagline: self.tagline,
            contact_email: self.contact_email,
            footer_text: self.footer_text,
            updated_at: parse_timestamp(&self.updated_at, "site_settings")?,
        })
    }
}

// --- Collection entities ---

#[derive(sqlx::FromRow)]
pub(crate) struct TestimonialRow {
    pub(crate) id: i64,
    pub(crate) quote: String,
    pub(crate) name: String,
    pub(crate) role: String,
    pub(crate) avatar_url: Option<String>,
    pub(crate) created_at: String,
}

impl TestimonialRow {
    pub(crate) fn into_entity(self) -> Result<Testimonial, StorageError> {
        Ok(Testimonial {
            id: self.id.to_string(),
            quote: self.quote,
            name: self.name,
            role: self.role,
            avatar_url: self.avatar_url,
            created_at: parse_timestamp(&self.created_at, "testimonial")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ArticleRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) image_url: Option<String>,
    pub(crate) excerpt: Option<String>,
    pub(crate) created_at: String,
}

impl ArticleRow {
    pub(crate) fn into_entity(self) -> Result<Article, StorageError> {
        Ok(Article {
            id: self.id.to_string(),
            title: self.title,
            url: self.url,
            image_url: self.image_url,
            excerpt: self.excerpt,
            created_at: parse_timestamp(&self.created_at, "article")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct VideoRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) video_url: String,
    pub(crate) thumbnail_url: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) created_at: String,
}

impl VideoRow {
    pub(crate) fn into_entity(self) -> Result<Video, StorageError> {
        Ok(Video {
            id: self.id.to_string(),
            title: self.title,
            video_url: self.video_url,
            thumbnail_url: self.thumbnail_url,
            description: self.description,
            created_at: parse_timestamp(&self.created_at, "video")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct LearningPointRow {
    pub(crate) id: i64,
    pub(crate) text: String,
    pub(crate) icon: Option<String>,
    pub(crate) order_index: i64,
}

impl LearningPointRow {
    pub(crate) fn into_entity(self) -> LearningPoint {
        LearningPoint {
            id: self.id.to_string(),
            text: self.text,
            icon: self.icon,
            order_index: self.order_index,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct FooterCategoryRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) order_index: i64,
}

impl FooterCategoryRow {
    pub(crate) fn into_entity(self) -> FooterCategory {
        FooterCategory {
            id: self.id.to_string(),
            title: self.title,
            order_index: self.order_index,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct FooterLinkRow {
    pub(crate) id: i64,
    pub(crate) category_id: i64,
    pub(crate) label: String,
    pub(crate) url: String,
    pub(crate) order_index: i64,
}

impl FooterLinkRow {
    pub(crate) fn into_entity(self) -> FooterLink {
        FooterLink {
            id: self.id.to_string(),
            category_id: self.category_id.to_string(),
            label: self.label,
            url: self.url,
            order_index: self.order_index,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct SocialLinkRow {
    pub(crate) id: i64,
    pub(crate) platform: String,
    pub(crate) url: String,
}

impl SocialLinkRow {
    pub(crate) fn into_entity(self) -> SocialLink {
        SocialLink {
            id: self.id.to_string(),
            platform: self.platform,
            url: self.url,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BonusItemRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) icon: Option<String>,
    pub(crate) order_index: i64,
}

impl BonusItemRow {
    pub(crate) fn into_entity(self) -> BonusItem {
        BonusItem {
            id: self.id.to_string(),
            title: self.title,
            description: self.description,
            icon: self.icon,
            order_index: self.order_index,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct MilestoneRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) progress: i64,
    pub(crate) completed: bool,
    pub(crate) order_index: i64,
}

impl MilestoneRow {
    pub(crate) fn into_entity(self) -> Milestone {
        Milestone {
            id: self.id.to_string(),
            title: self.title,
            description: self.description,
            progress: self.progress,
            completed: self.completed,
            order_index: self.order_index,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ThemeSettingsRow {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) primary_color: String,
    pub(crate) background_color: String,
    pub(crate) text_color: String,
    pub(crate) applies_globally: bool,
    pub(crate) created_at: String,
}

impl ThemeSettingsRow {
    pub(crate) fn into_entity(self) -> Result<ThemeSettings, StorageError> {
        Ok(ThemeSettings {
            id: self.id.to_string(),
            name: self.name,
            primary_color: self.primary_color,
            background_color: self.background_color,
            text_color: self.text_color,
            applies_globally: self.applies_globally,
            created_at: parse_timestamp(&self.created_at, "theme_settings")?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct SeoMetadataRow {
    pub(crate) id: i64,
    pub(crate) page: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) keywords: Option<String>,
    pub(crate) og_image_url: Option<String>,
    pub(crate) is_default: bool,
}

impl SeoMetadataRow {
    pub(crate) fn into_entity(self) -> SeoMetadata {
        SeoMetadata {
            id: self.id.to_string(),
            page: self.page,
            title: self.title,
            description: self.description,
            keywords: self.keywords,
            og_image_url: self.og_image_url,
            is_default: self.is_default,
        }
    }
}
