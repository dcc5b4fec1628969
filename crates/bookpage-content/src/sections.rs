//! Singleton section entities.
//!
//! Each section has at most one live instance per store. Getting an absent
//! section is not an error; updating an absent section creates it from the
//! `Default` impl with the patch applied on top. The `Default` impls in
//! this module are the only place default content lives; both storage
//! backends build fresh sections from them, so the rendered site has sane
//! values before the first admin edit no matter which backend is active.
//!
//! Every section has an `apply` method with the same contract: `Some`
//! patch fields overwrite, `None` fields keep the stored value. The
//! backend stamps `updated_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Above-the-fold hero section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    /// Main headline.
    pub title: String,
    /// Supporting line under the headline.
    pub subtitle: String,
    /// Call-to-action button label.
    pub cta_text: String,
    /// Call-to-action target URL.
    pub cta_url: String,
    /// Cover/hero artwork URL.
    pub image_url: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            title: "The Systems Mindset".to_owned(),
            subtitle: "A practical guide to building software that lasts".to_owned(),
            cta_text: "Get the book".to_owned(),
            cta_url: "/buy".to_owned(),
            image_url: "/images/hero-cover.png".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`Hero`]. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub image_url: Option<String>,
}

impl Hero {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: HeroPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.subtitle {
            self.subtitle = v;
        }
        if let Some(v) = patch.cta_text {
            self.cta_text = v;
        }
        if let Some(v) = patch.cta_url {
            self.cta_url = v;
        }
        if let Some(v) = patch.image_url {
            self.image_url = v;
        }
    }
}

/// "As featured in" strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Featured {
    pub heading: String,
    pub subheading: String,
    /// Badge or press-logo image URL.
    pub badge_url: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Featured {
    fn default() -> Self {
        Self {
            heading: "As featured in".to_owned(),
            subheading: String::new(),
            badge_url: "/images/featured-badge.png".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`Featured`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturedPatch {
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub badge_url: Option<String>,
}

impl Featured {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: FeaturedPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.subheading {
            self.subheading = v;
        }
        if let Some(v) = patch.badge_url {
            self.badge_url = v;
        }
    }
}

/// Pull quote shown between sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub text: String,
    pub attribution: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            text: "Programs must be written for people to read, and only incidentally for \
                   machines to execute."
                .to_owned(),
            attribution: "Harold Abelson".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`Quote`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotePatch {
    pub text: Option<String>,
    pub attribution: Option<String>,
}

impl Quote {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: QuotePatch) {
        if let Some(v) = patch.text {
            self.text = v;
        }
        if let Some(v) = patch.attribution {
            self.attribution = v;
        }
    }
}

/// Landing banner shown above the hero on campaign pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landing {
    pub headline: String,
    pub subheadline: String,
    pub background_image_url: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Landing {
    fn default() -> Self {
        Self {
            headline: "Ship with confidence".to_owned(),
            subheadline: "Everything you need to go from draft to launch".to_owned(),
            background_image_url: "/images/landing-bg.jpg".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`Landing`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandingPatch {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub background_image_url: Option<String>,
}

impl Landing {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: LandingPatch) {
        if let Some(v) = patch.headline {
            self.headline = v;
        }
        if let Some(v) = patch.subheadline {
            self.subheadline = v;
        }
        if let Some(v) = patch.background_image_url {
            self.background_image_url = v;
        }
    }
}

/// Header copy for the learning-points list.
///
/// The points themselves are the [`crate::collections::LearningPoint`]
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPointsSection {
    pub heading: String,
    pub subheading: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for LearningPointsSection {
    fn default() -> Self {
        Self {
            heading: "What you will learn".to_owned(),
            subheading: "Concrete skills, not platitudes".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`LearningPointsSection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningPointsSectionPatch {
    pub heading: Option<String>,
    pub subheading: Option<String>,
}

impl LearningPointsSection {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: LearningPointsSectionPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.subheading {
            self.subheading = v;
        }
    }
}

/// Header copy for the testimonial carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialSection {
    pub heading: String,
    pub subheading: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for TestimonialSection {
    fn default() -> Self {
        Self {
            heading: "What readers say".to_owned(),
            subheading: String::new(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`TestimonialSection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialSectionPatch {
    pub heading: Option<String>,
    pub subheading: Option<String>,
}

impl TestimonialSection {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: TestimonialSectionPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.subheading {
            self.subheading = v;
        }
    }
}

/// "About the book" section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutBook {
    pub heading: String,
    pub description: String,
    pub cover_image_url: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for AboutBook {
    fn default() -> Self {
        Self {
            heading: "About the book".to_owned(),
            description: "Three hundred pages of field-tested advice on designing, building \
                          and maintaining real systems."
                .to_owned(),
            cover_image_url: "/images/cover.png".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`AboutBook`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutBookPatch {
    pub heading: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
}

impl AboutBook {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: AboutBookPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.cover_image_url {
            self.cover_image_url = v;
        }
    }
}

/// Author bio section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub bio: String,
    pub photo_url: String,
    pub website_url: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "Jane Halvorsen".to_owned(),
            bio: "Engineer and writer. Jane has spent fifteen years building and operating \
                  production systems, and now teaches teams how to do the same."
                .to_owned(),
            photo_url: "/images/author.jpg".to_owned(),
            website_url: "https://example.com".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`Author`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub website_url: Option<String>,
}

impl Author {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: AuthorPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.bio {
            self.bio = v;
        }
        if let Some(v) = patch.photo_url {
            self.photo_url = v;
        }
        if let Some(v) = patch.website_url {
            self.website_url = v;
        }
    }
}

/// Header copy for the bonus-items list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusSection {
    pub heading: String,
    pub subheading: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for BonusSection {
    fn default() -> Self {
        Self {
            heading: "Bonuses included".to_owned(),
            subheading: "Free with every purchase".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`BonusSection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BonusSectionPatch {
    pub heading: Option<String>,
    pub subheading: Option<String>,
}

impl BonusSection {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: BonusSectionPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.subheading {
            self.subheading = v;
        }
    }
}

/// Money-back guarantee section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteeSection {
    pub heading: String,
    pub body: String,
    pub badge_text: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for GuaranteeSection {
    fn default() -> Self {
        Self {
            heading: "30-day guarantee".to_owned(),
            body: "If the book is not for you, reply to your receipt within 30 days for a \
                   full refund."
                .to_owned(),
            badge_text: "100% money back".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`GuaranteeSection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuaranteeSectionPatch {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub badge_text: Option<String>,
}

impl GuaranteeSection {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: GuaranteeSectionPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.body {
            self.body = v;
        }
        if let Some(v) = patch.badge_text {
            self.badge_text = v;
        }
    }
}

/// Scholarship program section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipSection {
    pub heading: String,
    pub body: String,
    pub application_url: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for ScholarshipSection {
    fn default() -> Self {
        Self {
            heading: "Scholarships".to_owned(),
            body: "Students and anyone between jobs can apply for a free copy.".to_owned(),
            application_url: "/scholarship".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`ScholarshipSection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScholarshipSectionPatch {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub application_url: Option<String>,
}

impl ScholarshipSection {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: ScholarshipSectionPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.body {
            self.body = v;
        }
        if let Some(v) = patch.application_url {
            self.application_url = v;
        }
    }
}

/// Embedded framework-overview video section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeFrameworkSection {
    pub heading: String,
    /// Embed URL; empty disables the section on the public site.
    pub video_url: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for YoutubeFrameworkSection {
    fn default() -> Self {
        Self {
            heading: "The framework, in nine minutes".to_owned(),
            video_url: String::new(),
            description: "A short walkthrough of the method the book teaches.".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`YoutubeFrameworkSection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YoutubeFrameworkSectionPatch {
    pub heading: Option<String>,
    pub video_url: Option<String>,
    pub description: Option<String>,
}

impl YoutubeFrameworkSection {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: YoutubeFrameworkSectionPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.video_url {
            self.video_url = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
    }
}

/// FAQ section header and contact line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsSection {
    pub heading: String,
    pub body: String,
    pub contact_email: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for QuestionsSection {
    fn default() -> Self {
        Self {
            heading: "Frequently asked questions".to_owned(),
            body: "Answers to the questions readers ask most.".to_owned(),
            contact_email: "hello@example.com".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`QuestionsSection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionsSectionPatch {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub contact_email: Option<String>,
}

impl QuestionsSection {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: QuestionsSectionPatch) {
        if let Some(v) = patch.heading {
            self.heading = v;
        }
        if let Some(v) = patch.body {
            self.body = v;
        }
        if let Some(v) = patch.contact_email {
            self.contact_email = v;
        }
    }
}

/// Site-wide settings.
///
/// A fixed, enumerated field set. Unrecognized keys are rejected at the
/// serde boundary rather than stored as an open bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_title: String,
    pub tagline: String,
    pub contact_email: String,
    pub footer_text: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_title: "The Systems Mindset".to_owned(),
            tagline: "Build software that lasts".to_owned(),
            contact_email: "hello@example.com".to_owned(),
            footer_text: "© The Systems Mindset. All rights reserved.".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for [`SiteSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettingsPatch {
    pub site_title: Option<String>,
    pub tagline: Option<String>,
    pub contact_email: Option<String>,
    pub footer_text: Option<String>,
}

impl SiteSettings {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: SiteSettingsPatch) {
        if let Some(v) = patch.site_title {
            self.site_title = v;
        }
        if let Some(v) = patch.tagline {
            self.tagline = v;
        }
        if let Some(v) = patch.contact_email {
            self.contact_email = v;
        }
        if let Some(v) = patch.footer_text {
            self.footer_text = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_hero_defaults_are_renderable() {
        let hero = Hero::default();

        assert!(!hero.title.is_empty());
        assert!(!hero.cta_text.is_empty());
        assert!(hero.cta_url.starts_with('/'));
        assert!(!hero.image_url.is_empty());
    }

    #[test]
    fn test_apply_overwrites_only_some_fields() {
        let mut hero = Hero::default();
        let original_subtitle = hero.subtitle.clone();

        hero.apply(HeroPatch {
            title: Some("New title".to_owned()),
            ..Default::default()
        });

        assert_eq!(hero.title, "New title");
        assert_eq!(hero.subtitle, original_subtitle);
    }

    #[test]
    fn test_apply_empty_patch_is_identity() {
        let mut settings = SiteSettings::default();
        let before = settings.clone();

        settings.apply(SiteSettingsPatch::default());

        assert_eq!(settings, before);
    }

    #[test]
    fn test_disjoint_patches_union() {
        let mut author = Author::default();

        author.apply(AuthorPatch {
            name: Some("New Name".to_owned()),
            ..Default::default()
        });
        author.apply(AuthorPatch {
            bio: Some("New bio.".to_owned()),
            ..Default::default()
        });

        assert_eq!(author.name, "New Name");
        assert_eq!(author.bio, "New bio.");
    }

    #[test]
    fn test_sections_serialize_camel_case() {
        let json = serde_json::to_value(Hero::default()).unwrap();

        assert!(json.get("ctaText").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("cta_text").is_none());
    }

    #[test]
    fn test_patch_deserializes_from_partial_json() {
        let patch: QuotePatch = serde_json::from_str(r#"{"text":"Less is more."}"#).unwrap();

        assert_eq!(patch.text.as_deref(), Some("Less is more."));
        assert_eq!(patch.attribution, None);
    }
}
