//! Collection entities.
//!
//! Zero-or-many records, each addressable by an opaque string id assigned
//! by the storage backend (decimal row ids on the relational backend, UUID
//! strings on the document backend; callers must not assume either
//! format). Each entity comes with a `New*` creation type (no generated
//! fields) and a `*Patch` partial-update type with the same `None`-keeps
//! contract as the section patches.
//!
//! Collections with an `order_index` field are display-ordered: list calls
//! return them ascending by that field. The rest return backend-native
//! order with no guarantee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reader testimonial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub quote: String,
    pub name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for [`Testimonial`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub quote: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Partial update for [`Testimonial`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialPatch {
    pub quote: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
}

impl Testimonial {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: TestimonialPatch) {
        if let Some(v) = patch.quote {
            self.quote = v;
        }
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.role {
            self.role = v;
        }
        if let Some(v) = patch.avatar_url {
            self.avatar_url = Some(v);
        }
    }
}

/// Blog/press article link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for [`Article`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
}

/// Partial update for [`Article`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub excerpt: Option<String>,
}

impl Article {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: ArticlePatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.url {
            self.url = v;
        }
        if let Some(v) = patch.image_url {
            self.image_url = Some(v);
        }
        if let Some(v) = patch.excerpt {
            self.excerpt = Some(v);
        }
    }
}

/// Embedded or linked video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for [`Video`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for [`Video`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

impl Video {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: VideoPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.video_url {
            self.video_url = v;
        }
        if let Some(v) = patch.thumbnail_url {
            self.thumbnail_url = Some(v);
        }
        if let Some(v) = patch.description {
            self.description = Some(v);
        }
    }
}

/// One bullet in the "what you will learn" list. Display-ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPoint {
    pub id: String,
    pub text: String,
    pub icon: Option<String>,
    pub order_index: i64,
}

/// Creation payload for [`LearningPoint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLearningPoint {
    pub text: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order_index: i64,
}

/// Partial update for [`LearningPoint`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningPointPatch {
    pub text: Option<String>,
    pub icon: Option<String>,
    pub order_index: Option<i64>,
}

impl LearningPoint {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: LearningPointPatch) {
        if let Some(v) = patch.text {
            self.text = v;
        }
        if let Some(v) = patch.icon {
            self.icon = Some(v);
        }
        if let Some(v) = patch.order_index {
            self.order_index = v;
        }
    }
}

/// Footer column. Display-ordered; parent of [`FooterLink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterCategory {
    pub id: String,
    pub title: String,
    pub order_index: i64,
}

/// Creation payload for [`FooterCategory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFooterCategory {
    pub title: String,
    #[serde(default)]
    pub order_index: i64,
}

/// Partial update for [`FooterCategory`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterCategoryPatch {
    pub title: Option<String>,
    pub order_index: Option<i64>,
}

impl FooterCategory {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: FooterCategoryPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.order_index {
            self.order_index = v;
        }
    }
}

/// Link inside a footer column.
///
/// `category_id` references a [`FooterCategory`] in the same store. There
/// is no cascading delete: removing a category can orphan its links, and
/// that is tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    pub id: String,
    pub category_id: String,
    pub label: String,
    pub url: String,
    pub order_index: i64,
}

/// Creation payload for [`FooterLink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFooterLink {
    pub category_id: String,
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub order_index: i64,
}

/// Partial update for [`FooterLink`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterLinkPatch {
    pub category_id: Option<String>,
    pub label: Option<String>,
    pub url: Option<String>,
    pub order_index: Option<i64>,
}

impl FooterLink {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: FooterLinkPatch) {
        if let Some(v) = patch.category_id {
            self.category_id = v;
        }
        if let Some(v) = patch.label {
            self.label = v;
        }
        if let Some(v) = patch.url {
            self.url = v;
        }
        if let Some(v) = patch.order_index {
            self.order_index = v;
        }
    }
}

/// Social media profile link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
}

/// Creation payload for [`SocialLink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSocialLink {
    pub platform: String,
    pub url: String,
}

/// Partial update for [`SocialLink`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinkPatch {
    pub platform: Option<String>,
    pub url: Option<String>,
}

impl SocialLink {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: SocialLinkPatch) {
        if let Some(v) = patch.platform {
            self.platform = v;
        }
        if let Some(v) = patch.url {
            self.url = v;
        }
    }
}

/// One bonus item listed under the bonus section. Display-ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub order_index: i64,
}

/// Creation payload for [`BonusItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBonusItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order_index: i64,
}

/// Partial update for [`BonusItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BonusItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_index: Option<i64>,
}

impl BonusItem {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: BonusItemPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.icon {
            self.icon = Some(v);
        }
        if let Some(v) = patch.order_index {
            self.order_index = v;
        }
    }
}

/// Writing-progress milestone. Display-ordered.
///
/// `progress` is a 0–100 percentage for incomplete milestones; callers
/// validate the range before it reaches storage. The site-wide progress
/// figure is derived via [`crate::progress::overall_progress`], never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub progress: i64,
    pub completed: bool,
    pub order_index: i64,
}

/// Creation payload for [`Milestone`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestone {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub order_index: i64,
}

/// Partial update for [`Milestone`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MilestonePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<i64>,
    pub completed: Option<bool>,
    pub order_index: Option<i64>,
}

impl Milestone {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: MilestonePatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = Some(v);
        }
        if let Some(v) = patch.progress {
            self.progress = v;
        }
        if let Some(v) = patch.completed {
            self.completed = v;
        }
        if let Some(v) = patch.order_index {
            self.order_index = v;
        }
    }
}

/// Color theme.
///
/// At most one theme carries `applies_globally = true` (the active theme).
/// Themes are created inactive; activation goes through the storage
/// contract's `set_active_theme`, which clears the previous flag in the
/// same atomic step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub id: String,
    pub name: String,
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub applies_globally: bool,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for [`ThemeSettings`]. New themes start inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewThemeSettings {
    pub name: String,
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
}

/// Partial update for [`ThemeSettings`].
///
/// Deliberately has no `applies_globally` field; the active flag only
/// moves through `set_active_theme`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettingsPatch {
    pub name: Option<String>,
    pub primary_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

impl ThemeSettings {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: ThemeSettingsPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.primary_color {
            self.primary_color = v;
        }
        if let Some(v) = patch.background_color {
            self.background_color = v;
        }
        if let Some(v) = patch.text_color {
            self.text_color = v;
        }
    }
}

/// Per-page SEO metadata.
///
/// At most one row carries `is_default = true`; pages without a specific
/// row fall back to it at the API layer. The flag moves through
/// `set_default_seo` only, mirroring theme activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub id: String,
    /// Page path this row applies to (e.g. `/`, `/buy`).
    pub page: String,
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
    pub og_image_url: Option<String>,
    pub is_default: bool,
}

/// Creation payload for [`SeoMetadata`]. New rows start non-default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeoMetadata {
    pub page: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub og_image_url: Option<String>,
}

/// Partial update for [`SeoMetadata`]. No `is_default` field; use
/// `set_default_seo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoMetadataPatch {
    pub page: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_image_url: Option<String>,
}

impl SeoMetadata {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: SeoMetadataPatch) {
        if let Some(v) = patch.page {
            self.page = v;
        }
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.keywords {
            self.keywords = Some(v);
        }
        if let Some(v) = patch.og_image_url {
            self.og_image_url = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_testimonial_deserializes_without_avatar() {
        let new: NewTestimonial =
            serde_json::from_str(r#"{"quote":"Great book","name":"Sam","role":"Reader"}"#)
                .unwrap();

        assert_eq!(new.quote, "Great book");
        assert_eq!(new.avatar_url, None);
    }

    #[test]
    fn test_milestone_patch_flips_completed() {
        let mut milestone = Milestone {
            id: "1".to_owned(),
            title: "First draft".to_owned(),
            description: None,
            progress: 80,
            completed: false,
            order_index: 0,
        };

        milestone.apply(MilestonePatch {
            completed: Some(true),
            ..Default::default()
        });

        assert!(milestone.completed);
        assert_eq!(milestone.progress, 80);
    }

    #[test]
    fn test_footer_link_serializes_camel_case() {
        let link = FooterLink {
            id: "1".to_owned(),
            category_id: "2".to_owned(),
            label: "Contact".to_owned(),
            url: "/contact".to_owned(),
            order_index: 3,
        };

        let json = serde_json::to_value(&link).unwrap();

        assert!(json.get("categoryId").is_some());
        assert!(json.get("orderIndex").is_some());
        assert!(json.get("category_id").is_none());
    }

    #[test]
    fn test_theme_patch_cannot_touch_active_flag() {
        let mut theme = ThemeSettings {
            id: "1".to_owned(),
            name: "Default".to_owned(),
            primary_color: "#1a73e8".to_owned(),
            background_color: "#ffffff".to_owned(),
            text_color: "#1f2933".to_owned(),
            applies_globally: true,
            created_at: chrono::Utc::now(),
        };

        theme.apply(ThemeSettingsPatch {
            name: Some("Dark".to_owned()),
            ..Default::default()
        });

        assert_eq!(theme.name, "Dark");
        assert!(theme.applies_globally);
    }
}
