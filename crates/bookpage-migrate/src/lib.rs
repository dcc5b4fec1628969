//! One-shot relational-to-document content migration.
//!
//! [`Migrator`] copies every entity type from a source store to a
//! destination store through the `ContentStorage` trait, so it never
//! depends on either backend's id format; source ids are only used as
//! reference keys for the in-memory parent translation map, never
//! persisted.
//!
//! The run is idempotent: every entity type has a natural key (singleton
//! presence, testimonial `(quote, name)`, theme `name`, SEO `page`, ...)
//! checked against the destination before anything is written, so
//! re-running after a partial failure is the defined recovery path.
//!
//! Entity order follows the dependency chain: singletons and unparented
//! collections first, then footer categories (building the old-id to
//! new-id map), then footer links (consulting it). A row that fails to
//! copy, or a link whose parent never made it across, is logged and
//! counted, and the run continues with its siblings.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bookpage_content::{
    AboutBookPatch, AuthorPatch, BonusSectionPatch, FeaturedPatch, GuaranteeSectionPatch,
    HeroPatch, LandingPatch, LearningPointsSectionPatch, NewArticle, NewBonusItem,
    NewFooterCategory, NewFooterLink, NewLearningPoint, NewMilestone, NewSeoMetadata,
    NewSocialLink, NewTestimonial, NewThemeSettings, NewVideo, QuestionsSectionPatch, QuotePatch,
    ScholarshipSectionPatch, SiteSettingsPatch, TestimonialSectionPatch,
    YoutubeFrameworkSectionPatch,
};
use bookpage_storage::{ContentStorage, Result};

/// Per-entity tallies of one migration step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntityReport {
    /// Records newly written to the destination.
    pub created: usize,
    /// Records that already existed under their natural key.
    pub skipped: usize,
    /// Records that could not be copied (logged and left behind).
    pub failed: usize,
}

/// Summary of a whole migration run, one entry per entity type in
/// execution order.
#[derive(Debug, Default, Clone)]
pub struct MigrationReport {
    steps: Vec<(&'static str, EntityReport)>,
}

impl MigrationReport {
    fn push(&mut self, entity: &'static str, report: EntityReport) {
        self.steps.push((entity, report));
    }

    /// Per-entity tallies in execution order.
    #[must_use]
    pub fn steps(&self) -> &[(&'static str, EntityReport)] {
        &self.steps
    }

    /// Total records written to the destination.
    #[must_use]
    pub fn total_created(&self) -> usize {
        self.steps.iter().map(|(_, r)| r.created).sum()
    }

    /// Total records skipped as already present.
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.steps.iter().map(|(_, r)| r.skipped).sum()
    }

    /// Total records that failed to copy.
    #[must_use]
    pub fn total_failed(&self) -> usize {
        self.steps.iter().map(|(_, r)| r.failed).sum()
    }
}

/// Copies content from one storage handle to another.
///
/// The only piece of this system that ever holds two storage handles at
/// once.
pub struct Migrator {
    source: Arc<dyn ContentStorage>,
    dest: Arc<dyn ContentStorage>,
}

impl Migrator {
    /// Create a migrator from a source (relational) and destination
    /// (document) handle.
    #[must_use]
    pub fn new(source: Arc<dyn ContentStorage>, dest: Arc<dyn ContentStorage>) -> Self {
        Self { source, dest }
    }

    /// Run the full migration.
    ///
    /// # Errors
    ///
    /// Returns an error only when a store cannot be *read*, an
    /// infrastructure failure. Individual rows that fail to copy are
    /// tallied in the report instead.
    pub async fn run(&self) -> Result<MigrationReport> {
        let mut report = MigrationReport::default();

        // Independent singletons first.
        report.push("hero", self.migrate_hero().await?);
        report.push("featured", self.migrate_featured().await?);
        report.push("quote", self.migrate_quote().await?);
        report.push("landing", self.migrate_landing().await?);
        report.push(
            "learning_points_section",
            self.migrate_learning_points_section().await?,
        );
        report.push(
            "testimonial_section",
            self.migrate_testimonial_section().await?,
        );
        report.push("about_book", self.migrate_about_book().await?);
        report.push("author", self.migrate_author().await?);
        report.push("bonus_section", self.migrate_bonus_section().await?);
        report.push("guarantee_section", self.migrate_guarantee_section().await?);
        report.push(
            "scholarship_section",
            self.migrate_scholarship_section().await?,
        );
        report.push(
            "youtube_framework_section",
            self.migrate_youtube_framework_section().await?,
        );
        report.push("questions_section", self.migrate_questions_section().await?);
        report.push("site_settings", self.migrate_site_settings().await?);

        // Unparented collections.
        report.push("testimonials", self.migrate_testimonials().await?);
        report.push("articles", self.migrate_articles().await?);
        report.push("videos", self.migrate_videos().await?);
        report.push("learning_points", self.migrate_learning_points().await?);
        report.push("social_links", self.migrate_social_links().await?);
        report.push("bonus_items", self.migrate_bonus_items().await?);
        report.push("milestones", self.migrate_milestones().await?);
        report.push("theme_settings", self.migrate_themes().await?);
        report.push("seo_metadata", self.migrate_seo().await?);

        // Footer links reference footer categories, so the categories go
        // first and leave behind the id translation map.
        let (categories, category_ids) = self.migrate_footer_categories().await?;
        report.push("footer_categories", categories);
        report.push(
            "footer_links",
            self.migrate_footer_links(&category_ids).await?,
        );

        tracing::info!(
            created = report.total_created(),
            skipped = report.total_skipped(),
            failed = report.total_failed(),
            "migration finished"
        );
        Ok(report)
    }

    // --- Singleton sections ---

    async fn migrate_hero(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.hero().await? else {
            return Ok(report);
        };
        if self.dest.hero().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = HeroPatch {
            title: Some(section.title),
            subtitle: Some(section.subtitle),
            cta_text: Some(section.cta_text),
            cta_url: Some(section.cta_url),
            image_url: Some(section.image_url),
        };
        match self.dest.update_hero(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate hero");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_featured(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.featured().await? else {
            return Ok(report);
        };
        if self.dest.featured().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = FeaturedPatch {
            heading: Some(section.heading),
            subheading: Some(section.subheading),
            badge_url: Some(section.badge_url),
        };
        match self.dest.update_featured(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate featured");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_quote(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.quote().await? else {
            return Ok(report);
        };
        if self.dest.quote().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = QuotePatch {
            text: Some(section.text),
            attribution: Some(section.attribution),
        };
        match self.dest.update_quote(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate quote");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_landing(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.landing().await? else {
            return Ok(report);
        };
        if self.dest.landing().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = LandingPatch {
            headline: Some(section.headline),
            subheadline: Some(section.subheadline),
            background_image_url: Some(section.background_image_url),
        };
        match self.dest.update_landing(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate landing");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_learning_points_section(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.learning_points_section().await? else {
            return Ok(report);
        };
        if self.dest.learning_points_section().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = LearningPointsSectionPatch {
            heading: Some(section.heading),
            subheading: Some(section.subheading),
        };
        match self.dest.update_learning_points_section(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate learning points section");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_testimonial_section(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.testimonial_section().await? else {
            return Ok(report);
        };
        if self.dest.testimonial_section().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = TestimonialSectionPatch {
            heading: Some(section.heading),
            subheading: Some(section.subheading),
        };
        match self.dest.update_testimonial_section(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate testimonial section");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_about_book(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.about_book().await? else {
            return Ok(report);
        };
        if self.dest.about_book().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = AboutBookPatch {
            heading: Some(section.heading),
            description: Some(section.description),
            cover_image_url: Some(section.cover_image_url),
        };
        match self.dest.update_about_book(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate about book");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_author(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.author().await? else {
            return Ok(report);
        };
        if self.dest.author().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = AuthorPatch {
            name: Some(section.name),
            bio: Some(section.bio),
            photo_url: Some(section.photo_url),
            website_url: Some(section.website_url),
        };
        match self.dest.update_author(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate author");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_bonus_section(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.bonus_section().await? else {
            return Ok(report);
        };
        if self.dest.bonus_section().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = BonusSectionPatch {
            heading: Some(section.heading),
            subheading: Some(section.subheading),
        };
        match self.dest.update_bonus_section(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate bonus section");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_guarantee_section(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.guarantee_section().await? else {
            return Ok(report);
        };
        if self.dest.guarantee_section().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = GuaranteeSectionPatch {
            heading: Some(section.heading),
            body: Some(section.body),
            badge_text: Some(section.badge_text),
        };
        match self.dest.update_guarantee_section(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate guarantee section");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_scholarship_section(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.scholarship_section().await? else {
            return Ok(report);
        };
        if self.dest.scholarship_section().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = ScholarshipSectionPatch {
            heading: Some(section.heading),
            body: Some(section.body),
            application_url: Some(section.application_url),
        };
        match self.dest.update_scholarship_section(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate scholarship section");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_youtube_framework_section(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.youtube_framework_section().await? else {
            return Ok(report);
        };
        if self.dest.youtube_framework_section().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = YoutubeFrameworkSectionPatch {
            heading: Some(section.heading),
            video_url: Some(section.video_url),
            description: Some(section.description),
        };
        match self.dest.update_youtube_framework_section(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate youtube framework section");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_questions_section(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.questions_section().await? else {
            return Ok(report);
        };
        if self.dest.questions_section().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = QuestionsSectionPatch {
            heading: Some(section.heading),
            body: Some(section.body),
            contact_email: Some(section.contact_email),
        };
        match self.dest.update_questions_section(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate questions section");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    async fn migrate_site_settings(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let Some(section) = self.source.site_settings().await? else {
            return Ok(report);
        };
        if self.dest.site_settings().await?.is_some() {
            report.skipped += 1;
            return Ok(report);
        }
        let patch = SiteSettingsPatch {
            site_title: Some(section.site_title),
            tagline: Some(section.tagline),
            contact_email: Some(section.contact_email),
            footer_text: Some(section.footer_text),
        };
        match self.dest.update_site_settings(patch).await {
            Ok(_) => report.created += 1,
            Err(err) => {
                tracing::warn!(error = %err, "failed to migrate site settings");
                report.failed += 1;
            }
        }
        Ok(report)
    }

    // --- Collections ---

    async fn migrate_testimonials(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<(String, String)> = self
            .dest
            .testimonials(None)
            .await?
            .into_iter()
            .map(|t| (t.quote, t.name))
            .collect();

        for item in self.source.testimonials(None).await? {
            if !seen.insert((item.quote.clone(), item.name.clone())) {
                report.skipped += 1;
                continue;
            }
            let new = NewTestimonial {
                quote: item.quote,
                name: item.name,
                role: item.role,
                avatar_url: item.avatar_url,
            };
            match self.dest.create_testimonial(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate testimonial");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn migrate_articles(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<String> = self
            .dest
            .articles(None)
            .await?
            .into_iter()
            .map(|a| a.url)
            .collect();

        for item in self.source.articles(None).await? {
            if !seen.insert(item.url.clone()) {
                report.skipped += 1;
                continue;
            }
            let new = NewArticle {
                title: item.title,
                url: item.url,
                image_url: item.image_url,
                excerpt: item.excerpt,
            };
            match self.dest.create_article(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate article");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn migrate_videos(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<String> = self
            .dest
            .videos(None)
            .await?
            .into_iter()
            .map(|v| v.video_url)
            .collect();

        for item in self.source.videos(None).await? {
            if !seen.insert(item.video_url.clone()) {
                report.skipped += 1;
                continue;
            }
            let new = NewVideo {
                title: item.title,
                video_url: item.video_url,
                thumbnail_url: item.thumbnail_url,
                description: item.description,
            };
            match self.dest.create_video(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate video");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn migrate_learning_points(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<String> = self
            .dest
            .learning_points()
            .await?
            .into_iter()
            .map(|p| p.text)
            .collect();

        for item in self.source.learning_points().await? {
            if !seen.insert(item.text.clone()) {
                report.skipped += 1;
                continue;
            }
            let new = NewLearningPoint {
                text: item.text,
                icon: item.icon,
                order_index: item.order_index,
            };
            match self.dest.create_learning_point(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate learning point");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn migrate_social_links(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<String> = self
            .dest
            .social_links()
            .await?
            .into_iter()
            .map(|s| s.platform)
            .collect();

        for item in self.source.social_links().await? {
            if !seen.insert(item.platform.clone()) {
                report.skipped += 1;
                continue;
            }
            let new = NewSocialLink {
                platform: item.platform,
                url: item.url,
            };
            match self.dest.create_social_link(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate social link");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn migrate_bonus_items(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<String> = self
            .dest
            .bonus_items()
            .await?
            .into_iter()
            .map(|b| b.title)
            .collect();

        for item in self.source.bonus_items().await? {
            if !seen.insert(item.title.clone()) {
                report.skipped += 1;
                continue;
            }
            let new = NewBonusItem {
                title: item.title,
                description: item.description,
                icon: item.icon,
                order_index: item.order_index,
            };
            match self.dest.create_bonus_item(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate bonus item");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn migrate_milestones(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<String> = self
            .dest
            .milestones()
            .await?
            .into_iter()
            .map(|m| m.title)
            .collect();

        for item in self.source.milestones().await? {
            if !seen.insert(item.title.clone()) {
                report.skipped += 1;
                continue;
            }
            let new = NewMilestone {
                title: item.title,
                description: item.description,
                progress: item.progress,
                completed: item.completed,
                order_index: item.order_index,
            };
            match self.dest.create_milestone(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate milestone");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn migrate_themes(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<String> = self
            .dest
            .themes()
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect();

        for item in self.source.themes().await? {
            if !seen.insert(item.name.clone()) {
                report.skipped += 1;
                continue;
            }
            let new = NewThemeSettings {
                name: item.name,
                primary_color: item.primary_color,
                background_color: item.background_color,
                text_color: item.text_color,
            };
            match self.dest.create_theme(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate theme");
                    report.failed += 1;
                }
            }
        }

        // New themes land inactive; carry the active flag over by name
        // unless the destination already has an active theme.
        if self.dest.active_theme().await?.is_none()
            && let Some(active) = self.source.active_theme().await?
        {
            let dest_themes = self.dest.themes().await?;
            if let Some(matching) = dest_themes.iter().find(|t| t.name == active.name)
                && let Err(err) = self.dest.set_active_theme(&matching.id).await
            {
                tracing::warn!(error = %err, "failed to carry over active theme");
            }
        }
        Ok(report)
    }

    async fn migrate_seo(&self) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<String> = self
            .dest
            .seo_entries()
            .await?
            .into_iter()
            .map(|s| s.page)
            .collect();

        for item in self.source.seo_entries().await? {
            if !seen.insert(item.page.clone()) {
                report.skipped += 1;
                continue;
            }
            let new = NewSeoMetadata {
                page: item.page,
                title: item.title,
                description: item.description,
                keywords: item.keywords,
                og_image_url: item.og_image_url,
            };
            match self.dest.create_seo_entry(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate seo entry");
                    report.failed += 1;
                }
            }
        }

        // Same carry-over treatment as the active theme.
        if self.dest.default_seo().await?.is_none()
            && let Some(default) = self.source.default_seo().await?
        {
            let dest_entries = self.dest.seo_entries().await?;
            if let Some(matching) = dest_entries.iter().find(|s| s.page == default.page)
                && let Err(err) = self.dest.set_default_seo(&matching.id).await
            {
                tracing::warn!(error = %err, "failed to carry over default seo entry");
            }
        }
        Ok(report)
    }

    async fn migrate_footer_categories(
        &self,
    ) -> Result<(EntityReport, HashMap<String, String>)> {
        let mut report = EntityReport::default();
        let mut id_map = HashMap::new();
        let mut by_title: HashMap<String, String> = self
            .dest
            .footer_categories()
            .await?
            .into_iter()
            .map(|c| (c.title, c.id))
            .collect();

        for category in self.source.footer_categories().await? {
            if let Some(dest_id) = by_title.get(&category.title) {
                id_map.insert(category.id, dest_id.clone());
                report.skipped += 1;
                continue;
            }
            let new = NewFooterCategory {
                title: category.title.clone(),
                order_index: category.order_index,
            };
            match self.dest.create_footer_category(new).await {
                Ok(created) => {
                    by_title.insert(category.title, created.id.clone());
                    id_map.insert(category.id, created.id);
                    report.created += 1;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate footer category");
                    report.failed += 1;
                }
            }
        }
        Ok((report, id_map))
    }

    async fn migrate_footer_links(
        &self,
        category_ids: &HashMap<String, String>,
    ) -> Result<EntityReport> {
        let mut report = EntityReport::default();
        let mut seen: HashSet<(String, String)> = self
            .dest
            .footer_links()
            .await?
            .into_iter()
            .map(|l| (l.label, l.url))
            .collect();

        for link in self.source.footer_links().await? {
            if !seen.insert((link.label.clone(), link.url.clone())) {
                report.skipped += 1;
                continue;
            }
            // A link whose category never made it across cannot be
            // re-parented; leave it behind rather than failing the run.
            let Some(new_category) = category_ids.get(&link.category_id) else {
                tracing::warn!(label = %link.label, "skipping footer link with unmapped category");
                report.failed += 1;
                continue;
            };
            let new = NewFooterLink {
                category_id: new_category.clone(),
                label: link.label,
                url: link.url,
                order_index: link.order_index,
            };
            match self.dest.create_footer_link(new).await {
                Ok(_) => report.created += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to migrate footer link");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use bookpage_content::{
        HeroPatch, NewFooterCategory, NewFooterLink, NewMilestone, NewSeoMetadata,
        NewTestimonial, NewThemeSettings, QuotePatch,
    };
    use bookpage_storage::{ContentStorage, MemoryStorage};

    use super::Migrator;

    fn new_theme(name: &str) -> NewThemeSettings {
        NewThemeSettings {
            name: name.to_owned(),
            primary_color: "#1a73e8".to_owned(),
            background_color: "#ffffff".to_owned(),
            text_color: "#1f2933".to_owned(),
        }
    }

    async fn populate(source: &MemoryStorage) {
        source
            .update_hero(HeroPatch {
                title: Some("Migrated title".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        source
            .update_quote(QuotePatch {
                text: Some("Keep it simple.".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        source
            .create_testimonial(NewTestimonial {
                quote: "Loved it".to_owned(),
                name: "Priya".to_owned(),
                role: "Reader".to_owned(),
                avatar_url: None,
            })
            .await
            .unwrap();
        source
            .create_milestone(NewMilestone {
                title: "First draft".to_owned(),
                description: None,
                progress: 40,
                completed: false,
                order_index: 0,
            })
            .await
            .unwrap();
        let theme = source.create_theme(new_theme("Dark")).await.unwrap();
        source.set_active_theme(&theme.id).await.unwrap();
        let seo = source
            .create_seo_entry(NewSeoMetadata {
                page: "/".to_owned(),
                title: "Home".to_owned(),
                description: "Landing".to_owned(),
                keywords: None,
                og_image_url: None,
            })
            .await
            .unwrap();
        source.set_default_seo(&seo.id).await.unwrap();
        let category = source
            .create_footer_category(NewFooterCategory {
                title: "Resources".to_owned(),
                order_index: 0,
            })
            .await
            .unwrap();
        source
            .create_footer_link(NewFooterLink {
                category_id: category.id,
                label: "Blog".to_owned(),
                url: "/blog".to_owned(),
                order_index: 0,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_migrates_content_across_stores() {
        let source = Arc::new(MemoryStorage::new());
        let dest = Arc::new(MemoryStorage::new());
        populate(&source).await;

        let migrator = Migrator::new(source, Arc::<MemoryStorage>::clone(&dest));
        let report = migrator.run().await.unwrap();

        assert_eq!(report.total_failed(), 0);
        assert_eq!(
            dest.hero().await.unwrap().unwrap().title,
            "Migrated title"
        );
        assert_eq!(dest.testimonials(None).await.unwrap().len(), 1);
        assert_eq!(dest.milestones().await.unwrap().len(), 1);
        assert_eq!(
            dest.active_theme().await.unwrap().map(|t| t.name),
            Some("Dark".to_owned())
        );
        assert_eq!(
            dest.default_seo().await.unwrap().map(|s| s.page),
            Some("/".to_owned())
        );
        assert_eq!(dest.footer_links().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rerun_creates_nothing() {
        let source = Arc::new(MemoryStorage::new());
        let dest = Arc::new(MemoryStorage::new());
        populate(&source).await;
        let migrator = Migrator::new(source, Arc::<MemoryStorage>::clone(&dest));

        let first = migrator.run().await.unwrap();
        let second = migrator.run().await.unwrap();

        assert!(first.total_created() > 0);
        assert_eq!(second.total_created(), 0);
        assert_eq!(second.total_failed(), 0);
        // No duplicates materialized on the second pass.
        assert_eq!(dest.testimonials(None).await.unwrap().len(), 1);
        assert_eq!(dest.themes().await.unwrap().len(), 1);
        assert_eq!(dest.footer_links().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_footer_links_are_reparented_to_new_ids() {
        let source = Arc::new(MemoryStorage::new());
        let dest = Arc::new(MemoryStorage::new());
        // Shift the destination's id sequence so the category gets a
        // different id than it had in the source.
        dest.create_testimonial(NewTestimonial {
            quote: "placeholder".to_owned(),
            name: "placeholder".to_owned(),
            role: String::new(),
            avatar_url: None,
        })
        .await
        .unwrap();
        let category = source
            .create_footer_category(NewFooterCategory {
                title: "Resources".to_owned(),
                order_index: 0,
            })
            .await
            .unwrap();
        source
            .create_footer_link(NewFooterLink {
                category_id: category.id.clone(),
                label: "Blog".to_owned(),
                url: "/blog".to_owned(),
                order_index: 0,
            })
            .await
            .unwrap();

        Migrator::new(source, Arc::<MemoryStorage>::clone(&dest))
            .run()
            .await
            .unwrap();

        let dest_category = &dest.footer_categories().await.unwrap()[0];
        let dest_link = &dest.footer_links().await.unwrap()[0];
        assert_ne!(dest_category.id, category.id);
        assert_eq!(dest_link.category_id, dest_category.id);
    }

    #[tokio::test]
    async fn test_link_with_missing_parent_is_left_behind() {
        let source = Arc::new(MemoryStorage::new());
        let dest = Arc::new(MemoryStorage::new());
        source
            .create_footer_link(NewFooterLink {
                category_id: "999".to_owned(),
                label: "Orphan".to_owned(),
                url: "/orphan".to_owned(),
                order_index: 0,
            })
            .await
            .unwrap();

        let report = Migrator::new(source, Arc::<MemoryStorage>::clone(&dest))
            .run()
            .await
            .unwrap();

        assert_eq!(report.total_failed(), 1);
        assert!(dest.footer_links().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_existing_active_theme_wins_over_source() {
        let source = Arc::new(MemoryStorage::new());
        let dest = Arc::new(MemoryStorage::new());
        let source_theme = source.create_theme(new_theme("Dark")).await.unwrap();
        source.set_active_theme(&source_theme.id).await.unwrap();
        let dest_theme = dest.create_theme(new_theme("Light")).await.unwrap();
        dest.set_active_theme(&dest_theme.id).await.unwrap();

        Migrator::new(source, Arc::<MemoryStorage>::clone(&dest))
            .run()
            .await
            .unwrap();

        // The destination's own active theme is not displaced.
        assert_eq!(
            dest.active_theme().await.unwrap().map(|t| t.name),
            Some("Light".to_owned())
        );
    }
}
