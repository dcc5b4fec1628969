//! Deterministic baseline seeding for a fresh document store.
//!
//! Replaces the original idea of generating sample data lazily on first
//! read: seeding is an explicit, deterministic step (the `bookpage seed`
//! command) and only touches trees that are still empty, so re-running it
//! never duplicates or overwrites content.

use chrono::Utc;
use uuid::Uuid;

use bookpage_content::{Hero, Testimonial, ThemeSettings};
use bookpage_storage::Result;

use crate::{SledStorage, trees};

/// What a seeding run actually wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// A default hero section was created.
    pub hero: bool,
    /// A starter testimonial was created.
    pub testimonial: bool,
    /// A default active theme was created.
    pub theme: bool,
}

impl SeedSummary {
    /// Number of records the run created.
    #[must_use]
    pub fn created(&self) -> usize {
        usize::from(self.hero) + usize::from(self.testimonial) + usize::from(self.theme)
    }
}

impl SledStorage {
    /// Seed the baseline content a fresh site renders with: the default
    /// hero, one starter testimonial, and an active default theme.
    ///
    /// Only empty trees are touched; existing content always wins.
    ///
    /// # Errors
    ///
    /// Propagates storage failures from the underlying tree operations.
    pub fn seed_defaults(&self) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();
        let now = Utc::now();

        if self.read_singleton::<Hero>(trees::HERO)?.is_none() {
            let hero = Hero {
                updated_at: now,
                ..Hero::default()
            };
            self.write_singleton(trees::HERO, &hero)?;
            summary.hero = true;
        }

        if self.read_all::<Testimonial>(trees::TESTIMONIALS)?.is_empty() {
            let testimonial = Testimonial {
                id: Uuid::new_v4().to_string(),
                quote: "This book rewired how our team ships software.".to_owned(),
                name: "Early reader".to_owned(),
                role: "Engineering manager".to_owned(),
                avatar_url: None,
                created_at: now,
            };
            self.write_doc(trees::TESTIMONIALS, &testimonial.id, &testimonial)?;
            summary.testimonial = true;
        }

        if self
            .read_all::<ThemeSettings>(trees::THEME_SETTINGS)?
            .is_empty()
        {
            let theme = ThemeSettings {
                id: Uuid::new_v4().to_string(),
                name: "Default".to_owned(),
                primary_color: "#1a73e8".to_owned(),
                background_color: "#ffffff".to_owned(),
                text_color: "#1f2933".to_owned(),
                applies_globally: true,
                created_at: now,
            };
            self.write_doc(trees::THEME_SETTINGS, &theme.id, &theme)?;
            summary.theme = true;
        }

        tracing::info!(created = summary.created(), "seed pass finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use bookpage_content::HeroPatch;
    use bookpage_storage::ContentStorage;
    use tempfile::TempDir;

    use crate::SledStorage;

    fn open_storage() -> (SledStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = SledStorage::open(dir.path().join("content")).unwrap();
        (storage, dir)
    }

    #[tokio::test]
    async fn test_seed_fills_empty_store() {
        let (storage, _dir) = open_storage();

        let summary = storage.seed_defaults().unwrap();

        assert_eq!(summary.created(), 3);
        assert!(storage.hero().await.unwrap().is_some());
        assert_eq!(storage.testimonials(None).await.unwrap().len(), 1);
        assert!(storage.active_theme().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let (storage, _dir) = open_storage();

        storage.seed_defaults().unwrap();
        let second = storage.seed_defaults().unwrap();

        assert_eq!(second.created(), 0);
        assert_eq!(storage.testimonials(None).await.unwrap().len(), 1);
        assert_eq!(storage.themes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_seed_never_overwrites_existing_content() {
        let (storage, _dir) = open_storage();
        storage
            .update_hero(HeroPatch {
                title: Some("Edited by admin".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();

        let summary = storage.seed_defaults().unwrap();

        assert!(!summary.hero);
        assert_eq!(
            storage.hero().await.unwrap().unwrap().title,
            "Edited by admin"
        );
    }
}
