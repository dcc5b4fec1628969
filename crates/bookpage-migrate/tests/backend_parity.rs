//! Cross-backend behavioral tests.
//!
//! The two production backends must stay in lockstep: a fresh singleton
//! created by each must carry identical field values (default parity),
//! and a relational-to-document migration must be re-runnable without
//! duplicating anything.

use std::sync::Arc;

use tempfile::TempDir;

use bookpage_content::{
    AboutBookPatch, AuthorPatch, BonusSectionPatch, FeaturedPatch, GuaranteeSectionPatch,
    HeroPatch, LandingPatch, LearningPointsSectionPatch, NewFooterCategory, NewFooterLink,
    NewTestimonial, NewThemeSettings, QuestionsSectionPatch, QuotePatch,
    ScholarshipSectionPatch, SiteSettingsPatch, TestimonialSectionPatch, ThemeSettingsPatch,
    YoutubeFrameworkSectionPatch,
};
use bookpage_migrate::Migrator;
use bookpage_storage::ContentStorage;
use bookpage_storage_sled::SledStorage;
use bookpage_storage_sqlite::SqliteStorage;

async fn open_sqlite(dir: &TempDir) -> SqliteStorage {
    let url = format!("sqlite://{}", dir.path().join("content.db").display());
    SqliteStorage::connect(&url).await.unwrap()
}

fn open_sled(dir: &TempDir) -> SledStorage {
    SledStorage::open(dir.path().join("content")).unwrap()
}

/// Serialize both values and diff every field except the update stamp.
fn assert_fields_match<T: serde::Serialize>(sql: &T, doc: &T, entity: &str) {
    let mut sql_value = serde_json::to_value(sql).unwrap();
    let mut doc_value = serde_json::to_value(doc).unwrap();
    for value in [&mut sql_value, &mut doc_value] {
        value.as_object_mut().unwrap().remove("updatedAt");
    }
    assert_eq!(sql_value, doc_value, "default mismatch for {entity}");
}

#[tokio::test]
async fn test_fresh_singleton_defaults_match_across_backends() {
    let dir = TempDir::new().unwrap();
    let sql = open_sqlite(&dir).await;
    let doc = open_sled(&dir);

    assert_fields_match(
        &sql.update_hero(HeroPatch::default()).await.unwrap(),
        &doc.update_hero(HeroPatch::default()).await.unwrap(),
        "hero",
    );
    assert_fields_match(
        &sql.update_featured(FeaturedPatch::default()).await.unwrap(),
        &doc.update_featured(FeaturedPatch::default()).await.unwrap(),
        "featured",
    );
    assert_fields_match(
        &sql.update_quote(QuotePatch::default()).await.unwrap(),
        &doc.update_quote(QuotePatch::default()).await.unwrap(),
        "quote",
    );
    assert_fields_match(
        &sql.update_landing(LandingPatch::default()).await.unwrap(),
        &doc.update_landing(LandingPatch::default()).await.unwrap(),
        "landing",
    );
    assert_fields_match(
        &sql.update_learning_points_section(LearningPointsSectionPatch::default())
            .await
            .unwrap(),
        &doc.update_learning_points_section(LearningPointsSectionPatch::default())
            .await
            .unwrap(),
        "learning_points_section",
    );
    assert_fields_match(
        &sql.update_testimonial_section(TestimonialSectionPatch::default())
            .await
            .unwrap(),
        &doc.update_testimonial_section(TestimonialSectionPatch::default())
            .await
            .unwrap(),
        "testimonial_section",
    );
    assert_fields_match(
        &sql.update_about_book(AboutBookPatch::default()).await.unwrap(),
        &doc.update_about_book(AboutBookPatch::default()).await.unwrap(),
        "about_book",
    );
    assert_fields_match(
        &sql.update_author(AuthorPatch::default()).await.unwrap(),
        &doc.update_author(AuthorPatch::default()).await.unwrap(),
        "author",
    );
    assert_fields_match(
        &sql.update_bonus_section(BonusSectionPatch::default())
            .await
            .unwrap(),
        &doc.update_bonus_section(BonusSectionPatch::default())
            .await
            .unwrap(),
        "bonus_section",
    );
    assert_fields_match(
        &sql.update_guarantee_section(GuaranteeSectionPatch::default())
            .await
            .unwrap(),
        &doc.update_guarantee_section(GuaranteeSectionPatch::default())
            .await
            .unwrap(),
        "guarantee_section",
    );
    assert_fields_match(
        &sql.update_scholarship_section(ScholarshipSectionPatch::default())
            .await
            .unwrap(),
        &doc.update_scholarship_section(ScholarshipSectionPatch::default())
            .await
            .unwrap(),
        "scholarship_section",
    );
    assert_fields_match(
        &sql.update_youtube_framework_section(YoutubeFrameworkSectionPatch::default())
            .await
            .unwrap(),
        &doc.update_youtube_framework_section(YoutubeFrameworkSectionPatch::default())
            .await
            .unwrap(),
        "youtube_framework_section",
    );
    assert_fields_match(
        &sql.update_questions_section(QuestionsSectionPatch::default())
            .await
            .unwrap(),
        &doc.update_questions_section(QuestionsSectionPatch::default())
            .await
            .unwrap(),
        "questions_section",
    );
    assert_fields_match(
        &sql.update_site_settings(SiteSettingsPatch::default())
            .await
            .unwrap(),
        &doc.update_site_settings(SiteSettingsPatch::default())
            .await
            .unwrap(),
        "site_settings",
    );
}

#[tokio::test]
async fn test_sqlite_to_sled_migration_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let sql = open_sqlite(&dir).await;
    let doc = open_sled(&dir);

    // Populate the relational store the way the admin panel would.
    sql.update_hero(HeroPatch {
        title: Some("Edited hero".to_owned()),
        ..Default::default()
    })
    .await
    .unwrap();
    for (quote, name) in [("Great", "Priya"), ("Useful", "Sam")] {
        sql.create_testimonial(NewTestimonial {
            quote: quote.to_owned(),
            name: name.to_owned(),
            role: String::new(),
            avatar_url: None,
        })
        .await
        .unwrap();
    }
    let theme = sql
        .create_theme(NewThemeSettings {
            name: "Dark".to_owned(),
            primary_color: "#111111".to_owned(),
            background_color: "#000000".to_owned(),
            text_color: "#eeeeee".to_owned(),
        })
        .await
        .unwrap();
    sql.set_active_theme(&theme.id).await.unwrap();
    let category = sql
        .create_footer_category(NewFooterCategory {
            title: "Resources".to_owned(),
            order_index: 0,
        })
        .await
        .unwrap();
    sql.create_footer_link(NewFooterLink {
        category_id: category.id.clone(),
        label: "Blog".to_owned(),
        url: "/blog".to_owned(),
        order_index: 0,
    })
    .await
    .unwrap();

    let migrator = Migrator::new(Arc::new(sql), Arc::new(doc.clone()));
    let first = migrator.run().await.unwrap();
    let second = migrator.run().await.unwrap();

    assert!(first.total_created() >= 5);
    assert_eq!(first.total_failed(), 0);
    assert_eq!(second.total_created(), 0);

    // Exactly one hero document, no duplicate testimonials, links
    // reparented onto document-store category ids.
    assert_eq!(doc.hero().await.unwrap().unwrap().title, "Edited hero");
    assert_eq!(doc.testimonials(None).await.unwrap().len(), 2);
    assert_eq!(
        doc.active_theme().await.unwrap().map(|t| t.name),
        Some("Dark".to_owned())
    );
    let links = doc.footer_links().await.unwrap();
    let categories = doc.footer_categories().await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(categories.len(), 1);
    assert_eq!(links[0].category_id, categories[0].id);
    assert_ne!(links[0].category_id, category.id);

    // The document ids are opaque UUIDs, not carried-over row ids.
    assert!(uuid::Uuid::parse_str(&links[0].id).is_ok());
}

#[tokio::test]
async fn test_update_theme_patch_survives_both_backends() {
    let dir = TempDir::new().unwrap();
    let sql = open_sqlite(&dir).await;
    let doc = open_sled(&dir);

    for storage in [&sql as &dyn ContentStorage, &doc as &dyn ContentStorage] {
        let theme = storage
            .create_theme(NewThemeSettings {
                name: "Base".to_owned(),
                primary_color: "#123456".to_owned(),
                background_color: "#ffffff".to_owned(),
                text_color: "#000000".to_owned(),
            })
            .await
            .unwrap();
        let updated = storage
            .update_theme(
                &theme.id,
                ThemeSettingsPatch {
                    name: Some("Renamed".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.primary_color, "#123456");
        assert!(!updated.applies_globally);
    }
}
