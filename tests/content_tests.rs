//! Tests for the content sources and the facade

use async_trait::async_trait;
use serde_json::{Value, json};
use summit_content::content::queries::{
    ALL_PARTNERS_QUERY, ALL_SPEAKERS_QUERY, ALL_SUPPORTERS_QUERY, ALL_TEAM_QUERY,
    HOME_PAGE_QUERY, SITE_SETTINGS_QUERY,
};
use summit_content::content::{
    ContentBackend, ContentError, ContentFacade, ContentSource, FEATURED_SPEAKER_COUNT,
    GroqClient, SanityContentSource, StaticContentSource,
};
use summit_content::models::{Person, PersonType};
use std::collections::HashMap;
use std::sync::Arc;

/// GROQ client answering from a fixed query -> result table
struct MockGroqClient {
    responses: HashMap<&'static str, Value>,
}

#[async_trait]
impl GroqClient for MockGroqClient {
    async fn fetch(&self, query: &str, _params: &[(&str, Value)]) -> Result<Value, ContentError> {
        Ok(self.responses.get(query).cloned().unwrap_or(Value::Null))
    }

    async fn mutate(&self, _mutations: Vec<Value>) -> Result<Value, ContentError> {
        Err(ContentError::ConfigError("read-only".to_string()))
    }
}

fn static_source() -> StaticContentSource {
    StaticContentSource::new().unwrap().with_year(2026)
}

/// Person documents as the migration script would have written them
fn person_documents(people: &[Person]) -> Value {
    Value::Array(
        people
            .iter()
            .map(|p| {
                json!({
                    "_id": format!("person-{}-{}", p.person_type, p.order.unwrap_or_default()),
                    "name": p.name,
                    "role": p.role,
                    "type": p.person_type,
                    "image": {
                        "asset": { "_id": "image-1", "url": format!("https://cdn.sanity.io{}", p.image.src) },
                        "alt": null
                    },
                    "order": p.order
                })
            })
            .collect(),
    )
}

fn mirrored_sanity_source() -> SanityContentSource<MockGroqClient> {
    let source = static_source();
    let mut responses = HashMap::new();
    responses.insert(ALL_SPEAKERS_QUERY, person_documents(&source.all_speakers()));
    responses.insert(ALL_TEAM_QUERY, person_documents(&source.all_team_members()));
    responses.insert(ALL_PARTNERS_QUERY, json!([]));
    responses.insert(ALL_SUPPORTERS_QUERY, Value::Null);
    SanityContentSource::new(MockGroqClient { responses })
}

mod static_source_tests {
    use super::*;

    #[test]
    fn test_every_rendered_image_has_alt_text() {
        let source = static_source();
        let home = source.home_page();

        let people = home.speakers.people.iter().chain(home.team.people.iter());
        for person in people {
            assert!(person.image.is_renderable(), "{}", person.name);
        }
        for company in home.partners.companies.iter().chain(home.supporters.companies.iter()) {
            assert!(company.logo.is_renderable(), "{}", company.id);
        }
        for logo in &home.hero.featured_partners {
            assert!(logo.logo.is_renderable(), "{}", logo.name);
        }
    }

    #[test]
    fn test_person_ids_unique_per_type() {
        let source = static_source();
        let mut ids: Vec<String> = source.all_speakers().into_iter().map(|p| p.id).collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_settings_invariants() {
        let settings = static_source().site_settings();
        assert!(settings.validate().is_empty(), "{:?}", settings.validate());
        assert_eq!(settings.footer.year, 2026);
        assert_eq!(settings.contact_copy().button_text.idle, "Send");
    }

    #[test]
    fn test_wire_format() {
        let speaker = &static_source().all_speakers()[0];
        let json = serde_json::to_value(speaker).unwrap();
        assert_eq!(json["type"], "speaker");
        assert_eq!(json["order"], 0);
        assert!(json.get("personType").is_none());
        assert!(json.get("documentId").is_none());
        assert!(json.get("bio").is_none());
    }

    #[tokio::test]
    async fn test_legacy_views_match_source_arrays() {
        let source = static_source();
        let dynamic: &dyn ContentSource = &source;

        let legacy = dynamic.legacy_team_data().await.unwrap();
        assert_eq!(legacy.len(), summit_content::data::TEAM.len());
        assert_eq!(legacy[0].name, summit_content::data::TEAM[0].name);

        let urls = dynamic.supporter_logo_urls().await.unwrap();
        assert_eq!(urls.len(), summit_content::data::SUPPORTER_LOGOS.len());
    }
}

mod source_parity_tests {
    use super::*;

    #[tokio::test]
    async fn test_speaker_ids_agree_across_sources() {
        let static_source = static_source();
        let sanity = mirrored_sanity_source();

        let from_static = ContentSource::all_speakers(&static_source).await.unwrap();
        let from_cms = sanity.all_speakers().await.unwrap();

        assert_eq!(from_static.len(), from_cms.len());
        for (a, b) in from_static.iter().zip(&from_cms) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.order, b.order);
            assert_eq!(a.image.alt, b.image.alt);
            assert!(b.document_id.is_some());
        }
    }

    #[tokio::test]
    async fn test_speaker_lookup_by_canonical_id() {
        let static_source = static_source();
        let sanity = mirrored_sanity_source();

        for source in [&static_source as &dyn ContentSource, &sanity] {
            let person = source
                .speaker_by_id("speaker-tim-draper")
                .await
                .unwrap()
                .unwrap();
            assert_eq!(person.person_type, PersonType::Speaker);
            assert!(source.speaker_by_id("speaker-nobody").await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_featured_speakers() {
        let sanity = mirrored_sanity_source();
        let featured = sanity.featured_speakers().await.unwrap();
        assert_eq!(featured.len(), FEATURED_SPEAKER_COUNT);
        assert_eq!(featured[0].order, Some(0));
    }

    #[tokio::test]
    async fn test_empty_collections() {
        let sanity = mirrored_sanity_source();
        assert!(sanity.all_partners().await.unwrap().is_empty());
        assert!(sanity.all_supporters().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_singletons_are_errors() {
        let sanity = mirrored_sanity_source();
        assert!(matches!(
            sanity.site_settings().await,
            Err(ContentError::MissingDocument(_))
        ));
        assert!(matches!(
            sanity.primary_cta().await,
            Err(ContentError::MissingDocument(_))
        ));
    }

    #[tokio::test]
    async fn test_home_page_without_documents() {
        let mut responses = HashMap::new();
        responses.insert(SITE_SETTINGS_QUERY, Value::Null);
        responses.insert(HOME_PAGE_QUERY, Value::Null);
        let sanity = SanityContentSource::new(MockGroqClient { responses });
        assert!(sanity.home_page().await.is_err());
    }
}

mod facade_tests {
    use super::*;

    #[tokio::test]
    async fn test_unset_flag_uses_static_source() {
        let facade = ContentFacade::new(ContentBackend::from_flag(None), None).unwrap();
        assert_eq!(facade.backend(), ContentBackend::Static);
        assert!(!facade.all_speakers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_injected_source() {
        let facade = ContentFacade::from_source(
            ContentBackend::Sanity,
            Arc::new(mirrored_sanity_source()),
        );
        assert_eq!(facade.name(), "Sanity CMS");
        let team = facade.all_team_members().await.unwrap();
        assert_eq!(team.len(), summit_content::data::TEAM.len());
        assert!(team.iter().all(|p| p.person_type == PersonType::Team));
    }
}
