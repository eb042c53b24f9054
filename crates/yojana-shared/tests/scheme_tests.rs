//! Tests for scheme resolution: entity precedence, alias order, fallbacks.

use yojana_shared::turn::ENTITY_SCHEME_NAME;
use yojana_shared::{
    CollectingEmitter, Entity, KeywordAlias, SchemeCatalog, SchemeRecord, SchemeResolution,
    SchemeResolver, SchemeSource, TurnInput,
};

fn builtin() -> SchemeResolver {
    SchemeResolver::new(SchemeCatalog::builtin().unwrap())
}

fn record(key: &str) -> SchemeRecord {
    SchemeRecord {
        key: key.to_string(),
        title: key.to_string(),
        details: format!("{} document", key),
    }
}

#[test]
fn test_pmkisan_keyword_end_to_end() {
    let r = builtin();
    let mut emitter = CollectingEmitter::new();

    let updates = r.run(&TurnInput::new("tell me about pmkisan"), &mut emitter);

    assert!(updates.is_empty());
    assert_eq!(emitter.messages.len(), 1);
    let doc = &emitter.messages[0];
    assert!(doc.starts_with("🌾 **PM-KISAN Scheme Details:**"));
    assert!(doc.contains("**Benefit:** ₹6,000 per year in 3 installments"));
    assert_eq!(doc, &r.catalog().get("PM-KISAN").unwrap().details);
}

#[test]
fn test_entity_wins_over_keyword() {
    let r = builtin();
    let entities = vec![
        Entity::new("location", "Pune"),
        Entity::new(ENTITY_SCHEME_NAME, "PMAY"),
    ];

    let resolution = r.resolve(&entities, "what about ayushman?");

    match resolution {
        SchemeResolution::Found { record, source } => {
            assert_eq!(record.key, "PMAY");
            assert_eq!(source, SchemeSource::Entity);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_first_scheme_entity_is_used() {
    let r = builtin();
    let entities = vec![
        Entity::new(ENTITY_SCHEME_NAME, "MGNREGA"),
        Entity::new(ENTITY_SCHEME_NAME, "PMKVY"),
    ];
    assert_eq!(r.resolve(&entities, "").key(), Some("MGNREGA"));
}

#[test]
fn test_entity_value_is_verbatim() {
    let r = builtin();
    let entities = vec![Entity::new(ENTITY_SCHEME_NAME, "pm-kisan")];
    assert_eq!(
        r.resolve(&entities, "pm-kisan"),
        SchemeResolution::NotFound {
            candidate: Some("pm-kisan".to_string())
        }
    );
}

#[test]
fn test_alias_declaration_order_beats_text_position() {
    let catalog = SchemeCatalog::new(
        vec![record("First"), record("Second")],
        vec![
            KeywordAlias::new("zeta", "First"),
            KeywordAlias::new("alpha", "Second"),
        ],
        vec![],
    )
    .unwrap();
    let r = SchemeResolver::new(catalog);

    assert_eq!(r.resolve(&[], "alpha then zeta").key(), Some("First"));
    assert_eq!(r.resolve(&[], "zeta then alpha").key(), Some("First"));
    assert_eq!(r.resolve(&[], "only alpha").key(), Some("Second"));
}

#[test]
fn test_builtin_alias_order() {
    let r = builtin();
    // "ayushman" is declared before "pmay"
    assert_eq!(
        r.resolve(&[], "compare pmay and ayushman").key(),
        Some("Ayushman Bharat")
    );
    // "pm-kisan" and "pmkisan" both map to the same key
    assert_eq!(r.resolve(&[], "PM-KISAN status").key(), Some("PM-KISAN"));
}

#[test]
fn test_keyword_matching_is_case_insensitive() {
    let r = builtin();
    assert_eq!(r.resolve(&[], "Tell me about MGNREGA").key(), Some("MGNREGA"));
}

#[test]
fn test_alias_without_document_is_not_found() {
    let r = builtin();
    assert_eq!(
        r.resolve(&[], "how does startup india work"),
        SchemeResolution::NotFound {
            candidate: Some("Startup India".to_string())
        }
    );
}

#[test]
fn test_unknown_scheme_gives_help_prompt() {
    let r = builtin();
    let mut emitter = CollectingEmitter::new();
    let turn = TurnInput::new("what schemes exist?").with_entity(ENTITY_SCHEME_NAME, "Nonexistent");

    let updates = r.run(&turn, &mut emitter);

    assert!(updates.is_empty());
    assert_eq!(
        emitter.messages,
        vec![
            "I can provide details about PM-KISAN, Ayushman Bharat, PMKVY, PMAY, and other major schemes. Which specific scheme would you like to know about?".to_string()
        ]
    );
}

#[test]
fn test_no_candidate_at_all() {
    let r = builtin();
    assert_eq!(
        r.resolve(&[], "hello"),
        SchemeResolution::NotFound { candidate: None }
    );
}

#[test]
fn test_garbled_host_entities_tolerated() {
    let r = builtin();
    let turn = TurnInput::from_json_lenient(&serde_json::json!({
        "text": "tell me about pmkvy",
        "entities": {"entity": "scheme_name"}
    }));
    assert_eq!(r.outcome(&turn).message.unwrap(), r.catalog().get("PMKVY").unwrap().details);
}
