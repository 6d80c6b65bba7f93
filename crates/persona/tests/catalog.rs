//! Tests for `AgentCatalog`.

use huoyuan_persona::{AgentCatalog, AgentProfile, DEFAULT_AGENT};
use llm::Error;

#[test]
fn builtin_catalog_resolves_known_agents() {
    let catalog = AgentCatalog::builtin();
    for id in [DEFAULT_AGENT, "emotional", "knowledge", "storytelling", "marketing"] {
        let agent = catalog.resolve(id).unwrap();
        assert_eq!(agent.id, id);
        assert!(!agent.system_prompt.is_empty());
    }
    assert_eq!(catalog.list()[0].id, DEFAULT_AGENT);
    assert!(catalog.resolve(" emotional ").is_ok());
}

#[test]
fn unknown_agent_fails() {
    let err = AgentCatalog::builtin().resolve("poet").unwrap_err();
    assert_eq!(err, Error::UnknownAgent("poet".into()));
    assert!(err.is_caller_error());
}

#[test]
fn configured_agents_extend_and_replace() {
    let custom: AgentProfile = serde_json::from_value(serde_json::json!({
        "id": "poet",
        "name": "诗人",
        "system_prompt": "你是一位诗人。",
        "temperature": 1.1
    }))
    .unwrap();
    let replaced = AgentProfile {
        system_prompt: "新的口播提示词".into(),
        ..AgentCatalog::builtin().resolve(DEFAULT_AGENT).unwrap().clone()
    };

    let catalog = AgentCatalog::builtin().with_agents([custom, replaced]);
    assert_eq!(catalog.list().len(), 6);
    assert_eq!(catalog.resolve("poet").unwrap().temperature, Some(1.1));
    assert_eq!(catalog.resolve("poet").unwrap().max_tokens, None);
    assert_eq!(
        catalog.resolve(DEFAULT_AGENT).unwrap().system_prompt,
        "新的口播提示词"
    );
}
