//! Tests for the orchestrator wired to the built-in providers.

use futures_util::StreamExt;
use huoyuan_generation::{
    ChatRequest, GenerationParams, MemoryPersonaStore, Orchestrator, register_builtin, sse,
};
use llm::{AdapterOptions, Error, Generation, Registry};
use persona::PersonaProfile;
use serde_json::Value;
use std::collections::BTreeMap;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const STREAM: &str = "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"大家好，\"}}]}\n\n\
data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"今天聊聊\"}}]}\n\n\
data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"早餐。\"}}]}\n\n\
data: [DONE]\n\n";

fn orchestrator(server: &MockServer) -> Orchestrator {
    let env: BTreeMap<String, String> = [
        ("DEEPSEEK_API_KEY".to_owned(), "sk-deepseek".to_owned()),
        ("DEEPSEEK_BASE_URL".to_owned(), server.uri()),
    ]
    .into_iter()
    .collect();
    let registry = Registry::with_env(env);
    register_builtin(&registry);

    let personas: MemoryPersonaStore = [(
        "p1",
        PersonaProfile {
            name: "小王健身".into(),
            keywords: vec!["减脂".into(), "增肌".into()],
            ..Default::default()
        },
    )]
    .into_iter()
    .collect();
    Orchestrator::new(registry).with_personas(personas)
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    serde_json::from_slice(&requests.last().expect("one request").body).expect("json body")
}

#[tokio::test]
async fn chat_streams_sse_frames_from_deepseek() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-deepseek"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(STREAM),
        )
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    let request = ChatRequest {
        persona_id: Some("p1".into()),
        ..ChatRequest::new("写一个早餐主题的开头")
    };
    let Generation::Stream(deltas) = orchestrator.chat(&request).await.unwrap() else {
        panic!("chat streams by default");
    };
    let frames: Vec<String> = sse::frames(deltas).collect().await;
    assert_eq!(
        frames,
        vec![
            "data: {\"content\":\"大家好，\"}\n\n",
            "data: {\"content\":\"今天聊聊\"}\n\n",
            "data: {\"content\":\"早餐。\"}\n\n",
            "data: [DONE]\n\n",
        ]
    );

    let body = sent_body(&server).await;
    assert_eq!(body["stream"], true);
    assert_eq!(body["model"], "deepseek-chat");
    assert_eq!(body["messages"][0]["role"], "system");
    let system = body["messages"][0]["content"].as_str().unwrap();
    assert!(system.contains("- IP名称：小王健身\n- 常用关键词：减脂, 增肌"));
    assert_eq!(body["messages"][1]["content"], "写一个早餐主题的开头");
}

#[tokio::test]
async fn upstream_failure_becomes_error_frame() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let Generation::Stream(deltas) = orchestrator(&server)
        .chat(&ChatRequest::new("你好"))
        .await
        .unwrap()
    else {
        panic!("chat streams by default");
    };
    let frames: Vec<String> = sse::frames(deltas).collect().await;
    assert_eq!(frames.len(), 2);
    assert!(frames[0].starts_with("data: {\"error\":"));
    assert!(frames[0].contains("503"));
    assert_eq!(frames[1], "data: [DONE]\n\n");
}

#[tokio::test]
async fn missing_credential_surfaces_as_auth_error() {
    let registry = Registry::with_env(BTreeMap::new());
    register_builtin(&registry);
    let orchestrator = Orchestrator::new(registry);

    let err = orchestrator
        .quick("doubao", "efficient_oral", None, "你好", &GenerationParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth { ref credential, .. } if credential == "DOUBAO_API_KEY"));

    let orchestrator = orchestrator.with_options("doubao", AdapterOptions::with_key("ark-key"));
    assert!(
        orchestrator
            .quick("doubao", "efficient_oral", None, "", &GenerationParams::default())
            .await
            .is_err_and(|e| e == Error::EmptyPrompt)
    );
}
