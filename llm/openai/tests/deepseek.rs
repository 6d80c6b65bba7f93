//! Tests for the OpenAI-style adapter against recorded DeepSeek responses.

use futures_util::StreamExt;
use huoyuan_openai::OpenAI;
use llm::{
    Adapter, AdapterOptions, Client, Error, GenerationRequest, StreamDelta, Timeouts, Usage,
    WireFormat, collect_text,
};
use serde_json::Value;
use std::{collections::BTreeMap, time::Duration};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const COMPLETION: &str = r#"{
  "id": "930c60df-bf64-41c9-a88e-3ec75f81e00e",
  "object": "chat.completion",
  "created": 1735000000,
  "model": "deepseek-chat",
  "choices": [{
    "index": 0,
    "message": {"role": "assistant", "content": "健康饮食，从一碗燕麦开始。"},
    "finish_reason": "stop"
  }],
  "usage": {"prompt_tokens": 21, "completion_tokens": 9, "total_tokens": 30}
}"#;

const STREAM: &str = "data: {\"id\":\"1\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"\"}}]}\n\n\
data: {\"id\":\"1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"健康饮食，\"}}]}\n\n\
data: {\"id\":\"1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"从一碗燕麦\"}}]}\n\n\
data: {\"id\":\"1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"开始。\"}}]}\n\n\
data: {\"id\":\"1\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n\
data: [DONE]\n\n";

fn no_env() -> BTreeMap<String, String> {
    BTreeMap::new()
}

fn adapter(server: &MockServer) -> OpenAI {
    let options = AdapterOptions::with_key("sk-test").base_url(server.uri());
    OpenAI::deepseek(Client::new(), &no_env(), &options).expect("deepseek adapter")
}

async fn mount(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn sse(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body)
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    serde_json::from_slice(&requests.last().expect("one request").body).expect("json body")
}

#[test]
fn missing_key_fails_at_construction() {
    let err = OpenAI::deepseek(Client::new(), &no_env(), &AdapterOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Auth { ref credential, .. } if credential == "DEEPSEEK_API_KEY"));
}

#[test]
fn environment_key_and_defaults_are_used() {
    let env: BTreeMap<String, String> = [("DEEPSEEK_API_KEY".to_owned(), "sk-env".to_owned())]
        .into_iter()
        .collect();
    let adapter = OpenAI::deepseek(Client::new(), &env, &AdapterOptions::default()).unwrap();
    assert_eq!(adapter.endpoint(), "https://api.deepseek.com/v1/chat/completions");
    assert_eq!(adapter.model(), "deepseek-chat");
    assert_eq!(adapter.provider(), "deepseek");
    assert_eq!(adapter.wire_format(), WireFormat::OpenAI);
}

#[tokio::test]
async fn generate_text_reads_first_choice() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string(COMPLETION)).await;

    let request = GenerationRequest::new("写一句健康饮食的开头")
        .with_system("你是短视频文案专家")
        .with_temperature(0.3)
        .with_max_tokens(256);
    let result = adapter(&server).generate_text(&request).await.unwrap();

    assert_eq!(result.content, "健康饮食，从一碗燕麦开始。");
    assert_eq!(result.provider, "deepseek");
    assert_eq!(result.model, "deepseek-chat");
    assert_eq!(
        result.usage,
        Some(Usage {
            prompt_tokens: 21,
            completion_tokens: 9,
            total_tokens: 30,
        })
    );

    let body = sent_body(&server).await;
    assert_eq!(body["model"], "deepseek-chat");
    assert_eq!(body["stream"], false);
    assert_eq!(body["max_tokens"], 256);
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "你是短视频文案专家");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "写一句健康饮食的开头");
}

#[tokio::test]
async fn system_message_is_omitted_without_system_prompt() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string(COMPLETION)).await;

    let request = GenerationRequest::new("hi").with_model("deepseek-reasoner");
    adapter(&server).generate_text(&request).await.unwrap();

    let body = sent_body(&server).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(body["model"], "deepseek-reasoner");
}

#[tokio::test]
async fn streaming_matches_non_streaming_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(sse(STREAM))
        .mount(&server)
        .await;

    let request = GenerationRequest::new("写一句健康饮食的开头").streaming(true);
    let deltas: Vec<_> = adapter(&server)
        .generate_stream(&request)
        .unwrap()
        .collect()
        .await;

    assert_eq!(
        deltas,
        vec![
            StreamDelta::Text("健康饮食，".into()),
            StreamDelta::Text("从一碗燕麦".into()),
            StreamDelta::Text("开始。".into()),
            StreamDelta::Done,
        ]
    );
    assert_eq!(sent_body(&server).await["stream"], true);

    let streamed: String = deltas.iter().filter_map(StreamDelta::text).collect();
    let complete: Value = serde_json::from_str(COMPLETION).unwrap();
    assert_eq!(streamed, complete["choices"][0]["message"]["content"]);
}

#[tokio::test]
async fn upstream_error_preserves_status_and_body() {
    let server = MockServer::start().await;
    let body = r#"{"error":{"message":"Insufficient Balance","type":"unknown_error"}}"#;
    mount(&server, ResponseTemplate::new(402).set_body_string(body)).await;

    let err = adapter(&server)
        .generate_text(&GenerationRequest::new("hi"))
        .await
        .unwrap_err();
    assert_eq!(err, Error::upstream(402, body));

    let stream = adapter(&server)
        .generate_stream(&GenerationRequest::new("hi"))
        .unwrap();
    let deltas: Vec<_> = stream.collect().await;
    assert_eq!(deltas, vec![StreamDelta::Error(Error::upstream(402, body))]);
}

#[tokio::test]
async fn non_streaming_deadline_is_a_timeout() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(COMPLETION)
            .set_delay(Duration::from_millis(400)),
    )
    .await;

    let options = AdapterOptions::with_key("sk-test")
        .base_url(server.uri())
        .timeouts(Timeouts {
            request: Duration::from_millis(50),
            stream: Duration::from_secs(5),
        });
    let adapter = OpenAI::deepseek(Client::new(), &no_env(), &options).unwrap();
    let err = adapter
        .generate_text(&GenerationRequest::new("hi"))
        .await
        .unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn invalid_request_never_reaches_the_network() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string(COMPLETION)).await;

    let adapter = adapter(&server);
    let request = GenerationRequest::new("hi").with_temperature(3.0);
    assert!(adapter.generate_text(&request).await.is_err());
    assert!(adapter.generate_stream(&request).is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn collected_stream_equals_text() {
    let server = MockServer::start().await;
    mount(&server, sse(STREAM)).await;

    let stream = adapter(&server)
        .generate_stream(&GenerationRequest::new("hi"))
        .unwrap();
    assert_eq!(collect_text(stream).await.unwrap(), "健康饮食，从一碗燕麦开始。");
}

#[tokio::test]
async fn in_band_error_after_content_is_terminal() {
    let server = MockServer::start().await;
    let body = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"部分\"}}]}\n\n",
        "data: {\"error\":{\"message\":\"rate limited\",\"type\":\"rate_limit_error\"}}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"不会出现\"}}]}\n\n",
    );
    mount(&server, sse(body)).await;

    let request = GenerationRequest::new("hi").streaming(true);
    let deltas: Vec<_> = adapter(&server)
        .generate_stream(&request)
        .unwrap()
        .collect()
        .await;
    assert_eq!(deltas.len(), 2);
    assert_eq!(deltas[0], StreamDelta::Text("部分".into()));
    assert!(matches!(
        &deltas[1],
        StreamDelta::Error(Error::Upstream { status: None, body, timeout: false })
            if body == "rate_limit_error: rate limited"
    ));

    let stream = adapter(&server).generate_stream(&request).unwrap();
    assert!(collect_text(stream).await.is_err());
}
