//! Tests for SSE frame encoding.

use futures_util::{StreamExt, stream};
use huoyuan_generation::sse::{self, DONE_FRAME};
use llm::{DeltaStream, Error, StreamDelta};

fn deltas(items: Vec<StreamDelta>) -> DeltaStream {
    Box::pin(stream::iter(items))
}

#[tokio::test]
async fn text_frames_keep_non_ascii() {
    let frames: Vec<String> = sse::frames(deltas(vec![
        StreamDelta::Text("你好 \"世界\"".into()),
        StreamDelta::Done,
    ]))
    .collect()
    .await;
    assert_eq!(
        frames,
        vec!["data: {\"content\":\"你好 \\\"世界\\\"\"}\n\n", DONE_FRAME]
    );
}

#[tokio::test]
async fn error_after_partial_content_ends_the_stream() {
    let frames: Vec<String> = sse::frames(deltas(vec![
        StreamDelta::Text("部分".into()),
        StreamDelta::Error(Error::upstream(500, "boom")),
        StreamDelta::Text("ignored".into()),
    ]))
    .collect()
    .await;
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], sse::content_frame("部分"));
    assert!(frames[1].starts_with("data: {\"error\":"));
    assert!(frames[1].contains("boom"));
    assert_eq!(frames[2], DONE_FRAME);
}

#[tokio::test]
async fn done_is_always_last() {
    let frames: Vec<String> = sse::frames(deltas(vec![])).collect().await;
    assert_eq!(frames, vec![DONE_FRAME]);
}
