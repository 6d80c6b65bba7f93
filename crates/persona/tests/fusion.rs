//! Tests for the prompt fusion engine.

use huoyuan_persona::{
    AgentCatalog, AgentProfile, ConversationHistory, Overrides, PersonaProfile, Turn, fuse,
};
use llm::Error;

fn agent(temperature: Option<f32>, max_tokens: Option<u32>) -> AgentProfile {
    AgentProfile {
        id: "tester".into(),
        name: "Tester".into(),
        icon: String::new(),
        description: String::new(),
        system_prompt: "你是一位短视频文案专家。".into(),
        temperature,
        max_tokens,
    }
}

fn persona() -> PersonaProfile {
    PersonaProfile {
        name: "李医生科普".into(),
        industry: "医疗健康".into(),
        tone: "专业亲和".into(),
        keywords: vec!["睡眠".into(), "饮食".into()],
        taboos: vec!["夸大疗效".into()],
        ..Default::default()
    }
}

/// Ten alternating prior turns followed by the final user turn.
fn long_history() -> ConversationHistory {
    let mut history = ConversationHistory::default();
    for i in 0..10 {
        if i % 2 == 0 {
            history.push(Turn::user(format!("问题{i}")));
        } else {
            history.push(Turn::assistant(format!("回答{i}")));
        }
    }
    history.push(Turn::user("最终请求"));
    history
}

#[test]
fn single_turn_without_persona_keeps_base_prompt() {
    let agent = agent(Some(0.7), Some(2048));
    let fusion = fuse(
        &agent,
        None,
        &ConversationHistory::single("写个开头"),
        Overrides::default(),
    )
    .unwrap();
    assert_eq!(fusion.system_prompt, agent.system_prompt);
    assert_eq!(fusion.prompt, "写个开头");
}

#[test]
fn fusion_is_idempotent() {
    let agent = agent(Some(0.8), None);
    let persona = persona();
    let history = long_history();
    let first = fuse(&agent, Some(&persona), &history, Overrides::default()).unwrap();
    let second = fuse(&agent, Some(&persona), &history, Overrides::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.system_prompt.as_bytes(), second.system_prompt.as_bytes());
}

#[test]
fn history_window_keeps_six_most_recent_prior_turns() {
    let fusion = fuse(
        &agent(None, None),
        None,
        &long_history(),
        Overrides::default(),
    )
    .unwrap();

    let expected = "你是一位短视频文案专家。\n【对话历史】\n\
用户：问题4\n助手：回答5\n用户：问题6\n助手：回答7\n用户：问题8\n助手：回答9\n\n\
请基于以上对话历史，继续回复用户的最新请求。";
    assert_eq!(fusion.system_prompt, expected);
    assert!(!fusion.system_prompt.contains("问题2"));
    assert!(!fusion.system_prompt.contains("最终请求"));
    assert_eq!(fusion.prompt, "最终请求");
}

#[test]
fn short_history_is_rendered_whole() {
    let history = ConversationHistory::new(vec![
        Turn::user("写个开头"),
        Turn::assistant("大家好"),
        Turn::user("再活泼一点"),
    ]);
    let fusion = fuse(&agent(None, None), None, &history, Overrides::default()).unwrap();
    assert!(fusion.system_prompt.ends_with(
        "【对话历史】\n用户：写个开头\n助手：大家好\n\n请基于以上对话历史，继续回复用户的最新请求。"
    ));
    assert_eq!(fusion.prompt, "再活泼一点");
}

#[test]
fn persona_section_follows_history_block() {
    let history = ConversationHistory::new(vec![Turn::user("上一轮"), Turn::user("这一轮")]);
    let fusion = fuse(
        &agent(None, None),
        Some(&persona()),
        &history,
        Overrides::default(),
    )
    .unwrap();

    let rule = "=".repeat(40);
    let expected = format!(
        "你是一位短视频文案专家。\n【对话历史】\n用户：上一轮\n\n请基于以上对话历史，继续回复用户的最新请求。\
\n\n{rule}\n在创作时，请严格遵循以下IP人设设定，确保内容符合该IP的风格特点：\n\
【IP信息】\n- IP名称：李医生科普\n- 所属赛道：医疗健康\n- 语气风格：专业亲和\n\
- 常用关键词：睡眠, 饮食\n- 内容禁忌：夸大疗效\n\
{rule}\n请在保持智能体专业能力的同时，融入以上IP的人设特点进行创作。"
    );
    assert_eq!(fusion.system_prompt, expected);
}

#[test]
fn empty_persona_adds_nothing() {
    let fusion = fuse(
        &agent(None, None),
        Some(&PersonaProfile::default()),
        &ConversationHistory::single("hi"),
        Overrides::default(),
    )
    .unwrap();
    assert_eq!(fusion.system_prompt, "你是一位短视频文案专家。");
}

#[test]
fn temperature_precedence() {
    let history = ConversationHistory::single("hi");
    let explicit = Overrides {
        temperature: Some(1.2),
        max_tokens: None,
    };
    assert_eq!(
        fuse(&agent(Some(0.7), None), None, &history, explicit)
            .unwrap()
            .temperature,
        1.2
    );
    assert_eq!(
        fuse(&agent(Some(0.7), None), None, &history, Overrides::default())
            .unwrap()
            .temperature,
        0.7
    );
    assert_eq!(
        fuse(&agent(None, None), None, &history, Overrides::default())
            .unwrap()
            .temperature,
        0.7
    );
}

#[test]
fn max_tokens_precedence() {
    let history = ConversationHistory::single("hi");
    let explicit = Overrides {
        temperature: None,
        max_tokens: Some(512),
    };
    assert_eq!(
        fuse(&agent(None, Some(4096)), None, &history, explicit)
            .unwrap()
            .max_tokens,
        512
    );
    assert_eq!(
        fuse(&agent(None, Some(4096)), None, &history, Overrides::default())
            .unwrap()
            .max_tokens,
        4096
    );
    assert_eq!(
        fuse(&agent(None, None), None, &history, Overrides::default())
            .unwrap()
            .max_tokens,
        2048
    );
}

#[test]
fn no_user_turn_is_empty_prompt() {
    let agent = agent(None, None);
    let empty = ConversationHistory::default();
    assert_eq!(
        fuse(&agent, None, &empty, Overrides::default()).unwrap_err(),
        Error::EmptyPrompt
    );

    let assistant_only = ConversationHistory::new(vec![Turn::assistant("你好")]);
    assert_eq!(
        fuse(&agent, None, &assistant_only, Overrides::default()).unwrap_err(),
        Error::EmptyPrompt
    );

    let blank = ConversationHistory::single("   ");
    assert_eq!(
        fuse(&agent, None, &blank, Overrides::default()).unwrap_err(),
        Error::EmptyPrompt
    );
}

#[test]
fn trailing_assistant_turns_are_ignored() {
    let history = ConversationHistory::new(vec![
        Turn::user("第一问"),
        Turn::assistant("第一答"),
        Turn::user("第二问"),
        Turn::assistant("未完成的回答"),
    ]);
    let fusion = fuse(&agent(None, None), None, &history, Overrides::default()).unwrap();
    assert_eq!(fusion.prompt, "第二问");
    assert!(fusion.system_prompt.contains("助手：第一答"));
    assert!(!fusion.system_prompt.contains("未完成的回答"));
}

#[test]
fn fusion_converts_into_request() {
    let catalog = AgentCatalog::builtin();
    let agent = catalog.resolve("knowledge").unwrap();
    let request = fuse(
        agent,
        None,
        &ConversationHistory::single("为什么熬夜伤身"),
        Overrides::default(),
    )
    .unwrap()
    .into_request();
    assert_eq!(request.prompt, "为什么熬夜伤身");
    assert_eq!(request.system(), Some(agent.system_prompt.as_str()));
    assert_eq!(request.temperature, 0.5);
    assert_eq!(request.max_tokens, 3072);
    assert!(request.validate().is_ok());
}
