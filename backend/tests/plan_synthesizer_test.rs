//! Plan synthesis against a mocked Ollama server
//!
//! No database needed: these exercise the HTTP client, parsing and every
//! fallback path end to end.

use std::sync::Arc;
use std::time::Duration;

use fitness_tracker_backend::services::{OllamaClient, PlanSynthesizer};
use fitness_tracker_shared::plan::default_weekly_schedule;
use fitness_tracker_shared::{
    ActivityLevel, DayOfWeek, Gender, PlanSettings, PlanSource, ProfileInput, ResolvedProfile,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile() -> ResolvedProfile {
    ProfileInput {
        age: Some(25),
        gender: Some(Gender::Male),
        height_cm: Some(175.0),
        weight_kg: Some(70.0),
        activity_level: Some(ActivityLevel::Moderate),
        ..Default::default()
    }
    .resolve()
}

fn synthesizer(server: &MockServer, timeout: Duration) -> PlanSynthesizer {
    let client = OllamaClient::new(&server.uri(), "test-model", timeout).unwrap();
    PlanSynthesizer::new(Some(Arc::new(client)), timeout, PlanSettings::default())
}

fn ollama_reply(text: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"model": "test-model", "response": text, "done": true}))
}

fn ai_plan_text() -> String {
    let days: Vec<_> = DayOfWeek::ALL
        .iter()
        .map(|d| {
            json!({
                "day": d.as_str(),
                "title": format!("{} Mobility", d.as_str()),
                "durationMinutes": 25,
                "caloriesBurn": 120,
                "exercises": ["Cat-cow", {"name": "Hip circles", "reps": 10}]
            })
        })
        .collect();

    format!(
        "Here is your plan:\n{}",
        json!({
            "weeklySchedule": days,
            "recommendations": ["Walk after meals"],
            "fitnessTips": ["Sleep 8 hours"]
        })
    )
}

#[tokio::test]
async fn test_ai_plan_is_used_when_valid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"model": "test-model", "stream": false})))
        .respond_with(ollama_reply(ai_plan_text()))
        .expect(1)
        .mount(&server)
        .await;

    let plan = synthesizer(&server, Duration::from_secs(5))
        .synthesize(&profile())
        .await;

    assert_eq!(plan.source, PlanSource::Ai);
    assert_eq!(plan.daily_calories, 2594);
    assert_eq!(plan.protein_goal, 126);
    let days = plan.weekly_schedule.days();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0].day, DayOfWeek::Monday);
    assert_eq!(days[0].title, "Monday Mobility");
    assert_eq!(days[0].exercises.len(), 2);
    assert_eq!(plan.recommendations, vec!["Walk after meals".to_string()]);
}

#[tokio::test]
async fn test_server_error_falls_back_to_default_week() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;

    let plan = synthesizer(&server, Duration::from_secs(5))
        .synthesize(&profile())
        .await;

    assert_eq!(plan.source, PlanSource::Default);
    assert_eq!(plan.weekly_schedule, default_weekly_schedule());
    let order: Vec<_> = plan.weekly_schedule.days().iter().map(|d| d.day).collect();
    assert_eq!(order, DayOfWeek::ALL.to_vec());
    assert_eq!(plan.daily_calories, 2594);
}

#[tokio::test]
async fn test_incomplete_week_falls_back() {
    let server = MockServer::start().await;
    let text = json!({
        "weeklySchedule": [{"day": "Monday", "title": "Run", "durationMinutes": 30}]
    })
    .to_string();
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ollama_reply(text))
        .mount(&server)
        .await;

    let plan = synthesizer(&server, Duration::from_secs(5))
        .synthesize(&profile())
        .await;

    assert_eq!(plan.source, PlanSource::Default);
    assert_eq!(plan.weekly_schedule, default_weekly_schedule());
}

#[tokio::test]
async fn test_non_json_reply_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ollama_reply("I cannot help with that.".to_string()))
        .mount(&server)
        .await;

    let plan = synthesizer(&server, Duration::from_secs(5))
        .synthesize(&profile())
        .await;

    assert_eq!(plan.source, PlanSource::Default);
}

#[tokio::test]
async fn test_slow_server_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ollama_reply(ai_plan_text()).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let plan = synthesizer(&server, Duration::from_millis(200))
        .synthesize(&profile())
        .await;

    assert_eq!(plan.source, PlanSource::Default);
    assert_eq!(plan.weekly_schedule, default_weekly_schedule());
}

#[tokio::test]
async fn test_unreachable_server_falls_back() {
    let client = OllamaClient::new("http://127.0.0.1:9", "test-model", Duration::from_secs(1)).unwrap();
    let synth = PlanSynthesizer::new(
        Some(Arc::new(client)),
        Duration::from_secs(1),
        PlanSettings::default(),
    );

    let plan = synth.synthesize(&profile()).await;

    assert_eq!(plan.source, PlanSource::Default);
}

#[tokio::test]
async fn test_default_plan_is_deterministic() {
    let synth = PlanSynthesizer::static_only(PlanSettings::default());
    let a = synth.synthesize(&profile()).await;
    let b = synth.synthesize(&profile()).await;

    assert_eq!(a.targets(), b.targets());
    assert_eq!(a.weekly_schedule, b.weekly_schedule);
    assert_eq!(a.recommendations, b.recommendations);
}
