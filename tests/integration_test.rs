/// Integration tests for the insight workspace using the scripted backend.
use chrono::{TimeZone, Utc};

use insight_api::{Backend, BackendCall, ScriptedBackend};
use insight_core::{Command, Session};
use insight_model::{
    fact_segments, group_at, Answer, Bucket, FactSegment, Rating, ResponseRecord,
};

fn record(response_id: &str) -> ResponseRecord {
    ResponseRecord {
        query_id: format!("q-{response_id}"),
        response_id: response_id.to_string(),
        query: "what grew last year?".into(),
        answer: Answer {
            summary: vec!["Revenue grew.".into()],
            facts: vec!["Revenue grew [Source: doc-1].".into()],
        },
        timestamp: Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
        docs: vec![insight_model::Document {
            id: "doc-1".into(),
            text: "Revenue table.".into(),
        }],
        feedback: None,
    }
}

/// Run the session's commands against the backend, feeding completions back
/// in until no commands remain.
async fn drive(session: &mut Session, backend: &ScriptedBackend, mut pending: Vec<Command>) {
    while let Some(cmd) = pending.pop() {
        match cmd {
            Command::CreateResponse { generation, query, user_id } => {
                let result = backend.create_response(&query, &user_id).await;
                pending.extend(session.on_query_complete(generation, result));
            }
            Command::RefreshHistory => {
                let result = backend.list_history().await;
                session.on_history_loaded(result);
            }
            Command::Revalidate { generation, response_id } => {
                let result = backend.revalidate(&response_id).await;
                pending.extend(session.on_revalidate_complete(generation, result));
            }
            Command::FetchVersions { generation, response_id } => {
                let result = backend.version_history(&response_id).await;
                session.on_versions_loaded(generation, result);
            }
            Command::SubmitFeedback { epoch, request } => {
                let result = backend.submit_feedback(request).await;
                pending.extend(session.on_feedback_submitted(epoch, result));
            }
            Command::FetchAggregate { generation, response_id } => {
                let result = backend.feedback_aggregate(&response_id).await;
                session.on_aggregate_loaded(generation, result);
            }
        }
    }
}

#[tokio::test]
async fn query_to_answer_round_trip() {
    let backend = ScriptedBackend::new();
    backend.push_create(Ok(record("r-1")));
    backend.push_history(Ok(vec![record("r-1")]));

    let mut session = Session::new("anonymous".into());
    let cmds = session.submit_query("what grew last year?");
    drive(&mut session, &backend, cmds).await;

    assert_eq!(session.current().map(|r| r.response_id.as_str()), Some("r-1"));
    assert_eq!(session.cache.len(), 1);
    assert_eq!(
        backend.count_calls(|c| matches!(c, BackendCall::CreateResponse { .. })),
        1
    );
}

#[tokio::test]
async fn feedback_carries_the_configured_user() {
    let backend = ScriptedBackend::new();
    backend.push_create(Ok(record("r-1")));
    backend.push_feedback(Ok(insight_model::FeedbackReceipt {
        status: "ok".into(),
        feedback_id: "f-1".into(),
    }));

    let mut session = Session::new("erik".into());
    let cmds = session.submit_query("what grew last year?");
    drive(&mut session, &backend, cmds).await;

    session.choose_rating(Rating::Like);
    let cmds = session.submit_feedback();
    drive(&mut session, &backend, cmds).await;

    let sent = backend
        .calls()
        .into_iter()
        .find_map(|c| match c {
            BackendCall::SubmitFeedback(req) => Some(req),
            _ => None,
        })
        .unwrap();
    assert_eq!(sent.user_id, "erik");
    assert_eq!(sent.response_id, "r-1");
    assert_eq!(sent.rating, Rating::Like);
}

#[test]
fn citation_markers_resolve_against_record_docs() {
    let r = record("r-1");
    let segments: Vec<_> = fact_segments(&r.answer.facts[0], &r.docs).collect();
    assert!(segments.iter().any(|s| matches!(
        s,
        FactSegment::Citation { name: "doc-1", doc: Some(_) }
    )));
}

#[test]
fn history_groups_by_recency() {
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
    let mut old = record("r-old");
    old.timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let entries = vec![record("r-1"), old];

    let grouped = group_at(&entries, now);
    assert_eq!(grouped.bucket(Bucket::Today).len(), 1);
    assert_eq!(grouped.bucket(Bucket::Older).len(), 1);
}

#[test]
fn config_defaults_are_valid() {
    let cfg = insight_config::Config::default();
    assert_eq!(cfg.api.base_url, "http://localhost:5000");
    assert_eq!(cfg.api.user_id, "anonymous");
    assert!(!cfg.tui.ascii);
}
