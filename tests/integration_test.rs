//! End-to-end navigation scenarios driven through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use webnav_core::audit::{DecisionOutcome, SkipReason};
use webnav_core::{
    Directive, EngineEvent, HeaderInjector, Headers, InterceptVerdict, LoadState,
    ModifiedRequest, NavCapabilities, NavigationAction, NavigationController, NavigationDecision,
    PendingRequest, PolicyFault, RecordingEngine, RequestError, WebSettings,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Policy that records every URL it sees and answers with `verdict`.
fn recording_policy(
    verdict: InterceptVerdict,
) -> (
    impl Fn(&PendingRequest) -> Result<InterceptVerdict, PolicyFault>,
    Rc<RefCell<Vec<String>>>,
) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let policy = move |req: &PendingRequest| -> Result<InterceptVerdict, PolicyFault> {
        log.borrow_mut().push(req.url().to_string());
        Ok(verdict.clone())
    };
    (policy, seen)
}

#[test]
fn reject_scenario() {
    init_tracing();
    let (policy, seen) = recording_policy(InterceptVerdict::Reject);
    let mut controller = NavigationController::builder("view-reject")
        .interceptor(policy)
        .build();
    let mut engine = RecordingEngine::new();

    controller.on_provisional_start(Some("https://a"));
    assert_eq!(controller.load_state(), LoadState::Loading(0.0));
    assert!(controller.errors().is_empty());

    let decision =
        controller.on_navigation_action(NavigationAction::main_frame("https://a"), &mut engine);

    assert_eq!(decision, NavigationDecision::Cancel);
    assert_eq!(controller.load_state(), LoadState::Loading(0.0));
    assert_eq!(seen.borrow().as_slice(), ["https://a"]);
    assert!(engine.is_empty());
}

#[test]
fn modify_scenario() {
    init_tracing();
    let (policy, seen) =
        recording_policy(InterceptVerdict::Modify(ModifiedRequest::new("https://b")));
    let mut controller = NavigationController::builder("view-modify")
        .interceptor(policy)
        .record_decisions(true)
        .build();
    let mut engine = RecordingEngine::new();

    let action = NavigationAction::main_frame("https://a").with_header("Accept", "text/html");
    let decision = controller.on_navigation_action(action, &mut engine);

    assert_eq!(decision, NavigationDecision::Cancel);
    assert!(controller.is_suppressing_next_action());
    assert_eq!(
        engine.take(),
        vec![
            Directive::StopLoading,
            Directive::LoadUrl {
                url: "https://b".to_string(),
                headers: Headers::new(),
            },
        ]
    );

    let decision =
        controller.on_navigation_action(NavigationAction::main_frame("https://b"), &mut engine);
    assert_eq!(decision, NavigationDecision::Allow);
    assert!(!controller.is_suppressing_next_action());
    assert_eq!(seen.borrow().len(), 1);

    let trail = controller.trail().expect("trail enabled");
    assert_eq!(
        trail.events()[0].outcome(),
        &DecisionOutcome::Modified {
            to_url: "https://b".to_string()
        }
    );
    assert_eq!(
        trail.events()[1].outcome(),
        &DecisionOutcome::Skipped(SkipReason::Suppressed)
    );
}

#[test]
fn offline_failure_scenario() {
    init_tracing();
    let mut controller = NavigationController::new("view-offline");

    controller.on_provisional_start(Some("https://a"));
    controller.on_provisional_fail(-1009, "offline");

    assert_eq!(controller.load_state(), LoadState::Failed);
    assert_eq!(
        controller.errors(),
        &[RequestError {
            code: -1009,
            description: "offline".to_string(),
            is_from_main_frame: true,
        }]
    );
}

#[test]
fn finish_scenario() {
    init_tracing();
    let mut controller = NavigationController::new("view-finish");

    controller.on_provisional_start(Some("https://a"));
    controller.on_finish(Some("https://a"), Some("A"), true, false);

    assert_eq!(controller.load_state(), LoadState::Finished);
    assert_eq!(
        controller.capabilities(),
        NavCapabilities {
            can_go_back: true,
            can_go_forward: false,
        }
    );
}

#[test]
fn full_attempt_through_handle() {
    init_tracing();
    let settings = WebSettings::new().with_zoom_level(1.25).expect("valid zoom");
    let mut controller = NavigationController::builder("view-full")
        .interceptor(HeaderInjector::new("X-App", "demo"))
        .settings(settings)
        .build();
    let mut engine = RecordingEngine::new();

    // The first main-frame action lacks the header and is rewritten.
    let first = controller.handle(
        EngineEvent::NavigationAction(NavigationAction::main_frame("https://site")),
        &mut engine,
    );
    assert_eq!(first, Some(NavigationDecision::Cancel));

    let reissued = engine.take();
    let Directive::LoadUrl { url, headers } = &reissued[1] else {
        panic!("expected a reload, got {:?}", reissued);
    };
    assert_eq!(url, "https://site");
    assert_eq!(headers.get("X-App").map(String::as_str), Some("demo"));

    // The engine replays the rewritten load.
    let replay = NavigationAction::main_frame(url.clone()).with_header("X-App", "demo");
    let events = vec![
        EngineEvent::NavigationAction(replay),
        EngineEvent::ProvisionalStart {
            url: Some("https://site".to_string()),
        },
        EngineEvent::Progress(0.3),
        EngineEvent::Commit,
        EngineEvent::Progress(0.9),
        EngineEvent::Finish {
            url: Some("https://site/".to_string()),
            title: Some("Site".to_string()),
            can_go_back: false,
            can_go_forward: false,
        },
    ];
    let decisions: Vec<_> = events
        .into_iter()
        .filter_map(|event| controller.handle(event, &mut engine))
        .collect();

    assert_eq!(decisions, vec![NavigationDecision::Allow]);
    assert_eq!(controller.load_state(), LoadState::Finished);
    assert_eq!(controller.page_title(), Some("Site"));
    assert_eq!(controller.last_loaded_url(), Some("https://site/"));
    assert!(matches!(
        engine.directives(),
        [Directive::EvaluateScript(script)] if script.contains("initial-scale=1.25")
    ));
}

#[test]
fn views_do_not_share_suppression() {
    init_tracing();
    let rewrite = || {
        |_: &PendingRequest| -> Result<InterceptVerdict, PolicyFault> {
            Ok(InterceptVerdict::Modify(ModifiedRequest::new("https://b")))
        }
    };
    let mut left = NavigationController::builder("left")
        .interceptor(rewrite())
        .build();
    let mut right = NavigationController::builder("right")
        .interceptor(rewrite())
        .build();
    let mut engine = RecordingEngine::new();

    left.on_navigation_action(NavigationAction::main_frame("https://a"), &mut engine);
    assert!(left.is_suppressing_next_action());
    assert!(!right.is_suppressing_next_action());

    let decision =
        right.on_navigation_action(NavigationAction::main_frame("https://a"), &mut engine);
    assert_eq!(decision, NavigationDecision::Cancel);
}

#[test]
fn failed_policy_is_reported_separately_from_load_errors() {
    init_tracing();
    let policy = |req: &PendingRequest| -> Result<InterceptVerdict, PolicyFault> {
        Err(PolicyFault::failed(format!("no rule for {}", req.url())))
    };
    let mut controller = NavigationController::builder("view-fault")
        .interceptor(policy)
        .build();
    let mut engine = RecordingEngine::new();

    controller.on_provisional_start(Some("https://a"));
    let decision =
        controller.on_navigation_action(NavigationAction::main_frame("https://a"), &mut engine);

    assert_eq!(decision, NavigationDecision::Cancel);
    let snapshot = controller.snapshot();
    assert!(snapshot.errors.is_empty());
    assert_eq!(snapshot.intercept_errors.len(), 1);
    assert!(snapshot.intercept_errors[0]
        .to_string()
        .contains("no rule for https://a"));
}
