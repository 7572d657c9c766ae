//! Interception flow demonstration.
//!
//! This example walks one view through a page load:
//! 1. A policy blocks plain-HTTP navigations
//! 2. A policy rewrites a main-frame request to carry an extra header
//! 3. The rewritten load is allowed without a second policy call
//! 4. The page finishes and back/forward availability is refreshed
//!
//! Run with: `cargo run --example intercept_flow`

use webnav_core::{
    EngineEvent, InterceptVerdict, ModifiedRequest, NavigationAction, NavigationController,
    PendingRequest, PolicyFault, RecordingEngine,
};

fn site_policy(req: &PendingRequest) -> Result<InterceptVerdict, PolicyFault> {
    if req.url().starts_with("http://") {
        return Ok(InterceptVerdict::Reject);
    }
    if req.header("X-Embedded").is_none() {
        let modified = ModifiedRequest::from(req).with_header("X-Embedded", "1");
        return Ok(InterceptVerdict::Modify(modified));
    }
    Ok(InterceptVerdict::Allow)
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Interception Flow Example ===\n");

    let mut controller = NavigationController::builder("demo-view")
        .interceptor(site_policy)
        .record_decisions(true)
        .build();
    let mut engine = RecordingEngine::new();

    // Scenario 1: Insecure navigation is rejected
    println!("--- Scenario 1: Plain HTTP ---");
    let decision = controller.on_navigation_action(
        NavigationAction::main_frame("http://example.test/"),
        &mut engine,
    );
    println!("✓ http://example.test/ -> {}", decision);

    // Scenario 2: Missing header triggers a rewrite
    println!("\n--- Scenario 2: Header rewrite ---");
    let decision = controller.on_navigation_action(
        NavigationAction::main_frame("https://example.test/"),
        &mut engine,
    );
    println!("✓ https://example.test/ -> {}", decision);
    for directive in engine.take() {
        println!("  engine received: {:?}", directive);
    }

    // Scenario 3: The engine replays the rewritten load
    println!("\n--- Scenario 3: Corrective load ---");
    let replay =
        NavigationAction::main_frame("https://example.test/").with_header("X-Embedded", "1");
    let events = [
        EngineEvent::NavigationAction(replay),
        EngineEvent::ProvisionalStart {
            url: Some("https://example.test/".to_string()),
        },
        EngineEvent::Commit,
        EngineEvent::Finish {
            url: Some("https://example.test/".to_string()),
            title: Some("Example".to_string()),
            can_go_back: true,
            can_go_forward: false,
        },
    ];
    for event in events {
        let name = event.name();
        if let Some(decision) = controller.handle(event, &mut engine) {
            println!("✓ {} -> {}", name, decision);
        } else {
            println!("✓ {} handled", name);
        }
    }

    // Scenario 4: Inspect host-visible state
    println!("\n--- Scenario 4: View state ---");
    let snapshot = controller.snapshot();
    println!("load state: {}", snapshot.load_state);
    println!("title: {:?}", snapshot.page_title);
    println!("capabilities: {:?}", snapshot.capabilities);

    if let Some(trail) = controller.trail() {
        println!("\n--- Decisions ---");
        for event in trail.events() {
            println!("{}", event);
        }
        println!("policy calls: {}", trail.policy_calls());
    }
}
