//! Decision trail demonstration.
//!
//! This example shows what the decision trail records for each way a
//! navigation action can be resolved, including a failing policy.
//!
//! Run with: `cargo run --example decision_trail`

use webnav_core::{
    InterceptVerdict, NavigationAction, NavigationController, PendingRequest, PolicyFault,
    RecordingEngine,
};

fn main() {
    println!("=== Decision Trail Example ===\n");

    let policy = |req: &PendingRequest| -> Result<InterceptVerdict, PolicyFault> {
        if req.url().contains("broken") {
            Err(PolicyFault::failed("no rule matches"))
        } else if req.url().contains("ads") {
            Ok(InterceptVerdict::Reject)
        } else {
            Ok(InterceptVerdict::Allow)
        }
    };

    let mut controller = NavigationController::builder("trail-view")
        .interceptor(policy)
        .record_decisions(true)
        .build();
    let mut engine = RecordingEngine::new();

    let actions = vec![
        NavigationAction::main_frame("https://news.test/"),
        NavigationAction::subframe("https://ads.test/banner"),
        NavigationAction::main_frame("https://ads.test/landing"),
        NavigationAction::default(),
        NavigationAction::main_frame("https://broken.test/")
            .with_header("Authorization", "Bearer secret-token"),
    ];

    for action in actions {
        controller.on_navigation_action(action, &mut engine);
    }

    if let Some(trail) = controller.trail() {
        for event in trail.events() {
            println!("{}", event);
        }
    }

    println!("\n--- Policy failures ---");
    for error in controller.take_intercept_errors() {
        println!("✗ {}", error);
    }

    println!("\n=== Key Takeaways ===");
    println!("1. Sub-frame and URL-less actions never reach the policy");
    println!("2. A failing policy cancels the navigation");
    println!("3. Header values never appear in decision records");
}
