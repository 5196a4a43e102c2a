// Resolver tests.

use super::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error_handling::OutcomeType;

/// Strategy with a canned outcome and a call counter.
struct MockStrategy {
    name: &'static str,
    priority: u32,
    outcome: StrategyOutcome,
    panics: bool,
    calls: Arc<AtomicUsize>,
}

impl MockStrategy {
    fn new(name: &'static str, priority: u32, outcome: StrategyOutcome) -> Self {
        Self {
            name,
            priority,
            outcome,
            panics: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn panicking(name: &'static str, priority: u32) -> Self {
        Self {
            panics: true,
            ..Self::new(name, priority, StrategyOutcome::NotFound)
        }
    }

    fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Strategy for MockStrategy {
    fn name(&self) -> &str {
        self.name
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    async fn invoke(&self, _source_url: &str) -> StrategyOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("selector table corrupted");
        }
        self.outcome.clone()
    }
}

fn found(url: &str) -> StrategyOutcome {
    StrategyOutcome::found(url, None)
}

#[tokio::test]
async fn test_first_success_short_circuits() {
    let first = MockStrategy::new("first", 1, found("https://a/1.mp4"));
    let second = MockStrategy::new("second", 2, found("https://a/2.mp4"));
    let third = MockStrategy::new("third", 3, StrategyOutcome::NotFound);
    let (c1, c2, c3) = (first.calls(), second.calls(), third.calls());

    let mut resolver = Resolver::new();
    resolver.register(Arc::new(first));
    resolver.register(Arc::new(second));
    resolver.register(Arc::new(third));

    let result = resolver.resolve("https://share/x").await;
    assert!(result.success);
    assert_eq!(result.method.as_deref(), Some("first"));
    assert_eq!(result.media_url.as_deref(), Some("https://a/1.mp4"));
    assert_eq!(result.error, None);
    assert_eq!(c1.load(Ordering::SeqCst), 1);
    assert_eq!(c2.load(Ordering::SeqCst), 0);
    assert_eq!(c3.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_falls_through_to_later_strategy() {
    let first = MockStrategy::new("first", 1, StrategyOutcome::NotFound);
    let second = MockStrategy::new(
        "second",
        2,
        StrategyOutcome::upstream_error("HTTP request timeout: deadline elapsed"),
    );
    let third = MockStrategy::new("third", 3, found("https://a/3.mp4"));
    let c3 = third.calls();

    let mut resolver = Resolver::new();
    resolver.register(Arc::new(first));
    resolver.register(Arc::new(second));
    resolver.register(Arc::new(third));

    let result = resolver.resolve("https://share/x").await;
    assert!(result.success);
    assert_eq!(result.method.as_deref(), Some("third"));
    assert_eq!(c3.load(Ordering::SeqCst), 1);
    assert_eq!(result.http_status(), 200);
}

#[tokio::test]
async fn test_priority_order_independent_of_registration() {
    let late = MockStrategy::new("late", 30, found("https://a/late.mp4"));
    let early = MockStrategy::new("early", 5, found("https://a/early.mp4"));
    let late_calls = late.calls();

    let mut resolver = Resolver::new();
    resolver.register(Arc::new(late));
    resolver.register(Arc::new(early));

    assert_eq!(resolver.strategy_names(), vec!["early", "late"]);
    let result = resolver.resolve("https://share/x").await;
    assert_eq!(result.method.as_deref(), Some("early"));
    assert_eq!(late_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_equal_priority_keeps_registration_order() {
    let mut resolver = Resolver::new();
    resolver.register(Arc::new(MockStrategy::new("b", 10, StrategyOutcome::NotFound)));
    resolver.register(Arc::new(MockStrategy::new("a", 10, StrategyOutcome::NotFound)));
    resolver.register(Arc::new(MockStrategy::new("z", 1, StrategyOutcome::NotFound)));
    assert_eq!(resolver.strategy_names(), vec!["z", "b", "a"]);
}

#[tokio::test]
async fn test_empty_input_skips_strategies() {
    let only = MockStrategy::new("only", 1, found("https://a/1.mp4"));
    let calls = only.calls();
    let mut resolver = Resolver::new();
    resolver.register(Arc::new(only));

    for input in ["", "   ", "\t\n "] {
        let result = resolver.resolve(input).await;
        assert!(!result.success);
        assert_eq!(result.failure, Some(ResolveFailure::MissingInput));
        assert_eq!(result.error.as_deref(), Some("No URL provided"));
        assert_eq!(result.http_status(), 400);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_all_strategies_fail() {
    let mut resolver = Resolver::new();
    resolver.register(Arc::new(MockStrategy::new(
        "ssstik.io",
        1,
        StrategyOutcome::NotFound,
    )));
    resolver.register(Arc::new(MockStrategy::new(
        "tikcdn.io",
        2,
        StrategyOutcome::upstream_error("HTTP connection error"),
    )));

    let result = resolver.resolve("  https://share/x  ").await;
    assert!(!result.success);
    assert_eq!(result.media_url, None);
    assert_eq!(result.method, None);
    assert_eq!(result.failure, Some(ResolveFailure::Exhausted));
    assert_eq!(result.http_status(), 502);
    assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
    let detail = result.detail.expect("detail names attempted strategies");
    assert!(detail.contains("ssstik.io, tikcdn.io"));
}

#[tokio::test]
async fn test_no_strategies_registered() {
    let resolver = Resolver::new();
    let result = resolver.resolve("https://share/x").await;
    assert_eq!(result.failure, Some(ResolveFailure::Exhausted));
    assert_eq!(result.detail.as_deref(), Some("No strategies are registered."));
}

#[tokio::test]
async fn test_panicking_strategy_is_contained() {
    let broken = MockStrategy::panicking("broken", 1);
    let healthy = MockStrategy::new("healthy", 2, found("https://a/ok.mp4"));
    let (broken_calls, healthy_calls) = (broken.calls(), healthy.calls());
    let stats = Arc::new(ProcessingStats::new());

    let mut resolver = Resolver::new().with_stats(Arc::clone(&stats));
    resolver.register(Arc::new(broken));
    resolver.register(Arc::new(healthy));

    let result = resolver.resolve("https://share/x").await;
    assert!(result.success);
    assert_eq!(result.method.as_deref(), Some("healthy"));
    assert_eq!(broken_calls.load(Ordering::SeqCst), 1);
    assert_eq!(healthy_calls.load(Ordering::SeqCst), 1);
    assert_eq!(stats.get_error_count(ErrorType::StrategyPanic), 1);
    assert_eq!(stats.get_outcome_count(OutcomeType::UpstreamError), 1);
    assert_eq!(stats.get_outcome_count(OutcomeType::Found), 1);
}

#[tokio::test]
async fn test_empty_found_url_is_not_success() {
    let mut resolver = Resolver::new();
    resolver.register(Arc::new(MockStrategy::new("blank", 1, found("  "))));
    let result = resolver.resolve("https://share/x").await;
    assert!(!result.success);
    assert_eq!(result.media_url, None);
}

#[tokio::test]
async fn test_found_url_is_trimmed() {
    let mut resolver = Resolver::new();
    resolver.register(Arc::new(MockStrategy::new(
        "padded",
        1,
        found("  https://a/1.mp4 \n"),
    )));
    let result = resolver.resolve("https://share/x").await;
    assert!(result.success);
    assert_eq!(result.media_url.as_deref(), Some("https://a/1.mp4"));
}

#[tokio::test]
async fn test_stats_counted() {
    let stats = Arc::new(ProcessingStats::new());
    let mut resolver = Resolver::new().with_stats(Arc::clone(&stats));
    resolver.register(Arc::new(MockStrategy::new("a", 1, StrategyOutcome::NotFound)));

    resolver.resolve("").await;
    resolver.resolve("https://share/x").await;

    assert_eq!(stats.get_info_count(InfoType::ResolveRequested), 2);
    assert_eq!(stats.get_info_count(InfoType::ResolveMissingInput), 1);
    assert_eq!(stats.get_info_count(InfoType::ResolveExhausted), 1);
    assert_eq!(stats.get_outcome_count(OutcomeType::NotFound), 1);
}

#[test]
fn test_panic_message_payloads() {
    let static_str: Box<dyn Any + Send> = Box::new("static message");
    let owned: Box<dyn Any + Send> = Box::new(String::from("owned message"));
    let other: Box<dyn Any + Send> = Box::new(42_u8);
    assert_eq!(panic_message(static_str.as_ref()), "static message");
    assert_eq!(panic_message(owned.as_ref()), "owned message");
    assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
}

#[test]
fn test_result_serialization() {
    let result = ResolutionResult::found("tikcdn.io", "https://a/b.mp4?x=1&y=2".to_string())
        .with_proxy_link();
    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["success"], true);
    assert_eq!(json["method"], "tikcdn.io");
    assert_eq!(json["media_url"], "https://a/b.mp4?x=1&y=2");
    assert_eq!(
        json["proxy_url"],
        "/proxy?url=https%3A%2F%2Fa%2Fb.mp4%3Fx%3D1%26y%3D2"
    );
    assert!(json.get("error").is_none());
    assert!(json.get("failure").is_none());

    let failed = serde_json::to_value(ResolutionResult::missing_input()).expect("serialize");
    assert_eq!(failed["success"], false);
    assert_eq!(failed["error"], "No URL provided");
    assert!(failed.get("media_url").is_none());
}

#[test]
fn test_with_proxy_link_ignored_on_failure() {
    let result = ResolutionResult::exhausted(&["a".to_string()]).with_proxy_link();
    assert_eq!(result.proxy_url, None);
    assert_eq!(ResolutionResult::internal("boom".to_string()).http_status(), 500);
}
