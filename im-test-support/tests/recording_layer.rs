//! Direct tests of `RecordingLayer`'s span and event capture, independent of
//! any `im-core` instrumentation.

use anyhow::{Context, Result};
use im_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

type TestResult<T = ()> = Result<T>;

fn install(layer: RecordingLayer) -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::registry().with(layer).with(LevelFilter::TRACE);
    tracing::subscriber::set_default(subscriber)
}

#[test]
fn captures_a_closed_span_with_its_fields() -> TestResult {
    let layer = RecordingLayer::default();
    let _guard = install(layer.clone());

    {
        let span = tracing::info_span!("demo.span", n = 3, label = "seeds");
        let _entered = span.enter();
    }

    let spans = layer.spans();
    let span = spans
        .first()
        .context("expected exactly one recorded span")?;
    assert_eq!(span.name, "demo.span");
    assert_eq!(span.fields.get("n").map(String::as_str), Some("3"));
    assert_eq!(span.fields.get("label").map(String::as_str), Some("seeds"));
    Ok(())
}

#[test]
fn captures_an_event_with_its_level_and_fields() -> TestResult {
    let layer = RecordingLayer::default();
    let _guard = install(layer.clone());

    tracing::warn!(requested = 10, n = 3, code = "IM_BUDGET_EXCEEDS_NODES", "clamping");

    let events = layer.events();
    let event = events
        .first()
        .context("expected exactly one recorded event")?;
    assert_eq!(event.level, tracing::Level::WARN);
    assert_eq!(
        event.fields.get("code").map(String::as_str),
        Some("IM_BUDGET_EXCEEDS_NODES")
    );
    Ok(())
}

#[rstest]
#[case(tracing::Level::DEBUG, "debug message")]
#[case(tracing::Level::WARN, "warn message")]
#[case(tracing::Level::ERROR, "error message")]
fn records_events_at_every_level(#[case] level: tracing::Level, #[case] message: &str) -> TestResult {
    let layer = RecordingLayer::default();
    let _guard = install(layer.clone());

    match level {
        tracing::Level::DEBUG => tracing::debug!("{message}"),
        tracing::Level::WARN => tracing::warn!("{message}"),
        tracing::Level::ERROR => tracing::error!("{message}"),
        _ => unreachable!("only DEBUG/WARN/ERROR are exercised by this case list"),
    }

    let events = layer.events();
    let event = events
        .first()
        .context("expected exactly one recorded event")?;
    assert_eq!(event.level, level);
    Ok(())
}

#[test]
fn events_accumulate_across_multiple_emissions() -> TestResult {
    let layer = RecordingLayer::default();
    let _guard = install(layer.clone());

    tracing::info!(i = 0, "first");
    tracing::info!(i = 1, "second");
    tracing::info!(i = 2, "third");

    let events = layer.events();
    assert_eq!(events.len(), 3);
    Ok(())
}
