//! The built-in catalog against a scripted stand-in for the live site.
//!
//! The stand-in transliterates a fixed Thanglish vocabulary word by word and
//! renders its output 1.8s after Enter, inside the settle budget. Timing runs
//! on a paused tokio clock.

#![allow(clippy::unwrap_used)]

use std::time::Duration;
use thanglish_probe::prelude::*;

const URL: &str = "https://tamil.example/";

const VOCABULARY: &[(&str, &str)] = &[
    ("kaalai", "காலை"),
    ("vanakkam", "வணக்கம்"),
    ("amma", "அம்மா"),
    ("konjam", "கொஞ்சம்"),
    ("kudunga", "குடுங்க"),
    ("sapadu", "சாப்பாடு"),
    ("saaptiya", "சாப்டியா"),
    ("naan", "நான்"),
    ("varala", "வரல"),
    ("netru", "நேற்று"),
    ("ezhudhinen", "எழுதினேன்"),
    ("naalai", "நாளை"),
    ("mazhai", "மழை"),
    ("innaiku", "இன்னைக்கு"),
    ("seekiram", "சீக்கிரம்"),
    ("vaa", "வா"),
    ("naanga", "நாங்க"),
    ("vendam", "வேண்டாம்"),
    ("dei", "டேய்"),
    ("ungalukku", "உங்களுக்கு"),
    ("varalaya", "வரலையா"),
    ("nandri", "நன்றி"),
];

fn site() -> ScriptedSite {
    ScriptedSite::new(URL)
        .with_dictionary(VOCABULARY.iter().copied())
        .with_region_delay(Duration::from_millis(400))
        .with_render_latency(Duration::from_millis(1800))
}

fn harness() -> TestHarness {
    TestHarness::new(Translator::new(URL))
}

#[tokio::test(start_paused = true)]
async fn catalog_passes_except_phonetic_false_negative() {
    let source = ScriptedPageSource::new(site());
    let report = harness().run(&source, &thanglish_suite()).await;

    assert_eq!(report.total(), 40);
    assert_eq!(report.passed(), 39, "{}", report.to_text());
    assert_eq!(report.errored(), 0);

    // "naan" is genuine Thanglish, so a phonetic transliterator converts it
    // and the "no Tamil script" predicate cannot hold.
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].id, "neg-07");
    assert_eq!(failures[0].status, ScenarioStatus::Failed);
    assert_eq!(failures[0].outputs, vec!["நான் hari lassan venum".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn every_scenario_gets_its_own_page() {
    let source = ScriptedPageSource::new(site());
    let suite = thanglish_suite();
    harness().run(&source, &suite).await;
    assert_eq!(source.pages_opened(), suite.len());
}

#[tokio::test(start_paused = true)]
async fn refresh_scenario_reads_latest_commit() {
    let source = ScriptedPageSource::new(site());
    let suite = thanglish_suite().filter("pos-25");
    let report = harness().run(&source, &suite).await;

    let result = &report.results[0];
    assert_eq!(result.status, ScenarioStatus::Passed);
    assert_eq!(
        result.outputs,
        vec!["வணக்கம்".to_string(), "நன்றி".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn settle_shorter_than_latency_fails_positives() {
    let source = ScriptedPageSource::new(site());
    let translator = Translator::new(URL).with_settle(Settle::fixed(500));
    let suite = thanglish_suite().with_polarity(Polarity::Positive).filter("pos-0");
    let report = TestHarness::new(translator).run(&source, &suite).await;

    // pos-01..pos-09 all read the stale empty output.
    assert_eq!(report.total(), 9);
    assert_eq!(report.failed(), 9);
    assert!(report.results.iter().all(|r| r.outputs == vec![String::new()]));
}

#[tokio::test(start_paused = true)]
async fn stable_settle_passes_catalog_in_parallel() {
    let source = ScriptedPageSource::new(site());
    let translator = Translator::new(URL).with_settle(Settle::Stable {
        min_wait_ms: 2000,
        poll_interval_ms: 100,
        stable_samples: 3,
        timeout_ms: 5000,
    });
    let report = TestHarness::new(translator)
        .with_jobs(8)
        .run(&source, &thanglish_suite())
        .await;

    assert_eq!(report.passed(), 39);
    let ids: Vec<_> = report.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"pos-01"));
    assert_eq!(ids.last(), Some(&"neg-15"));
}

#[tokio::test(start_paused = true)]
async fn unreachable_site_errors_every_scenario() {
    let source = ScriptedPageSource::new(site().unreachable());
    let report = harness().run(&source, &thanglish_suite()).await;
    assert_eq!(report.errored(), 40);
    assert!(report
        .results
        .iter()
        .all(|r| r.error_kind.as_deref() == Some("navigation")));
}

#[tokio::test(start_paused = true)]
async fn yaml_suite_runs_like_builtin() {
    let yaml = thanglish_suite().filter("neg-0").to_yaml().unwrap();
    let suite = TestSuite::from_yaml_str(&yaml).unwrap();
    let source = ScriptedPageSource::new(site());
    let report = harness().run(&source, &suite).await;
    assert_eq!(report.total(), 9);
    assert_eq!(report.failed(), 1);
}
