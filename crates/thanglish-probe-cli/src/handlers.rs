//! Command handlers
//!
//! `run` and `translate` drive a real browser; the rest work offline.

use crate::commands::{ClassifyArgs, ConfigArgs, ListArgs, ListFormatArg, RunArgs, TranslateArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use std::fmt::Write as _;
use std::path::Path;
use thanglish_probe::{contains_tamil_script, tamil_letter_count, thanglish_suite, TestSuite};

/// Built-in catalog or `path`, narrowed by `filter`
pub fn load_suite(path: Option<&Path>, filter: Option<&str>) -> CliResult<TestSuite> {
    let suite = match path {
        Some(path) => TestSuite::from_path(path)?,
        None => thanglish_suite(),
    };
    Ok(match filter {
        Some(pattern) => suite.filter(pattern),
        None => suite,
    })
}

/// Scenario listing in `format`
pub fn render_listing(suite: &TestSuite, format: ListFormatArg) -> CliResult<String> {
    match format {
        ListFormatArg::Yaml => Ok(suite.to_yaml()?),
        ListFormatArg::Text => {
            let mut out = String::new();
            for s in &suite.scenarios {
                let _ = writeln!(out, "{:<8} {:<8} {}", s.id, s.polarity, s.title);
            }
            let _ = writeln!(out, "{} scenarios", suite.len());
            Ok(out)
        }
    }
}

/// Tamil-script verdict for `text`
#[must_use]
pub fn classify(text: &str) -> String {
    if contains_tamil_script(text) {
        format!("tamil script: yes ({} letters)", tamil_letter_count(text))
    } else {
        "tamil script: no".to_string()
    }
}

/// `list`
pub fn run_list(args: &ListArgs) -> CliResult<()> {
    let suite = load_suite(args.suite.as_deref(), args.filter.as_deref())?;
    print!("{}", render_listing(&suite, args.format)?);
    Ok(())
}

/// `classify`
pub fn run_classify(args: &ClassifyArgs) {
    println!("input:        {}", args.text);
    println!("{}", classify(&args.text));
}

/// `config`
pub fn run_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let probe = config.probe_config(&args.target)?;
    print!("{}", probe.to_yaml()?);
    Ok(())
}

/// `run`
pub fn run_suite(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let probe = config.probe_config(&args.target)?;
    let suite = load_suite(args.suite.as_deref(), args.filter.as_deref())?;
    if suite.is_empty() {
        return Err(CliError::invalid_argument(match &args.filter {
            Some(pattern) => format!("no scenarios match \"{pattern}\""),
            None => format!("suite {} has no scenarios", suite.name),
        }));
    }
    browser::run_suite(config, args, &probe, &suite)
}

/// `translate`
pub fn run_translate(config: &CliConfig, args: &TranslateArgs) -> CliResult<()> {
    let probe = config.probe_config(&args.target)?;
    browser::translate(&probe, &args.text)
}

#[cfg(feature = "browser")]
fn runtime() -> CliResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

#[cfg(feature = "browser")]
mod browser {
    use super::{classify, runtime, CliConfig, CliError, CliResult, ProgressReporter, RunArgs};
    use thanglish_probe::{Browser, PageDriver, ProbeConfig, ReportFormat, TestHarness, TestSuite};
    use tracing::warn;

    pub fn run_suite(
        config: &CliConfig,
        args: &RunArgs,
        probe: &ProbeConfig,
        suite: &TestSuite,
    ) -> CliResult<()> {
        let format: ReportFormat = args.format.into();
        let mut reporter =
            ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
        reporter.header(&format!("{} @ {}", suite.name, probe.target_url));

        let report = runtime()?.block_on(async {
            let browser = Browser::launch(probe.browser.clone()).await?;
            let harness = TestHarness::new(probe.translator())
                .with_jobs(args.jobs)
                .with_fail_fast(args.fail_fast);

            reporter.start(suite.len(), &suite.name);
            let report = harness
                .run_with(&browser, suite, |result| reporter.record(result))
                .await;
            reporter.finish();

            if let Err(e) = browser.close().await {
                reporter.warning(&format!("browser did not close cleanly: {e}"));
            }
            Ok::<_, CliError>(report)
        })?;

        match &args.output {
            Some(path) => {
                report.write_to(path, format)?;
                reporter.info(&format!("report written to {}", path.display()));
            }
            None => print!("{}", report.render(format)?),
        }
        reporter.summary(&report);

        if report.all_passed() {
            Ok(())
        } else {
            Err(CliError::ScenariosFailed {
                failed: report.total() - report.passed(),
                total: report.total(),
            })
        }
    }

    pub fn translate(probe: &ProbeConfig, text: &str) -> CliResult<()> {
        let output = runtime()?.block_on(async {
            let browser = Browser::launch(probe.browser.clone()).await?;
            let mut page = browser.new_page().await?;
            let output = probe.translator().translate(&mut page, text).await;
            if let Err(e) = page.close().await {
                warn!(error = %e, "page did not close cleanly");
            }
            if let Err(e) = browser.close().await {
                warn!(error = %e, "browser did not close cleanly");
            }
            Ok::<_, CliError>(output?)
        })?;

        println!("input:        {text}");
        println!("output:       {output}");
        println!("{}", classify(&output));
        Ok(())
    }
}

#[cfg(not(feature = "browser"))]
mod browser {
    use super::{CliConfig, CliError, CliResult, RunArgs};
    use thanglish_probe::{ProbeConfig, TestSuite};

    fn unavailable() -> CliError {
        CliError::config("built without the browser feature; rebuild with --features browser")
    }

    pub fn run_suite(
        _config: &CliConfig,
        _args: &RunArgs,
        _probe: &ProbeConfig,
        _suite: &TestSuite,
    ) -> CliResult<()> {
        Err(unavailable())
    }

    pub fn translate(_probe: &ProbeConfig, _text: &str) -> CliResult<()> {
        Err(unavailable())
    }
}
