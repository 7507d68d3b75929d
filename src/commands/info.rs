use crate::cli::{Cli, LookupArgs};
use crate::domain::models::{AppRecord, BatchEntry, BatchReport, SummaryRow};
use crate::gallery::{Gallery, LookupError, LookupObserver};
use crate::services::batch::{parse_id_list, run_batch};
use crate::services::config::Settings;
use crate::services::observer::{FailureLog, TracingObserver};
use crate::services::output::{print_one, render_summary};
use crate::services::summary::SummaryLog;
use std::path::Path;
use tracing::{info, warn};

fn success_status(verb: &str) -> String {
    format!("{}_success", verb)
}

fn failed_status(verb: &str, err: &LookupError) -> String {
    format!("{}_failed: {}", verb, err.error)
}

fn summary_row(verb: &str, app_id: &str, result: &Result<AppRecord, LookupError>) -> SummaryRow {
    match result {
        Ok(record) => SummaryRow::from_record(record, &success_status(verb)),
        Err(err) => SummaryRow::failed(app_id, &failed_status(verb, err)),
    }
}

fn write_record_file(path: &Path, record: &AppRecord) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(record)?)?;
    Ok(())
}

/// Handles `info` and `download`; both run the same lookup and differ only in
/// the status recorded in the summary.
pub fn handle_info_command(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    let Some((verb, args)) = cli.command.lookup() else {
        return Ok(false);
    };
    let LookupArgs {
        app_id,
        bulk,
        threads,
        output,
    } = args;

    let gallery = settings.gallery()?;
    let summary = SummaryLog::new(&settings.summary_path);
    let observer = (TracingObserver, FailureLog::new(&settings.failure_log));

    if let Some(bulk) = bulk {
        let raw = std::fs::read_to_string(bulk).map_err(|e| {
            observer
                .1
                .error(&format!("bulk file '{}' cannot be read: {}", bulk.display(), e));
            anyhow::anyhow!("bulk file '{}' cannot be read: {}", bulk.display(), e)
        })?;
        let ids = parse_id_list(&raw);
        let workers = threads.unwrap_or_else(|| settings.workers()).max(1);
        run_bulk(cli, verb, &gallery, &observer, &summary, &ids, workers)?;
        return Ok(true);
    }

    let Some(app_id) = app_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        observer.1.error("no app_id provided and --bulk not specified");
        anyhow::bail!("no app_id provided and --bulk not specified");
    };

    let result = gallery.fetch_single_app(app_id, &observer);
    summary.append(&summary_row(verb, app_id, &result))?;
    let record = result?;

    if let Some(path) = output {
        write_record_file(path, &record)?;
        info!(path = %path.display(), "result written");
    }
    print_one(cli.json, record, render_summary)?;
    Ok(true)
}

fn run_bulk(
    cli: &Cli,
    verb: &str,
    gallery: &Gallery,
    observer: &dyn LookupObserver,
    summary: &SummaryLog,
    ids: &[String],
    workers: usize,
) -> anyhow::Result<()> {
    info!(verb, count = ids.len(), workers, "starting bulk lookup");

    let outcomes = run_batch(ids, workers, |id| {
        let result = gallery.fetch_single_app(id, observer);
        if let Err(e) = summary.append(&summary_row(verb, id, &result)) {
            warn!(app_id = id, error = %e, "cannot append summary row");
        }
        if !cli.json {
            if let Ok(record) = &result {
                println!("{}\n", render_summary(record));
            }
        }
        result
    });

    let results: Vec<BatchEntry> = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            Ok(record) => BatchEntry {
                app_id: record.app_id.clone(),
                status: success_status(verb),
                record: Some(record),
                error: None,
                error_kind: None,
            },
            Err(err) => BatchEntry {
                app_id: err.app_id.clone(),
                status: failed_status(verb, &err),
                record: None,
                error: Some(err.error.to_string()),
                error_kind: Some(err.kind().to_string()),
            },
        })
        .collect();

    let failed = results.iter().filter(|r| r.record.is_none()).count();
    let report = BatchReport {
        total: results.len(),
        succeeded: results.len() - failed,
        failed,
        results,
    };
    info!(
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failed,
        "bulk lookup finished"
    );

    let summary_path = summary.path().display().to_string();
    print_one(cli.json, report, |r| {
        format!(
            "{} succeeded, {} failed (summary: {})",
            r.succeeded, r.failed, summary_path
        )
    })
}
