use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use aqua_ingest::{load_dataset, write_csv_atomic};
use aqua_model::{ImputeStrategy, PreprocessOptions, ScalingMode};
use aqua_track::{Tracker, TrackingConfig};
use aqua_transform::{apply_pipeline, load_pipeline, preprocess};

use crate::cli::{ApplyArgs, RunArgs};
use crate::pipeline::{TrackInput, persist, track};
use crate::summary::apply_table_style;
use crate::types::{ApplyReport, RunReport};

pub fn run_preprocess(args: &RunArgs) -> Result<RunReport> {
    let strategy: ImputeStrategy = args.impute_method.parse()?;
    let options = PreprocessOptions::new()
        .with_label_column(args.label_column.as_str())
        .with_strategy(strategy)
        .with_fill_value(args.fill_value)
        .with_scaling(if args.scale {
            ScalingMode::Standard
        } else {
            ScalingMode::Skip
        });

    // =========================================================================
    // Stage 1: Load
    // =========================================================================
    let load_span = info_span!("load", dataset = %args.dataset.display());
    let load_start = Instant::now();
    let frame = load_span
        .in_scope(|| load_dataset(&args.dataset))
        .with_context(|| format!("load {}", args.dataset.display()))?;
    info!(
        rows = frame.height(),
        columns = frame.width(),
        duration_ms = load_start.elapsed().as_millis(),
        "load complete"
    );

    // =========================================================================
    // Stage 2: Preprocess
    // =========================================================================
    let fit_span = info_span!("preprocess", strategy = %strategy);
    let fit_start = Instant::now();
    let outcome = fit_span
        .in_scope(|| preprocess(&frame, &options))
        .context("preprocess dataset")?;
    info!(
        missing_cells = outcome.missing.total_missing(),
        imputed_columns = outcome.missing.affected().count(),
        scaled = args.scale,
        duration_ms = fit_start.elapsed().as_millis(),
        "preprocess complete"
    );

    let mut report = RunReport {
        dataset: args.dataset.clone(),
        dataset_version: args.dataset_version.clone(),
        rows: outcome.cleaned.height(),
        feature_count: outcome.cleaned.width().saturating_sub(1),
        missing_cells: outcome.missing.total_missing(),
        imputed_columns: outcome
            .missing
            .affected()
            .map(|column| column.name.clone())
            .collect(),
        strategy: strategy.as_str().to_string(),
        scaled: args.scale,
        output_path: args.output_path.clone(),
        pipeline_path: args.pipeline_path.clone(),
        wrote_output: false,
        wrote_pipeline: false,
        run_id: None,
        dry_run: args.dry_run,
    };

    if args.dry_run {
        info!("dry run, skipping artifact writes and tracking");
        return Ok(report);
    }

    // =========================================================================
    // Stage 3: Persist
    // =========================================================================
    let persist_span = info_span!("persist", output = %args.output_path.display());
    let persist_start = Instant::now();
    let persisted = persist_span
        .in_scope(|| persist(&outcome, &args.output_path, &args.pipeline_path))
        .context("persist artifacts")?;
    info!(
        duration_ms = persist_start.elapsed().as_millis(),
        "persist complete"
    );
    report.wrote_output = true;
    report.wrote_pipeline = persisted.pipeline_path.is_some();

    // =========================================================================
    // Stage 4: Track
    // =========================================================================
    if !args.no_track {
        let mut config = TrackingConfig::default();
        if let Some(dir) = &args.store_dir {
            config.store_dir = dir.clone();
        }
        if let Some(name) = &args.experiment {
            config.experiment = name.clone();
        }
        let tracker = Tracker::new(config);
        let track_span = info_span!("track", experiment = %tracker.config().experiment);
        let track_start = Instant::now();
        let input = TrackInput {
            dataset: &args.dataset,
            dataset_version: &args.dataset_version,
            impute_method: strategy.as_str(),
            cleaned_path: &persisted.cleaned_path,
            pipeline_path: persisted.pipeline_path.as_deref(),
        };
        let run_id = track_span.in_scope(|| track(&tracker, None, &input))?;
        info!(
            run_id = %run_id,
            duration_ms = track_start.elapsed().as_millis(),
            "track complete"
        );
        report.run_id = Some(run_id);
    }

    Ok(report)
}

pub fn run_apply(args: &ApplyArgs) -> Result<ApplyReport> {
    let pipeline = load_pipeline(&args.pipeline)
        .with_context(|| format!("load pipeline {}", args.pipeline.display()))?;
    info!(stages = ?pipeline.stage_names(), "loaded pipeline");

    let frame = load_dataset(&args.dataset)
        .with_context(|| format!("load {}", args.dataset.display()))?;

    let apply_span = info_span!("apply", dataset = %args.dataset.display());
    let apply_start = Instant::now();
    let transformed = apply_span
        .in_scope(|| apply_pipeline(&frame, &pipeline, &args.label_column))
        .context("apply pipeline")?;
    write_csv_atomic(&transformed, &args.output_path)
        .with_context(|| format!("write {}", args.output_path.display()))?;
    info!(
        rows = transformed.height(),
        output = %args.output_path.display(),
        duration_ms = apply_start.elapsed().as_millis(),
        "apply complete"
    );

    Ok(ApplyReport {
        pipeline: args.pipeline.clone(),
        dataset: args.dataset.clone(),
        output_path: args.output_path.clone(),
        rows: transformed.height(),
        stages: pipeline
            .stage_names()
            .iter()
            .map(|name| (*name).to_string())
            .collect(),
    })
}

pub fn run_strategies() {
    let mut table = Table::new();
    table.set_header(vec!["Strategy", "Description"]);
    apply_table_style(&mut table);
    for strategy in ImputeStrategy::ALL {
        let name = if strategy == ImputeStrategy::default() {
            format!("{} (default)", strategy.as_str())
        } else {
            strategy.as_str().to_string()
        };
        table.add_row(vec![name, strategy.description().to_string()]);
    }
    println!("{table}");
}
