use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result, anyhow, bail};
use importer_cli::logging::redact_value;
use importer_cli::overrides::resolve_column;
use importer_core::{Event, Importer, ImporterConfig, MemoryStepStore, PipelineState, Step};
use importer_ingest::read_file;
use importer_model::{EXAMPLE_CSV_FILE_NAME, FileData, ImportPayload, validate_template};
use serde_json::Value;
use tracing::{debug, info, info_span, trace, warn};

use crate::cli::{ImportArgs, InspectArgs, TemplateArgs};
use crate::types::{ColumnReport, ImportResult};

pub fn run_import(args: &ImportArgs) -> Result<ImportResult> {
    let span = info_span!("import", file = %args.file.display());
    let _guard = span.enter();

    let config = load_config(args)?;
    let delivered: Rc<RefCell<Option<ImportPayload>>> = Rc::default();
    let sink = Rc::clone(&delivered);
    let mut importer = Importer::new(
        &config,
        Box::new(MemoryStepStore::new()),
        move |payload: &ImportPayload| {
            *sink.borrow_mut() = Some(payload.clone());
        },
    )
    .context("start importer")?;

    // =========================================================================
    // Upload
    // =========================================================================
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    runtime.block_on(importer.upload(&args.file));
    fail_on_errors(importer.state()).context("upload failed")?;

    // =========================================================================
    // Header row
    // =========================================================================
    if importer.step() == Step::RowSelection {
        importer.dispatch(Event::SelectHeaderRow(args.header_row));
        importer.dispatch(Event::Next);
        fail_on_errors(importer.state()).context("select header row")?;
    } else if args.header_row != 0 {
        warn!(
            header_row = args.header_row,
            "--header-row is ignored when the header row selection is skipped"
        );
    }

    // =========================================================================
    // Mapping overrides
    // =========================================================================
    apply_overrides(&mut importer, args)?;

    let report = column_report(importer.state());
    importer.dispatch(Event::Submit);

    let state = importer.state();
    let errors = state.errors().to_vec();
    for error in &errors {
        warn!(code = error.code, "{error}");
    }
    let summary = state
        .mapping()
        .map(importer_map::MappingTable::summary)
        .ok_or_else(|| anyhow!("mapping step was not reached"))?;
    let header_row = state.header_row().unwrap_or_default();
    let notices = state.notices().to_vec();
    let file_name = state
        .file()
        .map(|file| file.file_name.clone())
        .unwrap_or_default();
    drop(importer);

    let payload = delivered.borrow_mut().take();
    if let Some(payload) = &payload {
        write_payload(payload, args.output.as_deref())?;
    }

    Ok(ImportResult {
        file_name,
        header_row,
        columns: report,
        summary,
        notices,
        errors,
        payload,
        output: args.output.clone(),
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<FileData> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let file = runtime
        .block_on(read_file(&args.file))
        .with_context(|| format!("read {}", args.file.display()))?;
    info!(rows = file.rows.len(), "inspected file");
    Ok(file)
}

pub fn run_template(args: &TemplateArgs) -> Result<PathBuf> {
    let raw = read_json(&args.template)?;
    let template = validate_template(&raw)
        .with_context(|| format!("validate template {}", args.template.display()))?;
    let csv = template.example_csv().context("render example CSV")?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(EXAMPLE_CSV_FILE_NAME));
    fs::write(&path, csv).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), columns = template.len(), "wrote example CSV");
    Ok(path)
}

fn load_config(args: &ImportArgs) -> Result<ImporterConfig> {
    let mut config = match (&args.config, &args.template) {
        (Some(path), _) => ImporterConfig::from_path(path)
            .with_context(|| format!("load config {}", path.display()))?,
        (None, Some(_)) => ImporterConfig::new(Value::Null),
        (None, None) => bail!("either --template or --config is required"),
    };
    if let Some(path) = &args.template {
        config.template = read_json(path)?;
    }
    if args.skip_header {
        config.skip_header_row_selection = true;
    }
    Ok(config)
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

fn apply_overrides(importer: &mut Importer, args: &ImportArgs) -> Result<()> {
    let columns = importer
        .state()
        .mapping()
        .map(|table| table.columns().to_vec())
        .ok_or_else(|| anyhow!("mapping step was not reached"))?;

    for entry in &args.map {
        let column = resolve_column(&columns, &entry.column)
            .ok_or_else(|| anyhow!("no uploaded column matches '{}'", entry.column))?;
        debug!(column, key = %entry.key, "mapping override");
        importer.dispatch(Event::SetMapping {
            column,
            key: entry.key.clone(),
        });
        fail_on_errors(importer.state())
            .with_context(|| format!("map '{}' to '{}'", entry.column, entry.key))?;
    }

    for selector in &args.exclude {
        let column = resolve_column(&columns, selector)
            .ok_or_else(|| anyhow!("no uploaded column matches '{selector}'"))?;
        debug!(column, "exclusion override");
        importer.dispatch(Event::SetInclusion {
            column,
            include: false,
        });
        fail_on_errors(importer.state()).with_context(|| format!("exclude '{selector}'"))?;
    }
    Ok(())
}

fn column_report(state: &PipelineState) -> Vec<ColumnReport> {
    let Some(table) = state.mapping() else {
        return Vec::new();
    };
    table
        .columns()
        .iter()
        .map(|column| {
            let mapping = table.mapping(column.index).filter(|m| m.is_mapped());
            if let Some(sample) = &column.sample {
                trace!(column = column.index, sample = redact_value(sample), "column sample");
            }
            ColumnReport {
                index: column.index,
                header: column.name.clone(),
                sample: column.sample.clone(),
                key: mapping.map(|m| m.key.clone()),
                required: mapping
                    .and_then(|m| table.template().column(&m.key))
                    .is_some_and(|c| c.required),
                included: mapping.is_some_and(|m| m.include),
                source: table.source(column.index),
            }
        })
        .collect()
}

fn fail_on_errors(state: &PipelineState) -> Result<()> {
    match state.errors() {
        [] => Ok(()),
        errors => Err(anyhow!(
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        )),
    }
}

fn write_payload(payload: &ImportPayload, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(payload).context("serialize payload")?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), rows = payload.num_rows, "wrote payload");
        }
        None => println!("{json}"),
    }
    Ok(())
}
