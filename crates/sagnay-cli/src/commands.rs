use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::{debug, info_span};

use sagnay_cli::ingest::{into_records, load_records};
use sagnay_export::{CommandSpec, ExportService, HostTarget, ReportOptions};
use sagnay_model::{ExportOutcome, ExportSettings, MissingFieldPolicy, RecordKind};

use crate::cli::ExportArgs;

const DEFAULT_STEM: &str = "export";

pub fn run_layouts() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Column", "Key", "Type", "Width"]);
    apply_table_style(&mut table);
    for kind in RecordKind::ALL {
        for column in kind.layout().columns {
            table.add_row(vec![
                kind.to_string(),
                column.label.to_string(),
                column.key.to_string(),
                column.class.label().to_string(),
                column.width.to_string(),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

pub fn run_export(args: &ExportArgs, config: Option<&Path>) -> Result<ExportOutcome> {
    let settings = build_settings(args, config)?;
    let rows = load_records(&args.input)?;
    let records = into_records(rows, args.kind.declared());

    let span = info_span!("cli_export", input = %args.input.display());
    let _guard = span.enter();

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| settings.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let target = host_target(output_dir, &settings, args.no_open);
    let filename = output_stem(args);
    debug!(%filename, kind = %records.kind, "export prepared");

    let mut options = ReportOptions::new();
    if let Some(title) = &args.title {
        options = options.with_title(title.as_str());
    }
    if let Some(company) = &args.company {
        options = options.with_company_name(company.as_str());
    }

    let service = ExportService::with_settings(target, settings);
    Ok(service.export(
        args.format.into(),
        &records,
        &args.headers,
        &filename,
        &options,
    ))
}

/// Settings file first, then command-line overrides.
fn build_settings(args: &ExportArgs, config: Option<&Path>) -> Result<ExportSettings> {
    let mut settings = match config {
        Some(path) => ExportSettings::load(path)
            .with_context(|| format!("load settings from {}", path.display()))?,
        None => ExportSettings::default(),
    };
    if args.strict {
        settings.missing_fields = MissingFieldPolicy::Strict;
    }
    if let Some(company) = &args.company {
        settings = settings.with_company_name(company.as_str());
    }
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn host_target(output_dir: PathBuf, settings: &ExportSettings, no_open: bool) -> HostTarget {
    let clipboard = match &settings.clipboard_command {
        Some(argv) => CommandSpec::from_argv(argv),
        None => Some(CommandSpec::platform_clipboard()),
    };
    let opener = if no_open {
        None
    } else {
        match &settings.open_command {
            Some(argv) => CommandSpec::from_argv(argv),
            None => Some(CommandSpec::platform_opener()),
        }
    };
    HostTarget::new(output_dir)
        .with_clipboard(clipboard)
        .with_opener(opener)
}

fn output_stem(args: &ExportArgs) -> String {
    args.name.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or(DEFAULT_STEM)
            .to_string()
    })
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::cli::{FormatArg, KindArg};

    fn args(format: FormatArg, input: PathBuf, output_dir: &Path) -> ExportArgs {
        ExportArgs {
            format,
            input,
            kind: KindArg::Auto,
            headers: Vec::new(),
            name: None,
            output_dir: Some(output_dir.to_path_buf()),
            title: None,
            company: None,
            strict: false,
            no_open: true,
            json: false,
        }
    }

    #[test]
    fn exports_csv_named_after_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("harvest.json");
        fs::write(
            &input,
            r#"[{"name": "Rice", "category": "Grains", "price": 150, "stock": 20,
                 "status": "active", "sales": 5, "rating": 4.5}]"#,
        )
        .unwrap();

        let outcome = run_export(&args(FormatArg::Csv, input, dir.path()), None).unwrap();
        assert!(outcome.success, "{}", outcome.message);
        let csv = fs::read_to_string(dir.path().join("harvest.csv")).unwrap();
        assert_eq!(
            csv.lines().nth(1),
            Some(r#""Rice","Grains","₱150","20","active","5","4.5""#)
        );
    }

    #[test]
    fn strict_flag_reports_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stock.csv");
        fs::write(&input, "name,sku,category\nDried Mango,DM-014,Fruits\n").unwrap();

        let mut strict = args(FormatArg::Excel, input, dir.path());
        strict.strict = true;
        let outcome = run_export(&strict, None).unwrap();
        assert!(!outcome.success);
        assert!(outcome.message.contains("(inventory) is missing field 'stock'"));
        assert!(!dir.path().join("stock.xlsx").exists());
    }

    #[test]
    fn print_without_opener_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("customers.json");
        fs::write(&input, r#"[{"name": "Ana Reyes", "email": "ana@example.com"}]"#).unwrap();

        let mut print = args(FormatArg::Print, input, dir.path());
        print.title = Some("Customer List".to_string());
        let outcome = run_export(&print, None).unwrap();
        assert!(outcome.success, "{}", outcome.message);
        let html = fs::read_to_string(dir.path().join("customer-list.html")).unwrap();
        assert!(html.contains("<th>Email</th>"));
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("x.json");
        fs::write(&input, "[]").unwrap();
        let config = dir.path().join("missing.json");
        let err = run_export(&args(FormatArg::Csv, input, dir.path()), Some(&config)).unwrap_err();
        assert!(err.to_string().starts_with("load settings from"));
    }
}
