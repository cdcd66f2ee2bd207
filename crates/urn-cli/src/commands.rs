use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info_span;

use urn_cli::pipeline::{PatchRequest, PatchRun, load_snapshot, lookup_point, region_rows, run_patch};
use urn_cli::settings::Settings;
use urn_model::GridPoint;

use crate::cli::{LookupArgs, PatchArgs, RegionsArgs};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

pub fn run_patch_command(args: &PatchArgs) -> Result<PatchRun> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path).context("load settings")?,
        None => Settings::default(),
    };
    if let Some(worldspace) = &args.worldspace {
        settings.patch.worldspace.clone_from(worldspace);
    }
    if args.no_clip {
        settings.patch.clip_to_bounds = false;
    }
    settings.validate()?;

    let span = info_span!("run", snapshot = %args.snapshot.display());
    let _guard = span.enter();
    let request = PatchRequest {
        snapshot: args.snapshot.clone(),
        settings,
        output: args.output.clone(),
        dry_run: args.dry_run,
    };
    run_patch(&request)
}

pub fn run_regions(args: &RegionsArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let worldspace = snapshot.worldspace(&args.worldspace)?;
    let rows = region_rows(worldspace, !args.no_clip);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Form Key"),
        header_cell("Areas"),
        header_cell("Cells"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        let cells = if row.cells == 0 {
            dim_cell(0)
        } else {
            Cell::new(row.cells)
        };
        table.add_row(vec![
            Cell::new(row.label),
            Cell::new(row.region),
            Cell::new(row.areas),
            cells,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_lookup(args: &LookupArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let worldspace = snapshot.worldspace(&args.worldspace)?;
    let point = GridPoint::new(args.x, args.y);
    let labels = lookup_point(worldspace, !args.no_clip, point);
    if labels.is_empty() {
        println!("No regions cover {point}.");
    } else {
        for label in labels {
            println!("{label}");
        }
    }
    Ok(())
}
