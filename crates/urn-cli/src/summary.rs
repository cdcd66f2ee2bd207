use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use urn_cli::pipeline::PatchRun;

pub fn print_summary(run: &PatchRun) {
    println!("Worldspace: {} ({})", run.worldspace_label, run.worldspace);
    println!(
        "Index: {} grid points across {} regions",
        run.indexed_points, run.indexed_regions
    );
    match &run.written {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: dry run, nothing written"),
    }

    let summary = &run.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Cells")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Interior", summary.interior, Color::DarkGrey),
        ("Missing grid", summary.missing_grid, Color::Yellow),
        ("Other worldspace", summary.other_worldspace, Color::DarkGrey),
        ("Persistent", summary.persistent, Color::DarkGrey),
        ("No region data", summary.no_region_data, Color::DarkGrey),
        ("No new regions", summary.no_new_regions, Color::DarkGrey),
    ];
    for (label, count, color) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, color)]);
    }
    table.add_row(vec![
        Cell::new("Patched").fg(Color::Green),
        count_cell(summary.changed, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.visited).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if summary.regions_added > 0 {
        println!("Regions added: {}", summary.regions_added);
    }
    println!("{}", summary.summary_line());
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell<T: ToString + Default + PartialEq>(count: T, color: Color) -> Cell {
    if count == T::default() {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}
