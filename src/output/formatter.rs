use comfy_table::modifiers::UTF8_SOLID_INNER_BORDERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::standings::{DriverStandings, TeamStandings};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Shorten given names to initials, keeping the last name.
/// "Lewis Carl Hamilton" -> "L. C. Hamilton"
pub fn abbreviate_name(name: &str) -> String {
    let mut parts: Vec<&str> = name.split(' ').collect();
    let last_name = parts.pop().unwrap_or_default();
    let mut abbreviated = String::new();
    for part in parts {
        if let Some(initial) = part.chars().next() {
            abbreviated.push(initial);
            abbreviated.push_str(". ");
        }
    }
    abbreviated.push_str(last_name);
    abbreviated
}

/// Season name line shown above the tables
pub fn format_heading(season: &str, use_colors: bool) -> String {
    if use_colors {
        season.bold().to_string()
    } else {
        season.to_string()
    }
}

fn header_cell(label: &str, use_colors: bool) -> Cell {
    let cell = Cell::new(label);
    if use_colors {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Outline box with solid inner borders and no separators between rows.
///
/// Styling is only emitted when asked for, so published text stays plain.
fn new_table(headers: &[&str], use_colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_header(
            headers
                .iter()
                .map(|h| header_cell(h, use_colors))
                .collect::<Vec<_>>(),
        );
    if use_colors {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

/// Position cell, the leader highlighted
fn position_cell(pos: usize, use_colors: bool) -> Cell {
    let cell = Cell::new(pos);
    if use_colors && pos == 1 {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

/// Format driver standings as the published text table.
/// Columns: Pos, Driver (abbreviated), Team, Pts w/drop, All Pts
pub fn format_driver_table(standings: &DriverStandings, use_colors: bool) -> String {
    if standings.standings.is_empty() {
        return "No standings yet.".to_string();
    }

    let mut table = new_table(&["Pos", "Driver", "Team", "Pts w/drop", "All Pts"], use_colors);
    for (idx, row) in standings.standings.iter().enumerate() {
        table.add_row(vec![
            position_cell(idx + 1, use_colors),
            Cell::new(abbreviate_name(&row.name)),
            Cell::new(&row.team),
            Cell::new(row.championship_points),
            Cell::new(row.total_points),
        ]);
    }
    for index in [0, 3, 4] {
        align_column(&mut table, index, CellAlignment::Right);
    }

    table.to_string()
}

/// Format team standings.
/// Columns: Pos, Team, Car, Pts, Wins, Podiums
pub fn format_team_table(standings: &TeamStandings, use_colors: bool) -> String {
    if standings.standings.is_empty() {
        return "No standings yet.".to_string();
    }

    let mut table = new_table(&["Pos", "Team", "Car", "Pts", "Wins", "Podiums"], use_colors);
    for (idx, row) in standings.standings.iter().enumerate() {
        table.add_row(vec![
            position_cell(idx + 1, use_colors),
            Cell::new(&row.name),
            Cell::new(&row.car),
            Cell::new(row.championship_points),
            Cell::new(row.wins),
            Cell::new(row.podiums),
        ]);
    }
    for index in [0, 3, 4, 5] {
        align_column(&mut table, index, CellAlignment::Right);
    }

    table.to_string()
}
