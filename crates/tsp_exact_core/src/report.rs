use crate::point::Point;
use crate::route::Route;

const COLUMN_GAP: &str = "  ";
const HEADERS: [&str; 6] = [
    "City",
    "Population",
    "Latitude",
    "Longitude",
    "Leg km",
    "Total km",
];

/// Render the selected-cities listing and the final route table as one
/// report document.
pub fn render_report(selected: &[Point], route: &Route) -> String {
    let mut out = render_selection(selected);
    out.push('\n');
    out.push_str(&render_route_table(route));
    out
}

pub(crate) fn render_selection(selected: &[Point]) -> String {
    let mut out = format!("Selected cities (n={}):\n", selected.len());
    for city in selected {
        out.push_str(&format!(
            "  {} (population {})\n",
            city.name, city.population
        ));
    }
    out
}

/// Route table in an rst-style grid: `=` separator rows above and below
/// the header and after the last data row.
pub(crate) fn render_route_table(route: &Route) -> String {
    let legs = route.leg_distances();
    let mut cumulative = 0.0;

    let rows: Vec<[String; 6]> = route
        .stops
        .iter()
        .enumerate()
        .map(|(idx, stop)| {
            let leg = if idx == 0 { 0.0 } else { legs[idx - 1] };
            cumulative += leg;
            [
                stop.name.clone(),
                stop.population.to_string(),
                format!("{:.4}", stop.lat),
                format!("{:.4}", stop.lon),
                format!("{leg:.1}"),
                format!("{cumulative:.1}"),
            ]
        })
        .collect();

    let mut widths: [usize; 6] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let separator: String = widths
        .iter()
        .map(|width| "=".repeat(*width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);

    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format_row(&HEADERS.map(String::from), &widths));
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out.push_str(&separator);
    out.push('\n');

    out.push_str(&format!(
        "\nTotal route length: {:.1} km\n",
        route.total_km
    ));
    out
}

// First column left-aligned, numeric columns right-aligned.
fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(idx, (cell, width))| {
            let width = *width;
            if idx == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}
