use std::{fs::File, io::Write, time::Instant};

use log::info;

use tsp_exact_core::{
    Point, Result, SolverOptions, load_cities, logging, report, select_top_by_population,
    solve_exact,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let cities = load_cities(options.input_path())?;
    let selected = select_top_by_population(cities, options.cities)?;
    for city in &selected {
        info!("input: selected {city} population={}", city.population);
    }

    let route = solve_exact(Point::korvatunturi(), selected.clone(), &options)?;

    let rendered = report::render_report(&selected, &route);
    match options.output_path() {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(rendered.as_bytes())?;
        }
        None => print!("{rendered}"),
    }

    info!(
        "output: n={} best_km={:.1} time={:.2}s",
        route.len(),
        route.total_km,
        now.elapsed().as_secs_f32()
    );
    route.log_metrics();

    Ok(())
}
