use std::{fs, path::Path};

use crate::{Error, Result, point::Point};

const CITY_COLUMN: &str = "city";
const LAT_COLUMN: &str = "lat";
const LON_COLUMN: &str = "lng";
const POPULATION_COLUMN: &str = "population";

/// Load city records from a worldcities-style CSV export.
///
/// The header row names the columns; only `city`, `lat`, `lng` and
/// `population` are read, wherever they sit. Quoted fields may contain
/// commas and doubled quotes.
pub fn load_cities(path: &Path) -> Result<Vec<Point>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        Error::other(format!("failed to read city file {}: {e}", path.display()))
    })?;
    let cities = parse_cities(&raw)?;
    log::info!("input: file={} cities={}", path.display(), cities.len());
    Ok(cities)
}

pub(crate) fn parse_cities(raw: &str) -> Result<Vec<Point>> {
    let mut lines = raw.lines().enumerate();
    let (_, header) = lines
        .next()
        .ok_or_else(|| Error::invalid_data("City file is empty"))?;
    let columns = HeaderIndex::parse(header)?;

    let mut cities = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        // The header sits at index 0, so `idx` is the 1-based data row.
        cities.push(columns.point_from_fields(&fields, idx)?);
    }

    if cities.is_empty() {
        return Err(Error::invalid_data("City file has a header but no rows"));
    }
    Ok(cities)
}

/// Keep the `n` most populous cities, largest first. The sort is
/// stable, so equal populations keep file order.
pub fn select_top_by_population(mut cities: Vec<Point>, n: usize) -> Result<Vec<Point>> {
    if cities.len() < n {
        return Err(Error::invalid_input(format!(
            "Requested {n} cities but the input only has {}",
            cities.len()
        )));
    }
    cities.sort_by(|a, b| b.population.cmp(&a.population));
    cities.truncate(n);
    Ok(cities)
}

struct HeaderIndex {
    city: usize,
    lat: usize,
    lon: usize,
    population: usize,
}

impl HeaderIndex {
    fn parse(header: &str) -> Result<Self> {
        let fields = split_csv_line(header);
        let find = |name: &str| {
            fields.iter().position(|field| field == name).ok_or_else(|| {
                Error::invalid_data(format!("City file header is missing the {name} column"))
            })
        };

        Ok(Self {
            city: find(CITY_COLUMN)?,
            lat: find(LAT_COLUMN)?,
            lon: find(LON_COLUMN)?,
            population: find(POPULATION_COLUMN)?,
        })
    }

    fn point_from_fields(&self, fields: &[String], row: usize) -> Result<Point> {
        let get = |column: usize, name: &str| {
            fields.get(column).map(String::as_str).ok_or_else(|| {
                Error::invalid_data(format!("Row {row}: missing {name} field"))
            })
        };

        let name = get(self.city, CITY_COLUMN)?;
        if name.is_empty() {
            return Err(Error::invalid_data(format!("Row {row}: empty city name")));
        }

        let lat_field = get(self.lat, LAT_COLUMN)?;
        let lat: f64 = lat_field.parse().map_err(|_| {
            Error::invalid_data(format!("Row {row}: invalid latitude: {lat_field}"))
        })?;
        let lon_field = get(self.lon, LON_COLUMN)?;
        let lon: f64 = lon_field.parse().map_err(|_| {
            Error::invalid_data(format!("Row {row}: invalid longitude: {lon_field}"))
        })?;

        let population = parse_population(get(self.population, POPULATION_COLUMN)?, row)?;

        let point = Point::new(name, population, lat, lon);
        if !point.is_valid() {
            return Err(Error::invalid_data(format!(
                "Row {row}: lat/lon out of range: {lat},{lon}"
            )));
        }
        Ok(point)
    }
}

/// Population fields in the source data carry decimal strings
/// ("35676000.0") or nothing at all; take the integer part and default
/// missing values to zero.
fn parse_population(field: &str, row: usize) -> Result<u64> {
    let integer_part = field.split('.').next().unwrap_or("");
    if integer_part.is_empty() {
        return Ok(0);
    }
    integer_part.parse().map_err(|_| {
        Error::invalid_data(format!("Row {row}: invalid population: {field}"))
    })
}

/// Split one CSV line into unquoted fields. Quoted fields may contain
/// commas; a doubled quote inside a quoted field is a literal quote.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::{parse_cities, parse_population, select_top_by_population, split_csv_line};
    use crate::{Error, point::Point};

    const SAMPLE: &str = "\
city,city_ascii,lat,lng,country,population
\"Tokyo\",\"Tokyo\",35.6897,139.6922,\"Japan\",\"37977000\"
\"Jakarta\",\"Jakarta\",-6.2146,106.8451,\"Indonesia\",\"34540000.0\"
\"Delhi\",\"Delhi\",28.66,77.23,\"India\",\"29617000\"
";

    #[test]
    fn parse_cities_reads_columns_by_header_name() {
        let cities = parse_cities(SAMPLE).expect("sample should parse");

        assert_eq!(cities.len(), 3);
        assert_eq!(cities[0].name, "Tokyo");
        assert_eq!(cities[0].population, 37_977_000);
        assert_eq!(cities[0].lat, 35.6897);
        assert_eq!(cities[0].lon, 139.6922);
    }

    #[test]
    fn decimal_population_strings_keep_the_integer_part() {
        let cities = parse_cities(SAMPLE).expect("sample should parse");
        assert_eq!(cities[1].population, 34_540_000);
    }

    #[test]
    fn empty_population_defaults_to_zero() {
        let raw = "city,lat,lng,population\nNowhere,1.0,2.0,\n";
        let cities = parse_cities(raw).expect("row should parse");
        assert_eq!(cities[0].population, 0);
    }

    #[test]
    fn quoted_fields_may_contain_commas_and_doubled_quotes() {
        let fields = split_csv_line("\"Washington, D.C.\",\"the \"\"district\"\"\",7");
        assert_eq!(fields, vec!["Washington, D.C.", "the \"district\"", "7"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let raw = "city,lat,lng,population\nTokyo,35.6897,139.6922,37977000\n\n";
        let cities = parse_cities(raw).expect("sample should parse");
        assert_eq!(cities.len(), 1);
    }

    #[test]
    fn missing_header_column_is_reported() {
        let err = parse_cities("city,lat,population\nTokyo,35.7,1000\n")
            .expect_err("missing lng column should fail");
        assert!(err.to_string().contains("missing the lng column"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = parse_cities("").expect_err("empty input should fail");
        assert!(err.to_string().contains("City file is empty"));
    }

    #[test]
    fn header_without_rows_is_rejected() {
        let err = parse_cities("city,lat,lng,population\n")
            .expect_err("header-only input should fail");
        assert!(err.to_string().contains("no rows"));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected_with_row_number() {
        let raw = "city,lat,lng,population\nNowhere,95.0,10.0,5\n";
        let err = parse_cities(raw).expect_err("out-of-range latitude should fail");
        assert!(err.to_string().contains("Row 1"));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn non_numeric_latitude_is_rejected() {
        let raw = "city,lat,lng,population\nNowhere,abc,10.0,5\n";
        let err = parse_cities(raw).expect_err("non-numeric latitude should fail");
        assert!(err.to_string().contains("invalid latitude"));
    }

    #[test]
    fn top_selection_is_largest_first() {
        let cities = parse_cities(SAMPLE).expect("sample should parse");
        let top = select_top_by_population(cities, 2).expect("selection should succeed");

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Tokyo");
        assert_eq!(top[1].name, "Jakarta");
    }

    #[test]
    fn top_selection_keeps_file_order_on_population_ties() {
        let cities = vec![
            Point::new("first", 100, 1.0, 1.0),
            Point::new("second", 100, 2.0, 2.0),
            Point::new("third", 200, 3.0, 3.0),
        ];
        let top = select_top_by_population(cities, 3).expect("selection should succeed");

        let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn requesting_more_cities_than_available_fails() {
        let cities = parse_cities(SAMPLE).expect("sample should parse");
        let err = select_top_by_population(cities, 10)
            .expect_err("oversized selection should fail");
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
