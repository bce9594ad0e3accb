//! Fetch the current weather, print the requested fields and optionally log them to a sheet.

use anyhow::Result;
use serde_json::{Map, Value};

use crate::{clock, cli::create_spinner, config::Config, weather};

pub async fn weather(
    config: &Config,
    city: &str,
    keys: &[String],
    sheet: Option<&str>,
    range: &str,
) -> Result<String> {
    let client = config.weather_client()?;

    let bar = create_spinner(format!("Fetching weather for {city}..."));
    let payload = client.fetch_current(city).await?;
    bar.finish_with_message("Weather fetched");

    let extracted = weather::extract(&payload, keys);

    if let Some(sheet) = sheet {
        let row = make_row(
            &clock::current_date(),
            &clock::current_time(),
            city,
            keys,
            &extracted,
        );
        config.sheets_client()?.append(sheet, &[row], range).await?;
    }

    Ok(serde_json::to_string_pretty(&extracted)?)
}

/// One sheet row: date, time, city, then a cell per requested key. Missing keys
/// leave an empty cell so columns stay aligned across rows.
fn make_row(
    date: &str,
    time: &str,
    city: &str,
    keys: &[String],
    extracted: &Map<String, Value>,
) -> Vec<String> {
    let mut row = vec![date.to_string(), time.to_string(), city.to_string()];

    for key in keys {
        let cell = match extracted.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(value) => value.to_string(),
            None => String::new(),
        };
        row.push(cell);
    }

    row
}

// -- Tests -------------------------------------------------------------------
