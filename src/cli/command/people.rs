//! Writes a small table of sample people into a dated spreadsheet.

use anyhow::Result;
use log::warn;

use crate::{
    cli::create_spinner,
    clock,
    config::Config,
    grid::{self, Grid},
    sheets::{extract_spreadsheet_id, spreadsheet_url, DEFAULT_WRITE_RANGE},
};

const HEADER: [&str; 5] = ["First Name", "Second Name", "Age", "Date", "Time"];

pub async fn people(config: &Config, count: usize, sheet: Option<&str>) -> Result<String> {
    let client = config.sheets_client()?;
    let rows = make_people(count, &clock::current_date(), &clock::current_time());

    let target = match sheet {
        Some(sheet) if client.exists(sheet).await => sheet.to_string(),
        other => {
            if let Some(sheet) = other {
                warn!("Spreadsheet `{}` is not reachable, creating a new one", sheet);
            }
            let title = format!("TestSheet-{}", clock::current_date());
            let bar = create_spinner(format!("Creating spreadsheet `{title}`..."));
            let url = client.create(&title).await?;
            bar.finish_with_message("Spreadsheet created");
            url
        }
    };

    let csv = grid::encode(&rows)?;
    client.set_csv(&target, &csv, DEFAULT_WRITE_RANGE).await?;

    Ok(format!(
        "Wrote {} people to {}",
        count,
        spreadsheet_url(&extract_spreadsheet_id(&target))
    ))
}

/// A header row followed by `count` numbered people stamped with `date` and `time`.
fn make_people(count: usize, date: &str, time: &str) -> Grid {
    let mut rows = Vec::with_capacity(count + 1);
    rows.push(HEADER.iter().map(|h| h.to_string()).collect());

    for i in 0..count {
        rows.push(vec![
            format!("FirstName{i}"),
            format!("SecondName{i}"),
            (20 + i).to_string(),
            date.to_string(),
            time.to_string(),
        ]);
    }

    rows
}

// -- Tests -------------------------------------------------------------------
