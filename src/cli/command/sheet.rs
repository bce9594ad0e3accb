//! Spreadsheet commands: directory lookups and CSV transfer.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{
    cli::create_spinner,
    config::Config,
    sheets::{extract_spreadsheet_id, Presence},
};

pub async fn create(config: &Config, title: &str) -> Result<String> {
    let client = config.sheets_client()?;

    let bar = create_spinner(format!("Creating spreadsheet `{title}`..."));
    let url = client.create(title).await?;
    bar.finish_with_message("Spreadsheet created");

    Ok(url)
}

pub async fn exists(config: &Config, sheet: &str) -> Result<String> {
    let client = config.sheets_client()?;
    let spreadsheet_id = extract_spreadsheet_id(sheet);

    match client.probe(sheet).await {
        Presence::Present => Ok(format!("`{spreadsheet_id}` exists")),
        Presence::Absent => Ok(format!("`{spreadsheet_id}` does not exist")),
        Presence::ProbeFailed(e) => {
            Err(e.context(format!("Could not check whether `{spreadsheet_id}` exists")))
        }
    }
}

pub async fn find(config: &Config, sheet: &str, title: &str) -> Result<String> {
    let client = config.sheets_client()?;

    match client.find_sheet_id(sheet, title).await? {
        Some(sheet_id) => Ok(sheet_id.to_string()),
        None => Ok(format!("No sheet titled `{title}`")),
    }
}

pub async fn tabs(config: &Config, sheet: &str) -> Result<String> {
    let client = config.sheets_client()?;
    let sheets = client.list_sheets(sheet).await?;

    Ok(sheets
        .iter()
        .map(|s| format!("{}\t{}", s.sheet_id, s.title))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub async fn get(config: &Config, sheet: &str, range: &str) -> Result<String> {
    let client = config.sheets_client()?;
    let csv = client.get_csv(sheet, range).await?;

    Ok(csv.strip_suffix('\n').unwrap_or(&csv).to_string())
}

pub async fn set(config: &Config, sheet: &str, range: &str, file: Option<&Path>) -> Result<String> {
    let csv = read_csv_input(file)?;
    let client = config.sheets_client()?;

    let bar = create_spinner(format!("Writing to {range}..."));
    client.set_csv(sheet, &csv, range).await?;
    bar.finish_with_message("Rows written");

    Ok(format!("Wrote CSV to `{range}`"))
}

pub async fn append(config: &Config, sheet: &str, range: &str, file: Option<&Path>) -> Result<String> {
    let csv = read_csv_input(file)?;
    let client = config.sheets_client()?;

    let bar = create_spinner(format!("Appending to {range}..."));
    client.append_csv(sheet, &csv, range).await?;
    bar.finish_with_message("Rows appended");

    Ok(format!("Appended CSV to `{range}`"))
}

/// Reads CSV from `file`, or from stdin when no file is given.
fn read_csv_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read `{}`", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read CSV from stdin")?;
            Ok(text)
        }
    }
}

// -- Tests -------------------------------------------------------------------
