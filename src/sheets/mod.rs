//! Google Sheets v4 client: spreadsheet directory operations and table I/O.
//!
//! Every operation is a single request against the REST API. Spreadsheets may
//! be addressed by bare id or by sharing URL; cell ranges are passed through in
//! A1 notation (`Sheet1!A1:C10`) without local validation.

pub mod auth;
pub mod id;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use crate::grid::{self, Grid};

pub use auth::{Authenticator, Credentials, ServiceAccountKey};
pub use id::{extract_spreadsheet_id, spreadsheet_url};

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
/// Top-left cell used when writing or appending without an explicit range.
pub const DEFAULT_WRITE_RANGE: &str = "Sheet1!A1";
/// Columns read when no explicit range is given.
pub const DEFAULT_READ_RANGE: &str = "Sheet1!A:Z";

/// Outcome of an existence probe.
#[derive(Debug)]
pub enum Presence {
    Present,
    /// The service answered 404 for this spreadsheet.
    Absent,
    /// The probe could not tell: transport failure, permissions, server error.
    ProbeFailed(anyhow::Error),
}

impl Presence {
    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present)
    }
}

/// Title and numeric id of one sheet (tab) inside a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSpreadsheet {
    spreadsheet_id: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Grid>,
}

pub struct SheetsClient {
    http: reqwest::Client,
    auth: Authenticator,
    base_url: String,
}

impl SheetsClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, SHEETS_API_BASE.to_string())
    }

    pub fn with_base_url(credentials: Credentials, base_url: String) -> Self {
        let http = reqwest::Client::new();
        Self {
            auth: Authenticator::new(http.clone(), credentials),
            http,
            base_url,
        }
    }

    // -- Sheet directory ------------------------------------------------------

    /// Creates a new spreadsheet titled `title` and returns its viewing URL.
    ///
    /// Not idempotent: every call creates a distinct spreadsheet.
    pub async fn create(&self, title: &str) -> Result<String> {
        let url = self.url(&["v4", "spreadsheets"])?;
        let created: CreatedSpreadsheet = self
            .request(Method::POST, url)
            .await?
            .query(&[("fields", "spreadsheetId")])
            .json(&json!({ "properties": { "title": title } }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Invalid create spreadsheet response")?;

        info!("Created spreadsheet `{}` ({})", title, created.spreadsheet_id);
        Ok(spreadsheet_url(&created.spreadsheet_id))
    }

    /// Fetches spreadsheet metadata to decide whether the spreadsheet is reachable.
    pub async fn probe(&self, url_or_id: &str) -> Presence {
        let response = match self.fetch_metadata(url_or_id, None).await {
            Ok(response) => response,
            Err(e) => return Presence::ProbeFailed(e),
        };

        let status = response.status();
        if status.is_success() {
            return Presence::Present;
        }
        if status == StatusCode::NOT_FOUND {
            return Presence::Absent;
        }

        match response.error_for_status() {
            Err(e) => Presence::ProbeFailed(e.into()),
            Ok(_) => Presence::ProbeFailed(anyhow!("Unexpected status {status}")),
        }
    }

    /// True if the spreadsheet could be fetched. Every failure reads as `false`;
    /// use [`SheetsClient::probe`] to tell "absent" from "unreachable".
    pub async fn exists(&self, url_or_id: &str) -> bool {
        self.probe(url_or_id).await.is_present()
    }

    /// Returns the numeric id of the first sheet titled `title` within the spreadsheet.
    pub async fn find_sheet_id(&self, url_or_id: &str, title: &str) -> Result<Option<i64>> {
        let sheets = self.list_sheets(url_or_id).await?;

        Ok(sheets
            .into_iter()
            .find(|sheet| sheet.title == title)
            .map(|sheet| sheet.sheet_id))
    }

    /// Lists the sheets (tabs) of a spreadsheet in the order the service returns them.
    pub async fn list_sheets(&self, url_or_id: &str) -> Result<Vec<SheetProperties>> {
        let metadata: SpreadsheetMetadata = self
            .fetch_metadata(url_or_id, Some("sheets.properties"))
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Invalid spreadsheet metadata")?;

        Ok(metadata.sheets.into_iter().map(|s| s.properties).collect())
    }

    async fn fetch_metadata(
        &self,
        url_or_id: &str,
        fields: Option<&str>,
    ) -> Result<reqwest::Response> {
        let spreadsheet_id = extract_spreadsheet_id(url_or_id);
        let url = self.url(&["v4", "spreadsheets", &spreadsheet_id])?;

        let mut request = self.request(Method::GET, url).await?;
        if let Some(fields) = fields {
            request = request.query(&[("fields", fields)]);
        }

        Ok(request.send().await?)
    }

    // -- Table I/O ------------------------------------------------------------

    /// Reads `range` row by row. A range with no data gives an empty grid.
    pub async fn read(&self, url_or_id: &str, range: &str) -> Result<Grid> {
        let url = self.values_url(url_or_id, range, None)?;
        let value_range: ValueRange = self
            .request(Method::GET, url)
            .await?
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Invalid value range response")?;

        Ok(value_range.values.unwrap_or_default())
    }

    /// Overwrites cells starting at the top-left of `range`. Values are stored
    /// as literal strings.
    pub async fn write(&self, url_or_id: &str, grid: &[Vec<String>], range: &str) -> Result<()> {
        let url = self.values_url(url_or_id, range, None)?;
        self.request(Method::PUT, url)
            .await?
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": grid,
            }))
            .send()
            .await?
            .error_for_status()?;

        info!("Wrote {} rows to {}", grid.len(), range);
        Ok(())
    }

    /// Inserts the rows after the last non-empty row of the sheet named in `range`.
    pub async fn append(&self, url_or_id: &str, grid: &[Vec<String>], range: &str) -> Result<()> {
        let url = self.values_url(url_or_id, range, Some("append"))?;
        self.request(Method::POST, url)
            .await?
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": grid,
            }))
            .send()
            .await?
            .error_for_status()?;

        info!("Appended {} rows to {}", grid.len(), range);
        Ok(())
    }

    /// Reads `range` and returns it as CSV text.
    pub async fn get_csv(&self, url_or_id: &str, range: &str) -> Result<String> {
        let grid = self.read(url_or_id, range).await?;
        grid::encode(&grid)
    }

    /// Writes CSV text into the sheet starting at `range`.
    pub async fn set_csv(&self, url_or_id: &str, csv_text: &str, range: &str) -> Result<()> {
        let grid = grid::decode(csv_text)?;
        self.write(url_or_id, &grid, range).await
    }

    /// Appends CSV rows to the sheet named in `range`.
    pub async fn append_csv(&self, url_or_id: &str, csv_text: &str, range: &str) -> Result<()> {
        let grid = grid::decode(csv_text)?;
        self.append(url_or_id, &grid, range).await
    }

    // -- Plumbing -------------------------------------------------------------

    fn values_url(&self, url_or_id: &str, range: &str, action: Option<&str>) -> Result<Url> {
        let spreadsheet_id = extract_spreadsheet_id(url_or_id);
        let last = match action {
            Some(action) => format!("{range}:{action}"),
            None => range.to_string(),
        };

        self.url(&["v4", "spreadsheets", &spreadsheet_id, "values", &last])
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid Sheets API base URL `{}`", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets API base URL `{}` cannot take a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.auth.access_token().await?;
        debug!("{} {}", method, url);

        Ok(self.http.request(method, url).bearer_auth(token))
    }
}

// -- Tests -------------------------------------------------------------------
