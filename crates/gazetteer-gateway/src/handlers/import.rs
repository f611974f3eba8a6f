use crate::csvio::{CsvError, Record, Table};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use gazetteer_core::CityDraft;
use thiserror::Error;

#[derive(Debug, Error)]
enum ImportError {
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidNumber {
        column: &'static str,
        value: String,
        line: usize,
    },
}

/// Bulk CSV import. Expects a multipart body with a `file` field holding a
/// comma-delimited file with header `ibge_id,name,uf,capital,lat,lon`.
/// Rows whose IBGE id is already registered are skipped by the service; a
/// malformed row aborts the whole batch.
pub async fn upload_csv_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, String)> {
    let data = read_file_field(&mut multipart).await?;
    if data.is_empty() {
        return Err(ApiError::invalid_request("The CSV file is empty."));
    }

    let text = String::from_utf8(data).map_err(processing_error)?;

    let table = Table::parse(&text);
    if table.is_empty() {
        return Err(ApiError::invalid_request("The CSV file contains no data."));
    }

    let drafts = table
        .records()
        .map(|record| draft_from_record(&record))
        .collect::<std::result::Result<Vec<CityDraft>, ImportError>>()
        .map_err(processing_error)?;

    let count = drafts.len();
    state
        .directory()
        .bulk_create(drafts)
        .await
        .map_err(processing_error)?;

    Ok((
        StatusCode::CREATED,
        format!("{} cities inserted successfully!", count),
    ))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_request(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::invalid_request(e.to_string()))?;
            return Ok(bytes.to_vec());
        }
    }

    Err(ApiError::invalid_request("missing multipart field 'file'"))
}

fn processing_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::internal(format!("Error processing the CSV file: {}", err))
}

fn draft_from_record(record: &Record<'_>) -> std::result::Result<CityDraft, ImportError> {
    Ok(CityDraft {
        ibge_id: Some(parse_number(record, "ibge_id")?),
        name: Some(record.get("name")?.to_string()),
        state: Some(record.get("uf")?.to_string()),
        capital: record.get("capital")? == "1",
        latitude: Some(parse_number(record, "lat")?),
        longitude: Some(parse_number(record, "lon")?),
    })
}

fn parse_number<T: std::str::FromStr>(
    record: &Record<'_>,
    column: &'static str,
) -> std::result::Result<T, ImportError> {
    let raw = record.get(column)?;
    raw.parse().map_err(|_| ImportError::InvalidNumber {
        column,
        value: raw.to_string(),
        line: record.line(),
    })
}
