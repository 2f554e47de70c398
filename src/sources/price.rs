use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, trace};

use crate::core::{CanonicalDate, PricePoint};
use crate::error::{SourceKind, TimelineError, TimelineResult};

const DATE_COLUMN: &str = "date";
const PRICE_COLUMN: &str = "price";

/// Parses a delimited price table with `date` and `price` header columns.
///
/// Rows with an empty date or a non-numeric price are dropped. Source order
/// is kept as-is. Zero usable rows yields `NoData`, which is distinct from a
/// header that cannot be read (`ParseFailure`).
pub fn parse_price_series(coin: &str, payload: &str) -> TimelineResult<Vec<PricePoint>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(payload.as_bytes());

    let headers = reader.headers().map_err(|e| parse_failure(format!("unreadable header: {e}")))?;
    let date_index = column_index(headers, DATE_COLUMN)?;
    let price_index = column_index(headers, PRICE_COLUMN)?;

    let mut points = Vec::new();
    let mut dropped = 0_usize;
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                trace!(row, error = %err, "dropping unreadable price row");
                dropped += 1;
                continue;
            }
        };
        match price_point(&record, date_index, price_index) {
            Some(point) => points.push(point),
            None => {
                trace!(row, "dropping price row with missing field");
                dropped += 1;
            }
        }
    }

    debug!(coin, rows = points.len(), dropped, "parsed price series");
    if points.is_empty() {
        return Err(TimelineError::NoData {
            coin: coin.to_owned(),
        });
    }
    Ok(points)
}

fn column_index(headers: &StringRecord, name: &str) -> TimelineResult<usize> {
    headers
        .iter()
        .position(|header| {
            header
                .trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case(name)
        })
        .ok_or_else(|| parse_failure(format!("missing `{name}` column")))
}

fn price_point(record: &StringRecord, date_index: usize, price_index: usize) -> Option<PricePoint> {
    let date = record.get(date_index).filter(|value| !value.is_empty())?;
    let price = record
        .get(price_index)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())?;
    Some(PricePoint::new(CanonicalDate::normalize(date), price))
}

fn parse_failure(reason: String) -> TimelineError {
    TimelineError::ParseFailure {
        kind: SourceKind::Price,
        reason,
    }
}
