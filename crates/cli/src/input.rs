//! JSON input files handed to the host.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gex_core::RawMarketSnapshot;
use gex_options_manager::{PositionSnapshot, TrackedPosition};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Reads a raw market snapshot.
///
/// # Errors
///
/// Returns an error if the file is unreadable or is not a snapshot object.
pub fn read_snapshot(path: &Path) -> Result<RawMarketSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing snapshot {}", path.display()))
}

/// A position file holds either the whole book or one bare snapshot.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PositionFile {
    Book(Vec<TrackedPosition>),
    Single(PositionSnapshot),
}

/// Reads tracked positions. A bare snapshot is tagged with `ticker` and id 1.
///
/// # Errors
///
/// Returns an error if the file is unreadable, matches neither layout, or
/// holds a position that fails validation.
pub fn read_positions(path: &Path, ticker: &str) -> Result<Vec<TrackedPosition>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading positions {}", path.display()))?;
    let file: PositionFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing positions {}", path.display()))?;

    let book = match file {
        PositionFile::Book(book) => book,
        PositionFile::Single(snapshot) => vec![TrackedPosition {
            id: 1,
            ticker: ticker.to_string(),
            snapshot,
        }],
    };
    for pos in &book {
        pos.snapshot
            .validate()
            .with_context(|| format!("position #{} {}", pos.id, pos.ticker))?;
    }
    Ok(book)
}

/// Reads realized P&L per closed trade as a JSON array.
///
/// # Errors
///
/// Returns an error if the file is unreadable or not an array of amounts.
pub fn read_pnls(path: &Path) -> Result<Vec<Decimal>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading trades {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing trades {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const POSITION: &str = r#"{
        "currentPrice": "96",
        "wallStrike": "98",
        "volumeRatio": 2.2,
        "entryPremium": "2.00",
        "currentPremium": "1.80",
        "ivRank": 70,
        "daysInTrade": 1
    }"#;

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn bare_position_is_tagged() {
        let file = write(POSITION);
        let book = read_positions(file.path(), "QQQ").unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book[0].ticker, "QQQ");
        assert_eq!(book[0].snapshot.current_premium, dec!(1.80));
    }

    #[test]
    fn position_book_is_read_as_is() {
        let file = write(&format!(
            r#"[{{"id": 7, "ticker": "SPY", "snapshot": {POSITION}}},
                {{"id": 9, "ticker": "IWM", "snapshot": {POSITION}}}]"#
        ));
        let book = read_positions(file.path(), "unused").unwrap();
        let ids: Vec<i64> = book.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 9]);
    }

    #[test]
    fn invalid_position_is_rejected() {
        let file = write(&POSITION.replace(r#""currentPrice": "96""#, r#""currentPrice": "0""#));
        let err = read_positions(file.path(), "SPY").unwrap_err();
        assert!(format!("{err:#}").contains("#1 SPY"));
    }

    #[test]
    fn snapshot_with_missing_fields_parses() {
        let file = write(r#"{"spotPrice": 500.0, "dayOfWeek": "WED"}"#);
        let raw = read_snapshot(file.path()).unwrap();
        assert_eq!(raw.spot_price, Some(500.0));
        assert!(raw.vix.is_none());
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = read_snapshot(Path::new("/nonexistent/snap.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/snap.json"));
    }

    #[test]
    fn pnls_accept_numbers_and_strings() {
        let file = write(r#"[120.5, "-40", 0]"#);
        assert_eq!(read_pnls(file.path()).unwrap(), vec![dec!(120.5), dec!(-40), dec!(0)]);
    }
}
