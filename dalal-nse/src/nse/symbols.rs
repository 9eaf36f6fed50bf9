use serde::Deserialize;

use crate::error::AdapterError;

#[derive(Debug, Deserialize)]
struct EquityRow {
    #[serde(rename = "SYMBOL")]
    symbol: String,
}

/// Parse `EQUITY_L.csv` into its raw `SYMBOL` column.
pub(crate) fn parse(body: &str) -> Result<Vec<String>, AdapterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut out = Vec::new();
    for row in rdr.deserialize::<EquityRow>() {
        let row = row?;
        if !row.symbol.is_empty() {
            out.push(row.symbol);
        }
    }
    Ok(out)
}
