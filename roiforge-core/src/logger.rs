use crate::error::RoiError;
use csv::Writer;
use roiforge_schemas::results::YearlyCashFlowEntry;
use std::fs;
use std::io;

/// Streams projected years to a CSV file, one row per year.
pub struct CashFlowLogger {
    writer: Writer<fs::File>,
}

impl CashFlowLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_entry(&mut self, entry: &YearlyCashFlowEntry) -> Result<(), anyhow::Error> {
        self.writer.serialize(entry)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads back a file written by `CashFlowLogger`.
pub fn read_cash_flow_log(path: &str) -> Result<Vec<YearlyCashFlowEntry>, RoiError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| RoiError::CsvError(path.to_string(), e))?;
    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let entry: YearlyCashFlowEntry =
            result.map_err(|e| RoiError::CsvError(path.to_string(), e))?;
        entries.push(entry);
    }
    Ok(entries)
}
