//! Flat CSV export of transaction collections.

use std::collections::HashMap;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tally_domain::{display_money, Transaction};
use uuid::Uuid;

use crate::{store::DownloadSink, CoreError};

pub const EXPORT_HEADER: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];
pub const DEFAULT_EXPORT_FILE_NAME: &str = "transactions.csv";
const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Serializes transactions into the download format.
pub struct ExportService;

impl ExportService {
    /// Renders `transactions` as CSV text with the fixed
    /// `Date,Type,Category,Description,Amount` column order.
    ///
    /// Unknown categories render as an empty field. Amounts are unsigned with two
    /// decimal places; direction is carried by the Type column only.
    pub fn to_csv<'a, I>(
        transactions: I,
        category_names: &HashMap<Uuid, String>,
    ) -> Result<String, CoreError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(EXPORT_HEADER).map_err(export_error)?;

        let mut rows = 0usize;
        for txn in transactions {
            let category = category_names
                .get(&txn.category_id)
                .map(String::as_str)
                .unwrap_or_default();
            writer
                .write_record([
                    txn.date.format(EXPORT_DATE_FORMAT).to_string(),
                    txn.kind.to_string(),
                    category.to_string(),
                    txn.description.clone(),
                    display_money(txn.amount.value()),
                ])
                .map_err(export_error)?;
            rows += 1;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| CoreError::Export(err.to_string()))?;
        tracing::debug!(rows, bytes = bytes.len(), "csv export rendered");
        String::from_utf8(bytes).map_err(|err| CoreError::Export(err.to_string()))
    }

    /// Renders the CSV and hands it to `sink` under `file_name`.
    pub fn export_to<'a, I>(
        sink: &dyn DownloadSink,
        file_name: &str,
        transactions: I,
        category_names: &HashMap<Uuid, String>,
    ) -> Result<(), CoreError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let contents = Self::to_csv(transactions, category_names)?;
        sink.deliver(file_name, &contents)
    }
}

fn export_error(err: csv::Error) -> CoreError {
    CoreError::Export(err.to_string())
}
