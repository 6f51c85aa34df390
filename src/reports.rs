// src/reports.rs
//! Employee report page and CSV generation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{AsRefStr, Display, EnumString};

use crate::error::ApiResult;
use crate::filter::empty_as_none;
use crate::models::{category_shares, ReportData};
use crate::seed;

// ==================== CSV ====================

/// A CSV document ready to be served as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub body: Vec<u8>,
}

/// Writes `header` and `rows` as CSV, prefixed with a UTF-8 BOM so that
/// spreadsheet applications pick up the Greek text.
pub fn write_csv<I, R>(header: &[&str], rows: I) -> ApiResult<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut csv_data = "\u{FEFF}".as_bytes().to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut csv_data);
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(csv_data)
}

// ==================== FILTERS ====================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportStatus {
    Available,
    InUse,
    Lent,
    Pending,
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Available => "Διαθέσιμο",
            ReportStatus::InUse => "Σε Χρήση",
            ReportStatus::Lent => "Δανεισμένο",
            ReportStatus::Pending => "Σε Αναμονή",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFilters {
    pub start_date: String,
    pub end_date: String,
    pub resource_type: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub status: Option<ReportStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Excel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportExport {
    Csv(CsvExport),
    Acknowledged(String),
}

// ==================== VIEW ====================

pub struct ReportsView {
    filters: ReportFilters,
    shown: bool,
    data: ReportData,
}

impl ReportsView {
    pub fn new() -> Self {
        Self {
            filters: ReportFilters::default(),
            shown: false,
            data: seed::report_data(),
        }
    }

    pub fn set_filters(&mut self, filters: ReportFilters) {
        self.filters = filters;
    }

    /// The figures are static; the filters only travel along with exports.
    pub fn generate(&mut self) {
        self.shown = true;
    }

    pub fn clear(&mut self) {
        self.filters = ReportFilters::default();
        self.shown = false;
    }

    pub fn export(&self, format: ExportFormat) -> ApiResult<ReportExport> {
        tracing::info!(format = %format, filters = ?self.filters, "exporting report");

        match format {
            ExportFormat::Pdf => Ok(ReportExport::Acknowledged(
                "Η αναφορά εξάγεται ως PDF...".to_string(),
            )),
            ExportFormat::Excel => {
                let total = self.data.total_resources;
                let mut rows: Vec<Vec<String>> = vec![
                    vec!["Συνολικοί Πόροι".to_string(), total.to_string(), "100.0".to_string()],
                    vec!["Ενεργοί Δανεισμοί".to_string(), self.data.active_loans.to_string(), String::new()],
                    vec!["Εκκρεμείς Αιτήσεις".to_string(), self.data.pending_requests.to_string(), String::new()],
                    vec![
                        "Ολοκληρωμένες Συναλλαγές".to_string(),
                        self.data.completed_transactions.to_string(),
                        String::new(),
                    ],
                ];
                rows.extend(
                    category_shares(&self.data.resources_by_category, total)
                        .into_iter()
                        .map(|share| {
                            vec![
                                share.category,
                                share.count.to_string(),
                                format!("{:.1}", share.percentage),
                            ]
                        }),
                );

                let body = write_csv(&["Μέτρηση", "Πλήθος", "Ποσοστό (%)"], rows)?;
                Ok(ReportExport::Csv(CsvExport {
                    filename: format!("report_{}.csv", Utc::now().format("%Y%m%d_%H%M%S")),
                    body,
                }))
            }
        }
    }

    pub fn snapshot(&self) -> serde_json::Value {
        let report = self.shown.then(|| {
            json!({
                "total_resources": self.data.total_resources,
                "active_loans": self.data.active_loans,
                "pending_requests": self.data.pending_requests,
                "completed_transactions": self.data.completed_transactions,
                "resources_by_category":
                    category_shares(&self.data.resources_by_category, self.data.total_resources),
            })
        });

        json!({
            "filters": self.filters,
            "report_shown": self.shown,
            "report": report,
        })
    }
}
