use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Route of administration for an opioid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Route {
    /// Oral.
    #[serde(rename = "PO")]
    Oral,
    /// Intravenous.
    #[serde(rename = "IV")]
    Intravenous,
    /// Subcutaneous.
    #[serde(rename = "SC")]
    Subcutaneous,
    /// Transdermal patch.
    #[serde(rename = "TD")]
    Transdermal,
    /// Rectal.
    #[serde(rename = "PR")]
    Rectal,
    /// Intranasal.
    #[serde(rename = "IN")]
    Intranasal,
}

impl Route {
    /// Short clinical abbreviation, as written on a chart.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Route::Oral => "PO",
            Route::Intravenous => "IV",
            Route::Subcutaneous => "SC",
            Route::Transdermal => "TD",
            Route::Rectal => "PR",
            Route::Intranasal => "IN",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
