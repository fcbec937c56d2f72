//! Typed operation requests.
//!
//! Each remote operation has one request struct, validated before its
//! wire body is built. [`Operation`] ties a request to its endpoint.

pub mod clash;
pub mod convert;
pub mod csv;
pub mod diff;
pub mod files;
pub mod json;
pub mod patch;
pub mod qto;
pub mod tester;

use std::fmt;

use ifcpipeline_core::result::AppResult;

use crate::builder;
use crate::http::ApiRequest;

use self::clash::ClashRequest;
use self::convert::ConvertRequest;
use self::csv::{CsvExportRequest, CsvImportRequest};
use self::diff::DiffRequest;
use self::files::{DownloadFromUrlRequest, DownloadLinkRequest};
use self::json::IfcToJsonRequest;
use self::patch::{PatchRequest, RecipeListRequest};
use self::qto::QuantityTakeoffRequest;
use self::tester::ValidationRequest;

/// A body-carrying operation against the gateway.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Geometry conversion.
    Convert(ConvertRequest),
    /// Clash detection.
    Clash(ClashRequest),
    /// Model comparison.
    Diff(DiffRequest),
    /// Tabular export.
    CsvExport(CsvExportRequest),
    /// Tabular import.
    CsvImport(CsvImportRequest),
    /// Patch recipe execution.
    PatchExecute(PatchRequest),
    /// Patch recipe listing.
    ListRecipes(RecipeListRequest),
    /// Quantity takeoff.
    QuantityTakeoff(QuantityTakeoffRequest),
    /// IDS validation.
    Validate(ValidationRequest),
    /// IFC to JSON conversion.
    IfcToJson(IfcToJsonRequest),
    /// Server-side fetch of a remote URL.
    DownloadFromUrl(DownloadFromUrlRequest),
    /// Download token creation.
    CreateDownloadLink(DownloadLinkRequest),
}

impl Operation {
    /// Gateway path for this operation.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Convert(_) => "/ifcconvert",
            Self::Clash(_) => "/ifcclash",
            Self::Diff(_) => "/ifcdiff",
            Self::CsvExport(_) => "/ifccsv",
            Self::CsvImport(_) => "/ifccsv/import",
            Self::PatchExecute(_) => "/patch/execute",
            Self::ListRecipes(_) => "/patch/recipes/list",
            Self::QuantityTakeoff(_) => "/calculate-qtos",
            Self::Validate(_) => "/ifctester",
            Self::IfcToJson(_) => "/ifc2json",
            Self::DownloadFromUrl(_) => "/download-from-url",
            Self::CreateDownloadLink(_) => "/create_download_link",
        }
    }

    /// Short operation name for logs and output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Convert(_) => "convert",
            Self::Clash(_) => "clash",
            Self::Diff(_) => "diff",
            Self::CsvExport(_) => "csv-export",
            Self::CsvImport(_) => "csv-import",
            Self::PatchExecute(_) => "patch-execute",
            Self::ListRecipes(_) => "patch-list-recipes",
            Self::QuantityTakeoff(_) => "qto",
            Self::Validate(_) => "validate",
            Self::IfcToJson(_) => "ifc2json",
            Self::DownloadFromUrl(_) => "download-from-url",
            Self::CreateDownloadLink(_) => "create-download-link",
        }
    }

    /// Validate, build the body, and wrap it in a `POST` request.
    pub fn to_request(&self) -> AppResult<ApiRequest> {
        let body = builder::build(self)?;
        Ok(ApiRequest::post(self.endpoint()).with_body(body))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
