//! Request body builder.
//!
//! Turns a validated [`Operation`] into the exact JSON field set the
//! gateway expects. Optional fields are only emitted when set, so the
//! service applies its own defaults for everything else.

use serde_json::{Map, Value, json};
use validator::Validate;

use ifcpipeline_core::result::AppResult;

use crate::operations::clash::{ClashFile, ClashRequest};
use crate::operations::convert::ConvertRequest;
use crate::operations::csv::{CsvExportRequest, CsvImportRequest};
use crate::operations::diff::{DiffRelationship, DiffRequest};
use crate::operations::files::{DownloadFromUrlRequest, DownloadLinkRequest};
use crate::operations::json::IfcToJsonRequest;
use crate::operations::patch::{PatchRequest, RecipeArguments, RecipeListRequest};
use crate::operations::qto::QuantityTakeoffRequest;
use crate::operations::tester::ValidationRequest;
use crate::operations::Operation;

/// Accumulates wire fields, skipping unset optional values.
#[derive(Debug, Default, Clone)]
pub struct WireBody {
    fields: Map<String, Value>,
}

impl WireBody {
    /// Start an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always emit a field.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Emit a field only when a value is present.
    pub fn optional<T: Into<Value>>(mut self, key: &str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.fields.insert(key.to_string(), value.into());
        }
        self
    }

    /// Emit a string field only when present and not blank.
    pub fn text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.fields.insert(key.to_string(), Value::String(value.to_string()));
        }
        self
    }

    /// Emit a comma-separated parameter as a sequence, or nothing when empty.
    pub fn list(mut self, key: &str, raw: Option<&str>) -> Self {
        if let Some(items) = raw.and_then(split_list) {
            self.fields.insert(key.to_string(), json!(items));
        }
        self
    }

    /// Finish the body.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Split a comma-separated list, trimming each item.
///
/// Blank items are dropped; input with no items yields `None`.
pub fn split_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Validate an operation and build its wire body.
pub fn build(operation: &Operation) -> AppResult<Value> {
    let body = match operation {
        Operation::Convert(req) => {
            req.validate()?;
            convert_body(req)
        }
        Operation::Clash(req) => {
            req.validate()?;
            clash_body(req)
        }
        Operation::Diff(req) => {
            req.validate()?;
            diff_body(req)
        }
        Operation::CsvExport(req) => {
            req.validate()?;
            csv_export_body(req)
        }
        Operation::CsvImport(req) => {
            req.validate()?;
            csv_import_body(req)
        }
        Operation::PatchExecute(req) => {
            req.validate()?;
            patch_body(req)?
        }
        Operation::ListRecipes(req) => recipe_list_body(req),
        Operation::QuantityTakeoff(req) => {
            req.validate()?;
            qto_body(req)
        }
        Operation::Validate(req) => {
            req.validate()?;
            tester_body(req)
        }
        Operation::IfcToJson(req) => {
            req.validate()?;
            ifc_to_json_body(req)
        }
        Operation::DownloadFromUrl(req) => {
            req.validate()?;
            download_from_url_body(req)
        }
        Operation::CreateDownloadLink(req) => {
            req.validate()?;
            download_link_body(req)
        }
    };
    Ok(body)
}

fn convert_body(req: &ConvertRequest) -> Value {
    let o = &req.options;
    WireBody::new()
        .field("input_filename", req.input_filename.as_str())
        .field("output_filename", req.output_filename.as_str())
        .optional("verbose", o.verbose)
        .optional("plan", o.plan)
        .optional("model", o.model)
        .optional("weld_vertices", o.weld_vertices)
        .optional("use_world_coords", o.use_world_coords)
        .optional("convert_back_units", o.convert_back_units)
        .optional("sew_shells", o.sew_shells)
        .optional("merge_boolean_operands", o.merge_boolean_operands)
        .optional("disable_opening_subtractions", o.disable_opening_subtractions)
        .text("bounds", o.bounds.as_deref())
        .list("include", o.include.as_deref())
        .list("exclude", o.exclude.as_deref())
        .text("log_file", o.log_file.as_deref())
        .into_value()
}

fn clash_file(file: &ClashFile) -> Value {
    WireBody::new()
        .field("file", file.file.as_str())
        .text("selector", file.selector.as_deref())
        .optional("mode", file.mode.map(|m| m.as_str()))
        .into_value()
}

fn clash_body(req: &ClashRequest) -> Value {
    let o = &req.options;
    let clash_set = json!({
        "name": req.clash_set_name,
        "a": req.group_a.iter().map(clash_file).collect::<Vec<_>>(),
        "b": req.group_b.iter().map(clash_file).collect::<Vec<_>>(),
    });

    WireBody::new()
        .field("clash_sets", json!([clash_set]))
        .field("output_filename", req.output_filename.as_str())
        .optional("tolerance", o.tolerance)
        .optional("smart_grouping", o.smart_grouping)
        .optional("max_cluster_distance", o.max_cluster_distance)
        .optional("mode", o.mode.map(|m| m.as_str()))
        .optional("clearance", o.clearance)
        .optional("check_all", o.check_all)
        .optional("allow_touching", o.allow_touching)
        .into_value()
}

fn diff_body(req: &DiffRequest) -> Value {
    // Geometry-only is the service default, so it is left implicit.
    let relationships = match req.relationships.as_slice() {
        [] | [DiffRelationship::Geometry] => None,
        rels => Some(json!(rels.iter().map(|r| r.as_str()).collect::<Vec<_>>())),
    };

    WireBody::new()
        .field("old_file", req.old_file.as_str())
        .field("new_file", req.new_file.as_str())
        .field("output_file", req.output_file.as_str())
        .field("is_shallow", req.is_shallow)
        .optional("relationships", relationships)
        .text("filter_elements", req.filter_elements.as_deref())
        .into_value()
}

fn csv_export_body(req: &CsvExportRequest) -> Value {
    WireBody::new()
        .field("filename", req.filename.as_str())
        .field("output_filename", req.output_filename.as_str())
        .optional("format", req.format.map(|f| f.as_str()))
        .text("delimiter", req.delimiter.as_deref())
        .text("null", req.null_value.as_deref())
        .text("query", req.query.as_deref())
        .list("attributes", req.attributes.as_deref())
        .into_value()
}

fn csv_import_body(req: &CsvImportRequest) -> Value {
    WireBody::new()
        .field("ifc_filename", req.ifc_filename.as_str())
        .field("csv_filename", req.csv_filename.as_str())
        .text("output_filename", req.output_filename.as_deref())
        .into_value()
}

fn patch_body(req: &PatchRequest) -> AppResult<Value> {
    let arguments = RecipeArguments::resolve(&req.recipe, &req.arguments)?;

    Ok(WireBody::new()
        .field("input_file", req.input_file.as_str())
        .field("output_file", req.output_file.as_str())
        .field("recipe", req.recipe.as_str())
        .field("use_custom", req.use_custom.unwrap_or(false))
        .field("arguments", arguments.to_wire())
        .into_value())
}

fn recipe_list_body(req: &RecipeListRequest) -> Value {
    WireBody::new()
        .field("include_builtin", req.include_builtin)
        .field("include_custom", req.include_custom)
        .into_value()
}

fn qto_body(req: &QuantityTakeoffRequest) -> Value {
    WireBody::new()
        .field("input_file", req.input_file.as_str())
        .text("output_file", req.output_file.as_deref())
        .into_value()
}

fn tester_body(req: &ValidationRequest) -> Value {
    WireBody::new()
        .field("ifc_filename", req.ifc_filename.as_str())
        .field("ids_filename", req.ids_filename.as_str())
        .field("output_filename", req.output_filename.as_str())
        .field("report_type", req.report_type.as_str())
        .into_value()
}

fn ifc_to_json_body(req: &IfcToJsonRequest) -> Value {
    WireBody::new()
        .field("filename", req.filename.as_str())
        .field("output_filename", req.output_filename.as_str())
        .into_value()
}

fn download_from_url_body(req: &DownloadFromUrlRequest) -> Value {
    WireBody::new().field("url", req.url.as_str()).into_value()
}

fn download_link_body(req: &DownloadLinkRequest) -> Value {
    WireBody::new()
        .field("file_path", req.file_path.as_str())
        .into_value()
}
