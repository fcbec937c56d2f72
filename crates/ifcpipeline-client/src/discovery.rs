//! Resource discovery.
//!
//! Lists remote files and patch recipes as [`SelectOption`]s for menus.
//! The `list_*` calls never fail: any error becomes a single placeholder
//! option so a menu can still render.

use serde_json::Value;

use ifcpipeline_core::error::AppError;
use ifcpipeline_core::result::AppResult;
use ifcpipeline_core::types::{ExtensionFilter, FileDescriptor, RecipeDescriptor, SelectOption};

use crate::http::{ApiClient, ApiRequest};
use crate::recipes::RecipeSource;

/// Directory listing endpoint.
pub const LIST_DIRECTORIES_PATH: &str = "/list_directories";

/// Object keys whose values are children of the current directory.
const CHILD_KEYS: [&str; 4] = ["files", "directories", "items", "entries"];

/// Discovery calls bound to one client.
#[derive(Debug, Clone, Copy)]
pub struct Discovery<'a> {
    api: &'a ApiClient,
}

impl<'a> Discovery<'a> {
    /// Create a discovery service over a client.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Files matching `filter`, in listing order.
    pub async fn try_list_files(&self, filter: &ExtensionFilter) -> AppResult<Vec<FileDescriptor>> {
        let listing = self.api.send(&ApiRequest::get(LIST_DIRECTORIES_PATH)).await?;
        let files: Vec<FileDescriptor> = flatten_listing(&listing)
            .into_iter()
            .filter(|path| filter.accepts(path))
            .map(FileDescriptor::from_path)
            .collect();
        tracing::debug!(count = files.len(), "Listed remote files");
        Ok(files)
    }

    /// File options for a selection menu.
    pub async fn list_files(&self, filter: &ExtensionFilter) -> Vec<SelectOption> {
        match self.try_list_files(filter).await {
            Ok(files) => files
                .into_iter()
                .map(|f| SelectOption::plain(f.path))
                .collect(),
            Err(e) => placeholder("files", &e),
        }
    }

    /// Built-in and custom recipes in menu order.
    pub async fn try_list_recipes(&self) -> AppResult<Vec<RecipeDescriptor>> {
        let recipes = self.api.fetch_recipes().await?;
        Ok(order_recipes(recipes))
    }

    /// Recipe options for a selection menu.
    pub async fn list_recipes(&self) -> Vec<SelectOption> {
        match self.try_list_recipes().await {
            Ok(recipes) => recipes.iter().map(recipe_option).collect(),
            Err(e) => placeholder("recipes", &e),
        }
    }
}

fn placeholder(what: &str, err: &AppError) -> Vec<SelectOption> {
    tracing::warn!(error = %err, "Failed to load {what}");
    vec![SelectOption::load_failed(what, &err.message)]
}

/// Flatten a directory listing into file paths, preserving order.
///
/// Accepts bare path strings, arrays, objects with a `path` field, and
/// objects keyed by directory name. Directory keys become path prefixes.
pub fn flatten_listing(listing: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(listing, "", &mut paths);
    paths
}

fn collect_paths(value: &Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        Value::String(path) => out.push(join_path(prefix, path)),
        Value::Array(items) => {
            for item in items {
                collect_paths(item, prefix, out);
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(path)) = map.get("path") {
                out.push(join_path(prefix, path));
                return;
            }
            for (key, child) in map {
                if CHILD_KEYS.contains(&key.as_str()) {
                    collect_paths(child, prefix, out);
                } else {
                    collect_paths(child, &join_path(prefix, key), out);
                }
            }
        }
        _ => {}
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let already_prefixed = name
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'));
    if prefix.is_empty() || name.starts_with('/') || already_prefixed {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Parse a recipe listing: a bare array or an object with a `recipes` array.
pub fn normalize_recipes(response: &Value) -> AppResult<Vec<RecipeDescriptor>> {
    let list = match response {
        Value::Array(_) => response,
        Value::Object(map) => map.get("recipes").ok_or_else(|| {
            AppError::unexpected_response("Recipe listing has no 'recipes' field")
        })?,
        _ => {
            return Err(AppError::unexpected_response(
                "Recipe listing is neither a list nor an object",
            ));
        }
    };
    Ok(serde_json::from_value(list.clone())?)
}

/// Built-ins first, then customs; each group sorted case-insensitively.
///
/// The sort is stable, so equal names keep their listing order.
pub fn order_recipes(recipes: Vec<RecipeDescriptor>) -> Vec<RecipeDescriptor> {
    let (mut builtin, mut custom): (Vec<_>, Vec<_>) =
        recipes.into_iter().partition(|r| !r.is_custom);
    builtin.sort_by_cached_key(|r| r.name.to_lowercase());
    custom.sort_by_cached_key(|r| r.name.to_lowercase());
    builtin.extend(custom);
    builtin
}

/// Menu option for a recipe.
pub fn recipe_option(recipe: &RecipeDescriptor) -> SelectOption {
    let mut label = recipe.name.clone();
    if recipe.is_custom {
        label.push_str(" [Custom]");
    }
    match recipe.parameter_count() {
        Some(1) => label.push_str(" (1 param)"),
        Some(n) if n > 1 => label.push_str(&format!(" ({n} params)")),
        _ => {}
    }

    SelectOption {
        value: recipe.name.clone(),
        label,
        description: Some(recipe.description.clone()).filter(|d| !d.is_empty()),
    }
}
