//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/records/{record_id}', use [format_endpoint].

/// The root route which redirects to the records page.
pub const ROOT: &str = "/";
/// The page for displaying, filtering and creating records.
pub const RECORDS_VIEW: &str = "/records";
/// The page for importing records from a previously exported JSON file.
pub const IMPORT_VIEW: &str = "/records/import";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create a record.
pub const RECORDS_API: &str = "/api/records";
/// The route to delete a single record.
pub const DELETE_RECORD: &str = "/api/records/{record_id}";
/// The route to delete every record in the store.
pub const CLEAR_RECORDS: &str = "/api/records/clear";
/// The route to download the full store as a JSON file.
pub const EXPORT: &str = "/api/records/export";
/// The route to upload a JSON file for importing records.
pub const IMPORT: &str = "/api/import";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/records/{record_id}',
/// '{record_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
