use toml::Value;

use crate::{Result, VidwallError};

fn invalid_path(path: &str, reason: String) -> VidwallError {
    VidwallError::InvalidConfigField {
        field: path.to_string(),
        component: "config path".to_string(),
        reason,
    }
}

/// Navigates a TOML value following a dot-separated path.
///
/// Array elements are addressed by index, so `wall.streams.0` yields the
/// reference stream.
///
/// # Errors
/// Returns `VidwallError::InvalidConfigField` if any segment is missing,
/// out of bounds, or points into a scalar.
pub(super) fn navigate_path(value: &Value, path: &str) -> Result<Value> {
    let parts: Vec<&str> = path.split('.').collect();
    let mut current = value;

    for (i, part) in parts.iter().enumerate() {
        let walked = parts[..i].join(".");

        current = match current {
            Value::Table(table) => table.get(*part).ok_or_else(|| {
                invalid_path(path, format!("key '{part}' not found under '{walked}'"))
            })?,
            Value::Array(array) => {
                let index = part.parse::<usize>().map_err(|_| {
                    invalid_path(path, format!("'{part}' is not an array index at '{walked}'"))
                })?;

                array.get(index).ok_or_else(|| {
                    invalid_path(
                        path,
                        format!("index {index} out of bounds at '{walked}' (len {})", array.len()),
                    )
                })?
            }
            other => {
                return Err(invalid_path(
                    path,
                    format!("cannot navigate into {} at '{walked}'", other.type_str()),
                ));
            }
        };
    }

    Ok(current.clone())
}
