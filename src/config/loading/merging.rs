use toml::{Value, map::Map};

/// Folds imported configs in order, then lays `main` over the result.
pub(super) fn merge_toml_configs(imports: Vec<Value>, main: Value) -> Value {
    let base = imports
        .into_iter()
        .fold(Value::Table(Map::new()), merge_two_toml_configs);

    merge_two_toml_configs(base, main)
}

/// Deep-merges two TOML values; `overlay` wins on every leaf.
///
/// Tables merge key by key. Any other value (arrays included, so a stream
/// list is replaced rather than appended) is taken from `overlay` whole.
fn merge_two_toml_configs(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(mut merged)) => {
            for (key, base_value) in base_table {
                let value = match merged.remove(&key) {
                    Some(overlay_value) => merge_two_toml_configs(base_value, overlay_value),
                    None => base_value,
                };
                merged.insert(key, value);
            }

            Value::Table(merged)
        }
        (_, overlay) => overlay,
    }
}
