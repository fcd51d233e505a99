use chrono::Utc;
use serde_json::Value;
use tracing::info;

use uniflux_api::legacy::models::Meta;

use crate::cli::{DecodeArgs, GlobalOpts};
use crate::commands::{project_devices, read_file};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &DecodeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let bytes = read_file(&args.file)?;
    let payload: Value = serde_json::from_slice(&bytes)?;
    let raw = device_list(payload)?;
    info!(file = %args.file.display(), devices = raw.len(), "decoding saved payload");

    let site = global.site.as_deref().unwrap_or("default");
    let series = project_devices(&raw, site, Utc::now());
    output::write_all(&mut std::io::stdout().lock(), &series, global.output)
}

/// Accept a `{meta, data}` envelope, a bare device array or one device.
///
/// A saved error envelope (`meta.rc` other than `"ok"`) fails instead of
/// decoding as zero devices.
fn device_list(payload: Value) -> Result<Vec<Value>, CliError> {
    Ok(match payload {
        Value::Object(mut map) if map.contains_key("data") => {
            if let Some(meta) = map.remove("meta") {
                let meta: Meta = serde_json::from_value(meta)?;
                if !meta.is_ok() {
                    return Err(CliError::Api {
                        message: meta.msg.unwrap_or_else(|| format!("rc={}", meta.rc)),
                    });
                }
            }
            match map.remove("data") {
                Some(Value::Array(items)) => items,
                Some(other) => vec![other],
                None => Vec::new(),
            }
        }
        Value::Array(items) => items,
        other => vec![other],
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unwraps_envelope() {
        let env = json!({"meta": {"rc": "ok"}, "data": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(device_list(env).unwrap().len(), 2);
    }

    #[test]
    fn error_envelope_fails() {
        let env = json!({"meta": {"rc": "error", "msg": "api.err.LoginRequired"}, "data": []});
        match device_list(env) {
            Err(CliError::Api { message }) => assert_eq!(message, "api.err.LoginRequired"),
            other => panic!("expected an API error, got {other:?}"),
        }

        let env = json!({"meta": {"rc": "error"}, "data": []});
        assert!(matches!(
            device_list(env),
            Err(CliError::Api { ref message }) if message == "rc=error"
        ));
    }

    #[test]
    fn accepts_bare_array_and_single_object() {
        assert_eq!(device_list(json!([{"name": "a"}])).unwrap().len(), 1);
        assert_eq!(
            device_list(json!({"name": "a"})).unwrap(),
            vec![json!({"name": "a"})]
        );
        assert!(device_list(json!([])).unwrap().is_empty());
        assert_eq!(device_list(json!({"data": [{}]})).unwrap().len(), 1);
    }
}
