//! JSON rendering for stdout: one document per line, or pretty-printed.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn write_one<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => serde_json::to_writer(&mut *out, value)?,
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_all<'a, W, T, I>(out: &mut W, values: I, format: OutputFormat) -> Result<(), CliError>
where
    W: Write,
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for value in values {
        write_one(out, value, format)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_is_one_line_per_value() {
        let mut buf = Vec::new();
        write_all(&mut buf, &[json!({"a": 1}), json!({"b": [2]})], OutputFormat::Json).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"a\":1}\n{\"b\":[2]}\n");
    }

    #[test]
    fn pretty_spans_lines() {
        let mut buf = Vec::new();
        write_one(&mut buf, &json!({"a": 1}), OutputFormat::Pretty).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
