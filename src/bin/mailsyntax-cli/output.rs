#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailsyntax::ValidationResult;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub email: String,
    pub valid: bool,
    pub code: &'static str,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub position: Option<usize>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub length: Option<usize>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
}

impl OutputRow {
    pub fn new(email: &str, result: ValidationResult) -> Self {
        let length = match result {
            ValidationResult::StringTooLong(length) => Some(length),
            _ => None,
        };
        Self {
            email: email.to_string(),
            valid: result.is_success(),
            code: result.code(),
            position: result.position().map(|pos| pos.index()),
            length,
            message: result.into_result().err().map(|err| err.to_string()),
        }
    }
}

pub fn write_reports(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => {
            write_human(rows);
            Ok(())
        }
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_invalid(rows: &[OutputRow]) -> bool {
    rows.iter().any(|row| !row.valid)
}

pub fn human_line(row: &OutputRow) -> String {
    match &row.message {
        None => format!("[OK]    {}", row.email),
        Some(message) => format!("[INVALID] {} :: {message}", row.email),
    }
}

fn write_human(rows: &[OutputRow]) {
    for row in rows {
        println!("{}", human_line(row));
    }
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 6] = ["email", "valid", "code", "position", "length", "message"];

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

#[cfg(feature = "with-csv")]
fn csv_record(row: &OutputRow) -> [String; 6] {
    let opt = |value: Option<usize>| value.map(|v| v.to_string()).unwrap_or_default();
    [
        row.email.clone(),
        row.valid.to_string(),
        row.code.to_string(),
        opt(row.position),
        opt(row.length),
        row.message.clone().unwrap_or_default(),
    ]
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsyntax::{Position, ValidationOptions, validate_with_result};

    #[test]
    fn row_from_failure() {
        let result = validate_with_result("invalid @", ValidationOptions::default());
        let row = OutputRow::new("invalid @", result);
        assert!(!row.valid);
        assert_eq!(row.code, "local_part_malformed");
        assert_eq!(row.position, Some(7));
        assert_eq!(row.length, None);
        assert_eq!(
            human_line(&row),
            "[INVALID] invalid @ :: local part is malformed at position 7"
        );
    }

    #[test]
    fn row_from_success_and_length() {
        let ok = OutputRow::new("a@b.c", ValidationResult::Success);
        assert_eq!(human_line(&ok), "[OK]    a@b.c");
        assert!(!any_invalid(std::slice::from_ref(&ok)));

        let long = OutputRow::new("x", ValidationResult::StringTooLong(300));
        assert_eq!(long.length, Some(300));
        assert_eq!(long.position, None);

        let at = OutputRow::new("y", ValidationResult::DomainMalformed(Position::new(2)));
        assert!(any_invalid(&[ok, long, at]));
    }
}
