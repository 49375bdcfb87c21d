use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct MatrixEntry<'a> {
    num: String,
    id: &'a str,
}

#[derive(Debug, Serialize)]
struct Matrix<'a> {
    include: Vec<MatrixEntry<'a>>,
}

/// Collect MESSAGE_0_ID, MESSAGE_1_ID, ... until the first missing or blank one.
pub fn existing_message_ids<F>(lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut ids = Vec::new();
    for i in 0.. {
        match lookup(&format!("MESSAGE_{}_ID", i)) {
            Some(id) if !id.trim().is_empty() => ids.push(id.trim().to_string()),
            _ => break,
        }
    }
    ids
}

/// The `matrix=...` line handed to the next workflow step
pub fn matrix_output(ids: &[String]) -> Result<String> {
    let matrix = Matrix {
        include: ids
            .iter()
            .enumerate()
            .map(|(num, id)| MatrixEntry {
                num: num.to_string(),
                id,
            })
            .collect(),
    };
    let json = serde_json::to_string(&matrix).context("Failed to serialize message matrix")?;
    Ok(format!("matrix={}", json))
}

/// Append a line to the workflow output file
pub fn append_output(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file at {}", path.display()))?;
    writeln!(file, "{}", line)
        .with_context(|| format!("Failed to write output file at {}", path.display()))?;
    Ok(())
}
