use anyhow::Context;
use csv::{Reader, Writer};
use name_dedup::{
    ExactConfig, ExactDuplicateGroup, FieldProfile, FieldValue, FuzzyConfig, FuzzyMatchPair,
    RecordTable,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

///
/// Reads a CSV file into a [`RecordTable`]. The header row becomes the
/// schema; empty cells become `Missing`, cells parsing as integers or floats
/// become numeric values, everything else stays text.
///
pub fn read_table(path: &Path) -> anyhow::Result<RecordTable> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("unable to open '{}'", path.display()))?;
    let headers = reader.headers().context("unable to read CSV header")?.clone();
    let fields: Vec<String> = headers.iter().map(String::from).collect();
    let mut table = RecordTable::new(fields);
    for record in reader.records() {
        let record = record.context("unable to read CSV record")?;
        table.push_row(record.iter().map(parse_cell).collect())?;
    }
    Ok(table)
}

fn parse_cell(cell: &str) -> FieldValue {
    if cell.is_empty() {
        FieldValue::Missing
    } else if let Ok(integer) = cell.parse::<i64>() {
        FieldValue::Integer(integer)
    } else if let Ok(float) = cell.parse::<f64>() {
        FieldValue::Float(float)
    } else {
        FieldValue::Text(cell.to_string())
    }
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("unable to create '{}'", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Writes the exact-duplicate report, reusing the configured field names as
/// column headers.
pub fn write_exact_report(
    groups: &[ExactDuplicateGroup],
    config: &ExactConfig,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let mut out = open_output(output)?;
    if json {
        serde_json::to_writer_pretty(&mut out, groups)?;
        writeln!(out)?;
        return Ok(());
    }
    let mut writer = Writer::from_writer(out);
    writer.write_record([
        config.given_name_field.as_str(),
        config.surname_field.as_str(),
        "Count",
    ])?;
    for group in groups {
        writer.write_record(&[
            group.given_name.to_string(),
            group.surname.to_string(),
            group.count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_fuzzy_report(
    pairs: &[FuzzyMatchPair],
    config: &FuzzyConfig,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let mut out = open_output(output)?;
    if json {
        serde_json::to_writer_pretty(&mut out, pairs)?;
        writeln!(out)?;
        return Ok(());
    }
    let mut writer = Writer::from_writer(out);
    writer.write_record([
        "IndexA".to_string(),
        "IndexB".to_string(),
        format!("{}A", config.given_name_field),
        format!("{}A", config.surname_field),
        format!("{}B", config.given_name_field),
        format!("{}B", config.surname_field),
        "Score".to_string(),
    ])?;
    for pair in pairs {
        writer.write_record(&[
            pair.index_a.to_string(),
            pair.index_b.to_string(),
            pair.given_name_a.to_string(),
            pair.surname_a.to_string(),
            pair.given_name_b.to_string(),
            pair.surname_b.to_string(),
            pair.score.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_profile_report(
    profiles: &[FieldProfile],
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let mut out = open_output(output)?;
    if json {
        serde_json::to_writer_pretty(&mut out, profiles)?;
        writeln!(out)?;
        return Ok(());
    }
    let mut writer = Writer::from_writer(out);
    writer.write_record(["Column", "Missing", "Percentage", "Kind", "Rows"])?;
    for profile in profiles {
        writer.write_record(&[
            profile.field.clone(),
            profile.missing.to_string(),
            format!("{:.2}%", profile.missing_pct),
            profile.kind.to_string(),
            profile.rows.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
