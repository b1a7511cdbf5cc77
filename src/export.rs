use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::filter::ScatterPoint;
use crate::data::model::columns;
use crate::figure::{PieFigure, ScatterFigure};

/// Column order of the CSV export; matches the field order of [`ScatterPoint`].
const EXPORT_HEADER: [&str; 4] = [
    columns::LAUNCH_SITE,
    columns::PAYLOAD_MASS,
    columns::BOOSTER_CATEGORY,
    columns::CLASS,
];

/// Write the filtered launches as CSV, using the input file's column names.
///
/// The header is written even when `points` is empty.
pub fn write_points_csv(path: &Path, points: &[ScatterPoint]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context("creating CSV export")?;
    writer.write_record(EXPORT_HEADER).context("writing CSV header")?;
    for point in points {
        writer.serialize(point).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV export")?;
    Ok(())
}

#[derive(Serialize)]
struct FigureBundle<'a> {
    pie: &'a PieFigure,
    scatter: &'a ScatterFigure,
}

/// Write both figures as pretty JSON: `{ "pie": ..., "scatter": ... }`.
pub fn write_figures_json(path: &Path, pie: &PieFigure, scatter: &ScatterFigure) -> Result<()> {
    let json = serde_json::to_string_pretty(&FigureBundle { pie, scatter })
        .context("serializing figures")?;
    std::fs::write(path, json).context("writing figures JSON")?;
    Ok(())
}
