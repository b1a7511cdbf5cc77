//! Writes a synthetic launch dataset (`sample_launches.csv` and
//! `sample_launches.parquet`) for trying the dashboard without real data.

use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

/// Booster generations in service order: (category, version prefix, success rate).
const BOOSTERS: [(&str, &str, f64); 5] = [
    ("v1.0", "F9 v1.0", 0.2),
    ("v1.1", "F9 v1.1", 0.4),
    ("FT", "F9 FT", 0.75),
    ("B4", "F9 B4", 0.8),
    ("B5", "F9 B5", 0.95),
];

const LAUNCHES: usize = 56;
const CSV_PATH: &str = "sample_launches.csv";
const PARQUET_PATH: &str = "sample_launches.parquet";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Row {
    flight_number: i64,
    site: &'static str,
    class: i64,
    payload: f64,
    booster_version: String,
    category: &'static str,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    (0..LAUNCHES)
        .map(|i| {
            let generation = i * BOOSTERS.len() / LAUNCHES;
            let (category, prefix, success_rate) = BOOSTERS[generation];

            // Later boosters lift heavier payloads; the first flights flew none.
            let ceiling = 4000.0 + 3000.0 * generation as f64;
            let payload = if i < 2 { 0.0 } else { (rng.next_f64() * ceiling).round() };

            Row {
                flight_number: i as i64 + 1,
                site: rng.pick(&SITES),
                class: i64::from(rng.next_f64() < success_rate),
                payload,
                booster_version: format!("{prefix} B{:04}", 1000 + i),
                category,
            }
        })
        .collect()
}

fn write_csv(path: &str, rows: &[Row]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for r in rows {
        writer.write_record([
            r.flight_number.to_string(),
            r.site.to_string(),
            r.class.to_string(),
            format!("{:.1}", r.payload),
            r.booster_version.clone(),
            r.category.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.category))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(CSV_PATH, &rows).expect("Failed to write CSV");
    write_parquet(PARQUET_PATH, &rows);

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {CSV_PATH} and {PARQUET_PATH}",
        rows.len()
    );
}
