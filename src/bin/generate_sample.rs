use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const CSV_PATH: &str = "data/remote_worker_productivity_1000_final.csv";
const PARQUET_PATH: &str = "data/remote_worker_productivity_1000_final.parquet";
const N_WORKERS: usize = 1000;

const SECTORS: [(&str, f64); 5] = [
    ("Education", 0.22),
    ("IT", 0.22),
    ("Retail", 0.22),
    ("Healthcare", 0.17),
    ("Finance", 0.17),
];
const LOCATIONS: [&str; 3] = ["City", "Town", "Village"];

#[derive(Debug, Serialize)]
struct SampleWorker {
    worker_id: i64,
    industry_sector: &'static str,
    location_type: &'static str,
    age: i64,
    experience_years: i64,
    uses_ai_planner: bool,
    calendar_scheduled_usage: f64,
    focus_time_minutes: f64,
    task_completion_rate: f64,
    late_task_ratio: f64,
    productivity_score: f64,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, weighted: &[(&'a str, f64)]) -> &'a str {
        let mut r = self.next_f64() * weighted.iter().map(|(_, w)| w).sum::<f64>();
        for &(item, w) in weighted {
            if r < w {
                return item;
            }
            r -= w;
        }
        weighted[weighted.len() - 1].0
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate_worker(id: i64, rng: &mut SimpleRng) -> SampleWorker {
    let industry_sector = rng.pick(&SECTORS);
    let location_type = LOCATIONS[(rng.next_u64() % LOCATIONS.len() as u64) as usize];

    let age = rng.gauss(42.0, 9.0).round().clamp(22.0, 65.0) as i64;
    let experience_years = rng.gauss(17.0, 7.0).round().clamp(0.0, (age - 20) as f64) as i64;
    let uses_ai_planner = rng.next_f64() < 0.4;

    let calendar_scheduled_usage = rng.gauss(12.0, 5.0).clamp(0.0, 30.0).round();
    let focus_time_minutes = rng.gauss(150.0, 45.0).clamp(30.0, 300.0).round();
    let task_completion_rate = round2(rng.gauss(0.78, 0.1).clamp(0.3, 1.0));
    let late_task_ratio = round2((1.0 - task_completion_rate + rng.gauss(0.0, 0.05)).clamp(0.0, 1.0));

    let productivity_score = round2(
        (10.0
            + 1.1 * calendar_scheduled_usage
            + 0.12 * focus_time_minutes
            + 30.0 * task_completion_rate
            + rng.gauss(0.0, 5.0))
        .clamp(0.0, 100.0),
    );

    SampleWorker {
        worker_id: id,
        industry_sector,
        location_type,
        age,
        experience_years,
        uses_ai_planner,
        calendar_scheduled_usage,
        focus_time_minutes,
        task_completion_rate,
        late_task_ratio,
        productivity_score,
    }
}

fn write_csv(workers: &[SampleWorker], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for w in workers {
        writer.serialize(w).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(workers: &[SampleWorker], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("worker_id", DataType::Int64, false),
        Field::new("industry_sector", DataType::Utf8, false),
        Field::new("location_type", DataType::Utf8, false),
        Field::new("age", DataType::Int64, false),
        Field::new("experience_years", DataType::Int64, false),
        Field::new("uses_ai_planner", DataType::Boolean, false),
        Field::new("calendar_scheduled_usage", DataType::Float64, false),
        Field::new("focus_time_minutes", DataType::Float64, false),
        Field::new("task_completion_rate", DataType::Float64, false),
        Field::new("late_task_ratio", DataType::Float64, false),
        Field::new("productivity_score", DataType::Float64, false),
    ]));

    let f64_col = |get: fn(&SampleWorker) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(workers.iter().map(get)))
    };
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(workers.iter().map(|w| w.worker_id))),
        Arc::new(StringArray::from_iter_values(workers.iter().map(|w| w.industry_sector))),
        Arc::new(StringArray::from_iter_values(workers.iter().map(|w| w.location_type))),
        Arc::new(Int64Array::from_iter_values(workers.iter().map(|w| w.age))),
        Arc::new(Int64Array::from_iter_values(workers.iter().map(|w| w.experience_years))),
        Arc::new(BooleanArray::from(
            workers.iter().map(|w| w.uses_ai_planner).collect::<Vec<_>>(),
        )),
        f64_col(|w| w.calendar_scheduled_usage),
        f64_col(|w| w.focus_time_minutes),
        f64_col(|w| w.task_completion_rate),
        f64_col(|w| w.late_task_ratio),
        f64_col(|w| w.productivity_score),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let workers: Vec<SampleWorker> = (0..N_WORKERS as i64)
        .map(|id| generate_worker(id + 1, &mut rng))
        .collect();

    std::fs::create_dir_all("data").context("creating data directory")?;
    write_csv(&workers, Path::new(CSV_PATH))?;
    write_parquet(&workers, Path::new(PARQUET_PATH))?;

    log::info!("Wrote {} workers to {CSV_PATH} and {PARQUET_PATH}", workers.len());
    println!("Wrote {} workers to {CSV_PATH} and {PARQUET_PATH}", workers.len());
    Ok(())
}
