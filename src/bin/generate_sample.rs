//! Generate a deterministic sample of the stunting survey table
//! (`sample_data.parquet` and `sample_data.csv`) with the raw coded
//! columns, for exercising the dashboard without the real spreadsheet.

use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 400;

    let province_codes: [i64; 10] = [11, 12, 31, 32, 33, 34, 35, 51, 73, 94];
    let sex_codes: [i64; 2] = [1, 2];
    let knowledge_codes: [i64; 2] = [1, 2];
    let insurance_codes: [i64; 9] = [1, 2, 4, 5, 8, 10, 16, 32, 99];

    let mut provinsi: Vec<i64> = Vec::with_capacity(n_rows);
    let mut jenis_kelamin: Vec<i64> = Vec::with_capacity(n_rows);
    let mut pengetahuan: Vec<i64> = Vec::with_capacity(n_rows);
    let mut jaminan: Vec<i64> = Vec::with_capacity(n_rows);
    let mut umur_bulan: Vec<i64> = Vec::with_capacity(n_rows);
    let mut lingkar_kepala: Vec<f64> = Vec::with_capacity(n_rows);
    let mut bb_lahir: Vec<f64> = Vec::with_capacity(n_rows);
    let mut pb_lahir: Vec<f64> = Vec::with_capacity(n_rows);
    let mut pb_saat_ini: Vec<f64> = Vec::with_capacity(n_rows);
    let mut usia_kehamilan: Vec<i64> = Vec::with_capacity(n_rows);
    let mut kategori_bl: Vec<String> = Vec::with_capacity(n_rows);
    let mut kategori_umur: Vec<String> = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        let umur = (rng.next_u64() % 60) as i64;
        let bb = (rng.gauss(3.1, 0.5).clamp(1.2, 5.0) * 100.0).round() / 100.0;
        let pb = (rng.gauss(48.5, 2.2).clamp(38.0, 58.0) * 10.0).round() / 10.0;

        provinsi.push(*rng.pick(&province_codes));
        jenis_kelamin.push(*rng.pick(&sex_codes));
        pengetahuan.push(*rng.pick(&knowledge_codes));
        jaminan.push(*rng.pick(&insurance_codes));
        umur_bulan.push(umur);
        lingkar_kepala.push((rng.gauss(34.0, 1.5).clamp(28.0, 40.0) * 10.0).round() / 10.0);
        bb_lahir.push(bb);
        pb_lahir.push(pb);
        let growth = umur as f64 * rng.gauss(1.0, 0.15).max(0.4);
        pb_saat_ini.push(((pb + growth) * 10.0).round() / 10.0);
        usia_kehamilan.push(rng.gauss(38.0, 1.8).clamp(28.0, 43.0).round() as i64);
        kategori_bl.push(if bb < 2.5 { "BBLR" } else { "Normal" }.to_string());
        kategori_umur.push(
            match umur {
                0..=11 => "0-11 bulan",
                12..=23 => "12-23 bulan",
                24..=35 => "24-35 bulan",
                _ => "36-59 bulan",
            }
            .to_string(),
        );
    }

    // ---- CSV ----
    let csv_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Provinsi",
            "Jenis Kelamin",
            "Mengetahui Ttg Stunting",
            "Kepemilikan JKesehatan",
            "Umur_Bulan",
            "Lingkar_Kepala_Bayi",
            "BB_Lahir",
            "PB_Lahir",
            "PB_Saat_Ini",
            "Usia_Kehamilan",
            "kategori_bl",
            "kategori_Umur_Bulan",
        ])
        .expect("Failed to write CSV header");
    for i in 0..n_rows {
        writer
            .write_record([
                provinsi[i].to_string(),
                jenis_kelamin[i].to_string(),
                pengetahuan[i].to_string(),
                jaminan[i].to_string(),
                umur_bulan[i].to_string(),
                lingkar_kepala[i].to_string(),
                bb_lahir[i].to_string(),
                pb_lahir[i].to_string(),
                pb_saat_ini[i].to_string(),
                usia_kehamilan[i].to_string(),
                kategori_bl[i].clone(),
                kategori_umur[i].clone(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("Provinsi", DataType::Int64, false),
        Field::new("Jenis Kelamin", DataType::Int64, false),
        Field::new("Mengetahui Ttg Stunting", DataType::Int64, false),
        Field::new("Kepemilikan JKesehatan", DataType::Int64, false),
        Field::new("Umur_Bulan", DataType::Int64, false),
        Field::new("Lingkar_Kepala_Bayi", DataType::Float64, false),
        Field::new("BB_Lahir", DataType::Float64, false),
        Field::new("PB_Lahir", DataType::Float64, false),
        Field::new("PB_Saat_Ini", DataType::Float64, false),
        Field::new("Usia_Kehamilan", DataType::Int64, false),
        Field::new("kategori_bl", DataType::Utf8, false),
        Field::new("kategori_Umur_Bulan", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(provinsi)),
            Arc::new(Int64Array::from(jenis_kelamin)),
            Arc::new(Int64Array::from(pengetahuan)),
            Arc::new(Int64Array::from(jaminan)),
            Arc::new(Int64Array::from(umur_bulan)),
            Arc::new(Float64Array::from(lingkar_kepala)),
            Arc::new(Float64Array::from(bb_lahir)),
            Arc::new(Float64Array::from(pb_lahir)),
            Arc::new(Float64Array::from(pb_saat_ini)),
            Arc::new(Int64Array::from(usia_kehamilan)),
            Arc::new(StringArray::from(
                kategori_bl.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                kategori_umur.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "sample_data.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_rows} rows to {csv_path} and {parquet_path}");
}
