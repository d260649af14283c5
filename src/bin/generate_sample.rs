//! Generate a deterministic sample business registry for trying the viewer:
//! `data.csv` with the Korean export headers and `data.parquet` with the
//! English column names, so both alias paths get exercised.

use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
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

    fn next_usize(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct SampleRow {
    region: &'static str,
    category: &'static str,
    business_name: String,
    representative: &'static str,
    product: &'static str,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Region centers (lat, lon).
    let regions: [(&str, f64, f64); 4] = [
        ("서울특별시", 37.5665, 126.9780),
        ("부산광역시", 35.1796, 129.0756),
        ("대구광역시", 35.8714, 128.6014),
        ("인천광역시", 37.4563, 126.7052),
    ];

    let categories: [(&str, &[&str]); 4] = [
        ("음식점업", &["분식", "한식", "커피"]),
        ("소매업", &["의류", "문구", "식료품"]),
        ("제조업", &["금속부품", "포장재", "가구"]),
        ("교육 서비스업", &["보습학원", "외국어학원"]),
    ];

    let representatives = ["김민준", "이서연", "박지훈", "최수아", "정도윤"];

    let mut rows: Vec<SampleRow> = Vec::new();
    let mut row_id: usize = 0;

    for &(region, center_lat, center_lon) in &regions {
        for &(category, products) in &categories {
            let count = 20 + rng.next_usize(40);
            for _ in 0..count {
                row_id += 1;

                // Roughly 3% of rows lack coordinates, like the real export.
                let (latitude, longitude) = if rng.next_f64() < 0.03 {
                    (None, None)
                } else {
                    (
                        Some(rng.gauss(center_lat, 0.05)),
                        Some(rng.gauss(center_lon, 0.05)),
                    )
                };

                rows.push(SampleRow {
                    region,
                    category,
                    business_name: format!("상호 {row_id:04}"),
                    representative: representatives[rng.next_usize(representatives.len())],
                    product: products[rng.next_usize(products.len())],
                    latitude,
                    longitude,
                });
            }
        }
    }

    write_csv(&rows).expect("Failed to write data.csv");
    write_parquet(&rows).expect("Failed to write data.parquet");

    println!(
        "Wrote {} records across {} regions to data.csv and data.parquet",
        rows.len(),
        regions.len()
    );
}

fn write_csv(rows: &[SampleRow]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path("data.csv")?;
    writer.write_record([
        "광역",
        "산업분류_표준산업분류중분류",
        "사업체명",
        "대표자명",
        "제품_주생산품",
        "좌표_위도",
        "좌표_경도",
    ])?;
    for row in rows {
        let latitude = row.latitude.map(|v| v.to_string()).unwrap_or_default();
        let longitude = row.longitude.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([
            row.region,
            row.category,
            row.business_name.as_str(),
            row.representative,
            row.product,
            latitude.as_str(),
            longitude.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow]) -> parquet::errors::Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("region", DataType::Utf8, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("business_name", DataType::Utf8, false),
        Field::new("representative", DataType::Utf8, false),
        Field::new("product", DataType::Utf8, false),
        Field::new("latitude", DataType::Float64, true),
        Field::new("longitude", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.region).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.category).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.business_name.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.representative).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.product).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.latitude).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.longitude).collect::<Vec<_>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create("data.parquet").expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
