use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{BusinessRegistry, Record};

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Structured failures while resolving the input schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}' (no known header alias found)")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Header aliases
// ---------------------------------------------------------------------------

// The source data exists in several header spellings (Korean registry
// exports and English re-exports). Every loader resolves columns through
// the same alias tables.
const REGION_ALIASES: &[&str] = &["region", "광역"];
const CATEGORY_ALIASES: &[&str] = &["category", "업종", "산업분류_표준산업분류중분류"];
const BUSINESS_NAME_ALIASES: &[&str] = &["business_name", "사업체명"];
const REPRESENTATIVE_ALIASES: &[&str] = &["representative", "대표자명"];
const PRODUCT_ALIASES: &[&str] = &["product", "제품_주생산품"];
const LATITUDE_ALIASES: &[&str] = &["latitude", "Latitude", "좌표_위도"];
const LONGITUDE_ALIASES: &[&str] = &["longitude", "Longitude", "좌표_경도"];

const REQUIRED: &[(&str, &[&str])] = &[
    ("region", REGION_ALIASES),
    ("category", CATEGORY_ALIASES),
    ("business_name", BUSINESS_NAME_ALIASES),
    ("representative", REPRESENTATIVE_ALIASES),
    ("product", PRODUCT_ALIASES),
];

fn find_alias(names: &[String], aliases: &[&str]) -> Option<usize> {
    names.iter().position(|n| aliases.contains(&n.as_str()))
}

/// Verify every required column is present under some known alias.
/// Coordinate columns are allowed to be absent; such rows simply never map.
fn check_headers(names: &[String]) -> Result<(), SchemaError> {
    for &(field, aliases) in REQUIRED {
        if find_alias(names, aliases).is_none() {
            return Err(SchemaError::MissingColumn(field));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Serde row used by the CSV and JSON loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "광역")]
    region: String,
    #[serde(alias = "업종", alias = "산업분류_표준산업분류중분류")]
    category: String,
    #[serde(alias = "사업체명")]
    business_name: String,
    #[serde(alias = "대표자명")]
    representative: String,
    #[serde(alias = "제품_주생산품")]
    product: String,
    #[serde(default, alias = "Latitude", alias = "좌표_위도")]
    latitude: Option<f64>,
    #[serde(default, alias = "Longitude", alias = "좌표_경도")]
    longitude: Option<f64>,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record {
            region: raw.region,
            category: raw.category,
            business_name: raw.business_name,
            representative: raw.representative,
            product: raw.product,
            // NaN coordinates in the source are treated as missing.
            latitude: raw.latitude.filter(|v| v.is_finite()),
            longitude: raw.longitude.filter(|v| v.is_finite()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a business registry from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the registry export format (Korean or English headers)
/// * `.json`    – `[{ "region": ..., "category": ..., ... }, ...]`
/// * `.parquet` – flat schema with the same columns
pub fn load_file(path: &Path) -> Result<BusinessRegistry> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<BusinessRegistry> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_csv(file)
}

fn read_csv<R: std::io::Read>(input: R) -> Result<BusinessRegistry> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        records.push(raw.into());
    }
    Ok(BusinessRegistry::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON: a top-level array of row objects, keyed by any of
/// the known header aliases.
fn load_json(path: &Path) -> Result<BusinessRegistry> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<BusinessRegistry> {
    let raw: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON records")?;
    Ok(BusinessRegistry::from_records(
        raw.into_iter().map(Into::into).collect(),
    ))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with a flat registry schema.
///
/// String columns may be Utf8 or LargeUtf8; coordinate columns may be any
/// numeric type and may contain nulls. Works with files written by both
/// Pandas (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<BusinessRegistry> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let names: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();

        let region_col = required_column(&batch, &names, "region", REGION_ALIASES)?;
        let category_col = required_column(&batch, &names, "category", CATEGORY_ALIASES)?;
        let business_col = required_column(&batch, &names, "business_name", BUSINESS_NAME_ALIASES)?;
        let representative_col =
            required_column(&batch, &names, "representative", REPRESENTATIVE_ALIASES)?;
        let product_col = required_column(&batch, &names, "product", PRODUCT_ALIASES)?;
        let latitude_col = find_alias(&names, LATITUDE_ALIASES).map(|i| batch.column(i));
        let longitude_col = find_alias(&names, LONGITUDE_ALIASES).map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            records.push(Record {
                region: extract_string(region_col, row)
                    .with_context(|| format!("row {row}: reading region"))?,
                category: extract_string(category_col, row)
                    .with_context(|| format!("row {row}: reading category"))?,
                business_name: extract_string(business_col, row)
                    .with_context(|| format!("row {row}: reading business name"))?,
                representative: extract_string(representative_col, row)
                    .with_context(|| format!("row {row}: reading representative"))?,
                product: extract_string(product_col, row)
                    .with_context(|| format!("row {row}: reading product"))?,
                latitude: latitude_col.and_then(|c| extract_opt_f64(c, row)),
                longitude: longitude_col.and_then(|c| extract_opt_f64(c, row)),
            });
        }
    }

    Ok(BusinessRegistry::from_records(records))
}

// -- Arrow helpers --

fn required_column<'a>(
    batch: &'a RecordBatch,
    names: &[String],
    field: &'static str,
    aliases: &[&str],
) -> Result<&'a Arc<dyn Array>, SchemaError> {
    find_alias(names, aliases)
        .map(|i| batch.column(i))
        .ok_or(SchemaError::MissingColumn(field))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

/// Read a coordinate cell; nulls and non-finite values become `None`.
fn extract_opt_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_any().downcast_ref::<Float64Array>()?.value(row),
        DataType::Float32 => col.as_any().downcast_ref::<Float32Array>()?.value(row) as f64,
        DataType::Int64 => col.as_any().downcast_ref::<Int64Array>()?.value(row) as f64,
        DataType::Int32 => col.as_any().downcast_ref::<Int32Array>()?.value(row) as f64,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;

    const KOREAN_CSV: &str = "\
광역,산업분류_표준산업분류중분류,사업체명,대표자명,제품_주생산품,좌표_위도,좌표_경도
서울특별시,음식점업,한강분식,김민준,분식,37.5,127.0
서울특별시,음식점업,강남김밥,이서연,김밥,,
";

    const ENGLISH_CSV: &str = "\
region,category,business_name,representative,product,Latitude,Longitude
Seoul,Food,Han River Snacks,Kim,Snacks,37.5,127.0
Busan,Retail,Harbor Goods,Lee,Clothing,NaN,129.0
";

    #[test]
    fn csv_with_korean_headers() {
        let registry = read_csv(KOREAN_CSV.as_bytes()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.regions, vec!["서울특별시"]);
        assert_eq!(registry.records[0].business_name, "한강분식");
        assert_eq!(registry.records[0].coordinate(), Some((37.5, 127.0)));
        // Empty coordinate cells become missing.
        assert_eq!(registry.records[1].coordinate(), None);
    }

    #[test]
    fn csv_with_english_headers_normalizes_nan() {
        let registry = read_csv(ENGLISH_CSV.as_bytes()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.records[1].latitude, None);
        assert_eq!(registry.records[1].longitude, Some(129.0));
        assert_eq!(registry.records[1].coordinate(), None);
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let csv = "category,business_name,representative,product\nFood,Shop,Kim,Goods\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn("region"))
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("registry.xlsx")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::UnsupportedExtension("xlsx".to_string()))
        );
    }

    #[test]
    fn json_records_with_mixed_aliases() {
        let json = r#"[
            {"광역": "Seoul", "업종": "Food", "사업체명": "Shop A",
             "대표자명": "Kim", "제품_주생산품": "Snacks",
             "latitude": 37.5, "longitude": 127.0},
            {"region": "Busan", "category": "Retail", "business_name": "Shop B",
             "representative": "Lee", "product": "Clothing",
             "Latitude": null, "Longitude": 129.0}
        ]"#;
        let registry = parse_json(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.records[0].region, "Seoul");
        assert_eq!(registry.records[1].coordinate(), None);
    }

    #[test]
    fn parquet_round_trip() {
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
                Arc::new(StringArray::from(vec!["Seoul", "Busan"])),
                Arc::new(StringArray::from(vec!["Food", "Retail"])),
                Arc::new(StringArray::from(vec!["Shop A", "Shop B"])),
                Arc::new(StringArray::from(vec!["Kim", "Lee"])),
                Arc::new(StringArray::from(vec!["Snacks", "Clothing"])),
                Arc::new(Float64Array::from(vec![Some(37.5), None])),
                Arc::new(Float64Array::from(vec![Some(127.0), Some(129.0)])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let registry = load_file(&path).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.regions, vec!["Busan", "Seoul"]);
        assert_eq!(registry.records[0].coordinate(), Some((37.5, 127.0)));
        assert_eq!(registry.records[1].coordinate(), None);
    }
}
