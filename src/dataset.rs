use crate::errors::DatasetError;
use crate::models::{AccidentRecord, RecordId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tokio::fs;
use tracing::info;

const REQUIRED_COLUMNS: [&str; 15] = [
    "id",
    "data_inversa",
    "latitude",
    "longitude",
    "causa_acidente",
    "tipo_acidente",
    "classificacao_acidente",
    "condicao_metereologica",
    "pessoas",
    "mortos",
    "feridos_leves",
    "feridos_graves",
    "ilesos",
    "ignorados",
    "veiculos",
];

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: u64,
    data_inversa: String,
    latitude: String,
    longitude: String,
    causa_acidente: String,
    tipo_acidente: String,
    classificacao_acidente: String,
    condicao_metereologica: String,
    pessoas: u32,
    mortos: u32,
    feridos_leves: u32,
    feridos_graves: u32,
    ilesos: u32,
    ignorados: u32,
    veiculos: u32,
}

impl CsvRow {
    fn into_record(self) -> Result<AccidentRecord, DatasetError> {
        let timestamp = parse_timestamp(&self.data_inversa).ok_or_else(|| {
            DatasetError::InvalidTimestamp {
                id: self.id,
                value: self.data_inversa.clone(),
            }
        })?;

        Ok(AccidentRecord {
            id: RecordId(self.id),
            timestamp,
            latitude: parse_coordinate(self.id, "latitude", &self.latitude)?,
            longitude: parse_coordinate(self.id, "longitude", &self.longitude)?,
            cause: self.causa_acidente,
            kind: self.tipo_acidente,
            classification: self.classificacao_acidente,
            weather_condition: self.condicao_metereologica,
            people: self.pessoas,
            deaths: self.mortos,
            minor_injuries: self.feridos_leves,
            severe_injuries: self.feridos_graves,
            uninjured: self.ilesos,
            unknown: self.ignorados,
            vehicles: self.veiculos,
        })
    }
}

/// The whole accident table, loaded once and shared read-only.
#[derive(Debug, Default)]
pub struct DatasetStore {
    records: Vec<AccidentRecord>,
    index: HashMap<RecordId, usize>,
}

impl DatasetStore {
    pub fn from_records(records: Vec<AccidentRecord>) -> Result<Self, DatasetError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id, position).is_some() {
                return Err(DatasetError::DuplicateId(record.id.0));
            }
        }
        Ok(Self { records, index })
    }

    pub fn from_csv<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|header| header == **column))
        {
            return Err(DatasetError::MissingColumn(*missing));
        }

        let mut records = Vec::new();
        for result in rdr.deserialize() {
            let row: CsvRow = result?;
            records.push(row.into_record()?);
        }

        Self::from_records(records)
    }

    pub fn records(&self) -> &[AccidentRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&AccidentRecord> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub async fn load_dataset(path: &Path) -> Result<DatasetStore, DatasetError> {
    let bytes = fs::read(path).await?;
    let store = DatasetStore::from_csv(bytes.as_slice())?;
    info!("loaded {} accident records from {}", store.len(), path.display());
    Ok(store)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

// Source files use a decimal comma for coordinates.
fn parse_coordinate(id: u64, field: &'static str, value: &str) -> Result<f64, DatasetError> {
    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| DatasetError::InvalidCoordinate {
            id,
            field,
            value: value.to_string(),
        })
}
