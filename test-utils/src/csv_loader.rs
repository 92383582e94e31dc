use std::error::Error;
use std::path::Path;

use csv::Reader;

use common::Sample;

/// Columns of the recorded accelerometer files
#[repr(usize)]
#[derive(Debug, Clone, Copy)]
pub enum CsvFileColumn {
    Timestamp,
    XAccel,
    YAccel,
    ZAccel,
}

impl From<CsvFileColumn> for usize {
    fn from(value: CsvFileColumn) -> Self {
        value as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct CsvColumnMapper {
    columns: Vec<usize>,
}

impl CsvColumnMapper {
    pub fn new() -> Self {
        Self { columns: vec![] }
    }

    pub fn columns(&self) -> Vec<usize> {
        self.columns.clone()
    }

    pub fn add_timestamp(&mut self) -> &mut Self {
        self.columns.push(CsvFileColumn::Timestamp.into());
        self
    }

    pub fn add_accel(&mut self) -> &mut Self {
        self.columns.push(CsvFileColumn::XAccel.into());
        self.columns.push(CsvFileColumn::YAccel.into());
        self.columns.push(CsvFileColumn::ZAccel.into());
        self
    }
}

pub fn load_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Vec<f64> = record
            .iter()
            .filter_map(|s| s.parse::<f64>().ok())
            .collect();
        data.push(row);
    }

    Ok(data)
}

pub fn load_csv_columns<T: TryFrom<Vec<f64>>, P: AsRef<Path>>(
    file_path: P,
    columns: &[usize],
) -> Result<Vec<T>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    let data = load_csv(file_path)?;

    data.into_iter()
        .map(|row| -> Result<T, Box<dyn Error>> {
            let values = columns
                .iter()
                .map(|&i| {
                    row.get(i)
                        .copied()
                        .ok_or_else(|| format!("Column index {} out of bounds", i))
                })
                .collect::<Result<Vec<f64>, String>>()?;
            T::try_from(values).map_err(|_| "Failed to convert to T".into())
        })
        .collect()
}

/// Loads the x, y, z accelerometer columns as samples
pub fn load_samples<P: AsRef<Path>>(file_path: P) -> Result<Vec<Sample>, Box<dyn Error>> {
    let mut mapper = CsvColumnMapper::new();
    mapper.add_accel();
    load_csv_columns::<Sample, _>(file_path, &mapper.columns())
}
