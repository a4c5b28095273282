pub mod loaders;
pub mod row;

pub use loaders::read_csv;
pub use row::{CsvTable, Row, ICEBREAKER_COLUMN};
