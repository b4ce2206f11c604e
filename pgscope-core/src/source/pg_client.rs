use crate::matrix::Matrix;
use crate::source::{SourceError, StatSource};
use ::postgres::{Client, SimpleQueryMessage};

/// Statistics are read over the simple-query protocol so that every value
/// arrives as text and NULL stays distinct from the empty string.
impl StatSource for Client {
    fn query(&mut self, sql: &str) -> Result<Matrix, SourceError> {
        let mut columns: Vec<String> = Vec::new();
        let mut values = Vec::new();

        for message in self.simple_query(sql)? {
            match message {
                SimpleQueryMessage::RowDescription(description) => {
                    columns = description.iter().map(|c| c.name().to_string()).collect();
                }
                SimpleQueryMessage::Row(row) => {
                    if columns.is_empty() {
                        columns = row.columns().iter().map(|c| c.name().to_string()).collect();
                    }
                    values.push((0..row.len()).map(|i| row.get(i).map(str::to_string)).collect());
                }
                _ => {}
            }
        }

        Ok(Matrix::new(columns, values)?)
    }
}
