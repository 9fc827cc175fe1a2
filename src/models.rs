pub mod address;
pub mod customer;
pub mod product;
pub mod sale;
pub mod supplier;

use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

// O driver SQLite do sqlx não tem codec para Decimal; valores monetários são
// gravados como TEXT e convertidos aqui na leitura.
pub(crate) fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    raw.parse::<Decimal>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn decimal_opt_column(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<Decimal>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| {
        value.parse::<Decimal>().map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
    })
    .transpose()
}
