pub mod errors;
pub mod model;
mod reader;
pub mod schema;

pub use errors::ParserError;
pub use model::{MovieColumns, RawMovieFrame};
pub use reader::{parse_movie_csv, ColumnLayout};
pub use schema::{MovieColumn, GENRE_SEPARATOR, MOVIE_COLUMNS};

#[cfg(test)]
mod tests;
