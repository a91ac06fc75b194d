pub mod cleaning;
pub mod config;
pub mod dataset;
pub mod decades;
pub mod error;
pub mod genres;
pub mod outputs;
pub mod pipelines;
pub mod profile;
pub mod statistics;
pub mod types;

pub use cleaning::{clean_movies, CleanedMovies, CleaningPolicy, CleaningReport};
pub use config::{AnalysisConfig, OutputFormat};
pub use dataset::{load_dataset, LoadedDataset, SourceInfo};
pub use error::{AnalysisError, Result};
pub use pipelines::{run_analysis, AnalysisOutput};
pub use types::MovieRecord;
