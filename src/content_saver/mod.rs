//! Content saving utilities for scraped job listings

mod csv_saver;

pub use csv_saver::{csv_file_name, save_jobs_to_csv, write_jobs_csv};
