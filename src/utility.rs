use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

pub fn get_progressbar_long_jobs(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} estimated remaining: {eta_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

pub fn read_bincode_with_spinner<T: DeserializeOwned>(job_name: &str, path: &Path) -> Result<T> {
    let spinner = get_progressspinner(&format!("Reading {}", job_name));
    let reader = BufReader::new(File::open(path)?);
    let data = bincode::deserialize_from(reader)?;
    spinner.finish_and_clear();
    Ok(data)
}

pub fn write_bincode_with_spinner<T: Serialize>(job_name: &str, path: &Path, data: &T) -> Result<()> {
    let spinner = get_progressspinner(&format!("Writing {}", job_name));
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, data)?;
    spinner.finish_and_clear();
    Ok(())
}
