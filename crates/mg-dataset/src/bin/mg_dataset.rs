//! Builds a labeled feature table from a directory of magnetogram images.
//!
//! Each 8-bit grayscale PNG is decoded, offset so zero flux sits at zero,
//! and run through the feature pipeline on a fixed-size worker pool. One CSV
//! row per image: 29 features, the flare label (or the `NaN` sentinel), and
//! the base filename. Images that fail to decode or are too small for the
//! wavelet decomposition are logged with their filename and skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use mag_features::{FeatureRecord, Image, Label, extract_features};
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "mg_dataset")]
#[command(about = "Extract magnetic complexity features from a magnetogram dataset")]
struct Cli {
    /// Dataset directory, crawled recursively.
    #[arg(long)]
    images: PathBuf,
    /// Label table: `basename,flare-class` CSV. Omit to leave rows unlabeled.
    #[arg(long)]
    labels: Option<PathBuf>,
    /// Output CSV path.
    #[arg(long)]
    out: PathBuf,
    /// Worker pool size.
    #[arg(long, default_value_t = 40)]
    jobs: usize,
    /// Image file extension to collect.
    #[arg(long, default_value = "png")]
    extension: String,
}

/// Explicit run parameters; nothing in this driver is configured through
/// globals.
#[derive(Debug, Clone)]
struct DatasetConfig {
    images: PathBuf,
    labels: Option<PathBuf>,
    out: PathBuf,
    jobs: usize,
    extension: String,
}

impl From<Cli> for DatasetConfig {
    fn from(cli: Cli) -> Self {
        Self {
            images: cli.images,
            labels: cli.labels,
            out: cli.out,
            jobs: cli.jobs.max(1),
            extension: cli.extension,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DatasetConfig::from(Cli::parse());
    run(&config)
}

fn run(config: &DatasetConfig) -> Result<()> {
    let labels = match &config.labels {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening label table {}", path.display()))?;
            let table = parse_labels(file)?;
            info!(entries = table.len(), "loaded label table");
            Some(table)
        }
        None => None,
    };

    let files = collect_image_files(&config.images, &config.extension);
    info!(files = files.len(), "collected image files");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .context("building worker pool")?;

    let records: Vec<FeatureRecord> = pool.install(|| {
        files
            .par_iter()
            .filter_map(|path| match build_record(path, labels.as_ref()) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "skipping image");
                    None
                }
            })
            .collect()
    });

    let out = File::create(&config.out)
        .with_context(|| format!("creating output file {}", config.out.display()))?;
    let mut writer = BufWriter::new(out);
    for record in &records {
        writeln!(writer, "{record}").context("writing feature record")?;
    }
    writer.flush().context("flushing output file")?;

    info!(
        written = records.len(),
        skipped = files.len() - records.len(),
        out = %config.out.display(),
        "feature table complete"
    );
    Ok(())
}

fn parse_labels(reader: impl std::io::Read) -> Result<HashMap<String, String>> {
    let mut table = HashMap::new();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    for row in csv_reader.records() {
        let row = row.context("reading label table row")?;
        let (Some(name), Some(class)) = (row.get(0), row.get(1)) else {
            continue;
        };
        table.insert(name.trim().to_string(), class.trim().to_string());
    }

    Ok(table)
}

fn collect_image_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "error accessing entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

fn build_record(path: &Path, labels: Option<&HashMap<String, String>>) -> Result<FeatureRecord> {
    let file_name = base_name(path);
    let image = decode_magnetogram(path)?;
    let features =
        extract_features(&image).with_context(|| format!("extracting features of {file_name}"))?;

    let label = match labels {
        Some(table) => table
            .get(&file_name)
            .map(|class| Label::from_class_token(class))
            .unwrap_or(Label::Unlabeled),
        None => Label::Unlabeled,
    };

    Ok(FeatureRecord {
        features,
        label,
        file_name,
    })
}

/// Decodes an 8-bit grayscale image and recenters it so that the unsigned
/// pixel midpoint (128) maps to zero flux.
fn decode_magnetogram(path: &Path) -> Result<Image<f64>> {
    let decoded = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .into_luma8();

    let width = decoded.width() as usize;
    let height = decoded.height() as usize;
    let data: Vec<f64> = decoded.into_raw().iter().map(|&v| f64::from(v) - 128.0).collect();

    Image::from_vec(width, height, data).context("building image buffer")
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
