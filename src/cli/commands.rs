use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::{Dataset, StationRecord};
use crate::processors::{submission_records, PipelineOutput, Source, StationPipeline};
use crate::readers::{RegisterReader, TemplateReader};
use crate::register::{RegisterClient, SubmissionContext};
use crate::utils::filename::{generate_default_map_filename, generate_default_records_filename};
use crate::utils::progress::ProgressReporter;
use crate::writers::{write_records, MapLayerWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let pipeline = StationPipeline::new()?.with_default_radius(settings.default_radius);

    match cli.command {
        Commands::Normalize { input, output } => {
            println!("Normalizing station template...");
            println!("Input file: {}", input.display());

            let out = normalize_file(&pipeline, &settings, &input, Source::Template)?;
            println!("\n{}", out.report.summary());

            let output = output.unwrap_or_else(|| generate_default_records_filename(&input));
            write_records(&out.records, &out.report, &output)?;
            println!("\nWrote {} records to {}", out.records.len(), output.display());
        }

        Commands::Map {
            register,
            overlay,
            output,
        } => {
            let register_path = register.unwrap_or_else(|| settings.register_path.clone());
            println!("Building station map...");
            println!("Register: {}", register_path.display());

            let register_out =
                normalize_file(&pipeline, &settings, &register_path, Source::Register)?;

            let overlay_records = match overlay {
                Some(path) => load_overlay(&pipeline, &settings, path),
                None => None,
            };

            let writer = MapLayerWriter::new();
            let document =
                writer.build_document(&register_out.records, overlay_records.as_deref());
            let output = output.unwrap_or_else(generate_default_map_filename);
            writer.write(&document, &output)?;

            for layer in &document.layers {
                println!("  {}: {} markers", layer.name, layer.rows.len());
            }
            println!("Map written to {}", output.display());
        }

        Commands::Submit { input, dry_run } => {
            println!("Submitting stations from {}", input.display());

            let out = normalize_file(&pipeline, &settings, &input, Source::Template)?;
            println!("\n{}", out.report.summary());

            let records = submission_records(&out.records)?;
            if dry_run {
                println!("\nDry run - {} records ready, nothing posted", records.len());
                return Ok(());
            }

            let context = SubmissionContext::from_settings(&settings, Some(input.clone()))?;
            let client = RegisterClient::new(context)?;

            let progress =
                ProgressReporter::new(records.len() as u64, "Submitting stations...", false);
            let summary = client.submit_all(&records, Some(&progress)).await?;
            progress.finish_with_message("Submission complete");

            println!("\n{}", summary.summary());
        }

        Commands::Inspect { input, source } => {
            let source = Source::from(source);
            println!("Inspecting {} file: {}", source, input.display());

            let out = normalize_file(&pipeline, &settings, &input, source)?;
            println!("\n{}", out.report.summary());

            let unplaced: Vec<&str> = out
                .records
                .iter()
                .filter(|r| !r.is_placeable())
                .map(|r| r.preferred_name.as_str())
                .collect();
            if !unplaced.is_empty() {
                println!("\nStations without position:");
                for name in unplaced {
                    println!("  - {}", name);
                }
            }
        }
    }

    Ok(())
}

/// Read a file as the given source and run it through the pipeline
pub fn normalize_file(
    pipeline: &StationPipeline,
    settings: &Settings,
    path: &Path,
    source: Source,
) -> Result<PipelineOutput> {
    let dataset = read_dataset(settings, path, source)?;
    pipeline.run(dataset, source)
}

fn read_dataset(settings: &Settings, path: &Path, source: Source) -> Result<Dataset> {
    match source {
        Source::Register => {
            RegisterReader::with_encoding_label(&settings.register_encoding)?.read(path)
        }
        Source::Template => TemplateReader::with_sheet(&settings.template_sheet)
            .with_fallback_encoding(&settings.template_encoding)?
            .read(path),
    }
}

/// Overlay problems only cost the map its extra layer
fn load_overlay(
    pipeline: &StationPipeline,
    settings: &Settings,
    path: PathBuf,
) -> Option<Vec<StationRecord>> {
    match normalize_file(pipeline, settings, &path, Source::Template) {
        Ok(out) => {
            info!(records = out.records.len(), "Loaded overlay stations");
            Some(out.records)
        }
        Err(e) => {
            let err = ProcessingError::Overlay {
                path,
                source: Box::new(e),
            };
            warn!(error = %err, "Skipping overlay layer");
            println!("⚠️  {}", err);
            None
        }
    }
}
