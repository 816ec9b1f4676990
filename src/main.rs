//! Flow Subset entrypoint: two streaming passes over a labeled flow CSV, then
//! schema normalization. Prints a one-line JSON summary on stdout.

use clap::Parser;
use flow_subset::{
    cli::{Cli, Commands},
    config::SubsetConfig,
    logging::StructuredLogger,
    pipeline::{self, Pipeline},
    schema::{write_canonical, SchemaNormalizer},
};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(SubsetConfig::default_path);
    let mut config = SubsetConfig::load(&config_path);
    cli.apply_logging(&mut config);

    StructuredLogger::init(config.log.json, &config.log.level);
    let mut stdout = std::io::stdout();

    match &cli.command {
        Commands::Run(args) => {
            args.apply(&mut config);
            let pipeline = Pipeline::new(&args.input, &config.output.dir, config.sampling.clone());
            let summary = pipeline.run()?;
            info!(
                raw = %pipeline.output_path(pipeline::RAW_SUBSET_FILE).display(),
                canonical = %pipeline.output_path(pipeline::CANONICAL_SUBSET_FILE).display(),
                "artifacts written"
            );
            StructuredLogger::emit_json(&summary, &mut stdout)?;
        }
        Commands::Count(args) => {
            let chunk_size = args.chunk_size.unwrap_or(config.sampling.chunk_size);
            let counts = pipeline::count_labels(&args.input, chunk_size)?;
            StructuredLogger::emit_json(&counts, &mut stdout)?;
        }
        Commands::Normalize(args) => {
            let records = SchemaNormalizer::normalize_file(&args.input, config.sampling.chunk_size)?;
            if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            write_canonical(BufWriter::new(File::create(&args.out)?), &records)?.flush()?;
            info!(out = %args.out.display(), rows = records.len(), "canonical subset written");
            StructuredLogger::emit_json(
                &serde_json::json!({ "out": args.out, "rows": records.len() }),
                &mut stdout,
            )?;
        }
    }

    Ok(())
}
