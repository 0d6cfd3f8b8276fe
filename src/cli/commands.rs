use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;

use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::geocoder::{ForwardGeocoder, NominatimClient, ReverseGeocoder};
use crate::models::{ClientConfig, EnrichConfig, FieldSelection};
use crate::processors::{CoordinateColumns, EnrichSummary, Pacer, RowEnricher, TokioPacer};
use crate::readers::TableReader;
use crate::utils::filename::generate_default_output_path;
use crate::writers::CsvWriter;

/// Everything needed for one `fill` run.
#[derive(Debug, Clone)]
pub struct FillJob {
    pub input_file: PathBuf,
    pub output_path: Option<PathBuf>,
    pub config: EnrichConfig,
}

/// Outcome of a `fill` run.
#[derive(Debug, Clone)]
pub struct FillReport {
    pub output_path: PathBuf,
    pub summary: EnrichSummary,
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Fill {
            input_file,
            output_path,
            sleep_seconds,
            user_agent_string,
            log_interval_rows,
            fields,
            nominatim_url,
        } => {
            let started = Instant::now();
            let client = build_client(nominatim_url, user_agent_string)?;
            let job = FillJob {
                input_file,
                output_path,
                config: EnrichConfig {
                    sleep_seconds,
                    log_interval_rows,
                    fields,
                    verbose: cli.verbose,
                },
            };

            let report = run_fill(&job, client, TokioPacer).await?;

            if cli.verbose {
                println!("{}", report.summary.detailed_summary());
            }
            println!(
                "OK: {}/{} CEPs preenchidos -> {} | tempo total: {:.0}s",
                report.summary.filled,
                report.summary.total,
                report.output_path.display(),
                started.elapsed().as_secs_f64()
            );
        }

        Commands::Geocode {
            address,
            country_codes,
            user_agent_string,
            nominatim_url,
        } => {
            let client = build_client(nominatim_url, user_agent_string)?;

            match client.search(&address, &country_codes).await? {
                Some(coordinate) => println!(
                    "Latitude: {}, Longitude: {}",
                    coordinate.latitude, coordinate.longitude
                ),
                None => println!("Endereço não encontrado."),
            }
        }
    }

    Ok(())
}

/// Load, enrich and write one table.
///
/// # Errors
///
/// Fails before any lookup if the input is missing or unreadable, the
/// configuration is invalid, or the coordinate columns cannot be detected.
/// Per-row lookup failures never abort the run.
pub async fn run_fill<G, P>(job: &FillJob, geocoder: G, pacer: P) -> Result<FillReport>
where
    G: ReverseGeocoder,
    P: Pacer,
{
    job.config.validate()?;

    let (mut table, encoding) = TableReader::new().read_table(&job.input_file)?;
    info!(
        "Read {} rows from {} ({})",
        table.len(),
        job.input_file.display(),
        encoding
    );

    table.ensure_columns(job.config.fields.column_names());
    let columns = CoordinateColumns::detect(&table)?;

    let enricher = RowEnricher::new(geocoder, pacer, job.config.clone());
    let summary = enricher.enrich(&mut table, columns).await;

    let output_path = resolve_output_path(&job.input_file, job.output_path.as_deref(), job.config.fields);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    CsvWriter::new().write_table(&table, &output_path)?;
    debug!("Wrote {}", output_path.display());

    Ok(FillReport {
        output_path,
        summary,
    })
}

fn resolve_output_path(input: &Path, explicit: Option<&Path>, fields: FieldSelection) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| generate_default_output_path(input, fields))
}

fn build_client(base_url: String, user_agent: String) -> Result<NominatimClient> {
    let config = ClientConfig {
        base_url,
        user_agent,
    };
    config.validate()?;
    Ok(NominatimClient::new(&config)?)
}

/// Verbose runs log this crate at DEBUG; dependencies stay at INFO.
fn log_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,cep_filler=debug"
    } else {
        "info"
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directives(verbose)))
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if let Err(e) = installed {
        return Err(ProcessingError::Config(format!(
            "Could not initialize logging: {}",
            e
        )));
    }
    Ok(())
}
