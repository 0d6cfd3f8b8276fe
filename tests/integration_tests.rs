use cep_filler::cli::{run_fill, FillJob};
use cep_filler::geocoder::{GeocodeError, ReverseGeocoder};
use cep_filler::models::{AddressFields, Coordinate, EnrichConfig, FieldSelection};
use cep_filler::processors::Pacer;
use cep_filler::ProcessingError;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Answers every lookup with the same address and counts the calls.
struct FixedGeocoder {
    address: AddressFields,
    calls: AtomicUsize,
}

impl FixedGeocoder {
    fn new(postal_code: &str, city: &str) -> Self {
        Self {
            address: AddressFields {
                postal_code: postal_code.to_string(),
                neighborhood: "Morumbi".to_string(),
                city: city.to_string(),
                state: "São Paulo".to_string(),
                street: "Rua Marechal Hastimphilo de Moura".to_string(),
            },
            calls: AtomicUsize::new(0),
        }
    }
}

impl ReverseGeocoder for &FixedGeocoder {
    async fn reverse(&self, _coordinate: Coordinate) -> Result<AddressFields, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.address.clone())
    }
}

struct NoPause;

impl Pacer for NoPause {
    async fn pause(&self, _duration: Duration) {}
}

fn job(input: &Path, fields: FieldSelection) -> FillJob {
    FillJob {
        input_file: input.to_path_buf(),
        output_path: None,
        config: EnrichConfig {
            sleep_seconds: 0.0,
            fields,
            ..EnrichConfig::default()
        },
    }
}

#[tokio::test]
async fn test_fill_three_rows() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("imoveis.csv");
    fs::write(
        &input,
        "nome,latitude_centro,longitude_centro,CEP\n\
         A,-23.60,-46.72,05651-000\n\
         B,-23.61,-46.73,\n\
         C,sem dado,-46.74,\n",
    )
    .unwrap();

    let geocoder = FixedGeocoder::new("05652-000", "São Paulo");
    let report = run_fill(&job(&input, FieldSelection::Full), &geocoder, NoPause)
        .await
        .unwrap();

    assert_eq!(report.summary.filled, 1);
    assert_eq!(report.summary.total, 3);
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        report.output_path,
        temp_dir.path().join("imoveis_com_enderecos.csv")
    );

    let bytes = fs::read(&report.output_path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert_eq!(
        text,
        "nome,latitude_centro,longitude_centro,CEP,Bairro,Cidade,UF,Logradouro\n\
         A,-23.60,-46.72,05651-000,,,,\n\
         B,-23.61,-46.73,05652-000,Morumbi,São Paulo,São Paulo,Rua Marechal Hastimphilo de Moura\n\
         C,sem dado,-46.74,,,,,\n"
    );
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("pontos.csv");
    fs::write(&input, "lat,lon\n-23.6,-46.7\n-23.7,-46.8\n").unwrap();

    let first_geocoder = FixedGeocoder::new("05727-000", "São Paulo");
    let first = run_fill(
        &job(&input, FieldSelection::PostalCode),
        &first_geocoder,
        NoPause,
    )
    .await
    .unwrap();
    assert_eq!(first.summary.filled, 2);
    assert_eq!(first.output_path, temp_dir.path().join("pontos_com_CEPs.csv"));

    let mut second_job = job(&first.output_path, FieldSelection::PostalCode);
    second_job.output_path = Some(temp_dir.path().join("again.csv"));
    let second_geocoder = FixedGeocoder::new("99999-999", "Outra");
    let second = run_fill(&second_job, &second_geocoder, NoPause)
        .await
        .unwrap();

    assert_eq!(second_geocoder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(second.summary.filled, 0);
    assert_eq!(
        fs::read(&first.output_path).unwrap(),
        fs::read(&second.output_path).unwrap()
    );
}

#[tokio::test]
async fn test_latin1_input_is_enriched() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("latin1.csv");
    fs::write(&input, b"Regi\xE3o,lat,lng\nSul,-23.6,-46.7\n").unwrap();

    let geocoder = FixedGeocoder::new("05727-000", "São Paulo");
    let report = run_fill(&job(&input, FieldSelection::PostalCode), &geocoder, NoPause)
        .await
        .unwrap();

    let text = fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(text, "\u{feff}Região,lat,lng,CEP\nSul,-23.6,-46.7,05727-000\n");
}

#[tokio::test]
async fn test_undetectable_columns() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("sem_coords.csv");
    fs::write(&input, "Y,LNG_centro\n1,2\n").unwrap();

    let geocoder = FixedGeocoder::new("05727-000", "São Paulo");
    let err = run_fill(&job(&input, FieldSelection::Full), &geocoder, NoPause)
        .await
        .unwrap_err();

    assert!(matches!(err, ProcessingError::ColumnsNotDetected { .. }));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    assert!(!temp_dir.path().join("sem_coords_com_enderecos.csv").exists());
}

#[tokio::test]
async fn test_missing_input_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("nao_existe.csv");

    let geocoder = FixedGeocoder::new("05727-000", "São Paulo");
    let err = run_fill(&job(&input, FieldSelection::Full), &geocoder, NoPause)
        .await
        .unwrap_err();

    assert!(matches!(err, ProcessingError::InputNotFound(_)));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_reading() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("pontos.csv");
    fs::write(&input, "lat,lon\n-23.6,-46.7\n").unwrap();

    let mut bad_job = job(&input, FieldSelection::Full);
    bad_job.config.log_interval_rows = 0;

    let geocoder = FixedGeocoder::new("05727-000", "São Paulo");
    let err = run_fill(&bad_job, &geocoder, NoPause).await.unwrap_err();
    assert!(matches!(err, ProcessingError::Validation(_)));
}
