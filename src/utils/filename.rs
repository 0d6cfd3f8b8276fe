use std::path::{Path, PathBuf};

use crate::models::FieldSelection;

/// Default output path: `<input-stem><suffix>` next to the input file,
/// e.g. `imoveis.csv` -> `imoveis_com_enderecos.csv`.
pub fn generate_default_output_path(input: &Path, fields: FieldSelection) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{}{}", stem, fields.output_suffix()))
}
