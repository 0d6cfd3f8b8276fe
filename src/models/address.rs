use clap::ValueEnum;

/// One of the address attributes written back into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    PostalCode,
    Neighborhood,
    City,
    State,
    Street,
}

impl AddressField {
    pub const ALL: [AddressField; 5] = [
        AddressField::PostalCode,
        AddressField::Neighborhood,
        AddressField::City,
        AddressField::State,
        AddressField::Street,
    ];

    /// Output column name for this field.
    pub fn column_name(self) -> &'static str {
        match self {
            AddressField::PostalCode => "CEP",
            AddressField::Neighborhood => "Bairro",
            AddressField::City => "Cidade",
            AddressField::State => "UF",
            AddressField::Street => "Logradouro",
        }
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Address attributes from a reverse lookup. Empty string means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields {
    pub postal_code: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub street: String,
}

impl AddressFields {
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::PostalCode => &self.postal_code,
            AddressField::Neighborhood => &self.neighborhood,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Street => &self.street,
        }
    }

    pub fn has_postal_code(&self) -> bool {
        !self.postal_code.trim().is_empty()
    }
}

/// Which address columns a fill run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FieldSelection {
    /// Only the postal code (CEP)
    PostalCode,
    /// CEP, Bairro, Cidade, UF and Logradouro
    #[default]
    Full,
}

impl FieldSelection {
    pub fn fields(self) -> &'static [AddressField] {
        match self {
            FieldSelection::PostalCode => &[AddressField::PostalCode],
            FieldSelection::Full => &AddressField::ALL,
        }
    }

    pub fn column_names(self) -> impl Iterator<Item = &'static str> {
        self.fields().iter().map(|f| f.column_name())
    }

    /// Suffix appended to the input file stem for the default output path.
    pub fn output_suffix(self) -> &'static str {
        match self {
            FieldSelection::PostalCode => "_com_CEPs.csv",
            FieldSelection::Full => "_com_enderecos.csv",
        }
    }
}
