//! Brazilian geography reference tables used for entity extraction.

/// State abbreviation → full name.
pub const BRAZILIAN_STATES: [(&str, &str); 27] = [
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AP", "Amapá"),
    ("AM", "Amazonas"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MT", "Mato Grosso"),
    ("MS", "Mato Grosso do Sul"),
    ("MG", "Minas Gerais"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PR", "Paraná"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RS", "Rio Grande do Sul"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("SC", "Santa Catarina"),
    ("SP", "São Paulo"),
    ("SE", "Sergipe"),
    ("TO", "Tocantins"),
];

/// Cities scanned for by the entity extractor: lowercase form → display form.
pub const MAJOR_CITIES: [(&str, &str); 12] = [
    ("são paulo", "São Paulo"),
    ("rio de janeiro", "Rio de Janeiro"),
    ("brasília", "Brasília"),
    ("salvador", "Salvador"),
    ("fortaleza", "Fortaleza"),
    ("belo horizonte", "Belo Horizonte"),
    ("manaus", "Manaus"),
    ("curitiba", "Curitiba"),
    ("recife", "Recife"),
    ("porto alegre", "Porto Alegre"),
    ("belém", "Belém"),
    ("goiânia", "Goiânia"),
];

/// Look up a state's full name by its two-letter abbreviation.
pub fn state_name(abbreviation: &str) -> Option<&'static str> {
    let upper = abbreviation.to_uppercase();
    BRAZILIAN_STATES
        .iter()
        .find(|(abbr, _)| *abbr == upper)
        .map(|(_, name)| *name)
}
