/// Titles and staff names that are never the author.
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "Dr",
    "Ingeniero",
    "Ing",
    "Licenciado",
    "Lic",
    "MSc",
    "Mg",
    "Profesor",
    "Prof",
    "Hernán Borré",
    "Hernan Borre",
    "Hernan",
    "Borre",
    "Maximiliano Bracho",
    "Maximiliano",
    "Bracho",
];

/// Words that cover pages glue onto a student's name.
pub const DEFAULT_NOISE_TOKENS: &[&str] = &[
    "Alumno",
    "Alumna",
    "Alumnos",
    "Estudiante",
    "Legajo",
    "Nombre",
    "Apellido",
    "Autor",
    "Autora",
    "Materia",
    "Asignatura",
    "Curso",
    "Cátedra",
    "Carrera",
    "Departamento",
    "Facultad",
    "Universidad",
];

/// Author inference configuration.
#[derive(Debug, Clone)]
pub struct AuthorConfig {
    /// A candidate containing any of these (as a substring) is discarded.
    pub excluded_names: Vec<String>,
    /// Whole tokens removed from the chosen name, ignoring case.
    pub noise_tokens: Vec<String>,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            excluded_names: DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),
            noise_tokens: DEFAULT_NOISE_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AuthorConfig {
    pub fn new(excluded_names: Vec<String>, noise_tokens: Vec<String>) -> Self {
        Self {
            excluded_names,
            noise_tokens,
        }
    }

    pub fn with_excluded_names(mut self, names: Vec<String>) -> Self {
        self.excluded_names = names;
        self
    }

    pub fn with_noise_tokens(mut self, tokens: Vec<String>) -> Self {
        self.noise_tokens = tokens;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.excluded_names.iter().any(|n| n.trim().is_empty()) {
            return Err("excluded names cannot contain empty entries".to_string());
        }
        if self.noise_tokens.iter().any(|t| t.trim().is_empty()) {
            return Err("noise tokens cannot contain empty entries".to_string());
        }
        Ok(())
    }
}
