use serde::{Deserialize, Serialize};

/// Sugerencia de lugar producida por el servicio externo.
/// Inmutable: vive hasta que la siguiente consulta la reemplaza
/// o el usuario la selecciona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub main_text: String,
    pub secondary_text: String,
    /// Texto completo que se escribe en el campo al seleccionar
    pub description: String,
}

impl Suggestion {
    pub fn display_text(&self) -> &str {
        &self.description
    }
}

/// Forma JSON de una predicción tal como la entrega el SDK de Places
#[derive(Debug, Clone, Deserialize)]
pub struct PlacePrediction {
    pub place_id: String,
    pub description: String,
    #[serde(default)]
    pub structured_formatting: StructuredFormatting,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuredFormatting {
    #[serde(default)]
    pub main_text: String,
    #[serde(default)]
    pub secondary_text: String,
}

impl From<PlacePrediction> for Suggestion {
    fn from(p: PlacePrediction) -> Self {
        Self {
            id: p.place_id,
            main_text: p.structured_formatting.main_text,
            secondary_text: p.structured_formatting.secondary_text,
            description: p.description,
        }
    }
}
