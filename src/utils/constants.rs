/// URL del SDK de mapas (Google Maps JS + librería Places)
/// Configurada en tiempo de compilación:
/// - Por defecto: SDK público sin clave (desarrollo)
/// - Producción: via MAPS_SDK_URL env var (incluye la API key)
pub const MAPS_SDK_URL: &str = match option_env!("MAPS_SDK_URL") {
    Some(url) => url,
    None => "https://maps.googleapis.com/maps/api/js?libraries=places",
};

/// Restricción de país para las sugerencias de lugares (Sri Lanka)
pub const REGION_FILTER: &str = "lk";

/// Tipo de resultado solicitado al servicio de sugerencias
pub const PLACE_TYPE_FILTER: &str = "geocode";

/// Longitud mínima del texto antes de emitir una búsqueda
pub const MIN_QUERY_LEN: usize = 2;

/// Intervalo fijo entre reintentos al adquirir el cliente del SDK (ms)
pub const CLIENT_RETRY_INTERVAL_MS: u32 = 500;

/// Número máximo de reintentos antes de marcar el servicio como no disponible
pub const CLIENT_RETRY_MAX_ATTEMPTS: u32 = 10;

/// Atributo con el que se marca un tag <script> ya cargado
pub const SCRIPT_LOADED_ATTR: &str = "data-loaded";
