/// Portales de la plataforma
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    Traveler,
    TransportProvider,
    AccommodationProvider,
    Admin,
}

impl Portal {
    pub const ALL: [Portal; 4] = [
        Portal::Traveler,
        Portal::TransportProvider,
        Portal::AccommodationProvider,
        Portal::Admin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Portal::Traveler => "Viajero",
            Portal::TransportProvider => "Transporte",
            Portal::AccommodationProvider => "Alojamiento",
            Portal::Admin => "Admin",
        }
    }
}
