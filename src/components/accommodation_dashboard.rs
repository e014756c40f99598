// ============================================================================
// ACCOMMODATION DASHBOARD - Portal del proveedor de alojamiento
// ============================================================================

use yew::prelude::*;

use super::LocationAutocomplete;

#[function_component(AccommodationDashboard)]
pub fn accommodation_dashboard() -> Html {
    let property_location = use_state(String::new);
    let location_error = use_state(|| None::<String>);

    let on_change = {
        let property_location = property_location.clone();
        Callback::from(move |value: String| property_location.set(value))
    };
    let clear_error = {
        let location_error = location_error.clone();
        Callback::from(move |_| location_error.set(None))
    };

    html! {
        <div class="dashboard accommodation-dashboard">
            <h2>{"Portal de alojamiento"}</h2>
            <div class="provider-form">
                <LocationAutocomplete
                    id="property-location"
                    label="Dirección de la propiedad"
                    placeholder="¿Dónde está tu propiedad?"
                    value={(*property_location).clone()}
                    on_change={on_change}
                    on_clear_error={clear_error}
                    error={(*location_error).clone()}
                />
            </div>
        </div>
    }
}
