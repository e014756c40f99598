// ============================================================================
// TRANSPORT DASHBOARD - Portal del proveedor de transporte
// ============================================================================

use yew::prelude::*;

use super::LocationAutocomplete;

#[function_component(TransportDashboard)]
pub fn transport_dashboard() -> Html {
    let base_location = use_state(String::new);

    let on_change = {
        let base_location = base_location.clone();
        Callback::from(move |value: String| base_location.set(value))
    };

    html! {
        <div class="dashboard transport-dashboard">
            <h2>{"Portal de transporte"}</h2>
            <div class="provider-form">
                <LocationAutocomplete
                    id="transport-base"
                    label="Zona de operación"
                    placeholder="Ciudad base de tu flota"
                    value={(*base_location).clone()}
                    on_change={on_change}
                />
            </div>
        </div>
    }
}
