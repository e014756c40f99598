// ============================================================================
// TRAVELER DASHBOARD - Búsqueda de viajes
// ============================================================================
// Dos widgets de autocompletado comparten una única carga del SDK de mapas

use yew::prelude::*;

use super::LocationAutocomplete;

#[function_component(TravelerDashboard)]
pub fn traveler_dashboard() -> Html {
    let origin = use_state(String::new);
    let destination = use_state(String::new);
    let origin_error = use_state(|| None::<String>);
    let destination_error = use_state(|| None::<String>);

    let on_origin_change = {
        let origin = origin.clone();
        Callback::from(move |value: String| origin.set(value))
    };
    let on_destination_change = {
        let destination = destination.clone();
        Callback::from(move |value: String| destination.set(value))
    };

    // La interacción del usuario limpia el error de validación externo
    let clear_origin_error = {
        let origin_error = origin_error.clone();
        Callback::from(move |_| origin_error.set(None))
    };
    let clear_destination_error = {
        let destination_error = destination_error.clone();
        Callback::from(move |_| destination_error.set(None))
    };

    let on_search = {
        let origin = origin.clone();
        let destination = destination.clone();
        let origin_error = origin_error.clone();
        let destination_error = destination_error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut valid = true;
            if origin.is_empty() {
                origin_error.set(Some("Indica un punto de partida".to_string()));
                valid = false;
            }
            if destination.is_empty() {
                destination_error.set(Some("Indica un destino".to_string()));
                valid = false;
            }
            if valid {
                log::info!("🔍 Búsqueda de viaje: {} → {}", *origin, *destination);
            }
        })
    };

    html! {
        <div class="dashboard traveler-dashboard">
            <h2>{"Planifica tu viaje"}</h2>
            <form class="trip-search" onsubmit={on_search}>
                <LocationAutocomplete
                    id="trip-origin"
                    label="Origen"
                    placeholder="¿Desde dónde sales?"
                    value={(*origin).clone()}
                    on_change={on_origin_change}
                    on_clear_error={clear_origin_error}
                    error={(*origin_error).clone()}
                />
                <LocationAutocomplete
                    id="trip-destination"
                    label="Destino"
                    placeholder="¿A dónde quieres ir?"
                    value={(*destination).clone()}
                    on_change={on_destination_change}
                    on_clear_error={clear_destination_error}
                    error={(*destination_error).clone()}
                />
                <button type="submit" class="btn-search">{"Buscar"}</button>
            </form>
        </div>
    }
}
