// ============================================================================
// USE LOCATION SUGGESTIONS HOOK - Coordinador del autocompletado
// ============================================================================
// Une la señal de readiness del SDK, la adquisición del cliente (reintentos
// acotados) y el ViewModel puro que gobierna la lista de sugerencias.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::hooks::use_script;
use crate::models::Suggestion;
use crate::services::{SuggestionOutcome, SuggestionProvider};
use crate::utils::MAPS_SDK_URL;
use crate::viewmodels::AutocompleteViewModel;

type SharedProvider = Rc<RefCell<Option<Rc<dyn SuggestionProvider>>>>;

/// Handle del hook
#[derive(Clone)]
pub struct UseLocationSuggestionsHandle {
    pub suggestions: Vec<Suggestion>,
    pub visible: bool,
    pub loading: bool,
    /// Terminal: el SDK no cargó o el cliente nunca apareció tras los reintentos
    pub service_unavailable: bool,
    pub on_input: Callback<String>,
    pub on_select: Callback<usize>,
    pub on_clear: Callback<()>,
    pub on_focus: Callback<()>,
    pub on_dismiss: Callback<()>,
}

#[derive(Clone, PartialEq, Default)]
struct UiSnapshot {
    suggestions: Vec<Suggestion>,
    visible: bool,
    loading: bool,
}

fn snapshot(vm: &AutocompleteViewModel) -> UiSnapshot {
    UiSnapshot {
        suggestions: vm.suggestions().to_vec(),
        visible: vm.visible(),
        loading: vm.loading(),
    }
}

/// Adquisición del cliente con reintentos acotados a intervalo fijo.
/// Agotados los intentos, el servicio queda marcado como no disponible
/// de forma terminal (sin bucle infinito de polling).
#[cfg(target_arch = "wasm32")]
fn acquire_with_retry(attempt: u32, provider: SharedProvider, unavailable: UseStateHandle<bool>) {
    use crate::services::places::GooglePlacesProvider;
    use crate::utils::{CLIENT_RETRY_INTERVAL_MS, CLIENT_RETRY_MAX_ATTEMPTS};
    use gloo_timers::callback::Timeout;

    match GooglePlacesProvider::acquire() {
        Some(client) => {
            *provider.borrow_mut() = Some(Rc::new(client) as Rc<dyn SuggestionProvider>);
        }
        None if attempt + 1 >= CLIENT_RETRY_MAX_ATTEMPTS => {
            log::warn!(
                "⚠️ Places: cliente no disponible tras {} intentos, abandonando",
                CLIENT_RETRY_MAX_ATTEMPTS
            );
            unavailable.set(true);
        }
        None => {
            Timeout::new(CLIENT_RETRY_INTERVAL_MS, move || {
                acquire_with_retry(attempt + 1, provider, unavailable)
            })
            .forget();
        }
    }
}

#[hook]
pub fn use_location_suggestions(
    on_change: Callback<String>,
    on_clear_error: Callback<()>,
) -> UseLocationSuggestionsHandle {
    let script = use_script(MAPS_SDK_URL);
    let vm = use_mut_ref(AutocompleteViewModel::new);
    let provider: SharedProvider = use_mut_ref(|| None);
    let ui = use_state(UiSnapshot::default);
    let unavailable = use_state(|| false);

    // Con el SDK listo, adquirir el cliente de sugerencias
    {
        let provider = provider.clone();
        let unavailable = unavailable.clone();
        use_effect_with(script.ready, move |ready| {
            #[cfg(target_arch = "wasm32")]
            if *ready && provider.borrow().is_none() {
                acquire_with_retry(0, provider, unavailable);
            }
            #[cfg(not(target_arch = "wasm32"))]
            let _ = (ready, &provider, &unavailable);
            || ()
        });
    }

    // Tecla pulsada: propagar el texto, limpiar el error externo y buscar
    let on_input = {
        let vm = vm.clone();
        let ui = ui.clone();
        let provider = provider.clone();
        let on_change = on_change.clone();
        let on_clear_error = on_clear_error.clone();
        Callback::from(move |text: String| {
            on_change.emit(text.clone());
            on_clear_error.emit(());

            if let Some(seq) = vm.borrow_mut().on_input(&text) {
                let client = provider.borrow().clone();
                match client {
                    Some(client) => {
                        let vm = vm.clone();
                        let ui = ui.clone();
                        client.fetch(
                            &text,
                            Box::new(move |outcome| {
                                vm.borrow_mut().on_response(seq, outcome);
                                ui.set(snapshot(&vm.borrow()));
                            }),
                        );
                    }
                    None => {
                        // Sin cliente todavía: la tecla se descarta, sin cola
                        log::warn!("⚠️ Places: cliente no inicializado, búsqueda descartada");
                        vm.borrow_mut().on_response(seq, SuggestionOutcome::Empty);
                    }
                }
            }
            ui.set(snapshot(&vm.borrow()));
        })
    };

    // Selección: escribir el texto completo y cerrar, sin re-buscar
    let on_select = {
        let vm = vm.clone();
        let ui = ui.clone();
        let on_change = on_change.clone();
        Callback::from(move |index: usize| {
            if let Some(text) = vm.borrow_mut().on_select(index) {
                on_change.emit(text);
            }
            ui.set(snapshot(&vm.borrow()));
        })
    };

    // Botón de limpiar: texto vacío, error externo limpio
    let on_clear = {
        let vm = vm.clone();
        let ui = ui.clone();
        let on_change = on_change.clone();
        let on_clear_error = on_clear_error.clone();
        Callback::from(move |_| {
            vm.borrow_mut().on_clear();
            on_change.emit(String::new());
            on_clear_error.emit(());
            ui.set(snapshot(&vm.borrow()));
        })
    };

    // Foco: re-mostrar la caché sin nueva búsqueda
    let on_focus = {
        let vm = vm.clone();
        let ui = ui.clone();
        Callback::from(move |_| {
            vm.borrow_mut().on_focus();
            ui.set(snapshot(&vm.borrow()));
        })
    };

    // Click fuera del widget: ocultar conservando la caché
    let on_dismiss = {
        let vm = vm.clone();
        let ui = ui.clone();
        Callback::from(move |_| {
            vm.borrow_mut().on_dismiss();
            ui.set(snapshot(&vm.borrow()));
        })
    };

    UseLocationSuggestionsHandle {
        suggestions: ui.suggestions.clone(),
        visible: ui.visible,
        loading: ui.loading,
        service_unavailable: *unavailable || script.failed,
        on_input,
        on_select,
        on_clear,
        on_focus,
        on_dismiss,
    }
}
