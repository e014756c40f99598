// ============================================================================
// LOCATION AUTOCOMPLETE - Campo de ubicación con sugerencias
// ============================================================================

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_location_suggestions;
#[cfg(target_arch = "wasm32")]
use crate::services::outside_click;

#[derive(Properties, PartialEq)]
pub struct LocationAutocompleteProps {
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub on_clear_error: Callback<()>,
    /// Error de validación suministrado por el consumidor
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub label: String,
    #[prop_or_default]
    pub placeholder: String,
    #[prop_or_default]
    pub id: String,
}

#[function_component(LocationAutocomplete)]
pub fn location_autocomplete(props: &LocationAutocompleteProps) -> Html {
    let container_ref = use_node_ref();
    let input_ref = use_node_ref();

    let handle = use_location_suggestions(props.on_change.clone(), props.on_clear_error.clone());

    // Registro en el despachador compartido de pointerdown: un click fuera
    // del contenedor cierra el desplegable (la caché se conserva)
    {
        let container_ref = container_ref.clone();
        let on_dismiss = handle.on_dismiss.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            #[cfg(target_arch = "wasm32")]
            {
                let widget_id = outside_click::register_widget(
                    {
                        let container_ref = container_ref.clone();
                        move |target: &web_sys::Node| {
                            container_ref
                                .cast::<web_sys::HtmlElement>()
                                .map(|container| container.contains(Some(target)))
                                .unwrap_or(false)
                        }
                    },
                    move || on_dismiss.emit(()),
                );
                Box::new(move || outside_click::unregister_widget(widget_id))
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (&container_ref, &on_dismiss);
                Box::new(|| {})
            }
        });
    }

    let oninput = {
        let on_input = handle.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    let onfocus = {
        let on_focus = handle.on_focus.clone();
        Callback::from(move |_e: FocusEvent| on_focus.emit(()))
    };

    // Limpiar: texto vacío, desplegable cerrado y foco de vuelta al campo
    let on_clear_click = {
        let on_clear = handle.on_clear.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_e: MouseEvent| {
            on_clear.emit(());
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        })
    };

    let suggestions = handle.suggestions.clone();
    let on_select = handle.on_select.clone();

    html! {
        <div class="location-autocomplete" ref={container_ref}>
            if !props.label.is_empty() {
                <label for={props.id.clone()}>{ &props.label }</label>
            }
            <div class="location-input-row">
                <input
                    type="text"
                    id={props.id.clone()}
                    class="location-input"
                    autocomplete="off"
                    placeholder={props.placeholder.clone()}
                    value={props.value.clone()}
                    ref={input_ref}
                    {oninput}
                    {onfocus}
                />
                if !props.value.is_empty() {
                    <button type="button" class="btn-clear" onclick={on_clear_click}>
                        {"✕"}
                    </button>
                }
                if handle.loading {
                    <span class="input-spinner" />
                }
            </div>
            if handle.visible {
                <ul class="suggestions-list">
                    { for suggestions.iter().enumerate().map(|(index, suggestion)| {
                        let on_select = on_select.clone();
                        html! {
                            <li
                                key={suggestion.id.clone()}
                                class="suggestion-item"
                                onclick={Callback::from(move |_e: MouseEvent| on_select.emit(index))}
                            >
                                <span class="suggestion-main">{ &suggestion.main_text }</span>
                                <span class="suggestion-secondary">{ &suggestion.secondary_text }</span>
                            </li>
                        }
                    }) }
                </ul>
            }
            if let Some(error) = &props.error {
                <span class="field-error">{ error }</span>
            }
        </div>
    }
}
