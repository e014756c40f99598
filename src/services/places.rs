// ============================================================================
// SERVICIO DE SUGERENCIAS DE LUGARES
// ============================================================================
// Seam entre la lógica del widget y el SDK externo de Places.
// El cliente concreto accede al SDK vía Reflect (sin helpers JS propios).
// ============================================================================

use crate::models::Suggestion;

/// Resultado de una consulta al servicio de sugerencias. Un estado no-OK o
/// una lista nula nunca se propagan como error duro: degradan a lista vacía.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionOutcome {
    Results(Vec<Suggestion>),
    Empty,
    Failed(String),
}

/// Capacidad externa de "obtener predicciones de lugares".
/// Una sola operación asíncrona por consulta; sin cancelación.
pub trait SuggestionProvider {
    fn fetch(&self, input: &str, callback: Box<dyn FnOnce(SuggestionOutcome)>);
}

/// Clasifica la respuesta cruda del SDK según su status
fn classify(status: Option<&str>, predictions: Option<Vec<Suggestion>>) -> SuggestionOutcome {
    match (status, predictions) {
        (Some("OK"), Some(items)) if !items.is_empty() => SuggestionOutcome::Results(items),
        (Some("OK"), _) | (Some("ZERO_RESULTS"), _) => SuggestionOutcome::Empty,
        (Some(other), _) => SuggestionOutcome::Failed(other.to_string()),
        (None, _) => SuggestionOutcome::Failed("status ilegible".to_string()),
    }
}

#[cfg(target_arch = "wasm32")]
pub use google::GooglePlacesProvider;

#[cfg(target_arch = "wasm32")]
mod google {
    use super::*;
    use crate::models::PlacePrediction;
    use crate::utils::{PLACE_TYPE_FILTER, REGION_FILTER};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    /// Cliente sobre window.google.maps.places.AutocompleteService
    pub struct GooglePlacesProvider {
        service: js_sys::Object,
    }

    impl GooglePlacesProvider {
        /// Intenta adquirir el constructor del SDK. Devuelve `None` mientras
        /// el script externo no haya expuesto el global.
        pub fn acquire() -> Option<Self> {
            let window = web_sys::window()?;
            let ctor = get_path(
                &window.into(),
                &["google", "maps", "places", "AutocompleteService"],
            )?;
            let ctor: js_sys::Function = ctor.dyn_into().ok()?;
            let service = js_sys::Reflect::construct(&ctor, &js_sys::Array::new()).ok()?;
            log::info!("✅ Places: cliente de sugerencias adquirido");
            Some(Self {
                service: service.into(),
            })
        }
    }

    impl SuggestionProvider for GooglePlacesProvider {
        fn fetch(&self, input: &str, callback: Box<dyn FnOnce(SuggestionOutcome)>) {
            let request = match build_request(input) {
                Ok(r) => r,
                Err(_) => {
                    callback(SuggestionOutcome::Failed(
                        "no se pudo construir la petición".to_string(),
                    ));
                    return;
                }
            };

            // El closure se libera solo tras su primera (y única) invocación
            let on_predictions =
                Closure::once_into_js(move |predictions: JsValue, status: JsValue| {
                    callback(parse_response(predictions, status));
                });

            let method = js_sys::Reflect::get(&self.service, &"getPlacePredictions".into())
                .ok()
                .and_then(|m| m.dyn_into::<js_sys::Function>().ok());

            match method {
                Some(method) => {
                    if method
                        .call2(&self.service, &request, &on_predictions)
                        .is_err()
                    {
                        log::warn!("⚠️ Places: getPlacePredictions lanzó una excepción");
                    }
                }
                None => log::warn!("⚠️ Places: el cliente no expone getPlacePredictions"),
            }
        }
    }

    /// { input, types: ["geocode"], componentRestrictions: { country: "lk" } }
    fn build_request(input: &str) -> Result<JsValue, JsValue> {
        let request = js_sys::Object::new();
        js_sys::Reflect::set(&request, &"input".into(), &input.into())?;

        let types = js_sys::Array::new();
        types.push(&PLACE_TYPE_FILTER.into());
        js_sys::Reflect::set(&request, &"types".into(), &types)?;

        let restrictions = js_sys::Object::new();
        js_sys::Reflect::set(&restrictions, &"country".into(), &REGION_FILTER.into())?;
        js_sys::Reflect::set(&request, &"componentRestrictions".into(), &restrictions)?;

        Ok(request.into())
    }

    fn parse_response(predictions: JsValue, status: JsValue) -> SuggestionOutcome {
        let status = status.as_string();
        let parsed = if predictions.is_null() || predictions.is_undefined() {
            None
        } else {
            serde_wasm_bindgen::from_value::<Vec<PlacePrediction>>(predictions)
                .map_err(|e| log::warn!("⚠️ Places: predicciones ilegibles: {}", e))
                .ok()
                .map(|items| items.into_iter().map(Suggestion::from).collect())
        };
        classify(status.as_deref(), parsed)
    }

    fn get_path(root: &JsValue, path: &[&str]) -> Option<JsValue> {
        let mut current = root.clone();
        for segment in path {
            current = js_sys::Reflect::get(&current, &(*segment).into()).ok()?;
            if current.is_null() || current.is_undefined() {
                return None;
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_suggestion() -> Vec<Suggestion> {
        vec![Suggestion {
            id: "p1".to_string(),
            main_text: "Galle".to_string(),
            secondary_text: "Southern Province, Sri Lanka".to_string(),
            description: "Galle, Southern Province, Sri Lanka".to_string(),
        }]
    }

    #[test]
    fn ok_with_results_yields_results() {
        assert_eq!(
            classify(Some("OK"), Some(one_suggestion())),
            SuggestionOutcome::Results(one_suggestion())
        );
    }

    #[test]
    fn ok_with_null_or_empty_predictions_is_empty() {
        assert_eq!(classify(Some("OK"), None), SuggestionOutcome::Empty);
        assert_eq!(classify(Some("OK"), Some(vec![])), SuggestionOutcome::Empty);
        assert_eq!(
            classify(Some("ZERO_RESULTS"), None),
            SuggestionOutcome::Empty
        );
    }

    #[test]
    fn non_success_status_degrades_to_failure() {
        assert_eq!(
            classify(Some("OVER_QUERY_LIMIT"), Some(one_suggestion())),
            SuggestionOutcome::Failed("OVER_QUERY_LIMIT".to_string())
        );
        assert!(matches!(classify(None, None), SuggestionOutcome::Failed(_)));
    }
}
