// ============================================================================
// AUTOCOMPLETE VIEWMODEL - Estado y lógica del widget de sugerencias
// ============================================================================
// Máquina de estados pura - Sin DOM, sin FFI
// ============================================================================

use crate::models::Suggestion;
use crate::services::SuggestionOutcome;
use crate::utils::MIN_QUERY_LEN;

/// ViewModel del autocompletado de lugares.
///
/// Cada consulta emitida recibe un número de secuencia; una respuesta cuya
/// secuencia ya no es la última emitida se descarta, de modo que dos
/// búsquedas solapadas nunca pisan el resultado más reciente con uno viejo.
#[derive(Debug)]
pub struct AutocompleteViewModel {
    suggestions: Vec<Suggestion>,
    visible: bool,
    loading: bool,
    next_seq: u64,
    latest_seq: u64,
}

impl AutocompleteViewModel {
    pub fn new() -> Self {
        Self {
            suggestions: Vec::new(),
            visible: false,
            loading: false,
            next_seq: 0,
            latest_seq: 0,
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Tecla pulsada. Devuelve el número de secuencia de la búsqueda a emitir,
    /// o `None` si el texto no alcanza la longitud mínima (en ese caso la
    /// lista se vacía y el desplegable se oculta, sin emitir búsqueda).
    pub fn on_input(&mut self, text: &str) -> Option<u64> {
        if text.trim().is_empty() || text.chars().count() < MIN_QUERY_LEN {
            self.suggestions.clear();
            self.visible = false;
            self.loading = false;
            // Invalida cualquier respuesta en vuelo: la secuencia avanza
            // sin emitirse, así la respuesta pendiente llega ya obsoleta
            self.next_seq += 1;
            self.latest_seq = self.next_seq;
            return None;
        }

        self.next_seq += 1;
        self.latest_seq = self.next_seq;
        self.loading = true;
        Some(self.next_seq)
    }

    /// Respuesta del servicio. Devuelve `false` si la respuesta era obsoleta
    /// (una búsqueda más reciente ya fue emitida) y se descartó.
    pub fn on_response(&mut self, seq: u64, outcome: SuggestionOutcome) -> bool {
        if seq != self.latest_seq {
            log::info!("⏭️ Respuesta obsoleta descartada (seq {} < {})", seq, self.latest_seq);
            return false;
        }

        // El flag de carga se limpia siempre, con éxito o sin él
        self.loading = false;

        match outcome {
            SuggestionOutcome::Results(items) if !items.is_empty() => {
                self.suggestions = items;
                self.visible = true;
            }
            SuggestionOutcome::Results(_) | SuggestionOutcome::Empty => {
                self.suggestions.clear();
                self.visible = false;
            }
            SuggestionOutcome::Failed(reason) => {
                log::warn!("⚠️ Búsqueda de sugerencias fallida: {}", reason);
                self.suggestions.clear();
                self.visible = false;
            }
        }
        true
    }

    /// Selección de una sugerencia. Devuelve el texto completo a escribir
    /// en el campo; la lista se vacía y el desplegable se cierra.
    pub fn on_select(&mut self, index: usize) -> Option<String> {
        let text = self.suggestions.get(index).map(|s| s.display_text().to_string())?;
        self.suggestions.clear();
        self.visible = false;
        Some(text)
    }

    /// Botón de limpiar: vuelve al estado inicial, invalidando cualquier
    /// búsqueda todavía en vuelo
    pub fn on_clear(&mut self) {
        self.suggestions.clear();
        self.visible = false;
        self.loading = false;
        self.next_seq += 1;
        self.latest_seq = self.next_seq;
    }

    /// Click fuera del widget: oculta el desplegable, conserva la caché
    pub fn on_dismiss(&mut self) {
        self.visible = false;
    }

    /// Foco en el campo: re-muestra la caché si existe, sin nueva búsqueda.
    /// Devuelve `true` si el desplegable quedó visible.
    pub fn on_focus(&mut self) -> bool {
        if !self.suggestions.is_empty() {
            self.visible = true;
        }
        self.visible
    }
}

impl Default for AutocompleteViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(id: &str, main: &str, secondary: &str) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            main_text: main.to_string(),
            secondary_text: secondary.to_string(),
            description: format!("{}, {}", main, secondary),
        }
    }

    fn three_results() -> SuggestionOutcome {
        SuggestionOutcome::Results(vec![
            suggestion("p1", "Galle", "Southern Province, Sri Lanka"),
            suggestion("p2", "Galle Face", "Colombo, Sri Lanka"),
            suggestion("p3", "Galle Fort", "Galle, Sri Lanka"),
        ])
    }

    #[test]
    fn short_input_issues_no_fetch_and_clears_list() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Ga").unwrap();
        vm.on_response(seq, three_results());
        assert!(vm.visible());

        assert_eq!(vm.on_input("G"), None);
        assert!(vm.suggestions().is_empty());
        assert!(!vm.visible());
        assert!(!vm.loading());

        assert_eq!(vm.on_input(""), None);
        assert!(!vm.loading());
    }

    #[test]
    fn two_char_input_issues_fetch_and_populates_dropdown() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Ga").expect("fetch at min length");
        assert!(vm.loading());

        assert!(vm.on_response(seq, three_results()));
        assert_eq!(vm.suggestions().len(), 3);
        assert!(vm.visible());
        assert!(!vm.loading());
    }

    #[test]
    fn empty_or_failed_response_hides_dropdown() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Kandy").unwrap();
        vm.on_response(seq, SuggestionOutcome::Empty);
        assert!(vm.suggestions().is_empty());
        assert!(!vm.visible());
        assert!(!vm.loading());

        let seq = vm.on_input("Kandy").unwrap();
        vm.on_response(seq, SuggestionOutcome::Failed("ZERO_RESULTS".into()));
        assert!(vm.suggestions().is_empty());
        assert!(!vm.visible());
        assert!(!vm.loading());
    }

    // El diseño original dejaba carreras entre búsquedas solapadas (la última
    // respuesta en llegar ganaba, aunque fuese la consulta vieja). Aquí la
    // secuencia descarta la respuesta obsoleta: gana la última emitida.
    #[test]
    fn stale_response_is_discarded() {
        let mut vm = AutocompleteViewModel::new();
        let seq_a = vm.on_input("Gal").unwrap();
        let seq_b = vm.on_input("Galle").unwrap();
        assert!(seq_b > seq_a);

        // B llega primero
        assert!(vm.on_response(seq_b, three_results()));
        // A llega después: obsoleta, no pisa los resultados de B
        assert!(!vm.on_response(
            seq_a,
            SuggestionOutcome::Results(vec![suggestion("old", "Gal Oya", "Sri Lanka")])
        ));

        assert_eq!(vm.suggestions().len(), 3);
        assert_eq!(vm.suggestions()[0].main_text, "Galle");
        assert!(vm.visible());
    }

    #[test]
    fn clearing_input_invalidates_inflight_fetch() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Gal").unwrap();
        assert_eq!(vm.on_input(""), None);

        // La respuesta de la búsqueda en vuelo llega tras el borrado
        assert!(!vm.on_response(seq, three_results()));
        assert!(vm.suggestions().is_empty());
        assert!(!vm.visible());
    }

    #[test]
    fn clear_button_invalidates_inflight_fetch() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Gal").unwrap();
        vm.on_clear();

        // La respuesta de la búsqueda en vuelo llega tras pulsar limpiar
        assert!(!vm.on_response(seq, three_results()));
        assert!(vm.suggestions().is_empty());
        assert!(!vm.visible());
        assert!(!vm.loading());
    }

    #[test]
    fn selection_returns_full_display_text_and_closes() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Galle").unwrap();
        vm.on_response(seq, three_results());

        let text = vm.on_select(1).unwrap();
        assert_eq!(text, "Galle Face, Colombo, Sri Lanka");
        assert!(vm.suggestions().is_empty());
        assert!(!vm.visible());
    }

    #[test]
    fn selecting_out_of_range_is_a_no_op() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Galle").unwrap();
        vm.on_response(seq, three_results());

        assert_eq!(vm.on_select(99), None);
        assert_eq!(vm.suggestions().len(), 3);
        assert!(vm.visible());
    }

    #[test]
    fn outside_click_hides_but_keeps_cached_suggestions() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Galle").unwrap();
        vm.on_response(seq, three_results());

        vm.on_dismiss();
        assert!(!vm.visible());
        assert_eq!(vm.suggestions().len(), 3);

        // Re-foco con caché: se re-muestra sin nueva búsqueda
        assert!(vm.on_focus());
        assert!(vm.visible());
        assert!(!vm.loading());
    }

    #[test]
    fn focus_without_cache_stays_hidden() {
        let mut vm = AutocompleteViewModel::new();
        assert!(!vm.on_focus());
        assert!(!vm.visible());
    }

    #[test]
    fn clear_resets_everything() {
        let mut vm = AutocompleteViewModel::new();
        let seq = vm.on_input("Galle").unwrap();
        vm.on_response(seq, three_results());

        vm.on_clear();
        assert!(vm.suggestions().is_empty());
        assert!(!vm.visible());
        assert!(!vm.loading());
    }
}
