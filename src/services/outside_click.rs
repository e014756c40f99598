// ============================================================================
// DESPACHADOR DE CLICKS EXTERIORES
// ============================================================================
// Un único listener de pointerdown en el documento reparte el evento a todos
// los widgets registrados; cada widget aporta su test de contención y su
// callback de cierre. Evita acumular un listener global por widget montado.
// ============================================================================

pub type WidgetId = u64;

struct DismissEntry<T> {
    id: WidgetId,
    contains: Box<dyn Fn(&T) -> bool>,
    on_outside: Box<dyn Fn()>,
}

/// Registro de widgets interesados en cerrarse al pulsar fuera de su
/// contenedor. Genérico sobre el tipo de objetivo del evento para poder
/// ejercitarlo sin DOM.
pub struct DismissRegistry<T> {
    entries: Vec<DismissEntry<T>>,
    next_id: WidgetId,
}

impl<T> DismissRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn register<C, F>(&mut self, contains: C, on_outside: F) -> WidgetId
    where
        C: Fn(&T) -> bool + 'static,
        F: Fn() + 'static,
    {
        self.next_id += 1;
        self.entries.push(DismissEntry {
            id: self.next_id,
            contains: Box::new(contains),
            on_outside: Box::new(on_outside),
        });
        self.next_id
    }

    pub fn unregister(&mut self, id: WidgetId) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reparte un pointerdown: cierra cada widget que no contiene al objetivo
    pub fn notify(&self, target: &T) {
        for entry in &self.entries {
            if !(entry.contains)(target) {
                (entry.on_outside)();
            }
        }
    }
}

impl<T> Default for DismissRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::{register_widget, unregister_widget};

#[cfg(target_arch = "wasm32")]
mod dom {
    use super::*;
    use std::cell::RefCell;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::Node;

    thread_local! {
        static DISPATCHER: RefCell<DismissRegistry<Node>> = RefCell::new(DismissRegistry::new());
        // Flag para prevenir múltiples registros del listener de documento
        static LISTENER_INSTALLED: RefCell<bool> = const { RefCell::new(false) };
    }

    /// Registra un widget en el despachador compartido, instalando el
    /// listener de documento la primera vez
    pub fn register_widget<C, F>(contains: C, on_outside: F) -> WidgetId
    where
        C: Fn(&Node) -> bool + 'static,
        F: Fn() + 'static,
    {
        install_document_listener();
        DISPATCHER.with(|d| d.borrow_mut().register(contains, on_outside))
    }

    /// Baja del widget en su desmontaje; el listener de documento persiste
    pub fn unregister_widget(id: WidgetId) {
        DISPATCHER.with(|d| d.borrow_mut().unregister(id));
    }

    fn install_document_listener() {
        let already = LISTENER_INSTALLED.with(|flag| {
            let mut flag = flag.borrow_mut();
            let was = *flag;
            *flag = true;
            was
        });
        if already {
            return;
        }

        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };

        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) {
                DISPATCHER.with(|d| d.borrow().notify(&target));
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let _ = document
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());

        // Listener de documento único, vivo toda la sesión
        closure.forget();
        log::info!("✅ OutsideClick: listener de documento instalado (una sola vez)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn outside_target_closes_only_non_containing_widgets() {
        let mut registry: DismissRegistry<i32> = DismissRegistry::new();
        let closed_a = Rc::new(Cell::new(false));
        let closed_b = Rc::new(Cell::new(false));

        // Widget A "contiene" los objetivos pares, B los impares
        let _a = registry.register(|t: &i32| t % 2 == 0, {
            let closed = closed_a.clone();
            move || closed.set(true)
        });
        let _b = registry.register(|t: &i32| t % 2 != 0, {
            let closed = closed_b.clone();
            move || closed.set(true)
        });

        registry.notify(&3);
        assert!(closed_a.get());
        assert!(!closed_b.get());
    }

    #[test]
    fn inside_target_leaves_widget_open() {
        let mut registry: DismissRegistry<i32> = DismissRegistry::new();
        let closed = Rc::new(Cell::new(false));

        let _ = registry.register(|_: &i32| true, {
            let closed = closed.clone();
            move || closed.set(true)
        });

        registry.notify(&7);
        assert!(!closed.get());
    }

    #[test]
    fn unregister_stops_notifications() {
        let mut registry: DismissRegistry<i32> = DismissRegistry::new();
        let closed = Rc::new(Cell::new(0u32));

        let id = registry.register(|_: &i32| false, {
            let closed = closed.clone();
            move || closed.set(closed.get() + 1)
        });
        registry.notify(&1);
        assert_eq!(closed.get(), 1);

        registry.unregister(id);
        assert!(registry.is_empty());
        registry.notify(&1);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn widget_count_tracks_registrations() {
        let mut registry: DismissRegistry<i32> = DismissRegistry::new();
        let a = registry.register(|_: &i32| false, || {});
        let b = registry.register(|_: &i32| false, || {});
        assert_eq!(registry.len(), 2);
        assert_ne!(a, b);

        registry.unregister(a);
        assert_eq!(registry.len(), 1);
    }
}
