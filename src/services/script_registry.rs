// ============================================================================
// REGISTRO DE SCRIPTS EXTERNOS
// ============================================================================
// Garantiza un único <script> por URL: todos los solicitantes comparten
// el mismo estado terminal (Loaded/Failed). Las entradas nunca se eliminan
// durante la sesión de página; solo los suscriptores se dan de baja.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

/// Estado de carga de un script, por URL. Transiciona exactamente una vez:
/// Pending → Loaded o Pending → Failed. Un fallo es permanente (sin reintento).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    Pending,
    Loaded,
    Failed,
}

pub type SubscriberId = u64;

type Subscriber = Box<dyn Fn(ScriptStatus)>;

/// Resultado de una petición de carga
pub enum RequestOutcome {
    /// URL vacía: fallo permanente, nunca habrá readiness
    MissingSource,
    /// El script ya terminó de cargar: listo de inmediato
    AlreadyLoaded,
    /// El script ya falló: nunca estará listo
    AlreadyFailed,
    /// Primera petición para esta URL: el llamador debe inyectar el tag
    FirstRequest(SubscriberId),
    /// Otra instancia ya lo pidió: solo queda esperar la notificación
    Joined(SubscriberId),
}

struct ScriptEntry {
    status: ScriptStatus,
    subscribers: Vec<(SubscriberId, Subscriber)>,
}

/// Mapa explícito URL → estado de carga, con suscriptores pendientes.
/// Sustituye la mutación ambiental del DOM global por estado inyectable
/// que los tests pueden resetear.
pub struct ScriptRegistry {
    entries: HashMap<String, ScriptEntry>,
    next_id: SubscriberId,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 0,
        }
    }

    /// Registra interés en una URL. El suscriptor se invoca una única vez,
    /// cuando la entrada transiciona a su estado terminal.
    pub fn request<F>(&mut self, url: &str, subscriber: F) -> RequestOutcome
    where
        F: Fn(ScriptStatus) + 'static,
    {
        if url.trim().is_empty() {
            return RequestOutcome::MissingSource;
        }

        let id = self.fresh_id();
        match self.entries.get_mut(url) {
            Some(entry) => match entry.status {
                ScriptStatus::Loaded => RequestOutcome::AlreadyLoaded,
                ScriptStatus::Failed => RequestOutcome::AlreadyFailed,
                ScriptStatus::Pending => {
                    entry.subscribers.push((id, Box::new(subscriber)));
                    RequestOutcome::Joined(id)
                }
            },
            None => {
                self.entries.insert(
                    url.to_string(),
                    ScriptEntry {
                        status: ScriptStatus::Pending,
                        subscribers: vec![(id, Box::new(subscriber))],
                    },
                );
                RequestOutcome::FirstRequest(id)
            }
        }
    }

    /// Transición al estado terminal. Devuelve los suscriptores drenados
    /// para que el llamador los invoque fuera del préstamo del registro.
    /// Una entrada ya asentada no vuelve a transicionar.
    pub fn settle(&mut self, url: &str, status: ScriptStatus) -> Vec<Subscriber> {
        debug_assert!(status != ScriptStatus::Pending);

        match self.entries.get_mut(url) {
            Some(entry) if entry.status == ScriptStatus::Pending => {
                entry.status = status;
                entry
                    .subscribers
                    .drain(..)
                    .map(|(_, subscriber)| subscriber)
                    .collect()
            }
            Some(_) => Vec::new(),
            None => {
                // Script asentado sin petición previa (p. ej. tag estático):
                // registrar el resultado para futuros solicitantes
                self.entries.insert(
                    url.to_string(),
                    ScriptEntry {
                        status,
                        subscribers: Vec::new(),
                    },
                );
                Vec::new()
            }
        }
    }

    /// Baja de un suscriptor (desmontaje del componente). La entrada y su
    /// estado persisten para el resto de la sesión.
    pub fn unsubscribe(&mut self, url: &str, id: SubscriberId) {
        if let Some(entry) = self.entries.get_mut(url) {
            entry.subscribers.retain(|(sub_id, _)| *sub_id != id);
        }
    }

    pub fn status(&self, url: &str) -> Option<ScriptStatus> {
        self.entries.get(url).map(|e| e.status)
    }

    /// Solo para tests: vuelve al estado de página recién cargada
    pub fn reset(&mut self) {
        self.entries.clear();
        self.next_id = 0;
    }

    fn fresh_id(&mut self) -> SubscriberId {
        self.next_id += 1;
        self.next_id
    }
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    // Instancia compartida de proceso (hilo único de UI, sin locks)
    static REGISTRY: RefCell<ScriptRegistry> = RefCell::new(ScriptRegistry::new());
}

pub fn with_registry<R>(f: impl FnOnce(&mut ScriptRegistry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

/// Asienta la URL en la instancia compartida y notifica a los suscriptores
/// ya fuera del préstamo del registro.
pub fn settle_shared(url: &str, status: ScriptStatus) {
    let subscribers = with_registry(|registry| registry.settle(url, status));
    for subscriber in subscribers {
        subscriber(status);
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::{request_script, ScriptHandle};

#[cfg(target_arch = "wasm32")]
mod dom {
    use super::*;
    use crate::utils::SCRIPT_LOADED_ATTR;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlScriptElement};

    /// Resultado inmediato de una petición desde un componente
    pub enum ScriptHandle {
        Ready,
        Failed,
        Pending(SubscriberId),
    }

    /// Pide la carga de `url`, suscribiendo `on_settle` al estado terminal.
    /// Inyecta el tag solo si nadie lo pidió antes; si el tag ya existe en el
    /// documento (p. ej. incluido estáticamente), lo reutiliza.
    pub fn request_script<F>(url: &str, on_settle: F) -> ScriptHandle
    where
        F: Fn(ScriptStatus) + 'static,
    {
        match with_registry(|registry| registry.request(url, on_settle)) {
            RequestOutcome::MissingSource => {
                log::error!("❌ ScriptRegistry: petición sin URL");
                ScriptHandle::Failed
            }
            RequestOutcome::AlreadyLoaded => ScriptHandle::Ready,
            RequestOutcome::AlreadyFailed => ScriptHandle::Failed,
            RequestOutcome::Joined(id) => ScriptHandle::Pending(id),
            RequestOutcome::FirstRequest(id) => {
                inject(url);
                // La inyección puede asentar de forma síncrona (marker presente)
                match with_registry(|registry| registry.status(url)) {
                    Some(ScriptStatus::Loaded) => ScriptHandle::Ready,
                    Some(ScriptStatus::Failed) => ScriptHandle::Failed,
                    _ => ScriptHandle::Pending(id),
                }
            }
        }
    }

    /// Inyecta (o reutiliza) el <script> y conecta load/error al registro
    fn inject(url: &str) {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => {
                log::error!("❌ ScriptRegistry: sin document, no se puede inyectar");
                settle_shared(url, ScriptStatus::Failed);
                return;
            }
        };

        let selector = format!("script[src=\"{}\"]", url);
        if let Ok(Some(existing)) = document.query_selector(&selector) {
            // Tag ya presente: marker → listo; si no, escuchar sus eventos
            if existing.has_attribute(SCRIPT_LOADED_ATTR) {
                log::info!("✅ ScriptRegistry: script ya cargado, reutilizando ({})", url);
                settle_shared(url, ScriptStatus::Loaded);
            } else {
                log::info!("ℹ️ ScriptRegistry: tag existente aún cargando ({})", url);
                attach_listeners(&existing, url);
            }
            return;
        }

        let script: HtmlScriptElement = match document
            .create_element("script")
            .ok()
            .and_then(|e| e.dyn_into().ok())
        {
            Some(s) => s,
            None => {
                log::error!("❌ ScriptRegistry: no se pudo crear el elemento script");
                settle_shared(url, ScriptStatus::Failed);
                return;
            }
        };

        script.set_src(url);
        script.set_async(true);
        script.set_defer(true);

        let appended = document
            .head()
            .map(|head| head.append_child(&script).is_ok())
            .unwrap_or(false);
        if !appended {
            log::error!("❌ ScriptRegistry: no se pudo insertar el script en <head>");
            settle_shared(url, ScriptStatus::Failed);
            return;
        }

        log::info!("📜 ScriptRegistry: inyectando script {}", url);
        attach_listeners(&script, url);
    }

    fn attach_listeners(element: &Element, url: &str) {
        let on_load = Closure::wrap(Box::new({
            let element = element.clone();
            let url = url.to_string();
            move |_event: web_sys::Event| {
                // Marker para que instancias futuras cortocircuiten
                let _ = element.set_attribute(SCRIPT_LOADED_ATTR, "true");
                log::info!("✅ ScriptRegistry: script cargado ({})", url);
                settle_shared(&url, ScriptStatus::Loaded);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let on_error = Closure::wrap(Box::new({
            let url = url.to_string();
            move |_event: web_sys::Event| {
                log::error!("❌ ScriptRegistry: fallo cargando script ({})", url);
                settle_shared(&url, ScriptStatus::Failed);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let _ = element.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
        let _ =
            element.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());

        // El elemento script persiste toda la sesión; los closures también
        on_load.forget();
        on_error.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn missing_source_never_grants_readiness() {
        let mut registry = ScriptRegistry::new();
        assert!(matches!(
            registry.request("", |_| {}),
            RequestOutcome::MissingSource
        ));
        assert!(matches!(
            registry.request("   ", |_| {}),
            RequestOutcome::MissingSource
        ));
        assert_eq!(registry.status(""), None);
    }

    #[test]
    fn concurrent_requesters_share_one_entry_and_one_outcome() {
        let mut registry = ScriptRegistry::new();
        let first_seen = Rc::new(Cell::new(None));
        let second_seen = Rc::new(Cell::new(None));

        let outcome = registry.request("maps-sdk.js", {
            let seen = first_seen.clone();
            move |status| seen.set(Some(status))
        });
        assert!(matches!(outcome, RequestOutcome::FirstRequest(_)));

        // Segundo solicitante para la misma URL: se une, no re-inyecta
        let outcome = registry.request("maps-sdk.js", {
            let seen = second_seen.clone();
            move |status| seen.set(Some(status))
        });
        assert!(matches!(outcome, RequestOutcome::Joined(_)));

        // Un único evento load notifica a ambos
        for subscriber in registry.settle("maps-sdk.js", ScriptStatus::Loaded) {
            subscriber(ScriptStatus::Loaded);
        }
        assert_eq!(first_seen.get(), Some(ScriptStatus::Loaded));
        assert_eq!(second_seen.get(), Some(ScriptStatus::Loaded));
        assert_eq!(registry.status("maps-sdk.js"), Some(ScriptStatus::Loaded));
    }

    #[test]
    fn late_requester_short_circuits_on_terminal_state() {
        let mut registry = ScriptRegistry::new();
        let _ = registry.request("maps-sdk.js", |_| {});
        let _ = registry.settle("maps-sdk.js", ScriptStatus::Loaded);
        assert!(matches!(
            registry.request("maps-sdk.js", |_| {}),
            RequestOutcome::AlreadyLoaded
        ));

        let _ = registry.request("broken.js", |_| {});
        let _ = registry.settle("broken.js", ScriptStatus::Failed);
        assert!(matches!(
            registry.request("broken.js", |_| {}),
            RequestOutcome::AlreadyFailed
        ));
    }

    #[test]
    fn failure_is_permanent_for_the_url() {
        let mut registry = ScriptRegistry::new();
        let _ = registry.request("broken.js", |_| {});
        let _ = registry.settle("broken.js", ScriptStatus::Failed);

        // Un settle posterior no re-transiciona
        let drained = registry.settle("broken.js", ScriptStatus::Loaded);
        assert!(drained.is_empty());
        assert_eq!(registry.status("broken.js"), Some(ScriptStatus::Failed));
    }

    #[test]
    fn unsubscribe_detaches_only_that_subscriber() {
        let mut registry = ScriptRegistry::new();
        let notified = Rc::new(Cell::new(0u32));

        let id = match registry.request("maps-sdk.js", |_| {}) {
            RequestOutcome::FirstRequest(id) => id,
            _ => panic!("expected first request"),
        };
        let _ = registry.request("maps-sdk.js", {
            let notified = notified.clone();
            move |_| notified.set(notified.get() + 1)
        });

        registry.unsubscribe("maps-sdk.js", id);
        for subscriber in registry.settle("maps-sdk.js", ScriptStatus::Loaded) {
            subscriber(ScriptStatus::Loaded);
        }
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn settle_without_prior_request_records_status() {
        let mut registry = ScriptRegistry::new();
        let drained = registry.settle("static.js", ScriptStatus::Loaded);
        assert!(drained.is_empty());
        assert!(matches!(
            registry.request("static.js", |_| {}),
            RequestOutcome::AlreadyLoaded
        ));
    }

    #[test]
    fn reset_returns_to_pristine_state() {
        with_registry(|registry| {
            let _ = registry.request("maps-sdk.js", |_| {});
            let _ = registry.settle("maps-sdk.js", ScriptStatus::Loaded);
            assert_eq!(registry.status("maps-sdk.js"), Some(ScriptStatus::Loaded));

            registry.reset();
            assert_eq!(registry.status("maps-sdk.js"), None);
            assert!(matches!(
                registry.request("maps-sdk.js", |_| {}),
                RequestOutcome::FirstRequest(_)
            ));
            registry.reset();
        });
    }
}
