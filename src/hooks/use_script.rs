// ============================================================================
// USE SCRIPT HOOK - Señal de readiness de un script externo
// ============================================================================
// Hook nativo de Yew - Delega la deduplicación al ScriptRegistry compartido
// ============================================================================

use yew::prelude::*;

use crate::services::script_registry::{self, ScriptStatus, SubscriberId};

/// Handle del hook
#[derive(Clone, Copy, PartialEq)]
pub struct UseScriptHandle {
    pub ready: bool,
    pub failed: bool,
}

/// Solicita la carga de `src` y expone su estado como valor reactivo.
/// Varias instancias con la misma URL comparten un único <script> y el
/// mismo estado terminal. Con `src` vacío falla de inmediato y permanece
/// no-listo para siempre.
#[hook]
pub fn use_script(src: &str) -> UseScriptHandle {
    let status = use_state(|| None::<ScriptStatus>);

    {
        let status = status.clone();
        use_effect_with(src.to_string(), move |src| {
            #[cfg(target_arch = "wasm32")]
            let subscription: Option<(String, SubscriberId)> = {
                use crate::services::script_registry::{request_script, ScriptHandle};

                let src = src.clone();
                match request_script(&src, {
                    let status = status.clone();
                    move |settled| status.set(Some(settled))
                }) {
                    ScriptHandle::Ready => {
                        status.set(Some(ScriptStatus::Loaded));
                        None
                    }
                    ScriptHandle::Failed => {
                        status.set(Some(ScriptStatus::Failed));
                        None
                    }
                    ScriptHandle::Pending(id) => Some((src, id)),
                }
            };

            #[cfg(not(target_arch = "wasm32"))]
            let subscription: Option<(String, SubscriberId)> = {
                let _ = (src, &status);
                None
            };

            // Al desmontar solo se da de baja el suscriptor propio;
            // el <script> y su estado global persisten
            move || {
                if let Some((src, id)) = subscription {
                    script_registry::with_registry(|registry| registry.unsubscribe(&src, id));
                }
            }
        });
    }

    UseScriptHandle {
        ready: *status == Some(ScriptStatus::Loaded),
        failed: *status == Some(ScriptStatus::Failed),
    }
}
