// ============================================================================
// NAVBAR - Barra de navegación entre portales
// ============================================================================

use yew::prelude::*;

use crate::models::Portal;
#[cfg(target_arch = "wasm32")]
use crate::services::outside_click;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub active: Portal,
    pub on_navigate: Callback<Portal>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let menu_ref = use_node_ref();
    let menu_open = use_state(|| false);

    // El menú de usuario se cierra con el mismo despachador compartido
    // que usan los widgets de autocompletado
    {
        let menu_ref = menu_ref.clone();
        let menu_open = menu_open.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            #[cfg(target_arch = "wasm32")]
            {
                let widget_id = outside_click::register_widget(
                    {
                        let menu_ref = menu_ref.clone();
                        move |target: &web_sys::Node| {
                            menu_ref
                                .cast::<web_sys::HtmlElement>()
                                .map(|menu| menu.contains(Some(target)))
                                .unwrap_or(false)
                        }
                    },
                    move || menu_open.set(false),
                );
                Box::new(move || outside_click::unregister_widget(widget_id))
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (&menu_ref, &menu_open);
                Box::new(|| {})
            }
        });
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_e: MouseEvent| menu_open.set(!*menu_open))
    };

    html! {
        <nav class="navbar">
            <div class="navbar-brand">{"VoyageHub"}</div>
            <ul class="navbar-links">
                { for Portal::ALL.iter().map(|portal| {
                    let portal = *portal;
                    let on_navigate = props.on_navigate.clone();
                    let class = if portal == props.active { "nav-link active" } else { "nav-link" };
                    html! {
                        <li key={portal.label()}>
                            <button
                                type="button"
                                {class}
                                onclick={Callback::from(move |_| on_navigate.emit(portal))}
                            >
                                { portal.label() }
                            </button>
                        </li>
                    }
                }) }
            </ul>
            <div class="navbar-user" ref={menu_ref}>
                <button type="button" class="user-toggle" onclick={toggle_menu}>
                    {"👤"} <span class="chevron">{"▼"}</span>
                </button>
                if *menu_open {
                    <ul class="user-menu">
                        <li><button type="button" class="user-menu-item">{"Mi perfil"}</button></li>
                        <li><button type="button" class="user-menu-item">{"Cerrar sesión"}</button></li>
                    </ul>
                }
            </div>
        </nav>
    }
}
