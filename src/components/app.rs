use yew::prelude::*;

use super::{
    AccommodationDashboard, AdminDashboard, Navbar, TransportDashboard, TravelerDashboard,
};
use crate::models::Portal;

#[function_component(App)]
pub fn app() -> Html {
    let portal = use_state(|| Portal::Traveler);

    let on_navigate = {
        let portal = portal.clone();
        Callback::from(move |selected: Portal| {
            log::info!("🧭 Cambio de portal: {}", selected.label());
            portal.set(selected);
        })
    };

    html! {
        <div class="app">
            <Navbar active={*portal} {on_navigate} />
            <main class="portal-content">
                {
                    match *portal {
                        Portal::Traveler => html! { <TravelerDashboard /> },
                        Portal::TransportProvider => html! { <TransportDashboard /> },
                        Portal::AccommodationProvider => html! { <AccommodationDashboard /> },
                        Portal::Admin => html! { <AdminDashboard /> },
                    }
                }
            </main>
        </div>
    }
}
