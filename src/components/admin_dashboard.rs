// ============================================================================
// ADMIN DASHBOARD - Resumen de la plataforma
// ============================================================================

use yew::prelude::*;

#[function_component(AdminDashboard)]
pub fn admin_dashboard() -> Html {
    html! {
        <div class="dashboard admin-dashboard">
            <h2>{"Administración"}</h2>
            <div class="admin-cards">
                <div class="admin-card">{"Usuarios"}</div>
                <div class="admin-card">{"Reservas"}</div>
                <div class="admin-card">{"Proveedores"}</div>
            </div>
        </div>
    }
}
