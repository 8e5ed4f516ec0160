// ============================================================================
// STOREFRONT PWA - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - ViewModels: Lógica de cada pantalla, devuelven mensajes listos para mostrar
// - Services: SOLO comunicación API (un único gateway HTTP)
// - State: State Management con Rc<RefCell> + subscribers
// - Routing: Tabla de rutas + guard por sesión/rol
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod routing;
pub mod viewmodels;
pub mod utils;
pub mod app;

#[cfg(test)]
mod testing;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::{spawn, App};
use crate::config::CONFIG;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Storefront PWA - Rust Puro + MVVM");

    let app = App::new();
    app.start();

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}

fn with_app<R>(f: impl FnOnce(&App) -> R) -> Result<R, JsValue> {
    APP.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(f)
            .ok_or_else(|| JsValue::from_str("App no inicializada"))
    })
}

/// "render:/ruta", "wait" o "redirect:/ruta"
#[wasm_bindgen]
pub fn resolve_route(path: &str) -> Result<String, JsValue> {
    with_app(|app| app.navigate(path).to_string())
}

#[wasm_bindgen]
pub async fn login(email: String, password: String) -> Result<(), JsValue> {
    let session = with_app(|app| app.session.clone())?;
    session
        .login(&email, &password)
        .await
        .map_err(|message| JsValue::from_str(&message))?;

    let cart = with_app(|app| app.cart.clone())?;
    spawn("cart", async move { cart.fetch().await });
    Ok(())
}

#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    with_app(|app| app.session.logout())
}

#[wasm_bindgen]
pub async fn add_to_cart(product_id: String) -> Result<(), JsValue> {
    let cart = with_app(|app| app.cart.clone())?;
    cart.add_item(&product_id)
        .await
        .map_err(|message| JsValue::from_str(&message))
}

/// Total del carrito con dos decimales
#[wasm_bindgen]
pub fn cart_total() -> Result<String, JsValue> {
    with_app(|app| app.state.cart.formatted_total())
}

/// Σ cantidades para el badge de la navbar
#[wasm_bindgen]
pub fn cart_count() -> Result<u32, JsValue> {
    with_app(|app| app.state.cart.item_count())
}
