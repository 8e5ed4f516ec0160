// ============================================================================
// APP - Composición de la aplicación (storage + transporte + viewmodels)
// ============================================================================

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::config::CONFIG;
use crate::routing::{resolve, Navigation};
use crate::services::{ApiClient, GlooTransport, HttpTransport};
use crate::state::{AppState, ReactiveState, Subscription};
use crate::utils::{LocalStorage, MemoryStorage, StoragePort, RENDER_FALLBACK_MESSAGE};
use crate::viewmodels::{
    AdminViewModel, CartViewModel, CatalogViewModel, CheckoutViewModel, OrdersViewModel,
    SessionViewModel,
};

/// Aplicación principal. Todo se inyecta: nada de singletons de estado.
#[derive(Clone)]
pub struct App {
    pub state: AppState,
    pub session: SessionViewModel,
    pub cart: CartViewModel,
    pub catalog: CatalogViewModel,
    pub checkout: CheckoutViewModel,
    pub orders: OrdersViewModel,
    pub admin: AdminViewModel,
    /// Última ruta pedida; la decisión del guard se deriva, nunca se guarda
    path: ReactiveState<String>,
}

impl App {
    /// localStorage + fetch del navegador
    pub fn new() -> Self {
        let storage: Rc<dyn StoragePort> = match LocalStorage::open() {
            Some(storage) => Rc::new(storage),
            None => {
                log::warn!("⚠️ [APP] localStorage no disponible, la sesión no sobrevivirá a un reload");
                Rc::new(MemoryStorage::new())
            }
        };
        Self::with_ports(storage, Rc::new(GlooTransport), CONFIG.backend_url())
    }

    pub fn with_ports(
        storage: Rc<dyn StoragePort>,
        transport: Rc<dyn HttpTransport>,
        base_url: &str,
    ) -> Self {
        let state = AppState::new(storage);
        let api = ApiClient::new(base_url, transport, state.session.clone());

        let catalog = CatalogViewModel::new(api.clone(), state.catalog.clone());
        Self {
            session: SessionViewModel::new(api.clone(), state.session.clone(), state.cart.clone()),
            cart: CartViewModel::new(api.clone(), state.cart.clone()),
            checkout: CheckoutViewModel::new(api.clone(), state.session.clone(), state.cart.clone()),
            orders: OrdersViewModel::new(api.clone()),
            admin: AdminViewModel::new(api, catalog.clone()),
            catalog,
            state,
            path: ReactiveState::new("/".to_string()),
        }
    }

    /// Hidratar la sesión; con sesión activa se sincroniza el carrito
    pub fn start(&self) {
        log::info!("🚀 [APP] Iniciando (backend: {})", CONFIG.backend_url());
        self.state.session.hydrate();

        let catalog = self.catalog.clone();
        spawn("catalog", async move { catalog.fetch().await });

        if self.state.session.is_authenticated() {
            let cart = self.cart.clone();
            spawn("cart", async move { cart.fetch().await });
        }
    }

    /// Re-evalúa el guard con la sesión actual en cada navegación
    pub fn navigate(&self, path: &str) -> Navigation {
        self.path.set(path.to_string());
        let navigation = self.current_navigation();
        log::info!("🧭 [ROUTER] {} → {}", path, navigation);
        navigation
    }

    /// Decisión para la ruta actual con la sesión de este momento (tras un
    /// logout o un 401 cambia sin volver a navegar)
    pub fn current_navigation(&self) -> Navigation {
        let path = self.path.get();
        resolve(&self.state.session.snapshot(), &path)
    }

    /// Avisa cuando cambia la ruta o la sesión
    pub fn on_navigation<F: Fn() + 'static>(&self, callback: F) -> (Subscription, Subscription) {
        let callback = Rc::new(callback);
        let on_session = callback.clone();
        (
            self.path.subscribe(move || callback()),
            self.state.session.subscribe(move || on_session()),
        )
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Lanza una tarea async; los errores ya vienen como mensaje listo para mostrar
pub fn spawn<F>(label: &'static str, task: F)
where
    F: Future<Output = Result<(), String>> + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(message) = task.await {
            log::error!("❌ [{}] {}", label.to_uppercase(), message);
        }
    });
}

/// Último recurso para fallos de render: un componente que falla (o hace
/// panic) muestra el panel genérico en vez de tumbar toda la vista.
pub struct ErrorBoundary {
    component: &'static str,
}

impl ErrorBoundary {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn render<F>(&self, render: F) -> String
    where
        F: FnOnce() -> Result<String, String>,
    {
        match panic::catch_unwind(AssertUnwindSafe(render)) {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => {
                log::error!("💥 [RENDER] {} falló: {}", self.component, e);
                RENDER_FALLBACK_MESSAGE.to_string()
            }
            Err(_) => {
                log::error!("💥 [RENDER] panic en {}", self.component);
                RENDER_FALLBACK_MESSAGE.to_string()
            }
        }
    }
}
