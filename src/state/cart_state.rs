// ============================================================================
// CART STATE - Vista local del carrito del backend
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::{cart_total, CartItem};
use crate::state::reactivity::{ReactiveState, Subscription};
use crate::utils::format_price;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct CartSnapshot {
    /// Orden de inserción tal como lo devuelve el backend
    pub items: Vec<CartItem>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CartSnapshot {
    /// Fusionar las líneas autoritativas devueltas por `/cart/add`:
    /// actualizar en sitio si la línea ya existe, añadir al final si no.
    pub fn merge(&mut self, incoming: Vec<CartItem>) {
        for item in incoming {
            match self.items.iter_mut().find(|existing| existing.same_line(&item)) {
                Some(existing) => {
                    existing.quantity = item.quantity;
                    existing.product = item.product;
                }
                None => self.items.push(item),
            }
        }
    }

    pub fn total(&self) -> f64 {
        cart_total(&self.items)
    }

    pub fn formatted_total(&self) -> String {
        format_price(self.total())
    }

    /// Σ cantidades, para el badge de la navbar
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(CartItem::quantity).sum()
    }

    pub fn line_for_product(&self, product_id: &str) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.product_id() == Some(product_id))
    }
}

#[derive(Clone, Default)]
pub struct CartState {
    inner: ReactiveState<CartSnapshot>,
    pending: Rc<RefCell<HashMap<String, usize>>>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// pending: loading on, error limpio
    pub fn begin(&self) {
        self.inner.update(|cart| {
            cart.loading = true;
            cart.error = None;
        });
    }

    /// Reemplazo completo con la verdad del servidor
    pub fn replace(&self, items: Vec<CartItem>) {
        self.inner.update(|cart| {
            cart.items = items;
            cart.loading = false;
            cart.error = None;
        });
    }

    pub fn merge(&self, items: Vec<CartItem>) {
        self.inner.update(|cart| {
            cart.merge(items);
            cart.loading = false;
            cart.error = None;
        });
    }

    /// rejected: las líneas no se tocan
    pub fn fail(&self, message: String) {
        self.inner.update(|cart| {
            cart.loading = false;
            cart.error = Some(message);
        });
    }

    /// Vaciar localmente (pedido realizado, logout)
    pub fn reset(&self) {
        self.inner.update(|cart| {
            cart.items.clear();
            cart.loading = false;
            cart.error = None;
        });
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.get()
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.inner.with(|cart| cart.items.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.with(|cart| cart.items.is_empty())
    }

    pub fn total(&self) -> f64 {
        self.inner.with(CartSnapshot::total)
    }

    pub fn formatted_total(&self) -> String {
        self.inner.with(CartSnapshot::formatted_total)
    }

    pub fn item_count(&self) -> u32 {
        self.inner.with(CartSnapshot::item_count)
    }

    pub fn error(&self) -> Option<String> {
        self.inner.with(|cart| cart.error.clone())
    }

    /// Marca una mutación en curso para el producto hasta que se suelta el guard
    pub fn track(&self, product_id: &str) -> PendingGuard {
        *self
            .pending
            .borrow_mut()
            .entry(product_id.to_string())
            .or_insert(0) += 1;
        PendingGuard {
            pending: self.pending.clone(),
            product_id: product_id.to_string(),
        }
    }

    /// La vista deshabilita el control mientras esto sea true
    pub fn is_pending(&self, product_id: &str) -> bool {
        self.pending.borrow().contains_key(product_id)
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.inner.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.inner.unsubscribe(subscription)
    }
}

#[must_use = "la marca se suelta al hacer drop"]
pub struct PendingGuard {
    pending: Rc<RefCell<HashMap<String, usize>>>,
    product_id: String,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut pending = self.pending.borrow_mut();
        if let Some(count) = pending.get_mut(&self.product_id) {
            *count -= 1;
            if *count == 0 {
                pending.remove(&self.product_id);
            }
        }
    }
}
