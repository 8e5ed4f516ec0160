// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// Login/registro/verificación contra /users/*. El SessionStore solo recibe
// valores ya validados por el backend.
// ============================================================================

use crate::models::RegisterRequest;
use crate::services::{ApiClient, AuthService};
use crate::state::{CartState, SessionStore};

/// Estado de la pantalla de verificación de email
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Verifying,
    Verified(String),
    Failed(String),
}

#[derive(Clone)]
pub struct SessionViewModel {
    auth: AuthService,
    session: SessionStore,
    cart: CartState,
}

impl SessionViewModel {
    pub fn new(api: ApiClient, session: SessionStore, cart: CartState) -> Self {
        Self {
            auth: AuthService::new(api),
            session,
            cart,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), String> {
        log::info!("🔐 [AUTH] Iniciando login...");
        let response = self
            .auth
            .login(email, password)
            .await
            .map_err(|e| e.user_message("Invalid credentials!"))?;

        let (token, user) = response
            .into_credentials()
            .ok_or_else(|| "Incomplete data received from server.".to_string())?;

        self.session.login(&token, user).map_err(|e| {
            log::error!("❌ [AUTH] No se pudo guardar la sesión: {}", e);
            "Incomplete data received from server.".to_string()
        })?;
        log::info!("✅ [AUTH] Login successful");
        Ok(())
    }

    /// Devuelve el mensaje de éxito a mostrar
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, String> {
        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self
            .auth
            .register(&request)
            .await
            .map_err(|e| e.user_message("Something went wrong!"))?;

        if response.success == Some(true) {
            log::info!("📧 [AUTH] Registro completado, email de verificación enviado");
            Ok(response
                .message
                .unwrap_or_else(|| "Registered successfully!".to_string()))
        } else {
            Err(response
                .message
                .unwrap_or_else(|| "Registration failed!".to_string()))
        }
    }

    pub async fn verify_email(&self, token: &str) -> VerificationStatus {
        if token.trim().is_empty() {
            return VerificationStatus::Failed(
                "Invalid verification link. Token not found.".to_string(),
            );
        }

        match self.auth.verify_email(token.trim()).await {
            Ok(response) => VerificationStatus::Verified(
                response
                    .message
                    .unwrap_or_else(|| "Email verified successfully!".to_string()),
            ),
            Err(e) => {
                log::warn!("⚠️ [AUTH] Verificación fallida: {}", e);
                VerificationStatus::Failed(
                    e.user_message("Verification failed. The link might be expired or invalid."),
                )
            }
        }
    }

    /// Logout completo: sesión + carrito local
    pub fn logout(&self) {
        self.session.logout();
        self.cart.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::testing::{cart_item, customer, Fixture};
    use futures::executor::block_on;
    use serde_json::json;

    fn viewmodel(fx: &Fixture) -> SessionViewModel {
        SessionViewModel::new(
            fx.api.clone(),
            fx.session.clone(),
            fx.state.cart.clone(),
        )
    }

    #[test]
    fn login_stores_token_and_user() {
        let fx = Fixture::new();
        let vm = viewmodel(&fx);
        fx.transport.respond(
            200,
            json!({"accessToken": "tok123", "user": {"_id": "u1", "username": "root", "role": "admin"}}),
        );

        block_on(vm.login(" root@shop.test ", "secret")).unwrap();

        let session = fx.session.snapshot();
        assert_eq!(session.token.as_deref(), Some("tok123"));
        assert_eq!(session.role(), Some(Role::Admin));
        assert_eq!(fx.transport.calls(), vec!["POST /users/login"]);
    }

    #[test]
    fn login_without_user_is_incomplete() {
        let fx = Fixture::new();
        let vm = viewmodel(&fx);
        fx.transport.respond(200, json!({"accessToken": "tok123"}));

        assert_eq!(
            block_on(vm.login("a@b.c", "x")).unwrap_err(),
            "Incomplete data received from server."
        );
        assert!(!fx.session.is_authenticated());
    }

    #[test]
    fn bad_credentials_show_server_message_or_fallback() {
        let fx = Fixture::new();
        let vm = viewmodel(&fx);
        fx.transport.respond(400, json!({"message": "Email not verified"}));
        fx.transport.fail_network();

        assert_eq!(block_on(vm.login("a@b.c", "x")).unwrap_err(), "Email not verified");
        assert_eq!(block_on(vm.login("a@b.c", "x")).unwrap_err(), "Invalid credentials!");
    }

    #[test]
    fn register_reports_backend_outcome() {
        let fx = Fixture::new();
        let vm = viewmodel(&fx);
        fx.transport.respond(201, json!({"success": true}));
        fx.transport.respond(200, json!({"success": false, "message": "Email taken"}));
        fx.transport.respond(500, json!({}));

        assert_eq!(
            block_on(vm.register("ana", "ana@shop.test", "pw")),
            Ok("Registered successfully!".to_string())
        );
        assert_eq!(
            block_on(vm.register("ana", "ana@shop.test", "pw")),
            Err("Email taken".to_string())
        );
        assert_eq!(
            block_on(vm.register("ana", "ana@shop.test", "pw")),
            Err("Something went wrong!".to_string())
        );
    }

    #[test]
    fn verify_email_states() {
        let fx = Fixture::new();
        let vm = viewmodel(&fx);

        assert_eq!(
            block_on(vm.verify_email("")),
            VerificationStatus::Failed("Invalid verification link. Token not found.".to_string())
        );
        assert!(fx.transport.requests().is_empty());

        fx.transport.respond(200, json!({}));
        assert_eq!(
            block_on(vm.verify_email("abc")),
            VerificationStatus::Verified("Email verified successfully!".to_string())
        );
        fx.transport.respond(400, json!({}));
        assert_eq!(
            block_on(vm.verify_email("abc")),
            VerificationStatus::Failed(
                "Verification failed. The link might be expired or invalid.".to_string()
            )
        );
        assert_eq!(fx.transport.calls()[0], "GET /users/verify-email/abc");
    }

    #[test]
    fn logout_clears_session_and_cart() {
        let fx = Fixture::signed_in(customer());
        let vm = viewmodel(&fx);
        fx.state.cart.replace(vec![cart_item("a", "A", 3.0, 1)]);

        vm.logout();
        assert!(!fx.session.is_authenticated());
        assert!(fx.state.cart.is_empty());
        assert!(fx.storage.is_empty());
    }
}
