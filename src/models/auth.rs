use serde::{Deserialize, Serialize};

/// Rol del usuario autenticado
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// Cualquier rol distinto de "admin" se trata como cliente
    #[default]
    #[serde(other)]
    Customer,
}

/// Identidad devuelta por /users/login y persistida en localStorage
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Nombre para mostrar en la navbar
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Guest")
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Token + usuario solo si ambos vienen y el token no está vacío
    pub fn into_credentials(self) -> Option<(String, User)> {
        match (self.access_token, self.user) {
            (Some(token), Some(user)) if !token.is_empty() => Some((token, user)),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Respuesta genérica `{ success, message }` del backend
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}
