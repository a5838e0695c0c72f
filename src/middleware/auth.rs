//! Middleware de autenticación JWT
//!
//! Resuelve la credencial (cookie `token` o header `Authorization: Bearer`)
//! a un usuario registrado y lo inyecta en las extensions de la request.
//! La autorización ocurre siempre antes de invocar las operaciones de
//! entidades.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::models::empleado::Rol;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verificar_token;

/// Nombre de la cookie de sesión
pub const COOKIE_SESION: &str = "token";

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct UsuarioAutenticado {
    pub usuario_id: Uuid,
    pub nombre: String,
    pub rol: Rol,
}

/// Extraer el token del header Authorization o de la cookie de sesión
fn extraer_token(request: &Request) -> Option<String> {
    if let Some(token) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|valor| valor.to_str().ok())
        .and_then(|valor| valor.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }

    CookieJar::from_headers(request.headers())
        .get(COOKIE_SESION)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Middleware de autenticación: sin credencial válida no se llega al core
pub async fn requerir_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extraer_token(&request)
        .ok_or_else(|| AppError::NoAutenticado("Debes iniciar sesión".to_string()))?;

    let claims = verificar_token(&token, &state.config.jwt_secret)?;

    let usuario_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::NoAutenticado("Token inválido".to_string()))?;

    let usuario = state
        .usuarios
        .get_by_id(usuario_id)
        .await
        .ok_or_else(|| AppError::NoAutenticado("Usuario no encontrado".to_string()))?;

    if !usuario.activo {
        return Err(AppError::NoAutenticado("Usuario inactivo".to_string()));
    }

    request.extensions_mut().insert(UsuarioAutenticado {
        usuario_id: usuario.id,
        nombre: usuario.nombre.clone(),
        rol: usuario.rol,
    });

    Ok(next.run(request).await)
}

/// Middleware de autorización: solo administradores
pub async fn requerir_administrador(
    Extension(usuario): Extension<UsuarioAutenticado>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if usuario.rol != Rol::Administrador {
        return Err(AppError::Prohibido(
            "Solo usuarios con rol administrador pueden acceder".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
