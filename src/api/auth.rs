//! Handlers de autenticación
//!
//! Registro, login y logout emiten o limpian la cookie de sesión (httpOnly);
//! el token también viaja en el cuerpo para clientes que prefieran el
//! header `Authorization`.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::JsonCuerpo;
use crate::middleware::auth::{requerir_auth, UsuarioAutenticado, COOKIE_SESION};
use crate::models::usuario::{Usuario, UsuarioPayload, UsuarioRespuesta};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::generar_token;

pub fn crear_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/perfil",
            get(perfil).route_layer(middleware::from_fn_with_state(state, requerir_auth)),
        )
        .route("/registro", post(registro))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

#[derive(Debug, Deserialize)]
pub struct Credenciales {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn cookie_de_sesion(token: &str) -> Cookie<'static> {
    Cookie::build((COOKIE_SESION, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Registrar un usuario nuevo e iniciar sesión en el mismo paso
async fn registro(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonCuerpo(datos): JsonCuerpo<UsuarioPayload>,
) -> AppResult<(StatusCode, CookieJar, Json<Value>)> {
    let usuario = Usuario::nuevo(datos)?;

    let existente = state.usuarios.buscar(|u| u.email == usuario.email).await;
    if existente.is_some() {
        return Err(AppError::Conflicto(
            "Ya existe un usuario con ese email".to_string(),
        ));
    }

    let usuario = state.usuarios.add(usuario).await?;
    let token = generar_token(
        usuario.id,
        usuario.rol.as_str(),
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok((
        StatusCode::CREATED,
        jar.add(cookie_de_sesion(&token)),
        Json(json!({
            "mensaje": "Usuario registrado",
            "token": token,
            "usuario": UsuarioRespuesta::from(usuario),
        })),
    ))
}

/// Iniciar sesión con email y contraseña
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonCuerpo(credenciales): JsonCuerpo<Credenciales>,
) -> AppResult<(CookieJar, Json<Value>)> {
    let email = credenciales
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validacion("El campo 'email' es obligatorio".to_string()))?
        .to_lowercase();
    let password = credenciales
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validacion("El campo 'password' es obligatorio".to_string()))?;

    // Credenciales desconocidas y contraseña incorrecta responden igual
    let usuario = state
        .usuarios
        .buscar(|u| u.email == email)
        .await
        .ok_or_else(|| AppError::NoAutenticado("Credenciales inválidas".to_string()))?;

    if !usuario.activo {
        return Err(AppError::NoAutenticado("Usuario inactivo".to_string()));
    }
    if !usuario.verificar_password(&password)? {
        return Err(AppError::NoAutenticado("Credenciales inválidas".to_string()));
    }

    let token = generar_token(
        usuario.id,
        usuario.rol.as_str(),
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok((
        jar.add(cookie_de_sesion(&token)),
        Json(json!({
            "mensaje": "Sesión iniciada",
            "token": token,
            "usuario": UsuarioRespuesta::from(usuario),
        })),
    ))
}

/// Cerrar sesión limpiando la cookie
async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(Cookie::build((COOKIE_SESION, "")).path("/").build());
    (jar, Json(json!({ "mensaje": "Sesión cerrada" })))
}

/// Perfil del usuario autenticado
async fn perfil(
    State(state): State<AppState>,
    Extension(autenticado): Extension<UsuarioAutenticado>,
) -> AppResult<Json<Value>> {
    let usuario = state
        .usuarios
        .get_by_id(autenticado.usuario_id)
        .await
        .ok_or_else(|| AppError::NoAutenticado("Usuario no encontrado".to_string()))?;
    Ok(Json(json!({ "usuario": UsuarioRespuesta::from(usuario) })))
}
