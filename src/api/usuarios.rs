//! Handlers de Usuarios
//!
//! Toda la sección está reservada a administradores (ver el router
//! principal). Los usuarios usan borrado suave: DELETE marca
//! `activo = false` y el listado solo muestra los activos, pero la
//! consulta por ID sigue devolviendo los inactivos.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::{parsear_id, JsonCuerpo};
use crate::models::usuario::{Usuario, UsuarioCambios, UsuarioPayload, UsuarioRespuesta};
use crate::state::AppState;
use crate::utils::errors::{no_encontrado, AppError, AppResult};

pub fn crear_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar_usuarios).post(crear_usuario))
        .route(
            "/:id",
            get(obtener_usuario)
                .put(reemplazar_usuario)
                .patch(actualizar_usuario)
                .delete(eliminar_usuario),
        )
}

/// Verificar que el email no pertenezca ya a otro usuario
async fn validar_email_unico(state: &AppState, email: &str, excluir: Option<Uuid>) -> AppResult<()> {
    let existente = state
        .usuarios
        .buscar(|u| u.email == email && Some(u.id) != excluir)
        .await;
    if existente.is_some() {
        return Err(AppError::Conflicto(
            "Ya existe un usuario con ese email".to_string(),
        ));
    }
    Ok(())
}

/// Listar usuarios activos
async fn listar_usuarios(State(state): State<AppState>) -> AppResult<Json<Vec<UsuarioRespuesta>>> {
    let usuarios = state
        .usuarios
        .get_all()
        .await
        .into_iter()
        .filter(|u| u.activo)
        .map(UsuarioRespuesta::from)
        .collect();
    Ok(Json(usuarios))
}

/// Obtener un usuario por ID (incluye inactivos)
async fn obtener_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UsuarioRespuesta>> {
    let id = parsear_id(&id, "Usuario")?;
    let usuario = state
        .usuarios
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Usuario"))?;
    Ok(Json(UsuarioRespuesta::from(usuario)))
}

/// Crear un nuevo usuario
async fn crear_usuario(
    State(state): State<AppState>,
    JsonCuerpo(datos): JsonCuerpo<UsuarioPayload>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let usuario = Usuario::nuevo(datos)?;
    validar_email_unico(&state, &usuario.email, None).await?;

    let usuario = state.usuarios.add(usuario).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "mensaje": "Usuario creado",
            "usuario": UsuarioRespuesta::from(usuario),
        })),
    ))
}

/// Reemplazar completamente un usuario (PUT)
async fn reemplazar_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(datos): JsonCuerpo<UsuarioPayload>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Usuario")?;
    let anterior = state
        .usuarios
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Usuario"))?;

    let mut reemplazo = Usuario::nuevo(datos)?;
    reemplazo.id = anterior.id;
    reemplazo.created_at = anterior.created_at;
    reemplazo.activo = anterior.activo;
    validar_email_unico(&state, &reemplazo.email, Some(id)).await?;

    let actualizado = state
        .usuarios
        .update(id, reemplazo)
        .await?
        .ok_or_else(|| no_encontrado("Usuario"))?;
    Ok(Json(json!({
        "mensaje": "Usuario actualizado",
        "usuario": UsuarioRespuesta::from(actualizado),
    })))
}

/// Actualizar parcialmente un usuario (PATCH)
async fn actualizar_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(cambios): JsonCuerpo<UsuarioCambios>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Usuario")?;
    let mut usuario = state
        .usuarios
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Usuario"))?;

    usuario.aplicar_cambios(cambios)?;
    validar_email_unico(&state, &usuario.email, Some(id)).await?;

    let actualizado = state
        .usuarios
        .update(id, usuario)
        .await?
        .ok_or_else(|| no_encontrado("Usuario"))?;
    Ok(Json(json!({
        "mensaje": "Usuario actualizado parcialmente",
        "usuario": UsuarioRespuesta::from(actualizado),
    })))
}

/// Desactivar un usuario (borrado suave). El registro se conserva con
/// `activo = false`; repetir la operación es idempotente.
async fn eliminar_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Usuario")?;
    let mut usuario = state
        .usuarios
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Usuario"))?;

    usuario.activo = false;
    let desactivado = state
        .usuarios
        .update(id, usuario)
        .await?
        .ok_or_else(|| no_encontrado("Usuario"))?;
    Ok(Json(json!({
        "mensaje": "Usuario desactivado",
        "usuario": UsuarioRespuesta::from(desactivado),
    })))
}
