//! Handlers de Empleados
//!
//! Este módulo maneja las operaciones CRUD para empleados.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::api::{parsear_id, JsonCuerpo};
use crate::models::empleado::{Empleado, EmpleadoCambios, EmpleadoPayload};
use crate::state::AppState;
use crate::utils::errors::{no_encontrado, AppResult};

pub fn crear_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar_empleados).post(crear_empleado))
        .route(
            "/:id",
            get(obtener_empleado)
                .put(reemplazar_empleado)
                .patch(actualizar_empleado)
                .delete(eliminar_empleado),
        )
}

/// Listar todos los empleados
async fn listar_empleados(State(state): State<AppState>) -> AppResult<Json<Vec<Empleado>>> {
    Ok(Json(state.empleados.get_all().await))
}

/// Obtener un empleado por ID
async fn obtener_empleado(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Empleado>> {
    let id = parsear_id(&id, "Empleado")?;
    let empleado = state
        .empleados
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Empleado"))?;
    Ok(Json(empleado))
}

/// Crear un nuevo empleado
async fn crear_empleado(
    State(state): State<AppState>,
    JsonCuerpo(datos): JsonCuerpo<EmpleadoPayload>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let empleado = state.empleados.add(Empleado::nuevo(datos)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensaje": "Empleado creado", "empleado": empleado })),
    ))
}

/// Reemplazar completamente un empleado (PUT)
async fn reemplazar_empleado(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(datos): JsonCuerpo<EmpleadoPayload>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Empleado")?;
    let anterior = state
        .empleados
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Empleado"))?;

    let mut reemplazo = Empleado::nuevo(datos)?;
    reemplazo.id = anterior.id;
    reemplazo.created_at = anterior.created_at;

    let actualizado = state
        .empleados
        .update(id, reemplazo)
        .await?
        .ok_or_else(|| no_encontrado("Empleado"))?;
    Ok(Json(
        json!({ "mensaje": "Empleado actualizado", "empleado": actualizado }),
    ))
}

/// Actualizar parcialmente un empleado (PATCH)
async fn actualizar_empleado(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(cambios): JsonCuerpo<EmpleadoCambios>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Empleado")?;
    let mut empleado = state
        .empleados
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Empleado"))?;

    empleado.aplicar_cambios(cambios)?;

    let actualizado = state
        .empleados
        .update(id, empleado)
        .await?
        .ok_or_else(|| no_encontrado("Empleado"))?;
    Ok(Json(
        json!({ "mensaje": "Empleado actualizado parcialmente", "empleado": actualizado }),
    ))
}

/// Eliminar un empleado
async fn eliminar_empleado(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Empleado")?;
    let eliminado = state
        .empleados
        .remove(id)
        .await?
        .ok_or_else(|| no_encontrado("Empleado"))?;
    Ok(Json(
        json!({ "mensaje": "Empleado eliminado", "empleado": eliminado }),
    ))
}
