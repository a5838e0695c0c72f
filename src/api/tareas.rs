//! Handlers de Tareas
//!
//! El listado admite filtros por query string (estado, prioridad, asignados
//! y rango de fechas); las escrituras validan la clasificación área/tipo y
//! la existencia de las referencias asignadas.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::api::{parsear_id, JsonCuerpo};
use crate::models::tarea::{self, Tarea, TareaCambios, TareaFiltros, TareaPayload};
use crate::state::AppState;
use crate::utils::errors::{no_encontrado, AppError, AppResult};

pub fn crear_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar_tareas).post(crear_tarea))
        .route(
            "/:id",
            get(obtener_tarea)
                .put(reemplazar_tarea)
                .patch(actualizar_tarea)
                .delete(eliminar_tarea),
        )
}

/// Verificar que las referencias asignadas resuelvan a registros existentes
async fn validar_referencias(state: &AppState, tarea: &Tarea) -> AppResult<()> {
    if let Some(empleado_id) = tarea.empleado_asignado {
        if !state.empleados.exists(empleado_id).await {
            return Err(AppError::Validacion(format!(
                "El empleado '{}' no existe",
                empleado_id
            )));
        }
    }
    if let Some(evento_id) = tarea.evento_asignado {
        if !state.eventos.exists(evento_id).await {
            return Err(AppError::Validacion(format!(
                "El evento '{}' no existe",
                evento_id
            )));
        }
    }
    Ok(())
}

/// Listar tareas, aplicando los filtros presentes en la query string
async fn listar_tareas(
    State(state): State<AppState>,
    Query(filtros): Query<TareaFiltros>,
) -> AppResult<Json<Vec<Tarea>>> {
    let tareas = state.tareas.get_all().await;
    Ok(Json(tarea::filtrar(tareas, &filtros)))
}

/// Obtener una tarea por ID
async fn obtener_tarea(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Tarea>> {
    let id = parsear_id(&id, "Tarea")?;
    let tarea = state
        .tareas
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Tarea"))?;
    Ok(Json(tarea))
}

/// Crear una nueva tarea
async fn crear_tarea(
    State(state): State<AppState>,
    JsonCuerpo(datos): JsonCuerpo<TareaPayload>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let tarea = Tarea::nueva(datos)?;
    validar_referencias(&state, &tarea).await?;

    let tarea = state.tareas.add(tarea).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensaje": "Tarea creada", "tarea": tarea })),
    ))
}

/// Reemplazar completamente una tarea (PUT)
async fn reemplazar_tarea(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(datos): JsonCuerpo<TareaPayload>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Tarea")?;
    let anterior = state
        .tareas
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Tarea"))?;

    let mut reemplazo = Tarea::nueva(datos)?;
    reemplazo.id = anterior.id;
    reemplazo.created_at = anterior.created_at;
    validar_referencias(&state, &reemplazo).await?;

    let actualizada = state
        .tareas
        .update(id, reemplazo)
        .await?
        .ok_or_else(|| no_encontrado("Tarea"))?;
    Ok(Json(
        json!({ "mensaje": "Tarea actualizada", "tarea": actualizada }),
    ))
}

/// Actualizar parcialmente una tarea (PATCH)
async fn actualizar_tarea(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(cambios): JsonCuerpo<TareaCambios>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Tarea")?;
    let mut tarea = state
        .tareas
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Tarea"))?;

    tarea.aplicar_cambios(cambios)?;
    validar_referencias(&state, &tarea).await?;

    let actualizada = state
        .tareas
        .update(id, tarea)
        .await?
        .ok_or_else(|| no_encontrado("Tarea"))?;
    Ok(Json(
        json!({ "mensaje": "Tarea actualizada parcialmente", "tarea": actualizada }),
    ))
}

/// Eliminar una tarea
async fn eliminar_tarea(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Tarea")?;
    let eliminada = state
        .tareas
        .remove(id)
        .await?
        .ok_or_else(|| no_encontrado("Tarea"))?;
    Ok(Json(
        json!({ "mensaje": "Tarea eliminada", "tarea": eliminada }),
    ))
}
