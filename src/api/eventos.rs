//! Handlers de Eventos
//!
//! Además del CRUD, los eventos validan que sus referencias a cliente y
//! empleado existan al momento de escribir, y pueblan esas referencias
//! como proyección de lectura en las respuestas.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::api::{parsear_id, JsonCuerpo};
use crate::models::cliente::ClienteResumen;
use crate::models::empleado::EmpleadoResumen;
use crate::models::evento::{Evento, EventoCambios, EventoPayload, EventoRespuesta};
use crate::state::AppState;
use crate::utils::errors::{no_encontrado, AppError, AppResult};

pub fn crear_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar_eventos).post(crear_evento))
        .route(
            "/:id",
            get(obtener_evento)
                .put(reemplazar_evento)
                .patch(actualizar_evento)
                .delete(eliminar_evento),
        )
}

/// Verificar que las referencias del evento resuelvan a registros existentes
async fn validar_referencias(state: &AppState, evento: &Evento) -> AppResult<()> {
    if let Some(cliente_id) = evento.cliente_id {
        if !state.clientes.exists(cliente_id).await {
            return Err(AppError::Validacion(format!(
                "El cliente '{}' no existe",
                cliente_id
            )));
        }
    }
    if let Some(empleado_id) = evento.empleado_id {
        if !state.empleados.exists(empleado_id).await {
            return Err(AppError::Validacion(format!(
                "El empleado '{}' no existe",
                empleado_id
            )));
        }
    }
    Ok(())
}

/// Poblar las referencias del evento para la respuesta
async fn proyectar(state: &AppState, evento: Evento) -> EventoRespuesta {
    let cliente = match evento.cliente_id {
        Some(id) => state.clientes.get_by_id(id).await.map(ClienteResumen::from),
        None => None,
    };
    let empleado = match evento.empleado_id {
        Some(id) => state
            .empleados
            .get_by_id(id)
            .await
            .map(EmpleadoResumen::from),
        None => None,
    };
    EventoRespuesta {
        evento,
        cliente,
        empleado,
    }
}

/// Listar todos los eventos con sus referencias pobladas
async fn listar_eventos(State(state): State<AppState>) -> AppResult<Json<Vec<EventoRespuesta>>> {
    let eventos = state.eventos.get_all().await;
    let mut respuesta = Vec::with_capacity(eventos.len());
    for evento in eventos {
        respuesta.push(proyectar(&state, evento).await);
    }
    Ok(Json(respuesta))
}

/// Obtener un evento por ID
async fn obtener_evento(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EventoRespuesta>> {
    let id = parsear_id(&id, "Evento")?;
    let evento = state
        .eventos
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Evento"))?;
    Ok(Json(proyectar(&state, evento).await))
}

/// Crear un nuevo evento
async fn crear_evento(
    State(state): State<AppState>,
    JsonCuerpo(datos): JsonCuerpo<EventoPayload>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let evento = Evento::nuevo(datos)?;
    validar_referencias(&state, &evento).await?;

    let evento = state.eventos.add(evento).await?;
    let respuesta = proyectar(&state, evento).await;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensaje": "Evento creado", "evento": respuesta })),
    ))
}

/// Reemplazar completamente un evento (PUT)
async fn reemplazar_evento(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(datos): JsonCuerpo<EventoPayload>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Evento")?;
    let anterior = state
        .eventos
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Evento"))?;

    let mut reemplazo = Evento::nuevo(datos)?;
    reemplazo.id = anterior.id;
    reemplazo.created_at = anterior.created_at;
    validar_referencias(&state, &reemplazo).await?;

    let actualizado = state
        .eventos
        .update(id, reemplazo)
        .await?
        .ok_or_else(|| no_encontrado("Evento"))?;
    let respuesta = proyectar(&state, actualizado).await;
    Ok(Json(
        json!({ "mensaje": "Evento actualizado", "evento": respuesta }),
    ))
}

/// Actualizar parcialmente un evento (PATCH)
async fn actualizar_evento(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(cambios): JsonCuerpo<EventoCambios>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Evento")?;
    let mut evento = state
        .eventos
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Evento"))?;

    evento.aplicar_cambios(cambios)?;
    validar_referencias(&state, &evento).await?;

    let actualizado = state
        .eventos
        .update(id, evento)
        .await?
        .ok_or_else(|| no_encontrado("Evento"))?;
    let respuesta = proyectar(&state, actualizado).await;
    Ok(Json(
        json!({ "mensaje": "Evento actualizado parcialmente", "evento": respuesta }),
    ))
}

/// Eliminar un evento
async fn eliminar_evento(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Evento")?;
    let eliminado = state
        .eventos
        .remove(id)
        .await?
        .ok_or_else(|| no_encontrado("Evento"))?;
    Ok(Json(
        json!({ "mensaje": "Evento eliminado", "evento": eliminado }),
    ))
}
