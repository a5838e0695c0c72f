//! Handlers de Clientes
//!
//! Este módulo maneja las operaciones CRUD para clientes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::api::{parsear_id, JsonCuerpo};
use crate::models::cliente::{Cliente, ClienteCambios, ClientePayload};
use crate::state::AppState;
use crate::utils::errors::{no_encontrado, AppResult};

pub fn crear_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar_clientes).post(crear_cliente))
        .route(
            "/:id",
            get(obtener_cliente)
                .put(reemplazar_cliente)
                .patch(actualizar_cliente)
                .delete(eliminar_cliente),
        )
}

/// Listar todos los clientes
async fn listar_clientes(State(state): State<AppState>) -> AppResult<Json<Vec<Cliente>>> {
    Ok(Json(state.clientes.get_all().await))
}

/// Obtener un cliente por ID
async fn obtener_cliente(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Cliente>> {
    let id = parsear_id(&id, "Cliente")?;
    let cliente = state
        .clientes
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Cliente"))?;
    Ok(Json(cliente))
}

/// Crear un nuevo cliente
async fn crear_cliente(
    State(state): State<AppState>,
    JsonCuerpo(datos): JsonCuerpo<ClientePayload>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let cliente = state.clientes.add(Cliente::nuevo(datos)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensaje": "Cliente creado", "cliente": cliente })),
    ))
}

/// Reemplazar completamente un cliente (PUT): los campos opcionales
/// omitidos vuelven a su valor por defecto
async fn reemplazar_cliente(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(datos): JsonCuerpo<ClientePayload>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Cliente")?;
    let anterior = state
        .clientes
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Cliente"))?;

    let mut reemplazo = Cliente::nuevo(datos)?;
    reemplazo.id = anterior.id;
    reemplazo.created_at = anterior.created_at;

    let actualizado = state
        .clientes
        .update(id, reemplazo)
        .await?
        .ok_or_else(|| no_encontrado("Cliente"))?;
    Ok(Json(
        json!({ "mensaje": "Cliente actualizado", "cliente": actualizado }),
    ))
}

/// Actualizar parcialmente un cliente (PATCH)
async fn actualizar_cliente(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonCuerpo(cambios): JsonCuerpo<ClienteCambios>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Cliente")?;
    let mut cliente = state
        .clientes
        .get_by_id(id)
        .await
        .ok_or_else(|| no_encontrado("Cliente"))?;

    cliente.aplicar_cambios(cambios)?;

    let actualizado = state
        .clientes
        .update(id, cliente)
        .await?
        .ok_or_else(|| no_encontrado("Cliente"))?;
    Ok(Json(
        json!({ "mensaje": "Cliente actualizado parcialmente", "cliente": actualizado }),
    ))
}

/// Eliminar un cliente
async fn eliminar_cliente(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parsear_id(&id, "Cliente")?;
    let eliminado = state
        .clientes
        .remove(id)
        .await?
        .ok_or_else(|| no_encontrado("Cliente"))?;
    Ok(Json(
        json!({ "mensaje": "Cliente eliminado", "cliente": eliminado }),
    ))
}
