//! Router principal de la API
//!
//! Monta las rutas públicas de autenticación y las rutas de entidades
//! protegidas por el middleware JWT. La sección `/api/usuarios` exige
//! además rol administrador.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::{async_trait, http::HeaderValue, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::middleware::auth::{requerir_administrador, requerir_auth};
use crate::state::AppState;
use crate::utils::errors::{no_encontrado, AppError, AppResult};

pub mod auth;
pub mod clientes;
pub mod empleados;
pub mod eventos;
pub mod tareas;
pub mod usuarios;

/// Interpretar un segmento de ruta como ID. Un ID mal formado no puede
/// referir a ningún registro, así que responde 404 y no 500.
pub(crate) fn parsear_id(id: &str, recurso: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| no_encontrado(recurso))
}

/// Extractor de cuerpo JSON. Un cuerpo ilegible o mal tipado responde 400
/// con el mismo sobre `{"mensaje"}` que el resto de los errores de la API.
pub(crate) struct JsonCuerpo<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonCuerpo<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(valor) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rechazo| {
                AppError::Validacion(format!("Cuerpo JSON inválido: {}", rechazo.body_text()))
            })?;
        Ok(Self(valor))
    }
}

async fn salud() -> Json<Value> {
    Json(json!({ "estado": "ok" }))
}

fn crear_cors(config: &EnvironmentConfig) -> CorsLayer {
    if config.cors_origins.iter().any(|origen| origen == "*") {
        CorsLayer::very_permissive()
    } else {
        let origenes: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origen| origen.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origenes)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Construir el router completo de la aplicación
pub fn crear_router(state: AppState) -> Router {
    let protegidas = Router::new()
        .nest("/clientes", clientes::crear_router())
        .nest("/empleados", empleados::crear_router())
        .nest("/eventos", eventos::crear_router())
        .nest("/tareas", tareas::crear_router())
        .nest(
            "/usuarios",
            usuarios::crear_router()
                .route_layer(middleware::from_fn(requerir_administrador)),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            requerir_auth,
        ));

    Router::new()
        .route("/salud", get(salud))
        .nest("/api/auth", auth::crear_router(state.clone()))
        .nest("/api", protegidas)
        .layer(crear_cors(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
