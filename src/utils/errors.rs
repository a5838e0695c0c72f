//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validación: {0}")]
    Validacion(String),

    #[error("Validación de campos: {0}")]
    ValidacionCampos(#[from] validator::ValidationErrors),

    #[error("No encontrado: {0}")]
    NoEncontrado(String),

    #[error("Conflicto: {0}")]
    Conflicto(String),

    #[error("No autenticado: {0}")]
    NoAutenticado(String),

    #[error("Prohibido: {0}")]
    Prohibido(String),

    #[error("Almacenamiento: {0}")]
    Almacenamiento(String),

    #[error("Error interno: {0}")]
    Interno(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, mensaje) = match self {
            AppError::Validacion(msg) => {
                tracing::warn!("Error de validación: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }

            AppError::ValidacionCampos(errores) => {
                tracing::warn!("Error de validación de campos: {}", errores);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Datos inválidos: {}", errores),
                )
            }

            AppError::NoEncontrado(msg) => (StatusCode::NOT_FOUND, msg),

            AppError::Conflicto(msg) => {
                tracing::warn!("Conflicto: {}", msg);
                (StatusCode::CONFLICT, msg)
            }

            AppError::NoAutenticado(msg) => {
                tracing::warn!("Acceso no autenticado: {}", msg);
                (StatusCode::UNAUTHORIZED, msg)
            }

            AppError::Prohibido(msg) => {
                tracing::warn!("Acceso prohibido: {}", msg);
                (StatusCode::FORBIDDEN, msg)
            }

            AppError::Almacenamiento(msg) => {
                tracing::error!("Error de almacenamiento: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error de almacenamiento".to_string(),
                )
            }

            AppError::Interno(msg) => {
                tracing::error!("Error interno: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                )
            }
        };

        (status, Json(json!({ "mensaje": mensaje }))).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn no_encontrado(recurso: &str) -> AppError {
    AppError::NoEncontrado(format!("{} no encontrado", recurso))
}

/// Función helper para crear errores de campo obligatorio ausente
pub fn campo_obligatorio(campo: &str) -> AppError {
    AppError::Validacion(format!("El campo '{}' es obligatorio", campo))
}
