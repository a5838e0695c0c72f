//! Modelos de las entidades de Eventify
//!
//! Cada módulo contiene el registro persistido de una entidad, sus dominios
//! enumerados y los payloads de creación/actualización con su validación.

pub mod catalogo;
pub mod cliente;
pub mod empleado;
pub mod evento;
pub mod tarea;
pub mod usuario;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::utils::errors::{campo_obligatorio, AppError, AppResult};

/// Extraer un campo de texto obligatorio de un payload
pub(crate) fn texto_obligatorio(valor: Option<String>, campo: &str) -> AppResult<String> {
    match valor {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(campo_obligatorio(campo)),
    }
}

/// Normalizar un campo de texto opcional; el texto vacío cuenta como ausente
pub(crate) fn texto_opcional(valor: Option<String>) -> Option<String> {
    valor
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parsear un campo de fecha opcional en formato AAAA-MM-DD
pub(crate) fn parsear_fecha(valor: Option<String>, campo: &str) -> AppResult<Option<NaiveDate>> {
    match texto_opcional(valor) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(&v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                AppError::Validacion(format!(
                    "El campo '{}' debe ser una fecha con formato AAAA-MM-DD",
                    campo
                ))
            }),
    }
}

/// Parsear una referencia opcional a otra entidad
pub(crate) fn parsear_referencia(valor: Option<String>, campo: &str) -> AppResult<Option<Uuid>> {
    match texto_opcional(valor) {
        None => Ok(None),
        Some(v) => Uuid::parse_str(&v).map(Some).map_err(|_| {
            AppError::Validacion(format!(
                "El campo '{}' no es un identificador válido",
                campo
            ))
        }),
    }
}
