//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para la emisión y
//! verificación de tokens JWT de sesión.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Claims del token de sesión
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // id del usuario
    pub rol: String,
    pub exp: usize, // expiración (timestamp)
    pub iat: usize, // emisión (timestamp)
}

/// Generar JWT token para un usuario
pub fn generar_token(
    usuario_id: Uuid,
    rol: &str,
    secreto: &str,
    expiracion_segundos: u64,
) -> Result<String, AppError> {
    let ahora = chrono::Utc::now();
    let expira = ahora + chrono::Duration::seconds(expiracion_segundos as i64);

    let claims = Claims {
        sub: usuario_id.to_string(),
        rol: rol.to_string(),
        exp: expira.timestamp() as usize,
        iat: ahora.timestamp() as usize,
    };

    let clave = EncodingKey::from_secret(secreto.as_ref());

    encode(&Header::default(), &claims, &clave)
        .map_err(|e| AppError::Interno(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar un JWT token
pub fn verificar_token(token: &str, secreto: &str) -> Result<Claims, AppError> {
    let clave = DecodingKey::from_secret(secreto.as_ref());

    let datos = decode::<Claims>(token, &clave, &Validation::default())
        .map_err(|_| AppError::NoAutenticado("Token inválido o expirado".to_string()))?;

    Ok(datos.claims)
}
