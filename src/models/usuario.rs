//! Modelo de Usuario
//!
//! Los usuarios guardan la contraseña con hash bcrypt y usan borrado suave:
//! eliminar un usuario marca `activo = false` en lugar de borrar el registro.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::empleado::{Area, Rol};
use crate::models::{texto_obligatorio, texto_opcional};
use crate::store::Registro;
use crate::utils::errors::{AppError, AppResult};

/// Usuario persistido. El campo `password` guarda el hash, nunca el texto
/// plano; las respuestas de la API usan [`UsuarioRespuesta`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub rol: Rol,
    pub area: Area,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registro for Usuario {
    const COLECCION: &'static str = "usuarios";

    fn id(&self) -> Uuid {
        self.id
    }

    fn marcar_actualizado(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Payload de creación o reemplazo completo (POST / PUT / registro)
#[derive(Debug, Deserialize, Validate)]
pub struct UsuarioPayload {
    pub nombre: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub rol: Option<String>,
    pub area: Option<String>,
}

/// Payload de actualización parcial (PATCH)
#[derive(Debug, Deserialize, Validate)]
pub struct UsuarioCambios {
    pub nombre: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub rol: Option<String>,
    pub area: Option<String>,
}

fn password_valida(valor: Option<String>) -> AppResult<String> {
    let password = match valor {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AppError::Validacion("El campo 'password' es obligatorio".to_string())),
    };
    if password.chars().count() < 6 {
        return Err(AppError::Validacion(
            "La contraseña debe tener al menos 6 caracteres".to_string(),
        ));
    }
    Ok(password)
}

fn hashear(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Interno(format!("Error hasheando password: {}", e)))
}

impl Usuario {
    pub fn nuevo(datos: UsuarioPayload) -> AppResult<Self> {
        datos.validate()?;

        let rol = match texto_opcional(datos.rol) {
            Some(valor) => Rol::parse(&valor)?,
            None => Rol::Coordinador,
        };
        let area = Area::parse(&texto_obligatorio(datos.area, "area")?)?;
        let password = password_valida(datos.password)?;

        let ahora = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            nombre: texto_obligatorio(datos.nombre, "nombre")?,
            email: texto_obligatorio(datos.email, "email")?.to_lowercase(),
            password: hashear(&password)?,
            rol,
            area,
            activo: true,
            created_at: ahora,
            updated_at: ahora,
        })
    }

    pub fn aplicar_cambios(&mut self, cambios: UsuarioCambios) -> AppResult<()> {
        cambios.validate()?;

        if let Some(nombre) = texto_opcional(cambios.nombre) {
            self.nombre = nombre;
        }
        if let Some(email) = texto_opcional(cambios.email) {
            self.email = email.to_lowercase();
        }
        if cambios.password.is_some() {
            let password = password_valida(cambios.password)?;
            self.password = hashear(&password)?;
        }
        if let Some(rol) = texto_opcional(cambios.rol) {
            self.rol = Rol::parse(&rol)?;
        }
        if let Some(area) = texto_opcional(cambios.area) {
            self.area = Area::parse(&area)?;
        }
        Ok(())
    }

    /// Comparar una contraseña en texto plano contra el hash almacenado
    pub fn verificar_password(&self, password: &str) -> AppResult<bool> {
        verify(password, &self.password)
            .map_err(|e| AppError::Interno(format!("Error verificando password: {}", e)))
    }
}

/// Respuesta de usuario para la API: nunca incluye el password
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioRespuesta {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub rol: Rol,
    pub area: Area,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Usuario> for UsuarioRespuesta {
    fn from(usuario: Usuario) -> Self {
        Self {
            id: usuario.id,
            nombre: usuario.nombre,
            email: usuario.email,
            rol: usuario.rol,
            area: usuario.area,
            activo: usuario.activo,
            created_at: usuario.created_at,
            updated_at: usuario.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_basico() -> UsuarioPayload {
        UsuarioPayload {
            nombre: Some("Ana".to_string()),
            email: Some("Ana@Eventify.com".to_string()),
            password: Some("secreto123".to_string()),
            rol: None,
            area: Some("Administración".to_string()),
        }
    }

    #[test]
    fn crea_activo_con_rol_por_defecto_y_email_en_minusculas() {
        let usuario = Usuario::nuevo(payload_basico()).unwrap();
        assert!(usuario.activo);
        assert_eq!(usuario.rol, Rol::Coordinador);
        assert_eq!(usuario.email, "ana@eventify.com");
    }

    #[test]
    fn guarda_el_password_con_hash() {
        let usuario = Usuario::nuevo(payload_basico()).unwrap();
        assert_ne!(usuario.password, "secreto123");
        assert!(usuario.verificar_password("secreto123").unwrap());
        assert!(!usuario.verificar_password("otro").unwrap());
    }

    #[test]
    fn rechaza_password_corta() {
        let mut payload = payload_basico();
        payload.password = Some("abc".to_string());
        assert!(Usuario::nuevo(payload).is_err());
    }

    #[test]
    fn rechaza_email_mal_formado() {
        let mut payload = payload_basico();
        payload.email = Some("no-es-un-email".to_string());
        assert!(Usuario::nuevo(payload).is_err());
    }
}
