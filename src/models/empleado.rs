//! Modelo de Empleado
//!
//! Este módulo contiene el struct Empleado, los dominios de rol y área
//! (compartidos con Usuario y Tarea) y sus payloads de escritura.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{texto_obligatorio, texto_opcional};
use crate::store::Registro;
use crate::utils::errors::{AppError, AppResult};

/// Roles del personal de la empresa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rol {
    #[serde(rename = "administrador")]
    Administrador,
    #[serde(rename = "planner")]
    Planner,
    #[serde(rename = "coordinador")]
    Coordinador,
}

impl Rol {
    pub fn parse(valor: &str) -> AppResult<Self> {
        match valor {
            "administrador" => Ok(Rol::Administrador),
            "planner" => Ok(Rol::Planner),
            "coordinador" => Ok(Rol::Coordinador),
            otro => Err(AppError::Validacion(format!("Rol inválido: '{}'", otro))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Administrador => "administrador",
            Rol::Planner => "planner",
            Rol::Coordinador => "coordinador",
        }
    }
}

/// Áreas operativas de la empresa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    #[serde(rename = "Producción y Logística")]
    ProduccionYLogistica,
    #[serde(rename = "Planificación y Finanzas")]
    PlanificacionYFinanzas,
    #[serde(rename = "Atención al Cliente")]
    AtencionAlCliente,
    #[serde(rename = "Administración")]
    Administracion,
}

impl Area {
    pub fn parse(valor: &str) -> AppResult<Self> {
        match valor {
            "Producción y Logística" => Ok(Area::ProduccionYLogistica),
            "Planificación y Finanzas" => Ok(Area::PlanificacionYFinanzas),
            "Atención al Cliente" => Ok(Area::AtencionAlCliente),
            "Administración" => Ok(Area::Administracion),
            otro => Err(AppError::Validacion(format!("Área inválida: '{}'", otro))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Area::ProduccionYLogistica => "Producción y Logística",
            Area::PlanificacionYFinanzas => "Planificación y Finanzas",
            Area::AtencionAlCliente => "Atención al Cliente",
            Area::Administracion => "Administración",
        }
    }
}

/// Empleado persistido
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Empleado {
    pub id: Uuid,
    pub nombre: String,
    pub rol: Rol,
    pub area: Area,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registro for Empleado {
    const COLECCION: &'static str = "empleados";

    fn id(&self) -> Uuid {
        self.id
    }

    fn marcar_actualizado(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Payload de creación o reemplazo completo (POST / PUT)
#[derive(Debug, Deserialize, Validate)]
pub struct EmpleadoPayload {
    pub nombre: Option<String>,
    pub rol: Option<String>,
    pub area: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,
    pub telefono: Option<String>,
}

/// Payload de actualización parcial (PATCH)
#[derive(Debug, Deserialize, Validate)]
pub struct EmpleadoCambios {
    pub nombre: Option<String>,
    pub rol: Option<String>,
    pub area: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,
    pub telefono: Option<String>,
}

impl Empleado {
    /// Construir un empleado nuevo aplicando validación de dominios
    pub fn nuevo(datos: EmpleadoPayload) -> AppResult<Self> {
        datos.validate()?;

        let ahora = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            nombre: texto_obligatorio(datos.nombre, "nombre")?,
            rol: Rol::parse(&texto_obligatorio(datos.rol, "rol")?)?,
            area: Area::parse(&texto_obligatorio(datos.area, "area")?)?,
            email: texto_opcional(datos.email),
            telefono: texto_opcional(datos.telefono),
            created_at: ahora,
            updated_at: ahora,
        })
    }

    /// Aplicar sobre el registro solo los campos presentes en el payload
    pub fn aplicar_cambios(&mut self, cambios: EmpleadoCambios) -> AppResult<()> {
        cambios.validate()?;

        if let Some(nombre) = texto_opcional(cambios.nombre) {
            self.nombre = nombre;
        }
        if let Some(rol) = texto_opcional(cambios.rol) {
            self.rol = Rol::parse(&rol)?;
        }
        if let Some(area) = texto_opcional(cambios.area) {
            self.area = Area::parse(&area)?;
        }
        if let Some(email) = texto_opcional(cambios.email) {
            self.email = Some(email);
        }
        if let Some(telefono) = texto_opcional(cambios.telefono) {
            self.telefono = Some(telefono);
        }
        Ok(())
    }
}

/// Proyección resumida para respuestas con referencias pobladas
#[derive(Debug, Clone, Serialize)]
pub struct EmpleadoResumen {
    pub id: Uuid,
    pub nombre: String,
    pub rol: Rol,
    pub area: Area,
}

impl From<Empleado> for EmpleadoResumen {
    fn from(empleado: Empleado) -> Self {
        Self {
            id: empleado.id,
            nombre: empleado.nombre,
            rol: empleado.rol,
            area: empleado.area,
        }
    }
}
