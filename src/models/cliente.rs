//! Modelo de Cliente

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{texto_obligatorio, texto_opcional};
use crate::store::Registro;
use crate::utils::errors::{AppError, AppResult};

/// Tipos de cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoCliente {
    #[serde(rename = "empresa")]
    Empresa,
    #[serde(rename = "individual")]
    Individual,
}

impl TipoCliente {
    pub fn parse(valor: &str) -> AppResult<Self> {
        match valor {
            "empresa" => Ok(TipoCliente::Empresa),
            "individual" => Ok(TipoCliente::Individual),
            otro => Err(AppError::Validacion(format!(
                "Tipo de cliente inválido: '{}'",
                otro
            ))),
        }
    }
}

/// Cliente persistido
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub empresa: Option<String>,
    pub tipo: TipoCliente,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registro for Cliente {
    const COLECCION: &'static str = "clientes";

    fn id(&self) -> Uuid {
        self.id
    }

    fn marcar_actualizado(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Payload de creación o reemplazo completo (POST / PUT)
#[derive(Debug, Deserialize, Validate)]
pub struct ClientePayload {
    pub nombre: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub empresa: Option<String>,
    pub tipo: Option<String>,
    pub notas: Option<String>,
}

/// Payload de actualización parcial (PATCH)
#[derive(Debug, Deserialize, Validate)]
pub struct ClienteCambios {
    pub nombre: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub empresa: Option<String>,
    pub tipo: Option<String>,
    pub notas: Option<String>,
}

impl Cliente {
    pub fn nuevo(datos: ClientePayload) -> AppResult<Self> {
        datos.validate()?;

        let tipo = match texto_opcional(datos.tipo) {
            Some(valor) => TipoCliente::parse(&valor)?,
            None => TipoCliente::Individual,
        };

        let ahora = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            nombre: texto_obligatorio(datos.nombre, "nombre")?,
            email: texto_opcional(datos.email),
            telefono: texto_opcional(datos.telefono),
            empresa: texto_opcional(datos.empresa),
            tipo,
            notas: texto_opcional(datos.notas),
            created_at: ahora,
            updated_at: ahora,
        })
    }

    pub fn aplicar_cambios(&mut self, cambios: ClienteCambios) -> AppResult<()> {
        cambios.validate()?;

        if let Some(nombre) = texto_opcional(cambios.nombre) {
            self.nombre = nombre;
        }
        if let Some(email) = texto_opcional(cambios.email) {
            self.email = Some(email);
        }
        if let Some(telefono) = texto_opcional(cambios.telefono) {
            self.telefono = Some(telefono);
        }
        if let Some(empresa) = texto_opcional(cambios.empresa) {
            self.empresa = Some(empresa);
        }
        if let Some(tipo) = texto_opcional(cambios.tipo) {
            self.tipo = TipoCliente::parse(&tipo)?;
        }
        if let Some(notas) = texto_opcional(cambios.notas) {
            self.notas = Some(notas);
        }
        Ok(())
    }
}

/// Proyección resumida para respuestas con referencias pobladas
#[derive(Debug, Clone, Serialize)]
pub struct ClienteResumen {
    pub id: Uuid,
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub empresa: Option<String>,
}

impl From<Cliente> for ClienteResumen {
    fn from(cliente: Cliente) -> Self {
        Self {
            id: cliente.id,
            nombre: cliente.nombre,
            email: cliente.email,
            telefono: cliente.telefono,
            empresa: cliente.empresa,
        }
    }
}
