//! Modelo de Evento
//!
//! Los eventos guardan referencias crudas (identificadores) a Cliente y
//! Empleado; la unión con los datos relacionados se hace como proyección de
//! lectura en los handlers, nunca en el registro persistido.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cliente::ClienteResumen;
use crate::models::empleado::EmpleadoResumen;
use crate::models::{parsear_fecha, parsear_referencia, texto_obligatorio, texto_opcional};
use crate::store::Registro;
use crate::utils::errors::{AppError, AppResult};

/// Tipos de evento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoEvento {
    Conferencia,
    Workshop,
    Networking,
    Social,
    Deportivo,
    Cultural,
    Educativo,
    Corporativo,
}

impl TipoEvento {
    pub fn parse(valor: &str) -> AppResult<Self> {
        match valor {
            "conferencia" => Ok(TipoEvento::Conferencia),
            "workshop" => Ok(TipoEvento::Workshop),
            "networking" => Ok(TipoEvento::Networking),
            "social" => Ok(TipoEvento::Social),
            "deportivo" => Ok(TipoEvento::Deportivo),
            "cultural" => Ok(TipoEvento::Cultural),
            "educativo" => Ok(TipoEvento::Educativo),
            "corporativo" => Ok(TipoEvento::Corporativo),
            otro => Err(AppError::Validacion(format!(
                "Tipo de evento inválido: '{}'",
                otro
            ))),
        }
    }
}

/// Estados del ciclo de vida de un evento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoEvento {
    Activo,
    Pendiente,
    Cancelado,
    Finalizado,
}

impl EstadoEvento {
    pub fn parse(valor: &str) -> AppResult<Self> {
        match valor {
            "activo" => Ok(EstadoEvento::Activo),
            "pendiente" => Ok(EstadoEvento::Pendiente),
            "cancelado" => Ok(EstadoEvento::Cancelado),
            "finalizado" => Ok(EstadoEvento::Finalizado),
            otro => Err(AppError::Validacion(format!(
                "Estado de evento inválido: '{}'",
                otro
            ))),
        }
    }
}

/// Evento persistido
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evento {
    pub id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub lugar: Option<String>,
    pub presupuesto: f64,
    pub tipo: TipoEvento,
    pub estado: EstadoEvento,
    pub cliente_id: Option<Uuid>,
    pub empleado_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registro for Evento {
    const COLECCION: &'static str = "eventos";

    fn id(&self) -> Uuid {
        self.id
    }

    fn marcar_actualizado(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Payload de creación o reemplazo completo (POST / PUT)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventoPayload {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub lugar: Option<String>,
    pub presupuesto: Option<f64>,
    pub tipo: Option<String>,
    pub estado: Option<String>,
    pub cliente_id: Option<String>,
    pub empleado_id: Option<String>,
}

/// Payload de actualización parcial (PATCH)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventoCambios {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub lugar: Option<String>,
    pub presupuesto: Option<f64>,
    pub tipo: Option<String>,
    pub estado: Option<String>,
    pub cliente_id: Option<String>,
    pub empleado_id: Option<String>,
}

fn presupuesto_valido(valor: f64) -> AppResult<f64> {
    if valor < 0.0 {
        return Err(AppError::Validacion(
            "El presupuesto no puede ser negativo".to_string(),
        ));
    }
    Ok(valor)
}

impl Evento {
    // No se valida fechaFin >= fechaInicio: decisión de producto pendiente.
    pub fn nuevo(datos: EventoPayload) -> AppResult<Self> {
        let tipo = match texto_opcional(datos.tipo) {
            Some(valor) => TipoEvento::parse(&valor)?,
            None => TipoEvento::Corporativo,
        };
        let estado = match texto_opcional(datos.estado) {
            Some(valor) => EstadoEvento::parse(&valor)?,
            None => EstadoEvento::Pendiente,
        };

        let ahora = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            nombre: texto_obligatorio(datos.nombre, "nombre")?,
            descripcion: texto_opcional(datos.descripcion),
            fecha_inicio: parsear_fecha(datos.fecha_inicio, "fechaInicio")?,
            fecha_fin: parsear_fecha(datos.fecha_fin, "fechaFin")?,
            lugar: texto_opcional(datos.lugar),
            presupuesto: presupuesto_valido(datos.presupuesto.unwrap_or(0.0))?,
            tipo,
            estado,
            cliente_id: parsear_referencia(datos.cliente_id, "clienteId")?,
            empleado_id: parsear_referencia(datos.empleado_id, "empleadoId")?,
            created_at: ahora,
            updated_at: ahora,
        })
    }

    pub fn aplicar_cambios(&mut self, cambios: EventoCambios) -> AppResult<()> {
        if let Some(nombre) = texto_opcional(cambios.nombre) {
            self.nombre = nombre;
        }
        if let Some(descripcion) = texto_opcional(cambios.descripcion) {
            self.descripcion = Some(descripcion);
        }
        if cambios.fecha_inicio.is_some() {
            self.fecha_inicio = parsear_fecha(cambios.fecha_inicio, "fechaInicio")?;
        }
        if cambios.fecha_fin.is_some() {
            self.fecha_fin = parsear_fecha(cambios.fecha_fin, "fechaFin")?;
        }
        if let Some(lugar) = texto_opcional(cambios.lugar) {
            self.lugar = Some(lugar);
        }
        if let Some(presupuesto) = cambios.presupuesto {
            self.presupuesto = presupuesto_valido(presupuesto)?;
        }
        if let Some(tipo) = texto_opcional(cambios.tipo) {
            self.tipo = TipoEvento::parse(&tipo)?;
        }
        if let Some(estado) = texto_opcional(cambios.estado) {
            self.estado = EstadoEvento::parse(&estado)?;
        }
        if cambios.cliente_id.is_some() {
            self.cliente_id = parsear_referencia(cambios.cliente_id, "clienteId")?;
        }
        if cambios.empleado_id.is_some() {
            self.empleado_id = parsear_referencia(cambios.empleado_id, "empleadoId")?;
        }
        Ok(())
    }
}

/// Respuesta de evento con las referencias pobladas en el momento de lectura
#[derive(Debug, Serialize)]
pub struct EventoRespuesta {
    #[serde(flatten)]
    pub evento: Evento,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente: Option<ClienteResumen>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empleado: Option<EmpleadoResumen>,
}
