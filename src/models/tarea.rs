//! Modelo de Tarea
//!
//! Incluye la validación de clasificación (tipo permitido según el área) y
//! el evaluador de filtros del listado de tareas.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::catalogo;
use crate::models::empleado::Area;
use crate::models::{parsear_fecha, parsear_referencia, texto_obligatorio, texto_opcional};
use crate::store::Registro;
use crate::utils::errors::{AppError, AppResult};

/// Estados de una tarea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoTarea {
    #[serde(rename = "pendiente")]
    Pendiente,
    #[serde(rename = "en proceso")]
    EnProceso,
    #[serde(rename = "finalizada")]
    Finalizada,
}

impl EstadoTarea {
    pub fn parse(valor: &str) -> AppResult<Self> {
        match valor {
            "pendiente" => Ok(EstadoTarea::Pendiente),
            "en proceso" => Ok(EstadoTarea::EnProceso),
            "finalizada" => Ok(EstadoTarea::Finalizada),
            otro => Err(AppError::Validacion(format!(
                "Estado de tarea inválido: '{}'",
                otro
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoTarea::Pendiente => "pendiente",
            EstadoTarea::EnProceso => "en proceso",
            EstadoTarea::Finalizada => "finalizada",
        }
    }
}

/// Prioridades de una tarea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prioridad {
    Alta,
    Media,
    Baja,
}

impl Prioridad {
    pub fn parse(valor: &str) -> AppResult<Self> {
        match valor {
            "alta" => Ok(Prioridad::Alta),
            "media" => Ok(Prioridad::Media),
            "baja" => Ok(Prioridad::Baja),
            otro => Err(AppError::Validacion(format!(
                "Prioridad inválida: '{}'",
                otro
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Prioridad::Alta => "alta",
            Prioridad::Media => "media",
            Prioridad::Baja => "baja",
        }
    }
}

/// Tarea persistida
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tarea {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub estado: EstadoTarea,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub prioridad: Prioridad,
    pub area: Area,
    pub tipo: String,
    pub empleado_asignado: Option<Uuid>,
    pub evento_asignado: Option<Uuid>,
    pub horas_estimadas: u32,
    pub horas_reales: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registro for Tarea {
    const COLECCION: &'static str = "tareas";

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
pub struct TareaPayload {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub prioridad: Option<String>,
    pub area: Option<String>,
    pub tipo: Option<String>,
    pub empleado_asignado: Option<String>,
    pub evento_asignado: Option<String>,
    pub horas_estimadas: Option<i64>,
    pub horas_reales: Option<i64>,
}

/// Payload de actualización parcial (PATCH)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TareaCambios {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub prioridad: Option<String>,
    pub area: Option<String>,
    pub tipo: Option<String>,
    pub empleado_asignado: Option<String>,
    pub evento_asignado: Option<String>,
    pub horas_estimadas: Option<i64>,
    pub horas_reales: Option<i64>,
}

fn horas_validas(valor: Option<i64>, campo: &str) -> AppResult<u32> {
    let valor = valor.unwrap_or(0);
    u32::try_from(valor).map_err(|_| {
        AppError::Validacion(format!(
            "El campo '{}' debe ser un entero no negativo",
            campo
        ))
    })
}

impl Tarea {
    pub fn nueva(datos: TareaPayload) -> AppResult<Self> {
        let area = Area::parse(&texto_obligatorio(datos.area, "area")?)?;
        let tipo = texto_obligatorio(datos.tipo, "tipo")?;
        catalogo::validar_clasificacion(area, &tipo)?;

        let estado = match texto_opcional(datos.estado) {
            Some(valor) => EstadoTarea::parse(&valor)?,
            None => EstadoTarea::Pendiente,
        };
        let prioridad = match texto_opcional(datos.prioridad) {
            Some(valor) => Prioridad::parse(&valor)?,
            None => Prioridad::Media,
        };

        let ahora = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            titulo: texto_obligatorio(datos.titulo, "titulo")?,
            descripcion: texto_opcional(datos.descripcion),
            estado,
            fecha_inicio: parsear_fecha(datos.fecha_inicio, "fechaInicio")?,
            fecha_fin: parsear_fecha(datos.fecha_fin, "fechaFin")?,
            prioridad,
            area,
            tipo,
            empleado_asignado: parsear_referencia(datos.empleado_asignado, "empleadoAsignado")?,
            evento_asignado: parsear_referencia(datos.evento_asignado, "eventoAsignado")?,
            horas_estimadas: horas_validas(datos.horas_estimadas, "horasEstimadas")?,
            horas_reales: horas_validas(datos.horas_reales, "horasReales")?,
            created_at: ahora,
            updated_at: ahora,
        })
    }

    /// Aplicar un PATCH. La clasificación área/tipo solo se revalida cuando
    /// el payload trae ambos campos; si trae uno solo, el par almacenado se
    /// asume sin cambios.
    pub fn aplicar_cambios(&mut self, cambios: TareaCambios) -> AppResult<()> {
        let area_nueva = texto_opcional(cambios.area);
        let tipo_nuevo = texto_opcional(cambios.tipo);

        if let (Some(area), Some(tipo)) = (&area_nueva, &tipo_nuevo) {
            catalogo::validar_clasificacion(Area::parse(area)?, tipo)?;
        }

        if let Some(titulo) = texto_opcional(cambios.titulo) {
            self.titulo = titulo;
        }
        if let Some(descripcion) = texto_opcional(cambios.descripcion) {
            self.descripcion = Some(descripcion);
        }
        if let Some(estado) = texto_opcional(cambios.estado) {
            self.estado = EstadoTarea::parse(&estado)?;
        }
        if cambios.fecha_inicio.is_some() {
            self.fecha_inicio = parsear_fecha(cambios.fecha_inicio, "fechaInicio")?;
        }
        if cambios.fecha_fin.is_some() {
            self.fecha_fin = parsear_fecha(cambios.fecha_fin, "fechaFin")?;
        }
        if let Some(prioridad) = texto_opcional(cambios.prioridad) {
            self.prioridad = Prioridad::parse(&prioridad)?;
        }
        if let Some(area) = area_nueva {
            self.area = Area::parse(&area)?;
        }
        if let Some(tipo) = tipo_nuevo {
            self.tipo = tipo;
        }
        if cambios.empleado_asignado.is_some() {
            self.empleado_asignado =
                parsear_referencia(cambios.empleado_asignado, "empleadoAsignado")?;
        }
        if cambios.evento_asignado.is_some() {
            self.evento_asignado = parsear_referencia(cambios.evento_asignado, "eventoAsignado")?;
        }
        if cambios.horas_estimadas.is_some() {
            self.horas_estimadas = horas_validas(cambios.horas_estimadas, "horasEstimadas")?;
        }
        if cambios.horas_reales.is_some() {
            self.horas_reales = horas_validas(cambios.horas_reales, "horasReales")?;
        }
        Ok(())
    }
}

/// Filtros del listado de tareas; todos los predicados presentes se conjugan
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TareaFiltros {
    pub estado: Option<String>,
    pub prioridad: Option<String>,
    pub empleado_asignado: Option<String>,
    pub evento_asignado: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

/// Rango de fechas efectivo de un listado
#[derive(Debug, Clone, Copy)]
enum RangoFechas {
    SinFiltro,
    Invalido,
    Entre(NaiveDate, NaiveDate),
}

impl TareaFiltros {
    /// El rango aplica cuando ambos límites vienen en la query. Un límite
    /// mal formado no contiene ninguna fecha: el filtro sigue activo y
    /// vacía el resultado, no se ignora.
    fn rango(&self) -> RangoFechas {
        let desde = texto_opcional(self.fecha_inicio.clone());
        let hasta = texto_opcional(self.fecha_fin.clone());
        let (Some(desde), Some(hasta)) = (desde, hasta) else {
            return RangoFechas::SinFiltro;
        };

        let desde = NaiveDate::parse_from_str(&desde, "%Y-%m-%d");
        let hasta = NaiveDate::parse_from_str(&hasta, "%Y-%m-%d");
        match (desde, hasta) {
            (Ok(desde), Ok(hasta)) => RangoFechas::Entre(desde, hasta),
            _ => RangoFechas::Invalido,
        }
    }
}

/// Evaluar los filtros sobre la colección completa; nunca la muta
pub fn filtrar(tareas: Vec<Tarea>, filtros: &TareaFiltros) -> Vec<Tarea> {
    let rango = filtros.rango();
    let estado = texto_opcional(filtros.estado.clone());
    let prioridad = texto_opcional(filtros.prioridad.clone());
    let empleado = texto_opcional(filtros.empleado_asignado.clone());
    let evento = texto_opcional(filtros.evento_asignado.clone());

    tareas
        .into_iter()
        .filter(|tarea| {
            if let Some(estado) = &estado {
                if tarea.estado.as_str() != estado {
                    return false;
                }
            }
            if let Some(prioridad) = &prioridad {
                if tarea.prioridad.as_str() != prioridad {
                    return false;
                }
            }
            if let Some(empleado) = &empleado {
                // Comparación como cadenas, igual que en los ids resueltos
                match tarea.empleado_asignado {
                    Some(id) if id.to_string() == *empleado => {}
                    _ => return false,
                }
            }
            if let Some(evento) = &evento {
                match tarea.evento_asignado {
                    Some(id) if id.to_string() == *evento => {}
                    _ => return false,
                }
            }
            match rango {
                RangoFechas::SinFiltro => {}
                RangoFechas::Invalido => return false,
                // Tareas sin alguna de las dos fechas quedan fuera del rango
                RangoFechas::Entre(desde, hasta) => match (tarea.fecha_inicio, tarea.fecha_fin) {
                    (Some(inicio), Some(fin)) if inicio >= desde && fin <= hasta => {}
                    _ => return false,
                },
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_basica(titulo: &str) -> TareaPayload {
        TareaPayload {
            titulo: Some(titulo.to_string()),
            descripcion: None,
            estado: None,
            fecha_inicio: None,
            fecha_fin: None,
            prioridad: None,
            area: Some("Producción y Logística".to_string()),
            tipo: Some("Coordinación con proveedores".to_string()),
            empleado_asignado: None,
            evento_asignado: None,
            horas_estimadas: None,
            horas_reales: None,
        }
    }

    fn tarea_de_prueba(titulo: &str) -> Tarea {
        Tarea::nueva(payload_basica(titulo)).unwrap()
    }

    #[test]
    fn aplica_defaults_de_estado_prioridad_y_horas() {
        let tarea = tarea_de_prueba("Montaje");
        assert_eq!(tarea.estado, EstadoTarea::Pendiente);
        assert_eq!(tarea.prioridad, Prioridad::Media);
        assert_eq!(tarea.horas_estimadas, 0);
        assert_eq!(tarea.horas_reales, 0);
    }

    #[test]
    fn rechaza_tipo_de_otra_area() {
        let mut payload = payload_basica("Presupuesto");
        payload.tipo = Some("Carga y control del presupuesto del evento".to_string());
        assert!(Tarea::nueva(payload).is_err());
    }

    #[test]
    fn rechaza_horas_negativas() {
        let mut payload = payload_basica("Montaje");
        payload.horas_estimadas = Some(-3);
        assert!(Tarea::nueva(payload).is_err());
    }

    #[test]
    fn patch_con_solo_area_no_revalida_clasificacion() {
        let mut tarea = tarea_de_prueba("Montaje");
        let cambios = TareaCambios {
            titulo: None,
            descripcion: None,
            estado: None,
            fecha_inicio: None,
            fecha_fin: None,
            prioridad: None,
            area: Some("Planificación y Finanzas".to_string()),
            tipo: None,
            empleado_asignado: None,
            evento_asignado: None,
            horas_estimadas: None,
            horas_reales: None,
        };
        // El tipo almacenado ya no corresponde al área, pero el chequeo
        // solo corre cuando el payload trae ambos campos
        assert!(tarea.aplicar_cambios(cambios).is_ok());
        assert_eq!(tarea.area, Area::PlanificacionYFinanzas);
    }

    #[test]
    fn patch_con_ambos_campos_revalida_clasificacion() {
        let mut tarea = tarea_de_prueba("Montaje");
        let cambios = TareaCambios {
            titulo: None,
            descripcion: None,
            estado: None,
            fecha_inicio: None,
            fecha_fin: None,
            prioridad: None,
            area: Some("Planificación y Finanzas".to_string()),
            tipo: Some("Montaje de escenario o mobiliario".to_string()),
            empleado_asignado: None,
            evento_asignado: None,
            horas_estimadas: None,
            horas_reales: None,
        };
        assert!(tarea.aplicar_cambios(cambios).is_err());
    }

    #[test]
    fn filtra_por_estado_exacto() {
        let mut pendiente = tarea_de_prueba("Pendiente");
        pendiente.estado = EstadoTarea::Pendiente;
        let mut finalizada = tarea_de_prueba("Finalizada");
        finalizada.estado = EstadoTarea::Finalizada;

        let filtros = TareaFiltros {
            estado: Some("pendiente".to_string()),
            ..Default::default()
        };
        let resultado = filtrar(vec![pendiente, finalizada], &filtros);
        assert_eq!(resultado.len(), 1);
        assert_eq!(resultado[0].titulo, "Pendiente");
    }

    #[test]
    fn filtra_por_empleado_asignado() {
        let empleado_id = Uuid::new_v4();
        let mut asignada = tarea_de_prueba("Asignada");
        asignada.empleado_asignado = Some(empleado_id);
        let libre = tarea_de_prueba("Libre");

        let filtros = TareaFiltros {
            empleado_asignado: Some(empleado_id.to_string()),
            ..Default::default()
        };
        let resultado = filtrar(vec![asignada, libre], &filtros);
        assert_eq!(resultado.len(), 1);
        assert_eq!(resultado[0].titulo, "Asignada");
    }

    #[test]
    fn rango_de_fechas_excluye_tareas_sin_fechas() {
        let mut dentro = tarea_de_prueba("Dentro");
        dentro.fecha_inicio = NaiveDate::from_ymd_opt(2025, 6, 10);
        dentro.fecha_fin = NaiveDate::from_ymd_opt(2025, 6, 12);
        let sin_fechas = tarea_de_prueba("Sin fechas");
        let mut fuera = tarea_de_prueba("Fuera");
        fuera.fecha_inicio = NaiveDate::from_ymd_opt(2025, 7, 1);
        fuera.fecha_fin = NaiveDate::from_ymd_opt(2025, 7, 2);

        let filtros = TareaFiltros {
            fecha_inicio: Some("2025-06-01".to_string()),
            fecha_fin: Some("2025-06-30".to_string()),
            ..Default::default()
        };
        let resultado = filtrar(vec![dentro, sin_fechas, fuera], &filtros);
        assert_eq!(resultado.len(), 1);
        assert_eq!(resultado[0].titulo, "Dentro");
    }

    #[test]
    fn rango_con_limite_mal_formado_vacia_el_resultado() {
        let mut con_fechas = tarea_de_prueba("Con fechas");
        con_fechas.fecha_inicio = NaiveDate::from_ymd_opt(2025, 6, 10);
        con_fechas.fecha_fin = NaiveDate::from_ymd_opt(2025, 6, 12);

        let filtros = TareaFiltros {
            fecha_inicio: Some("no-es-fecha".to_string()),
            fecha_fin: Some("2025-06-30".to_string()),
            ..Default::default()
        };
        // Un límite ilegible no coincide con ninguna tarea
        assert!(filtrar(vec![con_fechas], &filtros).is_empty());
    }

    #[test]
    fn sin_filtros_devuelve_todo() {
        let tareas = vec![tarea_de_prueba("Una"), tarea_de_prueba("Otra")];
        let resultado = filtrar(tareas, &TareaFiltros::default());
        assert_eq!(resultado.len(), 2);
    }
}
