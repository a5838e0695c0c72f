//! Catálogo de tipos de tarea por área
//!
//! Mapa inmutable de área a los tipos de tarea permitidos. Se expone como
//! función de consulta pura; nunca se muta en tiempo de ejecución.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::models::empleado::Area;
use crate::utils::errors::{AppError, AppResult};

lazy_static! {
    static ref TIPOS_POR_AREA: HashMap<Area, Vec<&'static str>> = {
        let mut catalogo = HashMap::new();
        catalogo.insert(
            Area::ProduccionYLogistica,
            vec![
                "Coordinación con proveedores",
                "Montaje de escenario o mobiliario",
                "Verificación técnica previa al evento",
            ],
        );
        catalogo.insert(
            Area::PlanificacionYFinanzas,
            vec![
                "Carga y control del presupuesto del evento",
                "Firma de contratos con clientes/proveedores",
                "Seguimiento del cronograma y fechas clave",
            ],
        );
        catalogo
    };
}

/// Tipos de tarea permitidos para un área; vacío si el área no tiene catálogo
pub fn tipos_permitidos(area: Area) -> &'static [&'static str] {
    TIPOS_POR_AREA
        .get(&area)
        .map(|tipos| tipos.as_slice())
        .unwrap_or(&[])
}

/// Validar que el tipo pertenezca al catálogo del área
pub fn validar_clasificacion(area: Area, tipo: &str) -> AppResult<()> {
    if tipos_permitidos(area).contains(&tipo) {
        return Ok(());
    }
    Err(AppError::Validacion(format!(
        "Tarea inválida para el área {}",
        area.as_str()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acepta_tipo_del_area() {
        assert!(validar_clasificacion(
            Area::ProduccionYLogistica,
            "Coordinación con proveedores"
        )
        .is_ok());
    }

    #[test]
    fn rechaza_tipo_de_otra_area() {
        // Tipo de Planificación y Finanzas usado en Producción y Logística
        assert!(validar_clasificacion(
            Area::ProduccionYLogistica,
            "Carga y control del presupuesto del evento"
        )
        .is_err());
    }

    #[test]
    fn area_sin_catalogo_no_admite_tipos() {
        assert!(tipos_permitidos(Area::AtencionAlCliente).is_empty());
        assert!(validar_clasificacion(Area::Administracion, "Cualquier tipo").is_err());
    }
}
