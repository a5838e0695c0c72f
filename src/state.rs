//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: la configuración y un almacén por entidad.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::models::cliente::Cliente;
use crate::models::empleado::Empleado;
use crate::models::evento::Evento;
use crate::models::tarea::Tarea;
use crate::models::usuario::Usuario;
use crate::store::JsonStore;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub clientes: Arc<JsonStore<Cliente>>,
    pub empleados: Arc<JsonStore<Empleado>>,
    pub eventos: Arc<JsonStore<Evento>>,
    pub tareas: Arc<JsonStore<Tarea>>,
    pub usuarios: Arc<JsonStore<Usuario>>,
}

impl AppState {
    /// Crear el directorio de datos si falta y abrir todas las colecciones
    pub async fn inicializar(config: EnvironmentConfig) -> AppResult<Self> {
        tokio::fs::create_dir_all(&config.data_dir)
            .await
            .map_err(|e| {
                AppError::Almacenamiento(format!(
                    "No se pudo crear el directorio de datos '{}': {}",
                    config.data_dir.display(),
                    e
                ))
            })?;

        Ok(Self {
            clientes: Arc::new(JsonStore::abrir(&config.data_dir).await?),
            empleados: Arc::new(JsonStore::abrir(&config.data_dir).await?),
            eventos: Arc::new(JsonStore::abrir(&config.data_dir).await?),
            tareas: Arc::new(JsonStore::abrir(&config.data_dir).await?),
            usuarios: Arc::new(JsonStore::abrir(&config.data_dir).await?),
            config,
        })
    }
}
