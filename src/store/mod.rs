//! Almacén genérico de entidades
//!
//! Cada tipo de entidad persiste en un archivo JSON propio bajo el
//! directorio de datos (`<coleccion>.json`). El almacén mantiene la
//! colección en memoria bajo un `RwLock` y reescribe el archivo en cada
//! mutación. No hay transacciones entre peticiones: dos escritores
//! concurrentes sobre el mismo registro resuelven por última escritura.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Contrato que debe cumplir todo registro persistido
pub trait Registro: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Nombre de la colección (y del archivo de datos)
    const COLECCION: &'static str;

    fn id(&self) -> Uuid;

    fn marcar_actualizado(&mut self);
}

/// Almacén de una colección de registros respaldado por un archivo JSON
pub struct JsonStore<T: Registro> {
    ruta: PathBuf,
    registros: RwLock<Vec<T>>,
}

impl<T: Registro> JsonStore<T> {
    /// Abrir la colección, cargando el archivo si existe. Un archivo ausente
    /// equivale a una colección vacía; un archivo corrupto se registra y se
    /// trata igual.
    pub async fn abrir(directorio: &Path) -> AppResult<Self> {
        let ruta = directorio.join(format!("{}.json", T::COLECCION));

        let registros = match tokio::fs::read_to_string(&ruta).await {
            Ok(contenido) => match serde_json::from_str::<Vec<T>>(&contenido) {
                Ok(registros) => registros,
                Err(e) => {
                    tracing::warn!(
                        "Archivo de datos '{}' ilegible ({}); se arranca con la colección vacía",
                        ruta.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Ok(Self {
            ruta,
            registros: RwLock::new(registros),
        })
    }

    async fn persistir(&self, registros: &[T]) -> AppResult<()> {
        let contenido = serde_json::to_vec_pretty(registros)
            .map_err(|e| AppError::Almacenamiento(format!("Error serializando {}: {}", T::COLECCION, e)))?;
        tokio::fs::write(&self.ruta, contenido)
            .await
            .map_err(|e| AppError::Almacenamiento(format!("Error guardando {}: {}", T::COLECCION, e)))
    }

    /// Todos los registros, los más recientes primero
    pub async fn get_all(&self) -> Vec<T> {
        self.registros.read().await.iter().rev().cloned().collect()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Option<T> {
        self.registros
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    /// Consulta de existencia explícita para validación referencial
    pub async fn exists(&self, id: Uuid) -> bool {
        self.registros.read().await.iter().any(|r| r.id() == id)
    }

    /// Primer registro que cumple el predicado
    pub async fn buscar<F>(&self, predicado: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.registros
            .read()
            .await
            .iter()
            .find(|r| predicado(r))
            .cloned()
    }

    /// Agregar un registro ya construido (con id y timestamps asignados)
    pub async fn add(&self, registro: T) -> AppResult<T> {
        let mut registros = self.registros.write().await;
        registros.push(registro.clone());
        if let Err(e) = self.persistir(&registros).await {
            registros.pop();
            return Err(e);
        }
        Ok(registro)
    }

    /// Reemplazar el registro con ese id por el snapshot entregado.
    /// El llamador es responsable de conservar id y createdAt originales.
    pub async fn update(&self, id: Uuid, mut registro: T) -> AppResult<Option<T>> {
        let mut registros = self.registros.write().await;
        let Some(posicion) = registros.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };

        registro.marcar_actualizado();
        let anterior = std::mem::replace(&mut registros[posicion], registro.clone());
        if let Err(e) = self.persistir(&registros).await {
            registros[posicion] = anterior;
            return Err(e);
        }
        Ok(Some(registro))
    }

    /// Borrado físico; devuelve el snapshot previo
    pub async fn remove(&self, id: Uuid) -> AppResult<Option<T>> {
        let mut registros = self.registros.write().await;
        let Some(posicion) = registros.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };

        let eliminado = registros.remove(posicion);
        if let Err(e) = self.persistir(&registros).await {
            registros.insert(posicion, eliminado);
            return Err(e);
        }
        Ok(Some(eliminado))
    }
}
