use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use eventify_backend::api;
use eventify_backend::config::EnvironmentConfig;
use eventify_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventify_backend=debug,tower_http=info".into()),
        )
        .init();

    info!("🎉 Eventify - Backend de administración de eventos");
    info!("==================================================");

    let config = EnvironmentConfig::from_env();
    info!("📂 Directorio de datos: {}", config.data_dir.display());

    let state = match AppState::inicializar(config.clone()).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error inicializando el almacén de datos: {}", e);
            return Err(anyhow::anyhow!("Error de almacenamiento: {}", e));
        }
    };

    let app = api::crear_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /salud - Health check");
    info!("🔐 Autenticación:");
    info!("   POST /api/auth/registro - Registrar usuario");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   GET  /api/auth/logout - Cerrar sesión");
    info!("   GET  /api/auth/perfil - Perfil del usuario autenticado");
    info!("🗂️  Entidades (requieren sesión):");
    info!("   /api/clientes, /api/empleados, /api/eventos, /api/tareas");
    info!("   GET | POST sobre la colección; GET | PUT | PATCH | DELETE sobre /:id");
    info!("👤 Usuarios (solo administradores):");
    info!("   /api/usuarios - CRUD con borrado suave");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
