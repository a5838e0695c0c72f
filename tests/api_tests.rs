//! Tests de integración de la API completa
//!
//! Cada test levanta un router con su propio directorio de datos temporal
//! y conversa con él vía `oneshot`, sin abrir sockets.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use eventify_backend::api;
use eventify_backend::config::EnvironmentConfig;
use eventify_backend::state::AppState;

async fn app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = EnvironmentConfig {
        environment: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "secreto-de-pruebas".to_string(),
        jwt_expiration: 3600,
        data_dir: dir.path().to_path_buf(),
        cors_origins: vec!["*".to_string()],
    };
    let state = AppState::inicializar(config).await.unwrap();
    (api::crear_router(state), dir)
}

async fn peticion(
    app: &Router,
    metodo: Method,
    uri: &str,
    token: Option<&str>,
    cuerpo: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(metodo).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match cuerpo {
        Some(valor) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(valor.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let respuesta = app.clone().oneshot(request).await.unwrap();
    let status = respuesta.status();
    let bytes = respuesta.into_body().collect().await.unwrap().to_bytes();
    let cuerpo = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, cuerpo)
}

/// Registrar un usuario y devolver su token de sesión
async fn registrar(app: &Router, email: &str, rol: &str) -> String {
    let (status, cuerpo) = peticion(
        app,
        Method::POST,
        "/api/auth/registro",
        None,
        Some(json!({
            "nombre": "Usuario de prueba",
            "email": email,
            "password": "secreto123",
            "rol": rol,
            "area": "Administración",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    cuerpo["token"].as_str().unwrap().to_string()
}

async fn token_administrador(app: &Router) -> String {
    registrar(app, "admin@eventify.com", "administrador").await
}

#[tokio::test]
async fn sin_token_responde_401() {
    let (app, _dir) = app().await;
    let (status, cuerpo) = peticion(&app, Method::GET, "/api/clientes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(cuerpo["mensaje"].is_string());
}

#[tokio::test]
async fn salud_es_publico() {
    let (app, _dir) = app().await;
    let (status, cuerpo) = peticion(&app, Method::GET, "/salud", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["estado"], "ok");
}

#[tokio::test]
async fn registro_login_y_perfil() {
    let (app, _dir) = app().await;
    registrar(&app, "ana@eventify.com", "planner").await;

    let (status, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "Ana@Eventify.com", "password": "secreto123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["usuario"]["email"], "ana@eventify.com");
    assert!(cuerpo["usuario"].get("password").is_none());

    let token = cuerpo["token"].as_str().unwrap().to_string();
    let (status, cuerpo) =
        peticion(&app, Method::GET, "/api/auth/perfil", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["usuario"]["email"], "ana@eventify.com");
}

#[tokio::test]
async fn login_emite_cookie_de_sesion_utilizable() {
    let (app, _dir) = app().await;
    registrar(&app, "ana@eventify.com", "planner").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "ana@eventify.com", "password": "secreto123" }).to_string(),
        ))
        .unwrap();
    let respuesta = app.clone().oneshot(request).await.unwrap();
    assert_eq!(respuesta.status(), StatusCode::OK);

    let set_cookie = respuesta
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));

    // La cookie emitida debe autenticar por sí sola, sin header Authorization
    let cookie = set_cookie.split(';').next().unwrap().to_string();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/auth/perfil")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let respuesta = app.clone().oneshot(request).await.unwrap();
    assert_eq!(respuesta.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_limpia_la_cookie_de_sesion() {
    let (app, _dir) = app().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let respuesta = app.clone().oneshot(request).await.unwrap();
    assert_eq!(respuesta.status(), StatusCode::OK);

    let set_cookie = respuesta
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn login_con_password_incorrecta_responde_401() {
    let (app, _dir) = app().await;
    registrar(&app, "ana@eventify.com", "planner").await;

    let (status, _) = peticion(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ana@eventify.com", "password": "incorrecta" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registro_con_email_duplicado_responde_409() {
    let (app, _dir) = app().await;
    registrar(&app, "ana@eventify.com", "planner").await;

    let (status, _) = peticion(
        &app,
        Method::POST,
        "/api/auth/registro",
        None,
        Some(json!({
            "nombre": "Otra",
            "email": "ana@eventify.com",
            "password": "secreto123",
            "area": "Administración",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn crear_y_obtener_cliente_con_defaults() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (status, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/clientes",
        Some(&token),
        Some(json!({ "nombre": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cuerpo["mensaje"], "Cliente creado");
    assert_eq!(cuerpo["cliente"]["tipo"], "individual");
    let id = cuerpo["cliente"]["id"].as_str().unwrap().to_string();

    let (status, cuerpo) = peticion(
        &app,
        Method::GET,
        &format!("/api/clientes/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["nombre"], "Acme");

    let (status, cuerpo) =
        peticion(&app, Method::GET, "/api/clientes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cliente_sin_nombre_responde_400() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (status, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/clientes",
        Some(&token),
        Some(json!({ "email": "acme@acme.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(cuerpo["mensaje"].as_str().unwrap().contains("nombre"));
}

#[tokio::test]
async fn cuerpo_json_ilegible_responde_400_con_mensaje() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/clientes")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{esto no es json"))
        .unwrap();
    let respuesta = app.clone().oneshot(request).await.unwrap();
    assert_eq!(respuesta.status(), StatusCode::BAD_REQUEST);

    let bytes = respuesta.into_body().collect().await.unwrap().to_bytes();
    let cuerpo: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(cuerpo["mensaje"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn campo_mal_tipado_responde_400_con_mensaje() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    // presupuesto debe ser numérico
    let (status, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/eventos",
        Some(&token),
        Some(json!({ "nombre": "Expo", "presupuesto": "mucho" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(cuerpo["mensaje"].is_string());
}

#[tokio::test]
async fn id_mal_formado_responde_404() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (status, _) = peticion(&app, Method::GET, "/api/clientes/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn eliminar_cliente_y_luego_404() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (_, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/clientes",
        Some(&token),
        Some(json!({ "nombre": "Acme" })),
    )
    .await;
    let id = cuerpo["cliente"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/clientes/{}", id);

    let (status, cuerpo) = peticion(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["mensaje"], "Cliente eliminado");

    let (status, _) = peticion(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_solo_cambia_los_campos_enviados() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (_, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/clientes",
        Some(&token),
        Some(json!({ "nombre": "Acme", "empresa": "Acme Corp", "tipo": "empresa" })),
    )
    .await;
    let id = cuerpo["cliente"]["id"].as_str().unwrap().to_string();

    let (status, cuerpo) = peticion(
        &app,
        Method::PATCH,
        &format!("/api/clientes/{}", id),
        Some(&token),
        Some(json!({ "telefono": "555-0101" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["cliente"]["telefono"], "555-0101");
    assert_eq!(cuerpo["cliente"]["nombre"], "Acme");
    assert_eq!(cuerpo["cliente"]["empresa"], "Acme Corp");
    assert_eq!(cuerpo["cliente"]["tipo"], "empresa");
}

#[tokio::test]
async fn put_restablece_los_campos_omitidos() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (_, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/eventos",
        Some(&token),
        Some(json!({ "nombre": "Expo", "presupuesto": 5000.0, "estado": "activo" })),
    )
    .await;
    let id = cuerpo["evento"]["id"].as_str().unwrap().to_string();
    let creado = cuerpo["evento"]["createdAt"].clone();

    let (status, cuerpo) = peticion(
        &app,
        Method::PUT,
        &format!("/api/eventos/{}", id),
        Some(&token),
        Some(json!({ "nombre": "Expo 2026" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["evento"]["nombre"], "Expo 2026");
    assert_eq!(cuerpo["evento"]["presupuesto"], 0.0);
    assert_eq!(cuerpo["evento"]["estado"], "pendiente");
    assert_eq!(cuerpo["evento"]["id"], id.as_str());
    assert_eq!(cuerpo["evento"]["createdAt"], creado);
}

#[tokio::test]
async fn evento_proyecta_el_cliente_referenciado() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (_, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/clientes",
        Some(&token),
        Some(json!({ "nombre": "Acme" })),
    )
    .await;
    let cliente_id = cuerpo["cliente"]["id"].as_str().unwrap().to_string();

    let (status, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/eventos",
        Some(&token),
        Some(json!({ "nombre": "Expo", "clienteId": cliente_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cuerpo["evento"]["cliente"]["nombre"], "Acme");

    let id = cuerpo["evento"]["id"].as_str().unwrap().to_string();
    let (status, cuerpo) = peticion(
        &app,
        Method::GET,
        &format!("/api/eventos/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["cliente"]["nombre"], "Acme");
}

#[tokio::test]
async fn evento_con_cliente_inexistente_responde_400() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (status, _) = peticion(
        &app,
        Method::POST,
        "/api/eventos",
        Some(&token),
        Some(json!({
            "nombre": "Expo",
            "clienteId": "00000000-0000-0000-0000-000000000001",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tarea_con_tipo_de_otra_area_responde_400() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (status, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/tareas",
        Some(&token),
        Some(json!({
            "titulo": "Presupuesto",
            "area": "Producción y Logística",
            "tipo": "Carga y control del presupuesto del evento",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(cuerpo["mensaje"].as_str().unwrap().contains("inválida"));
}

#[tokio::test]
async fn tarea_con_empleado_inexistente_responde_400() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (status, _) = peticion(
        &app,
        Method::POST,
        "/api/tareas",
        Some(&token),
        Some(json!({
            "titulo": "Montaje",
            "area": "Producción y Logística",
            "tipo": "Montaje de escenario o mobiliario",
            "empleadoAsignado": "00000000-0000-0000-0000-000000000001",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listado_de_tareas_filtra_por_estado() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    for (titulo, estado) in [("Pendiente", "pendiente"), ("Lista", "finalizada")] {
        let (status, _) = peticion(
            &app,
            Method::POST,
            "/api/tareas",
            Some(&token),
            Some(json!({
                "titulo": titulo,
                "estado": estado,
                "area": "Producción y Logística",
                "tipo": "Coordinación con proveedores",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, cuerpo) = peticion(
        &app,
        Method::GET,
        "/api/tareas?estado=pendiente",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let tareas = cuerpo.as_array().unwrap();
    assert_eq!(tareas.len(), 1);
    assert_eq!(tareas[0]["titulo"], "Pendiente");
}

#[tokio::test]
async fn usuarios_exige_rol_administrador() {
    let (app, _dir) = app().await;
    let token = registrar(&app, "coordinador@eventify.com", "coordinador").await;

    let (status, _) = peticion(&app, Method::GET, "/api/usuarios", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn borrado_de_usuario_es_suave() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (status, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/usuarios",
        Some(&token),
        Some(json!({
            "nombre": "Eva",
            "email": "eva@eventify.com",
            "password": "secreto123",
            "area": "Atención al Cliente",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = cuerpo["usuario"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/usuarios/{}", id);

    let (status, cuerpo) = peticion(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["usuario"]["activo"], false);

    // El listado solo muestra activos, la consulta directa lo sigue viendo
    let (_, cuerpo) = peticion(&app, Method::GET, "/api/usuarios", Some(&token), None).await;
    let emails: Vec<&str> = cuerpo
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert!(!emails.contains(&"eva@eventify.com"));

    let (status, cuerpo) = peticion(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["activo"], false);
}

#[tokio::test]
async fn usuario_desactivado_no_puede_iniciar_sesion() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (_, cuerpo) = peticion(
        &app,
        Method::POST,
        "/api/usuarios",
        Some(&token),
        Some(json!({
            "nombre": "Eva",
            "email": "eva@eventify.com",
            "password": "secreto123",
            "area": "Atención al Cliente",
        })),
    )
    .await;
    let id = cuerpo["usuario"]["id"].as_str().unwrap().to_string();
    peticion(
        &app,
        Method::DELETE,
        &format!("/api/usuarios/{}", id),
        Some(&token),
        None,
    )
    .await;

    let (status, _) = peticion(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "eva@eventify.com", "password": "secreto123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empleado_con_rol_invalido_responde_400() {
    let (app, _dir) = app().await;
    let token = token_administrador(&app).await;

    let (status, _) = peticion(
        &app,
        Method::POST,
        "/api/empleados",
        Some(&token),
        Some(json!({
            "nombre": "Eva",
            "rol": "gerente",
            "area": "Administración",
            "email": "eva@eventify.com",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
