// src/handlers/inventario.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventario::{DashboardInventario, ResultadoBusqueda},
};

// ---
// Raíz y health check
// ---

#[utoipa::path(get, path = "/", tag = "Sistema",
    responses((status = 200, description = "Banner del servicio con el mapa de endpoints")))]
pub async fn raiz() -> impl IntoResponse {
    Json(serde_json::json!({
        "servicio": "Oficit Stock Service",
        "version": env!("CARGO_PKG_VERSION"),
        "documentacion": "/docs",
        "endpoints": {
            "catalogo": ["/familia", "/color", "/proveedor", "/componente"],
            "articulos": ["/articulo", "/producto-simple", "/producto-compuesto", "/pack"],
            "stock": ["/stock", "/stock/alertas", "/stock/movimientos"],
            "precios": ["/precios/compra", "/precios/venta", "/precios/margen"],
            "inventario": ["/inventario/dashboard", "/inventario/buscar"],
        },
    }))
}

#[utoipa::path(get, path = "/health", tag = "Sistema",
    responses(
        (status = 200, description = "Servicio y base de datos operativos"),
        (status = 500, description = "La base de datos no responde"),
    ))]
pub async fn health(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    // Sonda mínima contra la base de datos.
    sqlx::query("SELECT 1").execute(&app_state.db_pool).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

// ---
// Inventario agregado
// ---

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ParametrosBusqueda {
    /// Texto a buscar en nombres y descripciones
    #[validate(length(min = 1, max = 255, message = "El término de búsqueda es obligatorio."))]
    pub q: String,
}

#[utoipa::path(get, path = "/inventario/dashboard", tag = "Inventario",
    responses((status = 200, description = "Contadores globales del inventario", body = DashboardInventario)))]
pub async fn dashboard(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resumen = app_state.inventario_service.dashboard().await?;
    Ok((StatusCode::OK, Json(resumen)))
}

#[utoipa::path(get, path = "/inventario/buscar", tag = "Inventario",
    params(ParametrosBusqueda),
    responses(
        (status = 200, description = "Coincidencias en todo el inventario", body = ResultadoBusqueda),
        (status = 400, description = "Término de búsqueda vacío"),
    ))]
pub async fn buscar(
    State(app_state): State<AppState>,
    Query(parametros): Query<ParametrosBusqueda>,
) -> Result<impl IntoResponse, AppError> {
    parametros.validate()?;
    let resultado = app_state.inventario_service.buscar(&parametros.q).await?;
    Ok((StatusCode::OK, Json(resultado)))
}
