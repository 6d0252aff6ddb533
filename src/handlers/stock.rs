// src/handlers/stock.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::stock::{Movimiento, Stock, TipoMovimiento, TipoStock},
};

// ---
// Stock
// ---

fn skip_por_defecto() -> i64 {
    0
}

fn limit_por_defecto() -> i64 {
    100
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct FiltroStock {
    /// Filtrar por tipo de stock (producto_simple, componente)
    pub tipo: Option<TipoStock>,
    /// Filtrar por ubicación exacta
    pub ubicacion: Option<String>,
    /// Solo registros por debajo del mínimo
    #[serde(default)]
    pub bajo_stock: bool,
    #[validate(range(min = 0, message = "skip no puede ser negativo."))]
    #[serde(default = "skip_por_defecto")]
    pub skip: i64,
    #[validate(range(min = 1, max = 1000, message = "limit debe estar entre 1 y 1000."))]
    #[serde(default = "limit_por_defecto")]
    pub limit: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearStockPayload {
    pub tipo: TipoStock,
    #[validate(range(min = 1, message = "id_producto_simple debe ser >= 1."))]
    pub id_producto_simple: Option<i32>,
    #[validate(range(min = 1, message = "id_componente debe ser >= 1."))]
    pub id_componente: Option<i32>,
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa."))]
    #[serde(default)]
    pub cantidad: i32,
    #[validate(range(min = 0, message = "La cantidad mínima no puede ser negativa."))]
    #[serde(default)]
    pub cantidad_minima: i32,
    #[validate(length(max = 255, message = "La ubicación es demasiado larga."))]
    pub ubicacion: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarStockPayload {
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa."))]
    pub cantidad: Option<i32>,
    #[validate(range(min = 0, message = "La cantidad mínima no puede ser negativa."))]
    pub cantidad_minima: Option<i32>,
    #[validate(length(max = 255, message = "La ubicación es demasiado larga."))]
    pub ubicacion: Option<String>,
}

#[utoipa::path(get, path = "/stock", tag = "Stock",
    params(FiltroStock),
    responses((status = 200, description = "Lista de registros de stock", body = [Stock])))]
pub async fn listar_stock(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroStock>,
) -> Result<impl IntoResponse, AppError> {
    filtro.validate()?;
    let registros = app_state
        .stock_service
        .listar_stock(
            filtro.tipo,
            filtro.ubicacion.as_deref(),
            filtro.bajo_stock,
            filtro.skip,
            filtro.limit,
        )
        .await?;
    Ok((StatusCode::OK, Json(registros)))
}

#[utoipa::path(get, path = "/stock/alertas", tag = "Stock",
    responses((status = 200, description = "Registros por debajo del mínimo", body = [Stock])))]
pub async fn listar_alertas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let alertas = app_state.stock_service.listar_alertas().await?;
    Ok((StatusCode::OK, Json(alertas)))
}

#[utoipa::path(get, path = "/stock/{id}", tag = "Stock",
    params(("id" = i32, Path, description = "ID del registro de stock")),
    responses(
        (status = 200, description = "Registro de stock", body = Stock),
        (status = 404, description = "Stock no encontrado"),
    ))]
pub async fn obtener_stock(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let stock = app_state.stock_service.obtener_stock(id).await?;
    Ok((StatusCode::OK, Json(stock)))
}

#[utoipa::path(get, path = "/stock/producto-simple/{id}", tag = "Stock",
    params(("id" = i32, Path, description = "ID del producto simple")),
    responses(
        (status = 200, description = "Stock del producto simple", body = Stock),
        (status = 404, description = "El producto no tiene stock registrado"),
    ))]
pub async fn obtener_stock_por_producto_simple(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let stock = app_state
        .stock_service
        .obtener_stock_por_producto_simple(id)
        .await?;
    Ok((StatusCode::OK, Json(stock)))
}

#[utoipa::path(get, path = "/stock/componente/{id}", tag = "Stock",
    params(("id" = i32, Path, description = "ID del componente")),
    responses(
        (status = 200, description = "Stock del componente", body = Stock),
        (status = 404, description = "El componente no tiene stock registrado"),
    ))]
pub async fn obtener_stock_por_componente(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let stock = app_state.stock_service.obtener_stock_por_componente(id).await?;
    Ok((StatusCode::OK, Json(stock)))
}

#[utoipa::path(post, path = "/stock", tag = "Stock",
    request_body = CrearStockPayload,
    responses(
        (status = 201, description = "Registro de stock creado", body = Stock),
        (status = 400, description = "Tipo y referencias inconsistentes"),
        (status = 409, description = "El artículo ya tiene stock registrado"),
    ))]
pub async fn crear_stock(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let stock = app_state
        .stock_service
        .crear_stock(
            payload.tipo,
            payload.id_producto_simple,
            payload.id_componente,
            payload.cantidad,
            payload.cantidad_minima,
            payload.ubicacion.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

#[utoipa::path(put, path = "/stock/{id}", tag = "Stock",
    params(("id" = i32, Path, description = "ID del registro de stock")),
    request_body = ActualizarStockPayload,
    responses(
        (status = 200, description = "Registro de stock actualizado", body = Stock),
        (status = 404, description = "Stock no encontrado"),
    ))]
pub async fn actualizar_stock(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActualizarStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let stock = app_state
        .stock_service
        .actualizar_stock(
            id,
            payload.cantidad,
            payload.cantidad_minima,
            payload.ubicacion.as_deref(),
        )
        .await?;
    Ok((StatusCode::OK, Json(stock)))
}

#[utoipa::path(delete, path = "/stock/{id}", tag = "Stock",
    params(("id" = i32, Path, description = "ID del registro de stock")),
    responses(
        (status = 200, description = "Registro de stock eliminado"),
        (status = 404, description = "Stock no encontrado"),
    ))]
pub async fn eliminar_stock(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.stock_service.eliminar_stock(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Registro de stock eliminado exitosamente" })),
    ))
}

// ---
// Movimientos
// ---

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct FiltroMovimientos {
    /// Filtrar por tipo de movimiento (entrada, salida)
    pub tipo: Option<TipoMovimiento>,
    /// Filtrar por registro de stock
    pub id_stock: Option<i32>,
    #[validate(range(min = 0, message = "skip no puede ser negativo."))]
    #[serde(default = "skip_por_defecto")]
    pub skip: i64,
    #[validate(range(min = 1, max = 1000, message = "limit debe estar entre 1 y 1000."))]
    #[serde(default = "limit_por_defecto")]
    pub limit: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearMovimientoPayload {
    pub tipo: TipoMovimiento,
    #[validate(range(min = 1, message = "La cantidad debe ser al menos 1."))]
    pub cantidad: i32,
    #[validate(range(min = 1, message = "id_stock debe ser >= 1."))]
    pub id_stock: i32,
    #[validate(length(max = 500, message = "La descripción es demasiado larga."))]
    pub descripcion: Option<String>,
}

#[utoipa::path(get, path = "/stock/movimientos", tag = "Movimiento",
    params(FiltroMovimientos),
    responses((status = 200, description = "Historial de movimientos", body = [Movimiento])))]
pub async fn listar_movimientos(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMovimientos>,
) -> Result<impl IntoResponse, AppError> {
    filtro.validate()?;
    let movimientos = app_state
        .stock_service
        .listar_movimientos(filtro.tipo, filtro.id_stock, filtro.skip, filtro.limit)
        .await?;
    Ok((StatusCode::OK, Json(movimientos)))
}

#[utoipa::path(post, path = "/stock/movimientos", tag = "Movimiento",
    request_body = CrearMovimientoPayload,
    responses(
        (status = 201, description = "Movimiento registrado; devuelve el stock actualizado", body = Stock),
        (status = 404, description = "Stock no encontrado"),
        (status = 409, description = "Stock insuficiente para la salida"),
    ))]
pub async fn crear_movimiento(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearMovimientoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let stock = app_state
        .stock_service
        .crear_movimiento(
            payload.tipo,
            payload.cantidad,
            payload.id_stock,
            payload.descripcion.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

#[utoipa::path(delete, path = "/stock/movimientos/{id}", tag = "Movimiento",
    params(("id" = i32, Path, description = "ID del movimiento")),
    responses(
        (status = 200, description = "Movimiento eliminado del historial"),
        (status = 404, description = "Movimiento no encontrado"),
    ))]
pub async fn eliminar_movimiento(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.stock_service.eliminar_movimiento(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Movimiento eliminado exitosamente" })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movimiento_con_cantidad_cero_se_rechaza() {
        let payload: CrearMovimientoPayload =
            serde_json::from_str(r#"{ "tipo": "entrada", "cantidad": 0, "id_stock": 1 }"#)
                .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn stock_nuevo_arranca_en_cero_por_defecto() {
        let payload: CrearStockPayload =
            serde_json::from_str(r#"{ "tipo": "componente", "id_componente": 7 }"#).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.cantidad, 0);
        assert_eq!(payload.cantidad_minima, 0);
    }

    #[test]
    fn filtro_de_stock_usa_paginado_por_defecto() {
        let filtro: FiltroStock = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(filtro.skip, 0);
        assert_eq!(filtro.limit, 100);
        assert!(!filtro.bajo_stock);
        assert!(filtro.validate().is_ok());
    }

    #[test]
    fn paginado_negativo_se_rechaza_antes_de_llegar_al_sql() {
        // OFFSET/LIMIT negativos son un error de Postgres, no de
        // restricción; deben cortarse en la validación del filtro.
        let filtro: FiltroStock = serde_json::from_str(r#"{ "skip": -5, "limit": -1 }"#).unwrap();
        assert!(filtro.validate().is_err());

        let filtro: FiltroMovimientos =
            serde_json::from_str(r#"{ "skip": -1 }"#).unwrap();
        assert!(filtro.validate().is_err());
    }

    #[test]
    fn limit_acotado_a_mil() {
        let filtro: FiltroStock = serde_json::from_str(r#"{ "limit": 5000 }"#).unwrap();
        assert!(filtro.validate().is_err());

        let filtro: FiltroStock = serde_json::from_str(r#"{ "limit": 1000 }"#).unwrap();
        assert!(filtro.validate().is_ok());
    }
}
