// src/handlers/precios.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        precio::{MargenBeneficio, PrecioCompra, PrecioVenta},
        stock::TipoStock,
    },
};

fn skip_por_defecto() -> i64 {
    0
}

fn limit_por_defecto() -> i64 {
    100
}

fn moneda_por_defecto() -> String {
    "EUR".to_string()
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct FiltroPrecios {
    /// true = solo vigentes, false = solo históricos, ausente = todos
    pub vigente: Option<bool>,
    #[validate(range(min = 0, message = "skip no puede ser negativo."))]
    #[serde(default = "skip_por_defecto")]
    pub skip: i64,
    #[validate(range(min = 1, max = 1000, message = "limit debe estar entre 1 y 1000."))]
    #[serde(default = "limit_por_defecto")]
    pub limit: i64,
}

// ---
// Compra
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearPrecioCompraPayload {
    pub tipo: TipoStock,
    #[validate(range(min = 1, message = "id_producto_simple debe ser >= 1."))]
    pub id_producto_simple: Option<i32>,
    #[validate(range(min = 1, message = "id_componente debe ser >= 1."))]
    pub id_componente: Option<i32>,
    pub valor: Decimal,
    #[validate(length(min = 3, max = 3, message = "La moneda debe ser un código ISO de 3 letras."))]
    #[serde(default = "moneda_por_defecto")]
    pub moneda: String,
}

#[utoipa::path(get, path = "/precios/compra", tag = "Precios",
    params(FiltroPrecios),
    responses((status = 200, description = "Histórico de precios de compra", body = [PrecioCompra])))]
pub async fn listar_precios_compra(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroPrecios>,
) -> Result<impl IntoResponse, AppError> {
    filtro.validate()?;
    let precios = app_state
        .precio_service
        .listar_precios_compra(filtro.vigente, filtro.skip, filtro.limit)
        .await?;
    Ok((StatusCode::OK, Json(precios)))
}

#[utoipa::path(get, path = "/precios/compra/{id}", tag = "Precios",
    params(("id" = i32, Path, description = "ID del precio de compra")),
    responses(
        (status = 200, description = "Precio de compra", body = PrecioCompra),
        (status = 404, description = "Precio de compra no encontrado"),
    ))]
pub async fn obtener_precio_compra(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let precio = app_state.precio_service.obtener_precio_compra(id).await?;
    Ok((StatusCode::OK, Json(precio)))
}

#[utoipa::path(post, path = "/precios/compra", tag = "Precios",
    request_body = CrearPrecioCompraPayload,
    responses(
        (status = 201, description = "Precio de compra registrado; el vigente anterior queda cerrado", body = PrecioCompra),
        (status = 400, description = "Objetivo del precio inconsistente o valor negativo"),
        (status = 409, description = "Referencia inexistente"),
    ))]
pub async fn crear_precio_compra(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearPrecioCompraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.valor < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "el valor del precio no puede ser negativo".to_string(),
        ));
    }
    let precio = app_state
        .precio_service
        .crear_precio_compra(
            payload.tipo,
            payload.id_producto_simple,
            payload.id_componente,
            payload.valor,
            &payload.moneda,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(precio)))
}

// ---
// Venta
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearPrecioVentaPayload {
    #[validate(range(min = 1, message = "id_articulo debe ser >= 1."))]
    pub id_articulo: i32,
    pub valor: Decimal,
    #[validate(length(min = 3, max = 3, message = "La moneda debe ser un código ISO de 3 letras."))]
    #[serde(default = "moneda_por_defecto")]
    pub moneda: String,
}

#[utoipa::path(get, path = "/precios/venta", tag = "Precios",
    params(FiltroPrecios),
    responses((status = 200, description = "Histórico de precios de venta", body = [PrecioVenta])))]
pub async fn listar_precios_venta(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroPrecios>,
) -> Result<impl IntoResponse, AppError> {
    filtro.validate()?;
    let precios = app_state
        .precio_service
        .listar_precios_venta(filtro.vigente, filtro.skip, filtro.limit)
        .await?;
    Ok((StatusCode::OK, Json(precios)))
}

#[utoipa::path(get, path = "/precios/venta/{id}", tag = "Precios",
    params(("id" = i32, Path, description = "ID del precio de venta")),
    responses(
        (status = 200, description = "Precio de venta", body = PrecioVenta),
        (status = 404, description = "Precio de venta no encontrado"),
    ))]
pub async fn obtener_precio_venta(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let precio = app_state.precio_service.obtener_precio_venta(id).await?;
    Ok((StatusCode::OK, Json(precio)))
}

#[utoipa::path(post, path = "/precios/venta", tag = "Precios",
    request_body = CrearPrecioVentaPayload,
    responses(
        (status = 201, description = "Precio de venta registrado; el vigente anterior queda cerrado", body = PrecioVenta),
        (status = 400, description = "Valor negativo"),
        (status = 409, description = "Artículo inexistente"),
    ))]
pub async fn crear_precio_venta(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearPrecioVentaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.valor < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "el valor del precio no puede ser negativo".to_string(),
        ));
    }
    let precio = app_state
        .precio_service
        .crear_precio_venta(payload.id_articulo, payload.valor, &payload.moneda)
        .await?;
    Ok((StatusCode::CREATED, Json(precio)))
}

// ---
// Margen
// ---

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ParametrosMargen {
    #[validate(range(min = 1, message = "id_precio_venta debe ser >= 1."))]
    pub id_precio_venta: i32,
    #[validate(range(min = 1, message = "id_precio_compra debe ser >= 1."))]
    pub id_precio_compra: i32,
}

#[utoipa::path(get, path = "/precios/margen", tag = "Precios",
    params(ParametrosMargen),
    responses(
        (status = 200, description = "Margen entre el precio de venta y el de compra", body = MargenBeneficio),
        (status = 400, description = "Los precios no comparten moneda"),
        (status = 404, description = "Alguno de los precios no existe"),
    ))]
pub async fn margen_beneficio(
    State(app_state): State<AppState>,
    Query(parametros): Query<ParametrosMargen>,
) -> Result<impl IntoResponse, AppError> {
    parametros.validate()?;
    let margen = app_state
        .precio_service
        .margen_beneficio(parametros.id_precio_venta, parametros.id_precio_compra)
        .await?;
    Ok((StatusCode::OK, Json(margen)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginado_de_precios_acotado() {
        let filtro: FiltroPrecios = serde_json::from_str(r#"{ "skip": -1 }"#).unwrap();
        assert!(filtro.validate().is_err());

        let filtro: FiltroPrecios = serde_json::from_str(r#"{ "limit": 0 }"#).unwrap();
        assert!(filtro.validate().is_err());

        let filtro: FiltroPrecios = serde_json::from_str(r#"{ "vigente": true }"#).unwrap();
        assert!(filtro.validate().is_ok());
    }

    #[test]
    fn la_moneda_por_defecto_es_eur() {
        let payload: CrearPrecioVentaPayload =
            serde_json::from_str(r#"{ "id_articulo": 3, "valor": 19.90 }"#).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.moneda, "EUR");
    }

    #[test]
    fn la_moneda_debe_ser_iso_de_tres_letras() {
        let payload: CrearPrecioVentaPayload =
            serde_json::from_str(r#"{ "id_articulo": 3, "valor": 10, "moneda": "EURO" }"#)
                .unwrap();
        assert!(payload.validate().is_err());
    }
}
