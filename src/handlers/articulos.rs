// src/handlers/articulos.rs

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
    models::articulo::{
        Articulo, ComposicionPack, ComposicionProducto, CosteCompuesto, Pack, PrecioPack,
        ProductoCompuesto, ProductoSimple, TipoArticulo,
    },
    services::articulo_service::StockInicial,
};

// ---
// Articulo (catálogo completo, solo lectura)
// ---

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroArticulos {
    /// Filtrar por tipo de artículo (simple, compuesto, pack)
    pub tipo: Option<TipoArticulo>,
    /// Filtrar por estado activo/inactivo
    pub activo: Option<bool>,
    /// Filtrar por familia
    pub id_familia: Option<i32>,
}

#[utoipa::path(get, path = "/articulo", tag = "Articulo",
    params(FiltroArticulos),
    responses((status = 200, description = "Lista de artículos", body = [Articulo])))]
pub async fn listar_articulos(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroArticulos>,
) -> Result<impl IntoResponse, AppError> {
    let articulos = app_state
        .articulo_service
        .listar_articulos(filtro.tipo, filtro.activo, filtro.id_familia)
        .await?;
    Ok((StatusCode::OK, Json(articulos)))
}

#[utoipa::path(get, path = "/articulo/{id}", tag = "Articulo",
    params(("id" = i32, Path, description = "ID del artículo")),
    responses(
        (status = 200, description = "Artículo encontrado", body = Articulo),
        (status = 404, description = "Artículo no encontrado"),
    ))]
pub async fn obtener_articulo(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let articulo = app_state.articulo_service.obtener_articulo(id).await?;
    Ok((StatusCode::OK, Json(articulo)))
}

// ---
// Producto Simple
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearProductoSimplePayload {
    #[validate(length(min = 1, max = 255, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[validate(length(max = 31, message = "El código de tienda es demasiado largo."))]
    pub codigo_tienda: Option<String>,
    #[validate(range(min = 1, message = "id_familia debe ser >= 1."))]
    pub id_familia: Option<i32>,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
    #[validate(range(min = 1, message = "id_proveedor debe ser >= 1."))]
    pub id_proveedor: Option<i32>,
    #[validate(range(min = 1, message = "id_color debe ser >= 1."))]
    pub id_color: Option<i32>,

    // Stock inicial opcional: si llega, se crea el registro de stock
    // en la misma transacción.
    #[validate(range(min = 0, message = "El stock inicial no puede ser negativo."))]
    pub stock_inicial: Option<i32>,
    #[validate(range(min = 0, message = "El stock mínimo no puede ser negativo."))]
    pub stock_minimo: Option<i32>,
    #[validate(length(max = 255, message = "La ubicación es demasiado larga."))]
    pub ubicacion: Option<String>,
}

fn activo_por_defecto() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarProductoSimplePayload {
    #[validate(length(min = 1, max = 255, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    #[validate(length(max = 31, message = "El código de tienda es demasiado largo."))]
    pub codigo_tienda: Option<String>,
    #[validate(range(min = 1, message = "id_familia debe ser >= 1."))]
    pub id_familia: Option<i32>,
    pub activo: Option<bool>,
    #[validate(range(min = 1, message = "id_proveedor debe ser >= 1."))]
    pub id_proveedor: Option<i32>,
    #[validate(range(min = 1, message = "id_color debe ser >= 1."))]
    pub id_color: Option<i32>,
}

#[utoipa::path(get, path = "/producto-simple", tag = "ProductoSimple",
    responses((status = 200, description = "Lista de productos simples", body = [ProductoSimple])))]
pub async fn listar_productos_simples(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state.articulo_service.listar_productos_simples().await?;
    Ok((StatusCode::OK, Json(productos)))
}

#[utoipa::path(get, path = "/producto-simple/{id}", tag = "ProductoSimple",
    params(("id" = i32, Path, description = "ID del producto simple")),
    responses(
        (status = 200, description = "Producto simple encontrado", body = ProductoSimple),
        (status = 404, description = "Producto simple no encontrado"),
    ))]
pub async fn obtener_producto_simple(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state.articulo_service.obtener_producto_simple(id).await?;
    Ok((StatusCode::OK, Json(producto)))
}

#[utoipa::path(post, path = "/producto-simple", tag = "ProductoSimple",
    request_body = CrearProductoSimplePayload,
    responses(
        (status = 201, description = "Producto simple creado", body = ProductoSimple),
        (status = 400, description = "Datos inválidos"),
        (status = 409, description = "Código de tienda duplicado"),
    ))]
pub async fn crear_producto_simple(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearProductoSimplePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let stock_inicial = payload.stock_inicial.map(|cantidad| StockInicial {
        cantidad,
        cantidad_minima: payload.stock_minimo.unwrap_or(0),
        ubicacion: payload.ubicacion.clone(),
    });

    let producto = app_state
        .articulo_service
        .crear_producto_simple(
            &payload.nombre,
            payload.descripcion.as_deref(),
            payload.codigo_tienda.as_deref(),
            payload.id_familia,
            payload.activo,
            payload.id_proveedor,
            payload.id_color,
            stock_inicial,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

#[utoipa::path(put, path = "/producto-simple/{id}", tag = "ProductoSimple",
    params(("id" = i32, Path, description = "ID del producto simple")),
    request_body = ActualizarProductoSimplePayload,
    responses(
        (status = 200, description = "Producto simple actualizado", body = ProductoSimple),
        (status = 404, description = "Producto simple no encontrado"),
    ))]
pub async fn actualizar_producto_simple(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActualizarProductoSimplePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let producto = app_state
        .articulo_service
        .actualizar_producto_simple(
            id,
            payload.nombre.as_deref(),
            payload.descripcion.as_deref(),
            payload.codigo_tienda.as_deref(),
            payload.id_familia,
            payload.activo,
            payload.id_proveedor,
            payload.id_color,
        )
        .await?;
    Ok((StatusCode::OK, Json(producto)))
}

#[utoipa::path(delete, path = "/producto-simple/{id}", tag = "ProductoSimple",
    params(("id" = i32, Path, description = "ID del producto simple")),
    responses(
        (status = 200, description = "Producto simple eliminado"),
        (status = 404, description = "Producto simple no encontrado"),
        (status = 409, description = "El producto sigue referenciado (stock, packs)"),
    ))]
pub async fn eliminar_producto_simple(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.articulo_service.eliminar_producto_simple(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Producto simple eliminado exitosamente" })),
    ))
}

// ---
// Producto Compuesto
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LineaComposicionPayload {
    #[validate(range(min = 1, message = "id_componente debe ser >= 1."))]
    pub id_componente: i32,
    #[validate(range(min = 1, message = "La cantidad debe ser al menos 1."))]
    pub cantidad: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearProductoCompuestoPayload {
    #[validate(length(min = 1, max = 255, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[validate(length(max = 31, message = "El código de tienda es demasiado largo."))]
    pub codigo_tienda: Option<String>,
    #[validate(range(min = 1, message = "id_familia debe ser >= 1."))]
    pub id_familia: Option<i32>,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
    /// Receta inicial opcional.
    #[validate(nested)]
    #[serde(default)]
    pub componentes: Vec<LineaComposicionPayload>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarArticuloPayload {
    #[validate(length(min = 1, max = 255, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    #[validate(length(max = 31, message = "El código de tienda es demasiado largo."))]
    pub codigo_tienda: Option<String>,
    #[validate(range(min = 1, message = "id_familia debe ser >= 1."))]
    pub id_familia: Option<i32>,
    pub activo: Option<bool>,
}

#[utoipa::path(get, path = "/producto-compuesto", tag = "ProductoCompuesto",
    responses((status = 200, description = "Lista de productos compuestos", body = [Articulo])))]
pub async fn listar_productos_compuestos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state.articulo_service.listar_productos_compuestos().await?;
    Ok((StatusCode::OK, Json(productos)))
}

#[utoipa::path(get, path = "/producto-compuesto/{id}", tag = "ProductoCompuesto",
    params(("id" = i32, Path, description = "ID del producto compuesto")),
    responses(
        (status = 200, description = "Producto compuesto encontrado", body = Articulo),
        (status = 404, description = "Producto compuesto no encontrado"),
    ))]
pub async fn obtener_producto_compuesto(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let producto: ProductoCompuesto =
        app_state.articulo_service.obtener_producto_compuesto(id).await?;
    Ok((StatusCode::OK, Json(producto)))
}

#[utoipa::path(post, path = "/producto-compuesto", tag = "ProductoCompuesto",
    request_body = CrearProductoCompuestoPayload,
    responses(
        (status = 201, description = "Producto compuesto creado", body = Articulo),
        (status = 400, description = "Datos inválidos"),
        (status = 409, description = "Código de tienda duplicado o componente inexistente"),
    ))]
pub async fn crear_producto_compuesto(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearProductoCompuestoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let componentes: Vec<(i32, i32)> = payload
        .componentes
        .iter()
        .map(|c| (c.id_componente, c.cantidad))
        .collect();
    let producto = app_state
        .articulo_service
        .crear_producto_compuesto(
            &payload.nombre,
            payload.descripcion.as_deref(),
            payload.codigo_tienda.as_deref(),
            payload.id_familia,
            payload.activo,
            &componentes,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

#[utoipa::path(put, path = "/producto-compuesto/{id}", tag = "ProductoCompuesto",
    params(("id" = i32, Path, description = "ID del producto compuesto")),
    request_body = ActualizarArticuloPayload,
    responses(
        (status = 200, description = "Producto compuesto actualizado", body = Articulo),
        (status = 404, description = "Producto compuesto no encontrado"),
    ))]
pub async fn actualizar_producto_compuesto(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActualizarArticuloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let producto = app_state
        .articulo_service
        .actualizar_producto_compuesto(
            id,
            payload.nombre.as_deref(),
            payload.descripcion.as_deref(),
            payload.codigo_tienda.as_deref(),
            payload.id_familia,
            payload.activo,
        )
        .await?;
    Ok((StatusCode::OK, Json(producto)))
}

#[utoipa::path(delete, path = "/producto-compuesto/{id}", tag = "ProductoCompuesto",
    params(("id" = i32, Path, description = "ID del producto compuesto")),
    responses(
        (status = 200, description = "Producto compuesto eliminado"),
        (status = 404, description = "Producto compuesto no encontrado"),
        (status = 409, description = "El producto sigue referenciado"),
    ))]
pub async fn eliminar_producto_compuesto(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.articulo_service.eliminar_producto_compuesto(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Producto compuesto eliminado exitosamente" })),
    ))
}

#[utoipa::path(post, path = "/producto-compuesto/{id}/componentes", tag = "ProductoCompuesto",
    params(("id" = i32, Path, description = "ID del producto compuesto")),
    request_body = LineaComposicionPayload,
    responses(
        (status = 201, description = "Componente agregado a la receta", body = ComposicionProducto),
        (status = 404, description = "Producto compuesto no encontrado"),
        (status = 409, description = "Componente inexistente"),
    ))]
pub async fn agregar_componente(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LineaComposicionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let linea = app_state
        .articulo_service
        .agregar_componente(id, payload.id_componente, payload.cantidad)
        .await?;
    Ok((StatusCode::CREATED, Json(linea)))
}

#[utoipa::path(get, path = "/producto-compuesto/{id}/componentes", tag = "ProductoCompuesto",
    params(("id" = i32, Path, description = "ID del producto compuesto")),
    responses(
        (status = 200, description = "Receta del producto", body = [ComposicionProducto]),
        (status = 404, description = "Producto compuesto no encontrado"),
    ))]
pub async fn listar_componentes_de_compuesto(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let lineas = app_state.articulo_service.listar_componentes_de_compuesto(id).await?;
    Ok((StatusCode::OK, Json(lineas)))
}

#[utoipa::path(delete, path = "/producto-compuesto/{id}/componentes/{id_componente}",
    tag = "ProductoCompuesto",
    params(
        ("id" = i32, Path, description = "ID del producto compuesto"),
        ("id_componente" = i32, Path, description = "ID del componente"),
    ),
    responses(
        (status = 200, description = "Componente quitado de la receta"),
        (status = 404, description = "Línea de composición no encontrada"),
    ))]
pub async fn quitar_componente(
    State(app_state): State<AppState>,
    Path((id, id_componente)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    app_state.articulo_service.quitar_componente(id, id_componente).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Componente quitado de la receta" })),
    ))
}

#[utoipa::path(get, path = "/producto-compuesto/{id}/coste", tag = "ProductoCompuesto",
    params(("id" = i32, Path, description = "ID del producto compuesto")),
    responses(
        (status = 200, description = "Desglose de coste del producto", body = CosteCompuesto),
        (status = 404, description = "Producto compuesto no encontrado"),
    ))]
pub async fn coste_producto_compuesto(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let coste = app_state.articulo_service.coste_producto_compuesto(id).await?;
    Ok((StatusCode::OK, Json(coste)))
}

// ---
// Pack
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearPackPayload {
    #[validate(length(min = 1, max = 255, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[validate(length(max = 31, message = "El código de tienda es demasiado largo."))]
    pub codigo_tienda: Option<String>,
    #[validate(range(min = 1, message = "id_familia debe ser >= 1."))]
    pub id_familia: Option<i32>,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LineaPackPayload {
    #[validate(range(min = 1, message = "id_producto debe ser >= 1."))]
    pub id_producto: i32,
    #[validate(range(min = 1, message = "La cantidad debe ser al menos 1."))]
    pub cantidad: i32,
}

#[utoipa::path(get, path = "/pack", tag = "Pack",
    responses((status = 200, description = "Lista de packs", body = [Articulo])))]
pub async fn listar_packs(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let packs = app_state.articulo_service.listar_packs().await?;
    Ok((StatusCode::OK, Json(packs)))
}

#[utoipa::path(get, path = "/pack/{id}", tag = "Pack",
    params(("id" = i32, Path, description = "ID del pack")),
    responses(
        (status = 200, description = "Pack encontrado", body = Articulo),
        (status = 404, description = "Pack no encontrado"),
    ))]
pub async fn obtener_pack(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let pack: Pack = app_state.articulo_service.obtener_pack(id).await?;
    Ok((StatusCode::OK, Json(pack)))
}

#[utoipa::path(post, path = "/pack", tag = "Pack",
    request_body = CrearPackPayload,
    responses(
        (status = 201, description = "Pack creado", body = Articulo),
        (status = 400, description = "Datos inválidos"),
        (status = 409, description = "Código de tienda duplicado"),
    ))]
pub async fn crear_pack(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearPackPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let pack = app_state
        .articulo_service
        .crear_pack(
            &payload.nombre,
            payload.descripcion.as_deref(),
            payload.codigo_tienda.as_deref(),
            payload.id_familia,
            payload.activo,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(pack)))
}

#[utoipa::path(put, path = "/pack/{id}", tag = "Pack",
    params(("id" = i32, Path, description = "ID del pack")),
    request_body = ActualizarArticuloPayload,
    responses(
        (status = 200, description = "Pack actualizado", body = Articulo),
        (status = 404, description = "Pack no encontrado"),
    ))]
pub async fn actualizar_pack(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActualizarArticuloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let pack = app_state
        .articulo_service
        .actualizar_pack(
            id,
            payload.nombre.as_deref(),
            payload.descripcion.as_deref(),
            payload.codigo_tienda.as_deref(),
            payload.id_familia,
            payload.activo,
        )
        .await?;
    Ok((StatusCode::OK, Json(pack)))
}

#[utoipa::path(delete, path = "/pack/{id}", tag = "Pack",
    params(("id" = i32, Path, description = "ID del pack")),
    responses(
        (status = 200, description = "Pack eliminado"),
        (status = 404, description = "Pack no encontrado"),
    ))]
pub async fn eliminar_pack(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.articulo_service.eliminar_pack(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Pack eliminado exitosamente" })),
    ))
}

#[utoipa::path(post, path = "/pack/{id}/productos", tag = "Pack",
    params(("id" = i32, Path, description = "ID del pack")),
    request_body = LineaPackPayload,
    responses(
        (status = 201, description = "Producto agregado al pack", body = ComposicionPack),
        (status = 400, description = "El artículo no puede formar parte de un pack"),
        (status = 404, description = "Pack o artículo no encontrado"),
    ))]
pub async fn agregar_producto_a_pack(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LineaPackPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let linea = app_state
        .articulo_service
        .agregar_producto_a_pack(id, payload.id_producto, payload.cantidad)
        .await?;
    Ok((StatusCode::CREATED, Json(linea)))
}

#[utoipa::path(get, path = "/pack/{id}/productos", tag = "Pack",
    params(("id" = i32, Path, description = "ID del pack")),
    responses(
        (status = 200, description = "Productos incluidos en el pack", body = [ComposicionPack]),
        (status = 404, description = "Pack no encontrado"),
    ))]
pub async fn listar_productos_de_pack(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let lineas = app_state.articulo_service.listar_productos_de_pack(id).await?;
    Ok((StatusCode::OK, Json(lineas)))
}

#[utoipa::path(delete, path = "/pack/{id}/productos/{id_producto}", tag = "Pack",
    params(
        ("id" = i32, Path, description = "ID del pack"),
        ("id_producto" = i32, Path, description = "ID del producto"),
    ),
    responses(
        (status = 200, description = "Producto quitado del pack"),
        (status = 404, description = "Línea de composición no encontrada"),
    ))]
pub async fn quitar_producto_de_pack(
    State(app_state): State<AppState>,
    Path((id, id_producto)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    app_state.articulo_service.quitar_producto_de_pack(id, id_producto).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Producto quitado del pack" })),
    ))
}

#[utoipa::path(get, path = "/pack/{id}/precio", tag = "Pack",
    params(("id" = i32, Path, description = "ID del pack")),
    responses(
        (status = 200, description = "Desglose de precio del pack", body = PrecioPack),
        (status = 404, description = "Pack no encontrado"),
    ))]
pub async fn precio_pack(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let precio = app_state.articulo_service.precio_pack(id).await?;
    Ok((StatusCode::OK, Json(precio)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_receta_inicial_valida_sus_lineas() {
        let payload: CrearProductoCompuestoPayload = serde_json::from_str(
            r#"{
                "nombre": "Mesa de roble",
                "componentes": [{ "id_componente": 3, "cantidad": 0 }]
            }"#,
        )
        .unwrap();
        // cantidad 0 en la línea anidada debe tumbar la validación
        assert!(payload.validate().is_err());
    }

    #[test]
    fn producto_compuesto_sin_receta_es_valido() {
        let payload: CrearProductoCompuestoPayload =
            serde_json::from_str(r#"{ "nombre": "Estantería modular" }"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.componentes.is_empty());
        assert!(payload.activo);
    }

    #[test]
    fn stock_inicial_negativo_se_rechaza() {
        let payload: CrearProductoSimplePayload = serde_json::from_str(
            r#"{ "nombre": "Silla apilable", "stock_inicial": -5 }"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
