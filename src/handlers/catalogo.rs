// src/handlers/catalogo.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalogo::{Color, Componente, Familia, Proveedor},
};

// ---
// Familia
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearFamiliaPayload {
    #[validate(length(min = 1, max = 127, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarFamiliaPayload {
    #[validate(length(min = 1, max = 127, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

#[utoipa::path(get, path = "/familia", tag = "Familia",
    responses((status = 200, description = "Lista de familias", body = [Familia])))]
pub async fn listar_familias(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let familias = app_state.catalogo_service.listar_familias().await?;
    Ok((StatusCode::OK, Json(familias)))
}

#[utoipa::path(get, path = "/familia/{id}", tag = "Familia",
    params(("id" = i32, Path, description = "ID de la familia")),
    responses(
        (status = 200, description = "Familia encontrada", body = Familia),
        (status = 404, description = "Familia no encontrada"),
    ))]
pub async fn obtener_familia(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let familia = app_state.catalogo_service.obtener_familia(id).await?;
    Ok((StatusCode::OK, Json(familia)))
}

#[utoipa::path(post, path = "/familia", tag = "Familia",
    request_body = CrearFamiliaPayload,
    responses(
        (status = 201, description = "Familia creada", body = Familia),
        (status = 400, description = "Datos inválidos"),
        (status = 409, description = "Nombre duplicado"),
    ))]
pub async fn crear_familia(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearFamiliaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let familia = app_state
        .catalogo_service
        .crear_familia(&payload.nombre, payload.descripcion.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(familia)))
}

#[utoipa::path(put, path = "/familia/{id}", tag = "Familia",
    params(("id" = i32, Path, description = "ID de la familia")),
    request_body = ActualizarFamiliaPayload,
    responses(
        (status = 200, description = "Familia actualizada", body = Familia),
        (status = 404, description = "Familia no encontrada"),
    ))]
pub async fn actualizar_familia(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActualizarFamiliaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let familia = app_state
        .catalogo_service
        .actualizar_familia(id, payload.nombre.as_deref(), payload.descripcion.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(familia)))
}

#[utoipa::path(delete, path = "/familia/{id}", tag = "Familia",
    params(("id" = i32, Path, description = "ID de la familia")),
    responses(
        (status = 200, description = "Familia eliminada"),
        (status = 404, description = "Familia no encontrada"),
        (status = 409, description = "La familia sigue referenciada"),
    ))]
pub async fn eliminar_familia(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.eliminar_familia(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Familia eliminada exitosamente" })),
    ))
}

// ---
// Color
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearColorPayload {
    #[validate(length(min = 1, max = 31, message = "El nombre es obligatorio."))]
    pub nombre: String,
    // Formato #RRGGBB
    #[validate(length(min = 4, max = 7, message = "El hex debe tener formato #RGB o #RRGGBB."))]
    pub hex: Option<String>,
    #[validate(length(max = 511, message = "La URL es demasiado larga."))]
    pub url_imagen: Option<String>,
    #[validate(range(min = 1, message = "id_familia debe ser >= 1."))]
    pub id_familia: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarColorPayload {
    #[validate(length(min = 1, max = 31, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    #[validate(length(min = 4, max = 7, message = "El hex debe tener formato #RGB o #RRGGBB."))]
    pub hex: Option<String>,
    #[validate(length(max = 511, message = "La URL es demasiado larga."))]
    pub url_imagen: Option<String>,
    #[validate(range(min = 1, message = "id_familia debe ser >= 1."))]
    pub id_familia: Option<i32>,
}

#[utoipa::path(get, path = "/color", tag = "Color",
    responses((status = 200, description = "Lista de colores", body = [Color])))]
pub async fn listar_colores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let colores = app_state.catalogo_service.listar_colores().await?;
    Ok((StatusCode::OK, Json(colores)))
}

#[utoipa::path(get, path = "/color/{id}", tag = "Color",
    params(("id" = i32, Path, description = "ID del color")),
    responses(
        (status = 200, description = "Color encontrado", body = Color),
        (status = 404, description = "Color no encontrado"),
    ))]
pub async fn obtener_color(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let color = app_state.catalogo_service.obtener_color(id).await?;
    Ok((StatusCode::OK, Json(color)))
}

#[utoipa::path(post, path = "/color", tag = "Color",
    request_body = CrearColorPayload,
    responses(
        (status = 201, description = "Color creado", body = Color),
        (status = 400, description = "Datos inválidos"),
        (status = 409, description = "Nombre duplicado"),
    ))]
pub async fn crear_color(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearColorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let color = app_state
        .catalogo_service
        .crear_color(
            &payload.nombre,
            payload.hex.as_deref(),
            payload.url_imagen.as_deref(),
            payload.id_familia,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(color)))
}

#[utoipa::path(put, path = "/color/{id}", tag = "Color",
    params(("id" = i32, Path, description = "ID del color")),
    request_body = ActualizarColorPayload,
    responses(
        (status = 200, description = "Color actualizado", body = Color),
        (status = 404, description = "Color no encontrado"),
    ))]
pub async fn actualizar_color(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActualizarColorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let color = app_state
        .catalogo_service
        .actualizar_color(
            id,
            payload.nombre.as_deref(),
            payload.hex.as_deref(),
            payload.url_imagen.as_deref(),
            payload.id_familia,
        )
        .await?;
    Ok((StatusCode::OK, Json(color)))
}

#[utoipa::path(delete, path = "/color/{id}", tag = "Color",
    params(("id" = i32, Path, description = "ID del color")),
    responses(
        (status = 200, description = "Color eliminado"),
        (status = 404, description = "Color no encontrado"),
        (status = 409, description = "El color sigue referenciado"),
    ))]
pub async fn eliminar_color(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.eliminar_color(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Color eliminado exitosamente" })),
    ))
}

// ---
// Proveedor
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearProveedorPayload {
    #[validate(length(min = 1, max = 127, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(length(max = 31, message = "El teléfono es demasiado largo."))]
    pub telefono: Option<String>,
    #[validate(email(message = "El email no es válido."))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "La dirección es demasiado larga."))]
    pub direccion: Option<String>,
    #[serde(default = "por_defecto_activo")]
    pub activo: bool,
}

fn por_defecto_activo() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarProveedorPayload {
    #[validate(length(min = 1, max = 127, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    #[validate(length(max = 31, message = "El teléfono es demasiado largo."))]
    pub telefono: Option<String>,
    #[validate(email(message = "El email no es válido."))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "La dirección es demasiado larga."))]
    pub direccion: Option<String>,
    pub activo: Option<bool>,
}

#[utoipa::path(get, path = "/proveedor", tag = "Proveedor",
    responses((status = 200, description = "Lista de proveedores", body = [Proveedor])))]
pub async fn listar_proveedores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let proveedores = app_state.catalogo_service.listar_proveedores().await?;
    Ok((StatusCode::OK, Json(proveedores)))
}

#[utoipa::path(get, path = "/proveedor/{id}", tag = "Proveedor",
    params(("id" = i32, Path, description = "ID del proveedor")),
    responses(
        (status = 200, description = "Proveedor encontrado", body = Proveedor),
        (status = 404, description = "Proveedor no encontrado"),
    ))]
pub async fn obtener_proveedor(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let proveedor = app_state.catalogo_service.obtener_proveedor(id).await?;
    Ok((StatusCode::OK, Json(proveedor)))
}

#[utoipa::path(post, path = "/proveedor", tag = "Proveedor",
    request_body = CrearProveedorPayload,
    responses(
        (status = 201, description = "Proveedor creado", body = Proveedor),
        (status = 400, description = "Datos inválidos"),
        (status = 409, description = "Nombre duplicado"),
    ))]
pub async fn crear_proveedor(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearProveedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let proveedor = app_state
        .catalogo_service
        .crear_proveedor(
            &payload.nombre,
            payload.telefono.as_deref(),
            payload.email.as_deref(),
            payload.direccion.as_deref(),
            payload.activo,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(proveedor)))
}

#[utoipa::path(put, path = "/proveedor/{id}", tag = "Proveedor",
    params(("id" = i32, Path, description = "ID del proveedor")),
    request_body = ActualizarProveedorPayload,
    responses(
        (status = 200, description = "Proveedor actualizado", body = Proveedor),
        (status = 404, description = "Proveedor no encontrado"),
    ))]
pub async fn actualizar_proveedor(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActualizarProveedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let proveedor = app_state
        .catalogo_service
        .actualizar_proveedor(
            id,
            payload.nombre.as_deref(),
            payload.telefono.as_deref(),
            payload.email.as_deref(),
            payload.direccion.as_deref(),
            payload.activo,
        )
        .await?;
    Ok((StatusCode::OK, Json(proveedor)))
}

#[utoipa::path(delete, path = "/proveedor/{id}", tag = "Proveedor",
    params(("id" = i32, Path, description = "ID del proveedor")),
    responses(
        (status = 200, description = "Proveedor eliminado"),
        (status = 404, description = "Proveedor no encontrado"),
        (status = 409, description = "El proveedor sigue referenciado"),
    ))]
pub async fn eliminar_proveedor(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.eliminar_proveedor(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Proveedor eliminado exitosamente" })),
    ))
}

// ---
// Componente
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearComponentePayload {
    #[validate(length(min = 1, max = 255, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[validate(range(min = 1, message = "id_proveedor debe ser >= 1."))]
    pub id_proveedor: Option<i32>,
    #[validate(range(min = 1, message = "id_color debe ser >= 1."))]
    pub id_color: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActualizarComponentePayload {
    #[validate(length(min = 1, max = 255, message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    #[validate(range(min = 1, message = "id_proveedor debe ser >= 1."))]
    pub id_proveedor: Option<i32>,
    #[validate(range(min = 1, message = "id_color debe ser >= 1."))]
    pub id_color: Option<i32>,
}

#[utoipa::path(get, path = "/componente", tag = "Componente",
    responses((status = 200, description = "Lista de componentes", body = [Componente])))]
pub async fn listar_componentes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let componentes = app_state.catalogo_service.listar_componentes().await?;
    Ok((StatusCode::OK, Json(componentes)))
}

#[utoipa::path(get, path = "/componente/{id}", tag = "Componente",
    params(("id" = i32, Path, description = "ID del componente")),
    responses(
        (status = 200, description = "Componente encontrado", body = Componente),
        (status = 404, description = "Componente no encontrado"),
    ))]
pub async fn obtener_componente(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let componente = app_state.catalogo_service.obtener_componente(id).await?;
    Ok((StatusCode::OK, Json(componente)))
}

#[utoipa::path(post, path = "/componente", tag = "Componente",
    request_body = CrearComponentePayload,
    responses(
        (status = 201, description = "Componente creado", body = Componente),
        (status = 400, description = "Datos inválidos"),
        (status = 409, description = "Nombre duplicado"),
    ))]
pub async fn crear_componente(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearComponentePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let componente = app_state
        .catalogo_service
        .crear_componente(
            &payload.nombre,
            payload.descripcion.as_deref(),
            payload.id_proveedor,
            payload.id_color,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(componente)))
}

#[utoipa::path(put, path = "/componente/{id}", tag = "Componente",
    params(("id" = i32, Path, description = "ID del componente")),
    request_body = ActualizarComponentePayload,
    responses(
        (status = 200, description = "Componente actualizado", body = Componente),
        (status = 404, description = "Componente no encontrado"),
    ))]
pub async fn actualizar_componente(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActualizarComponentePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let componente = app_state
        .catalogo_service
        .actualizar_componente(
            id,
            payload.nombre.as_deref(),
            payload.descripcion.as_deref(),
            payload.id_proveedor,
            payload.id_color,
        )
        .await?;
    Ok((StatusCode::OK, Json(componente)))
}

#[utoipa::path(delete, path = "/componente/{id}", tag = "Componente",
    params(("id" = i32, Path, description = "ID del componente")),
    responses(
        (status = 200, description = "Componente eliminado"),
        (status = 404, description = "Componente no encontrado"),
        (status = 409, description = "El componente sigue referenciado"),
    ))]
pub async fn eliminar_componente(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.eliminar_componente(id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "detail": "Componente eliminado exitosamente" })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_de_familia_exige_nombre() {
        let payload = CrearFamiliaPayload { nombre: "".into(), descripcion: None };
        assert!(payload.validate().is_err());

        let payload = CrearFamiliaPayload { nombre: "Sillas".into(), descripcion: None };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn email_de_proveedor_se_valida_si_llega() {
        let payload = CrearProveedorPayload {
            nombre: "Maderas del Norte".into(),
            telefono: None,
            email: Some("no-es-un-email".into()),
            direccion: None,
            activo: true,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn activo_por_defecto_en_proveedor() {
        let payload: CrearProveedorPayload =
            serde_json::from_str(r#"{ "nombre": "Tapicerías Sur" }"#).unwrap();
        assert!(payload.activo);
    }
}
