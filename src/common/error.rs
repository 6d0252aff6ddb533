// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validación semántica que `validator` no puede expresar
    // (exclusión mutua de FKs, tipos de artículo admitidos, etc.).
    #[error("Petición inválida: {0}")]
    BadRequest(String),

    // La frase completa, con el género del recurso ya concordado
    // ("Familia no encontrada", "Stock no encontrado").
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Ya existe un registro con ese valor: {0}")]
    UniqueViolation(String),

    // DELETE sobre una fila referenciada (FK RESTRICT) o inserción con
    // una referencia que no existe.
    #[error("Conflicto de integridad referencial: {0}")]
    ForeignKeyViolation(String),

    #[error("Stock insuficiente: disponible {disponible}, solicitado {solicitado}")]
    StockInsuficiente { disponible: i32, solicitado: i32 },

    // Variante para errores de base de datos (sqlx)
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado.
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Código HTTP con el que responde cada variante.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UniqueViolation(_)
            | AppError::ForeignKeyViolation(_)
            | AppError::StockInsuficiente { .. } => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Los detalles de validación van campo a campo, como el resto de
        // errores simples pero con un mapa `details`.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Uno o más campos son inválidos.",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let status = self.status_code();
        let message = match &self {
            // Los 500 no filtran detalles internos; el log se queda con ellos.
            AppError::DatabaseError(e) => {
                tracing::error!("Error de base de datos: {e}");
                "Ha ocurrido un error inesperado.".to_string()
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Error interno del servidor: {e}");
                "Ha ocurrido un error inesperado.".to_string()
            }
            otro => otro.to_string(),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Traduce violaciones de restricción de Postgres a variantes con
/// significado para la API. Todo lo demás sigue siendo DatabaseError.
pub fn map_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        let constraint = db_err.constraint().unwrap_or_default().to_string();
        if db_err.is_unique_violation() {
            return AppError::UniqueViolation(constraint);
        }
        if db_err.is_foreign_key_violation() {
            return AppError::ForeignKeyViolation(constraint);
        }
        if db_err.is_check_violation() {
            return AppError::BadRequest(format!("restricción incumplida: {constraint}"));
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigos_http_por_variante() {
        assert_eq!(
            AppError::NotFound("Familia no encontrada").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("tipo inválido".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UniqueViolation("familia_nombre_key".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::StockInsuficiente { disponible: 2, solicitado: 5 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_conserva_la_frase_completa() {
        // El mensaje llega ya concordado en género desde el servicio.
        assert_eq!(
            AppError::NotFound("Familia no encontrada").to_string(),
            "Familia no encontrada"
        );
        assert_eq!(
            AppError::NotFound("Pack no encontrado").to_string(),
            "Pack no encontrado"
        );
    }

    #[test]
    fn stock_insuficiente_describe_cantidades() {
        let e = AppError::StockInsuficiente { disponible: 3, solicitado: 10 };
        let msg = e.to_string();
        assert!(msg.contains("disponible 3"));
        assert!(msg.contains("solicitado 10"));
    }
}
