// src/models/catalogo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- 1. Familia ---
// Agrupación comercial; de ella cuelgan artículos y colores.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Familia {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
}

// --- 2. Color ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Color {
    pub id: i32,
    pub nombre: String,
    pub hex: Option<String>,
    pub url_imagen: Option<String>,
    pub id_familia: Option<i32>,
}

// --- 3. Proveedor ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Proveedor {
    pub id: i32,
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub direccion: Option<String>,
    pub activo: bool,
}

// --- 4. Componente ---
// Pieza de compra que entra en la composición de productos compuestos.
// Tiene stock y precio de compra propios, pero no es un artículo vendible.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Componente {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub id_proveedor: Option<i32>,
    pub id_color: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
