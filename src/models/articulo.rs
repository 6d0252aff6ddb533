// src/models/articulo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- 1. Tipo de artículo ---
// Discriminador de la tabla base: cada fila de `articulo` es exactamente
// un producto simple, un producto compuesto o un pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoArticulo {
    Simple,
    Compuesto,
    Pack,
}

impl TipoArticulo {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoArticulo::Simple => "simple",
            TipoArticulo::Compuesto => "compuesto",
            TipoArticulo::Pack => "pack",
        }
    }
}

// --- 2. Articulo (tabla base del catálogo) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Articulo {
    pub id: i32,
    pub tipo: TipoArticulo,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub codigo_tienda: Option<String>,
    pub id_familia: Option<i32>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- 3. Producto Simple ---
// Vista plana: articulo JOIN producto_simple. Es lo que viaja por la API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductoSimple {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub codigo_tienda: Option<String>,
    pub id_familia: Option<i32>,
    pub activo: bool,
    pub id_proveedor: Option<i32>,
    pub id_color: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- 4. Producto Compuesto / Pack ---
// Los subtipos sin columnas propias reutilizan la fila base tal cual.
pub type ProductoCompuesto = Articulo;
pub type Pack = Articulo;

// --- 5. Composición ---
// Línea de composición de un producto compuesto (componente + cantidad).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ComposicionProducto {
    pub id_producto_compuesto: i32,
    pub id_componente: i32,
    pub cantidad: i32,
}

// Línea de composición de un pack (producto vendible + cantidad).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ComposicionPack {
    pub id_pack: i32,
    pub id_producto: i32,
    pub cantidad: i32,
}

// --- 6. Desgloses de coste / precio derivados ---

// Una línea del desglose de coste de un compuesto: componente con su
// precio de compra vigente (si lo tiene).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LineaCoste {
    pub id_componente: i32,
    pub nombre: String,
    pub cantidad: i32,
    pub precio_unitario: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CosteCompuesto {
    pub id_producto_compuesto: i32,
    pub coste_total: Decimal,
    pub lineas: Vec<LineaCoste>,
    /// Componentes sin precio de compra vigente (excluidos de la suma).
    pub sin_precio: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LineaPrecioPack {
    pub id_producto: i32,
    pub nombre: String,
    pub cantidad: i32,
    pub precio_unitario: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrecioPack {
    pub id_pack: i32,
    pub precio_total: Decimal,
    pub lineas: Vec<LineaPrecioPack>,
    /// Productos sin precio de venta vigente (excluidos de la suma).
    pub sin_precio: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_articulo_serializa_en_minusculas() {
        let json = serde_json::to_string(&TipoArticulo::Compuesto).unwrap();
        assert_eq!(json, "\"compuesto\"");
        let de: TipoArticulo = serde_json::from_str("\"pack\"").unwrap();
        assert_eq!(de, TipoArticulo::Pack);
    }

    #[test]
    fn tipo_articulo_as_str_coincide_con_el_check_de_la_tabla() {
        assert_eq!(TipoArticulo::Simple.as_str(), "simple");
        assert_eq!(TipoArticulo::Compuesto.as_str(), "compuesto");
        assert_eq!(TipoArticulo::Pack.as_str(), "pack");
    }
}
