// src/models/inventario.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    articulo::Articulo,
    catalogo::{Color, Componente, Familia, Proveedor},
};

// --- 1. Dashboard ---
// Resumen transversal del inventario: recuentos por entidad y estado
// agregado del stock.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardInventario {
    pub total_familias: i64,
    pub total_colores: i64,
    pub total_proveedores: i64,
    pub total_componentes: i64,
    pub total_articulos: i64,
    pub productos_simples: i64,
    pub productos_compuestos: i64,
    pub packs: i64,
    pub unidades_en_stock: i64,
    pub alertas_reposicion: i64,
}

// --- 2. Búsqueda global ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultadoBusqueda {
    pub familias: Vec<Familia>,
    pub colores: Vec<Color>,
    pub proveedores: Vec<Proveedor>,
    pub articulos: Vec<Articulo>,
    pub componentes: Vec<Componente>,
}
