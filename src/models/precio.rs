// src/models/precio.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::stock::TipoStock;

// --- 1. Precio de compra ---
// Histórico de lo que cuesta reponer un producto simple o un componente.
// La fila con fecha_fin = NULL es el precio vigente; al registrar uno
// nuevo se cierra el anterior en la misma transacción.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PrecioCompra {
    pub id: i32,
    pub tipo: TipoStock,
    pub id_producto_simple: Option<i32>,
    pub id_componente: Option<i32>,
    pub valor: Decimal,
    pub moneda: String,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_fin: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrecioCompra {
    pub fn vigente(&self) -> bool {
        self.fecha_fin.is_none()
    }
}

// --- 2. Precio de venta ---
// Histórico de precios de venta por artículo (simple, compuesto o pack).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PrecioVenta {
    pub id: i32,
    pub id_articulo: i32,
    pub valor: Decimal,
    pub moneda: String,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_fin: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrecioVenta {
    pub fn vigente(&self) -> bool {
        self.fecha_fin.is_none()
    }
}

// --- 3. Margen de beneficio ---
// Comparación puntual entre un precio de venta y uno de compra de la
// misma moneda.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MargenBeneficio {
    pub precio_venta: Decimal,
    pub precio_compra: Decimal,
    pub moneda: String,
    pub margen_absoluto: Decimal,
    pub margen_porcentual: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn precio_venta(fecha_fin: Option<DateTime<Utc>>) -> PrecioVenta {
        PrecioVenta {
            id: 1,
            id_articulo: 3,
            valor: Decimal::new(1990, 2),
            moneda: "EUR".into(),
            fecha_inicio: Utc::now(),
            fecha_fin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn vigente_es_la_fila_sin_fecha_fin() {
        assert!(precio_venta(None).vigente());
        assert!(!precio_venta(Some(Utc::now())).vigente());

        let compra = PrecioCompra {
            id: 1,
            tipo: TipoStock::Componente,
            id_producto_simple: None,
            id_componente: Some(4),
            valor: Decimal::new(550, 2),
            moneda: "EUR".into(),
            fecha_inicio: Utc::now(),
            fecha_fin: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(compra.vigente());
    }
}
