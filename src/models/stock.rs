// src/models/stock.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- 1. Tipo de stock ---
// Un registro de stock pertenece a un producto simple O a un componente,
// nunca a ambos (CHECK de exclusión mutua en la tabla).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoStock {
    ProductoSimple,
    Componente,
}

impl TipoStock {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoStock::ProductoSimple => "producto_simple",
            TipoStock::Componente => "componente",
        }
    }
}

// --- 2. Stock ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Stock {
    pub id: i32,
    pub tipo: TipoStock,
    pub id_producto_simple: Option<i32>,
    pub id_componente: Option<i32>,
    pub cantidad: i32,
    pub cantidad_minima: i32,
    pub ubicacion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Stock {
    /// Un stock está en alerta cuando cae por debajo de su mínimo.
    pub fn bajo_minimo(&self) -> bool {
        self.cantidad < self.cantidad_minima
    }
}

// --- 3. Movimiento ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoMovimiento {
    Entrada,
    Salida,
}

impl TipoMovimiento {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoMovimiento::Entrada => "entrada",
            TipoMovimiento::Salida => "salida",
        }
    }

    /// Delta que aplica el movimiento sobre la cantidad en stock.
    pub fn delta(&self, cantidad: i32) -> i32 {
        match self {
            TipoMovimiento::Entrada => cantidad,
            TipoMovimiento::Salida => -cantidad,
        }
    }
}

// Asiento del libro de movimientos. Solo se inserta; nunca se edita.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movimiento {
    pub id: i32,
    pub tipo: TipoMovimiento,
    pub cantidad: i32,
    pub id_stock: i32,
    pub descripcion: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stock(cantidad: i32, minima: i32) -> Stock {
        Stock {
            id: 1,
            tipo: TipoStock::Componente,
            id_producto_simple: None,
            id_componente: Some(7),
            cantidad,
            cantidad_minima: minima,
            ubicacion: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn bajo_minimo_es_estricto() {
        assert!(stock(2, 5).bajo_minimo());
        // Igual al mínimo no dispara alerta.
        assert!(!stock(5, 5).bajo_minimo());
        assert!(!stock(9, 5).bajo_minimo());
    }

    #[test]
    fn delta_segun_tipo_de_movimiento() {
        assert_eq!(TipoMovimiento::Entrada.delta(10), 10);
        assert_eq!(TipoMovimiento::Salida.delta(10), -10);
    }

    #[test]
    fn tipo_movimiento_mapea_a_la_columna() {
        assert_eq!(TipoMovimiento::Entrada.as_str(), "entrada");
        assert_eq!(TipoMovimiento::Salida.as_str(), "salida");
    }

    #[test]
    fn tipo_stock_serializa_como_la_columna() {
        let json = serde_json::to_string(&TipoStock::ProductoSimple).unwrap();
        assert_eq!(json, "\"producto_simple\"");
        let de: TipoMovimiento = serde_json::from_str("\"salida\"").unwrap();
        assert_eq!(de, TipoMovimiento::Salida);
    }
}
