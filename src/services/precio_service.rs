// src/services/precio_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::PrecioRepository,
    models::{
        precio::{MargenBeneficio, PrecioCompra, PrecioVenta},
        stock::TipoStock,
    },
};

// Históricos de precios. Alta de un precio = cerrar el vigente anterior
// del mismo objetivo + insertar el nuevo, en la misma transacción, de
// modo que nunca haya dos filas vigentes a la vez.
#[derive(Clone)]
pub struct PrecioService {
    precio_repo: PrecioRepository,
    pool: PgPool,
}

impl PrecioService {
    pub fn new(precio_repo: PrecioRepository, pool: PgPool) -> Self {
        Self { precio_repo, pool }
    }

    // --- Compra ---

    pub async fn listar_precios_compra(
        &self,
        vigente: Option<bool>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<PrecioCompra>, AppError> {
        self.precio_repo.listar_precios_compra(vigente, skip, limit).await
    }

    pub async fn obtener_precio_compra(&self, id: i32) -> Result<PrecioCompra, AppError> {
        self.precio_repo
            .obtener_precio_compra(id)
            .await?
            .ok_or(AppError::NotFound("Precio de compra no encontrado"))
    }

    pub async fn crear_precio_compra(
        &self,
        tipo: TipoStock,
        id_producto_simple: Option<i32>,
        id_componente: Option<i32>,
        valor: Decimal,
        moneda: &str,
    ) -> Result<PrecioCompra, AppError> {
        validar_objetivo(tipo, id_producto_simple, id_componente)?;

        let mut tx = self.pool.begin().await?;
        self.precio_repo
            .cerrar_precio_compra_vigente(&mut *tx, id_producto_simple, id_componente)
            .await?;
        let precio = self
            .precio_repo
            .crear_precio_compra(&mut *tx, tipo, id_producto_simple, id_componente, valor, moneda)
            .await?;
        tx.commit().await?;
        Ok(precio)
    }

    // --- Venta ---

    pub async fn listar_precios_venta(
        &self,
        vigente: Option<bool>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<PrecioVenta>, AppError> {
        self.precio_repo.listar_precios_venta(vigente, skip, limit).await
    }

    pub async fn obtener_precio_venta(&self, id: i32) -> Result<PrecioVenta, AppError> {
        self.precio_repo
            .obtener_precio_venta(id)
            .await?
            .ok_or(AppError::NotFound("Precio de venta no encontrado"))
    }

    pub async fn crear_precio_venta(
        &self,
        id_articulo: i32,
        valor: Decimal,
        moneda: &str,
    ) -> Result<PrecioVenta, AppError> {
        let mut tx = self.pool.begin().await?;
        self.precio_repo
            .cerrar_precio_venta_vigente(&mut *tx, id_articulo)
            .await?;
        let precio = self
            .precio_repo
            .crear_precio_venta(&mut *tx, id_articulo, valor, moneda)
            .await?;
        tx.commit().await?;
        Ok(precio)
    }

    // --- Margen ---

    /// Margen entre un precio de venta y uno de compra concretos. Ambos
    /// deben estar en la misma moneda; no hace falta que sigan vigentes,
    /// pero se deja constancia cuando se comparan precios cerrados.
    pub async fn margen_beneficio(
        &self,
        id_precio_venta: i32,
        id_precio_compra: i32,
    ) -> Result<MargenBeneficio, AppError> {
        let venta = self.obtener_precio_venta(id_precio_venta).await?;
        let compra = self.obtener_precio_compra(id_precio_compra).await?;

        if venta.moneda != compra.moneda {
            return Err(AppError::BadRequest(
                "los precios deben estar en la misma moneda".to_string(),
            ));
        }

        if !venta.vigente() || !compra.vigente() {
            tracing::info!(
                id_precio_venta,
                id_precio_compra,
                "cálculo de margen sobre precios históricos"
            );
        }

        let (margen_absoluto, margen_porcentual) = calcular_margen(venta.valor, compra.valor);
        Ok(MargenBeneficio {
            precio_venta: venta.valor,
            precio_compra: compra.valor,
            moneda: venta.moneda,
            margen_absoluto,
            margen_porcentual,
        })
    }
}

/// (absoluto, porcentual). El porcentaje se calcula sobre el precio de
/// compra; con compra cero no hay base y se devuelve 0.
fn calcular_margen(venta: Decimal, compra: Decimal) -> (Decimal, Decimal) {
    let absoluto = venta - compra;
    let porcentual = if compra > Decimal::ZERO {
        (absoluto / compra) * Decimal::from(100)
    } else {
        Decimal::ZERO
    };
    (absoluto, porcentual)
}

/// Misma regla de exclusión mutua que el stock: la FK debe coincidir
/// con el tipo declarado.
fn validar_objetivo(
    tipo: TipoStock,
    id_producto_simple: Option<i32>,
    id_componente: Option<i32>,
) -> Result<(), AppError> {
    let ok = match tipo {
        TipoStock::ProductoSimple => id_producto_simple.is_some() && id_componente.is_none(),
        TipoStock::Componente => id_componente.is_some() && id_producto_simple.is_none(),
    };
    if !ok {
        return Err(AppError::BadRequest(
            "el precio de compra debe referenciar exactamente la entidad que indica su tipo"
                .to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margen_sobre_el_precio_de_compra() {
        // venta 15.00, compra 10.00 -> margen 5.00, 50%
        let (abs, pct) = calcular_margen(Decimal::new(1500, 2), Decimal::new(1000, 2));
        assert_eq!(abs, Decimal::new(500, 2));
        assert_eq!(pct, Decimal::from(50));

        // Vender por debajo de coste da margen negativo.
        let (abs, _) = calcular_margen(Decimal::new(800, 2), Decimal::new(1000, 2));
        assert_eq!(abs, Decimal::new(-200, 2));
    }

    #[test]
    fn margen_con_compra_cero_no_divide() {
        let (abs, pct) = calcular_margen(Decimal::new(1500, 2), Decimal::ZERO);
        assert_eq!(abs, Decimal::new(1500, 2));
        assert_eq!(pct, Decimal::ZERO);
    }

    #[test]
    fn objetivo_del_precio_de_compra() {
        assert!(validar_objetivo(TipoStock::Componente, None, Some(4)).is_ok());
        assert!(validar_objetivo(TipoStock::ProductoSimple, Some(9), None).is_ok());
        assert!(validar_objetivo(TipoStock::Componente, Some(1), Some(4)).is_err());
        assert!(validar_objetivo(TipoStock::ProductoSimple, None, None).is_err());
    }
}
