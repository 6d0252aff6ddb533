// src/services/stock_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::StockRepository,
    models::stock::{Movimiento, Stock, TipoMovimiento, TipoStock},
};

// Stock e historial de movimientos. La operación con enjundia es
// `crear_movimiento`: asiento en el libro + ajuste del saldo, ambos
// bajo la misma transacción y con la fila bloqueada (FOR UPDATE).
#[derive(Clone)]
pub struct StockService {
    stock_repo: StockRepository,
    pool: PgPool,
}

impl StockService {
    pub fn new(stock_repo: StockRepository, pool: PgPool) -> Self {
        Self { stock_repo, pool }
    }

    // ---
    // Stock
    // ---

    pub async fn listar_stock(
        &self,
        tipo: Option<TipoStock>,
        ubicacion: Option<&str>,
        bajo_stock: bool,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Stock>, AppError> {
        self.stock_repo
            .listar_stock(tipo, ubicacion, bajo_stock, skip, limit)
            .await
    }

    pub async fn obtener_stock(&self, id: i32) -> Result<Stock, AppError> {
        self.stock_repo
            .obtener_stock(id)
            .await?
            .ok_or(AppError::NotFound("Stock no encontrado"))
    }

    pub async fn obtener_stock_por_producto_simple(&self, id: i32) -> Result<Stock, AppError> {
        self.stock_repo
            .obtener_stock_por_producto_simple(id)
            .await?
            .ok_or(AppError::NotFound("Stock no encontrado"))
    }

    pub async fn obtener_stock_por_componente(&self, id: i32) -> Result<Stock, AppError> {
        self.stock_repo
            .obtener_stock_por_componente(id)
            .await?
            .ok_or(AppError::NotFound("Stock no encontrado"))
    }

    pub async fn crear_stock(
        &self,
        tipo: TipoStock,
        id_producto_simple: Option<i32>,
        id_componente: Option<i32>,
        cantidad: i32,
        cantidad_minima: i32,
        ubicacion: Option<&str>,
    ) -> Result<Stock, AppError> {
        validar_exclusividad(tipo, id_producto_simple, id_componente)?;
        self.stock_repo
            .crear_stock(
                &self.pool,
                tipo,
                id_producto_simple,
                id_componente,
                cantidad,
                cantidad_minima,
                ubicacion,
            )
            .await
    }

    pub async fn actualizar_stock(
        &self,
        id: i32,
        cantidad: Option<i32>,
        cantidad_minima: Option<i32>,
        ubicacion: Option<&str>,
    ) -> Result<Stock, AppError> {
        self.stock_repo
            .actualizar_stock(&self.pool, id, cantidad, cantidad_minima, ubicacion)
            .await?
            .ok_or(AppError::NotFound("Stock no encontrado"))
    }

    pub async fn eliminar_stock(&self, id: i32) -> Result<(), AppError> {
        if !self.stock_repo.eliminar_stock(&self.pool, id).await? {
            return Err(AppError::NotFound("Stock no encontrado"));
        }
        Ok(())
    }

    pub async fn listar_alertas(&self) -> Result<Vec<Stock>, AppError> {
        self.stock_repo.listar_alertas().await
    }

    // ---
    // Movimientos
    // ---

    pub async fn listar_movimientos(
        &self,
        tipo: Option<TipoMovimiento>,
        id_stock: Option<i32>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Movimiento>, AppError> {
        self.stock_repo
            .listar_movimientos(tipo, id_stock, skip, limit)
            .await
    }

    /// Registra el movimiento y aplica su delta al stock en una sola
    /// transacción. Devuelve el stock ya actualizado.
    pub async fn crear_movimiento(
        &self,
        tipo: TipoMovimiento,
        cantidad: i32,
        id_stock: i32,
        descripcion: Option<&str>,
    ) -> Result<Stock, AppError> {
        let mut tx = self.pool.begin().await?;

        let stock = self
            .stock_repo
            .obtener_stock_para_actualizar(&mut *tx, id_stock)
            .await?
            .ok_or(AppError::NotFound("Stock no encontrado"))?;

        validar_salida(tipo, stock.cantidad, cantidad)?;

        self.stock_repo
            .registrar_movimiento(&mut *tx, tipo, cantidad, id_stock, descripcion)
            .await?;

        let actualizado = self
            .stock_repo
            .aplicar_delta_cantidad(&mut *tx, id_stock, tipo.delta(cantidad))
            .await?;

        tx.commit().await?;

        if actualizado.bajo_minimo() {
            tracing::warn!(
                id_stock = actualizado.id,
                cantidad = actualizado.cantidad,
                cantidad_minima = actualizado.cantidad_minima,
                "stock por debajo del mínimo tras el movimiento"
            );
        }

        Ok(actualizado)
    }

    pub async fn eliminar_movimiento(&self, id: i32) -> Result<(), AppError> {
        if !self.stock_repo.eliminar_movimiento(&self.pool, id).await? {
            return Err(AppError::NotFound("Movimiento no encontrado"));
        }
        Ok(())
    }
}

// ---
// Reglas puras
// ---

/// Una salida no puede dejar el saldo en negativo.
fn validar_salida(tipo: TipoMovimiento, disponible: i32, solicitado: i32) -> Result<(), AppError> {
    if tipo == TipoMovimiento::Salida && solicitado > disponible {
        return Err(AppError::StockInsuficiente { disponible, solicitado });
    }
    Ok(())
}

/// El registro debe apuntar exactamente a la FK que indica su tipo.
fn validar_exclusividad(
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
            "el stock debe referenciar exactamente la entidad que indica su tipo".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_entrada_nunca_se_rechaza_por_saldo() {
        assert!(validar_salida(TipoMovimiento::Entrada, 0, 1000).is_ok());
    }

    #[test]
    fn la_salida_respeta_el_saldo_disponible() {
        assert!(validar_salida(TipoMovimiento::Salida, 10, 10).is_ok());
        let err = validar_salida(TipoMovimiento::Salida, 3, 4).unwrap_err();
        match err {
            AppError::StockInsuficiente { disponible, solicitado } => {
                assert_eq!(disponible, 3);
                assert_eq!(solicitado, 4);
            }
            otro => panic!("se esperaba StockInsuficiente, llegó {otro:?}"),
        }
    }

    #[test]
    fn exclusividad_de_fks_segun_tipo() {
        assert!(validar_exclusividad(TipoStock::ProductoSimple, Some(1), None).is_ok());
        assert!(validar_exclusividad(TipoStock::Componente, None, Some(2)).is_ok());
        // FK equivocada para el tipo
        assert!(validar_exclusividad(TipoStock::ProductoSimple, None, Some(2)).is_err());
        // Ambas a la vez
        assert!(validar_exclusividad(TipoStock::Componente, Some(1), Some(2)).is_err());
        // Ninguna
        assert!(validar_exclusividad(TipoStock::Componente, None, None).is_err());
    }
}
