// src/db/precio_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::{AppError, map_db_error},
    models::{
        precio::{PrecioCompra, PrecioVenta},
        stock::TipoStock,
    },
};

// Históricos de precios. El cierre del precio vigente anterior y el alta
// del nuevo forman una sola transacción (service).
#[derive(Clone)]
pub struct PrecioRepository {
    pool: PgPool,
}

impl PrecioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Precio de compra
    // ---

    pub async fn listar_precios_compra(
        &self,
        vigente: Option<bool>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<PrecioCompra>, AppError> {
        let precios = sqlx::query_as::<_, PrecioCompra>(
            r#"
            SELECT * FROM precio_compra
            WHERE ($1::boolean IS NULL OR ($1 AND fecha_fin IS NULL) OR (NOT $1 AND fecha_fin IS NOT NULL))
            ORDER BY fecha_inicio DESC, id DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(vigente)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(precios)
    }

    pub async fn obtener_precio_compra(&self, id: i32) -> Result<Option<PrecioCompra>, AppError> {
        let precio = sqlx::query_as::<_, PrecioCompra>("SELECT * FROM precio_compra WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(precio)
    }

    /// Cierra el precio de compra vigente del mismo objetivo, si existe.
    pub async fn cerrar_precio_compra_vigente<'e, E>(
        &self,
        executor: E,
        id_producto_simple: Option<i32>,
        id_componente: Option<i32>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE precio_compra
            SET fecha_fin = now(), updated_at = now()
            WHERE fecha_fin IS NULL
              AND (($1::integer IS NOT NULL AND id_producto_simple = $1)
                OR ($2::integer IS NOT NULL AND id_componente = $2))
            "#,
        )
        .bind(id_producto_simple)
        .bind(id_componente)
        .execute(executor)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    pub async fn crear_precio_compra<'e, E>(
        &self,
        executor: E,
        tipo: TipoStock,
        id_producto_simple: Option<i32>,
        id_componente: Option<i32>,
        valor: Decimal,
        moneda: &str,
    ) -> Result<PrecioCompra, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PrecioCompra>(
            r#"
            INSERT INTO precio_compra (tipo, id_producto_simple, id_componente, valor, moneda)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tipo.as_str())
        .bind(id_producto_simple)
        .bind(id_componente)
        .bind(valor)
        .bind(moneda)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    // ---
    // Precio de venta
    // ---

    pub async fn listar_precios_venta(
        &self,
        vigente: Option<bool>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<PrecioVenta>, AppError> {
        let precios = sqlx::query_as::<_, PrecioVenta>(
            r#"
            SELECT * FROM precio_venta
            WHERE ($1::boolean IS NULL OR ($1 AND fecha_fin IS NULL) OR (NOT $1 AND fecha_fin IS NOT NULL))
            ORDER BY fecha_inicio DESC, id DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(vigente)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(precios)
    }

    pub async fn obtener_precio_venta(&self, id: i32) -> Result<Option<PrecioVenta>, AppError> {
        let precio = sqlx::query_as::<_, PrecioVenta>("SELECT * FROM precio_venta WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(precio)
    }

    pub async fn cerrar_precio_venta_vigente<'e, E>(
        &self,
        executor: E,
        id_articulo: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE precio_venta
            SET fecha_fin = now(), updated_at = now()
            WHERE fecha_fin IS NULL AND id_articulo = $1
            "#,
        )
        .bind(id_articulo)
        .execute(executor)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    pub async fn crear_precio_venta<'e, E>(
        &self,
        executor: E,
        id_articulo: i32,
        valor: Decimal,
        moneda: &str,
    ) -> Result<PrecioVenta, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PrecioVenta>(
            r#"
            INSERT INTO precio_venta (id_articulo, valor, moneda)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(id_articulo)
        .bind(valor)
        .bind(moneda)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }
}
