// src/db/stock_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::{AppError, map_db_error},
    models::stock::{Movimiento, Stock, TipoMovimiento, TipoStock},
};

// Stock y su libro de movimientos. La aplicación de un movimiento
// (leer saldo + insertar asiento + actualizar cantidad) siempre corre
// dentro de la transacción del service, de ahí los executors genéricos.
#[derive(Clone)]
pub struct StockRepository {
    pool: PgPool,
}

impl StockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
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
        let stocks = sqlx::query_as::<_, Stock>(
            r#"
            SELECT * FROM stock
            WHERE ($1::text IS NULL OR tipo = $1)
              AND ($2::text IS NULL OR ubicacion = $2)
              AND (NOT $3 OR cantidad < cantidad_minima)
            ORDER BY id ASC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(tipo.map(|t| t.as_str()))
        .bind(ubicacion)
        .bind(bajo_stock)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(stocks)
    }

    pub async fn obtener_stock(&self, id: i32) -> Result<Option<Stock>, AppError> {
        let stock = sqlx::query_as::<_, Stock>("SELECT * FROM stock WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stock)
    }

    pub async fn obtener_stock_por_producto_simple(
        &self,
        id_producto_simple: i32,
    ) -> Result<Option<Stock>, AppError> {
        let stock =
            sqlx::query_as::<_, Stock>("SELECT * FROM stock WHERE id_producto_simple = $1")
                .bind(id_producto_simple)
                .fetch_optional(&self.pool)
                .await?;
        Ok(stock)
    }

    pub async fn obtener_stock_por_componente(
        &self,
        id_componente: i32,
    ) -> Result<Option<Stock>, AppError> {
        let stock = sqlx::query_as::<_, Stock>("SELECT * FROM stock WHERE id_componente = $1")
            .bind(id_componente)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stock)
    }

    /// Lectura con FOR UPDATE: bloquea la fila mientras se aplica un
    /// movimiento para que dos salidas no consuman el mismo saldo.
    pub async fn obtener_stock_para_actualizar<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Stock>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, Stock>("SELECT * FROM stock WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(stock)
    }

    pub async fn crear_stock<'e, E>(
        &self,
        executor: E,
        tipo: TipoStock,
        id_producto_simple: Option<i32>,
        id_componente: Option<i32>,
        cantidad: i32,
        cantidad_minima: i32,
        ubicacion: Option<&str>,
    ) -> Result<Stock, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stock (tipo, id_producto_simple, id_componente, cantidad, cantidad_minima, ubicacion)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tipo.as_str())
        .bind(id_producto_simple)
        .bind(id_componente)
        .bind(cantidad)
        .bind(cantidad_minima)
        .bind(ubicacion)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn actualizar_stock<'e, E>(
        &self,
        executor: E,
        id: i32,
        cantidad: Option<i32>,
        cantidad_minima: Option<i32>,
        ubicacion: Option<&str>,
    ) -> Result<Option<Stock>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            UPDATE stock
            SET cantidad = COALESCE($2, cantidad),
                cantidad_minima = COALESCE($3, cantidad_minima),
                ubicacion = COALESCE($4, ubicacion),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(cantidad)
        .bind(cantidad_minima)
        .bind(ubicacion)
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)?;
        Ok(stock)
    }

    /// Suma (o resta) un delta a la cantidad. El CHECK `cantidad >= 0`
    /// es la última línea de defensa; el service valida antes.
    pub async fn aplicar_delta_cantidad<'e, E>(
        &self,
        executor: E,
        id: i32,
        delta: i32,
    ) -> Result<Stock, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Stock>(
            r#"
            UPDATE stock
            SET cantidad = cantidad + $2,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn eliminar_stock<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM stock WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn listar_alertas(&self) -> Result<Vec<Stock>, AppError> {
        let stocks = sqlx::query_as::<_, Stock>(
            "SELECT * FROM stock WHERE cantidad < cantidad_minima ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stocks)
    }

    pub async fn contar_alertas(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stock WHERE cantidad < cantidad_minima",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn total_unidades(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(cantidad), 0)::bigint FROM stock",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
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
        let movimientos = sqlx::query_as::<_, Movimiento>(
            r#"
            SELECT * FROM movimiento
            WHERE ($1::text IS NULL OR tipo = $1)
              AND ($2::integer IS NULL OR id_stock = $2)
            ORDER BY created_at DESC, id DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(tipo.map(|t| t.as_str()))
        .bind(id_stock)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(movimientos)
    }

    pub async fn registrar_movimiento<'e, E>(
        &self,
        executor: E,
        tipo: TipoMovimiento,
        cantidad: i32,
        id_stock: i32,
        descripcion: Option<&str>,
    ) -> Result<Movimiento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Movimiento>(
            r#"
            INSERT INTO movimiento (tipo, cantidad, id_stock, descripcion)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tipo.as_str())
        .bind(cantidad)
        .bind(id_stock)
        .bind(descripcion)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    /// Borra un asiento del libro sin tocar la cantidad (corrección de
    /// auditoría, no un movimiento inverso).
    pub async fn eliminar_movimiento<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM movimiento WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }
}
