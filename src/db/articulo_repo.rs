// src/db/articulo_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::{AppError, map_db_error},
    models::articulo::{
        Articulo, ComposicionPack, ComposicionProducto, LineaCoste, LineaPrecioPack,
        ProductoSimple, TipoArticulo,
    },
};

// Tabla base `articulo` + subtipos (producto_simple, producto_compuesto,
// pack) + tablas de composición. La creación de un subtipo son dos
// INSERTs con la misma PK, siempre bajo la transacción del service.
#[derive(Clone)]
pub struct ArticuloRepository {
    pool: PgPool,
}

impl ArticuloRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Articulo (tabla base)
    // ---

    pub async fn listar_articulos(
        &self,
        tipo: Option<TipoArticulo>,
        activo: Option<bool>,
        id_familia: Option<i32>,
    ) -> Result<Vec<Articulo>, AppError> {
        let articulos = sqlx::query_as::<_, Articulo>(
            r#"
            SELECT * FROM articulo
            WHERE ($1::text IS NULL OR tipo = $1)
              AND ($2::boolean IS NULL OR activo = $2)
              AND ($3::integer IS NULL OR id_familia = $3)
            ORDER BY nombre ASC
            "#,
        )
        .bind(tipo.map(|t| t.as_str()))
        .bind(activo)
        .bind(id_familia)
        .fetch_all(&self.pool)
        .await?;
        Ok(articulos)
    }

    pub async fn obtener_articulo(&self, id: i32) -> Result<Option<Articulo>, AppError> {
        let articulo = sqlx::query_as::<_, Articulo>("SELECT * FROM articulo WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(articulo)
    }

    /// Variante con tipo fijado, para los listados de compuestos y packs.
    pub async fn listar_articulos_de_tipo(
        &self,
        tipo: TipoArticulo,
    ) -> Result<Vec<Articulo>, AppError> {
        let articulos = sqlx::query_as::<_, Articulo>(
            "SELECT * FROM articulo WHERE tipo = $1 ORDER BY nombre ASC",
        )
        .bind(tipo.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(articulos)
    }

    pub async fn obtener_articulo_de_tipo(
        &self,
        id: i32,
        tipo: TipoArticulo,
    ) -> Result<Option<Articulo>, AppError> {
        let articulo =
            sqlx::query_as::<_, Articulo>("SELECT * FROM articulo WHERE id = $1 AND tipo = $2")
                .bind(id)
                .bind(tipo.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(articulo)
    }

    pub async fn crear_articulo<'e, E>(
        &self,
        executor: E,
        tipo: TipoArticulo,
        nombre: &str,
        descripcion: Option<&str>,
        codigo_tienda: Option<&str>,
        id_familia: Option<i32>,
        activo: bool,
    ) -> Result<Articulo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Articulo>(
            r#"
            INSERT INTO articulo (tipo, nombre, descripcion, codigo_tienda, id_familia, activo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tipo.as_str())
        .bind(nombre)
        .bind(descripcion)
        .bind(codigo_tienda)
        .bind(id_familia)
        .bind(activo)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn actualizar_articulo<'e, E>(
        &self,
        executor: E,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        codigo_tienda: Option<&str>,
        id_familia: Option<i32>,
        activo: Option<bool>,
    ) -> Result<Option<Articulo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let articulo = sqlx::query_as::<_, Articulo>(
            r#"
            UPDATE articulo
            SET nombre = COALESCE($2, nombre),
                descripcion = COALESCE($3, descripcion),
                codigo_tienda = COALESCE($4, codigo_tienda),
                id_familia = COALESCE($5, id_familia),
                activo = COALESCE($6, activo),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(descripcion)
        .bind(codigo_tienda)
        .bind(id_familia)
        .bind(activo)
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)?;
        Ok(articulo)
    }

    /// Borra la fila base; los subtipos caen por ON DELETE CASCADE.
    /// Si hay stock o composiciones que lo referencian, salta el RESTRICT.
    pub async fn eliminar_articulo<'e, E>(
        &self,
        executor: E,
        id: i32,
        tipo: TipoArticulo,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM articulo WHERE id = $1 AND tipo = $2")
            .bind(id)
            .bind(tipo.as_str())
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn buscar_articulos(&self, texto: &str) -> Result<Vec<Articulo>, AppError> {
        let articulos = sqlx::query_as::<_, Articulo>(
            "SELECT * FROM articulo WHERE nombre ILIKE '%' || $1 || '%' ORDER BY nombre ASC",
        )
        .bind(texto)
        .fetch_all(&self.pool)
        .await?;
        Ok(articulos)
    }

    // ---
    // Producto Simple (articulo JOIN producto_simple)
    // ---

    pub async fn listar_productos_simples(&self) -> Result<Vec<ProductoSimple>, AppError> {
        let productos = sqlx::query_as::<_, ProductoSimple>(
            r#"
            SELECT a.id, a.nombre, a.descripcion, a.codigo_tienda, a.id_familia, a.activo,
                   ps.id_proveedor, ps.id_color, a.created_at, a.updated_at
            FROM articulo a
            JOIN producto_simple ps ON ps.id = a.id
            ORDER BY a.nombre ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(productos)
    }

    pub async fn obtener_producto_simple(
        &self,
        id: i32,
    ) -> Result<Option<ProductoSimple>, AppError> {
        let producto = sqlx::query_as::<_, ProductoSimple>(
            r#"
            SELECT a.id, a.nombre, a.descripcion, a.codigo_tienda, a.id_familia, a.activo,
                   ps.id_proveedor, ps.id_color, a.created_at, a.updated_at
            FROM articulo a
            JOIN producto_simple ps ON ps.id = a.id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(producto)
    }

    pub async fn crear_subtipo_producto_simple<'e, E>(
        &self,
        executor: E,
        id: i32,
        id_proveedor: Option<i32>,
        id_color: Option<i32>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO producto_simple (id, id_proveedor, id_color) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(id_proveedor)
            .bind(id_color)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    pub async fn actualizar_subtipo_producto_simple<'e, E>(
        &self,
        executor: E,
        id: i32,
        id_proveedor: Option<i32>,
        id_color: Option<i32>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE producto_simple
            SET id_proveedor = COALESCE($2, id_proveedor),
                id_color = COALESCE($3, id_color)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(id_proveedor)
        .bind(id_color)
        .execute(executor)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    pub async fn crear_subtipo_producto_compuesto<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO producto_compuesto (id) VALUES ($1)")
            .bind(id)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    pub async fn crear_subtipo_pack<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO pack (id) VALUES ($1)")
            .bind(id)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    // ---
    // Composición de producto compuesto
    // ---

    /// Alta o cambio de cantidad de un componente en la receta (UPSERT).
    pub async fn upsert_composicion_producto<'e, E>(
        &self,
        executor: E,
        id_producto_compuesto: i32,
        id_componente: i32,
        cantidad: i32,
    ) -> Result<ComposicionProducto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ComposicionProducto>(
            r#"
            INSERT INTO composicion_producto (id_producto_compuesto, id_componente, cantidad)
            VALUES ($1, $2, $3)
            ON CONFLICT (id_producto_compuesto, id_componente)
            DO UPDATE SET cantidad = EXCLUDED.cantidad
            RETURNING *
            "#,
        )
        .bind(id_producto_compuesto)
        .bind(id_componente)
        .bind(cantidad)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn listar_composicion_producto(
        &self,
        id_producto_compuesto: i32,
    ) -> Result<Vec<ComposicionProducto>, AppError> {
        let composicion = sqlx::query_as::<_, ComposicionProducto>(
            r#"
            SELECT * FROM composicion_producto
            WHERE id_producto_compuesto = $1
            ORDER BY id_componente ASC
            "#,
        )
        .bind(id_producto_compuesto)
        .fetch_all(&self.pool)
        .await?;
        Ok(composicion)
    }

    pub async fn eliminar_composicion_producto<'e, E>(
        &self,
        executor: E,
        id_producto_compuesto: i32,
        id_componente: i32,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            "DELETE FROM composicion_producto WHERE id_producto_compuesto = $1 AND id_componente = $2",
        )
        .bind(id_producto_compuesto)
        .bind(id_componente)
        .execute(executor)
        .await
        .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }

    /// Líneas de la receta con el precio de compra vigente de cada
    /// componente (NULL si no tiene precio registrado).
    pub async fn lineas_coste_compuesto(
        &self,
        id_producto_compuesto: i32,
    ) -> Result<Vec<LineaCoste>, AppError> {
        let lineas = sqlx::query_as::<_, LineaCoste>(
            r#"
            SELECT cp.id_componente, c.nombre, cp.cantidad, pc.valor AS precio_unitario
            FROM composicion_producto cp
            JOIN componente c ON c.id = cp.id_componente
            LEFT JOIN precio_compra pc
              ON pc.id_componente = cp.id_componente AND pc.fecha_fin IS NULL
            WHERE cp.id_producto_compuesto = $1
            ORDER BY cp.id_componente ASC
            "#,
        )
        .bind(id_producto_compuesto)
        .fetch_all(&self.pool)
        .await?;
        Ok(lineas)
    }

    // ---
    // Composición de pack
    // ---

    pub async fn upsert_composicion_pack<'e, E>(
        &self,
        executor: E,
        id_pack: i32,
        id_producto: i32,
        cantidad: i32,
    ) -> Result<ComposicionPack, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ComposicionPack>(
            r#"
            INSERT INTO composicion_pack (id_pack, id_producto, cantidad)
            VALUES ($1, $2, $3)
            ON CONFLICT (id_pack, id_producto)
            DO UPDATE SET cantidad = EXCLUDED.cantidad
            RETURNING *
            "#,
        )
        .bind(id_pack)
        .bind(id_producto)
        .bind(cantidad)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn listar_composicion_pack(
        &self,
        id_pack: i32,
    ) -> Result<Vec<ComposicionPack>, AppError> {
        let composicion = sqlx::query_as::<_, ComposicionPack>(
            "SELECT * FROM composicion_pack WHERE id_pack = $1 ORDER BY id_producto ASC",
        )
        .bind(id_pack)
        .fetch_all(&self.pool)
        .await?;
        Ok(composicion)
    }

    pub async fn eliminar_composicion_pack<'e, E>(
        &self,
        executor: E,
        id_pack: i32,
        id_producto: i32,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado =
            sqlx::query("DELETE FROM composicion_pack WHERE id_pack = $1 AND id_producto = $2")
                .bind(id_pack)
                .bind(id_producto)
                .execute(executor)
                .await
                .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }

    /// Líneas del pack con el precio de venta vigente de cada producto.
    pub async fn lineas_precio_pack(
        &self,
        id_pack: i32,
    ) -> Result<Vec<LineaPrecioPack>, AppError> {
        let lineas = sqlx::query_as::<_, LineaPrecioPack>(
            r#"
            SELECT cp.id_producto, a.nombre, cp.cantidad, pv.valor AS precio_unitario
            FROM composicion_pack cp
            JOIN articulo a ON a.id = cp.id_producto
            LEFT JOIN precio_venta pv
              ON pv.id_articulo = cp.id_producto AND pv.fecha_fin IS NULL
            WHERE cp.id_pack = $1
            ORDER BY cp.id_producto ASC
            "#,
        )
        .bind(id_pack)
        .fetch_all(&self.pool)
        .await?;
        Ok(lineas)
    }
}
