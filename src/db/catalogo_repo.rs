// src/db/catalogo_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::{AppError, map_db_error},
    models::catalogo::{Color, Componente, Familia, Proveedor},
};

// Entidades de catálogo: familia, color, proveedor y componente.
// CRUD plano; las escrituras aceptan un executor genérico para poder
// componerse dentro de una transacción.
#[derive(Clone)]
pub struct CatalogoRepository {
    pool: PgPool,
}

impl CatalogoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Familia
    // ---

    pub async fn listar_familias(&self) -> Result<Vec<Familia>, AppError> {
        let familias =
            sqlx::query_as::<_, Familia>("SELECT * FROM familia ORDER BY nombre ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(familias)
    }

    pub async fn obtener_familia(&self, id: i32) -> Result<Option<Familia>, AppError> {
        let familia = sqlx::query_as::<_, Familia>("SELECT * FROM familia WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(familia)
    }

    pub async fn crear_familia<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        descripcion: Option<&str>,
    ) -> Result<Familia, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Familia>(
            r#"
            INSERT INTO familia (nombre, descripcion)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(descripcion)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn actualizar_familia<'e, E>(
        &self,
        executor: E,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
    ) -> Result<Option<Familia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let familia = sqlx::query_as::<_, Familia>(
            r#"
            UPDATE familia
            SET nombre = COALESCE($2, nombre),
                descripcion = COALESCE($3, descripcion)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(descripcion)
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)?;
        Ok(familia)
    }

    pub async fn eliminar_familia<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM familia WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn buscar_familias(&self, texto: &str) -> Result<Vec<Familia>, AppError> {
        let familias = sqlx::query_as::<_, Familia>(
            "SELECT * FROM familia WHERE nombre ILIKE '%' || $1 || '%' ORDER BY nombre ASC",
        )
        .bind(texto)
        .fetch_all(&self.pool)
        .await?;
        Ok(familias)
    }

    // ---
    // Color
    // ---

    pub async fn listar_colores(&self) -> Result<Vec<Color>, AppError> {
        let colores = sqlx::query_as::<_, Color>("SELECT * FROM color ORDER BY nombre ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(colores)
    }

    pub async fn obtener_color(&self, id: i32) -> Result<Option<Color>, AppError> {
        let color = sqlx::query_as::<_, Color>("SELECT * FROM color WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(color)
    }

    pub async fn crear_color<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        hex: Option<&str>,
        url_imagen: Option<&str>,
        id_familia: Option<i32>,
    ) -> Result<Color, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Color>(
            r#"
            INSERT INTO color (nombre, hex, url_imagen, id_familia)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(hex)
        .bind(url_imagen)
        .bind(id_familia)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn actualizar_color<'e, E>(
        &self,
        executor: E,
        id: i32,
        nombre: Option<&str>,
        hex: Option<&str>,
        url_imagen: Option<&str>,
        id_familia: Option<i32>,
    ) -> Result<Option<Color>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let color = sqlx::query_as::<_, Color>(
            r#"
            UPDATE color
            SET nombre = COALESCE($2, nombre),
                hex = COALESCE($3, hex),
                url_imagen = COALESCE($4, url_imagen),
                id_familia = COALESCE($5, id_familia)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(hex)
        .bind(url_imagen)
        .bind(id_familia)
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)?;
        Ok(color)
    }

    pub async fn eliminar_color<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM color WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn buscar_colores(&self, texto: &str) -> Result<Vec<Color>, AppError> {
        let colores = sqlx::query_as::<_, Color>(
            "SELECT * FROM color WHERE nombre ILIKE '%' || $1 || '%' ORDER BY nombre ASC",
        )
        .bind(texto)
        .fetch_all(&self.pool)
        .await?;
        Ok(colores)
    }

    // ---
    // Proveedor
    // ---

    pub async fn listar_proveedores(&self) -> Result<Vec<Proveedor>, AppError> {
        let proveedores =
            sqlx::query_as::<_, Proveedor>("SELECT * FROM proveedor ORDER BY nombre ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(proveedores)
    }

    pub async fn obtener_proveedor(&self, id: i32) -> Result<Option<Proveedor>, AppError> {
        let proveedor = sqlx::query_as::<_, Proveedor>("SELECT * FROM proveedor WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(proveedor)
    }

    pub async fn crear_proveedor<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        telefono: Option<&str>,
        email: Option<&str>,
        direccion: Option<&str>,
        activo: bool,
    ) -> Result<Proveedor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Proveedor>(
            r#"
            INSERT INTO proveedor (nombre, telefono, email, direccion, activo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(telefono)
        .bind(email)
        .bind(direccion)
        .bind(activo)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn actualizar_proveedor<'e, E>(
        &self,
        executor: E,
        id: i32,
        nombre: Option<&str>,
        telefono: Option<&str>,
        email: Option<&str>,
        direccion: Option<&str>,
        activo: Option<bool>,
    ) -> Result<Option<Proveedor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proveedor = sqlx::query_as::<_, Proveedor>(
            r#"
            UPDATE proveedor
            SET nombre = COALESCE($2, nombre),
                telefono = COALESCE($3, telefono),
                email = COALESCE($4, email),
                direccion = COALESCE($5, direccion),
                activo = COALESCE($6, activo)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(telefono)
        .bind(email)
        .bind(direccion)
        .bind(activo)
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)?;
        Ok(proveedor)
    }

    pub async fn eliminar_proveedor<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM proveedor WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn buscar_proveedores(&self, texto: &str) -> Result<Vec<Proveedor>, AppError> {
        let proveedores = sqlx::query_as::<_, Proveedor>(
            "SELECT * FROM proveedor WHERE nombre ILIKE '%' || $1 || '%' ORDER BY nombre ASC",
        )
        .bind(texto)
        .fetch_all(&self.pool)
        .await?;
        Ok(proveedores)
    }

    // ---
    // Componente
    // ---

    pub async fn listar_componentes(&self) -> Result<Vec<Componente>, AppError> {
        let componentes =
            sqlx::query_as::<_, Componente>("SELECT * FROM componente ORDER BY nombre ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(componentes)
    }

    pub async fn obtener_componente(&self, id: i32) -> Result<Option<Componente>, AppError> {
        let componente =
            sqlx::query_as::<_, Componente>("SELECT * FROM componente WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(componente)
    }

    pub async fn crear_componente<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        descripcion: Option<&str>,
        id_proveedor: Option<i32>,
        id_color: Option<i32>,
    ) -> Result<Componente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Componente>(
            r#"
            INSERT INTO componente (nombre, descripcion, id_proveedor, id_color)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(descripcion)
        .bind(id_proveedor)
        .bind(id_color)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }

    pub async fn actualizar_componente<'e, E>(
        &self,
        executor: E,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        id_proveedor: Option<i32>,
        id_color: Option<i32>,
    ) -> Result<Option<Componente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let componente = sqlx::query_as::<_, Componente>(
            r#"
            UPDATE componente
            SET nombre = COALESCE($2, nombre),
                descripcion = COALESCE($3, descripcion),
                id_proveedor = COALESCE($4, id_proveedor),
                id_color = COALESCE($5, id_color),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(descripcion)
        .bind(id_proveedor)
        .bind(id_color)
        .fetch_optional(executor)
        .await
        .map_err(map_db_error)?;
        Ok(componente)
    }

    pub async fn eliminar_componente<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM componente WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(map_db_error)?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn buscar_componentes(&self, texto: &str) -> Result<Vec<Componente>, AppError> {
        let componentes = sqlx::query_as::<_, Componente>(
            "SELECT * FROM componente WHERE nombre ILIKE '%' || $1 || '%' ORDER BY nombre ASC",
        )
        .bind(texto)
        .fetch_all(&self.pool)
        .await?;
        Ok(componentes)
    }
}
