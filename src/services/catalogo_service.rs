// src/services/catalogo_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::CatalogoRepository,
    models::catalogo::{Color, Componente, Familia, Proveedor},
};

// CRUD del catálogo. Aquí no hay transacciones multi-tabla: cada
// operación es un único statement, así que el repo recibe la pool.
#[derive(Clone)]
pub struct CatalogoService {
    catalogo_repo: CatalogoRepository,
    pool: PgPool,
}

impl CatalogoService {
    pub fn new(catalogo_repo: CatalogoRepository, pool: PgPool) -> Self {
        Self { catalogo_repo, pool }
    }

    // --- Familia ---

    pub async fn listar_familias(&self) -> Result<Vec<Familia>, AppError> {
        self.catalogo_repo.listar_familias().await
    }

    pub async fn obtener_familia(&self, id: i32) -> Result<Familia, AppError> {
        self.catalogo_repo
            .obtener_familia(id)
            .await?
            .ok_or(AppError::NotFound("Familia no encontrada"))
    }

    pub async fn crear_familia(
        &self,
        nombre: &str,
        descripcion: Option<&str>,
    ) -> Result<Familia, AppError> {
        self.catalogo_repo
            .crear_familia(&self.pool, nombre, descripcion)
            .await
    }

    pub async fn actualizar_familia(
        &self,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
    ) -> Result<Familia, AppError> {
        self.catalogo_repo
            .actualizar_familia(&self.pool, id, nombre, descripcion)
            .await?
            .ok_or(AppError::NotFound("Familia no encontrada"))
    }

    pub async fn eliminar_familia(&self, id: i32) -> Result<(), AppError> {
        if !self.catalogo_repo.eliminar_familia(&self.pool, id).await? {
            return Err(AppError::NotFound("Familia no encontrada"));
        }
        Ok(())
    }

    // --- Color ---

    pub async fn listar_colores(&self) -> Result<Vec<Color>, AppError> {
        self.catalogo_repo.listar_colores().await
    }

    pub async fn obtener_color(&self, id: i32) -> Result<Color, AppError> {
        self.catalogo_repo
            .obtener_color(id)
            .await?
            .ok_or(AppError::NotFound("Color no encontrado"))
    }

    pub async fn crear_color(
        &self,
        nombre: &str,
        hex: Option<&str>,
        url_imagen: Option<&str>,
        id_familia: Option<i32>,
    ) -> Result<Color, AppError> {
        self.catalogo_repo
            .crear_color(&self.pool, nombre, hex, url_imagen, id_familia)
            .await
    }

    pub async fn actualizar_color(
        &self,
        id: i32,
        nombre: Option<&str>,
        hex: Option<&str>,
        url_imagen: Option<&str>,
        id_familia: Option<i32>,
    ) -> Result<Color, AppError> {
        self.catalogo_repo
            .actualizar_color(&self.pool, id, nombre, hex, url_imagen, id_familia)
            .await?
            .ok_or(AppError::NotFound("Color no encontrado"))
    }

    pub async fn eliminar_color(&self, id: i32) -> Result<(), AppError> {
        if !self.catalogo_repo.eliminar_color(&self.pool, id).await? {
            return Err(AppError::NotFound("Color no encontrado"));
        }
        Ok(())
    }

    // --- Proveedor ---

    pub async fn listar_proveedores(&self) -> Result<Vec<Proveedor>, AppError> {
        self.catalogo_repo.listar_proveedores().await
    }

    pub async fn obtener_proveedor(&self, id: i32) -> Result<Proveedor, AppError> {
        self.catalogo_repo
            .obtener_proveedor(id)
            .await?
            .ok_or(AppError::NotFound("Proveedor no encontrado"))
    }

    pub async fn crear_proveedor(
        &self,
        nombre: &str,
        telefono: Option<&str>,
        email: Option<&str>,
        direccion: Option<&str>,
        activo: bool,
    ) -> Result<Proveedor, AppError> {
        self.catalogo_repo
            .crear_proveedor(&self.pool, nombre, telefono, email, direccion, activo)
            .await
    }

    pub async fn actualizar_proveedor(
        &self,
        id: i32,
        nombre: Option<&str>,
        telefono: Option<&str>,
        email: Option<&str>,
        direccion: Option<&str>,
        activo: Option<bool>,
    ) -> Result<Proveedor, AppError> {
        self.catalogo_repo
            .actualizar_proveedor(&self.pool, id, nombre, telefono, email, direccion, activo)
            .await?
            .ok_or(AppError::NotFound("Proveedor no encontrado"))
    }

    pub async fn eliminar_proveedor(&self, id: i32) -> Result<(), AppError> {
        if !self.catalogo_repo.eliminar_proveedor(&self.pool, id).await? {
            return Err(AppError::NotFound("Proveedor no encontrado"));
        }
        Ok(())
    }

    // --- Componente ---

    pub async fn listar_componentes(&self) -> Result<Vec<Componente>, AppError> {
        self.catalogo_repo.listar_componentes().await
    }

    pub async fn obtener_componente(&self, id: i32) -> Result<Componente, AppError> {
        self.catalogo_repo
            .obtener_componente(id)
            .await?
            .ok_or(AppError::NotFound("Componente no encontrado"))
    }

    pub async fn crear_componente(
        &self,
        nombre: &str,
        descripcion: Option<&str>,
        id_proveedor: Option<i32>,
        id_color: Option<i32>,
    ) -> Result<Componente, AppError> {
        self.catalogo_repo
            .crear_componente(&self.pool, nombre, descripcion, id_proveedor, id_color)
            .await
    }

    pub async fn actualizar_componente(
        &self,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        id_proveedor: Option<i32>,
        id_color: Option<i32>,
    ) -> Result<Componente, AppError> {
        self.catalogo_repo
            .actualizar_componente(&self.pool, id, nombre, descripcion, id_proveedor, id_color)
            .await?
            .ok_or(AppError::NotFound("Componente no encontrado"))
    }

    pub async fn eliminar_componente(&self, id: i32) -> Result<(), AppError> {
        if !self.catalogo_repo.eliminar_componente(&self.pool, id).await? {
            return Err(AppError::NotFound("Componente no encontrado"));
        }
        Ok(())
    }
}
