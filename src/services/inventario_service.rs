// src/services/inventario_service.rs

use crate::{
    common::error::AppError,
    db::{ArticuloRepository, CatalogoRepository, InventarioRepository, StockRepository},
    models::inventario::{DashboardInventario, ResultadoBusqueda},
};

// Coordinador transversal: dashboard del inventario y búsqueda global.
// Usa los repos de los demás dominios en lugar de duplicar SQL.
#[derive(Clone)]
pub struct InventarioService {
    inventario_repo: InventarioRepository,
    catalogo_repo: CatalogoRepository,
    articulo_repo: ArticuloRepository,
    stock_repo: StockRepository,
}

impl InventarioService {
    pub fn new(
        inventario_repo: InventarioRepository,
        catalogo_repo: CatalogoRepository,
        articulo_repo: ArticuloRepository,
        stock_repo: StockRepository,
    ) -> Self {
        Self { inventario_repo, catalogo_repo, articulo_repo, stock_repo }
    }

    pub async fn dashboard(&self) -> Result<DashboardInventario, AppError> {
        Ok(DashboardInventario {
            total_familias: self.inventario_repo.contar_tabla("familia").await?,
            total_colores: self.inventario_repo.contar_tabla("color").await?,
            total_proveedores: self.inventario_repo.contar_tabla("proveedor").await?,
            total_componentes: self.inventario_repo.contar_tabla("componente").await?,
            total_articulos: self.inventario_repo.contar_tabla("articulo").await?,
            productos_simples: self.inventario_repo.contar_articulos_por_tipo("simple").await?,
            productos_compuestos: self
                .inventario_repo
                .contar_articulos_por_tipo("compuesto")
                .await?,
            packs: self.inventario_repo.contar_articulos_por_tipo("pack").await?,
            unidades_en_stock: self.stock_repo.total_unidades().await?,
            alertas_reposicion: self.stock_repo.contar_alertas().await?,
        })
    }

    pub async fn buscar(&self, texto: &str) -> Result<ResultadoBusqueda, AppError> {
        Ok(ResultadoBusqueda {
            familias: self.catalogo_repo.buscar_familias(texto).await?,
            colores: self.catalogo_repo.buscar_colores(texto).await?,
            proveedores: self.catalogo_repo.buscar_proveedores(texto).await?,
            articulos: self.articulo_repo.buscar_articulos(texto).await?,
            componentes: self.catalogo_repo.buscar_componentes(texto).await?,
        })
    }
}
