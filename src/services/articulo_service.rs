// src/services/articulo_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{ArticuloRepository, StockRepository},
    models::{
        articulo::{
            Articulo, ComposicionPack, ComposicionProducto, CosteCompuesto, LineaCoste,
            LineaPrecioPack, Pack, PrecioPack, ProductoCompuesto, ProductoSimple, TipoArticulo,
        },
        stock::TipoStock,
    },
};

/// Datos para sembrar stock inicial al crear un producto simple.
pub struct StockInicial {
    pub cantidad: i32,
    pub cantidad_minima: i32,
    pub ubicacion: Option<String>,
}

// Artículos vendibles: productos simples, compuestos y packs. La
// creación de cualquier subtipo son dos INSERTs (fila base + subtipo)
// en una transacción, para no dejar artículos huérfanos.
#[derive(Clone)]
pub struct ArticuloService {
    articulo_repo: ArticuloRepository,
    stock_repo: StockRepository,
    pool: PgPool,
}

impl ArticuloService {
    pub fn new(
        articulo_repo: ArticuloRepository,
        stock_repo: StockRepository,
        pool: PgPool,
    ) -> Self {
        Self { articulo_repo, stock_repo, pool }
    }

    // ---
    // Articulo (vista de catálogo, solo lectura)
    // ---

    pub async fn listar_articulos(
        &self,
        tipo: Option<TipoArticulo>,
        activo: Option<bool>,
        id_familia: Option<i32>,
    ) -> Result<Vec<Articulo>, AppError> {
        self.articulo_repo.listar_articulos(tipo, activo, id_familia).await
    }

    pub async fn obtener_articulo(&self, id: i32) -> Result<Articulo, AppError> {
        self.articulo_repo
            .obtener_articulo(id)
            .await?
            .ok_or(AppError::NotFound("Artículo no encontrado"))
    }

    // ---
    // Producto Simple
    // ---

    pub async fn listar_productos_simples(&self) -> Result<Vec<ProductoSimple>, AppError> {
        self.articulo_repo.listar_productos_simples().await
    }

    pub async fn obtener_producto_simple(&self, id: i32) -> Result<ProductoSimple, AppError> {
        self.articulo_repo
            .obtener_producto_simple(id)
            .await?
            .ok_or(AppError::NotFound("Producto simple no encontrado"))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn crear_producto_simple(
        &self,
        nombre: &str,
        descripcion: Option<&str>,
        codigo_tienda: Option<&str>,
        id_familia: Option<i32>,
        activo: bool,
        id_proveedor: Option<i32>,
        id_color: Option<i32>,
        stock_inicial: Option<StockInicial>,
    ) -> Result<ProductoSimple, AppError> {
        let mut tx = self.pool.begin().await?;

        let articulo = self
            .articulo_repo
            .crear_articulo(
                &mut *tx,
                TipoArticulo::Simple,
                nombre,
                descripcion,
                codigo_tienda,
                id_familia,
                activo,
            )
            .await?;

        self.articulo_repo
            .crear_subtipo_producto_simple(&mut *tx, articulo.id, id_proveedor, id_color)
            .await?;

        if let Some(stock) = stock_inicial {
            self.stock_repo
                .crear_stock(
                    &mut *tx,
                    TipoStock::ProductoSimple,
                    Some(articulo.id),
                    None,
                    stock.cantidad,
                    stock.cantidad_minima,
                    stock.ubicacion.as_deref(),
                )
                .await?;
        }

        tx.commit().await?;

        Ok(ProductoSimple {
            id: articulo.id,
            nombre: articulo.nombre,
            descripcion: articulo.descripcion,
            codigo_tienda: articulo.codigo_tienda,
            id_familia: articulo.id_familia,
            activo: articulo.activo,
            id_proveedor,
            id_color,
            created_at: articulo.created_at,
            updated_at: articulo.updated_at,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn actualizar_producto_simple(
        &self,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        codigo_tienda: Option<&str>,
        id_familia: Option<i32>,
        activo: Option<bool>,
        id_proveedor: Option<i32>,
        id_color: Option<i32>,
    ) -> Result<ProductoSimple, AppError> {
        // Verifica el subtipo antes de tocar la fila base.
        self.obtener_producto_simple(id).await?;

        let mut tx = self.pool.begin().await?;
        self.articulo_repo
            .actualizar_articulo(&mut *tx, id, nombre, descripcion, codigo_tienda, id_familia, activo)
            .await?;
        self.articulo_repo
            .actualizar_subtipo_producto_simple(&mut *tx, id, id_proveedor, id_color)
            .await?;
        tx.commit().await?;

        self.obtener_producto_simple(id).await
    }

    pub async fn eliminar_producto_simple(&self, id: i32) -> Result<(), AppError> {
        if !self
            .articulo_repo
            .eliminar_articulo(&self.pool, id, TipoArticulo::Simple)
            .await?
        {
            return Err(AppError::NotFound("Producto simple no encontrado"));
        }
        Ok(())
    }

    // ---
    // Producto Compuesto
    // ---

    pub async fn listar_productos_compuestos(&self) -> Result<Vec<ProductoCompuesto>, AppError> {
        self.articulo_repo
            .listar_articulos_de_tipo(TipoArticulo::Compuesto)
            .await
    }

    pub async fn obtener_producto_compuesto(&self, id: i32) -> Result<ProductoCompuesto, AppError> {
        self.articulo_repo
            .obtener_articulo_de_tipo(id, TipoArticulo::Compuesto)
            .await?
            .ok_or(AppError::NotFound("Producto compuesto no encontrado"))
    }

    pub async fn crear_producto_compuesto(
        &self,
        nombre: &str,
        descripcion: Option<&str>,
        codigo_tienda: Option<&str>,
        id_familia: Option<i32>,
        activo: bool,
        componentes: &[(i32, i32)], // (id_componente, cantidad)
    ) -> Result<ProductoCompuesto, AppError> {
        let mut tx = self.pool.begin().await?;

        let articulo = self
            .articulo_repo
            .crear_articulo(
                &mut *tx,
                TipoArticulo::Compuesto,
                nombre,
                descripcion,
                codigo_tienda,
                id_familia,
                activo,
            )
            .await?;

        self.articulo_repo
            .crear_subtipo_producto_compuesto(&mut *tx, articulo.id)
            .await?;

        for (id_componente, cantidad) in componentes {
            self.articulo_repo
                .upsert_composicion_producto(&mut *tx, articulo.id, *id_componente, *cantidad)
                .await?;
        }

        tx.commit().await?;
        Ok(articulo)
    }

    pub async fn actualizar_producto_compuesto(
        &self,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        codigo_tienda: Option<&str>,
        id_familia: Option<i32>,
        activo: Option<bool>,
    ) -> Result<ProductoCompuesto, AppError> {
        self.obtener_producto_compuesto(id).await?;
        self.articulo_repo
            .actualizar_articulo(&self.pool, id, nombre, descripcion, codigo_tienda, id_familia, activo)
            .await?
            .ok_or(AppError::NotFound("Producto compuesto no encontrado"))
    }

    pub async fn eliminar_producto_compuesto(&self, id: i32) -> Result<(), AppError> {
        if !self
            .articulo_repo
            .eliminar_articulo(&self.pool, id, TipoArticulo::Compuesto)
            .await?
        {
            return Err(AppError::NotFound("Producto compuesto no encontrado"));
        }
        Ok(())
    }

    pub async fn agregar_componente(
        &self,
        id_producto_compuesto: i32,
        id_componente: i32,
        cantidad: i32,
    ) -> Result<ComposicionProducto, AppError> {
        self.obtener_producto_compuesto(id_producto_compuesto).await?;
        self.articulo_repo
            .upsert_composicion_producto(&self.pool, id_producto_compuesto, id_componente, cantidad)
            .await
    }

    pub async fn listar_componentes_de_compuesto(
        &self,
        id_producto_compuesto: i32,
    ) -> Result<Vec<ComposicionProducto>, AppError> {
        self.obtener_producto_compuesto(id_producto_compuesto).await?;
        self.articulo_repo
            .listar_composicion_producto(id_producto_compuesto)
            .await
    }

    pub async fn quitar_componente(
        &self,
        id_producto_compuesto: i32,
        id_componente: i32,
    ) -> Result<(), AppError> {
        if !self
            .articulo_repo
            .eliminar_composicion_producto(&self.pool, id_producto_compuesto, id_componente)
            .await?
        {
            return Err(AppError::NotFound("Línea de composición no encontrada"));
        }
        Ok(())
    }

    /// Coste derivado del compuesto: Σ precio de compra vigente del
    /// componente × cantidad. Los componentes sin precio vigente quedan
    /// fuera de la suma y se reportan aparte.
    pub async fn coste_producto_compuesto(&self, id: i32) -> Result<CosteCompuesto, AppError> {
        self.obtener_producto_compuesto(id).await?;
        let lineas = self.articulo_repo.lineas_coste_compuesto(id).await?;
        let (coste_total, sin_precio) = sumar_coste(&lineas);
        Ok(CosteCompuesto { id_producto_compuesto: id, coste_total, lineas, sin_precio })
    }

    // ---
    // Pack
    // ---

    pub async fn listar_packs(&self) -> Result<Vec<Pack>, AppError> {
        self.articulo_repo.listar_articulos_de_tipo(TipoArticulo::Pack).await
    }

    pub async fn obtener_pack(&self, id: i32) -> Result<Pack, AppError> {
        self.articulo_repo
            .obtener_articulo_de_tipo(id, TipoArticulo::Pack)
            .await?
            .ok_or(AppError::NotFound("Pack no encontrado"))
    }

    pub async fn crear_pack(
        &self,
        nombre: &str,
        descripcion: Option<&str>,
        codigo_tienda: Option<&str>,
        id_familia: Option<i32>,
        activo: bool,
    ) -> Result<Pack, AppError> {
        let mut tx = self.pool.begin().await?;
        let articulo = self
            .articulo_repo
            .crear_articulo(
                &mut *tx,
                TipoArticulo::Pack,
                nombre,
                descripcion,
                codigo_tienda,
                id_familia,
                activo,
            )
            .await?;
        self.articulo_repo.crear_subtipo_pack(&mut *tx, articulo.id).await?;
        tx.commit().await?;
        Ok(articulo)
    }

    pub async fn actualizar_pack(
        &self,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
        codigo_tienda: Option<&str>,
        id_familia: Option<i32>,
        activo: Option<bool>,
    ) -> Result<Pack, AppError> {
        self.obtener_pack(id).await?;
        self.articulo_repo
            .actualizar_articulo(&self.pool, id, nombre, descripcion, codigo_tienda, id_familia, activo)
            .await?
            .ok_or(AppError::NotFound("Pack no encontrado"))
    }

    pub async fn eliminar_pack(&self, id: i32) -> Result<(), AppError> {
        if !self
            .articulo_repo
            .eliminar_articulo(&self.pool, id, TipoArticulo::Pack)
            .await?
        {
            return Err(AppError::NotFound("Pack no encontrado"));
        }
        Ok(())
    }

    pub async fn agregar_producto_a_pack(
        &self,
        id_pack: i32,
        id_producto: i32,
        cantidad: i32,
    ) -> Result<ComposicionPack, AppError> {
        self.obtener_pack(id_pack).await?;

        // Un pack solo agrupa productos vendibles, nunca otros packs.
        let producto = self.obtener_articulo(id_producto).await?;
        if producto.tipo == TipoArticulo::Pack {
            return Err(AppError::BadRequest(
                "un pack no puede contener otros packs".to_string(),
            ));
        }

        self.articulo_repo
            .upsert_composicion_pack(&self.pool, id_pack, id_producto, cantidad)
            .await
    }

    pub async fn listar_productos_de_pack(
        &self,
        id_pack: i32,
    ) -> Result<Vec<ComposicionPack>, AppError> {
        self.obtener_pack(id_pack).await?;
        self.articulo_repo.listar_composicion_pack(id_pack).await
    }

    pub async fn quitar_producto_de_pack(
        &self,
        id_pack: i32,
        id_producto: i32,
    ) -> Result<(), AppError> {
        if !self
            .articulo_repo
            .eliminar_composicion_pack(&self.pool, id_pack, id_producto)
            .await?
        {
            return Err(AppError::NotFound("Línea de composición no encontrada"));
        }
        Ok(())
    }

    /// Precio derivado del pack: Σ precio de venta vigente × cantidad.
    pub async fn precio_pack(&self, id: i32) -> Result<PrecioPack, AppError> {
        self.obtener_pack(id).await?;
        let lineas = self.articulo_repo.lineas_precio_pack(id).await?;
        let (precio_total, sin_precio) = sumar_precio_pack(&lineas);
        Ok(PrecioPack { id_pack: id, precio_total, lineas, sin_precio })
    }
}

// ---
// Aritmética de los desgloses (pura, testeable sin base de datos)
// ---

fn sumar_coste(lineas: &[LineaCoste]) -> (Decimal, Vec<i32>) {
    let mut total = Decimal::ZERO;
    let mut sin_precio = Vec::new();
    for linea in lineas {
        match linea.precio_unitario {
            Some(precio) => total += precio * Decimal::from(linea.cantidad),
            None => sin_precio.push(linea.id_componente),
        }
    }
    (total, sin_precio)
}

fn sumar_precio_pack(lineas: &[LineaPrecioPack]) -> (Decimal, Vec<i32>) {
    let mut total = Decimal::ZERO;
    let mut sin_precio = Vec::new();
    for linea in lineas {
        match linea.precio_unitario {
            Some(precio) => total += precio * Decimal::from(linea.cantidad),
            None => sin_precio.push(linea.id_producto),
        }
    }
    (total, sin_precio)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Decimal::new(valor, escala): 1050/2 = 10.50
    fn d(valor: i64, escala: u32) -> Decimal {
        Decimal::new(valor, escala)
    }

    fn linea(id: i32, cantidad: i32, precio: Option<Decimal>) -> LineaCoste {
        LineaCoste {
            id_componente: id,
            nombre: format!("componente {id}"),
            cantidad,
            precio_unitario: precio,
        }
    }

    #[test]
    fn coste_suma_precio_por_cantidad() {
        let lineas = vec![
            linea(1, 2, Some(d(1050, 2))),
            linea(2, 3, Some(d(125, 2))),
        ];
        let (total, sin_precio) = sumar_coste(&lineas);
        assert_eq!(total, d(2475, 2));
        assert!(sin_precio.is_empty());
    }

    #[test]
    fn componentes_sin_precio_quedan_fuera_de_la_suma() {
        let lineas = vec![
            linea(1, 2, Some(d(400, 2))),
            linea(2, 5, None),
            linea(3, 1, None),
        ];
        let (total, sin_precio) = sumar_coste(&lineas);
        assert_eq!(total, d(800, 2));
        assert_eq!(sin_precio, vec![2, 3]);
    }

    #[test]
    fn receta_vacia_cuesta_cero() {
        let (total, sin_precio) = sumar_coste(&[]);
        assert_eq!(total, Decimal::ZERO);
        assert!(sin_precio.is_empty());
    }

    #[test]
    fn precio_de_pack_suma_las_lineas_con_precio() {
        let lineas = vec![
            LineaPrecioPack {
                id_producto: 10,
                nombre: "mesa".into(),
                cantidad: 1,
                precio_unitario: Some(d(9999, 2)),
            },
            LineaPrecioPack {
                id_producto: 11,
                nombre: "silla".into(),
                cantidad: 4,
                precio_unitario: Some(d(2500, 2)),
            },
            LineaPrecioPack {
                id_producto: 12,
                nombre: "lámpara".into(),
                cantidad: 2,
                precio_unitario: None,
            },
        ];
        let (total, sin_precio) = sumar_precio_pack(&lineas);
        assert_eq!(total, d(19999, 2));
        assert_eq!(sin_precio, vec![12]);
    }
}
