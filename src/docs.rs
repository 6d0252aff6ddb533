// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Sistema ---
        handlers::inventario::raiz,
        handlers::inventario::health,

        // --- Catálogo ---
        handlers::catalogo::listar_familias,
        handlers::catalogo::obtener_familia,
        handlers::catalogo::crear_familia,
        handlers::catalogo::actualizar_familia,
        handlers::catalogo::eliminar_familia,
        handlers::catalogo::listar_colores,
        handlers::catalogo::obtener_color,
        handlers::catalogo::crear_color,
        handlers::catalogo::actualizar_color,
        handlers::catalogo::eliminar_color,
        handlers::catalogo::listar_proveedores,
        handlers::catalogo::obtener_proveedor,
        handlers::catalogo::crear_proveedor,
        handlers::catalogo::actualizar_proveedor,
        handlers::catalogo::eliminar_proveedor,
        handlers::catalogo::listar_componentes,
        handlers::catalogo::obtener_componente,
        handlers::catalogo::crear_componente,
        handlers::catalogo::actualizar_componente,
        handlers::catalogo::eliminar_componente,

        // --- Artículos ---
        handlers::articulos::listar_articulos,
        handlers::articulos::obtener_articulo,
        handlers::articulos::listar_productos_simples,
        handlers::articulos::obtener_producto_simple,
        handlers::articulos::crear_producto_simple,
        handlers::articulos::actualizar_producto_simple,
        handlers::articulos::eliminar_producto_simple,
        handlers::articulos::listar_productos_compuestos,
        handlers::articulos::obtener_producto_compuesto,
        handlers::articulos::crear_producto_compuesto,
        handlers::articulos::actualizar_producto_compuesto,
        handlers::articulos::eliminar_producto_compuesto,
        handlers::articulos::agregar_componente,
        handlers::articulos::listar_componentes_de_compuesto,
        handlers::articulos::quitar_componente,
        handlers::articulos::coste_producto_compuesto,
        handlers::articulos::listar_packs,
        handlers::articulos::obtener_pack,
        handlers::articulos::crear_pack,
        handlers::articulos::actualizar_pack,
        handlers::articulos::eliminar_pack,
        handlers::articulos::agregar_producto_a_pack,
        handlers::articulos::listar_productos_de_pack,
        handlers::articulos::quitar_producto_de_pack,
        handlers::articulos::precio_pack,

        // --- Stock y movimientos ---
        handlers::stock::listar_stock,
        handlers::stock::listar_alertas,
        handlers::stock::obtener_stock,
        handlers::stock::obtener_stock_por_producto_simple,
        handlers::stock::obtener_stock_por_componente,
        handlers::stock::crear_stock,
        handlers::stock::actualizar_stock,
        handlers::stock::eliminar_stock,
        handlers::stock::listar_movimientos,
        handlers::stock::crear_movimiento,
        handlers::stock::eliminar_movimiento,

        // --- Precios ---
        handlers::precios::listar_precios_compra,
        handlers::precios::obtener_precio_compra,
        handlers::precios::crear_precio_compra,
        handlers::precios::listar_precios_venta,
        handlers::precios::obtener_precio_venta,
        handlers::precios::crear_precio_venta,
        handlers::precios::margen_beneficio,

        // --- Inventario agregado ---
        handlers::inventario::dashboard,
        handlers::inventario::buscar,
    ),
    components(
        schemas(
            models::catalogo::Familia,
            models::catalogo::Color,
            models::catalogo::Proveedor,
            models::catalogo::Componente,
            models::articulo::TipoArticulo,
            models::articulo::Articulo,
            models::articulo::ProductoSimple,
            models::articulo::ComposicionProducto,
            models::articulo::ComposicionPack,
            models::articulo::LineaCoste,
            models::articulo::CosteCompuesto,
            models::articulo::LineaPrecioPack,
            models::articulo::PrecioPack,
            models::stock::TipoStock,
            models::stock::Stock,
            models::stock::TipoMovimiento,
            models::stock::Movimiento,
            models::precio::PrecioCompra,
            models::precio::PrecioVenta,
            models::precio::MargenBeneficio,
            models::inventario::DashboardInventario,
            models::inventario::ResultadoBusqueda,

            handlers::catalogo::CrearFamiliaPayload,
            handlers::catalogo::ActualizarFamiliaPayload,
            handlers::catalogo::CrearColorPayload,
            handlers::catalogo::ActualizarColorPayload,
            handlers::catalogo::CrearProveedorPayload,
            handlers::catalogo::ActualizarProveedorPayload,
            handlers::catalogo::CrearComponentePayload,
            handlers::catalogo::ActualizarComponentePayload,
            handlers::articulos::CrearProductoSimplePayload,
            handlers::articulos::ActualizarProductoSimplePayload,
            handlers::articulos::CrearProductoCompuestoPayload,
            handlers::articulos::ActualizarArticuloPayload,
            handlers::articulos::LineaComposicionPayload,
            handlers::articulos::CrearPackPayload,
            handlers::articulos::LineaPackPayload,
            handlers::stock::CrearStockPayload,
            handlers::stock::ActualizarStockPayload,
            handlers::stock::CrearMovimientoPayload,
            handlers::precios::CrearPrecioCompraPayload,
            handlers::precios::CrearPrecioVentaPayload,
        )
    ),
    tags(
        (name = "Sistema", description = "Banner y health check"),
        (name = "Familia", description = "Familias de artículos"),
        (name = "Color", description = "Colores disponibles"),
        (name = "Proveedor", description = "Proveedores"),
        (name = "Componente", description = "Componentes de fabricación"),
        (name = "Articulo", description = "Catálogo completo de artículos"),
        (name = "ProductoSimple", description = "Productos terminados de compra directa"),
        (name = "ProductoCompuesto", description = "Productos fabricados a partir de componentes"),
        (name = "Pack", description = "Agrupaciones comerciales de productos"),
        (name = "Stock", description = "Existencias y alertas"),
        (name = "Movimiento", description = "Historial de entradas y salidas"),
        (name = "Precios", description = "Históricos de precios de compra y venta"),
        (name = "Inventario", description = "Dashboard y búsqueda global"),
    ),
    info(
        title = "Oficit Stock Service",
        description = "API de gestión de inventario: catálogo, composición, stock, movimientos y precios.",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
