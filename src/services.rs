pub mod articulo_service;
pub use articulo_service::ArticuloService;
pub mod catalogo_service;
pub use catalogo_service::CatalogoService;
pub mod inventario_service;
pub use inventario_service::InventarioService;
pub mod precio_service;
pub use precio_service::PrecioService;
pub mod stock_service;
pub use stock_service::StockService;
