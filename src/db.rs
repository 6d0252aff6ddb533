pub mod articulo_repo;
pub use articulo_repo::ArticuloRepository;
pub mod catalogo_repo;
pub use catalogo_repo::CatalogoRepository;
pub mod inventario_repo;
pub use inventario_repo::InventarioRepository;
pub mod precio_repo;
pub use precio_repo::PrecioRepository;
pub mod stock_repo;
pub use stock_repo::StockRepository;
