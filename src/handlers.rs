pub mod articulos;
pub mod catalogo;
pub mod inventario;
pub mod precios;
pub mod stock;
