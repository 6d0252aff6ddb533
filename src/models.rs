pub mod articulo;
pub mod catalogo;
pub mod inventario;
pub mod precio;
pub mod stock;
