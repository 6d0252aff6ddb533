//src/main.rs

use axum::{
    Router,
    routing::{delete, get},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaración de nuestros módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa el logger antes de cualquier otra cosa.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien aquí: si la configuración falla, la
    // aplicación no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación.");

    // Ejecuta las migraciones de SQLx al arrancar.
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallo al ejecutar las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas con éxito!");

    // --- Catálogo ---
    let familia_routes = Router::new()
        .route(
            "/",
            get(handlers::catalogo::listar_familias).post(handlers::catalogo::crear_familia),
        )
        .route(
            "/{id}",
            get(handlers::catalogo::obtener_familia)
                .put(handlers::catalogo::actualizar_familia)
                .delete(handlers::catalogo::eliminar_familia),
        );

    let color_routes = Router::new()
        .route(
            "/",
            get(handlers::catalogo::listar_colores).post(handlers::catalogo::crear_color),
        )
        .route(
            "/{id}",
            get(handlers::catalogo::obtener_color)
                .put(handlers::catalogo::actualizar_color)
                .delete(handlers::catalogo::eliminar_color),
        );

    let proveedor_routes = Router::new()
        .route(
            "/",
            get(handlers::catalogo::listar_proveedores).post(handlers::catalogo::crear_proveedor),
        )
        .route(
            "/{id}",
            get(handlers::catalogo::obtener_proveedor)
                .put(handlers::catalogo::actualizar_proveedor)
                .delete(handlers::catalogo::eliminar_proveedor),
        );

    let componente_routes = Router::new()
        .route(
            "/",
            get(handlers::catalogo::listar_componentes).post(handlers::catalogo::crear_componente),
        )
        .route(
            "/{id}",
            get(handlers::catalogo::obtener_componente)
                .put(handlers::catalogo::actualizar_componente)
                .delete(handlers::catalogo::eliminar_componente),
        );

    // --- Artículos ---
    let articulo_routes = Router::new()
        .route("/", get(handlers::articulos::listar_articulos))
        .route("/{id}", get(handlers::articulos::obtener_articulo));

    let producto_simple_routes = Router::new()
        .route(
            "/",
            get(handlers::articulos::listar_productos_simples)
                .post(handlers::articulos::crear_producto_simple),
        )
        .route(
            "/{id}",
            get(handlers::articulos::obtener_producto_simple)
                .put(handlers::articulos::actualizar_producto_simple)
                .delete(handlers::articulos::eliminar_producto_simple),
        );

    let producto_compuesto_routes = Router::new()
        .route(
            "/",
            get(handlers::articulos::listar_productos_compuestos)
                .post(handlers::articulos::crear_producto_compuesto),
        )
        .route(
            "/{id}",
            get(handlers::articulos::obtener_producto_compuesto)
                .put(handlers::articulos::actualizar_producto_compuesto)
                .delete(handlers::articulos::eliminar_producto_compuesto),
        )
        .route(
            "/{id}/componentes",
            get(handlers::articulos::listar_componentes_de_compuesto)
                .post(handlers::articulos::agregar_componente),
        )
        .route(
            "/{id}/componentes/{id_componente}",
            delete(handlers::articulos::quitar_componente),
        )
        .route("/{id}/coste", get(handlers::articulos::coste_producto_compuesto));

    let pack_routes = Router::new()
        .route(
            "/",
            get(handlers::articulos::listar_packs).post(handlers::articulos::crear_pack),
        )
        .route(
            "/{id}",
            get(handlers::articulos::obtener_pack)
                .put(handlers::articulos::actualizar_pack)
                .delete(handlers::articulos::eliminar_pack),
        )
        .route(
            "/{id}/productos",
            get(handlers::articulos::listar_productos_de_pack)
                .post(handlers::articulos::agregar_producto_a_pack),
        )
        .route(
            "/{id}/productos/{id_producto}",
            delete(handlers::articulos::quitar_producto_de_pack),
        )
        .route("/{id}/precio", get(handlers::articulos::precio_pack));

    // --- Stock y movimientos ---
    // Ojo con el orden: las rutas literales van antes que "/{id}".
    let stock_routes = Router::new()
        .route(
            "/",
            get(handlers::stock::listar_stock).post(handlers::stock::crear_stock),
        )
        .route("/alertas", get(handlers::stock::listar_alertas))
        .route(
            "/movimientos",
            get(handlers::stock::listar_movimientos).post(handlers::stock::crear_movimiento),
        )
        .route("/movimientos/{id}", delete(handlers::stock::eliminar_movimiento))
        .route(
            "/producto-simple/{id}",
            get(handlers::stock::obtener_stock_por_producto_simple),
        )
        .route(
            "/componente/{id}",
            get(handlers::stock::obtener_stock_por_componente),
        )
        .route(
            "/{id}",
            get(handlers::stock::obtener_stock)
                .put(handlers::stock::actualizar_stock)
                .delete(handlers::stock::eliminar_stock),
        );

    // --- Precios ---
    let precios_routes = Router::new()
        .route(
            "/compra",
            get(handlers::precios::listar_precios_compra)
                .post(handlers::precios::crear_precio_compra),
        )
        .route("/compra/{id}", get(handlers::precios::obtener_precio_compra))
        .route(
            "/venta",
            get(handlers::precios::listar_precios_venta)
                .post(handlers::precios::crear_precio_venta),
        )
        .route("/venta/{id}", get(handlers::precios::obtener_precio_venta))
        .route("/margen", get(handlers::precios::margen_beneficio));

    // --- Inventario agregado ---
    let inventario_routes = Router::new()
        .route("/dashboard", get(handlers::inventario::dashboard))
        .route("/buscar", get(handlers::inventario::buscar));

    // Combina todo en el router principal
    let app = Router::new()
        .route("/", get(handlers::inventario::raiz))
        .route("/health", get(handlers::inventario::health))
        .nest("/familia", familia_routes)
        .nest("/color", color_routes)
        .nest("/proveedor", proveedor_routes)
        .nest("/componente", componente_routes)
        .nest("/articulo", articulo_routes)
        .nest("/producto-simple", producto_simple_routes)
        .nest("/producto-compuesto", producto_compuesto_routes)
        .nest("/pack", pack_routes)
        .nest("/stock", stock_routes)
        .nest("/precios", precios_routes)
        .nest("/inventario", inventario_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia el servidor
    let addr = AppState::listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Fallo al iniciar el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", addr);
    axum::serve(listener, app).await.expect("Error en el servidor Axum");
}
