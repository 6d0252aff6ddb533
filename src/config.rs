// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        ArticuloRepository, CatalogoRepository, InventarioRepository, PrecioRepository,
        StockRepository,
    },
    services::{
        ArticuloService, CatalogoService, InventarioService, PrecioService, StockService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalogo_service: CatalogoService,
    pub articulo_service: ArticuloService,
    pub stock_service: StockService,
    pub precio_service: PrecioService,
    pub inventario_service: InventarioService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL debe estar definida"))?;

        // Conecta a la base de datos, con '?' para propagar errores
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida");

        // --- Monta el grafo de dependencias ---
        let catalogo_repo = CatalogoRepository::new(db_pool.clone());
        let articulo_repo = ArticuloRepository::new(db_pool.clone());
        let stock_repo = StockRepository::new(db_pool.clone());
        let precio_repo = PrecioRepository::new(db_pool.clone());
        let inventario_repo = InventarioRepository::new(db_pool.clone());

        let catalogo_service = CatalogoService::new(catalogo_repo.clone(), db_pool.clone());
        let articulo_service =
            ArticuloService::new(articulo_repo.clone(), stock_repo.clone(), db_pool.clone());
        let stock_service = StockService::new(stock_repo.clone(), db_pool.clone());
        let precio_service = PrecioService::new(precio_repo, db_pool.clone());
        let inventario_service =
            InventarioService::new(inventario_repo, catalogo_repo, articulo_repo, stock_repo);

        Ok(Self {
            db_pool,
            catalogo_service,
            articulo_service,
            stock_service,
            precio_service,
            inventario_service,
        })
    }

    /// Dirección de escucha del servidor (variable PORT, 8000 por defecto).
    pub fn listen_addr() -> String {
        let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        format!("0.0.0.0:{port}")
    }
}
