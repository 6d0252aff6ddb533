// src/db/inventario_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;

// Recuentos agregados para el dashboard del inventario. Solo lecturas.
#[derive(Clone)]
pub struct InventarioRepository {
    pool: PgPool,
}

impl InventarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn contar_tabla(&self, tabla: &'static str) -> Result<i64, AppError> {
        // `tabla` es siempre un literal del propio código, nunca entrada
        // del usuario; por eso puede interpolarse.
        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {tabla}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn contar_articulos_por_tipo(&self, tipo: &str) -> Result<i64, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articulo WHERE tipo = $1")
                .bind(tipo)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }
}
