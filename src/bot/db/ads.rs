use rand::Rng;
use sqlx::SqlitePool;

use crate::bot::commands::commands::BotResult;

pub const ADS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS ads (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT
    );
";

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AdEntry {
    pub id: i64,
    pub url: String,
}

pub async fn insert_ad(pool: &SqlitePool, url: &str) -> BotResult<i64> {
    let result = sqlx::query("INSERT INTO ads (url) VALUES (?)")
        .bind(url)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn count_ads(pool: &SqlitePool) -> BotResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ads").fetch_one(pool).await?;
    Ok(count)
}

/// Uniformly random ad from the whole pool, `None` when the pool is empty.
pub async fn random_ad(pool: &SqlitePool) -> BotResult<Option<AdEntry>> {
    let count = count_ads(pool).await?;
    if count == 0 {
        return Ok(None);
    }

    let offset = rand::thread_rng().gen_range(0..count);
    let ad = sqlx::query_as::<_, AdEntry>("SELECT id, url FROM ads ORDER BY id LIMIT 1 OFFSET ?")
        .bind(offset)
        .fetch_optional(pool)
        .await?;

    Ok(ad)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::bot::db::memory_pool;

    #[tokio::test]
    async fn empty_pool_has_no_ad() {
        let pool = memory_pool().await;
        assert_eq!(random_ad(&pool).await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let pool = memory_pool().await;
        let first = insert_ad(&pool, "https://a.example").await.unwrap();
        let second = insert_ad(&pool, "https://a.example").await.unwrap();

        assert!(second > first);
        assert_eq!(count_ads(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn single_ad_is_always_picked() {
        let pool = memory_pool().await;
        insert_ad(&pool, "https://only.example").await.unwrap();

        for _ in 0..5 {
            assert_eq!(random_ad(&pool).await.unwrap().unwrap().url, "https://only.example");
        }
    }

    #[tokio::test]
    async fn every_ad_can_be_picked() {
        let pool = memory_pool().await;
        for url in ["https://a.example", "https://b.example", "https://c.example"] {
            insert_ad(&pool, url).await.unwrap();
        }

        let mut seen = HashSet::new();
        for _ in 0..300 {
            seen.insert(random_ad(&pool).await.unwrap().unwrap().url);
        }
        assert_eq!(seen.len(), 3);
    }
}
