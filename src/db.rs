// Data tier: typed queries against the MySQL metadata store.
//
// All statements use positional `?` binds -- user-supplied values are never
// interpolated into SQL text. The tri-state contract from the design
// (execution failure / no matching row / row) maps onto
// `Result<Option<T>>`: `Err` is a transport or execution failure, `None`
// means no row matched, `Some` carries the payload.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::RdsSettings;
use crate::error::Result;
use crate::models::{Asset, User};

/// Wrapper around the single database connection shared by every handler
/// for the lifetime of the process.
#[derive(Clone)]
pub struct DataTier {
    pool: MySqlPool,
}

impl DataTier {
    /// Connect to the MySQL server described by the settings. The program
    /// is single-user and single-task, so the pool is capped at one
    /// connection.
    pub async fn connect(settings: &RdsSettings) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(&settings.url())
            .await?;
        Ok(Self { pool })
    }

    /// User and asset row counts, fetched in one round trip.
    pub async fn entity_counts(&self) -> Result<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM users), (SELECT COUNT(*) FROM assets)",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    /// All users, descending by user id.
    pub async fn all_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT userid, email, lastname, firstname, bucketfolder \
             FROM users ORDER BY userid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// All assets, descending by asset id.
    pub async fn all_assets(&self) -> Result<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(
            "SELECT assetid, userid, assetname, bucketkey \
             FROM assets ORDER BY assetid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    pub async fn user_by_id(&self, userid: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT userid, email, lastname, firstname, bucketfolder \
             FROM users WHERE userid = ?",
        )
        .bind(userid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn asset_by_id(&self, assetid: i32) -> Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(
            "SELECT assetid, userid, assetname, bucketkey \
             FROM assets WHERE assetid = ?",
        )
        .bind(assetid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(asset)
    }

    /// Insert a new user row and return its auto-assigned id.
    pub async fn insert_user(
        &self,
        email: &str,
        lastname: &str,
        firstname: &str,
        bucketfolder: &str,
    ) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO users(email, lastname, firstname, bucketfolder) \
             VALUES(?, ?, ?, ?)",
        )
        .bind(email)
        .bind(lastname)
        .bind(firstname)
        .bind(bucketfolder)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }

    /// Insert a new asset row and return its auto-assigned id.
    pub async fn insert_asset(
        &self,
        userid: i32,
        assetname: &str,
        bucketkey: &str,
    ) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO assets(userid, assetname, bucketkey) VALUES(?, ?, ?)",
        )
        .bind(userid)
        .bind(assetname)
        .bind(bucketkey)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }
}
