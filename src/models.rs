use sqlx::FromRow;

/// Row of the `users` table. `bucketfolder` is the opaque token used as the
/// key prefix for every object this user uploads.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub userid: i32,
    pub email: String,
    pub lastname: String,
    pub firstname: String,
    pub bucketfolder: String,
}

/// Row of the `assets` table. `bucketkey` is the full path of the stored
/// object inside the bucket; `assetname` is the original local filename.
#[derive(Debug, Clone, FromRow)]
pub struct Asset {
    pub assetid: i32,
    pub userid: i32,
    pub assetname: String,
    pub bucketkey: String,
}
