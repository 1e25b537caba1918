// Command handlers. Each one is a short vertical slice: at most one storage
// call and one or two database calls, printing its results to stdout.
//
// Handlers take constructed arguments (ids, paths, strings) rather than
// reading stdin themselves, so they can be exercised directly; the
// interactive prompts live in `ui`. Not-found conditions print their own
// message and return `Ok` -- only transport and execution failures surface
// as errors, which the menu loop reports before continuing.

use std::path::Path;
use uuid::Uuid;

use crate::display;
use crate::error::{AppError, Result};
use crate::models::{Asset, User};
use crate::Session;

/// Bucket and database statistics: bucket name and object count, database
/// endpoint, user and asset row counts.
pub async fn stats(session: &Session) -> Result<()> {
    println!("S3 bucket name: {}", session.store.bucket_name());
    let objects = session.store.count_objects().await?;
    println!("S3 assets: {objects}");

    println!("RDS MySQL endpoint: {}", session.settings.rds.endpoint);
    let (users, assets) = session.db.entity_counts().await?;
    println!("# of users: {users}");
    println!("# of assets: {assets}");
    Ok(())
}

/// List all users, descending by user id.
pub async fn users(session: &Session) -> Result<()> {
    for user in session.db.all_users().await? {
        print!("{}", format_user(&user));
    }
    Ok(())
}

/// List all assets, descending by asset id.
pub async fn assets(session: &Session) -> Result<()> {
    for asset in session.db.all_assets().await? {
        print!("{}", format_asset(&asset));
    }
    Ok(())
}

/// Look up an asset, download its object and rename it to the original
/// filename. With `show` set, also renders the image in the terminal.
/// A missing asset id performs zero storage calls.
pub async fn download(session: &Session, asset_id: i32, show: bool) -> Result<()> {
    let Some(asset) = session.db.asset_by_id(asset_id).await? else {
        println!("No such asset...");
        return Ok(());
    };

    let temp = session.store.download_file(&asset.bucketkey).await?;
    temp.persist(&asset.assetname)
        .map_err(|e| AppError::Io(e.error))?;
    println!("Downloaded from S3 and saved as '{}'", asset.assetname);

    if show {
        display::render(Path::new(&asset.assetname))?;
    }
    Ok(())
}

/// Upload a local file into the owning user's folder and record it in the
/// assets table. Missing local file or unknown user id report and return
/// without touching storage or inserting anything.
pub async fn upload(session: &Session, local_path: &Path, user_id: i32) -> Result<()> {
    if !local_path.exists() {
        println!("Local file '{}' does not exist...", local_path.display());
        return Ok(());
    }

    let Some(user) = session.db.user_by_id(user_id).await? else {
        println!("No such user...");
        return Ok(());
    };

    let key = crate::storage::object_key(&user.bucketfolder);
    session.store.upload_file(local_path, &key).await?;
    println!("Uploaded and stored in S3 as '{key}'");

    let name = local_path.display().to_string();
    match session.db.insert_asset(user_id, &name, &key).await {
        Ok(asset_id) => {
            println!("Recorded in RDS under asset id {asset_id}");
            Ok(())
        }
        Err(e) => {
            // The object is already stored; try to remove it so the bucket
            // does not drift from the assets table.
            if let Err(cleanup) = session.store.delete_object(&key).await {
                tracing::warn!(%key, error = %cleanup, "orphaned object left in bucket");
            }
            Err(e)
        }
    }
}

/// Insert a new user with a freshly generated folder token.
pub async fn add_user(
    session: &Session,
    email: &str,
    lastname: &str,
    firstname: &str,
) -> Result<()> {
    let folder = Uuid::new_v4().to_string();
    let user_id = session
        .db
        .insert_user(email, lastname, firstname, &folder)
        .await?;
    println!("Recorded in RDS under user id {user_id}");
    Ok(())
}

fn format_user(user: &User) -> String {
    format!(
        "User id: {}\n  Email: {}\n  Name: {}, {}\n  Folder: {}\n",
        user.userid, user.email, user.lastname, user.firstname, user.bucketfolder
    )
}

fn format_asset(asset: &Asset) -> String {
    format!(
        "Asset id: {}\n  User id: {}\n  Original name: {}\n  Key name: {}\n",
        asset.assetid, asset.userid, asset.assetname, asset.bucketkey
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_listing_lines() {
        let user = User {
            userid: 80002,
            email: "a@b.com".into(),
            lastname: "Doe".into(),
            firstname: "Jane".into(),
            bucketfolder: "9dc2c79e-1696-4e24-a3b1-f6a0a9b0a70e".into(),
        };
        assert_eq!(
            format_user(&user),
            "User id: 80002\n  Email: a@b.com\n  Name: Doe, Jane\n  Folder: 9dc2c79e-1696-4e24-a3b1-f6a0a9b0a70e\n"
        );
    }

    #[test]
    fn asset_listing_lines() {
        let asset = Asset {
            assetid: 1001,
            userid: 80002,
            assetname: "vacation.jpg".into(),
            bucketkey: "9dc2c79e/5a3f.jpg".into(),
        };
        assert_eq!(
            format_asset(&asset),
            "Asset id: 1001\n  User id: 80002\n  Original name: vacation.jpg\n  Key name: 9dc2c79e/5a3f.jpg\n"
        );
    }
}
