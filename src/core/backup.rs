use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot the store into `dest_file` (optionally zipped). Returns the
    /// written path, or `None` when the user declined an overwrite.
    pub fn backup(
        pool: &mut DbPool,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let dest = Path::new(dest_file);

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        // the raw copy must not collide with the archive it feeds
        let raw = if final_target == dest && compress {
            dest.with_extension("sqlite")
        } else {
            dest.to_path_buf()
        };

        if final_target.exists() {
            if !force
                && !confirm(&format!(
                    "The file '{}' already exists. Overwrite it?",
                    final_target.display()
                ))
            {
                info("Backup cancelled.");
                return Ok(None);
            }
            fs::remove_file(&final_target)?;
        }
        if raw.exists() {
            fs::remove_file(&raw)?;
        }

        // VACUUM INTO writes a consistent copy even while other
        // connections are open.
        pool.conn
            .execute("VACUUM INTO ?1", [raw.to_string_lossy().as_ref()])?;
        success(format!("Backup created: {}", raw.display()));

        let final_path = if compress {
            let zipped = compress_backup(&raw)?;
            if let Err(e) = fs::remove_file(&raw) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            zipped
        } else {
            raw
        };

        ttlog_or_warn(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(final_path))
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Export(format!("'{}' has no file name", path.display())))?;

    let mut f = fs::File::open(path)?;
    zip.start_file(entry, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
