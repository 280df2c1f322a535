use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::{ensure_writable, require_absolute};
use crate::models::RecordKind;
use crate::store::RecordStore;
use crate::store::log::ttlog_quiet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

const ALL_KINDS: [RecordKind; 6] = [
    RecordKind::BreathSession,
    RecordKind::ReframingNote,
    RecordKind::DailyReflection,
    RecordKind::StudyBlock,
    RecordKind::MoodCheckin,
    RecordKind::ActivityLog,
];

pub struct BackupLogic;

impl BackupLogic {
    /// Copy every existing store file.
    ///
    /// Without `compress`, `dest` is a directory that receives plain copies.
    /// With `compress`, `dest` is a zip archive (`.zip` appended if missing).
    /// Returns the directory or archive written.
    pub fn backup(store: &RecordStore, dest: &Path, compress: bool, force: bool) -> AppResult<PathBuf> {
        require_absolute(dest)?;

        // 1️⃣ Collect store files
        let sources: Vec<PathBuf> = ALL_KINDS
            .iter()
            .map(|k| store.path_for(*k))
            .filter(|p| p.is_file())
            .collect();

        if sources.is_empty() {
            return Err(AppError::Other(format!(
                "No data files found in {}",
                store.dir().display()
            )));
        }

        // 2️⃣ Copy or compress
        let written = if compress {
            let zip_path = if dest.extension().is_some_and(|e| e == "zip") {
                dest.to_path_buf()
            } else {
                dest.with_extension("zip")
            };
            ensure_writable(&zip_path, force)?;
            compress_files(&sources, &zip_path)?;
            zip_path
        } else {
            fs::create_dir_all(dest)?;
            for src in &sources {
                let Some(name) = src.file_name() else { continue };
                let target = dest.join(name);
                ensure_writable(&target, force)?;
                fs::copy(src, &target)?;
            }
            dest.to_path_buf()
        };

        // 3️⃣ Log
        ttlog_quiet(
            store,
            "backup",
            &written.to_string_lossy(),
            &format!(
                "{} file(s){}",
                sources.len(),
                if compress { ", compressed" } else { "" }
            ),
        );

        Ok(written)
    }
}

fn compress_files(sources: &[PathBuf], zip_path: &Path) -> AppResult<()> {
    if let Some(parent) = zip_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for src in sources {
        let Some(name) = src.file_name() else { continue };
        zip.start_file(name.to_string_lossy(), options)
            .map_err(io::Error::other)?;
        let mut f = fs::File::open(src)?;
        io::copy(&mut f, &mut zip)?;
    }

    zip.finish().map_err(io::Error::other)?;
    Ok(())
}
