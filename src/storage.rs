// src/storage.rs

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::common::error::AppError;

pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Garante que a pasta existe, criando a árvore se preciso.
pub async fn create_folder_if_not_exists(folder: &Path) -> Result<PathBuf, AppError> {
    if tokio::fs::metadata(folder).await.is_ok_and(|m| m.is_dir()) {
        return Ok(folder.to_path_buf());
    }

    tokio::fs::create_dir_all(folder).await.map_err(|e| {
        tracing::error!(folder = %folder.display(), "Could not create upload folder: {}", e);
        AppError::FolderNotCreated
    })?;

    Ok(folder.to_path_buf())
}

fn extension_of(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

pub fn allowed_image_file(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| {
        ALLOWED_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    })
}

/// Salva a imagem com um nome único (uuid v4), mantendo a extensão original.
/// Retorna o caminho do arquivo gravado.
pub async fn save_image(folder: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
    let parent = create_folder_if_not_exists(folder).await?;

    if !allowed_image_file(filename) {
        return Err(AppError::InvalidFileType);
    }

    // allowed_image_file já garantiu a extensão
    let extension = extension_of(filename).unwrap_or_default();
    let unique_filename = format!("{}.{}", Uuid::new_v4(), extension);
    let path = parent.join(unique_filename);

    tokio::fs::write(&path, bytes).await?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "Image saved");

    Ok(path)
}
