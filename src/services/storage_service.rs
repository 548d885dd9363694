// src/services/storage_service.rs

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::{AppError, Entity};

/// Validade das URLs assinadas devolvidas pelo upload.
pub const SIGNED_URL_TTL_DAYS: i64 = 365;

#[derive(Debug, Serialize, Deserialize)]
struct ObjectClaims {
    sub: String, // "<bucket>/<objeto>"
    exp: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedObject {
    /// URL assinada, válida por um ano.
    pub url: String,
    pub path: String,
}

// Armazenamento de imagens em disco, servido via URLs assinadas
#[derive(Clone)]
pub struct StorageService {
    root: PathBuf,
    bucket: String,
    public_url: String,
    secret: String,
}

impl StorageService {
    pub fn new(root: PathBuf, bucket: String, public_url: String, secret: String) -> Self {
        Self {
            root,
            bucket,
            public_url: public_url.trim_end_matches('/').to_string(),
            secret,
        }
    }

    pub async fn upload_image(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<UploadedObject, AppError> {
        let ext = image_extension(original_name, content_type).ok_or(AppError::UnsupportedMediaType)?;
        if bytes.is_empty() {
            return Err(AppError::MalformedPayload("empty file".into()));
        }

        let object = format!("{}.{}", Uuid::new_v4(), ext);
        let dir = self.root.join(&self.bucket);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&object), bytes).await?;

        tracing::info!("🖼️ Imagem gravada: {}/{} ({} bytes)", self.bucket, object, bytes.len());
        Ok(UploadedObject {
            url: self.signed_url(&object)?,
            path: object,
        })
    }

    pub fn signed_url(&self, object: &str) -> Result<String, AppError> {
        let claims = ObjectClaims {
            sub: format!("{}/{}", self.bucket, object),
            exp: (Utc::now() + Duration::days(SIGNED_URL_TTL_DAYS)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?;
        Ok(format!(
            "{}/api/storage/{}/{}?token={}",
            self.public_url, self.bucket, object, token
        ))
    }

    /// Lê o objeto se o token foi emitido para este mesmo caminho e não expirou.
    pub async fn read_signed(
        &self,
        bucket: &str,
        object: &str,
        token: &str,
    ) -> Result<(Vec<u8>, &'static str), AppError> {
        let claims = decode::<ObjectClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?
        .claims;

        if claims.sub != format!("{bucket}/{object}") {
            return Err(AppError::InvalidToken);
        }
        if bucket != self.bucket || !is_plain_object_name(object) {
            return Err(AppError::NotFound(Entity::StoredObject));
        }

        let path = self.root.join(bucket).join(object);
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(Entity::StoredObject),
            _ => AppError::StorageError(e),
        })?;
        Ok((bytes, content_type_for(&path)))
    }
}

// Um único componente, sem "..", sem separadores
fn is_plain_object_name(object: &str) -> bool {
    !object.is_empty()
        && !object.contains(['/', '\\'])
        && object != "."
        && object != ".."
}

fn image_extension(original_name: Option<&str>, content_type: Option<&str>) -> Option<&'static str> {
    let from_type = match content_type {
        Some("image/jpeg") | Some("image/jpg") => Some("jpg"),
        Some("image/png") => Some("png"),
        Some("image/webp") => Some("webp"),
        Some("image/gif") => Some("gif"),
        Some(other) if !other.starts_with("image/") && other != "application/octet-stream" => {
            return None;
        }
        _ => None,
    };

    from_type.or_else(|| {
        let ext = Path::new(original_name?).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some("jpg"),
            "png" => Some("png"),
            "webp" => Some("webp"),
            "gif" => Some("gif"),
            _ => None,
        }
    })
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (StorageService, PathBuf) {
        let root = std::env::temp_dir().join(format!("storefront-storage-{}", Uuid::new_v4()));
        let service = StorageService::new(
            root.clone(),
            "product-images".into(),
            "http://localhost:3000/".into(),
            "storage-secret".into(),
        );
        (service, root)
    }

    fn token_of(url: &str) -> &str {
        url.split("token=").nth(1).unwrap()
    }

    #[tokio::test]
    async fn upload_then_read_with_signed_url() {
        let (storage, root) = service();
        let uploaded = storage
            .upload_image(Some("photo.PNG"), Some("image/png"), b"\x89PNG fake")
            .await
            .unwrap();

        assert!(uploaded.path.ends_with(".png"));
        assert!(uploaded.url.starts_with("http://localhost:3000/api/storage/product-images/"));

        let (bytes, content_type) = storage
            .read_signed("product-images", &uploaded.path, token_of(&uploaded.url))
            .await
            .unwrap();
        assert_eq!(bytes, b"\x89PNG fake");
        assert_eq!(content_type, "image/png");

        tokio::fs::remove_dir_all(root).await.ok();
    }

    #[tokio::test]
    async fn token_for_one_object_does_not_open_another() {
        let (storage, root) = service();
        let a = storage.upload_image(Some("a.jpg"), None, b"a").await.unwrap();
        let b = storage.upload_image(Some("b.jpg"), None, b"b").await.unwrap();

        let result = storage
            .read_signed("product-images", &b.path, token_of(&a.url))
            .await;
        assert!(matches!(result, Err(AppError::InvalidToken)));

        tokio::fs::remove_dir_all(root).await.ok();
    }

    #[tokio::test]
    async fn non_images_are_refused() {
        let (storage, _) = service();
        let result = storage
            .upload_image(Some("notes.txt"), Some("text/plain"), b"hello")
            .await;
        assert!(matches!(result, Err(AppError::UnsupportedMediaType)));
    }

    #[test]
    fn object_names_cannot_escape_the_bucket() {
        assert!(is_plain_object_name("abc.png"));
        assert!(!is_plain_object_name("../secrets.env"));
        assert!(!is_plain_object_name(".."));
        assert!(!is_plain_object_name(""));
    }
}
