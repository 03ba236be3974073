//! Serves stored uploads back when they live under a local URL path.

use salvo::Router;
use salvo::serve_static::StaticDir;

use steeple_core::config::StorageConfig;

/// ## Summary
/// Mounts `storage.root` at the path of `storage.public_base_url`.
///
/// Returns `None` when the base URL is absolute (a CDN or another server
/// serves the files) or is the site root.
#[must_use]
pub fn upload_routes(storage: &StorageConfig) -> Option<Router> {
    let mount = storage.public_base_url.trim_end_matches('/');
    let mount = mount.strip_prefix('/').filter(|m| !m.is_empty())?;

    tracing::debug!(mount, root = %storage.root, "Serving uploads");
    Some(
        Router::with_path(format!("{mount}/{{**path}}"))
            .get(StaticDir::new([storage.root.clone()]).auto_list(false)),
    )
}
