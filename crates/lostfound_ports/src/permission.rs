use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionResponse {
    pub granted: bool,
}

#[async_trait]
pub trait PermissionProvider: Send + Sync {
    async fn request_camera_permission(&self) -> PermissionResponse;
}

#[derive(Debug)]
pub struct StaticPermissions {
    camera_granted: AtomicBool,
    requests: AtomicUsize,
}

impl StaticPermissions {
    pub fn new(camera_granted: bool) -> Self {
        Self {
            camera_granted: AtomicBool::new(camera_granted),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn set_camera_granted(&self, granted: bool) {
        self.camera_granted.store(granted, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionProvider for StaticPermissions {
    async fn request_camera_permission(&self) -> PermissionResponse {
        self.requests.fetch_add(1, Ordering::SeqCst);
        PermissionResponse {
            granted: self.camera_granted.load(Ordering::SeqCst),
        }
    }
}
