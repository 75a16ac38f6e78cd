use crate::models::{SiteId, UserId};
use serde::{Deserialize, Serialize};

/// 清理流程对外发出的进度记录，一行日志对应一个变体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CleanupEvent {
    SiteEntered {
        site: SiteId,
    },
    ContentReassigned {
        site: SiteId,
        content_type: String,
        from: UserId,
        to: UserId,
        count: usize,
    },
    MemberRemoved {
        site: SiteId,
        user: UserId,
    },
    AdminGranted {
        site: SiteId,
        user: UserId,
    },
    UserDeleted {
        user: UserId,
    },
    UserDeleteFailed {
        user: UserId,
    },
    Completed {
        sites: usize,
        reassigned: usize,
        deleted: usize,
        failed: usize,
    },
}
