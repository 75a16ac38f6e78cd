use chrono::NaiveDateTime;
use domain::{CleanupEvent, UserId};

/// 一次运行的完整进度流。日志是唯一的持久产物，
/// 这里同时留一份结构化副本，方便断言和汇总。
#[derive(Debug)]
pub struct RunReport {
    pub placeholder: UserId,
    pub started_at: NaiveDateTime,
    pub finished_at: Option<NaiveDateTime>,
    events: Vec<CleanupEvent>,
}

impl RunReport {
    pub(crate) fn new(placeholder: UserId) -> Self {
        Self {
            placeholder,
            started_at: chrono::Utc::now().naive_utc(),
            finished_at: None,
            events: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, event: CleanupEvent) {
        self.events.push(event);
    }

    pub(crate) fn finish(&mut self, sites: usize) {
        let summary = CleanupEvent::Completed {
            sites,
            reassigned: self.posts_reassigned(),
            deleted: self.users_deleted(),
            failed: self.deletions_failed(),
        };
        self.events.push(summary);
        self.finished_at = Some(chrono::Utc::now().naive_utc());
    }

    pub fn events(&self) -> &[CleanupEvent] {
        &self.events
    }

    /// 被改写作者的内容总条数。
    pub fn posts_reassigned(&self) -> usize {
        self.events
            .iter()
            .filter_map(|e| match e {
                CleanupEvent::ContentReassigned { count, .. } => Some(*count),
                _ => None,
            })
            .sum()
    }

    pub fn users_deleted(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CleanupEvent::UserDeleted { .. }))
            .count()
    }

    pub fn deletions_failed(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CleanupEvent::UserDeleteFailed { .. }))
            .count()
    }
}
