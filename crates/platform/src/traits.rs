use anyhow::Result;
use async_trait::async_trait;
use domain::{PostId, Role, SiteId, UserId, UserRecord};

/// 内容平台暴露给清理流程的全部操作。
///
/// 原版平台把"当前站点"做成全局上下文（进入/恢复成对调用）；
/// 这里改为每个站点级操作显式携带 SiteId，不存在任何环境态。
#[async_trait]
pub trait NetworkHost: Send + Sync {
    /// 按 ID 查找网络用户，不存在时返回 None。
    async fn get_user(&self, user: UserId) -> Result<Option<UserRecord>>;

    /// 网络用户目录里的全部用户 ID。
    async fn list_users(&self) -> Result<Vec<UserId>>;

    /// 网络内全部站点 ID。
    async fn list_sites(&self) -> Result<Vec<SiteId>>;

    /// 某站点上注册的全部内容类型名。
    async fn content_types(&self, site: SiteId) -> Result<Vec<String>>;

    /// 某作者在某站点上、某内容类型下的全部内容 ID。
    /// 契约：返回完整结果集（任意发布状态、不分页截断）。
    async fn posts_by_author(
        &self,
        site: SiteId,
        content_type: &str,
        author: UserId,
    ) -> Result<Vec<PostId>>;

    /// 把单条内容的作者改为 new_author。
    async fn reassign_post(&self, site: SiteId, post: PostId, new_author: UserId) -> Result<()>;

    /// 某站点的全部成员 ID。
    async fn site_members(&self, site: SiteId) -> Result<Vec<UserId>>;

    async fn is_member(&self, site: SiteId, user: UserId) -> Result<bool>;

    async fn remove_member(&self, site: SiteId, user: UserId) -> Result<()>;

    async fn add_member(&self, site: SiteId, user: UserId, role: Role) -> Result<()>;

    /// 全网删除用户：平台自行回收其残留的网络级归属。
    /// 返回 false 表示平台拒绝/失败但不是传输错误。
    async fn delete_user(&self, user: UserId) -> Result<bool>;
}
