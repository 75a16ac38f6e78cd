use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::traits::NetworkHost;
use crate::HostConfig;
use domain::{PostId, Role, SiteId, UserId, UserRecord};

/// 平台网络管理 REST API 的生产驱动。
/// 所有请求带 Bearer Token，JSON 进出。
pub struct RestDriver {
    client: Client,
    base_url: String,
    token: String,
}

// 列表端点统一用 fields=id 瘦身，只回 ID
#[derive(Deserialize)]
struct IdRow {
    id: u64,
}

#[derive(Deserialize)]
struct DeleteOutcome {
    deleted: bool,
}

impl RestDriver {
    pub fn new(client: Client, config: HostConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let resp = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, path))?;
        check_status(resp, &method, path).await
    }

    async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: serde_json::Value,
    ) -> Result<Response> {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let resp = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, path))?;
        check_status(resp, &method, path).await
    }

    async fn fetch_ids(&self, path: &str) -> Result<Vec<u64>> {
        let rows: Vec<IdRow> = self
            .send(Method::GET, path)
            .await?
            .json()
            .await
            .with_context(|| format!("invalid JSON from {}", path))?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }
}

async fn check_status(resp: Response, method: &Method, path: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(anyhow!("{} {} returned {}: {}", method, path, status, body))
}

/// 内容查询的固定参数：任意状态 + per_page=-1（平台约定的"不分页"）。
/// 这是显式契约，不是默认值——大结果集必须完整取回。
fn posts_query(content_type: &str, author: UserId) -> String {
    format!(
        "type={}&status=any&author={}&per_page=-1&fields=id",
        content_type, author
    )
}

#[async_trait]
impl NetworkHost for RestDriver {
    async fn get_user(&self, user: UserId) -> Result<Option<UserRecord>> {
        let url = self.url(&format!("/network/users/{}", user));
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("GET /network/users/{} failed", user))?;

        // 404 是合法结果：用户不存在
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check_status(resp, &Method::GET, "/network/users/{id}").await?;
        let record: UserRecord = resp.json().await.context("invalid user record JSON")?;
        Ok(Some(record))
    }

    async fn list_users(&self) -> Result<Vec<UserId>> {
        let ids = self.fetch_ids("/network/users?fields=id").await?;
        Ok(ids.into_iter().map(UserId::new).collect())
    }

    async fn list_sites(&self) -> Result<Vec<SiteId>> {
        let ids = self.fetch_ids("/network/sites?fields=id").await?;
        Ok(ids.into_iter().map(SiteId::new).collect())
    }

    async fn content_types(&self, site: SiteId) -> Result<Vec<String>> {
        let names: Vec<String> = self
            .send(Method::GET, &format!("/sites/{}/types", site))
            .await?
            .json()
            .await
            .context("invalid content type list JSON")?;
        Ok(names)
    }

    async fn posts_by_author(
        &self,
        site: SiteId,
        content_type: &str,
        author: UserId,
    ) -> Result<Vec<PostId>> {
        let path = format!("/sites/{}/posts?{}", site, posts_query(content_type, author));
        let ids = self.fetch_ids(&path).await?;
        Ok(ids.into_iter().map(PostId::new).collect())
    }

    async fn reassign_post(&self, site: SiteId, post: PostId, new_author: UserId) -> Result<()> {
        self.send_json(
            Method::PATCH,
            &format!("/sites/{}/posts/{}", site, post),
            serde_json::json!({ "author": new_author }),
        )
        .await?;
        Ok(())
    }

    async fn site_members(&self, site: SiteId) -> Result<Vec<UserId>> {
        let ids = self
            .fetch_ids(&format!("/sites/{}/members?fields=id", site))
            .await?;
        Ok(ids.into_iter().map(UserId::new).collect())
    }

    async fn is_member(&self, site: SiteId, user: UserId) -> Result<bool> {
        let url = self.url(&format!("/sites/{}/members/{}", site, user));
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("GET /sites/{}/members/{} failed", site, user))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check_status(resp, &Method::GET, "/sites/{site}/members/{user}").await?;
        Ok(true)
    }

    async fn remove_member(&self, site: SiteId, user: UserId) -> Result<()> {
        self.send(Method::DELETE, &format!("/sites/{}/members/{}", site, user))
            .await?;
        Ok(())
    }

    async fn add_member(&self, site: SiteId, user: UserId, role: Role) -> Result<()> {
        self.send_json(
            Method::PUT,
            &format!("/sites/{}/members/{}", site, user),
            serde_json::json!({ "role": role.as_str() }),
        )
        .await?;
        Ok(())
    }

    async fn delete_user(&self, user: UserId) -> Result<bool> {
        let outcome: DeleteOutcome = self
            .send(Method::DELETE, &format!("/network/users/{}", user))
            .await?
            .json()
            .await
            .context("invalid delete outcome JSON")?;
        Ok(outcome.deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_query_requests_full_result_set() {
        let q = posts_query("page", UserId::new(11));
        assert!(q.contains("per_page=-1"));
        assert!(q.contains("status=any"));
        assert!(q.contains("author=11"));
        assert!(q.contains("type=page"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let config = HostConfig {
            base_url: "http://host.test/".into(),
            token: "t".into(),
            timeout_secs: 5,
        };
        let driver = RestDriver::new(Client::new(), config);
        assert_eq!(
            driver.url("/network/sites?fields=id"),
            "http://host.test/network/sites?fields=id"
        );
    }
}
