use anyhow::{Context, Result};
use tracing::{info, info_span, warn, Instrument};

use domain::{CleanupError, CleanupEvent, Role, SiteId, UserId};
use platform::NetworkHost;

use crate::report::RunReport;

/// 整个清理流程：校验占位用户 → 逐站点改写内容作者并清理成员 → 全网删除用户。
///
/// 占位用户无法解析时在任何改动发生之前返回错误；
/// 平台调用的意外失败直接向上传播并中止剩余步骤。
/// 只有删除这一步是"报告后继续"的。
pub async fn run_cleanup(host: &dyn NetworkHost, placeholder: UserId) -> Result<RunReport> {
    let record = host
        .get_user(placeholder)
        .await
        .context("placeholder user lookup failed")?
        .ok_or(CleanupError::PlaceholderNotFound(placeholder))?;

    info!(
        "Reassigning all content to {} (user {})",
        record.display_name, placeholder
    );

    // 删除集 = 全网用户 - 占位用户；第一步之后只读
    let users_to_delete: Vec<UserId> = host
        .list_users()
        .await
        .context("failed to enumerate network users")?
        .into_iter()
        .filter(|&u| u != placeholder)
        .collect();

    let sites = host
        .list_sites()
        .await
        .context("failed to enumerate network sites")?;

    let mut report = RunReport::new(placeholder);

    for &site in &sites {
        // 站点 span 替代原版的 switch_to_blog/restore_current_blog：
        // 出错也随栈展开退出，后续站点不会带着上一个站点的上下文跑
        process_site(host, site, &users_to_delete, placeholder, &mut report)
            .instrument(info_span!("site", id = site.get()))
            .await?;
    }

    // 删除是唯一非致命的一步：单个失败记 warning，继续处理剩余用户
    for &user in &users_to_delete {
        let deleted = host
            .delete_user(user)
            .await
            .with_context(|| format!("network deletion of user {} failed", user))?;
        if deleted {
            info!("Deleted user {} from the network.", user);
            report.push(CleanupEvent::UserDeleted { user });
        } else {
            warn!("Failed to delete user {}", user);
            report.push(CleanupEvent::UserDeleteFailed { user });
        }
    }

    report.finish(sites.len());
    info!("Content reassignment and user cleanup complete.");
    Ok(report)
}

async fn process_site(
    host: &dyn NetworkHost,
    site: SiteId,
    users_to_delete: &[UserId],
    placeholder: UserId,
    report: &mut RunReport,
) -> Result<()> {
    info!("Switched to site {}", site);
    report.push(CleanupEvent::SiteEntered { site });

    let content_types = host
        .content_types(site)
        .await
        .with_context(|| format!("failed to list content types on site {}", site))?;

    for &user in users_to_delete {
        for content_type in &content_types {
            let posts = host.posts_by_author(site, content_type, user).await?;
            if posts.is_empty() {
                // 零匹配不发记录
                continue;
            }

            for &post in &posts {
                host.reassign_post(site, post, placeholder).await?;
            }

            info!(
                "Reassigned {} {} posts from user {} to {} on site {}",
                posts.len(),
                content_type,
                user,
                placeholder,
                site
            );
            report.push(CleanupEvent::ContentReassigned {
                site,
                content_type: content_type.clone(),
                from: user,
                to: placeholder,
                count: posts.len(),
            });
        }
    }

    // 成员清理：占位用户之外的人全部移除
    for member in host.site_members(site).await? {
        if member == placeholder {
            continue;
        }
        host.remove_member(site, member).await?;
        info!("Removed user {} from site {}", member, site);
        report.push(CleanupEvent::MemberRemoved { site, user: member });
    }

    // 确保占位用户以管理员身份留在每个站点上
    if !host.is_member(site, placeholder).await? {
        host.add_member(site, placeholder, Role::Administrator)
            .await?;
        info!(
            "Added user {} as administrator to site {}",
            placeholder, site
        );
        report.push(CleanupEvent::AdminGranted {
            site,
            user: placeholder,
        });
    }

    Ok(())
}
