use std::future::Future;
use tickler_infra::TicklerContext;

/// Bounds a call to the store or to the agent api by the configured timeout
/// so that a hanging remote can never stall the caller forever.
pub async fn with_remote_timeout<T, F>(ctx: &TicklerContext, call: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    let timeout = ctx.config.remote_call_timeout;
    match tokio::time::timeout(timeout, call).await {
        Ok(res) => res,
        Err(_) => Err(anyhow::anyhow!("Remote call timed out after {:?}", timeout)),
    }
}
