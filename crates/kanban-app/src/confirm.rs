use async_trait::async_trait;

/// Yes/no decision asked before destructive actions.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Approves everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Adapts a synchronous closure, e.g. a terminal prompt.
pub struct ConfirmFn<F>(pub F);

#[async_trait]
impl<F> Confirm for ConfirmFn<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn confirm(&self, prompt: &str) -> bool {
        (self.0)(prompt)
    }
}
