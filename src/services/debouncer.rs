//! 防抖器 - 业务能力层
//!
//! 合并一段时间内的连续输入，只保留最后一次

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// 防抖器
///
/// 每次 `push` 都会重置截止时间；截止时间到达后 `take_due` 取出最后一个值。
/// 不持有定时器，由调用方在 `select!` 中等待 [`wait_deadline`]。
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// 记录新值并重置截止时间
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// 当前截止时间（没有待处理值时为 None）
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// 截止时间已到则取出值
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// 丢弃待处理值（立即触发的操作会覆盖防抖中的输入）
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// 等待截止时间；没有截止时间时永远挂起
pub async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;
    use tokio_test::{assert_pending, assert_ready};

    #[tokio::test(start_paused = true)]
    async fn burst_keeps_only_last_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.push("r");
        advance(Duration::from_millis(100)).await;
        debouncer.push("ru");
        advance(Duration::from_millis(100)).await;
        debouncer.push("rust");

        advance(Duration::from_millis(299)).await;
        assert_eq!(debouncer.take_due(Instant::now()), None);

        advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.take_due(Instant::now()), Some("rust"));
        assert!(debouncer.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_deadline_fires_after_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push(1);

        let mut wait = tokio_test::task::spawn(wait_deadline(debouncer.deadline()));
        assert_pending!(wait.poll());

        advance(Duration::from_millis(300)).await;
        assert_ready!(wait.poll());
        assert_eq!(debouncer.take_due(Instant::now()), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn no_deadline_never_fires() {
        let mut wait = tokio_test::task::spawn(wait_deadline(None));
        advance(Duration::from_secs(60)).await;
        assert_pending!(wait.poll());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("draft");
        assert_eq!(debouncer.cancel(), Some("draft"));
        assert!(debouncer.deadline().is_none());

        advance(Duration::from_millis(300)).await;
        assert_eq!(debouncer.take_due(Instant::now()), None);
    }
}
