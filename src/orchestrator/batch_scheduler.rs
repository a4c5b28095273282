//! 批量调度器 - 编排层
//!
//! ## 职责
//!
//! 把所有行按输入顺序提交给 [`RowFlow`]，同时遵守两个限制：
//!
//! 1. **并发上限**：整个运行期间共用一个 Semaphore，同时最多 C 个生成请求
//! 2. **批次等待**：每提交 B 行，等待已提交的任务全部完成后再继续提交
//!
//! 最后不足一批的剩余任务在结束时统一等待。
//!
//! ## 顺序保证
//!
//! 任务只携带行索引和提取好的字段，结果按索引写回各自的行，
//! 因此无论完成顺序如何，输出顺序总是等于输入顺序。

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::error;

use crate::config::Config;
use crate::models::Row;
use crate::utils::logging::{log_batch_complete, log_batch_start};
use crate::workflow::{Icebreaker, RowCtx, RowFlow};

/// 调度统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub generated: usize,
    pub fallback: usize,
}

impl BatchStats {
    fn record(&mut self, icebreaker: &Icebreaker) {
        if icebreaker.is_generated() {
            self.generated += 1;
        } else {
            self.fallback += 1;
        }
    }
}

/// 已提交但尚未等待的任务
type Pending = Vec<(usize, JoinHandle<Icebreaker>)>;

/// 批量调度器
pub struct BatchScheduler {
    concurrency: usize,
    rows_per_batch: usize,
}

impl BatchScheduler {
    pub fn new(config: &Config) -> Self {
        Self::with_limits(config.concurrency(), config.batch_size())
    }

    /// 使用自定义并发数和批次大小创建（均至少为 1）
    pub fn with_limits(concurrency: usize, rows_per_batch: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            rows_per_batch: rows_per_batch.max(1),
        }
    }

    /// 处理所有行，每行恰好处理一次
    ///
    /// 单行失败已经在 [`RowFlow`] 中转换为兜底文本，这里只需无条件等待。
    pub async fn run(&self, rows: &mut [Row], flow: Arc<RowFlow>) -> BatchStats {
        let total = rows.len();
        let total_batches = total.div_ceil(self.rows_per_batch);
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let mut stats = BatchStats {
            total,
            ..Default::default()
        };
        let mut pending: Pending = Vec::with_capacity(self.rows_per_batch);
        let mut batch_num = 0;

        for index in 0..total {
            let row_index = index + 1;

            if pending.is_empty() {
                batch_num += 1;
                let batch_end = (index + self.rows_per_batch).min(total);
                log_batch_start(batch_num, total_batches, row_index, batch_end, total);
            }

            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!("[行 {}] 无法获取并发许可: {}", row_index, e);
                    Icebreaker::Fallback.apply_to(&mut rows[index]);
                    stats.record(&Icebreaker::Fallback);
                    continue;
                }
            };

            let ctx = RowCtx::from_row(row_index, &rows[index]);
            let fields = flow.extract_fields(&rows[index]);
            let flow = Arc::clone(&flow);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                flow.run(&ctx, &fields).await
            });
            pending.push((index, handle));

            // 每满一批，等待全部完成后再继续提交
            if pending.len() % self.rows_per_batch == 0 {
                Self::drain(&mut pending, rows, &mut stats, batch_num).await;
            }
        }

        // 处理剩余不足一批的任务
        if !pending.is_empty() {
            Self::drain(&mut pending, rows, &mut stats, batch_num).await;
        }

        stats
    }

    /// 等待所有已提交的任务，并把结果写回对应的行
    async fn drain(pending: &mut Pending, rows: &mut [Row], stats: &mut BatchStats, batch_num: usize) {
        let (indices, handles): (Vec<usize>, Vec<_>) = pending.drain(..).unzip();
        let batch_total = indices.len();
        let mut batch_generated = 0;

        for (index, result) in indices.into_iter().zip(join_all(handles).await) {
            let icebreaker = result.unwrap_or_else(|e| {
                error!("[行 {}] 任务执行失败: {}", index + 1, e);
                Icebreaker::Fallback
            });

            if icebreaker.is_generated() {
                batch_generated += 1;
            }
            icebreaker.apply_to(&mut rows[index]);
            stats.record(&icebreaker);
        }

        log_batch_complete(batch_num, batch_generated, batch_total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{GenerationClient, GenerationRequest};
    use crate::error::GenerationError;
    use crate::services::IcebreakerService;
    use crate::workflow::FALLBACK_ICEBREAKER;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Start(usize),
        End(usize),
    }

    /// 测试用的生成服务
    ///
    /// 行号从提示词中的名字（`row<N>`）解析，延迟越靠前的行越长，
    /// 让完成顺序与提交顺序相反。
    struct ScriptedClient {
        total: usize,
        fail_all: bool,
        panic_on: Option<usize>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        events: Mutex<Vec<Event>>,
    }

    impl ScriptedClient {
        fn new(total: usize) -> Self {
            Self {
                total,
                fail_all: false,
                panic_on: None,
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                events: Mutex::new(Vec::new()),
            }
        }
    }

    fn row_number(input: &str) -> usize {
        input
            .split("an email to row")
            .nth(1)
            .and_then(|rest| rest.split(',').next())
            .and_then(|n| n.parse().ok())
            .unwrap()
    }

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
            let n = row_number(&request.input);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.events.lock().unwrap().push(Event::Start(n));

            tokio::time::sleep(Duration::from_millis(((self.total - n) * 3) as u64)).await;

            self.events.lock().unwrap().push(Event::End(n));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.panic_on == Some(n) {
                panic!("scripted panic for row {n}");
            }
            if self.fail_all {
                return Err(GenerationError::Api {
                    code: "server_error".to_string(),
                    message: "server error".to_string(),
                });
            }
            Ok(format!("icebreaker for row{n}"))
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row::from_iter([("firstName", format!("row{i}"))]))
            .collect()
    }

    fn flow_with(client: Arc<ScriptedClient>) -> Arc<RowFlow> {
        let config = Config::default();
        Arc::new(RowFlow::new(&config, IcebreakerService::new(&config, client)))
    }

    #[tokio::test]
    async fn test_output_order_matches_input_order() {
        let client = Arc::new(ScriptedClient::new(12));
        let mut rows = rows(12);

        let stats = BatchScheduler::with_limits(4, 50)
            .run(&mut rows, flow_with(client))
            .await;

        assert_eq!(stats, BatchStats { total: 12, generated: 12, fallback: 0 });
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.get("firstName"), Some(format!("row{i}").as_str()));
            assert_eq!(row.icebreaker(), Some(format!("icebreaker for row{i}").as_str()));
        }
    }

    #[tokio::test]
    async fn test_concurrency_cap_is_respected() {
        let client = Arc::new(ScriptedClient::new(20));
        let mut rows = rows(20);

        BatchScheduler::with_limits(3, 50)
            .run(&mut rows, flow_with(client.clone()))
            .await;

        let max = client.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 3, "max in flight was {max}");
        assert!(max >= 2, "rows should overlap, max in flight was {max}");
        assert_eq!(client.events.lock().unwrap().len(), 40);
    }

    #[tokio::test]
    async fn test_batch_boundary_waits_for_previous_batch() {
        let client = Arc::new(ScriptedClient::new(7));
        let mut rows = rows(7);

        let stats = BatchScheduler::with_limits(2, 3)
            .run(&mut rows, flow_with(client.clone()))
            .await;
        assert_eq!(stats.total, 7);

        let events = client.events.lock().unwrap();
        let position = |e: Event| events.iter().position(|x| *x == e).unwrap();

        // 批次: [0,1,2] [3,4,5] [6]
        for (prev, next) in [(0..3, 3..6), (3..6, 6..7)] {
            let last_end = prev.clone().map(|n| position(Event::End(n))).max().unwrap();
            let first_start = next.clone().map(|n| position(Event::Start(n))).min().unwrap();
            assert!(last_end < first_start, "batch {prev:?} overlapped with {next:?}");
        }
    }

    #[tokio::test]
    async fn test_all_failures_become_fallback() {
        let mut client = ScriptedClient::new(6);
        client.fail_all = true;
        let mut rows = rows(6);

        let stats = BatchScheduler::with_limits(5, 50)
            .run(&mut rows, flow_with(Arc::new(client)))
            .await;

        assert_eq!(stats, BatchStats { total: 6, generated: 0, fallback: 6 });
        assert!(rows.iter().all(|r| r.icebreaker() == Some(FALLBACK_ICEBREAKER)));
    }

    #[tokio::test]
    async fn test_panicking_task_falls_back_without_losing_row() {
        let mut client = ScriptedClient::new(4);
        client.panic_on = Some(2);
        let mut rows = rows(4);

        let stats = BatchScheduler::with_limits(2, 2)
            .run(&mut rows, flow_with(Arc::new(client)))
            .await;

        assert_eq!(stats, BatchStats { total: 4, generated: 3, fallback: 1 });
        assert_eq!(rows[2].icebreaker(), Some(FALLBACK_ICEBREAKER));
        assert_eq!(rows[3].icebreaker(), Some("icebreaker for row3"));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let client = Arc::new(ScriptedClient::new(0));
        let mut rows: Vec<Row> = Vec::new();

        let stats = BatchScheduler::with_limits(5, 50)
            .run(&mut rows, flow_with(client.clone()))
            .await;

        assert_eq!(stats, BatchStats::default());
        assert!(client.events.lock().unwrap().is_empty());
    }
}
